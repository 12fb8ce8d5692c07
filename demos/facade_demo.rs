//! Walk through the database facade against a running ArangoDB server.
//!
//! ```text
//! ARANGO_PASSWORD=secret cargo run --example facade_demo
//! ```

use arangodb_client::{
    ArangoError, ClientConfig, CollectionCreateSpec, Database, EdgeDefinition, ExplainOptions,
    GraphSpec, QueryRequest, TransactionSpec,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("ArangoDB client v{}", arangodb_client::VERSION);
    println!("==========================================");

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ArangoError> {
    let config = ClientConfig {
        password: std::env::var("ARANGO_PASSWORD").ok(),
        ..ClientConfig::default()
    };
    let db = Database::connect(&config)?;

    let props = db.properties().await?;
    println!("Connected to '{}' (id {}, system: {})", props.name, props.id, props.is_system);

    println!("\n=== Collections ===");
    let users = db.add_collection(CollectionCreateSpec::new("demo_users")).await?;
    println!("✓ Created collection {}", users.name());
    let list = db.collections().await?;
    println!("  user collections: {:?}", list.user);

    println!("\n=== Queries ===");
    let query = "FOR i IN 1..10 RETURN i * i";
    db.validate_query(query).await?;
    let plan = db.explain_query(query, &ExplainOptions::default()).await?;
    println!("✓ Query is valid, {} plan(s)", plan.plans().len());

    let cursor = db.execute_query(&QueryRequest::new(query).batch_size(4).count(true)).await?;
    println!("  first batch: {} of {:?} results", cursor.batch().len(), cursor.count());
    println!("  all results: {:?}", cursor.collect_all().await?);

    println!("\n=== AQL functions ===");
    let functions = db
        .add_aql_function("demo::double", "function (x) { return x * 2; }")
        .await?;
    println!("✓ Registered functions: {:?}", functions.keys().collect::<Vec<_>>());
    db.remove_aql_function("demo::", Some(true)).await?;

    println!("\n=== Transactions ===");
    let transaction = TransactionSpec::new("function () { return 1 + 1; }").read(["demo_users"]);
    let result = db.execute_transaction(&transaction).await?;
    println!("✓ Transaction returned {}", result);

    println!("\n=== Graphs ===");
    let graph = db
        .add_graph(
            GraphSpec::new("demo_social")
                .edge_definition(EdgeDefinition::new("demo_knows", ["demo_users"], ["demo_users"])),
        )
        .await?;
    println!("✓ Created graph {}", graph.name());

    db.remove_graph("demo_social").await?;
    db.remove_collection("demo_knows").await?;
    db.remove_collection("demo_users").await?;
    println!("\n✓ Cleaned up");
    Ok(())
}
