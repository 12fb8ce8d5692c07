//! In-process mock of the ArangoDB HTTP API, served with axum.
//!
//! Holds just enough state (collections, graphs, AQL functions, scripted
//! query results and transaction results) to drive the client end to end.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use arangodb_client::{ClientConfig, Database};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

pub type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
pub struct MockState {
    /// `(name, is_system)` in creation order
    pub collections: Vec<(String, bool)>,
    pub graphs: Vec<String>,
    pub functions: BTreeMap<String, String>,
    /// Query text → full result set
    pub queries: HashMap<String, Vec<Value>>,
    /// Transaction action → result value
    pub transactions: HashMap<String, Value>,
    cursors: HashMap<String, (VecDeque<Value>, usize)>,
    next_cursor_id: u64,
    pub cursor_creations: usize,
    pub explain_calls: usize,
}

pub type Shared = Arc<Mutex<MockState>>;

fn error(status: StatusCode, num: u32, message: &str) -> Reply {
    (
        status,
        Json(json!({
            "error": true,
            "code": status.as_u16(),
            "errorNum": num,
            "errorMessage": message
        })),
    )
}

fn ok(status: StatusCode, body: Value) -> Reply {
    (status, Json(body))
}

/// Start the mock server on an ephemeral port
pub async fn spawn_server() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(MockState {
        collections: vec![("_graphs".to_string(), true), ("_users".to_string(), true)],
        ..MockState::default()
    }));

    let app = Router::new()
        .route("/_db/:db/_api/database/current", get(database_current))
        .route("/_db/:db/_api/collection", get(list_collections).post(add_collection))
        .route("/_db/:db/_api/collection/:name", delete(remove_collection))
        .route("/_db/:db/_api/collection/:name/rename", put(rename_collection))
        .route("/_db/:db/_api/explain", post(explain))
        .route("/_db/:db/_api/query", post(validate))
        .route("/_db/:db/_api/cursor", post(create_cursor))
        .route("/_db/:db/_api/cursor/:id", put(next_batch).delete(delete_cursor))
        .route("/_db/:db/_api/aqlfunction", get(list_functions).post(add_function))
        .route("/_db/:db/_api/aqlfunction/:name", delete(remove_function))
        .route("/_db/:db/_api/transaction", post(transaction))
        .route("/_db/:db/_api/gharial", get(list_graphs).post(add_graph))
        .route("/_db/:db/_api/gharial/:name", delete(remove_graph))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

/// Facade for database `shop` on the mock server
pub fn connect(url: &str) -> Database {
    let config = ClientConfig {
        url: url.to_string(),
        database: "shop".to_string(),
        password: Some("secret".to_string()),
        ..ClientConfig::default()
    };
    Database::connect(&config).unwrap()
}

async fn database_current(Path(db): Path<String>) -> Reply {
    ok(
        StatusCode::OK,
        json!({
            "result": {"id": "42", "name": db, "path": "/tmp/db-42", "isSystem": db == "_system"}
        }),
    )
}

async fn list_collections(State(state): State<Shared>) -> Reply {
    let state = state.lock().unwrap();
    let collections: Vec<Value> = state
        .collections
        .iter()
        .map(|(name, is_system)| json!({"name": name, "isSystem": is_system}))
        .collect();
    ok(StatusCode::OK, json!({"collections": collections}))
}

async fn add_collection(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if state.collections.iter().any(|(n, _)| *n == name) {
        return error(StatusCode::CONFLICT, 1207, "duplicate name");
    }
    let is_system = body["isSystem"].as_bool().unwrap_or(false);
    state.collections.push((name.clone(), is_system));
    ok(StatusCode::OK, json!({"name": name, "isSystem": is_system, "type": body["type"]}))
}

async fn remove_collection(
    State(state): State<Shared>,
    Path((_db, name)): Path<(String, String)>,
) -> Reply {
    let mut state = state.lock().unwrap();
    let before = state.collections.len();
    state.collections.retain(|(n, _)| *n != name);
    if state.collections.len() == before {
        return error(StatusCode::NOT_FOUND, 1203, "collection or view not found");
    }
    ok(StatusCode::OK, json!({"id": "1"}))
}

async fn rename_collection(
    State(state): State<Shared>,
    Path((_db, name)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().unwrap();
    let new_name = body["name"].as_str().unwrap_or_default().to_string();
    match state.collections.iter_mut().find(|(n, _)| *n == name) {
        Some(entry) => {
            entry.0 = new_name.clone();
            ok(StatusCode::OK, json!({"name": new_name}))
        }
        None => error(StatusCode::NOT_FOUND, 1203, "collection or view not found"),
    }
}

async fn explain(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    state.explain_calls += 1;
    let query = body["query"].as_str().unwrap_or_default();
    if !state.queries.contains_key(query) {
        return error(StatusCode::BAD_REQUEST, 1501, "syntax error");
    }
    let plan = json!({"nodes": [{"type": "SingletonNode"}], "estimatedCost": 1});
    if body["options"]["allPlans"].as_bool().unwrap_or(false) {
        ok(StatusCode::OK, json!({"plans": [plan.clone(), plan]}))
    } else {
        ok(StatusCode::OK, json!({"plan": plan, "cacheable": true}))
    }
}

async fn validate(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let state = state.lock().unwrap();
    let query = body["query"].as_str().unwrap_or_default();
    if state.queries.contains_key(query) {
        ok(StatusCode::OK, json!({"bindVars": [], "collections": []}))
    } else {
        error(StatusCode::BAD_REQUEST, 1501, "syntax error")
    }
}

fn take_batch(results: &mut VecDeque<Value>, batch_size: usize) -> Vec<Value> {
    let n = batch_size.min(results.len());
    results.drain(..n).collect()
}

async fn create_cursor(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    let query = body["query"].as_str().unwrap_or_default();
    let Some(results) = state.queries.get(query).cloned() else {
        return error(StatusCode::BAD_REQUEST, 1501, "syntax error");
    };
    state.cursor_creations += 1;

    let total = results.len();
    let batch_size = body["batchSize"].as_u64().unwrap_or(1000) as usize;
    let mut remaining: VecDeque<Value> = results.into();
    let batch = take_batch(&mut remaining, batch_size);

    let mut reply = json!({
        "result": batch,
        "hasMore": !remaining.is_empty(),
        "error": false,
        "code": 201
    });
    if body["count"].as_bool().unwrap_or(false) {
        reply["count"] = json!(total);
    }
    if body["options"]["fullCount"].as_bool().unwrap_or(false) {
        reply["extra"] = json!({"stats": {"fullCount": total}});
    }
    if !remaining.is_empty() {
        state.next_cursor_id += 1;
        let id = state.next_cursor_id.to_string();
        reply["id"] = json!(id);
        state.cursors.insert(id, (remaining, batch_size));
    }
    ok(StatusCode::CREATED, reply)
}

async fn next_batch(State(state): State<Shared>, Path((_db, id)): Path<(String, String)>) -> Reply {
    let mut state = state.lock().unwrap();
    let Some((remaining, batch_size)) = state.cursors.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, 1600, "cursor not found");
    };
    let batch = take_batch(remaining, *batch_size);
    let has_more = !remaining.is_empty();
    if !has_more {
        state.cursors.remove(&id);
    }
    ok(StatusCode::OK, json!({"result": batch, "hasMore": has_more, "id": id}))
}

async fn delete_cursor(
    State(state): State<Shared>,
    Path((_db, id)): Path<(String, String)>,
) -> Reply {
    let mut state = state.lock().unwrap();
    match state.cursors.remove(&id) {
        Some(_) => ok(StatusCode::ACCEPTED, json!({"id": id})),
        None => error(StatusCode::NOT_FOUND, 1600, "cursor not found"),
    }
}

async fn list_functions(State(state): State<Shared>) -> Reply {
    let state = state.lock().unwrap();
    let functions: Vec<Value> = state
        .functions
        .iter()
        .map(|(name, code)| json!({"name": name, "code": code}))
        .collect();
    ok(StatusCode::OK, Value::Array(functions))
}

async fn add_function(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let code = body["code"].as_str().unwrap_or_default().to_string();
    if !name.contains("::") {
        return error(StatusCode::BAD_REQUEST, 1580, "invalid user function name");
    }
    let existed = state.functions.insert(name, code).is_some();
    let status = if existed { StatusCode::OK } else { StatusCode::CREATED };
    ok(status, json!({"error": false, "isNewlyCreated": !existed}))
}

async fn remove_function(
    State(state): State<Shared>,
    Path((_db, name)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let mut state = state.lock().unwrap();
    let group = params.get("group").map(|g| g == "true").unwrap_or(false);
    let before = state.functions.len();
    if group {
        state.functions.retain(|n, _| !n.starts_with(&name));
    } else {
        state.functions.remove(&name);
    }
    let deleted = before - state.functions.len();
    if deleted == 0 {
        return error(StatusCode::NOT_FOUND, 1582, "user function not found");
    }
    ok(StatusCode::OK, json!({"error": false, "deletedCount": deleted}))
}

async fn transaction(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let state = state.lock().unwrap();
    for kind in ["read", "write"] {
        let declared = body["collections"][kind].as_array().cloned().unwrap_or_default();
        for name in declared {
            let name = name.as_str().unwrap_or_default();
            if !state.collections.iter().any(|(n, _)| n == name) {
                return error(StatusCode::NOT_FOUND, 1203, "collection or view not found");
            }
        }
    }
    let action = body["action"].as_str().unwrap_or_default();
    match state.transactions.get(action) {
        Some(result) => ok(StatusCode::OK, json!({"error": false, "code": 200, "result": result})),
        None => error(StatusCode::BAD_REQUEST, 10, "bad parameter"),
    }
}

async fn list_graphs(State(state): State<Shared>) -> Reply {
    let state = state.lock().unwrap();
    let graphs: Vec<Value> = state
        .graphs
        .iter()
        .map(|name| json!({"_key": name, "_id": format!("_graphs/{}", name)}))
        .collect();
    ok(StatusCode::OK, json!({"graphs": graphs}))
}

async fn add_graph(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if state.graphs.contains(&name) {
        return error(StatusCode::CONFLICT, 1925, "graph already exists");
    }
    let edge_collections: Vec<String> = body["edgeDefinitions"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|d| d["collection"].as_str().map(str::to_string))
        .collect();
    for collection in edge_collections {
        if !state.collections.iter().any(|(n, _)| *n == collection) {
            state.collections.push((collection, false));
        }
    }
    state.graphs.push(name.clone());
    ok(
        StatusCode::CREATED,
        json!({"graph": {"name": name, "edgeDefinitions": body["edgeDefinitions"]}}),
    )
}

async fn remove_graph(
    State(state): State<Shared>,
    Path((_db, name)): Path<(String, String)>,
) -> Reply {
    let mut state = state.lock().unwrap();
    let before = state.graphs.len();
    state.graphs.retain(|n| *n != name);
    if state.graphs.len() == before {
        return error(StatusCode::NOT_FOUND, 1924, "graph not found");
    }
    ok(StatusCode::OK, json!({"removed": true}))
}
