use algograph::config::Config;
use algograph::engine::Limits;
use algograph::http::{AppState, create_router};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: Config) -> Router {
    create_router(&Arc::new(AppState {
        config: Arc::new(config),
    }))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_run(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/run")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn triangle() -> Value {
    json!({
        "nodes": [{"id": "A", "x": 0, "y": 0}, {"id": "B", "x": 1, "y": 0}, {"id": "C", "x": 0, "y": 1}],
        "edges": [
            {"id": "A-B", "source": "A", "target": "B", "weight": 1},
            {"id": "B-C", "source": "B", "target": "C", "weight": 2},
            {"id": "A-C", "source": "A", "target": "C", "weight": 5}
        ],
        "isDirected": false
    })
}

#[tokio::test]
async fn test_run_dijkstra() {
    let body = json!({
        "algorithm": "dijkstra",
        "graph": triangle(),
        "parameters": {"source": "A", "target": "C"}
    });
    let (status, json) = send(app(Config::default()), post_run(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "dijkstra");
    assert_eq!(json["truncated"], false);
    assert!(json.get("spanningComplete").is_none());

    let last = json["steps"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(
        last["description"],
        "Shortest path from A to C: A -> B -> C, total length 3."
    );
    assert_eq!(last["highlightNodes"]["B"], "#10b981");
    assert_eq!(last["highlightEdges"]["B-C"], "#10b981");
    assert_eq!(last["nodeLabels"]["C"], "3");
}

#[tokio::test]
async fn test_run_kruskal_reports_spanning_state() {
    let body = json!({"algorithm": "kruskal", "graph": triangle()});
    let (status, json) = send(app(Config::default()), post_run(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["spanningComplete"], true);
    let rejected = json["steps"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["description"].as_str().unwrap().starts_with("Reject"))
        .unwrap();
    assert_eq!(rejected["highlightEdges"]["A-C"], "#ef4444");
}

#[tokio::test]
async fn test_run_accepts_top_level_parameters() {
    let body = json!({"algorithm": "bfs", "graph": triangle(), "startNode": "C"});
    let (status, json) = send(app(Config::default()), post_run(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["steps"][0]["description"], "Starting BFS from node C.");
}

#[tokio::test]
async fn test_incomplete_nodes_and_edges_are_dropped_not_rejected() {
    let body = json!({
        "algorithm": "bfs",
        "graph": {
            "nodes": [{"x": 0, "y": 0}, {"id": "A"}, {"id": "B"}],
            "edges": [
                {"id": "half", "source": "A"},
                {"id": "ab", "source": "A", "target": "B"}
            ]
        }
    });
    let (status, json) = send(app(Config::default()), post_run(body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps[0]["description"], "Starting BFS from node A.");
    assert_eq!(
        steps.last().unwrap()["description"],
        "BFS finished. Reached 2 of 2 nodes."
    );
    assert!(steps.iter().all(|s| s["highlightEdges"].get("half").is_none()));
}

#[tokio::test]
async fn test_unknown_algorithm_lists_supported_ones() {
    let body = json!({"algorithm": "astar", "graph": triangle()});
    let (status, json) = send(app(Config::default()), post_run(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("astar"));
    let supported = json["supported_algorithms"].as_array().unwrap();
    assert_eq!(supported.len(), 6);
    assert!(supported.contains(&json!("bellman_ford")));
}

#[tokio::test]
async fn test_malformed_body_is_a_bad_request() {
    let (status, json) = send(app(Config::default()), post_run("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let missing_graph = json!({"algorithm": "bfs"}).to_string();
    let (status, _) = send(app(Config::default()), post_run(missing_graph)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_graph_is_rejected() {
    let config = Config {
        limits: Limits {
            max_nodes: 2,
            ..Limits::default()
        },
        ..Config::default()
    };
    let body = json!({"algorithm": "bfs", "graph": triangle()});
    let (status, json) = send(app(config), post_run(body.to_string())).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_list_algorithms() {
    let (status, json) = send(app(Config::default()), get("/api/algorithms")).await;

    assert_eq!(status, StatusCode::OK);
    let algorithms = json["algorithms"].as_array().unwrap();
    assert_eq!(algorithms.len(), 6);
    assert_eq!(algorithms[0]["id"], "bfs");
    assert_eq!(algorithms[3]["name"], "Bellman-Ford");
}

#[tokio::test]
async fn test_health() {
    let (status, json) = send(app(Config::default()), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["supported_algorithms"][0], "bfs");
}

#[tokio::test]
async fn test_run_request_schema() {
    let (status, json) = send(app(Config::default()), get("/api/schema/run-request")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["properties"]["algorithm"].is_object());
    assert!(json["properties"]["graph"].is_object());
}

#[tokio::test]
async fn test_unknown_path() {
    let (status, json) = send(app(Config::default()), get("/api/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Not Found");
}
