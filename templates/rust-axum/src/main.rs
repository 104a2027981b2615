use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    message: String,
    status: String,
}

async fn root() -> Json<Status> {
    Json(Status {
        message: "Hello World".to_string(),
        status: "ok".to_string(),
    })
}

async fn health() -> Json<Status> {
    Json(Status {
        message: String::new(),
        status: "healthy".to_string(),
    })
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();
    println!("Server running on http://localhost:8000");
    axum::serve(listener, app).await.unwrap();
}
