use actix_web::{get, web, App, HttpServer, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    message: String,
    status: String,
}

#[get("/")]
async fn root() -> impl Responder {
    web::Json(Status {
        message: "Hello World".to_string(),
        status: "ok".to_string(),
    })
}

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(Status {
        message: String::new(),
        status: "healthy".to_string(),
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Server running on http://localhost:8000");
    HttpServer::new(|| App::new().service(root).service(health))
        .bind(("0.0.0.0", 8000))?
        .run()
        .await
}
