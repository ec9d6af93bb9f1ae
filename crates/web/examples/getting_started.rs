use http::StatusCode;
use nano_web::{Matcher, Request, Response, Router, Server, ServerError, StaticFiles, handler_fn};
use serde::Deserialize;
use serde_json::json;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Deserialize, Debug)]
pub struct User {
    name: String,
    zip: String,
}

// curl -v "http://127.0.0.1:8080/?name=hello"
async fn index(req: Request) -> String {
    format!("hello {}\r\n", req.body().get("name").unwrap_or("world"))
}

// curl -v -H 'Content-Type: application/x-www-form-urlencoded' -d 'name=hello&zip=world' http://127.0.0.1:8080/user
// curl -v -H 'Content-Type: application/json' -d '{"name":"hello","zip":"world"}' http://127.0.0.1:8080/user
async fn user(req: Request) -> Result<String, (StatusCode, &'static str)> {
    let user: User = req.body().json().map_err(|e| {
        info!(cause = %e, "can't read user");
        (StatusCode::BAD_REQUEST, "expect name and zip")
    })?;
    info!(?user, "receive user");
    Ok(format!("receive user: {} at {}\r\n", user.name, user.zip))
}

// curl -v -F 'title=notes' -F 'file=@README.md' http://127.0.0.1:8080/upload
async fn upload(req: Request) -> serde_json::Value {
    let body = req.body();
    json!({
        "title": body.get("title"),
        "filename": body.file("file").map(|file| file.filename()),
        "size": body.file("file").map(|file| file.content().len()),
    })
}

// curl -v http://127.0.0.1:8080/api/anything
async fn api(req: Request) -> Response {
    Response::ok(format!("api call: {} {}", req.method(), req.path())).with_nosniff()
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router = Router::builder()
        .route("/", handler_fn(index))
        .route("/user", handler_fn(user))
        .route("/upload", handler_fn(upload))
        .route_with("/api", Matcher::StartsWith, handler_fn(api))
        .route_with("/health", Matcher::EndsWith, handler_fn(|_req: Request| async { "ok" }))
        .try_route("/admin", "contains", handler_fn(|_req: Request| async { (StatusCode::FORBIDDEN, "no admin here") }))?
        .build();

    // any other path is looked up as a file under the working directory
    Server::builder()
        .address("127.0.0.1:8080")
        .router(router)
        .static_files(StaticFiles::default())
        .build()?
        .start()
        .await
}
