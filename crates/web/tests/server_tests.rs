use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use http::StatusCode;
use indoc::indoc;
use nano_http::connection::ConnectionConfig;
use nano_web::{Matcher, Request, Router, Server, StaticFiles, handler_fn};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Request fixtures are written with `\n`; the wire wants `\r\n`.
fn wire(text: &str) -> Vec<u8> {
    text.replace('\n', "\r\n").into_bytes()
}

async fn start(server: Server) -> SocketAddr {
    let bound = server.bind().await.unwrap();
    let addr = bound.local_addr().unwrap();
    tokio::spawn(bound.serve());
    addr
}

fn server(router: Router) -> Server {
    Server::builder().address("127.0.0.1:0").router(router).build().unwrap()
}

async fn read_response(stream: &mut TcpStream) -> String {
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

async fn send(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    read_response(&mut stream).await
}

fn json_content(response: &str) -> Value {
    let (_, content) = response.split_once("\r\n\r\n").unwrap();
    serde_json::from_str(content.trim_end()).unwrap()
}

async fn echo_name(req: Request) -> String {
    format!("{} {} name={}", req.method(), req.path(), req.body().get("name").unwrap_or("-"))
}

#[tokio::test]
async fn get_with_query_string() {
    let router = Router::builder().route("/status", handler_fn(|req: Request| async move { format!("ok={}", req.body().get("ok").unwrap_or("-")) })).build();
    let addr = start(server(router)).await;

    let response = send(addr, b"GET /status?ok=1 HTTP/1.1\r\nHost: h\r\n\r\n").await;

    assert_eq!(response, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nok=1\n");
}

#[tokio::test]
async fn malformed_status_line_is_rejected_without_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let router = Router::builder()
        .route_with(
            "/",
            Matcher::StartsWith,
            handler_fn(move |_req: Request| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { "dispatched" }
            }),
        )
        .build();
    let addr = start(server(router)).await;

    let response = send(addr, b"GARBAGE\r\n\r\n").await;

    assert_eq!(response, "HTTP/1.1 400 Bad Request\r\n");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let addr = start(server(Router::builder().route("/a", handler_fn(echo_name)).build())).await;

    let response = send(addr, b"GET /b HTTP/1.1\r\n\r\n").await;

    assert_eq!(response, "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\n\r\n404 not found\n");
}

#[tokio::test]
async fn matchers_and_trailing_slash() {
    let router = Router::builder()
        .route("/exact", handler_fn(|_req: Request| async { "exact" }))
        .route_with("/static", Matcher::StartsWith, handler_fn(|_req: Request| async { "starts" }))
        .route_with("/edit", Matcher::EndsWith, handler_fn(|_req: Request| async { "ends" }))
        .route_with("/admin", Matcher::Contains, handler_fn(|_req: Request| async { "contains" }))
        .build();
    let addr = start(server(router)).await;

    let cases = [
        ("/exact/", "exact"),
        ("/static/app.css", "starts"),
        ("/users/7/edit/", "ends"),
        ("/v1/admin/users", "contains"),
    ];
    for (path, expected) in cases {
        let response = send(addr, format!("GET {path} HTTP/1.1\r\n\r\n").as_bytes()).await;
        assert_eq!(response, format!("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n{expected}\n"), "path {path}");
    }

    let response = send(addr, b"GET /exactly HTTP/1.1\r\n\r\n").await;
    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn post_form_body() {
    let addr = start(server(Router::builder().route("/form", handler_fn(echo_name)).build())).await;

    let request = wire(indoc! {"
        POST /form?name=query HTTP/1.1
        Host: h
        Content-Type: application/x-www-form-urlencoded

        name=Ann%20Lee&city=Paris"});
    let response = send(addr, &request).await;

    // payload fields win over query fields with the same key
    assert_eq!(response, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nPOST /form name=Ann Lee\n");
}

#[tokio::test]
async fn post_body_in_a_second_packet() {
    let addr = start(server(Router::builder().route("/form", handler_fn(echo_name)).build())).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"POST /form HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\n").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    stream.write_all(b"name=late").await.unwrap();

    assert_eq!(read_response(&mut stream).await, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nPOST /form name=late\n");
}

#[tokio::test]
async fn post_without_body_times_out_to_empty() {
    let router = Router::builder().route("/form", handler_fn(|req: Request| async move { format!("empty={}", req.body().is_empty()) })).build();
    let config = ConnectionConfig::default().with_body_read_timeout(Duration::from_millis(50));
    let server = Server::builder().address("127.0.0.1:0").router(router).connection_config(config).build().unwrap();
    let addr = start(server).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"POST /form HTTP/1.1\r\nContent-Type: application/json\r\n\r\n").await.unwrap();

    assert_eq!(read_response(&mut stream).await, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nempty=true\n");
}

#[tokio::test]
async fn post_json_body() {
    let router = Router::builder()
        .route(
            "/json",
            handler_fn(|req: Request| async move {
                let value: Value = req.body().json().unwrap_or(Value::Null);
                json!({ "received": value })
            }),
        )
        .build();
    let addr = start(server(router)).await;

    let request = wire(indoc! {r#"
        POST /json?lang=en HTTP/1.1
        Content-Type: application/json

        {"x":1}"#});
    let response = send(addr, &request).await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n"));
    assert_eq!(json_content(&response), json!({ "received": { "x": 1, "lang": "en" } }));
}

#[tokio::test]
async fn malformed_json_degrades_to_empty_body() {
    let router = Router::builder().route("/json", handler_fn(|req: Request| async move { format!("empty={}", req.body().is_empty()) })).build();
    let addr = start(server(router)).await;

    let request = wire(indoc! {"
        POST /json HTTP/1.1
        Content-Type: application/json

        {bad json"});
    let response = send(addr, &request).await;

    assert_eq!(response, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nempty=true\n");
}

#[tokio::test]
async fn post_multipart_form() {
    let router = Router::builder()
        .route(
            "/upload",
            handler_fn(|req: Request| async move {
                let body = req.body();
                let file = body.file("f");
                json!({
                    "a": body.get("a"),
                    "filename": file.map(|f| f.filename()),
                    "content": file.map(|f| String::from_utf8_lossy(f.content()).into_owned()),
                })
            }),
        )
        .build();
    let addr = start(server(router)).await;

    let request = wire(indoc! {r#"
        POST /upload HTTP/1.1
        Content-Type: multipart/form-data; boundary=X

        --X
        Content-Disposition: form-data; name="a"

        hello
        --X
        Content-Disposition: form-data; name="f"; filename="t.txt"
        Content-Type: text/plain

        hi
        --X--
    "#});
    let response = send(addr, &request).await;

    assert_eq!(json_content(&response), json!({ "a": "hello", "filename": "t.txt", "content": "hi" }));
}

#[tokio::test]
async fn handler_error_is_internal_server_error() {
    let router = Router::builder()
        .route(
            "/fail",
            handler_fn(|_req: Request| async { Err::<String, Box<dyn Error + Send + Sync>>("database is down".into()) }),
        )
        .route("/teapot", handler_fn(|_req: Request| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
        .build();
    let addr = start(server(router)).await;

    assert_eq!(send(addr, b"GET /fail HTTP/1.1\r\n\r\n").await, "HTTP/1.1 500 Internal Server Error\r\n");
    assert_eq!(
        send(addr, b"GET /teapot HTTP/1.1\r\n\r\n").await,
        "HTTP/1.1 418 I'm a teapot\r\nContent-Type: text/plain\r\n\r\nshort and stout\n"
    );
}

#[tokio::test]
async fn static_file_fallback() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("page.html"), "<p>page</p>").unwrap();
    std::fs::write(root.path().join("photo.jpg"), "not really a photo").unwrap();

    let router = Router::builder().route("/page.html", handler_fn(|_req: Request| async { "routes first" })).build();
    let server = Server::builder().address("127.0.0.1:0").router(router).static_files(StaticFiles::new(root.path())).build().unwrap();
    let addr = start(server).await;

    assert_eq!(
        send(addr, b"GET /page.html HTTP/1.1\r\n\r\n").await,
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nroutes first\n"
    );
    assert_eq!(
        send(addr, b"GET /photo.jpg HTTP/1.1\r\n\r\n").await,
        "HTTP/1.1 200 OK\r\nX-Content-Type-Options: nosniff\r\nContent-Type: image/png\r\n\r\nnot really a photo\n"
    );
    assert!(send(addr, b"GET /missing.html HTTP/1.1\r\n\r\n").await.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(send(addr, b"GET /../etc/passwd HTTP/1.1\r\n\r\n").await.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[tokio::test]
async fn connections_are_served_in_accept_order() {
    let sequence = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&sequence);
    let router = Router::builder()
        .route(
            "/next",
            handler_fn(move |_req: Request| {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move { n.to_string() }
            }),
        )
        .build();
    let addr = start(server(router)).await;

    // the first connection holds the server until it sends its request
    let mut first = TcpStream::connect(addr).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let mut second = TcpStream::connect(addr).await.unwrap();
    second.write_all(b"GET /next HTTP/1.1\r\n\r\n").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    first.write_all(b"GET /next HTTP/1.1\r\n\r\n").await.unwrap();

    assert_eq!(read_response(&mut first).await, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n1\n");
    assert_eq!(read_response(&mut second).await, "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n2\n");
}
