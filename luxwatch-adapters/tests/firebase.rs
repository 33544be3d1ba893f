//! Firebase adapter against a local stand-in server.

#![cfg(feature = "firebase")]

use std::time::Duration;

use luxwatch_adapters::firebase::FirebaseAdapter;
use luxwatch_adapters::{AdapterError, FetchOutcome, Fetcher};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Serve a single canned response. Returns the base URL and the request line.
async fn serve_once(response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), rx)
}

fn adapter(endpoint: &str, timeout: Duration) -> FirebaseAdapter {
    FirebaseAdapter::builder()
        .endpoint(endpoint)
        .timeout(timeout)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_success_reads_sensor_data_json() {
    let body = r#"{"2025-11-19":{"10:20:59":{"light_inte":39,"raw":2511}}}"#;
    let (url, request) = serve_once(http_response("200 OK", body)).await;

    let outcome = adapter(&url, Duration::from_secs(5)).fetch("sensor_data").await;

    assert_eq!(
        outcome,
        FetchOutcome::Success(json!({"2025-11-19": {"10:20:59": {"light_inte": 39, "raw": 2511}}}))
    );
    assert_eq!(request.await.unwrap(), "GET /sensor_data.json HTTP/1.1");
}

#[tokio::test]
async fn test_null_body_is_empty() {
    let (url, _request) = serve_once(http_response("200 OK", "null")).await;
    let outcome = adapter(&url, Duration::from_secs(5)).fetch("sensor_data").await;
    assert_eq!(outcome, FetchOutcome::Empty);
}

#[tokio::test]
async fn test_forbidden_is_unauthorized() {
    let body = r#"{"error":"Permission denied"}"#;
    let (url, _request) = serve_once(http_response("403 Forbidden", body)).await;
    let outcome = adapter(&url, Duration::from_secs(5)).fetch("sensor_data").await;
    assert_eq!(outcome, FetchOutcome::Failure(AdapterError::Unauthorized(403)));
}

#[tokio::test]
async fn test_unauthorized_status() {
    let (url, _request) = serve_once(http_response("401 Unauthorized", "{}")).await;
    let outcome = adapter(&url, Duration::from_secs(5)).fetch("sensor_data").await;
    assert_eq!(outcome, FetchOutcome::Failure(AdapterError::Unauthorized(401)));
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let (url, _request) = serve_once(http_response("500 Internal Server Error", "{}")).await;
    let outcome = adapter(&url, Duration::from_secs(5)).fetch("sensor_data").await;
    assert_eq!(outcome, FetchOutcome::Failure(AdapterError::Http(500)));
}

#[tokio::test]
async fn test_invalid_json_is_parse_failure() {
    let (url, _request) = serve_once(http_response("200 OK", "not json")).await;
    let outcome = adapter(&url, Duration::from_secs(5)).fetch("sensor_data").await;
    assert!(matches!(outcome, FetchOutcome::Failure(AdapterError::Parse(_))));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        }
    });

    let outcome = adapter(&format!("http://{}", addr), Duration::from_millis(200))
        .fetch("sensor_data")
        .await;
    assert_eq!(outcome, FetchOutcome::Failure(AdapterError::Timeout));
}

#[tokio::test]
async fn test_refused_connection_is_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = adapter(&format!("http://{}", addr), Duration::from_secs(5))
        .fetch("sensor_data")
        .await;
    assert!(matches!(outcome, FetchOutcome::Failure(AdapterError::Connection(_))));
}
