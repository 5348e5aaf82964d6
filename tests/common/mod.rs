// Not every util is used in every test, so we allow dead code
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

/// Router under test, identical to the one the binary serves
pub fn router() -> Router {
    r2drive::routes::handler()
}

/// A well-formed store configuration, as the browser would persist it
pub fn demo_config_json() -> serde_json::Value {
    serde_json::json!({
        "region": "auto",
        "endpoint": "https://demo.r2.cloudflarestorage.com",
        "accessKeyId": "AKIAEXAMPLE",
        "secretAccessKey": "secret",
        "bucket": "demo"
    })
}

/// Cookie header value carrying the demo configuration
pub fn config_cookie() -> String {
    format!("r2Config={}", demo_config_json())
}

/// Cookie header value carrying the demo configuration, pointed at the
/// given endpoint
pub fn config_cookie_for_endpoint(endpoint: &str) -> String {
    let mut config = demo_config_json();
    config["endpoint"] = serde_json::Value::from(endpoint);
    format!("r2Config={config}")
}

/// Configuration pointing at a port nothing listens on, for 500-path tests
pub fn unreachable_config_cookie() -> String {
    config_cookie_for_endpoint("http://127.0.0.1:1")
}

/// Minimal store double: answers every connection with the same canned HTTP
/// response, the way the store would for the one covered call. Returns the
/// endpoint URL to put in the configuration cookie (an IP endpoint, so the
/// client addresses the bucket path-style).
pub async fn spawn_stub_store(response: String) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub store");
    let addr = listener.local_addr().expect("stub store has no local addr");
    let response: std::sync::Arc<str> = response.into();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let response = response.clone();
            tokio::spawn(async move {
                let mut buf = vec![0_u8; 16 * 1024];
                let mut read = 0;
                // drain the request head before answering
                while read < buf.len() {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            read += n;
                            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// A 200 `ListBucketResult` response wrapping the given `<Contents>` entries
pub fn stub_list_response(contents_xml: &str) -> String {
    let body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ListBucketResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
         <Name>demo</Name><Prefix></Prefix><MaxKeys>1000</MaxKeys>\
         <IsTruncated>false</IsTruncated>{contents_xml}</ListBucketResult>"
    );
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/xml\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// The 204 a store answers a delete with, present key or not
pub fn no_content_response() -> String {
    "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
}

pub async fn send(request: Request<Body>) -> Response {
    router().oneshot(request).await.expect("request failed")
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn json_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    payload: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(payload.to_string()))
        .expect("failed to build request")
}

pub fn empty_post_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub const MULTIPART_BOUNDARY: &str = "test-boundary";

/// Builds a multipart/form-data request with the given raw parts
pub fn multipart_request(uri: &str, cookie: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("failed to build request")
}

/// One `file` part carrying the given filename, content type and bytes
pub fn file_part(filename: &str, content_type: &str, contents: &str) -> String {
    format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         {contents}\r\n\
         --{MULTIPART_BOUNDARY}--\r\n"
    )
}

/// A multipart body with no `file` part at all
pub fn part_without_file() -> String {
    format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"notes\"\r\n\
         \r\n\
         not a file\r\n\
         --{MULTIPART_BOUNDARY}--\r\n"
    )
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not JSON")
}
