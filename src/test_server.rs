//! In-process HTTP server for exercising the fetch pipeline without touching the network.

use axum::http::StatusCode;
use axum::routing::{get, MethodRouter};
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Binds a server on an ephemeral local port and returns its base URL.
///
/// `build` receives the base URL so routes can point at each other.
pub(crate) async fn spawn_server<F>(build: F) -> String
where
    F: FnOnce(&str) -> Router,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));
    let app = build(&base);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    base
}

/// A GET route that always answers with `status` and `body`.
pub(crate) fn canned(status: StatusCode, body: impl Into<String>) -> MethodRouter {
    let body = body.into();
    get(move || {
        let body = body.clone();
        async move { (status, body) }
    })
}

/// Answers one connection with `response` written verbatim, then closes it.
pub(crate) async fn spawn_raw_server(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let _ = socket.write_all(response).await;
        let _ = socket.shutdown().await;
    });
    base
}
