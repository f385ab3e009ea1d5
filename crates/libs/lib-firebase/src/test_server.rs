//! Local HTTP server standing in for the Google endpoints in tests.

use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read test server address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}
