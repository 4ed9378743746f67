use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
#[allow(dead_code)]
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().expect("Failed to read upstream address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Upstream server failed");
    });

    format!("http://{}", addr)
}

/// Base URL of a port nothing is listening on
#[allow(dead_code)]
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Failed to read throwaway address");
    drop(listener);

    format!("http://{}", addr)
}
