//! Test support: local stub servers and pre-wired transports.

use axum::Router;

use crate::config::ClientConfig;
use crate::transport::HttpTransport;

/// Serves the router on an ephemeral local port, returning the base URL.
pub(crate) async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().expect("stub server addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });

    format!("http://{}", addr)
}

/// A transport pointed at the given stub server, short timeout.
pub(crate) fn transport_to(base_url: &str) -> HttpTransport {
    let mut config = ClientConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 5;
    HttpTransport::new(&config).expect("build transport")
}
