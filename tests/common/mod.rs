#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::RequestBuilder;

use customer_api::database::{Customer, CustomerStore};
use customer_api::testing::MemoryCustomerStore;
use customer_api::{app, AppOptions, AppState};

pub const TOKEN: &str = "token2019";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serve the router on a free local port for the lifetime of the test runtime
pub async fn spawn_server(store: Arc<dyn CustomerStore>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind {}", base_url))?;

    let options = AppOptions {
        token: TOKEN.to_string(),
        enable_request_logging: false,
    };
    let router = app(AppState::new(store), &options);

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer { port, base_url })
}

/// Server backed by a fresh in-memory store; the store is returned for inspection
pub async fn spawn_memory_server() -> Result<(TestServer, Arc<MemoryCustomerStore>)> {
    let store = Arc::new(MemoryCustomerStore::new());
    let server = spawn_server(store.clone()).await?;
    Ok((server, store))
}

/// Attach the shared-secret header
pub fn authorized(builder: RequestBuilder) -> RequestBuilder {
    builder.header("Authorization", TOKEN)
}

/// True when name, email and status match, ignoring the id
pub fn same_fields(a: &Customer, b: &Customer) -> bool {
    a.name == b.name && a.email == b.email && a.status == b.status
}
