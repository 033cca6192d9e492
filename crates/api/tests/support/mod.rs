#![allow(dead_code)]

use std::sync::Arc;

use nutrifacts_api::app::{build_app, AppServices};
use serde_json::{json, Value};

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Serve the production router on an ephemeral port.
    pub async fn spawn(services: AppServices) -> Self {
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    pub async fn in_memory() -> Self {
        Self::spawn(AppServices::in_memory()).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A complete, valid product body.
pub fn product_json(ean: &str, name: &str) -> Value {
    json!({
        "ean": ean,
        "name": name,
        "packaging": { "value": 500.0, "unit": "g" },
        "nutrition": {
            "per": { "value": 100.0, "unit": "g" },
            "kcal": 378,
            "nutrients": [
                { "type": "FAT", "quantity": { "value": 6.5, "unit": "g" } },
                { "type": "CARBOHYDRATES", "quantity": { "value": 60.0, "unit": "g" } },
                { "type": "PROTEIN", "quantity": { "value": 13.0, "unit": "g" } }
            ],
            "vitamins": [
                { "type": "B1", "quantity": { "value": 0.5, "unit": "mg" } }
            ],
            "minerals": [
                { "type": "IRON", "quantity": { "value": 4.2, "unit": "mg" } },
                { "type": "ZINC", "quantity": { "value": 3.1, "unit": "mg" } }
            ]
        }
    })
}
