use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use relaygate_server::app::create_router;
use relaygate_server::configs::{Auth, Database, SchemaManager, Storage};
use relaygate_server::services::TokenService;
use relaygate_server::tests::setup_test_db;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test";

pub struct MockApp {
    pub router: Router,
    pub storage: Arc<Storage>,
    pub token_service: Arc<TokenService>,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_storage(setup_test_db().await)
    }

    /// App backed by a SQLite file with a multi-connection pool.
    pub async fn with_database_file(path: &std::path::Path) -> Self {
        let storage = Storage::new(
            Database {
                url: format!("sqlite://{}?mode=rwc", path.display()),
                clean_start: true,
                max_connections: 10,
            },
            SchemaManager::default(),
        )
        .await
        .unwrap();

        Self::with_storage(Arc::new(storage))
    }

    fn with_storage(storage: Arc<Storage>) -> Self {
        let auth = Auth {
            secret: String::from(TEST_SECRET),
            expiration: 3600,
        };

        Self {
            router: create_router(storage.clone(), auth.clone()),
            storage,
            token_service: Arc::new(TokenService::new(auth)),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    pub async fn register(&self, enroll_id: &str, device_name: &str, status: &str) -> Value {
        let (code, body) = self
            .send(
                Method::POST,
                "/register-device",
                None,
                Some(json!({
                    "enroll_id": enroll_id,
                    "device_name": device_name,
                    "status": status,
                })),
            )
            .await;
        assert!(code == StatusCode::CREATED || code == StatusCode::OK);

        body
    }

    pub async fn login(&self, enroll_id: &str) -> String {
        let (code, body) = self
            .send(
                Method::POST,
                "/login-device",
                None,
                Some(json!({ "enrollId": enroll_id })),
            )
            .await;
        assert_eq!(code, StatusCode::OK);

        body["token"].as_str().unwrap().to_string()
    }
}
