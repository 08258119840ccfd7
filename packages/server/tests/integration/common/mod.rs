
use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;

use server::config::{AppConfig, CorsConfig, DataServiceConfig, ServerConfig};
use server::state::AppState;

use fake_data_service::{FakeData, SERVICE_KEY};

pub mod routes {
    pub const ROLES: &str = "/api/admin/roles";
    pub const STAFF: &str = "/api/admin/staff";
    pub const STAFF_LIST: &str = "/api/admin/staff-list";
    pub const OPENAPI: &str = "/api-docs/openapi.json";

    pub fn role(id: &str) -> String {
        format!("/api/admin/roles/{id}")
    }

    pub fn staff_by_email(email: &str) -> String {
        format!("/api/admin/staff?email={email}")
    }
}

/// A running server wired to a fake data service.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub data: Arc<FakeData>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    /// Spawn with the data service configured and reachable.
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn after letting `configure` adjust the config that points at the
    /// fake data service.
    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let data = Arc::new(FakeData::default());
        let data_addr = fake_data_service::spawn(data.clone()).await;

        let mut app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            data_service: DataServiceConfig {
                url: Some(format!("http://{data_addr}")),
                service_role_key: Some(SERVICE_KEY.to_string()),
            },
        };
        configure(&mut app_config);

        let state = AppState::from_config(app_config).expect("Failed to build app state");
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            data,
        }
    }

    /// Spawn without data service settings.
    pub async fn spawn_unconfigured() -> Self {
        Self::spawn_with(|config| config.data_service = DataServiceConfig::default()).await
    }

    /// Spawn pointing at an address nothing listens on.
    pub async fn spawn_unreachable() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let dead_addr = listener.local_addr().unwrap();
        drop(listener);

        Self::spawn_with(|config| config.data_service.url = Some(format!("http://{dead_addr}")))
            .await
    }

    pub fn seed_roles(&self, roles: Vec<Value>) {
        self.data.roles.lock().unwrap().extend(roles);
    }

    pub fn seed_staff(&self, staff: Vec<Value>) {
        self.data.staff.lock().unwrap().extend(staff);
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PATCH request");

        TestResponse::from_response(res).await
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}
