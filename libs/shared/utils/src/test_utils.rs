use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use shared_config::ClientConfig;

pub struct TestConfig {
    pub api_key: String,
    pub partner_secret: String,
    pub base_url: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_key: "12345678".to_string(),
            partner_secret: "test-partner-secret-must-be-long-enough".to_string(),
            base_url: None,
        }
    }
}

impl TestConfig {
    /// Point the client at a mock server, e.g. `MockServer::uri()`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn to_client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_key.clone(), self.partner_secret.clone());
        match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    pub fn to_arc(&self) -> Arc<ClientConfig> {
        Arc::new(self.to_client_config())
    }
}

pub struct MockOpenTokResponses;

impl MockOpenTokResponses {
    /// Body of a successful `/session/create` call.
    pub fn session_response(session_id: &str, api_key: &str) -> serde_json::Value {
        json!([{
            "session_id": session_id,
            "project_id": api_key,
            "partner_id": api_key,
            "create_dt": "Mon Mar 17 00:41:31 PDT 2014",
            "media_server_url": ""
        }])
    }

    pub fn random_session_id() -> String {
        format!("2_MX4{}-fn4", Uuid::new_v4().simple())
    }

    pub fn error_response(message: &str, code: u16) -> serde_json::Value {
        json!({
            "code": code,
            "message": message
        })
    }
}
