// libs/session-cell/src/services/opentok.rs
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use shared_config::ClientConfig;
use shared_utils::jwt::sign_project_token;

use crate::models::{CreateSessionRequest, Session, SessionError};

/// Header carrying the project token on every REST call.
pub const AUTH_HEADER: &str = "X-OPENTOK-AUTH";

/// OpenTok REST API client for creating sessions
/// Based on: https://tokbox.com/developer/rest/#session_id_production
#[derive(Clone)]
pub struct OpenTokClient {
    client: Client,
    config: Arc<ClientConfig>,
}

impl OpenTokClient {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Use a preconfigured transport, e.g. one with a proxy or a global timeout.
    pub fn with_http_client(config: Arc<ClientConfig>, client: Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Arc<ClientConfig> {
        &self.config
    }

    /// Create a new session
    /// POST /session/create
    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<Session, SessionError> {
        self.create_session_with_deadline(request, None).await
    }

    /// Create a new session, aborting the call once `deadline` has elapsed.
    ///
    /// With `None` the call runs until the transport completes or fails.
    /// Dropping the returned future cancels the in-flight request as well.
    pub async fn create_session_with_deadline(
        &self,
        request: &CreateSessionRequest,
        deadline: Option<Duration>,
    ) -> Result<Session, SessionError> {
        info!("Creating new OpenTok session");

        let url = self.config.session_create_url();
        let token = sign_project_token(&self.config)?;

        debug!("Sending session creation request to: {}", url);

        let mut builder = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header(AUTH_HEADER, token)
            .form(&request.form_params());

        if let Some(deadline) = deadline {
            builder = builder.timeout(deadline);
        }

        let response = builder.send().await?;

        let status = response.status();
        debug!("OpenTok session creation response: {}", status);

        if status != StatusCode::OK {
            return Err(SessionError::RemoteRejection {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;

        let sessions: Vec<Session> = serde_json::from_slice(&body)?;
        let session = sessions
            .into_iter()
            .next()
            .ok_or(SessionError::EmptyResponse)?
            .with_config(&self.config);

        info!("Successfully created OpenTok session: {}", session.session_id);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::error::Error;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn create_test_config() -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new("12345", "test-secret"))
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<OpenTokClient>();
    }

    #[test]
    fn test_client_shares_config() {
        let config = create_test_config();
        let client = OpenTokClient::new(config.clone());
        assert!(Arc::ptr_eq(client.config(), &config));
    }

    #[tokio::test]
    async fn test_missing_secret_fails_before_sending() {
        // Unroutable endpoint: reaching the network would surface as Transport.
        let config = Arc::new(ClientConfig::new("12345", "").with_base_url("http://127.0.0.1:1"));
        let client = OpenTokClient::new(config);

        let result = client.create_session(&CreateSessionRequest::new()).await;
        assert_matches!(result, Err(SessionError::Signing(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = Arc::new(ClientConfig::new("12345", "secret").with_base_url("http://127.0.0.1:1"));
        let client = OpenTokClient::new(config);

        let err = client
            .create_session(&CreateSessionRequest::new())
            .await
            .unwrap_err();
        assert_matches!(err, SessionError::Transport(_));
        assert!(err.to_string().starts_with("Transport error: "));
        // The reqwest error is already part of the message.
        assert!(err.source().is_none());
    }

    #[tokio::test]
    async fn test_rejection_reported_before_body_is_read() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Sends a 500 whose body is cut short, so reading it would fail.
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            while !String::from_utf8_lossy(&received).contains("p2p.preference") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 1000\r\n\r\npartial")
                .await
                .unwrap();
            socket.flush().await.unwrap();
        });

        let config = Arc::new(
            ClientConfig::new("12345", "secret").with_base_url(format!("http://{}", addr)),
        );
        let client = OpenTokClient::new(config);

        let result = client.create_session(&CreateSessionRequest::new()).await;
        assert_matches!(result, Err(SessionError::RemoteRejection { status: 500 }));

        server.await.unwrap();
    }
}
