// libs/session-cell/src/lib.rs
//! # Session Cell
//!
//! Client for the OpenTok REST API: creates video sessions that clients can
//! then join to exchange audio, video and data.
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------+
//! |                   Session Cell                      |
//! +-----------------------------------------------------+
//! |  models.rs      |  Session options, DTOs & errors   |
//! |  services/      |  REST client layer                |
//! |    opentok.rs   |  POST /session/create             |
//! +-----------------------------------------------------+
//! ```
//!
//! Every call mints a fresh project token (`shared_utils::jwt`) signed with
//! the partner secret, sends one request and decodes the descriptor the
//! service returns. Nothing is retried; retry policy belongs to the caller.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use session_cell::{ArchiveMode, CreateSessionRequest, MediaMode, OpenTokClient};
//! use shared_config::ClientConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(ClientConfig::new("12345678", "partner-secret"));
//! let client = OpenTokClient::new(config);
//!
//! let request = CreateSessionRequest::new()
//!     .media_mode(MediaMode::MediaRouter)
//!     .archive_mode(ArchiveMode::Always);
//!
//! let session = client
//!     .create_session_with_deadline(&request, Some(Duration::from_secs(10)))
//!     .await?;
//! println!("created {}", session.session_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The API key and partner secret are passed in by the embedding application.
//! `ClientConfig::with_base_url` points the client at a non-production host.

pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::{ArchiveMode, CreateSessionRequest, MediaMode, Session, SessionError};

pub use services::OpenTokClient;
