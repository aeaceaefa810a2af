// libs/session-cell/src/models.rs
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use shared_config::ClientConfig;
use shared_models::error::TokenError;

// ==============================================================================
// SESSION OPTIONS
// ==============================================================================

/// How media streams travel between session participants.
/// https://tokbox.com/developer/guides/create-session/#media-mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaMode {
    /// Streams go through the OpenTok Media Router.
    #[serde(rename = "disabled")]
    MediaRouter,
    /// Streams go directly between clients, falling back to the TURN relay
    /// when a firewall blocks the direct path.
    #[default]
    #[serde(rename = "enabled")]
    PeerToPeer,
}

impl MediaMode {
    /// Value of the `p2p.preference` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaMode::MediaRouter => "disabled",
            MediaMode::PeerToPeer => "enabled",
        }
    }
}

impl fmt::Display for MediaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(MediaMode::MediaRouter),
            "enabled" => Ok(MediaMode::PeerToPeer),
            other => Err(format!("Unknown media mode: {}", other)),
        }
    }
}

/// Whether recording starts with the session or only on request.
/// https://tokbox.com/developer/guides/archiving/#automatic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArchiveMode {
    #[default]
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "always")]
    Always,
}

impl ArchiveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveMode::Manual => "manual",
            ArchiveMode::Always => "always",
        }
    }
}

impl fmt::Display for ArchiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(ArchiveMode::Manual),
            "always" => Ok(ArchiveMode::Always),
            other => Err(format!("Unknown archive mode: {}", other)),
        }
    }
}

// ==============================================================================
// REQUEST / RESPONSE DTOs
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// IP address hint used to pick the media server region.
    pub location: Option<String>,
    pub media_mode: Option<MediaMode>,
    pub archive_mode: Option<ArchiveMode>,
}

impl CreateSessionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn media_mode(mut self, mode: MediaMode) -> Self {
        self.media_mode = Some(mode);
        self
    }

    pub fn archive_mode(mut self, mode: ArchiveMode) -> Self {
        self.archive_mode = Some(mode);
        self
    }

    /// Fields of the url-encoded body sent to `/session/create`.
    ///
    /// `p2p.preference` is always present; `archiveMode` only when set, so the
    /// service applies its own default otherwise. An empty location is dropped.
    pub fn form_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::with_capacity(3);
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            params.push(("location", location));
        }
        params.push(("p2p.preference", self.media_mode.unwrap_or_default().as_str()));
        if let Some(mode) = self.archive_mode {
            params.push(("archiveMode", mode.as_str()));
        }
        params
    }
}

/// Session descriptor returned by OpenTok.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(alias = "sessionId")]
    pub session_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_dt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_server_url: Option<String>,

    /// Configuration of the client that created this session. Weak so a
    /// session kept around does not keep the credentials alive.
    #[serde(skip)]
    config: Weak<ClientConfig>,
}

impl Session {
    pub(crate) fn with_config(mut self, config: &Arc<ClientConfig>) -> Self {
        self.config = Arc::downgrade(config);
        self
    }

    /// Configuration this session was created with, if it is still alive.
    pub fn config(&self) -> Option<Arc<ClientConfig>> {
        self.config.upgrade()
    }
}

// ==============================================================================
// ERROR HANDLING
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("OpenTok returned error code: {status}")]
    RemoteRejection { status: u16 },

    #[error("Failed to decode session response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("OpenTok did not return a session")]
    EmptyResponse,

    #[error("Failed to sign project token: {0}")]
    Signing(#[from] TokenError),
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::Transport(err)
    }
}
