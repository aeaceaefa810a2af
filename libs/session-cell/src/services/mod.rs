// libs/session-cell/src/services/mod.rs

pub mod opentok;

pub use opentok::OpenTokClient;
