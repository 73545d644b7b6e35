//! Signed batch RPC client for the Hero Wars web API.
//!
//! This crate owns the wire protocol: identity headers, request signing,
//! batch payloads, session bootstrap from the landing page and the
//! single re-bootstrap on an invalid session. Game operations built on top of
//! it live in [`GameApi`].
//!
//! Session state is never hidden inside the client. [`RpcClient::call`] takes
//! a [`SessionState`] and returns the one that follows, so the owner decides
//! where it lives.

pub mod actions;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod models;
pub mod payload;
pub mod retry;
pub mod reward;
pub mod session;
pub mod signature;
pub mod transport;
pub mod url;

pub use actions::{GameApi, STATE_SNAPSHOT_CALLS};
pub use client::RpcClient;
pub use config::HeroApiConfig;
pub use error::{ApiError, ApiErrorKind, HeroApiError};
pub use models::{DailyBonusInfo, Expedition, ExpeditionStatus, Hero, Letter, Quest};
pub use payload::{Call, CallResult};
pub use reqwest::StatusCode;
pub use reward::{Reward, RewardEntry, RewardKind, RewardShape};
pub use session::SessionState;
pub use session_store::{AuditLog, Session, SessionStore};
pub use signature::sign;
pub use transport::{HttpTransport, Transport};
