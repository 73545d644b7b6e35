use session_store::Session;

/// Session lifecycle as seen by the RPC client.
///
/// Bootstrapping is the transition between the two states, performed by
/// [`RpcClient::bootstrap`](crate::RpcClient::bootstrap).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No trusted session: nothing on disk, or it was invalidated.
    #[default]
    Uninitialized,
    Active(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Active(session) => Some(session),
            Self::Uninitialized => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        session.map_or(Self::Uninitialized, Self::Active)
    }
}
