//! Error taxonomy
//!
//! Both variants describe caller programming errors: contradictory
//! instructions to the table or the rule engine. Nothing here is transient.

/// Errors surfaced by the simulation core and the rule engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// An argument outside the domain of the operation
    InvalidArgument(String),
    /// An operation called out of sequence
    InvalidState(String),
}

impl PoolError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(m) => write!(f, "invalid argument: {m}"),
            Self::InvalidState(m) => write!(f, "invalid state: {m}"),
        }
    }
}

impl std::error::Error for PoolError {}
