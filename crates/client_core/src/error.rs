use thiserror::Error;

use crate::transport::TransportError;

/// Which failure channel an error came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The transport raised: network error or non-2xx status.
    Transport,
    /// The call resolved, but its result failed a business check.
    Application,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("`{path}` resolved with unexpected status {status}")]
    Application { path: String, status: u16 },
    #[error("failed to encode request for `{path}`: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected payload from `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Transport(_) => FailureKind::Transport,
            ClientError::Application { .. }
            | ClientError::Encode { .. }
            | ClientError::Decode { .. } => FailureKind::Application,
        }
    }

    /// Status code carried by the failure, from either channel.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport(err) => err.status(),
            ClientError::Application { status, .. } => Some(*status),
            ClientError::Encode { .. } | ClientError::Decode { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ControllerError {
    /// The triggering action is disabled until the earlier request resolves.
    #[error("{0} is already in flight")]
    InFlight(&'static str),
    /// Submitted without its dialog being open.
    #[error("{0} requires an open dialog")]
    NotOpen(&'static str),
    #[error(transparent)]
    Client(#[from] ClientError),
}
