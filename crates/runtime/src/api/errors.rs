//! Errors returned by [`RuntimeHandle`](super::RuntimeHandle) and the builder.
//!
//! Wraps failures from worker coordination, the engine, and the join flow so
//! clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{CarrierId, ConfigError, ExecuteError, StateError};

use crate::session::SessionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime has shut down")]
    CommandChannelClosed,

    #[error("worker dropped the request without replying")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker task panicked or was cancelled")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("invalid game configuration")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("unknown {0}")]
    UnknownCarrier(CarrierId),

    #[error("{action} action produced a mismatched result")]
    UnexpectedResult { action: &'static str },
}
