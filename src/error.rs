//! Error type returned by listener creation.

use std::{
    io,
    path::{Path, PathBuf},
};

/// Failure to create a [`Listener`](crate::Listener).
///
/// Every variant except [`InvalidMode`](Self::InvalidMode) carries the path the listener was to
/// be bound to and the system error that caused the failure. Which variant is returned tells the
/// caller at which stage of stale socket recovery things went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ListenError {
    /// The path cannot be used as a Unix domain socket address: it is empty, contains a nul
    /// byte or does not fit into `sun_path`.
    #[error("Could not resolve socket address: {0:?} -- Reason: {1}")]
    Resolve(PathBuf, #[source] io::Error),
    /// The requested permission bits do not fit into `0o777`.
    #[error("Invalid socket file mode: {0:#o} -- Reason: must be within 0o777")]
    InvalidMode(libc::mode_t),
    /// Binding failed for a reason other than the address being in use.
    #[error("Could not bind socket: {0:?} -- Reason: {1}")]
    Bind(PathBuf, #[source] io::Error),
    /// The address is in use, and the socket file is either served by a live listener or could
    /// not be probed conclusively. The error is the one returned by the original bind attempt.
    #[error("Socket is in use by another listener: {0:?} -- Reason: {1}")]
    AddrInUse(PathBuf, #[source] io::Error),
    /// The socket file was found to be stale, but could not be removed.
    #[error("Could not remove stale socket: {0:?} -- Reason: {1}")]
    RemoveStale(PathBuf, #[source] io::Error),
    /// The stale socket file was removed, but the second bind attempt failed anyway.
    #[error("Could not bind socket after removing stale socket: {0:?} -- Reason: {1}")]
    RetryBind(PathBuf, #[source] io::Error),
}

/// Field-less mirror of [`ListenError`]'s variants, for matching without destructuring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenErrorKind {
    /// See [`ListenError::Resolve`].
    Resolve,
    /// See [`ListenError::InvalidMode`].
    InvalidMode,
    /// See [`ListenError::Bind`].
    Bind,
    /// See [`ListenError::AddrInUse`].
    AddrInUse,
    /// See [`ListenError::RemoveStale`].
    RemoveStale,
    /// See [`ListenError::RetryBind`].
    RetryBind,
}

impl ListenError {
    /// Returns the stage at which listener creation failed.
    pub fn kind(&self) -> ListenErrorKind {
        match self {
            Self::Resolve(..) => ListenErrorKind::Resolve,
            Self::InvalidMode(..) => ListenErrorKind::InvalidMode,
            Self::Bind(..) => ListenErrorKind::Bind,
            Self::AddrInUse(..) => ListenErrorKind::AddrInUse,
            Self::RemoveStale(..) => ListenErrorKind::RemoveStale,
            Self::RetryBind(..) => ListenErrorKind::RetryBind,
        }
    }

    /// Returns the socket path the error pertains to, if there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidMode(..) => None,
            Self::Resolve(p, _)
            | Self::Bind(p, _)
            | Self::AddrInUse(p, _)
            | Self::RemoveStale(p, _)
            | Self::RetryBind(p, _) => Some(p),
        }
    }

    /// Borrows the underlying system error, if there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::InvalidMode(..) => None,
            Self::Resolve(_, e)
            | Self::Bind(_, e)
            | Self::AddrInUse(_, e)
            | Self::RemoveStale(_, e)
            | Self::RetryBind(_, e) => Some(e),
        }
    }
}

/// Keeps the [`io::ErrorKind`] of the underlying error, wrapping the full [`ListenError`] as the
/// payload.
impl From<ListenError> for io::Error {
    fn from(e: ListenError) -> Self {
        let kind = match &e {
            ListenError::InvalidMode(..) => io::ErrorKind::InvalidInput,
            other => other.io_error().map_or(io::ErrorKind::Other, io::Error::kind),
        };
        io::Error::new(kind, e)
    }
}
