use {
    crate::{misc::ErrnoExt as _, ListenError, SocketPath},
    std::{io, os::unix::net::UnixStream, path::Path},
};

/// Outcome of checking whether an existing socket file is served by a listener.
#[derive(Debug)]
pub enum Liveness {
    /// A client connection was accepted into the listener's backlog. The probe connection is
    /// closed right away.
    Live,
    /// The socket file exists but the connection was refused: no one is listening on it.
    Stale,
    /// Connecting failed in some other way, such as the caller lacking permission to connect to
    /// the socket. Callers should not assume the socket file can be removed.
    Inconclusive(io::Error),
}
impl Liveness {
    /// Whether the socket file can be removed and rebound.
    #[inline]
    pub fn is_stale(&self) -> bool { matches!(self, Self::Stale) }
}

/// Checks whether the Unix domain socket at `path` has a live listener behind it.
///
/// This is the check [`listen`](crate::listen) performs before deleting a socket file after
/// running into `EADDRINUSE`.
///
/// # Errors
/// Only [`ListenError::Resolve`]; connection failures are reported through [`Liveness`].
pub fn probe(path: impl AsRef<Path>) -> Result<Liveness, ListenError> {
    SocketPath::resolve(path).map(|path| probe_addr(&path))
}

pub(crate) fn probe_addr(path: &SocketPath) -> Liveness {
    match UnixStream::connect_addr(path.addr()) {
        Ok(conn) => {
            drop(conn);
            Liveness::Live
        }
        Err(e) if e.is_conn_refused() => Liveness::Stale,
        Err(e) => Liveness::Inconclusive(e),
    }
}
