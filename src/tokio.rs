//! Tokio integration.

use {
    crate::listener::ReclaimGuard,
    std::{
        io,
        os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd},
        path::{Path, PathBuf},
    },
};

/// A [`Listener`](crate::Listener) registered with the Tokio reactor.
///
/// Created by [`ListenerOptions::create_tokio`](crate::ListenerOptions::create_tokio) or
/// [`Listener::into_tokio`](crate::Listener::into_tokio). Name reclamation carries over from the
/// synchronous listener.
///
/// # Example
/// ```no_run
#[doc = doctest_file::include_doctest!("demos/tokio_listen.rs")]
/// ```
#[derive(Debug)]
pub struct Listener {
    listener: ::tokio::net::UnixListener,
    path: PathBuf,
    reclaim: ReclaimGuard,
}

impl Listener {
    /// The filesystem path the listener is bound to.
    #[inline]
    pub fn path(&self) -> &Path { &self.path }
    /// Prevents the socket file from being deleted when the listener is dropped.
    pub fn do_not_reclaim_name_on_drop(&mut self) { self.reclaim.forget(); }
    /// Borrows the Tokio [`UnixListener`](::tokio::net::UnixListener) contained within.
    #[inline(always)]
    pub fn inner(&self) -> &::tokio::net::UnixListener { &self.listener }
}

impl crate::Listener {
    /// Switches the listener to nonblocking mode and registers it with the current Tokio
    /// runtime.
    ///
    /// # Panics
    /// If called outside of a Tokio runtime with IO enabled.
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "tokio")))]
    pub fn into_tokio(self) -> io::Result<Listener> {
        let crate::Listener { listener, path, reclaim } = self;
        listener.set_nonblocking(true)?;
        let listener = ::tokio::net::UnixListener::from_std(listener)?;
        Ok(Listener { listener, path, reclaim })
    }
}

/// Disables name reclamation.
impl From<Listener> for ::tokio::net::UnixListener {
    fn from(l: Listener) -> Self {
        let Listener { listener, mut reclaim, .. } = l;
        reclaim.forget();
        listener
    }
}
impl AsFd for Listener {
    #[inline]
    fn as_fd(&self) -> BorrowedFd<'_> { self.listener.as_fd() }
}
impl AsRawFd for Listener {
    #[inline]
    fn as_raw_fd(&self) -> RawFd { self.listener.as_raw_fd() }
}
