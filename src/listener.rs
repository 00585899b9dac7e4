mod options;
pub use options::*;

use {
    crate::{
        misc::ErrnoExt as _,
        probe::{probe_addr, Liveness},
        ListenError, PermissionMask, SocketPath,
    },
    std::{
        fs, io,
        os::{
            fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd},
            unix::net::UnixListener,
        },
        path::{Path, PathBuf},
    },
};

/// Binds a Unix domain socket listener at `path`, replacing the socket file if it turns out to be
/// a leftover from a listener that no longer exists.
///
/// `mode` is the permission bits for the socket file, or 0 to leave the process's file creation
/// mask alone. Equivalent to
/// `ListenerOptions::new().path(path).mode(mode).create_sync()`; see
/// [`ListenerOptions::create_sync`] for the recovery procedure and the error each stage of it
/// produces.
///
/// # Example
/// ```no_run
#[doc = doctest_file::include_doctest!("demos/listen.rs")]
/// ```
pub fn listen(path: impl AsRef<Path>, mode: libc::mode_t) -> Result<Listener, ListenError> {
    ListenerOptions::new().path(path).mode(mode).create_sync()
}

/// A bound, listening Unix domain socket, created by [`listen`] or [`ListenerOptions`].
///
/// # Name reclamation
/// If [`reclaim_name`](ListenerOptions::reclaim_name) was enabled, the socket file is deleted
/// when the listener is dropped. This is vulnerable to races with other processes binding the
/// same path and thus is disabled by default; stale files are dealt with on the next bind
/// instead.
#[derive(Debug)]
pub struct Listener {
    pub(crate) listener: UnixListener,
    pub(crate) path: PathBuf,
    pub(crate) reclaim: ReclaimGuard,
}

impl Listener {
    /// The filesystem path the listener is bound to.
    #[inline]
    pub fn path(&self) -> &Path { &self.path }
    /// Prevents the socket file from being deleted when the listener is dropped.
    pub fn do_not_reclaim_name_on_drop(&mut self) { self.reclaim.forget(); }
}

/// Access to the underlying implementation.
impl Listener {
    /// Borrows the [`UnixListener`] contained within, granting access to operations defined on it.
    #[inline(always)]
    pub fn inner(&self) -> &UnixListener { &self.listener }
    /// Mutably borrows the [`UnixListener`] contained within, granting access to operations
    /// defined on it.
    #[inline(always)]
    pub fn inner_mut(&mut self) -> &mut UnixListener { &mut self.listener }
}

/// Disables name reclamation.
impl From<Listener> for UnixListener {
    fn from(l: Listener) -> Self {
        let Listener { listener, mut reclaim, .. } = l;
        reclaim.forget();
        listener
    }
}
impl From<Listener> for OwnedFd {
    #[inline]
    fn from(l: Listener) -> Self { UnixListener::from(l).into() }
}
impl AsFd for Listener {
    #[inline]
    fn as_fd(&self) -> BorrowedFd<'_> { self.listener.as_fd() }
}
impl AsRawFd for Listener {
    #[inline]
    fn as_raw_fd(&self) -> RawFd { self.listener.as_raw_fd() }
}

#[derive(Debug, Default)]
pub(crate) struct ReclaimGuard(Option<PathBuf>);
impl ReclaimGuard {
    pub(crate) fn new(path: PathBuf) -> Self { Self(Some(path)) }
    pub(crate) fn forget(&mut self) { self.0 = None; }
}
impl Drop for ReclaimGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            if let Err(e) = fs::remove_file(&path) {
                log::debug!("could not reclaim socket {path:?}: {e}");
            }
        }
    }
}

fn bind(path: &SocketPath) -> io::Result<UnixListener> {
    log::debug!("binding {:?}", path.as_path());
    UnixListener::bind_addr(path.addr())
}

/// The bind, probe, remove and rebind sequence. The file creation mask stays installed across
/// both bind attempts.
pub(crate) fn bind_reclaiming(
    path: &SocketPath,
    mask: PermissionMask,
) -> Result<UnixListener, ListenError> {
    let _umask = mask.apply();
    let owned_path = || path.as_path().to_path_buf();

    let first_err = match bind(path) {
        Ok(l) => return Ok(l),
        Err(e) if e.is_addr_in_use() => e,
        Err(e) => return Err(ListenError::Bind(owned_path(), e)),
    };

    match probe_addr(path) {
        Liveness::Stale => {}
        Liveness::Live => {
            log::debug!("{:?} is served by a live listener", path.as_path());
            return Err(ListenError::AddrInUse(owned_path(), first_err));
        }
        Liveness::Inconclusive(e) => {
            log::debug!("could not probe {:?}, assuming it is in use: {e}", path.as_path());
            return Err(ListenError::AddrInUse(owned_path(), first_err));
        }
    }

    log::warn!("removing stale socket {:?}", path.as_path());
    fs::remove_file(path.as_path()).map_err(|e| ListenError::RemoveStale(owned_path(), e))?;

    // No second round of probing: losing a race here is the caller's to handle.
    let listener = bind(path).map_err(|e| ListenError::RetryBind(owned_path(), e))?;
    log::info!("reclaimed stale socket {:?}", path.as_path());
    Ok(listener)
}
