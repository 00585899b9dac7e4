#[cfg(feature = "tokio")]
use crate::tokio::Listener as TokioListener;
use {
    super::{bind_reclaiming, Listener, ReclaimGuard},
    crate::{ListenError, PermissionMask, SocketPath},
    std::path::{Path, PathBuf},
};

/// A builder for [`Listener`]s.
#[derive(Clone, Debug)]
pub struct ListenerOptions {
    pub(crate) path: PathBuf,
    pub(crate) mode: libc::mode_t,
    pub(crate) reclaim_name: bool,
    pub(crate) nonblocking: bool,
}

/// Creation.
impl ListenerOptions {
    /// Creates an options table with default values.
    #[inline]
    pub fn new() -> Self {
        Self { path: PathBuf::new(), mode: 0, reclaim_name: false, nonblocking: false }
    }
}

/// Option setters.
impl ListenerOptions {
    /// Sets the filesystem path the listener will be bound to.
    ///
    /// This must be set; the default empty path fails to resolve.
    #[must_use = builder_must_use!()]
    #[inline]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }
    builder_setters! {
        /// Sets the permission bits of the socket file.
        ///
        /// The default of 0 keeps the process's file creation mask, which is otherwise replaced
        /// with `0o777 ^ mode` for the duration of the bind and restored afterwards. Changes made
        /// by this crate are serialized with one another, but the mask is shared by the whole
        /// process: if another thread creates a file during that window, the file is created with
        /// the temporary mask.
        mode: libc::mode_t,
        /// Sets whether the socket file is deleted when the listener is dropped.
        ///
        /// The default is `false`.
        reclaim_name: bool,
        /// Sets whether the listener is put in nonblocking mode after binding.
        ///
        /// The default is `false`.
        nonblocking: bool,
    }
}

/// Listener constructors.
impl ListenerOptions {
    /// Creates a [`Listener`], recovering from a stale socket file at the path if there is one.
    ///
    /// 1. The path is resolved into a socket address, failing with [`ListenError::Resolve`], and
    ///    the mode is validated, failing with [`ListenError::InvalidMode`].
    /// 2. If the mode is nonzero, the file creation mask is replaced until this returns.
    /// 3. The socket is bound. Failures other than `EADDRINUSE` produce [`ListenError::Bind`].
    /// 4. On `EADDRINUSE`, a client connection to the path is attempted. If it succeeds, or fails
    ///    with anything other than `ECONNREFUSED`, the original bind error is returned as
    ///    [`ListenError::AddrInUse`].
    /// 5. Otherwise the socket file is stale and gets deleted, failing with
    ///    [`ListenError::RemoveStale`].
    /// 6. The socket is bound once more. A failure here, including another `EADDRINUSE` caused
    ///    by a process that bound the path in the meantime, produces [`ListenError::RetryBind`].
    pub fn create_sync(self) -> Result<Listener, ListenError> {
        let path = SocketPath::resolve(&self.path)?;
        let mask = PermissionMask::new(self.mode)?;
        let listener = bind_reclaiming(&path, mask)?;
        if self.nonblocking {
            listener
                .set_nonblocking(true)
                .map_err(|e| ListenError::Bind(self.path.clone(), e))?;
        }
        let reclaim = if self.reclaim_name {
            ReclaimGuard::new(self.path.clone())
        } else {
            ReclaimGuard::default()
        };
        Ok(Listener { listener, path: self.path, reclaim })
    }

    /// Creates a [Tokio listener](TokioListener) the same way as
    /// [`create_sync`](Self::create_sync).
    ///
    /// Recovery runs synchronously on the calling thread. Must be called from within a Tokio
    /// runtime.
    #[cfg(feature = "tokio")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "tokio")))]
    pub fn create_tokio(self) -> Result<TokioListener, ListenError> {
        let path = self.path.clone();
        self.create_sync()?.into_tokio().map_err(|e| ListenError::Bind(path, e))
    }
}

impl Default for ListenerOptions {
    #[inline]
    fn default() -> Self { Self::new() }
}
