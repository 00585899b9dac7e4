use {
    crate::{misc::invalid_input, ListenError},
    std::{
        io,
        os::unix::net::SocketAddr,
        path::{Path, PathBuf},
    },
};

/// A filesystem path that has been checked to be usable as a Unix domain socket address.
///
/// Resolution rejects empty paths, which the kernel would otherwise treat as a request for an
/// unnamed (or, on Linux, autobound abstract) socket, as well as paths with interior nul bytes
/// and paths too long for `sun_path`.
#[derive(Clone, Debug)]
pub struct SocketPath {
    path: PathBuf,
    addr: SocketAddr,
}
impl SocketPath {
    /// Resolves `path` into a socket address.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self, ListenError> {
        let path = path.as_ref();
        Self::resolve_inner(path).map_err(|e| ListenError::Resolve(path.to_path_buf(), e))
    }
    fn resolve_inner(path: &Path) -> io::Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(invalid_input("socket path is empty"));
        }
        // Checks both the nul bytes and the length against sun_path.
        let addr = SocketAddr::from_pathname(path)?;
        Ok(Self { path: path.to_path_buf(), addr })
    }

    /// The path as given to [`resolve`](Self::resolve).
    #[inline]
    pub fn as_path(&self) -> &Path { &self.path }
    /// The resolved address, suitable for `bind` and `connect`.
    #[inline]
    pub fn addr(&self) -> &SocketAddr { &self.addr }
}
impl AsRef<Path> for SocketPath {
    #[inline]
    fn as_ref(&self) -> &Path { &self.path }
}
