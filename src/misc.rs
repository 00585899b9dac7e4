use std::io;

/// Structured matching of OS error codes, with an [`io::ErrorKind`] fallback for errors that
/// were not produced by a system call.
pub(crate) trait ErrnoExt {
    fn is_errno(&self, errno: i32, fallback: io::ErrorKind) -> bool;

    #[inline]
    fn is_addr_in_use(&self) -> bool { self.is_errno(libc::EADDRINUSE, io::ErrorKind::AddrInUse) }
    #[inline]
    fn is_conn_refused(&self) -> bool {
        self.is_errno(libc::ECONNREFUSED, io::ErrorKind::ConnectionRefused)
    }
}
impl ErrnoExt for io::Error {
    #[inline]
    fn is_errno(&self, errno: i32, fallback: io::ErrorKind) -> bool {
        match self.raw_os_error() {
            Some(n) => n == errno,
            None => self.kind() == fallback,
        }
    }
}

#[cold]
#[inline(never)]
pub(crate) fn invalid_input(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}
