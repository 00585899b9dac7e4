//! A listener that is alive must never be displaced.

use {
    crate::{listen, tests::util::*, umask::current_umask, ListenErrorKind},
    color_eyre::eyre::{ensure, WrapErr as _},
    std::{
        fs, io,
        os::unix::{
            fs::MetadataExt as _,
            net::{UnixDatagram, UnixStream},
        },
    },
};

fn occupied(mode: libc::mode_t) -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("live.sock");

    let first = listen(&path, 0).context("first listener")?;
    let ino = fs::symlink_metadata(&path)?.ino();

    let err = expect_err!(listen(&path, mode), "second listener");
    ensure_eq!(err.kind(), ListenErrorKind::AddrInUse);
    ensure_eq!(err.path(), Some(path.as_path()));
    // The error is the one from the first bind attempt, not from probing.
    ensure_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::AddrInUse));

    ensure_eq!(fs::symlink_metadata(&path)?.ino(), ino, "socket file was replaced");
    let _client = UnixStream::connect(&path).context("connect to first listener")?;
    first.inner().accept().context("first listener accept")?;
    ensure!(path.exists(), "socket file was deleted");
    Ok(())
}

#[test]
fn without_mode() -> TestResult { occupied(0) }

#[test]
fn with_mode() -> TestResult { occupied(0o600) }

/// A stream connect to a datagram socket fails with something other than `ECONNREFUSED`, which
/// must not be taken as evidence that the file is stale.
#[test]
fn unclear_connect_failure_keeps_file() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("dgram.sock");
    let _dgram = UnixDatagram::bind(&path).context("datagram bind")?;
    let ino = fs::symlink_metadata(&path)?.ino();

    let before = current_umask();
    let err = expect_err!(listen(&path, 0o600), "listen over datagram socket");
    ensure_eq!(err.kind(), ListenErrorKind::AddrInUse, "got {err}");
    ensure_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::AddrInUse));
    ensure_eq!(current_umask(), before);

    ensure!(path.exists(), "datagram socket file was deleted");
    ensure_eq!(fs::symlink_metadata(&path)?.ino(), ino, "datagram socket file was replaced");
    Ok(())
}
