//! The file creation mask must come out of every call exactly as it went in.

use {
    crate::{listen, tests::util::*, umask::current_umask, ListenErrorKind, PermissionMask},
    color_eyre::eyre::{ensure, WrapErr as _},
};

#[test]
fn restored_after_success() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let before = current_umask();
    let _l = listen(dir.sock("ok.sock"), 0o600).context("listen failed")?;
    ensure_eq!(current_umask(), before);
    Ok(())
}

#[test]
fn restored_after_addr_in_use() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("busy.sock");
    let _first = listen(&path, 0).context("first listener")?;
    let before = current_umask();
    let err = expect_err!(listen(&path, 0o600), "second listener");
    ensure_eq!(err.kind(), ListenErrorKind::AddrInUse);
    ensure_eq!(current_umask(), before);
    Ok(())
}

#[test]
fn restored_after_stale_recovery() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("stale.sock");
    make_stale(&path).context("failed to leave stale socket")?;
    let before = current_umask();
    let _l = listen(&path, 0o640).context("listen over stale socket")?;
    ensure_eq!(current_umask(), before);
    Ok(())
}

#[test]
fn restored_after_bind_error() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let before = current_umask();
    let err = expect_err!(listen(dir.sock("missing/x.sock"), 0o600), "listen");
    ensure_eq!(err.kind(), ListenErrorKind::Bind);
    ensure_eq!(current_umask(), before);
    Ok(())
}

#[test]
fn default_mask_is_not_applied() -> TestResult {
    testinit();
    ensure!(PermissionMask::DEFAULT.apply().is_none(), "default mask installed a guard");
    ensure!(PermissionMask::new(0)?.is_default(), "zero is not the default mask");
    let dir = SockDir::new()?;
    let before = current_umask();
    let _l = listen(dir.sock("plain.sock"), 0).context("listen failed")?;
    ensure_eq!(current_umask(), before);
    Ok(())
}

#[test]
fn mask_arithmetic() -> TestResult {
    ensure_eq!(PermissionMask::new(0o600)?.umask(), 0o177);
    ensure_eq!(PermissionMask::new(0o777)?.umask(), 0);
    ensure_eq!(PermissionMask::new(0o640)?.mode(), 0o640);
    ensure!(PermissionMask::new(0o1000).is_err(), "sticky bit accepted");
    Ok(())
}
