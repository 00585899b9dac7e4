//! Socket files left over by dead listeners get replaced.

use {
    crate::{listen, tests::util::*, ListenerOptions},
    color_eyre::eyre::{ensure, WrapErr as _},
    std::os::unix::net::UnixStream,
};

#[test]
fn replaced() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("stale.sock");
    make_stale(&path).context("failed to leave stale socket")?;
    ensure!(UnixStream::connect(&path).is_err(), "stale socket accepted a connection");

    let listener = listen(&path, 0).context("listen over stale socket")?;
    let _client = UnixStream::connect(&path).context("client connect")?;
    listener.inner().accept().context("accept")?;
    Ok(())
}

#[test]
fn replaced_with_mode() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("stale-mode.sock");
    make_stale(&path).context("failed to leave stale socket")?;

    let _listener = listen(&path, 0o600).context("listen over stale socket")?;
    // The mask is still in place for the second bind.
    ensure_eq!(file_mode(&path)?, 0o600);
    UnixStream::connect(&path).context("client connect")?;
    Ok(())
}

#[test]
fn replaced_twice() -> TestResult {
    testinit();
    let dir = SockDir::new()?;
    let path = dir.sock("again.sock");
    for round in 0..2 {
        let listener = ListenerOptions::new()
            .path(&path)
            .create_sync()
            .with_context(|| format!("listen, round {round}"))?;
        UnixStream::connect(&path).context("client connect")?;
        drop(listener);
    }
    Ok(())
}
