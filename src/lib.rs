#![cfg_attr(unix, doc = include_str!("../README.md"))]
#![cfg_attr(not(unix), doc = "Unix domain socket listeners. Only available on Unix.")]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
#![warn(missing_docs, clippy::panic_in_result_fn, clippy::missing_assert_message)]

#[cfg(unix)]
#[macro_use]
mod macros;

#[cfg(unix)]
mod error;
#[cfg(unix)]
mod listener;
#[cfg(unix)]
mod misc;
#[cfg(unix)]
mod path;
#[cfg(unix)]
mod probe;
#[cfg(unix)]
mod umask;

#[cfg(all(unix, feature = "tokio"))]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "tokio")))]
pub mod tokio;

#[cfg(unix)]
pub use {
    error::{ListenError, ListenErrorKind},
    listener::{listen, Listener, ListenerOptions},
    path::SocketPath,
    probe::{probe, Liveness},
    umask::PermissionMask,
};

#[cfg(all(test, unix))]
#[path = "../tests/index.rs"]
#[allow(clippy::unwrap_used)]
mod tests;
