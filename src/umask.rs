use {
    crate::ListenError,
    libc::mode_t,
    std::sync::{Mutex, MutexGuard, PoisonError},
};

/// Serializes every file creation mask change made by this crate. The mask is process-wide, so
/// two listeners created concurrently with different modes would otherwise restore each other's
/// masks out of order.
static UMASK_LOCK: Mutex<()> = Mutex::new(());

/// Permission bits for the socket file, applied by temporarily changing the file creation mask.
///
/// Zero is the default and means "leave the mask alone": the socket file gets whatever
/// permissions the process's current mask yields.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PermissionMask(mode_t);
impl PermissionMask {
    /// Does not touch the file creation mask.
    pub const DEFAULT: Self = Self(0);

    /// Validates that `mode` only has permission bits set.
    pub fn new(mode: mode_t) -> Result<Self, ListenError> {
        if mode & !0o777 != 0 {
            return Err(ListenError::InvalidMode(mode));
        }
        Ok(Self(mode))
    }

    /// The permission bits the socket file will have.
    #[inline]
    pub fn mode(self) -> mode_t { self.0 }
    /// Whether this leaves the file creation mask untouched.
    #[inline]
    pub fn is_default(self) -> bool { self.0 == 0 }
    /// The file creation mask that yields [`mode`](Self::mode) for a socket, since `bind` creates
    /// socket files with `0o777 & !umask`.
    #[inline]
    pub fn umask(self) -> mode_t { 0o777 ^ self.0 }

    /// Installs the mask for as long as the returned guard lives, or does nothing at all for the
    /// default value.
    pub(crate) fn apply(self) -> Option<UmaskGuard> {
        if self.is_default() {
            return None;
        }
        Some(UmaskGuard::install(self.umask()))
    }
}

#[inline]
fn umask(mask: mode_t) -> mode_t { unsafe { libc::umask(mask) } }

/// Restores the previous file creation mask when dropped.
#[derive(Debug)]
pub(crate) struct UmaskGuard {
    old: mode_t,
    // Released after the restoration in drop().
    _lock: MutexGuard<'static, ()>,
}
impl UmaskGuard {
    fn install(mask: mode_t) -> Self {
        // A panic while holding the lock still runs our Drop, so the mask is intact.
        let lock = UMASK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let old = umask(mask);
        log::trace!("file creation mask set to {mask:#o}, was {old:#o}");
        Self { old, _lock: lock }
    }
}
impl Drop for UmaskGuard {
    fn drop(&mut self) {
        umask(self.old);
    }
}

/// Reads the current file creation mask without observably changing it.
#[cfg(test)]
pub(crate) fn current_umask() -> mode_t {
    let _lock = UMASK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let cur = umask(0);
    umask(cur);
    cur
}
