//! Optional memory locking for secret material.
//!
//! Locking (keeping pages out of swap) is a platform capability the caller
//! injects through [`MemoryLock`]. [`Guarded`] ties a secret to a lock for the
//! length of a scope: the region is locked on entry, and on exit it is wiped
//! before being unlocked. A failed lock is logged and otherwise ignored.

use core::ops::{Deref, DerefMut};

use zeroize::Zeroize;

/// Reason a [`MemoryLock`] could not lock a region.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("memory lock failed: {reason}")]
pub struct LockError {
    pub reason: &'static str,
}

/// Platform hook for pinning memory in RAM.
pub trait MemoryLock {
    /// Lock the pages backing `region`.
    fn lock(&self, region: &[u8]) -> Result<(), LockError>;

    /// Release a region previously passed to [`lock`](Self::lock). The bytes
    /// have already been wiped when this is called.
    fn unlock(&self, region: &[u8]);
}

/// Lock that does nothing; the default when no platform hook is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl MemoryLock for NoLock {
    fn lock(&self, _region: &[u8]) -> Result<(), LockError> {
        Ok(())
    }

    fn unlock(&self, _region: &[u8]) {}
}

/// A heap-pinned secret whose memory is locked while the guard lives.
pub struct Guarded<T, L = NoLock>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
    L: MemoryLock,
{
    value: Box<T>,
    lock: L,
    locked: bool,
}

impl<T> Guarded<T>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
{
    /// Guard `value` without a platform lock.
    pub fn new(value: T) -> Self {
        Self::with_lock(value, NoLock)
    }
}

impl<T, L> Guarded<T, L>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
    L: MemoryLock,
{
    /// Move `value` to the heap and lock its bytes with `lock`.
    pub fn with_lock(value: T, lock: L) -> Self {
        let value = Box::new(value);
        let locked = match lock.lock((*value).as_ref()) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("continuing without locked memory: {err}");
                false
            }
        };
        Self { value, lock, locked }
    }

    /// Whether the platform lock succeeded.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl<T, L> Deref for Guarded<T, L>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
    L: MemoryLock,
{
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, L> DerefMut for Guarded<T, L>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
    L: MemoryLock,
{
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T, L> Drop for Guarded<T, L>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
    L: MemoryLock,
{
    fn drop(&mut self) {
        // `Vec::zeroize` also truncates, so wipe the bytes before unlocking.
        crate::ct::ct_zeroize((*self.value).as_mut());
        if self.locked {
            self.lock.unlock((*self.value).as_ref());
        }
        self.value.zeroize();
    }
}

impl<T, L> core::fmt::Debug for Guarded<T, L>
where
    T: AsRef<[u8]> + AsMut<[u8]> + Zeroize,
    L: MemoryLock,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Guarded")
            .field("len", &(*self.value).as_ref().len())
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}
