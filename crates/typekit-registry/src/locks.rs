//! Lock recovery for poisoned `RwLock`s.
//!
//! Registry and resolver state only ever grows by idempotent inserts, so the
//! data behind a poisoned lock is still consistent and safe to keep using.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn recover_read<'a, T>(lock: &'a RwLock<T>, context: &str) -> RwLockReadGuard<'a, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::debug!("[{}] lock poisoned, recovering", context);
            poisoned.into_inner()
        }
    }
}

pub(crate) fn recover_write<'a, T>(lock: &'a RwLock<T>, context: &str) -> RwLockWriteGuard<'a, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::debug!("[{}] lock poisoned, recovering", context);
            poisoned.into_inner()
        }
    }
}
