//! LockExt is a helper trait to simplify the error handling
//! when write-locking a RwLock.

use std::sync::{RwLock, RwLockWriteGuard};

use crate::error::Error;

pub trait LockExt<T> {
    fn acquire_write(&self) -> Result<RwLockWriteGuard<'_, T>, Error>;
}

impl<T> LockExt<T> for RwLock<T> {
    fn acquire_write(&self) -> Result<RwLockWriteGuard<'_, T>, Error> {
        match self.write() {
            Ok(guard) => Ok(guard),
            Err(_) => Err(Error::poisoned_lock()),
        }
    }
}
