use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use log::debug;
use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};

use crate::error::{PxeError, Result};

/// Exclusive advisory lock serializing enable/disable runs. Released on drop.
pub struct LockGuard {
    _lock: Flock<File>,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard").field("path", &self.path).finish()
    }
}

/// Take the lock at `path` without waiting; a held lock is [`PxeError::Busy`].
pub fn acquire(path: &Path) -> Result<LockGuard> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|err| PxeError::io(path, err))?;

    match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
        Ok(lock) => {
            debug!("acquired {}", path.display());
            Ok(LockGuard {
                _lock: lock,
                path: path.to_path_buf(),
            })
        }
        Err((_, Errno::EAGAIN)) => Err(PxeError::Busy(path.to_path_buf())),
        Err((_, errno)) => Err(PxeError::io(path, errno.into())),
    }
}
