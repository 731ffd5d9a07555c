// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Opening the backing file, tolerating a writer that briefly holds it.

use std::fs::File;
use std::io;
use std::path::Path;

use logwise::privacy::LogIt;

use crate::config::ViewerConfig;

/// How the viewer obtains a read-only handle on its file.
pub trait FileOpener {
    fn open(&mut self, path: &Path) -> io::Result<File>;
}

/// Opens files from the local filesystem, read-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl FileOpener for FsOpener {
    fn open(&mut self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

impl<F: FnMut(&Path) -> io::Result<File>> FileOpener for F {
    fn open(&mut self, path: &Path) -> io::Result<File> {
        self(path)
    }
}

/// Tries to open `path` up to `config.open_attempts` times, sleeping `config.retry_interval`
/// between attempts.  Blocks the calling thread.
///
/// Returns `None` once every attempt has failed.
pub fn open_with_retry(
    opener: &mut dyn FileOpener,
    path: &Path,
    config: &ViewerConfig,
) -> Option<File> {
    let attempts = config.open_attempts.max(1);
    for attempt in 1..=attempts {
        match opener.open(path) {
            Ok(file) => return Some(file),
            Err(e) => {
                logwise::warn_sync!(
                    "Can't open {path} (attempt {attempt}/{attempts}): {err}",
                    path = LogIt(path),
                    attempt = attempt,
                    attempts = attempts,
                    err = LogIt(&e)
                );
            }
        }
        if attempt < attempts {
            std::thread::sleep(config.retry_interval);
        }
    }
    None
}
