// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Opening an image file as a replayable capture.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use logwise::privacy::LogIt;

use crate::config::ViewerConfig;
use crate::decode::{self, ImageFamily};
use crate::replay::{ReplayDriver, ReplayStatus};
use crate::viewer::ImageViewer;

/// A capture that is really a plain image file, with the handle it was opened through.
#[derive(Debug)]
pub struct ImageFile {
    path: PathBuf,
    handle: Option<File>,
}

impl ImageFile {
    /// Opens `path` read-only.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let handle = File::open(&path)?;
        Ok(ImageFile {
            path,
            handle: Some(handle),
        })
    }

    /// Wraps an existing handle, or the absence of one.
    pub fn from_parts(path: impl Into<PathBuf>, handle: Option<File>) -> Self {
        ImageFile {
            path: path.into(),
            handle,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifies the image family from the file's leading bytes.
    ///
    /// `None` if the handle has already been taken, the read failed, or no family matches.
    pub fn family(&mut self) -> Option<ImageFamily> {
        let handle = self.handle.as_mut()?;
        decode::probe(handle).ok().flatten()
    }

    /// Takes ownership of the open handle.  Later calls return `None`.
    pub fn steal_handle(&mut self) -> Option<File> {
        self.handle.take()
    }
}

/// Why [`create_replay_device`] produced no viewer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CreateError {
    #[error("no capture was supplied")]
    InternalError,
    #[error("the capture's file handle is unavailable")]
    FileIOFailed,
    #[error("the file is not a supported image")]
    ImageUnsupported,
    #[error("couldn't create a proxy driver to render images: {0:?}")]
    Proxy(ReplayStatus),
}

impl CreateError {
    /// The status code reported to the host.
    pub fn status(&self) -> ReplayStatus {
        match self {
            CreateError::InternalError => ReplayStatus::InternalError,
            CreateError::FileIOFailed => ReplayStatus::FileIOFailed,
            CreateError::ImageUnsupported => ReplayStatus::ImageUnsupported,
            CreateError::Proxy(status) => *status,
        }
    }
}

/// Builds an [`ImageViewer`] for `capture`, rendering through the proxy `make_proxy` returns.
///
/// The file is fully decoded once up front, so an unreadable file never reaches the proxy.
/// `make_proxy` is only called once that decode succeeds.
pub fn create_replay_device(
    capture: Option<&mut ImageFile>,
    make_proxy: impl FnOnce() -> Result<Box<dyn ReplayDriver>, ReplayStatus>,
    config: ViewerConfig,
) -> Result<ImageViewer, CreateError> {
    let Some(capture) = capture else {
        return Err(CreateError::InternalError);
    };
    let Some(mut handle) = capture.steal_handle() else {
        return Err(CreateError::FileIOFailed);
    };

    if let Err(e) = decode::decode(&mut handle) {
        logwise::error_sync!(
            "{path} recognised, but couldn't load: {err}",
            path = LogIt(capture.path()),
            err = LogIt(&e)
        );
        return Err(CreateError::ImageUnsupported);
    }
    drop(handle);

    let proxy = match make_proxy() {
        Ok(proxy) => proxy,
        Err(status) => {
            logwise::error_sync!(
                "Couldn't create replay driver to proxy-render images: {status}",
                status = LogIt(&status)
            );
            return Err(CreateError::Proxy(status));
        }
    };

    let mut viewer = ImageViewer::new(proxy, capture.path(), config);
    if viewer.texture_id().is_null() {
        viewer.shutdown();
        return Err(CreateError::ImageUnsupported);
    }
    Ok(viewer)
}
