//! Download summary functionality.
//!
//! This module contains the [`Summary`] struct and [`Status`] enum describing
//! the outcome of one asset download.
//!
//! # Examples
//!
//! ```rust
//! use ghdl::download::{DownloadTask, Status, Summary};
//!
//! let task = DownloadTask::new("https://example.com/app.tar.gz", "app.tar.gz", "");
//! let summary = Summary::new(task, 2048).with_status(Status::Success);
//!
//! assert!(summary.is_success());
//! assert_eq!(summary.size(), 2048);
//! ```

use super::task::DownloadTask;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download completed and its size matched the declared length
    Success,
    /// Download was stopped by the cancellation signal
    Cancelled,
    /// Body size differed from the declared content length
    SizeMismatch { expected: u64, actual: u64 },
}

/// Represents a [`DownloadTask`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Downloaded item.
    task: DownloadTask,
    /// Bytes written to disk before the outcome was known.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`DownloadTask`] [`Summary`].
    pub fn new(task: DownloadTask, size: u64) -> Self {
        Self {
            task,
            size,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Record the number of bytes written.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's task.
    pub fn task(&self) -> &DownloadTask {
        &self.task
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }

    /// Returns `true` only for a complete, verified download.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
