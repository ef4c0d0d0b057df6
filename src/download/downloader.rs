//! Streaming asset downloads with size verification.
//!
//! A download is either complete, with exactly as many bytes as the server
//! declared, or absent: on any failure the destination file is removed. The
//! cancellation token is observed while waiting for every chunk.

use super::summary::{Status, Summary};
use super::task::DownloadTask;
use crate::error::DownloadError;
use crate::http::with_token;
use crate::progress::ProgressDisplay;
use crate::utils::content_length::declared_content_length;

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::Response;
use reqwest_middleware::ClientWithMiddleware;
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Downloads assets into a directory.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: ClientWithMiddleware,
    directory: PathBuf,
}

impl AssetDownloader {
    /// Creates a downloader writing into `directory`.
    pub fn new(client: ClientWithMiddleware, directory: impl Into<PathBuf>) -> Self {
        Self {
            client,
            directory: directory.into(),
        }
    }

    /// Downloads one asset.
    ///
    /// A task whose token is already cancelled is not started.
    pub async fn download(
        &self,
        task: &DownloadTask,
        cancel: &CancellationToken,
        progress: &ProgressDisplay,
    ) -> Summary {
        let summary = if cancel.is_cancelled() {
            Summary::new(task.clone(), 0).with_status(Status::Cancelled)
        } else {
            debug!("Start to download file \"{}\"", task.filename);
            self.fetch(task, cancel, progress).await
        };

        match summary.status() {
            Status::Success => info!("Downloaded file: \"{}\"", task.filename),
            Status::Cancelled => warn!("Download of \"{}\" cancelled", task.filename),
            Status::SizeMismatch { expected, actual } => warn!(
                "Failed to download file \"{}\": expected {} bytes, received {}",
                task.filename, expected, actual
            ),
            Status::Fail(e) => warn!("Failed to download file \"{}\": {}", task.filename, e),
            Status::NotStarted => {}
        }
        summary
    }

    /// Fetches the asset and writes it to disk.
    async fn fetch(
        &self,
        task: &DownloadTask,
        cancel: &CancellationToken,
        progress: &ProgressDisplay,
    ) -> Summary {
        let summary = Summary::new(task.clone(), 0);

        let (res, expected) = match self.request(task).await {
            Ok(r) => r,
            Err(e) => return summary.fail(e),
        };

        let output = task.destination(&self.directory);
        debug!("Creating destination file {:?}", &output);
        let mut file = match File::create(&output).await {
            Ok(file) => file,
            Err(e) => return summary.fail(DownloadError::Io(e)),
        };

        let pb = progress.create_child_progress(expected);
        pb.set_message(task.filename.clone());
        let mut received = 0;
        let written = write_body(res, &mut file, cancel, &pb, &mut received).await;
        drop(file);
        progress.finish_child(pb);

        // A connection closed before the declared length is a short body.
        let (size, status) = match written {
            Err(DownloadError::Cancelled) => (0, Status::Cancelled),
            Ok(()) | Err(DownloadError::Transfer(_)) if received != expected => (
                received,
                Status::SizeMismatch {
                    expected,
                    actual: received,
                },
            ),
            Ok(()) => (received, Status::Success),
            Err(e) => (0, Status::Fail(e.to_string())),
        };

        if status == Status::Success {
            progress.increment_main();
        } else {
            warn!(
                "Failed to download file completely, deleting file \"{}\"",
                task.filename
            );
            remove_partial(&output).await;
        }

        summary.with_status(status).with_size(size)
    }

    /// Sends the request and validates the response headers.
    async fn request(&self, task: &DownloadTask) -> Result<(Response, u64), DownloadError> {
        debug!("Fetching {}", &task.url);
        let req = with_token(self.client.get(task.url.as_str()), &task.token)?;
        let res = req.send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let expected = declared_content_length(&res)?;
        Ok((res, expected))
    }
}

/// Streams the body into `file`, counting the bytes written in `written`.
async fn write_body(
    res: Response,
    file: &mut File,
    cancel: &CancellationToken,
    pb: &ProgressBar,
    written: &mut u64,
) -> Result<(), DownloadError> {
    let mut stream = res.bytes_stream();
    loop {
        let item = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DownloadError::Cancelled),
            item = stream.next() => item,
        };
        let Some(item) = item else { break };

        let mut chunk = item?;
        let chunk_size = chunk.len() as u64;
        file.write_all_buf(&mut chunk).await?;
        *written += chunk_size;
        pb.inc(chunk_size);
    }
    file.flush().await?;
    Ok(())
}

async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to delete partial file {:?}: {}", path, e),
    }
}
