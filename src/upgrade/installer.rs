//! Download-and-replace of the running executable.
//!
//! The pipeline is strictly linear and stops at the first failure:
//!
//! ```text
//! GET → status check → gunzip → first tar entry → temp file beside the
//! executable → copy → single-entry check → chmod 0755 → rename over executable
//! ```
//!
//! The compressed archive is never written to disk. The response body is
//! streamed through the gzip decoder and tar reader straight into a temporary
//! file created in the executable's own directory, so the final rename stays
//! on one filesystem. The temporary file is removed on every path that does
//! not end in the rename.

use futures::TryStreamExt;
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tokio_util::io::{StreamReader, SyncIoBridge};
use tracing::{debug, info};

use super::AppInfo;
use crate::core::UpdateError;
use crate::utils::progress;

/// Downloads release archives and installs the contained binary over a target path.
///
/// The target is normally the resolved path of the running executable; tests
/// point it at a scratch file instead.
///
/// # Examples
///
/// ```rust,no_run
/// use update_cli::upgrade::{AppInfo, Installer};
///
/// # async fn example() -> anyhow::Result<()> {
/// let info = AppInfo::new("Heidelberger", "update", "v1.0.0");
/// let target = std::env::current_exe()?;
/// let installer = Installer::new(reqwest::Client::new(), &info, target);
///
/// installer
///     .download_binary("https://github.com/Heidelberger/update/releases/download/v1.1.0/update-v1.1.0-linux-amd64.tar.gz")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Installer {
    client: reqwest::Client,
    app_name: String,
    target: PathBuf,
    show_progress: bool,
}

impl Installer {
    /// Create an installer replacing `target`, with progress output disabled.
    pub fn new(client: reqwest::Client, info: &AppInfo, target: impl Into<PathBuf>) -> Self {
        Self {
            client,
            app_name: info.app_name().to_string(),
            target: target.into(),
            show_progress: false,
        }
    }

    /// Enable or disable the download progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Path that gets replaced by the downloaded binary.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Download the archive at `url` and install its single entry over the target.
    ///
    /// The request carries no custom headers and relies on the transport's
    /// default timeouts; there is no retry. Any failure is returned as
    /// [`UpdateError::Download`] and leaves the target untouched.
    ///
    /// # Errors
    ///
    /// - the request fails or the server answers with a non-2xx status
    /// - the body is not a gzip-compressed tar archive
    /// - the archive does not contain exactly one entry
    /// - the temporary file cannot be created, written, chmod'ed or renamed
    pub async fn download_binary(&self, url: &str) -> Result<(), UpdateError> {
        info!("Downloading {}", url);

        let response = self.client.get(url).send().await.map_err(UpdateError::download)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::download(format!("HTTP {status} while downloading {url}")));
        }

        let bar = progress::download_bar(response.content_length(), self.show_progress);
        bar.set_message(self.app_name.clone());

        let body = Box::pin(response.bytes_stream().map_err(io::Error::other));
        let reader = SyncIoBridge::new(StreamReader::new(body));

        let target = self.target.clone();
        let prefix = self.app_name.clone();
        let task_bar = bar.clone();
        let result = tokio::task::spawn_blocking(move || {
            install_from_archive(task_bar.wrap_read(reader), &target, &prefix)
        })
        .await
        .map_err(|e| UpdateError::download(format!("Install task failed: {e}")))?;

        finish_bar(&bar, result.is_ok());
        if result.is_ok() {
            info!("Installed new binary at {}", self.target.display());
        }
        result
    }
}

fn finish_bar(bar: &ProgressBar, succeeded: bool) {
    if succeeded {
        bar.finish_and_clear();
    } else {
        bar.abandon();
    }
}

/// Install the single entry of a gzip-compressed tar stream over `target`.
///
/// The entry is copied into a temporary file named `{prefix}*` in the
/// directory of `target`, marked executable and renamed over `target`. Entry
/// names and metadata stored in the archive are ignored.
///
/// # Errors
///
/// Returns [`UpdateError::Download`] when the stream is not valid gzip/tar,
/// holds zero or more than one entry, or any file operation fails. In every
/// error case `target` is unchanged and no temporary file is left behind.
pub fn install_from_archive<R: Read>(
    archive: R,
    target: &Path,
    prefix: &str,
) -> Result<(), UpdateError> {
    install_with_sink(archive, target, prefix, |file| file)
}

/// [`install_from_archive`] with the staged file's writer supplied by `sink`.
fn install_with_sink<R, W, F>(
    archive: R,
    target: &Path,
    prefix: &str,
    sink: F,
) -> Result<(), UpdateError>
where
    R: Read,
    W: Write,
    F: FnOnce(File) -> W,
{
    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(archive));
    let mut entries = archive
        .entries()
        .map_err(|e| UpdateError::download(format!("Failed to read archive: {e}")))?;

    let mut entry = match entries.next() {
        Some(entry) => {
            entry.map_err(|e| UpdateError::download(format!("Failed to read archive entry: {e}")))?
        }
        None => return Err(UpdateError::download("archive contains no entries")),
    };
    if let Ok(path) = entry.path() {
        debug!("Extracting archive entry {}", path.display());
    }

    let dir = parent_dir(target);
    let staged = tempfile::Builder::new().prefix(prefix).tempfile_in(dir).map_err(|e| {
        UpdateError::download(format!(
            "Failed to create temporary file in {}: {e}",
            dir.display()
        ))
    })?;
    debug!("Staging new binary at {}", staged.path().display());

    let handle = staged
        .as_file()
        .try_clone()
        .map_err(|e| UpdateError::download(format!("Failed to open temporary file: {e}")))?;
    let mut dest = sink(handle);

    let expected = entry.size();
    let copied = io::copy(&mut entry, &mut dest)
        .and_then(|copied| dest.flush().map(|()| copied))
        .map_err(|e| UpdateError::download(format!("Failed to extract binary: {e}")))?;
    drop(dest);
    if copied != expected {
        return Err(UpdateError::download(format!(
            "archive entry truncated: got {copied} of {expected} bytes"
        )));
    }
    drop(entry);

    if let Some(extra) = entries.next() {
        let name = match &extra {
            Ok(e) => entry_name(e),
            Err(_) => "<unreadable>".to_string(),
        };
        return Err(UpdateError::download(format!(
            "archive contains more than one entry (unexpected '{name}')"
        )));
    }

    staged
        .as_file()
        .sync_all()
        .map_err(|e| UpdateError::download(format!("Failed to flush binary to disk: {e}")))?;
    set_executable(staged.as_file())?;

    staged.persist(target).map_err(|e| {
        UpdateError::download(format!("Failed to replace {}: {}", target.display(), e.error))
    })?;

    Ok(())
}

fn entry_name<R: Read>(entry: &tar::Entry<'_, R>) -> String {
    match entry.path() {
        Ok(path) => path.display().to_string(),
        Err(_) => "<unreadable>".to_string(),
    }
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn set_executable(file: &File) -> Result<(), UpdateError> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(std::fs::Permissions::from_mode(crate::constants::BINARY_MODE))
        .map_err(|e| UpdateError::download(format!("Failed to make binary executable: {e}")))
}

#[cfg(not(unix))]
fn set_executable(_file: &File) -> Result<(), UpdateError> {
    Ok(())
}
