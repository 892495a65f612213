//! Fixtures for update tests: failing readers, payloads and release JSON.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Reader that yields `limit` bytes of `inner` and then fails.
///
/// Simulates a connection dropping in the middle of a download.
pub struct FailingReader<R> {
    inner: R,
    remaining: usize,
}

impl<R: Read> FailingReader<R> {
    /// Wrap `inner`, failing after `limit` bytes.
    pub fn new(inner: R, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }
}

impl<R: Read> Read for FailingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "simulated connection reset",
            ));
        }
        let len = buf.len().min(self.remaining);
        let read = self.inner.read(&mut buf[..len])?;
        self.remaining -= read;
        Ok(read)
    }
}

/// Writer that accepts `limit` bytes into `inner` and then fails.
///
/// Simulates the staging filesystem running out of space.
pub struct FailingWriter<W> {
    inner: W,
    remaining: usize,
}

impl<W: Write> FailingWriter<W> {
    /// Wrap `inner`, failing after `limit` bytes.
    pub fn new(inner: W, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }
}

impl<W: Write> Write for FailingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(
                io::ErrorKind::StorageFull,
                "simulated disk full",
            ));
        }
        let len = buf.len().min(self.remaining);
        let written = self.inner.write(&buf[..len])?;
        self.remaining -= written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Deterministic, poorly compressible bytes (xorshift64).
pub fn pseudo_random_bytes(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Files in `dir` whose names start with `prefix` but are not exactly `prefix`.
///
/// Matches the temporary files the installer stages beside an executable
/// named `prefix`.
pub fn temp_files(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix) && name != prefix)
        })
        .collect()
}

/// GitHub `releases/latest` payload with one asset per `(name, url)` pair.
pub fn release_json(tag: &str, assets: &[(&str, &str)]) -> serde_json::Value {
    let assets: Vec<serde_json::Value> = assets
        .iter()
        .map(|(name, url)| {
            serde_json::json!({
                "name": name,
                "content_type": "application/gzip",
                "browser_download_url": url,
            })
        })
        .collect();

    serde_json::json!({
        "tag_name": tag,
        "name": tag,
        "draft": false,
        "prerelease": false,
        "assets": assets,
    })
}
