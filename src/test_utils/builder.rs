//! In-memory release archive builder.

use flate2::Compression;
use flate2::write::GzEncoder;

/// Builds gzip-compressed tar archives shaped like published release assets.
///
/// ```rust,ignore
/// use update_cli::test_utils::ArchiveBuilder;
///
/// let empty = ArchiveBuilder::new().build();
/// let single = ArchiveBuilder::new().entry("update", b"#!/bin/sh\n").build();
/// let double = ArchiveBuilder::new()
///     .entry("update", b"binary")
///     .entry("checksums.txt", b"abc")
///     .build();
/// # let _ = (empty, single, double);
/// ```
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    /// Start an archive with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a regular file entry.
    pub fn entry(mut self, name: impl Into<String>, data: impl AsRef<[u8]>) -> Self {
        self.entries.push((name.into(), data.as_ref().to_vec()));
        self
    }

    /// Encode the archive.
    ///
    /// # Panics
    ///
    /// Panics if an entry name cannot be stored in a tar header.
    pub fn build(self) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut tar = tar::Builder::new(encoder);

        for (name, data) in &self.entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            tar.append_data(&mut header, name, data.as_slice())
                .expect("append archive entry");
        }

        tar.into_inner()
            .expect("finish tar stream")
            .finish()
            .expect("finish gzip stream")
    }
}
