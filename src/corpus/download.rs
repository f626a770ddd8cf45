//! Idempotent fetching of declared remote resources.
//!
//! A resource whose destination already exists with a matching checksum is
//! skipped. Fetches stream into a `.part` sibling and are verified before the
//! rename into place, so an interrupted or corrupted transfer never lands at
//! the destination path; a later `validate()` run sees it as missing, not as
//! silently fine.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Serialize;
use tracing::{debug, info};

use crate::corpus::checksum::file_checksum;
use crate::corpus::error::DataError;

/// How to unpack a fetched archive. Only gzipped tarballs are supported; the
/// supported corpora distribute annotations that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unpack {
    TarGz,
}

/// One named downloadable file.
#[derive(Debug, Clone)]
pub struct RemoteResource {
    pub name: String,
    pub url: String,
    /// Path under the data home where the fetched file lands.
    pub destination: String,
    pub checksum: Option<String>,
    pub unpack: Option<Unpack>,
}

impl RemoteResource {
    pub fn new(name: &str, url: &str, destination: &str) -> RemoteResource {
        RemoteResource {
            name: name.to_string(),
            url: url.to_string(),
            destination: destination.to_string(),
            checksum: None,
            unpack: None,
        }
    }

    pub fn with_checksum(mut self, checksum: &str) -> RemoteResource {
        self.checksum = Some(checksum.to_string());
        self
    }

    pub fn with_unpack(mut self, unpack: Unpack) -> RemoteResource {
        self.unpack = Some(unpack);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadReport {
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} skipped",
            self.downloaded.len(),
            self.skipped.len()
        )
    }
}

/// Pick the requested subset, rejecting unknown names before any transfer
/// starts.
fn select<'a>(
    remotes: &'a [RemoteResource],
    names: Option<&[&str]>,
) -> Result<Vec<&'a RemoteResource>, DataError> {
    match names {
        None => Ok(remotes.iter().collect()),
        Some(names) => names
            .iter()
            .map(|name| {
                remotes
                    .iter()
                    .find(|remote| remote.name == *name)
                    .ok_or_else(|| DataError::Download {
                        url: (*name).to_string(),
                        message: "unknown remote resource name".to_string(),
                    })
            })
            .collect(),
    }
}

/// The idempotence decision: fetch when forced, when the destination is
/// absent, or when its content digest disagrees with the declared checksum.
/// A declared resource without a checksum is existence-only.
fn needs_fetch(destination: &Path, checksum: Option<&str>, force: bool) -> Result<bool, DataError> {
    if force {
        return Ok(true);
    }
    if !destination.is_file() {
        return Ok(true);
    }
    match checksum {
        None => Ok(false),
        Some(expected) => Ok(file_checksum(destination)? != expected),
    }
}

fn fetch_one(remote: &RemoteResource, destination: &Path) -> Result<(), DataError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|err| DataError::Io {
            path: parent.to_path_buf(),
            source: err,
        })?;
    }

    let mut response = reqwest::blocking::get(&remote.url)
        .and_then(|response| response.error_for_status())
        .map_err(|err| DataError::Download {
            url: remote.url.clone(),
            message: err.to_string(),
        })?;

    let file_name = destination
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download");
    let part_path = destination.with_file_name(format!("{file_name}.part"));
    let mut part = File::create(&part_path).map_err(|err| DataError::Io {
        path: part_path.clone(),
        source: err,
    })?;
    io::copy(&mut response, &mut part).map_err(|err| DataError::Io {
        path: part_path.clone(),
        source: err,
    })?;
    drop(part);

    if let Some(expected) = remote.checksum.as_deref() {
        let actual = file_checksum(&part_path)?;
        if actual != expected {
            let _ = fs::remove_file(&part_path);
            return Err(DataError::ChecksumMismatch {
                path: destination.to_path_buf(),
                expected: expected.to_string(),
                actual,
            });
        }
    }

    fs::rename(&part_path, destination).map_err(|err| DataError::Io {
        path: destination.to_path_buf(),
        source: err,
    })?;
    info!(url = %remote.url, destination = %destination.display(), "fetched remote resource");
    Ok(())
}

fn unpack_tar_gz(archive_path: &Path, data_home: &Path) -> Result<(), DataError> {
    let file = File::open(archive_path).map_err(|err| DataError::from_read(archive_path, err))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive.unpack(data_home).map_err(|err| DataError::Io {
        path: archive_path.to_path_buf(),
        source: err,
    })?;
    debug!(archive = %archive_path.display(), "unpacked archive");
    Ok(())
}

/// Fetch `names` (or everything) into `data_home`. The data home must already
/// exist; `Dataset::download` creates it via the write-path resolver.
pub fn fetch_remotes(
    remotes: &[RemoteResource],
    data_home: &Path,
    names: Option<&[&str]>,
    force: bool,
) -> Result<DownloadReport, DataError> {
    let selected = select(remotes, names)?;
    let mut report = DownloadReport::default();
    for remote in selected {
        let destination = data_home.join(&remote.destination);
        if !needs_fetch(&destination, remote.checksum.as_deref(), force)? {
            debug!(resource = %remote.name, "destination up to date, skipping");
            report.skipped.push(remote.name.clone());
            continue;
        }
        fetch_one(remote, &destination)?;
        if let Some(Unpack::TarGz) = remote.unpack {
            unpack_tar_gz(&destination, data_home)?;
        }
        report.downloaded.push(remote.name.clone());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;
    use crate::corpus::checksum::bytes_checksum;

    fn remotes() -> Vec<RemoteResource> {
        vec![
            RemoteResource::new("annotations", "https://example.org/a.tar.gz", "a.tar.gz"),
            RemoteResource::new("metadata", "https://example.org/meta.csv", "meta.csv"),
        ]
    }

    #[test]
    fn select_all_preserves_declaration_order() {
        let remotes = remotes();
        let selected = select(&remotes, None).expect("select");
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "annotations");
    }

    #[test]
    fn select_unknown_name_is_fatal() {
        let remotes = remotes();
        assert!(matches!(
            select(&remotes, Some(&["nope"])),
            Err(DataError::Download { .. })
        ));
    }

    #[test]
    fn existing_file_with_matching_checksum_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let destination = dir.path().join("meta.csv");
        fs::write(&destination, b"id,title\n").expect("write");
        let checksum = bytes_checksum(b"id,title\n");
        assert!(!needs_fetch(&destination, Some(&checksum), false).expect("decide"));
        assert!(needs_fetch(&destination, Some(&checksum), true).expect("force refetches"));
    }

    #[test]
    fn stale_or_absent_file_needs_fetch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let destination = dir.path().join("meta.csv");
        let checksum = bytes_checksum(b"expected");
        assert!(needs_fetch(&destination, Some(&checksum), false).expect("absent"));
        fs::write(&destination, b"something else").expect("write");
        assert!(needs_fetch(&destination, Some(&checksum), false).expect("stale"));
    }

    #[test]
    fn existing_file_without_checksum_is_existence_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let destination = dir.path().join("a.tar.gz");
        fs::write(&destination, b"whatever").expect("write");
        assert!(!needs_fetch(&destination, None, false).expect("decide"));
    }

    #[test]
    fn tarball_unpacks_under_the_data_home() {
        let dir = tempfile::tempdir().expect("tempdir");
        let archive_path = dir.path().join("annotations.tar.gz");

        let mut builder = tar::Builder::new(GzEncoder::new(
            File::create(&archive_path).expect("create"),
            Compression::default(),
        ));
        let payload = b"0.5 1\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(payload.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "annotations/t1.beats", payload.as_slice())
            .expect("append");
        builder
            .into_inner()
            .expect("finish tar")
            .finish()
            .expect("finish gzip");

        unpack_tar_gz(&archive_path, dir.path()).expect("unpack");
        let unpacked = dir.path().join("annotations/t1.beats");
        assert_eq!(fs::read(unpacked).expect("read"), payload);
    }
}
