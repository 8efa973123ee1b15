// SPDX-FileCopyrightText: 2026 Sleuth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte-level access to the files of one bundle.
//!
//! A bundle is either a directory or a zip archive (`.jar`, `.zip`). Resource
//! names are always `/`-separated and relative to the bundle root, so the same
//! name resolves in both forms.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sleuth_core::{BundleLocation, PluginError};
use zip::result::ZipError;
use zip::ZipArchive;

/// Open handle on a bundle's files.
///
/// Each loader component opens its own handle; nothing is shared between
/// bundles or between loads.
pub enum BundleResources {
    Directory(PathBuf),
    Archive(ZipArchive<File>),
}

impl BundleResources {
    /// Open the bundle at `location`.
    ///
    /// A missing path is treated as an empty directory so the usual
    /// missing-resource errors apply. An existing file that is not a zip
    /// archive is an [`PluginError::InvalidLocation`].
    pub fn open(location: &BundleLocation) -> Result<Self, PluginError> {
        let root = location.root();
        if !root.is_file() {
            return Ok(Self::Directory(root.to_path_buf()));
        }

        let invalid = |reason: String| PluginError::InvalidLocation {
            input: location.to_string(),
            reason,
        };
        let file = File::open(root).map_err(|e| invalid(e.to_string()))?;
        let archive = ZipArchive::new(file)
            .map_err(|e| invalid(format!("not a directory or zip archive: {e}")))?;
        Ok(Self::Archive(archive))
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }

    /// Contents of the resource `name`, or `None` when the bundle has no such file.
    pub fn read(&mut self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match self {
            Self::Directory(root) => read_from_directory(root, name),
            Self::Archive(archive) => {
                let mut entry = match archive.by_name(name) {
                    Ok(entry) => entry,
                    Err(ZipError::FileNotFound) => return Ok(None),
                    Err(e) => return Err(io::Error::other(e)),
                };
                if entry.is_dir() {
                    return Ok(None);
                }
                let mut bytes = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
        }
    }
}

impl fmt::Debug for BundleResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(root) => f.debug_tuple("Directory").field(root).finish(),
            Self::Archive(archive) => f
                .debug_struct("Archive")
                .field("entries", &archive.len())
                .finish(),
        }
    }
}

fn read_from_directory(root: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
    let path = name.split('/').fold(root.to_path_buf(), |path, part| path.join(part));
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read(path).map(Some)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn reads_nested_directory_resource() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg/A.wat"), "(module)").unwrap();

        let mut resources = BundleResources::open(&BundleLocation::from_path(dir.path())).unwrap();
        assert!(!resources.is_archive());
        assert_eq!(resources.read("pkg/A.wat").unwrap().as_deref(), Some(&b"(module)"[..]));
        assert_eq!(resources.read("pkg/B.wat").unwrap(), None);
        assert_eq!(resources.read("pkg").unwrap(), None);
    }

    #[test]
    fn reads_archive_entries() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("plugin.jar");
        write_archive(&jar, &[("findbugs.xml", b"<FindbugsPlugin/>"), ("pkg/A.wat", b"(module)")]);

        let mut resources = BundleResources::open(&BundleLocation::from_path(&jar)).unwrap();
        assert!(resources.is_archive());
        assert_eq!(
            resources.read("findbugs.xml").unwrap().as_deref(),
            Some(&b"<FindbugsPlugin/>"[..])
        );
        assert!(resources.read("pkg/A.wat").unwrap().is_some());
        assert_eq!(resources.read("messages.xml").unwrap(), None);
    }

    #[test]
    fn plain_file_is_invalid_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.jar");
        std::fs::write(&path, "not an archive").unwrap();

        match BundleResources::open(&BundleLocation::from_path(&path)) {
            Err(PluginError::InvalidLocation { reason, .. }) => {
                assert!(reason.contains("zip"), "reason: {reason}");
            }
            Ok(_) => panic!("expected InvalidLocation, got a bundle"),
            Err(other) => panic!("expected InvalidLocation, got {other:?}"),
        }
    }

    #[test]
    fn missing_path_opens_as_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources =
            BundleResources::open(&BundleLocation::from_path(dir.path().join("absent"))).unwrap();
        assert_eq!(resources.read("findbugs.xml").unwrap(), None);
    }
}
