use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("input path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("expected either a directory or a zip file: {}", .0.display())]
    NotDirOrZip(PathBuf),
}

/// Where the source atlases are read from.
#[derive(Debug)]
pub enum InputRoot {
    Directory(PathBuf),
    Archive(ExtractedArchive),
}

impl InputRoot {
    /// Use `path` directly if it is a folder, otherwise extract it as a zip file.
    pub fn resolve(path: &Path) -> Result<Self, ArchiveError> {
        if path.is_dir() {
            return Ok(Self::Directory(path.to_path_buf()));
        }

        if !path.exists() {
            return Err(ArchiveError::NotFound(path.to_path_buf()));
        }

        if !path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        {
            return Err(ArchiveError::NotDirOrZip(path.to_path_buf()));
        }

        Ok(Self::Archive(ExtractedArchive::extract(path)?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) => path,
            Self::Archive(archive) => archive.path(),
        }
    }
}

/// A zip file unpacked into a private temp folder that is removed on drop.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: PathBuf,
}

impl ExtractedArchive {
    pub fn extract(zip_path: &Path) -> Result<Self, ArchiveError> {
        let stem = zip_path
            .file_stem()
            .map_or_else(|| "input".into(), |stem| stem.to_string_lossy());
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());

        let dir = std::env::temp_dir()
            .join(env!("CARGO_PKG_NAME"))
            .join(format!("{stem}-{}-{nanos}", std::process::id()));

        fs::create_dir_all(&dir)?;

        // from here on the guard cleans up, even if extraction fails
        let extracted = Self { dir };

        let mut archive = zip::ZipArchive::new(fs::File::open(zip_path)?)?;
        debug!(
            "extracting {} entries from {} to {}",
            archive.len(),
            zip_path.display(),
            extracted.dir.display()
        );
        archive.extract(&extracted.dir)?;

        Ok(extracted)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl Drop for ExtractedArchive {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.dir) {
            warn!("unable to remove {}: {err}", self.dir.display());
        } else {
            debug!("removed {}", self.dir.display());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

    use super::*;
    use crate::test_util::unique_temp_dir;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut zip = ZipWriter::new(fs::File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap();
    }

    #[test]
    fn directory_is_used_in_place() {
        let dir = unique_temp_dir("archive-dir");

        let root = InputRoot::resolve(&dir).unwrap();
        assert!(matches!(root, InputRoot::Directory(_)));
        assert_eq!(root.path(), dir);

        drop(root);
        assert!(dir.is_dir());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn zip_is_extracted_and_removed_on_drop() {
        let dir = unique_temp_dir("archive-zip");
        let zip_path = dir.join("pack.zip");
        write_zip(
            &zip_path,
            &[
                ("assets/a.txt", b"hello".as_slice()),
                ("assets/nested/b.txt", b"world".as_slice()),
            ],
        );

        let root = InputRoot::resolve(&zip_path).unwrap();
        let extracted = root.path().to_path_buf();

        assert_ne!(extracted, dir);
        assert_eq!(fs::read(extracted.join("assets/a.txt")).unwrap(), b"hello");
        assert_eq!(
            fs::read(extracted.join("assets/nested/b.txt")).unwrap(),
            b"world"
        );

        drop(root);
        assert!(!extracted.exists());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_other_files() {
        let dir = unique_temp_dir("archive-other");
        let file = dir.join("pack.tar");
        fs::write(&file, b"tar").unwrap();

        assert!(matches!(
            InputRoot::resolve(&file),
            Err(ArchiveError::NotDirOrZip(_))
        ));
        assert!(matches!(
            InputRoot::resolve(&dir.join("missing.zip")),
            Err(ArchiveError::NotFound(_))
        ));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_zip_is_an_error() {
        let dir = unique_temp_dir("archive-corrupt");
        let file = dir.join("broken.zip");
        fs::write(&file, b"PK not really").unwrap();

        assert!(matches!(
            InputRoot::resolve(&file),
            Err(ArchiveError::ZipError(_))
        ));

        let _ = fs::remove_dir_all(dir);
    }
}
