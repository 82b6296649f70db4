// crates/infra/src/persistence/file_reader.rs
use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::Path,
};

/// Whole-file reads with consistent error handling.
pub struct FileReader;

impl FileReader {
    pub fn read_to_end(path: &Path) -> std::io::Result<Vec<u8>> {
        let mut file = File::open(path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Like [`FileReader::read_to_end`], but a missing file is `Ok(None)`.
    pub fn read_if_exists(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
        match Self::read_to_end(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
