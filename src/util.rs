use anyhow::{anyhow, Result};
use std::fs::File;
use std::io;
use std::path::Path;

/// Opens a file, annotating any error with the file's role and path.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}

/// Reads a file as text with best-effort decoding: byte sequences that are
/// not valid UTF-8 become U+FFFD instead of failing the read.
pub fn read_text_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
