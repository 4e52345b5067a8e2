//! File-level compression with the extension-marker convention.
//!
//! `compress_file` turns `name` into `name.LZ77` / `name.LZSS` and removes
//! `name`; `decompress_file` does the reverse. Existing files are never
//! overwritten, and a failed write leaves no output behind.

use crate::codec::{Decoder, Encoder};
use crate::error::{Error, Result};
use crate::{CodecConfig, CodecStats, Token, TokenFormat};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Where a file operation wrote its output, and what it did
#[derive(Clone, Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: CodecStats,
    /// Tokens written (compression) or parsed (decompression)
    pub tokens: Vec<Token>,
}

/// Path of the compressed file for `path` under `format`
pub fn compressed_path(path: &Path, format: TokenFormat) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Compress `path` into `path.<MARKER>` and remove the original
pub fn compress_file(path: &Path, config: &CodecConfig) -> Result<FileReport> {
    let output_path = compressed_path(path, config.format());
    let input = fs::read(path)?;

    let encoded = Encoder::new(*config).encode(&input);
    write_new_file(&output_path, &encoded.data)?;
    fs::remove_file(path)?;

    log::debug!("Compressed {} into {}", path.display(), output_path.display());
    Ok(FileReport { path: output_path, stats: encoded.stats, tokens: encoded.tokens })
}

/// Decompress `path.<MARKER>` back into `path` and remove the compressed file
pub fn decompress_file(path: &Path, config: &CodecConfig) -> Result<FileReport> {
    let format = config.format();
    if TokenFormat::from_path(path) != Some(format) {
        return Err(Error::UnrecognizedExtension {
            path: path.to_path_buf(),
            expected: format.extension(),
        });
    }

    let output_path = path.with_extension("");
    let input = fs::read(path)?;

    let decoded = Decoder::new(*config).decode(&input)?;
    write_new_file(&output_path, &decoded.data)?;
    fs::remove_file(path)?;

    log::debug!("Decompressed {} into {}", path.display(), output_path.display());
    Ok(FileReport { path: output_path, stats: decoded.stats, tokens: decoded.tokens })
}

/// Create `path` (which must not exist) and write `data` to it
fn write_new_file(path: &Path, data: &[u8]) -> Result<()> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::OutputExists(path.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    if let Err(e) = write_all(file, data) {
        // Don't leave a truncated file that looks like a result
        fs::remove_file(path).ok();
        return Err(e.into());
    }
    Ok(())
}

fn write_all(file: File, data: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("dir/alice29.txt"), TokenFormat::Lz77),
            PathBuf::from("dir/alice29.txt.LZ77")
        );
        assert_eq!(
            compressed_path(Path::new("data"), TokenFormat::Lzss),
            PathBuf::from("data.LZSS")
        );
    }

    #[test]
    fn test_compress_and_decompress_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.txt");
        fs::write(&path, b"ABRACADABRA ABRACADABRA").unwrap();

        let config = CodecConfig::new(64, 16).unwrap();
        let compressed = compress_file(&path, &config).unwrap();
        assert_eq!(compressed.path, dir.path().join("message.txt.LZSS"));
        assert!(!path.exists());
        assert_eq!(compressed.stats.original_bytes, 23);
        assert_eq!(compressed.tokens.len() as u64, compressed.stats.tokens);

        let restored = decompress_file(&compressed.path, &config).unwrap();
        assert_eq!(restored.path, path);
        assert!(!compressed.path.exists());
        assert_eq!(restored.tokens, compressed.tokens);
        assert_eq!(fs::read(&path).unwrap(), b"ABRACADABRA ABRACADABRA");
    }

    #[test]
    fn test_existing_output_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.bin");
        let existing = dir.path().join("input.bin.LZ77");
        fs::write(&path, b"payload").unwrap();
        fs::write(&existing, b"keep me").unwrap();

        let config = CodecConfig::default().with_format(TokenFormat::Lz77);
        let err = compress_file(&path, &config).unwrap_err();
        assert!(matches!(err, Error::OutputExists(p) if p == existing));
        assert_eq!(fs::read(&existing).unwrap(), b"keep me");
        assert!(path.exists());
    }

    #[test]
    fn test_decompress_requires_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.LZ77");
        fs::write(&path, b"").unwrap();

        let err = decompress_file(&path, &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedExtension { expected: "LZSS", .. }));
        assert!(path.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = compress_file(&dir.path().join("absent"), &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!dir.path().join("absent.LZSS").exists());
    }
}
