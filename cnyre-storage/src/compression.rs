//! Decoding of downloaded snapshot objects

use cnyre_core::Compression;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Decompress a gzip file into `dest`, returning the decompressed size
pub fn gunzip_file(src: &Path, dest: &Path) -> io::Result<u64> {
    let input = File::open(src)?;
    let mut decoder = GzDecoder::new(BufReader::new(input));
    let mut output = BufWriter::new(File::create(dest)?);
    let written = io::copy(&mut decoder, &mut output)?;
    output.flush()?;
    Ok(written)
}

/// Whether a downloaded object needs decoding before use
pub fn needs_decoding(compression: Compression) -> bool {
    matches!(compression, Compression::Gzip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use tempfile::TempDir;

    #[test]
    fn test_gunzip_round_trip() {
        let dir = TempDir::new().unwrap();
        let gz = dir.path().join("data.gz");
        let out = dir.path().join("data");

        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), flate2::Compression::fast());
        encoder.write_all(b"SQLite format 3\0").unwrap();
        encoder.finish().unwrap();

        assert_eq!(gunzip_file(&gz, &out).unwrap(), 16);
        assert_eq!(std::fs::read(&out).unwrap(), b"SQLite format 3\0");
    }

    #[test]
    fn test_gunzip_rejects_plain_file() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain.db");
        std::fs::write(&plain, b"not gzip at all").unwrap();

        assert!(gunzip_file(&plain, &dir.path().join("out")).is_err());
    }

    #[test]
    fn test_needs_decoding() {
        assert!(needs_decoding(Compression::Gzip));
        assert!(!needs_decoding(Compression::None));
    }
}
