//! File and stream hashing, checksum lists
//!
//! Checksum lines use the coreutils layout `"<hex>  <name>"`. The digest
//! size of a line follows from its hex length: 64 characters for
//! Streebog-256, 128 for Streebog-512.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use serde::Serialize;
use streebog_core::{DigestSize, DynStreebog};

use crate::error::{Error, Result};

/// Name that selects stdin instead of a file
pub const STDIN_NAME: &str = "-";

/// Hash everything `reader` yields, `chunk_size` bytes at a time
pub fn hash_reader<R: Read>(size: DigestSize, mut reader: R, chunk_size: usize) -> Result<Vec<u8>> {
    let mut ctx = DynStreebog::new(size);
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        ctx.update(&buf[..n])?;
        total += n as u64;
    }

    log::debug!("{}: hashed {} bytes", size, total);
    Ok(ctx.finalize()?)
}

/// Hash a file, or stdin when `path` is `-`
pub fn hash_path(size: DigestSize, path: &Path, chunk_size: usize) -> Result<Vec<u8>> {
    if path.as_os_str() == STDIN_NAME {
        return hash_reader(size, io::stdin().lock(), chunk_size);
    }

    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("hashing {}", path.display());
    hash_reader(size, file, chunk_size).map_err(|e| match e {
        Error::Io(source) => Error::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// `"<hex>  <name>"`
pub fn format_checksum_line(digest: &[u8], name: &str) -> String {
    format!("{}  {}", hex::encode(digest), name)
}

/// One parsed entry of a checksum list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumLine {
    pub size: DigestSize,
    pub expected: Vec<u8>,
    pub name: String,
}

/// Parse a checksum line; `line_no` is only used in error messages
///
/// Accepts the text-mode separator (two spaces) and the binary-mode one
/// (`" *"`).
pub fn parse_checksum_line(line: &str, line_no: usize) -> Result<ChecksumLine> {
    let malformed = |reason: &str| Error::ChecksumLine {
        line: line_no,
        reason: reason.to_string(),
    };

    let line = line.trim_end_matches(['\r', '\n']);
    let (digest_hex, rest) = line
        .split_once(' ')
        .ok_or_else(|| malformed("missing separator"))?;
    let name = rest
        .strip_prefix(' ')
        .or_else(|| rest.strip_prefix('*'))
        .ok_or_else(|| malformed("expected two spaces or \" *\" after the digest"))?;
    if name.is_empty() {
        return Err(malformed("missing file name"));
    }

    let expected = hex::decode(digest_hex)?;
    let size = DigestSize::from_bytes(expected.len())
        .ok_or_else(|| malformed("digest must be 64 or 128 hex characters"))?;

    Ok(ChecksumLine {
        size,
        expected,
        name: name.to_string(),
    })
}

/// Result of checking one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    Ok,
    Mismatch,
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

/// Verify every entry of a checksum list
///
/// Blank lines and lines starting with `#` are skipped. A malformed line
/// aborts the whole check; a missing or unreadable file only marks its
/// own entry.
pub fn verify_checksums<R: BufRead>(reader: R, chunk_size: usize) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = parse_checksum_line(&line, idx + 1)?;

        let outcome = match hash_path(entry.size, Path::new(&entry.name), chunk_size) {
            Ok(actual) if actual == entry.expected => CheckOutcome::Ok,
            Ok(_) => CheckOutcome::Mismatch,
            Err(e) => CheckOutcome::Unreadable {
                reason: e.to_string(),
            },
        };
        log::debug!("{}: {:?}", entry.name, outcome);

        results.push(CheckResult {
            name: entry.name,
            outcome,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use streebog_core::Streebog256;

    #[test]
    fn test_reader_matches_one_shot_for_any_chunk_size() {
        let data: Vec<u8> = (0..1000u32).map(|i| i as u8).collect();
        let expected = DigestSize::Bits512.digest(&data);
        for chunk in [1usize, 63, 64, 65, 4096] {
            let got = hash_reader(DigestSize::Bits512, data.as_slice(), chunk).unwrap();
            assert_eq!(got, expected, "chunk size {}", chunk);
        }
    }

    #[test]
    fn test_format_then_parse() {
        let digest = Streebog256::digest(b"abc");
        let line = format_checksum_line(&digest, "dir/file name.txt");
        assert_eq!(&line[64..66], "  ");

        let entry = parse_checksum_line(&line, 1).unwrap();
        assert_eq!(entry.size, DigestSize::Bits256);
        assert_eq!(entry.expected, digest.to_vec());
        assert_eq!(entry.name, "dir/file name.txt");
    }

    #[test]
    fn test_parse_binary_marker() {
        let line = format!("{} *image.bin", "ab".repeat(64));
        let entry = parse_checksum_line(&line, 3).unwrap();
        assert_eq!(entry.size, DigestSize::Bits512);
        assert_eq!(entry.name, "image.bin");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let short = format!("{}  f", "ab".repeat(20));
        for bad in ["", "nospace", "abcd f", short.as_str()] {
            assert!(parse_checksum_line(bad, 7).is_err(), "{:?}", bad);
        }
        let not_hex = format!("{}  f", "zz".repeat(32));
        assert!(matches!(
            parse_checksum_line(&not_hex, 1),
            Err(Error::Hex(_))
        ));
        let no_name = format!("{}  ", "00".repeat(32));
        assert!(matches!(
            parse_checksum_line(&no_name, 9),
            Err(Error::ChecksumLine { line: 9, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let list = format!(
            "# comment\n\n{}  /nonexistent/gostsum/test/file\n",
            "00".repeat(32)
        );
        let results = verify_checksums(list.as_bytes(), 4096).unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            CheckOutcome::Unreadable { .. }
        ));
    }
}
