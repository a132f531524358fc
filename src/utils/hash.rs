//! Content fingerprinting for compiled asset names.
//!
//! Uses blake3 so a compiled name changes exactly when its content does,
//! which is what makes fingerprinted names safe to cache forever.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Length of the hex fingerprint embedded in compiled file names.
pub const FINGERPRINT_LEN: usize = 8;

/// Compute the fingerprint of a file's contents, streaming so large assets
/// are never held in memory whole.
pub fn fingerprint_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(encode(&hasher.finalize()))
}

fn encode(hash: &blake3::Hash) -> String {
    hex::encode(&hash.as_bytes()[..FINGERPRINT_LEN / 2])
}
