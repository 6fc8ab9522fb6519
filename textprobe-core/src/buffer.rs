// textprobe-core/src/buffer.rs
//! In-memory file content for scanning.
//!
//! Content is read in fixed-size chunks into a growable buffer, then a single
//! terminator byte is appended. The scannable region ends at the first
//! terminator, so content with an embedded NUL is only scanned up to it.

use std::io::{self, Read};

use log::debug;

/// Default size of each read from the file.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const TERMINATOR: u8 = 0;

#[derive(Debug, Default, Clone)]
pub struct ContentBuffer {
    bytes: Vec<u8>,
    /// Bytes read from the source, terminator excluded.
    len: usize,
}

impl ContentBuffer {
    /// Reads `reader` to its end, `chunk_size` bytes at a time.
    pub fn read_from<R: Read>(reader: &mut R, chunk_size: usize) -> io::Result<Self> {
        let chunk_size = chunk_size.max(1);
        let mut bytes: Vec<u8> = Vec::new();
        let mut len = 0usize;

        loop {
            bytes.resize(len + chunk_size, 0);
            match reader.read(&mut bytes[len..len + chunk_size]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        bytes.truncate(len);
        bytes.push(TERMINATOR);
        debug!("Read {} bytes in chunks of {}", len, chunk_size);
        Ok(Self { bytes, len })
    }

    pub fn from_bytes(content: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(content.len() + 1);
        bytes.extend_from_slice(content);
        bytes.push(TERMINATOR);
        Self {
            bytes,
            len: content.len(),
        }
    }

    /// Number of content bytes read, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The region handed to the regex engine: everything before the first terminator.
    pub fn haystack(&self) -> &[u8] {
        let content = &self.bytes[..self.len];
        match memchr::memchr(TERMINATOR, content) {
            Some(end) => &content[..end],
            None => content,
        }
    }
}
