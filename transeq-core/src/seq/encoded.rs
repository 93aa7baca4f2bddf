//! Compact binary form of one FASTA record.
//!
//! Layout of the single backing buffer:
//! - `[0..4]` little-endian `u32`, end of the header region (prefix included)
//! - `[4..header_end]` raw header line, `>` marker and comment included
//! - `[header_end..]` one nucleotide class per body base

use crate::alphabets::nucleotide::{self, N};
use crate::error::{TranseqError, TranseqResult};
use crate::io::OnInvalid;
use crossbeam::channel::{bounded, Receiver, Sender};
use log::warn;

const PREFIX: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedRecord {
    buf: Vec<u8>,
}

impl EncodedRecord {
    #[inline]
    pub fn header_end(&self) -> usize {
        u32::from_le_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]]) as usize
    }

    pub fn header(&self) -> &[u8] {
        &self.buf[PREFIX..self.header_end()]
    }

    pub fn body(&self) -> &[u8] {
        &self.buf[self.header_end()..]
    }

    pub fn body_len(&self) -> usize {
        self.buf.len() - self.header_end()
    }

    /// Header and body together, borrowed at once.
    pub fn parts(&self) -> (&[u8], &[u8]) {
        let (head, body) = self.buf.split_at(self.header_end());
        (&head[PREFIX..], body)
    }

    /// Reverse-complements the body in place. The header is untouched.
    pub fn reverse_complement(&mut self) {
        let start = self.header_end();
        nucleotide::reverse_complement(&mut self.buf[start..]);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Recycles record buffers from workers back to the encoder.
///
/// A returned record is moved into the pool, so it cannot be read again.
#[derive(Clone, Debug)]
pub struct RecordPool {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl RecordPool {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// An empty buffer able to hold at least `size` bytes.
    pub fn take(&self, size: usize) -> Vec<u8> {
        let mut buf = self.rx.try_recv().unwrap_or_default();
        buf.clear();
        buf.reserve(size);
        buf
    }

    pub fn recycle(&self, record: EncodedRecord) {
        // a full pool just drops the buffer
        let _ = self.tx.try_send(record.into_inner());
    }
}

impl Default for RecordPool {
    fn default() -> Self {
        Self::new(64)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SequenceEncoder {
    on_invalid: OnInvalid,
    pool: RecordPool,
}

impl SequenceEncoder {
    pub fn new(on_invalid: OnInvalid, pool: RecordPool) -> Self {
        Self { on_invalid, pool }
    }

    /// Encodes a header line and its concatenated body lines.
    pub fn encode(&self, header: &[u8], body: &[u8]) -> TranseqResult<EncodedRecord> {
        let header_end = PREFIX + header.len();
        let mut buf = self.pool.take(header_end + body.len());
        buf.extend_from_slice(&(header_end as u32).to_le_bytes());
        buf.extend_from_slice(header);

        let mut invalid: Option<(u8, usize)> = None;
        let mut invalid_count = 0usize;
        for (pos, &b) in body.iter().enumerate() {
            match nucleotide::class_of(b) {
                Some(class) => buf.push(class),
                None => {
                    if self.on_invalid == OnInvalid::Raise {
                        return Err(TranseqError::InvalidChar {
                            ch: b as char,
                            pos,
                            id: record_id(header),
                        });
                    }
                    invalid.get_or_insert((b, pos));
                    invalid_count += 1;
                    buf.push(N);
                }
            }
        }

        if let Some((b, pos)) = invalid {
            warn!(
                "sequence {}: {} invalid character(s), first '{}' at position {}, translated as N",
                record_id(header),
                invalid_count,
                b as char,
                pos
            );
        }

        Ok(EncodedRecord { buf })
    }
}

/// Sequence id without the `>` marker or comment.
pub(crate) fn record_id(header: &[u8]) -> String {
    let header = header.strip_prefix(b">").unwrap_or(header);
    let end = memchr::memchr(b' ', header).unwrap_or(header.len());
    String::from_utf8_lossy(&header[..end]).into_owned()
}
