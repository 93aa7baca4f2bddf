use crate::codon::{STOP, UNKNOWN};
use crate::error::TranseqError;
use crate::pipeline::RunState;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

pub const LINE_WIDTH: usize = 60;

const FRAME_DIGITS: &[u8; 6] = b"123456";

/// Per-worker output buffer with line wrapping and trailing-run tracking.
#[derive(Debug, Default)]
pub struct OutputWriter {
    buf: Vec<u8>,
    line_len: usize,
    // consecutive '*', 'X' and wrap line breaks at the tail of the frame
    to_trim: usize,
    frame_start: usize,
}

impl OutputWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Writes `>id_<frame> comment`, inserting the suffix before the first
    /// space of the header, and starts a new frame block.
    pub fn write_header(&mut self, header: &[u8], frame: usize) {
        let suffix = FRAME_DIGITS[frame - 1];
        match memchr::memchr(b' ', header) {
            Some(end) => {
                self.buf.extend_from_slice(&header[..end]);
                self.buf.push(b'_');
                self.buf.push(suffix);
                self.buf.extend_from_slice(&header[end..]);
            }
            None => {
                self.buf.extend_from_slice(header);
                self.buf.push(b'_');
                self.buf.push(suffix);
            }
        }
        self.buf.push(b'\n');

        self.line_len = 0;
        self.to_trim = 0;
        self.frame_start = self.buf.len();
    }

    #[inline]
    pub fn push_residue(&mut self, aa: u8) {
        if self.line_len == LINE_WIDTH {
            self.new_line();
        }
        self.buf.push(aa);
        self.line_len += 1;

        if aa == STOP || aa == UNKNOWN {
            self.to_trim += 1;
        } else {
            self.to_trim = 0;
        }
    }

    fn new_line(&mut self) {
        self.buf.push(b'\n');
        self.line_len = 0;
        self.to_trim += 1;
    }

    /// Closes the current frame block. With `trim`, the trailing run of
    /// stops, unknowns and wrap breaks is removed first.
    pub fn finish_frame(&mut self, trim: bool) {
        if trim && self.to_trim > 0 {
            self.buf.truncate(self.buf.len() - self.to_trim);
            self.to_trim = 0;
        }
        if self.buf.len() > self.frame_start {
            self.buf.push(b'\n');
        }
        self.line_len = 0;
        self.frame_start = self.buf.len();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.line_len = 0;
        self.to_trim = 0;
        self.frame_start = 0;
    }

    /// Writes the buffered bytes to the shared sink and empties the buffer.
    ///
    /// A write failure is recorded in `state` (first error wins), which also
    /// cancels the run. Returns `false` in that case.
    pub(crate) fn flush<W: Write>(&mut self, sink: &Mutex<W>, state: &RunState) -> bool {
        if self.buf.is_empty() {
            return true;
        }
        let result = sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_all(&self.buf);
        self.clear();

        match result {
            Ok(()) => true,
            Err(err) => {
                state.fail(TranseqError::Output(err));
                false
            }
        }
    }
}
