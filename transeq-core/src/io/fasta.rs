use crate::error::{TranseqError, TranseqResult};
use crate::seq::{EncodedRecord, SequenceEncoder};
use log::warn;
use std::io::BufRead;

/// Splits a FASTA stream into encoded records, in input order.
///
/// Blank lines are skipped, trailing `\r` is dropped, and body lines seen
/// before the first header are ignored with a warning.
pub struct FastaRecords<R> {
    reader: R,
    encoder: SequenceEncoder,
    line_no: usize,
    pending_header: Option<Vec<u8>>,
    line: Vec<u8>,
    body: Vec<u8>,
}

impl<R: BufRead> FastaRecords<R> {
    pub fn new(reader: R, encoder: SequenceEncoder) -> Self {
        Self {
            reader,
            encoder,
            line_no: 0,
            pending_header: None,
            line: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads the next non-blank line into `self.line`. `Ok(false)` at EOF.
    fn read_line(&mut self) -> TranseqResult<bool> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_until(b'\n', &mut self.line)
                .map_err(TranseqError::Input)?;
            if n == 0 {
                return Ok(false);
            }
            self.line_no += 1;
            while matches!(self.line.last(), Some(b'\n' | b'\r')) {
                self.line.pop();
            }
            if !self.line.is_empty() {
                return Ok(true);
            }
        }
    }

    fn next_header(&mut self) -> TranseqResult<Option<Vec<u8>>> {
        if let Some(pending) = self.pending_header.take() {
            return Ok(Some(pending));
        }

        let mut skipped = 0usize;
        let header = loop {
            if !self.read_line()? {
                break None;
            }
            if self.line.first() == Some(&b'>') {
                break Some(std::mem::take(&mut self.line));
            }
            skipped += 1;
        };
        if skipped > 0 {
            warn!("skipped {skipped} sequence line(s) before the first header");
        }
        Ok(header)
    }

    fn next_record(&mut self) -> TranseqResult<Option<EncodedRecord>> {
        let Some(header) = self.next_header()? else {
            return Ok(None);
        };

        self.body.clear();
        while self.read_line()? {
            if self.line.first() == Some(&b'>') {
                self.pending_header = Some(std::mem::take(&mut self.line));
                break;
            }
            self.body.extend_from_slice(&self.line);
        }

        self.encoder.encode(&header, &self.body).map(Some)
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = TranseqResult<EncodedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

pub fn fasta_records_from_reader<R: BufRead>(
    reader: R,
    encoder: SequenceEncoder,
) -> FastaRecords<R> {
    FastaRecords::new(reader, encoder)
}
