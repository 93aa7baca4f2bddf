use crate::codon::{CodonTable, UNKNOWN};
use crate::seq::EncodedRecord;
use crate::translate::writer::OutputWriter;
use crate::translate::FrameSpec;

const FORWARD_OFFSETS: [usize; 3] = [0, 1, 2];

/// Start offsets of frames -1, -2, -3 on the reverse-complemented body,
/// keeping each in the same codon phase as frames 1, 2, 3 (Staden).
pub fn staden_offsets(body_len: usize) -> [usize; 3] {
    match body_len % 3 {
        0 => [0, 2, 1],
        1 => [1, 0, 2],
        _ => [2, 1, 0],
    }
}

/// Translates records into the requested frames, one worker's worth.
pub struct FrameTranslator<'a> {
    table: &'a CodonTable,
    frames: [bool; 6],
    reverse: bool,
    alternative: bool,
    trim: bool,
    out: OutputWriter,
}

impl<'a> FrameTranslator<'a> {
    pub fn new(table: &'a CodonTable, frames: FrameSpec, alternative: bool, trim: bool) -> Self {
        Self {
            table,
            frames: frames.mask(),
            reverse: frames.needs_reverse(),
            alternative,
            trim,
            out: OutputWriter::default(),
        }
    }

    pub fn with_writer(mut self, out: OutputWriter) -> Self {
        self.out = out;
        self
    }

    /// Appends every requested frame of `record` to the output buffer.
    ///
    /// Reverse frames complement the record's body in place.
    pub fn translate(&mut self, record: &mut EncodedRecord) {
        self.translate_pass(record, FORWARD_OFFSETS, 0);

        if self.reverse {
            let body_len = record.body_len();
            record.reverse_complement();
            let offsets = if self.alternative {
                FORWARD_OFFSETS
            } else {
                staden_offsets(body_len)
            };
            self.translate_pass(record, offsets, 3);
        }
    }

    fn translate_pass(&mut self, record: &EncodedRecord, offsets: [usize; 3], first: usize) {
        let (header, body) = record.parts();
        for (i, start) in offsets.into_iter().enumerate() {
            let frame = first + i;
            if self.frames[frame] {
                self.translate_frame(header, body, start, frame + 1);
            }
        }
    }

    fn translate_frame(&mut self, header: &[u8], body: &[u8], start: usize, frame: usize) {
        self.out.write_header(header, frame);

        if let Some(seq) = body.get(start..) {
            let mut codons = seq.chunks_exact(3);
            for codon in &mut codons {
                self.out
                    .push_residue(self.table.codon(codon[0], codon[1], codon[2]));
            }
            match *codons.remainder() {
                [c0, c1] => self.out.push_residue(self.table.prefix(c0, c1)),
                [_] => self.out.push_residue(UNKNOWN),
                _ => {}
            }
        }

        self.out.finish_frame(self.trim);
    }

    pub fn output(&self) -> &OutputWriter {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut OutputWriter {
        &mut self.out
    }

    pub fn buffered(&self) -> usize {
        self.out.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::SequenceEncoder;

    fn run(body: &[u8], frames: &str, alternative: bool, trim: bool, clean: bool) -> String {
        let table = CodonTable::new(0, clean).unwrap();
        let mut translator = FrameTranslator::new(&table, frames.parse().unwrap(), alternative, trim);
        let mut record = SequenceEncoder::default().encode(b">s", body).unwrap();
        translator.translate(&mut record);
        String::from_utf8(translator.output().as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn staden_table() {
        assert_eq!(staden_offsets(9), [0, 2, 1]);
        assert_eq!(staden_offsets(10), [1, 0, 2]);
        assert_eq!(staden_offsets(11), [2, 1, 0]);
        assert_eq!(staden_offsets(0), [0, 2, 1]);
    }

    #[test]
    fn forward_frames_with_remainders() {
        let body = b"ACGTACGTACGTACGTACG";
        assert_eq!(run(body, "1", false, false, false), ">s_1\nTYVRTYX\n");
        assert_eq!(run(body, "2", false, false, false), ">s_2\nRTYVRT\n");
        // trailing CG resolves through the two-letter key
        assert_eq!(run(body, "3", false, false, false), ">s_3\nVRTYVR\n");
    }

    #[test]
    fn six_frames_length_multiple_of_three() {
        assert_eq!(
            run(b"ACGTACGTA", "6", false, false, false),
            ">s_1\nTYV\n>s_2\nRTX\n>s_3\nVRX\n>s_4\nYVR\n>s_5\nRTX\n>s_6\nTYV\n"
        );
    }

    #[test]
    fn reverse_frames_length_mod_one() {
        // revcomp GTACGTACGT, offsets (1, 0, 2)
        assert_eq!(
            run(b"ACGTACGTAC", "R", false, false, false),
            ">s_4\nYVR\n>s_5\nVRTX\n>s_6\nTYV\n"
        );
    }

    #[test]
    fn reverse_frames_length_mod_two() {
        // revcomp CGTACGTACGT, offsets (2, 1, 0)
        assert_eq!(
            run(b"ACGTACGTACG", "R", false, false, false),
            ">s_4\nYVR\n>s_5\nVRTX\n>s_6\nRTYV\n"
        );
    }

    #[test]
    fn alternative_uses_plain_offsets() {
        assert_eq!(
            run(b"ACGTACGTA", "R", true, false, false),
            ">s_4\nYVR\n>s_5\nTYV\n>s_6\nRTX\n"
        );
        assert_eq!(run(b"ACGTACGTA", "-2", true, false, false), ">s_5\nTYV\n");
        assert_eq!(run(b"ACGTACGTA", "-2", false, false, false), ">s_5\nRTX\n");
    }

    #[test]
    fn ambiguous_bases() {
        // GCN is alanine whatever N is, NCG is not resolvable
        assert_eq!(run(b"GCNNCGATG", "1", false, false, false), ">s_1\nAXM\n");
    }

    #[test]
    fn short_bodies() {
        assert_eq!(run(b"", "F", false, false, false), ">s_1\n>s_2\n>s_3\n");
        assert_eq!(run(b"A", "F", false, false, false), ">s_1\nX\n>s_2\n>s_3\n");
        assert_eq!(run(b"GC", "F", false, false, false), ">s_1\nA\n>s_2\nX\n>s_3\n");
    }

    #[test]
    fn clean_and_trim() {
        assert_eq!(run(b"ATGTAAATG", "1", false, false, false), ">s_1\nM*M\n");
        assert_eq!(run(b"ATGTAAATG", "1", false, false, true), ">s_1\nMXM\n");
        assert_eq!(run(b"ATGTAATAA", "1", false, true, false), ">s_1\nM\n");
        assert_eq!(run(b"ATGTAATAA", "1", false, true, true), ">s_1\nM\n");
        assert_eq!(run(b"TAATAG", "1", false, true, false), ">s_1\n");
        assert_eq!(run(b"ATGNNNA", "1", false, true, false), ">s_1\nM\n");
    }

    #[test]
    fn reverse_pass_leaves_record_reverse_complemented() {
        let table = CodonTable::new(0, false).unwrap();
        let mut translator = FrameTranslator::new(&table, FrameSpec::MinusOne, false, false);
        let encoder = SequenceEncoder::default();
        let mut record = encoder.encode(b">s", b"AAC").unwrap();
        let expected = encoder.encode(b">s", b"GTT").unwrap();
        translator.translate(&mut record);
        assert_eq!(record.body(), expected.body());
        assert_eq!(translator.output().as_bytes(), b">s_4\nV\n");
    }
}
