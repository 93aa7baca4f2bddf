pub mod encoded;

pub use encoded::{EncodedRecord, RecordPool, SequenceEncoder};
