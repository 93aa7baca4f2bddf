pub mod alphabets;
pub mod codon;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod seq;
pub mod translate;

pub use codon::{load_table, tables, CodonTable};
pub use error::{TranseqError, TranseqResult};
pub use io::OnInvalid;
pub use pipeline::{translate, translate_to_vec, TranslateOptions};
pub use translate::FrameSpec;
