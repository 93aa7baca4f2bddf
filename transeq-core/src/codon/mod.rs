pub mod ncbi;
pub mod table;

pub use ncbi::{load_table, tables, CodonMap, GeneticCode};
pub use table::{CodonTable, STOP, UNKNOWN};
