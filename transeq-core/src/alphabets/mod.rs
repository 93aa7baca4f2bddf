pub mod nucleotide;
