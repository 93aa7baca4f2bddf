//! NCBI genetic code tables.
//!
//! Each non-standard table is stored as its exception list over the
//! standard code, written with RNA codons the way NCBI publishes them.
//! See <https://www.ncbi.nlm.nih.gov/Taxonomy/Utils/wprintgc.cgi>.

use crate::error::{TranseqError, TranseqResult};
use std::collections::HashMap;

/// Complete codon -> residue mapping over DNA letters (`T`, never `U`).
pub type CodonMap = HashMap<[u8; 3], u8>;

#[derive(Clone, Copy, Debug)]
pub struct GeneticCode {
    pub id: u32,
    pub name: &'static str,
    diffs: &'static [(&'static [u8; 3], u8)],
}

impl GeneticCode {
    pub fn diffs(&self) -> &'static [(&'static [u8; 3], u8)] {
        self.diffs
    }
}

const BASES: &[u8; 4] = b"TCAG";

// NCBI ordering: first base varies slowest, each over TCAG.
const STANDARD: &[u8; 64] = b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

const fn code(id: u32, name: &'static str, diffs: &'static [(&'static [u8; 3], u8)]) -> GeneticCode {
    GeneticCode { id, name, diffs }
}

#[rustfmt::skip]
static CODES: &[GeneticCode] = &[
    code(0, "Standard", &[]),
    code(2, "Vertebrate Mitochondrial", &[(b"AGA", b'*'), (b"AGG", b'*'), (b"AUA", b'M'), (b"UGA", b'W')]),
    code(3, "Yeast Mitochondrial", &[
        (b"AUA", b'M'), (b"CUU", b'T'), (b"CUC", b'T'), (b"CUA", b'T'), (b"CUG", b'T'), (b"UGA", b'W'),
    ]),
    code(4, "Mold, Protozoan, and Coelenterate Mitochondrial and Mycoplasma/Spiroplasma", &[(b"UGA", b'W')]),
    code(5, "Invertebrate Mitochondrial", &[(b"AGA", b'S'), (b"AGG", b'S'), (b"AUA", b'M'), (b"UGA", b'W')]),
    code(6, "Ciliate, Dasycladacean and Hexamita Nuclear", &[(b"UAA", b'Q'), (b"UAG", b'Q')]),
    code(9, "Echinoderm and Flatworm Mitochondrial", &[(b"AAA", b'N'), (b"AGA", b'S'), (b"AGG", b'S'), (b"UGA", b'W')]),
    code(10, "Euplotid Nuclear", &[(b"UGA", b'C')]),
    code(11, "Bacterial, Archaeal and Plant Plastid", &[]),
    code(12, "Alternative Yeast Nuclear", &[(b"CUG", b'S')]),
    code(13, "Ascidian Mitochondrial", &[(b"AGA", b'G'), (b"AGG", b'G'), (b"AUA", b'M'), (b"UGA", b'W')]),
    code(14, "Alternative Flatworm Mitochondrial", &[
        (b"AAA", b'N'), (b"AGA", b'S'), (b"AGG", b'S'), (b"UAA", b'Y'), (b"UGA", b'W'),
    ]),
    code(16, "Chlorophycean Mitochondrial", &[(b"UAG", b'L')]),
    code(21, "Trematode Mitochondrial", &[
        (b"UGA", b'W'), (b"AUA", b'M'), (b"AGA", b'S'), (b"AGG", b'S'), (b"AAA", b'N'),
    ]),
    code(22, "Scenedesmus obliquus Mitochondrial", &[(b"UCA", b'*'), (b"UAG", b'L')]),
    code(23, "Thraustochytrium Mitochondrial", &[(b"UUA", b'*')]),
    code(24, "Pterobranchia Mitochondrial", &[(b"AGA", b'S'), (b"AGG", b'K'), (b"UGA", b'W')]),
    code(25, "Candidate Division SR1 and Gracilibacteria", &[(b"UGA", b'G')]),
    code(26, "Pachysolen tannophilus Nuclear", &[(b"CUG", b'A')]),
    code(29, "Mesodinium Nuclear", &[(b"UAA", b'Y'), (b"UAG", b'Y')]),
    code(30, "Peritrich Nuclear", &[(b"UAA", b'E'), (b"UAG", b'E')]),
];

/// Every supported table, in ascending id order.
pub fn tables() -> &'static [GeneticCode] {
    CODES
}

fn find(id: u32) -> Option<&'static GeneticCode> {
    // NCBI numbers the standard code 1
    let id = if id == 1 { 0 } else { id };
    CODES.iter().find(|code| code.id == id)
}

fn standard() -> CodonMap {
    STANDARD
        .iter()
        .enumerate()
        .map(|(i, &aa)| ([BASES[i / 16], BASES[(i / 4) % 4], BASES[i % 4]], aa))
        .collect()
}

/// Loads the 64-codon mapping of table `id`.
pub fn load_table(id: u32) -> TranseqResult<CodonMap> {
    let code = find(id).ok_or(TranseqError::UnknownTable { id })?;

    let mut map = standard();
    for &(codon, aa) in code.diffs {
        let dna = codon.map(|b| if b == b'U' { b'T' } else { b });
        map.insert(dna, aa);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_has_64_codons() {
        let map = load_table(0).unwrap();
        assert_eq!(map.len(), 64);
        assert_eq!(map[b"ATG"], b'M');
        assert_eq!(map[b"TGG"], b'W');
        assert_eq!(map[b"TAA"], b'*');
        assert_eq!(map[b"TAG"], b'*');
        assert_eq!(map[b"TGA"], b'*');
        assert_eq!(map[b"GGC"], b'G');
        assert_eq!(map[b"AGT"], b'S');
    }

    #[test]
    fn diffs_are_normalized_to_dna() {
        let map = load_table(2).unwrap();
        assert_eq!(map.len(), 64);
        assert_eq!(map[b"TGA"], b'W');
        assert_eq!(map[b"ATA"], b'M');
        assert_eq!(map[b"AGA"], b'*');
        assert!(map.keys().all(|codon| !codon.contains(&b'U')));
    }

    #[test]
    fn table_one_is_standard() {
        assert_eq!(load_table(1).unwrap(), load_table(0).unwrap());
    }

    #[test]
    fn unknown_table_is_rejected() {
        match load_table(99) {
            Err(TranseqError::UnknownTable { id }) => assert_eq!(id, 99),
            other => panic!("expected unknown table error, got {other:?}"),
        }
        assert!(load_table(7).is_err());
    }

    #[test]
    fn every_listed_table_loads() {
        assert!(tables()[0].diffs().is_empty());
        for code in tables() {
            let map = load_table(code.id).unwrap();
            assert_eq!(map.len(), 64, "table {}", code.id);
        }
    }
}
