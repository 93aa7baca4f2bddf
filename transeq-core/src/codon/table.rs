use crate::alphabets::nucleotide::{CANONICAL, MAX_CLASS};
use crate::codon::ncbi::{load_table, CodonMap};
use crate::error::TranseqResult;

pub const STOP: u8 = b'*';
pub const UNKNOWN: u8 = b'X';

const TABLE_SIZE: usize = pack3(MAX_CLASS, MAX_CLASS, MAX_CLASS) as usize + 1;

#[inline]
pub const fn pack3(c0: u8, c1: u8, c2: u8) -> u32 {
    c0 as u32 | (c1 as u32) << 8 | (c2 as u32) << 16
}

/// Two-letter key. Equal to `pack3(c0, c1, N)` since `N` is class 0.
#[inline]
pub const fn pack2(c0: u8, c1: u8) -> u32 {
    c0 as u32 | (c1 as u32) << 8
}

/// Dense codon lookup indexed by packed class keys.
///
/// Every key starts as [`UNKNOWN`]. All 64 canonical codons are filled in,
/// plus the two-letter prefixes whose four completions share one residue.
/// With `clean`, stop codons are left unknown.
#[derive(Clone, Debug)]
pub struct CodonTable {
    codes: Box<[u8]>,
}

impl CodonTable {
    pub fn new(table_id: u32, clean: bool) -> TranseqResult<Self> {
        let map = load_table(table_id)?;
        Ok(Self::from_map(&map, clean))
    }

    pub fn from_map(map: &CodonMap, clean: bool) -> Self {
        let mut codes = vec![UNKNOWN; TABLE_SIZE].into_boxed_slice();
        let keep = |aa: u8| !(clean && aa == STOP);

        for &(l0, c0) in &CANONICAL {
            for &(l1, c1) in &CANONICAL {
                let mut shared = None;
                let mut uniform = true;

                for &(l2, c2) in &CANONICAL {
                    let aa = map.get(&[l0, l1, l2]).copied().unwrap_or(UNKNOWN);
                    if keep(aa) {
                        codes[pack3(c0, c1, c2) as usize] = aa;
                    }
                    match shared {
                        None => shared = Some(aa),
                        Some(prev) if prev != aa => uniform = false,
                        Some(_) => {}
                    }
                }

                if let Some(aa) = shared {
                    if uniform && aa != UNKNOWN && keep(aa) {
                        codes[pack2(c0, c1) as usize] = aa;
                    }
                }
            }
        }

        Self { codes }
    }

    #[inline]
    pub fn get(&self, key: u32) -> u8 {
        self.codes[key as usize]
    }

    #[inline]
    pub fn codon(&self, c0: u8, c1: u8, c2: u8) -> u8 {
        self.get(pack3(c0, c1, c2))
    }

    #[inline]
    pub fn prefix(&self, c0: u8, c1: u8) -> u8 {
        self.get(pack2(c0, c1))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabets::nucleotide::{A, C, G, N, T};
    use crate::error::TranseqError;

    #[test]
    fn table_is_dense() {
        let table = CodonTable::new(0, false).unwrap();
        assert_eq!(table.len(), (4 | 4 << 8 | 4 << 16) + 1);
    }

    #[test]
    fn every_canonical_codon_is_defined() {
        let table = CodonTable::new(0, false).unwrap();
        for &(_, c0) in &CANONICAL {
            for &(_, c1) in &CANONICAL {
                for &(_, c2) in &CANONICAL {
                    assert_ne!(table.codon(c0, c1, c2), UNKNOWN);
                }
            }
        }
    }

    #[test]
    fn basic_lookups() {
        let table = CodonTable::new(0, false).unwrap();
        assert_eq!(table.codon(A, T, G), b'M');
        assert_eq!(table.codon(T, A, A), STOP);
        assert_eq!(table.codon(G, C, T), b'A');
    }

    #[test]
    fn degenerate_prefixes() {
        let table = CodonTable::new(0, false).unwrap();
        assert_eq!(table.prefix(G, C), b'A');
        assert_eq!(table.prefix(G, T), b'V');
        assert_eq!(table.prefix(C, G), b'R');
        // TAT/TAC = Y, TAA/TAG = *
        assert_eq!(table.prefix(T, A), UNKNOWN);
        // AGA/AGG = R, AGT/AGC = S
        assert_eq!(table.prefix(A, G), UNKNOWN);
        // third base N packs onto the prefix key
        assert_eq!(table.codon(G, C, N), b'A');
        assert_eq!(table.codon(N, C, G), UNKNOWN);
        assert_eq!(table.codon(G, N, G), UNKNOWN);
    }

    #[test]
    fn clean_leaves_stops_unknown() {
        let table = CodonTable::new(0, true).unwrap();
        assert_eq!(table.codon(T, A, A), UNKNOWN);
        assert_eq!(table.codon(T, G, A), UNKNOWN);
        assert_eq!(table.codon(A, T, G), b'M');
    }

    #[test]
    fn alternative_code_changes_lookups() {
        let table = CodonTable::new(2, false).unwrap();
        assert_eq!(table.codon(T, G, A), b'W');
        assert_eq!(table.codon(A, G, A), STOP);
        // AGx now splits S / *
        assert_eq!(table.prefix(A, G), UNKNOWN);

        let ciliate = CodonTable::new(6, false).unwrap();
        assert_eq!(ciliate.codon(T, A, A), b'Q');
    }

    #[test]
    fn incomplete_map_does_not_fill_prefix() {
        let mut map = CodonMap::new();
        map.insert(*b"GCA", b'A');
        map.insert(*b"GCC", b'A');
        let table = CodonTable::from_map(&map, false);
        assert_eq!(table.codon(G, C, A), b'A');
        assert_eq!(table.codon(G, C, G), UNKNOWN);
        assert_eq!(table.prefix(G, C), UNKNOWN);
    }

    #[test]
    fn unknown_table_id() {
        let err = CodonTable::new(99, false).unwrap_err();
        assert!(matches!(err, TranseqError::UnknownTable { id: 99 }));
        assert_eq!(err.to_string(), "invalid table code: 99");
    }
}
