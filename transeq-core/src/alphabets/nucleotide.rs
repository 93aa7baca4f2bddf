//! Nucleotide classes used by the encoded sequence representation.
//!
//! `N` must stay 0: a codon whose third class is `N` packs to the same key
//! as its two-letter prefix.

pub const N: u8 = 0;
pub const A: u8 = 1;
pub const C: u8 = 2;
pub const T: u8 = 3;
pub const G: u8 = 4;
pub const U: u8 = T;

pub const MAX_CLASS: u8 = G;

/// The four canonical classes paired with their DNA letter.
pub const CANONICAL: [(u8, u8); 4] = [(b'A', A), (b'C', C), (b'G', G), (b'T', T)];

const INVALID: u8 = u8::MAX;

static CLASSES: [u8; 256] = {
    let mut table = [INVALID; 256];
    table[b'A' as usize] = A;
    table[b'C' as usize] = C;
    table[b'G' as usize] = G;
    table[b'T' as usize] = T;
    table[b'U' as usize] = U;
    table[b'N' as usize] = N;
    table
};

/// Class of an uppercase nucleotide letter, `None` for anything outside
/// `ACGTUN`.
#[inline]
pub fn class_of(letter: u8) -> Option<u8> {
    match CLASSES[letter as usize] {
        INVALID => None,
        class => Some(class),
    }
}

#[inline]
pub fn complement(class: u8) -> u8 {
    match class {
        A => T,
        T => A,
        C => G,
        G => C,
        other => other,
    }
}

/// Complements then reverses a class-encoded body in place.
pub fn reverse_complement(body: &mut [u8]) {
    for class in body.iter_mut() {
        *class = complement(*class);
    }
    body.reverse();
}
