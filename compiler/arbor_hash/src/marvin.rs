//! Seeded Marvin32 string hash.
//!
//! Strings that feed stable hash codes must hash identically in every
//! process and on every toolchain, so they never go through `std`'s
//! `Hash` for `str`. Marvin32 runs over the UTF-16 code units of the string,
//! two units (one little-endian `u32`) per round, and finishes with a round
//! that folds in a trailing odd unit plus the `0x80` terminator.

/// Seed used by [`stable_str_hash`].
pub const DEFAULT_SEED: u64 = 0x5D70_D359_C498_B3F8;

/// Hash `text` with [`DEFAULT_SEED`].
#[inline]
pub fn stable_str_hash(text: &str) -> i32 {
    marvin32(text, DEFAULT_SEED)
}

/// Marvin32 of the UTF-16 encoding of `text` under `seed`.
#[expect(clippy::cast_possible_truncation, reason = "seed is split into two u32 lanes")]
pub fn marvin32(text: &str, seed: u64) -> i32 {
    let mut p0 = seed as u32;
    let mut p1 = (seed >> 32) as u32;

    let mut units = text.encode_utf16();
    loop {
        match (units.next(), units.next()) {
            (Some(lo), Some(hi)) => {
                p0 = p0.wrapping_add(u32::from(lo) | (u32::from(hi) << 16));
                block(&mut p0, &mut p1);
            }
            (Some(last), None) => {
                p0 = p0.wrapping_add(u32::from(last) | 0x0080_0000);
                break;
            }
            (None, _) => {
                p0 = p0.wrapping_add(0x80);
                break;
            }
        }
    }

    block(&mut p0, &mut p1);
    block(&mut p0, &mut p1);
    (p1 ^ p0) as i32
}

#[inline]
fn block(p0: &mut u32, p1: &mut u32) {
    *p1 ^= *p0;
    *p0 = p0.rotate_left(20);

    *p0 = p0.wrapping_add(*p1);
    *p1 = p1.rotate_left(9);

    *p1 ^= *p0;
    *p0 = p0.rotate_left(27);

    *p0 = p0.wrapping_add(*p1);
    *p1 = p1.rotate_left(19);
}
