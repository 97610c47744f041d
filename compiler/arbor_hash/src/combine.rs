//! Hash-code combination primitives.
//!
//! All visitors build their results from [`combine`]:
//! `combine(a, b) = (rotl(a, 5) + a) ^ b` on `u32` with wraparound.
//! The combiner is order sensitive, which is what child order in expression
//! trees needs: `a - b` and `b - a` must not collide by construction.
//!
//! The wider variants are left folds of the two-argument form.

/// Combine two hash codes.
#[inline]
pub const fn combine(a: i32, b: i32) -> i32 {
    let a = a as u32;
    let rol5 = a.rotate_left(5);
    (rol5.wrapping_add(a) ^ (b as u32)) as i32
}

#[inline]
pub const fn combine3(a: i32, b: i32, c: i32) -> i32 {
    combine(combine(a, b), c)
}

#[inline]
pub const fn combine4(a: i32, b: i32, c: i32, d: i32) -> i32 {
    combine(combine3(a, b, c), d)
}

#[inline]
pub const fn combine5(a: i32, b: i32, c: i32, d: i32, e: i32) -> i32 {
    combine(combine4(a, b, c, d), e)
}

#[inline]
pub const fn combine6(a: i32, b: i32, c: i32, d: i32, e: i32, f: i32) -> i32 {
    combine(combine5(a, b, c, d, e), f)
}

/// Fold a sequence left to right starting from an accumulator of `0`.
#[inline]
pub fn combine_all(hashes: impl IntoIterator<Item = i32>) -> i32 {
    hashes.into_iter().fold(0, combine)
}

/// Fold a 64-bit value into 32 bits by xoring its halves.
#[inline]
#[expect(clippy::cast_possible_truncation, reason = "intentional halving of a 64-bit value")]
pub const fn fold_u64(value: u64) -> i32 {
    ((value as u32) ^ ((value >> 32) as u32)) as i32
}

/// Positions, depths and counts as hash inputs. Wraps above `u32::MAX`.
#[inline]
#[expect(clippy::cast_possible_truncation, reason = "hash input, wraparound intended")]
pub const fn usize_tag(value: usize) -> i32 {
    value as u32 as i32
}
