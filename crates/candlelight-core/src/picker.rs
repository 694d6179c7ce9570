//! Deterministic selection of one item from a pool.
//!
//! The seed is hashed with 32-bit FNV-1a over its UTF-16 code units, so the
//! same `(pool order, seed)` pair always lands on the same item and every
//! client agrees on it without coordination.

use crate::error::ContentError;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-16 code units of `seed`.
pub fn fnv1a(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Pick `pool[fnv1a(seed) % pool.len()]`.
///
/// # Errors
/// Returns [`ContentError::EmptyPool`] when `pool` is empty.
pub fn pick<'a, T>(pool: &'a [T], seed: &str) -> Result<&'a T, ContentError> {
    if pool.is_empty() {
        return Err(ContentError::EmptyPool);
    }
    let index = fnv1a(seed) as usize % pool.len();
    Ok(&pool[index])
}
