//! Bijection between RGB triples and flat color cube indices
//!
//! The lookup layout is red-minor: `r + g·256 + b·65536`. The palette builder
//! writes its raw output red-major (`b + g·256 + r·65536`) so each red slab is
//! one contiguous chunk; both layouts are defined here so the store can
//! re-index between them.

use crate::io::configuration::COLOR_CUBE_SIZE;
use crate::io::error::{Result, precondition};

/// Pack an RGB triple into its lookup index
pub const fn pack(r: u8, g: u8, b: u8) -> usize {
    (r as usize) | ((g as usize) << 8) | ((b as usize) << 16)
}

/// Unpack a lookup index into its RGB triple
///
/// Bits above the 24-bit cube are ignored; use [`try_unpack`] when the index
/// comes from outside the crate.
pub const fn unpack(index: usize) -> (u8, u8, u8) {
    (
        (index & 0xff) as u8,
        ((index >> 8) & 0xff) as u8,
        ((index >> 16) & 0xff) as u8,
    )
}

/// Unpack a lookup index, rejecting indices outside the color cube
///
/// # Errors
///
/// Returns a precondition error if `index >= 16_777_216`
pub fn try_unpack(index: usize) -> Result<(u8, u8, u8)> {
    if index >= COLOR_CUBE_SIZE {
        return Err(precondition(
            "color key unpack",
            &format!("index {index} is outside the color cube (size {COLOR_CUBE_SIZE})"),
        ));
    }
    Ok(unpack(index))
}

/// Pack an RGB triple into the builder's red-major index
pub const fn pack_red_major(r: u8, g: u8, b: u8) -> usize {
    (b as usize) | ((g as usize) << 8) | ((r as usize) << 16)
}

/// Unpack a red-major builder index into its RGB triple
pub const fn unpack_red_major(index: usize) -> (u8, u8, u8) {
    (
        ((index >> 16) & 0xff) as u8,
        ((index >> 8) & 0xff) as u8,
        (index & 0xff) as u8,
    )
}

/// Squared Euclidean distance between two RGB colors
///
/// Integer arithmetic keeps comparisons exact, so nearest-match searches give
/// identical answers regardless of evaluation order.
pub const fn distance_squared(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0].abs_diff(b[0]) as u32;
    let dg = a[1].abs_diff(b[1]) as u32;
    let db = a[2].abs_diff(b[2]) as u32;
    dr * dr + dg * dg + db * db
}
