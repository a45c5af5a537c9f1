/// `round(num / den)` with halves rounded up, in exact integer arithmetic.
pub(crate) fn div_round_half_up(num: u64, den: u64) -> u64 {
    debug_assert!(den > 0);
    (2 * num + den) / (2 * den)
}

/// Blend one 8-bit channel at step `j` of `t`: `round_half_up(((t - j) * a + j * b) / t)`.
pub(crate) fn lerp_channel_u8(a: u8, b: u8, j: u64, t: u64) -> u8 {
    debug_assert!(j <= t && t > 0);
    let num = u64::from(a) * (t - j) + u64::from(b) * j;
    div_round_half_up(num, t).min(255) as u8
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
