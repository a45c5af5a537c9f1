use super::*;

#[test]
fn div_round_half_up_rounds_halves_up() {
    assert_eq!(div_round_half_up(255 * 8, 16), 128); // 127.5
    assert_eq!(div_round_half_up(5, 2), 3);
    assert_eq!(div_round_half_up(4, 3), 1);
    assert_eq!(div_round_half_up(5, 3), 2);
    assert_eq!(div_round_half_up(0, 7), 0);
}

#[test]
fn lerp_channel_endpoints_are_exact() {
    assert_eq!(lerp_channel_u8(10, 200, 0, 16), 10);
    assert_eq!(lerp_channel_u8(10, 200, 16, 16), 200);
}

#[test]
fn lerp_channel_matches_reference_formula() {
    for (a, b) in [(0u8, 255u8), (255, 0), (17, 18), (200, 3)] {
        for t in [1u64, 3, 7, 16, 24] {
            for j in 0..t {
                let exact = f64::from(a) + (f64::from(b) - f64::from(a)) * (j as f64) / (t as f64);
                let expected = (exact + 0.5).floor() as u8;
                assert_eq!(lerp_channel_u8(a, b, j, t), expected, "a={a} b={b} j={j} t={t}");
            }
        }
    }
}

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(255, 128), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
}
