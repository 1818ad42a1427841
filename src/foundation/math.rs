pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Composite black ink with `coverage` over an opaque channel value.
pub(crate) fn ink_over(channel: u8, coverage: u8) -> u8 {
    mul_div255_u8(u16::from(channel), 255 - u16::from(coverage))
}

/// Floor of `a / 2`, matching integer centering on possibly negative spans.
pub(crate) fn half_floor(a: i64) -> i64 {
    a.div_euclid(2)
}
