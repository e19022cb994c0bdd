use serde_json::Number;

use crate::shape::Kind;

/// Integer vs number by effective value: `1.0` has no fractional part and is an integer.
pub fn classify(n: &Number) -> Kind {
    if n.is_i64() || n.is_u64() {
        return Kind::Integer;
    }
    match n.as_f64() {
        Some(f) if is_integral(f) => Kind::Integer,
        _ => Kind::Number,
    }
}

fn is_integral(f: f64) -> bool {
    f.is_finite()
        && f.fract() == 0.0
        && f >= i64::MIN as f64
        // `u64::MAX as f64` rounds up to 2^64, which is already out of range
        && f < u64::MAX as f64
}
