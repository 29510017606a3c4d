//! IEEE-754 hexadecimal floating point literals: `[-]0x1.{hex-mantissa}p{exp}`.
//!
//! `f64::from_str` only understands decimal literals, and IPPcode21's XML
//! format represents every float both on input and on `WRITE` output in
//! this C99-style hex form, so the codec is hand-rolled here rather than
//! pulled from a crate.

/// Parses a hex float literal such as `0x1.8p3` or `-0x0p+0`.
pub fn parse_hex_float(s: &str) -> Option<f64> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let rest = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))?;

    let p_pos = rest.find(['p', 'P'])?;
    let (mantissa_part, exp_part) = rest.split_at(p_pos);
    let exp_part = &exp_part[1..];
    let exponent: i32 = exp_part.parse().ok()?;

    let (int_part, frac_part) = match mantissa_part.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa_part, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut mantissa: f64 = 0.0;
    for c in int_part.chars() {
        mantissa = mantissa * 16.0 + c.to_digit(16)? as f64;
    }

    let mut scale = 1.0 / 16.0;
    for c in frac_part.chars() {
        mantissa += c.to_digit(16)? as f64 * scale;
        scale /= 16.0;
    }

    let magnitude = mantissa * 2f64.powi(exponent);
    Some(if negative { -magnitude } else { magnitude })
}

/// Formats `value` as a canonical hex float literal: sign, `0x1.` hex
/// mantissa, `p` exponent, matching the form the loader accepts on input.
pub fn format_hex_float(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() {
            "-0x0p+0".to_string()
        } else {
            "0x0p+0".to_string()
        };
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let bits = value.to_bits();
    let sign = (bits >> 63) & 1;
    let raw_exponent = ((bits >> 52) & 0x7ff) as i64;
    let mantissa_bits = bits & 0x000f_ffff_ffff_ffff;

    let (leading, exponent) = if raw_exponent == 0 {
        (0u64, -1022i64)
    } else {
        (1u64, raw_exponent - 1023)
    };

    let mut hex_mantissa = format!("{:013x}", mantissa_bits);
    while hex_mantissa.len() > 1 && hex_mantissa.ends_with('0') {
        hex_mantissa.pop();
    }

    let sign_str = if sign == 1 { "-" } else { "" };
    if hex_mantissa == "0" {
        format!("{}0x{}p{:+}", sign_str, leading, exponent)
    } else {
        format!("{}0x{}.{}p{:+}", sign_str, leading, hex_mantissa, exponent)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_simple_values() {
        for v in [0.0f64, 1.0, -1.0, 0.5, 3.14159, 1e10, -1e-10] {
            let text = format_hex_float(v);
            let parsed = parse_hex_float(&text).unwrap();
            assert_eq!(parsed.to_bits(), v.to_bits(), "round-trip of {} via {}", v, text);
        }
    }

    #[test]
    fn parses_reference_literal() {
        assert_eq!(parse_hex_float("0x1.8p3"), Some(12.0));
        assert_eq!(parse_hex_float("-0x1p+0"), Some(-1.0));
    }

    #[test]
    fn rejects_decimal_literal() {
        assert_eq!(parse_hex_float("3.14"), None);
    }
}
