//! Culture-invariant text formatting of binary numbers,
//! as used when writing decimal strings (DS).
//!
//! Single precision values are written with up to 9 significant digits
//! and double precision values with up to 13,
//! so that a formatted number with exponent still fits the 16 byte limit
//! of a decimal string component.
//! Trailing zeros are removed,
//! and the exponent notation (`1.5E+20`, `1E-06`) is used
//! when the decimal exponent is -5 or below
//! or not smaller than the number of significant digits.

use std::fmt::LowerExp;

/// Significant digits used for single precision numbers.
pub const F32_SIGNIFICANT_DIGITS: usize = 9;
/// Significant digits used for double precision numbers.
pub const F64_SIGNIFICANT_DIGITS: usize = 13;

/// Format a single precision number.
pub fn format_f32(value: f32) -> String {
    if !value.is_finite() {
        return non_finite(f64::from(value));
    }
    format_general(value, F32_SIGNIFICANT_DIGITS)
}

/// Format a double precision number.
pub fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    format_general(value, F64_SIGNIFICANT_DIGITS)
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        "-Infinity".to_string()
    } else {
        "Infinity".to_string()
    }
}

/// Format a finite number with the given number of significant digits.
fn format_general<T: LowerExp>(value: T, precision: usize) -> String {
    // `{:e}` rounds correctly to the requested digits
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => (true, m),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(24);
    if negative {
        out.push('-');
    }

    if exponent <= -5 || exponent >= precision as i32 {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exponent.abs()));
    } else if exponent < 0 {
        out.push_str("0.");
        for _ in 0..(-exponent - 1) {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            out.push_str(digits);
            for _ in digits.len()..int_len {
                out.push('0');
            }
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    }
    out
}
