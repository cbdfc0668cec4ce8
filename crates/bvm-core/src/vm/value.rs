//! Runtime Value Representation
//!
//! Values are a closed sum type so the dispatch loop matches on them
//! exhaustively. Only numbers exist today; new variants are added here.

use std::fmt;

/// Runtime value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Numeric value (IEEE 754 double precision)
    Number(f64),
}

impl Value {
    pub fn as_number(&self) -> f64 {
        match *self {
            Value::Number(n) => n,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_general(*n)),
        }
    }
}

/// Significant digits printed for numbers, as C's `%g`
const SIGNIFICANT_DIGITS: i32 = 6;

/// Format like C's `%g`: six significant digits, trailing zeros removed,
/// scientific notation when the exponent is below -4 or at least 6.
fn format_general(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    // rounding to six digits can carry into the exponent (999999.7 -> 1e+06)
    let sci = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, n);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let precision = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", precision, n)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(n: f64) -> String {
        Value::Number(n).to_string()
    }

    #[test]
    fn numbers_print_like_percent_g() {
        assert_eq!(shown(1.2), "1.2");
        assert_eq!(shown(42.0), "42");
        assert_eq!(shown(-0.0), "-0");
        assert_eq!(shown(100000.0), "100000");
        assert_eq!(shown(1000000.0), "1e+06");
        assert_eq!(shown(999999.7), "1e+06");
        assert_eq!(shown(1e21), "1e+21");
        assert_eq!(shown(123456789.0), "1.23457e+08");
        assert_eq!(shown(0.0001), "0.0001");
        assert_eq!(shown(0.00001), "1e-05");
        assert_eq!(shown(-((1.2 + 3.4) / 5.6)), "-0.821429");
        assert_eq!(shown(1e-300), "1e-300");
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(shown(f64::INFINITY), "inf");
        assert_eq!(shown(f64::NEG_INFINITY), "-inf");
        assert_eq!(shown(f64::NAN), "nan");
    }
}
