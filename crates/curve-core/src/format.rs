//! Number formatting for axis ticks and callout labels

// ============================================================================
// STRATEGY PATTERN: Number Formatter
// ============================================================================

/// Strategy trait for turning a raw number into display text
pub trait NumberFormatter: Send + Sync {
    fn format(&self, num: f64) -> String;
}

/// Magnitudes at or below this print as a bare zero
const ZERO_LIMIT: f64 = 1e-10;
/// Magnitudes from here on get a unit suffix
const ROUND_LIMIT: f64 = 1000.0;
const SUFFIXES: [&str; 4] = ["K", "M", "B", "T"];

/// Compact formatter with K/M/B/T suffixes and optional scientific notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanReadableFormatter {
    pub decimal_places: usize,
    /// Values with magnitude below `10^limit` are shown as `2.34e-5`
    pub scientific_upper_limit: Option<i32>,
}

impl Default for HumanReadableFormatter {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            scientific_upper_limit: None,
        }
    }
}

impl HumanReadableFormatter {
    pub fn new(decimal_places: usize) -> Self {
        Self {
            decimal_places,
            ..Default::default()
        }
    }

    pub fn scientific_below(mut self, exponent: i32) -> Self {
        self.scientific_upper_limit = Some(exponent);
        self
    }
}

impl NumberFormatter for HumanReadableFormatter {
    fn format(&self, num: f64) -> String {
        if !num.is_finite() {
            return num.to_string();
        }

        let abs = num.abs();

        if abs <= ZERO_LIMIT {
            return "0".to_string();
        }

        if let Some(limit) = self.scientific_upper_limit.filter(|l| *l != 0) {
            if abs < 10f64.powi(limit) {
                return to_exponential(num, 2);
            }
        }

        if abs < ROUND_LIMIT {
            return fixed_trimmed(num, self.decimal_places);
        }

        let mut scaled = num;
        let mut index = 0;
        while scaled.abs() >= ROUND_LIMIT && index < SUFFIXES.len() {
            scaled /= 1000.0;
            index += 1;
        }

        format!("{}{}", fixed_trimmed(scaled, self.decimal_places), SUFFIXES[index - 1])
    }
}

/// Thousands/decimal separators for [`DecimalFormatter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub grouping: char,
    pub decimal: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            grouping: ',',
            decimal: '.',
        }
    }
}

/// Grouped decimal formatter (`12,345.67`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormatter {
    pub max_fraction_digits: usize,
    pub separators: Separators,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self {
            max_fraction_digits: 2,
            separators: Separators::default(),
        }
    }
}

impl DecimalFormatter {
    pub fn with_separators(mut self, grouping: char, decimal: char) -> Self {
        self.separators = Separators { grouping, decimal };
        self
    }
}

impl NumberFormatter for DecimalFormatter {
    fn format(&self, num: f64) -> String {
        if !num.is_finite() {
            return num.to_string();
        }

        let fixed = fixed_trimmed(num, self.max_fraction_digits);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
        out.push_str(sign);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push(self.separators.grouping);
            }
            out.push(digit);
        }
        if let Some(frac) = frac_part {
            out.push(self.separators.decimal);
            out.push_str(frac);
        }
        out
    }
}

/// Format with [`HumanReadableFormatter`] at the given precision
pub fn human_readable(num: f64, decimal_places: usize) -> String {
    HumanReadableFormatter::new(decimal_places).format(num)
}

/// Format with the default [`DecimalFormatter`]
pub fn decimal(num: f64) -> String {
    DecimalFormatter::default().format(num)
}

/// Fixed-point text rounded half away from zero on the exact decimal
/// expansion of `num`, so `0.125` at two places gives `0.13`
fn to_fixed(num: f64, decimals: usize) -> String {
    // Every finite f64 has an exact expansion within this many places
    let exact = format!("{:.1100}", num.abs());
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return num.to_string();
    };

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(decimals).is_some_and(|&b| b >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if num.is_sign_negative() {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Round to `decimals` places, then drop trailing zeros and a dangling point
fn fixed_trimmed(num: f64, decimals: usize) -> String {
    let mut s = to_fixed(num, decimals);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Exponential notation with an explicitly signed exponent (`1.50e+3`)
fn to_exponential(num: f64, decimals: usize) -> String {
    let s = format!("{:.prec$e}", num, prec = decimals);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}
