use serde::{Deserialize, Serialize};

/// Fixed-point tick label format.
///
/// The default renders two decimals with comma thousands grouping, so
/// `1234.5` becomes `1,234.50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickFormat {
    pub decimals: u8,
    pub group_thousands: bool,
}

impl Default for TickFormat {
    fn default() -> Self {
        Self {
            decimals: 2,
            group_thousands: true,
        }
    }
}

impl TickFormat {
    #[must_use]
    pub fn new(decimals: u8, group_thousands: bool) -> Self {
        Self {
            decimals,
            group_thousands,
        }
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let precision = usize::from(self.decimals);
        let magnitude = format!("{:.precision$}", value.abs());
        // Values that round to zero print without a sign.
        let negative = value < 0.0 && magnitude.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let (integer, fraction) = match magnitude.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (magnitude.as_str(), None),
        };

        let mut out = String::with_capacity(magnitude.len() + magnitude.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        if self.group_thousands {
            push_grouped(&mut out, integer);
        } else {
            out.push_str(integer);
        }
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

fn push_grouped(out: &mut String, digits: &str) {
    let len = digits.len();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::TickFormat;

    #[test]
    fn default_matches_two_decimal_grouped_style() {
        let format = TickFormat::default();
        assert_eq!(format.format(1234.5), "1,234.50");
        assert_eq!(format.format(-1_234_567.0), "-1,234,567.00");
        assert_eq!(format.format(0.0), "0.00");
        assert_eq!(format.format(999.999), "1,000.00");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        let format = TickFormat::default();
        assert_eq!(format.format(-0.0), "0.00");
        assert_eq!(format.format(-0.001), "0.00");
    }

    #[test]
    fn zero_decimals_and_no_grouping() {
        let format = TickFormat::new(0, false);
        assert_eq!(format.format(12345.4), "12345");
        assert_eq!(format.format(-7.6), "-8");
    }
}
