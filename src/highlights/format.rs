use rust_decimal::{Decimal, RoundingStrategy};

/// One row of a magnitude table: values at or above `threshold` are divided by
/// `divisor`, rounded to `decimals` places and suffixed with `suffix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnitudeTier {
    pub threshold: Decimal,
    pub divisor: Decimal,
    pub decimals: u32,
    pub suffix: String,
}

impl MagnitudeTier {
    pub fn new(threshold: i64, divisor: i64, decimals: u32, suffix: impl Into<String>) -> Self {
        Self {
            threshold: Decimal::from(threshold),
            divisor: Decimal::from(divisor),
            decimals,
            suffix: suffix.into(),
        }
    }
}

/// Renders revenue amounts as short magnitude strings (`2,360.2億`).
///
/// The default table follows the Taiwanese convention of 億 (1e8) and 千萬 (1e7).
/// Values below every tier are printed whole with thousands separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueFormatter {
    tiers: Vec<MagnitudeTier>,
    fallback_decimals: u32,
}

impl Default for RevenueFormatter {
    fn default() -> Self {
        Self::zh_tw()
    }
}

impl RevenueFormatter {
    /// A formatter with a custom table. Tiers are tried from the largest threshold down.
    pub fn new(mut tiers: Vec<MagnitudeTier>) -> Self {
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Self {
            tiers,
            fallback_decimals: 0,
        }
    }

    /// 千億 and up: whole 億; 億 and up: one decimal of 億; 千萬 and up: one decimal of 千萬.
    pub fn zh_tw() -> Self {
        Self::new(vec![
            MagnitudeTier::new(100_000_000_000, 100_000_000, 0, "億"),
            MagnitudeTier::new(100_000_000, 100_000_000, 1, "億"),
            MagnitudeTier::new(10_000_000, 10_000_000, 1, "千萬"),
        ])
    }

    /// Decimal places used below the smallest tier.
    #[must_use]
    pub const fn fallback_decimals(mut self, decimals: u32) -> Self {
        self.fallback_decimals = decimals;
        self
    }

    pub fn format(&self, value: Decimal) -> String {
        for tier in &self.tiers {
            if value >= tier.threshold && !tier.divisor.is_zero() {
                let scaled = group_thousands(value / tier.divisor, tier.decimals);
                return format!("{scaled}{}", tier.suffix);
            }
        }
        group_thousands(value, self.fallback_decimals)
    }
}

/// Rounds half-to-even to `decimals` places and inserts `,` every three integer digits.
fn group_thousands(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(decimals);

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}
