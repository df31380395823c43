//! Conversions between decimal prices and cents strings.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::PriceError;
use crate::market::decode::parse_decimal;

/// A number with an optional exponent and cents marker: `35c`, `35.`, `1e-2`, `35 cents`.
static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d*\.?\d*)(e[+-]?\d+)?\s*(¢|cents?|c)?$").expect("valid regex")
});

const CENTS_PER_DOLLAR: Decimal = Decimal::ONE_HUNDRED;

/// Format a probability as whole cents.
///
/// ```
/// use polymarket_sdk::format::format_price;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_price(dec!(0.35)), "35¢");
/// assert_eq!(format_price(dec!(0.345)), "35¢");
/// ```
pub fn format_price(price: Decimal) -> String {
    let cents = (price * CENTS_PER_DOLLAR)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{}¢", cents)
}

/// Parse a price typed as cents or as a decimal probability.
///
/// Accepts `"35c"`, `"35¢"`, `"35 cents"`, `"0.35"`, `".35"` and `"35."`, all
/// of which are `0.35`. Scientific notation such as `"1e-2"` also works. A value with a cents marker is always divided by 100; a bare
/// number is only divided when it is greater than 1.
pub fn parse_price(input: &str) -> Result<Decimal, PriceError> {
    let normalized = input.trim().to_lowercase();
    let captures = PRICE_PATTERN
        .captures(&normalized)
        .ok_or_else(|| PriceError::invalid(input))?;

    let mantissa = &captures[1];
    if !mantissa.bytes().any(|b| b.is_ascii_digit()) {
        return Err(PriceError::invalid(input));
    }
    let exponent = captures.get(2).map_or("", |m| m.as_str());
    let leading = if mantissa.starts_with('.') { "0" } else { "" };
    let trailing = if mantissa.ends_with('.') { "0" } else { "" };
    let value = parse_decimal(&format!("{leading}{mantissa}{trailing}{exponent}"))
        .ok_or_else(|| PriceError::invalid(input))?;

    let has_cents_marker = captures.get(3).is_some();
    if has_cents_marker || value > Decimal::ONE {
        Ok(value / CENTS_PER_DOLLAR)
    } else {
        Ok(value)
    }
}
