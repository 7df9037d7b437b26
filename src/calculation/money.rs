//! Monetary rounding and tolerance helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Balances with a magnitude below this many currency units are settled.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Fractional digits kept on every emitted amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Largest share or settlement amount accepted, one trillion currency units.
///
/// Keeps ledger sums far inside `Decimal`'s range so accumulation cannot
/// overflow.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Rounds an amount to two decimal places, half away from zero.
///
/// The result always carries exactly two fractional digits, so `12.3`
/// serializes as `"12.30"`.
///
/// # Examples
///
/// ```
/// use trip_settlement::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-10.005").unwrap()), Decimal::from_str("-10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("33.3333").unwrap()), Decimal::from_str("33.33").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Returns true if `amount` is close enough to zero to be treated as settled.
pub fn is_negligible(amount: Decimal, tolerance: Decimal) -> bool {
    amount.abs() < tolerance
}

/// Returns true if `amount` carries significant digits below one cent.
///
/// Trailing zeros do not count, so `3.300` is a valid amount and `3.335`
/// is not.
pub fn has_sub_cent_digits(amount: Decimal) -> bool {
    amount.normalize().scale() > MONEY_DECIMAL_PLACES
}

/// Returns true if `amount` is larger than [`MAX_MONEY_AMOUNT`].
pub fn exceeds_money_limit(amount: Decimal) -> bool {
    amount.abs() > MAX_MONEY_AMOUNT
}
