//! VAT normalization between tax-inclusive (TTC) and tax-exclusive (HT) amounts.
//!
//! A single flat VAT rate applies to every priced input. The rate must be
//! greater than -100; at exactly -100 the amount is returned unchanged
//! instead of dividing by zero.

use rust_decimal::Decimal;

/// Divides `numerator` by `denominator`, returning zero for a zero denominator.
pub fn divide_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Sums `values`, saturating at the `Decimal` bounds instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// The factor turning an HT amount into a TTC one: `1 + tva_rate / 100`.
pub fn vat_multiplier(tva_rate: Decimal) -> Decimal {
    Decimal::ONE + tva_rate / Decimal::ONE_HUNDRED
}

/// Converts an amount to tax-exclusive.
///
/// Returns `amount` unchanged if it is already HT, otherwise strips the VAT.
///
/// # Examples
///
/// ```
/// use haulage_pricing::calculation::to_ht;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_ht(Decimal::from(120), Decimal::from(20), false), Decimal::from(100));
/// assert_eq!(to_ht(Decimal::from(120), Decimal::from(20), true), Decimal::from(120));
/// ```
pub fn to_ht(amount: Decimal, tva_rate: Decimal, is_already_ht: bool) -> Decimal {
    if is_already_ht {
        return amount;
    }
    amount
        .checked_div(vat_multiplier(tva_rate))
        .unwrap_or(amount)
}

/// Converts a tax-exclusive amount to tax-inclusive.
pub fn to_ttc(amount_ht: Decimal, tva_rate: Decimal) -> Decimal {
    amount_ht * vat_multiplier(tva_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_ht_amount_is_unchanged() {
        assert_eq!(to_ht(dec("1.45"), dec("20"), true), dec("1.45"));
    }

    #[test]
    fn test_ttc_amount_is_divided_by_vat() {
        assert_eq!(to_ht(dec("1.80"), dec("20"), false), dec("1.5"));
    }

    #[test]
    fn test_zero_rate_is_identity() {
        assert_eq!(to_ht(dec("99.99"), Decimal::ZERO, false), dec("99.99"));
    }

    #[test]
    fn test_minus_hundred_rate_does_not_panic() {
        assert_eq!(to_ht(dec("50"), dec("-100"), false), dec("50"));
    }

    #[test]
    fn test_to_ttc_adds_vat() {
        assert_eq!(to_ttc(dec("100"), dec("5.5")), dec("105.5"));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let amount = dec("84.37");
        let rate = dec("20");
        let back = to_ht(to_ttc(amount, rate), rate, false);
        assert!((back - amount).abs() < dec("0.0000000001"));
    }

    #[test]
    fn test_divide_or_zero() {
        assert_eq!(divide_or_zero(dec("10"), dec("4")), dec("2.5"));
        assert_eq!(divide_or_zero(dec("10"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([dec("1.5"), dec("2.5")]), dec("4"));
        assert_eq!(saturating_sum([Decimal::MAX, dec("1")]), Decimal::MAX);
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }
}
