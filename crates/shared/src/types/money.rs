//! Rupiah amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` values in whole rupiah;
//! IDR has no minor units, so fractional amounts are rejected.

use rust_decimal::Decimal;

/// ISO 4217 code of the one currency the platform handles.
pub const CURRENCY: &str = "IDR";

/// Returns true if the amount has no fractional part.
#[must_use]
pub fn is_whole_rupiah(amount: &Decimal) -> bool {
    amount.fract().is_zero()
}

/// Returns true if the amount is a valid disbursement amount:
/// strictly positive and whole rupiah.
#[must_use]
pub fn is_valid_amount(amount: &Decimal) -> bool {
    amount.is_sign_positive() && !amount.is_zero() && is_whole_rupiah(amount)
}

/// Returns true if the amount is usable as a fee:
/// zero or positive, whole rupiah.
#[must_use]
pub fn is_valid_fee(amount: &Decimal) -> bool {
    !amount.is_sign_negative() && is_whole_rupiah(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1), true)]
    #[case(dec!(700_000), true)]
    #[case(dec!(0), false)]
    #[case(dec!(-1), false)]
    #[case(dec!(100.50), false)]
    #[case(dec!(100.00), true)]
    fn test_is_valid_amount(#[case] amount: Decimal, #[case] expected: bool) {
        assert_eq!(is_valid_amount(&amount), expected);
    }

    #[rstest]
    #[case(dec!(0), true)]
    #[case(dec!(2_500), true)]
    #[case(dec!(-1), false)]
    #[case(dec!(0.5), false)]
    fn test_is_valid_fee(#[case] amount: Decimal, #[case] expected: bool) {
        assert_eq!(is_valid_fee(&amount), expected);
    }

    #[test]
    fn test_is_whole_rupiah() {
        assert!(is_whole_rupiah(&dec!(1_000_000)));
        assert!(is_whole_rupiah(&dec!(-5)));
        assert!(!is_whole_rupiah(&dec!(0.01)));
    }
}
