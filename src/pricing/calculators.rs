//! Core pricing calculation functions.
//!
//! Pure functions for stay pricing - no database access.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Milliseconds in one billable day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Decimal places of the booking currency
pub const CURRENCY_PLACES: u32 = 2;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use booking_console::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Billable days between check-in and check-out.
///
/// Any partial day counts as a full day (ceiling of the millisecond
/// difference). Negative when check-out precedes check-in.
pub fn day_span(check_in: NaiveDateTime, check_out: NaiveDateTime) -> i64 {
    let millis = (check_out - check_in).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Total price of a stay: `day_span * guest_count * rate`.
///
/// Returns `None` when no price can be derived: fewer than one guest, a zero
/// rate, or a day span that is not strictly positive. Callers keep their
/// previous total in that case.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use booking_console::pricing::calculate_total;
///
/// let check_in = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let check_out = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(calculate_total(check_in, check_out, 2, dec!(50)), Some(dec!(300)));
/// assert_eq!(calculate_total(check_in, check_in, 2, dec!(50)), None);
/// ```
pub fn calculate_total(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    guest_count: i32,
    rate_per_guest_per_day: Decimal,
) -> Option<Decimal> {
    if guest_count < 1 || rate_per_guest_per_day.is_zero() {
        return None;
    }

    let days = day_span(check_in, check_out);
    if days <= 0 {
        return None;
    }

    let total = Decimal::from(days)
        .checked_mul(Decimal::from(guest_count))?
        .checked_mul(rate_per_guest_per_day)?;

    Some(round_money(total, CURRENCY_PLACES))
}

/// Earliest selectable check-out for a check-in: the following day at the
/// same wall-clock time
pub fn min_check_out(check_in: NaiveDateTime) -> NaiveDateTime {
    check_in + Duration::days(1)
}

/// Breakdown of a stay price
#[derive(Debug, Clone, PartialEq)]
pub struct StayPrice {
    pub day_span: i64,
    pub guest_count: i32,
    pub rate_per_guest_per_day: Decimal,
    pub total: Decimal,
}

/// Like [`calculate_total`], keeping the factors alongside the total
pub fn price_stay(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    guest_count: i32,
    rate_per_guest_per_day: Decimal,
) -> Option<StayPrice> {
    let total = calculate_total(check_in, check_out, guest_count, rate_per_guest_per_day)?;
    Some(StayPrice {
        day_span: day_span(check_in, check_out),
        guest_count,
        rate_per_guest_per_day,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(4.5), 0), dec!(4));
        assert_eq!(round_money(dec!(5.5), 0), dec!(6));
    }

    #[test]
    fn test_round_money_decimal_places() {
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    #[test]
    fn test_round_money_negative() {
        assert_eq!(round_money(dec!(-2.5), 0), dec!(-2));
        assert_eq!(round_money(dec!(-1.234), 2), dec!(-1.23));
    }

    // ==================== day_span tests ====================

    #[test]
    fn test_day_span_whole_days() {
        assert_eq!(day_span(at(2026, 3, 1, 0, 0), at(2026, 3, 4, 0, 0)), 3);
    }

    #[test]
    fn test_day_span_partial_day_rounds_up() {
        assert_eq!(day_span(at(2026, 3, 1, 15, 0), at(2026, 3, 4, 11, 0)), 3);
        assert_eq!(day_span(at(2026, 3, 1, 0, 0), at(2026, 3, 1, 0, 1)), 1);
        assert_eq!(day_span(at(2026, 3, 1, 10, 0), at(2026, 3, 4, 10, 1)), 4);
    }

    #[test]
    fn test_day_span_same_instant_and_inverted() {
        assert_eq!(day_span(at(2026, 3, 1, 0, 0), at(2026, 3, 1, 0, 0)), 0);
        // ceil(-0.5) == 0
        assert_eq!(day_span(at(2026, 3, 1, 12, 0), at(2026, 3, 1, 0, 0)), 0);
        assert_eq!(day_span(at(2026, 3, 4, 0, 0), at(2026, 3, 1, 0, 0)), -3);
    }

    // ==================== calculate_total tests ====================

    #[test]
    fn test_calculate_total_basic() {
        let total = calculate_total(at(2026, 3, 1, 0, 0), at(2026, 3, 4, 0, 0), 2, dec!(50));
        assert_eq!(total, Some(dec!(300)));
    }

    #[test]
    fn test_calculate_total_partial_day_billed() {
        // 2 days and 1 hour -> 3 billable days
        let total = calculate_total(at(2026, 3, 1, 10, 0), at(2026, 3, 3, 11, 0), 1, dec!(40));
        assert_eq!(total, Some(dec!(120)));
    }

    #[test]
    fn test_calculate_total_exact_decimal() {
        let total = calculate_total(at(2026, 3, 1, 0, 0), at(2026, 3, 8, 0, 0), 3, dec!(33.33));
        assert_eq!(total, Some(dec!(699.93)));
    }

    #[test]
    fn test_calculate_total_non_positive_span() {
        let check_in = at(2026, 3, 1, 0, 0);
        assert_eq!(calculate_total(check_in, check_in, 2, dec!(50)), None);
        assert_eq!(calculate_total(check_in, at(2026, 2, 27, 0, 0), 2, dec!(50)), None);
    }

    #[test]
    fn test_calculate_total_missing_factors() {
        let (check_in, check_out) = (at(2026, 3, 1, 0, 0), at(2026, 3, 4, 0, 0));
        assert_eq!(calculate_total(check_in, check_out, 0, dec!(50)), None);
        assert_eq!(calculate_total(check_in, check_out, -1, dec!(50)), None);
        assert_eq!(calculate_total(check_in, check_out, 2, dec!(0)), None);
    }

    #[test]
    fn test_calculate_total_is_deterministic() {
        let (check_in, check_out) = (at(2026, 3, 1, 9, 0), at(2026, 3, 5, 17, 0));
        let first = calculate_total(check_in, check_out, 4, dec!(27.5));
        let second = calculate_total(check_in, check_out, 4, dec!(27.5));
        assert_eq!(first, second);
        assert_eq!(first, Some(dec!(550)));
    }

    #[test]
    fn test_min_check_out() {
        assert_eq!(min_check_out(at(2026, 2, 28, 14, 0)), at(2026, 3, 1, 14, 0));
    }

    #[test]
    fn test_price_stay_breakdown() {
        let price = price_stay(at(2026, 3, 1, 0, 0), at(2026, 3, 4, 0, 0), 2, dec!(50)).unwrap();
        assert_eq!(price.day_span, 3);
        assert_eq!(price.total, dec!(300));
        assert!(price_stay(at(2026, 3, 1, 0, 0), at(2026, 3, 1, 0, 0), 2, dec!(50)).is_none());
    }
}
