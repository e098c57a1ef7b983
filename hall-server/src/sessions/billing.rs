//! Billing arithmetic for table sessions
//!
//! All monetary calculations are done using `Decimal` internally, then
//! converted to `f64` for storage/serialization. Rounding is 2 decimal
//! places, half-up.

use rust_decimal::prelude::*;

use crate::db::models::{Promotion, PromotionType};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Minimum billed playtime in minutes: one hour is always charged
pub const MIN_BILLABLE_MINS: f64 = 60.0;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 to 2 decimal places, half-up
pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Active minutes elapsed: wall-clock minutes minus accrued pause, floored at 0
pub fn active_minutes(now: i64, start_time: i64, total_paused_mins: f64) -> f64 {
    let elapsed = (now - start_time) as f64 / 60_000.0 - total_paused_mins;
    elapsed.max(0.0)
}

/// Table charge for the given active minutes
///
/// Billable minutes are floored at [`MIN_BILLABLE_MINS`].
pub fn table_charge(total_mins: f64, rate_per_hour: f64) -> f64 {
    let billable = total_mins.max(MIN_BILLABLE_MINS);
    to_f64(to_decimal(billable) / MINUTES_PER_HOUR * to_decimal(rate_per_hour))
}

/// Promotion discount for `elapsed_mins` of active play
///
/// `charge` is the table charge the percentage rule applies to: the raw
/// hours×rate product during preview, the final rounded charge at close.
pub fn promotion_discount(
    promo: &Promotion,
    elapsed_mins: f64,
    rate_per_hour: f64,
    charge: f64,
) -> f64 {
    let discount = match promo.promotion_type {
        PromotionType::FreeHours => {
            if promo.play_hours > 0.0 && elapsed_mins / 60.0 >= promo.play_hours {
                to_f64(to_decimal(promo.free_hours) * to_decimal(rate_per_hour))
            } else {
                0.0
            }
        }
        PromotionType::DiscountPct => {
            to_f64(to_decimal(charge) * to_decimal(promo.discount_pct) / HUNDRED)
        }
        PromotionType::DiscountAmt => promo.discount_amt,
    };
    round2(discount)
}

/// Grand total: table charge + food, minus both discounts, floored at 0
pub fn grand_total(
    table_charge: f64,
    food_total: f64,
    discount: f64,
    promotion_discount: f64,
) -> f64 {
    let total = to_decimal(table_charge) + to_decimal(food_total)
        - to_decimal(discount)
        - to_decimal(promotion_discount);
    to_f64(total.max(Decimal::ZERO))
}

/// Order line total: price × quantity − discount, floored at 0
pub fn line_total(price: f64, quantity: i64, discount: f64) -> f64 {
    let total = to_decimal(price) * Decimal::from(quantity) - to_decimal(discount);
    to_f64(total.max(Decimal::ZERO))
}

/// Sum monetary amounts without accumulating float error
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(amounts.into_iter().map(to_decimal).sum::<Decimal>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PromotionStatus;

    fn promo(promotion_type: PromotionType) -> Promotion {
        Promotion {
            id: None,
            name: "test".to_string(),
            description: None,
            promotion_type,
            play_hours: 0.0,
            free_hours: 0.0,
            discount_pct: 0.0,
            discount_amt: 0.0,
            table_types: vec![],
            start_date: 0,
            end_date: i64::MAX,
            status: PromotionStatus::Active,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_sum_amounts_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        assert_ne!(0.1_f64 + 0.2_f64, 0.3);
        assert_eq!(sum_amounts([0.1, 0.2]), 0.3);

        // Sum 0.01 one thousand times
        assert_eq!(sum_amounts(std::iter::repeat_n(0.01, 1000)), 10.0);
    }

    #[test]
    fn test_active_minutes_floors_at_zero() {
        // Paused longer than the wall clock (clock skew or bad data)
        assert_eq!(active_minutes(60_000, 0, 5.0), 0.0);
        assert_eq!(active_minutes(600_000, 0, 4.0), 6.0);
    }

    #[test]
    fn test_minimum_one_hour_billed() {
        // Open then immediately close: still one full hour
        assert_eq!(table_charge(0.0, 100.0), 100.0);
        assert_eq!(table_charge(59.99, 100.0), 100.0);
        assert_eq!(table_charge(60.0, 100.0), 100.0);
    }

    #[test]
    fn test_table_charge_past_the_hour() {
        assert_eq!(table_charge(90.0, 100.0), 150.0);
        assert_eq!(table_charge(75.0, 120.0), 150.0);
        // Fractional minutes round at the money level, not the minutes level
        assert_eq!(table_charge(61.0, 100.0), 101.67);
    }

    #[test]
    fn test_example_scenario_90min_with_30min_pause() {
        // Rate 100/hr, 90 wall-clock minutes, one 30-minute pause
        let start = 0i64;
        let now = 90 * 60_000i64;
        let mins = active_minutes(now, start, 30.0);
        assert_eq!(round2(mins), 60.0);
        assert_eq!(table_charge(mins, 100.0), 100.0);
    }

    #[test]
    fn test_free_hours_threshold_boundary() {
        let mut p = promo(PromotionType::FreeHours);
        p.play_hours = 2.0;
        p.free_hours = 1.0;

        // 119 active minutes: threshold not reached
        assert_eq!(promotion_discount(&p, 119.0, 100.0, 198.33), 0.0);
        // 120 active minutes: one free hour at the table rate
        assert_eq!(promotion_discount(&p, 120.0, 100.0, 200.0), 100.0);
    }

    #[test]
    fn test_free_hours_requires_positive_threshold() {
        let mut p = promo(PromotionType::FreeHours);
        p.play_hours = 0.0;
        p.free_hours = 2.0;
        // A zero threshold never grants free hours
        assert_eq!(promotion_discount(&p, 600.0, 100.0, 1000.0), 0.0);
    }

    #[test]
    fn test_discount_pct_rounds_half_up() {
        let mut p = promo(PromotionType::DiscountPct);
        p.discount_pct = 33.0;
        assert_eq!(promotion_discount(&p, 60.0, 100.0, 99.99), 33.0);

        p.discount_pct = 15.0;
        assert_eq!(promotion_discount(&p, 60.0, 100.0, 100.10), 15.02);
    }

    #[test]
    fn test_discount_amt_is_unconditional() {
        let mut p = promo(PromotionType::DiscountAmt);
        p.discount_amt = 25.0;
        assert_eq!(promotion_discount(&p, 1.0, 100.0, 100.0), 25.0);
    }

    #[test]
    fn test_grand_total_never_negative() {
        // discount + promotion discount exceed the charges
        assert_eq!(grand_total(100.0, 20.0, 80.0, 60.0), 0.0);
        assert_eq!(grand_total(100.0, 25.5, 10.0, 15.5), 100.0);
    }

    #[test]
    fn test_line_total_floors_at_zero() {
        assert_eq!(line_total(5.0, 3, 20.0), 0.0);
        assert_eq!(line_total(10.99, 3, 0.0), 32.97);
        assert_eq!(line_total(10.0, 2, 5.0), 15.0);
    }
}
