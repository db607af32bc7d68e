//! Tariff calculator: blended hourly/daily parking cost.
//!
//! Pure and side-effect free. The day/hour split is billing-correctness
//! critical and pinned by tests: every completed 24-hour block is billed
//! at the flat daily rate, the leftover partial day hourly, and stays
//! under 24 hours are billed straight hourly.

use rust_decimal::Decimal;

const MINUTES_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const MINUTES_PER_DAY: i64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// Compute the cost of a parking stay.
///
/// Let `total_days = duration_minutes / 60 / 24`:
/// - `total_days < 1`: cost = `duration_minutes / 60 * hourly_tariff`.
/// - otherwise, with whole days `D` and fractional remainder `F`:
///   cost = `D * daily_tariff + F * 24 * hourly_tariff`.
///
/// Callers are responsible for non-negative tariffs.
pub fn compute_cost(
    duration_minutes: Decimal,
    hourly_tariff: Decimal,
    daily_tariff: Decimal,
) -> Decimal {
    let total_days = duration_minutes / Decimal::from(MINUTES_PER_DAY);

    if total_days < Decimal::ONE {
        duration_minutes / Decimal::from(MINUTES_PER_HOUR) * hourly_tariff
    } else {
        let whole_days = total_days.floor();
        let day_fraction = total_days - whole_days;
        whole_days * daily_tariff
            + day_fraction * Decimal::from(HOURS_PER_DAY) * hourly_tariff
    }
}

/// Round a computed cost to cents for persistence.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(minutes: i64, hourly: Decimal, daily: Decimal) -> Decimal {
        round_money(compute_cost(Decimal::from(minutes), hourly, daily))
    }

    #[test]
    fn under_a_day_is_straight_hourly() {
        // 1439 min, just under 24h: 1439/60 * 2.0 = 47.9666.. -> 47.97
        let c = cost(1439, Decimal::from(2), Decimal::from(20));
        assert_eq!(c, Decimal::new(4797, 2));
    }

    #[test]
    fn exactly_one_day_is_one_daily_block() {
        let c = cost(1440, Decimal::from(2), Decimal::from(20));
        assert_eq!(c, Decimal::from(20));
    }

    #[test]
    fn thirty_six_hours_blends_daily_and_hourly() {
        // 1 day + 12h: 20.0 + 12 * 2.0 = 44.0
        let c = cost(2160, Decimal::from(2), Decimal::from(20));
        assert_eq!(c, Decimal::from(44));
    }

    #[test]
    fn multiple_whole_days() {
        // 3 days exactly
        let c = cost(3 * 1440, Decimal::from(2), Decimal::from(20));
        assert_eq!(c, Decimal::from(60));
    }

    #[test]
    fn short_stay() {
        // 90 min at 2.40/h = 3.60
        let c = cost(90, Decimal::new(240, 2), Decimal::from(20));
        assert_eq!(c, Decimal::new(360, 2));
    }

    #[test]
    fn zero_duration_costs_nothing() {
        let c = cost(0, Decimal::from(2), Decimal::from(20));
        assert_eq!(c, Decimal::ZERO);
    }

    #[test]
    fn day_rate_is_cheaper_than_pure_hourly_past_a_day() {
        let hourly = Decimal::from(2);
        let daily = Decimal::from(20);
        let minutes = Decimal::from(1500); // 25h
        let blended = compute_cost(minutes, hourly, daily);
        let pure_hourly = minutes / Decimal::from(60) * hourly;
        assert!(blended < pure_hourly);
    }
}
