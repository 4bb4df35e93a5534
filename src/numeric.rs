//! Numeric helpers shared by the aggregation, combat and loot modules.
//!
//! All stat math runs on `f64`. Rounding is centralised here so every
//! layer of the pipeline rounds the same way, which keeps results
//! bit-reproducible across runs and platforms.

/// The numeric type used for every stat value.
pub type StatValue = f64;

/// Round to the nearest integer, halves away from zero.
///
/// # Examples
///
/// ```rust
/// use riftcore::numeric::round_stat;
///
/// assert_eq!(round_stat(20.8), 21.0);
/// assert_eq!(round_stat(10.4), 10.0);
/// assert_eq!(round_stat(2.5), 3.0);
/// ```
#[inline]
pub fn round_stat(value: StatValue) -> StatValue {
    value.round()
}

/// Convert a summed "increased" percentage into a multiplier.
///
/// `50.0` becomes `1.5`. Totals below -100% floor the multiplier at zero
/// so heavily penalised stats bottom out instead of going negative.
#[inline]
pub fn increased_multiplier(percent: StatValue) -> StatValue {
    (1.0 + percent / 100.0).max(0.0)
}

/// Convert a "more" percentage into a multiplier (`10.0` becomes `1.1`).
#[inline]
pub fn more_multiplier(percent: StatValue) -> StatValue {
    1.0 + percent / 100.0
}

/// Number of complete `step`-sized chunks in `total` (e.g. "per 5 strength").
#[inline]
pub fn per_step(total: StatValue, step: StatValue) -> StatValue {
    if step <= 0.0 {
        return 0.0;
    }
    (total.max(0.0) / step).floor()
}

/// Resolve a (min, max) pair into rounded bounds with `max >= min`.
#[inline]
pub fn rounded_range(min: StatValue, max: StatValue) -> (StatValue, StatValue) {
    let min = round_stat(min).max(0.0);
    let max = round_stat(max).max(min);
    (min, max)
}
