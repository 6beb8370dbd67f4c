//! Rate resolution shared by all calculators.
//!
//! Keyed tables resolve with a silent fallback (entry, then default, then
//! zero). Bracket schedules resolve to the first bracket whose inclusive
//! upper bound is not exceeded. Neither lookup can fail.

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{BenefitPolicy, BracketSchedule, RateTable, TaxBracket};

/// Looks up `key` in `table`, falling back to the table default, then to 0.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::resolver::resolve;
/// use tax_core::{RateTable, Region};
///
/// let table = RateTable::new(Some(dec!(35))).with(Region::Astana, dec!(58));
///
/// assert_eq!(resolve(&table, &Region::Astana), dec!(58));
/// assert_eq!(resolve(&table, &Region::Sko), dec!(35));
/// ```
pub fn resolve<K>(
    table: &RateTable<K>,
    key: &K,
) -> Decimal
where
    K: Ord + std::fmt::Debug,
{
    if let Some(rate) = table.get(key) {
        return rate;
    }

    match table.default_rate() {
        Some(rate) => {
            trace!(?key, %rate, "no entry for key, using table default");
            rate
        }
        None => {
            trace!(?key, "no entry and no default, resolving to zero");
            Decimal::ZERO
        }
    }
}

/// Allowance for `key` under `policy`, resolved like a rate.
pub fn allowance<K>(
    policy: &BenefitPolicy<K>,
    key: &K,
) -> Decimal
where
    K: Ord + std::fmt::Debug,
{
    resolve(policy.allowances(), key)
}

/// The bracket a value falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMatch<'a> {
    /// Zero-based position in the schedule.
    pub index: usize,
    /// Upper bound of the previous bracket, or 0 for the first.
    pub lower: Decimal,
    pub bracket: &'a TaxBracket,
}

/// Finds the first bracket with `value <= upper`, or the unbounded catch-all.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::resolver::locate;
/// use tax_core::schedules::kz_2026;
///
/// let schedule = kz_2026();
/// let brackets = &schedule.property.value_brackets;
///
/// assert_eq!(locate(brackets, dec!(52000000)).index, 0);
/// assert_eq!(locate(brackets, dec!(52000001)).index, 1);
/// ```
pub fn locate(
    schedule: &BracketSchedule,
    value: Decimal,
) -> BracketMatch<'_> {
    let brackets = schedule.brackets();
    let mut lower = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        match bracket.upper {
            Some(upper) if value > upper => lower = upper,
            _ => {
                return BracketMatch {
                    index,
                    lower,
                    bracket,
                };
            }
        }
    }

    // Unreachable for a validated schedule, whose last bracket is unbounded.
    let index = brackets.len() - 1;
    BracketMatch {
        index,
        lower: index
            .checked_sub(1)
            .and_then(|i| brackets[i].upper)
            .unwrap_or(Decimal::ZERO),
        bracket: &brackets[index],
    }
}
