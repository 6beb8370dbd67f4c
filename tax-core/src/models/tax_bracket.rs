use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One segment of a bracketed schedule.
///
/// `upper` is inclusive (`value <= upper` falls inside the bracket); `None`
/// marks the catch-all last bracket. For progressive schedules `base_tax`
/// carries the tax accumulated up to the previous bracket's upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper: Decimal,
        rate: Decimal,
        base_tax: Decimal,
    ) -> Self {
        Self {
            upper: Some(upper),
            rate,
            base_tax,
        }
    }

    pub fn unbounded(
        rate: Decimal,
        base_tax: Decimal,
    ) -> Self {
        Self {
            upper: None,
            rate,
            base_tax,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BracketError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("bracket {index} upper bound {upper} does not exceed the previous bound {previous}")]
    NotAscending {
        index: usize,
        upper: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    #[error("last bracket must be unbounded")]
    MissingCatchAll,

    #[error("bracket {index} has a negative rate or base tax")]
    Negative { index: usize },
}

/// Ordered brackets partitioning `[0, +inf)` without gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Validates and wraps `brackets`.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError`] if the list is empty, the bounds are not
    /// strictly ascending from zero, the last bracket is bounded, an earlier
    /// one is unbounded, or any rate/base is negative.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketError> {
        if brackets.is_empty() {
            return Err(BracketError::Empty);
        }

        let last = brackets.len() - 1;
        let mut previous: Option<Decimal> = None;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.base_tax < Decimal::ZERO {
                return Err(BracketError::Negative { index });
            }

            match bracket.upper {
                Some(upper) => {
                    let floor = previous.unwrap_or(Decimal::ZERO);
                    let ascending = match previous {
                        Some(prev) => upper > prev,
                        None => upper >= Decimal::ZERO,
                    };
                    if !ascending {
                        return Err(BracketError::NotAscending {
                            index,
                            upper,
                            previous: floor,
                        });
                    }
                    previous = Some(upper);
                }
                None if index != last => {
                    return Err(BracketError::UnboundedBeforeLast { index });
                }
                None => {}
            }
        }

        if brackets[last].upper.is_some() {
            return Err(BracketError::MissingCatchAll);
        }

        Ok(Self { brackets })
    }

    /// Built-in schedules are written out by hand and covered by tests.
    pub(crate) fn new_unchecked(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Upper bound of the first bracket, i.e. the exemption threshold of a
    /// progressive schedule whose first bracket is untaxed.
    pub fn first_threshold(&self) -> Option<Decimal> {
        self.brackets.first().and_then(|b| b.upper)
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}
