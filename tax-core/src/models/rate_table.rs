use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// Rates keyed by a region, tier or class code, with an optional fallback.
///
/// Lookups go through [`crate::calculations::resolver::resolve`], which
/// returns the keyed rate, else the default, else zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable<K: Ord> {
    entries: BTreeMap<K, Decimal>,
    default: Option<Decimal>,
}

impl<K: Ord> RateTable<K> {
    pub fn new(default: Option<Decimal>) -> Self {
        Self {
            entries: BTreeMap::new(),
            default,
        }
    }

    pub fn from_entries<I>(
        entries: I,
        default: Option<Decimal>,
    ) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            default,
        }
    }

    /// Builder form of [`RateTable::insert`].
    pub fn with(
        mut self,
        key: K,
        rate: Decimal,
    ) -> Self {
        self.insert(key, rate);
        self
    }

    /// Sets the rate for `key`, replacing any previous entry.
    pub fn insert(
        &mut self,
        key: K,
        rate: Decimal,
    ) {
        self.entries.insert(key, rate);
    }

    pub fn get(
        &self,
        key: &K,
    ) -> Option<Decimal> {
        self.entries.get(key).copied()
    }

    pub fn default_rate(&self) -> Option<Decimal> {
        self.default
    }

    pub fn set_default(
        &mut self,
        default: Option<Decimal>,
    ) {
        self.default = default;
    }

    pub fn entries(&self) -> impl Iterator<Item = (&K, Decimal)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every rate held by the table, including the default.
    pub(crate) fn all_rates(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.entries.values().copied().chain(self.default)
    }
}

/// Statutory allowance keyed by a locality classification (urban/rural,
/// city tier). The allowance is deducted from the taxable base, capped so
/// the base never goes negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitPolicy<K: Ord> {
    allowances: RateTable<K>,
}

impl<K: Ord> BenefitPolicy<K> {
    pub fn new(allowances: RateTable<K>) -> Self {
        Self { allowances }
    }

    pub fn allowances(&self) -> &RateTable<K> {
        &self.allowances
    }
}
