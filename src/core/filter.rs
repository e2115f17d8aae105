//! User-editable filter criteria that scope cluster queries
//!
//! A `FilterCriteria` is an immutable snapshot: user input replaces the whole
//! structure, consumers never see partial in-place mutation. Every fetch
//! samples the criteria current at fire time.

use serde::{Deserialize, Serialize};

/// Floor-area bucket for a listing, in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AreaBucket {
    #[default]
    All,
    /// Up to 60 m²
    UpTo60,
    /// 60 m² to 85 m²
    From60To85,
    /// 85 m² to 135 m²
    From85To135,
    /// Over 135 m²
    Over135,
}

impl AreaBucket {
    /// Query-string value; `All` contributes no parameter.
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            AreaBucket::All => None,
            AreaBucket::UpTo60 => Some("60"),
            AreaBucket::From60To85 => Some("85"),
            AreaBucket::From85To135 => Some("135"),
            AreaBucket::Over135 => Some("136"),
        }
    }
}

/// Transaction type for a listing: outright sale or lump-sum lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransactionKind {
    #[default]
    All,
    Sale,
    Lease,
}

impl TransactionKind {
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            TransactionKind::All => None,
            TransactionKind::Sale => Some("sale"),
            TransactionKind::Lease => Some("lease"),
        }
    }
}

/// The active filter criteria scoping every cluster fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub min_price: f64,
    /// May be unbounded (`f64::INFINITY`)
    pub max_price: f64,
    pub area: AreaBucket,
    pub transaction: TransactionKind,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: f64::INFINITY,
            area: AreaBucket::All,
            transaction: TransactionKind::All,
        }
    }
}

impl FilterCriteria {
    /// True when every field is at its unconstrained default
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Query-string pairs for the outbound fetch. Unbounded or `All` fields
    /// contribute nothing.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if self.min_price > 0.0 {
            pairs.push(("minPrice", format_price(self.min_price)));
        }
        if self.max_price.is_finite() {
            pairs.push(("maxPrice", format_price(self.max_price)));
        }
        if let Some(area) = self.area.as_query_value() {
            pairs.push(("area", area.to_string()));
        }
        if let Some(kind) = self.transaction.as_query_value() {
            pairs.push(("type", kind.to_string()));
        }
        pairs
    }
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{}", price)
    }
}
