//! Domain types for the product catalog.
//!
//! This module provides the canonical `Product` record, the scored search
//! hit returned to clients, and the fixed price-bucket labels used by the
//! recommendation metadata index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog product as accepted by the ingest endpoint.
///
/// `product_id` is a stable opaque string, unique within the catalog.
/// `images` and `metadata` are preserved but never indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub title: String,
    pub description: String,
    /// Short labels with case-insensitive semantics.
    pub categories: Vec<String>,
    /// Non-negative price in cents.
    pub price_cents: u64,
    /// Opaque short currency code.
    pub currency: String,
    /// Ordered image URLs; not indexed.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    /// Opaque attribute bag; preserved but not indexed.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// The text block fed to the inverted index: title plus description.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A single scored search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub product_id: String,
    pub title: String,
    pub score: f64,
    pub price_cents: u64,
    pub currency: String,
    pub stock: u32,
}

/// Fixed dollar-range label assigned to a product at index time.
///
/// Cutoffs are in whole dollars with strict less-than semantics, so a
/// product at 4999 cents falls in `UpTo50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBucket {
    UpTo50,
    UpTo100,
    UpTo200,
    UpTo500,
    Over500,
}

impl PriceBucket {
    /// Classify a price in cents into its bucket.
    pub fn from_price_cents(price_cents: u64) -> Self {
        match price_cents {
            0..5_000 => Self::UpTo50,
            5_000..10_000 => Self::UpTo100,
            10_000..20_000 => Self::UpTo200,
            20_000..50_000 => Self::UpTo500,
            _ => Self::Over500,
        }
    }

    /// The wire label for this bucket.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo50 => "0-50",
            Self::UpTo100 => "50-100",
            Self::UpTo200 => "100-200",
            Self::UpTo500 => "200-500",
            Self::Over500 => "500+",
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
