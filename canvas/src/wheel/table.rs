//! Prize tables and probability-weighted selection.
//!
//! Selection walks the table in order, accumulating probabilities, and
//! returns the first entry whose running sum reaches the uniform draw. A table
//! whose probabilities sum to less than one does not fail: draws past the
//! total land on the last entry. [`audit`] reports such tables so the editor
//! can warn at authoring time instead.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::PROBABILITY_SUM_TOLERANCE;

/// One possible outcome of a wheel draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeEntry {
    pub id: String,
    pub name: String,
    /// Declared chance in `[0, 1]`.
    pub probability: f64,
    /// Sector fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Sector icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Probability used during selection: NaN and negatives count as zero,
/// values above one as one.
fn effective_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Index of the entry a uniform draw `r ∈ [0, 1)` selects.
///
/// Zero-weight entries are skipped by the walk. Returns `None` only for an
/// empty table; an exhausted walk falls back to the last entry.
#[must_use]
pub fn pick_index(prizes: &[PrizeEntry], r: f64) -> Option<usize> {
    let last = prizes.len().checked_sub(1)?;
    let mut running = 0.0;
    for (index, prize) in prizes.iter().enumerate() {
        let p = effective_probability(prize.probability);
        running += p;
        if p > 0.0 && running >= r {
            return Some(index);
        }
    }
    warn!(r, total = running, fallback = %prizes[last].id, "prize table exhausted, using last entry");
    Some(last)
}

/// Draw one entry from `prizes` using `rng`.
///
/// Returns the selected index alongside the entry, or `None` for an empty table.
pub fn select_outcome<'a, R: Rng + ?Sized>(prizes: &'a [PrizeEntry], rng: &mut R) -> Option<(usize, &'a PrizeEntry)> {
    let r: f64 = rng.random();
    let index = pick_index(prizes, r)?;
    prizes.get(index).map(|prize| (index, prize))
}

// =============================================================================
// AUDIT
// =============================================================================

/// Authoring-time problem with a prize table. Draws still succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum TableWarning {
    Empty,
    OutOfRange { id: String, probability: f64 },
    SumMismatch { sum: f64 },
    DuplicateId(String),
}

impl fmt::Display for TableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("prize table has no entries"),
            Self::OutOfRange { id, probability } => {
                write!(f, "prize {id} has probability {probability} outside [0, 1]")
            }
            Self::SumMismatch { sum } => {
                write!(f, "probabilities sum to {sum:.4}; draws past the total land on the last prize")
            }
            Self::DuplicateId(id) => write!(f, "prize id {id} appears more than once"),
        }
    }
}

/// Check a prize table for configuration mistakes.
#[must_use]
pub fn audit(prizes: &[PrizeEntry]) -> Vec<TableWarning> {
    if prizes.is_empty() {
        return vec![TableWarning::Empty];
    }

    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for prize in prizes {
        if !(0.0..=1.0).contains(&prize.probability) {
            warnings.push(TableWarning::OutOfRange { id: prize.id.clone(), probability: prize.probability });
        }
        if !seen.insert(prize.id.as_str()) {
            warnings.push(TableWarning::DuplicateId(prize.id.clone()));
        }
    }

    let sum: f64 = prizes.iter().map(|p| effective_probability(p.probability)).sum();
    if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        warnings.push(TableWarning::SumMismatch { sum });
    }
    warnings
}
