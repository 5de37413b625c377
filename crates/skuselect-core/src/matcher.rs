//! Maps selected attribute values onto a concrete variant.
//!
//! Exact matching checks color against the variant's own color only;
//! fallback matching lets the `colors` list count too. The asymmetry is
//! load-bearing: a variant that merely lists a color must never be reported
//! as that color's exact SKU.

use std::collections::BTreeMap;

use crate::attribute::{AttributeKind, MatchRule};
use crate::error::EngineError;
use crate::variant::Variant;

/// Selected raw values keyed by group.
pub type SelectedValues = BTreeMap<AttributeKind, String>;

fn satisfies_all(variant: &Variant, selected: &SelectedValues, rule: MatchRule) -> bool {
    selected
        .iter()
        .all(|(kind, value)| variant.supports(*kind, value, rule))
}

fn score(variant: &Variant, selected: &SelectedValues) -> usize {
    selected
        .iter()
        .filter(|(kind, value)| variant.supports(**kind, value, MatchRule::Loose))
        .count()
}

/// Prefers the first in-stock candidate, else the first candidate.
fn prefer_in_stock<'a>(
    mut candidates: impl Iterator<Item = &'a Variant> + Clone,
) -> Option<&'a Variant> {
    candidates
        .clone()
        .find(|v| v.in_stock)
        .or_else(|| candidates.next())
}

/// Finds the variant satisfying every selected value under the strict rule.
///
/// An empty selection never matches.
#[must_use]
pub fn find_exact_match<'a>(
    variants: &'a [Variant],
    selected: &SelectedValues,
) -> Option<&'a Variant> {
    if selected.is_empty() {
        return None;
    }
    prefer_in_stock(
        variants
            .iter()
            .filter(|v| satisfies_all(v, selected, MatchRule::Strict)),
    )
}

/// Finds the closest variant under the loose rule.
///
/// Variants satisfying every selected value win (in stock first). Otherwise
/// the variant satisfying the most values wins, ties going to catalog order.
///
/// # Errors
///
/// Returns [`EngineError::EmptyVariantList`] if `variants` is empty.
pub fn find_best_match<'a>(
    variants: &'a [Variant],
    selected: &SelectedValues,
) -> Result<&'a Variant, EngineError> {
    let first = variants.first().ok_or(EngineError::EmptyVariantList)?;

    if let Some(found) = prefer_in_stock(
        variants
            .iter()
            .filter(|v| satisfies_all(v, selected, MatchRule::Loose)),
    ) {
        return Ok(found);
    }

    let mut best = first;
    let mut best_score = score(first, selected);
    for variant in &variants[1..] {
        let s = score(variant, selected);
        if s > best_score {
            best = variant;
            best_score = s;
        }
    }
    Ok(best)
}

/// Exact match if one exists, else the fallback best match.
///
/// An empty `variants` slice is treated as the single-element list holding
/// `base`.
#[must_use]
pub fn resolve<'a>(
    variants: &'a [Variant],
    selected: &SelectedValues,
    base: &'a Variant,
) -> &'a Variant {
    let pool = if variants.is_empty() {
        std::slice::from_ref(base)
    } else {
        variants
    };

    if let Some(exact) = find_exact_match(pool, selected) {
        return exact;
    }
    tracing::debug!(?selected, "no exact variant match; using best match");
    find_best_match(pool, selected).unwrap_or(base)
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
