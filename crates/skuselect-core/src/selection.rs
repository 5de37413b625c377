//! The selection state machine: per-group choices, transitions, auto-fill.
//!
//! State is an explicit value. [`VariantSelector::select_option`] is a pure
//! reducer returning the next [`SelectionState`]; [`SelectionSession`] owns
//! the current state for a page and tells its observer about changes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::attribute::{AttributeKind, MatchRule};
use crate::error::EngineError;
use crate::groups::{GroupSet, VariantGroup};
use crate::matcher::{find_best_match, find_exact_match, resolve, SelectedValues};
use crate::normalize::normalize_option_value;
use crate::variant::{ProductFamily, Variant};

/// Chosen option id per group. Never holds raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    choices: BTreeMap<AttributeKind, String>,
}

impl SelectionState {
    /// Returns this state with `kind` set to `option_id`. Used to seed a
    /// state from a previous page render.
    #[must_use]
    pub fn with_choice(mut self, kind: AttributeKind, option_id: impl Into<String>) -> Self {
        self.set(kind, option_id);
        self
    }

    #[must_use]
    pub fn get(&self, kind: AttributeKind) -> Option<&str> {
        self.choices.get(&kind).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.choices.contains_key(&kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, &str)> {
        self.choices.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn set(&mut self, kind: AttributeKind, option_id: impl Into<String>) {
        self.choices.insert(kind, option_id.into());
    }
}

/// Externally supplied initial selections (group → human value), e.g. from
/// a shared URL. Consumed once when a selection is initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLinkHints {
    hints: BTreeMap<AttributeKind, String>,
}

impl DeepLinkHints {
    /// Records a hint. The first hint for a group wins; empty values are ignored.
    pub fn insert(&mut self, kind: AttributeKind, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.hints.entry(kind).or_insert(value);
    }

    #[must_use]
    pub fn get(&self, kind: AttributeKind) -> Option<&str> {
        self.hints.get(&kind).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, &str)> {
        self.hints.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromIterator<(AttributeKind, String)> for DeepLinkHints {
    fn from_iter<I: IntoIterator<Item = (AttributeKind, String)>>(iter: I) -> Self {
        let mut hints = Self::default();
        for (kind, value) in iter {
            hints.insert(kind, value);
        }
        hints
    }
}

/// Immutable view of one product family: its variants and derived groups.
#[derive(Debug, Clone)]
pub struct VariantSelector {
    family: ProductFamily,
    groups: GroupSet,
}

impl VariantSelector {
    #[must_use]
    pub fn new(family: ProductFamily) -> Self {
        let groups = GroupSet::build(family.members());
        Self { family, groups }
    }

    #[must_use]
    pub fn family(&self) -> &ProductFamily {
        &self.family
    }

    #[must_use]
    pub fn group_set(&self) -> &GroupSet {
        &self.groups
    }

    #[must_use]
    pub fn groups(&self) -> &[VariantGroup] {
        self.groups.groups()
    }

    #[must_use]
    pub fn group(&self, kind: AttributeKind) -> Option<&VariantGroup> {
        self.groups.get(kind)
    }

    /// Builds the starting selection.
    ///
    /// A hint selects the option whose value equals it exactly, falling
    /// back to normalized, case-insensitive equality. Unknown groups and
    /// unmatched values are skipped. Every group still unset then takes its
    /// first option that some in-stock variant supports, or its first option
    /// outright.
    #[must_use]
    pub fn initial_state(&self, hints: &DeepLinkHints) -> SelectionState {
        let mut state = SelectionState::default();

        for (kind, hint) in hints.iter() {
            let Some(group) = self.group(kind) else {
                tracing::debug!(group = %kind, hint, "ignoring deep-link hint for absent group");
                continue;
            };
            let wanted = normalize_option_value(hint);
            let found = group.option_by_value(hint).or_else(|| {
                group
                    .options
                    .iter()
                    .find(|o| normalize_option_value(&o.value) == wanted)
            });
            match found {
                Some(option) => state.set(kind, option.id.clone()),
                None => {
                    tracing::debug!(group = %kind, hint, "deep-link hint matches no option");
                }
            }
        }

        for group in self.groups() {
            if state.contains(group.key) {
                continue;
            }
            let in_stock = group.options.iter().find(|o| {
                self.family
                    .members()
                    .iter()
                    .any(|v| v.in_stock && v.supports(group.key, &o.value, MatchRule::Loose))
            });
            if let Some(option) = in_stock.or_else(|| group.options.first()) {
                state.set(group.key, option.id.clone());
            }
        }

        state
    }

    /// Applies a user choice and returns the next state.
    ///
    /// The chosen option is always written. Groups with no entry are then
    /// auto-filled from the exact match, or from the best match when there
    /// is none. Groups that already hold a choice are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownGroup`] if the family has no `kind`
    /// group, or [`EngineError::UnknownOption`] if `option_id` is not one of
    /// its options.
    pub fn select_option(
        &self,
        state: &SelectionState,
        kind: AttributeKind,
        option_id: &str,
    ) -> Result<SelectionState, EngineError> {
        let group = self.group(kind).ok_or_else(|| EngineError::UnknownGroup {
            key: kind.key().to_string(),
        })?;
        if group.option(option_id).is_none() {
            return Err(EngineError::UnknownOption {
                group: kind.key().to_string(),
                option_id: option_id.to_string(),
            });
        }

        let mut next = state.clone();
        next.set(kind, option_id);

        let selected = self.selected_values(&next);
        let members = self.family.members();
        let matched = match find_exact_match(members, &selected) {
            Some(exact) => exact,
            None => find_best_match(members, &selected)?,
        };

        for other in self.groups() {
            if other.key == kind || next.contains(other.key) {
                continue;
            }
            let filled = matched
                .primary_value(other.key)
                .and_then(|value| other.option_by_value(value));
            if let Some(option) = filled {
                tracing::debug!(
                    group = %other.key,
                    option = %option.id,
                    variant = %matched.id,
                    "auto-filled group from matched variant"
                );
                next.set(other.key, option.id.clone());
            }
        }

        Ok(next)
    }

    /// Resolves each selected option id back to its raw value.
    #[must_use]
    pub fn selected_values(&self, state: &SelectionState) -> SelectedValues {
        state
            .iter()
            .filter_map(|(kind, _)| {
                self.selected_value(state, kind)
                    .map(|value| (kind, value.to_string()))
            })
            .collect()
    }

    /// The variant the page should show for `state`.
    #[must_use]
    pub fn resolve(&self, state: &SelectionState) -> &Variant {
        resolve(
            &self.family.variants,
            &self.selected_values(state),
            &self.family.base,
        )
    }

    #[must_use]
    pub fn is_selected(&self, state: &SelectionState, kind: AttributeKind, option_id: &str) -> bool {
        state.get(kind) == Some(option_id)
    }

    /// Raw value of the option selected for `kind`, if any.
    #[must_use]
    pub fn selected_value(&self, state: &SelectionState, kind: AttributeKind) -> Option<&str> {
        let option_id = state.get(kind)?;
        self.group(kind)?
            .option(option_id)
            .map(|o| o.value.as_str())
    }
}

/// Receives every committed selection change.
pub trait SelectionObserver {
    fn selection_changed(&mut self, selector: &VariantSelector, state: &SelectionState);
}

impl SelectionObserver for () {
    fn selection_changed(&mut self, _selector: &VariantSelector, _state: &SelectionState) {}
}

/// The live selection for one page. Transitions take `&mut self`, so each
/// one commits as a unit before the next can start.
#[derive(Debug)]
pub struct SelectionSession<O = ()> {
    selector: VariantSelector,
    state: SelectionState,
    observer: O,
}

impl<O: SelectionObserver> SelectionSession<O> {
    /// Initializes from `hints` and reports the starting state to `observer`.
    pub fn new(selector: VariantSelector, hints: &DeepLinkHints, mut observer: O) -> Self {
        let state = selector.initial_state(hints);
        observer.selection_changed(&selector, &state);
        Self {
            selector,
            state,
            observer,
        }
    }

    /// Applies a user choice and returns the newly resolved variant.
    ///
    /// # Errors
    ///
    /// Propagates [`VariantSelector::select_option`] errors; the state is
    /// unchanged when an error is returned.
    pub fn select_option(
        &mut self,
        kind: AttributeKind,
        option_id: &str,
    ) -> Result<&Variant, EngineError> {
        let next = self.selector.select_option(&self.state, kind, option_id)?;
        if next != self.state {
            self.state = next;
            self.observer.selection_changed(&self.selector, &self.state);
        }
        Ok(self.selector.resolve(&self.state))
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn selector(&self) -> &VariantSelector {
        &self.selector
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub fn resolved(&self) -> &Variant {
        self.selector.resolve(&self.state)
    }

    #[must_use]
    pub fn is_selected(&self, kind: AttributeKind, option_id: &str) -> bool {
        self.selector.is_selected(&self.state, kind, option_id)
    }

    #[must_use]
    pub fn selected_value(&self, kind: AttributeKind) -> Option<&str> {
        self.selector.selected_value(&self.state, kind)
    }
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
