//! Derives the selectable attribute groups of a product family.

use serde::Serialize;

use crate::attribute::AttributeKind;
use crate::normalize::option_id;
use crate::variant::Variant;

/// One selectable value within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantOption {
    /// `{group_key}-{slug}`, suffixed with `-2`, `-3`, ... when another raw
    /// value in the same group already claimed the slug.
    pub id: String,
    /// Original display-ready value, e.g. `"White"`.
    pub value: String,
}

/// One user-facing attribute axis with its options in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantGroup {
    pub key: AttributeKind,
    pub label: String,
    pub options: Vec<VariantOption>,
}

impl VariantGroup {
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    #[must_use]
    pub fn option_by_value(&self, value: &str) -> Option<&VariantOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Two distinct raw values within a group that normalized to the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionIdCollision {
    pub group: AttributeKind,
    pub value: String,
    /// The id the value would have received without disambiguation.
    pub base_id: String,
    /// The id actually assigned.
    pub assigned_id: String,
}

/// The ordered group list for one family plus any diagnostics raised
/// while building it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupSet {
    groups: Vec<VariantGroup>,
    collisions: Vec<OptionIdCollision>,
}

impl GroupSet {
    /// Builds groups for `variants`, considering attributes in
    /// [`AttributeKind::ALL`] order and skipping any with no values.
    #[must_use]
    pub fn build(variants: &[Variant]) -> Self {
        let mut set = Self::default();
        for kind in AttributeKind::ALL {
            set.add_group(kind, variants);
        }
        set
    }

    /// Adds the group for `kind`. Returns `false` without changing anything
    /// if the group already exists or no variant exposes a value for it.
    pub fn add_group(&mut self, kind: AttributeKind, variants: &[Variant]) -> bool {
        if self.get(kind).is_some() {
            tracing::warn!(group = %kind, "variant group already built; ignoring duplicate");
            return false;
        }

        let mut values: Vec<&str> = Vec::new();
        for value in variants.iter().flat_map(|v| v.attribute_values(kind)) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        if values.is_empty() {
            return false;
        }

        let mut options: Vec<VariantOption> = Vec::with_capacity(values.len());
        for value in values {
            let base_id = option_id(kind.key(), value);
            let id = unique_id(&options, &base_id);
            if id != base_id {
                tracing::warn!(
                    group = %kind,
                    value,
                    base_id = %base_id,
                    assigned_id = %id,
                    "option id collision; disambiguated with suffix"
                );
                self.collisions.push(OptionIdCollision {
                    group: kind,
                    value: value.to_string(),
                    base_id,
                    assigned_id: id.clone(),
                });
            }
            options.push(VariantOption {
                id,
                value: value.to_string(),
            });
        }

        self.groups.push(VariantGroup {
            key: kind,
            label: kind.label().to_string(),
            options,
        });
        true
    }

    #[must_use]
    pub fn groups(&self) -> &[VariantGroup] {
        &self.groups
    }

    #[must_use]
    pub fn get(&self, kind: AttributeKind) -> Option<&VariantGroup> {
        self.groups.iter().find(|g| g.key == kind)
    }

    #[must_use]
    pub fn collisions(&self) -> &[OptionIdCollision] {
        &self.collisions
    }
}

/// Returns `base_id`, or the first `{base_id}-N` (N >= 2) not already taken.
fn unique_id(options: &[VariantOption], base_id: &str) -> String {
    let taken = |id: &str| options.iter().any(|o| o.id == id);
    if !taken(base_id) {
        return base_id.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base_id}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "groups_test.rs"]
mod tests;
