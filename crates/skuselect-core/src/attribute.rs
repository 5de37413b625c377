//! The closed set of selectable product axes and the per-axis accessors
//! used to read them off a [`Variant`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::variant::Variant;

/// A selectable product axis. Declaration order is the group priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Size,
    Color,
    Capacity,
    Scent,
}

impl AttributeKind {
    /// All kinds in the order groups are presented.
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Size,
        AttributeKind::Color,
        AttributeKind::Capacity,
        AttributeKind::Scent,
    ];

    /// Canonical group key, also used as the query-string parameter name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            AttributeKind::Size => "size",
            AttributeKind::Color => "color",
            AttributeKind::Capacity => "capacity",
            AttributeKind::Scent => "scent",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AttributeKind::Size => "Size",
            AttributeKind::Color => "Color",
            AttributeKind::Capacity => "Capacity",
            AttributeKind::Scent => "Scent",
        }
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AttributeKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "size" => Ok(AttributeKind::Size),
            "color" => Ok(AttributeKind::Color),
            "capacity" => Ok(AttributeKind::Capacity),
            "scent" => Ok(AttributeKind::Scent),
            other => Err(EngineError::UnknownGroup {
                key: other.to_string(),
            }),
        }
    }
}

/// How strictly a selected value is tested against a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Color must be the variant's own color; other axes use containment.
    Strict,
    /// Containment everywhere, including the variant's `colors` list.
    Loose,
}

impl Variant {
    /// Every raw value this variant exposes for `kind`, in declaration order.
    ///
    /// For color the variant's own color comes first, followed by the
    /// entries of `colors` that differ from it.
    #[must_use]
    pub fn attribute_values(&self, kind: AttributeKind) -> Vec<&str> {
        match kind {
            AttributeKind::Size => self.size.iter().map(String::as_str).collect(),
            AttributeKind::Capacity => self.capacities.iter().map(String::as_str).collect(),
            AttributeKind::Scent => self.scents.iter().map(String::as_str).collect(),
            AttributeKind::Color => {
                let own = self.color.as_deref();
                own.into_iter()
                    .chain(
                        self.colors
                            .iter()
                            .map(String::as_str)
                            .filter(|c| Some(*c) != own),
                    )
                    .collect()
            }
        }
    }

    /// The value auto-fill copies from this variant into an unset group.
    #[must_use]
    pub fn primary_value(&self, kind: AttributeKind) -> Option<&str> {
        match kind {
            AttributeKind::Size => self.size.first().map(String::as_str),
            AttributeKind::Color => self
                .color
                .as_deref()
                .or_else(|| self.colors.first().map(String::as_str)),
            AttributeKind::Capacity => self.capacities.first().map(String::as_str),
            AttributeKind::Scent => self.scents.first().map(String::as_str),
        }
    }

    /// Returns `true` if this variant satisfies `value` on the `kind` axis.
    #[must_use]
    pub fn supports(&self, kind: AttributeKind, value: &str, rule: MatchRule) -> bool {
        match (kind, rule) {
            (AttributeKind::Color, MatchRule::Strict) => self.color.as_deref() == Some(value),
            (AttributeKind::Color, MatchRule::Loose) => {
                self.color.as_deref() == Some(value) || self.colors.iter().any(|c| c == value)
            }
            (AttributeKind::Size, _) => self.size.iter().any(|s| s == value),
            (AttributeKind::Capacity, _) => self.capacities.iter().any(|c| c == value),
            (AttributeKind::Scent, _) => self.scents.iter().any(|s| s == value),
        }
    }
}
