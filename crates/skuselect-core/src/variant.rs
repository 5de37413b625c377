use serde::{Deserialize, Serialize};

/// One concrete sellable unit of a product family, as supplied by the
/// catalog. The engine reads variants and never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    #[serde(default)]
    pub in_stock: bool,
    /// Display name shown when this variant is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Price as a decimal string, exactly as the catalog supplies it, e.g. `"24.00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// A variant may cover several sizes at once (multi-size packs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<String>,
    /// The variant's own color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Colors this variant claims to represent. Only consulted by loose matching.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scents: Vec<String>,
}

impl Variant {
    /// An out-of-stock variant with no attributes.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            in_stock: false,
            name: None,
            price: None,
            image: None,
            size: Vec::new(),
            color: None,
            colors: Vec::new(),
            capacities: Vec::new(),
            scents: Vec::new(),
        }
    }
}

/// A product family: the base product plus its explicit variant list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFamily {
    pub id: String,
    pub name: String,
    pub base: Variant,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl ProductFamily {
    /// The variants to select among. Falls back to the base product alone
    /// when the catalog supplied no variant list, so this is never empty.
    #[must_use]
    pub fn members(&self) -> &[Variant] {
        if self.variants.is_empty() {
            std::slice::from_ref(&self.base)
        } else {
            &self.variants
        }
    }

    /// Returns `true` if at least one member is in stock.
    #[must_use]
    pub fn has_in_stock_members(&self) -> bool {
        self.members().iter().any(|v| v.in_stock)
    }
}
