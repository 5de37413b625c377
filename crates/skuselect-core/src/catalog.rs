//! Catalog file loading: the product families the engine selects among.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineError};
use crate::variant::ProductFamily;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<ProductFamily>,
}

impl CatalogFile {
    /// Looks up a product family by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownProduct`] if no family has that id.
    pub fn product(&self, id: &str) -> Result<&ProductFamily, EngineError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::UnknownProduct { id: id.to_string() })
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Parse and validate a catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_catalog(content: &str) -> Result<CatalogFile, ConfigError> {
    let catalog: CatalogFile = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_products = HashSet::new();

    for product in &catalog.products {
        if product.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product id must be non-empty".to_string(),
            ));
        }
        if !seen_products.insert(product.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate product id: '{}'",
                product.id
            )));
        }

        let mut seen_variants = HashSet::new();
        for variant in product.members() {
            if variant.id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "product '{}' has a variant with an empty id",
                    product.id
                )));
            }
            if !seen_variants.insert(variant.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "product '{}' has duplicate variant id '{}'",
                    product.id, variant.id
                )));
            }
        }
    }

    Ok(())
}
