//! Variant resolution for storefront product pages.
//!
//! Maps the attributes a shopper picks (size, color, capacity, scent) onto
//! one concrete variant of a product family, keeps the choice consistent as
//! attributes change one at a time, and mirrors it into the page URL.

pub mod attribute;
pub mod catalog;
pub mod config;
pub mod error;
pub mod groups;
pub mod matcher;
pub mod normalize;
pub mod selection;
pub mod url_sync;
pub mod variant;

pub use attribute::{AttributeKind, MatchRule};
pub use catalog::{load_catalog, parse_catalog, CatalogFile};
pub use config::{load_engine_config, load_engine_config_from_env, EngineConfig, Environment};
pub use error::{ConfigError, EngineError};
pub use groups::{GroupSet, OptionIdCollision, VariantGroup, VariantOption};
pub use matcher::{find_best_match, find_exact_match, resolve, SelectedValues};
pub use normalize::{normalize_option_value, option_id};
pub use selection::{
    DeepLinkHints, SelectionObserver, SelectionSession, SelectionState, VariantSelector,
};
pub use url_sync::{
    parse_deep_link_hints, serialize_selection, AddressBar, MemoryAddressBar, UrlSync,
};
pub use variant::{ProductFamily, Variant};
