//! Command handlers for the CLI. Each loads the catalog, drives the engine
//! and prints JSON to stdout.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use skuselect_core::{
    load_catalog, AddressBar, AttributeKind, CatalogFile, MemoryAddressBar,
    SelectionSession, Variant, VariantSelector,
};

/// One `GROUP=OPTION_ID` pair from `--select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: AttributeKind,
    pub option_id: String,
}

/// Parses `GROUP=OPTION_ID`, e.g. `color=color-black`.
pub fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (group, option_id) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected GROUP=OPTION_ID, got '{raw}'"))?;
    let kind = group.parse::<AttributeKind>().map_err(|e| e.to_string())?;
    if option_id.is_empty() {
        return Err(format!("missing option id for group '{group}'"));
    }
    Ok(Selection {
        kind,
        option_id: option_id.to_string(),
    })
}

#[derive(Debug, Serialize)]
struct ProductSummary<'a> {
    id: &'a str,
    name: &'a str,
    variants: usize,
    in_stock: bool,
}

#[derive(Debug, Serialize)]
struct SelectedEntry<'a> {
    group: AttributeKind,
    option_id: &'a str,
    value: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    variant: &'a Variant,
    selection: Vec<SelectedEntry<'a>>,
    query: String,
}

fn open_catalog(path: &Path) -> anyhow::Result<CatalogFile> {
    load_catalog(path).with_context(|| format!("loading catalog {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_products(catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let summaries: Vec<_> = catalog
        .products
        .iter()
        .map(|p| ProductSummary {
            id: &p.id,
            name: &p.name,
            variants: p.members().len(),
            in_stock: p.has_in_stock_members(),
        })
        .collect();
    print_json(&summaries)
}

pub fn run_groups(catalog_path: &Path, product: &str) -> anyhow::Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let selector = VariantSelector::new(catalog.product(product)?.clone());
    print_json(selector.group_set())
}

pub fn run_resolve(
    catalog_path: &Path,
    product: &str,
    query: &str,
    selections: &[Selection],
) -> anyhow::Result<()> {
    let catalog = open_catalog(catalog_path)?;
    let family = catalog.product(product)?.clone();
    let mut session =
        SelectionSession::from_address(VariantSelector::new(family), MemoryAddressBar::new(query));

    for selection in selections {
        session
            .select_option(selection.kind, &selection.option_id)
            .with_context(|| format!("applying {}={}", selection.kind, selection.option_id))?;
    }

    let selection = session
        .state()
        .iter()
        .map(|(group, option_id)| SelectedEntry {
            group,
            option_id,
            value: session.selected_value(group),
        })
        .collect();

    print_json(&ResolveReport {
        variant: session.resolved(),
        selection,
        query: session.observer().address_bar().current_query(),
    })
}
