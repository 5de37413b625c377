//! End-to-end behaviour of variant resolution through the public API:
//! catalog parsing, group derivation, selection transitions and URL sync
//! working together the way a product page drives them.

use skuselect_core::{
    find_best_match, find_exact_match, parse_catalog, resolve, AddressBar, AttributeKind,
    DeepLinkHints, MemoryAddressBar, ProductFamily, SelectedValues, SelectionSession,
    SelectionState, Variant, VariantSelector,
};

const CATALOG: &str = r"
products:
  - id: essential-tee
    name: Essential Tee
    base: { id: essential-tee, inStock: true }
    variants:
      - { id: a, inStock: true, color: White, size: [S, M] }
      - { id: b, inStock: true, color: Black, size: [M, L] }
  - id: hoodie
    name: Heavyweight Hoodie
    base: { id: hoodie, inStock: true }
    variants:
      - { id: h-black, inStock: false, color: Black, colors: [Black, Charcoal], size: [M] }
      - { id: h-light-blue, inStock: true, color: Light Blue, size: [S, M, L] }
      - { id: h-sand, inStock: true, color: Sand, size: [L, XL] }
  - id: diffuser
    name: Reed Diffuser
    base: { id: diffuser, inStock: true }
    variants:
      - { id: d-small-cedar, inStock: true, capacities: [100ml], scents: [Cedar, Sea Salt] }
      - { id: d-large-cedar, inStock: false, capacities: [250ml], scents: [Cedar] }
      - { id: d-large-fig, inStock: true, capacities: [250ml], scents: [Fig] }
";

fn family(id: &str) -> ProductFamily {
    parse_catalog(CATALOG)
        .expect("fixture catalog should parse")
        .product(id)
        .expect("fixture product should exist")
        .clone()
}

fn selector(id: &str) -> VariantSelector {
    VariantSelector::new(family(id))
}

fn option_for(selector: &VariantSelector, kind: AttributeKind, value: &str) -> String {
    selector
        .group(kind)
        .and_then(|g| g.option_by_value(value))
        .map(|o| o.id.clone())
        .unwrap_or_else(|| panic!("no {kind} option for {value}"))
}

#[test]
fn groups_cover_exactly_the_attributes_present() {
    let tee = selector("essential-tee");
    let keys: Vec<_> = tee.groups().iter().map(|g| g.key).collect();
    assert_eq!(keys, vec![AttributeKind::Size, AttributeKind::Color]);

    let diffuser = selector("diffuser");
    let keys: Vec<_> = diffuser.groups().iter().map(|g| g.key).collect();
    assert_eq!(keys, vec![AttributeKind::Capacity, AttributeKind::Scent]);
    assert!(diffuser.groups().iter().all(|g| !g.options.is_empty()));
}

#[test]
fn charcoal_is_never_an_exact_match_for_a_black_variant() {
    let hoodie = family("hoodie");
    let mut selected = SelectedValues::new();
    selected.insert(AttributeKind::Color, "Charcoal".to_string());

    assert!(find_exact_match(&hoodie.variants, &selected).is_none());
    let best = find_best_match(&hoodie.variants, &selected).expect("non-empty family");
    assert_eq!(best.id, "h-black");
    assert_eq!(resolve(&hoodie.variants, &selected, &hoodie.base).id, "h-black");
}

#[test]
fn explicit_size_survives_choosing_a_color() {
    let hoodie = selector("hoodie");
    let medium = option_for(&hoodie, AttributeKind::Size, "M");
    let seeded = SelectionState::default().with_choice(AttributeKind::Size, medium);
    let black = option_for(&hoodie, AttributeKind::Color, "Black");
    let next = hoodie
        .select_option(&seeded, AttributeKind::Color, &black)
        .expect("valid option");
    assert_eq!(hoodie.selected_value(&next, AttributeKind::Size), Some("M"));

    // Sand only comes in L and XL; the explicit M must still stand.
    let sand = option_for(&hoodie, AttributeKind::Color, "Sand");
    let next = hoodie
        .select_option(&next, AttributeKind::Color, &sand)
        .expect("valid option");
    assert_eq!(hoodie.selected_value(&next, AttributeKind::Size), Some("M"));
    assert_eq!(hoodie.selected_value(&next, AttributeKind::Color), Some("Sand"));
}

#[test]
fn exact_match_is_returned_even_when_out_of_stock() {
    let diffuser = family("diffuser");
    let mut selected = SelectedValues::new();
    selected.insert(AttributeKind::Capacity, "250ml".to_string());
    selected.insert(AttributeKind::Scent, "Cedar".to_string());

    let exact = resolve(&diffuser.variants, &selected, &diffuser.base);
    assert_eq!(exact.id, "d-large-cedar");
    assert!(!exact.in_stock);
}

#[test]
fn repeated_selection_is_idempotent() {
    let tee = selector("essential-tee");
    let start = tee.initial_state(&DeepLinkHints::default());
    let black = option_for(&tee, AttributeKind::Color, "Black");
    let once = tee.select_option(&start, AttributeKind::Color, &black).unwrap();
    let twice = tee.select_option(&once, AttributeKind::Color, &black).unwrap();
    assert_eq!(once, twice);
    assert_eq!(tee.resolve(&once).id, tee.resolve(&twice).id);
}

#[test]
fn black_then_small_falls_back_to_catalog_order() {
    let mut session =
        SelectionSession::new(selector("essential-tee"), &DeepLinkHints::default(), ());
    let black = option_for(session.selector(), AttributeKind::Color, "Black");
    let small = option_for(session.selector(), AttributeKind::Size, "S");

    session.select_option(AttributeKind::Color, &black).unwrap();
    let resolved = session.select_option(AttributeKind::Size, &small).unwrap();
    assert_eq!(resolved.id, "a");
    assert!(session.is_selected(AttributeKind::Color, &black));
    assert!(session.is_selected(AttributeKind::Size, &small));
}

#[test]
fn url_round_trip_reproduces_the_selection() {
    let mut session =
        SelectionSession::from_address(selector("hoodie"), MemoryAddressBar::new("ref=ad"));
    let light_blue = option_for(session.selector(), AttributeKind::Color, "Light Blue");
    let large = option_for(session.selector(), AttributeKind::Size, "L");
    session.select_option(AttributeKind::Color, &light_blue).unwrap();
    session.select_option(AttributeKind::Size, &large).unwrap();

    let query = session.observer().address_bar().current_query();
    assert_eq!(query, "ref=ad&size=L&color=Light%20Blue");

    let reloaded = SelectionSession::from_address(
        selector("hoodie"),
        MemoryAddressBar::new(format!("?{query}")),
    );
    assert_eq!(reloaded.state(), session.state());
    assert_eq!(reloaded.resolved().id, "h-light-blue");
    assert_eq!(reloaded.observer().address_bar().replacements(), 0);
}

#[test]
fn url_round_trip_keeps_the_suffixed_option_of_a_collision() {
    let family = ProductFamily {
        id: "cap".to_string(),
        name: "Dad Cap".to_string(),
        base: Variant::new("cap"),
        variants: vec![
            Variant {
                in_stock: true,
                color: Some("Light Blue".to_string()),
                ..Variant::new("cap-a")
            },
            Variant {
                in_stock: true,
                color: Some("light_blue".to_string()),
                ..Variant::new("cap-b")
            },
        ],
    };
    let mut session = SelectionSession::from_address(
        VariantSelector::new(family.clone()),
        MemoryAddressBar::new(""),
    );
    let resolved = session
        .select_option(AttributeKind::Color, "color-light-blue-2")
        .unwrap();
    assert_eq!(resolved.id, "cap-b");

    let query = session.observer().address_bar().current_query();
    assert_eq!(query, "color=light_blue");

    let reloaded =
        SelectionSession::from_address(VariantSelector::new(family), MemoryAddressBar::new(query));
    assert_eq!(reloaded.state(), session.state());
    assert_eq!(reloaded.resolved().id, "cap-b");
    assert_eq!(reloaded.observer().address_bar().replacements(), 0);
}

#[test]
fn deep_link_with_unknown_value_degrades_to_default() {
    let session = SelectionSession::from_address(
        selector("hoodie"),
        MemoryAddressBar::new("color=Magenta&scent=Fig&size=xl"),
    );
    // Black is out of stock, so the first in-stock color is the default.
    assert_eq!(session.selected_value(AttributeKind::Color), Some("Light Blue"));
    assert_eq!(session.selected_value(AttributeKind::Size), Some("XL"));
    assert!(session.state().get(AttributeKind::Scent).is_none());
    assert_eq!(
        session.observer().address_bar().current_query(),
        "size=XL&color=Light%20Blue"
    );
}

#[test]
fn base_product_stands_in_for_missing_variant_list() {
    let family = ProductFamily {
        id: "gift-card".to_string(),
        name: "Gift Card".to_string(),
        base: Variant {
            in_stock: true,
            ..Variant::new("gift-card")
        },
        variants: vec![],
    };
    let session =
        SelectionSession::new(VariantSelector::new(family), &DeepLinkHints::default(), ());
    assert!(session.selector().groups().is_empty());
    assert_eq!(session.resolved().id, "gift-card");
}
