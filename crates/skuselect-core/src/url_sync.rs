//! Bridges a selection to the page's query string.
//!
//! Hints are read from the address once, at page load, and only while the
//! selection is still empty. After that the address is write-only: every
//! committed change rewrites the attribute parameters in place.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::attribute::AttributeKind;
use crate::selection::{
    DeepLinkHints, SelectionObserver, SelectionSession, SelectionState, VariantSelector,
};

/// Characters escaped in query keys and values (RFC 3986 unreserved kept).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The router seam: reads the current query and replaces it in place.
pub trait AddressBar {
    /// Current query string without the leading `?`.
    fn current_query(&self) -> String;

    /// Replaces the query without navigating or scrolling.
    fn replace_query(&mut self, query: &str);
}

/// In-process address bar for hosts without a browser history API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryAddressBar {
    query: String,
    replacements: usize,
}

impl MemoryAddressBar {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: query.strip_prefix('?').unwrap_or(&query).to_string(),
            replacements: 0,
        }
    }

    /// Number of times the query has been replaced.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl AddressBar for MemoryAddressBar {
    fn current_query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.replacements += 1;
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE).to_string()
}

/// Non-empty `&`-separated segments of a query, still encoded.
fn query_segments(query: &str) -> impl Iterator<Item = &str> {
    query
        .strip_prefix('?')
        .unwrap_or(query)
        .split('&')
        .filter(|segment| !segment.is_empty())
}

/// Decoded key of a raw `key=value` segment.
fn segment_key(segment: &str) -> String {
    decode_component(segment.split_once('=').map_or(segment, |(k, _)| k))
}

/// Splits a query into decoded `(key, value)` pairs, keeping order.
fn query_pairs(query: &str) -> Vec<(String, String)> {
    query_segments(query)
        .map(|segment| match segment.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(segment), String::new()),
        })
        .collect()
}

/// Parses attribute parameters out of a query string.
///
/// Unrecognized keys are ignored; for a repeated key the first occurrence
/// wins.
#[must_use]
pub fn parse_deep_link_hints(query: &str) -> DeepLinkHints {
    query_pairs(query)
        .into_iter()
        .filter_map(|(key, value)| {
            key.parse::<AttributeKind>()
                .ok()
                .map(|kind| (kind, value))
        })
        .collect()
}

/// Rewrites `existing` so its attribute parameters mirror `state`.
///
/// Non-attribute parameters are kept byte for byte, in order. Each selected
/// group is then appended as `key=value` using the option's display value;
/// groups with no selection get no parameter.
#[must_use]
pub fn serialize_selection(
    selector: &VariantSelector,
    state: &SelectionState,
    existing: &str,
) -> String {
    let retained = query_segments(existing)
        .filter(|segment| segment_key(segment).parse::<AttributeKind>().is_err())
        .map(str::to_string);

    let selected = selector.groups().iter().filter_map(|group| {
        selector
            .selected_value(state, group.key)
            .map(|value| format!("{}={}", group.key.key(), encode_component(value)))
    });

    retained.chain(selected).collect::<Vec<_>>().join("&")
}

/// Keeps an [`AddressBar`] in step with a selection session.
#[derive(Debug)]
pub struct UrlSync<A> {
    address_bar: A,
    hydrated: bool,
}

impl<A: AddressBar> UrlSync<A> {
    pub fn new(address_bar: A) -> Self {
        Self {
            address_bar,
            hydrated: false,
        }
    }

    /// Reads deep-link hints from the address.
    ///
    /// Returns hints only on the first call and only while `state` is
    /// empty; every later call yields no hints.
    pub fn take_deep_link_hints(&mut self, state: &SelectionState) -> DeepLinkHints {
        if self.hydrated {
            return DeepLinkHints::default();
        }
        self.hydrated = true;
        if !state.is_empty() {
            return DeepLinkHints::default();
        }
        parse_deep_link_hints(&self.address_bar.current_query())
    }

    #[must_use]
    pub fn address_bar(&self) -> &A {
        &self.address_bar
    }
}

impl<A: AddressBar> SelectionObserver for UrlSync<A> {
    fn selection_changed(&mut self, selector: &VariantSelector, state: &SelectionState) {
        let current = self.address_bar.current_query();
        let next = serialize_selection(selector, state, &current);
        if next != current {
            tracing::debug!(query = %next, "syncing selection to address");
            self.address_bar.replace_query(&next);
        }
    }
}

impl<A: AddressBar> SelectionSession<UrlSync<A>> {
    /// Starts a session seeded from the address's query string and kept in
    /// sync with it from then on.
    pub fn from_address(selector: VariantSelector, address_bar: A) -> Self {
        let mut sync = UrlSync::new(address_bar);
        let hints = sync.take_deep_link_hints(&SelectionState::default());
        SelectionSession::new(selector, &hints, sync)
    }
}
