use strsim::levenshtein;
use tracing::debug;

use super::gazetteer::{normalize_key, Gazetteer};

/// Largest and smallest number of trailing tokens tried as a street name.
const MAX_WINDOW: usize = 6;
const MIN_WINDOW: usize = 2;
/// Edit budget for a window is `WINDOW_EDIT_BASE - window size`.
const WINDOW_EDIT_BASE: usize = 7;
/// Edit budget for suburb names.
const SUBURB_MAX_EDITS: usize = 2;

/// Multi-word suffixes the abbreviation table cannot express token by token.
const SPECIAL_SUFFIXES: [(&str, &str); 4] = [
    (" TCE NTH ", " TERRACE NORTH "),
    (" TCE STH ", " TERRACE SOUTH "),
    (" TCE EAST ", " TERRACE EAST "),
    (" TCE WEST ", " TERRACE WEST "),
];

/// A suburb resolved against the gazetteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuburbMatch<'a> {
    pub name: &'a str,
    pub canonical: &'a str,
}

/// Expand the street suffix and correct the street name against the
/// gazetteer, keeping any house number in front of it.
///
/// Returns the input unchanged when no street name matches.
pub fn format_street_name(gazetteer: &Gazetteer, street: &str) -> String {
    format_street_name_in(gazetteer, street, None)
}

fn format_street_name_in(gazetteer: &Gazetteer, street: &str, suburb: Option<&str>) -> String {
    let original = street.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut padded = format!(" {} ", original.to_uppercase());
    for (abbreviated, expanded) in SPECIAL_SUFFIXES {
        padded = padded.replace(abbreviated, expanded);
    }
    let mut tokens: Vec<String> = padded.split_whitespace().map(String::from).collect();
    if let Some(last) = tokens.last_mut() {
        if let Some(suffix) = gazetteer.expand_suffix(last) {
            *last = suffix.to_string();
        }
    }

    let windows = || (MIN_WINDOW..=MAX_WINDOW.min(tokens.len())).rev();

    for size in windows() {
        let split = tokens.len() - size;
        if gazetteer.is_street(&tokens[split..].join(" ")) {
            return tokens.join(" ");
        }
    }

    let house_number = tokens
        .iter()
        .take_while(|t| t.starts_with(|c: char| c.is_ascii_digit()))
        .count();

    for size in windows().filter(|&size| size <= tokens.len() - house_number) {
        let split = tokens.len() - size;
        let candidate = tokens[split..].join(" ");
        let max_edits = WINDOW_EDIT_BASE - size;
        if let Some(name) = closest_street(gazetteer, &candidate, max_edits, suburb) {
            debug!("street '{}' corrected to '{}'", candidate, name);
            let mut corrected = tokens[..split].to_vec();
            corrected.push(name.to_string());
            return corrected.join(" ");
        }
    }

    debug!("street '{}' not found in gazetteer", original);
    original
}

/// Nearest street within `max_edits`. Ties prefer streets known in
/// `suburb`, then lexical order.
fn closest_street<'a>(
    gazetteer: &'a Gazetteer,
    candidate: &str,
    max_edits: usize,
    suburb: Option<&str>,
) -> Option<&'a str> {
    gazetteer
        .street_names()
        .filter_map(|name| {
            let distance = levenshtein(candidate, name);
            (distance <= max_edits).then_some((distance, name))
        })
        .min_by_key(|&(distance, name)| {
            let elsewhere = suburb.is_some_and(|s| !gazetteer.street_in_suburb(name, s));
            (distance, elsewhere)
        })
        .map(|(_, name)| name)
}

/// Match a suburb name exactly, or within two edits.
pub fn resolve_suburb<'a>(gazetteer: &'a Gazetteer, suburb: &str) -> Option<SuburbMatch<'a>> {
    let key = normalize_key(suburb);
    if key.is_empty() {
        return None;
    }
    if let Some((name, canonical)) = gazetteer.suburb(&key) {
        return Some(SuburbMatch { name, canonical });
    }
    gazetteer
        .suburbs()
        .filter_map(|(name, canonical)| {
            let distance = levenshtein(&key, name);
            (distance <= SUBURB_MAX_EDITS).then_some((distance, SuburbMatch { name, canonical }))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, found)| found)
}

/// Build `"<street>, <canonical suburb>"`, or `None` when the suburb is
/// unknown.
pub fn format_address(gazetteer: &Gazetteer, street: &str, suburb: &str) -> Option<String> {
    let Some(found) = resolve_suburb(gazetteer, suburb) else {
        debug!("suburb '{}' not found in gazetteer", suburb.trim());
        return None;
    };
    let street = format_street_name_in(gazetteer, street, Some(found.name));
    Some(format!("{street}, {}", found.canonical))
}

/// Normalize a full `"<street>, <suburb>"` address. The suburb is the part
/// after the last comma.
pub fn normalize_address(gazetteer: &Gazetteer, address: &str) -> Option<String> {
    let (street, suburb) = address.rsplit_once(',')?;
    format_address(gazetteer, street, suburb)
}
