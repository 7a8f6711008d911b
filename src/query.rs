//! Query String Helpers
//!
//! Reads the `page` parameter and rebuilds listing URLs while keeping every
//! other filter/sort parameter exactly as the page had it.

use percent_encoding::percent_decode_str;

pub const PAGE_PARAM: &str = "page";

/// Decode a form-encoded query component (`+` is a space)
fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Split `?a=1&b=2` into raw `(key, value)` segments, skipping empty ones
fn pairs(search: &str) -> impl Iterator<Item = (&str, &str)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
}

fn is_page_key(raw_key: &str) -> bool {
    decode_component(raw_key) == PAGE_PARAM
}

/// Page number from the first `page` parameter
///
/// Returns `None` when the parameter is absent or is not an unsigned integer.
pub fn page_param(search: &str) -> Option<u32> {
    let (_, raw) = pairs(search).find(|(key, _)| is_page_key(key))?;
    let value = decode_component(raw);
    match value.trim().parse::<u32>() {
        Ok(page) => Some(page),
        Err(_) => {
            log::debug!("ignoring non-numeric page parameter {:?}", value);
            None
        }
    }
}

/// Query string with every `page` parameter removed, other segments verbatim
pub fn without_page(search: &str) -> String {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| {
            let key = segment.split_once('=').map_or(*segment, |(k, _)| k);
            !is_page_key(key)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `{path}?page={page}&{rest}` for the listing page to fetch
pub fn page_url(path: &str, search: &str, page: u32) -> String {
    let rest = without_page(search);
    if rest.is_empty() {
        format!("{}?{}={}", path, PAGE_PARAM, page)
    } else {
        format!("{}?{}={}&{}", path, PAGE_PARAM, page, rest)
    }
}
