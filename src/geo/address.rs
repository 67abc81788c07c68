//! Address normalization
//!
//! Strips the local (apartment / suite) number from a street address before
//! it is sent to the geocoder: "Foo 12/3" becomes "Foo 12".

use regex::Regex;
use std::sync::LazyLock;

/// Street number with an optional letter, then a slash and up to three digits
static LOCAL_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}\p{L}?)\s*/\s*\d{0,3}").expect("local number pattern is valid")
});

/// Remove the local unit number from an address
///
/// The street number (and its letter suffix, if any) is kept. Addresses
/// without a local number are returned unchanged.
///
/// The rewrite is repeated until the address stops changing, so the result
/// is a fixed point: `normalize(&normalize(x)) == normalize(x)`. Every pass
/// that changes the string removes at least one `/`, which bounds the loop.
pub fn normalize(address: &str) -> String {
    let mut current = address.to_string();
    loop {
        let next = LOCAL_NUMBER.replace_all(&current, "$1");
        if next == current {
            return current;
        }
        current = next.into_owned();
    }
}
