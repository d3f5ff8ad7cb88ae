//! Car identifiers: official three-letter prefixes and mod skin ids.
//!
//! A car id is four bytes. Official cars use three ASCII alphanumerics and a
//! NUL (`XFG\0`); mods use any other three non-zero bytes, shown as six hex
//! digits.

fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Returns `true` if `id` (little-endian car id) is usable as a mod id.
///
/// The first three bytes must be non-zero and the fourth zero, and ids made
/// of three alphanumerics are reserved for official cars.
pub fn is_valid_mod_id(id: u32) -> bool {
    let [a, b, c, d] = id.to_le_bytes();
    if a == 0 || b == 0 || c == 0 || d != 0 {
        return false;
    }
    !(is_alnum(a) && is_alnum(b) && is_alnum(c))
}

pub fn is_official_prefix(prefix: &[u8; 4]) -> bool {
    prefix[..3].iter().all(|&b| is_alnum(b)) && prefix[3] == 0
}

/// Display form of a car id: the prefix itself for official cars, otherwise
/// the id as six upper-case hex digits. `None` if the fourth byte is set.
pub fn expand_prefix(prefix: &[u8; 4]) -> Option<String> {
    if prefix[3] != 0 {
        return None;
    }
    if is_official_prefix(prefix) {
        return Some(String::from_utf8_lossy(&prefix[..3]).into_owned());
    }
    Some(format!("{:06X}", u32::from_le_bytes(*prefix)))
}
