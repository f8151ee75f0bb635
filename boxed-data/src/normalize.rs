//! Object-name cleanup.
//!
//! Raw object IDs in the pick-place files carry clone markers and numeric
//! instance suffixes (e.g. `"010 potted meat can(Clone)-29932"`). The
//! canonical name is the prefix before the first such delimiter; it is the
//! join key used to match objects to their trajectory files.

/// Strip clone markers and instance-ID suffixes from a raw object name.
///
/// Truncates at the first `(` or `-`, whichever comes first. A delimiter in
/// the leading position would produce an empty name, so in that case the
/// other delimiter is used instead (or the name is kept whole if there is
/// none). Pure string function, no external state.
///
/// `"010 box(clone)-29932"` becomes `"010 box"`.
pub fn canonical_name(raw: &str) -> &str {
    let paren = raw.find('(');
    let dash = raw.find('-');

    let (smaller, larger) = match (paren, dash) {
        (Some(p), Some(d)) => (p.min(d), p.max(d)),
        (Some(p), None) => (p, raw.len()),
        (None, Some(d)) => (d, raw.len()),
        (None, None) => return raw,
    };

    let cut = if smaller == 0 { larger } else { smaller };
    &raw[..cut]
}
