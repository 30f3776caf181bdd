//! URL slug helpers for product and category paths.

/// Build a product slug from its display name.
///
/// Lowercases the name, drops everything except ASCII letters, digits,
/// whitespace and `-`, turns whitespace runs into `-` and collapses repeated
/// dashes. Non-ASCII letters are dropped rather than transliterated, so
/// `"Saç Bandı"` becomes `"sa-band"`.
///
/// ```
/// use bazaar_core::slugify;
///
/// assert_eq!(slugify("Gold Series Hoodie"), "gold-series-hoodie");
/// assert_eq!(slugify("Oversize  T-Shirt!"), "oversize-t-shirt");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = false;

    for c in name.to_lowercase().chars() {
        let c = if c.is_whitespace() {
            '-'
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            c
        } else {
            continue;
        };

        if c == '-' {
            if last_was_dash {
                continue;
            }
            last_was_dash = true;
        } else {
            last_was_dash = false;
        }
        slug.push(c);
    }

    slug
}

/// Normalise a category label into its path segment.
///
/// Lowercases, maps `_` to `-` and replaces each whitespace run with a
/// single `-`.
///
/// ```
/// use bazaar_core::category_slug;
///
/// assert_eq!(category_slug("Sac_Bandi"), "sac-bandi");
/// assert_eq!(category_slug("Gold  Series"), "gold-series");
/// ```
#[must_use]
pub fn category_slug(category: &str) -> String {
    let mut slug = String::with_capacity(category.len());
    let mut in_whitespace = false;

    for c in category.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        slug.push(if c == '_' { '-' } else { c });
    }

    slug
}
