//! Name ordering for the selected-zone list.
//!
//! Case-insensitive first. Russian collation also sorts `ё` alongside `е`.
//! Names equal under that comparison put lowercase before uppercase, and
//! plain code-point order breaks whatever tie remains so the ordering
//! stays total.

use std::cmp::Ordering;

/// Ordering rules picked from a locale tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Collation {
    #[default]
    Russian,
    Generic,
}

impl Collation {
    /// `ru`, `ru-RU`, `ru_RU`... are Russian; anything else is generic.
    pub fn for_locale(tag: &str) -> Self {
        let language = tag.split(['-', '_']).next().unwrap_or_default();
        if language.eq_ignore_ascii_case("ru") {
            Collation::Russian
        } else {
            Collation::Generic
        }
    }

    pub fn compare(self, a: &str, b: &str) -> Ordering {
        let fold = |c: char| {
            c.to_lowercase().map(move |l| match (self, l) {
                (Collation::Russian, 'ё') => 'е',
                (_, other) => other,
            })
        };
        let primary = a.chars().flat_map(fold).cmp(b.chars().flat_map(fold));
        let case = a
            .chars()
            .map(char::is_uppercase)
            .cmp(b.chars().map(char::is_uppercase));
        primary.then(case).then_with(|| a.cmp(b))
    }
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    Collation::Russian.compare(a, b)
}
