//! Static type-effectiveness table used for display only

/// Types a given type hits hard, and types it is vulnerable to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effectiveness {
    pub strong: &'static [&'static str],
    pub weak: &'static [&'static str],
}

const TABLE: [(&str, Effectiveness); 4] = [
    (
        "Fire",
        Effectiveness {
            strong: &["Grass", "Ice", "Bug", "Steel"],
            weak: &["Water", "Rock", "Ground"],
        },
    ),
    (
        "Water",
        Effectiveness {
            strong: &["Fire", "Rock", "Ground"],
            weak: &["Electric", "Grass"],
        },
    ),
    (
        "Grass",
        Effectiveness {
            strong: &["Water", "Rock", "Ground"],
            weak: &["Fire", "Ice", "Bug", "Flying"],
        },
    ),
    (
        "Electric",
        Effectiveness {
            strong: &["Water", "Flying"],
            weak: &["Ground"],
        },
    ),
];

/// Exact, case-sensitive lookup. Unlisted types have no entry.
pub fn lookup(pokemon_type: &str) -> Option<&'static Effectiveness> {
    TABLE
        .iter()
        .find(|(name, _)| *name == pokemon_type)
        .map(|(_, effectiveness)| effectiveness)
}

/// Labels present in the table, in table order
pub fn known_types() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|(name, _)| *name)
}
