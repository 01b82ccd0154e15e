//! Shared fixtures for unit tests.

use roster::Roster;

/// Build a roster from `(canonical name, extra aliases)` pairs.
pub(crate) fn roster(entries: &[(&str, &[&str])]) -> Roster {
    let mut roster = Roster::new();
    for (name, aliases) in entries {
        roster
            .add_character(*name, aliases.iter().copied())
            .expect("fixture roster is valid");
    }
    roster
}

/// A roster whose aliases are exactly the given strings, each its own character
/// unless grouped by slot.
pub(crate) fn alias_roster(characters: &[&str], aliases: &[(&str, usize)]) -> Roster {
    let index = roster::AliasIndex::from_pairs(aliases.iter().copied()).expect("fixture aliases are valid");
    Roster::from_parts(characters.iter().map(|c| c.to_string()).collect(), index)
        .expect("fixture slots are valid")
}
