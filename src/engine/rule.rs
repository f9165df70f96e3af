use std::sync::OnceLock;

/// One entry per (cell state, live neighbor count) pair
const ENTRIES: usize = 2 * 9;
type LifeRule = [bool; ENTRIES];

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_life_rule`] once and storing the result
fn life_rule() -> &'static LifeRule {
    static CELL: OnceLock<LifeRule> = OnceLock::new();
    CELL.get_or_init(generate_life_rule)
}

/// Creates a lookup table for the Game of Life ruleset
///
/// The table is indexed by the live neighbor count in `[0, 8]`, offset by 9
/// when the center cell is alive.
///
/// Returns whether the center cell should be alive or dead in its arrangement
fn generate_life_rule() -> LifeRule {
    let mut rule = [false; ENTRIES];
    for (i, entry) in rule.iter_mut().enumerate() {
        let alive = i >= 9;
        let neighbors = i % 9;
        *entry = matches!((alive, neighbors), (true, 2) | (_, 3));
    }
    rule
}

/// The state of the center cell in the next generation, given its current
/// state and live neighbor count.
#[inline]
pub(super) fn next_state(alive: bool, neighbors: u8) -> bool {
    debug_assert!(neighbors <= 8, "more neighbors than a Moore neighborhood");
    life_rule()[usize::from(alive) * 9 + neighbors as usize]
}
