//! Elo change for a single LoLdle result.
//!
//! Gains follow the distribution table below, where columns are the number of guesses needed
//! for a category:
//!
//! |         |  1 |  2 |  3 |  4 |  5 |
//! | ------- | -: | -: | -: | -: | -: |
//! | Classic | +4 | +4 | +2 | -2 | -4 |
//! | Quote   | +4 | +2 | -2 | -4 |    |
//! | Ability | +4 | -2 |    |    |    |
//! | Emoji   | +4 | +2 | -2 | -4 |    |
//! | Splash  | +4 | +2 | -2 | -4 |    |
//!
//! Categories needing more guesses than listed net -4 each. A correct ability or splash bonus
//! nets +2 each.

use strum::IntoEnumIterator;

use super::models::{Category, LoldleResult};

/// Score for any category whose guess count exceeds its table row.
pub const OVER_LIMIT: i64 = -4;

/// Score for a correctly guessed bonus check.
pub const BONUS: i64 = 2;

const CLASSIC: &[i64] = &[4, 4, 2, -2, -4];
const LINEAR: &[i64] = &[4, 2, -2, -4];
const ABILITY: &[i64] = &[4, -2];

fn table(category: Category) -> &'static [i64] {
    match category {
        Category::Classic => CLASSIC,
        Category::Ability => ABILITY,
        Category::Quote | Category::Emoji | Category::Splash => LINEAR,
    }
}

/// Points for needing `guesses` attempts in `category`. `guesses` is 1-indexed.
pub fn category_score(category: Category, guesses: i64) -> i64 {
    let row = table(category);
    guesses
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| row.get(index))
        .copied()
        .unwrap_or(OVER_LIMIT)
}

/// Total Elo change for a result, bonuses included.
pub fn elo_change(result: &LoldleResult) -> i64 {
    Category::iter()
        .map(|category| {
            let bonus = if result.checked(category) { BONUS } else { 0 };
            category_score(category, result.guesses(category)) + bonus
        })
        .sum()
}
