use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// First line of every LoLdle share message.
pub const LOLDLE_HEADER: &str = "I've completed all the modes of #LoLdle today:";

/// Glyph appended to a category line when its bonus was guessed correctly.
pub const CHECKMARK: &str = "✓";

/// The five LoLdle game modes. Names match the labels used in share messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, AsRefStr,
)]
pub enum Category {
    Classic,
    Quote,
    Ability,
    Emoji,
    Splash,
}

impl Category {
    /// Whether the category carries an additional bonus check.
    pub fn has_bonus(self) -> bool {
        matches!(self, Category::Ability | Category::Splash)
    }
}

/// Summary of a single game of LoLdle: guesses per category plus the bonus checks.
///
/// Guess counts are always at least 1 once the result has passed the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoldleResult {
    pub classic: i64,
    pub quote: i64,
    pub ability: i64,
    pub ability_check: bool,
    pub emoji: i64,
    pub splash: i64,
    pub splash_check: bool,
}

impl LoldleResult {
    pub fn guesses(&self, category: Category) -> i64 {
        match category {
            Category::Classic => self.classic,
            Category::Quote => self.quote,
            Category::Ability => self.ability,
            Category::Emoji => self.emoji,
            Category::Splash => self.splash,
        }
    }

    /// Bonus check for the category. Categories without a bonus always report `false`.
    pub fn checked(&self, category: Category) -> bool {
        match category {
            Category::Ability => self.ability_check,
            Category::Splash => self.splash_check,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn category_names_round_trip() {
        for category in Category::iter() {
            assert_eq!(Category::from_str(category.as_ref()).unwrap(), category);
        }
    }

    #[test]
    fn category_lookup_is_case_sensitive() {
        assert!(Category::from_str("classic").is_err());
        assert!(Category::from_str("Classic").is_ok());
    }

    #[test]
    fn only_ability_and_splash_have_bonus() {
        let bonus: Vec<Category> = Category::iter().filter(|c| c.has_bonus()).collect();
        assert_eq!(bonus, vec![Category::Ability, Category::Splash]);
    }

    #[test]
    fn checked_ignores_categories_without_bonus() {
        let result = LoldleResult {
            classic: 1,
            quote: 1,
            ability: 1,
            ability_check: true,
            emoji: 1,
            splash: 1,
            splash_check: false,
        };

        assert!(result.checked(Category::Ability));
        assert!(!result.checked(Category::Splash));
        assert!(!result.checked(Category::Classic));
    }
}
