use tons_of_stats::loldle::{Category, LoldleResult, CHECKMARK, LOLDLE_HEADER};

// ============================================================================
// Share Message Builder
// ============================================================================

fn emoji(category: Category) -> &'static str {
    match category {
        Category::Classic => "❓",
        Category::Quote => "💬",
        Category::Ability => "🔥",
        Category::Emoji => "😃",
        Category::Splash => "🎨",
    }
}

/// Renders results the way the LoLdle share button formats them.
pub struct ResultMessageBuilder {
    result: LoldleResult,
    order: Vec<Category>,
    footer: bool,
}

impl ResultMessageBuilder {
    pub fn new(result: LoldleResult) -> Self {
        Self {
            result,
            order: vec![
                Category::Classic,
                Category::Quote,
                Category::Ability,
                Category::Emoji,
                Category::Splash,
            ],
            footer: false,
        }
    }

    /// Uniform result with the same number of guesses in every category.
    pub fn uniform(guesses: i64) -> Self {
        Self::new(LoldleResult {
            classic: guesses,
            quote: guesses,
            ability: guesses,
            ability_check: false,
            emoji: guesses,
            splash: guesses,
            splash_check: false,
        })
    }

    pub fn with_order(mut self, order: Vec<Category>) -> Self {
        self.order = order;
        self
    }

    pub fn with_footer(mut self) -> Self {
        self.footer = true;
        self
    }

    pub fn result(&self) -> LoldleResult {
        self.result
    }

    pub fn build(&self) -> String {
        let mut msg = String::from(LOLDLE_HEADER);

        for &category in &self.order {
            msg.push('\n');
            msg.push_str(&format!(
                "{} {}: {}",
                emoji(category),
                category.as_ref(),
                self.result.guesses(category)
            ));
            if self.result.checked(category) {
                msg.push(' ');
                msg.push_str(CHECKMARK);
            }
        }

        if self.footer {
            msg.push_str("\n\nhttps://loldle.net");
        }

        msg
    }
}
