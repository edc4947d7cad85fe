use std::str::FromStr;

use tracing::{debug, instrument, warn};

use super::errors::ParseError;
use super::models::{Category, LoldleResult, CHECKMARK, LOLDLE_HEADER};

/// Number of category lines following the header.
const CATEGORY_LINES: usize = 5;

/// Reports whether `msg` may be parsed into a [`LoldleResult`].
///
/// Only baseline validation is performed, so [`parse`] may still fail when this returns `true`.
/// The opposite does not hold: if this returns `false`, the message can not be parsed.
pub fn can_parse(msg: &str) -> bool {
    let mut lines = msg.lines();

    if lines.next() != Some(LOLDLE_HEADER) {
        debug!("Message does not start with the LoLdle header");
        return false;
    }

    let categories = lines.filter(|line| !line.trim().is_empty()).count();
    if categories < CATEGORY_LINES {
        debug!(
            want = CATEGORY_LINES,
            got = categories,
            "Message too short for a LoLdle result"
        );
        return false;
    }

    true
}

/// A single category line split into its parts.
#[derive(Debug)]
struct CategoryLine<'a> {
    name: &'a str,
    value: &'a str,
    checked: bool,
}

fn split_line(line: &str) -> Result<CategoryLine<'_>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    // emoji, "<Category>:", value, optional checkmark
    if fields.len() < 3 {
        warn!(line = %line, "Invalid message segment");
        return Err(ParseError::MalformedMessage(format!(
            "expected at least 3 fields in line {line:?}"
        )));
    }

    let name = fields[1].strip_suffix(':').ok_or_else(|| {
        warn!(token = %fields[1], "Category name without trailing colon");
        ParseError::MalformedMessage(format!("invalid category token {:?}", fields[1]))
    })?;

    Ok(CategoryLine {
        name,
        value: fields[2],
        checked: fields.get(3) == Some(&CHECKMARK),
    })
}

fn parse_guesses(category: Category, value: &str) -> Result<i64, ParseError> {
    // Only ASCII digits are allowed, which also rules out negative values.
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        warn!(category = category.as_ref(), value = %value, "Illegal value");
        return Err(ParseError::MalformedMessage(format!(
            "illegal value {value:?} for {}",
            category.as_ref()
        )));
    }

    let guesses = value.parse::<i64>().map_err(|e| {
        warn!(category = category.as_ref(), value = %value, error = %e, "Conversion failed");
        ParseError::InternalConversion(format!("{value:?} for {}: {e}", category.as_ref()))
    })?;

    if guesses == 0 {
        warn!(category = category.as_ref(), "Illegal value of zero guesses");
        return Err(ParseError::MalformedMessage(format!(
            "zero guesses for {}",
            category.as_ref()
        )));
    }

    Ok(guesses)
}

/// Accumulates category values in any order and rejects repeats.
#[derive(Debug, Default)]
struct ResultBuilder {
    classic: Option<i64>,
    quote: Option<i64>,
    ability: Option<i64>,
    emoji: Option<i64>,
    splash: Option<i64>,
    ability_check: bool,
    splash_check: bool,
}

impl ResultBuilder {
    fn slot(&mut self, category: Category) -> &mut Option<i64> {
        match category {
            Category::Classic => &mut self.classic,
            Category::Quote => &mut self.quote,
            Category::Ability => &mut self.ability,
            Category::Emoji => &mut self.emoji,
            Category::Splash => &mut self.splash,
        }
    }

    fn set(&mut self, category: Category, guesses: i64, checked: bool) -> Result<(), ParseError> {
        let slot = self.slot(category);
        if slot.is_some() {
            warn!(category = category.as_ref(), "Duplicate category");
            return Err(ParseError::MalformedMessage(format!(
                "duplicate category {}",
                category.as_ref()
            )));
        }
        *slot = Some(guesses);

        match category {
            Category::Ability => self.ability_check = checked,
            Category::Splash => self.splash_check = checked,
            _ => {}
        }

        Ok(())
    }

    fn build(self) -> Result<LoldleResult, ParseError> {
        let missing = || ParseError::MalformedMessage("missing category".to_string());

        Ok(LoldleResult {
            classic: self.classic.ok_or_else(missing)?,
            quote: self.quote.ok_or_else(missing)?,
            ability: self.ability.ok_or_else(missing)?,
            ability_check: self.ability_check,
            emoji: self.emoji.ok_or_else(missing)?,
            splash: self.splash.ok_or_else(missing)?,
            splash_check: self.splash_check,
        })
    }
}

/// Parses a LoLdle share message into a [`LoldleResult`].
#[instrument(skip(msg))]
pub fn parse(msg: &str) -> Result<LoldleResult, ParseError> {
    if !can_parse(msg) {
        return Err(ParseError::MalformedMessage(
            "not a LoLdle result message".to_string(),
        ));
    }

    let mut builder = ResultBuilder::default();

    // The header is followed directly by the five category lines.
    for (i, line) in msg.lines().skip(1).take(CATEGORY_LINES).enumerate() {
        debug!(index = i, line = %line, "Parsing line");

        let parts = split_line(line)?;
        let category = Category::from_str(parts.name).map_err(|_| {
            warn!(category = %parts.name, "Message contains invalid category");
            ParseError::MalformedMessage(format!("unknown category {:?}", parts.name))
        })?;

        let guesses = parse_guesses(category, parts.value)?;
        builder.set(category, guesses, parts.checked)?;
    }

    let result = builder.build()?;
    debug!(?result, "Message parsed");
    Ok(result)
}
