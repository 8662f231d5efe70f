use serde::{Deserialize, Serialize};

/// One structured ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Quantity, or `None` when the line carries no recognizable amount.
    pub count: Option<f64>,
    /// Normalized unit, empty when absent.
    pub unit: String,
    pub ingredient: String,
}

impl Ingredient {
    pub fn new(count: Option<f64>, unit: impl Into<String>, ingredient: impl Into<String>) -> Self {
        Self {
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        }
    }

    /// Multiply the count by `factor`. Missing counts stay missing.
    pub fn scale(&mut self, factor: f64) {
        if let Some(count) = self.count.as_mut() {
            *count *= factor;
        }
    }
}

/// Unit spellings and the short form they normalize to.
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("g", "g"),
    ("milliliters", "ml"),
    ("millilitres", "ml"),
    ("ml", "ml"),
    ("liters", "l"),
    ("litres", "l"),
];

const FRACTION_GLYPHS: &[(char, f64)] = &[
    ('½', 1.0 / 2.0),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 1.0 / 4.0),
    ('¾', 3.0 / 4.0),
    ('⅕', 1.0 / 5.0),
    ('⅖', 2.0 / 5.0),
    ('⅗', 3.0 / 5.0),
    ('⅘', 4.0 / 5.0),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 1.0 / 8.0),
    ('⅜', 3.0 / 8.0),
    ('⅝', 5.0 / 8.0),
    ('⅞', 7.0 / 8.0),
];

/// Normalize a unit token, case-insensitively and ignoring a trailing `.` or `,`.
/// Returns `None` for anything that is not a known unit.
pub fn normalize_unit(token: &str) -> Option<&'static str> {
    let lower = token.trim_end_matches(&['.', ','][..]).to_lowercase();
    UNIT_SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == lower)
        .map(|(_, unit)| *unit)
}

/// Parse a free-text ingredient line into count, unit and name.
///
/// A leading amount followed by a unit yields both. An amount without a unit
/// keeps the remaining words as the name. A leading unit without an amount
/// yields a missing count. Anything else falls back to the whole line as the
/// name with no count and no unit.
pub fn parse_ingredient(line: &str) -> Ingredient {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Ingredient::new(None, "", "");
    };

    if let Some((count, used)) = leading_amount(&tokens) {
        let rest = &tokens[used..];
        return match rest.first().and_then(|t| normalize_unit(t)) {
            Some(unit) => Ingredient::new(Some(count), unit, rest[1..].join(" ")),
            None => Ingredient::new(Some(count), "", rest.join(" ")),
        };
    }

    match normalize_unit(first) {
        Some(unit) if tokens.len() > 1 => Ingredient::new(None, unit, tokens[1..].join(" ")),
        _ => Ingredient::new(None, "", line.trim()),
    }
}

/// Parse all lines, preserving order.
pub fn parse_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<Ingredient> {
    lines.iter().map(|l| parse_ingredient(l.as_ref())).collect()
}

/// Amount at the start of the token list and the number of tokens it spans.
/// Handles a whole number followed by a fraction token ("1 1/2", "2 ½").
fn leading_amount(tokens: &[&str]) -> Option<(f64, usize)> {
    let first = parse_amount(tokens.first()?)?;

    if tokens[0].chars().all(|c| c.is_ascii_digit()) {
        if let Some(fraction) = tokens.get(1).and_then(|t| parse_fraction(t)) {
            return Some((first + fraction, 2));
        }
    }

    Some((first, 1))
}

/// Parse one amount token: number, decimal, fraction, glyph, or an "a-b" range
/// (averaged).
fn parse_amount(token: &str) -> Option<f64> {
    if let Some((low, high)) = token.split_once('-') {
        let low = parse_simple_amount(low)?;
        let high = parse_simple_amount(high)?;
        return Some((low + high) / 2.0);
    }
    parse_simple_amount(token)
}

fn parse_simple_amount(token: &str) -> Option<f64> {
    let last = token.chars().last()?;

    // "½" or "1½"
    if let Some(glyph) = glyph_value(last) {
        let whole = &token[..token.len() - last.len_utf8()];
        if whole.is_empty() {
            return Some(glyph);
        }
        return parse_decimal(whole).map(|w| w + glyph);
    }

    if token.contains('/') {
        return parse_fraction(token);
    }

    parse_decimal(token)
}

/// A standalone fraction: "3/4" or a single glyph.
fn parse_fraction(token: &str) -> Option<f64> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return glyph_value(c);
    }

    let (num, den) = token.split_once('/')?;
    let num = parse_decimal(num)?;
    let den = parse_decimal(den)?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

fn parse_decimal(s: &str) -> Option<f64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse().ok()
}

fn glyph_value(c: char) -> Option<f64> {
    FRACTION_GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| *value)
}
