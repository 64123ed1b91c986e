//! Environment variable validation with helpful warnings
//!
//! Provides consistent validation for flag values with:
//! - A `ConfigWarning` for every invalid value
//! - Levenshtein-based typo suggestions
//! - Fallback to default values

use crate::domain::value_objects::{ConfigWarning, WarningKind};

/// Accepted spellings for boolean flags.
pub const FLAG_VALUES: &[&str] = &["true", "false", "1", "0", "yes", "no", "on", "off"];

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, or describe why it was rejected.
    ///
    /// The rejection is also logged; callers decide which default applies.
    pub fn parse<T, F>(&self, value: &str, parser: F) -> Result<T, ConfigWarning>
    where
        F: Fn(&str) -> Option<T>,
    {
        if let Some(parsed) = parser(value) {
            return Ok(parsed);
        }

        let mut warning = ConfigWarning::new(
            WarningKind::InvalidFlag,
            format!(
                "invalid {} value '{}' (valid values: {})",
                self.var_name,
                value,
                self.valid_values.join(", ")
            ),
        )
        .with_source(self.var_name);
        if let Some(suggested) = self.suggest(value) {
            warning = warning.with_suggestion(suggested);
        }
        tracing::warn!(variable = self.var_name, "{warning}");
        Err(warning)
    }

    /// Suggest a valid value based on Levenshtein distance
    fn suggest(&self, value: &str) -> Option<&'a str> {
        let input = value.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for &valid in self.valid_values {
            let dist = levenshtein(&input, valid);
            match best {
                None => best = Some((valid, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((valid, dist)),
                _ => {}
            }
        }

        // Only suggest if distance is reasonable (≤ 2 edits)
        match best {
            Some((suggested, dist)) if dist <= 2 && dist > 0 => Some(suggested),
            _ => None,
        }
    }
}

/// Interpret a boolean flag spelling.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
