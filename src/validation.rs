//! Form validation and sanitization
//!
//! A submission is checked against an ordered list of [`FieldRule`]s. Every
//! declared field is trimmed and HTML-escaped exactly once, whatever the
//! outcome of its checks, so rejected forms can echo back what was typed.
//! Checks see the trimmed (unescaped) value and stop at the first failure,
//! giving at most one [`Violation`] per field.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use validator::ValidateLength;

/// Raw `application/x-www-form-urlencoded` pairs, repeated keys preserved
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for FormData {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
enum Check {
    NotEmpty,
    MinLength(u64),
    MaxLength(u64),
    Alphanumeric,
    Integer,
    IsoDate,
    OneOf(&'static [&'static str]),
}

impl Check {
    fn passes(&self, value: &str) -> bool {
        match self {
            Check::NotEmpty => !value.is_empty(),
            Check::MinLength(min) => value.validate_length(Some(*min), None, None),
            Check::MaxLength(max) => value.validate_length(None, Some(*max), None),
            Check::Alphanumeric => !value.is_empty() && value.chars().all(char::is_alphanumeric),
            Check::Integer => value.parse::<i32>().is_ok(),
            Check::IsoDate => parse_iso_date(value).is_some(),
            Check::OneOf(allowed) => allowed.contains(&value),
        }
    }
}

/// Sanitization and checks for one submitted field
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    optional: bool,
    to_date: bool,
    checks: Vec<(Check, &'static str)>,
}

/// Start a rule for `name`; the field is always trimmed and escaped
pub fn field(name: &'static str) -> FieldRule {
    FieldRule {
        field: name,
        optional: false,
        to_date: false,
        checks: Vec::new(),
    }
}

impl FieldRule {
    /// Skip all checks when the value is empty or missing
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn not_empty(mut self, message: &'static str) -> Self {
        self.checks.push((Check::NotEmpty, message));
        self
    }

    pub fn min_length(mut self, min: u64, message: &'static str) -> Self {
        self.checks.push((Check::MinLength(min), message));
        self
    }

    pub fn max_length(mut self, max: u64, message: &'static str) -> Self {
        self.checks.push((Check::MaxLength(max), message));
        self
    }

    pub fn alphanumeric(mut self, message: &'static str) -> Self {
        self.checks.push((Check::Alphanumeric, message));
        self
    }

    /// Value must be a store identifier
    pub fn integer(mut self, message: &'static str) -> Self {
        self.checks.push((Check::Integer, message));
        self
    }

    pub fn iso_date(mut self, message: &'static str) -> Self {
        self.checks.push((Check::IsoDate, message));
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str], message: &'static str) -> Self {
        self.checks.push((Check::OneOf(allowed), message));
        self
    }

    /// Coerce the value to a calendar date once the checks passed
    pub fn to_date(mut self) -> Self {
        self.to_date = true;
        self
    }

    fn apply(&self, form: &FormData, out: &mut Sanitized) {
        if !form.contains(self.field) {
            tracing::debug!(
                field = self.field,
                "Rule declared for a field absent from the submission"
            );
        }

        let raw: Vec<&str> = form.get_all(self.field).collect();
        let trimmed: Vec<&str> = if raw.is_empty() {
            vec![""]
        } else {
            raw.iter().map(|v| v.trim()).collect()
        };

        let mut failed = None;
        let mut date = None;
        for value in &trimmed {
            if self.optional && value.is_empty() {
                continue;
            }
            if let Some((_, message)) = self.checks.iter().find(|(check, _)| !check.passes(value)) {
                failed = Some(*message);
                break;
            }
            if self.to_date && date.is_none() {
                date = parse_iso_date(value);
            }
        }

        match failed {
            Some(message) => out.violations.push(Violation {
                field: self.field.to_string(),
                message: message.to_string(),
            }),
            None => {
                if let Some(date) = date {
                    out.dates.insert(self.field, date);
                }
            }
        }

        let escaped = if raw.is_empty() {
            Vec::new()
        } else {
            trimmed.iter().map(|v| escape(v)).collect()
        };
        out.values.insert(self.field, escaped);
    }
}

/// Outcome of running a rule set over a submission
#[derive(Debug, Clone, Default)]
pub struct Sanitized {
    values: HashMap<&'static str, Vec<String>>,
    dates: HashMap<&'static str, NaiveDate>,
    violations: Vec<Violation>,
}

impl Sanitized {
    /// First sanitized value of a declared field, empty when not submitted
    pub fn value(&self, field: &str) -> String {
        self.values
            .get(field)
            .and_then(|v| v.first())
            .cloned()
            .unwrap_or_default()
    }

    pub fn values(&self, field: &str) -> Vec<String> {
        self.values.get(field).cloned().unwrap_or_default()
    }

    /// Coerced date, present only when the field passed its date check
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.dates.get(field).copied()
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Run `rules` in order over `form`
pub fn check(form: &FormData, rules: &[FieldRule]) -> Sanitized {
    let mut out = Sanitized::default();
    for rule in rules {
        rule.apply(form, &mut out);
    }
    out
}

/// HTML-escape a value for safe re-display
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}
