use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::currency::{Currency, DEFAULT_BASE_CURRENCY, DEFAULT_LINE_CURRENCY};
use super::error::{FieldErrors, InvoiceError};
use super::types::Invoice;
use super::validation;

/// A date as it arrives from the input layer.
///
/// Only the calendar date written in the value is kept. A date-time with
/// an offset resolves to its date in that offset, never shifted to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawDate {
    /// `YYYY-MM-DD`
    Date(NaiveDate),
    /// RFC 3339 date-time with offset, e.g. `2024-01-15T00:00:00+13:00`.
    DateTime(DateTime<FixedOffset>),
    /// Date-time without offset, e.g. `2024-01-15T00:00:00`.
    Local(NaiveDateTime),
    /// Any other string; resolved by parsing and usually invalid.
    Text(String),
    /// A JSON value that is not a string at all. Never resolves.
    Other(Value),
}

impl RawDate {
    /// Calendar date carried by this value, if it has one.
    pub fn resolve(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date_naive()),
            Self::Local(dt) => Some(dt.date()),
            Self::Text(s) => parse_date_text(s.trim()),
            Self::Other(_) => None,
        }
    }

    fn from_text(s: String) -> Self {
        if let Ok(d) = s.parse::<NaiveDate>() {
            Self::Date(d)
        } else if let Ok(dt) = s.parse::<DateTime<FixedOffset>>() {
            Self::DateTime(dt)
        } else if let Ok(dt) = s.parse::<NaiveDateTime>() {
            Self::Local(dt)
        } else {
            Self::Text(s)
        }
    }
}

impl<'de> Deserialize<'de> for RawDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::from_text(s),
            other => Self::Other(other),
        })
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

impl From<NaiveDate> for RawDate {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for RawDate {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDateTime> for RawDate {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Local(dt)
    }
}

impl From<&str> for RawDate {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawDate {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A text field as entered. JSON `null` reads as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    /// Not a string, e.g. `"currency": 5`.
    Invalid(Value),
}

impl RawText {
    /// The text, unless the value had the wrong type.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Invalid(_) => None,
        }
    }
}

impl Default for RawText {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl<'de> Deserialize<'de> for RawText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::Text(s),
            Value::Null => Self::default(),
            other => Self::Invalid(other),
        })
    }
}

impl From<&str> for RawText {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawText {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// An amount as entered.
///
/// JSON numbers and numeric strings both read as [`RawAmount::Number`].
/// A blank string, a number outside the decimal range and any other type
/// are kept as [`RawAmount::Invalid`] so validation can say what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(Decimal),
    Invalid(Value),
}

impl RawAmount {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(d) => Some(*d),
            Self::Invalid(_) => None,
        }
    }

    fn from_value(value: Value) -> Self {
        let parsed = match &value {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };
        parsed.map_or(Self::Invalid(value), Self::Number)
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl From<Decimal> for RawAmount {
    fn from(d: Decimal) -> Self {
        Self::Number(d)
    }
}

/// JSON type name used in type mismatch messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `lines` that is missing, `null` or not an array reads as no lines. An
/// element that is not a line object reads as a blank, unset line.
fn lenient_lines<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<LineDraft>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// One line as entered, before validation.
///
/// `amount: None` means "not entered yet", which is a different failure
/// from an entered zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDraft {
    #[serde(default)]
    pub description: RawText,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default)]
    pub currency: Option<RawText>,
}

impl LineDraft {
    pub fn new(description: impl Into<String>, amount: Decimal, currency: Currency) -> Self {
        Self {
            description: RawText::Text(description.into()),
            amount: Some(RawAmount::Number(amount)),
            currency: Some(currency.code().into()),
        }
    }

    /// Empty description, no amount, default line currency.
    pub fn blank() -> Self {
        Self {
            description: RawText::default(),
            amount: None,
            currency: Some(DEFAULT_LINE_CURRENCY.code().into()),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = RawText::Text(description.into());
        self
    }

    pub fn amount(mut self, amount: Option<Decimal>) -> Self {
        self.amount = amount.map(RawAmount::Number);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency.code().into());
        self
    }

    /// Set the currency from an arbitrary token; checked during validation.
    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(RawText::Text(code.into()));
        self
    }
}

/// An invoice as entered, possibly incomplete or invalid.
///
/// Missing fields stay unset; validation never fills them in.
///
/// ```
/// use chrono::NaiveDate;
/// use invoice_total::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceDraft::new()
///     .date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .currency(Currency::Nzd)
///     .add_line(LineDraft::new("Consulting", dec!(100.50), Currency::Usd))
///     .validate()
///     .unwrap();
///
/// assert_eq!(invoice.lines().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    #[serde(default)]
    pub date: Option<RawDate>,
    #[serde(default)]
    pub currency: Option<RawText>,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub lines: Vec<LineDraft>,
}

impl InvoiceDraft {
    /// A draft with every field unset and no lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial state of an input form: `today`, the default base
    /// currency and one blank line.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            date: Some(RawDate::Date(today)),
            currency: Some(DEFAULT_BASE_CURRENCY.code().into()),
            lines: vec![LineDraft::blank()],
        }
    }

    /// Read a draft from JSON. Absent fields are left unset.
    ///
    /// Only malformed JSON or a top level that is not an object fails here.
    /// A field of the wrong type is kept as entered and reported by
    /// [`validate`](Self::validate) under its own path.
    pub fn from_json(json: &str) -> Result<Self, InvoiceError> {
        serde_json::from_str(json).map_err(|e| InvoiceError::Json(e.to_string()))
    }

    pub fn date(mut self, date: impl Into<RawDate>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency.code().into());
        self
    }

    /// Set the base currency from an arbitrary token; checked during validation.
    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(RawText::Text(code.into()));
        self
    }

    pub fn add_line(mut self, line: LineDraft) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_blank_line(&mut self) {
        self.lines.push(LineDraft::blank());
    }

    /// Remove the line at `index`. The last remaining line is never
    /// removed; returns whether a line was removed.
    pub fn remove_line(&mut self, index: usize) -> bool {
        if self.lines.len() <= 1 || index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        true
    }

    /// Shorthand for [`validate`](validation::validate).
    pub fn validate(&self) -> Result<Invoice, FieldErrors> {
        validation::validate(self)
    }
}
