use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use super::currency::{Currency, UnknownCurrency};
use super::draft::{InvoiceDraft, LineDraft, RawAmount, RawDate, RawText, json_kind};
use super::error::FieldErrors;
use super::types::{Invoice, LineItem};

/// Earliest accepted invoice date, inclusive.
pub const MIN_INVOICE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1999, 1, 4) {
    Some(d) => d,
    None => panic!("invalid minimum invoice date"),
};

/// Latest accepted invoice date, inclusive. Later dates have no
/// four-digit `YYYY-MM-DD` form.
pub const MAX_INVOICE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(d) => d,
    None => panic!("invalid maximum invoice date"),
};

/// User-facing validation messages.
pub mod messages {
    pub const DATE_REQUIRED: &str = "Date is required";
    pub const DATE_INVALID: &str = "Invalid date";
    pub const DATE_TOO_EARLY: &str = "Date must be after 1999-01-04";
    pub const CURRENCY_REQUIRED: &str = "Currency is required";
    pub const LINES_REQUIRED: &str = "At least one line item is required";
    pub const DESCRIPTION_REQUIRED: &str = "Description is required";
    pub const AMOUNT_REQUIRED: &str = "Amount is required";
    pub const AMOUNT_NOT_POSITIVE: &str = "Must be > 0";
    pub const AMOUNT_OUT_OF_RANGE: &str = "Amount is out of range";
}

use messages::*;

/// Validate a draft into an [`Invoice`].
///
/// Every field is checked independently and every failing field is
/// reported, including each offending line. Paths are `date`, `currency`,
/// `lines` and `lines[i].description` / `lines[i].amount` /
/// `lines[i].currency`.
pub fn validate(draft: &InvoiceDraft) -> Result<Invoice, FieldErrors> {
    let mut errors = FieldErrors::default();

    let date = check_date(draft.date.as_ref(), &mut errors);
    let currency = check_currency(draft.currency.as_ref(), "currency", &mut errors);

    if draft.lines.is_empty() {
        errors.push("lines", LINES_REQUIRED);
    }

    // Collect before folding into Option so every line gets checked.
    let lines: Option<Vec<LineItem>> = draft
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| check_line(line, &format!("lines[{i}]."), &mut errors))
        .collect::<Vec<_>>()
        .into_iter()
        .collect();

    match (date, currency, lines) {
        (Some(date), Some(currency), Some(lines)) if errors.is_empty() => {
            Ok(Invoice::new(date, currency, lines))
        }
        _ => {
            debug!(error_count = errors.len(), "invoice draft rejected");
            Err(errors)
        }
    }
}

/// Validate a single line on its own. Paths are `description`, `amount`
/// and `currency`.
pub fn validate_line(line: &LineDraft) -> Result<LineItem, FieldErrors> {
    let mut errors = FieldErrors::default();
    match check_line(line, "", &mut errors) {
        Some(item) if errors.is_empty() => Ok(item),
        _ => Err(errors),
    }
}

fn check_date(date: Option<&RawDate>, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let Some(raw) = date else {
        errors.push("date", DATE_REQUIRED);
        return None;
    };
    let Some(date) = raw.resolve() else {
        errors.push("date", DATE_INVALID);
        return None;
    };
    if date < MIN_INVOICE_DATE {
        errors.push("date", DATE_TOO_EARLY);
        return None;
    }
    if date > MAX_INVOICE_DATE {
        errors.push("date", DATE_INVALID);
        return None;
    }
    Some(date)
}

fn check_currency(
    code: Option<&RawText>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Currency> {
    let parsed = match code {
        None => {
            errors.push(field, CURRENCY_REQUIRED);
            return None;
        }
        Some(RawText::Text(code)) => code.parse::<Currency>(),
        Some(RawText::Invalid(value)) => Err(UnknownCurrency {
            received: value.to_string(),
        }),
    };
    match parsed {
        Ok(currency) => Some(currency),
        Err(e) => {
            errors.push(field, e.to_string());
            None
        }
    }
}

fn check_description(text: &RawText, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match text {
        RawText::Text(s) if !s.is_empty() => Some(s.clone()),
        RawText::Text(_) => {
            errors.push(field, DESCRIPTION_REQUIRED);
            None
        }
        RawText::Invalid(value) => {
            errors.push(field, type_mismatch("string", value));
            None
        }
    }
}

fn check_amount(
    amount: Option<&RawAmount>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<Decimal> {
    match amount {
        None => {
            errors.push(field, AMOUNT_REQUIRED);
            None
        }
        Some(RawAmount::Number(a)) if *a <= Decimal::ZERO => {
            errors.push(field, AMOUNT_NOT_POSITIVE);
            None
        }
        Some(RawAmount::Number(a)) => Some(*a),
        Some(RawAmount::Invalid(value)) => {
            let message = match value {
                Value::String(s) if s.trim().is_empty() => AMOUNT_REQUIRED.to_string(),
                Value::Number(_) => AMOUNT_OUT_OF_RANGE.to_string(),
                other => type_mismatch("number", other),
            };
            errors.push(field, message);
            None
        }
    }
}

fn type_mismatch(expected: &str, value: &Value) -> String {
    format!("Expected {expected}, received {}", json_kind(value))
}

fn check_line(line: &LineDraft, prefix: &str, errors: &mut FieldErrors) -> Option<LineItem> {
    let description =
        check_description(&line.description, &format!("{prefix}description"), errors);
    let amount = check_amount(line.amount.as_ref(), &format!("{prefix}amount"), errors);
    let currency = check_currency(
        line.currency.as_ref(),
        &format!("{prefix}currency"),
        errors,
    );

    Some(LineItem::new(description?, amount?, currency?))
}
