#![cfg(feature = "core")]

use chrono::NaiveDate;
use invoice_total::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn valid_line() -> LineDraft {
    LineDraft::new("Test item", dec!(100), Currency::Usd)
}

fn draft_on(d: NaiveDate) -> InvoiceDraft {
    InvoiceDraft::new()
        .date(d)
        .currency(Currency::Nzd)
        .add_line(valid_line())
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

#[test]
fn line_valid() {
    let item = validate_line(&LineDraft::new("Test item", dec!(100.5), Currency::Usd)).unwrap();
    assert_eq!(item.description(), "Test item");
    assert_eq!(item.amount(), dec!(100.5));
    assert_eq!(item.currency(), Currency::Usd);
}

#[test]
fn line_empty_description() {
    let errors = validate_line(&valid_line().description("")).unwrap_err();
    assert_eq!(errors.first().unwrap().message, "Description is required");
    assert_eq!(errors.len(), 1);
}

#[test]
fn line_whitespace_description_is_present() {
    assert!(validate_line(&valid_line().description(" ")).is_ok());
}

#[test]
fn line_missing_amount() {
    let errors = validate_line(&valid_line().amount(None)).unwrap_err();
    assert_eq!(errors.get("amount"), Some("Amount is required"));
}

#[test]
fn line_negative_amount() {
    let errors = validate_line(&valid_line().amount(Some(dec!(-10)))).unwrap_err();
    assert_eq!(errors.get("amount"), Some("Must be > 0"));
}

#[test]
fn line_zero_amount() {
    let errors = validate_line(&valid_line().amount(Some(dec!(0)))).unwrap_err();
    assert_eq!(errors.get("amount"), Some("Must be > 0"));
}

#[test]
fn line_smallest_positive_amount() {
    assert!(validate_line(&valid_line().amount(Some(dec!(0.0001)))).is_ok());
}

#[test]
fn line_invalid_currency() {
    let errors = validate_line(&valid_line().currency_code("INVALID")).unwrap_err();
    let msg = errors.get("currency").unwrap();
    assert!(msg.contains("received 'INVALID'"), "{msg}");
}

#[test]
fn line_missing_currency() {
    let mut line = valid_line();
    line.currency = None;
    let errors = validate_line(&line).unwrap_err();
    assert_eq!(errors.get("currency"), Some("Currency is required"));
}

#[test]
fn line_accepts_all_currencies() {
    for currency in Currency::ALL {
        let line = LineDraft::new("Test item", dec!(100), currency);
        assert!(validate_line(&line).is_ok(), "{currency}");
    }
}

#[test]
fn line_reports_every_field() {
    let line = LineDraft {
        description: RawText::default(),
        amount: Some(dec!(-1).into()),
        currency: Some("XYZ".into()),
    };
    let errors = validate_line(&line).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.contains("description"));
    assert!(errors.contains("amount"));
    assert!(errors.contains("currency"));
}

// ---------------------------------------------------------------------------
// Invoice
// ---------------------------------------------------------------------------

#[test]
fn invoice_valid() {
    let invoice = validate(&draft_on(date(2024, 1, 1))).unwrap();
    assert_eq!(invoice.date(), date(2024, 1, 1));
    assert_eq!(invoice.currency(), Currency::Nzd);
    assert_eq!(invoice.lines().len(), 1);
}

#[test]
fn invoice_date_before_minimum() {
    let errors = validate(&draft_on(date(1999, 1, 3))).unwrap_err();
    assert_eq!(errors.get("date"), Some("Date must be after 1999-01-04"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn invoice_date_exactly_minimum() {
    assert!(validate(&draft_on(date(1999, 1, 4))).is_ok());
}

#[test]
fn invoice_date_long_before_minimum() {
    let errors = validate(&draft_on(date(1970, 1, 1))).unwrap_err();
    assert_eq!(errors.get("date"), Some("Date must be after 1999-01-04"));
}

#[test]
fn invoice_date_latest_four_digit_year() {
    assert!(validate(&draft_on(date(9999, 12, 31))).is_ok());
    assert_eq!(MAX_INVOICE_DATE, date(9999, 12, 31));
}

#[test]
fn invoice_date_five_digit_year_is_invalid() {
    let errors = validate(&draft_on(date(10000, 1, 1))).unwrap_err();
    assert_eq!(errors.get("date"), Some("Invalid date"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn invoice_date_from_offset_datetime() {
    let draft = draft_on(date(2024, 1, 1)).date("2024-01-15T00:00:00+13:00");
    assert_eq!(validate(&draft).unwrap().date(), date(2024, 1, 15));
}

#[test]
fn invoice_date_minimum_as_late_utc_datetime() {
    // Calendar date as written counts, not the UTC instant.
    let draft = draft_on(date(2024, 1, 1)).date("1999-01-04T23:30:00-10:00");
    assert_eq!(validate(&draft).unwrap().date(), MIN_INVOICE_DATE);
}

#[test]
fn invoice_empty_lines() {
    let draft = InvoiceDraft::new().date(date(2024, 1, 1)).currency(Currency::Nzd);
    let errors = validate(&draft).unwrap_err();
    assert_eq!(errors.get("lines"), Some("At least one line item is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn invoice_invalid_base_currency() {
    let draft = draft_on(date(2024, 1, 1)).currency_code("INVALID");
    let errors = validate(&draft).unwrap_err();
    assert!(errors.contains("currency"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn invoice_accepts_all_base_currencies() {
    for currency in Currency::ALL {
        let draft = draft_on(date(2024, 1, 1)).currency(currency);
        assert_eq!(validate(&draft).unwrap().currency(), currency);
    }
}

#[test]
fn invoice_multiple_lines() {
    let draft = InvoiceDraft::new()
        .date(date(2024, 1, 1))
        .currency(Currency::Eur)
        .add_line(LineDraft::new("Item 1", dec!(50), Currency::Usd))
        .add_line(LineDraft::new("Item 2", dec!(75.25), Currency::Gbp))
        .add_line(LineDraft::new("Item 3", dec!(100), Currency::Jpy));

    let invoice = validate(&draft).unwrap();
    let amounts: Vec<_> = invoice.lines().iter().map(|l| l.amount()).collect();
    assert_eq!(amounts, vec![dec!(50), dec!(75.25), dec!(100)]);
}

#[test]
fn invoice_rejects_any_invalid_line() {
    let draft = InvoiceDraft::new()
        .date(date(2024, 1, 1))
        .currency(Currency::Eur)
        .add_line(LineDraft::new("Valid item", dec!(50), Currency::Usd))
        .add_line(LineDraft::new("", dec!(75), Currency::Gbp));

    let errors = validate(&draft).unwrap_err();
    assert_eq!(errors.get("lines[1].description"), Some("Description is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn invoice_reports_every_invalid_line() {
    let draft = InvoiceDraft::new()
        .date(date(2024, 1, 1))
        .currency(Currency::Eur)
        .add_line(LineDraft::new("A", dec!(0), Currency::Usd))
        .add_line(LineDraft::new("B", dec!(10), Currency::Usd))
        .add_line(LineDraft::blank().description("C"));

    let errors = validate(&draft).unwrap_err();
    assert_eq!(errors.get("lines[0].amount"), Some("Must be > 0"));
    assert_eq!(errors.get("lines[2].amount"), Some("Amount is required"));
    assert!(!errors.contains("lines[1].amount"));
}

#[test]
fn invoice_combines_top_level_and_line_errors() {
    let draft = InvoiceDraft::new()
        .date(date(1990, 5, 5))
        .currency_code("CHF")
        .add_line(LineDraft::blank());

    let map = validate(&draft).unwrap_err().to_map();
    let keys: Vec<_> = map.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["currency", "date", "lines[0].amount", "lines[0].description"]
    );
}

#[test]
fn default_draft_is_not_yet_valid() {
    let draft = InvoiceDraft::with_defaults(date(2024, 6, 1));
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.get("lines[0].description"), Some("Description is required"));
    assert_eq!(errors.get("lines[0].amount"), Some("Amount is required"));
    assert!(!errors.contains("currency"));
    assert!(!errors.contains("date"));
}

#[test]
fn empty_draft_reports_required_fields() {
    let errors = InvoiceDraft::new().validate().unwrap_err();
    assert_eq!(errors.get("date"), Some("Date is required"));
    assert_eq!(errors.get("currency"), Some("Currency is required"));
    assert_eq!(errors.get("lines"), Some("At least one line item is required"));
}

// ---------------------------------------------------------------------------
// JSON input
// ---------------------------------------------------------------------------

#[test]
fn json_draft_validates() {
    let json = r#"{
        "date": "2024-01-15",
        "currency": "NZD",
        "lines": [
            {"description": "Test item", "amount": 100, "currency": "USD"},
            {"description": "Other", "amount": "42.10", "currency": "AUD"}
        ]
    }"#;
    let invoice = InvoiceDraft::from_json(json).unwrap().validate().unwrap();
    assert_eq!(invoice.lines()[1].amount(), dec!(42.10));
    assert_eq!(invoice.lines()[1].currency(), Currency::Aud);
}

#[test]
fn json_null_amount_is_required_error() {
    let json = r#"{"date":"2024-01-15","currency":"NZD","lines":[{"description":"x","amount":null,"currency":"USD"}]}"#;
    let errors = InvoiceDraft::from_json(json).unwrap().validate().unwrap_err();
    assert_eq!(errors.get("lines[0].amount"), Some("Amount is required"));
}

#[test]
fn json_unparseable_date() {
    let json = r#"{"date":"next tuesday","currency":"NZD","lines":[{"description":"x","amount":1,"currency":"USD"}]}"#;
    let errors = InvoiceDraft::from_json(json).unwrap().validate().unwrap_err();
    assert_eq!(errors.get("date"), Some("Invalid date"));
}

fn json_errors(json: &str) -> FieldErrors {
    InvoiceDraft::from_json(json).unwrap().validate().unwrap_err()
}

#[test]
fn json_null_description_is_required_error() {
    let errors = json_errors(
        r#"{"date":"2024-01-15","currency":"NZD","lines":[{"description":null,"amount":1,"currency":"USD"}]}"#,
    );
    assert_eq!(errors.get("lines[0].description"), Some("Description is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn json_numeric_description() {
    let errors = json_errors(
        r#"{"date":"2024-01-15","currency":"NZD","lines":[{"description":7,"amount":1,"currency":"USD"}]}"#,
    );
    assert_eq!(
        errors.get("lines[0].description"),
        Some("Expected string, received number")
    );
}

#[test]
fn json_empty_string_amount_is_required_error() {
    let errors = json_errors(
        r#"{"date":"2024-01-15","currency":"NZD","lines":[{"description":"x","amount":"","currency":"USD"}]}"#,
    );
    assert_eq!(errors.get("lines[0].amount"), Some("Amount is required"));
}

#[test]
fn json_non_numeric_amount() {
    let errors = json_errors(
        r#"{"date":"2024-01-15","currency":"NZD","lines":[{"description":"x","amount":"abc","currency":"USD"},{"description":"y","amount":{},"currency":"USD"}]}"#,
    );
    assert_eq!(errors.get("lines[0].amount"), Some("Expected number, received string"));
    assert_eq!(errors.get("lines[1].amount"), Some("Expected number, received object"));
}

#[test]
fn json_numeric_currency() {
    let errors = json_errors(
        r#"{"date":"2024-01-15","currency":5,"lines":[{"description":"x","amount":1,"currency":false}]}"#,
    );
    let base = errors.get("currency").unwrap();
    assert!(base.starts_with("Invalid enum value."), "{base}");
    assert!(base.ends_with("received '5'"), "{base}");
    assert!(errors.get("lines[0].currency").unwrap().ends_with("received 'false'"));
    assert_eq!(errors.len(), 2);
}

#[test]
fn json_numeric_date() {
    let errors = json_errors(
        r#"{"date":20240115,"currency":"NZD","lines":[{"description":"x","amount":1,"currency":"USD"}]}"#,
    );
    assert_eq!(errors.get("date"), Some("Invalid date"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn json_null_date_is_required_error() {
    let errors = json_errors(
        r#"{"date":null,"currency":"NZD","lines":[{"description":"x","amount":1,"currency":"USD"}]}"#,
    );
    assert_eq!(errors.get("date"), Some("Date is required"));
}

#[test]
fn json_null_lines() {
    let errors = json_errors(r#"{"date":"2024-01-15","currency":"NZD","lines":null}"#);
    assert_eq!(errors.get("lines"), Some("At least one line item is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn json_every_field_mistyped_reports_every_path() {
    let errors = json_errors(
        r#"{"date":true,"currency":[],"lines":[{"description":1,"amount":"","currency":2}]}"#,
    );
    let paths: Vec<_> = errors.to_map().into_keys().collect();
    assert_eq!(
        paths,
        vec![
            "currency",
            "date",
            "lines[0].amount",
            "lines[0].currency",
            "lines[0].description"
        ]
    );
}
