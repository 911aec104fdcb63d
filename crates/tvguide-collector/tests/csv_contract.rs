//! CSV format contract: quoting, escaping, and lossless round-trips through
//! a reference unescaping parser.

use chrono::{FixedOffset, TimeZone};
use tvguide_collector::models::ScheduleEntry;
use tvguide_collector::output::render;

fn entry_with_title(title: &str) -> ScheduleEntry {
    let tz = FixedOffset::east_opt(3 * 3600).unwrap();
    let start = tz.with_ymd_and_hms(2024, 7, 22, 16, 27, 1).unwrap();
    ScheduleEntry::new(start, "Test TV", title)
}

/// Reference parser: split one CSV line into unescaped field values.
/// Inverse of the writer's quoting (fields quoted, `""` -> `"`), with the
/// unquoted archive digit passed through as-is.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ';' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[test]
fn embedded_quotes_are_doubled_and_round_trip() {
    let original = "He said \"hi\"";
    let document = render(&[entry_with_title(original)]);
    let line = document.lines().nth(1).unwrap();

    assert!(
        line.contains("\"He said \"\"hi\"\"\""),
        "escaped field missing: {line}"
    );

    let recovered = parse_line(line);
    assert_eq!(recovered[3], original);
}

#[test]
fn semicolons_inside_fields_survive_round_trip() {
    let original = "Haber; Hava; Spor";
    let document = render(&[entry_with_title(original)]);
    let line = document.lines().nth(1).unwrap();

    let recovered = parse_line(line);
    assert_eq!(recovered.len(), 7);
    assert_eq!(recovered[3], original);
}

#[test]
fn pathological_quote_runs_round_trip() {
    for original in ["\"", "\"\"", "a\"b\"\"c", "\"başla", "bitir\""] {
        let document = render(&[entry_with_title(original)]);
        let line = document.lines().nth(1).unwrap();
        assert_eq!(parse_line(line)[3], original, "value: {original:?}");
    }
}

#[test]
fn all_seven_fields_recoverable_from_full_record() {
    let entry = entry_with_title("Akşam Kuşağı")
        .with_logo_url("https://example.com/logo.png")
        .with_description(Some("Günün özeti"))
        .with_archive(true);

    let document = render(&[entry]);
    let line = document.lines().nth(1).unwrap();
    let recovered = parse_line(line);

    assert_eq!(recovered[0], "2024-07-22T16:27:01+03:00");
    assert_eq!(recovered[1], "", "finish not resolved, empty field");
    assert_eq!(recovered[2], "Test TV");
    assert_eq!(recovered[3], "Akşam Kuşağı");
    assert_eq!(recovered[4], "https://example.com/logo.png");
    assert_eq!(recovered[5], "Günün özeti");
    assert_eq!(recovered[6], "1");
}
