//! CSV serialization of resolved schedule entries
//!
//! The persisted format is fixed: a header line, then one `;`-separated line
//! per entry with every string field double-quoted and embedded quotes
//! doubled. The archive flag is a bare `0`/`1`. Timestamps render as
//! ISO-8601 with seconds precision and a numeric UTC offset
//! (`2024-07-22T16:27:01+03:00`); absent values render as `""`.

use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use tracing::info;

use crate::errors::AppResult;
use crate::models::ScheduleEntry;

/// Header line, written exactly once at the top of every output file
pub const CSV_HEADER: &str = r#""datetime_start";"datetime_finish";"channel";"title";"channel_logo_url";"description";"available_archive""#;

/// Quote a field, doubling embedded quote characters
///
/// Doubling-escape is unambiguous, so any value round-trips through the
/// inverse unescape.
fn escape(value: Option<&str>) -> String {
    match value {
        None => "\"\"".to_string(),
        Some(v) => format!("\"{}\"", v.replace('"', "\"\"")),
    }
}

fn format_timestamp(date: Option<&DateTime<FixedOffset>>) -> String {
    match date {
        None => String::new(),
        Some(d) => d.to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

fn to_csv_line(entry: &ScheduleEntry) -> String {
    format!(
        "{};{};{};{};{};{};{}\n",
        escape(Some(&format_timestamp(Some(&entry.start)))),
        escape(Some(&format_timestamp(entry.finish.as_ref()))),
        escape(Some(&entry.channel)),
        escape(Some(&entry.title)),
        escape(entry.channel_logo_url.as_deref()),
        escape(entry.description.as_deref()),
        u8::from(entry.has_archive),
    )
}

/// Render the full CSV document, header included
///
/// An empty entry slice yields the header line alone.
pub fn render(entries: &[ScheduleEntry]) -> String {
    let mut out = String::with_capacity(64 + entries.len() * 128);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&to_csv_line(entry));
    }
    out
}

/// Write the CSV document to `path`, fully rewriting any existing file
///
/// The parent directory is created when absent. Content goes to a temporary
/// sibling first and is renamed into place on success, so a failed run never
/// leaves a truncated file at the target path.
pub async fn write_csv(entries: &[ScheduleEntry], path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, render(entries)).await?;
    tokio::fs::rename(&tmp_path, path).await?;

    info!("Wrote {} schedule entries to {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> ScheduleEntry {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2024, 7, 22, 16, 27, 1).unwrap();
        ScheduleEntry::new(start, "Dost TV", "Sabah Haberleri")
    }

    #[test]
    fn header_matches_contract() {
        assert_eq!(
            CSV_HEADER,
            "\"datetime_start\";\"datetime_finish\";\"channel\";\"title\";\"channel_logo_url\";\"description\";\"available_archive\""
        );
    }

    #[test]
    fn quotes_are_doubled() {
        let entry = ScheduleEntry {
            title: "He said \"hi\"".to_string(),
            ..sample_entry()
        };
        let line = to_csv_line(&entry);
        assert!(line.contains("\"He said \"\"hi\"\"\""), "line: {line}");
    }

    #[test]
    fn absent_fields_render_as_empty_quotes() {
        let line = to_csv_line(&sample_entry());
        let fields: Vec<&str> = line.trim_end().split(';').collect();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[1], "\"\"", "unresolved finish");
        assert_eq!(fields[4], "\"\"", "absent logo url");
        assert_eq!(fields[5], "\"\"", "absent description");
    }

    #[test]
    fn archive_flag_is_a_bare_digit() {
        let line = to_csv_line(&sample_entry().with_archive(true));
        assert!(line.trim_end().ends_with(";1"), "line: {line}");
        let line = to_csv_line(&sample_entry());
        assert!(line.trim_end().ends_with(";0"), "line: {line}");
    }

    #[test]
    fn timestamps_use_iso8601_seconds_with_offset() {
        let line = to_csv_line(&sample_entry());
        assert!(
            line.starts_with("\"2024-07-22T16:27:01+03:00\";"),
            "line: {line}"
        );
    }

    #[test]
    fn empty_input_yields_header_only() {
        assert_eq!(render(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn every_record_terminates_with_one_newline() {
        let doc = render(&[sample_entry(), sample_entry()]);
        assert_eq!(doc.lines().count(), 3);
        assert!(doc.ends_with('\n'));
        assert!(!doc.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn write_creates_parent_directory_and_no_tmp_leftover() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("schedule.csv");

        write_csv(&[sample_entry()], &target).await.unwrap();

        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.starts_with(CSV_HEADER));
        assert_eq!(written.lines().count(), 2);
        assert!(!dir.path().join("nested").join("schedule.csv.tmp").exists());
    }

    #[tokio::test]
    async fn write_fully_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("schedule.csv");

        write_csv(&[sample_entry(), sample_entry()], &target).await.unwrap();
        write_csv(&[], &target).await.unwrap();

        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(written, format!("{CSV_HEADER}\n"));
    }
}
