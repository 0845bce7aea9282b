use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::models::entry::TimeEntry;

/// Marker glyph that identifies a table row as a time entry. A qualifying
/// row starts with `| ⏱ |` and carries at least one more cell.
pub const TIME_ROW_MARKER: char = '⏱';

// Matched per line over the whole document; only horizontal whitespace may
// pad the marker cell, so a match never spans lines. `find_iter` yields
// each match lazily and always advances past it, so the scan cannot stall
// on adversarial input.
static TIME_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)^\|[ \t]*{TIME_ROW_MARKER}[ \t]*\|.*\|"
    ))
    .expect("time row pattern")
});

/// Result of scanning one document: the entries in source-row order plus a
/// reason per skipped row. Skipped rows never abort the scan.
#[derive(Debug, Default)]
pub struct Extraction {
    pub entries: Vec<TimeEntry>,
    pub skipped: Vec<String>,
}

/// Scan `content` for time-entry rows and parse each into a [`TimeEntry`].
///
/// The entry date comes from `document_name` with a trailing `.md`
/// stripped; the documents this runs against are daily notes named after
/// their date, so anything else gets a warning but still extracts.
pub fn extract(content: &str, document_name: &str) -> Extraction {
    let date = document_name
        .strip_suffix(".md")
        .unwrap_or(document_name);

    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        warn!("Document name '{}' does not look like a daily note", document_name);
    }

    let mut extraction = Extraction::default();

    for row in TIME_ROW.find_iter(content) {
        match parse_row(row.as_str(), date) {
            Ok(entry) => extraction.entries.push(entry),
            Err(reason) => {
                warn!("Skipping malformed time row: {}", reason);
                extraction.skipped.push(reason);
            }
        }
    }

    info!(
        "Extracted {} time entries from '{}' ({} skipped)",
        extraction.entries.len(),
        document_name,
        extraction.skipped.len()
    );

    extraction
}

/// Split a matched row on `|` and map its cells: cell 2 is the duration,
/// cell 3 the tags, cell 4 the note. Extra cells are ignored.
fn parse_row(row: &str, date: &str) -> Result<TimeEntry, String> {
    let cells: Vec<&str> = row.split('|').collect();

    if cells.len() < 5 {
        return Err(format!(
            "expected at least 5 cells, found {} in '{}'",
            cells.len(),
            row
        ));
    }

    let raw_duration = cells[2].trim();
    let duration: f64 = raw_duration
        .parse()
        .map_err(|_| format!("duration '{}' is not a number in '{}'", raw_duration, row))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(format!(
            "duration '{}' is not a non-negative number in '{}'",
            raw_duration, row
        ));
    }

    let tags = cells[3].trim().split(' ').map(str::to_string).collect();

    Ok(TimeEntry {
        date: date.to_string(),
        duration,
        tags,
        note: cells[4].trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_marker_row() {
        let content = "# Monday\n\n| ⏱ | 2.5 | tagA tagB | did work |\n";
        let result = extract(content, "2024-01-15.md");

        assert_eq!(result.entries.len(), 1);
        assert!(result.skipped.is_empty());

        let entry = &result.entries[0];
        assert_eq!(entry.date, "2024-01-15");
        assert_eq!(entry.duration, 2.5);
        assert_eq!(entry.tags, vec!["tagA", "tagB"]);
        assert_eq!(entry.note, "did work");
    }

    #[test]
    fn no_matching_rows_yields_empty_sequence() {
        let content = "just prose\n\n| not | a | time | row | here |\n";
        let result = extract(content, "2024-01-15.md");

        assert!(result.entries.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn preserves_source_row_order() {
        let content = "\
| ⏱ | 1 | first | one |
some text in between
| ⏱ | 2 | second | two |
| ⏱ | 3 | third | three |
";
        let result = extract(content, "2024-01-15.md");

        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.entries[0].note, "one");
        assert_eq!(result.entries[1].note, "two");
        assert_eq!(result.entries[2].note, "three");
    }

    #[test]
    fn skips_row_with_too_few_cells() {
        let content = "| ⏱ | 2.5 |\n| ⏱ | 1.0 | ok | fine |\n";
        let result = extract(content, "2024-01-15.md");

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].note, "fine");
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].contains("cells"));
    }

    #[test]
    fn skips_non_numeric_duration_and_keeps_going() {
        let content = "\
| ⏱ | lots | tag | broken |
| ⏱ | 0.75 | tag | fine |
";
        let result = extract(content, "2024-01-15.md");

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].duration, 0.75);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].contains("not a number"));
    }

    #[test]
    fn rejects_nan_and_negative_durations() {
        let content = "| ⏱ | NaN | t | a |\n| ⏱ | -1 | t | b |\n| ⏱ | inf | t | c |\n";
        let result = extract(content, "2024-01-15.md");

        assert!(result.entries.is_empty());
        assert_eq!(result.skipped.len(), 3);
    }

    #[test]
    fn strips_only_trailing_md_extension() {
        let content = "| ⏱ | 1 | t | n |\n";

        let result = extract(content, "2024-01-15.md");
        assert_eq!(result.entries[0].date, "2024-01-15");

        let result = extract(content, "scratchpad");
        assert_eq!(result.entries[0].date, "scratchpad");
    }

    #[test]
    fn keeps_duplicate_tags_in_order() {
        let content = "| ⏱ | 1 | b a b | n |\n";
        let result = extract(content, "2024-01-15.md");

        assert_eq!(result.entries[0].tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn ignores_cells_past_the_note() {
        let content = "| ⏱ | 1.5 | tag | note text | extra | more |\n";
        let result = extract(content, "2024-01-15.md");

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].note, "note text");
    }

    #[test]
    fn marker_cell_never_glues_onto_the_next_line() {
        let content = "| ⏱ |\n| 2.5 | tag | note |\n";
        let result = extract(content, "2024-01-15.md");

        assert!(result.entries.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn terminates_on_adversarial_pipe_heavy_input() {
        let mut content = String::new();
        for _ in 0..5_000 {
            content.push_str("||||||||\n");
            content.push_str("| ⏱ |\n");
            content.push('\n');
        }
        content.push_str("| ⏱ | 1 | t | end |\n");

        let result = extract(&content, "2024-01-15.md");
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].note, "end");
    }
}
