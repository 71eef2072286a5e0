//! Line-oriented CSV parsing for spreadsheet exports.
//!
//! The parser works one line at a time, so quoted fields cannot span
//! lines. A quote left open at the end of a line swallows the rest of that
//! line into the last field; the next line starts fresh.

/// Parse CSV text into rows of fields.
///
/// Blank lines are skipped and surrounding whitespace on each line is
/// trimmed. Inside a quoted field, `""` yields a literal `"` and `,` is
/// plain content. Rows are returned as-is even when their lengths differ;
/// that case is only reported with a warning.
///
/// ```
/// use energy_directory::csv::parse_csv;
///
/// let rows = parse_csv("a,\"b,c\",d\r\n\r\nx,\"y\"\"z\",w");
/// assert_eq!(rows, vec![vec!["a", "b,c", "d"], vec!["x", "y\"z", "w"]]);
/// ```
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let normalized = text.replace("\r\n", "\n");
    let rows: Vec<Vec<String>> = normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect();

    if rows.len() > 1 {
        let min = rows.iter().map(Vec::len).min().unwrap_or(0);
        let max = rows.iter().map(Vec::len).max().unwrap_or(0);
        if min != max {
            tracing::warn!(
                min,
                max,
                "CSV parsing found inconsistent row lengths. Data may be malformed."
            );
        }
    }

    rows
}

fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Escape a single field for CSV output.
///
/// Fields containing a quote, comma or newline are wrapped in quotes with
/// inner quotes doubled; anything else is returned unchanged.
pub fn escape_field(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize one row as a CSV line (without a trailing newline).
pub fn write_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
