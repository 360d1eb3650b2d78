#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 4;
const SEPARATOR: &str = "  ";

/// Render an aligned table for string rows.
///
/// Widths are measured in characters so headers like `mês` line up.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| text_width(cell))
                .max()
                .unwrap_or(0)
                .max(text_width(header))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(text_width(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(value, *width);
                let padded = pad(&text, *width, looks_numeric(&text));
                if options.color {
                    colorize_status(&text, &padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn text_width(value: &str) -> usize {
    value.chars().count()
}

/// Shrink the widest columns until the table fits `max_width`.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > text_width(headers[*idx]).max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if text_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Counts, issue numbers and `H:MM:SS` durations align right.
fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.' | ':'))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text_width(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Color a padded cell by its status text.
fn colorize_status(text: &str, padded: &str) -> String {
    let code = match text {
        "closed" | "true" => "32",
        "open" => "33",
        "canceled" | "invalid" | "false" => "31",
        _ => return padded.to_string(),
    };
    padded.replacen(text, &format!("\u{1b}[{code}m{text}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_with_divider() {
        let rows = vec![
            vec!["tsk-1".to_string(), "open".to_string(), "short".to_string()],
            vec![
                "tsk-200".to_string(),
                "closed".to_string(),
                "a much longer title".to_string(),
            ],
        ];
        let table = render_entity_table(&["id", "status", "title"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id       status  title"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].starts_with("tsk-200  closed  a much longer title"));
    }

    #[test]
    fn accented_headers_measure_by_chars() {
        let rows = vec![vec!["3".to_string()]];
        let table = render_entity_table(&["mês"], &rows, PLAIN);
        assert_eq!(table, "mês \n----\n   3");
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let rows = vec![vec!["tsk-1".to_string(), "x".repeat(60)]];
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };
        let table = render_entity_table(&["id", "title"], &rows, options);
        let last = table.lines().last().unwrap();
        assert_eq!(last.chars().count(), 40);
        assert!(last.ends_with('…'));
    }

    #[test]
    fn durations_align_right() {
        assert!(looks_numeric("12:30:00"));
        assert!(!looks_numeric("1h 30m"));
        assert!(!looks_numeric("-"));
    }

    #[test]
    fn status_cells_are_colored() {
        let colored = colorize_status("open", "open  ");
        assert_eq!(colored, "\u{1b}[33mopen\u{1b}[0m  ");
        assert_eq!(colorize_status("tsk-1", "tsk-1"), "tsk-1");
    }
}
