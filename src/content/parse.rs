use crate::model::{CellRichText, Line, StyledRun};

use super::{RichCell, RichPart};

/// Split on `\r\n`, `\r` or `\n`. Always yields at least one (possibly empty) segment.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                segments.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                segments.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Number of physical lines `text` occupies once split on line breaks.
pub fn line_count(text: &str) -> usize {
    split_lines(text).len()
}

/// One entry per newline-separated segment of a part. `None` marks a segment
/// that only exists to break the line: empty text after real content, or a
/// trailing empty segment.
fn split_part(text: &str, style: Option<&StyledRun>) -> Vec<Option<StyledRun>> {
    let segments = split_lines(text);
    let last = segments.len() - 1;
    let mut content_seen = false;

    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| {
            if segment.is_empty() {
                // Leading blank lines are real lines: "\n\ntest" keeps two of them.
                return (!content_seen && i != last).then(|| StyledRun::plain(""));
            }
            content_seen = true;
            Some(match style {
                Some(run) => StyledRun {
                    text: segment.to_string(),
                    effect: run.effect,
                    script: run.script,
                },
                None => StyledRun::plain(segment),
            })
        })
        .collect()
}

/// A line ended by a break. Blank lines hold one empty run, the same as
/// leading blank lines.
fn close_line(line: Option<Line>) -> Line {
    match line {
        Some(runs) if !runs.is_empty() => runs,
        _ => vec![StyledRun::plain("")],
    }
}

/// Normalize one cell's rich input into its canonical line/run grid.
pub fn parse_cell(cell: &RichCell) -> CellRichText {
    let mut lines: CellRichText = Vec::new();
    let mut current: Option<Line> = None;

    for part in &cell.0 {
        let segments = match part {
            RichPart::Line(line) => {
                if let Some(open) = current.take() {
                    lines.push(open);
                }
                lines.push(line.clone());
                continue;
            }
            RichPart::Text(text) => split_part(text, None),
            RichPart::Run(run) => split_part(&run.text, Some(run)),
        };

        for (i, segment) in segments.into_iter().enumerate() {
            if i != 0 {
                lines.push(close_line(current.take()));
                current = Some(Vec::new());
            }
            if let Some(run) = segment {
                current.get_or_insert_with(Vec::new).push(run);
            }
        }
    }

    match current {
        Some(line) => lines.push(line),
        None if lines.is_empty() => lines.push(Vec::new()),
        None => {}
    }
    lines
}

/// Plain text of a rich cell: runs concatenated, lines joined with `\n`.
pub fn flatten(cell: &CellRichText) -> String {
    cell.iter()
        .map(|line| line.iter().map(|run| run.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_all_break_styles() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("\n"), vec!["", ""]);
    }

    #[test]
    fn trailing_break_opens_empty_line() {
        let cell = parse_cell(&RichCell::from("a\n"));
        assert_eq!(cell, vec![vec![StyledRun::plain("a")], vec![]]);
        assert_eq!(line_count(&flatten(&cell)), 2);
    }

    #[test]
    fn blank_lines_share_one_shape() {
        let cell = parse_cell(&RichCell::from("\na\n\nb"));
        let blank = vec![StyledRun::plain("")];
        assert_eq!(cell, vec![blank.clone(), vec![StyledRun::plain("a")], blank, vec![StyledRun::plain("b")]]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(parse_cell(&RichCell::from("")), vec![Vec::<StyledRun>::new()]);
        assert_eq!(parse_cell(&RichCell::default()), vec![Vec::<StyledRun>::new()]);
    }
}
