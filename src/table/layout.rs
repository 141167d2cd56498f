use crate::content::split_lines;
use crate::document::Document;
use crate::model::Section;

use super::{Cell, CellStyles, CellText, Column, Row, Table, TableOptions};

fn apply_font(doc: &mut dyn Document, styles: &CellStyles) {
    doc.set_font(styles.font, styles.font_style);
    doc.set_font_size(styles.font_size);
}

/// Greedy word wrap of each newline-separated paragraph. A word wider than
/// `max_width` keeps a line of its own.
pub(crate) fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in split_lines(text) {
        let mut current = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure(&candidate) > max_width {
                out.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        out.push(current);
    }
    out
}

struct SectionRows<'a> {
    section: Section,
    rows: &'a [Vec<String>],
    styles: CellStyles,
}

/// Fixed widths are kept; the rest share what is left of the available width.
/// Auto columns then grow so their longest word fits, and the others give up
/// space proportionally while the total is preserved.
fn fit_columns(
    doc: &mut dyn Document,
    fixed: &[Option<f32>],
    sections: &[SectionRows<'_>],
    ncols: usize,
    available: f32,
) -> Vec<f32> {
    if ncols == 0 {
        return Vec::new();
    }
    let fixed_at = |i: usize| fixed.get(i).copied().flatten();

    let fixed_total: f32 = (0..ncols).filter_map(fixed_at).sum();
    let auto_count = (0..ncols).filter(|&i| fixed_at(i).is_none()).count();
    let share = if auto_count > 0 {
        ((available - fixed_total) / auto_count as f32).max(0.0)
    } else {
        0.0
    };
    let mut widths: Vec<f32> = (0..ncols).map(|i| fixed_at(i).unwrap_or(share)).collect();

    let mut min_widths: Vec<f32> = (0..ncols).map(|i| fixed_at(i).unwrap_or(0.0)).collect();
    for section in sections {
        apply_font(doc, &section.styles);
        let padding = 2.0 * section.styles.cell_padding;
        for row in section.rows {
            for (i, text) in row.iter().enumerate().take(ncols) {
                if fixed_at(i).is_some() {
                    continue;
                }
                for word in text.split_whitespace() {
                    min_widths[i] = min_widths[i].max(doc.text_width(word) + padding);
                }
            }
        }
    }

    let total: f32 = widths.iter().sum();

    let mut extra_needed: f32 = 0.0;
    let mut shrinkable: f32 = 0.0;
    for i in 0..ncols {
        if min_widths[i] > widths[i] {
            extra_needed += min_widths[i] - widths[i];
            widths[i] = min_widths[i];
        } else {
            shrinkable += widths[i] - min_widths[i];
        }
    }

    if extra_needed > 0.0 && shrinkable > 0.0 {
        let factor = extra_needed.min(shrinkable) / shrinkable;
        for i in 0..ncols {
            if widths[i] > min_widths[i] {
                widths[i] -= (widths[i] - min_widths[i]) * factor;
            }
        }
        let new_total: f32 = widths.iter().sum();
        if new_total > 0.0 && (new_total - total).abs() > 0.01 {
            let scale = total / new_total;
            for w in &mut widths {
                *w *= scale;
            }
        }
    }

    widths
}

fn build_row(
    doc: &mut dyn Document,
    section: Section,
    index: usize,
    texts: &[String],
    styles: &CellStyles,
    widths: &[f32],
) -> Row {
    apply_font(doc, styles);
    let doc: &dyn Document = doc;
    let line_h = styles.font_size / doc.scale_factor() * doc.line_height_factor();
    let padding = styles.cell_padding;

    let cells: Vec<Cell> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let raw = texts.get(i).cloned().unwrap_or_default();
            let lines = wrap_text(&raw, (width - 2.0 * padding).max(0.0), |s| doc.text_width(s));
            let height = (lines.len() as f32 * line_h + 2.0 * padding).max(styles.min_cell_height);
            Cell {
                raw,
                text: CellText::Plain(lines),
                styles: styles.clone(),
                x: 0.0,
                y: 0.0,
                width,
                height,
            }
        })
        .collect();
    let height = cells
        .iter()
        .map(|c| c.height)
        .fold(styles.min_cell_height, f32::max);

    Row {
        section,
        index,
        cells,
        height,
    }
}

/// Lay out a table against `doc`: styles resolved, columns sized, text wrapped
/// and row heights measured. Nothing is drawn, and the document's font is
/// left as it was found.
pub fn create_table(doc: &mut dyn Document, options: &TableOptions) -> Table {
    let saved_font = doc.font();
    let saved_size = doc.font_size();

    let sections = [
        SectionRows {
            section: Section::Head,
            rows: &options.head,
            styles: options.styles.with(&options.head_styles),
        },
        SectionRows {
            section: Section::Body,
            rows: &options.body,
            styles: options.styles.with(&options.body_styles),
        },
        SectionRows {
            section: Section::Foot,
            rows: &options.foot,
            styles: options.styles.with(&options.foot_styles),
        },
    ];

    let ncols = sections
        .iter()
        .flat_map(|s| s.rows.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(options.column_widths.len());

    let (page_w, _) = doc.page_size();
    let available = (page_w - options.margin.left - options.margin.right).max(0.0);
    let widths = fit_columns(doc, &options.column_widths, &sections, ncols, available);

    let mut laid_out: [Vec<Row>; 3] = Default::default();
    for (slot, section) in laid_out.iter_mut().zip(&sections) {
        *slot = section
            .rows
            .iter()
            .enumerate()
            .map(|(index, texts)| {
                build_row(doc, section.section, index, texts, &section.styles, &widths)
            })
            .collect();
    }
    let [head, body, foot] = laid_out;

    doc.set_font(saved_font.family, saved_font.style);
    doc.set_font_size(saved_size);

    log::debug!(
        "TABLE layout cols={} head={} body={} foot={} widths={:?}",
        ncols,
        head.len(),
        body.len(),
        foot.len(),
        widths
    );

    Table {
        show_head: options.show_head,
        show_foot: options.show_foot,
        start_y: options.start_y,
        margin: options.margin,
        columns: widths
            .iter()
            .enumerate()
            .map(|(index, &width)| Column { index, width })
            .collect(),
        head,
        body,
        foot,
        hooks: options.hooks.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_between_words() {
        let measure = |s: &str| s.len() as f32;
        assert_eq!(wrap_text("aa bb cc", 5.0, measure), vec!["aa bb", "cc"]);
        assert_eq!(wrap_text("a\n\nb", 10.0, measure), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10.0, measure), vec![""]);
    }

    #[test]
    fn overlong_word_keeps_its_own_line() {
        let measure = |s: &str| s.len() as f32;
        assert_eq!(wrap_text("x abcdefgh y", 4.0, measure), vec!["x", "abcdefgh", "y"]);
    }
}
