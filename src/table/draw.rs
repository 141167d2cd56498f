use crate::document::{Document, RectStyle};
use crate::model::{HAlign, ShowFoot, ShowHead, VAlign};
use crate::text::{TextStyles, render_text};

use super::{Cell, CellHookData, Hooks, Row, Table};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableOutcome {
    /// Absolute page the table started on.
    pub start_page: usize,
    pub end_page: usize,
    /// Bottom of the last drawn row.
    pub final_y: f32,
}

fn draw_cell(doc: &mut dyn Document, cell: &Cell) {
    let s = &cell.styles;
    let stroke = s.line_width > 0.0;
    if let Some(fill) = s.fill_color {
        doc.set_fill_color(fill);
    }
    if stroke {
        doc.set_draw_color(s.line_color);
        doc.set_line_width(s.line_width);
    }
    let rect_style = match (s.fill_color.is_some(), stroke) {
        (true, true) => Some(RectStyle::FillStroke),
        (true, false) => Some(RectStyle::Fill),
        (false, true) => Some(RectStyle::Stroke),
        (false, false) => None,
    };
    if let Some(style) = rect_style {
        doc.rect(cell.x, cell.y, cell.width, cell.height, style);
    }

    doc.set_font(s.font, s.font_style);
    doc.set_font_size(s.font_size);
    doc.set_text_color(s.text_color);

    let pad = s.cell_padding;
    let x = match s.halign {
        HAlign::Left | HAlign::Justify => cell.x + pad,
        HAlign::Center => cell.x + cell.width / 2.0,
        HAlign::Right => cell.x + cell.width - pad,
    };
    let y = match s.valign {
        VAlign::Top => cell.y + pad,
        VAlign::Middle => cell.y + cell.height / 2.0,
        VAlign::Bottom => cell.y + cell.height - pad,
    };
    let styles = TextStyles {
        halign: s.halign,
        valign: s.valign,
        ignore_scripts_in_width_calc: s.ignore_scripts_in_width_calc,
        max_width: Some((cell.width - 2.0 * pad).max(0.0)),
    };
    render_text(doc, &cell.text, x, y, &styles);
}

fn draw_row(doc: &mut dyn Document, hooks: &Hooks, row: &mut Row, x: f32, y: f32, page: usize) {
    let mut cell_x = x;
    for (column_index, cell) in row.cells.iter_mut().enumerate() {
        cell.x = cell_x;
        cell.y = y;
        cell.height = row.height;
        cell_x += cell.width;

        let mut data = CellHookData {
            section: row.section,
            row_index: row.index,
            column_index,
            page_number: page,
            cell,
        };
        for hook in &hooks.will_draw_cell {
            hook(&mut data);
        }
        draw_cell(doc, data.cell);
        for hook in &hooks.did_draw_cell {
            hook(&mut data);
        }
    }
}

/// Draws consecutive rows from `y` down, returning the new `y`.
fn draw_rows(
    doc: &mut dyn Document,
    hooks: &Hooks,
    rows: &mut [Row],
    x: f32,
    mut y: f32,
    page: usize,
) -> f32 {
    for row in rows {
        draw_row(doc, hooks, row, x, y, page);
        y += row.height;
    }
    y
}

/// Draw a laid-out table, adding pages as body rows overflow. The document's
/// font and size are restored afterwards.
pub fn draw_table(doc: &mut dyn Document, table: &mut Table) -> TableOutcome {
    let saved_font = doc.font();
    let saved_size = doc.font_size();
    let start_page = doc.page_number();
    let (_, page_h) = doc.page_size();

    let head_h = table.head_height();
    let foot_h = table.foot_height();
    let hooks = table.hooks.clone();
    let Table {
        show_head,
        show_foot,
        start_y,
        margin,
        head,
        body,
        foot,
        ..
    } = table;
    let (show_head, show_foot, margin) = (*show_head, *show_foot, *margin);
    let left = margin.left;
    let page_bottom = page_h - margin.bottom;
    let reserved = if show_foot == ShowFoot::EveryPage {
        foot_h
    } else {
        0.0
    };

    let mut page = 1;
    let mut y = start_y.unwrap_or(margin.top);
    if show_head != ShowHead::Never {
        y = draw_rows(doc, &hooks, head, left, y, page);
    }

    let mut rows_on_page = 0usize;
    for row in body.iter_mut() {
        let fresh_page = page > 1 && rows_on_page == 0;
        if !fresh_page && y + row.height > page_bottom - reserved {
            log::debug!(
                "TABLE break before body row={} row_h={:.2} y={:.2} page={}",
                row.index,
                row.height,
                y,
                page
            );
            if show_foot == ShowFoot::EveryPage {
                draw_rows(doc, &hooks, foot, left, y, page);
            }
            doc.add_page();
            page += 1;
            rows_on_page = 0;
            y = margin.top;
            if show_head == ShowHead::EveryPage {
                y = draw_rows(doc, &hooks, head, left, y, page);
            }
        }
        draw_row(doc, &hooks, row, left, y, page);
        y += row.height;
        rows_on_page += 1;
    }

    if show_foot != ShowFoot::Never && !foot.is_empty() {
        if show_foot == ShowFoot::LastPage && y + foot_h > page_bottom && y > margin.top + head_h {
            log::debug!("TABLE foot moves to a new page, y={:.2} page={}", y, page);
            doc.add_page();
            page += 1;
            y = margin.top;
            if show_head == ShowHead::EveryPage {
                y = draw_rows(doc, &hooks, head, left, y, page);
            }
        }
        y = draw_rows(doc, &hooks, foot, left, y, page);
    }

    doc.set_font(saved_font.family, saved_font.style);
    doc.set_font_size(saved_size);

    TableOutcome {
        start_page,
        end_page: doc.page_number(),
        final_y: y,
    }
}
