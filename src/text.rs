//! Run-aware placement of a cell's text block.

use std::borrow::Cow;

use crate::document::{Document, FontState, TextOptions};
use crate::model::{CellRichText, HAlign, Line, Script, StyledRun, VAlign};
use crate::table::CellText;

/// Line height used to place the first baseline below the top of the text box.
pub const PHYSICAL_LINE_HEIGHT: f32 = 1.15;

const DEFAULT_JUSTIFY_WIDTH: f32 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextStyles {
    pub halign: HAlign,
    pub valign: VAlign,
    /// Leave super/subscript runs out of the width used to center or right-align a line.
    pub ignore_scripts_in_width_calc: bool,
    pub max_width: Option<f32>,
}

/// Font changes for one run, undone on drop.
struct RunScope<'a> {
    doc: &'a mut dyn Document,
    font: FontState,
    size: f32,
    y_offset: f32,
}

impl<'a> RunScope<'a> {
    fn enter(doc: &'a mut dyn Document, run: &StyledRun) -> Self {
        let font = doc.font();
        let size = doc.font_size();
        if let Some(effect) = run.effect {
            doc.set_font(font.family, effect.into());
        }
        let mut y_offset = 0.0;
        if let Some(script) = run.script {
            let unit_size = size / doc.scale_factor();
            y_offset = match script {
                Script::Super => -unit_size / 6.0,
                Script::Sub => unit_size / 18.0,
            };
            doc.set_font_size(size - size / 3.0);
        }
        Self {
            doc,
            font,
            size,
            y_offset,
        }
    }
}

impl Drop for RunScope<'_> {
    fn drop(&mut self) {
        self.doc.set_font(self.font.family, self.font.style);
        self.doc.set_font_size(self.size);
    }
}

/// Unit width of a line, each run measured in its own effect font at full size.
fn line_unit_width(doc: &mut dyn Document, line: &Line, ignore_scripts: bool) -> f32 {
    let base = doc.font();
    let mut total = 0.0;
    for run in line {
        if ignore_scripts && run.script.is_some() {
            continue;
        }
        if let Some(effect) = run.effect {
            doc.set_font(base.family, effect.into());
        }
        total += doc.string_unit_width(&run.text);
        doc.set_font(base.family, base.style);
    }
    total
}

/// Draw one run at `x`, returning how far it advances the pen.
fn draw_run(doc: &mut dyn Document, run: &StyledRun, x: f32, y: f32, options: &TextOptions) -> f32 {
    let mut scope = RunScope::enter(doc, run);
    if !run.text.is_empty() {
        scope.doc.text(&run.text, x, y + scope.y_offset, options);
    }
    scope.doc.text_width(&run.text)
}

/// Draw `text` into the box whose anchor is `(x, y)`: `y` is the top of the
/// text, `x` its left edge, center or right edge depending on `halign`.
pub fn render_text(doc: &mut dyn Document, text: &CellText, x: f32, y: f32, styles: &TextStyles) {
    let font_size = doc.font_size() / doc.scale_factor();
    let line_height = font_size * doc.line_height_factor();

    let lines: Cow<'_, CellRichText> = match text {
        CellText::Rich(lines) => Cow::Borrowed(lines),
        CellText::Plain(lines) => Cow::Owned(
            lines
                .iter()
                .map(|line| vec![StyledRun::plain(line.as_str())])
                .collect(),
        ),
    };
    let line_count = lines.len() as f32;

    let mut y = y + font_size * (2.0 - PHYSICAL_LINE_HEIGHT);
    match styles.valign {
        VAlign::Top => {}
        VAlign::Middle => y -= line_count / 2.0 * line_height,
        VAlign::Bottom => y -= line_count * line_height,
    }

    let max_width = styles.max_width.unwrap_or(DEFAULT_JUSTIFY_WIDTH);
    if styles.halign == HAlign::Justify
        && let CellText::Plain(plain) = text
    {
        doc.text(&plain.join("\n"), x, y, &TextOptions::justify(max_width));
        return;
    }

    let options = match styles.halign {
        HAlign::Justify => TextOptions::justify(max_width),
        _ => TextOptions::default(),
    };

    for line in lines.iter() {
        let mut pen_x = x;
        match styles.halign {
            HAlign::Center => {
                pen_x -= line_unit_width(doc, line, styles.ignore_scripts_in_width_calc)
                    * font_size
                    * 0.5;
            }
            HAlign::Right => {
                pen_x -=
                    line_unit_width(doc, line, styles.ignore_scripts_in_width_calc) * font_size;
            }
            HAlign::Left | HAlign::Justify => {}
        }
        for run in line {
            pen_x += draw_run(doc, run, pen_x, y, &options);
        }
        y += line_height;
    }
}
