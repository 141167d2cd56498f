//! Cell content: the typed section input, its normalization into canonical
//! rich-text grids, and the draw hook that puts styled runs back into cells.

mod compat;
mod parse;

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::model::{CellRichText, Line, RichGrid, RichSections, Section, StyledRun};
use crate::table::{CellHook, CellText, cell_hook};

pub use compat::classify;
pub use parse::{flatten, line_count, parse_cell, split_lines};

/// A cell of a plain section. Only `Rich` cells carry styled runs; the rest
/// of the section stays unstyled.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Lines(Vec<String>),
    Number(f64),
    Bool(bool),
    Rich(RichCell),
}

impl CellValue {
    /// The string handed to the layout engine.
    pub fn to_content(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Lines(lines) => lines.join("\n"),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Rich(cell) => flatten(&parse_cell(cell)),
        }
    }
}

impl From<RichCell> for CellValue {
    fn from(cell: RichCell) -> Self {
        CellValue::Rich(cell)
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// One piece of rich cell input.
#[derive(Clone, Debug, PartialEq)]
pub enum RichPart {
    /// Unstyled text; may contain line breaks.
    Text(String),
    /// Styled text; may contain line breaks, each piece keeps the style.
    Run(StyledRun),
    /// An already structured line, taken verbatim.
    Line(Line),
}

impl From<&str> for RichPart {
    fn from(text: &str) -> Self {
        RichPart::Text(text.to_string())
    }
}

impl From<StyledRun> for RichPart {
    fn from(run: StyledRun) -> Self {
        RichPart::Run(run)
    }
}

impl From<Line> for RichPart {
    fn from(line: Line) -> Self {
        RichPart::Line(line)
    }
}

/// Rich input for one cell: an ordered list of parts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichCell(pub Vec<RichPart>);

impl From<&str> for RichCell {
    fn from(text: &str) -> Self {
        RichCell(vec![RichPart::from(text)])
    }
}

impl From<String> for RichCell {
    fn from(text: String) -> Self {
        RichCell(vec![RichPart::Text(text)])
    }
}

impl From<StyledRun> for RichCell {
    fn from(run: StyledRun) -> Self {
        RichCell(vec![RichPart::Run(run)])
    }
}

impl From<Vec<RichPart>> for RichCell {
    fn from(parts: Vec<RichPart>) -> Self {
        RichCell(parts)
    }
}

impl From<CellRichText> for RichCell {
    fn from(lines: CellRichText) -> Self {
        RichCell(lines.into_iter().map(RichPart::Line).collect())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Normal,
    Custom,
}

/// Content of one table section, with its format chosen by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SectionInput {
    Plain(Vec<Vec<CellValue>>),
    Rich(Vec<Vec<RichCell>>),
}

impl Default for SectionInput {
    fn default() -> Self {
        SectionInput::Plain(Vec::new())
    }
}

impl SectionInput {
    pub fn format(&self) -> InputFormat {
        match self {
            SectionInput::Plain(_) => InputFormat::Normal,
            SectionInput::Rich(_) => InputFormat::Custom,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SectionInput::Plain(rows) => rows.len(),
            SectionInput::Rich(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A section ready for the layout engine, plus the rich grid it was flattened from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedSection {
    pub compat: Vec<Vec<String>>,
    pub rich: Option<RichGrid>,
}

pub fn parse_section(input: &SectionInput) -> ParsedSection {
    match input {
        SectionInput::Plain(rows) => {
            let mut compat = Vec::with_capacity(rows.len());
            let mut grid: RichGrid = Vec::with_capacity(rows.len());
            for row in rows {
                let (texts, cells): (Vec<String>, Vec<Option<CellRichText>>) = row
                    .iter()
                    .map(|cell| match cell {
                        CellValue::Rich(rich) => {
                            let lines = parse_cell(rich);
                            (flatten(&lines), Some(lines))
                        }
                        plain => (plain.to_content(), None),
                    })
                    .unzip();
                compat.push(texts);
                grid.push(cells);
            }
            // Only keep a grid when some cell actually carries runs.
            let styled = grid.iter().flatten().any(Option::is_some);
            ParsedSection {
                compat,
                rich: styled.then_some(grid),
            }
        }
        SectionInput::Rich(rows) => {
            let grid: RichGrid = rows
                .iter()
                .map(|row| row.iter().map(|cell| Some(parse_cell(cell))).collect())
                .collect();
            let compat = grid
                .iter()
                .map(|row| row.iter().flatten().map(flatten).collect())
                .collect();
            ParsedSection {
                compat,
                rich: Some(grid),
            }
        }
    }
}

/// Fail if a rich grid does not line up cell-for-cell with the flattened rows.
pub fn check_dimensions(
    section: Section,
    compat: &[Vec<String>],
    rich: Option<&RichGrid>,
) -> Result<()> {
    let Some(grid) = rich else {
        return Ok(());
    };
    if grid.len() != compat.len() {
        return Err(Error::IndexMismatch {
            section,
            detail: format!("{} rich rows for {} rows", grid.len(), compat.len()),
        });
    }
    for (index, (rich_row, row)) in grid.iter().zip(compat).enumerate() {
        if rich_row.len() != row.len() {
            return Err(Error::IndexMismatch {
                section,
                detail: format!(
                    "row {index} has {} rich cells for {} cells",
                    rich_row.len(),
                    row.len()
                ),
            });
        }
    }
    Ok(())
}

/// A `will_draw_cell` hook replacing a cell's flattened text with its rich lines.
/// Cells outside the grids, or without runs, are left alone.
pub fn substitution_hook(sections: Rc<RichSections>) -> CellHook {
    cell_hook(move |data| {
        let rich: Option<&CellRichText> = sections
            .get(data.section)
            .and_then(|grid| grid.get(data.row_index))
            .and_then(|row| row.get(data.column_index))
            .and_then(Option::as_ref);
        if let Some(lines) = rich {
            data.cell.text = CellText::Rich(lines.clone());
        }
    })
}
