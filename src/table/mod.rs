//! A small table layout engine: options in, geometry computed by
//! [`create_table`], primitives drawn by [`draw_table`].

mod draw;
mod layout;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use crate::fonts::parse_family;
use crate::model::{
    CellRichText, FontFamily, FontStyle, HAlign, Margin, Section, ShowFoot, ShowHead, VAlign,
};

pub use draw::{TableOutcome, draw_table};
pub use layout::create_table;
pub(crate) use layout::wrap_text;

#[derive(Clone, Debug, PartialEq)]
pub struct CellStyles {
    pub font: FontFamily,
    pub font_style: FontStyle,
    /// Points.
    pub font_size: f32,
    pub halign: HAlign,
    pub valign: VAlign,
    pub cell_padding: f32,
    /// Border width; 0 draws no border.
    pub line_width: f32,
    pub line_color: [u8; 3],
    pub fill_color: Option<[u8; 3]>,
    pub text_color: [u8; 3],
    pub min_cell_height: f32,
    pub ignore_scripts_in_width_calc: bool,
}

impl Default for CellStyles {
    fn default() -> Self {
        Self {
            font: FontFamily::Helvetica,
            font_style: FontStyle::Normal,
            font_size: 10.0,
            halign: HAlign::Left,
            valign: VAlign::Top,
            cell_padding: 5.0,
            line_width: 0.5,
            line_color: [200, 200, 200],
            fill_color: None,
            text_color: [20, 20, 20],
            min_cell_height: 0.0,
            ignore_scripts_in_width_calc: false,
        }
    }
}

/// Per-section style changes layered over the table's base styles.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    #[serde(deserialize_with = "family_by_name")]
    pub font: Option<FontFamily>,
    pub font_style: Option<FontStyle>,
    pub font_size: Option<f32>,
    pub halign: Option<HAlign>,
    pub valign: Option<VAlign>,
    pub cell_padding: Option<f32>,
    pub line_width: Option<f32>,
    pub line_color: Option<[u8; 3]>,
    pub fill_color: Option<[u8; 3]>,
    pub text_color: Option<[u8; 3]>,
    pub min_cell_height: Option<f32>,
    pub ignore_scripts_in_width_calc: Option<bool>,
}

/// Font families are matched loosely by name; unknown names fall back to Helvetica.
fn family_by_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<FontFamily>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.map(|name| parse_family(&name)))
}

impl CellStyles {
    pub fn with(&self, o: &StyleOverrides) -> CellStyles {
        CellStyles {
            font: o.font.unwrap_or(self.font),
            font_style: o.font_style.unwrap_or(self.font_style),
            font_size: o.font_size.unwrap_or(self.font_size),
            halign: o.halign.unwrap_or(self.halign),
            valign: o.valign.unwrap_or(self.valign),
            cell_padding: o.cell_padding.unwrap_or(self.cell_padding),
            line_width: o.line_width.unwrap_or(self.line_width),
            line_color: o.line_color.unwrap_or(self.line_color),
            fill_color: o.fill_color.or(self.fill_color),
            text_color: o.text_color.unwrap_or(self.text_color),
            min_cell_height: o.min_cell_height.unwrap_or(self.min_cell_height),
            ignore_scripts_in_width_calc: o
                .ignore_scripts_in_width_calc
                .unwrap_or(self.ignore_scripts_in_width_calc),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellText {
    /// Wrapped plain lines, as laid out by the engine.
    Plain(Vec<String>),
    Rich(CellRichText),
}

impl CellText {
    pub fn line_count(&self) -> usize {
        match self {
            CellText::Plain(lines) => lines.len(),
            CellText::Rich(lines) => lines.len(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cell {
    /// Text as given, before wrapping.
    pub raw: String,
    pub text: CellText,
    pub styles: CellStyles,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct Row {
    pub section: Section,
    pub index: usize,
    pub cells: Vec<Cell>,
    pub height: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub index: usize,
    pub width: f32,
}

/// What a cell hook sees: where the cell sits, and the cell about to be (or just) drawn.
pub struct CellHookData<'a> {
    pub section: Section,
    pub row_index: usize,
    pub column_index: usize,
    /// 1-based page number relative to the page the table started on.
    pub page_number: usize,
    pub cell: &'a mut Cell,
}

pub type CellHook = Rc<dyn Fn(&mut CellHookData<'_>)>;

pub fn cell_hook<F>(f: F) -> CellHook
where
    F: Fn(&mut CellHookData<'_>) + 'static,
{
    Rc::new(f)
}

/// Hook lists; hooks run in order.
#[derive(Clone, Default)]
pub struct Hooks {
    pub will_draw_cell: Vec<CellHook>,
    pub did_draw_cell: Vec<CellHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("will_draw_cell", &self.will_draw_cell.len())
            .field("did_draw_cell", &self.did_draw_cell.len())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct TableOptions {
    pub head: Vec<Vec<String>>,
    pub body: Vec<Vec<String>>,
    pub foot: Vec<Vec<String>>,
    pub show_head: ShowHead,
    pub show_foot: ShowFoot,
    /// Top of the table on its first page; defaults to the top margin.
    pub start_y: Option<f32>,
    pub margin: Margin,
    pub styles: CellStyles,
    pub head_styles: StyleOverrides,
    pub body_styles: StyleOverrides,
    pub foot_styles: StyleOverrides,
    /// Fixed column widths; `None` entries are sized automatically.
    pub column_widths: Vec<Option<f32>>,
    pub hooks: Hooks,
}

impl Default for TableOptions {
    fn default() -> Self {
        let banner = StyleOverrides {
            font_style: Some(FontStyle::Bold),
            fill_color: Some([41, 128, 185]),
            text_color: Some([255, 255, 255]),
            ..StyleOverrides::default()
        };
        Self {
            head: Vec::new(),
            body: Vec::new(),
            foot: Vec::new(),
            show_head: ShowHead::EveryPage,
            show_foot: ShowFoot::EveryPage,
            start_y: None,
            margin: Margin::default(),
            styles: CellStyles::default(),
            head_styles: banner.clone(),
            body_styles: StyleOverrides::default(),
            foot_styles: banner,
            column_widths: Vec::new(),
            hooks: Hooks::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Table {
    pub show_head: ShowHead,
    pub show_foot: ShowFoot,
    pub start_y: Option<f32>,
    pub margin: Margin,
    pub columns: Vec<Column>,
    pub head: Vec<Row>,
    pub body: Vec<Row>,
    pub foot: Vec<Row>,
    pub hooks: Hooks,
}

impl Table {
    pub fn head_height(&self) -> f32 {
        self.head.iter().map(|r| r.height).sum()
    }

    pub fn foot_height(&self) -> f32 {
        self.foot.iter().map(|r| r.height).sum()
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}
