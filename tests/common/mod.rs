#![allow(dead_code)]

use pagetable_pdf::document::{Document, FontState, RectStyle, TextOptions};
use pagetable_pdf::model::{FontFamily, FontStyle, HAlign, Margin};
use pagetable_pdf::table::{CellStyles, TableOptions};

/// One `Document::text` call as seen by the mock.
#[derive(Clone, Debug, PartialEq)]
pub struct TextCall {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub style: FontStyle,
    pub align: HAlign,
    pub page: usize,
}

/// A document with fixed metrics: every glyph is 0.5 em wide (0.6 em in bold
/// styles) and lines are exactly one font size tall.
pub struct MockDocument {
    pub width: f32,
    pub height: f32,
    font: FontState,
    font_size: f32,
    page: usize,
    pages: usize,
    pub texts: Vec<TextCall>,
    pub rects: Vec<(usize, f32, f32, f32, f32)>,
}

impl MockDocument {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            font: FontState {
                family: FontFamily::Helvetica,
                style: FontStyle::Normal,
            },
            font_size: 10.0,
            page: 1,
            pages: 1,
            texts: Vec::new(),
            rects: Vec::new(),
        }
    }

    pub fn texts_on(&self, page: usize) -> Vec<&TextCall> {
        self.texts.iter().filter(|t| t.page == page).collect()
    }

    pub fn find(&self, text: &str) -> Option<&TextCall> {
        self.texts.iter().find(|t| t.text == text)
    }
}

impl Document for MockDocument {
    fn font(&self) -> FontState {
        self.font
    }

    fn set_font(&mut self, family: FontFamily, style: FontStyle) {
        self.font = FontState { family, style };
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn string_unit_width(&self, text: &str) -> f32 {
        let per_char = match self.font.style {
            FontStyle::Bold | FontStyle::BoldItalic => 0.6,
            FontStyle::Normal | FontStyle::Italic => 0.5,
        };
        text.chars().count() as f32 * per_char
    }

    fn text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions) {
        self.texts.push(TextCall {
            text: text.to_string(),
            x,
            y,
            font_size: self.font_size,
            style: self.font.style,
            align: options.align,
            page: self.page,
        });
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, _style: RectStyle) {
        self.rects.push((self.page, x, y, width, height));
    }

    fn set_text_color(&mut self, _rgb: [u8; 3]) {}
    fn set_fill_color(&mut self, _rgb: [u8; 3]) {}
    fn set_draw_color(&mut self, _rgb: [u8; 3]) {}
    fn set_line_width(&mut self, _width: f32) {}

    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn line_height_factor(&self) -> f32 {
        1.0
    }

    fn page_number(&self) -> usize {
        self.page
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn add_page(&mut self) {
        self.pages += 1;
        self.page = self.pages;
    }

    fn set_page(&mut self, page: usize) {
        if (1..=self.pages).contains(&page) {
            self.page = page;
        }
    }
}

/// Options on a 200x300 page where every single-line row is 20 units tall:
/// font 10, padding 5, margins 10.
pub fn small_page_options() -> TableOptions {
    TableOptions {
        margin: Margin::uniform(10.0),
        styles: CellStyles {
            font_size: 10.0,
            cell_padding: 5.0,
            ..CellStyles::default()
        },
        head: vec![vec!["Name".into(), "Value".into()]],
        foot: vec![vec!["Total".into(), "-".into()]],
        ..TableOptions::default()
    }
}

pub fn small_page() -> MockDocument {
    MockDocument::new(200.0, 300.0)
}

pub fn numbered_rows(n: usize) -> Vec<Vec<String>> {
    (0..n).map(|i| vec![format!("row {i}"), i.to_string()]).collect()
}
