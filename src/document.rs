//! The drawing surface the table engine and text renderer work against.
//!
//! Coordinates are in document units with the origin at the top-left corner of
//! the page and `y` growing downwards. Font sizes are in points; `scale_factor`
//! converts points to document units.

use crate::model::{FontFamily, FontStyle, HAlign};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontState {
    pub family: FontFamily,
    pub style: FontStyle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextOptions {
    pub align: HAlign,
    /// Wrap width; required for `HAlign::Justify`.
    pub max_width: Option<f32>,
}

impl TextOptions {
    pub fn justify(max_width: f32) -> Self {
        Self {
            align: HAlign::Justify,
            max_width: Some(max_width),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectStyle {
    Stroke,
    Fill,
    FillStroke,
}

pub trait Document {
    fn font(&self) -> FontState;
    fn set_font(&mut self, family: FontFamily, style: FontStyle);
    fn font_size(&self) -> f32;
    fn set_font_size(&mut self, size: f32);

    /// Width of `text` in em units under the current font.
    fn string_unit_width(&self, text: &str) -> f32;

    /// Width of `text` in document units under the current font and size.
    fn text_width(&self, text: &str) -> f32 {
        self.string_unit_width(text) * self.font_size() / self.scale_factor()
    }

    /// Place `text` with its baseline at `y`.
    fn text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: RectStyle);

    fn set_text_color(&mut self, rgb: [u8; 3]);
    fn set_fill_color(&mut self, rgb: [u8; 3]);
    fn set_draw_color(&mut self, rgb: [u8; 3]);
    fn set_line_width(&mut self, width: f32);

    /// `(width, height)` of the current page.
    fn page_size(&self) -> (f32, f32);

    fn scale_factor(&self) -> f32 {
        1.0
    }

    fn line_height_factor(&self) -> f32 {
        1.15
    }

    /// 1-based number of the page currently drawn on.
    fn page_number(&self) -> usize;
    fn page_count(&self) -> usize;
    fn add_page(&mut self);
    fn set_page(&mut self, page: usize);
}
