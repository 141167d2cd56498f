//! A [`Document`] that records drawing into PDF content streams and
//! assembles them with `pdf-writer`.

use std::collections::BTreeSet;
use std::path::Path;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::document::{Document, FontState, RectStyle, TextOptions};
use crate::error::Result;
use crate::fonts::{font_entry, resource_name, to_winansi_bytes};
use crate::model::{FontFamily, FontStyle, HAlign};
use crate::table::wrap_text;

/// Page dimensions in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

struct Page {
    size: PageSize,
    content: Content,
}

impl Page {
    fn new(size: PageSize) -> Self {
        Self {
            size,
            content: Content::new(),
        }
    }
}

fn rgb(color: [u8; 3]) -> (f32, f32, f32) {
    (
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

pub struct PdfDocument {
    pages: Vec<Page>,
    current: usize,
    page_size: PageSize,
    font: FontState,
    font_size: f32,
    text_color: [u8; 3],
    fill_color: [u8; 3],
    draw_color: [u8; 3],
    line_width: f32,
    used_fonts: BTreeSet<(FontFamily, FontStyle)>,
}

impl PdfDocument {
    /// A document with one empty page; new pages use the same size.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            pages: vec![Page::new(page_size)],
            current: 0,
            page_size,
            font: FontState {
                family: FontFamily::Helvetica,
                style: FontStyle::Normal,
            },
            font_size: 16.0,
            text_color: [0, 0, 0],
            fill_color: [255, 255, 255],
            draw_color: [0, 0, 0],
            line_width: 0.2,
            used_fonts: BTreeSet::new(),
        }
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.current]
    }

    /// Lines `text` is set in: explicit breaks, then wrapping at `max_width`.
    fn layout_lines(&self, text: &str, max_width: Option<f32>) -> Vec<String> {
        match max_width {
            Some(width) if width > 0.0 => wrap_text(text, width, |s| self.text_width(s)),
            _ => crate::content::split_lines(text)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Serialize all pages into a PDF file.
    pub fn finish(self) -> Vec<u8> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        let mut used_fonts = self.used_fonts;
        if used_fonts.is_empty() {
            used_fonts.insert((FontFamily::Helvetica, FontStyle::Normal));
        }
        let font_pairs: Vec<(String, Ref)> = used_fonts
            .iter()
            .map(|&(family, style)| {
                let font_ref = alloc();
                pdf.type1_font(font_ref)
                    .base_font(Name(font_entry(family, style).base_font.as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                (resource_name(family, style), font_ref)
            })
            .collect();

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        let mut sizes = Vec::with_capacity(n);
        for (i, page) in self.pages.into_iter().enumerate() {
            sizes.push(page.size);
            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for (i, size) in sizes.iter().enumerate() {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, size.width, size.height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }

        log::info!(
            "PDF assembly: pages={} fonts={} time={:.1}ms",
            n,
            font_pairs.len(),
            t0.elapsed().as_secs_f64() * 1000.0
        );

        pdf.finish()
    }

    pub fn write_to(self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.finish())?;
        Ok(())
    }
}

impl Document for PdfDocument {
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
        font_entry(self.font.family, self.font.style).unit_width(text)
    }

    fn text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions) {
        let lines = self.layout_lines(text, options.max_width);
        let FontState { family, style } = self.font;
        self.used_fonts.insert((family, style));
        let font_name = resource_name(family, style);
        let size = self.font_size;
        let line_h = size / self.scale_factor() * self.line_height_factor();
        let justify_width = options.max_width.unwrap_or(0.0);
        let page_h = self.page_size().1;
        let (r, g, b) = rgb(self.text_color);

        let widths: Vec<f32> = lines.iter().map(|l| self.text_width(l)).collect();
        let last = lines.len().saturating_sub(1);
        let content = &mut self.page_mut().content;
        for (i, (line, width)) in lines.iter().zip(widths).enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_x = match options.align {
                HAlign::Left | HAlign::Justify => x,
                HAlign::Center => x - width / 2.0,
                HAlign::Right => x - width,
            };
            let gaps = line.matches(' ').count();
            let word_spacing = if options.align == HAlign::Justify && i != last && gaps > 0 {
                ((justify_width - width) / gaps as f32).max(0.0)
            } else {
                0.0
            };

            content.begin_text();
            content.set_fill_rgb(r, g, b);
            content.set_font(Name(font_name.as_bytes()), size);
            content.set_word_spacing(word_spacing);
            content.next_line(line_x, page_h - (y + i as f32 * line_h));
            content.show(Str(&to_winansi_bytes(line)));
            content.end_text();
        }
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: RectStyle) {
        let page_h = self.page_size().1;
        let fill = rgb(self.fill_color);
        let stroke = rgb(self.draw_color);
        let line_width = self.line_width;
        let content = &mut self.page_mut().content;
        content.save_state();
        content.set_fill_rgb(fill.0, fill.1, fill.2);
        content.set_stroke_rgb(stroke.0, stroke.1, stroke.2);
        content.set_line_width(line_width);
        content.rect(x, page_h - y - height, width, height);
        match style {
            RectStyle::Stroke => content.stroke(),
            RectStyle::Fill => content.fill_nonzero(),
            RectStyle::FillStroke => content.fill_nonzero_and_stroke(),
        };
        content.restore_state();
    }

    fn set_text_color(&mut self, rgb: [u8; 3]) {
        self.text_color = rgb;
    }

    fn set_fill_color(&mut self, rgb: [u8; 3]) {
        self.fill_color = rgb;
    }

    fn set_draw_color(&mut self, rgb: [u8; 3]) {
        self.draw_color = rgb;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn page_size(&self) -> (f32, f32) {
        let size = self.pages[self.current].size;
        (size.width, size.height)
    }

    fn page_number(&self) -> usize {
        self.current + 1
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(Page::new(self.page_size));
        self.current = self.pages.len() - 1;
    }

    fn set_page(&mut self, page: usize) {
        if page == 0 || page > self.pages.len() {
            log::warn!("set_page({page}) out of range 1..={}, ignored", self.pages.len());
            return;
        }
        self.current = page - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_page_moves_to_the_new_page() {
        let mut doc = PdfDocument::new(PageSize::LETTER);
        doc.add_page();
        doc.add_page();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.page_number(), 3);
        doc.set_page(1);
        assert_eq!(doc.page_number(), 1);
        doc.set_page(9);
        assert_eq!(doc.page_number(), 1);
    }

    #[test]
    fn text_width_follows_font_size() {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.set_font(FontFamily::Courier, FontStyle::Normal);
        doc.set_font_size(10.0);
        assert!((doc.text_width("abcd") - 24.0).abs() < 1e-4);
    }
}
