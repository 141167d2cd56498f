mod common;

use pagetable_pdf::document::Document;
use pagetable_pdf::model::{FontStyle, HAlign, Script, StyledRun, TextEffect, VAlign};
use pagetable_pdf::table::CellText;
use pagetable_pdf::text::{TextStyles, render_text};

use common::MockDocument;

const EPS: f32 = 1e-4;

fn doc() -> MockDocument {
    let mut doc = MockDocument::new(400.0, 400.0);
    doc.set_font_size(10.0);
    doc
}

fn formula() -> CellText {
    CellText::Rich(vec![vec![
        StyledRun::plain("ab"),
        StyledRun::scripted("cd", Script::Super),
    ]])
}

fn right(ignore_scripts: bool) -> TextStyles {
    TextStyles {
        halign: HAlign::Right,
        ignore_scripts_in_width_calc: ignore_scripts,
        ..TextStyles::default()
    }
}

#[test]
fn right_alignment_can_leave_scripts_out() {
    let mut doc = doc();
    render_text(&mut doc, &formula(), 100.0, 0.0, &right(true));
    assert!((doc.texts[0].x - 90.0).abs() < EPS);
    assert!((doc.texts[1].x - 100.0).abs() < EPS);

    let mut doc = self::doc();
    render_text(&mut doc, &formula(), 100.0, 0.0, &right(false));
    assert!((doc.texts[0].x - 80.0).abs() < EPS);
}

#[test]
fn center_alignment_uses_half_the_width() {
    let mut doc = doc();
    let styles = TextStyles {
        halign: HAlign::Center,
        ignore_scripts_in_width_calc: true,
        ..TextStyles::default()
    };
    render_text(&mut doc, &formula(), 100.0, 0.0, &styles);
    assert!((doc.texts[0].x - 95.0).abs() < EPS);
}

#[test]
fn scripts_shift_and_shrink_then_restore() {
    let mut doc = doc();
    let text = CellText::Rich(vec![vec![
        StyledRun::plain("x"),
        StyledRun::scripted("2", Script::Super),
        StyledRun::scripted("i", Script::Sub),
        StyledRun::plain("y"),
    ]]);
    render_text(&mut doc, &text, 0.0, 0.0, &TextStyles::default());

    let baseline = 10.0 * (2.0 - 1.15);
    let [x, sup, sub, y] = [0, 1, 2, 3].map(|i| doc.texts[i].clone());
    assert!((x.y - baseline).abs() < EPS);
    assert!((sup.y - (baseline - 10.0 / 6.0)).abs() < EPS);
    assert!((sub.y - (baseline + 10.0 / 18.0)).abs() < EPS);
    assert!((sup.font_size - 10.0 * 2.0 / 3.0).abs() < EPS);
    assert!((y.y - baseline).abs() < EPS);
    assert_eq!(y.font_size, 10.0);
    assert_eq!(doc.font_size(), 10.0);
}

#[test]
fn effects_switch_style_for_one_run() {
    let mut doc = doc();
    let text = CellText::Rich(vec![vec![
        StyledRun::styled("b", TextEffect::Bold),
        StyledRun::styled("i", TextEffect::Italic),
        StyledRun::plain("n"),
    ]]);
    render_text(&mut doc, &text, 0.0, 0.0, &TextStyles::default());
    let styles: Vec<FontStyle> = doc.texts.iter().map(|t| t.style).collect();
    assert_eq!(styles, vec![FontStyle::Bold, FontStyle::Italic, FontStyle::Normal]);
    // bold glyphs are 0.6 em wide in the mock
    assert!((doc.texts[1].x - 6.0).abs() < EPS);
    assert_eq!(doc.font().style, FontStyle::Normal);
}

#[test]
fn vertical_alignment_shifts_by_line_count() {
    let text = CellText::Plain(vec!["one".into(), "two".into()]);
    let baseline = 10.0 * (2.0 - 1.15);

    let mut doc = doc();
    let middle = TextStyles {
        valign: VAlign::Middle,
        ..TextStyles::default()
    };
    render_text(&mut doc, &text, 0.0, 50.0, &middle);
    assert!((doc.texts[0].y - (50.0 + baseline - 10.0)).abs() < EPS);
    assert!((doc.texts[1].y - (50.0 + baseline)).abs() < EPS);

    let mut doc = self::doc();
    let bottom = TextStyles {
        valign: VAlign::Bottom,
        ..TextStyles::default()
    };
    render_text(&mut doc, &text, 0.0, 50.0, &bottom);
    assert!((doc.texts[0].y - (50.0 + baseline - 20.0)).abs() < EPS);
}

#[test]
fn justified_plain_text_is_one_call() {
    let mut doc = doc();
    let styles = TextStyles {
        halign: HAlign::Justify,
        max_width: Some(120.0),
        ..TextStyles::default()
    };
    let text = CellText::Plain(vec!["first line".into(), "second".into()]);
    render_text(&mut doc, &text, 5.0, 0.0, &styles);
    assert_eq!(doc.texts.len(), 1);
    assert_eq!(doc.texts[0].text, "first line\nsecond");
    assert_eq!(doc.texts[0].align, HAlign::Justify);
}
