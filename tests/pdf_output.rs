mod common;

use pagetable_pdf::content::{RichCell, RichPart, SectionInput};
use pagetable_pdf::input::TableFile;
use pagetable_pdf::model::{Script, StyledRun};
use pagetable_pdf::table::TableOptions;
use pagetable_pdf::{
    DecoratedOptions, Document, PageSize, PdfDocument, ProbeOptions, auto_table,
    auto_table_with_text_decorators, draw_by_page,
};

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

/// Width and height of the first `/MediaBox` in an uncompressed page dictionary.
fn pdf_mediabox(pdf: &[u8]) -> Option<(f32, f32)> {
    let text = String::from_utf8_lossy(pdf);
    let start = text.find("/MediaBox [")? + "/MediaBox [".len();
    let end = start + text[start..].find(']')?;
    let nums: Vec<f32> = text[start..end]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    (nums.len() == 4).then(|| (nums[2] - nums[0], nums[3] - nums[1]))
}

#[test]
fn plain_table_spans_pages() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut doc = PdfDocument::new(PageSize::A4);
    let options = TableOptions {
        head: vec![vec!["#".into(), "Label".into()]],
        body: common::numbered_rows(120),
        ..TableOptions::default()
    };
    let outcome = auto_table(&mut doc, &options);
    assert_eq!(outcome.start_page, 1);
    assert!(outcome.end_page > 1);
    let pages = doc.page_count();
    assert_eq!(pages, outcome.end_page);

    let bytes = doc.finish();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(contains(&bytes, &format!("/Count {pages}")));
    assert!(contains(&bytes, "/BaseFont /Helvetica-Bold"));
    assert!(contains(&bytes, "/WinAnsiEncoding"));
    let (w, h) = pdf_mediabox(&bytes).expect("media box");
    assert!((w - 595.28).abs() < 0.01 && (h - 841.89).abs() < 0.01);
}

#[test]
fn decorated_table_registers_run_fonts() {
    let mut doc = PdfDocument::new(PageSize::LETTER);
    let decorated = DecoratedOptions {
        body: SectionInput::Rich(vec![vec![RichCell(vec![
            RichPart::from("E = mc"),
            RichPart::from(StyledRun::scripted("2", Script::Super)),
        ])]]),
        ..DecoratedOptions::default()
    };
    auto_table_with_text_decorators(&mut doc, decorated).unwrap();
    let bytes = doc.finish();
    assert!(contains(&bytes, "/BaseFont /Helvetica"));
    let (w, h) = pdf_mediabox(&bytes).expect("media box");
    assert!((w - 612.0).abs() < 0.01 && (h - 792.0).abs() < 0.01);
}

#[test]
fn json_file_renders_page_by_page() {
    let file = TableFile::from_json(
        r#"{
            "head": [["Compound", "Note"]],
            "body": [
                ["water", "plain"],
                [[{"text": "H"}, {"text": "2", "script": "sub"}, {"text": "O"}], {"text": "bold", "effect": "bold"}]
            ],
            "foot": [["end", ""]],
            "showFoot": "lastPage",
            "margin": 30,
            "styles": {"font": "Times New Roman", "fontSize": 9}
        }"#,
    )
    .unwrap();
    let decorated = file.into_decorated().unwrap();
    let mut session = draw_by_page(
        decorated,
        || PdfDocument::new(PageSize::A4),
        &ProbeOptions::default(),
    )
    .unwrap();
    assert_eq!(session.page_count(), 1);

    let mut doc = PdfDocument::new(PageSize::A4);
    while session.draw_next_page(&mut doc).unwrap() {}
    assert_eq!(doc.page_count(), 1);
    let bytes = doc.finish();
    assert!(contains(&bytes, "/Count 1"));
    assert!(contains(&bytes, "/BaseFont /Times-Roman"));
    assert!(contains(&bytes, "/BaseFont /Times-Bold"));
}
