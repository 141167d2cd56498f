mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;

use pagetable_pdf::content::{CellValue, RichCell, RichPart, SectionInput};
use pagetable_pdf::model::{FontStyle, Script, Section, ShowHead, StyledRun, TextEffect};
use pagetable_pdf::table::{CellText, cell_hook};
use pagetable_pdf::{DecoratedOptions, ProbeOptions, auto_table_with_text_decorators, draw_by_page};

use common::{numbered_rows, small_page, small_page_options};

#[test]
fn user_will_draw_hook_runs_before_runs_are_restored() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut options = small_page_options();
    let log = Rc::clone(&seen);
    options.hooks.will_draw_cell.push(cell_hook(move |data| {
        log.borrow_mut()
            .push((data.section, data.row_index, data.column_index, data.cell.text.clone()));
        data.cell.text = CellText::Plain(vec!["overwritten".into()]);
    }));

    let decorated = DecoratedOptions {
        body: SectionInput::Rich(vec![vec![
            RichCell::from(StyledRun::styled("bold", TextEffect::Bold)),
            RichCell(vec![
                RichPart::from("x"),
                RichPart::from(StyledRun::scripted("2", Script::Super)),
            ]),
        ]]),
        ..DecoratedOptions::new(options)
    };
    let mut doc = small_page();
    auto_table_with_text_decorators(&mut doc, decorated).unwrap();

    // the user hook sees the flattened text the layout worked with
    assert_eq!(
        *seen.borrow(),
        vec![
            (Section::Body, 0, 0, CellText::Plain(vec!["bold".into()])),
            (Section::Body, 0, 1, CellText::Plain(vec!["x2".into()])),
        ]
    );
    assert!(doc.find("overwritten").is_none());
    assert_eq!(doc.find("bold").map(|t| t.style), Some(FontStyle::Bold));
    assert!(doc.find("x").is_some() && doc.find("2").is_some());
}

#[test]
fn user_did_draw_hooks_fire_while_measuring_and_drawing() {
    let body_cells = Rc::new(Cell::new(0usize));
    let mut options = small_page_options();
    let counter = Rc::clone(&body_cells);
    options.hooks.did_draw_cell.push(cell_hook(move |data| {
        if data.section == Section::Body {
            counter.set(counter.get() + 1);
        }
    }));

    let decorated = DecoratedOptions {
        body: SectionInput::Plain(
            numbered_rows(30)
                .into_iter()
                .map(|row| row.into_iter().map(CellValue::from).collect())
                .collect(),
        ),
        show_head: Some(ShowHead::EveryPage),
        ..DecoratedOptions::new(options)
    };
    let mut session = draw_by_page(decorated, small_page, &ProbeOptions::default()).unwrap();
    let while_measuring = body_cells.get();
    assert!(while_measuring > 0);

    let mut doc = small_page();
    assert!(session.draw_next_page(&mut doc).unwrap());
    // 13 rows of 2 cells fit under the head
    assert_eq!(body_cells.get() - while_measuring, 26);
}
