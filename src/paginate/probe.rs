use std::cell::RefCell;
use std::rc::Rc;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::model::{Appearance, AppearanceCapacities, Section, ShowFoot, ShowHead};
use crate::table::{TableOptions, cell_hook, create_table, draw_table};

use super::ProbeOptions;

/// Body rows seen while drawing one probe pass.
#[derive(Debug, Default)]
struct Observation {
    last_on_first_page: Option<usize>,
    overflowed: bool,
}

fn grow(body: &mut Vec<Vec<String>>, rows: usize) {
    let start = body.len();
    body.extend((start..start + rows).map(|i| vec![format!("[{i}]")]));
}

fn probe_appearance(
    doc: &mut dyn Document,
    options: &TableOptions,
    appearance: Appearance,
    body: &mut Vec<Vec<String>>,
    probe_options: &ProbeOptions,
) -> Result<usize> {
    let observed = Rc::new(RefCell::new(Observation::default()));

    let mut pass_options = options.clone();
    pass_options.show_head = if appearance.shows_head() {
        ShowHead::EveryPage
    } else {
        ShowHead::Never
    };
    pass_options.show_foot = if appearance.shows_foot() {
        ShowFoot::EveryPage
    } else {
        ShowFoot::Never
    };
    let observer = Rc::clone(&observed);
    pass_options.hooks.did_draw_cell.push(cell_hook(move |data| {
        if data.section != Section::Body {
            return;
        }
        let mut seen = observer.borrow_mut();
        if data.page_number == 1 {
            seen.last_on_first_page = seen.last_on_first_page.max(Some(data.row_index));
        } else {
            seen.overflowed = true;
        }
    }));

    for iteration in 0..probe_options.max_iterations {
        if iteration > 0 || body.is_empty() {
            grow(body, probe_options.rows_per_step.max(1));
        }
        pass_options.body.clone_from(body);
        *observed.borrow_mut() = Observation::default();

        let mut table = create_table(doc, &pass_options);
        draw_table(doc, &mut table);

        let seen = observed.borrow();
        log::debug!(
            "PROBE {} pass={} rows={} last_on_first_page={:?} overflowed={}",
            appearance,
            iteration + 1,
            body.len(),
            seen.last_on_first_page,
            seen.overflowed
        );
        if seen.overflowed {
            return Ok(seen.last_on_first_page.map_or(0, |i| i + 1));
        }
    }

    Err(Error::ProbeNonTermination {
        appearance,
        iterations: probe_options.max_iterations,
    })
}

/// Measure, for each head/foot combination, how many body rows fit on the
/// first page of a document from `make_doc`. Each combination draws into its
/// own document; the synthetic body keeps growing across combinations.
pub fn probe<D, F>(
    options: &TableOptions,
    mut make_doc: F,
    probe_options: &ProbeOptions,
) -> Result<AppearanceCapacities>
where
    D: Document,
    F: FnMut() -> D,
{
    let t0 = std::time::Instant::now();
    let mut caps = AppearanceCapacities::default();
    let mut body = Vec::new();
    for appearance in Appearance::ALL {
        let mut doc = make_doc();
        let rows = probe_appearance(&mut doc, options, appearance, &mut body, probe_options)?;
        log::debug!("PROBE {appearance}: {rows} rows on the first page");
        caps.set(appearance, rows);
    }
    log::info!(
        "Probe: body_only={} head={} foot={} head_foot={} time={:.1}ms",
        caps.body_only,
        caps.head,
        caps.foot,
        caps.head_foot,
        t0.elapsed().as_secs_f64() * 1000.0
    );
    Ok(caps)
}
