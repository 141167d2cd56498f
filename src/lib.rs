pub mod content;
pub mod document;
mod error;
mod fonts;
pub mod input;
pub mod model;
pub mod paginate;
pub mod pdf;
pub mod table;
pub mod text;

pub use content::{RichCell, RichPart, SectionInput, flatten, parse_section};
pub use document::Document;
pub use error::{Error, Result};
pub use fonts::parse_family;
pub use paginate::{DrawByPage, ProbeOptions, delimit, probe, validate_delimits};
pub use pdf::{PageSize, PdfDocument};
pub use table::{TableOptions, TableOutcome, create_table, draw_table};
pub use text::render_text;

use std::rc::Rc;
use std::time::Instant;

use content::{check_dimensions, substitution_hook};
use model::{RichSections, Section, ShowFoot, ShowHead};

/// Table options whose sections may carry styled runs.
///
/// The sections and show-policies of `options` are ignored: sections are
/// filled in from the flattened fields here, policies from `show_head` and
/// `show_foot`. An unset policy means "every page" for
/// [`auto_table_with_text_decorators`] and "never" for [`draw_by_page`].
#[derive(Clone, Debug, Default)]
pub struct DecoratedOptions {
    pub head: SectionInput,
    pub body: SectionInput,
    pub foot: SectionInput,
    pub show_head: Option<ShowHead>,
    pub show_foot: Option<ShowFoot>,
    pub options: TableOptions,
}

impl DecoratedOptions {
    pub fn new(options: TableOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Flatten the sections into plain options, keeping the rich grids aside.
    /// Unset policies take `unset`.
    fn prepare(self, unset: (ShowHead, ShowFoot)) -> Result<(TableOptions, RichSections)> {
        let head = parse_section(&self.head);
        let body = parse_section(&self.body);
        let foot = parse_section(&self.foot);
        check_dimensions(Section::Head, &head.compat, head.rich.as_ref())?;
        check_dimensions(Section::Body, &body.compat, body.rich.as_ref())?;
        check_dimensions(Section::Foot, &foot.compat, foot.rich.as_ref())?;

        let mut options = self.options;
        options.show_head = self.show_head.unwrap_or(unset.0);
        options.show_foot = self.show_foot.unwrap_or(unset.1);
        options.head = head.compat;
        options.body = body.compat;
        options.foot = foot.compat;
        let rich = RichSections {
            head: head.rich,
            body: body.rich,
            foot: foot.rich,
        };
        Ok((options, rich))
    }
}

/// Lay out and draw a plain table at the document's current page.
pub fn auto_table(doc: &mut dyn Document, options: &TableOptions) -> TableOutcome {
    let t0 = Instant::now();

    let mut table = create_table(doc, options);
    let t_layout = t0.elapsed();

    let outcome = draw_table(doc, &mut table);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, draw={:.1}ms, total={:.1}ms (rows {}, pages {}-{})",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        table.body.len(),
        outcome.start_page,
        outcome.end_page,
    );

    outcome
}

/// Draw a table whose cells may hold styled runs. Layout works on the
/// flattened text; each cell gets its runs back just before it is drawn,
/// after the caller's own `will_draw_cell` hooks.
pub fn auto_table_with_text_decorators(
    doc: &mut dyn Document,
    decorated: DecoratedOptions,
) -> Result<TableOutcome> {
    let (mut options, rich) = decorated.prepare((ShowHead::EveryPage, ShowFoot::EveryPage))?;
    options
        .hooks
        .will_draw_cell
        .push(substitution_hook(Rc::new(rich)));
    Ok(auto_table(doc, &options))
}

/// Probe page capacities on documents from `make_doc`, split the body into
/// pages and return a session that draws them one at a time.
pub fn draw_by_page<D, F>(
    decorated: DecoratedOptions,
    make_doc: F,
    probe_options: &ProbeOptions,
) -> Result<DrawByPage>
where
    D: Document,
    F: FnMut() -> D,
{
    let (options, rich) = decorated.prepare((ShowHead::Never, ShowFoot::Never))?;
    let body_len = options.body.len();
    let capacities = probe(&options, make_doc, probe_options)?;
    let session = DrawByPage::new(options, rich, capacities);
    log::info!(
        "Paginated {} body rows into {} pages",
        body_len,
        session.page_count()
    );
    Ok(session)
}
