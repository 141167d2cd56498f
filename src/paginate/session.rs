use std::rc::Rc;

use crate::content::{check_dimensions, substitution_hook};
use crate::document::Document;
use crate::error::Result;
use crate::model::{
    AppearanceCapacities, PagePosition, PageRowDelimit, PositionCapacities, RichSections,
    Section, ShowFoot, ShowHead,
};
use crate::table::{TableOptions, create_table, draw_table};

use super::{PageDelimits, delimit, validate_delimits};

/// Draws a paginated table one page at a time.
///
/// Each call to [`DrawByPage::draw_next_page`] renders the body rows of the next
/// delimit, with head and foot shown according to where that page falls.
#[derive(Debug)]
pub struct DrawByPage {
    options: TableOptions,
    rich: RichSections,
    appearance_capacities: AppearanceCapacities,
    capacities: PositionCapacities,
    delimits: Vec<PageRowDelimit>,
    cursor: usize,
}

impl DrawByPage {
    /// `options` carries the flattened sections and the caller's own hooks.
    pub fn new(
        options: TableOptions,
        rich: RichSections,
        appearance_capacities: AppearanceCapacities,
    ) -> Self {
        let PageDelimits { pages, capacities } =
            delimit(&options, &appearance_capacities, options.body.len());
        Self {
            options,
            rich,
            appearance_capacities,
            capacities,
            delimits: pages,
            cursor: 0,
        }
    }

    /// Render the next page into `doc`. Returns `false`, drawing nothing, once
    /// every delimit has been drawn.
    pub fn draw_next_page(&mut self, doc: &mut dyn Document) -> Result<bool> {
        let Some(delimit) = self.delimits.get(self.cursor).copied() else {
            return Ok(false);
        };

        let body = &self.options.body;
        check_dimensions(Section::Head, &self.options.head, self.rich.head.as_ref())?;
        check_dimensions(Section::Body, body, self.rich.body.as_ref())?;
        check_dimensions(Section::Foot, &self.options.foot, self.rich.foot.as_ref())?;

        let position = PagePosition::of(self.cursor, self.delimits.len());
        let (show_head, show_foot) =
            position.visibility(self.options.show_head, self.options.show_foot);
        let rows = delimit.rows(body.len());

        let page_rich = RichSections {
            head: self.rich.head.clone(),
            body: self.rich.body.as_ref().map(|grid| grid[rows.clone()].to_vec()),
            foot: self.rich.foot.clone(),
        };

        let mut page_options = self.options.clone();
        page_options.body = body[rows.clone()].to_vec();
        page_options.show_head = if show_head {
            ShowHead::EveryPage
        } else {
            ShowHead::Never
        };
        page_options.show_foot = if show_foot {
            ShowFoot::EveryPage
        } else {
            ShowFoot::Never
        };
        page_options
            .hooks
            .will_draw_cell
            .push(substitution_hook(Rc::new(page_rich)));

        log::debug!(
            "PAGE {}/{} rows={} position={:?} head={} foot={}",
            self.cursor + 1,
            self.delimits.len(),
            delimit,
            position,
            show_head,
            show_foot
        );

        let mut table = create_table(doc, &page_options);
        draw_table(doc, &mut table);
        self.cursor += 1;
        Ok(true)
    }

    /// Replace the page ranges and start over from the first. The new ranges
    /// are trusted as given; see [`DrawByPage::try_modify_delimits`].
    pub fn modify_delimits(&mut self, delimits: Vec<PageRowDelimit>) {
        self.delimits = delimits;
        self.cursor = 0;
    }

    pub fn try_modify_delimits(&mut self, delimits: Vec<PageRowDelimit>) -> Result<()> {
        validate_delimits(&delimits, self.options.body.len())?;
        self.modify_delimits(delimits);
        Ok(())
    }

    pub fn delimits(&self) -> &[PageRowDelimit] {
        &self.delimits
    }

    pub fn capacities(&self) -> PositionCapacities {
        self.capacities
    }

    pub fn appearance_capacities(&self) -> AppearanceCapacities {
        self.appearance_capacities
    }

    /// Index of the next page to draw.
    pub fn current_page(&self) -> usize {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.delimits.len()
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.delimits.len()
    }
}
