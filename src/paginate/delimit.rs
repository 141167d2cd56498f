use crate::error::{Error, Result};
use crate::model::{
    Appearance, AppearanceCapacities, PagePosition, PageRowDelimit, PositionCapacities, ShowFoot,
    ShowHead,
};
use crate::table::TableOptions;

use super::PageDelimits;

/// Body rows a page at `position` holds, given which of head and foot it shows.
pub fn capacity_for_position(
    caps: &AppearanceCapacities,
    show_head: ShowHead,
    show_foot: ShowFoot,
    position: PagePosition,
) -> usize {
    let (head, foot) = position.visibility(show_head, show_foot);
    caps.get(Appearance::from_visibility(head, foot))
}

pub fn delimit(options: &TableOptions, caps: &AppearanceCapacities, body_len: usize) -> PageDelimits {
    delimit_rows(body_len, options.show_head, options.show_foot, caps)
}

/// Split `body_len` rows into contiguous per-page ranges. Pages are filled
/// greedily; once the rest would fit on one ordinary page, that page is cut
/// short so the final page holds no more than its own capacity.
pub fn delimit_rows(
    body_len: usize,
    show_head: ShowHead,
    show_foot: ShowFoot,
    caps: &AppearanceCapacities,
) -> PageDelimits {
    let cap = |position: PagePosition| match capacity_for_position(caps, show_head, show_foot, position) {
        0 => {
            log::warn!("no body row fits on a {position:?} page, placing one per page");
            1
        }
        rows => rows,
    };

    let one_page = cap(PagePosition::OnePage);
    if body_len <= one_page {
        return PageDelimits {
            pages: vec![PageRowDelimit::new(0, body_len as isize - 1)],
            capacities: PositionCapacities {
                first: one_page,
                middle: one_page,
                last: one_page,
            },
        };
    }

    let capacities = PositionCapacities {
        first: cap(PagePosition::First),
        middle: cap(PagePosition::Middle),
        last: cap(PagePosition::Last),
    };

    let mut pages = Vec::new();
    let mut cursor = 0usize;
    while cursor < body_len {
        let remaining = body_len - cursor;
        let take = if cursor > 0 && remaining <= capacities.last {
            remaining
        } else {
            let page_cap = if cursor == 0 {
                capacities.first
            } else {
                capacities.middle
            };
            if remaining > page_cap {
                page_cap
            } else if remaining > capacities.last {
                // leave exactly a last page's worth
                remaining - capacities.last
            } else {
                (remaining - 1).max(1)
            }
        };
        pages.push(PageRowDelimit::new(
            cursor as isize,
            (cursor + take) as isize - 1,
        ));
        cursor += take;
    }

    log::debug!(
        "DELIMIT rows={} pages={} first={} middle={} last={}",
        body_len,
        pages.len(),
        capacities.first,
        capacities.middle,
        capacities.last
    );

    PageDelimits { pages, capacities }
}

/// Check that `delimits` cover `0..body_len` with contiguous, non-empty pages.
pub fn validate_delimits(delimits: &[PageRowDelimit], body_len: usize) -> Result<()> {
    let violation = |msg: String| Err(Error::DelimitInvariantViolation(msg));

    let (Some(first), Some(last)) = (delimits.first(), delimits.last()) else {
        return violation("no pages".to_string());
    };
    if first.min != 0 {
        return violation(format!("first page starts at row {}", first.min));
    }
    if body_len == 0 {
        if delimits.len() != 1 || !first.is_empty() {
            return violation(format!("empty body needs a single [0--1] page, got {first}"));
        }
        return Ok(());
    }
    for (i, pair) in delimits.windows(2).enumerate() {
        if pair[0].max + 1 != pair[1].min {
            return violation(format!(
                "page {} ends at {} but page {} starts at {}",
                i,
                pair[0].max,
                i + 1,
                pair[1].min
            ));
        }
    }
    if let Some((i, page)) = delimits.iter().enumerate().find(|(_, d)| d.is_empty()) {
        return violation(format!("page {i} is empty: {page}"));
    }
    if last.max != body_len as isize - 1 {
        return violation(format!(
            "last page ends at row {} for a body of {} rows",
            last.max, body_len
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(body_only: usize, head: usize, foot: usize, head_foot: usize) -> AppearanceCapacities {
        AppearanceCapacities {
            body_only,
            head,
            foot,
            head_foot,
        }
    }

    #[test]
    fn validate_rejects_gaps_and_short_cover() {
        let pages = [PageRowDelimit::new(0, 4), PageRowDelimit::new(6, 9)];
        assert!(validate_delimits(&pages, 10).is_err());
        let pages = [PageRowDelimit::new(0, 4), PageRowDelimit::new(5, 8)];
        assert!(validate_delimits(&pages, 10).is_err());
        assert!(validate_delimits(&[], 0).is_err());
        assert!(validate_delimits(&[PageRowDelimit::new(0, -1)], 0).is_ok());
    }

    #[test]
    fn middle_pages_fill_up_before_the_tail_is_split() {
        let out = delimit_rows(30, ShowHead::EveryPage, ShowFoot::LastPage, &caps(14, 13, 13, 12));
        let bounds: Vec<(isize, isize)> = out.pages.iter().map(|p| (p.min, p.max)).collect();
        assert_eq!(bounds, vec![(0, 12), (13, 25), (26, 29)]);

        // 20 rows: 13 on page one leaves 7, which fit a head-only page but
        // not the last page's 5, so page two stops at 2 rows.
        let out = delimit_rows(20, ShowHead::EveryPage, ShowFoot::LastPage, &caps(14, 13, 13, 5));
        let bounds: Vec<(isize, isize)> = out.pages.iter().map(|p| (p.min, p.max)).collect();
        assert_eq!(bounds, vec![(0, 12), (13, 14), (15, 19)]);
    }

    #[test]
    fn zero_capacity_still_terminates() {
        let out = delimit_rows(3, ShowHead::EveryPage, ShowFoot::EveryPage, &caps(0, 0, 0, 0));
        assert_eq!(out.pages.len(), 3);
        assert!(validate_delimits(&out.pages, 3).is_ok());
    }
}
