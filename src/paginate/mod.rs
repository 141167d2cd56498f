//! Pagination ahead of drawing: probe how many body rows fit per page, split
//! the body into per-page row ranges, then draw one range at a time.

mod delimit;
mod probe;
mod session;

use serde::Serialize;

use crate::model::{PageRowDelimit, PositionCapacities};

pub use delimit::{capacity_for_position, delimit, delimit_rows, validate_delimits};
pub use probe::probe;
pub use session::DrawByPage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Passes per head/foot combination before giving up.
    pub max_iterations: usize,
    /// Placeholder rows added to the probe body on each pass.
    pub rows_per_step: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            max_iterations: 64,
            rows_per_step: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageDelimits {
    pub pages: Vec<PageRowDelimit>,
    pub capacities: PositionCapacities,
}
