//! State income-tax bracket table

use super::BracketTable;

/// Default state table: nothing on the first 10,000, 5% above
pub fn state_brackets_default() -> BracketTable {
    BracketTable::new(vec![(0.0, 0.0), (10_000.0, 0.05)])
}
