//! Long-term capital-gains tax on non-qualified withdrawals

use super::BracketTable;
use crate::model::FilingStatus;

/// 2024 long-term capital-gains brackets
pub fn capital_gains_brackets_2024(status: FilingStatus) -> BracketTable {
    let brackets = match status {
        FilingStatus::Single => vec![(0.0, 0.0), (47_025.0, 0.15), (518_900.0, 0.20)],
        FilingStatus::MarriedJoint => vec![(0.0, 0.0), (94_050.0, 0.15), (583_750.0, 0.20)],
        FilingStatus::MarriedSeparate => vec![(0.0, 0.0), (47_025.0, 0.15), (291_850.0, 0.20)],
        FilingStatus::HeadOfHousehold => vec![(0.0, 0.0), (63_000.0, 0.15), (551_350.0, 0.20)],
    };
    BracketTable::new(brackets)
}

/// Tax on the gain portion of a non-qualified withdrawal
///
/// Gain = withdrawal × (1 − cost-basis fraction); the bracket table is
/// applied progressively to the gain.
pub fn capital_gains_tax(
    non_qualified_withdrawal: f64,
    cost_basis_fraction: f64,
    table: &BracketTable,
) -> f64 {
    let gain = non_qualified_withdrawal.max(0.0) * (1.0 - cost_basis_fraction).max(0.0);
    table.tax(gain)
}
