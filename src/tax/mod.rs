//! Tax and RMD calculators: bracket tables, payroll taxes, capital gains,
//! and the Uniform Lifetime Table

mod brackets;
mod federal;
mod gains;
mod payroll;
mod rmd;
mod state;

pub use brackets::BracketTable;
pub use federal::federal_brackets_2024;
pub use gains::{capital_gains_brackets_2024, capital_gains_tax};
pub use payroll::{medicare_tax, social_security_tax, surtax_threshold, SS_WAGE_BASE};
pub use rmd::{is_rmd_required, rmd_start_age, UniformLifetimeTable};
pub use state::state_brackets_default;

use crate::model::FilingStatus;

/// Container for every table and flag the tax rules consume
#[derive(Debug, Clone)]
pub struct TaxConfig {
    pub filing_status: FilingStatus,
    pub self_employed: bool,

    pub federal: BracketTable,
    pub state: BracketTable,
    pub capital_gains: BracketTable,
    pub rmd_table: UniformLifetimeTable,

    /// Non-taxable fraction of non-qualified withdrawals
    pub cost_basis_fraction: f64,

    /// Fraction of Social Security counted as ordinary taxable income
    pub taxable_social_security_fraction: f64,
}

impl TaxConfig {
    /// Configuration with the 2024 bracket tables
    pub fn new_2024(filing_status: FilingStatus, self_employed: bool) -> Self {
        Self {
            filing_status,
            self_employed,
            federal: federal_brackets_2024(filing_status),
            state: state_brackets_default(),
            capital_gains: capital_gains_brackets_2024(filing_status),
            rmd_table: UniformLifetimeTable::default(),
            cost_basis_fraction: 0.5,
            taxable_social_security_fraction: 0.85,
        }
    }
}
