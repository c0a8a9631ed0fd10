//! Yearly summary records produced by the projection

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Field block shared by the household summary and per-person summaries
///
/// Everything starts at zero; flow and balance fields are filled by the year
/// simulator, withdrawal/contribution/conversion/deficit/tax fields only by
/// the tax-optimization pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryFields {
    // Flows, recomputed each year
    pub income: f64,
    pub expenses: f64,
    pub mortgage_payment: f64,
    pub mortgage_repayment: f64,

    // Balances carried forward
    pub social_security: f64,
    pub qualified_balance: f64,
    pub non_qualified_balance: f64,
    pub roth_balance: f64,
    pub cash_balance: f64,
    pub real_estate_balance: f64,
    pub life_insurance_balance: f64,

    // Withdrawals
    pub rmd_withdrawal: f64,
    pub qualified_withdrawal: f64,
    pub non_qualified_withdrawal: f64,
    pub roth_withdrawal: f64,
    pub cash_withdrawal: f64,

    // Contributions
    pub non_qualified_contribution: f64,
    pub qualified_contribution: f64,
    pub roth_contribution: f64,
    pub life_insurance_contribution: f64,

    // Conversions and the cash-flow plug
    pub roth_conversion: f64,
    pub deficit: f64,

    // Tax components
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica_tax: f64,
    pub medicare_tax: f64,
    pub capital_gains_tax: f64,
}

impl SummaryFields {
    /// Sum of the five tax components
    pub fn total_taxes(&self) -> f64 {
        self.federal_tax + self.state_tax + self.fica_tax + self.medicare_tax
            + self.capital_gains_tax
    }

    /// Income, Social Security, and every withdrawal type
    pub fn total_cash_inflows(&self) -> f64 {
        self.income
            + self.social_security
            + self.rmd_withdrawal
            + self.qualified_withdrawal
            + self.non_qualified_withdrawal
            + self.roth_withdrawal
            + self.cash_withdrawal
    }

    /// Expenses, taxes, contributions, and mortgage payments
    pub fn total_cash_outflows(&self) -> f64 {
        self.expenses
            + self.total_taxes()
            + self.non_qualified_contribution
            + self.qualified_contribution
            + self.roth_contribution
            + self.life_insurance_contribution
            + self.mortgage_payment
            + self.mortgage_repayment
    }
}

impl AddAssign<&SummaryFields> for SummaryFields {
    fn add_assign(&mut self, rhs: &SummaryFields) {
        self.income += rhs.income;
        self.expenses += rhs.expenses;
        self.mortgage_payment += rhs.mortgage_payment;
        self.mortgage_repayment += rhs.mortgage_repayment;
        self.social_security += rhs.social_security;
        self.qualified_balance += rhs.qualified_balance;
        self.non_qualified_balance += rhs.non_qualified_balance;
        self.roth_balance += rhs.roth_balance;
        self.cash_balance += rhs.cash_balance;
        self.real_estate_balance += rhs.real_estate_balance;
        self.life_insurance_balance += rhs.life_insurance_balance;
        self.rmd_withdrawal += rhs.rmd_withdrawal;
        self.qualified_withdrawal += rhs.qualified_withdrawal;
        self.non_qualified_withdrawal += rhs.non_qualified_withdrawal;
        self.roth_withdrawal += rhs.roth_withdrawal;
        self.cash_withdrawal += rhs.cash_withdrawal;
        self.non_qualified_contribution += rhs.non_qualified_contribution;
        self.qualified_contribution += rhs.qualified_contribution;
        self.roth_contribution += rhs.roth_contribution;
        self.life_insurance_contribution += rhs.life_insurance_contribution;
        self.roth_conversion += rhs.roth_conversion;
        self.deficit += rhs.deficit;
        self.federal_tax += rhs.federal_tax;
        self.state_tax += rhs.state_tax;
        self.fica_tax += rhs.fica_tax;
        self.medicare_tax += rhs.medicare_tax;
        self.capital_gains_tax += rhs.capital_gains_tax;
    }
}

/// One person's slice of a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualYearlySummary {
    pub name: String,

    /// Attained age; `None` for the unattributed "Unknown" bucket
    pub age: Option<i32>,

    #[serde(flatten)]
    pub totals: SummaryFields,
}

impl IndividualYearlySummary {
    pub fn new(name: impl Into<String>, age: Option<i32>) -> Self {
        Self {
            name: name.into(),
            age,
            totals: SummaryFields::default(),
        }
    }
}

/// Household summary for a single simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: i32,

    #[serde(flatten)]
    pub totals: SummaryFields,

    /// Per-person slices, keyed by name (deterministic iteration order)
    pub individuals: BTreeMap<String, IndividualYearlySummary>,
}

impl YearlySummary {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            totals: SummaryFields::default(),
            individuals: BTreeMap::new(),
        }
    }

    /// Recompute the aggregate fields as the sum over per-person slices
    pub fn sum_individuals(&self) -> SummaryFields {
        let mut sum = SummaryFields::default();
        for indiv in self.individuals.values() {
            sum += &indiv.totals;
        }
        sum
    }
}
