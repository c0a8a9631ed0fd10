//! Balance compounding, clamped withdrawals, and flow valuation

use crate::model::SummaryFields;

/// One year of compound growth at an annual percentage rate
pub fn grow(balance: f64, rate_pct: f64) -> f64 {
    balance * (1.0 + rate_pct / 100.0)
}

/// Value of a flow entry after `years_active` years of growth from its start
pub fn flow_value(base_value: f64, rate_pct: f64, years_active: i32) -> f64 {
    base_value * (1.0 + rate_pct / 100.0).powi(years_active)
}

/// Withdraw up to `requested`, clamped to the available balance
///
/// Returns the actual amount taken; the balance never goes negative.
pub fn withdraw(balance: &mut f64, requested: f64) -> f64 {
    let actual = requested.max(0.0).min(*balance);
    *balance -= actual;
    actual
}

/// Liquid account classes, in withdrawal-waterfall order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountClass {
    NonQualified,
    Qualified,
    Roth,
    Cash,
}

impl AccountClass {
    /// Waterfall order used by the expense-management rule
    pub const WATERFALL: [AccountClass; 4] = [
        AccountClass::NonQualified,
        AccountClass::Qualified,
        AccountClass::Roth,
        AccountClass::Cash,
    ];

    pub fn balance(&self, fields: &SummaryFields) -> f64 {
        match self {
            AccountClass::NonQualified => fields.non_qualified_balance,
            AccountClass::Qualified => fields.qualified_balance,
            AccountClass::Roth => fields.roth_balance,
            AccountClass::Cash => fields.cash_balance,
        }
    }

    pub fn balance_mut<'a>(&self, fields: &'a mut SummaryFields) -> &'a mut f64 {
        match self {
            AccountClass::NonQualified => &mut fields.non_qualified_balance,
            AccountClass::Qualified => &mut fields.qualified_balance,
            AccountClass::Roth => &mut fields.roth_balance,
            AccountClass::Cash => &mut fields.cash_balance,
        }
    }

    /// The withdrawal field this class reports into
    pub fn withdrawal(&self, fields: &SummaryFields) -> f64 {
        match self {
            AccountClass::NonQualified => fields.non_qualified_withdrawal,
            AccountClass::Qualified => fields.qualified_withdrawal,
            AccountClass::Roth => fields.roth_withdrawal,
            AccountClass::Cash => fields.cash_withdrawal,
        }
    }

    pub fn withdrawal_mut<'a>(&self, fields: &'a mut SummaryFields) -> &'a mut f64 {
        match self {
            AccountClass::NonQualified => &mut fields.non_qualified_withdrawal,
            AccountClass::Qualified => &mut fields.qualified_withdrawal,
            AccountClass::Roth => &mut fields.roth_withdrawal,
            AccountClass::Cash => &mut fields.cash_withdrawal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_grow() {
        assert_abs_diff_eq!(grow(100.0, 7.0), 107.0);
        assert_abs_diff_eq!(grow(100.0, 0.0), 100.0);
    }

    #[test]
    fn test_flow_value() {
        assert_abs_diff_eq!(flow_value(100_000.0, 3.0, 0), 100_000.0);
        assert_abs_diff_eq!(flow_value(100_000.0, 3.0, 2), 100_000.0 * 1.03 * 1.03);
    }

    #[test]
    fn test_withdraw_clamps() {
        let mut balance = 100.0;
        assert_abs_diff_eq!(withdraw(&mut balance, 30.0), 30.0);
        assert_abs_diff_eq!(balance, 70.0);

        // Clamped to what remains, never negative
        assert_abs_diff_eq!(withdraw(&mut balance, 1_000.0), 70.0);
        assert_abs_diff_eq!(balance, 0.0);

        assert_abs_diff_eq!(withdraw(&mut balance, 10.0), 0.0);
        assert_abs_diff_eq!(balance, 0.0);
    }

    #[test]
    fn test_withdraw_ignores_negative_request() {
        let mut balance = 50.0;
        assert_abs_diff_eq!(withdraw(&mut balance, -5.0), 0.0);
        assert_abs_diff_eq!(balance, 50.0);
    }

    #[test]
    fn test_waterfall_order() {
        assert_eq!(
            AccountClass::WATERFALL,
            [
                AccountClass::NonQualified,
                AccountClass::Qualified,
                AccountClass::Roth,
                AccountClass::Cash,
            ]
        );
    }
}
