//! FICA and Medicare payroll taxes on earned income

use crate::model::FilingStatus;

/// 2024 Social Security wage base
pub const SS_WAGE_BASE: f64 = 168_600.0;

/// Employee-side Social Security rate
pub const SS_RATE: f64 = 0.062;

/// Employee-side Medicare rate
pub const MEDICARE_RATE: f64 = 0.0145;

/// Additional Medicare rate above the filing-status threshold
pub const MEDICARE_SURTAX_RATE: f64 = 0.009;

/// Social Security tax on earned income, capped at the wage base
///
/// Self-employed filers owe both halves.
pub fn social_security_tax(earned_income: f64, self_employed: bool) -> f64 {
    let taxable = earned_income.max(0.0).min(SS_WAGE_BASE);
    let rate = if self_employed { SS_RATE * 2.0 } else { SS_RATE };
    taxable * rate
}

/// Income threshold above which the Medicare surtax applies
pub fn surtax_threshold(status: FilingStatus) -> f64 {
    match status {
        FilingStatus::MarriedJoint => 250_000.0,
        FilingStatus::MarriedSeparate => 125_000.0,
        FilingStatus::Single | FilingStatus::HeadOfHousehold => 200_000.0,
    }
}

/// Medicare tax: flat rate on all earned income plus the surtax above the
/// filing-status threshold
pub fn medicare_tax(earned_income: f64, status: FilingStatus, self_employed: bool) -> f64 {
    let earned = earned_income.max(0.0);
    let rate = if self_employed {
        MEDICARE_RATE * 2.0
    } else {
        MEDICARE_RATE
    };
    let surtax_base = (earned - surtax_threshold(status)).max(0.0);
    earned * rate + surtax_base * MEDICARE_SURTAX_RATE
}
