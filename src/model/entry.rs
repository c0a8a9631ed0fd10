//! Dated financial entries and the closed item-type tag set

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Owner bucket used when an entry names nobody
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Closed set of entry classifications
///
/// Flow types are recomputed from active entries every year; stock types are
/// balances carried forward year over year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Income,
    Expense,
    NonQualified,
    Qualified,
    Roth,
    Cash,
    LifeInsuranceBenefit,
    RealEstate,
    SocialSecurityBenefit,
    RothContribution,
    QualifiedContribution,
    LifeInsuranceContribution,
    Mortgage,
    MortgageRepayment,
}

impl ItemType {
    /// All fourteen variants, in declaration order
    pub const ALL: [ItemType; 14] = [
        ItemType::Income,
        ItemType::Expense,
        ItemType::NonQualified,
        ItemType::Qualified,
        ItemType::Roth,
        ItemType::Cash,
        ItemType::LifeInsuranceBenefit,
        ItemType::RealEstate,
        ItemType::SocialSecurityBenefit,
        ItemType::RothContribution,
        ItemType::QualifiedContribution,
        ItemType::LifeInsuranceContribution,
        ItemType::Mortgage,
        ItemType::MortgageRepayment,
    ];

    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Income => "Income",
            ItemType::Expense => "Expense",
            ItemType::NonQualified => "NonQualified",
            ItemType::Qualified => "Qualified",
            ItemType::Roth => "Roth",
            ItemType::Cash => "Cash",
            ItemType::LifeInsuranceBenefit => "LifeInsuranceBenefit",
            ItemType::RealEstate => "RealEstate",
            ItemType::SocialSecurityBenefit => "SocialSecurityBenefit",
            ItemType::RothContribution => "RothContribution",
            ItemType::QualifiedContribution => "QualifiedContribution",
            ItemType::LifeInsuranceContribution => "LifeInsuranceContribution",
            ItemType::Mortgage => "Mortgage",
            ItemType::MortgageRepayment => "MortgageRepayment",
        }
    }

    /// True for item types recomputed from active entries each year
    ///
    /// Everything else is a balance carried forward from the prior year.
    pub fn is_flow(&self) -> bool {
        matches!(
            self,
            ItemType::Income
                | ItemType::Expense
                | ItemType::Mortgage
                | ItemType::MortgageRepayment
                | ItemType::RothContribution
                | ItemType::QualifiedContribution
                | ItemType::LifeInsuranceContribution
        )
    }
}

/// Uppercase and strip whitespace/punctuation so that "Roth IRA", "roth-ira",
/// and "ROTH_IRA" all resolve to the same alias key
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl FromStr for ItemType {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let item = match normalize(raw).as_str() {
            "INCOME" | "SALARY" | "WAGES" | "EARNEDINCOME" | "PENSION" => ItemType::Income,
            "EXPENSE" | "EXPENSES" | "SPENDING" | "LIVINGEXPENSES" => ItemType::Expense,
            "NONQUALIFIED" | "NQ" | "BROKERAGE" | "TAXABLE" | "AFTERTAX" => ItemType::NonQualified,
            "QUALIFIED" | "401K" | "403B" | "457B" | "IRA" | "TRADITIONALIRA" | "TSP"
            | "PRETAX" => ItemType::Qualified,
            "ROTH" | "ROTHIRA" | "ROTH401K" => ItemType::Roth,
            "CASH" | "SAVINGS" | "CHECKING" | "BANK" | "MONEYMARKET" => ItemType::Cash,
            "LIFEINSURANCEBENEFIT" | "LIFEINSURANCE" | "LIFEBENEFIT" => {
                ItemType::LifeInsuranceBenefit
            }
            "REALESTATE" | "HOUSE" | "HOME" | "PROPERTY" => ItemType::RealEstate,
            "SOCIALSECURITYBENEFIT" | "SOCIALSECURITY" | "SSA" | "SS" | "SSBENEFIT" => {
                ItemType::SocialSecurityBenefit
            }
            "ROTHCONTRIBUTION" | "ROTHIRACONTRIBUTION" => ItemType::RothContribution,
            "QUALIFIEDCONTRIBUTION" | "401KCONTRIBUTION" | "IRACONTRIBUTION" => {
                ItemType::QualifiedContribution
            }
            "LIFEINSURANCECONTRIBUTION" | "LIFEINSURANCEPREMIUM" => {
                ItemType::LifeInsuranceContribution
            }
            "MORTGAGE" | "MORTGAGEPAYMENT" => ItemType::Mortgage,
            "MORTGAGEREPAYMENT" | "MORTGAGEPAYOFF" => ItemType::MortgageRepayment,
            _ => return Err(ModelError::UnknownItemType(raw.to_string())),
        };
        Ok(item)
    }
}

/// Tax filing category selecting the bracket tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
}

impl FromStr for FilingStatus {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let status = match normalize(raw).as_str() {
            "SINGLE" | "S" => FilingStatus::Single,
            "MARRIEDJOINT" | "MFJ" | "MARRIED" | "MARRIEDFILINGJOINTLY" | "JOINT" => {
                FilingStatus::MarriedJoint
            }
            "MARRIEDSEPARATE" | "MFS" | "MARRIEDFILINGSEPARATELY" | "SEPARATE" => {
                FilingStatus::MarriedSeparate
            }
            "HEADOFHOUSEHOLD" | "HOH" => FilingStatus::HeadOfHousehold,
            _ => return Err(ModelError::UnknownFilingStatus(raw.to_string())),
        };
        Ok(status)
    }
}

/// A dated income, expense, or asset record
///
/// Immutable once constructed; invalid construction is rejected outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Owning household member, or [`UNKNOWN_OWNER`]
    pub owner: String,

    pub item_type: ItemType,

    pub description: String,

    /// Non-negative base value in dollars
    pub value: f64,

    /// First calendar year the entry applies
    pub start_year: i32,

    /// Last calendar year the entry applies (inclusive)
    pub end_year: i32,
}

impl Entry {
    pub fn new(
        owner: Option<String>,
        item_type: ItemType,
        description: impl Into<String>,
        value: f64,
        start_year: i32,
        end_year: i32,
    ) -> Result<Self, ModelError> {
        let description = description.into();
        if value < 0.0 {
            return Err(ModelError::NegativeValue { description, value });
        }
        if start_year > end_year {
            return Err(ModelError::InvalidYearRange {
                description,
                start_year,
                end_year,
            });
        }
        let owner = match owner {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_OWNER.to_string(),
        };
        Ok(Self {
            owner,
            item_type,
            description,
            value,
            start_year,
            end_year,
        })
    }

    /// Whether the entry's year range covers the given year
    pub fn active_in(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }
}
