//! Year-by-year simulation loop
//!
//! Builds one raw summary per calendar year from the entries and the prior
//! year's ending balances, then hands it to the tax-optimization pipeline.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::{ledger, pipeline};
use crate::model::{Entry, IndividualYearlySummary, ItemType, Person, SummaryFields, YearlySummary};
use crate::tax::TaxConfig;

/// Balance-carrying item types
const STOCK_TYPES: [ItemType; 7] = [
    ItemType::Qualified,
    ItemType::NonQualified,
    ItemType::Roth,
    ItemType::Cash,
    ItemType::RealEstate,
    ItemType::LifeInsuranceBenefit,
    ItemType::SocialSecurityBenefit,
];

fn stock_field(fields: &SummaryFields, item: ItemType) -> f64 {
    match item {
        ItemType::Qualified => fields.qualified_balance,
        ItemType::NonQualified => fields.non_qualified_balance,
        ItemType::Roth => fields.roth_balance,
        ItemType::Cash => fields.cash_balance,
        ItemType::RealEstate => fields.real_estate_balance,
        ItemType::LifeInsuranceBenefit => fields.life_insurance_balance,
        ItemType::SocialSecurityBenefit => fields.social_security,
        _ => 0.0,
    }
}

fn stock_field_mut(fields: &mut SummaryFields, item: ItemType) -> Option<&mut f64> {
    match item {
        ItemType::Qualified => Some(&mut fields.qualified_balance),
        ItemType::NonQualified => Some(&mut fields.non_qualified_balance),
        ItemType::Roth => Some(&mut fields.roth_balance),
        ItemType::Cash => Some(&mut fields.cash_balance),
        ItemType::RealEstate => Some(&mut fields.real_estate_balance),
        ItemType::LifeInsuranceBenefit => Some(&mut fields.life_insurance_balance),
        ItemType::SocialSecurityBenefit => Some(&mut fields.social_security),
        _ => None,
    }
}

/// Main projection engine
pub struct Projector {
    /// Annual growth rates in percent, keyed by item type; missing means 0
    rates: HashMap<ItemType, f64>,

    /// Household members, keyed by name
    persons: HashMap<String, Person>,

    tax: TaxConfig,
}

impl Projector {
    pub fn new(
        rates: HashMap<ItemType, f64>,
        persons: HashMap<String, Person>,
        tax: TaxConfig,
    ) -> Self {
        Self {
            rates,
            persons,
            tax,
        }
    }

    fn rate(&self, item: ItemType) -> f64 {
        self.rates.get(&item).copied().unwrap_or(0.0)
    }

    /// Run the projection over the contiguous year range covered by the
    /// entries; no entries means an empty sequence
    pub fn project(&self, entries: &[Entry]) -> Vec<YearlySummary> {
        let Some(first) = entries.iter().map(|e| e.start_year).min() else {
            return Vec::new();
        };
        let last = entries.iter().map(|e| e.end_year).max().unwrap_or(first);

        let mut results: Vec<YearlySummary> = Vec::with_capacity((last - first + 1) as usize);
        for year in first..=last {
            let summary = {
                let prev = results.last();
                let raw = self.build_year(year, entries, prev);
                pipeline::run(&self.tax, &self.persons, prev, raw)
            };
            debug!(
                "year {}: income={:.2} expenses={:.2} taxes={:.2} deficit={:.2}",
                year,
                summary.totals.income,
                summary.totals.expenses,
                summary.totals.total_taxes(),
                summary.totals.deficit
            );
            results.push(summary);
        }
        results
    }

    /// Build the raw summary for one year: flows recomputed from active
    /// entries, stocks carried forward and compounded, per person
    fn build_year(
        &self,
        year: i32,
        entries: &[Entry],
        prev: Option<&YearlySummary>,
    ) -> YearlySummary {
        let mut summary = YearlySummary::new(year);

        // One bucket per person, entry owner, and prior-year bucket
        let mut names: BTreeSet<String> = self.persons.keys().cloned().collect();
        names.extend(entries.iter().map(|e| e.owner.clone()));
        if let Some(prev) = prev {
            names.extend(prev.individuals.keys().cloned());
        }

        for name in names {
            let age = self.persons.get(&name).map(|p| p.age_in(year));
            let mut indiv = IndividualYearlySummary::new(name.clone(), age);

            // Carry each balance forward at its class rate
            if let Some(prior) = prev.and_then(|p| p.individuals.get(&name)) {
                for item in STOCK_TYPES {
                    let carried = ledger::grow(stock_field(&prior.totals, item), self.rate(item));
                    if let Some(field) = stock_field_mut(&mut indiv.totals, item) {
                        *field = carried;
                    }
                }
            }

            summary.individuals.insert(name, indiv);
        }

        for entry in entries {
            let Some(indiv) = summary.individuals.get_mut(&entry.owner) else {
                continue;
            };
            if entry.item_type.is_flow() {
                if !entry.active_in(year) {
                    continue;
                }
                let amount = ledger::flow_value(
                    entry.value,
                    self.rate(entry.item_type),
                    year - entry.start_year,
                );
                match entry.item_type {
                    ItemType::Income => indiv.totals.income += amount,
                    ItemType::Expense => indiv.totals.expenses += amount,
                    ItemType::Mortgage => indiv.totals.mortgage_payment += amount,
                    ItemType::MortgageRepayment => indiv.totals.mortgage_repayment += amount,
                    ItemType::RothContribution => {
                        indiv.totals.roth_contribution += amount;
                        indiv.totals.roth_balance += amount;
                    }
                    ItemType::QualifiedContribution => {
                        indiv.totals.qualified_contribution += amount;
                        indiv.totals.qualified_balance += amount;
                    }
                    ItemType::LifeInsuranceContribution => {
                        indiv.totals.life_insurance_contribution += amount;
                        indiv.totals.life_insurance_balance += amount;
                    }
                    _ => {}
                }
            } else if entry.start_year == year {
                // Stocks inject their raw value once, in their start year
                if let Some(field) = stock_field_mut(&mut indiv.totals, entry.item_type) {
                    *field += entry.value;
                }
            }
        }

        summary.totals = summary.sum_individuals();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilingStatus, UNKNOWN_OWNER};
    use approx::assert_abs_diff_eq;

    fn entry(owner: Option<&str>, item_type: ItemType, value: f64, start: i32, end: i32) -> Entry {
        Entry::new(
            owner.map(String::from),
            item_type,
            "test",
            value,
            start,
            end,
        )
        .unwrap()
    }

    fn projector(rates: Vec<(ItemType, f64)>, persons: Vec<Person>) -> Projector {
        Projector::new(
            rates.into_iter().collect(),
            persons.into_iter().map(|p| (p.name.clone(), p)).collect(),
            TaxConfig::new_2024(FilingStatus::Single, false),
        )
    }

    #[test]
    fn test_empty_entries_yield_empty_sequence() {
        let p = projector(vec![], vec![]);
        assert!(p.project(&[]).is_empty());
    }

    #[test]
    fn test_contiguous_year_range() {
        let p = projector(vec![], vec![]);
        let entries = vec![
            entry(None, ItemType::Income, 1_000.0, 2024, 2026),
            entry(None, ItemType::Expense, 500.0, 2028, 2028),
        ];
        let summaries = p.project(&entries);
        let years: Vec<i32> = summaries.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2024, 2025, 2026, 2027, 2028]);
    }

    #[test]
    fn test_flows_recomputed_from_scratch() {
        let p = projector(vec![(ItemType::Income, 3.0)], vec![]);
        let entries = vec![entry(Some("Alice"), ItemType::Income, 100_000.0, 2024, 2026)];

        let y0 = p.build_year(2024, &entries, None);
        assert_abs_diff_eq!(y0.totals.income, 100_000.0);

        // Flow value depends only on years since entry start, not prior state
        let y2 = p.build_year(2026, &entries, Some(&y0));
        assert_abs_diff_eq!(y2.totals.income, 100_000.0 * 1.03_f64.powi(2), epsilon = 1e-6);

        // Outside the active range the flow vanishes
        let y3 = p.build_year(2027, &entries, Some(&y2));
        assert_abs_diff_eq!(y3.totals.income, 0.0);
    }

    #[test]
    fn test_stocks_carried_and_compounded() {
        let p = projector(vec![(ItemType::Qualified, 7.0)], vec![]);
        let entries = vec![entry(Some("Alice"), ItemType::Qualified, 500_000.0, 2024, 2024)];

        let y0 = p.build_year(2024, &entries, None);
        assert_abs_diff_eq!(y0.totals.qualified_balance, 500_000.0);

        let y1 = p.build_year(2025, &entries, Some(&y0));
        assert_abs_diff_eq!(y1.totals.qualified_balance, 535_000.0, epsilon = 1e-6);

        // Injection happens only in the start year
        let y2 = p.build_year(2026, &entries, Some(&y1));
        assert_abs_diff_eq!(y2.totals.qualified_balance, 535_000.0 * 1.07, epsilon = 1e-6);
    }

    #[test]
    fn test_contribution_flows_feed_their_balance() {
        let p = projector(vec![], vec![]);
        let entries = vec![entry(
            Some("Alice"),
            ItemType::RothContribution,
            7_000.0,
            2024,
            2025,
        )];

        let y0 = p.build_year(2024, &entries, None);
        assert_abs_diff_eq!(y0.totals.roth_contribution, 7_000.0);
        assert_abs_diff_eq!(y0.totals.roth_balance, 7_000.0);

        let y1 = p.build_year(2025, &entries, Some(&y0));
        assert_abs_diff_eq!(y1.totals.roth_contribution, 7_000.0);
        assert_abs_diff_eq!(y1.totals.roth_balance, 14_000.0);
    }

    #[test]
    fn test_unowned_entry_goes_to_unknown_bucket() {
        // An entry with no owner lands in the sentinel bucket and still
        // counts toward the aggregate
        let p = projector(vec![], vec![Person::new("Alice", 1970).unwrap()]);
        let entries = vec![entry(None, ItemType::Income, 50_000.0, 2024, 2024)];
        let summaries = p.project(&entries);

        let unknown = &summaries[0].individuals[UNKNOWN_OWNER];
        assert_abs_diff_eq!(unknown.totals.income, 50_000.0);
        assert_eq!(unknown.age, None);
        assert_abs_diff_eq!(summaries[0].totals.income, 50_000.0);
    }

    #[test]
    fn test_scenario_steady_income_no_deficit() {
        // One person born 1960, income 100k/yr 2024-2030 at 3%, qualified
        // 500k from 2024 at 7%: no deficit, and no RMD before age 75 (2035)
        let p = projector(
            vec![(ItemType::Income, 3.0), (ItemType::Qualified, 7.0)],
            vec![Person::new("Alice", 1960).unwrap()],
        );
        let entries = vec![
            entry(Some("Alice"), ItemType::Income, 100_000.0, 2024, 2030),
            entry(Some("Alice"), ItemType::Qualified, 500_000.0, 2024, 2024),
        ];
        let summaries = p.project(&entries);
        assert_eq!(summaries.len(), 7);

        for s in &summaries {
            assert_abs_diff_eq!(s.totals.deficit, 0.0, epsilon = 0.01);
            assert_abs_diff_eq!(s.totals.rmd_withdrawal, 0.0);
            assert!(s.totals.qualified_balance >= 0.0);
            assert!(s.totals.non_qualified_balance >= 0.0);
            assert!(s.totals.roth_balance >= 0.0);
            assert!(s.totals.cash_balance >= 0.0);
        }
        // RMD start age for the 1960 cohort is 75, i.e. calendar year 2035
        assert_eq!(crate::tax::rmd_start_age(1960) + 1960, 2035);
    }

    #[test]
    fn test_rmd_first_appears_at_threshold_year() {
        // Same household as above, horizon stretched past the 1960 cohort's
        // threshold year (2035) by a zero-value expense entry
        let p = projector(
            vec![(ItemType::Income, 3.0), (ItemType::Qualified, 7.0)],
            vec![Person::new("Alice", 1960).unwrap()],
        );
        let entries = vec![
            entry(Some("Alice"), ItemType::Income, 100_000.0, 2024, 2030),
            entry(Some("Alice"), ItemType::Qualified, 500_000.0, 2024, 2024),
            entry(Some("Alice"), ItemType::Expense, 0.0, 2024, 2036),
        ];
        let summaries = p.project(&entries);
        assert_eq!(summaries.len(), 13);

        for s in &summaries {
            if s.year < 2035 {
                assert_abs_diff_eq!(s.totals.rmd_withdrawal, 0.0);
            }
        }
        let threshold = summaries.iter().find(|s| s.year == 2035).unwrap();
        assert!(threshold.totals.rmd_withdrawal > 0.0);

        let report = crate::projection::validate_all(&summaries);
        assert!(report.ok, "diagnostics: {:?}", report.diagnostics);
    }

    #[test]
    fn test_balances_never_negative_after_withdrawals() {
        let p = projector(vec![], vec![Person::new("Alice", 1970).unwrap()]);
        let entries = vec![
            entry(Some("Alice"), ItemType::Income, 20_000.0, 2024, 2028),
            entry(Some("Alice"), ItemType::Expense, 90_000.0, 2024, 2028),
            entry(Some("Alice"), ItemType::NonQualified, 60_000.0, 2024, 2024),
            entry(Some("Alice"), ItemType::Cash, 10_000.0, 2024, 2024),
        ];
        for s in p.project(&entries) {
            assert!(s.totals.qualified_balance >= 0.0);
            assert!(s.totals.non_qualified_balance >= 0.0);
            assert!(s.totals.roth_balance >= 0.0);
            assert!(s.totals.cash_balance >= 0.0);
        }
    }
}
