//! Tax-optimization pipeline: four ordered rules folded over a year's summary
//!
//! The order is load-bearing. Expense management needs the RMD proceeds as
//! available inflow; the Roth conversion needs the ordinary-income figure the
//! first two rules settle; the tax rule prices the final figures. Each rule
//! takes the previous year's summary (absent on the first simulated year)
//! and the current one by value, returning the updated value.

use std::collections::HashMap;

use log::trace;

use super::ledger::{self, AccountClass};
use crate::model::{Person, YearlySummary};
use crate::tax::{self, TaxConfig};

/// Shared read-only context for the rules
pub struct RuleContext<'a> {
    pub tax: &'a TaxConfig,
    pub persons: &'a HashMap<String, Person>,
}

/// A single transition of the year's summary
pub type Rule = fn(&RuleContext, Option<&YearlySummary>, YearlySummary) -> YearlySummary;

/// The four rules in their fixed order
pub const RULES: [(&str, Rule); 4] = [
    ("rmd", apply_rmd),
    ("expense-management", manage_expenses),
    ("roth-conversion", convert_to_roth),
    ("tax-calculation", calculate_taxes),
];

/// Fold the rule sequence over the raw summary for one year
pub fn run(
    tax: &TaxConfig,
    persons: &HashMap<String, Person>,
    prev: Option<&YearlySummary>,
    summary: YearlySummary,
) -> YearlySummary {
    let ctx = RuleContext { tax, persons };
    RULES.iter().fold(summary, |acc, (name, rule)| {
        trace!("year {}: applying rule '{}'", acc.year, name);
        rule(&ctx, prev, acc)
    })
}

/// Rule 1: required minimum distributions, per person
///
/// Amount is the prior year-end qualified balance over the age divisor,
/// clamped to what the person actually holds. Not required means the field
/// is explicitly zero, not left untouched.
fn apply_rmd(
    ctx: &RuleContext,
    prev: Option<&YearlySummary>,
    mut cur: YearlySummary,
) -> YearlySummary {
    let year = cur.year;
    for (name, indiv) in cur.individuals.iter_mut() {
        let Some(person) = ctx.persons.get(name) else {
            indiv.totals.rmd_withdrawal = 0.0;
            continue;
        };
        let age = person.age_in(year);
        if !tax::is_rmd_required(age, person.birth_year) {
            indiv.totals.rmd_withdrawal = 0.0;
            continue;
        }
        let prior_balance = prev
            .and_then(|p| p.individuals.get(name))
            .map(|i| i.totals.qualified_balance)
            .unwrap_or(0.0);
        let requested = ctx.tax.rmd_table.calculate(age, prior_balance);
        indiv.totals.rmd_withdrawal =
            ledger::withdraw(&mut indiv.totals.qualified_balance, requested);
    }

    cur.totals.rmd_withdrawal = cur
        .individuals
        .values()
        .map(|i| i.totals.rmd_withdrawal)
        .sum();
    cur.totals.qualified_balance = cur
        .individuals
        .values()
        .map(|i| i.totals.qualified_balance)
        .sum();
    cur
}

/// Rule 2: balance the year's cash flow
///
/// A surplus becomes a non-qualified contribution; a shortfall is covered by
/// the withdrawal waterfall, and whatever the waterfall cannot cover is
/// recorded as the deficit plug.
fn manage_expenses(
    _ctx: &RuleContext,
    _prev: Option<&YearlySummary>,
    mut cur: YearlySummary,
) -> YearlySummary {
    let t = &cur.totals;
    let inflows = t.income + t.social_security + t.rmd_withdrawal;
    let outflows = t.expenses
        + t.mortgage_payment
        + t.mortgage_repayment
        + t.qualified_contribution
        + t.roth_contribution
        + t.life_insurance_contribution
        + t.total_taxes();
    let net = inflows - outflows;

    if net > 0.0 {
        contribute_surplus(&mut cur, net);
        cur.totals.deficit = 0.0;
    } else {
        cur.totals.deficit = cover_deficit(&mut cur, -net);
    }
    cur
}

/// Surplus cash goes into non-qualified savings, attributed pro-rata by each
/// person's share of the year's cash inflows
fn contribute_surplus(cur: &mut YearlySummary, surplus: f64) {
    let inflow_of = |i: &crate::model::IndividualYearlySummary| {
        i.totals.income + i.totals.social_security + i.totals.rmd_withdrawal
    };
    let total_inflow: f64 = cur.individuals.values().map(inflow_of).sum();
    if total_inflow <= 0.0 {
        return;
    }
    for indiv in cur.individuals.values_mut() {
        let amount = surplus * inflow_of(indiv) / total_inflow;
        indiv.totals.non_qualified_contribution += amount;
        indiv.totals.non_qualified_balance += amount;
    }
    cur.totals.non_qualified_contribution = cur
        .individuals
        .values()
        .map(|i| i.totals.non_qualified_contribution)
        .sum();
    cur.totals.non_qualified_balance = cur
        .individuals
        .values()
        .map(|i| i.totals.non_qualified_balance)
        .sum();
}

/// Withdrawal waterfall: non-qualified, then qualified, then roth, then
/// cash. Returns the unmet remainder.
fn cover_deficit(cur: &mut YearlySummary, deficit: f64) -> f64 {
    let mut remaining = deficit;
    for class in AccountClass::WATERFALL {
        if remaining <= 0.0 {
            break;
        }
        let take = remaining.min(class.balance(&cur.totals));
        if take <= 0.0 {
            continue;
        }
        draw_pro_rata(cur, class, take);
        remaining -= take;
    }
    remaining.max(0.0)
}

/// Spread one waterfall draw across persons in proportion to their balance
/// in the class, then pin the aggregates to the per-person sums
fn draw_pro_rata(cur: &mut YearlySummary, class: AccountClass, amount: f64) {
    let total: f64 = cur
        .individuals
        .values()
        .map(|i| class.balance(&i.totals))
        .sum();
    if total <= 0.0 {
        return;
    }
    for indiv in cur.individuals.values_mut() {
        let take = amount * class.balance(&indiv.totals) / total;
        let balance = class.balance_mut(&mut indiv.totals);
        *balance = (*balance - take).max(0.0);
        *class.withdrawal_mut(&mut indiv.totals) += take;
    }
    *class.balance_mut(&mut cur.totals) = cur
        .individuals
        .values()
        .map(|i| class.balance(&i.totals))
        .sum();
    *class.withdrawal_mut(&mut cur.totals) = cur
        .individuals
        .values()
        .map(|i| class.withdrawal(&i.totals))
        .sum();
}

/// Rule 3: convert qualified money to Roth up to the remaining room in the
/// current federal marginal bracket
fn convert_to_roth(
    ctx: &RuleContext,
    _prev: Option<&YearlySummary>,
    mut cur: YearlySummary,
) -> YearlySummary {
    let t = &cur.totals;
    let ordinary = t.income
        + t.rmd_withdrawal
        + t.qualified_withdrawal
        + ctx.tax.taxable_social_security_fraction * t.social_security;
    let headroom = ctx.tax.federal.headroom(ordinary);
    let amount = headroom.min(cur.totals.qualified_balance).max(0.0);
    if amount <= 0.0 {
        return cur;
    }

    let total: f64 = cur
        .individuals
        .values()
        .map(|i| i.totals.qualified_balance)
        .sum();
    if total <= 0.0 {
        return cur;
    }
    for indiv in cur.individuals.values_mut() {
        let take = amount * indiv.totals.qualified_balance / total;
        indiv.totals.qualified_balance = (indiv.totals.qualified_balance - take).max(0.0);
        indiv.totals.roth_balance += take;
        indiv.totals.roth_conversion += take;
    }
    cur.totals.qualified_balance = cur
        .individuals
        .values()
        .map(|i| i.totals.qualified_balance)
        .sum();
    cur.totals.roth_balance = cur.individuals.values().map(|i| i.totals.roth_balance).sum();
    cur.totals.roth_conversion = cur
        .individuals
        .values()
        .map(|i| i.totals.roth_conversion)
        .sum();
    cur
}

/// Rule 4: price the final income and withdrawal figures
///
/// The five components are independent of each other and never trigger new
/// withdrawals. The bill is settled against the plug values: first unwinding
/// the year's surplus contribution, then adding any remainder to the deficit.
fn calculate_taxes(
    ctx: &RuleContext,
    _prev: Option<&YearlySummary>,
    mut cur: YearlySummary,
) -> YearlySummary {
    let t = &cur.totals;
    let ordinary = t.income
        + t.rmd_withdrawal
        + t.qualified_withdrawal
        + t.roth_conversion
        + ctx.tax.taxable_social_security_fraction * t.social_security;

    let federal = ctx.tax.federal.tax(ordinary);
    let state = ctx.tax.state.tax(ordinary);
    let fica = tax::social_security_tax(t.income, ctx.tax.self_employed);
    let medicare = tax::medicare_tax(t.income, ctx.tax.filing_status, ctx.tax.self_employed);
    let capital_gains = tax::capital_gains_tax(
        t.non_qualified_withdrawal,
        ctx.tax.cost_basis_fraction,
        &ctx.tax.capital_gains,
    );

    cur.totals.federal_tax = federal;
    cur.totals.state_tax = state;
    cur.totals.fica_tax = fica;
    cur.totals.medicare_tax = medicare;
    cur.totals.capital_gains_tax = capital_gains;

    settle_taxes(&mut cur);
    cur
}

/// Keep the cash-flow identity intact without revisiting withdrawals: the
/// tax bill first claws back this year's surplus contribution (and the
/// balance it fed), and anything beyond that lands in the deficit plug
fn settle_taxes(cur: &mut YearlySummary) {
    let bill = cur.totals.total_taxes();
    let offset = bill.min(cur.totals.non_qualified_contribution);
    if offset > 0.0 {
        let total: f64 = cur
            .individuals
            .values()
            .map(|i| i.totals.non_qualified_contribution)
            .sum();
        if total > 0.0 {
            for indiv in cur.individuals.values_mut() {
                let share = offset * indiv.totals.non_qualified_contribution / total;
                indiv.totals.non_qualified_contribution =
                    (indiv.totals.non_qualified_contribution - share).max(0.0);
                indiv.totals.non_qualified_balance =
                    (indiv.totals.non_qualified_balance - share).max(0.0);
            }
        }
        cur.totals.non_qualified_contribution = cur
            .individuals
            .values()
            .map(|i| i.totals.non_qualified_contribution)
            .sum();
        cur.totals.non_qualified_balance = cur
            .individuals
            .values()
            .map(|i| i.totals.non_qualified_balance)
            .sum();
    }
    let remainder = (bill - offset).max(0.0);
    if remainder > 0.0 {
        cur.totals.deficit += remainder;
    }
}
