//! Cross-checks over produced summaries, used by tests and diagnostics

use crate::model::YearlySummary;

/// Absolute tolerance for floating-point accumulation drift
pub const TOLERANCE: f64 = 0.01;

/// Outcome of a validation pass
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub ok: bool,
    pub diagnostics: Vec<String>,
}

impl ValidationReport {
    fn passing() -> Self {
        Self {
            ok: true,
            diagnostics: Vec::new(),
        }
    }

    fn fail(&mut self, message: String) {
        self.ok = false;
        self.diagnostics.push(message);
    }

    fn merge(&mut self, other: ValidationReport) {
        self.ok &= other.ok;
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Per-person sums must match the aggregate fields for income, RMD, the
/// three account withdrawals, and Social Security
pub fn validate_individual_totals(summary: &YearlySummary) -> ValidationReport {
    let mut report = ValidationReport::passing();
    let sums = summary.sum_individuals();

    let checks = [
        ("income", summary.totals.income, sums.income),
        (
            "rmd withdrawal",
            summary.totals.rmd_withdrawal,
            sums.rmd_withdrawal,
        ),
        (
            "roth withdrawal",
            summary.totals.roth_withdrawal,
            sums.roth_withdrawal,
        ),
        (
            "qualified withdrawal",
            summary.totals.qualified_withdrawal,
            sums.qualified_withdrawal,
        ),
        (
            "non-qualified withdrawal",
            summary.totals.non_qualified_withdrawal,
            sums.non_qualified_withdrawal,
        ),
        (
            "social security",
            summary.totals.social_security,
            sums.social_security,
        ),
    ];

    for (metric, aggregate, per_person_sum) in checks {
        if (aggregate - per_person_sum).abs() > TOLERANCE {
            report.fail(format!(
                "year {}: {} aggregate {:.2} differs from per-person sum {:.2}",
                summary.year, metric, aggregate, per_person_sum
            ));
        }
    }
    report
}

/// Inflows plus the deficit plug must equal outflows
pub fn validate_cash_flow(summary: &YearlySummary) -> ValidationReport {
    let mut report = ValidationReport::passing();
    let inflows = summary.totals.total_cash_inflows();
    let outflows = summary.totals.total_cash_outflows();
    let gap = inflows + summary.totals.deficit - outflows;
    if gap.abs() > TOLERANCE {
        report.fail(format!(
            "year {}: inflows {:.2} + deficit {:.2} != outflows {:.2} (gap {:.2})",
            summary.year, inflows, summary.totals.deficit, outflows, gap
        ));
    }
    report
}

/// Run both checks over a whole summary sequence
pub fn validate_all(summaries: &[YearlySummary]) -> ValidationReport {
    let mut report = ValidationReport::passing();
    for summary in summaries {
        report.merge(validate_individual_totals(summary));
        report.merge(validate_cash_flow(summary));
    }
    report
}
