//! Flat tabular export: one row per named metric, one column per year

use std::collections::BTreeSet;
use std::io::Write;

use crate::model::{SummaryFields, YearlySummary};

/// One metric row across the projected years
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub metric: String,
    pub values: Vec<f64>,
}

/// Metrics-by-years table built from a summary sequence
///
/// Values are kept at full precision; formatting to two decimals happens
/// only when writing CSV, so re-aggregating rows reproduces the summary
/// fields exactly.
#[derive(Debug, Clone)]
pub struct TabularExport {
    pub years: Vec<i32>,
    pub rows: Vec<ExportRow>,
}

impl TabularExport {
    pub fn from_summaries(summaries: &[YearlySummary]) -> Self {
        let years: Vec<i32> = summaries.iter().map(|s| s.year).collect();

        let names: BTreeSet<&str> = summaries
            .iter()
            .flat_map(|s| s.individuals.keys().map(String::as_str))
            .collect();

        let mut rows = Vec::new();

        // Ages first, for persons with a known birth year
        for name in &names {
            let has_age = summaries
                .iter()
                .any(|s| s.individuals.get(*name).is_some_and(|i| i.age.is_some()));
            if has_age {
                rows.push(ExportRow {
                    metric: format!("Age ({name})"),
                    values: summaries
                        .iter()
                        .map(|s| {
                            s.individuals
                                .get(*name)
                                .and_then(|i| i.age)
                                .map(f64::from)
                                .unwrap_or(0.0)
                        })
                        .collect(),
                });
            }
        }

        // Total-then-per-person blocks in the fixed metric order
        let blocks: [(&str, fn(&SummaryFields) -> f64); 5] = [
            ("Income", |f| f.income),
            ("RMD Withdrawal", |f| f.rmd_withdrawal),
            ("Qualified Withdrawal", |f| f.qualified_withdrawal),
            ("Non-Qualified Withdrawal", |f| f.non_qualified_withdrawal),
            ("Social Security", |f| f.social_security),
        ];
        for (label, get) in blocks {
            rows.push(total_row(summaries, &format!("Total {label}"), get));
            for name in &names {
                rows.push(person_row(summaries, name, label, get));
            }
        }

        let tax_rows: [(&str, fn(&SummaryFields) -> f64); 5] = [
            ("Federal Tax", |f| f.federal_tax),
            ("State Tax", |f| f.state_tax),
            ("FICA Tax", |f| f.fica_tax),
            ("Medicare Tax", |f| f.medicare_tax),
            ("Capital Gains Tax", |f| f.capital_gains_tax),
        ];
        for (label, get) in tax_rows {
            rows.push(total_row(summaries, label, get));
        }

        rows.push(total_row(summaries, "Total Expenses", |f| f.expenses));

        Self { years, rows }
    }

    /// Write the table as CSV, values formatted to two decimal places
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);

        let mut header = vec!["Metric".to_string()];
        header.extend(self.years.iter().map(|y| y.to_string()));
        out.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.metric.clone()];
            record.extend(row.values.iter().map(|v| format!("{v:.2}")));
            out.write_record(&record)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Look up a row by metric name
    pub fn row(&self, metric: &str) -> Option<&ExportRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }
}

fn total_row(
    summaries: &[YearlySummary],
    metric: &str,
    get: fn(&SummaryFields) -> f64,
) -> ExportRow {
    ExportRow {
        metric: metric.to_string(),
        values: summaries.iter().map(|s| get(&s.totals)).collect(),
    }
}

fn person_row(
    summaries: &[YearlySummary],
    name: &str,
    label: &str,
    get: fn(&SummaryFields) -> f64,
) -> ExportRow {
    ExportRow {
        metric: format!("{label} ({name})"),
        values: summaries
            .iter()
            .map(|s| s.individuals.get(name).map(|i| get(&i.totals)).unwrap_or(0.0))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entry, FilingStatus, ItemType, Person};
    use crate::projection::Projector;
    use crate::tax::TaxConfig;
    use std::collections::HashMap;

    fn sample_summaries() -> Vec<YearlySummary> {
        let persons: HashMap<String, Person> = [Person::new("Alice", 1960).unwrap()]
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        let entries = vec![
            Entry::new(
                Some("Alice".into()),
                ItemType::Income,
                "salary",
                100_000.0,
                2024,
                2026,
            )
            .unwrap(),
            Entry::new(
                None,
                ItemType::SocialSecurityBenefit,
                "benefit",
                24_000.0,
                2025,
                2026,
            )
            .unwrap(),
        ];
        Projector::new(
            HashMap::new(),
            persons,
            TaxConfig::new_2024(FilingStatus::Single, false),
        )
        .project(&entries)
    }

    #[test]
    fn test_row_order_and_shape() {
        let summaries = sample_summaries();
        let export = TabularExport::from_summaries(&summaries);

        assert_eq!(export.years, vec![2024, 2025, 2026]);
        // Unknown bucket has no age row; Alice does
        assert_eq!(export.rows[0].metric, "Age (Alice)");
        assert_eq!(export.rows[0].values, vec![64.0, 65.0, 66.0]);

        let metrics: Vec<&str> = export.rows.iter().map(|r| r.metric.as_str()).collect();
        let income_pos = metrics.iter().position(|m| *m == "Total Income").unwrap();
        let rmd_pos = metrics
            .iter()
            .position(|m| *m == "Total RMD Withdrawal")
            .unwrap();
        let fed_pos = metrics.iter().position(|m| *m == "Federal Tax").unwrap();
        let exp_pos = metrics.iter().position(|m| *m == "Total Expenses").unwrap();
        assert!(income_pos < rmd_pos && rmd_pos < fed_pos && fed_pos < exp_pos);

        // Per-person rows directly follow their total, in name order
        assert_eq!(metrics[income_pos + 1], "Income (Alice)");
        assert_eq!(metrics[income_pos + 2], "Income (Unknown)");
    }

    #[test]
    fn test_round_trip_reaggregation() {
        let summaries = sample_summaries();
        let export = TabularExport::from_summaries(&summaries);

        // Summing the per-person rows reproduces the total row exactly
        for label in [
            "Income",
            "RMD Withdrawal",
            "Qualified Withdrawal",
            "Non-Qualified Withdrawal",
            "Social Security",
        ] {
            let total = &export.row(&format!("Total {label}")).unwrap().values;
            let mut rebuilt = vec![0.0; total.len()];
            for row in export
                .rows
                .iter()
                .filter(|r| r.metric.starts_with(&format!("{label} (")))
            {
                for (acc, v) in rebuilt.iter_mut().zip(&row.values) {
                    *acc += v;
                }
            }
            assert_eq!(&rebuilt, total, "metric {label}");
        }

        // Total rows match the summary fields exactly
        let totals = &export.row("Total Income").unwrap().values;
        for (value, summary) in totals.iter().zip(&summaries) {
            assert_eq!(*value, summary.totals.income);
        }
    }

    #[test]
    fn test_csv_formatting() {
        let summaries = sample_summaries();
        let export = TabularExport::from_summaries(&summaries);
        let mut buf = Vec::new();
        export.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Metric,2024,2025,2026");
        // Every value carries two decimal places
        let age_line = lines.next().unwrap();
        assert_eq!(age_line, "Age (Alice),64.00,65.00,66.00");
    }
}
