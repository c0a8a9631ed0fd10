//! Progressive bracket table primitive shared by the federal, state, and
//! capital-gains calculators

/// Ascending `(lower bound, marginal rate)` pairs; the first bound is 0 and
/// the last bracket is unbounded above
#[derive(Debug, Clone)]
pub struct BracketTable {
    brackets: Vec<(f64, f64)>,
}

impl BracketTable {
    pub fn new(brackets: Vec<(f64, f64)>) -> Self {
        debug_assert!(!brackets.is_empty());
        debug_assert!(brackets.windows(2).all(|w| w[0].0 < w[1].0));
        Self { brackets }
    }

    /// Progressive tax on the full amount
    pub fn tax(&self, taxable: f64) -> f64 {
        if taxable <= 0.0 {
            return 0.0;
        }
        let mut total = 0.0;
        for (i, &(lower, rate)) in self.brackets.iter().enumerate() {
            if taxable <= lower {
                break;
            }
            let upper = self
                .brackets
                .get(i + 1)
                .map(|b| b.0)
                .unwrap_or(f64::INFINITY);
            total += (taxable.min(upper) - lower) * rate;
        }
        total
    }

    /// Room left before the next marginal rate kicks in
    ///
    /// Zero in the unbounded top bracket.
    pub fn headroom(&self, income: f64) -> f64 {
        let income = income.max(0.0);
        for &(lower, _) in self.brackets.iter().skip(1) {
            if income < lower {
                return lower - income;
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn table() -> BracketTable {
        BracketTable::new(vec![(0.0, 0.10), (10_000.0, 0.20), (50_000.0, 0.30)])
    }

    #[test]
    fn test_progressive_tax() {
        let t = table();
        assert_abs_diff_eq!(t.tax(0.0), 0.0);
        assert_abs_diff_eq!(t.tax(-5.0), 0.0);
        assert_abs_diff_eq!(t.tax(10_000.0), 1_000.0);
        assert_abs_diff_eq!(t.tax(20_000.0), 1_000.0 + 2_000.0);
        assert_abs_diff_eq!(t.tax(60_000.0), 1_000.0 + 8_000.0 + 3_000.0);
    }

    #[test]
    fn test_headroom() {
        let t = table();
        assert_abs_diff_eq!(t.headroom(4_000.0), 6_000.0);
        assert_abs_diff_eq!(t.headroom(10_000.0), 40_000.0);
        // Top bracket has no ceiling to fill toward
        assert_abs_diff_eq!(t.headroom(75_000.0), 0.0);
    }
}
