//! Federal ordinary-income brackets, 2024 tax year

use super::BracketTable;
use crate::model::FilingStatus;

/// 2024 federal brackets for the given filing status
pub fn federal_brackets_2024(status: FilingStatus) -> BracketTable {
    let brackets = match status {
        FilingStatus::Single => vec![
            (0.0, 0.10),
            (11_600.0, 0.12),
            (47_150.0, 0.22),
            (100_525.0, 0.24),
            (191_950.0, 0.32),
            (243_725.0, 0.35),
            (609_350.0, 0.37),
        ],
        FilingStatus::MarriedJoint => vec![
            (0.0, 0.10),
            (23_200.0, 0.12),
            (94_300.0, 0.22),
            (201_050.0, 0.24),
            (383_900.0, 0.32),
            (487_450.0, 0.35),
            (731_200.0, 0.37),
        ],
        FilingStatus::MarriedSeparate => vec![
            (0.0, 0.10),
            (11_600.0, 0.12),
            (47_150.0, 0.22),
            (100_525.0, 0.24),
            (191_950.0, 0.32),
            (243_725.0, 0.35),
            (365_600.0, 0.37),
        ],
        FilingStatus::HeadOfHousehold => vec![
            (0.0, 0.10),
            (16_550.0, 0.12),
            (63_100.0, 0.22),
            (100_500.0, 0.24),
            (191_950.0, 0.32),
            (243_700.0, 0.35),
            (609_350.0, 0.37),
        ],
    };
    BracketTable::new(brackets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_50k() {
        let t = federal_brackets_2024(FilingStatus::Single);
        // 11600*10% + 35550*12% + 2850*22%
        let expected = 1_160.0 + 4_266.0 + 627.0;
        assert_abs_diff_eq!(t.tax(50_000.0), expected, epsilon = 0.01);
    }

    #[test]
    fn test_mfj_100k() {
        let t = federal_brackets_2024(FilingStatus::MarriedJoint);
        // 23200*10% + 71100*12% + 5700*22%
        let expected = 2_320.0 + 8_532.0 + 1_254.0;
        assert_abs_diff_eq!(t.tax(100_000.0), expected, epsilon = 0.01);
    }

    #[test]
    fn test_status_selects_table() {
        let single = federal_brackets_2024(FilingStatus::Single);
        let mfj = federal_brackets_2024(FilingStatus::MarriedJoint);
        assert!(mfj.tax(100_000.0) < single.tax(100_000.0));
    }
}
