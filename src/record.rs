// src/record.rs

use serde::Serialize;

/// The "all values combined" label used by every categorical dimension.
pub const TOTAL: &str = "総数";

/// Aggregate education category: students of any school type.
pub const ENROLLED: &str = "在学者";

/// Suffixes marking a school-type breakdown row. The export has used both
/// half-width and full-width parentheses.
pub const ENROLLED_SUFFIXES: &[&str] = &["(在学者)", "（在学者）"];

/// One normalized row of the b004 table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyRecord {
    pub region: String,
    pub gender: String,
    pub age_group: String,
    pub education: String,
    pub total: u64,
    pub employed: u64,
    /// `employed + unemployed` can be less than `total`; the survey keeps
    /// unclassified respondents in the total only.
    pub unemployed: u64,
    pub job_seeking: u64,
}

impl SurveyRecord {
    pub fn work_rate(&self) -> f64 {
        work_rate(self.total, self.employed)
    }

    /// School label for a breakdown row, e.g. `"大学(在学者)"` → `Some("大学")`.
    pub fn school_label(&self) -> Option<&str> {
        school_label(&self.education)
    }
}

/// `employed / total * 100`, or `0.0` when `total` is zero.
pub fn work_rate(total: u64, employed: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    employed as f64 / total as f64 * 100.0
}

pub fn school_label(education: &str) -> Option<&str> {
    ENROLLED_SUFFIXES
        .iter()
        .find_map(|suffix| education.strip_suffix(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_rate_is_zero() {
        assert_eq!(work_rate(0, 0), 0.0);
        assert_eq!(work_rate(0, 999), 0.0);
    }

    #[test]
    fn rate_is_a_percentage() {
        assert_eq!(work_rate(200, 50), 25.0);
        assert_eq!(work_rate(1000, 600), 60.0);
    }

    #[test]
    fn school_label_handles_both_paren_widths() {
        assert_eq!(school_label("大学(在学者)"), Some("大学"));
        assert_eq!(school_label("高校（在学者）"), Some("高校"));
        assert_eq!(school_label(ENROLLED), None);
        assert_eq!(school_label("卒業者"), None);
    }
}
