// src/view/compare.rs

use anyhow::{anyhow, Result};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::record::{school_label, SurveyRecord, ENROLLED, TOTAL};

/// Education categories offered for the cross-region comparison.
/// Serializes as its [`label`](ComparisonCategory::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonCategory {
    /// All students.
    Enrolled,
    University,
    HighSchool,
}

impl ComparisonCategory {
    pub const ALL: [ComparisonCategory; 3] = [
        ComparisonCategory::Enrolled,
        ComparisonCategory::University,
        ComparisonCategory::HighSchool,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComparisonCategory::Enrolled => ENROLLED,
            ComparisonCategory::University => "大学(在学者)",
            ComparisonCategory::HighSchool => "高校(在学者)",
        }
    }

    /// Accepts the display label with either paren width, or the bare school name.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s || c.school() == Some(s) || c.matches(s))
    }

    fn school(&self) -> Option<&'static str> {
        match self {
            ComparisonCategory::Enrolled => None,
            ComparisonCategory::University => Some("大学"),
            ComparisonCategory::HighSchool => Some("高校"),
        }
    }

    /// Does a stored `education` value belong to this category?
    pub fn matches(&self, education: &str) -> bool {
        match self.school() {
            None => education == ENROLLED,
            Some(school) => school_label(education) == Some(school),
        }
    }
}

impl std::str::FromStr for ComparisonCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| anyhow!("unknown comparison category `{}`", s))
    }
}

impl Serialize for ComparisonCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl std::fmt::Display for ComparisonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub region: String,
    pub total: u64,
    pub employed: u64,
    pub work_rate: f64,
}

/// One row per region that has data for `category` (gender and age at total),
/// in the order of `regions`. Regions without a row are left out.
pub fn compare_regions<S: AsRef<str>>(
    records: &[SurveyRecord],
    regions: &[S],
    category: ComparisonCategory,
) -> Vec<ComparisonRow> {
    let rows: Vec<ComparisonRow> = regions
        .iter()
        .filter_map(|region| {
            let region = region.as_ref();
            records
                .iter()
                .find(|r| {
                    r.region == region
                        && r.gender == TOTAL
                        && r.age_group == TOTAL
                        && category.matches(&r.education)
                })
                .map(|r| ComparisonRow {
                    region: r.region.clone(),
                    total: r.total,
                    employed: r.employed,
                    work_rate: r.work_rate(),
                })
        })
        .collect();
    debug!(%category, regions = regions.len(), found = rows.len(), "region comparison");
    rows
}
