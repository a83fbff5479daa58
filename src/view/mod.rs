// src/view/mod.rs
pub mod compare;

use serde::Serialize;
use tracing::{debug, warn};

use crate::record::{SurveyRecord, ENROLLED, TOTAL};

pub use compare::{compare_regions, ComparisonCategory, ComparisonRow};

/// What the user picked: one region and one gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub region: String,
    pub gender: String,
}

impl Selection {
    pub fn new(region: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            gender: gender.into(),
        }
    }

    fn matches(&self, r: &SurveyRecord) -> bool {
        r.region == self.region && r.gender == self.gender
    }
}

/// Headline numbers for all students of one region/gender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub total: u64,
    pub employed: u64,
    pub job_seeking: u64,
    pub work_rate: f64,
}

impl Headline {
    fn from_record(r: &SurveyRecord) -> Self {
        Self {
            total: r.total,
            employed: r.employed,
            job_seeking: r.job_seeking,
            work_rate: r.work_rate(),
        }
    }

    /// Work rate as a `0.0..=1.0` fraction for a bounded progress bar.
    pub fn progress(&self) -> f64 {
        self.work_rate.clamp(0.0, 100.0) / 100.0
    }
}

/// Result of the primary lookup. `NoData` is not an error and carries no
/// zero-filled metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "headline", rename_all = "snake_case")]
pub enum Lookup {
    Found(Headline),
    NoData,
}

impl Lookup {
    pub fn found(&self) -> Option<&Headline> {
        match self {
            Lookup::Found(h) => Some(h),
            Lookup::NoData => None,
        }
    }
}

/// Find the all-ages "在学者" row for `sel`.
pub fn headline(records: &[SurveyRecord], sel: &Selection) -> Lookup {
    let mut hits = records
        .iter()
        .filter(|r| sel.matches(r) && r.age_group == TOTAL && r.education == ENROLLED);

    let Some(first) = hits.next() else {
        warn!(region = %sel.region, gender = %sel.gender, "no enrolled-student row");
        return Lookup::NoData;
    };
    let extra = hits.count();
    if extra > 0 {
        warn!(region = %sel.region, gender = %sel.gender, extra, "duplicate enrolled-student rows; using the first");
    }
    Lookup::Found(Headline::from_record(first))
}

/// One school type in the per-school breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolRow {
    pub school: String,
    pub total: u64,
    pub employed: u64,
    pub work_rate: f64,
}

/// Per-school rows for `sel`, all ages, in table order.
pub fn school_breakdown(records: &[SurveyRecord], sel: &Selection) -> Vec<SchoolRow> {
    let rows: Vec<SchoolRow> = records
        .iter()
        .filter(|r| sel.matches(r) && r.age_group == TOTAL)
        .filter_map(|r| {
            r.school_label().map(|school| SchoolRow {
                school: school.to_string(),
                total: r.total,
                employed: r.employed,
                work_rate: r.work_rate(),
            })
        })
        .collect();
    debug!(region = %sel.region, gender = %sel.gender, schools = rows.len(), "school breakdown");
    rows
}

/// Gender choices: the total sentinel first, then every other value in table order.
pub fn gender_options(records: &[SurveyRecord]) -> Vec<String> {
    let mut out = vec![TOTAL.to_string()];
    for r in records {
        if r.gender != TOTAL && !out.contains(&r.gender) {
            out.push(r.gender.clone());
        }
    }
    out
}
