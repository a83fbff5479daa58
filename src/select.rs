// src/select.rs

use anyhow::{bail, Result};
use std::str::FromStr;

use crate::{
    config::Config,
    record::SurveyRecord,
    view::{gender_options, ComparisonCategory, Selection},
};

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unknown output format `{}`; use text or json", other),
        }
    }
}

/// `None` and blank input both mean "not chosen".
fn chosen(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

/// Turn raw region/gender choices into a [`Selection`].
///
/// Unset values fall back to the first option of each list: the first
/// configured region and `総数`. Values outside the lists are errors.
pub fn resolve_selection(
    config: &Config,
    records: &[SurveyRecord],
    region: Option<&str>,
    gender: Option<&str>,
) -> Result<Selection> {
    let regions = &config.regions;
    let region = match chosen(region) {
        Some(r) if regions.iter().any(|x| x == r) => r.to_string(),
        Some(r) => bail!("unknown region `{}`; choose one of {:?}", r, regions),
        None => match regions.first() {
            Some(r) => r.clone(),
            None => bail!("no regions configured"),
        },
    };

    let genders = gender_options(records);
    let gender = match chosen(gender) {
        Some(g) if genders.iter().any(|x| x == g) => g.to_string(),
        Some(g) => bail!("unknown gender `{}`; choose one of {:?}", g, genders),
        None => genders[0].clone(),
    };

    Ok(Selection::new(region, gender))
}

/// Comparison category, defaulting to all students.
pub fn resolve_category(category: Option<&str>) -> Result<ComparisonCategory> {
    match chosen(category) {
        Some(c) => c.parse(),
        None => Ok(ComparisonCategory::Enrolled),
    }
}

pub fn resolve_format(format: Option<&str>) -> Result<OutputFormat> {
    match chosen(format) {
        Some(f) => f.parse(),
        None => Ok(OutputFormat::default()),
    }
}
