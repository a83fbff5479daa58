// src/report.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::{self, Write};

use crate::{
    record::SurveyRecord,
    view::{
        compare_regions, headline, school_breakdown, ComparisonCategory, ComparisonRow, Lookup,
        SchoolRow, Selection,
    },
};

const BAR_WIDTH: usize = 20;

/// Everything shown for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub selection: Selection,
    pub lookup: Lookup,
    /// Empty when `lookup` is `NoData`.
    pub schools: Vec<SchoolRow>,
    pub category: ComparisonCategory,
    pub comparison: Vec<ComparisonRow>,
}

impl Report {
    pub fn build<S: AsRef<str>>(
        records: &[SurveyRecord],
        selection: Selection,
        category: ComparisonCategory,
        regions: &[S],
    ) -> Self {
        let lookup = headline(records, &selection);
        let schools = match lookup {
            Lookup::Found(_) => school_breakdown(records, &selection),
            Lookup::NoData => Vec::new(),
        };
        let comparison = compare_regions(records, regions, category);
        Self {
            selection,
            lookup,
            schools,
            category,
            comparison,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing report")
    }
}

/// `fraction` in `0.0..=1.0` as a fixed-width bar.
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn rate_bar(rate: f64) -> String {
    bar(rate / 100.0)
}

/// Plain-text dashboard for a terminal.
pub fn render_text(report: &Report) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, report).context("rendering report")?;
    Ok(out)
}

fn write_report(out: &mut String, report: &Report) -> fmt::Result {
    let sel = &report.selection;
    writeln!(out, "📚 在学中の学生の就業状況 ({} / {})", sel.region, sel.gender)?;
    writeln!(out)?;

    match &report.lookup {
        Lookup::NoData => writeln!(out, "⚠ データがありません")?,
        Lookup::Found(h) => {
            writeln!(out, "総数      {:>12}", h.total)?;
            writeln!(out, "有業者    {:>12}", h.employed)?;
            writeln!(out, "求職者    {:>12}", h.job_seeking)?;
            writeln!(out, "就業率    {:>11.1}% {}", h.work_rate, bar(h.progress()))?;
            writeln!(out)?;
            writeln!(out, "学校種別の就業率")?;
            if report.schools.is_empty() {
                writeln!(out, "  (該当なし)")?;
            }
            for row in &report.schools {
                writeln!(
                    out,
                    "  {:<10} {} {:>5.1}%",
                    row.school,
                    rate_bar(row.work_rate),
                    row.work_rate
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "地域比較: {}", report.category)?;
    if report.comparison.is_empty() {
        writeln!(out, "  (該当なし)")?;
    }
    for row in &report.comparison {
        writeln!(
            out,
            "  {:<6} {} {:>5.1}%",
            row.region,
            rate_bar(row.work_rate),
            row.work_rate
        )?;
    }
    Ok(())
}
