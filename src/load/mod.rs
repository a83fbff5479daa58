// src/load/mod.rs
pub mod clean;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, trace};

use crate::record::SurveyRecord;
use clean::{parse_count, strip_code};

/// Preamble rows (title, notes, the multi-line header) before the first data row.
pub const SKIP_ROWS: usize = 9;

// Positional layout of the b004 export. Everything else is discarded.
const COL_REGION: usize = 1;
const COL_GENDER: usize = 3;
const COL_AGE: usize = 5;
const COL_EDUCATION: usize = 7;
const COL_TOTAL: usize = 8;
const COL_EMPLOYED: usize = 9;
const COL_UNEMPLOYED: usize = 10;
const COL_JOB_SEEKING: usize = 11;

/// Minimum field count for a data row.
///
/// Any shorter row after the preamble fails the whole load. That includes a
/// trailing source note such as `注記：出典 e-Stat`; strip such lines from the
/// export (or raise `skip_rows` past a leading one) before loading.
pub const MIN_FIELDS: usize = COL_JOB_SEEKING + 1;

/// Open `path` and normalize every data row after the first `skip_rows` records.
///
/// Fails as a whole if the file can't be opened, isn't valid UTF-8 CSV, or a
/// data row is too short to hold the expected columns.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_survey_csv<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<Vec<SurveyRecord>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open survey CSV: {:?}", path.as_ref()))?;
    let records = parse_survey_csv(file, skip_rows)
        .with_context(|| format!("Failed to load survey CSV: {:?}", path.as_ref()))?;
    info!(rows = records.len(), "survey table loaded");
    Ok(records)
}

/// Same as [`load_survey_csv`] but over any reader.
pub fn parse_survey_csv<R: Read>(reader: R, skip_rows: usize) -> Result<Vec<SurveyRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // preamble rows are shorter than data rows
        .from_reader(reader);

    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        if idx < skip_rows {
            trace!(idx, "skipping preamble row");
            continue;
        }
        if is_blank(&record) {
            debug!(idx, "skipping blank row");
            continue;
        }
        out.push(normalize_record(&record)?);
    }
    Ok(out)
}

/// Map one raw data row onto a [`SurveyRecord`].
pub fn normalize_record(record: &StringRecord) -> Result<SurveyRecord> {
    if record.len() < MIN_FIELDS {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        bail!(
            "row at line {} has {} fields, expected at least {}",
            line,
            record.len(),
            MIN_FIELDS
        );
    }
    let text = |i: usize| strip_code(record.get(i).unwrap_or_default());
    let count = |i: usize| parse_count(record.get(i).unwrap_or_default());

    Ok(SurveyRecord {
        region: text(COL_REGION),
        gender: text(COL_GENDER),
        age_group: text(COL_AGE),
        education: text(COL_EDUCATION),
        total: count(COL_TOTAL),
        employed: count(COL_EMPLOYED),
        unemployed: count(COL_UNEMPLOYED),
        job_seeking: count(COL_JOB_SEEKING),
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,estat_students::load=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Nine preamble lines shaped like the real export.
    const PREAMBLE: &str = "\
就業構造基本調査
b004
\"就業状態,男女,年齢,在学か否か・最終学歴,都道府県\"
単位：人
,,,,,,,,,,,
,,,,,,,,,,,
表章項目,,,,,,,,総数,有業者,無業者,求職者
,地域,,男女,,年齢,,教育,,,,
注記
";

    fn fixture(rows: &[&str]) -> String {
        let mut s = PREAMBLE.to_string();
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    const TOKYO_ENROLLED: &str =
        "x,13_東京都,x,0_総数,x,0_総数,x,1_在学者,\"1,000\",600,400,50";

    #[test]
    fn end_to_end_row_normalizes() -> Result<()> {
        let csv = fixture(&[TOKYO_ENROLLED]);
        let records = parse_survey_csv(Cursor::new(csv), SKIP_ROWS)?;
        assert_eq!(
            records,
            vec![SurveyRecord {
                region: "東京都".into(),
                gender: "総数".into(),
                age_group: "総数".into(),
                education: "在学者".into(),
                total: 1000,
                employed: 600,
                unemployed: 400,
                job_seeking: 50,
            }]
        );
        assert_eq!(records[0].work_rate(), 60.0);
        Ok(())
    }

    #[test]
    fn preamble_is_skipped_even_when_wide() -> Result<()> {
        // the comma-only and header preamble lines are 12 fields wide
        let csv = fixture(&[TOKYO_ENROLLED]);
        let records = parse_survey_csv(Cursor::new(csv), SKIP_ROWS)?;
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.region != "地域"));
        Ok(())
    }

    #[test]
    fn dashes_and_garbage_become_zero() -> Result<()> {
        let csv = fixture(&["x,20_長野県,x,1_男,x,0_総数,x,3_大学(在学者),-,-,***,\"1,2\""]);
        let r = &parse_survey_csv(Cursor::new(csv), SKIP_ROWS)?[0];
        assert_eq!((r.total, r.employed, r.unemployed, r.job_seeking), (0, 0, 0, 12));
        assert_eq!(r.region, "長野県");
        assert_eq!(r.gender, "男");
        assert_eq!(r.education, "大学(在学者)");
        assert_eq!(r.work_rate(), 0.0);
        Ok(())
    }

    #[test]
    fn categories_without_code_pass_through() -> Result<()> {
        let csv = fixture(&["x,静岡県,x,総数,x,15～19歳,x,在学者,10,5,4,1"]);
        let r = &parse_survey_csv(Cursor::new(csv), SKIP_ROWS)?[0];
        assert_eq!(r.region, "静岡県");
        assert_eq!(r.age_group, "15～19歳");
        Ok(())
    }

    #[test]
    fn unreconciled_totals_are_kept() -> Result<()> {
        let csv = fixture(&["x,13_東京都,x,0_総数,x,0_総数,x,1_在学者,100,30,60,5"]);
        let r = &parse_survey_csv(Cursor::new(csv), SKIP_ROWS)?[0];
        assert_eq!(r.total, 100);
        assert_eq!(r.employed + r.unemployed, 90);
        Ok(())
    }

    #[test]
    fn short_data_row_fails_the_load() {
        let csv = fixture(&[TOKYO_ENROLLED, "x,13_東京都,x,0_総数"]);
        let err = parse_survey_csv(Cursor::new(csv), SKIP_ROWS).unwrap_err();
        assert!(format!("{:#}", err).contains("has 4 fields"), "{:#}", err);
    }

    #[test]
    fn trailing_note_row_fails_the_load() {
        let csv = fixture(&[TOKYO_ENROLLED, "注記：出典 e-Stat"]);
        let err = parse_survey_csv(Cursor::new(csv), SKIP_ROWS).unwrap_err();
        assert!(format!("{:#}", err).contains("has 1 fields"), "{:#}", err);
    }

    #[test]
    fn blank_rows_are_skipped() -> Result<()> {
        let csv = fixture(&[TOKYO_ENROLLED, ",,,,,,,,,,,", TOKYO_ENROLLED]);
        assert_eq!(parse_survey_csv(Cursor::new(csv), SKIP_ROWS)?.len(), 2);
        Ok(())
    }

    #[test]
    fn load_from_file() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(fixture(&[TOKYO_ENROLLED]).as_bytes())?;

        let records = load_survey_csv(tmp.path(), SKIP_ROWS)?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, "東京都");
        Ok(())
    }

    #[test]
    fn missing_file_is_a_load_error() {
        init_test_logging();
        let err = load_survey_csv("does/not/exist.csv", SKIP_ROWS).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open survey CSV"));
    }

    #[test]
    fn invalid_utf8_is_a_load_error() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(PREAMBLE.as_bytes())?;
        tmp.write_all(b"x,\xff\xfe,x,a,x,b,x,c,1,2,3,4\n")?;
        assert!(load_survey_csv(tmp.path(), SKIP_ROWS).is_err());
        Ok(())
    }
}
