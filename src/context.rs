// src/context.rs

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::{config::Config, load::load_survey_csv, record::SurveyRecord};

/// Top-level application state: the deployment config plus the survey table,
/// loaded on first use and immutable afterwards.
///
/// Views borrow `&[SurveyRecord]` from here; nothing re-reads the file once
/// the table is cached.
pub struct AppContext {
    config: Config,
    table: OnceCell<Vec<SurveyRecord>>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The normalized table. The first call reads `config.data_path`; later
    /// calls return the cached rows. A failed load is not cached.
    pub fn records(&self) -> Result<&[SurveyRecord]> {
        let rows = self.table.get_or_try_init(|| {
            load_survey_csv(&self.config.data_path, self.config.skip_rows)
        })?;
        debug!(rows = rows.len(), "survey table ready");
        Ok(rows.as_slice())
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}
