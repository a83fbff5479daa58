use anyhow::{Context, Result};
use estat_students::{
    report::{render_text, Report},
    select::{resolve_category, resolve_format, resolve_selection, OutputFormat},
    AppContext, Config,
};
use std::{env, process};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn run() -> Result<()> {
    // ─── 1) config + table ───────────────────────────────────────────
    let config = Config::load()?;
    info!(path = %config.data_path.display(), "startup");
    let ctx = AppContext::new(config);
    let records = ctx.records().context("データ読み込みエラー")?;

    // ─── 2) selection ────────────────────────────────────────────────
    let var = |key: &str| env::var(key).ok();
    let selection = resolve_selection(
        ctx.config(),
        records,
        var("ESTAT_REGION").as_deref(),
        var("ESTAT_GENDER").as_deref(),
    )?;
    let category = resolve_category(var("ESTAT_COMPARE").as_deref())?;
    let format = resolve_format(var("ESTAT_FORMAT").as_deref())?;

    // ─── 3) render ───────────────────────────────────────────────────
    let report = Report::build(
        records,
        selection,
        category,
        ctx.config().regions.as_slice(),
    );
    match format {
        OutputFormat::Text => print!("{}", render_text(&report)?),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn main() {
    // logs go to stderr; stdout carries the report
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
