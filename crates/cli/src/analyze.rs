//! `salesboard analyze` and `salesboard validate`: load files, run the engine, present results.

use std::path::{Path, PathBuf};

use log::info;
use salesboard_analytics::config::UnknownPolicy;
use salesboard_analytics::index::build_index;
use salesboard_analytics::validate::validate_input;
use salesboard_analytics::{SalesConfig, SalesData};

use crate::table::render_report;
use crate::CliError;

fn read_file(path: &Path, what: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {what} {}: {e}", path.display())))
}

fn load_data(path: &Path) -> Result<SalesData, CliError> {
    let json = read_file(path, "data")?;
    let data = SalesData::from_json(&json).map_err(|e| {
        CliError::sales(e).with_hint("expected an object with sellers, products and purchase_records")
    })?;
    info!(
        "loaded {}: {} sellers, {} products, {} purchase records",
        path.display(),
        data.sellers.len(),
        data.products.len(),
        data.purchase_records.len()
    );
    Ok(data)
}

fn load_config(path: Option<&Path>) -> Result<SalesConfig, CliError> {
    match path {
        Some(path) => {
            let toml = read_file(path, "config")?;
            SalesConfig::from_toml(&toml).map_err(CliError::sales)
        }
        None => Ok(SalesConfig::default()),
    }
}

pub fn cmd_analyze(
    data_path: PathBuf,
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    top: Option<usize>,
    lenient: bool,
) -> Result<(), CliError> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(n) = top {
        config.top_products = n;
    }
    if lenient {
        config.on_unknown = UnknownPolicy::Skip;
    }

    let data = load_data(&data_path)?;
    let report = salesboard_analytics::run(&config, &data).map_err(CliError::sales)?;

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    } else {
        print!("{}", render_report(&report));
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "{} sellers: revenue {:.2}, profit {:.2}, bonus {:.2}, top seller {}",
        s.sellers,
        s.total_revenue,
        s.total_profit,
        s.total_bonus,
        s.top_seller.as_deref().unwrap_or("-"),
    );
    if s.skipped_records > 0 || s.skipped_items > 0 {
        eprintln!(
            "skipped: {} records, {} items with unknown references",
            s.skipped_records, s.skipped_items
        );
    }

    Ok(())
}

pub fn cmd_validate(data_path: PathBuf, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let data = load_data(&data_path)?;

    validate_input(&data).map_err(CliError::sales)?;
    build_index(&data.products, &data.sellers).map_err(CliError::sales)?;

    eprintln!(
        "valid: {} sellers, {} products, {} purchase records (config '{}')",
        data.sellers.len(),
        data.products.len(),
        data.purchase_records.len(),
        config.name,
    );
    Ok(())
}
