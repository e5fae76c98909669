use dagrid_core::address::Gazetteer;
use dagrid_core::error::DagridError;
use dagrid_core::extraction::json::JsonPageSource;
use dagrid_core::options::ExtractOptions;
use std::path::PathBuf;

use crate::output;

pub struct ExtractArgs {
    pub input_file: PathBuf,
    pub gazetteer_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub info_url: Option<String>,
    pub comment_url: Option<String>,
    pub output_format: String,
    pub output_file: Option<PathBuf>,
}

pub fn run(args: ExtractArgs) -> Result<(), DagridError> {
    // Flags override the config file
    let mut options = match &args.config {
        Some(path) => ExtractOptions::load(path)?,
        None => ExtractOptions::default(),
    };
    if let Some(url) = args.info_url {
        options.information_url = url;
    }
    if let Some(url) = args.comment_url {
        options.comment_url = url;
    }

    let gazetteer = Gazetteer::load_dir(&args.gazetteer_dir)?;
    let input = std::fs::read(&args.input_file)?;
    let outcome = dagrid_core::extract(&input, &JsonPageSource::new(), &gazetteer, &options)?;

    match args.output_format.as_str() {
        "json" => output::json::print(&outcome.records)?,
        _ => output::table::print_records(&outcome.records),
    }

    if let Some(path) = &args.output_file {
        // Always write JSON when saving to file
        let json = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(path, json)?;
        eprintln!(
            "Extracted {} record(s) from {} page(s), written to {}",
            outcome.records.len(),
            outcome.pages,
            path.display()
        );
    }

    output::table::print_diagnostics(&outcome.diagnostics);
    Ok(())
}
