//! Canonicalize command implementation.

use crate::config::CliConfig;
use crate::output;
use std::io::{self, Write};
use std::path::PathBuf;
use xmldigest_source::SourceDocument;

pub fn run(
    file: PathBuf,
    method: Option<String>,
    output_path: Option<PathBuf>,
    report: bool,
    config: &CliConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = config.method(method.as_deref())?;
    let mut source = SourceDocument::new(&file);
    let bytes = source.canonicalize(method)?;

    match &output_path {
        Some(dest) => source.save_transformed(method, dest, &config.save_options())?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }

    if report {
        if let Some(report) = source.transform_report(method) {
            eprintln!("{}", output::format_json(report));
        }
    }

    Ok(())
}
