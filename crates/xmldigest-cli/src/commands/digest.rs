//! Digest command implementation.

use crate::config::CliConfig;
use crate::output;
use serde::Serialize;
use std::path::{Path, PathBuf};
use xmldigest_canonical::{C14nMethod, DigestRow};
use xmldigest_source::{DigestPipeline, SourceDocument};

const WIDTHS: [usize; 1] = [10];

#[derive(Serialize)]
struct DigestReport<'a> {
    file: &'a Path,
    method: C14nMethod,
    computed_at: String,
    digests: &'a [DigestRow],
}

pub fn run(
    file: PathBuf,
    method: Option<String>,
    json: bool,
    hex: bool,
    save: Option<PathBuf>,
    config: &CliConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = config.method(method.as_deref())?;

    let mut source = SourceDocument::new(&file);
    source.load_raw_bytes()?;
    if !source.available_methods().contains(&method) {
        return Err(format!(
            "{} requires well-formed XML; {} is not",
            method.name(),
            file.display()
        )
        .into());
    }

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(source);
    pipeline.set_method(method);
    let rows = pipeline.calculate()?;

    if json {
        let report = DigestReport {
            file: &file,
            method,
            computed_at: chrono::Utc::now().to_rfc3339(),
            digests: rows,
        };
        println!("{}", output::format_json(&report));
    } else {
        output::print_table_header(&["ALGORITHM", "DIGEST"], &WIDTHS, if hex { 140 } else { 100 });
        for row in rows {
            let value = if hex { row.hex() } else { row.base64() };
            println!(
                "{}",
                output::format_table_row(&[row.algorithm.library_name(), value.as_str()], &WIDTHS)
            );
        }
    }

    if let Some(dest) = save {
        pipeline.save(&dest, &config.save_options())?;
        eprintln!("Saved {} output to {}", method.name(), dest.display());
    }

    Ok(())
}
