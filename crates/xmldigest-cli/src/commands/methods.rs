//! Methods command implementation.

use crate::output;
use serde::Serialize;
use std::path::PathBuf;
use xmldigest_canonical::C14nMethod;
use xmldigest_source::SourceDocument;

const WIDTHS: [usize; 2] = [24, 34];

#[derive(Serialize)]
struct MethodEntry {
    name: &'static str,
    text: &'static str,
    uri: &'static str,
}

/// Lists every method, or only those offered for `file`.
pub fn run(file: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let methods = match &file {
        Some(path) => {
            let mut source = SourceDocument::new(path);
            source.load_raw_bytes()?;
            source.available_methods()
        }
        None => C14nMethod::all(),
    };

    let entries: Vec<MethodEntry> = methods
        .iter()
        .map(|method| MethodEntry {
            name: method.name(),
            text: method.text(),
            uri: method.uri(),
        })
        .collect();

    if json {
        println!("{}", output::format_json(&entries));
        return Ok(());
    }

    output::print_table_header(&["NAME", "TEXT", "URI"], &WIDTHS, 120);
    for entry in &entries {
        println!(
            "{}",
            output::format_table_row(&[entry.name, entry.text, entry.uri], &WIDTHS)
        );
    }
    Ok(())
}
