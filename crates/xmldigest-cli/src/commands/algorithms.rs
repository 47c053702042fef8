//! Algorithms command implementation.

use crate::output;
use serde::Serialize;
use xmldigest_canonical::digest::hasher;
use xmldigest_canonical::DigestAlgorithm;

const WIDTHS: [usize; 3] = [10, 10, 24];

#[derive(Serialize)]
struct AlgorithmEntry {
    name: &'static str,
    library_name: &'static str,
    oid: &'static str,
    uri: &'static str,
    output_len: usize,
    available: bool,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries: Vec<AlgorithmEntry> = DigestAlgorithm::all()
        .iter()
        .map(|alg| AlgorithmEntry {
            name: alg.name(),
            library_name: alg.library_name(),
            oid: alg.oid(),
            uri: alg.uri(),
            output_len: alg.output_len(),
            available: hasher(*alg).is_ok(),
        })
        .collect();

    if json {
        println!("{}", output::format_json(&entries));
        return Ok(());
    }

    output::print_table_header(&["NAME", "LIBRARY", "OID", "URI"], &WIDTHS, 100);
    for entry in &entries {
        let uri = if entry.available {
            entry.uri.to_string()
        } else {
            format!("{} (not supported)", entry.uri)
        };
        println!(
            "{}",
            output::format_table_row(
                &[entry.name, entry.library_name, entry.oid, uri.as_str()],
                &WIDTHS
            )
        );
    }
    Ok(())
}
