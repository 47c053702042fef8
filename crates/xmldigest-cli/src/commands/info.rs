//! Info command implementation.

use crate::config::CliConfig;
use crate::output;
use std::path::PathBuf;
use xmldigest_source::SourceDocument;

pub fn run(file: PathBuf, json: bool, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = SourceDocument::new(&file);
    let info = source.info(config.caution_threshold_bytes);

    if json {
        println!("{}", output::format_json(&info));
        return Ok(());
    }

    let length = info
        .length
        .map(|len| len.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("path:     {}", info.path.display());
    println!("readable: {}", info.readable);
    println!("xml:      {}", info.is_xml);
    println!("length:   {}", length);
    println!("size:     {}", info.size);
    if info.caution {
        println!(
            "caution:  larger than {} bytes, transforms may be slow",
            config.caution_threshold_bytes
        );
    }
    Ok(())
}
