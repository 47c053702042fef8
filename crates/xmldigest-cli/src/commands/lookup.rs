//! Lookup command implementation.

use xmldigest_canonical::{C14nMethod, DigestAlgorithm};

pub fn run(key: String) -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(alg) = DigestAlgorithm::resolve(&key) {
        println!("kind:         digest");
        println!("name:         {}", alg.name());
        println!("library_name: {}", alg.library_name());
        println!("oid:          {}", alg.oid());
        println!("uri:          {}", alg.uri());
        println!("output_len:   {}", alg.output_len());
        return Ok(());
    }

    let method = C14nMethod::resolve(&key).map_err(|_| {
        format!("no digest algorithm or canonicalization method matches \"{}\"", key.trim())
    })?;
    println!("kind:         canonicalization");
    println!("name:         {}", method.name());
    println!("text:         {}", method.text());
    println!("uri:          {}", method.uri());
    Ok(())
}
