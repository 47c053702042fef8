use std::fs;
use tempfile::TempDir;
use xmldigest_canonical::{C14nMethod, DigestAlgorithm};
use xmldigest_source::{DigestPipeline, SaveOptions, SourceDocument, SourceError};

const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

#[test]
fn test_calculate_without_source_is_empty() {
    let mut pipeline = DigestPipeline::new();
    assert_eq!(pipeline.method(), C14nMethod::None);
    assert!(pipeline.calculate().unwrap().is_empty());
    assert!(pipeline.transformed_bytes().is_none());
}

#[test]
fn test_calculate_produces_one_row_per_algorithm() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("abc.txt");
    fs::write(&path, "abc").unwrap();

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(&path));
    let rows = pipeline.calculate().unwrap();

    let algorithms: Vec<DigestAlgorithm> = rows.iter().map(|row| row.algorithm).collect();
    assert_eq!(algorithms, DigestAlgorithm::all());
    assert_eq!(rows[2].algorithm, DigestAlgorithm::Sha256);
    assert_eq!(rows[2].hex(), SHA256_ABC);
    assert_eq!(pipeline.transformed_bytes(), Some(&b"abc"[..]));
}

#[test]
fn test_empty_file_still_yields_full_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty");
    fs::write(&path, "").unwrap();

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(&path));
    assert_eq!(pipeline.calculate().unwrap().len(), DigestAlgorithm::all().len());
}

#[test]
fn test_method_change_recomputes_digests() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.xml");
    fs::write(&path, "<a><!--c--><b/></a>").unwrap();

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(&path));
    pipeline.set_method(C14nMethod::C14nOmitComments);
    let omit = pipeline.calculate().unwrap().to_vec();
    assert_eq!(pipeline.transformed_bytes(), Some(&b"<a><b></b></a>"[..]));

    pipeline.set_method(C14nMethod::C14nWithComments);
    let with = pipeline.calculate().unwrap().to_vec();
    assert_ne!(omit[2], with[2]);
    assert_eq!(pipeline.rows(), with.as_slice());
}

#[test]
fn test_failed_transform_clears_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "plain text").unwrap();

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(&path));
    assert_eq!(pipeline.calculate().unwrap().len(), 13);

    pipeline.set_method(C14nMethod::C14nExclOmitComments);
    let err = pipeline.calculate().unwrap_err();
    assert!(matches!(err, SourceError::Canonicalization { .. }));
    assert!(pipeline.rows().is_empty());
}

#[test]
fn test_new_source_clears_table() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.txt");
    let second = temp_dir.path().join("second.txt");
    fs::write(&first, "one").unwrap();
    fs::write(&second, "two").unwrap();

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(&first));
    pipeline.calculate().unwrap();
    assert!(!pipeline.rows().is_empty());

    pipeline.set_source(SourceDocument::new(&second));
    assert!(pipeline.rows().is_empty());
    assert_eq!(pipeline.source().unwrap().path(), second.as_path());
}

#[test]
fn test_unreadable_source_propagates_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(temp_dir.path().join("missing")));

    assert!(matches!(pipeline.calculate(), Err(SourceError::Read { .. })));
    assert!(pipeline.rows().is_empty());
}

#[test]
fn test_save_writes_selected_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.xml");
    let dest = temp_dir.path().join("doc.c14n.xml");
    fs::write(&path, r#"<r b="2" a="1"/>"#).unwrap();

    let mut pipeline = DigestPipeline::new();
    assert!(matches!(
        pipeline.save(&dest, &SaveOptions::default()),
        Err(SourceError::NothingToSave(C14nMethod::None))
    ));

    pipeline.set_source(SourceDocument::new(&path));
    pipeline.set_method(C14nMethod::C14nOmitComments);
    pipeline.calculate().unwrap();
    pipeline.save(&dest, &SaveOptions::default()).unwrap();
    assert_eq!(fs::read(&dest).unwrap(), br#"<r a="1" b="2"></r>"#);
}

#[cfg(feature = "legacy-digests")]
#[test]
fn test_legacy_rows_are_computed_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("abc.txt");
    fs::write(&path, "abc").unwrap();

    let mut pipeline = DigestPipeline::new();
    pipeline.set_source(SourceDocument::new(&path));
    let rows = pipeline.calculate().unwrap();

    let md2 = rows
        .iter()
        .find(|row| row.algorithm == DigestAlgorithm::Md2)
        .unwrap();
    assert_eq!(md2.hex(), "da853b0d3f88d99b30283a69e6ded6bb");
    assert!(rows.iter().all(|row| row.is_supported()));
}
