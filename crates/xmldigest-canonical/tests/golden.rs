use xmldigest_canonical::{
    compute_digest, compute_digests, C14nMethod, DigestAlgorithm, DigestRow, DigestValue,
    TransformReport,
};

const ABC: &[u8] = b"abc";

fn hex_digest(algorithm: DigestAlgorithm, input: &[u8]) -> String {
    hex::encode(compute_digest(algorithm, input).unwrap())
}

#[test]
fn sha256_abc_matches_standard_vector() {
    assert_eq!(
        hex_digest(DigestAlgorithm::Sha256, ABC),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn other_families_match_known_vectors() {
    assert_eq!(
        hex_digest(DigestAlgorithm::Sha1, ABC),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(
        hex_digest(DigestAlgorithm::Sha224, ABC),
        "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
    );
    assert_eq!(
        hex_digest(DigestAlgorithm::Sha3_256, ABC),
        "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
    );
    assert_eq!(
        hex_digest(DigestAlgorithm::Ripemd160, ABC),
        "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
    );
    assert_eq!(
        hex_digest(DigestAlgorithm::Md5, ABC),
        "900150983cd24fb0d6963f7d28e17f72"
    );
}

#[cfg(feature = "legacy-digests")]
#[test]
fn legacy_md2_matches_rfc_vector() {
    assert_eq!(
        hex_digest(DigestAlgorithm::Md2, ABC),
        "da853b0d3f88d99b30283a69e6ded6bb"
    );
}

#[cfg(not(feature = "legacy-digests"))]
#[test]
fn legacy_rows_are_marked_not_supported() {
    let rows = compute_digests(ABC);
    let md2 = rows
        .iter()
        .find(|row| row.algorithm == DigestAlgorithm::Md2)
        .unwrap();
    assert_eq!(md2.value, DigestValue::NotSupported);
    assert_eq!(md2.base64(), xmldigest_canonical::NOT_SUPPORTED);
    assert!(rows
        .iter()
        .filter(|row| row.algorithm != DigestAlgorithm::Md2
            && row.algorithm != DigestAlgorithm::Whirlpool)
        .all(DigestRow::is_supported));
}

#[test]
fn table_has_one_row_per_algorithm_in_declaration_order() {
    let rows = compute_digests(ABC);
    let order: Vec<DigestAlgorithm> = rows.iter().map(|row| row.algorithm).collect();
    assert_eq!(order, DigestAlgorithm::all().to_vec());
}

#[test]
fn empty_input_still_produces_full_table() {
    let rows = compute_digests(b"");
    assert_eq!(rows.len(), DigestAlgorithm::all().len());

    let sha256 = &rows[2];
    assert_eq!(sha256.algorithm, DigestAlgorithm::Sha256);
    assert_eq!(
        sha256.hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(rows[11].hex(), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn computed_lengths_match_catalog() {
    for row in compute_digests(b"xmldigest") {
        if let Some(bytes) = row.bytes() {
            assert_eq!(bytes.len(), row.algorithm.output_len(), "{}", row.algorithm);
        }
    }
}

#[test]
fn digest_row_exposes_base64() {
    let rows = compute_digests(ABC);
    assert_eq!(
        rows[2].base64(),
        "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
    );
}

#[test]
fn digest_row_serializes_to_golden_json() {
    let row = DigestRow {
        algorithm: DigestAlgorithm::Sha256,
        value: DigestValue::Computed(vec![0x66, 0x6f, 0x6f]),
    };
    assert_eq!(
        serde_json::to_string(&row).unwrap(),
        r#"{"algorithm":"SHA256","b64":"Zm9v"}"#
    );

    let unsupported = DigestRow {
        algorithm: DigestAlgorithm::Whirlpool,
        value: DigestValue::NotSupported,
    };
    assert_eq!(
        serde_json::to_string(&unsupported).unwrap(),
        r#"{"algorithm":"WHIRLPOOL","b64":null}"#
    );
}

#[test]
fn transform_report_matches_expected_shape() {
    let mut report = TransformReport::new(C14nMethod::C14nExclWithComments);
    report.add("elements", 2);
    report.add("elements", 1);

    let serialized = serde_json::to_value(&report).unwrap();
    assert_eq!(
        serialized,
        serde_json::json!({
            "method": "C14N_EXCL_WITH_COMMENTS",
            "metrics": { "elements": 3 }
        })
    );
    assert_eq!(report.metric("comments_dropped"), 0);
}
