use std::collections::HashSet;

use xmldigest_canonical::{C14nMethod, DigestAlgorithm, LookupKey, Oid, ValidationError};

#[test]
fn digest_identifiers_are_unique() {
    let all = DigestAlgorithm::all();
    assert_eq!(all.len(), 13);

    for key in [
        DigestAlgorithm::name as fn(&DigestAlgorithm) -> &'static str,
        DigestAlgorithm::library_name,
        DigestAlgorithm::oid,
        DigestAlgorithm::uri,
    ] {
        let distinct: HashSet<&str> = all.iter().map(key).collect();
        assert_eq!(distinct.len(), all.len());
    }
}

#[test]
fn method_identifiers_are_unique() {
    let all = C14nMethod::all();
    assert_eq!(all.len(), 7);
    assert_eq!(all[0], C14nMethod::None);

    let names: HashSet<&str> = all.iter().map(C14nMethod::name).collect();
    let texts: HashSet<&str> = all.iter().map(C14nMethod::text).collect();
    let uris: HashSet<&str> = all.iter().map(C14nMethod::uri).collect();
    assert_eq!(names.len(), 7);
    assert_eq!(texts.len(), 7);
    assert_eq!(uris.len(), 7);
}

#[test]
fn sha256_is_found_by_every_identifier() {
    assert_eq!(DigestAlgorithm::for_name("SHA256").unwrap(), DigestAlgorithm::Sha256);
    assert_eq!(
        DigestAlgorithm::for_library_name("SHA-256").unwrap(),
        DigestAlgorithm::Sha256
    );
    assert_eq!(
        DigestAlgorithm::for_oid("2.16.840.1.101.3.4.2.1").unwrap(),
        DigestAlgorithm::Sha256
    );
    assert_eq!(
        DigestAlgorithm::for_uri("http://www.w3.org/2001/04/xmlenc#sha256").unwrap(),
        DigestAlgorithm::Sha256
    );
}

#[test]
fn literal_identifiers_match_dsig_registrations() {
    assert_eq!(DigestAlgorithm::Sha1.uri(), "http://www.w3.org/2000/09/xmldsig#sha1");
    assert_eq!(DigestAlgorithm::Sha1.oid(), "1.3.14.3.2.26");
    assert_eq!(DigestAlgorithm::Sha3_512.oid(), "2.16.840.1.101.3.4.2.10");
    assert_eq!(
        DigestAlgorithm::Whirlpool.uri(),
        "http://www.w3.org/2007/05/xmldsig-more#whirlpool"
    );
    assert_eq!(
        C14nMethod::C14nExclOmitComments.uri(),
        "http://www.w3.org/2001/10/xml-exc-c14n#"
    );
    assert_eq!(
        C14nMethod::C14n11WithComments.uri(),
        "http://www.w3.org/2006/12/xml-c14n11#WithComments"
    );
    assert_eq!(C14nMethod::None.uri(), "");
}

#[test]
fn unknown_keys_fail_with_not_found() {
    let err = DigestAlgorithm::for_name("SHA-999").unwrap_err();
    assert_eq!(
        err,
        ValidationError::NotFound {
            kind: "algorithm",
            key: "SHA-999".into()
        }
    );
    assert_eq!(err.to_string(), "unsupported algorithm: SHA-999");

    assert!(DigestAlgorithm::for_oid("1.2.3").is_err());
    assert!(C14nMethod::for_text("XML c14n sideways").is_err());
    assert!(!DigestAlgorithm::is_supported_name("sha256"));
    assert!(C14nMethod::is_supported_name("C14N11_OMIT_COMMENTS"));
}

#[test]
fn defaulting_lookups_return_fallback() {
    assert_eq!(
        DigestAlgorithm::for_name_or("nope", DigestAlgorithm::Sha512),
        DigestAlgorithm::Sha512
    );
    assert_eq!(
        DigestAlgorithm::for_uri_or("urn:nope", DigestAlgorithm::Md5),
        DigestAlgorithm::Md5
    );
    assert_eq!(
        DigestAlgorithm::for_oid_or("1.3.36.3.2.1", DigestAlgorithm::Md5),
        DigestAlgorithm::Ripemd160
    );
    assert_eq!(
        C14nMethod::for_uri_or("urn:nope", C14nMethod::C14nOmitComments),
        C14nMethod::C14nOmitComments
    );
    assert_eq!(C14nMethod::for_name_or("", C14nMethod::None), C14nMethod::None);
}

#[test]
fn methods_resolve_by_name_uri_and_text() {
    assert_eq!(C14nMethod::for_uri("").unwrap(), C14nMethod::None);
    assert_eq!(
        C14nMethod::resolve("C14N_WITH_COMMENTS").unwrap(),
        C14nMethod::C14nWithComments
    );
    assert_eq!(
        C14nMethod::resolve("http://www.w3.org/2001/10/xml-exc-c14n#WithComments").unwrap(),
        C14nMethod::C14nExclWithComments
    );
    assert_eq!(
        C14nMethod::resolve("XML c14n11 omit comments").unwrap(),
        C14nMethod::C14n11OmitComments
    );
}

#[test]
fn method_resolve_rejects_blank_keys() {
    for key in ["", "   "] {
        assert_eq!(
            C14nMethod::resolve(key),
            Err(ValidationError::NotFound {
                kind: "canonicalization method",
                key: String::new(),
            })
        );
    }
    assert_eq!(C14nMethod::for_uri("").unwrap(), C14nMethod::None);
}

#[test]
fn method_flags_follow_variant() {
    assert!(!C14nMethod::None.is_transform());
    assert!(C14nMethod::C14nExclWithComments.is_exclusive());
    assert!(C14nMethod::C14nExclWithComments.with_comments());
    assert!(!C14nMethod::C14n11OmitComments.with_comments());
    assert!(!C14nMethod::C14n11OmitComments.is_exclusive());
    assert_eq!(C14nMethod::default(), C14nMethod::None);
}

#[test]
fn free_form_keys_are_classified_by_shape() {
    assert!(matches!(
        LookupKey::classify("2.16.840.1.101.3.4.2.3"),
        LookupKey::Oid(_)
    ));
    assert!(matches!(
        LookupKey::classify("http://www.w3.org/2001/04/xmlenc#sha512"),
        LookupKey::Uri(_)
    ));
    assert!(matches!(LookupKey::classify("SHA3-256"), LookupKey::Name(_)));
    assert!(Oid::parse("3.1").is_err());
    assert!(Oid::parse("1.02").is_err());
}

#[test]
fn resolve_dispatches_on_key_shape() {
    assert_eq!(
        DigestAlgorithm::resolve("2.16.840.1.101.3.4.2.3").unwrap(),
        DigestAlgorithm::Sha512
    );
    assert_eq!(
        DigestAlgorithm::resolve("http://www.w3.org/2001/04/xmldsig-more#md5").unwrap(),
        DigestAlgorithm::Md5
    );
    assert_eq!(
        DigestAlgorithm::resolve("SHA-384").unwrap(),
        DigestAlgorithm::Sha384
    );
    assert_eq!(
        DigestAlgorithm::resolve(" SHA3-224 ").unwrap(),
        DigestAlgorithm::Sha3_224
    );
}

#[test]
fn catalog_serializes_by_canonical_name() {
    assert_eq!(
        serde_json::to_string(&DigestAlgorithm::Sha3_256).unwrap(),
        r#""SHA3-256""#
    );
    assert_eq!(
        serde_json::to_string(&C14nMethod::C14nExclOmitComments).unwrap(),
        r#""C14N_EXCL_OMIT_COMMENTS""#
    );
    let parsed: C14nMethod = serde_json::from_str(r#""C14N11_WITH_COMMENTS""#).unwrap();
    assert_eq!(parsed, C14nMethod::C14n11WithComments);
}

#[test]
fn display_uses_human_labels() {
    assert_eq!(DigestAlgorithm::Sha256.to_string(), "SHA-256");
    assert_eq!(C14nMethod::C14nOmitComments.to_string(), "XML c14n omit comments");
}
