use xmldigest_source::format_size;

#[test]
fn test_format_size_vectors() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1), "1 B");
    assert_eq!(format_size(1000), "1,000 B");
    assert_eq!(format_size(1023), "1,023 B");
    assert_eq!(format_size(1024), "1 kB");
    assert_eq!(format_size(1536), "1.5 kB");
    assert_eq!(format_size(1100), "1.1 kB");
    assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
    assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
}

#[test]
fn test_format_size_rounds_half_to_even() {
    // 1.25 kB and 1.75 kB are exact in binary
    assert_eq!(format_size(1280), "1.2 kB");
    assert_eq!(format_size(1792), "1.8 kB");
}

#[test]
fn test_format_size_clamps_at_petabytes() {
    assert_eq!(format_size(1u64 << 50), "1 PB");
    assert_eq!(format_size(1u64 << 61), "2,048 PB");
    assert_eq!(format_size(u64::MAX), "16,384 PB");
}
