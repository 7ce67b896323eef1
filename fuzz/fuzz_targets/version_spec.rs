#![no_main]

//! Version specs: parsing never panics and resolution is total.

use libfuzzer_sys::fuzz_target;
use modelfix_domain::{ComparableVersion, DEFAULT_VERSION, VersionRange, VersionResolver};
use modelfix_types::Coordinate;

fuzz_target!(|data: &[u8]| {
    let Ok(spec) = std::str::from_utf8(data) else { return };

    let coordinate = Coordinate::new("fuzz", "spec");
    let resolved = VersionResolver.resolve(&coordinate, Some(spec));
    assert!(resolved == spec || resolved == DEFAULT_VERSION);

    if let Ok(range) = VersionRange::parse(spec) {
        let _ = range.recommended_version();
        for r in range.restrictions() {
            if let (Some(lo), Some(hi)) = (&r.lower, &r.upper) {
                assert!(lo <= hi);
            }
        }
    }

    let v = ComparableVersion::new(spec);
    assert_eq!(v.cmp(&v), std::cmp::Ordering::Equal);

    // Short inputs are repeated into long, deeply nested specs.
    if !spec.is_empty() && spec.len() <= 8 {
        let deep = format!("1{}", spec.repeat(20_000));
        let resolved = VersionResolver.resolve(&coordinate, Some(&deep));
        assert!(resolved == deep || resolved == DEFAULT_VERSION);
        let _ = ComparableVersion::new(&deep).cmp(&v);
    }
});
