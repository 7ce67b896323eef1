#![no_main]

//! Levels: rendered text parses back to an equal level with the same rendering.
//! Extreme exponents may render outside the accepted exponent range and are skipped.

use libfuzzer_sys::fuzz_target;
use modelfix_domain::Level;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Ok(level) = s.parse::<Level>() else { return };

    let rendered = level.to_string();
    let Ok(reparsed) = rendered.parse::<Level>() else { return };
    assert_eq!(reparsed, level);
    assert_eq!(reparsed.to_string(), rendered);
});
