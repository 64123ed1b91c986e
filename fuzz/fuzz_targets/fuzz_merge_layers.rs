#![no_main]

use libfuzzer_sys::fuzz_target;
use strata::{
    clone_node, diff_deep, equals_deep, extend_deep, has_deferred, make_immutable, resolve_deferred, Format,
    Value,
};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    // Two JSON documents separated by a NUL byte
    let Some((left, right)) = content.split_once('\0') else {
        return;
    };
    let (Ok(base), Ok(overlay)) = (Format::Json.parse("left", left), Format::Json.parse("right", right)) else {
        return;
    };

    // Merge, diff and compare must terminate on any input, however deep
    let merged = extend_deep(&clone_node(&base), &[&overlay]);
    let delta = diff_deep(&base, &merged);
    let _ = equals_deep(&Value::from(delta), &Value::from(overlay));

    // Parsed sources carry no deferred values, so resolution is a no-op
    assert_eq!(resolve_deferred(&merged), 0);
    assert!(!has_deferred(&merged));

    make_immutable(&merged);
    assert!(merged.set("__fuzz", 1).is_err());
});
