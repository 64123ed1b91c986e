#![no_main]

use libfuzzer_sys::fuzz_target;
use strata::Format;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Every format must reject or accept input without panicking
        for format in [Format::Json, Format::Toml, Format::Yaml] {
            let _ = format.parse("fuzz", content);
        }
    }
});
