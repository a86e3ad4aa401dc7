#![no_main]

use jsonfile::property_ref::check_property_references;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let _ = check_property_references(&s, "Value");
});
