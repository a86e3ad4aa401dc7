#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(compilation) = jsonfile::compile_str(&s, &jsonfile::CompileOptions::default()) {
        // Emission is all-or-nothing: an emitted directive always has a path.
        for compiled in &compilation.directives {
            assert!(!compiled.directive.element_path.is_empty());
        }
    }
});
