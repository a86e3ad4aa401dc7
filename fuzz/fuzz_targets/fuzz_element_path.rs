#![no_main]

use jsonfile::ActionKind;
use jsonfile::path_syntax::check_element_path;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the action, the rest is the path.
    let action = ActionKind::ALL[data[0] as usize % ActionKind::ALL.len()];
    let path = String::from_utf8_lossy(&data[1..]);

    for d in check_element_path(&path, action) {
        assert!(!d.is_error(), "path lint produced an error: {:?}", d);
    }
});
