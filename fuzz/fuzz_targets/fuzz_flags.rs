#![no_main]

use jsonfile::FlagSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|mask: u32| {
    if let Ok(flags) = FlagSet::decode(mask) {
        assert_eq!(flags.encode(), mask);
    }
});
