use jsonfile::flags::{ACTION_MASK, MODIFIER_MASK, TIMING_MASK};
use jsonfile::*;
use proptest::prelude::*;

fn arb_action() -> impl Strategy<Value = ActionKind> {
    proptest::sample::select(ActionKind::ALL.to_vec())
}

fn arb_timing() -> impl Strategy<Value = Timing> {
    proptest::sample::select(Timing::ALL.to_vec())
}

fn arb_modifiers() -> impl Strategy<Value = Modifiers> {
    (0u32..8).prop_map(|n| Modifiers::from_bits_truncate(n << 8))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // decode(encode(f)) == f for every well-formed flag set
    #[test]
    fn encode_decode_roundtrip(
        action in arb_action(),
        timing in arb_timing(),
        modifiers in arb_modifiers(),
    ) {
        let flags = FlagSet { action, timing, modifiers };
        let mask = flags.encode();
        prop_assert_eq!(mask & ACTION_MASK, action.bit());
        prop_assert_eq!(mask & MODIFIER_MASK, modifiers.bits());
        prop_assert_eq!(mask & TIMING_MASK, timing.bits());
        prop_assert_eq!(FlagSet::decode(mask), Ok(flags));
    }

    // Any mask that decodes re-encodes to itself
    #[test]
    fn decoded_masks_reencode(mask in 0u32..0x4000) {
        if let Ok(flags) = FlagSet::decode(mask) {
            prop_assert_eq!(flags.encode(), mask);
        }
    }
}
