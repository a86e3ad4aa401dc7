//! Persisted `Flags` column encoding.
//!
//! The mask is split into three disjoint ranges:
//!
//! ```text
//! bits 0..=7    action (exactly one set)     deleteValue=1 .. removeArrayElement=128
//! bits 8..=10   modifiers (any subset)       validateSchema=256 distinctValues=512 onlyIfExists=1024
//! bits 11..=12  timing                       ON_UNINSTALL=2048 SKIP_INSTALL=4096
//! ```
//!
//! Timing is encoded so that the default (install only) leaves both timing
//! bits clear and the uninstall bit is set whenever the directive runs on
//! uninstall: install = 0, uninstall = 2048|4096, both = 2048.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, Timing};
use crate::error::FlagsError;

pub const ACTION_MASK: u32 = 0x00FF;
pub const MODIFIER_MASK: u32 = 0x0700;
pub const TIMING_MASK: u32 = 0x1800;

const ON_UNINSTALL: u32 = 1 << 11;
const SKIP_INSTALL: u32 = 1 << 12;

bitflags! {
    /// Behaviour modifiers orthogonal to the action and timing.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u32 {
        /// Validate the file against `SchemaFile` after modification.
        const VALIDATE_SCHEMA = 1 << 8;
        /// Remove duplicate entries from the target array.
        const DISTINCT_VALUES = 1 << 9;
        /// Skip the directive when the target path does not resolve.
        const ONLY_IF_EXISTS = 1 << 10;
    }
}

impl Timing {
    pub fn bits(self) -> u32 {
        match self {
            Timing::Install => 0,
            Timing::Uninstall => ON_UNINSTALL | SKIP_INSTALL,
            Timing::Both => ON_UNINSTALL,
        }
    }

    fn from_bits(bits: u32, mask: u32) -> Result<Timing, FlagsError> {
        match (bits & ON_UNINSTALL != 0, bits & SKIP_INSTALL != 0) {
            (false, false) => Ok(Timing::Install),
            (true, true) => Ok(Timing::Uninstall),
            (true, false) => Ok(Timing::Both),
            (false, true) => Err(FlagsError::NoTiming(mask)),
        }
    }
}

/// The resolved action, timing and modifiers of one directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagSet {
    pub action: ActionKind,
    pub timing: Timing,
    pub modifiers: Modifiers,
}

impl FlagSet {
    pub fn new(action: ActionKind) -> Self {
        FlagSet {
            action,
            timing: Timing::default(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Encode into the integer stored in the `Flags` column.
    pub fn encode(&self) -> u32 {
        self.action.bit() | self.modifiers.bits() | self.timing.bits()
    }

    /// Recover the flag set from a persisted mask.
    pub fn decode(mask: u32) -> Result<FlagSet, FlagsError> {
        let unknown = mask & !(ACTION_MASK | MODIFIER_MASK | TIMING_MASK);
        if unknown != 0 {
            return Err(FlagsError::UnknownBits(unknown));
        }

        let action_bits = mask & ACTION_MASK;
        if action_bits == 0 {
            return Err(FlagsError::MissingAction(mask));
        }
        if action_bits.count_ones() > 1 {
            return Err(FlagsError::MultipleActions(mask));
        }
        let action = ActionKind::from_bit(action_bits).ok_or(FlagsError::MissingAction(mask))?;

        Ok(FlagSet {
            action,
            timing: Timing::from_bits(mask & TIMING_MASK, mask)?,
            modifiers: Modifiers::from_bits_truncate(mask & MODIFIER_MASK),
        })
    }
}
