//! Command word framing
//!
//! Every transaction starts with a 32-bit command word sent MSB first:
//!
//! | Bits    | Field                          |
//! |---------|--------------------------------|
//! | 31      | Read flag (always 1)           |
//! | 23..=17 | Register address               |
//! | 0       | Parity bit                     |
//!
//! All other bits are zero. The parity bit makes the set-bit count of the
//! whole word even.

use crate::Register;

const READ_FLAG: u32 = 0x8000_0000;
const ADDRESS_SHIFT: u32 = 17;
const PARITY_BIT: u32 = 0x0000_0001;

/// Parity of `v`: `true` when an odd number of bits are set
#[must_use]
pub const fn calc_parity(mut v: u32) -> bool {
    let mut parity = false;
    while v != 0 {
        parity = !parity;
        v &= v - 1;
    }
    parity
}

/// A framed 32-bit command word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandWord(u32);

impl CommandWord {
    /// Build the read command for `register`
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn read(register: Register) -> Self {
        let payload = READ_FLAG | ((register.address() as u32) << ADDRESS_SHIFT);
        if calc_parity(payload) {
            Self(payload | PARITY_BIT)
        } else {
            Self(payload)
        }
    }

    /// Raw command word
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Register address carried in bits 17..=23
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn address(self) -> u8 {
        ((self.0 >> ADDRESS_SHIFT) & 0x7F) as u8
    }

    /// `true` if the read flag is set
    #[must_use]
    pub const fn is_read(self) -> bool {
        self.0 & READ_FLAG != 0
    }

    /// Wire representation (big-endian)
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse a received command buffer
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

impl From<CommandWord> for u32 {
    fn from(cmd: CommandWord) -> u32 {
        cmd.0
    }
}
