//! Response frame decoding
//!
//! The device answers each command with a 32-bit big-endian frame. The top
//! three bits are a status field; a zero status marks a communication error.
//! The 16-bit register value sits in bits 5..=20.

const STATUS_MASK: u8 = 0xE0;
const DATA_SHIFT: u32 = 5;

/// A raw 4-byte response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResponseFrame([u8; 4]);

impl ResponseFrame {
    /// Wrap the bytes read from the bus
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Status field (top three bits of the first byte)
    #[must_use]
    pub const fn status(self) -> u8 {
        (self.0[0] & STATUS_MASK) >> 5
    }

    /// `true` if the device flagged a communication error
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0[0] & STATUS_MASK == 0
    }

    /// Register value, or 0 on an error frame
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn value(self) -> u16 {
        if self.is_error() {
            return 0;
        }
        ((u32::from_be_bytes(self.0) >> DATA_SHIFT) & 0xFFFF) as u16
    }

    /// Raw bytes
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }
}

/// Decode a response frame into its register value (0 on an error frame)
#[must_use]
pub const fn decode(frame: [u8; 4]) -> u16 {
    ResponseFrame::new(frame).value()
}
