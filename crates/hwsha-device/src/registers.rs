//! # Register Map
//!
//! Byte offsets and values of the accelerator's MMIO window.

/// Size of the MMIO window in bytes.
pub const WINDOW_SIZE: u64 = 0x1000;

/// Device identifier register (read-only).
pub const ID_REG: u64 = 0x0000;
/// Staged message length in bytes.
pub const LENGTH_REG: u64 = 0x0004;
/// Control register.
pub const CTRL_REG: u64 = 0x0008;
/// Status register (read-only).
pub const STATUS_REG: u64 = 0x000C;
/// Start of the input window.
pub const INPUT_REG: u64 = 0x0010;
/// Start of the output window.
pub const OUTPUT_REG: u64 = 0x0410;

/// Input window size in bytes.
pub const INPUT_BUFFER_SIZE: usize = 1024;
/// Output window size in bytes.
pub const OUTPUT_BUFFER_SIZE: usize = 32;

/// Value returned by [`ID_REG`] unless configured otherwise.
pub const DEVICE_ID: u32 = 0xFEED_CAFE;

/// CTRL value that starts a computation.
pub const CTRL_ENABLE: u32 = 0x0000_0001;
/// CTRL value that resets the device.
pub const CTRL_RESET: u32 = 0x0000_0000;

/// STATUS value while idle or after reset.
pub const STATUS_IDLE: u32 = 0;
/// STATUS value once a digest is published.
pub const STATUS_READY: u32 = 1;

/// Value returned for reads outside any register.
pub const INVALID_READ: u64 = 0xDEAD_BEEF;

/// A decoded MMIO address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// [`ID_REG`].
    Id,
    /// [`LENGTH_REG`].
    Length,
    /// [`CTRL_REG`].
    Ctrl,
    /// [`STATUS_REG`].
    Status,
    /// A byte offset into the input window.
    Input(usize),
    /// A word index into the output window.
    Output(usize),
}

impl Register {
    /// Decode a byte offset within the window.
    ///
    /// Output-window offsets select the 32-bit word containing them.
    pub fn decode(addr: u64) -> Option<Self> {
        let input_end = INPUT_REG + INPUT_BUFFER_SIZE as u64;
        let output_end = OUTPUT_REG + OUTPUT_BUFFER_SIZE as u64;
        match addr {
            ID_REG => Some(Self::Id),
            LENGTH_REG => Some(Self::Length),
            CTRL_REG => Some(Self::Ctrl),
            STATUS_REG => Some(Self::Status),
            a if (INPUT_REG..input_end).contains(&a) => Some(Self::Input((a - INPUT_REG) as usize)),
            a if (OUTPUT_REG..output_end).contains(&a) => {
                Some(Self::Output(((a - OUTPUT_REG) / 4) as usize))
            }
            _ => None,
        }
    }
}
