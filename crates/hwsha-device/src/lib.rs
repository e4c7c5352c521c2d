//! # hwsha-device — Register-Mapped SHA-256 Accelerator
//!
//! Models a memory-mapped SHA-256 accelerator built around the
//! [`hwsha_core`] engine, together with the request path a driver takes to
//! use it.
//!
//! ## Register Map
//!
//! ```text
//! 0x0000  ID      R    constant device identifier (0xFEEDCAFE)
//! 0x0004  LENGTH  R/W  staged message length in bytes
//! 0x0008  CTRL    R/W  1 = hash and publish, 0 = reset
//! 0x000C  STATUS  R    0 = idle, 1 = result ready
//! 0x0010  INPUT   R/W  1024-byte input window
//! 0x0410  OUTPUT  R    8 digest words
//! ```
//!
//! ## Concurrency
//!
//! The whole register file sits behind one mutex. A submission stages its
//! bytes, runs the engine, and publishes the digest while holding the lock,
//! so at most one computation is in flight against the output window and
//! no reader observes a half-written result.
//!
//! ## Crate Policy
//!
//! - The message length is always explicit (the LENGTH register or the
//!   slice length). The input window is never scanned for a terminator.
//! - Oversized input is rejected before any register changes. Nothing is
//!   truncated.
//! - A failed computation leaves the previously published digest intact.

#![forbid(unsafe_code)]

pub mod config;
pub mod device;
pub mod driver;
pub mod error;
pub mod registers;

pub use config::DeviceConfig;
pub use device::Sha256Device;
pub use driver::Driver;
pub use error::{ConfigError, DeviceError};
