//! # Driver Request Path
//!
//! The sequence a character-device driver performs against the register
//! window to service a hash request:
//!
//! 1. copy the caller's buffer into the INPUT window with 32-bit writes,
//! 2. write the message length to LENGTH,
//! 3. write ENABLE to CTRL,
//! 4. check STATUS, then read the eight OUTPUT words back.
//!
//! Each public operation holds the device's request lock, so requests from
//! different [`Driver`] handles on one device never interleave.

use std::sync::Arc;

use hwsha_core::Digest;

use crate::device::Sha256Device;
use crate::error::DeviceError;
use crate::registers::{
    CTRL_ENABLE, CTRL_REG, INPUT_REG, LENGTH_REG, OUTPUT_REG, STATUS_READY, STATUS_REG,
};

/// Bytes moved per MMIO write into the input window.
const IO_WIDTH: usize = 4;

/// A driver handle onto a shared [`Sha256Device`].
#[derive(Debug, Clone)]
pub struct Driver {
    device: Arc<Sha256Device>,
}

impl Driver {
    /// Attach to a device.
    pub fn new(device: Arc<Sha256Device>) -> Self {
        Self { device }
    }

    /// The underlying device.
    pub fn device(&self) -> &Arc<Sha256Device> {
        &self.device
    }

    /// Stage `message` through the MMIO window and trigger a computation.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InputTooLarge`] before any register is touched.
    /// - The device's trigger error if STATUS does not read ready afterwards.
    pub fn hash(&self, message: &[u8]) -> Result<(), DeviceError> {
        let _request = self.device.lock_requests();
        self.stage_and_trigger(message)
    }

    /// Read the published digest from the OUTPUT window.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotReady`] if STATUS is not ready.
    pub fn read_digest(&self) -> Result<Digest, DeviceError> {
        let _request = self.device.lock_requests();
        self.read_output()
    }

    /// [`hash`](Self::hash) followed by [`read_digest`](Self::read_digest)
    /// as one request.
    pub fn digest(&self, message: &[u8]) -> Result<Digest, DeviceError> {
        let _request = self.device.lock_requests();
        self.stage_and_trigger(message)?;
        self.read_output()
    }

    fn stage_and_trigger(&self, message: &[u8]) -> Result<(), DeviceError> {
        let capacity = self.device.capacity();
        if message.len() > capacity {
            return Err(DeviceError::InputTooLarge {
                len: message.len(),
                capacity,
            });
        }

        for (i, word) in message.chunks(IO_WIDTH).enumerate() {
            let mut bytes = [0u8; IO_WIDTH];
            bytes[..word.len()].copy_from_slice(word);
            let addr = INPUT_REG + (i * IO_WIDTH) as u64;
            self.device.write(addr, u64::from(u32::from_le_bytes(bytes)), word.len());
        }
        self.device.write(LENGTH_REG, message.len() as u64, IO_WIDTH);
        self.device.write(CTRL_REG, u64::from(CTRL_ENABLE), IO_WIDTH);

        if self.device.read(STATUS_REG) == u64::from(STATUS_READY) {
            tracing::debug!(len = message.len(), "driver request complete");
            Ok(())
        } else {
            Err(self.device.last_error().unwrap_or(DeviceError::NotReady))
        }
    }

    fn read_output(&self) -> Result<Digest, DeviceError> {
        if self.device.read(STATUS_REG) != u64::from(STATUS_READY) {
            return Err(DeviceError::NotReady);
        }
        let mut words = [0u32; 8];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.device.read(OUTPUT_REG + (i * 4) as u64) as u32;
        }
        Ok(Digest::from_words(words))
    }
}
