//! # Register Device
//!
//! [`Sha256Device`] owns the register file of one accelerator instance and
//! exposes it two ways:
//!
//! - **Request level**: [`submit`](Sha256Device::submit) stages a message and
//!   computes its digest synchronously; [`result`](Sha256Device::result)
//!   returns the published digest.
//! - **MMIO level**: [`read`](Sha256Device::read) and
//!   [`write`](Sha256Device::write) at byte offsets of the register window,
//!   as a bus would issue them.
//!
//! ## Locking
//!
//! Two locks, always taken in this order:
//!
//! 1. `requests` serializes whole requests (stage, trigger, read back) so two
//!    callers cannot interleave writes into the input window.
//! 2. `regs` guards the register file for each individual access, including
//!    the full computation triggered by CTRL.

use parking_lot::{Mutex, MutexGuard};

use hwsha_core::{sha256, Digest};

use crate::config::DeviceConfig;
use crate::error::{ConfigError, DeviceError};
use crate::registers::{
    Register, CTRL_ENABLE, CTRL_RESET, INPUT_BUFFER_SIZE, INVALID_READ, STATUS_IDLE, STATUS_READY,
};

/// The accelerator's register file.
#[derive(Debug)]
struct RegisterFile {
    input: [u8; INPUT_BUFFER_SIZE],
    length: u64,
    control: u64,
    status: u32,
    output: [u32; 8],
    last_error: Option<DeviceError>,
}

impl RegisterFile {
    fn new() -> Self {
        Self {
            input: [0u8; INPUT_BUFFER_SIZE],
            length: 0,
            control: u64::from(CTRL_RESET),
            status: STATUS_IDLE,
            output: [0u32; 8],
            last_error: None,
        }
    }
}

/// A register-mapped SHA-256 accelerator.
///
/// `Send + Sync`; share it between threads with `Arc`.
#[derive(Debug)]
pub struct Sha256Device {
    config: DeviceConfig,
    requests: Mutex<()>,
    regs: Mutex<RegisterFile>,
}

impl Sha256Device {
    /// Create a device with a validated configuration.
    pub fn new(config: DeviceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            device_id = format_args!("{:#010x}", config.device_id),
            base_address = format_args!("{:#x}", config.base_address),
            input_capacity = config.input_capacity,
            "sha256 device initialized"
        );
        Ok(Self {
            config,
            requests: Mutex::new(()),
            regs: Mutex::new(RegisterFile::new()),
        })
    }

    /// The device configuration.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Largest message accepted, in bytes.
    pub fn capacity(&self) -> usize {
        self.config.input_capacity
    }

    /// Hold the request lock for a multi-access sequence.
    ///
    /// Not reentrant: [`submit`](Self::submit) and every [`Driver`] operation
    /// take this lock themselves, so they must not be called while the
    /// guard is held.
    ///
    /// [`Driver`]: crate::driver::Driver
    pub(crate) fn lock_requests(&self) -> MutexGuard<'_, ()> {
        self.requests.lock()
    }

    /// Stage `message` and compute its digest.
    ///
    /// On success the digest is published to the output window and STATUS
    /// reads ready. Returns once the computation has finished.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InputTooLarge`] if `message` exceeds the capacity.
    ///   Nothing is staged.
    /// - [`DeviceError::Engine`] if the engine fails. The previously
    ///   published output words are left as they were; STATUS reads idle.
    pub fn submit(&self, message: &[u8]) -> Result<(), DeviceError> {
        let _request = self.lock_requests();
        let len = self.check_len(message.len())?;

        let mut regs = self.regs.lock();
        regs.input[..len].copy_from_slice(message);
        regs.input[len..].fill(0);
        regs.length = len as u64;
        regs.control = u64::from(CTRL_ENABLE);
        self.run(&mut regs)
    }

    /// The most recently published digest.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotReady`] before the first successful computation,
    /// after a reset, or after a failed computation.
    pub fn result(&self) -> Result<Digest, DeviceError> {
        let regs = self.regs.lock();
        if regs.status != STATUS_READY {
            return Err(DeviceError::NotReady);
        }
        Ok(Digest::from_words(regs.output))
    }

    /// The completion indicator: 0 = idle, 1 = result ready.
    pub fn status(&self) -> u32 {
        self.regs.lock().status
    }

    /// The error from the last failed CTRL trigger, if the last trigger failed.
    pub fn last_error(&self) -> Option<DeviceError> {
        self.regs.lock().last_error.clone()
    }

    /// Clear the ready flag. The output window keeps its contents.
    pub fn reset(&self) {
        let mut regs = self.regs.lock();
        regs.control = u64::from(CTRL_RESET);
        regs.status = STATUS_IDLE;
        tracing::debug!("sha256 device reset");
    }

    /// MMIO read at byte offset `addr`.
    ///
    /// Input-window reads return one byte; output-window reads return the
    /// 32-bit digest word containing `addr`. Unmapped offsets return
    /// `0xDEADBEEF`.
    pub fn read(&self, addr: u64) -> u64 {
        let regs = self.regs.lock();
        match Register::decode(addr) {
            Some(Register::Id) => u64::from(self.config.device_id),
            Some(Register::Length) => regs.length,
            Some(Register::Ctrl) => regs.control,
            Some(Register::Status) => u64::from(regs.status),
            Some(Register::Input(offset)) => u64::from(regs.input[offset]),
            Some(Register::Output(word)) => u64::from(regs.output[word]),
            None => {
                tracing::warn!(addr = format_args!("{addr:#06x}"), "invalid read address");
                INVALID_READ
            }
        }
    }

    /// MMIO write of `data` at byte offset `addr`.
    ///
    /// Input-window writes store the low `size` bytes of `data`
    /// little-endian, clipped at the end of the window. LENGTH and CTRL keep
    /// all 64 bits: writing exactly 1 to CTRL runs the engine over
    /// `input[..LENGTH]` and writing exactly 0 resets. A LENGTH beyond the
    /// capacity makes the next trigger fail with
    /// [`DeviceError::InputTooLarge`]. Writes to read-only or unmapped
    /// offsets are logged and dropped.
    pub fn write(&self, addr: u64, data: u64, size: usize) {
        let mut regs = self.regs.lock();
        match Register::decode(addr) {
            Some(Register::Ctrl) => {
                regs.control = data;
                if data == u64::from(CTRL_ENABLE) {
                    if let Err(e) = self.run(&mut regs) {
                        tracing::warn!(error = %e, "sha256 trigger failed");
                    }
                } else if data == u64::from(CTRL_RESET) {
                    regs.status = STATUS_IDLE;
                    tracing::debug!("sha256 device reset");
                }
            }
            Some(Register::Length) => regs.length = data,
            Some(Register::Input(offset)) => {
                let end = (offset + size.min(8)).min(INPUT_BUFFER_SIZE);
                for (i, byte) in regs.input[offset..end].iter_mut().enumerate() {
                    *byte = (data >> (8 * i)) as u8;
                }
            }
            Some(reg @ (Register::Id | Register::Status | Register::Output(_))) => {
                tracing::warn!(
                    addr = format_args!("{addr:#06x}"),
                    register = ?reg,
                    "write to read-only register ignored"
                );
            }
            None => {
                tracing::warn!(addr = format_args!("{addr:#06x}"), "invalid write address");
            }
        }
    }

    fn check_len(&self, len: usize) -> Result<usize, DeviceError> {
        let capacity = self.capacity();
        if len > capacity {
            tracing::warn!(len, capacity, "input rejected: exceeds input window");
            return Err(DeviceError::InputTooLarge { len, capacity });
        }
        Ok(len)
    }

    /// Hash `input[..length]` and publish. Caller holds the register lock.
    fn run(&self, regs: &mut RegisterFile) -> Result<(), DeviceError> {
        regs.status = STATUS_IDLE;
        // A LENGTH too wide for usize saturates and is rejected as oversized.
        let requested = usize::try_from(regs.length).unwrap_or(usize::MAX);
        let outcome = self
            .check_len(requested)
            .and_then(|len| sha256(&regs.input[..len]).map_err(DeviceError::from));

        match outcome {
            Ok(digest) => {
                regs.output = digest.words();
                regs.status = STATUS_READY;
                regs.last_error = None;
                tracing::debug!(length = regs.length, %digest, "digest published");
                Ok(())
            }
            Err(e) => {
                regs.last_error = Some(e.clone());
                Err(e)
            }
        }
    }
}

impl Default for Sha256Device {
    fn default() -> Self {
        Self {
            config: DeviceConfig::default(),
            requests: Mutex::new(()),
            regs: Mutex::new(RegisterFile::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{CTRL_REG, ID_REG, INPUT_REG, LENGTH_REG, OUTPUT_REG, STATUS_REG};

    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn small_device(capacity: usize) -> Sha256Device {
        Sha256Device::new(DeviceConfig {
            input_capacity: capacity,
            ..DeviceConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_device_is_idle() {
        let dev = Sha256Device::default();
        assert_eq!(dev.status(), STATUS_IDLE);
        assert_eq!(dev.result(), Err(DeviceError::NotReady));
        assert_eq!(dev.read(ID_REG), 0xFEED_CAFE);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = DeviceConfig {
            input_capacity: 0,
            ..DeviceConfig::default()
        };
        assert!(Sha256Device::new(config).is_err());
    }

    #[test]
    fn test_submit_then_result() {
        let dev = Sha256Device::default();
        dev.submit(b"abc").unwrap();
        assert_eq!(dev.status(), STATUS_READY);
        assert_eq!(dev.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_sequential_submits_are_isolated() {
        let dev = Sha256Device::default();
        dev.submit(b"").unwrap();
        assert_eq!(dev.result().unwrap().to_hex(), EMPTY);
        dev.submit(b"abc").unwrap();
        assert_eq!(dev.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_shorter_submit_does_not_hash_leftover_bytes() {
        let dev = Sha256Device::default();
        dev.submit(&[b'z'; 900]).unwrap();
        dev.submit(b"abc").unwrap();
        assert_eq!(dev.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_submit_at_capacity() {
        let dev = Sha256Device::default();
        let message = vec![0x61u8; 1024];
        dev.submit(&message).unwrap();
        assert_eq!(dev.result().unwrap(), sha256(&message).unwrap());
    }

    #[test]
    fn test_oversized_submit_rejected_and_prior_result_kept() {
        let dev = small_device(16);
        dev.submit(b"abc").unwrap();
        let err = dev.submit(&[0u8; 17]).unwrap_err();
        assert_eq!(
            err,
            DeviceError::InputTooLarge {
                len: 17,
                capacity: 16
            }
        );
        assert_eq!(dev.result().unwrap().to_hex(), ABC);
        assert_eq!(dev.read(LENGTH_REG), 3);
    }

    #[test]
    fn test_embedded_nul_is_hashed() {
        let dev = Sha256Device::default();
        dev.submit(b"a\0b").unwrap();
        assert_eq!(dev.result().unwrap(), sha256(b"a\0b").unwrap());
        assert_ne!(dev.result().unwrap(), sha256(b"a").unwrap());
    }

    #[test]
    fn test_reset_clears_ready_keeps_output_window() {
        let dev = Sha256Device::default();
        dev.submit(b"abc").unwrap();
        dev.reset();
        assert_eq!(dev.status(), STATUS_IDLE);
        assert_eq!(dev.result(), Err(DeviceError::NotReady));
        assert_eq!(dev.read(OUTPUT_REG), 0xba7816bf);
    }

    #[test]
    fn test_mmio_round_trip() {
        let dev = Sha256Device::default();
        dev.write(INPUT_REG, u64::from(u32::from_le_bytes(*b"abc\0")), 4);
        dev.write(LENGTH_REG, 3, 4);
        dev.write(CTRL_REG, u64::from(CTRL_ENABLE), 4);

        assert_eq!(dev.read(STATUS_REG), u64::from(STATUS_READY));
        assert_eq!(dev.read(CTRL_REG), u64::from(CTRL_ENABLE));
        let words: Vec<u64> = (0..8).map(|i| dev.read(OUTPUT_REG + 4 * i)).collect();
        assert_eq!(words[0], 0xba7816bf);
        assert_eq!(words[7], 0xf20015ad);
    }

    #[test]
    fn test_mmio_input_reads_single_bytes() {
        let dev = Sha256Device::default();
        dev.write(INPUT_REG + 4, 0x0403_0201, 4);
        assert_eq!(dev.read(INPUT_REG + 4), 0x01);
        assert_eq!(dev.read(INPUT_REG + 7), 0x04);
    }

    #[test]
    fn test_mmio_input_write_clipped_at_window_end() {
        let dev = Sha256Device::default();
        dev.write(INPUT_REG + 1022, 0xAABB_CCDD, 4);
        assert_eq!(dev.read(INPUT_REG + 1022), 0xDD);
        assert_eq!(dev.read(INPUT_REG + 1023), 0xCC);
        assert_eq!(dev.read(OUTPUT_REG), 0);
    }

    #[test]
    fn test_ctrl_reset_via_mmio() {
        let dev = Sha256Device::default();
        dev.submit(b"abc").unwrap();
        dev.write(CTRL_REG, u64::from(CTRL_RESET), 4);
        assert_eq!(dev.read(STATUS_REG), u64::from(STATUS_IDLE));
    }

    #[test]
    fn test_oversized_length_register_fails_trigger() {
        let dev = small_device(8);
        dev.write(LENGTH_REG, 9, 4);
        dev.write(CTRL_REG, u64::from(CTRL_ENABLE), 4);
        assert_eq!(dev.status(), STATUS_IDLE);
        assert!(matches!(
            dev.last_error(),
            Some(DeviceError::InputTooLarge { len: 9, capacity: 8 })
        ));
    }

    #[test]
    fn test_failed_trigger_keeps_published_output_words() {
        let dev = small_device(16);
        dev.submit(b"abc").unwrap();
        let expected = sha256(b"abc").unwrap().words();

        dev.write(LENGTH_REG, 17, 4);
        dev.write(CTRL_REG, u64::from(CTRL_ENABLE), 4);

        assert_eq!(dev.read(STATUS_REG), u64::from(STATUS_IDLE));
        for (i, word) in expected.iter().enumerate() {
            assert_eq!(dev.read(OUTPUT_REG + 4 * i as u64), u64::from(*word), "word {i}");
        }
        assert_eq!(
            dev.last_error(),
            Some(DeviceError::InputTooLarge {
                len: 17,
                capacity: 16
            })
        );
    }

    #[test]
    fn test_ctrl_high_bits_do_not_trigger() {
        let dev = Sha256Device::default();
        dev.write(LENGTH_REG, 0, 4);
        dev.write(CTRL_REG, 0x1_0000_0001, 8);
        assert_eq!(dev.status(), STATUS_IDLE);
        assert_eq!(dev.read(CTRL_REG), 0x1_0000_0001);
        assert_eq!(dev.result(), Err(DeviceError::NotReady));
    }

    #[test]
    fn test_ctrl_high_bits_do_not_reset() {
        let dev = Sha256Device::default();
        dev.submit(b"abc").unwrap();
        dev.write(CTRL_REG, 0x1_0000_0000, 8);
        assert_eq!(dev.status(), STATUS_READY);
        assert_eq!(dev.result().unwrap().to_hex(), ABC);
    }

    #[test]
    fn test_wide_length_is_not_truncated() {
        let dev = Sha256Device::default();
        dev.write(INPUT_REG, u64::from(u32::from_le_bytes(*b"abc\0")), 4);
        dev.write(LENGTH_REG, 0x1_0000_0003, 8);
        assert_eq!(dev.read(LENGTH_REG), 0x1_0000_0003);

        dev.write(CTRL_REG, u64::from(CTRL_ENABLE), 4);
        assert_eq!(dev.status(), STATUS_IDLE);
        assert!(matches!(
            dev.last_error(),
            Some(DeviceError::InputTooLarge { capacity: 1024, .. })
        ));
    }

    #[test]
    fn test_invalid_accesses() {
        let dev = Sha256Device::default();
        assert_eq!(dev.read(0x0002), INVALID_READ);
        assert_eq!(dev.read(0x0FFF), INVALID_READ);
        dev.write(0x0FFF, 1, 4);
        dev.write(ID_REG, 7, 4);
        dev.write(STATUS_REG, 1, 4);
        assert_eq!(dev.read(ID_REG), 0xFEED_CAFE);
        assert_eq!(dev.status(), STATUS_IDLE);
    }

    #[test]
    fn test_unknown_ctrl_value_is_stored_only() {
        let dev = Sha256Device::default();
        dev.write(CTRL_REG, 0x2, 4);
        assert_eq!(dev.read(CTRL_REG), 0x2);
        assert_eq!(dev.status(), STATUS_IDLE);
    }
}
