//! FXOS8700 accelerometer/magnetometer driver (async I²C)
//!
//! The device runs in hybrid mode so both sensors sample together. With
//! `hyb_autoinc_mode` set, the register pointer jumps from the last accel
//! output straight to the magnetometer output, so a single 13-byte burst
//! from STATUS returns status, accel XYZ and mag XYZ (big-endian pairs).
//!
//! Conversions at ±4 g:
//! - accel: 14-bit left-justified, 0.488 mg/LSB, reported in m/s²
//! - mag: 16-bit, 0.1 µT/LSB, reported in gauss
//! - die temperature: signed 8-bit, 0.96 °C/LSB

use embedded_hal_async::i2c::I2c;

use tiltscope_core::sensor::{SensorSnapshot, Vector3};
use tiltscope_core::traits::{MotionSensor, SensorError};

/// FXOS8700 register addresses
pub mod reg {
    /// Data-ready status, start of the burst
    pub const STATUS: u8 = 0x00;
    /// Device identification
    pub const WHO_AM_I: u8 = 0x0D;
    /// Accelerometer full-scale range
    pub const XYZ_DATA_CFG: u8 = 0x0E;
    /// Output data rate and active/standby
    pub const CTRL_REG1: u8 = 0x2A;
    /// Die temperature
    pub const TEMP: u8 = 0x51;
    /// Magnetometer mode and oversampling
    pub const M_CTRL_REG1: u8 = 0x5B;
    /// Hybrid auto-increment
    pub const M_CTRL_REG2: u8 = 0x5C;
}

/// I²C address with SA0 and SA1 low
pub const DEFAULT_ADDRESS: u8 = 0x1E;

/// Expected WHO_AM_I value
pub const DEVICE_ID: u8 = 0xC7;

const CTRL_REG1_STANDBY: u8 = 0x00;
/// Active, low noise, 200 Hz per sensor in hybrid mode
const CTRL_REG1_ACTIVE: u8 = 0x0D;
/// Hybrid mode, maximum oversampling
const M_CTRL_REG1_HYBRID: u8 = 0x1F;
const M_CTRL_REG2_AUTOINC: u8 = 0x20;
const XYZ_DATA_CFG_4G: u8 = 0x01;

/// STATUS bit: new XYZ accel data
const STATUS_ZYXDR: u8 = 0x08;

/// STATUS + 6 accel bytes + 6 mag bytes
pub const BURST_LEN: usize = 13;

pub const ACCEL_G_PER_LSB: f32 = 0.000488;
pub const STANDARD_GRAVITY: f32 = 9.80665;
pub const MAG_GAUSS_PER_LSB: f32 = 0.001;
pub const TEMP_C_PER_LSB: f32 = 0.96;

/// Accelerometer axis in m/s² from its MSB/LSB pair
pub fn accel_from_raw(msb: u8, lsb: u8) -> f32 {
    let counts = i16::from_be_bytes([msb, lsb]) >> 2;
    counts as f32 * ACCEL_G_PER_LSB * STANDARD_GRAVITY
}

/// Magnetometer axis in gauss from its MSB/LSB pair
pub fn mag_from_raw(msb: u8, lsb: u8) -> f32 {
    i16::from_be_bytes([msb, lsb]) as f32 * MAG_GAUSS_PER_LSB
}

pub fn temperature_from_raw(raw: u8) -> f32 {
    raw as i8 as f32 * TEMP_C_PER_LSB
}

/// Convert a burst and a temperature byte into a snapshot
pub fn decode(burst: &[u8; BURST_LEN], temp: u8) -> SensorSnapshot {
    let axis = |i: usize, f: fn(u8, u8) -> f32| f(burst[i], burst[i + 1]);
    SensorSnapshot {
        accel: Vector3::new(
            axis(1, accel_from_raw),
            axis(3, accel_from_raw),
            axis(5, accel_from_raw),
        ),
        mag: Vector3::new(
            axis(7, mag_from_raw),
            axis(9, mag_from_raw),
            axis(11, mag_from_raw),
        ),
        temperature: temperature_from_raw(temp),
    }
}

pub struct Fxos8700<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Fxos8700<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the device identity and start hybrid sampling
    ///
    /// Fails with [`SensorError::NotReady`] when the device does not answer
    /// or is not an FXOS8700.
    pub async fn init(&mut self) -> Result<(), SensorError> {
        let id = self
            .read_reg(reg::WHO_AM_I)
            .await
            .map_err(|_| SensorError::NotReady)?;
        if id != DEVICE_ID {
            return Err(SensorError::NotReady);
        }

        // Configuration registers only accept writes in standby
        self.write_reg(reg::CTRL_REG1, CTRL_REG1_STANDBY).await?;
        self.write_reg(reg::M_CTRL_REG1, M_CTRL_REG1_HYBRID).await?;
        self.write_reg(reg::M_CTRL_REG2, M_CTRL_REG2_AUTOINC).await?;
        self.write_reg(reg::XYZ_DATA_CFG, XYZ_DATA_CFG_4G).await?;
        self.write_reg(reg::CTRL_REG1, CTRL_REG1_ACTIVE).await
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn read_reg(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(buf[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(|_| SensorError::Bus)
    }
}

impl<I2C: I2c> MotionSensor for Fxos8700<I2C> {
    async fn fetch(&mut self) -> Result<SensorSnapshot, SensorError> {
        let mut burst = [0u8; BURST_LEN];
        self.i2c
            .write_read(self.address, &[reg::STATUS], &mut burst)
            .await
            .map_err(|_| SensorError::Bus)?;
        if burst[0] & STATUS_ZYXDR == 0 {
            return Err(SensorError::NoData);
        }
        let temp = self.read_reg(reg::TEMP).await?;
        Ok(decode(&burst, temp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Register file with a linear auto-incrementing pointer
    struct Regs {
        map: [u8; 0x80],
        pointer: usize,
        writes: std::vec::Vec<(u8, u8)>,
        present: bool,
    }

    impl Regs {
        fn new() -> Self {
            let mut map = [0u8; 0x80];
            map[reg::WHO_AM_I as usize] = DEVICE_ID;
            Self {
                map,
                pointer: 0,
                writes: std::vec::Vec::new(),
                present: true,
            }
        }
    }

    impl ErrorType for Regs {
        type Error = ErrorKind;
    }

    impl I2c for Regs {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            if !self.present || address != DEFAULT_ADDRESS {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((&first, rest)) = bytes.split_first() {
                            self.pointer = first as usize;
                            for &b in rest {
                                self.writes.push((self.pointer as u8, b));
                                self.map[self.pointer & 0x7F] = b;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.map[self.pointer & 0x7F];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_conversions() {
        // 4096 counts >> 2 = 1024 = 0.4997 g
        assert!(close(accel_from_raw(0x10, 0x00), 4.9005));
        assert!(close(accel_from_raw(0xF0, 0x00), -4.9005));
        // low two bits are not data
        assert_eq!(accel_from_raw(0x00, 0x03), 0.0);
        assert!(close(mag_from_raw(0x03, 0xE8), 1.0));
        assert!(close(mag_from_raw(0xFC, 0x18), -1.0));
        assert!(close(temperature_from_raw(25), 24.0));
        assert!(close(temperature_from_raw(0xF6), -9.6));
    }

    #[test]
    fn test_init_configures_hybrid_mode() {
        let mut sensor = Fxos8700::new(Regs::new());
        block_on(sensor.init()).unwrap();
        assert_eq!(
            sensor.release().writes,
            [
                (reg::CTRL_REG1, 0x00),
                (reg::M_CTRL_REG1, 0x1F),
                (reg::M_CTRL_REG2, 0x20),
                (reg::XYZ_DATA_CFG, 0x01),
                (reg::CTRL_REG1, 0x0D),
            ]
        );
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let mut regs = Regs::new();
        regs.map[reg::WHO_AM_I as usize] = 0x6A;
        let mut sensor = Fxos8700::new(regs);
        assert_eq!(block_on(sensor.init()), Err(SensorError::NotReady));
        assert!(sensor.release().writes.is_empty());
    }

    #[test]
    fn test_init_without_device() {
        let mut regs = Regs::new();
        regs.present = false;
        let mut sensor = Fxos8700::new(regs);
        assert_eq!(block_on(sensor.init()), Err(SensorError::NotReady));
    }

    #[test]
    fn test_fetch_decodes_burst() {
        let mut regs = Regs::new();
        regs.map[..BURST_LEN].copy_from_slice(&[
            0xFF, // status
            0x10, 0x00, 0xF0, 0x00, 0x20, 0x00, // accel
            0x03, 0xE8, 0xFC, 0x18, 0x00, 0x00, // mag
        ]);
        regs.map[reg::TEMP as usize] = 25;

        let mut sensor = Fxos8700::new(regs);
        let s = block_on(sensor.fetch()).unwrap();
        assert!(close(s.accel.x, 4.9005));
        assert!(close(s.accel.y, -4.9005));
        assert!(close(s.accel.z, 9.8010));
        assert!(close(s.mag.x, 1.0));
        assert!(close(s.mag.y, -1.0));
        assert_eq!(s.mag.z, 0.0);
        assert!(close(s.temperature, 24.0));
    }

    #[test]
    fn test_fetch_without_new_data() {
        let mut sensor = Fxos8700::new(Regs::new());
        assert_eq!(block_on(sensor.fetch()), Err(SensorError::NoData));
    }

    #[test]
    fn test_fetch_bus_error() {
        let mut regs = Regs::new();
        regs.present = false;
        let mut sensor = Fxos8700::new(regs);
        assert_eq!(block_on(sensor.fetch()), Err(SensorError::Bus));
    }
}
