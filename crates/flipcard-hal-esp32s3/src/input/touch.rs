//! FT6336-class capacitive touch controller over I2C.
//!
//! The controller is polled; only the transition from no touch to touch is
//! reported, so a held finger produces one press.

use embedded_hal::i2c::I2c;
use flipcard_core::{
    input::{TouchPoint, TouchProvider},
    layout::{PANEL_HEIGHT, PANEL_WIDTH},
};
use log::{debug, info};

pub const DEFAULT_ADDRESS: u8 = 0x38;

const REG_TD_STATUS: u8 = 0x02;
const REG_CHIP_ID: u8 = 0xA8;
/// TD_STATUS, P1_XH, P1_XL, P1_YH, P1_YL.
const POINT_FRAME_BYTES: usize = 5;
const MAX_TOUCHES: u8 = 2;

#[derive(Debug, Clone, Copy)]
pub struct TouchConfig {
    address: u8,
    swap_xy: bool,
    invert_x: bool,
    invert_y: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchConfig {
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            swap_xy: false,
            invert_x: false,
            invert_y: false,
        }
    }

    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Raw X/Y are swapped before inversion, for panels mounted portrait.
    pub const fn with_swap_xy(mut self, swap_xy: bool) -> Self {
        self.swap_xy = swap_xy;
        self
    }

    pub const fn with_invert_x(mut self, invert_x: bool) -> Self {
        self.invert_x = invert_x;
        self
    }

    pub const fn with_invert_y(mut self, invert_y: bool) -> Self {
        self.invert_y = invert_y;
        self
    }

    fn map(&self, raw_x: u16, raw_y: u16) -> TouchPoint {
        let (x, y) = if self.swap_xy {
            (raw_y, raw_x)
        } else {
            (raw_x, raw_y)
        };
        let x = x.min(PANEL_WIDTH - 1);
        let y = y.min(PANEL_HEIGHT - 1);
        let x = if self.invert_x { PANEL_WIDTH - 1 - x } else { x };
        let y = if self.invert_y { PANEL_HEIGHT - 1 - y } else { y };
        TouchPoint::new(x, y)
    }
}

#[derive(Debug)]
pub enum TouchError<I2cErr> {
    I2c(I2cErr),
}

#[derive(Debug)]
pub struct Ft6336Touch<I2C> {
    i2c: I2C,
    config: TouchConfig,
    touching: bool,
}

impl<I2C> Ft6336Touch<I2C>
where
    I2C: I2c,
{
    /// Reads the chip id once so a missing controller fails at boot.
    pub fn new(mut i2c: I2C, config: TouchConfig) -> Result<Self, TouchError<I2C::Error>> {
        let mut chip_id = [0u8; 1];
        i2c.write_read(config.address, &[REG_CHIP_ID], &mut chip_id)
            .map_err(TouchError::I2c)?;
        info!(
            "touch: controller addr=0x{:02X} chip_id=0x{:02X}",
            config.address, chip_id[0]
        );

        Ok(Self {
            i2c,
            config,
            touching: false,
        })
    }

    fn read_point(&mut self) -> Result<Option<(u16, u16)>, TouchError<I2C::Error>> {
        let mut frame = [0u8; POINT_FRAME_BYTES];
        self.i2c
            .write_read(self.config.address, &[REG_TD_STATUS], &mut frame)
            .map_err(TouchError::I2c)?;

        let touches = frame[0] & 0x0F;
        if touches == 0 || touches > MAX_TOUCHES {
            return Ok(None);
        }

        let x = (u16::from(frame[1] & 0x0F) << 8) | u16::from(frame[2]);
        let y = (u16::from(frame[3] & 0x0F) << 8) | u16::from(frame[4]);
        Ok(Some((x, y)))
    }
}

impl<I2C> TouchProvider for Ft6336Touch<I2C>
where
    I2C: I2c,
{
    type Error = TouchError<I2C::Error>;

    fn poll_press(&mut self) -> Result<Option<TouchPoint>, Self::Error> {
        let Some((raw_x, raw_y)) = self.read_point()? else {
            self.touching = false;
            return Ok(None);
        };

        if self.touching {
            return Ok(None);
        }
        self.touching = true;

        let point = self.config.map(raw_x, raw_y);
        debug!(
            "touch: press raw=({}, {}) mapped=({}, {})",
            raw_x, raw_y, point.x, point.y
        );
        Ok(Some(point))
    }
}
