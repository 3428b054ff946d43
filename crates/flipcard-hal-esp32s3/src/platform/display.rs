use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::framebuffer::{FrameBuffer, HEIGHT, LINE_BYTES};

const CS_SETUP_NS: u32 = 3_000;
const CS_HOLD_NS: u32 = 1_000;
const CLEAR_HOLD_NS: u32 = 220_000;

const CMD_WRITE: u8 = 0x80;
const CMD_CLEAR: u8 = 0x20;
const VCOM_BIT: u8 = 0x40;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DisplayError<SpiErr, DispErr, EmdErr, CsErr> {
    Spi(SpiErr),
    Disp(DispErr),
    Emd(EmdErr),
    Cs(CsErr),
}

pub type SharpDisplayResult<SpiErr, DispErr, EmdErr, CsErr> =
    Result<(), DisplayError<SpiErr, DispErr, EmdErr, CsErr>>;

/// Gate address byte for panel line 1..=240; the panel expects it LSB first.
const fn line_address(line: u8) -> u8 {
    line.reverse_bits()
}

/// Board-level adapter for the LS027B7DH01 memory LCD.
#[derive(Debug)]
pub struct SharpDisplay<SPI, DISP, EMD, CS> {
    spi: SPI,
    disp: DISP,
    emd: EMD,
    cs: CS,
    vcom_high: bool,
}

impl<SPI, DISP, EMD, CS> SharpDisplay<SPI, DISP, EMD, CS>
where
    SPI: SpiBus<u8>,
    DISP: OutputPin,
    EMD: OutputPin,
    CS: OutputPin,
{
    pub fn new(spi: SPI, disp: DISP, emd: EMD, cs: CS) -> Self {
        Self {
            spi,
            disp,
            emd,
            cs,
            vcom_high: false,
        }
    }

    /// Serial M1 mode (VCOM carried in the command byte), display output on.
    pub fn initialize<D>(
        &mut self,
        delay: &mut D,
    ) -> SharpDisplayResult<SPI::Error, DISP::Error, EMD::Error, CS::Error>
    where
        D: DelayNs,
    {
        self.disp.set_high().map_err(DisplayError::Disp)?;
        self.emd.set_low().map_err(DisplayError::Emd)?;
        self.cs.set_low().map_err(DisplayError::Cs)?;

        delay.delay_us(60);
        Ok(())
    }

    /// Blank the panel memory to white.
    pub fn clear_all<D>(
        &mut self,
        delay: &mut D,
    ) -> SharpDisplayResult<SPI::Error, DISP::Error, EMD::Error, CS::Error>
    where
        D: DelayNs,
    {
        let command = self.next_command(CMD_CLEAR);

        self.cs.set_high().map_err(DisplayError::Cs)?;
        delay.delay_ns(CS_SETUP_NS);

        self.spi
            .write(&[command, 0x00, 0x00])
            .map_err(DisplayError::Spi)?;
        self.spi.flush().map_err(DisplayError::Spi)?;

        delay.delay_ns(CLEAR_HOLD_NS);
        self.cs.set_low().map_err(DisplayError::Cs)?;
        Ok(())
    }

    /// Send every line of `frame` in one chip-select window.
    pub fn flush_frame<D>(
        &mut self,
        frame: &FrameBuffer,
        delay: &mut D,
    ) -> SharpDisplayResult<SPI::Error, DISP::Error, EMD::Error, CS::Error>
    where
        D: DelayNs,
    {
        let command = self.next_command(CMD_WRITE);

        self.cs.set_high().map_err(DisplayError::Cs)?;
        delay.delay_ns(CS_SETUP_NS);

        self.spi.write(&[command]).map_err(DisplayError::Spi)?;

        // [address][50 data bytes][dummy]
        let mut packet = [0u8; LINE_BYTES + 2];
        for y in 0..HEIGHT {
            packet[0] = line_address((y + 1) as u8);
            // Panel memory stores 1 as white.
            for (dst, src) in packet[1..=LINE_BYTES].iter_mut().zip(frame.row(y)) {
                *dst = !*src;
            }
            self.spi.write(&packet).map_err(DisplayError::Spi)?;
        }

        self.spi.write(&[0x00]).map_err(DisplayError::Spi)?;
        self.spi.flush().map_err(DisplayError::Spi)?;

        delay.delay_ns(CS_HOLD_NS);
        self.cs.set_low().map_err(DisplayError::Cs)?;
        Ok(())
    }

    /// Blank the panel output ahead of power-down. Memory contents are kept.
    pub fn disable_output(
        &mut self,
    ) -> SharpDisplayResult<SPI::Error, DISP::Error, EMD::Error, CS::Error> {
        self.cs.set_low().map_err(DisplayError::Cs)?;
        self.disp.set_low().map_err(DisplayError::Disp)
    }

    fn next_command(&mut self, base: u8) -> u8 {
        self.vcom_high = !self.vcom_high;
        base | if self.vcom_high { VCOM_BIT } else { 0x00 }
    }
}
