//! FAT-formatted SD card over SPI, exposed as a whole-document store.
//!
//! Each call performs a full card session: pre-clock, card init, volume
//! open, directory walk, file access, and close. The viewer touches the card
//! once per screen change, so nothing is kept mounted between calls.

use alloc::vec::Vec;

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::{Error as SpiErrorTrait, ErrorKind, ErrorType, Operation, SpiBus, SpiDevice},
};
use embedded_sdmmc::{Mode, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx, VolumeManager};
use flipcard_core::storage::DocumentStore;
use log::{debug, info};

/// Largest document read into RAM in one piece.
pub const MAX_DOCUMENT_BYTES: u32 = 64 * 1024;

/// Fixed timestamp for files written by the viewer; the board has no RTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTimeSource;

impl TimeSource for FixedTimeSource {
    fn get_timestamp(&self) -> Timestamp {
        // 2026-01-01 00:00:00
        Timestamp {
            year_since_1970: 56,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

#[derive(Debug)]
pub enum SdStoreError<BusErr, CsErr>
where
    BusErr: core::fmt::Debug,
    CsErr: core::fmt::Debug,
{
    ChipSelect(CsErr),
    Spi(BusErr),
    Card(SdCardError),
    Filesystem(embedded_sdmmc::Error<SdCardError>),
    /// Empty path or a path without a file name.
    InvalidPath,
    TooLarge { bytes: u32 },
}

#[derive(Debug)]
enum ExclusiveSpiError<BusErr, CsErr>
where
    BusErr: core::fmt::Debug,
    CsErr: core::fmt::Debug,
{
    Bus(BusErr),
    Cs(CsErr),
    DelayNotSupported,
}

impl<BusErr, CsErr> SpiErrorTrait for ExclusiveSpiError<BusErr, CsErr>
where
    BusErr: core::fmt::Debug,
    CsErr: core::fmt::Debug,
{
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Borrowed bus plus chip select, driven as a single-device SPI bus.
struct ExclusiveSpiDevice<'a, BUS, CS>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
{
    bus: &'a mut BUS,
    cs: &'a mut CS,
}

impl<'a, BUS, CS> ExclusiveSpiDevice<'a, BUS, CS>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
{
    fn new(bus: &'a mut BUS, cs: &'a mut CS) -> Self {
        Self { bus, cs }
    }

    fn run(
        &mut self,
        operations: &mut [Operation<'_, u8>],
    ) -> Result<(), ExclusiveSpiError<BUS::Error, CS::Error>>
    where
        BUS::Error: core::fmt::Debug,
        CS::Error: core::fmt::Debug,
    {
        for operation in operations {
            match operation {
                Operation::Read(buf) => self.bus.read(buf).map_err(ExclusiveSpiError::Bus)?,
                Operation::Write(buf) => self.bus.write(buf).map_err(ExclusiveSpiError::Bus)?,
                Operation::Transfer(read, write) => self
                    .bus
                    .transfer(read, write)
                    .map_err(ExclusiveSpiError::Bus)?,
                Operation::TransferInPlace(buf) => self
                    .bus
                    .transfer_in_place(buf)
                    .map_err(ExclusiveSpiError::Bus)?,
                Operation::DelayNs(_) => return Err(ExclusiveSpiError::DelayNotSupported),
            }
        }
        self.bus.flush().map_err(ExclusiveSpiError::Bus)
    }
}

impl<BUS, CS> ErrorType for ExclusiveSpiDevice<'_, BUS, CS>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    BUS::Error: core::fmt::Debug,
    CS::Error: core::fmt::Debug,
{
    type Error = ExclusiveSpiError<BUS::Error, CS::Error>;
}

impl<BUS, CS> SpiDevice<u8> for ExclusiveSpiDevice<'_, BUS, CS>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    BUS::Error: core::fmt::Debug,
    CS::Error: core::fmt::Debug,
{
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(ExclusiveSpiError::Cs)?;
        let op_result = self.run(operations);
        let cs_result = self.cs.set_high().map_err(ExclusiveSpiError::Cs);
        op_result.and(cs_result)
    }
}

struct DelayRef<'a, D>(&'a mut D);

impl<D> DelayNs for DelayRef<'_, D>
where
    D: DelayNs,
{
    fn delay_ns(&mut self, ns: u32) {
        self.0.delay_ns(ns);
    }
}

/// Split `FLIPCARD/CAT/CARD.JSN` into its directories and file name.
fn split_path(path: &str) -> Option<(impl Iterator<Item = &str>, &str)> {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let file_name = segments.next_back()?;
    Some((segments, file_name))
}

pub struct SdCardStore<BUS, CS, DELAY> {
    bus: BUS,
    cs: CS,
    delay: DELAY,
}

type SdResult<BUS, CS, T> =
    Result<T, SdStoreError<<BUS as ErrorType>::Error, <CS as embedded_hal::digital::ErrorType>::Error>>;

impl<BUS, CS, DELAY> SdCardStore<BUS, CS, DELAY>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    DELAY: DelayNs,
    BUS::Error: core::fmt::Debug,
    CS::Error: core::fmt::Debug,
{
    pub fn new(bus: BUS, cs: CS, delay: DELAY) -> Self {
        Self { bus, cs, delay }
    }

    /// Leave the card deselected with the bus idle, ready for power-down.
    pub fn sleep_ready(&mut self) -> SdResult<BUS, CS, ()> {
        self.bus.flush().map_err(SdStoreError::Spi)?;
        self.cs.set_high().map_err(SdStoreError::ChipSelect)
    }

    /// SD SPI init requires >=74 clock cycles with CS deasserted.
    fn preclock(&mut self) -> SdResult<BUS, CS, ()> {
        self.cs.set_high().map_err(SdStoreError::ChipSelect)?;
        let preclock = [0xFFu8; 10];
        self.bus.write(&preclock).map_err(SdStoreError::Spi)
    }

    /// Initialise the card and mount the first volume; returns the card size.
    pub fn probe(&mut self) -> SdResult<BUS, CS, u64> {
        self.preclock()?;

        let spi_device = ExclusiveSpiDevice::new(&mut self.bus, &mut self.cs);
        let mut delay_ref = DelayRef(&mut self.delay);
        let sd_card = SdCard::new(spi_device, &mut delay_ref);
        let card_size_bytes = sd_card.num_bytes().map_err(SdStoreError::Card)?;

        let mut volume_mgr = VolumeManager::new(sd_card, FixedTimeSource);
        let mut volume = volume_mgr
            .open_volume(VolumeIdx(0))
            .map_err(SdStoreError::Filesystem)?;
        volume.close().map_err(SdStoreError::Filesystem)?;

        info!("sd: card ready size_bytes={}", card_size_bytes);
        Ok(card_size_bytes)
    }

    fn read_document(&mut self, path: &str) -> SdResult<BUS, CS, Vec<u8>> {
        let (dirs, file_name) = split_path(path).ok_or(SdStoreError::InvalidPath)?;
        self.preclock()?;

        let spi_device = ExclusiveSpiDevice::new(&mut self.bus, &mut self.cs);
        let mut delay_ref = DelayRef(&mut self.delay);
        let sd_card = SdCard::new(spi_device, &mut delay_ref);

        let mut volume_mgr = VolumeManager::new(sd_card, FixedTimeSource);
        let volume = volume_mgr
            .open_raw_volume(VolumeIdx(0))
            .map_err(SdStoreError::Filesystem)?;
        let mut raw_dir = volume_mgr
            .open_root_dir(volume)
            .map_err(SdStoreError::Filesystem)?;
        for name in dirs {
            let child = volume_mgr
                .open_dir(raw_dir, name)
                .map_err(SdStoreError::Filesystem)?;
            volume_mgr
                .close_dir(raw_dir)
                .map_err(SdStoreError::Filesystem)?;
            raw_dir = child;
        }
        let mut dir = raw_dir.to_directory(&mut volume_mgr);

        let mut file = dir
            .open_file_in_dir(file_name, Mode::ReadOnly)
            .map_err(SdStoreError::Filesystem)?;
        let length = file.length();
        if length > MAX_DOCUMENT_BYTES {
            return Err(SdStoreError::TooLarge { bytes: length });
        }

        let mut bytes = alloc::vec![0u8; length as usize];
        let mut read_total = 0usize;
        while read_total < bytes.len() {
            let read_now = file
                .read(&mut bytes[read_total..])
                .map_err(SdStoreError::Filesystem)?;
            if read_now == 0 {
                break;
            }
            read_total = read_total.saturating_add(read_now);
        }
        bytes.truncate(read_total);

        file.close().map_err(SdStoreError::Filesystem)?;
        dir.close().map_err(SdStoreError::Filesystem)?;
        volume_mgr
            .close_volume(volume)
            .map_err(SdStoreError::Filesystem)?;

        debug!("sd: read {} bytes={}", path, read_total);
        Ok(bytes)
    }

    fn write_document(&mut self, path: &str, bytes: &[u8]) -> SdResult<BUS, CS, ()> {
        let (dirs, file_name) = split_path(path).ok_or(SdStoreError::InvalidPath)?;
        self.preclock()?;

        let spi_device = ExclusiveSpiDevice::new(&mut self.bus, &mut self.cs);
        let mut delay_ref = DelayRef(&mut self.delay);
        let sd_card = SdCard::new(spi_device, &mut delay_ref);

        let mut volume_mgr = VolumeManager::new(sd_card, FixedTimeSource);
        let volume = volume_mgr
            .open_raw_volume(VolumeIdx(0))
            .map_err(SdStoreError::Filesystem)?;
        let mut raw_dir = volume_mgr
            .open_root_dir(volume)
            .map_err(SdStoreError::Filesystem)?;
        for name in dirs {
            let child = volume_mgr
                .open_dir(raw_dir, name)
                .map_err(SdStoreError::Filesystem)?;
            volume_mgr
                .close_dir(raw_dir)
                .map_err(SdStoreError::Filesystem)?;
            raw_dir = child;
        }
        let mut dir = raw_dir.to_directory(&mut volume_mgr);

        let mut file = dir
            .open_file_in_dir(file_name, Mode::ReadWriteCreateOrTruncate)
            .map_err(SdStoreError::Filesystem)?;
        file.write(bytes).map_err(SdStoreError::Filesystem)?;
        file.flush().map_err(SdStoreError::Filesystem)?;

        file.close().map_err(SdStoreError::Filesystem)?;
        dir.close().map_err(SdStoreError::Filesystem)?;
        volume_mgr
            .close_volume(volume)
            .map_err(SdStoreError::Filesystem)?;

        info!("sd: wrote {} bytes={}", path, bytes.len());
        Ok(())
    }
}

impl<BUS, CS, DELAY> DocumentStore for SdCardStore<BUS, CS, DELAY>
where
    BUS: SpiBus<u8>,
    CS: OutputPin,
    DELAY: DelayNs,
    BUS::Error: core::fmt::Debug,
    CS::Error: core::fmt::Debug,
{
    type Error = SdStoreError<BUS::Error, CS::Error>;

    fn read(&mut self, path: &str) -> Result<Vec<u8>, Self::Error> {
        self.read_document(path)
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write_document(path, bytes)
    }
}
