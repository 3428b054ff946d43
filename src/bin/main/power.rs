use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
use esp_hal::{
    gpio::RtcPin,
    peripherals::{GPIO2, GPIO12, LPWR},
    rtc_cntl::{
        Rtc,
        sleep::{RtcioWakeupSource, WakeupLevel},
    },
};
use flipcard_hal_esp32s3::{platform::SharpDisplay, storage::SdCardStore};
use log::warn;

/// Power down until the touch controller pulls INT low. Wake is a reboot.
pub(super) fn enter_deep_sleep<DSPI, DISP, EMD, DCS, SDBUS, SDCS, SDDELAY>(
    display: &mut SharpDisplay<DSPI, DISP, EMD, DCS>,
    store: &mut SdCardStore<SDBUS, SDCS, SDDELAY>,
) -> !
where
    DSPI: SpiBus<u8>,
    DISP: OutputPin,
    EMD: OutputPin,
    DCS: OutputPin,
    SDBUS: SpiBus<u8>,
    SDCS: OutputPin,
    SDDELAY: DelayNs,
{
    if let Err(err) = display.disable_output() {
        warn!("sleep: display off failed: {:?}", err);
    }
    // Latch DISP low through deep sleep.
    let disp_hold = unsafe { GPIO2::steal() };
    disp_hold.rtcio_pad_hold(true);

    if let Err(err) = store.sleep_ready() {
        warn!("sleep: sd idle failed: {:?}", err);
    }

    let mut rtc = Rtc::new(unsafe { LPWR::steal() });
    let mut touch_int = unsafe { GPIO12::steal() };
    let mut wake_pins: [(&mut dyn RtcPin, WakeupLevel); 1] =
        [(&mut touch_int, WakeupLevel::Low)];
    let wake_source = RtcioWakeupSource::new(&mut wake_pins);

    rtc.sleep_deep(&[&wake_source]);
}
