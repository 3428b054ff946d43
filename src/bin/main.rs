#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::Timer;
use embedded_hal::{digital::OutputPin, spi::SpiBus};
use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Level, Output, OutputConfig, RtcPin},
    i2c::master::{Config as I2cConfig, I2c},
    rng::Rng,
    rtc_cntl::{reset_reason, wakeup_cause},
    spi::master::Spi,
    system::Cpu,
    time::{Instant, Rate},
    timer::timg::TimerGroup,
};
use flipcard_core::{
    app::{AppConfig, FlipcardApp, TickResult},
    render::Screen,
};
use flipcard_hal_esp32s3::{
    input::{Ft6336Touch, TouchConfig},
    platform::{FrameBuffer, SharpDisplay},
    render::{FrameRenderer, ScreenRenderer},
    storage::SdCardStore,
};
use log::{LevelFilter, info, warn};
use rand::{SeedableRng, rngs::SmallRng};

#[path = "main/power.rs"]
mod power;

const DISPLAY_SPI_HZ: u32 = 1_000_000;
const SD_SPI_HZ: u32 = 1_000_000;
const TOUCH_I2C_KHZ: u32 = 400;
const SD_PROBE_ATTEMPTS: u8 = 3;
const SD_PROBE_RETRY_DELAY_MS: u64 = 120;
const IDLE_TIMEOUT_MS: u64 = 180_000;
const SLEEP_NOTICE_MS: u64 = 2_000;
const LOOP_DELAY_MS: u64 = 50;

const APP_CONFIG: AppConfig = AppConfig::new().with_idle_timeout_ms(IDLE_TIMEOUT_MS);
// Panel is mounted landscape with the controller's origin at the bottom-left.
const TOUCH_CONFIG: TouchConfig = TouchConfig::new().with_invert_y(true);

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Draw a two-line status screen, used for boot failures.
fn show_status<SPI, DISP, EMD, CS>(
    display: &mut SharpDisplay<SPI, DISP, EMD, CS>,
    frame: &mut FrameBuffer,
    delay: &mut Delay,
    line1: &str,
    line2: &str,
) where
    SPI: SpiBus<u8>,
    DISP: OutputPin,
    EMD: OutputPin,
    CS: OutputPin,
{
    ScreenRenderer::new().render(Screen::Status { line1, line2 }, frame);
    if let Err(err) = display.flush_frame(frame, delay) {
        warn!("display: status flush failed: {:?}", err);
    }
}

async fn halt() -> ! {
    loop {
        Timer::after_secs(1).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: flipcard starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);
    info!(
        "boot: reset_reason={:?} wakeup_cause={:?}",
        reset_reason(Cpu::ProCpu),
        wakeup_cause()
    );

    // Card index and descriptors are parsed into owned strings.
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);
    esp_alloc::heap_allocator!(size: 96 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Display wiring: CLK=GPIO13, DI=GPIO14, CS=GPIO15, DISP=GPIO2, EMD=GPIO9
    let disp_pin = peripherals.GPIO2;
    // Release any prior deep-sleep pad hold before driving DISP high again.
    disp_pin.rtcio_pad_hold(false);
    let disp = Output::new(disp_pin, Level::Low, OutputConfig::default());
    let emd = Output::new(peripherals.GPIO9, Level::Low, OutputConfig::default());
    let cs = Output::new(peripherals.GPIO15, Level::Low, OutputConfig::default());

    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        // LS027B7DH01 uses CPOL=0, CPHA=1.
        .with_mode(esp_hal::spi::Mode::_1);

    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO13)
        .with_mosi(peripherals.GPIO14);

    let mut delay = Delay::new();
    let mut display = SharpDisplay::new(spi, disp, emd, cs);
    let mut display_fault_logged = false;
    if let Err(err) = display.initialize(&mut delay) {
        warn!("display: initialize failed: {:?}", err);
        display_fault_logged = true;
    }
    if let Err(err) = display.clear_all(&mut delay) {
        warn!("display: clear failed: {:?}", err);
        display_fault_logged = true;
    }

    let mut renderer = ScreenRenderer::new();
    let mut frame = FrameBuffer::new();

    // SD wiring: CS=GPIO8, SCK=GPIO4, MOSI=GPIO40, MISO=GPIO41
    let sd_cs = Output::new(peripherals.GPIO8, Level::High, OutputConfig::default());
    let sd_spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(SD_SPI_HZ))
        // SD cards in SPI mode use CPOL=0, CPHA=0.
        .with_mode(esp_hal::spi::Mode::_0);
    let sd_spi = Spi::new(peripherals.SPI3, sd_spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO4)
        .with_mosi(peripherals.GPIO40)
        .with_miso(peripherals.GPIO41);
    let mut store = SdCardStore::new(sd_spi, sd_cs, Delay::new());

    let mut sd_ready = false;
    for attempt in 1..=SD_PROBE_ATTEMPTS {
        match store.probe() {
            Ok(_) => {
                sd_ready = true;
                break;
            }
            Err(err) => {
                warn!("sd: probe attempt {} failed: {:?}", attempt, err);
                Timer::after_millis(SD_PROBE_RETRY_DELAY_MS).await;
            }
        }
    }
    if !sd_ready {
        show_status(
            &mut display,
            &mut frame,
            &mut delay,
            "NO SD CARD",
            "Insert a card and restart",
        );
        halt().await;
    }

    // Touch wiring: SDA=GPIO10, SCL=GPIO11, INT=GPIO12 (deep-sleep wake)
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(TOUCH_I2C_KHZ)),
    )
    .unwrap()
    .with_sda(peripherals.GPIO10)
    .with_scl(peripherals.GPIO11);
    let touch = match Ft6336Touch::new(i2c, TOUCH_CONFIG) {
        Ok(touch) => touch,
        Err(err) => {
            warn!("touch: controller not found: {:?}", err);
            show_status(
                &mut display,
                &mut frame,
                &mut delay,
                "TOUCH ERROR",
                "Touch controller not found",
            );
            halt().await
        }
    };

    let rng = SmallRng::seed_from_u64(u64::from(Rng::new().random()));
    let loop_start = Instant::now();
    let mut app = match FlipcardApp::new(
        &mut store,
        touch,
        rng,
        APP_CONFIG,
        loop_start.elapsed().as_millis(),
    ) {
        Ok(app) => app,
        Err(err) => {
            warn!("boot: content load failed: {}", err);
            show_status(
                &mut display,
                &mut frame,
                &mut delay,
                "CONTENT ERROR",
                "Check the FLIPCARD folder",
            );
            halt().await
        }
    };
    info!(
        "boot: {} cards, {} languages",
        app.catalog().total(),
        app.languages().len()
    );

    loop {
        let now_ms = loop_start.elapsed().as_millis();

        match app.tick(now_ms) {
            TickResult::NoRender => {}
            TickResult::RenderRequested => {
                app.with_screen(|screen| renderer.render(screen, &mut frame));
                if let Err(err) = display.flush_frame(&frame, &mut delay)
                    && !display_fault_logged
                {
                    warn!("display: flush failed: {:?}", err);
                    display_fault_logged = true;
                }
            }
            TickResult::SleepRequested => {
                info!(
                    "sleep: entering deep sleep after {}ms inactivity",
                    IDLE_TIMEOUT_MS
                );
                app.with_screen(|screen| renderer.render(screen, &mut frame));
                if let Err(err) = display.flush_frame(&frame, &mut delay) {
                    warn!("display: lock flush failed: {:?}", err);
                }
                Timer::after_millis(SLEEP_NOTICE_MS).await;
                power::enter_deep_sleep(&mut display, &mut store);
            }
        }

        Timer::after_millis(LOOP_DELAY_MS).await;
    }
}
