//! IO1X 光センサボードのファームウェア
//! 1秒ごとに照度と温度を測定してUARTで送信する
#![no_std] // 必須アトリビュート
#![no_main] // 必須アトリビュート
use panic_halt as _; // 必須クレート
use wio::prelude::*; // ほぼ必須
use wio_terminal as wio; // 必須クレート

use core::cell::RefCell;
use core::convert::Infallible;

// 割り込み
use cortex_m::interrupt::{free as disable_interrupts, Mutex};
use cortex_m::peripheral::NVIC;
use wio::pac::interrupt;

// 光度センサー
use atsamd_hal::adc::{InterruptAdc, Resolution, SingleConversion};
use wio::pac::ADC1;

// 温度センサー
use atsamd_hal::sercom::i2c;

// UART
use embedded_hal::serial;

// ログ
use log::{error, info, warn, LevelFilter};
use portable_atomic::{AtomicU16, Ordering};

use io1x_light_sensor::adc::ConversionAdc;
use io1x_light_sensor::logger::{self, LogSink, SerialLogger};
use io1x_light_sensor::temperature;
use io1x_light_sensor::{At30tse75x, BoardParts, Config, ConversionFlag, IoSensorBoard};

// 120 MHz で約1秒
const CYCLES_PER_SECOND: u32 = 120_000_000;

// ADC変換完了フラグ. ADC1_RESRDY 割り込みで立てる
static CONVERSION_FLAG: ConversionFlag = ConversionFlag::new();
static LAST_SAMPLE: AtomicU16 = AtomicU16::new(0);

struct AdcCtx {
    adc: InterruptAdc<ADC1, SingleConversion>,
    pin: wio::LightSensorAdc,
}
static ADC_CTX: Mutex<RefCell<Option<AdcCtx>>> = Mutex::new(RefCell::new(None));

#[interrupt]
fn ADC1_RESRDY() {
    disable_interrupts(|cs| {
        if let Some(ctx) = ADC_CTX.borrow(cs).borrow_mut().as_mut() {
            if let Some(sample) = ctx.adc.service_interrupt_ready() {
                LAST_SAMPLE.store(sample, Ordering::Release);
                CONVERSION_FLAG.signal();
            }
        }
    });
}

/// 割り込み駆動の光センサADC
struct WioLightAdc;

impl ConversionAdc for WioLightAdc {
    type Error = Infallible;

    fn enable_channel(&mut self) -> Result<(), Infallible> {
        unsafe {
            NVIC::unmask(interrupt::ADC1_RESRDY);
        }
        Ok(())
    }

    fn start_conversion(&mut self) -> Result<(), Infallible> {
        disable_interrupts(|cs| {
            if let Some(ctx) = ADC_CTX.borrow(cs).borrow_mut().as_mut() {
                ctx.adc.start_conversion(&mut ctx.pin);
            }
        });
        Ok(())
    }

    fn read_sample(&mut self) -> Result<u16, Infallible> {
        Ok(LAST_SAMPLE.load(Ordering::Acquire))
    }
}

// UARTドライバオブジェクト. テレメトリとログで共有する
static SERIAL: Mutex<RefCell<Option<wio::HalUart>>> = Mutex::new(RefCell::new(None));

/// 共有UARTへの書き込み口
struct SharedUart;

impl serial::Write<u8> for SharedUart {
    type Error = ();

    fn write(&mut self, word: u8) -> nb::Result<(), ()> {
        disable_interrupts(|cs| match SERIAL.borrow(cs).borrow_mut().as_mut() {
            Some(uart) => serial::Write::write(uart, word).map_err(|e| e.map(|_| ())),
            None => Err(nb::Error::Other(())),
        })
    }

    fn flush(&mut self) -> nb::Result<(), ()> {
        disable_interrupts(|cs| match SERIAL.borrow(cs).borrow_mut().as_mut() {
            Some(uart) => serial::Write::flush(uart).map_err(|e| e.map(|_| ())),
            None => Err(nb::Error::Other(())),
        })
    }
}

struct UartSink;

impl LogSink for UartSink {
    fn write_line(&self, line: &str) {
        let mut uart = SharedUart;
        for c in line.as_bytes().iter() {
            let _ = nb::block!(serial::Write::write(&mut uart, *c));
        }
    }
}

static LOGGER: SerialLogger<UartSink> = SerialLogger::new(LevelFilter::Info, UartSink);

#[wio::entry] // 必須アトリビュート
fn main() -> ! {
    // 初期化
    // 必須インスタンス
    let mut peripherals = wio::pac::Peripherals::take().unwrap();
    let core = wio::pac::CorePeripherals::take().unwrap();
    let mut clocks = wio::hal::clock::GenericClockController::with_external_32kosc(
        peripherals.GCLK,
        &mut peripherals.MCLK,
        &mut peripherals.OSC32KCTRL,
        &mut peripherals.OSCCTRL,
        &mut peripherals.NVMCTRL,
    );
    let delay = wio::hal::delay::Delay::new(core.SYST, &mut clocks);

    // GPIO
    let pins = wio::Pins::new(peripherals.PORT);

    // UARTドライバオブジェクト
    let uart: wio::HalUart = wio::Uart {
        tx:/*UartTxReset*/ pins.uart_tx,
        rx:/*UartRxReset*/ pins.uart_rx,
    }
    .init(
        &mut clocks,
        9600.Hz(),
        peripherals.SERCOM2,
        &mut peripherals.MCLK,
    );
    disable_interrupts(|cs| SERIAL.borrow(cs).replace(Some(uart)));
    let _ = logger::init(&LOGGER);

    // 光度センサー. IO1X のADCは8ビットで読む
    let (mut adc1, light_sensor_adc) = wio::LightSensor {
        pd1:/*LightSensorAdcReset*/ pins.fpc_d13_a13,
    }
    .init(peripherals.ADC1, &mut clocks, &mut peripherals.MCLK);
    adc1.resolution(Resolution::_8BIT);
    let adc1: InterruptAdc<_, SingleConversion> = InterruptAdc::from(adc1);
    disable_interrupts(|cs| {
        ADC_CTX.borrow(cs).replace(Some(AdcCtx {
            adc: adc1,
            pin: light_sensor_adc,
        }))
    });

    // 温度センサー (I2C)
    let gclk0 = clocks.gclk0();
    let sercom4_clock = clocks.sercom4_core(&gclk0).unwrap();
    let pads = i2c::Pads::new(pins.i2c0_sda, pins.i2c0_scl);
    let i2c = i2c::Config::new(
        &peripherals.MCLK,
        peripherals.SERCOM4,
        pads,
        sercom4_clock.freq(),
    )
    .baud(100.kHz())
    .enable();

    // Wio Terminal の内蔵LEDは High で点灯する
    let config = Config {
        led_active_low: false,
        ..Config::DEFAULT
    };

    let parts = BoardParts {
        adc: WioLightAdc,
        temperature: At30tse75x::new(i2c, temperature::DEFAULT_ADDRESS),
        serial: SharedUart,
        led: pins.user_led.into_push_pull_output(),
        delay,
    };
    let mut board = match IoSensorBoard::init(parts, config, &CONVERSION_FLAG) {
        Ok(board) => board,
        Err(e) => {
            error!("IO1X init failed: {}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };
    info!("IO1X ready");
    // ここまで 初期化

    // 内蔵LED点灯
    if let Err(e) = board.led_on() {
        warn!("{}", e);
    }

    // 組込みはloop必須
    // 1秒ごとに測定値をUARTで送信する
    loop {
        match board.sample() {
            Ok(reading) => {
                if let Err(e) = board.send_reading(&reading) {
                    warn!("{}", e);
                }
            }
            Err(e) => warn!("sample failed: {}", e),
        }
        cortex_m::asm::delay(CYCLES_PER_SECOND);
    }
    // ここまでloop処理
}
// ここまでmain関数
