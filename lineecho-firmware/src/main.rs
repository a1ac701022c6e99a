//! lineecho - Serial line echo firmware
//!
//! Collects characters typed on UART0 into a line buffer and, once a
//! terminator arrives, sends the whole line back with a-z folded to
//! upper case.
//!
//! Three ways of running the same echo are selectable at build time:
//!
//! - default: async receive and transmit tasks joined by a bounded channel
//! - `legacy-isr`: combined receive/transmit handler on the raw UART0
//!   interrupt, with a foreground task that arms each transfer
//! - `polled`: blocking read/write loop on the main task

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::uart::Uart;
use embassy_rp::Peripherals;
use {defmt_rtt as _, panic_probe as _};

use lineecho_core::{EchoConfig, Line, DEFAULT_CAPACITY};
use lineecho_hal_rp2040::{uart_for_pins, UartId};

#[cfg(not(feature = "polled"))]
mod channels;
mod config;
#[cfg(feature = "legacy-isr")]
mod isr;
mod tasks;

#[cfg(all(feature = "legacy-isr", feature = "polled"))]
compile_error!("features `legacy-isr` and `polled` are mutually exclusive");

/// Bytes held per line
pub const LINE_CAPACITY: usize = DEFAULT_CAPACITY;

/// Line passed from the receive task to the transmit task
pub type EchoLine = Line<LINE_CAPACITY>;

/// UART0 pin assignment (Pico default: GPIO0 TX, GPIO1 RX)
const TX_PIN: u8 = 0;
const RX_PIN: u8 = 1;

#[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
embassy_rp::bind_interrupts!(struct Irqs {
    UART0_IRQ => embassy_rp::uart::BufferedInterruptHandler<embassy_rp::peripherals::UART0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("lineecho firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    let uart_id = unwrap!(uart_for_pins(TX_PIN, RX_PIN));
    info!("Echo on {:?}, GPIO{} TX / GPIO{} RX", uart_id, TX_PIN, RX_PIN);

    #[cfg(feature = "legacy-isr")]
    run_interrupt_echo(spawner, p, uart_id, config).await;

    #[cfg(feature = "polled")]
    {
        let _ = (spawner, uart_id);
        run_polled_echo(p, config);
    }

    #[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
    run_task_echo(spawner, p, uart_id, config).await;
}

/// Async receive/transmit tasks
#[cfg(not(any(feature = "legacy-isr", feature = "polled")))]
async fn run_task_echo(
    spawner: Spawner,
    p: Peripherals,
    uart_id: UartId,
    config: EchoConfig,
) -> ! {
    use static_cell::StaticCell;

    // Static cells for UART buffers (must live forever)
    static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
    static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, config::uart_config(&config));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("{:?} initialized (buffered)", uart_id);

    spawner.spawn(tasks::echo_rx_task(rx, config)).unwrap();
    spawner.spawn(tasks::echo_tx_task(tx)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Combined handler on the raw UART0 interrupt
#[cfg(feature = "legacy-isr")]
async fn run_interrupt_echo(
    spawner: Spawner,
    p: Peripherals,
    uart_id: UartId,
    config: EchoConfig,
) -> ! {
    use embassy_rp::interrupt::{InterruptExt, Priority};
    use lineecho_hal_rp2040::Pl011Port;

    // Sets baud rate, frame format and pin muxing; the handler takes over
    // the registers afterwards. Must stay alive for the pins to stay muxed.
    let _uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, config::uart_config(&config));

    isr::ECHO.configure(config);

    let port = Pl011Port::new(uart_id);
    port.enable_interrupts();

    let irq = port.irq();
    irq.unpend();
    irq.set_priority(Priority::P1);
    // SAFETY: the handler only touches state guarded by a critical section
    unsafe { irq.enable() };

    info!("{:?} initialized (interrupt-driven)", uart_id);

    spawner.spawn(tasks::arm_task(uart_id)).unwrap();

    info!("Arm task spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        let stats = isr::ECHO.stats();
        debug!(
            "Heartbeat: {} lines, {} received, {} dropped",
            stats.lines, stats.received, stats.dropped
        );
    }
}

/// Blocking loop on the main task
#[cfg(feature = "polled")]
fn run_polled_echo(p: Peripherals, config: EchoConfig) -> ! {
    use lineecho_core::{EchoError, PolledEcho};
    use lineecho_hal_rp2040::BlockingUart;

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, config::uart_config(&config));
    let mut echo = PolledEcho::<_, LINE_CAPACITY>::new(BlockingUart::new(uart), config);

    info!("UART initialized (polled)");

    loop {
        match echo.step() {
            Ok(Some(n)) => trace!("Echoed {} bytes", n),
            Ok(None) => {}
            Err(EchoError::Overflow) => warn!("Line buffer full, byte dropped"),
            Err(e) => warn!("UART error: {:?}", e),
        }
    }
}
