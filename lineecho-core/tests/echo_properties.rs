//! Behavioural properties of the interrupt-driven echo, exercised through
//! the simulated serial port.

use lineecho_core::config::CR;
use lineecho_core::{EchoConfig, EchoState, LineAssembler, LineEcho, DEFAULT_CAPACITY};
use lineecho_hal::mock::MockSerial;
use proptest::prelude::*;

type Echo = LineEcho<DEFAULT_CAPACITY>;

fn pump(echo: &mut Echo, port: &mut MockSerial) {
    while !echo.service(port).is_empty() {}
}

/// Deliver bytes one at a time, running the foreground check after each
fn type_bytes(echo: &mut Echo, port: &mut MockSerial, input: &[u8]) {
    for &byte in input {
        port.inject(&[byte]);
        pump(echo, port);
        if echo.arm(port) {
            pump(echo, port);
        }
    }
}

fn fold(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|&b| if b.is_ascii_lowercase() { b - 32 } else { b })
        .collect()
}

/// Line content without the terminator
fn line_body(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>().prop_filter("no CR", |&b| b != CR), 0..max)
}

proptest! {
    #[test]
    fn short_lines_echo_folded(body in line_body(DEFAULT_CAPACITY)) {
        let mut echo = Echo::default();
        let mut port = MockSerial::new();

        let mut input = body.clone();
        input.push(CR);
        type_bytes(&mut echo, &mut port, &input);

        let mut expected = fold(&body);
        expected.push(CR);
        prop_assert_eq!(port.sent(), &expected[..]);
    }

    #[test]
    fn long_lines_keep_first_capacity_bytes(
        body in prop::collection::vec(b' '..=b'~', DEFAULT_CAPACITY + 1..DEFAULT_CAPACITY * 2)
    ) {
        let mut echo = Echo::default();
        let mut port = MockSerial::new();

        let mut input = body.clone();
        input.push(CR);
        type_bytes(&mut echo, &mut port, &input);

        prop_assert_eq!(port.sent(), &fold(&body[..DEFAULT_CAPACITY])[..]);
        prop_assert_eq!(echo.stats().dropped as usize, input.len() - DEFAULT_CAPACITY);
    }

    #[test]
    fn cycles_return_to_initial_state(
        lines in prop::collection::vec(line_body(DEFAULT_CAPACITY), 1..6)
    ) {
        let mut echo = Echo::default();
        let mut port = MockSerial::new();

        for body in &lines {
            port.clear_sent();
            let mut input = body.clone();
            input.push(CR);
            type_bytes(&mut echo, &mut port, &input);

            let mut expected = fold(body);
            expected.push(CR);
            prop_assert_eq!(port.sent(), &expected[..]);
            prop_assert!(echo.is_tx_ready());
            prop_assert_eq!(echo.len(), 0);
            prop_assert_eq!(echo.state(), EchoState::IdleEmpty);
        }
        prop_assert_eq!(echo.stats().lines as usize, lines.len());
    }

    #[test]
    fn assembler_matches_interrupt_echo(body in line_body(DEFAULT_CAPACITY * 2)) {
        let mut echo = Echo::default();
        let mut port = MockSerial::new();
        let mut asm = LineAssembler::<DEFAULT_CAPACITY>::default();

        let mut input = body.clone();
        input.push(CR);
        type_bytes(&mut echo, &mut port, &input);

        let mut line = None;
        for &byte in &input {
            if let Ok(Some(done)) = asm.feed(byte) {
                line = Some(done);
            }
        }
        let line = line.expect("terminator completes the line");
        prop_assert_eq!(line.as_bytes(), port.sent());
    }
}

#[test]
fn hi_scenario() {
    let mut echo = Echo::default();
    let mut port = MockSerial::new();

    port.inject(&[0x48, 0x69, 0x0D]);
    pump(&mut echo, &mut port);
    assert_eq!(echo.len(), 3);
    assert!(port.sent().is_empty());

    assert!(echo.arm(&mut port));
    pump(&mut echo, &mut port);

    assert_eq!(port.sent(), &[0x48, 0x49, 0x0D]);
    assert!(echo.is_tx_ready());
}

#[test]
fn seventy_bytes_then_cr() {
    let mut echo = Echo::default();
    let mut port = MockSerial::new();

    let body: Vec<u8> = (0..70u8).map(|i| b'a' + (i % 26)).collect();
    for &byte in &body {
        port.inject(&[byte]);
        pump(&mut echo, &mut port);
        assert!(echo.len() <= DEFAULT_CAPACITY);
    }
    port.inject(&[CR]);
    pump(&mut echo, &mut port);
    assert_eq!(echo.len(), DEFAULT_CAPACITY);

    assert!(echo.arm(&mut port));
    pump(&mut echo, &mut port);

    assert_eq!(port.sent(), &fold(&body[..DEFAULT_CAPACITY])[..]);
    assert_eq!(echo.stats().dropped, 7);
}

#[test]
fn unterminated_line_is_never_sent() {
    let mut echo = Echo::default();
    let mut port = MockSerial::new();

    type_bytes(&mut echo, &mut port, b"waiting forever");
    assert!(port.sent().is_empty());
    assert_eq!(echo.state(), EchoState::Filling);
}

#[test]
fn parsed_config_drives_echo() {
    let config = lineecho_core::parse_config("[echo]\ntransform = \"none\"\n").unwrap();
    let mut echo = LineEcho::<DEFAULT_CAPACITY>::new(config);
    let mut port = MockSerial::new();

    type_bytes(&mut echo, &mut port, b"abc\r");
    assert_eq!(port.sent(), b"abc\r");
    assert_ne!(config, EchoConfig::default());
}
