mod common;

use common::{CountingShutdown, FakeBus, RecordingSink, SinkRecord};
use iopi_joystick::hardware::BusError;
use iopi_joystick::input::{InputProfile, LogicalButton, Polarity, PollLoop};
use iopi_joystick::output::{Channel, SinkError};
use iopi_joystick::JoystickError;
use std::time::Duration;

const RELEASED: u8 = 1;
const PRESSED: u8 = 0;

fn fast_loop() -> PollLoop {
    PollLoop::new(Duration::from_millis(1))
}

#[test]
fn default_interval_is_ten_milliseconds() {
    assert_eq!(PollLoop::default().interval(), Duration::from_millis(10));
}

#[test]
fn center_sends_both_axes_as_one_update() {
    let mut sink = RecordingSink::default();
    fast_loop().center(&mut sink).unwrap();

    assert_eq!(
        sink.records,
        vec![
            SinkRecord::Send(Channel::AbsX, 128),
            SinkRecord::Send(Channel::AbsY, 128),
            SinkRecord::Flush,
        ]
    );
}

#[test]
fn bus_failure_stops_the_loop() {
    let bus = FakeBus::with_idle(RELEASED);
    bus.script(LogicalButton::BUTTON_4, &[PRESSED, PRESSED, PRESSED]);
    // Two full passes over 16 pins, then the bus dies mid third pass
    bus.fail_after_reads(32 + 5);
    let mut profile = InputProfile::player_one(0x20, Box::new(bus.clone()), Polarity::ActiveLow)
        .configure()
        .unwrap();
    let mut sink = RecordingSink::default();

    let err = fast_loop().run(&mut profile, &mut sink).unwrap_err();

    assert!(matches!(err, JoystickError::Bus(BusError::Unavailable(_))));
    assert_eq!(bus.read_count(), 37);
    assert_eq!(
        sink.sent(),
        vec![
            (Channel::AbsX, 128),
            (Channel::AbsY, 128),
            (Channel::BtnB, 1),
        ]
    );
}

#[test]
fn sink_failure_stops_the_loop() {
    let bus = FakeBus::with_idle(RELEASED);
    let shutdown = CountingShutdown::default();
    let mut profile = InputProfile::player_two(
        0x21,
        Box::new(bus.clone()),
        Polarity::ActiveLow,
        Box::new(shutdown.clone()),
    )
    .configure()
    .unwrap();
    let mut sink = RecordingSink {
        fail_sends: true,
        ..Default::default()
    };

    let err = fast_loop().run(&mut profile, &mut sink).unwrap_err();

    assert!(matches!(err, JoystickError::Sink(SinkError::DeviceCreation(_))));
    // Centering failed, no pin was read
    assert_eq!(bus.read_count(), 0);
    assert_eq!(shutdown.count(), 0);
}

#[test]
fn inverted_wiring_reads_presses_as_one() {
    let bus = FakeBus::with_idle(0);
    bus.script(LogicalButton::JOYSTICK_UP, &[1, 1, 0]);
    bus.fail_after_reads(16 * 3);
    let mut profile = InputProfile::player_one(0x20, Box::new(bus.clone()), Polarity::Inverted)
        .configure()
        .unwrap();
    let mut sink = RecordingSink::default();

    let err = fast_loop().run(&mut profile, &mut sink).unwrap_err();

    assert!(matches!(err, JoystickError::Bus(_)));
    assert_eq!(
        sink.sent(),
        vec![
            (Channel::AbsX, 128),
            (Channel::AbsY, 128),
            (Channel::AbsY, 0),
            (Channel::AbsY, 128),
        ]
    );
}
