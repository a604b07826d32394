#![allow(dead_code)]

use iopi_joystick::hardware::{BusError, PinSource, Port};
use iopi_joystick::input::LogicalButton;
use iopi_joystick::output::{Channel, EventSink, SinkError};
use iopi_joystick::shutdown::ShutdownHook;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum BusCall {
    Direction(Port, u8),
    Pullups(Port, u8),
    Invert(Port, u8),
    Read(u8),
}

#[derive(Default)]
pub struct BusState {
    pub calls: Vec<BusCall>,
    scripts: HashMap<u8, VecDeque<u8>>,
    idle: u8,
    reads_left: Option<usize>,
}

/// In-memory expander; pins not scripted read as `idle`
#[derive(Clone, Default)]
pub struct FakeBus(pub Rc<RefCell<BusState>>);

impl FakeBus {
    pub fn with_idle(idle: u8) -> Self {
        let bus = Self::default();
        bus.0.borrow_mut().idle = idle;
        bus
    }

    /// Raw values for `pin`, one per tick
    pub fn script(&self, pin: LogicalButton, values: &[u8]) {
        self.0
            .borrow_mut()
            .scripts
            .insert(pin.number(), values.iter().copied().collect());
    }

    pub fn fail_after_reads(&self, reads: usize) {
        self.0.borrow_mut().reads_left = Some(reads);
    }

    pub fn calls(&self) -> Vec<BusCall> {
        self.0.borrow().calls.clone()
    }

    pub fn read_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BusCall::Read(_)))
            .count()
    }
}

impl PinSource for FakeBus {
    fn read_pin(&mut self, pin: LogicalButton) -> Result<u8, BusError> {
        let mut state = self.0.borrow_mut();
        if let Some(left) = state.reads_left.as_mut() {
            if *left == 0 {
                return Err(BusError::Unavailable("bus gone".into()));
            }
            *left -= 1;
        }
        state.calls.push(BusCall::Read(pin.number()));
        let idle = state.idle;
        Ok(state
            .scripts
            .get_mut(&pin.number())
            .and_then(|s| s.pop_front())
            .unwrap_or(idle))
    }

    fn set_port_direction(&mut self, port: Port, mask: u8) -> Result<(), BusError> {
        self.0.borrow_mut().calls.push(BusCall::Direction(port, mask));
        Ok(())
    }

    fn set_port_pullups(&mut self, port: Port, mask: u8) -> Result<(), BusError> {
        self.0.borrow_mut().calls.push(BusCall::Pullups(port, mask));
        Ok(())
    }

    fn invert_port(&mut self, port: Port, mask: u8) -> Result<(), BusError> {
        self.0.borrow_mut().calls.push(BusCall::Invert(port, mask));
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SinkRecord {
    Send(Channel, i32),
    Flush,
}

#[derive(Default)]
pub struct RecordingSink {
    pub records: Vec<SinkRecord>,
    pub fail_sends: bool,
}

impl RecordingSink {
    /// Sent values, flush markers dropped
    pub fn sent(&self) -> Vec<(Channel, i32)> {
        self.records
            .iter()
            .filter_map(|r| match r {
                SinkRecord::Send(channel, value) => Some((*channel, *value)),
                SinkRecord::Flush => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn send(&mut self, channel: Channel, value: i32) -> Result<(), SinkError> {
        if self.fail_sends {
            return Err(SinkError::DeviceCreation("device removed".into()));
        }
        self.records.push(SinkRecord::Send(channel, value));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.records.push(SinkRecord::Flush);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct CountingShutdown(pub Rc<Cell<usize>>);

impl CountingShutdown {
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

impl ShutdownHook for CountingShutdown {
    fn request_shutdown(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
