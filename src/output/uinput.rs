//! uinput backed gamepad

use evdev_rs::enums::{EventCode, EV_ABS, EV_KEY, EV_SYN};
use evdev_rs::{DeviceWrapper as _, InputEvent, TimeVal, UInputDevice, UninitDevice};
use tracing::{debug, info};

use super::{
    Channel, EventSink, SinkError, JOYSTICK_LEFT_VALUE, JOYSTICK_NEUTRAL_VALUE,
    JOYSTICK_RIGHT_VALUE,
};

const BUS_USB: u16 = 0x03;

const STICK_ABSINFO: libc::input_absinfo = libc::input_absinfo {
    value: JOYSTICK_NEUTRAL_VALUE,
    minimum: JOYSTICK_LEFT_VALUE,
    maximum: JOYSTICK_RIGHT_VALUE,
    fuzz: 0,
    flat: 0,
    resolution: 0,
};

pub struct UinputSink {
    device: UInputDevice,
}

impl UinputSink {
    /// Creates the virtual gamepad with every channel in [`Channel::ALL`]
    pub fn create(name: &str) -> Result<Self, SinkError> {
        let uninit = UninitDevice::new()
            .ok_or_else(|| SinkError::DeviceCreation("libevdev allocation failed".into()))?;
        uninit.set_name(name);
        uninit.set_bustype(BUS_USB);

        for channel in Channel::ALL {
            let code = event_code(channel);
            if channel.is_axis() {
                uninit.enable_event_code(&code, Some(&STICK_ABSINFO))?;
            } else {
                uninit.enable_event_code(&code, None)?;
            }
            debug!("Enabled {:?}", code);
        }

        let device = UInputDevice::create_from_device(&uninit)?;
        info!("Created virtual gamepad '{}'", name);
        Ok(Self { device })
    }

    fn write(&self, event_code: EventCode, value: i32) -> Result<(), SinkError> {
        self.device.write_event(&InputEvent {
            event_code,
            value,
            time: TimeVal {
                tv_sec: 0,
                tv_usec: 0,
            },
        })?;
        Ok(())
    }
}

impl EventSink for UinputSink {
    fn send(&mut self, channel: Channel, value: i32) -> Result<(), SinkError> {
        self.write(event_code(channel), value)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.write(EventCode::EV_SYN(EV_SYN::SYN_REPORT), 0)
    }
}

fn event_code(channel: Channel) -> EventCode {
    match channel {
        Channel::AbsX => EventCode::EV_ABS(EV_ABS::ABS_X),
        Channel::AbsY => EventCode::EV_ABS(EV_ABS::ABS_Y),
        Channel::BtnThumbL => EventCode::EV_KEY(EV_KEY::BTN_THUMBL),
        Channel::BtnThumbR => EventCode::EV_KEY(EV_KEY::BTN_THUMBR),
        // BTN_A/B/X/Y share codes with the compass names
        Channel::BtnA => EventCode::EV_KEY(EV_KEY::BTN_SOUTH),
        Channel::BtnB => EventCode::EV_KEY(EV_KEY::BTN_EAST),
        Channel::BtnX => EventCode::EV_KEY(EV_KEY::BTN_NORTH),
        Channel::BtnY => EventCode::EV_KEY(EV_KEY::BTN_WEST),
        Channel::BtnC => EventCode::EV_KEY(EV_KEY::BTN_C),
        Channel::BtnZ => EventCode::EV_KEY(EV_KEY::BTN_Z),
        Channel::BtnStart => EventCode::EV_KEY(EV_KEY::BTN_START),
        Channel::BtnBack => EventCode::EV_KEY(EV_KEY::BTN_BACK),
        Channel::BtnForward => EventCode::EV_KEY(EV_KEY::BTN_FORWARD),
        Channel::BtnSelect => EventCode::EV_KEY(EV_KEY::BTN_SELECT),
    }
}
