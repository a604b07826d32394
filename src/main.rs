use argh::FromArgs;
use color_eyre::{eyre::eyre, Result};
use iopi_joystick::config::Config;
use iopi_joystick::hardware::IoPiBus;
use iopi_joystick::input::{InputProfile, Player, PollLoop};
use iopi_joystick::output::EventSink;
use iopi_joystick::shutdown::{DebugShutdown, PowerOff, ShutdownHook};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(FromArgs)]
/// Runs a uinput joystick from IO Pi Plus I2C inputs.
struct Args {
    /// player number of the joystick (1 or 2)
    #[argh(option, short = 'p')]
    player: Player,

    /// path to a TOML config file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// verbose logging, the power button only prints a message
    #[argh(switch, short = 'd')]
    debug: bool,
}

fn main() -> Result<()> {
    setup()?;
    let args: Args = argh::from_env();

    let (mut config, source) = Config::load(args.config.as_deref())?;
    if args.debug {
        config.debug = true;
    }
    setup_logging_env(config.debug);
    match source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!(
            "No config at {}, using defaults",
            iopi_joystick::config::default_path().display()
        ),
    }
    debug!("Running with {:?}", config);

    let player = args.player;
    let address = config.bus_address(player);
    let polarity = config.polarity();
    info!(
        "Starting player {} joystick on bus {:#04x}",
        player.number(),
        address
    );

    let mut sink = create_sink(&config)?;

    let bus = Box::new(IoPiBus::open(address)?);
    let profile = match player {
        Player::One => InputProfile::player_one(address, bus, polarity),
        Player::Two => InputProfile::player_two(address, bus, polarity, shutdown_hook(&config)?),
    };
    let mut profile = profile.configure()?;

    let poll_loop = PollLoop::new(config.poll_interval());
    match poll_loop.run(&mut profile, sink.as_mut())? {}
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn setup_logging_env(debug: bool) {
    FmtSubscriber::builder()
        .with_max_level(if debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

fn shutdown_hook(config: &Config) -> Result<Box<dyn ShutdownHook>> {
    if config.debug {
        return Ok(Box::new(DebugShutdown));
    }
    let hook = PowerOff::from_command(&config.shutdown_command)
        .ok_or_else(|| eyre!("shutdown_command is empty"))?;
    Ok(Box::new(hook))
}

#[cfg(feature = "uinput")]
fn create_sink(config: &Config) -> Result<Box<dyn EventSink>> {
    let sink = iopi_joystick::output::UinputSink::create(&config.device_name)?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "uinput"))]
fn create_sink(config: &Config) -> Result<Box<dyn EventSink>> {
    tracing::warn!(
        "Built without the uinput feature, '{}' events are only logged",
        config.device_name
    );
    Ok(Box::new(iopi_joystick::output::LogSink::new()))
}
