//! gpxwalker cli - walk a simulated device along a recorded route

use std::io;

use argopt::cmd;

use gpxwalker::playback::report_duration;
use gpxwalker::{
    Compiler, DeviceControl, LocalClock, Playback, Properties, RouteLibrary, Session, Settings,
    ThreadSleep, TimezoneLookup,
};

/// Route walked when none is given
const DEFAULT_ROUTE: &str = "loop";

/// CLI of gpxwalker - Send the points of a route, one by one and forever, to
/// the device control service
#[cmd]
fn main(
    /// Route name, looked up as <routes_dir>/<route>.xml, .gpx or .csv
    route: Option<String>,
    /// Properties file. Default: walker.properties, .walker.yaml, ~/.walker.yaml
    #[opt(long)]
    config: Option<String>,
    /// Debug logging
    #[opt(short, long)]
    verbose: bool,
) -> Result<(), String> {
    init_logging(verbose);

    let props = Properties::discover(config.as_deref()).map_err(|e| e.to_string())?;
    let settings = Settings::from(&props);

    let route = route.unwrap_or_else(|| DEFAULT_ROUTE.to_string());
    let waypoints = RouteLibrary::new(&settings.routes_dir)
        .load(&route)
        .map_err(|e| format!("Failed on load the route: {}", e))?;

    let mut compiler = Compiler::new();
    compiler.speed(settings.speed);
    let instructions = compiler
        .build(&waypoints)
        .map_err(|e| format!("Failed on compile the route `{}`: {}", route, e))?;

    report_duration(&mut io::stdout(), &instructions).map_err(|e| e.to_string())?;

    let zone = TimezoneLookup::new(
        &settings.timezone_url,
        settings.timezone_api_key.clone(),
        settings.timeout,
    )
    .resolve(instructions[0].coordinates);
    let clock = LocalClock::new(zone.as_deref());
    log::info!("timezone: {}", clock.zone_name().unwrap_or("system"));

    let control = DeviceControl::new(&settings.server, settings.timeout)
        .map_err(|e| e.to_string())?;
    let device_id = control.resolve_device().map_err(|e| e.to_string())?;

    let session = Session {
        instructions,
        device_id,
        clock,
        speed: compiler.speed,
    };

    Playback::new(session, control, ThreadSleep, io::stdout())
        .map_err(|e| e.to_string())?
        .run()
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();

    // Only fails when a logger is already set
    let _ = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}
