use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;
use waylog_core::*;

#[derive(Parser)]
#[command(name = "waylog")]
#[command(about = "Map-based workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Current position as "lat,lng", overriding the configured one
    #[arg(long, global = true, value_parser = parse_position)]
    position: Option<Coords>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout at a clicked map position
    Log {
        /// Latitude of the map click
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the map click
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Workout type (running or cycling)
        #[arg(long, default_value = "running")]
        kind: WorkoutKind,

        /// Distance in kilometers
        #[arg(long)]
        distance: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<String>,

        /// Cadence in steps per minute (running)
        #[arg(long)]
        cadence: Option<String>,

        /// Elevation gain in meters (cycling)
        #[arg(long)]
        elevation: Option<String>,
    },

    /// Show all logged workouts (default)
    List,

    /// Center the map on a workout
    Goto {
        /// Workout id as shown by `list`
        id: Uuid,
    },

    /// Delete all logged workouts
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    waylog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let position = cli.position.or_else(|| config.geolocation.position());
    tracing::debug!("Using data directory {:?}", data_dir);

    // Wire the terminal surfaces into the controller, then run the
    // start sequence: load stored workouts, geolocate, render.
    let store = FileStore::new(&data_dir);
    let cooldown = Duration::from_millis(config.form.cooldown_ms);
    let mut app = App::new(
        TerminalMap,
        TerminalUi,
        store,
        config.map.zoom,
        cooldown,
    );
    app.start(&FixedGeolocator { position })?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::Log {
            lat,
            lng,
            kind,
            distance,
            duration,
            cadence,
            elevation,
        } => cmd_log(&mut app, lat, lng, kind, distance, duration, cadence, elevation),
        Commands::List => {
            if app.workouts().is_empty() {
                println!("No workouts logged yet.");
            }
            Ok(())
        }
        Commands::Goto { id } => cmd_goto(&mut app, id),
        Commands::Reset { yes } => cmd_reset(&mut app, yes),
    }
}

type TerminalApp = App<TerminalMap, TerminalUi, FileStore>;

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    app: &mut TerminalApp,
    lat: Option<f64>,
    lng: Option<f64>,
    kind: WorkoutKind,
    distance: Option<String>,
    duration: Option<String>,
    cadence: Option<String>,
    elevation: Option<String>,
) -> Result<()> {
    if !app.map_ready() {
        // start() already alerted about the missing position
        eprintln!("Map features are unavailable without a position.");
        return Ok(());
    }

    let lat = resolve_number(lat, "Click latitude")?;
    let lng = resolve_number(lng, "Click longitude")?;

    app.handle(AppEvent::MapClicked(Coords::new(lat, lng)))?;
    if kind == WorkoutKind::Cycling {
        app.handle(AppEvent::TypeChanged(WorkoutKind::Cycling))?;
    }

    let mut fields = FormFields {
        distance: resolve(distance, "Distance (km)")?,
        duration: resolve(duration, "Duration (min)")?,
        ..Default::default()
    };
    match kind {
        WorkoutKind::Running => fields.cadence = resolve(cadence, "Cadence (spm)")?,
        WorkoutKind::Cycling => {
            fields.elevation = resolve(elevation, "Elevation gain (m)")?
        }
    }

    let before = app.workouts().len();
    app.handle(AppEvent::FormSubmitted(fields))?;

    if app.workouts().len() > before {
        println!("\n✓ Workout logged!");
    }
    Ok(())
}

fn cmd_goto(app: &mut TerminalApp, id: Uuid) -> Result<()> {
    if !app.map_ready() {
        eprintln!("Map features are unavailable without a position.");
        return Ok(());
    }
    app.handle(AppEvent::ListEntryClicked(id))
}

fn cmd_reset(app: &mut TerminalApp, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("This deletes all logged workouts. Continue? [y/N]")?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    app.reset()?;
    println!("✓ Workout log cleared");
    Ok(())
}

/// Map drawn as terminal lines
struct TerminalMap;

impl MapService for TerminalMap {
    fn init_view(&mut self, center: Coords, zoom: u8) {
        println!("🗺  Map centered on {center} (zoom {zoom})");
    }

    fn add_marker(&mut self, marker: &Marker) {
        println!("📍 {} at {}", marker.caption, marker.coords);
    }

    fn fly_to(&mut self, coords: Coords, zoom: u8) {
        println!("🗺  Flying to {coords} (zoom {zoom})");
    }
}

/// Form, list, and alert surface on stdout/stderr
struct TerminalUi;

impl Ui for TerminalUi {
    fn show_form(&mut self, kind: WorkoutKind) {
        println!("── New {kind} workout ──");
    }

    fn hide_form(&mut self) {
        // No persistent form on a terminal
    }

    fn push_entry(&mut self, entry: &ListEntry) {
        println!("  {}  [{}]", entry.title, entry.id);
        for row in &entry.rows {
            println!("    {} {} {}", row.icon, row.value, row.unit);
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("⚠ {message}");
    }
}

/// Geolocation from the --position flag or the config file
struct FixedGeolocator {
    position: Option<Coords>,
}

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> Result<Coords> {
        self.position.ok_or_else(|| {
            Error::Geolocation(
                "no position configured; pass --position or set [geolocation] in the config"
                    .into(),
            )
        })
    }
}

fn parse_position(s: &str) -> std::result::Result<Coords, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lng\", got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude: {e}"))?;
    Ok(Coords::new(lat, lng))
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn resolve(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}

fn resolve_number(value: Option<f64>, label: &str) -> Result<f64> {
    let raw = match value {
        Some(value) => return Ok(value),
        None => prompt(label)?,
    };
    raw.parse()
        .map_err(|_| Error::Validation(format!("{label} must be a number, got {raw:?}")))
}
