//! wired-runner: headless front end for the wired logic engine.
//!
//! Usage:
//!   wired-runner --width 64 --height 64 --ticks 100
//!   wired-runner --config wired.json --realtime circuit.json
//!   wired-runner --ipc-mode circuit.json

use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use wired_core::{
    config::SimConfig,
    engine::SimEngine,
    event::SimEvent,
    grid::Grid,
    snapshot::SnapshotState,
    types::{Material, Point, Tick},
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick {
        count: u64,
    },
    Toggle {
        x: u32,
        y: u32,
        #[serde(default)]
        material: Material,
    },
    Seed {
        x:      u32,
        y:      u32,
        charge: u8,
    },
    Pause,
    Resume,
    Reset,
    Save {
        #[serde(default)]
        path: Option<String>,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    tick:     Tick,
    paused:   bool,
    wires:    usize,
    edges:    usize,
    snapshot: SnapshotState,
    events:   Vec<SimEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match find_arg(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    config.width = parse_arg(&args, "--width", config.width);
    config.height = parse_arg(&args, "--height", config.height);
    config.palette_depth = parse_arg(&args, "--palette-depth", config.palette_depth);
    config.materials = parse_arg(&args, "--materials", config.materials);
    config.ticks_per_second = parse_arg(&args, "--speed", config.ticks_per_second);
    let ticks = parse_arg(&args, "--ticks", 100u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");
    let grid_path = positional(&args);

    let mut engine = match grid_path {
        Some(path) => {
            let grid = load_grid(path)?;
            SimEngine::new(grid, config.ticks_per_second)?
        }
        None => SimEngine::from_config(&config)?,
    };

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
        return Ok(());
    }

    println!("wired-runner: Wired Logic");
    println!("  grid:      {}", grid_path.unwrap_or("(empty)"));
    println!("  size:      {}x{}", engine.grid().width(), engine.grid().height());
    println!("  max charge:{:>3}", engine.circuit().palette().max_charge());
    println!("  speed:     {} ticks/s{}", engine.clock.ticks_per_second, if realtime { "" } else { " (unpaced)" });
    println!("  ticks:     {ticks}");
    println!();

    if realtime {
        let interval = engine.clock.tick_interval();
        for _ in 0..ticks {
            engine.tick()?;
            std::thread::sleep(interval);
        }
    } else {
        engine.run_ticks(ticks)?;
    }
    print_summary(&engine);
    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };
        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        match handle_command(engine, cmd) {
            Ok(events) => {
                let state = build_ui_state(engine, events);
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            Err(e) => write_error(&mut stdout, &format!("{e:#}"))?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(engine: &mut SimEngine, cmd: IpcCommand) -> Result<Vec<SimEvent>> {
    let events = match cmd {
        IpcCommand::GetState | IpcCommand::Quit => vec![],
        IpcCommand::Tick { count } => engine.run_ticks(count)?,
        IpcCommand::Toggle { x, y, material } => engine.toggle_material(Point::new(x, y), material)?,
        IpcCommand::Seed { x, y, charge } => vec![engine.seed(Point::new(x, y), charge)?],
        IpcCommand::Pause => {
            engine.pause();
            vec![]
        }
        IpcCommand::Resume => {
            engine.resume();
            vec![]
        }
        IpcCommand::Reset => engine.reset()?,
        IpcCommand::Save { path } => {
            let path = path.unwrap_or_else(|| {
                format!("simulation-{}.json", chrono::Utc::now().timestamp())
            });
            save_grid(engine.grid(), &path)?;
            log::info!("saved grid to {path}");
            vec![]
        }
    };
    for event in &events {
        log::debug!("{}: {:?}", event.name(), event);
    }
    Ok(events)
}

fn build_ui_state(engine: &SimEngine, events: Vec<SimEvent>) -> UiState {
    UiState {
        tick:     engine.clock.current_tick,
        paused:   engine.clock.paused,
        wires:    engine.circuit().len(),
        edges:    engine.circuit().edge_count(),
        snapshot: engine.snapshot().state(),
        events,
    }
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(engine: &SimEngine) {
    let circuit = engine.circuit();
    let snapshot = engine.snapshot();
    let conductive = engine.grid().conductive_count();
    let isolated = circuit
        .wires()
        .iter()
        .filter(|w| circuit.neighbours(w.id()).is_empty())
        .count();

    println!("=== RUN SUMMARY ===");
    println!("  final tick:     {}", engine.clock.current_tick);
    println!("  conductive px:  {conductive}");
    println!("  wires:          {}", circuit.len());
    println!("  isolated wires: {isolated}");
    println!("  edges:          {}", circuit.edge_count());
    println!("  charged wires:  {}", snapshot.charged_count());
}

fn load_grid(path: &str) -> Result<Grid> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    let grid = serde_json::from_str(&content).with_context(|| format!("Cannot parse {path}"))?;
    Ok(grid)
}

fn save_grid(grid: &Grid, path: &str) -> Result<()> {
    let json = serde_json::to_string(grid)?;
    std::fs::write(path, json).with_context(|| format!("Cannot write {path}"))?;
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// The first argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    const VALUED: [&str; 7] = [
        "--config",
        "--width",
        "--height",
        "--palette-depth",
        "--materials",
        "--speed",
        "--ticks",
    ];
    let mut skip_next = true; // program name
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUED.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            return Some(arg);
        }
    }
    None
}
