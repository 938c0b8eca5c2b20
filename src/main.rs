use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use openstrike_rs::report;
use openstrike_rs::{
    load_reference, EngineHandle, EstimationInput, EstimationResult, Estimator, ReferenceData,
};

#[derive(Parser, Debug)]
#[command(name = "openstrike-rs")]
#[command(about = "Golf Strike Quality Estimator", long_about = None)]
struct Args {
    /// Reference data document (file path or http(s) URL)
    #[arg(short, long, default_value = "data/golfdata.json")]
    data: String,

    /// Club key (see --list-clubs)
    #[arg(short, long)]
    club: Option<String>,

    /// Swing speed in mph (clamped to 60-130)
    #[arg(short, long)]
    swing_speed: Option<f64>,

    /// Measured carry in yards
    #[arg(short = 'y', long)]
    carry: Option<f64>,

    /// Static loft override in degrees (defaults to the club's standard loft)
    #[arg(short, long)]
    loft: Option<f64>,

    /// List available clubs and exit
    #[arg(long)]
    list_clubs: bool,

    /// Read "club speed carry [loft]" lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Emit results as JSON instead of a text report
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("{}", "=".repeat(50));
    println!("  OpenStrike - Golf Strike Quality Estimator");
    println!(
        "  Session started {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("{}", "=".repeat(50));
    println!();

    // One-time startup fetch; the engine stays gated until it lands.
    let engine = EngineHandle::new();
    let runtime = tokio::runtime::Runtime::new()?;
    let data = runtime
        .block_on(load_reference(&args.data))
        .with_context(|| format!("Failed to load reference data from {}", args.data))?;

    if args.list_clubs {
        list_clubs(&data);
        return Ok(());
    }

    engine.install(Estimator::new(data));

    if args.interactive {
        return run_interactive(&engine, args.json);
    }

    match (args.club, args.swing_speed, args.carry) {
        (Some(club), Some(swing_speed), Some(actual_carry)) => {
            let input = EstimationInput {
                club,
                swing_speed,
                static_loft: args.loft,
                actual_carry,
            };
            let result = engine.estimate(&input)?;
            emit_result(&result, args.json);
            Ok(())
        }
        _ => bail!(
            "Provide --club, --swing-speed and --carry for a single calculation, \
             or use --interactive / --list-clubs"
        ),
    }
}

fn list_clubs(data: &ReferenceData) {
    println!("Available clubs:");
    for (key, profile) in data.clubs() {
        println!(
            "  {:<8} {:<16} {:>5.1} deg  scratch {:>5.1} mph",
            key, profile.name, profile.loft, profile.swing_speed
        );
    }
}

fn run_interactive(engine: &EngineHandle, json: bool) -> Result<()> {
    println!("Enter shots as: <club> <swing speed mph> <carry yards> [static loft deg]");
    println!("Press Ctrl+C to stop");
    println!();

    // Reader thread feeds lines over a channel so Ctrl+C stays responsive.
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lines() {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    loop {
        if stop_rx.try_recv().is_ok() {
            println!();
            println!("Stopping...");
            break;
        }

        match line_rx.try_recv() {
            Ok(Ok(line)) => handle_line(engine, &line, json),
            Ok(Err(e)) => {
                log::warn!("Error reading stdin: {}", e);
                break;
            }
            Err(mpsc::TryRecvError::Empty) => thread::sleep(Duration::from_millis(10)),
            Err(mpsc::TryRecvError::Disconnected) => break,
        }
    }

    Ok(())
}

fn handle_line(engine: &EngineHandle, line: &str, json: bool) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let mut parts = line.split_whitespace();
    let club = match parts.next() {
        Some(club) => club.to_string(),
        None => return,
    };
    let numbers: Result<Vec<f64>, _> = parts.map(str::parse).collect();
    let numbers = match numbers {
        Ok(numbers) if numbers.len() == 2 || numbers.len() == 3 => numbers,
        _ => {
            println!("Please enter valid numbers in all fields.");
            return;
        }
    };

    let input = EstimationInput {
        club,
        swing_speed: numbers[0],
        actual_carry: numbers[1],
        static_loft: numbers.get(2).copied(),
    };

    match engine.estimate(&input) {
        Ok(result) => emit_result(&result, json),
        Err(e) => println!("{}", e),
    }
}

fn emit_result(result: &EstimationResult, json: bool) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(text) => println!("{}", text),
            Err(e) => log::warn!("Failed to serialize result: {}", e),
        }
    } else {
        print!("{}", report::render(result));
    }
}
