//! Command-line front end: annotate switching activity from an FST capture
//! and print the result, standing in for the scripted command dispatch of a
//! full timing shell.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fst_activity::{
    ActivityConfig, ActivityOrigin, DEFAULT_CHUNK_SIZE, DesignDb, FstDecoder, PinId, PowerSink,
    SdcClock, annotate_activities,
};
use tracing_subscriber::EnvFilter;

/// Annotate switching activity from an FST waveform capture.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// FST capture to read.
    filename: PathBuf,

    /// Scope whose subtree is annotated; empty selects the first scope.
    #[arg(default_value = "")]
    scope: String,

    /// Variables loaded per decoder pass.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Period in seconds of the fastest constraint clock, when known.
    #[arg(long)]
    clock_period: Option<f64>,

    /// Print one line per annotated pin: name, activity, duty.
    #[arg(long)]
    table: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error [{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> fst_activity::Result<()> {
    let mut decoder = FstDecoder::open(&args.filename)?;
    let network = OpenNetwork::new(args.clock_period);
    let mut sink = RecordingSink::default();
    let config = ActivityConfig {
        scope: args.scope.clone(),
        chunk_size: args.chunk_size,
    };
    let report = annotate_activities(&mut decoder, &network, &mut sink, &config)?;

    if args.table {
        for &(pin, activity, duty) in &sink.rows {
            if let Some(name) = network.pin_name(pin) {
                println!("{name}\t{activity:.6}\t{duty:.6}");
            }
        }
    }
    println!(
        "annotated {} pin activities ({} variables in scope)",
        report.annotated_pins, report.variables
    );
    Ok(())
}

/// Open-admission stand-in for a timing design database: every net name
/// resolves to a pin, so the tool can report activities without a design
/// loaded. Clock metadata comes from `--clock-period`.
struct OpenNetwork {
    clocks: Vec<SdcClock>,
    pins: RefCell<HashMap<String, PinId>>,
}

impl OpenNetwork {
    fn new(clock_period: Option<f64>) -> Self {
        let clocks = clock_period
            .map(|period| {
                vec![SdcClock {
                    name: "clk".into(),
                    period,
                }]
            })
            .unwrap_or_default();
        Self {
            clocks,
            pins: RefCell::new(HashMap::new()),
        }
    }

    fn pin_name(&self, pin: PinId) -> Option<String> {
        self.pins
            .borrow()
            .iter()
            .find_map(|(name, &id)| (id == pin).then(|| name.clone()))
    }
}

impl DesignDb for OpenNetwork {
    fn clocks(&self) -> &[SdcClock] {
        &self.clocks
    }

    fn find_pin(&self, name: &str) -> Option<PinId> {
        let mut pins = self.pins.borrow_mut();
        let next = PinId(pins.len() as u64);
        Some(*pins.entry(name.to_string()).or_insert(next))
    }

    fn is_leaf_pin_clock(&self, _pin: PinId) -> bool {
        false
    }

    fn leaf_pin_clocks(&self, _pin: PinId) -> Vec<&SdcClock> {
        Vec::new()
    }
}

#[derive(Default)]
struct RecordingSink {
    rows: Vec<(PinId, f64, f64)>,
}

impl PowerSink for RecordingSink {
    fn set_user_activity(&mut self, pin: PinId, activity: f64, duty: f64, _origin: ActivityOrigin) {
        self.rows.push((pin, activity, duty));
    }
}
