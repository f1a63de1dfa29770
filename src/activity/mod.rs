//! Reduction of value streams to per-pin activity annotations.
//!
//! The computer walks the capture's flattened variable list in fixed-size
//! chunks: load one chunk's value streams, process every variable in it,
//! evict, advance. Only one chunk's streams are ever resident — captures
//! carry millions of changes per signal across tens of thousands of signals,
//! so chunking is part of the contract, not an optimization.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::capture::Capture;
use crate::decoder::Decoder;
use crate::error::Result;
use crate::hierarchy::read_hierarchy;
use crate::sta::{ActivityOrigin, DesignDb, PinId, PowerSink};
use crate::types::VarValue;
use crate::values::{read_values_for, read_values_for_chunk};

mod bus;
pub use bus::{BusName, parse_bus_name};

/// Number of variables whose value streams are loaded per decoder pass.
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Parameters of one annotation run.
#[derive(Debug, Clone)]
pub struct ActivityConfig {
    /// Scope whose subtree is annotated. Empty selects the first scope seen.
    pub scope: String,
    /// Variables per chunk; clamped to at least 1.
    pub chunk_size: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            scope: String::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ActivityConfig {
    /// Config selecting `scope` with the default chunk size.
    pub fn for_scope(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            ..Self::default()
        }
    }
}

/// Summary of one annotation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityReport {
    /// Number of distinct pins that received an annotation.
    pub annotated_pins: usize,
    /// Number of variables in the selected subtree.
    pub variables: usize,
}

/// Loads the capture's hierarchy, streams value changes chunk by chunk, and
/// deposits `(pin, activity, duty)` annotations into `power`.
///
/// A capture whose end time is zero holds no simulation content; the value
/// pass is skipped with a warning and the run still succeeds.
pub fn annotate_activities<D: Decoder, N: DesignDb, P: PowerSink>(
    decoder: &mut D,
    network: &N,
    power: &mut P,
    config: &ActivityConfig,
) -> Result<ActivityReport> {
    debug!(scope = %config.scope, "reading capture hierarchy");
    let mut capture = read_hierarchy(decoder, &config.scope)?;

    let clk_period = network
        .clocks()
        .iter()
        .map(|clock| clock.period)
        .fold(f64::INFINITY, f64::min);
    debug!(clk_period, "fastest constraint clock period");

    let mut annotator = PinAnnotator {
        network,
        power,
        scope: &config.scope,
        clk_period,
        end_time: capture.end_time(),
        time_scale: capture.time_scale(),
        annotated: HashSet::new(),
    };

    if capture.end_time() > 0 {
        set_activities(decoder, &mut capture, &mut annotator, config.chunk_size)?;
    } else {
        warn!(code = 7784, "capture end time is zero; no activities annotated");
    }

    let annotated_pins = annotator.annotated.len();
    info!(annotated_pins, "annotated pin activities");
    Ok(ActivityReport {
        annotated_pins,
        variables: capture.vars().len(),
    })
}

fn set_activities<D: Decoder, N: DesignDb, P: PowerSink>(
    decoder: &mut D,
    capture: &mut Capture,
    annotator: &mut PinAnnotator<'_, N, P>,
    chunk_size: usize,
) -> Result<()> {
    let total = capture.vars().len();
    let chunk = chunk_size.max(1);
    info!(total, chunk, "setting activities");

    let mut index = 0;
    while index + chunk <= total {
        read_values_for_chunk(decoder, capture, index..index + chunk)?;
        for i in index..index + chunk {
            annotator.process_var(capture, i);
        }
        capture.clear_values();
        index += chunk;
    }
    // Trailing variables past the last whole chunk, one decoder pass each.
    for i in index..total {
        read_values_for(decoder, capture, i)?;
        annotator.process_var(capture, i);
    }
    Ok(())
}

struct PinAnnotator<'a, N, P> {
    network: &'a N,
    power: &'a mut P,
    scope: &'a str,
    clk_period: f64,
    end_time: u64,
    time_scale: f64,
    annotated: HashSet<PinId>,
}

impl<N: DesignDb, P: PowerSink> PinAnnotator<'_, N, P> {
    fn process_var(&mut self, capture: &Capture, index: usize) {
        let var = &capture.vars()[index];
        if !var.is_net() {
            return;
        }

        // The variable name carries the full hierarchy path; the database
        // addresses pins relative to the annotated scope.
        let mut name = var.name.clone();
        if !self.scope.is_empty() {
            if let Some(stripped) = name
                .strip_prefix(self.scope)
                .and_then(|rest| rest.strip_prefix('/'))
            {
                name = stripped.to_string();
            }
        }

        let values = capture.values_of(var.handle);
        if values.is_empty() {
            debug!(var = %var.name, "no recorded values");
            return;
        }

        if var.length == 1 {
            let sta_name = self.network.sta_net_name(&name);
            self.set_pin_activity(&sta_name, values, 0);
        } else {
            // The decoder separates a bus name from its range with a space.
            if let Some(space) = name.find(' ') {
                name.remove(space);
            }
            match parse_bus_name(&name, '[', ']', '\\') {
                Some(bus) if !bus.subscript_wild => {
                    let sta_bus = self.network.sta_net_name(&bus.base);
                    debug!(bus = %sta_bus, from = bus.from, to = bus.to, "decomposing bus");
                    let (from, to) = (bus.from.min(bus.to), bus.from.max(bus.to));
                    for (value_bit, hw_bit) in (from..=to).enumerate() {
                        let pin_name = format!("{sta_bus}[{hw_bit}]");
                        self.set_pin_activity(&pin_name, values, value_bit);
                    }
                }
                _ => warn!(code = 7791, name = %name, "problem parsing bus name"),
            }
        }
    }

    fn set_pin_activity(&mut self, pin_name: &str, values: &[VarValue], bit: usize) {
        let Some(pin) = self.network.find_pin(pin_name) else {
            debug!(pin = pin_name, "pin not present in timing network");
            return;
        };
        let reduced = reduce_activity(values, bit, self.end_time, self.time_scale, self.clk_period);
        debug!(
            pin = pin_name,
            transitions = reduced.transitions,
            activity = reduced.activity,
            duty = reduced.duty,
            "annotating pin"
        );
        if self.network.is_leaf_pin_clock(pin) {
            self.check_clock_period(pin, reduced.transitions);
        }
        self.power
            .set_user_activity(pin, reduced.activity, reduced.duty, ActivityOrigin::Fst);
        self.annotated.insert(pin);
    }

    fn check_clock_period(&self, pin: PinId, transitions: f64) {
        // Full-cycle duration assuming two transitions per cycle.
        let sim_period = self.end_time as f64 * self.time_scale / (transitions / 2.0);
        for clock in self.network.leaf_pin_clocks(pin) {
            if ((clock.period - sim_period) / clock.period).abs() > 0.1 {
                warn!(
                    code = 7793,
                    clock = %clock.name,
                    sim_period,
                    sdc_period = clock.period,
                    "capture clock period deviates from SDC clock period"
                );
            }
        }
    }
}

struct Reduction {
    transitions: f64,
    activity: f64,
    duty: f64,
}

/// Reduces one bit of a time-ordered value stream to its three metrics.
///
/// A transition with an unknown or high-impedance endpoint may or may not
/// have happened in the real design; it credits half a transition.
fn reduce_activity(
    values: &[VarValue],
    bit: usize,
    end_time: u64,
    time_scale: f64,
    clk_period: f64,
) -> Reduction {
    let mut transitions = 0f64;
    let mut prev_value = values[0].bit(bit);
    let mut prev_time = values[0].time;
    let mut high_time = 0u64;

    for value in values {
        let current = value.bit(bit);
        if prev_value == b'1' {
            high_time += value.time.saturating_sub(prev_time);
        }
        if current != prev_value {
            transitions += if is_unknown(current) || is_unknown(prev_value) {
                0.5
            } else {
                1.0
            };
        }
        prev_time = value.time;
        prev_value = current;
    }
    if prev_value == b'1' {
        high_time += end_time.saturating_sub(prev_time);
    }

    let duty = high_time as f64 / end_time as f64;
    // With no constraint clock the period is infinite; the documented limit
    // for the normalization is zero activity.
    let activity = if clk_period.is_finite() {
        transitions / (end_time as f64 * time_scale / clk_period)
    } else {
        0.0
    };
    Reduction {
        transitions,
        activity,
        duty,
    }
}

fn is_unknown(bit: u8) -> bool {
    matches!(bit, b'X' | b'Z')
}
