//! In-memory description of one loaded capture.

use std::collections::HashMap;

use crate::decoder::VarHandle;
use crate::types::{Timescale, VarKind, VarValue};

/// A named container of variables, corresponding to a module or instance in
/// the simulated design hierarchy.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Opaque scope kind as stored in the container.
    pub kind: u8,
    /// Declared scope name.
    pub name: String,
    /// Component annotation (often the module definition name).
    pub component: String,
    /// Variables declared directly inside this scope, in declaration order.
    pub vars: Vec<Variable>,
}

/// A declared variable of the capture.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Opaque variable kind as stored in the container.
    pub kind: u8,
    /// Identifier prefixed with the full ancestor scope path, so homonymous
    /// signals in sibling scopes stay distinct.
    pub name: String,
    /// Declared width in bits, at least 1.
    pub length: u32,
    /// Decoder-assigned handle.
    pub handle: VarHandle,
    /// Whether this declaration aliases another variable's value stream.
    pub is_alias: bool,
}

impl Variable {
    /// Returns `true` if this variable's kind contributes switching activity.
    pub fn is_net(&self) -> bool {
        VarKind::is_net(self.kind)
    }
}

/// One loaded capture: header metadata, the flattened variable list of the
/// selected subtree, and the per-variable value cache.
///
/// The variable list is constructed once and read-only afterwards; the value
/// cache is filled and evicted many times while chunks are processed. There
/// is exactly one writer by construction, so no locking.
#[derive(Debug, Default)]
pub struct Capture {
    date: String,
    version: String,
    timescale: Timescale,
    start_time: u64,
    end_time: u64,
    vars: Vec<Variable>,
    values: HashMap<VarHandle, Vec<VarValue>>,
}

impl Capture {
    /// Creates an empty capture with a unit timescale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the producer date string.
    pub fn set_date(&mut self, date: String) {
        self.date = date;
    }

    /// Records the producer version string.
    pub fn set_version(&mut self, version: String) {
        self.version = version;
    }

    /// Records the decoded timescale.
    pub fn set_timescale(&mut self, timescale: Timescale) {
        self.timescale = timescale;
    }

    /// Records the first timestamp of the capture.
    pub fn set_start_time(&mut self, time: u64) {
        self.start_time = time;
    }

    /// Records the last timestamp of the capture.
    pub fn set_end_time(&mut self, time: u64) {
        self.end_time = time;
    }

    /// Installs the flattened variable list. Called once by the loader.
    pub fn set_vars(&mut self, vars: Vec<Variable>) {
        self.vars = vars;
    }

    /// Producer date string.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Producer version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Decoded timescale.
    pub fn timescale(&self) -> Timescale {
        self.timescale
    }

    /// First timestamp, in ticks.
    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Last timestamp, in ticks.
    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    /// Seconds per integer time step.
    pub fn time_scale(&self) -> f64 {
        self.timescale.seconds_per_tick()
    }

    /// Flattened variable list of the selected subtree.
    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    /// Mutable value stream for a handle, allocating an empty stream on
    /// first touch.
    pub fn values_for(&mut self, handle: VarHandle) -> &mut Vec<VarValue> {
        self.values.entry(handle).or_default()
    }

    /// Appends a value to the variable's stream. Values arrive in
    /// non-decreasing time order per handle.
    pub fn insert_value(&mut self, handle: VarHandle, value: VarValue) {
        self.values_for(handle).push(value);
    }

    /// Currently cached values for a handle; empty when none are resident.
    pub fn values_of(&self, handle: VarHandle) -> &[VarValue] {
        self.values.get(&handle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drops every cached value stream. Called after each processed chunk to
    /// keep the resident set bounded to one chunk.
    pub fn clear_values(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_cache_allocates_on_first_touch_and_clears() {
        let mut capture = Capture::new();
        let handle = VarHandle(3);
        assert!(capture.values_of(handle).is_empty());

        capture.insert_value(handle, VarValue::new(0, "0"));
        capture.insert_value(handle, VarValue::new(5, "1"));
        assert_eq!(capture.values_of(handle).len(), 2);

        capture.clear_values();
        assert!(capture.values_of(handle).is_empty());
    }

    #[test]
    fn net_classification_follows_kind() {
        let wire = Variable {
            kind: VarKind::Wire.into(),
            name: "top/a".into(),
            length: 1,
            handle: VarHandle(1),
            is_alias: false,
        };
        let param = Variable {
            kind: VarKind::Parameter.into(),
            ..wire.clone()
        };
        assert!(wire.is_net());
        assert!(!param.is_net());
    }
}
