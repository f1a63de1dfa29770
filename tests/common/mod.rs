#![allow(dead_code)]

//! Scripted collaborators shared by the integration tests: a decoder that
//! replays a fixed hierarchy and value-change script, a table-backed design
//! database, and a recording power sink.

use std::collections::HashMap;

use fst_activity::{
    ActivityOrigin, Decoder, DesignDb, HierEvent, PinId, PowerSink, Result, SdcClock, VarHandle,
    VarKind,
};

/// Replays a fixed script through the [`Decoder`] interface.
pub struct ScriptedDecoder {
    pub start_time: u64,
    pub end_time: u64,
    pub timescale_magnitude: i8,
    pub version: String,
    pub date: String,
    pub events: Vec<HierEvent>,
    /// `(time, handle, raw bits)` in non-decreasing time order, bits stored
    /// the way the container presents them: most-significant first.
    pub changes: Vec<(u64, VarHandle, Vec<u8>)>,
}

impl ScriptedDecoder {
    pub fn new(end_time: u64, events: Vec<HierEvent>) -> Self {
        Self {
            start_time: 0,
            end_time,
            timescale_magnitude: 0,
            version: "scripted".into(),
            date: "today".into(),
            events,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(mut self, changes: Vec<(u64, VarHandle, Vec<u8>)>) -> Self {
        self.changes = changes;
        self
    }

    pub fn with_timescale(mut self, magnitude: i8) -> Self {
        self.timescale_magnitude = magnitude;
        self
    }
}

impl Decoder for ScriptedDecoder {
    fn start_time(&self) -> u64 {
        self.start_time
    }

    fn end_time(&self) -> u64 {
        self.end_time
    }

    fn timescale_magnitude(&self) -> i8 {
        self.timescale_magnitude
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn var_count(&self) -> u64 {
        self.events
            .iter()
            .filter(|event| matches!(event, HierEvent::VarDecl { .. }))
            .count() as u64
    }

    fn for_each_hier_event(&mut self, visit: &mut dyn FnMut(HierEvent)) -> Result<()> {
        for event in &self.events {
            visit(event.clone());
        }
        Ok(())
    }

    fn for_each_value_change(
        &mut self,
        selection: &[VarHandle],
        visit: &mut dyn FnMut(u64, VarHandle, &[u8]),
    ) -> Result<()> {
        for (time, handle, raw) in &self.changes {
            if selection.contains(handle) {
                visit(*time, *handle, raw);
            }
        }
        Ok(())
    }
}

/// Event builders keeping test hierarchies terse.
pub fn scope(name: &str) -> HierEvent {
    HierEvent::ScopeBegin {
        kind: 0,
        name: name.into(),
        component: String::new(),
    }
}

pub fn upscope() -> HierEvent {
    HierEvent::ScopeEnd
}

pub fn wire(name: &str, handle: u32) -> HierEvent {
    var(VarKind::Wire, name, 1, handle)
}

pub fn reg(name: &str, handle: u32) -> HierEvent {
    var(VarKind::Reg, name, 1, handle)
}

pub fn var(kind: VarKind, name: &str, length: u32, handle: u32) -> HierEvent {
    HierEvent::VarDecl {
        kind: kind.into(),
        name: name.into(),
        length,
        handle: VarHandle(handle),
        is_alias: false,
    }
}

/// Table-backed design database for tests.
#[derive(Default)]
pub struct TableNetwork {
    clocks: Vec<SdcClock>,
    pins: HashMap<String, PinId>,
    clock_pins: HashMap<PinId, Vec<usize>>,
}

impl TableNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers pins under consecutive ids.
    pub fn with_pins(mut self, names: &[&str]) -> Self {
        for name in names {
            let id = PinId(self.pins.len() as u64);
            self.pins.insert((*name).to_string(), id);
        }
        self
    }

    /// Maps an extra name onto an already-registered pin.
    pub fn alias_pin(mut self, name: &str, existing: &str) -> Self {
        let id = self.pins[existing];
        self.pins.insert(name.to_string(), id);
        self
    }

    pub fn with_clock(mut self, name: &str, period: f64) -> Self {
        self.clocks.push(SdcClock {
            name: name.into(),
            period,
        });
        self
    }

    /// Marks a pin as a leaf pin of the clock at `clock_index`.
    pub fn bind_clock_pin(mut self, pin_name: &str, clock_index: usize) -> Self {
        let id = self.pins[pin_name];
        self.clock_pins.entry(id).or_default().push(clock_index);
        self
    }

    pub fn pin(&self, name: &str) -> PinId {
        self.pins[name]
    }
}

impl DesignDb for TableNetwork {
    fn clocks(&self) -> &[SdcClock] {
        &self.clocks
    }

    fn find_pin(&self, name: &str) -> Option<PinId> {
        self.pins.get(name).copied()
    }

    fn is_leaf_pin_clock(&self, pin: PinId) -> bool {
        self.clock_pins.contains_key(&pin)
    }

    fn leaf_pin_clocks(&self, pin: PinId) -> Vec<&SdcClock> {
        self.clock_pins
            .get(&pin)
            .map(|indices| indices.iter().map(|&i| &self.clocks[i]).collect())
            .unwrap_or_default()
    }
}

/// Records every deposited annotation.
#[derive(Default)]
pub struct RecordingSink {
    pub rows: Vec<(PinId, f64, f64, ActivityOrigin)>,
}

impl RecordingSink {
    /// Annotation tuples sorted by pin id, for order-insensitive comparison.
    pub fn sorted_rows(&self) -> Vec<(u64, f64, f64)> {
        let mut rows: Vec<_> = self
            .rows
            .iter()
            .map(|&(pin, activity, duty, _)| (pin.0, activity, duty))
            .collect();
        rows.sort_by(|a, b| a.partial_cmp(b).unwrap());
        rows
    }
}

impl PowerSink for RecordingSink {
    fn set_user_activity(&mut self, pin: PinId, activity: f64, duty: f64, origin: ActivityOrigin) {
        self.rows.push((pin, activity, duty, origin));
    }
}
