//! Interfaces to the timing-analysis design database and the power sink.
//!
//! Both collaborators live outside this crate; the pipeline only needs pin
//! resolution, clock metadata, and a place to deposit annotations.

/// Opaque pin handle assigned by the design database. Stable for the
/// lifetime of one annotation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinId(pub u64);

/// One clock defined by the timing constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct SdcClock {
    /// Constraint-file clock name.
    pub name: String,
    /// Clock period in seconds.
    pub period: f64,
}

/// Provenance tag recorded with each deposited annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOrigin {
    /// Supplied directly by the user.
    User,
    /// Derived from a VCD capture.
    Vcd,
    /// Derived from an FST capture.
    Fst,
}

/// Name resolution and clock metadata from the timing design database.
pub trait DesignDb {
    /// Clocks defined by the timing constraints. May be empty.
    fn clocks(&self) -> &[SdcClock];

    /// Resolves a hierarchical pin name, e.g. `u1/inst/a[3]`.
    fn find_pin(&self, name: &str) -> Option<PinId>;

    /// Returns `true` when the pin is a leaf pin of a defined clock.
    fn is_leaf_pin_clock(&self, pin: PinId) -> bool;

    /// Clocks the pin is a leaf pin of. Empty for non-clock pins.
    fn leaf_pin_clocks(&self, pin: PinId) -> Vec<&SdcClock>;

    /// Translates a net name from the source HDL namespace into the
    /// database's namespace. Defaults to the Verilog convention.
    fn sta_net_name(&self, net: &str) -> String {
        net_verilog_to_sta(net)
    }
}

/// Sink accepting per-pin activity annotations.
pub trait PowerSink {
    /// Deposits one annotation. Re-annotating a pin replaces its values.
    fn set_user_activity(&mut self, pin: PinId, activity: f64, duty: f64, origin: ActivityOrigin);
}

/// Translates a Verilog net name into the STA namespace.
///
/// Verilog escaped identifiers (`\name ` — a leading backslash, terminated
/// by whitespace) become plain names with the characters that are special in
/// STA names (`/`, `[`, `]`) kept literal behind an escape. Ordinary
/// identifiers pass through unchanged.
pub fn net_verilog_to_sta(net: &str) -> String {
    match net.strip_prefix('\\') {
        None => net.to_string(),
        Some(escaped) => {
            let escaped = escaped.trim_end();
            let mut out = String::with_capacity(escaped.len());
            for ch in escaped.chars() {
                if matches!(ch, '/' | '[' | ']') {
                    out.push('\\');
                }
                out.push(ch);
            }
            out
        }
    }
}
