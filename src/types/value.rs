/// One recorded value of a variable.
///
/// `bits` holds one character per declared bit, drawn from uppercase
/// `{'0','1','X','Z'}` for four-state captures. Index `i` is bus bit `i`
/// (least-significant first); the decoder's most-significant-first order and
/// lowercase states are normalized away on ingest, so no later stage reasons
/// about two conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarValue {
    /// Capture timestamp in integer ticks.
    pub time: u64,
    /// Normalized bit characters, LSB first.
    pub bits: String,
}

impl VarValue {
    /// Creates a value from already-normalized bits.
    pub fn new(time: u64, bits: impl Into<String>) -> Self {
        Self {
            time,
            bits: bits.into(),
        }
    }

    /// Returns the character for bus bit `bit`, reading absent positions as
    /// unknown (possible only after a width-mismatch soft error).
    pub fn bit(&self, bit: usize) -> u8 {
        self.bits.as_bytes().get(bit).copied().unwrap_or(b'X')
    }
}
