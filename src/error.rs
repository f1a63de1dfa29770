use std::path::PathBuf;

/// Convenient alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal conditions raised while loading a capture or annotating activities.
///
/// Every variant carries a stable numeric diagnostic identifier (see
/// [`Error::code`]) so that messages can be correlated across runs and
/// releases. Non-fatal conditions are reported as `tracing` warnings with a
/// `code` field instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The capture file could not be opened or is not a readable FST container.
    #[error("failed to open capture `{}`: {detail}", path.display())]
    Open {
        /// Path handed to the decoder.
        path: PathBuf,
        /// Human-readable failure reason from the I/O layer or the decoder.
        detail: String,
    },

    /// The header declares a timescale magnitude outside the supported range.
    #[error("invalid timescale magnitude {magnitude}")]
    Timescale {
        /// Base-10 exponent as stored in the capture header.
        magnitude: i8,
    },

    /// A variable declaration appeared before any enclosing scope.
    #[error("no enclosing scope for variable `{name}`")]
    VarOutsideScope {
        /// Declared variable name.
        name: String,
    },

    /// The hierarchy stream declared a second top-level scope.
    #[error("hierarchy declares a second root scope `{name}`")]
    MultipleRoots {
        /// Name of the offending scope.
        name: String,
    },

    /// A scope-tree lookup used an index past the end of the node store.
    #[error("scope tree index {index} out of range ({len} nodes)")]
    NodeIndex {
        /// Requested node id.
        index: usize,
        /// Number of nodes currently stored.
        len: usize,
    },

    /// The requested scope name does not occur in the capture hierarchy.
    #[error("scope `{name}` not found in capture")]
    ScopeNotFound {
        /// Requested scope name.
        name: String,
    },

    /// Value strings whose width disagreed with the declared variable length
    /// were encountered during a value pass. The pass completes (the values
    /// are retained for diagnostics) before this is raised.
    #[error("value pass recorded {mismatches} value(s) with mismatched width")]
    ValueWidth {
        /// Number of offending values in the pass.
        mismatches: usize,
    },

    /// The underlying decoder failed while iterating value changes.
    #[error("value-change iteration failed: {detail}")]
    ValueIteration {
        /// Decoder-reported failure reason.
        detail: String,
    },
}

impl Error {
    /// Stable diagnostic identifier for this condition.
    pub fn code(&self) -> u32 {
        match self {
            Self::Open { .. } => 7777,
            Self::Timescale { .. } => 7778,
            Self::VarOutsideScope { .. } => 7779,
            Self::MultipleRoots { .. } => 7780,
            Self::NodeIndex { .. } => 7781,
            Self::ScopeNotFound { .. } => 7782,
            Self::ValueWidth { .. } | Self::ValueIteration { .. } => 7890,
        }
    }
}
