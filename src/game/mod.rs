//! Match state machine: status, phases and the engine that drives them

/// Conditional logging that avoids the `format!` allocation when the
/// `verbose-logging` feature is disabled
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

pub mod engine;
pub mod logger;
pub mod phase;
pub mod phases;
pub mod status;

pub use engine::{MatchEngine, MatchOutcome};
pub use logger::{LogEntry, MatchLogger, OutputMode, VerbosityLevel};
pub use phase::{InputEvent, MatchContext, Phase, PhaseTag, PointerEvent, Transition};
pub use phases::PhaseTable;
pub use status::MatchStatus;
