//! Player commands forwarded by the presentation layer

use super::road::Template;

/// A command applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch the lights to the next phase right away
    AdvancePhase,
    /// Rebuild the intersection and start a fresh run
    Reset(Template),
}
