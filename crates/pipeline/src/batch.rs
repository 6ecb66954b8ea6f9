//! The unit of commit

use intake_events::Event;
use intake_transport::Position;

/// A closed micro-batch, ready for commit
///
/// Carries the events admitted during one accumulation window plus the
/// high-water position: the position of the last record consumed while
/// the batch was open, whether that record was admitted or skipped as
/// unparseable. Commit writes the events to the sink and then
/// checkpoints the high-water position as one logical step.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Events admitted into this batch, in read order
    pub events: Vec<Event>,

    /// Position of the last record consumed while the batch was open
    pub high_water: Position,

    /// Records read during the window that failed to parse
    pub parse_failures: u64,
}

impl Batch {
    /// Number of admitted events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events were admitted
    ///
    /// An empty batch can still carry an advanced high-water position
    /// when every record in the window failed to parse.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
