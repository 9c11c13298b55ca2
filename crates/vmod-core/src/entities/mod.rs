//! Domain entities - the engine's resources as the console sees them

mod kick_target;
mod list_entry;
mod log_record;
mod overview;
mod rule;
mod schedule;
mod stacking_pair;

pub use kick_target::KickTarget;
pub use list_entry::{BulkAddResult, ListEntry};
pub use log_record::LogRecord;
pub use overview::{Dashboard, StatsOverview, UserStats};
pub use rule::{ActionParams, ActionType, ListType, Rule};
pub use schedule::{Schedule, ScheduleAction};
pub use stacking_pair::StackingPair;
