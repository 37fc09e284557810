pub mod clock;
pub mod error;
pub mod lock;
pub mod log;
pub mod paths;
pub mod record;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::LogError;
pub use lock::WorkspaceLock;
pub use log::{LogState, MatchLog, DEFAULT_BASE_NAME};
pub use paths::CourtlogPaths;
pub use record::{Column, PointRecord, UnknownColumn};
pub use store::{write_atomic, CsvStore, PartitionStore};
