pub mod cache;
pub mod config;
pub mod entry;
pub mod error;
pub mod fill;
pub mod import;
pub mod matcher;
pub mod messages;
pub mod page;
pub mod progress;
pub mod render;
pub mod row;
pub mod schedule;
pub mod timesheet;

#[cfg(test)]
mod tests;

pub use cache::ImportCache;
pub use config::{Config, PageTarget};
pub use entry::TimeEntry;
pub use error::{ConfigError, FillError, ImportError};
pub use matcher::{GroupedEntries, find_for_day, group};
pub use messages::{
    Coordinator, FillResponse, Launcher, OpenPageResponse, RejectedResponse, Request, Response,
};
pub use page::PageSnapshot;
pub use progress::{FillOutcome, Progress, ProgressSink};
pub use schedule::{Clock, ManualClock, SystemClock};
pub use timesheet::{FillReport, PassState, fill_page, fill_timesheet, settle};
