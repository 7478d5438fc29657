pub mod schedule;
pub mod types;

pub use schedule::{rank_standings, split_prize, undistributed, validate_schedule, ScheduleError};
pub use types::{Award, EventStatus, Standing};
