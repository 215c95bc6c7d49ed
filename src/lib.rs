//! Day-schedule layout engine for clinic timelines.
//!
//! Derives break and vacation blocks from a professional's configuration,
//! merges them with booked appointments, packs overlapping events into
//! lanes and maps the result to render geometry. Every stage is a pure
//! function; the day view, weekly grid and print report share it.

pub mod blocks;
pub mod config;
pub mod error;
pub mod lanes;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod position;

pub use blocks::{generate, ScheduleMode};
pub use config::LayoutOptions;
pub use error::{ScheduleError, ScheduleResult};
pub use lanes::{assign_lanes, LaneAssignment};
pub use layout::{
    appointment_set_version, layout_day, layout_month, layout_week, month_badges, DayBadge,
    DayLayout, LayoutCache, LayoutKey, Period,
};
pub use models::{
    Appointment, Block, BlockKind, BreakTime, Event, EventKind, PositionedEvent,
    ProfessionalSchedule, Vacation,
};
pub use normalize::normalize;
pub use position::{place, ZLayer};
