/// Data models for the schedule layout engine.
///
/// This module defines the core data structures used throughout the engine:
/// - ProfessionalSchedule: working days, recurring breaks and vacation
/// - Appointment: a persisted booking, opaque display fields included
/// - Block: a synthetic break or vacation interval derived per render
/// - Event: the tagged union consumed by lane assignment
/// - PositionedEvent: render geometry for a single event

use crate::error::{ScheduleError, ScheduleResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// A recurring break, expressed as wall-clock `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakTime {
    pub start: String,
    pub end: String,
}

impl BreakTime {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        BreakTime {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse the break into wall-clock times, requiring `end > start`.
    pub fn parse(&self) -> ScheduleResult<(NaiveTime, NaiveTime)> {
        let start = parse_hhmm(&self.start)?;
        let end = parse_hhmm(&self.end)?;
        if end <= start {
            return Err(ScheduleError::InvalidBreak {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok((start, end))
    }

    fn from_value(value: &Value) -> Option<Self> {
        let start = value.get("start")?.as_str()?;
        let end = value.get("end")?.as_str()?;
        Some(BreakTime::new(start, end))
    }
}

/// Parse a `HH:MM` wall-clock time.
pub fn parse_hhmm(value: &str) -> ScheduleResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
}

/// Extract break entries from loosely-shaped stored data.
///
/// Accepts a JSON array of `{start, end}` objects or a JSON string holding
/// such an array. Entries without string `start`/`end` fields are dropped;
/// any other shape yields no breaks at all.
pub fn parse_break_times(value: &Value) -> Vec<BreakTime> {
    match try_parse_break_times(value) {
        Ok(breaks) => breaks,
        Err(error) => {
            warn!(%error, "ignoring break times");
            Vec::new()
        }
    }
}

fn try_parse_break_times(value: &Value) -> ScheduleResult<Vec<BreakTime>> {
    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries.clone(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Array(entries) => entries,
            other => {
                return Err(ScheduleError::InvalidBreakTimes(format!(
                    "expected an array, found {other}"
                )))
            }
        },
        other => {
            return Err(ScheduleError::InvalidBreakTimes(format!(
                "expected an array, found {other}"
            )))
        }
    };

    let mut breaks = Vec::with_capacity(entries.len());
    for entry in &entries {
        match BreakTime::from_value(entry) {
            Some(break_time) => breaks.push(break_time),
            None => warn!(%entry, "skipping malformed break entry"),
        }
    }
    Ok(breaks)
}

fn deserialize_break_times<'de, D>(deserializer: D) -> Result<Vec<BreakTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_break_times(&value))
}

/// Whole-day vacation range, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vacation {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl Vacation {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Vacation {
            active: true,
            start: Some(start),
            end: Some(end),
        }
    }

    /// The effective range, or `None` when inactive or incomplete.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        if !self.active {
            return None;
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some((start, end)),
            _ => None,
        }
    }

    /// Check whether a calendar date falls inside the vacation.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range()
            .map(|(start, end)| start <= date && date <= end)
            .unwrap_or(false)
    }
}

/// Working-time configuration of a single professional.
///
/// `working_days` is Monday-first: index 0 is Monday, 6 is Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalSchedule {
    pub professional_id: String,
    pub working_days: [bool; 7],
    #[serde(default, deserialize_with = "deserialize_break_times")]
    pub break_times: Vec<BreakTime>,
    #[serde(default)]
    pub vacation: Option<Vacation>,
}

impl ProfessionalSchedule {
    /// Create a schedule working Monday to Friday with no breaks.
    pub fn new(professional_id: impl Into<String>) -> Self {
        ProfessionalSchedule {
            professional_id: professional_id.into(),
            working_days: [true, true, true, true, true, false, false],
            break_times: Vec::new(),
            vacation: None,
        }
    }

    pub fn with_break(mut self, start: &str, end: &str) -> Self {
        self.break_times.push(BreakTime::new(start, end));
        self
    }

    pub fn with_vacation(mut self, vacation: Vacation) -> Self {
        self.vacation = Some(vacation);
        self
    }

    pub fn with_working_days(mut self, working_days: [bool; 7]) -> Self {
        self.working_days = working_days;
        self
    }

    /// Check whether the professional works on the given date.
    pub fn works_on(&self, date: NaiveDate) -> bool {
        self.working_days[date.weekday().num_days_from_monday() as usize]
    }

    /// Check whether the given date falls in an active vacation.
    pub fn on_vacation(&self, date: NaiveDate) -> bool {
        self.vacation
            .as_ref()
            .map(|vacation| vacation.contains(date))
            .unwrap_or(false)
    }

    /// Strict validation of the stored configuration.
    ///
    /// Layout never calls this; it skips bad entries instead. Forms use it
    /// to reject invalid input before it is persisted.
    pub fn validate(&self) -> ScheduleResult<()> {
        for break_time in &self.break_times {
            break_time.parse()?;
        }
        if let Some(vacation) = &self.vacation {
            if vacation.active {
                match (vacation.start, vacation.end) {
                    (Some(start), Some(end)) if end < start => {
                        return Err(ScheduleError::InvalidVacation(format!(
                            "end {end} is before start {start}"
                        )))
                    }
                    (Some(_), Some(_)) => {}
                    _ => {
                        return Err(ScheduleError::InvalidVacation(
                            "active vacation needs both start and end".to_string(),
                        ))
                    }
                }
            }
        }
        Ok(())
    }
}

/// A persisted appointment. Display fields are opaque to the layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub professional_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub procedure_name: String,
    #[serde(default)]
    pub status_label: String,
    #[serde(default)]
    pub status_color: String,
}

impl Appointment {
    /// Create an appointment without display fields.
    ///
    /// Degenerate intervals (`end <= start`) are accepted on purpose: they
    /// still take part in overlap detection at their start instant.
    pub fn new(
        id: impl Into<String>,
        professional_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Appointment {
            id: id.into(),
            professional_id: professional_id.into(),
            start_time,
            end_time,
            patient_name: String::new(),
            procedure_name: String::new(),
            status_label: String::new(),
            status_color: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Break,
    Vacation,
}

impl BlockKind {
    pub fn name(&self) -> &str {
        match self {
            BlockKind::Break => "break",
            BlockKind::Vacation => "vacation",
        }
    }
}

/// A synthetic interval derived from a professional's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub professional_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Appointment,
    Break,
    Vacation,
}

/// Uniform timeline entry: a real appointment or a synthetic block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Appointment(Appointment),
    Break(Block),
    Vacation(Block),
}

impl Event {
    pub fn id(&self) -> &str {
        match self {
            Event::Appointment(appointment) => &appointment.id,
            Event::Break(block) | Event::Vacation(block) => &block.id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Appointment(_) => EventKind::Appointment,
            Event::Break(_) => EventKind::Break,
            Event::Vacation(_) => EventKind::Vacation,
        }
    }

    pub fn start_time(&self) -> NaiveDateTime {
        match self {
            Event::Appointment(appointment) => appointment.start_time,
            Event::Break(block) | Event::Vacation(block) => block.start_time,
        }
    }

    pub fn end_time(&self) -> NaiveDateTime {
        match self {
            Event::Appointment(appointment) => appointment.end_time,
            Event::Break(block) | Event::Vacation(block) => block.end_time,
        }
    }

    /// Background events are drawn as bands and never take a lane.
    pub fn is_background(&self) -> bool {
        matches!(self, Event::Vacation(_))
    }
}

impl From<Appointment> for Event {
    fn from(appointment: Appointment) -> Self {
        Event::Appointment(appointment)
    }
}

impl From<Block> for Event {
    fn from(block: Block) -> Self {
        match block.kind {
            BlockKind::Break => Event::Break(block),
            BlockKind::Vacation => Event::Vacation(block),
        }
    }
}

/// Render geometry for one event.
///
/// `left_percent` and `width_percent` describe the lane column before the
/// gutter inset; renderers apply `gutter_px / 2` on each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent {
    pub event: Event,
    pub lane: usize,
    pub concurrency: usize,
    pub top: f64,
    pub height: f64,
    pub left_percent: f64,
    pub width_percent: f64,
    pub gutter_px: f64,
    pub z_index: u8,
}

impl PositionedEvent {
    pub fn css_left(&self) -> String {
        format!("calc({}% + {}px)", self.left_percent, self.gutter_px / 2.0)
    }

    pub fn css_width(&self) -> String {
        format!("calc({}% - {}px)", self.width_percent, self.gutter_px)
    }

    /// Pixel `(left, width)` inside a container of the given width.
    pub fn resolve(&self, container_width_px: f64) -> (f64, f64) {
        let left = container_width_px * self.left_percent / 100.0 + self.gutter_px / 2.0;
        let width = container_width_px * self.width_percent / 100.0 - self.gutter_px;
        (left, width.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn break_time_parse_rejects_inverted_range() {
        assert!(BreakTime::new("12:00", "13:00").parse().is_ok());
        assert!(matches!(
            BreakTime::new("13:00", "12:00").parse(),
            Err(ScheduleError::InvalidBreak { .. })
        ));
        assert!(matches!(
            BreakTime::new("noon", "13:00").parse(),
            Err(ScheduleError::InvalidTime(_))
        ));
    }

    #[test]
    fn parse_break_times_accepts_array_and_encoded_string() {
        let array = json!([{"start": "12:00", "end": "13:00"}]);
        let encoded = json!("[{\"start\":\"15:00\",\"end\":\"15:15\"}]");

        assert_eq!(
            parse_break_times(&array),
            vec![BreakTime::new("12:00", "13:00")]
        );
        assert_eq!(
            parse_break_times(&encoded),
            vec![BreakTime::new("15:00", "15:15")]
        );
    }

    #[test]
    fn parse_break_times_skips_malformed_entries() {
        let value = json!([
            {"start": "12:00", "end": "13:00"},
            {"start": "14:00"},
            "10:00-11:00",
            {"start": 9, "end": 10}
        ]);
        assert_eq!(parse_break_times(&value).len(), 1);
        assert!(parse_break_times(&json!({"start": "12:00"})).is_empty());
        assert!(parse_break_times(&json!("not json")).is_empty());
        assert!(parse_break_times(&Value::Null).is_empty());
    }

    #[test]
    fn schedule_deserializes_loose_break_times() {
        let schedule: ProfessionalSchedule = serde_json::from_value(json!({
            "professionalId": "pro-1",
            "workingDays": [true, true, true, true, true, false, false],
            "breakTimes": "[{\"start\":\"12:00\",\"end\":\"13:00\"}, 42]"
        }))
        .expect("deserialize schedule");

        assert_eq!(schedule.break_times, vec![BreakTime::new("12:00", "13:00")]);
        assert!(schedule.vacation.is_none());
    }

    #[test]
    fn vacation_requires_both_dates_when_active() {
        let partial = Vacation {
            active: true,
            start: Some(date("2024-03-10")),
            end: None,
        };
        assert!(partial.range().is_none());
        assert!(!partial.contains(date("2024-03-10")));

        let inactive = Vacation {
            active: false,
            ..Vacation::new(date("2024-03-10"), date("2024-03-12"))
        };
        assert!(!inactive.contains(date("2024-03-11")));

        let schedule = ProfessionalSchedule::new("pro-1").with_vacation(partial);
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn works_on_uses_monday_first_index() {
        let schedule = ProfessionalSchedule::new("pro-1")
            .with_working_days([true, false, false, false, false, false, true]);

        // 2024-03-11 is a Monday, 2024-03-12 a Tuesday, 2024-03-10 a Sunday.
        assert!(schedule.works_on(date("2024-03-11")));
        assert!(!schedule.works_on(date("2024-03-12")));
        assert!(schedule.works_on(date("2024-03-10")));
    }

    #[test]
    fn event_exposes_block_kind() {
        let start = date("2024-03-11").and_hms_opt(12, 0, 0).expect("valid time");
        let block = Block {
            id: "b-1".to_string(),
            kind: BlockKind::Vacation,
            professional_id: "pro-1".to_string(),
            start_time: start,
            end_time: start,
            title: "Vacation".to_string(),
        };
        let event = Event::from(block);
        assert_eq!(event.kind(), EventKind::Vacation);
        assert!(event.is_background());
        assert_eq!(event.id(), "b-1");
    }
}
