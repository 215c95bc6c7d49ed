/// Layout entry points for the day view, weekly grid and month badges.
///
/// Each call runs the whole pipeline: block generation, normalization,
/// lane assignment and placement. `LayoutCache` memoizes results by
/// professional, period and appointment-set version.

use crate::blocks::{self, ScheduleMode};
use crate::config::LayoutOptions;
use crate::lanes::assign_lane_slots;
use crate::models::{
    Appointment, Block, BlockKind, Event, PositionedEvent, ProfessionalSchedule,
};
use crate::normalize::normalize;
use crate::position::place;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::slice;
use tracing::debug;

/// One column of the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub date: NaiveDate,
    pub events: Vec<PositionedEvent>,
}

/// Per-day summary shown as badges on the month view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBadge {
    pub date: NaiveDate,
    pub working: bool,
    pub on_vacation: bool,
    pub breaks: usize,
    pub appointments: usize,
}

/// Lay out one professional's day.
///
/// Appointments belonging to another professional or starting on another
/// date are ignored. Output follows the normalized event order: the
/// day's appointments in input order, then breaks, then the vacation band.
pub fn layout_day(
    professional: &ProfessionalSchedule,
    appointments: &[Appointment],
    date: NaiveDate,
    options: &LayoutOptions,
) -> Vec<PositionedEvent> {
    let day_blocks = blocks::generate(slice::from_ref(professional), date, ScheduleMode::Day);
    let day_appointments: Vec<Appointment> =
        appointments_on(professional, appointments, date).cloned().collect();

    let events = normalize(&day_appointments, &day_blocks);
    let lanes = assign_lane_slots(&events);

    let positioned: Vec<PositionedEvent> = events
        .into_iter()
        .zip(lanes)
        .map(|(event, assignment)| place(event, assignment.lane, assignment.concurrency, options))
        .collect();

    debug!(
        professional_id = %professional.professional_id,
        %date,
        appointments = day_appointments.len(),
        blocks = day_blocks.len(),
        "laid out day"
    );

    positioned
}

/// Lay out the Monday-first week containing `week_of`.
pub fn layout_week(
    professional: &ProfessionalSchedule,
    appointments: &[Appointment],
    week_of: NaiveDate,
    options: &LayoutOptions,
) -> Vec<DayLayout> {
    let monday = week_of.week(Weekday::Mon).first_day();
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            DayLayout {
                date,
                events: layout_day(professional, appointments, date, options),
            }
        })
        .collect()
}

/// Break and vacation blocks for every day of `month`'s calendar month.
pub fn layout_month(professional: &ProfessionalSchedule, month: NaiveDate) -> Vec<Block> {
    blocks::generate(slice::from_ref(professional), month, ScheduleMode::Month)
}

/// Month-view badges: one entry per calendar day of `month`.
pub fn month_badges(
    professional: &ProfessionalSchedule,
    appointments: &[Appointment],
    month: NaiveDate,
) -> Vec<DayBadge> {
    let month_blocks = layout_month(professional, month);

    blocks::days_in_scope(month, ScheduleMode::Month)
        .into_iter()
        .map(|date| DayBadge {
            date,
            working: professional.works_on(date),
            on_vacation: professional.on_vacation(date),
            breaks: month_blocks
                .iter()
                .filter(|block| block.start_time.date() == date)
                .filter(|block| block.kind == BlockKind::Break)
                .count(),
            appointments: appointments_on(professional, appointments, date).count(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

impl Period {
    pub fn month_of(date: NaiveDate) -> Self {
        Period::Month {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Memoization key for a layout pass.
///
/// `schedule_version` covers edits to the professional's configuration,
/// which change the output just as appointment edits do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    pub professional_id: String,
    pub period: Period,
    pub appointment_set_version: u64,
    pub schedule_version: u64,
}

impl LayoutKey {
    pub fn day(
        professional: &ProfessionalSchedule,
        appointments: &[Appointment],
        date: NaiveDate,
    ) -> Self {
        LayoutKey {
            professional_id: professional.professional_id.clone(),
            period: Period::Day(date),
            appointment_set_version: appointment_set_version(appointments_on(
                professional,
                appointments,
                date,
            )),
            schedule_version: fingerprint(professional),
        }
    }

    pub fn month(professional: &ProfessionalSchedule, month: NaiveDate) -> Self {
        LayoutKey {
            professional_id: professional.professional_id.clone(),
            period: Period::month_of(month),
            appointment_set_version: 0,
            schedule_version: fingerprint(professional),
        }
    }

    /// The cache slot this key competes for; versions are left out.
    pub fn slot(&self) -> (String, Period) {
        (self.professional_id.clone(), self.period)
    }
}

/// Order-sensitive fingerprint of the fields that drive geometry.
///
/// Display fields are left out: a status or name edit does not move a card.
pub fn appointment_set_version<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> u64 {
    let mut hasher = DefaultHasher::new();
    for appointment in appointments {
        (
            &appointment.id,
            &appointment.professional_id,
            appointment.start_time,
            appointment.end_time,
        )
            .hash(&mut hasher);
    }
    hasher.finish()
}

fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn appointments_on<'a>(
    professional: &'a ProfessionalSchedule,
    appointments: &'a [Appointment],
    date: NaiveDate,
) -> impl Iterator<Item = &'a Appointment> + 'a {
    appointments.iter().filter(move |appointment| {
        appointment.professional_id == professional.professional_id
            && appointment.start_time.date() == date
    })
}

/// Copy current display fields into a cached layout whose geometry still holds.
fn refresh_appointments(layout: &mut [PositionedEvent], appointments: &[Appointment]) {
    let latest: HashMap<&str, &Appointment> = appointments
        .iter()
        .map(|appointment| (appointment.id.as_str(), appointment))
        .collect();
    for item in layout {
        if let Event::Appointment(current) = &mut item.event {
            if let Some(fresh) = latest.get(current.id.as_str()) {
                if current != *fresh {
                    *current = (*fresh).clone();
                }
            }
        }
    }
}

#[derive(Debug)]
struct Cached<T> {
    key: LayoutKey,
    value: T,
}

/// Memoized layouts for a fixed set of options.
///
/// Holds at most one entry per professional and period. A lookup with a
/// newer input version replaces that entry in place.
#[derive(Debug, Default)]
pub struct LayoutCache {
    options: LayoutOptions,
    days: HashMap<(String, Period), Cached<Vec<PositionedEvent>>>,
    months: HashMap<(String, Period), Cached<Vec<Block>>>,
}

impl LayoutCache {
    pub fn new(options: LayoutOptions) -> Self {
        LayoutCache {
            options,
            days: HashMap::new(),
            months: HashMap::new(),
        }
    }

    pub fn day(
        &mut self,
        professional: &ProfessionalSchedule,
        appointments: &[Appointment],
        date: NaiveDate,
    ) -> &[PositionedEvent] {
        let key = LayoutKey::day(professional, appointments, date);
        let options = &self.options;
        let cached = match self.days.entry(key.slot()) {
            Entry::Occupied(entry) => {
                let cached = entry.into_mut();
                if cached.key == key {
                    refresh_appointments(&mut cached.value, appointments);
                } else {
                    debug!(
                        professional_id = %key.professional_id,
                        %date,
                        "replacing stale day layout"
                    );
                    *cached = Cached {
                        value: layout_day(professional, appointments, date, options),
                        key,
                    };
                }
                cached
            }
            Entry::Vacant(entry) => entry.insert(Cached {
                value: layout_day(professional, appointments, date, options),
                key,
            }),
        };
        &cached.value
    }

    pub fn month(&mut self, professional: &ProfessionalSchedule, month: NaiveDate) -> &[Block] {
        let key = LayoutKey::month(professional, month);
        let cached = match self.months.entry(key.slot()) {
            Entry::Occupied(entry) => {
                let cached = entry.into_mut();
                if cached.key != key {
                    *cached = Cached {
                        value: layout_month(professional, month),
                        key,
                    };
                }
                cached
            }
            Entry::Vacant(entry) => entry.insert(Cached {
                value: layout_month(professional, month),
                key,
            }),
        };
        &cached.value
    }

    pub fn len(&self) -> usize {
        self.days.len() + self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.days.clear();
        self.months.clear();
    }
}
