#![allow(dead_code)]
use chrono::{NaiveDate, NaiveDateTime};
use clinic_timeline::{Appointment, ProfessionalSchedule};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

pub fn at(day: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{day} {time}"), "%Y-%m-%d %H:%M").expect("valid datetime")
}

/// Monday-to-Friday professional with a lunch break.
pub fn professional() -> ProfessionalSchedule {
    ProfessionalSchedule::new("pro-1").with_break("12:00", "13:00")
}

pub fn appointment(id: &str, day: &str, start: &str, end: &str) -> Appointment {
    Appointment::new(id, "pro-1", at(day, start), at(day, end))
}
