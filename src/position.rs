/// Pixel and percentage geometry for laid-out events.

use crate::config::LayoutOptions;
use crate::models::{Event, PositionedEvent};
use chrono::NaiveDateTime;

/// Stacking order, lowest first. Breaks sit below appointments so a
/// booking made over a break stays clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZLayer {
    Background = 0,
    Break = 1,
    Appointment = 2,
}

impl ZLayer {
    pub fn of(event: &Event) -> Self {
        match event {
            Event::Appointment(_) => ZLayer::Appointment,
            Event::Break(_) => ZLayer::Break,
            Event::Vacation(_) => ZLayer::Background,
        }
    }
}

/// Place a single event on the timeline.
///
/// Background bands span the full width with no gutter; every other event
/// gets `100 / concurrency` percent of the row.
pub fn place(event: Event, lane: usize, concurrency: usize, options: &LayoutOptions) -> PositionedEvent {
    let start = event.start_time();
    let top = minutes_from_day_start(start, options) * options.px_per_minute;
    let duration_minutes = (event.end_time() - start).num_seconds() as f64 / 60.0;
    let height = (duration_minutes * options.px_per_minute).max(options.min_height_px);

    let (lane, concurrency, gutter_px) = if event.is_background() {
        (0, 1, 0.0)
    } else {
        (lane, concurrency.max(1), options.gutter_px)
    };
    let width_percent = 100.0 / concurrency as f64;
    let left_percent = width_percent * lane as f64;
    let z_index = ZLayer::of(&event) as u8;

    PositionedEvent {
        event,
        lane,
        concurrency,
        top,
        height,
        left_percent,
        width_percent,
        gutter_px,
        z_index,
    }
}

fn minutes_from_day_start(time: NaiveDateTime, options: &LayoutOptions) -> f64 {
    let origin = time.date().and_time(options.day_start);
    (time - origin).num_seconds() as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Block, BlockKind};
    use chrono::{NaiveDate, NaiveTime};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .and_then(|day| day.and_hms_opt(hour, minute, 0))
            .expect("valid time")
    }

    fn appointment(start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::from(Appointment::new("apt-1", "pro-1", start, end))
    }

    fn options() -> LayoutOptions {
        LayoutOptions::new(1.5, 40.0, 4.0).expect("valid options")
    }

    #[test]
    fn top_and_height_scale_with_minutes() {
        let placed = place(appointment(at(9, 0), at(10, 0)), 0, 1, &options());
        assert_eq!(placed.top, 540.0 * 1.5);
        assert_eq!(placed.height, 90.0);
        assert_eq!(placed.z_index, 2);
    }

    #[test]
    fn short_appointment_gets_minimum_height() {
        let placed = place(appointment(at(9, 0), at(9, 5)), 0, 1, &options());
        assert_eq!(placed.height, 40.0);
    }

    #[test]
    fn inverted_interval_is_clamped_to_minimum_height() {
        let placed = place(appointment(at(10, 0), at(9, 0)), 0, 1, &options());
        assert_eq!(placed.height, 40.0);
    }

    #[test]
    fn lanes_split_width_evenly() {
        let placed = place(appointment(at(9, 0), at(10, 0)), 2, 4, &options());
        assert_eq!(placed.width_percent, 25.0);
        assert_eq!(placed.left_percent, 50.0);
        assert_eq!(placed.css_left(), "calc(50% + 2px)");
        assert_eq!(placed.css_width(), "calc(25% - 4px)");
        assert_eq!(placed.resolve(400.0), (202.0, 96.0));
    }

    #[test]
    fn vacation_band_is_full_width_background() {
        let band = Event::from(Block {
            id: "vac".to_string(),
            kind: BlockKind::Vacation,
            professional_id: "pro-1".to_string(),
            start_time: at(0, 0),
            end_time: at(23, 59),
            title: "Vacation".to_string(),
        });

        let placed = place(band, 3, 5, &options());

        assert_eq!((placed.lane, placed.concurrency), (0, 1));
        assert_eq!(placed.left_percent, 0.0);
        assert_eq!(placed.width_percent, 100.0);
        assert_eq!(placed.gutter_px, 0.0);
        assert_eq!(placed.z_index, ZLayer::Background as u8);
        assert_eq!(placed.top, 0.0);
    }

    #[test]
    fn day_start_shifts_origin() {
        let options = options().with_day_start(NaiveTime::from_hms_opt(8, 0, 0).expect("valid"));
        let placed = place(appointment(at(9, 30), at(10, 0)), 0, 1, &options);
        assert_eq!(placed.top, 90.0 * 1.5);
    }

    #[test]
    fn breaks_render_between_bands_and_appointments() {
        assert!(ZLayer::Background < ZLayer::Break);
        assert!(ZLayer::Break < ZLayer::Appointment);
    }
}
