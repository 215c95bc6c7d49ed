/// Merge appointments and synthetic blocks into one event list.

use crate::models::{Appointment, Block, Event};

/// Appointments first, then blocks, each in input order.
pub fn normalize(appointments: &[Appointment], blocks: &[Block]) -> Vec<Event> {
    appointments
        .iter()
        .cloned()
        .map(Event::from)
        .chain(blocks.iter().cloned().map(Event::from))
        .collect()
}
