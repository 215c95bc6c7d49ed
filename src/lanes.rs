/// Lane assignment for overlapping events.
///
/// A sweep line over start times colors the interval graph greedily: each
/// event takes the lowest lane not held by a still-running event, and every
/// event running at the same time learns how many lanes were in use.

use crate::models::Event;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneAssignment {
    /// Zero-based column inside the row.
    pub lane: usize,
    /// Number of equal-width columns the row is divided into.
    pub concurrency: usize,
}

impl LaneAssignment {
    /// Full-width placement used by background bands.
    pub const FULL_WIDTH: LaneAssignment = LaneAssignment {
        lane: 0,
        concurrency: 1,
    };
}

struct ActiveLane {
    lane: usize,
    end_time: NaiveDateTime,
    slot: usize,
}

/// Assign lanes keyed by event id.
pub fn assign_lanes(events: &[Event]) -> HashMap<String, LaneAssignment> {
    events
        .iter()
        .zip(assign_lane_slots(events))
        .map(|(event, assignment)| (event.id().to_string(), assignment))
        .collect()
}

/// Assign lanes positionally: the result is parallel to `events`.
///
/// Vacation events keep `FULL_WIDTH`. The raw interval is used for overlap
/// detection even when `end <= start`; an entry is released once an event
/// starts at or after its end.
pub fn assign_lane_slots(events: &[Event]) -> Vec<LaneAssignment> {
    let mut slots = vec![LaneAssignment::FULL_WIDTH; events.len()];

    let mut order: Vec<usize> = (0..events.len())
        .filter(|&index| !events[index].is_background())
        .collect();
    order.sort_by_key(|&index| (events[index].start_time(), events[index].end_time()));

    let mut active: Vec<ActiveLane> = Vec::new();
    for index in order {
        let event = &events[index];
        let start_time = event.start_time();

        active.retain(|entry| entry.end_time > start_time);

        let lane = lowest_free_lane(&active);
        active.push(ActiveLane {
            lane,
            end_time: event.end_time(),
            slot: index,
        });

        let concurrency = active.len();
        slots[index] = LaneAssignment { lane, concurrency };
        for entry in &active {
            let slot = &mut slots[entry.slot];
            slot.concurrency = slot.concurrency.max(concurrency);
        }
    }

    slots
}

fn lowest_free_lane(active: &[ActiveLane]) -> usize {
    (0..=active.len())
        .find(|lane| active.iter().all(|entry| entry.lane != *lane))
        .unwrap_or(active.len())
}
