/// Break and vacation block generation.
///
/// Turns each professional's recurring configuration into concrete
/// calendar intervals for a single day or for a whole month. Output is a
/// pure function of the inputs, including block ids.

use crate::models::{Block, BlockKind, ProfessionalSchedule};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Which days of the calendar a generation pass covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    Day,
    Month,
}

/// Generate break and vacation blocks for every professional.
///
/// Order is professional, then break entry, then day; vacation blocks for a
/// professional follow its breaks, one per day in range.
pub fn generate(
    professionals: &[ProfessionalSchedule],
    target_date: NaiveDate,
    mode: ScheduleMode,
) -> Vec<Block> {
    let days = days_in_scope(target_date, mode);
    let mut blocks = Vec::new();

    for professional in professionals {
        let before = blocks.len();
        push_break_blocks(&mut blocks, professional, &days);
        push_vacation_blocks(&mut blocks, professional, &days);
        debug!(
            professional_id = %professional.professional_id,
            ?mode,
            %target_date,
            blocks = blocks.len() - before,
            "generated schedule blocks"
        );
    }

    blocks
}

/// All days a generation pass covers, in calendar order.
pub fn days_in_scope(target_date: NaiveDate, mode: ScheduleMode) -> Vec<NaiveDate> {
    match mode {
        ScheduleMode::Day => vec![target_date],
        ScheduleMode::Month => {
            let first = target_date.with_day(1).unwrap_or(target_date);
            first
                .iter_days()
                .take_while(|day| day.month() == first.month())
                .collect()
        }
    }
}

fn push_break_blocks(blocks: &mut Vec<Block>, professional: &ProfessionalSchedule, days: &[NaiveDate]) {
    for (index, break_time) in professional.break_times.iter().enumerate() {
        let (start, end) = match break_time.parse() {
            Ok(range) => range,
            Err(error) => {
                warn!(
                    professional_id = %professional.professional_id,
                    %error,
                    "skipping break entry"
                );
                continue;
            }
        };

        for &day in days {
            if !professional.works_on(day) {
                continue;
            }
            blocks.push(Block {
                id: block_id(&professional.professional_id, BlockKind::Break, day, index),
                kind: BlockKind::Break,
                professional_id: professional.professional_id.clone(),
                start_time: day.and_time(start),
                end_time: day.and_time(end),
                title: format!("Break {} - {}", start.format("%H:%M"), end.format("%H:%M")),
            });
        }
    }
}

fn push_vacation_blocks(
    blocks: &mut Vec<Block>,
    professional: &ProfessionalSchedule,
    days: &[NaiveDate],
) {
    let Some(vacation) = &professional.vacation else {
        return;
    };
    if vacation.active && vacation.range().is_none() {
        warn!(
            professional_id = %professional.professional_id,
            "ignoring vacation with missing or inverted dates"
        );
        return;
    }

    for &day in days {
        if !vacation.contains(day) {
            continue;
        }
        let start_time = day.and_time(NaiveTime::MIN);
        blocks.push(Block {
            id: block_id(&professional.professional_id, BlockKind::Vacation, day, 0),
            kind: BlockKind::Vacation,
            professional_id: professional.professional_id.clone(),
            start_time,
            end_time: start_time + Duration::seconds(86_399),
            title: "Vacation".to_string(),
        });
    }
}

fn block_id(professional_id: &str, kind: BlockKind, day: NaiveDate, index: usize) -> String {
    let name = format!("{}:{}:{}:{}", professional_id, kind.name(), day, index);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}
