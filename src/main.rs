/// Command-line demo for the schedule layout engine.
///
/// Lays out a sample clinic day and prints the resulting geometry, the
/// weekly grid summary and the month badges.
///
/// Usage: clinic-timeline [YYYY-MM-DD] [layout-options.json]

use chrono::{NaiveDate, NaiveDateTime};
use clinic_timeline::{
    layout_day, layout_week, month_badges, Appointment, LayoutOptions, ProfessionalSchedule,
    ScheduleError, ScheduleResult, Vacation,
};
use std::env;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct TimelineCLI {
    date: NaiveDate,
    options: LayoutOptions,
}

impl TimelineCLI {
    fn from_args(args: &[String]) -> ScheduleResult<Self> {
        let date = match args.get(1) {
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| ScheduleError::InvalidOptions(format!("invalid date: {value}")))?,
            None => NaiveDate::from_ymd_opt(2024, 3, 11)
                .ok_or_else(|| ScheduleError::InvalidOptions("invalid default date".to_string()))?,
        };
        let options = match args.get(2) {
            Some(path) => LayoutOptions::from_json_str(&fs::read_to_string(path)?)?,
            None => LayoutOptions::default(),
        };
        Ok(TimelineCLI { date, options })
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(72));
        println!("       CLINIC TIMELINE - {}", self.date.format("%A, %Y-%m-%d"));
        println!("{}", "=".repeat(72));
    }

    fn demo_professional(&self) -> ProfessionalSchedule {
        let vacation_start = self.date + chrono::Duration::days(7);
        ProfessionalSchedule::new("dr-demo")
            .with_break("12:00", "13:00")
            .with_break("15:30", "15:45")
            .with_vacation(Vacation::new(
                vacation_start,
                vacation_start + chrono::Duration::days(2),
            ))
    }

    fn demo_appointments(&self) -> Vec<Appointment> {
        let at = |hour: u32, minute: u32| -> NaiveDateTime {
            self.date
                .and_hms_opt(hour, minute, 0)
                .unwrap_or_else(|| self.date.and_time(chrono::NaiveTime::MIN))
        };
        let sample = |id: &str, patient: &str, procedure: &str, start, end| Appointment {
            patient_name: patient.to_string(),
            procedure_name: procedure.to_string(),
            status_label: "Confirmed".to_string(),
            status_color: "#2e7d32".to_string(),
            ..Appointment::new(id, "dr-demo", start, end)
        };

        vec![
            sample("apt-1", "John Smith", "Annual checkup", at(9, 0), at(9, 30)),
            sample("apt-2", "Jane Doe", "Consultation", at(9, 15), at(9, 45)),
            sample("apt-3", "Bob Wilson", "Follow-up", at(9, 40), at(10, 0)),
            sample("apt-4", "Alice Brown", "Prescription renewal", at(12, 30), at(12, 35)),
            sample("apt-5", "Carl Green", "Dressing change", at(15, 30), at(16, 0)),
        ]
    }

    fn view_day(&self, professional: &ProfessionalSchedule, appointments: &[Appointment]) {
        let placed = layout_day(professional, appointments, self.date, &self.options);

        println!("\n--- Day View ({} events) ---", placed.len());
        println!(
            "  {:<8} {:<13} {:>5} {:>8} {:>8} {:>8} {:>8} {:>2}",
            "kind", "time", "lane", "top", "height", "left%", "width%", "z"
        );
        for item in &placed {
            println!(
                "  {:<8} {}-{} {:>2}/{:<2} {:>8.1} {:>8.1} {:>8.2} {:>8.2} {:>2}",
                format!("{:?}", item.event.kind()).to_lowercase(),
                item.event.start_time().format("%H:%M"),
                item.event.end_time().format("%H:%M"),
                item.lane,
                item.concurrency,
                item.top,
                item.height,
                item.left_percent,
                item.width_percent,
                item.z_index
            );
        }
    }

    fn view_week(&self, professional: &ProfessionalSchedule, appointments: &[Appointment]) {
        println!("\n--- Weekly Grid ---");
        for day in layout_week(professional, appointments, self.date, &self.options) {
            println!("  {}: {} events", day.date.format("%a %Y-%m-%d"), day.events.len());
        }
    }

    fn view_month(&self, professional: &ProfessionalSchedule, appointments: &[Appointment]) {
        println!("\n--- Month Badges ---");
        for badge in month_badges(professional, appointments, self.date) {
            if !badge.working && !badge.on_vacation {
                continue;
            }
            let mut marks = Vec::new();
            if badge.on_vacation {
                marks.push("vacation".to_string());
            }
            if badge.breaks > 0 {
                marks.push(format!("{} breaks", badge.breaks));
            }
            if badge.appointments > 0 {
                marks.push(format!("{} appointments", badge.appointments));
            }
            println!("  {}: {}", badge.date.format("%d %a"), marks.join(", "));
        }
    }

    fn run(&self) {
        self.print_header();

        let professional = self.demo_professional();
        let appointments = self.demo_appointments();
        info!(
            professional_id = %professional.professional_id,
            appointments = appointments.len(),
            "running layout demo"
        );

        self.view_day(&professional, &appointments);
        self.view_week(&professional, &appointments);
        self.view_month(&professional, &appointments);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    match TimelineCLI::from_args(&args) {
        Ok(cli) => cli.run(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
