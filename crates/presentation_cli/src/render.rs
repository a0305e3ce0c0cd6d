//! Plain-text rendering of the calendar, the day panel and the weekly chart

use std::fmt::Write as _;

use application::{MonthView, PanelData, PanelState, RenderedCell};
use domain::{DateKey, DayPresentation, PillRole, WEEKDAY_INITIALS, Weekday, WeeklyLoad};

const CELL_WIDTH: usize = 6;
const BAR_WIDTH: usize = 20;

fn cell_text(rendered: &RenderedCell, today: DateKey) -> String {
    let day = rendered.cell.day_number();
    let token = if !rendered.cell.in_current_month() {
        format!("({day:>2})")
    } else if rendered.cell.date_key() == Some(today) {
        format!("[{day:>2}]")
    } else {
        format!(" {day:>2} ")
    };
    let marker = match &rendered.presentation {
        DayPresentation::Empty => String::new(),
        DayPresentation::Dots(dots) => "•".repeat(dots.len().min(2)),
        DayPresentation::Pills(pills) => pills
            .iter()
            .filter(|pill| pill.role == PillRole::Event)
            .count()
            .to_string(),
    };
    format!("{token}{marker:<2}")
}

/// Month grid, followed by the day-by-day pill list in full viewports
pub fn month(view: &MonthView, today: DateKey) -> String {
    let mut out = String::new();
    let width = CELL_WIDTH * 7;
    let _ = writeln!(out, "{:^width$}", view.title);

    for initial in WEEKDAY_INITIALS {
        let _ = write!(out, " {initial:>2}   ");
    }
    out.push('\n');

    for week in view.weeks() {
        for rendered in week {
            out.push_str(&cell_text(rendered, today));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }

    let listed: Vec<_> = view
        .cells
        .iter()
        .filter_map(|rendered| match (&rendered.presentation, rendered.cell.date_key()) {
            (DayPresentation::Pills(pills), Some(key)) => Some((key, pills)),
            _ => None,
        })
        .collect();
    if !listed.is_empty() {
        out.push('\n');
    }
    for (key, pills) in listed {
        let mut prefix = format!("{:02} {}", key.day(), key.weekday().short_pt());
        for pill in pills {
            let _ = writeln!(out, "{prefix:<7} {pill}");
            prefix.clear();
        }
    }

    let pending = view.pending_count();
    if pending > 0 {
        let _ = writeln!(out, "\n{pending} evento(s) aguardando aprovação");
    }
    out
}

fn panel_body(out: &mut String, data: &PanelData, editing: bool) {
    let mode = if editing { "edição" } else { "visualização" };
    let _ = writeln!(out, "{}", data.header);
    let _ = writeln!(out, "{} · cor {} · {mode}", data.season, data.accent);

    if data.is_empty() {
        out.push_str("Nenhum evento para este dia.\n");
    }

    if let DayPresentation::Pills(pills) = &data.presentation {
        for pill in pills {
            match pill.role {
                PillRole::Event => {
                    let _ = write!(out, "  {pill}");
                    let event = data.events.iter().find(|event| event.id == pill.event_id);
                    if let Some(event) = event {
                        if event.is_pending() {
                            let _ = write!(out, " ({})", event.status);
                        }
                        if editing {
                            let _ = write!(out, "  [{}]", event.id);
                        }
                        if let Some(location) = &event.location {
                            let _ = write!(out, "\n      {location}");
                        }
                    }
                },
                PillRole::Schedule => {
                    let _ = write!(out, "      {pill}");
                },
            }
            out.push('\n');
        }
    }

    if data.can_create {
        out.push_str("[+] Adicionar evento\n");
    }
    if data.can_toggle {
        let other = if editing { "visualização" } else { "edição" };
        let _ = writeln!(out, "[~] Alternar para {other}");
    }
}

/// Day panel in whatever state it is in
pub fn panel(state: &PanelState) -> String {
    let mut out = String::new();
    match state {
        PanelState::Idle => out.push_str("Painel fechado\n"),
        PanelState::Loading { date_key, .. } => {
            let _ = writeln!(out, "Carregando {date_key}...");
        },
        PanelState::Viewing(data) => panel_body(&mut out, data, false),
        PanelState::Editing(data) => panel_body(&mut out, data, true),
        PanelState::Error {
            date_key, reason, ..
        } => {
            let _ = writeln!(out, "{date_key}: {}", reason.user_message());
            out.push_str("Tente novamente.\n");
        },
    }
    out
}

/// Horizontal bar per weekday, Sunday first
pub fn week(load: &WeeklyLoad, from: DateKey) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Semana de {:02}/{:02} a {}",
        from.day(),
        from.month(),
        from.plus_days(6)
    );
    for (weekday, initial) in Weekday::ALL.into_iter().zip(WEEKDAY_INITIALS) {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let bar = (load.ratio(weekday) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(out, "{initial} {:<BAR_WIDTH$} {}", "█".repeat(bar), load[weekday]);
    }
    let _ = writeln!(out, "Total: {}", load.total());
    out
}
