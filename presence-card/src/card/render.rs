use super::{project, CardView, Highlight};
use crate::controller::ControllerState;

use chrono::{DateTime, Utc};
use model::user::ActivityType;
use std::fmt::Write;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const BAR_WIDTH: usize = 24;

/// Draws the whole card, controls included, as plain terminal text.
pub fn render(state: &ControllerState, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let view = state
        .current_snapshot
        .as_ref()
        .and_then(|snapshot| project(snapshot, now));

    match (&view, &state.current_snapshot) {
        (Some(view), _) => render_card(&mut out, view),
        (None, None) if state.is_fetching => out.push_str("Loading…\n"),
        (None, _) => out.push_str("No data\n"),
    }

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "\n{}Error: {}{} (press r to retry)", RED, error, RESET);
    }

    out.push('\n');
    render_controls(&mut out, state, now);

    out
}

fn render_card(out: &mut String, view: &CardView) {
    let _ = write!(out, "{}●{} {}", view.accent.ansi(), RESET, view.display_name);
    if let Some(tag) = &view.tag {
        let _ = write!(out, " {}{}{}", DIM, tag, RESET);
    }
    out.push('\n');

    let _ = writeln!(out, "{}{}{}", DIM, view.avatar_url, RESET);

    if let Some(custom_status) = &view.custom_status {
        let _ = writeln!(out, "“{}”", custom_status);
    }

    if let Some(guild) = &view.guild {
        let _ = writeln!(out, "in {}", guild.name);
    }

    if !view.highlights.is_empty() {
        out.push('\n');
        for highlight in &view.highlights {
            render_highlight(out, highlight);
        }
    }

    if let Some(voice) = &view.voice {
        let _ = write!(out, "\nIn voice channel");
        if voice.muted {
            out.push_str(" (muted)");
        }
        if voice.deafened {
            out.push_str(" (deafened)");
        }
        out.push('\n');
    }

    if !view.roles.is_empty() {
        out.push('\n');
        let badges: Vec<String> = view
            .roles
            .iter()
            .map(|role| format!("{}{}{}", ansi_hex(&role.colour), role.name, RESET))
            .collect();
        let _ = writeln!(out, "{}", badges.join(" · "));
    }
}

fn render_highlight(out: &mut String, highlight: &Highlight) {
    let _ = writeln!(out, "{}", highlight.headline);

    if highlight.kind != ActivityType::Listening {
        return;
    }

    if let Some(detail) = &highlight.detail {
        let _ = writeln!(out, "  {}", detail);
    }
    if let Some(state_text) = &highlight.state_text {
        let _ = writeln!(out, "  {}{}{}", DIM, state_text, RESET);
    }
    if let Some(progress) = highlight.progress {
        let _ = writeln!(out, "  {}", progress_bar(progress));
    }
}

fn render_controls(out: &mut String, state: &ControllerState, now: DateTime<Utc>) {
    let _ = write!(
        out,
        "{}[r] refresh  [a] auto: {}  [i <ms>] every {}s",
        DIM,
        if state.auto_refresh_enabled { "on" } else { "off" },
        state.interval_millis as f64 / 1000.0,
    );

    if state.is_fetching {
        out.push_str("  ⟳");
    }

    if let Some(updated) = state.last_updated {
        let _ = write!(out, "  updated {}", ago(now, updated));
    }

    let _ = writeln!(out, "{}", RESET);
}

pub(super) fn progress_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        progress * 100.0
    )
}

pub(super) fn ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);

    match secs {
        0..=4 => "just now".to_owned(),
        5..=59 => format!("{}s ago", secs),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    }
}

/// `#rrggbb` to a 24-bit ANSI foreground escape
fn ansi_hex(hex: &str) -> String {
    let rgb = u32::from_str_radix(hex.trim_start_matches('#'), 16).unwrap_or(0x4b5563);
    format!(
        "\x1b[38;2;{};{};{}m",
        (rgb >> 16) & 0xff,
        (rgb >> 8) & 0xff,
        rgb & 0xff
    )
}
