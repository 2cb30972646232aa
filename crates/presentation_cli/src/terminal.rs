//! Terminal front end for the map screen
//!
//! Prints camera moves, alerts and screen snapshots to stdout.

use std::fmt::Write as _;
use std::time::Duration;

use application::{Alert, MapControlPort, NotificationPort, ShellSnapshot};
use domain::{DirectionsForm, MapRegion, TransportMode, ViewMode};

/// Map camera that reports moves on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalMapControl;

impl MapControlPort for TerminalMapControl {
    fn animate_to_region(&self, region: MapRegion, duration: Duration) {
        println!("{}", describe_camera_move(&region, duration));
    }
}

/// Alerts printed to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl NotificationPort for TerminalNotifier {
    fn alert(&self, alert: &Alert) {
        println!("⚠️  {}\n   {}", alert.title, alert.message);
    }
}

/// One-line description of a camera animation
pub fn describe_camera_move(region: &MapRegion, duration: Duration) -> String {
    format!(
        "🎥 camera → {} (span {}°) over {}ms",
        region.center,
        region.latitude_delta,
        duration.as_millis()
    )
}

/// Human-readable rendering of the screen
pub fn render_snapshot(snapshot: &ShellSnapshot) -> String {
    let view = &snapshot.view;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "── {} mode · {} map · [{}] button {} ──",
        view.view_mode,
        view.map_type,
        view.view_mode.toggle_icon(),
        view.button_theme.background,
    );

    match view.view_mode {
        ViewMode::Search => {
            let search = &snapshot.search;
            let _ = writeln!(
                out,
                "🔍 \"{}\"{}{}",
                search.query_text,
                if search.is_loading { " (searching…)" } else { "" },
                if search.focused { " ▌" } else { "" },
            );
            for (i, suggestion) in search.suggestions.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "   {}. {} ({})",
                    i + 1,
                    suggestion.label,
                    suggestion.coordinate
                );
            }
        },
        ViewMode::Directions => {
            let modes: Vec<String> = TransportMode::ALL
                .iter()
                .map(|&mode| {
                    if mode == view.transport_mode {
                        format!("[{mode}]")
                    } else {
                        mode.to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, "🚦 {}", modes.join(" "));
            let _ = writeln!(
                out,
                "   from: {}",
                field_or(&view.directions.origin, DirectionsForm::ORIGIN_PLACEHOLDER)
            );
            let _ = writeln!(
                out,
                "   to:   {}",
                field_or(
                    &view.directions.destination,
                    DirectionsForm::DESTINATION_PLACEHOLDER
                )
            );
        },
    }

    for marker in &snapshot.scene.markers {
        let _ = writeln!(out, "📍 {}: {}", marker.title, marker.description);
    }

    out
}

fn field_or<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() { placeholder } else { text }
}
