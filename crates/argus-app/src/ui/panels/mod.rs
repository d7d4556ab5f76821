pub mod control_bar;
pub mod stream_panel;

use egui::{Align2, Context, RichText};

use crate::stream::ConnectionState;
use crate::ui::theme::ThemeMode;
use crate::ui::theme::colors::theme_colors;
use crate::ui::theme::tokens::*;

/// Snapshot of session state for UI (avoids borrow conflicts).
#[derive(Debug, Clone)]
pub struct StreamInfo {
    pub playing: bool,
    pub state: ConnectionState,
    pub elapsed_secs: u64,
    pub frame_size: Option<(u32, u32)>,
    pub frames_shown: u64,
    pub url: String,
    pub fullscreen: bool,
}

/// Draw the center status overlay plus, when the overlay is visible, the
/// control bar and stream panel.
pub fn draw_panels(ctx: &Context, visible: bool, info: &StreamInfo, theme: ThemeMode) {
    draw_status_overlay(ctx, info);

    if !visible {
        return;
    }

    egui::TopBottomPanel::bottom("control_bar").show(ctx, |ui| {
        control_bar::draw_control_bar(ui, info);
    });

    egui::SidePanel::right("stream_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            stream_panel::draw_stream_panel(ui, info, theme);
        });
}

/// Placeholder over the video area: paused card while detached, progress
/// while connecting, failure reason when the stream died.
fn draw_status_overlay(ctx: &Context, info: &StreamInfo) {
    let tc = theme_colors(ctx);

    let (headline, detail, color) = if !info.playing {
        (
            "STREAM PAUSED".to_string(),
            format!("Press play to connect to {}", info.url),
            tc.text_secondary,
        )
    } else {
        match &info.state {
            ConnectionState::Connecting => (
                "CONNECTING\u{2026}".to_string(),
                info.url.clone(),
                tc.warning,
            ),
            ConnectionState::Failed(reason) => {
                ("STREAM ERROR".to_string(), reason.clone(), tc.error)
            }
            // Live frames underneath; nothing to overlay
            ConnectionState::Streaming | ConnectionState::Idle => return,
        }
    };

    egui::Area::new(egui::Id::new("stream_status_overlay"))
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(headline).size(HEADING_SIZE).color(color).strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new(detail)
                        .size(SMALL_SIZE)
                        .color(tc.text_secondary),
                );
            });
        });
}
