use egui::{Color32, CornerRadius, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

use super::StreamInfo;
use crate::stream::ConnectionState;
use crate::stream::clock::format_elapsed;
use crate::ui::theme::colors::theme_colors;
use crate::ui::theme::tokens::*;

const ICON_BUTTON_SIZE: f32 = 28.0;

pub fn draw_control_bar(ui: &mut Ui, info: &StreamInfo) {
    let tc = theme_colors(ui.ctx());

    ui.horizontal(|ui| {
        if draw_play_button(ui, info.playing) {
            ui.ctx().data_mut(|d| {
                d.insert_temp(egui::Id::new("toggle_playback"), true);
            });
        }

        // Elapsed viewing time, frozen while paused
        ui.label(
            RichText::new(format_elapsed(info.elapsed_secs))
                .monospace()
                .size(MONO_SIZE)
                .strong(),
        );

        ui.separator();
        draw_status_indicator(ui, &info.state);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if draw_fullscreen_button(ui, info.fullscreen) {
                ui.ctx().data_mut(|d| {
                    d.insert_temp(egui::Id::new("toggle_fullscreen"), true);
                });
            }

            if let Some((w, h)) = info.frame_size {
                ui.label(
                    RichText::new(format!("{w}x{h}"))
                        .size(SMALL_SIZE)
                        .color(tc.text_secondary),
                );
            }
        });
    });
}

/// Dot + label for the connection state (dot idles gray while offline).
fn draw_status_indicator(ui: &mut Ui, state: &ConnectionState) {
    let tc = theme_colors(ui.ctx());
    let dot_color = match state {
        ConnectionState::Streaming => tc.success,
        ConnectionState::Connecting => tc.warning,
        ConnectionState::Failed(_) => tc.error,
        ConnectionState::Idle => Color32::from_rgb(0x55, 0x55, 0x55),
    };

    let (dot_rect, _) = ui.allocate_exact_size(Vec2::new(8.0, 8.0), Sense::hover());
    ui.painter().circle_filled(dot_rect.center(), 3.0, dot_color);

    let text_color = match state {
        ConnectionState::Failed(_) => tc.error,
        _ => tc.text_secondary,
    };
    ui.label(
        RichText::new(state.label())
            .size(SMALL_SIZE)
            .color(text_color)
            .strong(),
    );
}

/// Painted play/pause icon button. Returns true on click.
fn draw_play_button(ui: &mut Ui, playing: bool) -> bool {
    let tc = theme_colors(ui.ctx());
    let (rect, response) = ui.allocate_exact_size(
        Vec2::splat(ICON_BUTTON_SIZE),
        Sense::click(),
    );

    if response.hovered() {
        ui.painter()
            .rect_filled(rect, CornerRadius::same(WIDGET_ROUNDING), tc.widget_bg);
    }

    let center = rect.center();
    let icon_size = rect.width() * 0.5;

    if playing {
        // Pause icon (two vertical bars)
        let bar_width = icon_size * 0.25;
        let gap = icon_size * 0.25;
        let left_bar = Rect::from_center_size(
            Pos2::new(center.x - gap / 2.0 - bar_width / 2.0, center.y),
            Vec2::new(bar_width, icon_size),
        );
        let right_bar = Rect::from_center_size(
            Pos2::new(center.x + gap / 2.0 + bar_width / 2.0, center.y),
            Vec2::new(bar_width, icon_size),
        );
        ui.painter()
            .rect_filled(left_bar, CornerRadius::same(2), tc.text_primary);
        ui.painter()
            .rect_filled(right_bar, CornerRadius::same(2), tc.text_primary);
    } else {
        // Play icon (triangle pointing right)
        let points = vec![
            Pos2::new(center.x - icon_size * 0.4, center.y - icon_size * 0.5),
            Pos2::new(center.x - icon_size * 0.4, center.y + icon_size * 0.5),
            Pos2::new(center.x + icon_size * 0.5, center.y),
        ];
        ui.painter()
            .add(egui::Shape::convex_polygon(points, tc.accent, Stroke::NONE));
    }

    response.clicked()
}

/// Painted fullscreen icon button (four corner brackets). Returns true on
/// click. Brackets point inward while fullscreen, outward otherwise.
fn draw_fullscreen_button(ui: &mut Ui, fullscreen: bool) -> bool {
    let tc = theme_colors(ui.ctx());
    let (rect, response) = ui.allocate_exact_size(
        Vec2::splat(ICON_BUTTON_SIZE),
        Sense::click(),
    );

    if response.hovered() {
        ui.painter()
            .rect_filled(rect, CornerRadius::same(WIDGET_ROUNDING), tc.widget_bg);
    }

    let stroke = Stroke::new(2.0, tc.text_primary);
    let icon = rect.shrink(rect.width() * 0.28);
    let arm = icon.width() * 0.4;

    for (corner, dx, dy) in [
        (icon.left_top(), 1.0, 1.0),
        (icon.right_top(), -1.0, 1.0),
        (icon.left_bottom(), 1.0, -1.0),
        (icon.right_bottom(), -1.0, -1.0),
    ] {
        let (origin, sign) = if fullscreen {
            // Inward-pointing brackets: draw from inside the icon outward
            (
                Pos2::new(corner.x + dx * arm, corner.y + dy * arm),
                -1.0,
            )
        } else {
            (corner, 1.0)
        };
        ui.painter().line_segment(
            [origin, Pos2::new(origin.x + sign * dx * arm, origin.y)],
            stroke,
        );
        ui.painter().line_segment(
            [origin, Pos2::new(origin.x, origin.y + sign * dy * arm)],
            stroke,
        );
    }

    response.clicked()
}
