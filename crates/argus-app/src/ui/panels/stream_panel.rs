use egui::{RichText, Ui};

use super::StreamInfo;
use crate::stream::ConnectionState;
use crate::stream::clock::format_elapsed;
use crate::ui::theme::ThemeMode;
use crate::ui::theme::colors::theme_colors;
use crate::ui::theme::tokens::*;

pub fn draw_stream_panel(ui: &mut Ui, info: &StreamInfo, theme: ThemeMode) {
    let tc = theme_colors(ui.ctx());

    ui.heading("Source");
    ui.separator();
    draw_source_section(ui, info);

    ui.add_space(16.0);
    ui.heading("Connection");
    ui.separator();
    draw_connection_section(ui, info, &tc);

    ui.add_space(16.0);
    ui.heading("Appearance");
    ui.separator();
    draw_theme_picker(ui, theme);

    ui.add_space(16.0);
    ui.label(
        RichText::new("Space play/pause \u{b7} F fullscreen \u{b7} D panels")
            .size(SMALL_SIZE)
            .color(tc.text_secondary),
    );
}

fn draw_source_section(ui: &mut Ui, info: &StreamInfo) {
    // Edit buffer lives in egui temp data until applied
    let edit_id = egui::Id::new("stream_url_edit");
    let mut url: String = ui
        .ctx()
        .data(|d| d.get_temp(edit_id))
        .unwrap_or_else(|| info.url.clone());

    ui.add(
        egui::TextEdit::singleline(&mut url)
            .hint_text("http://host:port/video_feed")
            .desired_width(f32::INFINITY),
    );

    let dirty = url != info.url;
    ui.horizontal(|ui| {
        if ui.add_enabled(dirty, egui::Button::new("Apply")).clicked() {
            ui.ctx().data_mut(|d| {
                d.insert_temp(egui::Id::new("set_stream_url"), url.clone());
            });
        }
        if dirty && ui.button("Revert").clicked() {
            url = info.url.clone();
        }
    });

    ui.ctx().data_mut(|d| d.insert_temp(edit_id, url));

    if info.playing && dirty {
        let tc = theme_colors(ui.ctx());
        ui.label(
            RichText::new("Applying reconnects the live stream")
                .size(SMALL_SIZE)
                .color(tc.warning),
        );
    }
}

fn draw_connection_section(
    ui: &mut Ui,
    info: &StreamInfo,
    tc: &crate::ui::theme::colors::ThemeColors,
) {
    let state_color = match info.state {
        ConnectionState::Streaming => tc.success,
        ConnectionState::Connecting => tc.warning,
        ConnectionState::Failed(_) => tc.error,
        ConnectionState::Idle => tc.text_secondary,
    };
    ui.label(
        RichText::new(info.state.label())
            .size(BODY_SIZE)
            .color(state_color)
            .strong(),
    );

    if let Some(reason) = info.state.failure_reason() {
        ui.label(RichText::new(reason).size(SMALL_SIZE).color(tc.error));
    }

    ui.add_space(4.0);

    if let Some((w, h)) = info.frame_size {
        stat_row(ui, tc, "Resolution", &format!("{w}x{h}"));
    }
    stat_row(ui, tc, "Frames shown", &info.frames_shown.to_string());
    stat_row(ui, tc, "Viewing time", &format_elapsed(info.elapsed_secs));
}

fn stat_row(
    ui: &mut Ui,
    tc: &crate::ui::theme::colors::ThemeColors,
    name: &str,
    value: &str,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(name).size(SMALL_SIZE).color(tc.text_secondary));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).size(SMALL_SIZE).monospace());
        });
    });
}

fn draw_theme_picker(ui: &mut Ui, theme: ThemeMode) {
    let mut selected = theme;
    egui::ComboBox::from_label("Theme")
        .selected_text(selected.display_name())
        .show_ui(ui, |ui| {
            for mode in ThemeMode::ALL {
                ui.selectable_value(&mut selected, *mode, mode.display_name());
            }
        });
    if selected != theme {
        ui.ctx().data_mut(|d| {
            d.insert_temp(egui::Id::new("set_theme"), selected);
        });
    }
}
