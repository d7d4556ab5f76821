mod app;
mod gpu;
mod settings;
mod stream;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use app::App;
use ui::theme::ThemeMode;

struct ArgusApp {
    app: Option<App>,
    window: Option<Arc<Window>>,
}

impl ArgusApp {
    fn new() -> Self {
        Self {
            app: None,
            window: None,
        }
    }
}

impl ApplicationHandler for ArgusApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Argus")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(attrs).expect("Failed to create window"));

        // Center window on primary monitor
        if let Some(monitor) = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
        {
            let monitor_size = monitor.size();
            let window_size = window.outer_size();
            let monitor_pos = monitor.position();
            let x = (monitor_size.width.saturating_sub(window_size.width)) / 2;
            let y = (monitor_size.height.saturating_sub(window_size.height)) / 2;
            window.set_outer_position(winit::dpi::PhysicalPosition::new(
                monitor_pos.x + x as i32,
                monitor_pos.y + y as i32,
            ));
        }

        self.window = Some(window.clone());

        match App::new(window) {
            Ok(app) => {
                self.app = Some(app);
                log::info!("Argus initialized");
            }
            Err(e) => {
                log::error!("Failed to initialize app: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        // Let egui handle events first
        let egui_consumed = app.egui_overlay.handle_event(&app.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if !egui_consumed || !app.egui_overlay.wants_keyboard() => match key {
                KeyCode::Escape => {
                    // Leave fullscreen if active, otherwise quit
                    if app.window.fullscreen().is_some() {
                        app.window.set_fullscreen(None);
                    } else {
                        event_loop.exit();
                    }
                }
                KeyCode::Space => {
                    app.toggle_playback();
                }
                KeyCode::KeyF => {
                    app.toggle_fullscreen();
                }
                KeyCode::KeyD => {
                    app.egui_overlay.toggle_visible();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                app.update();

                let info = app.stream_info();

                app.egui_overlay.begin_frame(&app.window);
                {
                    let ctx = app.egui_overlay.context();
                    ui::panels::draw_panels(
                        &ctx,
                        app.egui_overlay.visible,
                        &info,
                        app.egui_overlay.theme,
                    );
                }
                app.egui_overlay.end_frame(&app.window);

                // Drain UI signals
                let ctx = app.egui_overlay.context();

                let toggle_playback: Option<bool> =
                    ctx.data_mut(|d| d.remove_temp(egui::Id::new("toggle_playback")));
                if toggle_playback.is_some() {
                    app.toggle_playback();
                }

                let toggle_fullscreen: Option<bool> =
                    ctx.data_mut(|d| d.remove_temp(egui::Id::new("toggle_fullscreen")));
                if toggle_fullscreen.is_some() {
                    app.toggle_fullscreen();
                }

                let set_url: Option<String> =
                    ctx.data_mut(|d| d.remove_temp(egui::Id::new("set_stream_url")));
                if let Some(url) = set_url {
                    app.set_stream_url(url);
                }

                let set_theme: Option<ThemeMode> =
                    ctx.data_mut(|d| d.remove_temp(egui::Id::new("set_theme")));
                if let Some(theme) = set_theme {
                    app.egui_overlay.set_theme(theme);
                    app.settings.theme = theme;
                    app.settings.save();
                }

                match app.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let w = app.gpu.surface_config.width;
                        let h = app.gpu.surface_config.height;
                        app.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("Surface error: {e}");
                    }
                }

                app.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = ArgusApp::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
