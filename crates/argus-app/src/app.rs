use std::sync::Arc;

use anyhow::Result;
use winit::window::{Fullscreen, Window};

use crate::gpu::{GpuContext, VideoSurface};
use crate::settings::SettingsConfig;
use crate::stream::StreamSession;
use crate::ui::EguiOverlay;
use crate::ui::panels::StreamInfo;

pub struct App {
    pub gpu: GpuContext,
    pub video: VideoSurface,
    pub session: StreamSession,
    pub settings: SettingsConfig,
    pub egui_overlay: EguiOverlay,
    pub window: Arc<Window>,
}

impl App {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let settings = SettingsConfig::load();
        let gpu = GpuContext::new(window.clone())?;
        let video = VideoSurface::new(
            &gpu.device,
            gpu.format,
            gpu.surface_config.width,
            gpu.surface_config.height,
        );
        let egui_overlay = EguiOverlay::new(&gpu.device, gpu.format, &window, settings.theme);

        Ok(Self {
            gpu,
            video,
            session: StreamSession::new(),
            settings,
            egui_overlay,
            window,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.video.resize(&self.gpu.queue, width, height);
        self.egui_overlay
            .resize(width, height, self.window.scale_factor() as f32);
    }

    /// Per-frame work: keep the display surface attached exactly while
    /// playing, then drain the capture thread.
    pub fn update(&mut self) {
        self.video.set_attached(self.session.is_playing());
        if let Some(frame) = self.session.poll() {
            self.video
                .upload_frame(&self.gpu.device, &self.gpu.queue, &frame);
        }
    }

    /// Snapshot for the UI. The fullscreen flag is read back from the window
    /// so exits through any path (Esc, window manager) stay in sync.
    pub fn stream_info(&self) -> StreamInfo {
        StreamInfo {
            playing: self.session.is_playing(),
            state: self.session.state().clone(),
            elapsed_secs: self.session.elapsed_secs(),
            frame_size: self.session.frame_size(),
            frames_shown: self.session.frames_shown(),
            url: self.settings.stream_url.clone(),
            fullscreen: self.window.fullscreen().is_some(),
        }
    }

    pub fn toggle_playback(&mut self) {
        let url = self.settings.stream_url.clone();
        self.session.toggle(&url);
    }

    pub fn set_stream_url(&mut self, url: String) {
        log::info!("Stream URL set: {url}");
        self.settings.stream_url = url.clone();
        self.settings.save();
        self.session.restart(&url);
    }

    pub fn toggle_fullscreen(&self) {
        if self.window.fullscreen().is_some() {
            self.window.set_fullscreen(None);
        } else {
            self.window
                .set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("argus-encoder"),
            });

        // Video first, egui overlay on top
        self.video.render(&mut encoder, &surface_view);
        self.egui_overlay
            .render(&self.gpu.device, &self.gpu.queue, &mut encoder, &surface_view);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
