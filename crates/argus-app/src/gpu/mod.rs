pub mod context;
pub mod video_blit;

pub use context::GpuContext;
pub use video_blit::VideoSurface;
