use std::io::BufReader;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;
use ureq::Agent;
use ureq::http::header::CONTENT_TYPE;

use super::multipart::{self, FrameReader, FramingError};
use super::{StreamEvent, VideoFrame};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_CONSECUTIVE_DECODE_FAILURES: u32 = 10;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("request failed: {0}")]
    Connect(#[from] ureq::Error),
    #[error("endpoint returned '{0}', expected multipart/x-mixed-replace")]
    NotMultipart(String),
    #[error("content type has no boundary parameter")]
    MissingBoundary,
    #[error(transparent)]
    Framing(#[from] FramingError),
    #[error("frame decode failed {0} times in a row")]
    DecodeStorm(u32),
}

/// Live MJPEG capture running on a dedicated thread.
///
/// Frames arrive on a bounded channel; the consumer drains to the latest and
/// stale frames are dropped at the sender. Lifecycle events arrive on a
/// separate channel. Dropping the client signals shutdown and joins the
/// thread, so nothing can deliver after teardown.
pub struct StreamClient {
    frame_rx: Receiver<VideoFrame>,
    event_rx: Receiver<StreamEvent>,
    shutdown: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
    pub url: String,
}

impl StreamClient {
    /// Spawn the capture thread for the given endpoint. Connection happens
    /// on the thread; failures surface as a `StreamEvent::Failed`.
    pub fn connect(url: &str) -> Result<Self, String> {
        let (frame_tx, frame_rx) = crossbeam_channel::bounded(2);
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let thread_url = url.to_string();

        let handle = std::thread::Builder::new()
            .name("stream-capture".into())
            .spawn(move || {
                match capture_thread(&thread_url, &frame_tx, &event_tx, &shutdown_clone) {
                    Ok(()) => {}
                    Err(e) => {
                        if !shutdown_clone.load(Ordering::Relaxed) {
                            log::error!("Stream failed: {e}");
                            let _ = event_tx.send(StreamEvent::Failed(e.to_string()));
                        }
                    }
                }
            })
            .map_err(|e| format!("Failed to spawn stream thread: {e}"))?;

        Ok(Self {
            frame_rx,
            event_rx,
            shutdown,
            thread: Some(handle),
            url: url.to_string(),
        })
    }

    /// Non-blocking read of the latest frame, dropping any older ones.
    pub fn try_recv_frame(&self) -> Option<VideoFrame> {
        let mut latest = None;
        while let Ok(frame) = self.frame_rx.try_recv() {
            latest = Some(frame);
        }
        latest
    }

    /// Non-blocking read of the next lifecycle event.
    pub fn try_recv_event(&self) -> Option<StreamEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Signal shutdown and join the capture thread.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_thread(
    url: &str,
    frame_tx: &Sender<VideoFrame>,
    event_tx: &Sender<StreamEvent>,
    shutdown: &AtomicBool,
) -> Result<(), StreamError> {
    // Connect timeout only. The body is an endless stream, so no global or
    // read deadline may apply to it.
    let agent: Agent = Agent::config_builder()
        .timeout_connect(Some(CONNECT_TIMEOUT))
        .build()
        .into();

    let response = agent.get(url).call()?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !multipart::is_mixed_replace(&content_type) {
        return Err(StreamError::NotMultipart(content_type));
    }
    let boundary =
        multipart::boundary_param(&content_type).ok_or(StreamError::MissingBoundary)?;

    log::info!("Stream connected: {url} (boundary \"{boundary}\")");

    let reader = BufReader::new(response.into_body().into_reader());
    let mut frames = FrameReader::new(reader, &boundary);

    let mut announced = false;
    let mut consecutive_failures: u32 = 0;

    while !shutdown.load(Ordering::Relaxed) {
        let Some(jpeg) = frames.next_frame()? else {
            log::info!("Stream ended by server: {url}");
            let _ = event_tx.send(StreamEvent::Ended);
            return Ok(());
        };

        match decode_frame(&jpeg) {
            Ok(frame) => {
                consecutive_failures = 0;
                if !announced {
                    announced = true;
                    log::info!("First frame decoded: {}x{}", frame.width, frame.height);
                    let _ = event_tx.send(StreamEvent::Connected {
                        width: frame.width,
                        height: frame.height,
                    });
                }
                // try_send: drop frame if the consumer is behind
                let _ = frame_tx.try_send(frame);
            }
            Err(e) => {
                consecutive_failures += 1;
                log::warn!(
                    "Skipped undecodable frame: {e} \
                     ({consecutive_failures}/{MAX_CONSECUTIVE_DECODE_FAILURES})"
                );
                if consecutive_failures >= MAX_CONSECUTIVE_DECODE_FAILURES {
                    return Err(StreamError::DecodeStorm(consecutive_failures));
                }
            }
        }
    }

    log::info!("Stream capture stopped");
    Ok(())
}

fn decode_frame(jpeg: &[u8]) -> Result<VideoFrame, image::ImageError> {
    let img = image::load_from_memory_with_format(jpeg, image::ImageFormat::Jpeg)?.into_rgba8();
    let (width, height) = img.dimensions();
    Ok(VideoFrame {
        data: img.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_frame(b"not a jpeg").is_err());
    }

    #[test]
    fn decode_roundtrips_a_real_jpeg() {
        // Encode a tiny image with the same crate, then decode it as a frame
        let mut jpeg = Vec::new();
        let img = image::RgbImage::from_pixel(4, 2, image::Rgb([200, 10, 10]));
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90)
            .encode_image(&img)
            .unwrap();

        let frame = decode_frame(&jpeg).unwrap();
        assert_eq!((frame.width, frame.height), (4, 2));
        assert_eq!(frame.data.len(), 4 * 2 * 4);
    }
}
