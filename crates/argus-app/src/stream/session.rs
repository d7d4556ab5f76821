use super::client::StreamClient;
use super::clock::ViewingClock;
use super::{StreamEvent, VideoFrame};

/// Where the stream actually is, as opposed to where the user wants it.
/// Driven by capture-thread lifecycle events, not by assumption.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Streaming,
    Failed(String),
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Idle => "OFFLINE",
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Streaming => "LIVE",
            ConnectionState::Failed(_) => "STREAM ERROR",
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            ConnectionState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Play intent, stream lifecycle, and viewing-time accounting.
///
/// `playing` tracks the user's last start/stop action and nothing else: the
/// display surface stays attached (and the clock keeps counting) while a
/// stream fails underneath it. Only an explicit stop detaches.
pub struct StreamSession {
    playing: bool,
    client: Option<StreamClient>,
    state: ConnectionState,
    clock: ViewingClock,
    frame_size: Option<(u32, u32)>,
    frames_shown: u64,
}

impl StreamSession {
    pub fn new() -> Self {
        Self {
            playing: false,
            client: None,
            state: ConnectionState::Idle,
            clock: ViewingClock::new(),
            frame_size: None,
            frames_shown: 0,
        }
    }

    /// The display surface is attached iff this returns true.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.frame_size
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }

    /// Attach to the endpoint. No-op while already playing.
    pub fn start(&mut self, url: &str) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.clock.resume();
        self.spawn_client(url);
    }

    /// Detach and tear the capture thread down. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.clock.pause();
        // Drop signals shutdown and joins the thread
        self.client = None;
        self.state = ConnectionState::Idle;
    }

    pub fn toggle(&mut self, url: &str) {
        if self.playing {
            self.stop();
        } else {
            self.start(url);
        }
    }

    /// Reconnect an active session to a (possibly new) endpoint. No-op while
    /// stopped; the next start picks the new URL up anyway.
    pub fn restart(&mut self, url: &str) {
        if !self.playing {
            return;
        }
        self.client = None;
        self.spawn_client(url);
    }

    /// Drain capture-thread events and return the newest frame, if any.
    pub fn poll(&mut self) -> Option<VideoFrame> {
        while let Some(event) = self.client.as_ref().and_then(StreamClient::try_recv_event) {
            self.apply_event(event);
        }

        let frame = self.client.as_ref().and_then(StreamClient::try_recv_frame);
        if let Some(ref f) = frame {
            self.frame_size = Some((f.width, f.height));
            self.frames_shown += 1;
        }
        frame
    }

    fn spawn_client(&mut self, url: &str) {
        match StreamClient::connect(url) {
            Ok(client) => {
                self.client = Some(client);
                self.state = ConnectionState::Connecting;
            }
            Err(e) => {
                log::error!("{e}");
                self.client = None;
                self.state = ConnectionState::Failed(e);
            }
        }
    }

    fn apply_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Connected { width, height } => {
                self.frame_size = Some((width, height));
                self.state = ConnectionState::Streaming;
            }
            StreamEvent::Ended => {
                self.client = None;
                self.state = ConnectionState::Failed("server closed the stream".into());
            }
            StreamEvent::Failed(reason) => {
                self.client = None;
                self.state = ConnectionState::Failed(reason);
            }
        }
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unroutable fast-fail endpoint; the capture thread exits on its own
    const DEAD_URL: &str = "http://127.0.0.1:1/video_feed";

    #[test]
    fn starts_detached_and_idle() {
        let session = StreamSession::new();
        assert!(!session.is_playing());
        assert_eq!(*session.state(), ConnectionState::Idle);
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn attached_iff_last_action_was_start() {
        let mut session = StreamSession::new();
        for _ in 0..3 {
            session.start(DEAD_URL);
            assert!(session.is_playing());
            session.stop();
            assert!(!session.is_playing());
        }
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut session = StreamSession::new();
        session.start(DEAD_URL);
        session.start(DEAD_URL);
        assert!(session.is_playing());
        session.stop();
        session.stop();
        assert!(!session.is_playing());
        assert_eq!(*session.state(), ConnectionState::Idle);
    }

    #[test]
    fn connected_event_marks_streaming() {
        let mut session = StreamSession::new();
        session.playing = true;
        session.apply_event(StreamEvent::Connected {
            width: 640,
            height: 480,
        });
        assert_eq!(*session.state(), ConnectionState::Streaming);
        assert_eq!(session.frame_size(), Some((640, 480)));
    }

    #[test]
    fn failure_keeps_surface_attached() {
        let mut session = StreamSession::new();
        session.playing = true;
        session.apply_event(StreamEvent::Failed("connection reset".into()));
        // Still playing: only an explicit stop detaches
        assert!(session.is_playing());
        assert_eq!(session.state().failure_reason(), Some("connection reset"));
    }

    #[test]
    fn server_end_maps_to_failed() {
        let mut session = StreamSession::new();
        session.playing = true;
        session.apply_event(StreamEvent::Ended);
        assert!(matches!(*session.state(), ConnectionState::Failed(_)));
    }

    #[test]
    fn stop_clears_failure() {
        let mut session = StreamSession::new();
        session.playing = true;
        session.clock.resume();
        session.apply_event(StreamEvent::Failed("boom".into()));
        session.stop();
        assert_eq!(*session.state(), ConnectionState::Idle);
    }

    #[test]
    fn state_labels() {
        assert_eq!(ConnectionState::Idle.label(), "OFFLINE");
        assert_eq!(ConnectionState::Connecting.label(), "CONNECTING");
        assert_eq!(ConnectionState::Streaming.label(), "LIVE");
        assert_eq!(ConnectionState::Failed("x".into()).label(), "STREAM ERROR");
    }
}
