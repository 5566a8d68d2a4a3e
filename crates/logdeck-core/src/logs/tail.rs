//! Live tail sessions.
//!
//! Opening a session reads a bounded priming window from the end of the
//! file and queues it as line events. After that the session waits on its
//! change subscription: in [`TailMode::Heartbeat`] every change becomes a
//! heartbeat, in [`TailMode::Follow`] the appended bytes are read and
//! emitted as lines.
//!
//! A session is a [`Stream`]. Dropping it (the HTTP layer does so when the
//! client disconnects) drops the subscription, which releases the watch.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::stream::{self, Stream};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::LogAccessError;
use super::lines::{RawLine, leading_skip, split_lines};
use crate::config::{LogAccessConfig, TailMode};
use crate::paths::PathGuard;
use crate::ports::{ChangeWatcher, FileChange, LogSource, MarkupConverter, WatchSubscription};

/// One item pushed to a live viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TailEvent {
    /// A log line, already converted to markup.
    Line(String),
    /// Content-free keep-alive signalling that the file changed.
    Heartbeat,
}

/// Opens live tail sessions.
pub struct LiveTailStreamer {
    source: Arc<dyn LogSource>,
    watcher: Arc<dyn ChangeWatcher>,
    markup: Arc<dyn MarkupConverter>,
    guard: PathGuard,
    config: LogAccessConfig,
}

impl LiveTailStreamer {
    pub fn new(
        source: Arc<dyn LogSource>,
        watcher: Arc<dyn ChangeWatcher>,
        markup: Arc<dyn MarkupConverter>,
        guard: PathGuard,
        config: LogAccessConfig,
    ) -> Self {
        Self {
            source,
            watcher,
            markup,
            guard,
            config,
        }
    }

    /// Validate `path`, prime from its tail and subscribe to its changes.
    pub async fn open_tail(&self, path: &str) -> Result<TailSession, LogAccessError> {
        let resolved = self.guard.resolve_file(path).await?;

        // Subscribe before priming so a write in between is not missed.
        let subscription = self.watcher.subscribe(&resolved)?;

        let size = self
            .source
            .size(&resolved)
            .await
            .map_err(|e| LogAccessError::io(&resolved, e))?;
        let start = size.saturating_sub(self.config.priming_window_bytes);
        let read_from = start.saturating_sub(1);
        let buf = self
            .source
            .read_range(&resolved, read_from, size)
            .await
            .map_err(|e| LogAccessError::io(&resolved, e))?;

        let lines = split_lines(&buf, start > 0);
        // Follow mode re-reads a line that is still being written.
        let unterminated = lines
            .last()
            .filter(|l| !l.is_terminated())
            .map_or(0, RawLine::span);
        let pending: VecDeque<TailEvent> = lines
            .iter()
            .map(|line| TailEvent::Line(self.markup.to_markup(&line.to_text())))
            .collect();

        let id = Uuid::new_v4();
        info!(
            session = %id,
            path = %resolved.display(),
            primed = pending.len(),
            mode = ?self.config.tail_mode,
            "Tail session opened"
        );

        let state = TailState {
            id,
            path: resolved,
            pending,
            subscription,
            mode: self.config.tail_mode,
            closing: false,
            offset: read_from + buf.len() as u64 - unterminated,
            delta_limit: self.config.priming_window_bytes.max(1),
            source: Arc::clone(&self.source),
            markup: Arc::clone(&self.markup),
        };

        Ok(TailSession::new(id, state))
    }
}

/// A live, per-client event stream over one file.
pub struct TailSession {
    id: Uuid,
    events: Pin<Box<dyn Stream<Item = TailEvent> + Send>>,
}

impl TailSession {
    fn new(id: Uuid, state: TailState) -> Self {
        let events = stream::unfold(state, |mut state| async move {
            let event = state.next_event().await?;
            Some((event, state))
        });
        Self {
            id,
            events: Box::pin(events),
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }
}

impl Stream for TailSession {
    type Item = TailEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for TailSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailSession")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

struct TailState {
    id: Uuid,
    path: PathBuf,
    pending: VecDeque<TailEvent>,
    subscription: WatchSubscription,
    mode: TailMode,
    /// Set once the file is gone; the session ends after `pending` drains.
    closing: bool,
    /// End of the last fully delivered line (follow mode only).
    offset: u64,
    delta_limit: u64,
    source: Arc<dyn LogSource>,
    markup: Arc<dyn MarkupConverter>,
}

impl TailState {
    async fn next_event(&mut self) -> Option<TailEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.closing {
                info!(session = %self.id, path = %self.path.display(), "Tail target removed; closing session");
                return None;
            }

            match self.subscription.next_change().await? {
                FileChange::Gone => self.closing = true,
                FileChange::Modified => match self.mode {
                    TailMode::Heartbeat => return Some(TailEvent::Heartbeat),
                    TailMode::Follow => {
                        // One read covers every change queued so far.
                        let gone = self.subscription.drain_pending() == Some(FileChange::Gone);
                        match self.read_appended().await {
                            Ok(()) => {}
                            Err(e) if gone => {
                                debug!(session = %self.id, error = %e, "Final read after removal failed");
                            }
                            Err(e) => {
                                warn!(session = %self.id, error = %e, "Tail read failed; closing session");
                                return None;
                            }
                        }
                        if gone {
                            self.closing = true;
                        } else if self.pending.is_empty() {
                            return Some(TailEvent::Heartbeat);
                        }
                    }
                },
            }
        }
    }

    /// Queue complete lines appended since `offset`.
    async fn read_appended(&mut self) -> Result<(), LogAccessError> {
        let size = self
            .source
            .size(&self.path)
            .await
            .map_err(|e| LogAccessError::io(&self.path, e))?;

        if size < self.offset {
            debug!(session = %self.id, size, offset = self.offset, "File truncated; following from start");
            self.offset = 0;
        }
        if size == self.offset {
            return Ok(());
        }

        // Too much appended at once: jump ahead and resync on a line boundary.
        // The look-behind byte keeps a line that starts exactly at the jump.
        let skip_ahead = size - self.offset > self.delta_limit;
        let start = if skip_ahead {
            let start = size - self.delta_limit - 1;
            debug!(session = %self.id, skipped = start - self.offset, "Tail fell behind; skipping ahead");
            start
        } else {
            self.offset
        };

        let buf = self
            .source
            .read_range(&self.path, start, size)
            .await
            .map_err(|e| LogAccessError::io(&self.path, e))?;

        let mut consumed = leading_skip(&buf, skip_ahead) as u64;
        for line in split_lines(&buf, skip_ahead) {
            // An unterminated tail is still being written; pick it up next time.
            if !line.is_terminated() {
                break;
            }
            consumed += line.span();
            self.pending
                .push_back(TailEvent::Line(self.markup.to_markup(&line.to_text())));
        }
        self.offset = start + consumed;
        Ok(())
    }
}

impl Drop for TailState {
    fn drop(&mut self) {
        debug!(session = %self.id, path = %self.path.display(), "Tail session closed; watch released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::FsLogSource;
    use crate::paths::PathGuardError;
    use crate::ports::markup::MockMarkupConverter;
    use crate::ports::{PassthroughMarkup, WatchError};
    use futures_util::{FutureExt, StreamExt};
    use std::fs::{self, OpenOptions};
    use std::io::Write;
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::{TempDir, tempdir};
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    /// Decrements the active-subscription counter when dropped.
    struct ActiveGuard(Arc<AtomicUsize>);

    impl Drop for ActiveGuard {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Change watcher driven by the test instead of the OS.
    #[derive(Default)]
    struct FakeWatcher {
        senders: Mutex<Vec<mpsc::Sender<FileChange>>>,
        active: Arc<AtomicUsize>,
    }

    impl FakeWatcher {
        fn emit(&self, change: FileChange) {
            for sender in self.senders.lock().unwrap().iter() {
                let _ = sender.try_send(change);
            }
        }

        fn active(&self) -> usize {
            self.active.load(Ordering::SeqCst)
        }
    }

    impl ChangeWatcher for FakeWatcher {
        fn subscribe(&self, _path: &Path) -> Result<WatchSubscription, WatchError> {
            let (tx, rx) = mpsc::channel(16);
            self.senders.lock().unwrap().push(tx);
            self.active.fetch_add(1, Ordering::SeqCst);
            Ok(WatchSubscription::new(rx, ActiveGuard(Arc::clone(&self.active))))
        }
    }

    fn config(priming: u64, mode: TailMode) -> LogAccessConfig {
        LogAccessConfig {
            priming_window_bytes: priming,
            tail_mode: mode,
            ..LogAccessConfig::default()
        }
    }

    fn streamer(
        watcher: Arc<FakeWatcher>,
        markup: Arc<dyn MarkupConverter>,
        config: LogAccessConfig,
    ) -> LiveTailStreamer {
        LiveTailStreamer::new(
            Arc::new(FsLogSource::new()),
            watcher,
            markup,
            PathGuard::unrestricted(),
            config,
        )
    }

    fn write_log(content: &[u8]) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app-out.log");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn append(path: &Path, content: &[u8]) {
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(content).unwrap();
    }

    /// Collect every event that is ready without waiting.
    fn drain_ready(session: &mut TailSession) -> Vec<TailEvent> {
        let mut events = Vec::new();
        while let Some(Some(event)) = session.next().now_or_never() {
            events.push(event);
        }
        events
    }

    async fn next(session: &mut TailSession) -> Option<TailEvent> {
        timeout(Duration::from_secs(2), session.next())
            .await
            .expect("tail event timed out")
    }

    fn line(text: &str) -> TailEvent {
        TailEvent::Line(text.to_string())
    }

    #[tokio::test]
    async fn test_priming_emits_lines_through_markup_in_order() {
        let (_dir, path) = write_log(b"one\ntwo\nthree\n");
        let mut markup = MockMarkupConverter::new();
        markup
            .expect_to_markup()
            .times(3)
            .returning(|l| format!("<b>{l}</b>"));

        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(watcher, Arc::new(markup), config(1024, TailMode::Heartbeat));

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(
            drain_ready(&mut session),
            vec![line("<b>one</b>"), line("<b>two</b>"), line("<b>three</b>")]
        );
    }

    #[tokio::test]
    async fn test_priming_never_exceeds_window() {
        let content: String = (0..20_000).map(|i| format!("entry number {i}\n")).collect();
        let (_dir, path) = write_log(content.as_bytes());
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(watcher, Arc::new(PassthroughMarkup), config(1024, TailMode::Heartbeat));

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        let events = drain_ready(&mut session);

        let emitted: usize = events
            .iter()
            .map(|e| match e {
                TailEvent::Line(l) => l.len() + 1,
                TailEvent::Heartbeat => 0,
            })
            .sum();
        assert!(!events.is_empty());
        assert!(emitted <= 1024, "emitted {emitted} bytes");
        assert_eq!(events.last(), Some(&line("entry number 19999")));
        // The partial line at the window edge is dropped, not emitted truncated.
        assert!(events.iter().all(|e| matches!(e, TailEvent::Line(l) if l.starts_with("entry number "))));
    }

    #[tokio::test]
    async fn test_change_emits_heartbeat_without_content() {
        let (_dir, path) = write_log(b"boot\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Heartbeat),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("boot")));

        append(&path, b"new line\n");
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(TailEvent::Heartbeat));
        assert!(drain_ready(&mut session).is_empty());
    }

    #[tokio::test]
    async fn test_removed_file_ends_session() {
        let (_dir, path) = write_log(b"");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Heartbeat),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        watcher.emit(FileChange::Gone);
        assert_eq!(next(&mut session).await, None);
    }

    #[tokio::test]
    async fn test_dropping_session_releases_subscription() {
        let (_dir, path) = write_log(b"a\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Heartbeat),
        );

        let session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(watcher.active(), 1);
        drop(session);
        assert_eq!(watcher.active(), 0);
    }

    #[tokio::test]
    async fn test_sessions_on_same_file_are_independent() {
        let (_dir, path) = write_log(b"");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Heartbeat),
        );

        let mut first = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        let mut second = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(watcher.active(), 2);

        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut first).await, Some(TailEvent::Heartbeat));
        assert_eq!(next(&mut second).await, Some(TailEvent::Heartbeat));

        drop(first);
        assert_eq!(watcher.active(), 1);
    }

    #[tokio::test]
    async fn test_follow_mode_emits_appended_complete_lines() {
        let (_dir, path) = write_log(b"old\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("old")));

        append(&path, b"x\ny\npart");
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(line("x")));
        assert_eq!(next(&mut session).await, Some(line("y")));

        append(&path, b"ial\n");
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(line("partial")));
    }

    #[tokio::test]
    async fn test_follow_mode_restarts_after_truncation() {
        let (_dir, path) = write_log(b"before rotation\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("before rotation")));

        fs::write(&path, b"fresh\n").unwrap();
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(line("fresh")));
    }

    #[tokio::test]
    async fn test_follow_mode_without_new_bytes_sends_heartbeat() {
        let (_dir, path) = write_log(b"steady\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("steady")));

        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(TailEvent::Heartbeat));
    }

    #[tokio::test]
    async fn test_follow_mode_delivers_last_write_then_ends_on_removal() {
        let (_dir, path) = write_log(b"first\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("first")));

        append(&path, b"last\n");
        watcher.emit(FileChange::Modified);
        watcher.emit(FileChange::Gone);
        assert_eq!(next(&mut session).await, Some(line("last")));
        assert_eq!(next(&mut session).await, None);
        drop(session);
        assert_eq!(watcher.active(), 0);
    }

    #[tokio::test]
    async fn test_follow_mode_ends_when_file_is_rotated_away() {
        let (dir, path) = write_log(b"first\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("first")));

        append(&path, b"last\n");
        fs::rename(&path, dir.path().join("app-out.log.1")).unwrap();
        fs::write(&path, b"").unwrap();
        watcher.emit(FileChange::Modified);
        watcher.emit(FileChange::Gone);

        let mut events = Vec::new();
        while let Some(event) = next(&mut session).await {
            events.push(event);
        }
        assert!(events.iter().all(|e| matches!(e, TailEvent::Line(_))));
    }

    #[tokio::test]
    async fn test_follow_mode_skips_ahead_when_far_behind() {
        let (_dir, path) = write_log(b"old\n");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(16, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();
        assert_eq!(next(&mut session).await, Some(line("old")));

        // 29 bytes in one write, more than the 16-byte window.
        append(&path, b"first line\nsecond line\nthird\n");
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(line("third")));
        assert!(drain_ready(&mut session).is_empty());

        // Back in step: the next small append is delivered in full.
        append(&path, b"more\n");
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(line("more")));
    }

    #[tokio::test]
    async fn test_follow_mode_skip_ahead_keeps_line_starting_at_jump() {
        let (_dir, path) = write_log(b"");
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(8, TailMode::Follow),
        );

        let mut session = streamer.open_tail(path.to_str().unwrap()).await.unwrap();

        // The window covers exactly the last line.
        append(&path, b"skipped\nkept123\n");
        watcher.emit(FileChange::Modified);
        assert_eq!(next(&mut session).await, Some(line("kept123")));
        assert!(drain_ready(&mut session).is_empty());
    }

    #[tokio::test]
    async fn test_open_missing_file_fails_without_subscribing() {
        let watcher = Arc::new(FakeWatcher::default());
        let streamer = streamer(
            Arc::clone(&watcher),
            Arc::new(PassthroughMarkup),
            config(1024, TailMode::Heartbeat),
        );

        let err = streamer.open_tail("/no/such/file.log").await.unwrap_err();
        assert!(matches!(err, LogAccessError::Path(PathGuardError::NotFound(_))));
        assert_eq!(watcher.active(), 0);
    }
}
