//! The poll loop.
//!
//! A [`Monitor`] captures a baseline of the channel's video ids, then keeps
//! polling until the number of ids missing from the baseline reaches the
//! threshold. The baseline is never rolled forward.

pub mod clock;

pub use clock::{Clock, TokioClock};

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::config::DEFAULT_CHECK_DELAY;
use crate::domain::{self, Snapshot};

/// Anything that can list the videos currently published by a channel.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn ids_for_channel(&self, channel_id: &str) -> Result<Snapshot>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Done,
}

/// Outcome of a finished [`Monitor::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorReport {
    pub new_videos: Snapshot,
    /// Feed requests made, baseline included.
    pub polls: usize,
    pub waits: usize,
}

pub struct Monitor<'a> {
    source: &'a dyn VideoSource,
    clock: &'a dyn Clock,
    channel: &'a str,
    threshold: u32,
    check_delay: Duration,
}

impl<'a> Monitor<'a> {
    pub fn new(source: &'a dyn VideoSource, clock: &'a dyn Clock, channel: &'a str) -> Self {
        Self {
            source,
            clock,
            channel,
            threshold: 1,
            check_delay: Duration::from_secs(DEFAULT_CHECK_DELAY),
        }
    }

    /// Number of new videos to wait for.
    pub fn threshold(mut self, n: u32) -> Self {
        self.threshold = n;
        self
    }

    pub fn check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = delay;
        self
    }

    fn next_state(&self, new_count: usize) -> MonitorState {
        if new_count >= self.threshold as usize {
            MonitorState::Done
        } else {
            MonitorState::Running
        }
    }

    /// Poll until the threshold is met. Errors from the source end the loop.
    pub async fn run(&self) -> Result<MonitorReport> {
        tracing::info!("Pulling info for channel: {}", self.channel);

        let baseline = self.source.ids_for_channel(self.channel).await?;
        let mut current = baseline.clone();
        let mut report = MonitorReport {
            polls: 1,
            ..Default::default()
        };
        tracing::debug!("Baseline has {} videos", baseline.len());

        tracing::warn!(
            "Waiting for {} new video{}",
            self.threshold,
            if self.threshold > 1 { "s" } else { "" }
        );

        let mut state = MonitorState::Running;
        while state == MonitorState::Running {
            report.new_videos = domain::new_videos(&current, &baseline);
            let found = report.new_videos.len();
            tracing::warn!(
                "Found {} new video{}",
                found,
                if found != 1 { "s" } else { "" }
            );
            if found > 0 {
                tracing::info!("New videos: {:?}", report.new_videos);
            }

            state = self.next_state(found);
            if state == MonitorState::Done {
                break;
            }

            let next_check = chrono::Duration::from_std(self.check_delay)
                .ok()
                .and_then(|delay| self.clock.now().checked_add_signed(delay));
            if let Some(next_check) = next_check {
                tracing::info!("Next check at {}", next_check.format("%Y-%m-%d %H:%M:%S"));
            }
            self.clock.wait(self.check_delay).await;
            report.waits += 1;

            current = self.source.ids_for_channel(self.channel).await?;
            report.polls += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeZone};
    use tracing_subscriber::filter::LevelFilter;

    use super::*;
    use crate::app::MonitorError;
    use crate::logging::FileSink;

    fn snapshot(ids: &[&str]) -> Snapshot {
        ids.iter().map(|id| id.to_string()).collect()
    }

    /// Returns queued poll results in order, then fails.
    struct ScriptedSource {
        polls: Mutex<VecDeque<Result<Snapshot>>>,
    }

    impl ScriptedSource {
        fn new(polls: Vec<Result<Snapshot>>) -> Self {
            Self {
                polls: Mutex::new(polls.into()),
            }
        }
    }

    #[async_trait]
    impl VideoSource for ScriptedSource {
        async fn ids_for_channel(&self, _channel_id: &str) -> Result<Snapshot> {
            self.polls
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(MonitorError::Other("no more polls".into())))
        }
    }

    /// Records waits and advances its notion of now instead of sleeping.
    struct FakeClock {
        now: Mutex<DateTime<Local>>,
        waits: Mutex<Vec<Duration>>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
                waits: Mutex::new(Vec::new()),
            }
        }

        fn waits(&self) -> Vec<Duration> {
            self.waits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Local> {
            *self.now.lock().unwrap()
        }

        async fn wait(&self, duration: Duration) {
            let mut now = self.now.lock().unwrap();
            if let Some(next) = chrono::Duration::from_std(duration)
                .ok()
                .and_then(|delay| now.checked_add_signed(delay))
            {
                *now = next;
            }
            self.waits.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn test_new_video_on_later_poll() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(&["A", "B"])),
            Ok(snapshot(&["A", "B"])),
            Ok(snapshot(&["A", "B", "C"])),
        ]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123").check_delay(Duration::from_secs(30));

        let report = tokio_test::block_on(monitor.run()).unwrap();

        assert_eq!(report.new_videos, snapshot(&["C"]));
        assert_eq!(report.polls, 3);
        assert_eq!(report.waits, 2);
        assert_eq!(clock.waits(), vec![Duration::from_secs(30); 2]);
    }

    #[test]
    fn test_removed_videos_never_count() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(&["A", "B"])),
            Ok(snapshot(&["A"])),
            Ok(snapshot(&[])),
            Ok(snapshot(&["B", "D"])),
        ]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123");

        let report = tokio_test::block_on(monitor.run()).unwrap();

        assert_eq!(report.new_videos, snapshot(&["D"]));
        assert_eq!(report.polls, 4);
    }

    #[test]
    fn test_threshold_counts_against_frozen_baseline() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(&["A"])),
            Ok(snapshot(&["A", "B"])),
            Ok(snapshot(&["A", "C"])),
            Ok(snapshot(&["B", "C"])),
        ]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123").threshold(2);

        let report = tokio_test::block_on(monitor.run()).unwrap();

        assert_eq!(report.new_videos, snapshot(&["B", "C"]));
        assert_eq!(report.waits, 3);
    }

    #[test]
    fn test_zero_threshold_exits_without_waiting() {
        let source = ScriptedSource::new(vec![Ok(snapshot(&["A"]))]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123").threshold(0);

        let report = tokio_test::block_on(monitor.run()).unwrap();

        assert!(report.new_videos.is_empty());
        assert_eq!(report.polls, 1);
        assert!(clock.waits().is_empty());
    }

    #[test]
    fn test_met_threshold_after_one_wait_stops_immediately() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(&["A"])),
            Ok(snapshot(&["A", "B"])),
        ]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123");

        let report = tokio_test::block_on(monitor.run()).unwrap();

        assert_eq!(report.new_videos, snapshot(&["B"]));
        assert_eq!(clock.waits().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_error_propagates() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(&["A"])),
            Err(MonitorError::FeedParse("broken".into())),
        ]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123");

        let err = monitor.run().await.unwrap_err();
        assert!(matches!(err, MonitorError::FeedParse(_)));
        assert_eq!(clock.waits().len(), 1);
    }

    #[tokio::test]
    async fn test_baseline_error_propagates_without_waiting() {
        let source = ScriptedSource::new(vec![]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123");

        assert!(monitor.run().await.is_err());
        assert!(clock.waits().is_empty());
    }

    #[test]
    fn test_huge_delay_does_not_overflow_next_check() {
        let source = ScriptedSource::new(vec![
            Ok(snapshot(&["A"])),
            Ok(snapshot(&["A", "B"])),
        ]);
        let clock = FakeClock::new();
        let delay = Duration::from_secs(10_000_000_000_000);
        let monitor = Monitor::new(&source, &clock, "UC123").check_delay(delay);
        let subscriber =
            crate::logging::subscriber(LevelFilter::INFO, FileSink::Off, std::io::sink).unwrap();

        let report = tracing::subscriber::with_default(subscriber, || {
            tokio_test::block_on(monitor.run())
        })
        .unwrap();

        assert_eq!(report.new_videos, snapshot(&["B"]));
        assert_eq!(clock.waits(), vec![delay]);
    }

    #[test]
    fn test_next_state() {
        let source = ScriptedSource::new(vec![]);
        let clock = FakeClock::new();
        let monitor = Monitor::new(&source, &clock, "UC123").threshold(2);

        assert_eq!(monitor.next_state(0), MonitorState::Running);
        assert_eq!(monitor.next_state(1), MonitorState::Running);
        assert_eq!(monitor.next_state(2), MonitorState::Done);
        assert_eq!(monitor.next_state(3), MonitorState::Done);
    }
}
