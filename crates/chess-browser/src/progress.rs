//! Progress reporting for long-running uploads.
//!
//! The upload runs on a blocking worker and reports through a
//! [`ProgressSink`]. [`ChannelProgress`] forwards the events to an async
//! receiver; [`ProgressTracker`] turns them into milestones worth logging.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Receives progress notifications from a worker.
pub trait ProgressSink {
    /// Announces how many work steps there are.
    fn set_total(&mut self, total: usize);
    /// Marks one work step as completed.
    fn step(&mut self);
}

/// A sink that discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_total(&mut self, _total: usize) {}
    fn step(&mut self) {}
}

/// A progress notification sent over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Total(usize),
    Step,
}

/// Sends progress events to the receiver returned by [`channel()`].
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: UnboundedSender<ProgressEvent>,
}

impl ProgressSink for ChannelProgress {
    fn set_total(&mut self, total: usize) {
        // A dropped receiver only means nobody is watching.
        let _ = self.tx.send(ProgressEvent::Total(total));
    }

    fn step(&mut self) {
        let _ = self.tx.send(ProgressEvent::Step);
    }
}

/// Creates a connected sink and receiver. The receiver yields `None` once
/// the sink is dropped.
pub fn channel() -> (ChannelProgress, UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelProgress { tx }, rx)
}

/// Counts completed steps against the announced total.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    total: usize,
    done: usize,
}

impl ProgressTracker {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn done(&self) -> usize {
        self.done
    }

    /// Completed fraction as a whole percentage (100 when there is no work).
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.done.min(self.total) * 100 / self.total
        }
    }

    /// Applies an event and returns `true` when a tenth of the work (or all
    /// of it) has just been completed.
    pub fn apply(&mut self, event: ProgressEvent) -> bool {
        match event {
            ProgressEvent::Total(total) => {
                self.total = total;
                self.done = 0;
                false
            }
            ProgressEvent::Step => {
                self.done += 1;
                let interval = (self.total / 10).max(1);
                self.done == self.total || self.done % interval == 0
            }
        }
    }
}
