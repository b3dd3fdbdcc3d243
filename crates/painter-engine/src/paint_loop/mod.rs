//! Paint loop: the single consumer of the command queue.
//!
//! Lifecycle: `Stopped → Running → Stopping → Stopped`.
//!
//! - [`PaintLoop::start`] allocates both surfaces and a default [`State`], then
//!   spawns the consumer thread. Starting a running loop is a no-op.
//! - [`PaintLoop::post`] enqueues from any thread, blocking while the queue is
//!   full. Operations posted while stopped wait for the next start.
//! - [`PaintLoop::stop_and_wait`] requests a stop and blocks until the consumer
//!   has drained the queue and exited. Safe to call repeatedly and from many
//!   threads.
//!
//! The consumer owns the state and both surfaces; nothing else can reach
//! them. Each operation is applied to the active surface; when one asks for a
//! publish the scene is fully repainted, handed to the [`RenderSink`] and the
//! surfaces swap roles.

mod completion;
mod config;
mod frames;

pub use config::LoopConfig;

use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use log::{debug, info, trace, warn};
use parking_lot::Mutex;

use crate::op::Operation;
use crate::queue::CommandQueue;
use crate::render::repaint;
use crate::scene::State;
use crate::sink::RenderSink;
use crate::time::FrameClock;

use completion::Completion;
use frames::FramePair;

/// Lifecycle phase of a [`PaintLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Stopped,
    Running,
    /// Stop requested; the consumer is draining the queue.
    Stopping,
}

pub struct PaintLoop {
    shared: Arc<Shared>,
}

struct Shared {
    config: LoopConfig,
    queue: CommandQueue,
    sink: Box<dyn RenderSink>,
    lifecycle: Mutex<Lifecycle>,
}

struct Lifecycle {
    phase: Phase,
    /// Completion of the current or most recent run.
    done: Option<Arc<Completion>>,
    runs: u64,
}

impl Shared {
    /// Exit condition, checked before every receive.
    fn should_exit(&self) -> bool {
        let lifecycle = self.lifecycle.lock();
        lifecycle.phase == Phase::Stopping && self.queue.is_empty()
    }
}

impl PaintLoop {
    pub fn new<S>(config: LoopConfig, sink: S) -> Self
    where
        S: RenderSink + 'static,
    {
        let queue = CommandQueue::new(config.queue_capacity);
        Self {
            shared: Arc::new(Shared {
                config,
                queue,
                sink: Box::new(sink),
                lifecycle: Mutex::new(Lifecycle {
                    phase: Phase::Stopped,
                    done: None,
                    runs: 0,
                }),
            }),
        }
    }

    #[inline]
    pub fn config(&self) -> &LoopConfig {
        &self.shared.config
    }

    pub fn phase(&self) -> Phase {
        self.shared.lifecycle.lock().phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Number of operations waiting to be applied.
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    /// Starts the consumer. No-op while a run is active or still draining.
    ///
    /// Fails only if the surfaces cannot be allocated or the thread cannot be
    /// spawned; both are fatal for the host.
    pub fn start(&self) -> Result<()> {
        let mut lifecycle = self.shared.lifecycle.lock();
        if lifecycle.phase != Phase::Stopped {
            debug!("paint loop: start ignored ({:?})", lifecycle.phase);
            return Ok(());
        }

        let size = self.shared.config.size;
        let frames = FramePair::new(size).context("failed to allocate paint surfaces")?;

        let run = lifecycle.runs + 1;
        let done = Arc::new(Completion::default());
        let consumer = Consumer {
            shared: self.shared.clone(),
            frames,
            state: State::default(),
            clock: FrameClock::new(),
        };
        let exit_shared = self.shared.clone();
        let exit_done = done.clone();

        thread::Builder::new()
            .name("paint-loop".to_string())
            .spawn(move || {
                // Armed on the consumer thread only, so a failed spawn leaves
                // the lifecycle untouched.
                let exit = ExitGuard {
                    shared: exit_shared,
                    done: exit_done,
                    run,
                };
                consumer.run(exit);
            })
            .context("failed to spawn paint loop thread")?;

        lifecycle.runs = run;
        lifecycle.phase = Phase::Running;
        lifecycle.done = Some(done);

        info!(
            "paint loop: run {run} started ({}x{}, queue {})",
            size.width,
            size.height,
            self.shared.queue.capacity()
        );
        Ok(())
    }

    /// Enqueues `op`, blocking while the queue is full.
    ///
    /// Operations are applied in the order they arrive. Nothing is applied
    /// before the loop is started.
    pub fn post(&self, op: Operation) {
        trace!("paint loop: post {op:?}");
        self.shared.queue.push(op);
    }

    /// Enqueues a batch back to back, preserving its order.
    pub fn post_all(&self, ops: impl IntoIterator<Item = Operation>) {
        for op in ops {
            self.post(op);
        }
    }

    /// Requests a stop and waits until the consumer has drained and exited.
    ///
    /// Returns immediately if the loop was never started.
    pub fn stop_and_wait(&self) {
        let done = {
            let mut lifecycle = self.shared.lifecycle.lock();
            if lifecycle.phase == Phase::Running {
                lifecycle.phase = Phase::Stopping;
                info!(
                    "paint loop: stop requested ({} pending)",
                    self.shared.queue.len()
                );
                self.shared.queue.wake();
            }
            lifecycle.done.clone()
        };

        if let Some(done) = done {
            done.wait();
        }
    }
}

impl Drop for PaintLoop {
    fn drop(&mut self) {
        self.stop_and_wait();
    }
}

/// Consumer-side state; lives on the loop thread only.
struct Consumer {
    shared: Arc<Shared>,
    frames: FramePair,
    state: State,
    clock: FrameClock,
}

impl Consumer {
    fn run(mut self, exit: ExitGuard) {
        debug!("paint loop: consumer {} running", exit.run);
        let poll = self.shared.config.poll_interval;

        while !self.shared.should_exit() {
            if let Some(op) = self.shared.queue.pop_timeout(poll) {
                self.process(&op);
            }
        }

        info!(
            "paint loop: run {} drained after {} frame(s)",
            exit.run,
            self.clock.frames()
        );

        // Release the surfaces before signalling completion.
        drop(self);
        drop(exit);
    }

    fn process(&mut self, op: &Operation) {
        trace!("paint loop: apply {op:?}");
        if !op.apply(self.frames.active_mut(), &mut self.state) {
            return;
        }

        repaint(self.frames.active_mut(), &self.state);
        let ft = self.clock.tick();
        self.shared.sink.publish(self.frames.active());
        self.frames.swap();

        match ft.since_last {
            Some(dt) => debug!(
                "paint loop: published frame {} ({:.1} ms since previous)",
                ft.frame_index,
                dt.as_secs_f64() * 1000.0
            ),
            None => debug!("paint loop: published frame {}", ft.frame_index),
        }
    }
}

/// Marks the run stopped and fires its completion, also when the consumer
/// unwinds out of a panicking sink or hook.
struct ExitGuard {
    shared: Arc<Shared>,
    done: Arc<Completion>,
    run: u64,
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            warn!("paint loop: run {} aborted by panic", self.run);
        }

        self.shared.lifecycle.lock().phase = Phase::Stopped;
        self.done.fire();
        info!("paint loop: run {} stopped", self.run);
    }
}

#[cfg(test)]
mod tests;
