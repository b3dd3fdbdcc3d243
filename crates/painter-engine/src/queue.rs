//! Bounded multi-producer, single-consumer command queue.
//!
//! Producers block in [`CommandQueue::push`] while the queue is full; that is
//! the system's only backpressure. The paint loop is the only consumer and
//! polls with [`CommandQueue::pop_timeout`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::op::Operation;

pub const DEFAULT_CAPACITY: usize = 1000;

pub struct CommandQueue {
    inner: Mutex<Inner>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

struct Inner {
    ops: VecDeque<Operation>,
    /// Set by [`CommandQueue::wake`]; consumed by the next empty poll.
    woken: bool,
}

impl CommandQueue {
    /// Creates a queue holding at most `capacity` operations (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                ops: VecDeque::with_capacity(capacity),
                woken: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.lock().ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().ops.is_empty()
    }

    /// Appends `op`, blocking while the queue is full.
    pub fn push(&self, op: Operation) {
        let mut inner = self.inner.lock();
        while inner.ops.len() >= self.capacity {
            self.not_full.wait(&mut inner);
        }
        inner.ops.push_back(op);
        drop(inner);

        self.not_empty.notify_one();
    }

    /// Takes the oldest operation, waiting up to `timeout` for one to arrive.
    ///
    /// Returns `None` on timeout, or early if [`wake`](Self::wake) was called
    /// while the queue was empty.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<Operation> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock();

        loop {
            if let Some(op) = inner.ops.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Some(op);
            }

            if std::mem::take(&mut inner.woken) {
                return None;
            }

            if self.not_empty.wait_until(&mut inner, deadline).timed_out() {
                let op = inner.ops.pop_front();
                drop(inner);
                if op.is_some() {
                    self.not_full.notify_one();
                }
                return op;
            }
        }
    }

    /// Interrupts a consumer blocked in [`pop_timeout`](Self::pop_timeout) on
    /// an empty queue.
    pub fn wake(&self) {
        self.inner.lock().woken = true;
        self.not_empty.notify_all();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
