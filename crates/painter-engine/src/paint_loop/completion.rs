use parking_lot::{Condvar, Mutex};

/// One-shot signal fired when a loop run has fully exited.
///
/// Fires at most once; any number of threads may wait, before or after.
#[derive(Default)]
pub(crate) struct Completion {
    fired: Mutex<bool>,
    cv: Condvar,
}

impl Completion {
    pub(crate) fn fire(&self) {
        let mut fired = self.fired.lock();
        if *fired {
            return;
        }
        *fired = true;
        drop(fired);

        self.cv.notify_all();
    }

    pub(crate) fn wait(&self) {
        let mut fired = self.fired.lock();
        while !*fired {
            self.cv.wait(&mut fired);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_fired(&self) -> bool {
        *self.fired.lock()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn wait_after_fire_returns() {
        let c = Completion::default();
        c.fire();
        c.fire();
        c.wait();
        assert!(c.is_fired());
    }

    #[test]
    fn releases_every_waiter() {
        let c = Arc::new(Completion::default());
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let c = c.clone();
                thread::spawn(move || c.wait())
            })
            .collect();

        c.fire();
        for w in waiters {
            w.join().unwrap();
        }
    }
}
