//! Frame sinks for the studio host.
//!
//! The PNG sink copies each published frame and hands the copy to a writer
//! thread, so the paint loop only pays for a memcpy per frame.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use painter_engine::coords::Size;
use painter_engine::{RenderSink, Surface};

/// Frames buffered between the loop and the writer before the loop blocks.
const WRITE_QUEUE: usize = 8;

/// Sink chosen at startup.
pub enum FrameSink {
    Png(PngSink),
    Log(LogSink),
}

impl RenderSink for FrameSink {
    fn publish(&self, frame: &Surface) {
        match self {
            FrameSink::Png(sink) => sink.publish(frame),
            FrameSink::Log(sink) => sink.publish(frame),
        }
    }
}

// ── Log ───────────────────────────────────────────────────────────────────

/// Records publishes without keeping pixels.
#[derive(Default)]
pub struct LogSink {
    frames: AtomicU64,
}

impl RenderSink for LogSink {
    fn publish(&self, frame: &Surface) {
        let n = self.frames.fetch_add(1, Ordering::Relaxed);
        let size = frame.size();
        info!("frame {n} published ({}x{})", size.width, size.height);
    }
}

// ── PNG ───────────────────────────────────────────────────────────────────

struct FrameCopy {
    index: u64,
    size: Size,
    rgba: Vec<u8>,
}

type SenderSlot = Arc<Mutex<Option<SyncSender<FrameCopy>>>>;

pub struct PngSink {
    tx: SenderSlot,
    next_index: AtomicU64,
}

/// Owns the PNG writer thread; [`finish`](PngWriter::finish) flushes it.
pub struct PngWriter {
    tx: SenderSlot,
    handle: Option<JoinHandle<()>>,
}

impl PngSink {
    /// Creates `dir` if needed and spawns the writer thread.
    pub fn spawn(dir: impl Into<PathBuf>) -> Result<(PngSink, PngWriter)> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create frames dir {}", dir.display()))?;

        let (tx, rx) = sync_channel(WRITE_QUEUE);
        let tx: SenderSlot = Arc::new(Mutex::new(Some(tx)));

        let handle = thread::Builder::new()
            .name("png-writer".to_string())
            .spawn(move || write_frames(&dir, rx))
            .context("failed to spawn png writer thread")?;

        let sink = PngSink { tx: tx.clone(), next_index: AtomicU64::new(0) };
        let writer = PngWriter { tx, handle: Some(handle) };
        Ok((sink, writer))
    }
}

impl RenderSink for PngSink {
    fn publish(&self, frame: &Surface) {
        let copy = FrameCopy {
            index: self.next_index.fetch_add(1, Ordering::Relaxed),
            size: frame.size(),
            rgba: frame.as_bytes().to_vec(),
        };

        let Ok(guard) = self.tx.lock() else {
            return;
        };
        let Some(tx) = guard.as_ref() else {
            debug!("png sink closed; dropping frame {}", copy.index);
            return;
        };

        match tx.try_send(copy) {
            Ok(()) => {}
            Err(TrySendError::Full(copy)) => {
                // Writer is behind: wait for it rather than drop frames.
                if tx.send(copy).is_err() {
                    warn!("png writer gone; frame dropped");
                }
            }
            Err(TrySendError::Disconnected(_)) => warn!("png writer gone; frame dropped"),
        }
    }
}

impl PngWriter {
    /// Closes the sink side and waits for queued frames to be written.
    pub fn finish(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Ok(mut slot) = self.tx.lock() {
            slot.take();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("png writer thread panicked");
            }
        }
    }
}

impl Drop for PngWriter {
    fn drop(&mut self) {
        self.close();
    }
}

fn write_frames(dir: &Path, rx: Receiver<FrameCopy>) {
    info!("png writer: writing frames to {}", dir.display());
    let mut written = 0u64;

    for frame in rx {
        let path = dir.join(format!("frame-{:06}.png", frame.index));
        match save_png(&path, frame) {
            Ok(()) => {
                written += 1;
                debug!("png writer: wrote {}", path.display());
            }
            Err(e) => error!("png writer: {e:#}"),
        }
    }

    info!("png writer: done, {written} frame(s) written");
}

fn save_png(path: &Path, frame: FrameCopy) -> Result<()> {
    let image = image::RgbaImage::from_raw(frame.size.width, frame.size.height, frame.rgba)
        .context("frame buffer does not match its dimensions")?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
