use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use painter_engine::coords::Size;
use painter_engine::LoopConfig;

/// Studio configuration.
///
/// Sources, later ones winning:
/// 1. defaults
/// 2. `PAINTER_ADDR`, `PAINTER_FRAMES_DIR`, `PAINTER_SIZE` (`WxH`), `PAINTER_QUEUE`,
///    `PAINTER_LOG` (an `env_logger` filter)
/// 3. one optional positional argument: a script file run at startup
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub addr: SocketAddr,
    /// Where published frames are written as PNG. `None` only logs them.
    pub frames_dir: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub loop_config: LoopConfig,
    /// Overrides `RUST_LOG` when set.
    pub log_filter: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 17000)),
            frames_dir: None,
            script: None,
            loop_config: LoopConfig::default(),
            log_filter: None,
        }
    }
}

impl StudioConfig {
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    pub(crate) fn from_sources<E, A>(env: E, mut args: A) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
        A: Iterator<Item = String>,
    {
        let mut config = Self::default();

        if let Some(addr) = env("PAINTER_ADDR") {
            config.addr = addr
                .parse()
                .with_context(|| format!("PAINTER_ADDR: invalid socket address {addr:?}"))?;
        }
        if let Some(dir) = env("PAINTER_FRAMES_DIR").filter(|d| !d.is_empty()) {
            config.frames_dir = Some(PathBuf::from(dir));
        }
        if let Some(size) = env("PAINTER_SIZE") {
            config.loop_config.size =
                parse_size(&size).with_context(|| format!("PAINTER_SIZE: invalid size {size:?}"))?;
        }
        if let Some(capacity) = env("PAINTER_QUEUE") {
            config.loop_config.queue_capacity = capacity
                .parse()
                .with_context(|| format!("PAINTER_QUEUE: invalid capacity {capacity:?}"))?;
        }

        config.log_filter = env("PAINTER_LOG").filter(|f| !f.is_empty());

        config.script = args.next().map(PathBuf::from);
        if let Some(extra) = args.next() {
            bail!("unexpected argument {extra:?}; usage: painter-studio [SCRIPT]");
        }

        Ok(config)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `800x800`.
fn parse_size(s: &str) -> Result<Size> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT");
    };
    let size = Size::new(w.trim().parse()?, h.trim().parse()?);
    if !size.is_valid() {
        bail!("dimensions must be non-zero");
    }
    Ok(size)
}
