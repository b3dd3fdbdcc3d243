use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use painter_engine::logging::{init_logging, LoggingConfig};
use painter_engine::PaintLoop;
use painter_lang::parse_reader;
use tokio::net::TcpListener;

mod config;
mod handler;
mod http;
mod sink;

use config::StudioConfig;
use sink::{FrameSink, LogSink, PngSink};

#[tokio::main]
async fn main() -> Result<()> {
    let config = StudioConfig::from_env_and_args()?;
    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    info!("painter studio: {config:?}");

    let (sink, writer) = match &config.frames_dir {
        Some(dir) => {
            let (png, writer) = PngSink::spawn(dir)?;
            (FrameSink::Png(png), Some(writer))
        }
        None => (FrameSink::Log(LogSink::default()), None),
    };

    let paint_loop = Arc::new(PaintLoop::new(config.loop_config.clone(), sink));
    paint_loop.start()?;

    if let Some(path) = &config.script {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let ops = parse_reader(BufReader::new(file))
            .with_context(|| format!("invalid startup script {}", path.display()))?;
        info!("running {} operation(s) from {}", ops.len(), path.display());

        let startup = paint_loop.clone();
        tokio::task::spawn_blocking(move || startup.post_all(ops))
            .await
            .context("startup script task failed")?;
    }

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("listening on http://{}", listener.local_addr()?);

    http::serve(listener, paint_loop.clone(), shutdown_signal()).await?;

    let stopper = paint_loop.clone();
    tokio::task::spawn_blocking(move || stopper.stop_and_wait())
        .await
        .context("paint loop shutdown task failed")?;

    if let Some(writer) = writer {
        tokio::task::spawn_blocking(move || writer.finish())
            .await
            .context("png writer shutdown task failed")?;
    }

    info!("painter studio: bye");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received"),
        Err(e) => log::error!("failed to listen for ctrl-c: {e}"),
    }
}
