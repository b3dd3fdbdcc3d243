//! Minimal HTTP/1.1 listener for the command endpoint.
//!
//! One request per connection (`Connection: close`). Bodies must be framed by
//! `Content-Length`; `Transfer-Encoding` is refused with `411`. Requests are
//! read with tokio; the endpoint itself runs on the blocking pool because
//! posting may wait on a full paint queue.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, error, info, warn};
use painter_engine::PaintLoop;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

use crate::handler::{self, Request, Response};

/// Largest accepted request body.
pub const MAX_BODY: usize = 1 << 20;
const MAX_HEADERS: usize = 64;

/// How long in-flight requests may take to finish once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Accepts connections until `shutdown` resolves, then waits up to
/// [`SHUTDOWN_GRACE`] for requests already accepted.
///
/// The paint loop must still be running while this drains, or a request
/// blocked on a full queue never completes.
pub async fn serve<F>(listener: TcpListener, paint_loop: Arc<PaintLoop>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!("accept failed: {e}");
                        continue;
                    }
                };
                debug!("connection from {peer}");

                let paint_loop = paint_loop.clone();
                connections.spawn(async move {
                    if let Err(e) = handle_connection(stream, paint_loop).await {
                        warn!("connection {peer}: {e:#}");
                    }
                });
            }
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            _ = &mut shutdown => break,
        }
    }

    drop(listener);
    info!("http: shutting down, {} request(s) in flight", connections.len());

    let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
        while connections.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        warn!("http: abandoning {} request(s) after grace period", connections.len());
        connections.abort_all();
    }
    Ok(())
}

async fn handle_connection(stream: TcpStream, paint_loop: Arc<PaintLoop>) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let response = match read_request(&mut reader, &mut write_half).await {
        Ok(request) => {
            debug!("{} {}", request.method, request.target);
            tokio::task::spawn_blocking(move || handler::handle(&paint_loop, &request))
                .await
                .unwrap_or_else(|e| {
                    error!("command handler failed: {e}");
                    Response::new(500, "Internal error")
                })
        }
        Err(RequestError::TooLarge) => Response::new(413, "Request body too large"),
        Err(RequestError::LengthRequired) => {
            Response::new(411, "Request body must be sent with Content-Length")
        }
        Err(RequestError::Malformed(e)) => Response::new(400, format!("Malformed request: {e:#}")),
    };

    write_response(&mut write_half, &response)
        .await
        .context("failed to write response")
}

#[derive(Debug)]
pub(crate) enum RequestError {
    Malformed(anyhow::Error),
    TooLarge,
    /// Body framed by `Transfer-Encoding` instead of `Content-Length`.
    LengthRequired,
}

impl From<anyhow::Error> for RequestError {
    fn from(e: anyhow::Error) -> Self {
        RequestError::Malformed(e)
    }
}

impl From<std::io::Error> for RequestError {
    fn from(e: std::io::Error) -> Self {
        RequestError::Malformed(e.into())
    }
}

/// Reads one request. `interim` receives `100 Continue` when the client asks
/// for it before sending an acceptable body.
pub(crate) async fn read_request<R, W>(reader: &mut R, interim: &mut W) -> Result<Request, RequestError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let request_line = read_line(reader).await?;
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(anyhow::anyhow!("bad request line {request_line:?}").into());
    };
    if !version.starts_with("HTTP/1.") {
        return Err(anyhow::anyhow!("unsupported version {version}").into());
    }
    let (method, target) = (method.to_string(), target.to_string());

    let mut content_length = 0usize;
    let mut chunked = false;
    let mut expect_continue = false;
    let mut headers = 0;
    loop {
        let line = read_line(reader).await?;
        if line.is_empty() {
            break;
        }
        headers += 1;
        if headers > MAX_HEADERS {
            return Err(anyhow::anyhow!("too many headers").into());
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(anyhow::anyhow!("bad header {line:?}").into());
        };
        let (name, value) = (name.trim(), value.trim());
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().context("bad Content-Length")?;
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            chunked = true;
        } else if name.eq_ignore_ascii_case("expect") {
            expect_continue = value.eq_ignore_ascii_case("100-continue");
        }
    }

    if chunked {
        return Err(RequestError::LengthRequired);
    }
    if content_length > MAX_BODY {
        return Err(RequestError::TooLarge);
    }

    if expect_continue && content_length > 0 {
        interim.write_all(b"HTTP/1.1 100 Continue\r\n\r\n").await?;
        interim.flush().await?;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    Ok(Request { method, target, body })
}

/// Reads one CRLF (or LF) terminated line without its terminator.
async fn read_line<R>(reader: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let n = (&mut *reader)
        .take(8 * 1024)
        .read_line(&mut line)
        .await
        .context("failed to read request")?;
    if n == 0 {
        bail!("connection closed mid-request");
    }
    if !line.ends_with('\n') {
        bail!("request line too long");
    }
    line.truncate(line.trim_end_matches(['\r', '\n']).len());
    Ok(line)
}

pub(crate) async fn write_response<W>(writer: &mut W, response: &Response) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.reason(),
        response.body.len()
    );
    writer.write_all(head.as_bytes()).await?;
    writer.write_all(response.body.as_bytes()).await?;
    writer.flush().await
}
