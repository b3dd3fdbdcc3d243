//! Command endpoint semantics, independent of the socket plumbing.
//!
//! - `GET /?cmd=<script>`: script from the url-encoded `cmd` query parameter
//! - `POST /`: script from the request body
//!
//! A script that fails to parse is rejected whole with `400`; nothing from it
//! reaches the paint loop.

use log::{debug, warn};
use painter_engine::PaintLoop;
use painter_lang::parse_str;
use url::form_urlencoded;

/// A parsed HTTP request, reduced to what the endpoint needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    /// Request target as sent, e.g. `/?cmd=white%0Aupdate`.
    pub target: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            405 => "Method Not Allowed",
            411 => "Length Required",
            413 => "Payload Too Large",
            _ => "Internal Server Error",
        }
    }
}

pub const ACCEPTED: &str = "Commands received and posted to the event loop";

/// Parses the request's script and posts every operation, in order.
///
/// Blocks while the paint loop's queue is full; call from a thread that may
/// block.
pub fn handle(paint_loop: &PaintLoop, request: &Request) -> Response {
    let script = match script_of(request) {
        Ok(script) => script,
        Err(response) => return response,
    };

    let ops = match parse_str(&script) {
        Ok(ops) => ops,
        Err(err) => {
            warn!("bad script: {err}");
            return Response::new(400, format!("Error parsing commands: {err}"));
        }
    };

    debug!("posting {} operation(s)", ops.len());
    paint_loop.post_all(ops);
    Response::new(200, ACCEPTED)
}

fn script_of(request: &Request) -> Result<String, Response> {
    match request.method.as_str() {
        "GET" => Ok(cmd_param(&request.target).unwrap_or_default()),
        "POST" => String::from_utf8(request.body.clone())
            .map_err(|_| Response::new(400, "Error parsing commands: body is not valid UTF-8")),
        other => Err(Response::new(405, format!("Method {other} not allowed"))),
    }
}

/// First `cmd` value of the target's form-encoded query.
///
/// Malformed escapes survive decoding literally and fail in the parser.
fn cmd_param(target: &str) -> Option<String> {
    let query = target.split_once('?').map_or("", |(_, q)| q);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "cmd")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    use painter_engine::coords::Point;
    use painter_engine::paint::Color;
    use painter_engine::{LoopConfig, Surface};

    use super::*;

    fn get(target: &str) -> Request {
        Request { method: "GET".into(), target: target.into(), body: Vec::new() }
    }

    fn post(body: &str) -> Request {
        Request { method: "POST".into(), target: "/".into(), body: body.as_bytes().to_vec() }
    }

    fn running() -> (PaintLoop, Receiver<Surface>) {
        let (tx, rx) = mpsc::sync_channel(16);
        let paint_loop = PaintLoop::new(LoopConfig::default(), move |frame: &Surface| {
            let _ = tx.try_send(frame.clone());
        });
        paint_loop.start().unwrap();
        (paint_loop, rx)
    }

    // ── query ─────────────────────────────────────────────────────────────

    #[test]
    fn decodes_plus_and_escapes() {
        assert_eq!(
            cmd_param("/?cmd=figure+0.5%200.5%0Aupdate").as_deref(),
            Some("figure 0.5 0.5\nupdate")
        );
    }

    #[test]
    fn finds_cmd_among_params() {
        assert_eq!(cmd_param("/?a=1&cmd=white&cmd=green").as_deref(), Some("white"));
        assert_eq!(cmd_param("/?a=1"), None);
        assert_eq!(cmd_param("/"), None);
    }

    // ── endpoint ──────────────────────────────────────────────────────────

    #[test]
    fn get_posts_script() {
        let (paint_loop, rx) = running();
        let response = handle(&paint_loop, &get("/?cmd=white%0Afigure+0.5+0.5%0Aupdate"));
        assert_eq!(response, Response::new(200, ACCEPTED));

        let frame = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(frame.pixel(Point::new(400, 400)), Some(Color::YELLOW));
        assert_eq!(frame.pixel(Point::new(10, 10)), Some(Color::WHITE));
        paint_loop.stop_and_wait();
    }

    #[test]
    fn post_body_is_the_script() {
        let (paint_loop, rx) = running();
        let response = handle(&paint_loop, &post("green\nbgrect 0.25 0.25 0.75 0.75\nupdate\n"));
        assert_eq!(response.status, 200);

        let frame = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(frame.pixel(Point::new(100, 100)), Some(Color::GREEN));
        assert_eq!(frame.pixel(Point::new(400, 400)), Some(Color::BLACK));
        paint_loop.stop_and_wait();
    }

    #[test]
    fn bad_script_posts_nothing() {
        let (paint_loop, rx) = running();
        let response = handle(&paint_loop, &post("white\nupdate\nfill red"));
        assert_eq!(response.status, 400);
        assert!(response.body.starts_with("Error parsing commands: line 3"));

        paint_loop.stop_and_wait();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_cmd_is_an_empty_batch() {
        let (paint_loop, _rx) = running();
        assert_eq!(handle(&paint_loop, &get("/")).status, 200);
        assert_eq!(paint_loop.pending(), 0);
        paint_loop.stop_and_wait();
    }

    #[test]
    fn bad_escape_is_rejected() {
        let (paint_loop, _rx) = running();
        let response = handle(&paint_loop, &get("/?cmd=%G0"));
        assert_eq!(response.status, 400);
        assert!(response.body.starts_with("Error parsing commands:"));
        assert_eq!(paint_loop.pending(), 0);
        paint_loop.stop_and_wait();
    }

    #[test]
    fn other_methods_are_not_allowed() {
        let (paint_loop, _rx) = running();
        let mut request = post("white");
        request.method = "DELETE".into();
        let response = handle(&paint_loop, &request);
        assert_eq!(response.status, 405);
        assert_eq!(response.reason(), "Method Not Allowed");
        paint_loop.stop_and_wait();
    }
}
