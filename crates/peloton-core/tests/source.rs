// File: crates/peloton-core/tests/source.rs
// Purpose: HTTP and file sources against a local one-shot server, plus the background loader.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::time::Duration;

use peloton_core::source::source_for;
use peloton_core::{load_in_background, DataSource, FileSource, HttpSource};

const FIXTURE: &str = include_str!("fixtures/cyclists.json");
// well-formed JSON structure, but the Doping string is not UTF-8
const NOT_UTF8: &[u8] = b"[{\"Year\":1994,\"Time\":\"40:00\",\"Doping\":\"\xff\xfe\"}]";

/// Serve exactly one response on a loopback port and return its URL.
fn serve_once(status: &'static str, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => seen.extend_from_slice(&buf[..n]),
            }
        }
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(head.as_bytes()).and_then(|()| stream.write_all(body));
    });
    format!("http://{addr}/cyclist-data.json")
}

#[test]
fn http_source_loads_dataset() {
    let url = serve_once("200 OK", FIXTURE.as_bytes());
    let ds = HttpSource::new(url).with_timeout(Duration::from_secs(5)).load().expect("load");
    assert_eq!(ds.len(), 6);
}

#[test]
fn http_error_status_is_network_failure() {
    let url = serve_once("404 Not Found", b"missing");
    let err = HttpSource::new(&url).load().expect_err("404 must fail");
    assert!(err.is_network(), "{err:?}");
    assert!(err.to_string().starts_with("Failed to fetch data"));
    assert!(err.to_string().contains("404"));
}

#[test]
fn unparseable_body_is_format_failure() {
    let url = serve_once("200 OK", b"<html>oops</html>");
    let err = HttpSource::new(url).load().expect_err("html is not a dataset");
    assert!(err.is_format(), "{err:?}");
}

#[test]
fn refused_connection_is_network_failure() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };
    let err = HttpSource::new(format!("http://{addr}/data.json"))
        .with_timeout(Duration::from_secs(2))
        .load()
        .expect_err("nothing is listening");
    assert!(err.is_network(), "{err:?}");
}

#[test]
fn file_source_reads_local_json() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(FIXTURE.as_bytes()).expect("write");
    let source = FileSource::new(file.path());
    assert_eq!(source.describe(), file.path().display().to_string());
    assert_eq!(source.load().expect("load").len(), 6);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = FileSource::new(dir.path().join("absent.json")).load().expect_err("absent");
    assert!(!err.is_format());
}

#[test]
fn source_for_picks_by_scheme() {
    let timeout = Duration::from_secs(1);
    assert_eq!(source_for("https://example.org/d.json", timeout).describe(), "https://example.org/d.json");
    assert_eq!(source_for("data/cyclists.json", timeout).describe(), "data/cyclists.json");
}

#[test]
fn background_loader_delivers_once() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(FIXTURE.as_bytes()).expect("write");
    let (tx, rx) = mpsc::channel();
    let handle = load_in_background(FileSource::new(file.path()), move |result| {
        tx.send(result.map(|ds| ds.len())).expect("receiver alive");
    })
    .expect("spawn");
    handle.join().expect("loader thread");

    let got = rx.recv_timeout(Duration::from_secs(5)).expect("one result");
    assert_eq!(got.expect("load ok"), 6);
    assert!(rx.try_recv().is_err());
}

#[test]
fn background_loader_reports_failure() {
    let url = serve_once("500 Internal Server Error", b"");
    let (tx, rx) = mpsc::channel();
    let handle = load_in_background(source_for(&url, Duration::from_secs(5)), move |result| {
        let _ = tx.send(result);
    })
    .expect("spawn");
    handle.join().expect("loader thread");
    let err = rx.recv().expect("one result").expect_err("500 must fail");
    assert!(err.is_network());
}

#[test]
fn non_utf8_body_is_format_failure() {
    let url = serve_once("200 OK", NOT_UTF8);
    let err = HttpSource::new(url).load().expect_err("invalid utf-8");
    assert!(err.is_format(), "{err:?}");
}

#[test]
fn non_utf8_file_is_format_failure() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(NOT_UTF8).expect("write");
    let err = FileSource::new(file.path()).load().expect_err("invalid utf-8");
    assert!(err.is_format(), "{err:?}");
}

#[test]
fn oversized_body_is_rejected_not_truncated() {
    let url = serve_once("200 OK", FIXTURE.as_bytes());
    let err = HttpSource::new(url).with_max_bytes(64).load().expect_err("too large");
    assert!(err.is_format(), "{err:?}");
    assert!(err.to_string().contains("exceeds 64 bytes"), "{err}");

    let exact = serve_once("200 OK", FIXTURE.as_bytes());
    let ds = HttpSource::new(exact).with_max_bytes(FIXTURE.len() as u64).load().expect("fits exactly");
    assert_eq!(ds.len(), 6);
}

#[test]
fn oversized_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(FIXTURE.as_bytes()).expect("write");
    let err = FileSource::new(file.path()).with_max_bytes(64).load().expect_err("too large");
    assert!(err.is_format(), "{err:?}");
}
