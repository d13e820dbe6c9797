//! The facade must end the process, with a diagnostic, on unrecoverable errors.
//!
//! Each test re-runs this test binary filtered to itself with `CHILD_ENV` set;
//! the child performs the failing call and the parent inspects how it died.

use std::os::unix::net::UnixStream;
use std::process::{Command, Output};

const CHILD_ENV: &str = "ETERM_FATAL_CHILD";

fn in_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

fn rerun_as_child(test_name: &str) -> Output {
    Command::new(std::env::current_exe().unwrap())
        .args(["--exact", test_name, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .env("ETERM_READ_POLL_MS", "10")
        .env("ETERM_WRITE_BACKOFF_MS", "1")
        .output()
        .unwrap()
}

#[test]
fn peer_close_during_read_aborts_with_diagnostic() {
    if in_child() {
        let (a, b) = UnixStream::pair().unwrap();
        eterm::write_all(&b, b"par");
        drop(b);
        let mut buf = [0u8; 8];
        eterm::read_all(&a, &mut buf);
        println!("read_all returned");
        return;
    }

    let out = rerun_as_child("peer_close_during_read_aborts_with_diagnostic");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success());
    assert!(!stdout.contains("read_all returned"));
    assert!(stderr.contains("read_all: socket closed by peer"), "stderr: {stderr}");
    assert!(stderr.contains("Stack Trace:"), "stderr: {stderr}");
}

#[test]
fn peer_close_during_write_aborts_with_errno() {
    if in_child() {
        let (a, b) = UnixStream::pair().unwrap();
        drop(b);
        eterm::write_all(&a, b"nobody is listening");
        println!("write_all returned");
        return;
    }

    let out = rerun_as_child("peer_close_during_write_aborts_with_errno");
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success());
    assert!(!stdout.contains("write_all returned"));
    assert!(stderr.contains(&format!("Error: ({})", libc::EPIPE)), "stderr: {stderr}");
    assert!(stderr.contains("write_all"), "stderr: {stderr}");
}

#[test]
fn successful_transfer_does_not_abort() {
    if in_child() {
        let (a, b) = UnixStream::pair().unwrap();
        eterm::write_all(&a, b"fine");
        let mut buf = [0u8; 4];
        eterm::read_all(&b, &mut buf);
        assert_eq!(&buf, b"fine");
        return;
    }

    let out = rerun_as_child("successful_transfer_does_not_abort");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}
