//! CLI integration tests that do not require a browser.
//!
//! Everything here exercises argument handling and the no-work paths;
//! real-browser behavior is covered by the pagevet library's ignored
//! integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn pagevet() -> Command {
    Command::cargo_bin("pagevet").expect("binary built")
}

#[test]
fn no_urls_exits_zero_with_no_output() {
    pagevet()
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn help_lists_the_run_options() {
    pagevet()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--urls")
                .and(predicate::str::contains("--browser"))
                .and(predicate::str::contains("--headed"))
                .and(predicate::str::contains("--timeout"))
                .and(predicate::str::contains("--wait-until")),
        );
}

#[test]
fn rejects_an_unknown_browser() {
    pagevet()
        .args(["-u", "https://example.com", "-b", "safari"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn rejects_an_unknown_wait_until() {
    pagevet()
        .args(["-u", "https://example.com", "-w", "networkidle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn firefox_is_rejected_before_any_browser_work() {
    pagevet()
        .args(["-u", "https://example.com", "-b", "firefox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("firefox"));
}

#[test]
fn webkit_is_rejected_before_any_browser_work() {
    pagevet()
        .args(["-u", "https://example.com", "-b", "webkit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("webkit"));
}

#[test]
fn rejects_a_non_positive_timeout() {
    pagevet()
        .args(["-u", "https://example.com", "-t", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid timeout"));
}

#[test]
fn rejects_a_malformed_timeout() {
    pagevet()
        .args(["-u", "https://example.com", "-t", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn verbose_and_quiet_conflict() {
    pagevet()
        .args(["-u", "https://example.com", "-v", "-q"])
        .assert()
        .failure();
}
