use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_status() {
    match parse(&["mediasync", "status"]).command {
        CliCommand::Status => {}
        other => panic!("expected Status, got {other:?}"),
    }
}

#[test]
fn cli_parse_expire_and_flush() {
    assert!(matches!(parse(&["mediasync", "expire"]).command, CliCommand::Expire));
    assert!(matches!(parse(&["mediasync", "flush"]).command, CliCommand::Flush));
}

#[test]
fn cli_parse_mark_done() {
    match parse(&["mediasync", "mark-done", "1000_IMG_0001"]).command {
        CliCommand::MarkDone { id } => assert_eq!(id, "1000_IMG_0001"),
        other => panic!("expected MarkDone, got {other:?}"),
    }
}

#[test]
fn cli_parse_forget() {
    match parse(&["mediasync", "forget", "42"]).command {
        CliCommand::Forget { id } => assert_eq!(id, "42"),
        other => panic!("expected Forget, got {other:?}"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["mediasync", "completions", "bash"]).command {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        other => panic!("expected Completions, got {other:?}"),
    }
}

#[test]
fn cli_rejects_missing_id() {
    assert!(Cli::try_parse_from(["mediasync", "forget"]).is_err());
    assert!(Cli::try_parse_from(["mediasync", "mark-done"]).is_err());
}
