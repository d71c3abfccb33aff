use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use grun_cli::Cli;
use grun_core::{GrunConfig, GrunError};
use log::LevelFilter;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("grun").chain(args.iter().copied())).unwrap()
}

#[test]
fn hyphen_flag_is_taken_as_positional() {
    for flag in ["-gui", "-tree", "-tokens", "-trace"] {
        let cli = parse(&[flag, "tests/hello.c"]);
        assert_eq!(cli.flag, flag);
        assert_eq!(cli.input, PathBuf::from("tests/hello.c"));
    }
}

#[test]
fn missing_arguments_are_a_usage_error() {
    let err = Cli::try_parse_from(["grun", "-gui"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert_eq!(err.exit_code(), 2);

    let err = Cli::try_parse_from(["grun"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn options_override_loaded_config() {
    let cli = parse(&[
        "--grammar",
        "Expr",
        "--root",
        "prog",
        "--work-dir",
        "build/grun",
        "--javac",
        "/opt/jdk/bin/javac",
        "-tokens",
        "in.txt",
    ]);
    let mut cfg = GrunConfig { grammar: "FromFile".into(), java: "/usr/bin/java".into(), ..GrunConfig::default() };
    cli.apply(&mut cfg);

    assert_eq!(cfg.grammar, "Expr");
    assert_eq!(cfg.root_production, "prog");
    assert_eq!(cfg.work_dir.as_str(), "build/grun");
    assert_eq!(cfg.javac, "/opt/jdk/bin/javac");
    // non précisé en CLI : la valeur du fichier reste
    assert_eq!(cfg.java, "/usr/bin/java");
    assert_eq!(cfg.antlr_jar, "antlr.jar");
}

#[test]
fn verbosity_maps_to_log_level() {
    assert_eq!(parse(&["-tree", "a"]).level(), LevelFilter::Info);
    assert_eq!(parse(&["--verbose", "-tree", "a"]).level(), LevelFilter::Debug);
    assert_eq!(parse(&["--verbose", "--verbose", "-tree", "a"]).level(), LevelFilter::Trace);
    assert_eq!(parse(&["--quiet", "-tree", "a"]).level(), LevelFilter::Warn);
    assert!(Cli::try_parse_from(["grun", "--quiet", "--verbose", "-tree", "a"]).is_err());
}

#[test]
fn second_logger_init_does_not_panic() {
    grun_cli::init_logging(LevelFilter::Info);
    // le second appel est signalé sur stderr, sans panique
    grun_cli::init_logging(LevelFilter::Debug);
}

#[cfg(unix)]
#[test]
fn exit_code_mirrors_failing_tool() {
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    let failed = GrunError::CommandFailed { program: "java".into(), status: ExitStatus::from_raw(3 << 8) };
    assert_eq!(grun_cli::failure_code(&failed.into()), 3);

    // tué par un signal : pas de code, on retombe sur 1
    let killed = GrunError::CommandFailed { program: "java".into(), status: ExitStatus::from_raw(9) };
    assert_eq!(grun_cli::failure_code(&killed.into()), 1);

    let other = color_eyre::eyre::eyre!("réseau indisponible");
    assert_eq!(grun_cli::failure_code(&other), 1);
}
