use std::io::Write;
use std::sync::Arc;
use stylelog::{
    args, Arg, ColorLevel, ErrorValue, Formatter, Level, Logger, LoggerError, LoggerOptions, MemoryStream,
    Prefix, Prelog, StyleTree,
};

struct Harness {
    logger: Logger,
    out: MemoryStream,
    err: MemoryStream,
}

fn harness(options: LoggerOptions) -> Harness {
    let out = MemoryStream::new();
    let err = MemoryStream::new();
    let logger = Logger::new(
        LoggerOptions::new()
            .stdout(out.stream())
            .stderr(err.stream())
            .color_level(ColorLevel::None)
            .merge(options),
    )
    .unwrap();
    Harness { logger, out, err }
}

#[test]
fn debug_is_dropped_at_info_and_info_is_written() {
    let h = harness(LoggerOptions::new().log_level("info"));

    h.logger.debug(args!["not shown"]);
    assert!(h.out.is_empty());
    assert!(h.err.is_empty());

    h.logger.info(args!["ready"]);
    assert_eq!(h.out.contents(), "❯ ready\n");
    assert!(h.err.is_empty());
}

#[test]
fn warn_with_error_writes_name_message_and_trace() {
    let h = harness(LoggerOptions::new().log_level("debug"));

    h.logger.warn(args![ErrorValue::new("boom")]);

    assert!(h.out.is_empty());
    let written = h.err.contents();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "[WARN] Error: boom");
    assert!(lines.len() >= 2);
    assert!(lines[1].starts_with("    at tests/logger_scenarios.rs:"), "{}", lines[1]);
    assert!(written.ends_with('\n'));
}

#[test]
fn throwing_marker_suppresses_trace() {
    let h = harness(LoggerOptions::new().log_level("debug"));

    h.logger.warn(args![ErrorValue::new("boom"), Arg::throwing()]);

    assert_eq!(h.err.contents(), "[WARN] Error: boom\n");
}

#[test]
fn throwing_marker_without_error_is_printed() {
    let h = harness(LoggerOptions::new().log_level("debug"));

    h.logger.info(args!["flag", Arg::throwing()]);

    assert_eq!(h.out.contents(), "❯ flag { throwing: true }\n");
}

#[test]
fn print_ignores_silent_threshold() {
    let h = harness(LoggerOptions::new().log_level(-1));

    for level in Level::ALL {
        h.logger.log_at(level, args!["dropped"]);
    }
    h.logger.print(args!["x"]);

    assert_eq!(h.out.contents(), "x\n");
    assert!(h.err.is_empty());
}

#[test]
fn every_level_respects_every_threshold() {
    for threshold in -1..=4 {
        let h = harness(LoggerOptions::new().log_level(threshold));
        for level in Level::ALL {
            h.logger.log_at(level, args!["m"]);
        }
        let total = h.out.contents().lines().count() + h.err.contents().lines().count();
        assert_eq!(total, (threshold + 1) as usize, "threshold {}", threshold);
    }
}

#[test]
fn placeholders_and_fields() {
    let h = harness(LoggerOptions::new().log_level("log"));

    h.logger.log(args!["copied %d files to", 3, Arg::field("path", "/srv/out")]);

    assert_eq!(h.out.contents(), "[LOG] copied 3 files to path: /srv/out\n");
}

#[test]
fn styles_are_compiled_once() {
    let h = harness(LoggerOptions::new().log_level("debug"));
    let styles = h.logger.styles();

    let first = styles.get("warn", "prefix");
    let second = styles.get("warn", "prefix");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first("x"), second("x"));
}

#[test]
fn style_overrides_apply_after_update() {
    let h = harness(LoggerOptions::new().log_level("debug"));
    h.logger.set_color_level(ColorLevel::Basic);
    let before = h.logger.styles().paint("info", "prefix", "x");

    h.logger.styles().set_slot("info", "prefix", "green");
    let after = h.logger.styles().paint("info", "prefix", "x");

    assert_ne!(before, after);
    assert_eq!(after, "\x1b[32mx\x1b[0m");
}

#[test]
fn closed_stream_is_an_argument_error() {
    let closed = MemoryStream::new();
    closed.close();

    let err = Logger::new(LoggerOptions::new().stderr(closed.stream())).unwrap_err();

    assert!(matches!(err, LoggerError::Argument { ref option, .. } if option == "stderr"));
}

#[test]
fn custom_prefix_prelog_and_format() {
    let h = harness(
        LoggerOptions::new()
            .log_level("debug")
            .prefix(Prefix::provider(|_, level| vec![Arg::text(format!("<{}>", level))]))
            .prelog(Prelog::custom(|_, _, args| {
                args.push(Arg::text("!"));
                None
            }))
            .format(Formatter::custom(|_, args| {
                args.iter()
                    .map(|arg| match arg {
                        Arg::Text(text) => text.clone(),
                        other => format!("{:?}", other),
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })),
    );

    h.logger.error(args!["fail"]);

    assert_eq!(h.err.contents(), "<error> fail!\n");
}

#[test]
fn colors_toggle_changes_output() {
    let h = harness(LoggerOptions::new().log_level("info"));
    h.logger.set_color_level(ColorLevel::TrueColor);
    h.logger.info(args!["a"]);
    h.logger.set_colors(false);
    h.logger.info(args!["b"]);

    let written = h.out.contents();
    let lines: Vec<&str> = written.lines().collect();
    assert!(lines[0].contains('\x1b'));
    assert_eq!(lines[1], "❯ b");
    assert_eq!(h.out.plain_contents(), "❯ a\n❯ b\n");
}

#[test]
fn config_file_builds_logger() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("errors.log");
    let config_path = dir.path().join("stylelog.toml");

    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(config, "log_level = \"warn\"").unwrap();
    writeln!(config, "colors = false").unwrap();
    writeln!(config, "stdout = \"null\"").unwrap();
    writeln!(config, "stderr = {:?}", log_path.display().to_string()).unwrap();
    drop(config);

    let logger = Logger::from_config_file(&config_path).unwrap();
    assert_eq!(logger.log_level(), 1);
    assert!(!logger.colors());

    logger.warn(args!["disk low"]);
    logger.info(args!["ignored"]);
    logger.flush();

    let logged = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(logged, "[WARN] disk low\n");
}

#[test]
fn config_file_with_bad_toml_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "log_level = ").unwrap();

    let err = Logger::from_config_file(file.path()).unwrap_err();
    assert!(matches!(err, LoggerError::Config(_)));
}

#[test]
fn style_tree_overrides_from_options() {
    let mut styles = StyleTree::empty();
    styles.insert("info", "magenta");

    let h = harness(LoggerOptions::new().log_level("info").styles(styles));
    h.logger.set_color_level(ColorLevel::Basic);
    h.logger.info(args!["tinted"]);

    assert_eq!(h.out.contents(), "\x1b[35m❯\x1b[0m \x1b[35mtinted\x1b[0m\n");
}
