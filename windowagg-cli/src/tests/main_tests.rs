use super::*;

fn window_args(args: &[&str]) -> WindowArgs {
    let argv = ["windowagg", "check"].into_iter().chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    match cli.command {
        Commands::Check { window } => window,
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_inline_flags_build_settings() {
    let settings = window_args(&[
        "--window-type",
        "timeSliding",
        "--function",
        "max",
        "--size",
        "30",
        "--resolution",
        "10",
    ])
    .load()
    .unwrap();
    assert_eq!(settings.window_type, WindowKind::TimeSliding);
    assert_eq!(settings.function, AggregateFn::Max);
    assert_eq!(settings.window_size, 30);
    assert_eq!(settings.resolution, 10);
    assert!(settings.proceed_only_on_emit);
}

#[test]
fn test_defaults_and_emit_all() {
    let settings = window_args(&["--emit-all"]).load().unwrap();
    assert_eq!(settings.window_type, WindowKind::Tumbling);
    assert_eq!(settings.function, AggregateFn::Avg);
    assert_eq!(settings.window_size, 10);
    assert!(!settings.proceed_only_on_emit);
}

#[test]
fn test_unknown_function_is_rejected() {
    let parsed = Cli::try_parse_from(["windowagg", "check", "--function", "median"]);
    assert!(parsed.is_err());
}

#[test]
fn test_config_file_overrides_flags() {
    let path = std::env::temp_dir().join(format!("windowagg-cli-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"function": "count", "windowType": "sliding", "windowSize": 4, "resolution": 2}"#,
    )
    .unwrap();
    let settings = window_args(&["--config", path.to_str().unwrap(), "--size", "99"])
        .load()
        .unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(settings.function, AggregateFn::Count);
    assert_eq!(settings.window_size, 4);
}

#[test]
fn test_parse_sample_skips_blank_and_malformed() {
    assert_eq!(parse_sample("  2.5 ", 1), Some(2.5));
    assert_eq!(parse_sample("-3", 2), Some(-3.0));
    assert_eq!(parse_sample("   ", 3), None);
    assert_eq!(parse_sample("abc", 4), None);
}

async fn run_to_string(settings: AggregateSettings, input: &'static [u8]) -> String {
    let aggregator = Aggregator::new(settings).unwrap();
    let mut out = Vec::new();
    run(aggregator, Box::new(input), Duration::from_secs(60), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_run_count_window_skips_blank_and_malformed_lines() {
    let settings = AggregateSettings::new(AggregateFn::Avg, WindowKind::Tumbling, 2);
    let out = run_to_string(settings, b"1\n3\n\nnope\n5\n").await;
    assert_eq!(out, "{\"report\":true,\"result\":2.0}\n");
}

#[tokio::test]
async fn test_run_emit_all_reports_every_sample() {
    let mut settings = AggregateSettings::new(AggregateFn::Sum, WindowKind::Tumbling, 2);
    settings.proceed_only_on_emit = false;
    let out = run_to_string(settings, b"1\n2\n").await;
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            r#"{"report":false,"result":null}"#,
            r#"{"report":true,"result":3.0}"#,
        ]
    );
}

#[tokio::test]
async fn test_run_time_window_closes_final_block() {
    let settings = AggregateSettings::new(AggregateFn::Sum, WindowKind::TimeTumbling, 10);
    let out = run_to_string(settings, b"1\n2\n").await;
    assert_eq!(out, "{\"report\":true,\"result\":3.0}\n");
}
