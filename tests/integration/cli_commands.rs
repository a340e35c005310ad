//! Commands executed through RunContext against an on-disk store

use super::test_utils::with_xdg_env;
use clap::Parser;
use tempfile::TempDir;
use trainlog::cli::{map_error, Cli, RunContext};
use trainlog::error::AppError;

fn run_context(temp: &TempDir) -> RunContext {
    RunContext::new(
        temp.path().to_path_buf(),
        None,
        Some(temp.path().join("store")),
    )
    .unwrap()
}

fn run(ctx: &mut RunContext, args: &[&str]) -> Result<String, AppError> {
    let mut argv = vec!["trainlog"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    ctx.execute(&cli.command)
}

#[test]
fn test_log_and_show_exercise() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut ctx = run_context(&temp);

        let out = run(
            &mut ctx,
            &[
                "exercise", "add", "A", "--name", "Supino", "--series", "3", "--reps", "10",
                "--weight", "20", "--before", "18",
            ],
        )
        .unwrap();
        assert_eq!(out, "Added exercise 1 to context 'A'");

        let out = run(&mut ctx, &["exercise", "edit", "A", "1", "--weight", "22.5"]).unwrap();
        assert!(out.contains("Supino"));

        let out = run(&mut ctx, &["show", "A", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["trains"][0]["weightActual"], 22.5);
        assert_eq!(value["trains"][0]["weightBefore"], 18.0);
    });
}

#[test]
fn test_dashboard_json_totals() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut ctx = run_context(&temp);
        run(
            &mut ctx,
            &[
                "exercise", "add", "B", "--name", "Supino", "--series", "3", "--reps", "10",
                "--weight", "20", "--before", "18",
            ],
        )
        .unwrap();

        let out = run(&mut ctx, &["dashboard", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["summary"]["totals"]["volume"], 600.0);
        assert_eq!(value["progress"]["totals"]["improved"], 1);
        assert_eq!(value["summary"]["per_context"].as_array().unwrap().len(), 3);
    });
}

#[test]
fn test_context_lifecycle() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut ctx = run_context(&temp);
        assert_eq!(run(&mut ctx, &["contexts", "add"]).unwrap(), "Added context 'D'");
        run(&mut ctx, &["contexts", "remove", "A", "--yes"]).unwrap();

        let out = run(&mut ctx, &["contexts", "list", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["contexts"], serde_json::json!(["B", "C", "D"]));
    });
}

#[test]
fn test_validation_failure_is_rendered_per_field() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut ctx = run_context(&temp);
        let err = run(&mut ctx, &["exercise", "add", "A", "--name", "Supino"]).unwrap_err();
        let rendered = map_error(&err);
        assert!(rendered.starts_with("Training not saved"));
        assert!(rendered.contains("exercise 1 reps: required"));
    });
}

#[test]
fn test_export_file_and_import_back() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let backup = temp.path().join("backup.json");
        let backup_arg = backup.to_string_lossy().into_owned();
        {
            let mut ctx = run_context(&temp);
            run(
                &mut ctx,
                &[
                    "exercise", "add", "C", "--name", "Remada", "--series", "4", "--reps",
                    "12", "--weight", "30", "--before", "30",
                ],
            )
            .unwrap();
            let out = run(&mut ctx, &["export", "-o", backup_arg.as_str()]).unwrap();
            assert!(out.starts_with("Exported 3 contexts"));
            run(&mut ctx, &["exercise", "remove", "C", "1", "-y"]).unwrap();
        }

        let mut ctx = run_context(&temp);
        let out = run(&mut ctx, &["import", backup_arg.as_str()]).unwrap();
        assert_eq!(out, "Imported 1 exercises into 3 contexts");
        let out = run(&mut ctx, &["show", "C"]).unwrap();
        assert!(out.contains("Remada"));
    });
}

#[test]
fn test_config_command_prints_toml() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut ctx = run_context(&temp);
        let out = run(&mut ctx, &["config"]).unwrap();
        assert!(out.contains("[registry]"));
        assert!(out.contains("title = \"Treinos\""));
    });
}

#[test]
fn test_position_zero_is_rejected() {
    let temp = TempDir::new().unwrap();
    with_xdg_env(&temp, || {
        let mut ctx = run_context(&temp);
        assert!(matches!(
            run(&mut ctx, &["exercise", "remove", "A", "0", "-y"]),
            Err(AppError::InvalidInput(_))
        ));
    });
}
