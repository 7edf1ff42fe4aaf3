//! 터미널 메뉴 흐름 테스트. 표준 입출력 대신 메모리 버퍼를 쓴다.
use solar_roi_calculator::{
    app::{self, AppError},
    config::{self, Config},
    form::{Field, FormError, RoiForm},
    i18n::Translator,
    ui_cli::Console,
};
use std::io::Cursor;

fn run_script(script: &str, cfg: &mut Config) -> (String, std::path::PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut tr = Translator::new("en");
    let mut form = RoiForm::with_rate(&cfg.default_electricity_rate);
    let mut con = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    app::run(cfg, &mut tr, &mut form, &mut con, &path).expect("run");
    let out = String::from_utf8(con.into_output()).expect("utf-8");
    (out, path, dir)
}

#[test]
fn calculate_then_exit() {
    let mut cfg = Config::default();
    let (out, path, _dir) = run_script("1\n25000\n150\n\n0\n", &mut cfg);
    assert!(out.contains("Annual Savings: $1800.00"), "{out}");
    assert!(out.contains("Break-even Point: 13.9 years"), "{out}");
    assert!(out.contains("20-Year Net Savings: $11000.00"), "{out}");
    assert!(out.contains("Exiting application."));
    assert!(path.exists());
}

#[test]
fn empty_required_answer_is_asked_again() {
    let mut cfg = Config::default();
    let (out, _, _dir) = run_script("1\n\n150\n\n25000\n0\n", &mut cfg);
    assert!(out.contains("Please fill out this field."), "{out}");
    assert!(out.contains("Break-even Point: 13.9 years"), "{out}");
}

#[test]
fn rate_prompt_shows_current_value() {
    let mut cfg = Config::default();
    let (out, _, _dir) = run_script("1\n10000\n100\n0.2\n0\n", &mut cfg);
    assert!(out.contains("(enter to keep 0.13)"), "{out}");
    assert!(out.contains("20-Year Net Savings: $14000.00"), "{out}");
}

#[test]
fn invalid_menu_choice_retries() {
    let mut cfg = Config::default();
    let (out, _, _dir) = run_script("9\n0\n", &mut cfg);
    assert!(out.contains("Invalid input. Please try again."));
}

#[test]
fn end_of_input_exits_cleanly() {
    let mut cfg = Config::default();
    let (out, path, _dir) = run_script("1\n25000\n", &mut cfg);
    assert!(out.contains("Exiting application."));
    assert!(path.exists());
}

#[test]
fn settings_change_language_and_persist() {
    let mut cfg = Config::default();
    let (out, path, _dir) = run_script("2\n3\n0\n", &mut cfg);
    assert_eq!(cfg.language, "ko-kr");
    assert!(out.contains("프로그램을 종료합니다."), "{out}");
    assert_eq!(config::load_from(&path).expect("load").language, "ko-kr");
}

#[test]
fn reset_clears_inputs_and_restores_rate() {
    let mut cfg = Config::default();
    let (out, _, _dir) = run_script("1\n10000\n100\n0.2\n3\n1\n5000\n100\n\n0\n", &mut cfg);
    assert!(out.contains("3) Reset form"), "{out}");
    let (_, after) = out
        .split_once("Inputs and results cleared.")
        .expect("reset message");
    assert!(after.contains("(enter to keep 0.13)"), "{after}");
    assert!(after.contains("Break-even Point: 4.2 years"), "{after}");
}

#[test]
fn run_once_prints_results() {
    let tr = Translator::new("en");
    let mut form = RoiForm::new();
    form.set_value(Field::SystemCost, "50000");
    form.set_value(Field::MonthlyBill, "50");
    let mut con = Console::new(Cursor::new(Vec::new()), Vec::new());
    app::run_once(&tr, &mut form, &mut con).expect("run once");
    let out = String::from_utf8(con.into_output()).expect("utf-8");
    assert!(out.contains("Annual Savings: $600.00"));
    assert!(out.contains("Break-even Point: 83.3 years"));
    assert!(out.contains("20-Year Net Savings: $-38000.00"));
}

#[test]
fn run_once_with_missing_bill_fails() {
    let tr = Translator::new("en");
    let mut form = RoiForm::new();
    form.set_value(Field::SystemCost, "50000");
    let mut con = Console::new(Cursor::new(Vec::new()), Vec::new());
    let err = app::run_once(&tr, &mut form, &mut con).expect_err("blocked");
    assert!(matches!(
        err,
        AppError::Form(FormError::MissingRequired(Field::MonthlyBill))
    ));
}
