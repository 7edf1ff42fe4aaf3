use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::form::{Field, FormError, RoiForm};
use crate::i18n::{self, keys, Translator};
use crate::solar::RoiReport;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    Settings,
    Reset,
    Exit,
}

/// 프롬프트 입력과 출력을 묶는다. 실제 실행에서는 표준 입출력을 쓴다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 한 줄을 출력한다.
    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// 프롬프트를 표시하고 한 줄을 읽는다. 줄바꿈은 제거한다.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(
    tr: &Translator,
    con: &mut Console<R, W>,
) -> Result<MenuChoice, AppError> {
    con.say(&format!("\n=== {} ===", tr.t(keys::APP_TITLE)))?;
    con.say(&tr.t(keys::MAIN_MENU_CALCULATE))?;
    con.say(&tr.t(keys::MAIN_MENU_SETTINGS))?;
    con.say(&tr.t(keys::MAIN_MENU_RESET))?;
    con.say(&tr.t(keys::MAIN_MENU_EXIT))?;
    loop {
        let sel = con.read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::Settings),
            "3" => return Ok(MenuChoice::Reset),
            "0" => return Ok(MenuChoice::Exit),
            _ => con.say(&tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// ROI 계산 화면을 처리한다. 필수 항목이 비면 해당 항목만 다시 묻는다.
pub fn handle_calculator<R: BufRead, W: Write>(
    tr: &Translator,
    form: &mut RoiForm,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    con.say(&format!("\n-- {} --", tr.t(keys::APP_TITLE)))?;
    con.say(&tr.t(keys::APP_SUBTITLE))?;
    con.say(&tr.t(keys::HELP_CALCULATOR))?;
    for field in Field::ALL {
        prompt_field(tr, form, field, con)?;
    }
    loop {
        match form.submit().cloned() {
            Ok(report) => return print_report(tr, &report, con),
            Err(FormError::MissingRequired(field)) => {
                con.say(&tr.t(keys::FORM_REQUIRED))?;
                prompt_field(tr, form, field, con)?;
            }
        }
    }
}

fn prompt_field<R: BufRead, W: Write>(
    tr: &Translator,
    form: &mut RoiForm,
    field: Field,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    let mut prompt = format!("{} [{}]", tr.t(field.label_key()), field.placeholder());
    if !field.is_required() {
        let keep = i18n::fill_template(
            &tr.t(keys::FORM_KEEP_CURRENT),
            &[("value", form.value(field))],
        );
        prompt.push(' ');
        prompt.push_str(&keep);
    }
    prompt.push_str(": ");
    let answer = con.read_line(&prompt)?;
    if field.is_required() || !answer.trim().is_empty() {
        form.set_value(field, answer);
    }
    Ok(())
}

/// 입력과 마지막 결과를 지운다. 전력 단가는 설정 기본값으로 돌아간다.
pub fn handle_reset<R: BufRead, W: Write>(
    tr: &Translator,
    cfg: &Config,
    form: &mut RoiForm,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    form.reset(&cfg.default_electricity_rate);
    con.say(&tr.t(keys::FORM_RESET_DONE))
}

/// 결과 세 줄을 표시 형식대로 만든다.
pub fn report_lines(tr: &Translator, report: &RoiReport) -> [String; 3] {
    [
        format!("{} ${}", tr.t(keys::RESULT_ANNUAL_SAVINGS), report.annual_savings),
        format!(
            "{} {} {}",
            tr.t(keys::RESULT_BREAK_EVEN),
            report.break_even,
            tr.t(keys::RESULT_YEARS)
        ),
        format!("{} ${}", tr.t(keys::RESULT_TWENTY_YEAR), report.twenty_year_roi),
    ]
}

pub fn print_report<R: BufRead, W: Write>(
    tr: &Translator,
    report: &RoiReport,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    con.say(&format!("\n{}", tr.t(keys::RESULT_HEADING)))?;
    for line in report_lines(tr, report) {
        con.say(&line)?;
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어를 바꾸면 번역기도 즉시 교체한다.
pub fn handle_settings<R: BufRead, W: Write>(
    tr: &mut Translator,
    cfg: &mut Config,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    con.say(&tr.t(keys::SETTINGS_HEADING))?;
    con.say(&format!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language
    ))?;
    con.say(&tr.t(keys::SETTINGS_OPTIONS))?;
    let sel = con.read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => return Ok(()),
        "1" => "auto",
        "2" => "en-us",
        "3" => "ko-kr",
        "4" => "de-de",
        _ => {
            con.say(&tr.t(keys::SETTINGS_INVALID))?;
            return Ok(());
        }
    };
    cfg.language = language.to_string();
    let resolved = i18n::resolve_language(&cfg.language, None);
    *tr = Translator::new_with_pack(&resolved, cfg.language_pack_dir.as_deref());
    con.say(&format!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language))?;
    Ok(())
}
