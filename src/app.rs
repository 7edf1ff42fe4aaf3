use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, ConfigError};
use crate::form::{FormError, RoiForm};
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, Console, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 폼 제출 불가
    #[error("form error: {0}")]
    Form(#[from] FormError),
    /// 입력 스트림이 닫힘(EOF)
    #[error("input stream closed")]
    InputClosed,
}

/// CLI 애플리케이션의 메인 루프를 실행한다. 종료 시 설정을 `config_path`에 저장한다.
pub fn run<R: BufRead, W: Write>(
    config: &mut Config,
    tr: &mut Translator,
    form: &mut RoiForm,
    con: &mut Console<R, W>,
    config_path: &Path,
) -> Result<(), AppError> {
    loop {
        let step = match ui_cli::main_menu(tr, con) {
            Ok(MenuChoice::Calculate) => ui_cli::handle_calculator(tr, form, con),
            Ok(MenuChoice::Settings) => ui_cli::handle_settings(tr, config, con)
                .and_then(|()| config.save_to(config_path).map_err(AppError::from)),
            Ok(MenuChoice::Reset) => ui_cli::handle_reset(tr, config, form, con),
            Ok(MenuChoice::Exit) => break,
            Err(e) => Err(e),
        };
        match step {
            Ok(()) => {}
            Err(AppError::InputClosed) => {
                info!("input closed, leaving main loop");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    config.save_to(config_path)?;
    con.say(&tr.t(i18n::keys::APP_EXIT))?;
    Ok(())
}

/// 입력값으로 한 번 계산하고 결과만 출력한다(비대화식 실행).
pub fn run_once<R: BufRead, W: Write>(
    tr: &Translator,
    form: &mut RoiForm,
    con: &mut Console<R, W>,
) -> Result<(), AppError> {
    let report = form.submit()?;
    ui_cli::print_report(tr, report, con)
}
