use std::path::PathBuf;

use clap::Parser;
use solar_roi_calculator::{
    app, config,
    form::{Field, RoiForm},
    i18n::{self, Translator},
    logging,
    ui_cli::Console,
};
use tracing::info;

/// 태양광 ROI 계산기 (터미널)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 언어 코드 (auto/en-us/ko-kr/de-de)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,

    /// 설비 비용 [$]. 월 요금과 함께 주면 한 번 계산하고 종료한다.
    #[arg(long, allow_hyphen_values = true, requires = "monthly_bill")]
    system_cost: Option<String>,

    /// 월 전기요금 [$]
    #[arg(long, allow_hyphen_values = true, requires = "system_cost")]
    monthly_bill: Option<String>,

    /// 전력 단가 [$/kWh]
    #[arg(long, allow_hyphen_values = true)]
    electricity_rate: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    logging::init();
    let args = Args::parse();
    if let Err(err) = try_run(args) {
        let tr = Translator::new(&i18n::resolve_language("auto", None));
        eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn try_run(args: Args) -> Result<(), app::AppError> {
    let mut cfg = config::load_from(&args.config)?;
    let lang = i18n::resolve_language(&args.lang, Some(cfg.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    info!(lang = %lang, language = ?tr.language(), "cli started");
    let mut con = Console::stdio();

    let rate = args
        .electricity_rate
        .unwrap_or_else(|| cfg.default_electricity_rate.clone());
    let mut form = RoiForm::with_rate(&rate);

    if let (Some(cost), Some(bill)) = (args.system_cost, args.monthly_bill) {
        form.set_value(Field::SystemCost, cost);
        form.set_value(Field::MonthlyBill, bill);
        return app::run_once(&tr, &mut form, &mut con);
    }
    app::run(&mut cfg, &mut tr, &mut form, &mut con, &args.config)
}
