use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "app.title";
    pub const APP_SUBTITLE: &str = "app.subtitle";

    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FIELD_SYSTEM_COST: &str = "field.system_cost";
    pub const FIELD_MONTHLY_BILL: &str = "field.monthly_bill";
    pub const FIELD_ELECTRICITY_RATE: &str = "field.electricity_rate";
    pub const FORM_SUBMIT: &str = "form.submit";
    pub const FORM_REQUIRED: &str = "form.required";
    pub const FORM_KEEP_CURRENT: &str = "form.keep_current";
    pub const FORM_RESET: &str = "form.reset";
    pub const FORM_RESET_DONE: &str = "form.reset_done";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_ANNUAL_SAVINGS: &str = "result.annual_savings";
    pub const RESULT_BREAK_EVEN: &str = "result.break_even";
    pub const RESULT_YEARS: &str = "result.years";
    pub const RESULT_TWENTY_YEAR: &str = "result.twenty_year";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_CALCULATOR: &str = "help.calculator";

    pub const GUI_SETTINGS_TITLE: &str = "gui.settings.title";
    pub const GUI_SETTINGS_GENERAL: &str = "gui.settings.general";
    pub const GUI_SETTINGS_UI_SCALE: &str = "gui.settings.ui_scale";
    pub const GUI_SETTINGS_ALWAYS_ON_TOP: &str = "gui.settings.always_on_top";
    pub const GUI_SETTINGS_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_SETTINGS_LANG: &str = "gui.settings.lang";
    pub const GUI_SETTINGS_LANG_AUTO: &str = "gui.settings.lang_auto";
    pub const GUI_SETTINGS_FONT: &str = "gui.settings.font";
    pub const GUI_SETTINGS_FONT_BROWSE: &str = "gui.settings.font_browse";
    pub const GUI_SETTINGS_FONT_APPLY: &str = "gui.settings.font_apply";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings.save";
    pub const GUI_SETTINGS_SAVED: &str = "gui.settings.saved";
    pub const GUI_SETTINGS_SAVE_ERROR: &str = "gui.settings.save_error";
    pub const GUI_ABOUT_TITLE: &str = "gui.about.title";
    pub const GUI_ABOUT_APP: &str = "gui.about.app";
    pub const GUI_ABOUT_VERSION: &str = "gui.about.version";
    pub const GUI_ABOUT_NOTE_RATE: &str = "gui.about.note_rate";
    pub const GUI_ABOUT_NOTE_INVALID: &str = "gui.about.note_invalid";
    pub const GUI_FORMULA_BUTTON: &str = "gui.formula.button";
    pub const GUI_FORMULA_TITLE: &str = "gui.formula.title";
    pub const GUI_FORMULA_ANNUAL: &str = "gui.formula.annual";
    pub const GUI_FORMULA_BREAK_EVEN: &str = "gui.formula.break_even";
    pub const GUI_FORMULA_ROI: &str = "gui.formula.roi";
    pub const GUI_RESULT_NET_LOSS_TIP: &str = "gui.result.net_loss_tip";

    /// 내장 문자열 표가 모두 채워야 하는 키 목록.
    pub const ALL: &[&str] = &[
        ERROR_PREFIX,
        APP_EXIT,
        APP_TITLE,
        APP_SUBTITLE,
        MAIN_MENU_CALCULATE,
        MAIN_MENU_SETTINGS,
        MAIN_MENU_RESET,
        MAIN_MENU_EXIT,
        PROMPT_MENU_SELECT,
        INVALID_SELECTION_RETRY,
        FIELD_SYSTEM_COST,
        FIELD_MONTHLY_BILL,
        FIELD_ELECTRICITY_RATE,
        FORM_SUBMIT,
        FORM_REQUIRED,
        FORM_KEEP_CURRENT,
        FORM_RESET,
        FORM_RESET_DONE,
        RESULT_HEADING,
        RESULT_ANNUAL_SAVINGS,
        RESULT_BREAK_EVEN,
        RESULT_YEARS,
        RESULT_TWENTY_YEAR,
        SETTINGS_HEADING,
        SETTINGS_CURRENT_LANGUAGE,
        SETTINGS_OPTIONS,
        SETTINGS_PROMPT_CHANGE,
        SETTINGS_INVALID,
        SETTINGS_SAVED,
        HELP_CALCULATOR,
        GUI_SETTINGS_TITLE,
        GUI_SETTINGS_GENERAL,
        GUI_SETTINGS_UI_SCALE,
        GUI_SETTINGS_ALWAYS_ON_TOP,
        GUI_SETTINGS_ALPHA,
        GUI_SETTINGS_LANG,
        GUI_SETTINGS_LANG_AUTO,
        GUI_SETTINGS_FONT,
        GUI_SETTINGS_FONT_BROWSE,
        GUI_SETTINGS_FONT_APPLY,
        GUI_SETTINGS_SAVE,
        GUI_SETTINGS_SAVED,
        GUI_SETTINGS_SAVE_ERROR,
        GUI_ABOUT_TITLE,
        GUI_ABOUT_APP,
        GUI_ABOUT_VERSION,
        GUI_ABOUT_NOTE_RATE,
        GUI_ABOUT_NOTE_INVALID,
        GUI_FORMULA_BUTTON,
        GUI_FORMULA_TITLE,
        GUI_FORMULA_ANNUAL,
        GUI_FORMULA_BREAK_EVEN,
        GUI_FORMULA_ROI,
        GUI_RESULT_NET_LOSS_TIP,
    ];
}

const MISSING_TRANSLATION: &str = "[missing translation]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    De,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("de") {
            Language::De
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 내장 문자열만 쓰는 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 지정 디렉터리, locales/, 바이너리 내장 팩 순으로 찾고 모두 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        debug!(
            lang = lang_code,
            pack_keys = overrides.as_ref().map_or(0, HashMap::len),
            "translator ready"
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 언어팩에서 키를 조회한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩, 해당 언어 내장 문자열, 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let built_in = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En | Language::De => en(key),
        };
        built_in.unwrap_or(MISSING_TRANSLATION).to_string()
    }
}

/// `{name}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "de" | "de-de" => Some("de-de".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("de") => Some("de-de".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" | "en" | "de" => normalize_lang(&lang),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        debug!(path = %path.display(), "language pack found");
        parse_toml_to_map(&content)
    };

    // 1) 전체 코드 (예: en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) 기본 코드 (예: en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// TOML 문자열을 점(.)으로 이어진 키의 평면 맵으로 바꾼다. 문자열이 아닌 값은 무시한다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함). 영어/한국어는 코드 내 문자열로 충분하다.
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "de-de" | "de" => parse_toml_to_map(include_str!("../locales/de-de.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "태양광 ROI 계산기",
        APP_SUBTITLE => "태양광 패널 투자 수익을 계산합니다",
        MAIN_MENU_CALCULATE => "1) ROI 계산",
        MAIN_MENU_SETTINGS => "2) 설정",
        MAIN_MENU_RESET => "3) 입력 초기화",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FIELD_SYSTEM_COST => "태양광 설비 비용 ($)",
        FIELD_MONTHLY_BILL => "월 전기요금 ($)",
        FIELD_ELECTRICITY_RATE => "전력 단가 ($/kWh)",
        FORM_SUBMIT => "ROI 계산",
        FORM_REQUIRED => "이 입력란을 작성하세요.",
        FORM_KEEP_CURRENT => "(엔터: 현재값 {value} 유지)",
        FORM_RESET => "초기화",
        FORM_RESET_DONE => "입력과 결과를 초기화했습니다.",
        RESULT_HEADING => "결과",
        RESULT_ANNUAL_SAVINGS => "연간 절감액:",
        RESULT_BREAK_EVEN => "손익분기점:",
        RESULT_YEARS => "년",
        RESULT_TWENTY_YEAR => "20년 순절감액:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 자동  2) English  3) 한국어  4) Deutsch",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 다음으로 설정되었습니다:",
        HELP_CALCULATOR => "도움말: 설비 비용과 월 전기요금은 필수입니다. 숫자가 아닌 값은 NaN으로 계산됩니다.",
        GUI_SETTINGS_TITLE => "프로그램 설정",
        GUI_SETTINGS_GENERAL => "일반",
        GUI_SETTINGS_UI_SCALE => "UI 배율",
        GUI_SETTINGS_ALWAYS_ON_TOP => "항상 위",
        GUI_SETTINGS_ALPHA => "창 투명도",
        GUI_SETTINGS_LANG => "언어",
        GUI_SETTINGS_LANG_AUTO => "시스템",
        GUI_SETTINGS_FONT => "사용자 폰트 (.ttf/.ttc)",
        GUI_SETTINGS_FONT_BROWSE => "찾아보기...",
        GUI_SETTINGS_FONT_APPLY => "폰트 적용",
        GUI_SETTINGS_SAVE => "설정 저장",
        GUI_SETTINGS_SAVED => "저장했습니다.",
        GUI_SETTINGS_SAVE_ERROR => "저장 오류:",
        GUI_ABOUT_TITLE => "도움말 / 정보",
        GUI_ABOUT_APP => "오프라인 태양광 ROI 계산기",
        GUI_ABOUT_VERSION => "버전:",
        GUI_ABOUT_NOTE_RATE => "- 전력 단가는 입력만 받으며 현재 계산식에는 반영되지 않습니다.",
        GUI_ABOUT_NOTE_INVALID => "- 숫자가 아닌 입력은 NaN, 월 요금 0은 Infinity로 표시됩니다.",
        GUI_FORMULA_BUTTON => "계산식",
        GUI_FORMULA_TITLE => "계산식 참고",
        GUI_FORMULA_ANNUAL => "연간 절감액 = 월 전기요금 × 12",
        GUI_FORMULA_BREAK_EVEN => "손익분기점[년] = 설비 비용 / 연간 절감액",
        GUI_FORMULA_ROI => "20년 순절감액 = 연간 절감액 × 20 − 설비 비용",
        GUI_RESULT_NET_LOSS_TIP => "20년 안에 설비 비용을 회수하지 못합니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Solar ROI Calculator",
        APP_SUBTITLE => "Calculate your solar panel return on investment",
        MAIN_MENU_CALCULATE => "1) Calculate ROI",
        MAIN_MENU_SETTINGS => "2) Settings",
        MAIN_MENU_RESET => "3) Reset form",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FIELD_SYSTEM_COST => "Solar System Cost ($)",
        FIELD_MONTHLY_BILL => "Monthly Electric Bill ($)",
        FIELD_ELECTRICITY_RATE => "Electricity Rate ($/kWh)",
        FORM_SUBMIT => "Calculate ROI",
        FORM_REQUIRED => "Please fill out this field.",
        FORM_KEEP_CURRENT => "(enter to keep {value})",
        FORM_RESET => "Reset",
        FORM_RESET_DONE => "Inputs and results cleared.",
        RESULT_HEADING => "Results",
        RESULT_ANNUAL_SAVINGS => "Annual Savings:",
        RESULT_BREAK_EVEN => "Break-even Point:",
        RESULT_YEARS => "years",
        RESULT_TWENTY_YEAR => "20-Year Net Savings:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Auto  2) English  3) 한국어  4) Deutsch",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        HELP_CALCULATOR => "Help: system cost and monthly bill are required. Non-numeric values are calculated as NaN.",
        GUI_SETTINGS_TITLE => "Program Settings",
        GUI_SETTINGS_GENERAL => "General",
        GUI_SETTINGS_UI_SCALE => "UI scale",
        GUI_SETTINGS_ALWAYS_ON_TOP => "Always on top",
        GUI_SETTINGS_ALPHA => "Window transparency",
        GUI_SETTINGS_LANG => "Language",
        GUI_SETTINGS_LANG_AUTO => "System",
        GUI_SETTINGS_FONT => "User font (.ttf/.ttc)",
        GUI_SETTINGS_FONT_BROWSE => "Browse...",
        GUI_SETTINGS_FONT_APPLY => "Apply font",
        GUI_SETTINGS_SAVE => "Save settings",
        GUI_SETTINGS_SAVED => "Saved.",
        GUI_SETTINGS_SAVE_ERROR => "Save error:",
        GUI_ABOUT_TITLE => "Help / About",
        GUI_ABOUT_APP => "Offline solar ROI calculator",
        GUI_ABOUT_VERSION => "Version:",
        GUI_ABOUT_NOTE_RATE => "- The electricity rate is collected but not used by the current formulas.",
        GUI_ABOUT_NOTE_INVALID => "- Non-numeric input shows as NaN; a zero monthly bill gives Infinity.",
        GUI_FORMULA_BUTTON => "Formula reference",
        GUI_FORMULA_TITLE => "Formula reference",
        GUI_FORMULA_ANNUAL => "Annual savings = monthly bill × 12",
        GUI_FORMULA_BREAK_EVEN => "Break-even [years] = system cost / annual savings",
        GUI_FORMULA_ROI => "20-year net savings = annual savings × 20 − system cost",
        GUI_RESULT_NET_LOSS_TIP => "The system does not pay for itself within 20 years.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_korean_and_english() {
        for key in keys::ALL {
            assert!(ko(key).is_some(), "ko: {key}");
            assert!(en(key).is_some(), "en: {key}");
        }
    }

    #[test]
    fn key_list_has_no_duplicates() {
        let unique: std::collections::HashSet<_> = keys::ALL.iter().collect();
        assert_eq!(unique.len(), keys::ALL.len());
    }

    #[test]
    fn german_pack_covers_every_key() {
        let pack = built_in_pack("de-de").expect("built-in German pack");
        let missing: Vec<_> = keys::ALL.iter().filter(|k| !pack.contains_key(**k)).collect();
        assert!(missing.is_empty(), "{missing:?}");
    }

    #[test]
    fn unknown_key_reports_missing() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), MISSING_TRANSLATION);
    }

    #[test]
    fn normalize_variants() {
        assert_eq!(normalize_lang("EN-UK").as_deref(), Some("en-us"));
        assert_eq!(normalize_lang("ko").as_deref(), Some("ko-kr"));
        assert_eq!(normalize_lang("auto"), None);
        assert_eq!(normalize_lang("fr"), None);
        assert_eq!(normalize_locale_string("de_DE.UTF-8").as_deref(), Some("de-de"));
    }

    #[test]
    fn template_fill() {
        let out = fill_template("(enter to keep {value})", &[("value", "0.13")]);
        assert_eq!(out, "(enter to keep 0.13)");
    }
}
