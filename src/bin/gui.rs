#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use solar_roi_calculator::{
    config,
    form::{Field, FormError, RoiForm},
    i18n::{self, keys},
    logging,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// 태양광 ROI 계산기 (데스크톱)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct GuiArgs {
    /// 언어 코드 (auto/en-us/ko-kr/de-de)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
}

fn main() -> Result<(), eframe::Error> {
    logging::init();
    let args = GuiArgs::parse();

    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    if args.lang != "auto" {
        app_cfg.language = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([520.0, 600.0])
        .with_min_inner_size([360.0, 420.0])
        .with_transparent(true);
    if app_cfg.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Solar ROI Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록. 기본 폰트 뒤에 붙여 라틴 글자는 기본 폰트를 쓴다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글을 표시할 수 있는 폰트를 찾아 등록한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) 시스템 폰트(Windows 맑은 고딕, 리눅스/맥 Noto/Apple 고딕)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = [
        "assets/fonts/NotoSansKR-Regular.ttf",
        "assets/fonts/malgun.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect();
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].into_iter().map(|f| fonts.join(f)));
    }

    let Some(p) = candidates.iter().find(|p| p.exists()) else {
        return Err("CJK font not found. Please set a user font (.ttf/.ttc) in settings.".into());
    };
    let bytes =
        fs::read(p).map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
    apply_font_bytes(ctx, bytes, "cjk_font");
    info!(path = %p.display(), "font loaded");
    Ok(())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    form: RoiForm,
    form_error: Option<Field>,
    // 설정
    lang_input: String,
    save_status: Option<String>,
    base_visuals: egui::Visuals,
    window_alpha: f32,
    always_on_top: bool,
    applied_on_top: Option<bool>,
    ui_scale: f32,
    custom_font_path: String,
    font_load_error: Option<String>,
    // 창
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        Self {
            form: RoiForm::with_rate(&config.default_electricity_rate),
            form_error: None,
            lang_input: config.language.clone(),
            save_status: None,
            base_visuals: egui::Visuals::dark(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            always_on_top: config.always_on_top,
            applied_on_top: None,
            ui_scale: 1.0,
            custom_font_path: String::new(),
            font_load_error: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            config,
            tr,
        }
    }

    /// 폼을 제출한다. 필수 항목이 비어 있으면 해당 항목을 표시해 둔다.
    fn submit(&mut self) {
        match self.form.submit() {
            Ok(_) => self.form_error = None,
            Err(FormError::MissingRequired(field)) => self.form_error = Some(field),
        }
    }

    /// 입력과 결과를 지우고 전력 단가를 설정 기본값으로 되돌린다.
    fn reset_form(&mut self) {
        self.form.reset(&self.config.default_electricity_rate);
        self.form_error = None;
    }

    /// 설정 창에서 바꾼 값을 설정에 반영하고 저장한다.
    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.always_on_top = self.always_on_top;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr =
            i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.save_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::GUI_SETTINGS_SAVED),
            Err(e) => format!("{} {e}", self.tr.t(keys::GUI_SETTINGS_SAVE_ERROR)),
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let mut submit = false;
        let mut reset = false;
        egui::Grid::new("roi_form")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                for field in Field::ALL {
                    ui.label(tr.t(field.label_key()));
                    let resp = ui.add(
                        egui::TextEdit::singleline(self.form.value_mut(field))
                            .hint_text(field.placeholder())
                            .desired_width(180.0),
                    );
                    if resp.changed() && self.form_error == Some(field) {
                        self.form_error = None;
                    }
                    if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::FORM_SUBMIT)).clicked() {
                submit = true;
            }
            if ui.button(tr.t(keys::FORM_RESET)).clicked() {
                reset = true;
            }
            if let Some(field) = self.form_error {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("{}: {}", tr.t(field.label_key()), tr.t(keys::FORM_REQUIRED)),
                );
            }
        });
        if reset {
            self.reset_form();
        } else if submit {
            self.submit();
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        let Some(report) = self.form.result() else {
            return;
        };
        let net_loss = self.form.last_result().is_some_and(|r| r.is_net_loss());
        let tr = &self.tr;
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.heading(tr.t(keys::RESULT_HEADING));
            ui.separator();
            egui::Grid::new("roi_results")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.label(tr.t(keys::RESULT_ANNUAL_SAVINGS));
                    ui.strong(format!("${}", report.annual_savings));
                    ui.end_row();

                    ui.label(tr.t(keys::RESULT_BREAK_EVEN));
                    ui.strong(format!("{} {}", report.break_even, tr.t(keys::RESULT_YEARS)));
                    ui.end_row();

                    ui.label(tr.t(keys::RESULT_TWENTY_YEAR));
                    let text = egui::RichText::new(format!("${}", report.twenty_year_roi)).strong();
                    if net_loss {
                        ui.label(text.color(ui.visuals().warn_fg_color))
                            .on_hover_text(tr.t(keys::GUI_RESULT_NET_LOSS_TIP));
                    } else {
                        ui.label(text);
                    }
                    ui.end_row();
                });
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.applied_on_top != Some(self.always_on_top) {
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
                egui::WindowLevel::AlwaysOnTop
            } else {
                egui::WindowLevel::Normal
            }));
            self.applied_on_top = Some(self.always_on_top);
        }

        // 투명도는 기준 색상에서 매 프레임 다시 계산한다.
        let mut visuals = self.base_visuals.clone();
        visuals.window_fill = visuals.window_fill.linear_multiply(self.window_alpha);
        visuals.panel_fill = visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_visuals(visuals);

        let tr = self.tr.clone();
        let t = move |key: &str| tr.t(key);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(t(keys::GUI_FORMULA_BUTTON)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(t(keys::GUI_SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(t(keys::GUI_ABOUT_TITLE)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut save_clicked = false;
            let mut apply_font = false;
            egui::Window::new(t(keys::GUI_SETTINGS_TITLE))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.heading(t(keys::GUI_SETTINGS_GENERAL));
                    ui.separator();
                    ui.label(t(keys::GUI_SETTINGS_UI_SCALE));
                    let scale_slider =
                        egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(&mut self.always_on_top, t(keys::GUI_SETTINGS_ALWAYS_ON_TOP));
                    ui.separator();
                    ui.label(t(keys::GUI_SETTINGS_ALPHA));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));

                    ui.separator();
                    ui.label(t(keys::GUI_SETTINGS_LANG));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(self.lang_input.as_str())
                        .show_ui(ui, |ui| {
                            let lang = &mut self.lang_input;
                            ui.selectable_value(
                                lang,
                                "auto".into(),
                                t(keys::GUI_SETTINGS_LANG_AUTO),
                            );
                            ui.selectable_value(lang, "en-us".into(), "English (US)");
                            ui.selectable_value(lang, "ko-kr".into(), "한국어");
                            ui.selectable_value(lang, "de-de".into(), "Deutsch");
                        });

                    ui.separator();
                    ui.label(t(keys::GUI_SETTINGS_FONT));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.custom_font_path);
                        if ui.button(t(keys::GUI_SETTINGS_FONT_BROWSE)).clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("Font", &["ttf", "ttc", "otf"])
                                .pick_file()
                            {
                                self.custom_font_path = path.display().to_string();
                            }
                        }
                        if ui.button(t(keys::GUI_SETTINGS_FONT_APPLY)).clicked() {
                            apply_font = true;
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(ui.visuals().error_fg_color, err.as_str());
                    }

                    ui.separator();
                    if ui.button(t(keys::GUI_SETTINGS_SAVE)).clicked() {
                        save_clicked = true;
                    }
                    if let Some(msg) = &self.save_status {
                        ui.label(msg.as_str());
                    }
                });
            if apply_font {
                self.font_load_error = load_custom_font(ctx, &self.custom_font_path).err();
            }
            if save_clicked {
                self.save_settings();
            }
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(t(keys::GUI_ABOUT_TITLE))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(t(keys::GUI_ABOUT_APP));
                    ui.label(format!(
                        "{} {}",
                        t(keys::GUI_ABOUT_VERSION),
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(t(keys::HELP_CALCULATOR));
                    ui.label(t(keys::GUI_ABOUT_NOTE_RATE));
                    ui.label(t(keys::GUI_ABOUT_NOTE_INVALID));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(t(keys::GUI_FORMULA_TITLE))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.label(t(keys::GUI_FORMULA_ANNUAL));
                    ui.label(t(keys::GUI_FORMULA_BREAK_EVEN));
                    ui.label(t(keys::GUI_FORMULA_ROI));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(t(keys::APP_TITLE));
                        ui.label(t(keys::APP_SUBTITLE));
                    });
                    ui.add_space(12.0);
                    self.ui_form(ui);
                    self.ui_results(ui);
                });
        });
    }
}
