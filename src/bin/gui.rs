#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//!
//! 외부 계산기 호출은 작업 스레드에서 돌리고, 결과는 채널로 받아 매 프레임 확인한다.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;
use std::{env, fs, thread};

use snapsteam::{
    config,
    form::{Field, FormAction},
    i18n::{self, keys},
    mode::{AxisConfig, FluidState},
    presentation::{format_quality, PropertyGroup, PropertyRow},
    resolver::{self, CalculationResult, ResolveError, SharedResolver},
    session::Session,
};

type Outcome = Result<CalculationResult, ResolveError>;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1080.0, 720.0))
        .with_min_inner_size(egui::vec2(760.0, 520.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let config_path = config::resolve_path(None);
    let app_cfg = match config::load_or_create(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "설정 로드 실패, 기본값 사용");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(
        cli_lang.as_deref().unwrap_or("auto"),
        Some(app_cfg.language.as_str()),
    );
    let resolver = resolver::from_settings(&app_cfg.resolver);

    eframe::run_native(
        "SnapSteam",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::debug!("{e}");
            }
            Box::new(GuiApp::new(app_cfg, config_path, &lang, resolver))
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

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾는다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트
/// 3) 모두 실패하면 기본 폰트를 유지하고 Err를 돌려준다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Korean font not found, using egui defaults.".into())
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    session: Session,
    resolver: SharedResolver,
    pending: Option<Receiver<Outcome>>,
}

impl GuiApp {
    fn new(
        config: config::Config,
        config_path: PathBuf,
        lang: &str,
        resolver: SharedResolver,
    ) -> Self {
        let session = Session::new(config.display_units);
        Self {
            config,
            config_path,
            tr: i18n::Translator::new_with_pack(lang, Some("locales")),
            session,
            resolver,
            pending: None,
        }
    }

    fn start_calculation(&mut self, ctx: &egui::Context) {
        let Some(request) = self.session.begin_calculation() else {
            return;
        };
        let (tx, rx) = mpsc::channel();
        let resolver = self.resolver.clone();
        let repaint = ctx.clone();
        thread::spawn(move || {
            let outcome = resolver.resolve(&request);
            // 창이 먼저 닫혔으면 수신자가 없다.
            let _ = tx.send(outcome);
            repaint.request_repaint();
        });
        self.pending = Some(rx);
    }

    fn poll_pending(&mut self, ctx: &egui::Context) {
        let Some(rx) = self.pending.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => self.session.complete_calculation(outcome),
            Err(TryRecvError::Empty) => {
                self.pending = Some(rx);
                ctx.request_repaint_after(Duration::from_millis(200));
            }
            Err(TryRecvError::Disconnected) => self.session.complete_calculation(Err(
                ResolveError::Invocation("worker thread stopped".into()),
            )),
        }
    }

    fn set_display_unit(&mut self, group: PropertyGroup, label: &str) {
        if !self.session.set_display_unit(group, label) {
            return;
        }
        self.config.display_units = *self.session.display_units();
        if let Err(e) = self.config.save_to(&self.config_path) {
            tracing::warn!(error = %e, "표시 단위 저장 실패");
        }
    }

    fn form_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::FORM_HEADING));
        ui.separator();

        ui.label(tr.t(keys::FORM_FLUID_STATE));
        let current_state = self.session.input().fluid_state;
        ui.horizontal(|ui| {
            for state in FluidState::ALL {
                if ui
                    .selectable_label(current_state == state, state.label())
                    .clicked()
                    && current_state != state
                {
                    self.session.dispatch(FormAction::SetFluidState(state));
                }
            }
        });
        let hint = match current_state {
            FluidState::SubcooledOrSuperheated => keys::FORM_HINT_SINGLE_PHASE,
            FluidState::Saturated => keys::FORM_HINT_SATURATED,
        };
        ui.small(tr.t(hint));
        ui.add_space(8.0);

        ui.label(tr.t(keys::FORM_INPUT_VARIABLES));
        let current_mode = self.session.input().mode;
        egui::ComboBox::from_id_source("input_mode")
            .selected_text(current_mode.label())
            .width(260.0)
            .show_ui(ui, |ui| {
                for mode in current_state.permitted_modes() {
                    if ui
                        .selectable_label(*mode == current_mode, mode.label())
                        .clicked()
                        && *mode != current_mode
                    {
                        self.session.dispatch(FormAction::SetMode(*mode));
                    }
                }
            });
        ui.add_space(8.0);

        let cfg = self.session.input().mode.config();
        self.axis_editor(ui, Field::First, cfg.first);
        ui.add_space(4.0);
        self.axis_editor(ui, Field::Second, cfg.second);
        ui.add_space(12.0);

        let label = if self.session.is_loading() {
            tr.t(keys::FORM_CALCULATING)
        } else {
            tr.t(keys::FORM_CALCULATE)
        };
        let button = ui
            .add_enabled(
                self.session.can_calculate(),
                egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 32.0)),
            )
            .on_disabled_hover_text(tr.t(keys::FORM_NEEDS_VALUES));
        if button.clicked() {
            self.start_calculation(ctx);
        }
    }

    fn axis_editor(&mut self, ui: &mut egui::Ui, field: Field, axis: AxisConfig) {
        let tr = self.tr.clone();
        let (mut value, unit) = match field {
            Field::First => (
                self.session.input().value1.clone(),
                self.session.input().unit1.clone(),
            ),
            Field::Second => (
                self.session.input().value2.clone(),
                self.session.input().unit2.clone(),
            ),
        };
        ui.strong(axis.label);
        ui.horizontal(|ui| {
            let edit = egui::TextEdit::singleline(&mut value)
                .hint_text(tr.t(keys::FORM_PLACEHOLDER))
                .desired_width(150.0);
            if ui.add(edit).changed() {
                self.session.dispatch(FormAction::SetValue(field, value.clone()));
            }
            ui.add_enabled_ui(axis.unit_selectable(), |ui| {
                egui::ComboBox::from_id_source(("axis_unit", axis.label))
                    .selected_text(unit.as_str())
                    .show_ui(ui, |ui| {
                        for u in axis.units {
                            if ui.selectable_label(*u == unit, *u).clicked() && *u != unit {
                                self.session
                                    .dispatch(FormAction::SetUnit(field, u.to_string()));
                            }
                        }
                    });
            });
        });
    }

    fn error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(err) = self.session.error().cloned() else {
            return;
        };
        let tr = &self.tr;
        let mut dismiss = false;
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.colored_label(ui.visuals().error_fg_color, tr.t(keys::ERROR_TITLE));
                ui.label(tr.resolve_error(&err));
                if err.is_missing_credential() {
                    ui.colored_label(ui.visuals().warn_fg_color, tr.t(keys::ERROR_MISSING_KEY_HINT));
                }
                if ui.small_button("✕").clicked() {
                    dismiss = true;
                }
            });
        if dismiss {
            self.session.dismiss_error();
        }
        ui.add_space(8.0);
    }

    fn result_panel(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        self.error_banner(ui);

        let (Some(result), Some(rows)) = (self.session.result().cloned(), self.session.rows())
        else {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                if self.session.is_loading() {
                    ui.spinner();
                    ui.label(tr.t(keys::FORM_CALCULATING));
                } else {
                    ui.heading(tr.t(keys::RESULT_WAITING_TITLE));
                    ui.label(tr.t(keys::RESULT_WAITING_BODY));
                }
            });
            return;
        };

        ui.horizontal(|ui| {
            ui.heading(format!("{}: {}", tr.t(keys::RESULT_HEADING), result.properties.phase));
            if self.session.is_loading() {
                ui.spinner();
            }
        });
        if !result.description.is_empty() {
            ui.label(result.description.as_str());
        }
        ui.separator();

        let mut unit_change: Option<(PropertyGroup, &'static str)> = None;
        egui::Grid::new("property_rows")
            .num_columns(3)
            .striped(true)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for row in &rows {
                    let label = ui.label(format!("{} ({})", row.label, row.symbol));
                    if let Some(note) = row.note {
                        label.on_hover_text(note);
                    }
                    ui.monospace(row_text(&tr, row));
                    match row.group {
                        Some(group) => {
                            if let Some(picked) = unit_picker(ui, row, group) {
                                unit_change = Some((group, picked));
                            }
                        }
                        None => {
                            ui.label(row.unit);
                        }
                    }
                    ui.end_row();
                }
            });
        if let Some((group, label)) = unit_change {
            self.set_display_unit(group, label);
        }

        ui.add_space(12.0);
        ui.small(tr.t(keys::FOOTNOTE_IAPWS));
    }
}

fn row_text(tr: &i18n::Translator, row: &PropertyRow) -> String {
    match row.group {
        Some(_) => row.text.clone(),
        None => tr.quality(&format_quality(row.value)),
    }
}

fn unit_picker(ui: &mut egui::Ui, row: &PropertyRow, group: PropertyGroup) -> Option<&'static str> {
    let mut picked = None;
    egui::ComboBox::from_id_source(("display_unit", row.symbol))
        .selected_text(row.unit)
        .show_ui(ui, |ui| {
            for u in group.quantity().unit_labels() {
                if ui.selectable_label(*u == row.unit, *u).clicked() {
                    picked = Some(*u);
                }
            }
        });
    picked
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_pending(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.label(self.tr.t(keys::APP_SUBTITLE));
            });
        });

        egui::SidePanel::left("state_form")
            .resizable(false)
            .exact_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.form_panel(ui, ctx));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.result_panel(ui));
        });
    }
}
