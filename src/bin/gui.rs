#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, PlotPoint, Points, Text};
use image::GenericImageView;
use rfd::FileDialog;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use stress_strain_toolbox::{
    app, config,
    i18n::{self, fill_template, keys},
    logging,
    tensile::{
        self,
        chart::{LineStyle, MarkerShape, Rgb, VerticalAnchor},
        ChartSpec, LabelMode, Milestone, TestRecord,
    },
    units::{convert_length, ForceUnit, LengthUnit},
};
use tracing::{debug, warn};

fn main() -> Result<(), eframe::Error> {
    // CLI 옵션 처리: --lang xx 또는 --lang=xx, --verbose
    let mut cli_lang: Option<String> = None;
    let mut verbose = false;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        } else if a == "--verbose" || a == "-v" {
            verbose = true;
        }
        i += 1;
    }
    logging::init(verbose);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1100.0, 720.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Stress-Strain Curve Generator",
        options,
        Box::new(move |cc| {
            setup_fonts(&cc.egui_ctx, app_cfg.font_path.as_deref());
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

const HANGUL_FONT: &str = "hangul";

/// `name` 폰트를 비례/고정폭 글꼴 목록 맨 앞에 둔 폰트 정의.
fn font_definitions(bytes: Vec<u8>, name: &str) -> egui::FontDefinitions {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, name.to_owned());
    }
    fonts
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    ctx.set_fonts(font_definitions(bytes, name));
}

/// TrueType/OpenType/컬렉션 헤더 확인. egui는 잘못된 폰트 데이터에서 패닉한다.
fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0x00, 0x01, 0x00, 0x00])
            | Some([b'O', b'T', b'T', b'O'])
            | Some([b't', b'r', b'u', b'e'])
            | Some([b't', b't', b'c', b'f'])
    )
}

/// 사용자가 지정한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &Path) -> io::Result<()> {
    let bytes = fs::read(path)?;
    if !looks_like_font(&bytes) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("not a TrueType/OpenType font: {}", path.display()),
        ));
    }
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 한글 글리프가 있는 폰트 후보: 프로젝트 assets, Windows, macOS, Linux 순.
fn system_font_candidates() -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = ["assets/fonts/malgun.ttf", "assets/fonts/NanumGothic.ttf"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        out.extend(["malgun.ttf", "gulim.ttc", "batang.ttc"].map(|f| fonts.join(f)));
    }
    out.extend(
        [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/Library/Fonts/AppleGothic.ttf",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        ]
        .map(PathBuf::from),
    );
    out
}

/// 한글을 표시할 폰트를 적용한다. 사용자 지정 폰트를 먼저 시도하고,
/// 없으면 시스템 폰트를 찾는다. 모두 실패하면 egui 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context, user_font: Option<&str>) {
    if let Some(path) = user_font.map(str::trim).filter(|p| !p.is_empty()) {
        match load_custom_font(ctx, Path::new(path)) {
            Ok(()) => {
                debug!(path, "user font loaded");
                return;
            }
            Err(e) => warn!(path, error = %e, "user font could not be loaded"),
        }
    }
    let found = system_font_candidates().into_iter().find_map(|path| {
        let bytes = fs::read(&path).ok().filter(|b| looks_like_font(b))?;
        Some((path, bytes))
    });
    match found {
        Some((path, bytes)) => {
            debug!(path = %path.display(), "hangul font loaded");
            apply_font_bytes(ctx, bytes, HANGUL_FONT);
        }
        None => warn!("no hangul font found; keeping egui default fonts"),
    }
}

const LENGTH_UNITS: [LengthUnit; 5] = [
    LengthUnit::Millimeter,
    LengthUnit::Centimeter,
    LengthUnit::Meter,
    LengthUnit::Inch,
    LengthUnit::Foot,
];

const FORCE_UNITS: [ForceUnit; 4] = [
    ForceUnit::Newton,
    ForceUnit::KiloNewton,
    ForceUnit::KilogramForce,
    ForceUnit::PoundForce,
];

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    font_input: String,
    window_alpha: f32,
    show_settings_modal: bool,
    show_help_modal: bool,
    settings_status: Option<String>,
    // 입력 폼
    record: TestRecord,
    label_by_origin: bool,
    record_status: Option<String>,
    // 마지막 실행 결과
    chart: Option<ChartSpec>,
    error: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang = i18n::resolve_language(&config.language, None);
        let tr = i18n::Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
        Self {
            lang_input: config.language.clone(),
            font_input: config.font_path.clone().unwrap_or_default(),
            window_alpha: config.window_alpha,
            show_settings_modal: false,
            show_help_modal: false,
            settings_status: None,
            record: config.defaults.clone(),
            label_by_origin: config.label_mode == LabelMode::ByOrigin,
            record_status: None,
            chart: None,
            error: None,
            tr,
            config,
        }
    }

    fn label_mode(&self) -> LabelMode {
        if self.label_by_origin {
            LabelMode::ByOrigin
        } else {
            LabelMode::Positional
        }
    }

    /// 생성 버튼을 눌렀을 때 한 번 계산한다. 실패하면 그래프 대신 오류 메시지를 보여준다.
    fn generate(&mut self) {
        match tensile::generate(&self.record, self.label_mode()) {
            Ok(chart) => {
                self.chart = Some(chart);
                self.error = None;
            }
            Err(e) => {
                self.chart = None;
                self.error = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    /// TOML 레코드를 폼에 채운다. 그래프는 다시 생성할 때까지 지운다.
    fn load_record(&mut self, path: &Path) {
        match app::load_record(path) {
            Ok(record) => {
                self.record = record;
                self.chart = None;
                self.error = None;
                self.record_status = Some(path.display().to_string());
            }
            Err(e) => {
                self.record_status =
                    Some(format!("{}: {e}", self.tr.t(keys::LOAD_RECORD_FAILED)));
            }
        }
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::INPUT_HEADER));
        ui.separator();

        let mut length_unit = self.record.length_unit;
        let mut force_unit = self.record.force_unit;
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::INPUT_UNITS));
            egui::ComboBox::from_id_source("length_unit")
                .selected_text(length_unit.symbol())
                .show_ui(ui, |ui| {
                    for u in LENGTH_UNITS {
                        ui.selectable_value(&mut length_unit, u, u.symbol());
                    }
                });
            egui::ComboBox::from_id_source("force_unit")
                .selected_text(force_unit.symbol())
                .show_ui(ui, |ui| {
                    for u in FORCE_UNITS {
                        ui.selectable_value(&mut force_unit, u, u.symbol());
                    }
                });
        });
        if (length_unit, force_unit) != (self.record.length_unit, self.record.force_unit) {
            // 단위만 바꾸면 값의 물리적 의미가 달라지므로 같이 환산한다.
            self.record.convert_units(length_unit, force_unit);
        }

        let len_unit = self.record.length_unit.symbol();
        let force_unit = self.record.force_unit.symbol();
        // 폼 최소값은 1 mm를 현재 단위로 환산한 값
        let min_len = convert_length(1.0, LengthUnit::Millimeter, self.record.length_unit);

        egui::Grid::new("geometry_grid").num_columns(2).show(ui, |ui| {
            ui.label(fill_template(tr.t(keys::INPUT_DIAMETER), &[("unit", len_unit)]));
            ui.add(
                egui::DragValue::new(&mut self.record.diameter)
                    .speed(0.1)
                    .clamp_range(min_len..=f64::MAX),
            );
            ui.end_row();
            ui.label(fill_template(tr.t(keys::INPUT_INITIAL_LENGTH), &[("unit", len_unit)]));
            ui.add(
                egui::DragValue::new(&mut self.record.initial_length)
                    .speed(0.1)
                    .clamp_range(min_len..=f64::MAX),
            );
            ui.end_row();
        });

        ui.separator();
        ui.strong(fill_template(tr.t(keys::INPUT_LOADS_HEADER), &[("unit", force_unit)]));
        egui::Grid::new("load_grid").num_columns(2).show(ui, |ui| {
            for m in Milestone::ALL {
                ui.label(format!("{}:", tr.t(m.i18n_key())));
                ui.add(
                    egui::DragValue::new(&mut self.record.loads[m.index()])
                        .speed(100.0)
                        .clamp_range(0.0..=f64::MAX),
                );
                ui.end_row();
            }
        });

        ui.separator();
        ui.strong(fill_template(tr.t(keys::INPUT_LENGTHS_HEADER), &[("unit", len_unit)]));
        egui::Grid::new("length_grid").num_columns(2).show(ui, |ui| {
            for m in Milestone::ALL {
                ui.label(fill_template(
                    tr.t(keys::INPUT_LENGTH_AT),
                    &[("label", tr.t(m.i18n_key()))],
                ));
                ui.add(
                    egui::DragValue::new(&mut self.record.lengths[m.index()])
                        .speed(0.1)
                        .clamp_range(min_len..=f64::MAX),
                );
                ui.end_row();
            }
        });

        ui.separator();
        ui.checkbox(&mut self.label_by_origin, tr.t(keys::LABEL_BY_ORIGIN));
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::LOAD_RECORD)).clicked() {
                if let Some(path) = FileDialog::new().add_filter("TOML", &["toml"]).pick_file() {
                    self.load_record(&path);
                }
            }
            if ui.button(tr.t(keys::GENERATE_BUTTON)).clicked() {
                self.generate();
            }
        });
        if let Some(msg) = &self.record_status {
            ui.label(egui::RichText::new(msg).small());
        }
    }

    fn ui_chart(&self, ui: &mut egui::Ui) {
        match (&self.chart, &self.error) {
            (_, Some(err)) => {
                ui.colored_label(egui::Color32::RED, err.as_str());
            }
            (Some(chart), None) => draw_chart(ui, chart),
            (None, None) => {
                ui.label(self.tr.t(keys::CHART_PLACEHOLDER));
            }
        }
    }
}

fn color32(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.0, c.1, c.2)
}

fn plot_line_style(style: LineStyle) -> egui_plot::LineStyle {
    match style {
        LineStyle::Solid => egui_plot::LineStyle::Solid,
        LineStyle::Dashed => egui_plot::LineStyle::dashed_loose(),
    }
}

fn plot_marker(shape: MarkerShape) -> egui_plot::MarkerShape {
    match shape {
        MarkerShape::Circle => egui_plot::MarkerShape::Circle,
    }
}

fn text_anchor(anchor: VerticalAnchor) -> egui::Align2 {
    match anchor {
        VerticalAnchor::Bottom => egui::Align2::LEFT_BOTTOM,
        VerticalAnchor::Center => egui::Align2::LEFT_CENTER,
        VerticalAnchor::Top => egui::Align2::LEFT_TOP,
    }
}

/// 그래프 명세를 egui_plot으로 그린다.
fn draw_chart(ui: &mut egui::Ui, chart: &ChartSpec) {
    ui.heading(chart.title.as_str());
    let mut plot = Plot::new("stress_strain_plot")
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .show_grid(chart.grid);
    if chart.legend {
        plot = plot.legend(Legend::default());
    }
    plot.show(ui, |plot_ui| {
        let curve = &chart.smooth_curve;
        plot_ui.line(
            Line::new(curve.points.clone())
                .color(color32(curve.color))
                .style(plot_line_style(curve.line))
                .name(&curve.name),
        );

        let data = &chart.data_points;
        plot_ui.line(
            Line::new(data.points.clone())
                .color(color32(data.color))
                .style(plot_line_style(data.line))
                .name(&data.name),
        );
        if let Some(shape) = data.marker {
            plot_ui.points(
                Points::new(data.points.clone())
                    .shape(plot_marker(shape))
                    .radius(4.0)
                    .filled(true)
                    .color(color32(data.color))
                    .name(&data.name),
            );
        }

        for a in &chart.key_points {
            plot_ui.points(
                Points::new(vec![[a.x, a.y]])
                    .shape(egui_plot::MarkerShape::Circle)
                    .radius(4.0)
                    .filled(true)
                    .color(color32(a.marker_color)),
            );
            plot_ui.text(
                Text::new(
                    PlotPoint::new(a.x, a.y),
                    egui::RichText::new(&a.text).size(a.font_size),
                )
                .anchor(text_anchor(a.anchor)),
            );
        }
    });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(tr.t(keys::HELP_TITLE)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(tr.t(keys::SETTINGS_TITLE))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(tr.t(keys::SETTINGS_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(self.lang_input.as_str())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.separator();
                    ui.label(tr.t(keys::SETTINGS_ALPHA));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(tr.t(keys::SETTINGS_FONT));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.font_input);
                        if ui.button(tr.t(keys::SETTINGS_FONT_APPLY)).clicked() {
                            let path = Path::new(self.font_input.trim());
                            self.settings_status = Some(match load_custom_font(ui.ctx(), path) {
                                Ok(()) => tr.t(keys::SETTINGS_FONT_APPLIED).to_string(),
                                Err(e) => format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                            });
                        }
                    });
                    ui.separator();
                    if ui.button(tr.t(keys::SETTINGS_SAVE)).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.window_alpha = self.window_alpha;
                        let font = self.font_input.trim();
                        self.config.font_path = (!font.is_empty()).then(|| font.to_string());
                        self.config.label_mode = if self.label_by_origin {
                            LabelMode::ByOrigin
                        } else {
                            LabelMode::Positional
                        };
                        self.config.defaults = self.record.clone();
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        self.settings_status = Some(match self.config.save() {
                            Ok(()) => tr.t(keys::SETTINGS_SAVED).to_string(),
                            Err(e) => format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                        });
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg.as_str());
                    }
                });
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(tr.t(keys::HELP_TITLE))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.label(tr.t(keys::HELP_FORMULA));
                    ui.separator();
                    ui.label(tr.t(keys::HELP_LABELS));
                });
        }

        egui::SidePanel::left("input_panel")
            .resizable(true)
            .min_width(260.0)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| self.ui_form(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| self.ui_chart(ui));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_record() -> TestRecord {
        TestRecord::new_mm_n(
            10.0,
            100.0,
            [0.0, 1000.0, 2000.0, 2500.0, 2400.0, 3000.0, 2800.0],
            [100.0, 99.9, 99.0, 98.0, 98.5, 95.0, 90.0],
        )
    }

    #[test]
    fn form_defaults_come_from_config() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.record, TestRecord::default());
        assert!(!app.label_by_origin);
        assert!(app.chart.is_none());
    }

    #[test]
    fn default_form_values_fail_without_chart() {
        // 기본 폼은 모든 길이가 같아 변형률이 중복된다.
        let mut app = GuiApp::new(config::Config::default());
        app.generate();
        assert!(app.chart.is_none());
        assert!(app.error.is_some());
    }

    #[test]
    fn generate_replaces_previous_error() {
        let mut app = GuiApp::new(config::Config::default());
        app.generate();
        app.record = scenario_record();
        app.generate();
        assert!(app.error.is_none());
        let chart = app.chart.as_ref().unwrap();
        assert_eq!(chart.smooth_curve.points.len(), 300);
    }

    #[test]
    fn label_checkbox_switches_mode() {
        let mut app = GuiApp::new(config::Config::default());
        app.record = scenario_record();
        app.label_by_origin = true;
        app.generate();
        let chart = app.chart.as_ref().unwrap();
        assert_eq!(chart.key_points[3].text, "Lower Yield Point");
    }

    #[test]
    fn registered_font_takes_priority() {
        let defs = font_definitions(vec![0x00, 0x01, 0x00, 0x00], HANGUL_FONT);
        assert!(defs.font_data.contains_key(HANGUL_FONT));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            let names = &defs.families[&family];
            assert_eq!(names[0], HANGUL_FONT);
            // 기본 글꼴은 뒤에 남는다.
            assert!(names.len() > 1);
        }
    }

    #[test]
    fn font_header_is_checked() {
        assert!(looks_like_font(&[0x00, 0x01, 0x00, 0x00, 0x12]));
        assert!(looks_like_font(b"OTTO...."));
        assert!(looks_like_font(b"ttcf...."));
        assert!(!looks_like_font(b"hello"));
        assert!(!looks_like_font(b"tt"));
    }

    #[test]
    fn non_font_file_is_rejected() {
        let path = env::temp_dir().join(format!("ss_gui_font_{}.ttf", std::process::id()));
        fs::write(&path, "not a font").unwrap();
        let ctx = egui::Context::default();
        let err = load_custom_font(&ctx, &path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(load_custom_font(&ctx, Path::new("/no/such/font.ttf")).is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn font_path_comes_from_config() {
        let mut cfg = config::Config::default();
        cfg.font_path = Some("fonts/nanum.ttf".into());
        let app = GuiApp::new(cfg);
        assert_eq!(app.font_input, "fonts/nanum.ttf");
    }

    #[test]
    fn color_and_style_mapping() {
        assert_eq!(color32(Rgb::BLUE), egui::Color32::from_rgb(0, 0, 255));
        assert_eq!(
            text_anchor(VerticalAnchor::Bottom),
            egui::Align2::LEFT_BOTTOM
        );
    }
}
