//! Main application state and UI coordination

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;

use crate::core::config::{AppConfig, UiConfig};
use crate::core::edit::Edit;
use crate::core::image;
use crate::core::share::{self, Clipboard, Mode, ShareOutcome};
use crate::core::state::BulletinState;
use crate::ui::display::{DisplayPanel, SheetCache};
use crate::ui::edit_form::EditFormPanel;
use crate::ui::notice::{show_notice, Notice, NoticeKind};

/// Fonts tried in order when no font is configured; egui's bundled fonts lack Hangul
const HANGUL_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\malgun.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
];

/// Main application state
pub struct BulletinApp {
    /// The bulletin being edited or displayed
    pub state: BulletinState,
    /// Current view mode
    pub mode: Mode,
    /// Application configuration
    pub config: AppConfig,
    /// Address share links are built on
    pub share_base: String,
    /// Transient message shown above the floating buttons
    pub notice: Option<Notice>,
    /// Decoded hymn sheet for the display view
    pub sheet_cache: SheetCache,
    /// Bulletin revision the window title was last built from
    title_revision: Option<u64>,
}

impl BulletinApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, launch: Option<&str>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });

        Self::configure_style(&cc.egui_ctx, &config.ui);
        if let Err(e) = Self::configure_fonts(&cc.egui_ctx, &config.ui) {
            tracing::warn!("Failed to load Hangul font: {}", e);
        }

        Self::from_launch(config, launch)
    }

    /// Build the application state from the launch address
    pub fn from_launch(config: AppConfig, launch: Option<&str>) -> Self {
        let hydration = share::hydrate(launch);
        let share_base = hydration
            .address
            .map(|address| address.to_string())
            .unwrap_or_else(|| config.share_base_url.clone());

        Self {
            state: BulletinState::new(hydration.bulletin),
            mode: hydration.mode,
            config,
            share_base,
            notice: None,
            sheet_cache: SheetCache::default(),
            title_revision: None,
        }
    }

    fn configure_style(ctx: &egui::Context, ui: &UiConfig) {
        if ui.is_dark() {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
        let size = ui.font_size;
        ctx.style_mut(|style| {
            style
                .text_styles
                .insert(egui::TextStyle::Body, egui::FontId::proportional(size));
            style
                .text_styles
                .insert(egui::TextStyle::Button, egui::FontId::proportional(size));
        });
    }

    /// Prepend a Hangul-capable font to the default families
    fn configure_fonts(ctx: &egui::Context, ui: &UiConfig) -> anyhow::Result<()> {
        let candidates: Vec<PathBuf> = match ui.font_path {
            Some(ref path) => vec![path.clone()],
            None => HANGUL_FONTS.iter().map(PathBuf::from).collect(),
        };
        let path = candidates
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| anyhow::anyhow!("no Hangul font found"))?;
        let bytes = std::fs::read(&path)?;

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("hangul".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().insert(0, "hangul".to_owned());
        }
        ctx.set_fonts(fonts);

        tracing::info!("Using font: {}", path.display());
        Ok(())
    }

    /// Switch between the edit form and the display view
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Copy a share link for the current bulletin
    pub fn share(&mut self, clipboard: &mut dyn Clipboard) {
        let outcome = share::share_to_clipboard(&self.share_base, self.state.document(), clipboard);
        if let ShareOutcome::Copied(ref link) = outcome {
            tracing::debug!("Share link: {}", link);
        }
        self.notice = Some(Notice::from_share(&outcome, self.config.share_notice_duration()));
    }

    /// Ask the user for a sheet-music image
    pub fn pick_hymn_sheet(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("악보 이미지 선택")
            .add_filter("이미지", &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"]);
        if let Some(ref dir) = self.config.last_image_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.config.remember_image_dir(&path);
            self.attach_hymn_sheet(&path);
        }
    }

    /// Embed an image file as the hymn sheet; a rejected file leaves the current sheet
    pub fn attach_hymn_sheet(&mut self, path: &Path) {
        let embedded = image::read_image(path).and_then(|(bytes, mime)| {
            Ok(image::embed_into(self.state.document(), &bytes, mime)?)
        });
        match embedded {
            Ok(next) => self.state.replace(next),
            Err(e) => {
                tracing::error!("Failed to attach hymn sheet: {}", e);
                self.notice = Some(Notice::new(
                    "악보 이미지를 불러오지 못했습니다.",
                    NoticeKind::Error,
                    self.config.share_notice_duration(),
                ));
            }
        }
    }

    pub fn clear_hymn_sheet(&mut self) {
        self.state.apply_all([Edit::SheetMusic(None)]);
    }

    /// Keep the window title on the current issue
    fn update_title(&mut self, ctx: &egui::Context) {
        let revision = self.state.revision();
        if self.title_revision == Some(revision) {
            return;
        }
        self.title_revision = Some(revision);
        let main = &self.state.document().main;
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "Raon Bulletin - {} {}",
            main.issue, main.date
        )));
    }

    /// Floating mode toggle and share buttons
    fn render_actions(&mut self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("floating_actions"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-24.0, -24.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let (label, hint) = match self.mode {
                    Mode::Edit => ("\u{1F441}", "보기 모드로 전환"),
                    Mode::Display => ("\u{270F}", "수정 모드로 전환"),
                };
                let toggle = egui::Button::new(egui::RichText::new(label).size(24.0))
                    .fill(egui::Color32::from_rgb(234, 88, 12))
                    .min_size(egui::vec2(56.0, 56.0));
                if ui.add(toggle).on_hover_text(hint).clicked() {
                    self.toggle_mode();
                }

                let share = egui::Button::new(egui::RichText::new("\u{1F517}").size(24.0))
                    .fill(egui::Color32::from_rgb(37, 99, 235))
                    .min_size(egui::vec2(56.0, 56.0));
                if ui.add(share).on_hover_text("공유 링크 복사").clicked() {
                    let mut clipboard = ctx.clone();
                    self.share(&mut clipboard);
                }
            });
    }
}

impl eframe::App for BulletinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let (toggle, share) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::E),
                i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::C),
            )
        });
        if toggle {
            self.toggle_mode();
        }
        if share {
            let mut clipboard = ctx.clone();
            self.share(&mut clipboard);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(860.0);
                match self.mode {
                    Mode::Edit => EditFormPanel::show(ui, self),
                    Mode::Display => DisplayPanel::show(ui, self),
                }
            });
        });

        self.render_actions(ctx);
        show_notice(ctx, &mut self.notice);
        self.update_title(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bulletin::{Bulletin, ListSection};
    use crate::core::error::ShareError;

    struct RecordingClipboard(Vec<String>);

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: String) -> Result<(), ShareError> {
            self.0.push(text);
            Ok(())
        }
    }

    #[test]
    fn test_starts_in_edit_mode_without_link() {
        let app = BulletinApp::from_launch(AppConfig::default(), None);
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.share_base, "http://localhost:3000/sunday1/");
        assert_eq!(app.state.document(), &Bulletin::default());
    }

    #[test]
    fn test_share_then_open_link() {
        let mut app = BulletinApp::from_launch(AppConfig::default(), None);
        app.state
            .apply(&Edit::list(ListSection::News, 2, "event", "송년예배"))
            .unwrap();

        let mut clipboard = RecordingClipboard(Vec::new());
        app.share(&mut clipboard);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
        assert_eq!(clipboard.0.len(), 1);

        let opened = BulletinApp::from_launch(AppConfig::default(), Some(clipboard.0[0].as_str()));
        assert_eq!(opened.mode, Mode::Display);
        assert_eq!(opened.state.document(), app.state.document());
        assert_eq!(opened.share_base, "http://localhost:3000/sunday1/");
    }

    #[test]
    fn test_toggle_mode_keeps_document() {
        let mut app = BulletinApp::from_launch(AppConfig::default(), None);
        let revision = app.state.revision();
        app.toggle_mode();
        assert_eq!(app.mode, Mode::Display);
        app.toggle_mode();
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.state.revision(), revision);
    }

    #[test]
    fn test_attach_rejected_sheet_keeps_current() {
        let mut app = BulletinApp::from_launch(AppConfig::default(), None);
        let dir = std::env::temp_dir().join(format!("raon-bulletin-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("sheet.png");
        std::fs::write(&good, [0x89, b'P', b'N', b'G']).unwrap();
        app.attach_hymn_sheet(&good);
        let attached = app.state.document().hymn.music_sheet.clone();
        assert_eq!(attached.as_deref(), Some("data:image/png;base64,iVBORw=="));

        let empty = dir.join("empty.png");
        std::fs::write(&empty, b"").unwrap();
        app.attach_hymn_sheet(&empty);
        assert_eq!(app.state.document().hymn.music_sheet, attached);
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));

        app.clear_hymn_sheet();
        assert_eq!(app.state.document().hymn.music_sheet, None);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
