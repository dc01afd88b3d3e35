//! Read-only bulletin view

use std::hash::{DefaultHasher, Hash, Hasher};

use eframe::egui::{self, load::Bytes, Color32, RichText};

use crate::app::BulletinApp;
use crate::core::bulletin::Bulletin;
use crate::core::image::decode_data_url;

const ACCENT: Color32 = Color32::from_rgb(242, 160, 61);
const MUTED: Color32 = Color32::from_rgb(107, 114, 128);
const DEFICIT: Color32 = Color32::from_rgb(239, 68, 68);
const SURPLUS: Color32 = Color32::from_rgb(37, 99, 235);

/// Decoded hymn sheet, kept between frames
#[derive(Default)]
pub struct SheetCache {
    revision: Option<u64>,
    key: Option<u64>,
    image: Option<(String, Bytes)>,
    retired: Vec<String>,
}

impl SheetCache {
    /// Image URI and bytes for an embedded sheet.
    ///
    /// The sheet is only looked at again when the bulletin revision moves,
    /// and only re-decoded when its content changed.
    pub fn get(&mut self, revision: u64, sheet: &str) -> Option<(String, Bytes)> {
        if self.revision == Some(revision) {
            return self.image.clone();
        }
        self.revision = Some(revision);

        let mut hasher = DefaultHasher::new();
        sheet.hash(&mut hasher);
        let key = hasher.finish();
        if self.key == Some(key) {
            return self.image.clone();
        }
        self.key = Some(key);

        if let Some((uri, _)) = self.image.take() {
            self.retired.push(uri);
        }
        self.image = decode_data_url(sheet).map(|(mime, bytes)| {
            (format!("bytes://hymn-sheet-{key:016x}.{}", extension(&mime)), Bytes::from(bytes))
        });
        if self.image.is_none() {
            tracing::warn!("Hymn sheet is not an embedded image");
        }
        self.image.clone()
    }

    /// Drop the sheet, e.g. after it was removed from the bulletin
    pub fn clear(&mut self) {
        self.revision = None;
        self.key = None;
        if let Some((uri, _)) = self.image.take() {
            self.retired.push(uri);
        }
    }

    /// URIs of sheets no longer shown, for releasing from the image loaders
    pub fn take_retired(&mut self) -> Vec<String> {
        std::mem::take(&mut self.retired)
    }
}

fn extension(mime: &str) -> &str {
    match mime {
        "image/jpeg" => "jpg",
        "image/svg+xml" => "svg",
        other => other.strip_prefix("image/").unwrap_or("png"),
    }
}

/// Display panel
pub struct DisplayPanel;

impl DisplayPanel {
    pub fn show(ui: &mut egui::Ui, app: &mut BulletinApp) {
        let bulletin = app.state.document();
        let revision = app.state.revision();
        let sheet_cache = &mut app.sheet_cache;
        if bulletin.hymn.music_sheet.is_none() {
            sheet_cache.clear();
        }
        for uri in sheet_cache.take_retired() {
            tracing::debug!("Releasing {}", uri);
            ui.ctx().forget_image(&uri);
        }

        egui::ScrollArea::vertical()
            .id_salt("display_scroll")
            .show(ui, |ui| {
                Self::cover(ui, bulletin);
                page(ui, &bulletin.about.title, |ui| {
                    ui.label(RichText::new(&bulletin.about.body).color(MUTED).size(17.0));
                });
                Self::agenda(ui, bulletin);
                page(ui, &bulletin.hymn.title, |ui| {
                    let image = bulletin.hymn.music_sheet.as_deref().and_then(|s| sheet_cache.get(revision, s));
                    match image {
                        Some((uri, bytes)) => {
                            ui.add(egui::Image::from_bytes(uri, bytes).max_width(ui.available_width()));
                        }
                        None => {
                            ui.vertical_centered(|ui| {
                                ui.add_space(80.0);
                                ui.label(RichText::new("악보 이미지가 없습니다.").color(MUTED));
                                ui.add_space(80.0);
                            });
                        }
                    }
                });
                Self::news(ui, bulletin);
                Self::finance(ui, bulletin);
                Self::missionaries(ui, bulletin);
                Self::schedule(ui, bulletin);
            });
    }

    fn cover(ui: &mut egui::Ui, bulletin: &Bulletin) {
        card(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.label(RichText::new("모든세대 예배").strong().size(36.0));
                ui.label(RichText::new(&bulletin.main.time).strong().size(72.0));
                egui::Frame::new()
                    .fill(ACCENT)
                    .corner_radius(4.0)
                    .inner_margin(egui::Margin::symmetric(24, 4))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("{} {}", bulletin.main.issue, bulletin.main.date))
                                .color(Color32::WHITE)
                                .size(17.0),
                        );
                    });
                ui.add_space(40.0);
                logo(ui, 40.0);
                ui.add_space(60.0);
            });
        });
    }

    fn agenda(ui: &mut egui::Ui, bulletin: &Bulletin) {
        page(ui, "예배순서", |ui| {
            egui::Grid::new("agenda_view")
                .num_columns(2)
                .spacing([24.0, 12.0])
                .show(ui, |ui| {
                    for entry in &bulletin.worship_order {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&entry.item).strong().size(19.0));
                            if let Some(subitem) = entry.subitem.as_deref().filter(|s| !s.is_empty()) {
                                ui.label(RichText::new(subitem).color(MUTED));
                            }
                        });
                        ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                            ui.label(RichText::new(entry.person.as_deref().unwrap_or_default()).size(19.0));
                            if let Some(subperson) = entry.subperson.as_deref().filter(|s| !s.is_empty()) {
                                ui.label(RichText::new(subperson).color(MUTED));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    }

    fn news(ui: &mut egui::Ui, bulletin: &Bulletin) {
        page(ui, "소식", |ui| {
            ui.label(RichText::new(&bulletin.news.title).color(ACCENT).strong());
            ui.add_space(8.0);
            egui::Grid::new("news_view").num_columns(2).striped(true).show(ui, |ui| {
                for item in &bulletin.news.items {
                    ui.label(RichText::new(&item.date).color(MUTED));
                    ui.label(RichText::new(&item.event).strong());
                    ui.end_row();
                }
            });
        });
    }

    fn finance(ui: &mut egui::Ui, bulletin: &Bulletin) {
        page(ui, "재정", |ui| {
            egui::Grid::new("finance_view").num_columns(2).show(ui, |ui| {
                for report in &bulletin.finance.reports {
                    ui.label(report.item.as_str());
                    let color = if report.is_negative() { DEFICIT } else { SURPLUS };
                    ui.label(RichText::new(&report.amount).strong().color(color));
                    ui.end_row();
                }
            });
            ui.separator();
            ui.label(RichText::new("헌금계좌").strong().size(22.0));
            let account = &bulletin.finance.account;
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                ui.label(format!("{} {}", account.bank, account.number));
                ui.label(RichText::new(&account.holder).color(MUTED));
            });
        });
    }

    fn missionaries(ui: &mut egui::Ui, bulletin: &Bulletin) {
        let missionaries = &bulletin.missionaries;
        page(ui, &missionaries.title, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&missionaries.quote).color(SURPLUS).size(24.0));
            });
            ui.add_space(12.0);
            egui::Grid::new("missionary_view")
                .num_columns(3)
                .spacing([32.0, 16.0])
                .show(ui, |ui| {
                    for (i, item) in missionaries.items.iter().enumerate() {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(&item.country).strong().size(24.0));
                            ui.label(RichText::new(&item.names).color(MUTED));
                        });
                        if i % 3 == 2 {
                            ui.end_row();
                        }
                    }
                });
        });
    }

    fn schedule(ui: &mut egui::Ui, bulletin: &Bulletin) {
        let schedule = &bulletin.schedule;
        page(ui, &schedule.title, |ui| {
            egui::Grid::new("schedule_view")
                .num_columns(3)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    for entry in &schedule.weekly {
                        ui.label(RichText::new(&entry.date).strong());
                        ui.label(format!("기도: {}", entry.prayer));
                        ui.label(format!("말씀: {}", entry.sermon));
                        ui.end_row();
                    }
                });
            ui.add_space(12.0);
            ui.columns(2, |columns| {
                roster(&mut columns[0], &schedule.prayer_list);
                roster(&mut columns[1], &schedule.sermon_list);
            });
        });
    }
}

fn roster(ui: &mut egui::Ui, text: &str) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.add(egui::Label::new(RichText::new(text).color(MUTED)).wrap());
        });
}

fn logo(ui: &mut egui::Ui, size: f32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("RAON").strong().size(size).color(ACCENT));
        ui.label(RichText::new("동행").strong().size(size));
    });
    ui.label(RichText::new("CHURCH").strong().size(size * 1.4));
}

fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
    ui.add_space(24.0);
}

/// Titled page with the church logo on the right
fn page(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(title).strong().size(32.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.vertical(|ui| logo(ui, 16.0));
            });
        });
        ui.add_space(16.0);
        add_contents(ui);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::image::embed;

    #[test]
    fn test_sheet_cache_decodes_once_per_sheet() {
        let mut cache = SheetCache::default();
        let sheet = embed(b"GIF89a", "image/gif").unwrap();
        let (uri, bytes) = cache.get(1, &sheet).unwrap();
        assert!(uri.starts_with("bytes://hymn-sheet-"));
        assert!(uri.ends_with(".gif"));
        assert_eq!(&*bytes, b"GIF89a");

        let (again, _) = cache.get(1, &sheet).unwrap();
        assert_eq!(uri, again);

        // Another field edited: same sheet, same image
        let (unchanged, _) = cache.get(2, &sheet).unwrap();
        assert_eq!(uri, unchanged);
        assert!(cache.take_retired().is_empty());

        let other = embed(b"GIF87a", "image/gif").unwrap();
        let (changed, _) = cache.get(3, &other).unwrap();
        assert_ne!(uri, changed);
        assert_eq!(cache.take_retired(), vec![uri]);
        assert!(cache.take_retired().is_empty());
    }

    #[test]
    fn test_sheet_cache_trusts_revision() {
        let mut cache = SheetCache::default();
        let sheet = embed(b"GIF89a", "image/gif").unwrap();
        let (uri, _) = cache.get(7, &sheet).unwrap();
        let (same, _) = cache.get(7, "악보").unwrap();
        assert_eq!(uri, same);
    }

    #[test]
    fn test_sheet_cache_clear_retires_image() {
        let mut cache = SheetCache::default();
        let sheet = embed(b"GIF89a", "image/gif").unwrap();
        let (uri, _) = cache.get(1, &sheet).unwrap();
        cache.clear();
        assert_eq!(cache.take_retired(), vec![uri.clone()]);

        let (again, _) = cache.get(1, &sheet).unwrap();
        assert_eq!(again, uri);
    }

    #[test]
    fn test_sheet_cache_rejects_plain_text() {
        let mut cache = SheetCache::default();
        assert!(cache.get(1, "악보").is_none());
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("image/jpeg"), "jpg");
        assert_eq!(extension("image/svg+xml"), "svg");
        assert_eq!(extension("image/webp"), "webp");
    }
}
