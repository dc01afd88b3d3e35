//! Edit view: one form group per bulletin section

use eframe::egui::{self, RichText};

use crate::app::BulletinApp;
use crate::core::bulletin::{Bulletin, ListSection};
use crate::core::edit::{Edit, FieldPath, Section};

/// Request from the form that needs the application (file dialog etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetAction {
    Pick,
    Clear,
}

/// Edit form panel
pub struct EditFormPanel;

impl EditFormPanel {
    /// Show the form and apply whatever the user changed this frame
    pub fn show(ui: &mut egui::Ui, app: &mut BulletinApp) {
        let mut edits = Vec::new();
        let mut sheet_action = None;

        egui::ScrollArea::vertical()
            .id_salt("edit_scroll")
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("주보 내용 수정").strong().size(28.0));
                });
                ui.add_space(12.0);

                let bulletin = app.state.document();
                Self::header(ui, bulletin, &mut edits);
                Self::introduction(ui, bulletin, &mut edits);
                Self::agenda(ui, bulletin, &mut edits);
                sheet_action = Self::hymn(ui, bulletin, &mut edits);
                Self::news(ui, bulletin, &mut edits);
                Self::finance(ui, bulletin, &mut edits);
                Self::missionaries(ui, bulletin, &mut edits);
                Self::schedule(ui, bulletin, &mut edits);
            });

        app.state.apply_all(edits);
        match sheet_action {
            Some(SheetAction::Pick) => app.pick_hymn_sheet(),
            Some(SheetAction::Clear) => app.clear_hymn_sheet(),
            None => {}
        }
    }

    fn header(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        group(ui, "메인 정보", |ui| {
            egui::Grid::new("header_grid").num_columns(2).show(ui, |ui| {
                let main = &bulletin.main;
                labeled_line(ui, "발행 호수", &main.issue, FieldPath::new(Section::Main, "issue"), edits);
                labeled_line(ui, "날짜", &main.date, FieldPath::new(Section::Main, "date"), edits);
                labeled_line(ui, "예배 시간", &main.time, FieldPath::new(Section::Main, "time"), edits);
            });
        });
    }

    fn introduction(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        group(ui, "교회 소개", |ui| {
            egui::Grid::new("about_grid").num_columns(2).show(ui, |ui| {
                labeled_line(
                    ui,
                    "소개글 제목",
                    &bulletin.about.title,
                    FieldPath::new(Section::About, "title"),
                    edits,
                );
            });
            ui.label("소개글 본문");
            multiline(ui, &bulletin.about.body, FieldPath::new(Section::About, "body"), edits);
        });
    }

    fn agenda(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        let section = ListSection::WorshipOrder;
        group(ui, "예배 순서", |ui| {
            egui::Grid::new("agenda_grid")
                .num_columns(4)
                .striped(true)
                .show(ui, |ui| {
                    for (index, entry) in bulletin.worship_order.iter().enumerate() {
                        entry_line(ui, "항목", &entry.item, section, index, "item", edits);
                        entry_line(ui, "담당자", optional(&entry.person), section, index, "person", edits);
                        entry_line(ui, "소항목", optional(&entry.subitem), section, index, "subitem", edits);
                        entry_line(
                            ui,
                            "소항목 담당/설명",
                            optional(&entry.subperson),
                            section,
                            index,
                            "subperson",
                            edits,
                        );
                        ui.end_row();
                    }
                });
        });
    }

    fn hymn(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) -> Option<SheetAction> {
        let mut action = None;
        group(ui, "결단 찬송", |ui| {
            egui::Grid::new("hymn_grid").num_columns(2).show(ui, |ui| {
                labeled_line(
                    ui,
                    "찬송 제목",
                    &bulletin.hymn.title,
                    FieldPath::new(Section::Hymn, "title"),
                    edits,
                );
            });
            ui.horizontal(|ui| {
                ui.label("악보 이미지");
                if ui.button("파일 선택...").clicked() {
                    action = Some(SheetAction::Pick);
                }
                if bulletin.hymn.music_sheet.is_some() {
                    ui.label(RichText::new("첨부됨").weak());
                    if ui.button("삭제").clicked() {
                        action = Some(SheetAction::Clear);
                    }
                }
            });
        });
        action
    }

    fn news(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        let section = ListSection::News;
        group(ui, "소식", |ui| {
            egui::Grid::new("news_title_grid").num_columns(2).show(ui, |ui| {
                labeled_line(
                    ui,
                    "소식 상단 제목",
                    &bulletin.news.title,
                    FieldPath::new(Section::News, "title"),
                    edits,
                );
            });
            egui::Grid::new("news_grid").num_columns(2).show(ui, |ui| {
                for (index, item) in bulletin.news.items.iter().enumerate() {
                    entry_line(ui, "날짜", &item.date, section, index, "date", edits);
                    entry_line(ui, "이벤트", &item.event, section, index, "event", edits);
                    ui.end_row();
                }
            });
        });
    }

    fn finance(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        let section = ListSection::Finance;
        group(ui, "재정", |ui| {
            egui::Grid::new("finance_grid").num_columns(2).show(ui, |ui| {
                for (index, report) in bulletin.finance.reports.iter().enumerate() {
                    entry_line(ui, "항목", &report.item, section, index, "item", edits);
                    entry_line(ui, "금액", &report.amount, section, index, "amount", edits);
                    ui.end_row();
                }
            });
            ui.separator();
            let account = &bulletin.finance.account;
            ui.horizontal(|ui| {
                hinted_line(ui, "은행", &account.bank, account_path("bank"), edits);
                hinted_line(ui, "계좌번호", &account.number, account_path("number"), edits);
                hinted_line(ui, "예금주", &account.holder, account_path("holder"), edits);
            });
        });
    }

    fn missionaries(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        let section = ListSection::Missionaries;
        let missionaries = &bulletin.missionaries;
        group(ui, "선교사 중보", |ui| {
            egui::Grid::new("missionary_title_grid").num_columns(2).show(ui, |ui| {
                labeled_line(
                    ui,
                    "제목",
                    &missionaries.title,
                    FieldPath::new(Section::Missionaries, "title"),
                    edits,
                );
                labeled_line(
                    ui,
                    "기도 제목",
                    &missionaries.quote,
                    FieldPath::new(Section::Missionaries, "quote"),
                    edits,
                );
            });
            egui::Grid::new("missionary_grid").num_columns(2).show(ui, |ui| {
                for (index, item) in missionaries.items.iter().enumerate() {
                    entry_line(ui, "국가", &item.country, section, index, "country", edits);
                    entry_line(ui, "이름", &item.names, section, index, "names", edits);
                    ui.end_row();
                }
            });
        });
    }

    fn schedule(ui: &mut egui::Ui, bulletin: &Bulletin, edits: &mut Vec<Edit>) {
        let section = ListSection::Schedule;
        let schedule = &bulletin.schedule;
        group(ui, "설교 및 기도 순서", |ui| {
            egui::Grid::new("schedule_title_grid").num_columns(2).show(ui, |ui| {
                labeled_line(
                    ui,
                    "제목",
                    &schedule.title,
                    FieldPath::new(Section::Schedule, "title"),
                    edits,
                );
            });
            egui::Grid::new("schedule_grid").num_columns(3).show(ui, |ui| {
                for (index, entry) in schedule.weekly.iter().enumerate() {
                    entry_line(ui, "날짜", &entry.date, section, index, "date", edits);
                    entry_line(ui, "기도", &entry.prayer, section, index, "prayer", edits);
                    entry_line(ui, "말씀", &entry.sermon, section, index, "sermon", edits);
                    ui.end_row();
                }
            });
            ui.label("기도 순서 명단");
            multiline(ui, &schedule.prayer_list, FieldPath::new(Section::Schedule, "prayerList"), edits);
            ui.label("설교 순서 명단");
            multiline(ui, &schedule.sermon_list, FieldPath::new(Section::Schedule, "sermonList"), edits);
        });
    }
}

fn account_path(field: &str) -> FieldPath {
    FieldPath::nested(Section::Finance, "account", field)
}

fn optional(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Framed group with a title underline, like a form fieldset
fn group(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().size(20.0));
            ui.separator();
            add_contents(ui);
        });
    ui.add_space(16.0);
}

/// Label and single-line input in one grid row
fn labeled_line(ui: &mut egui::Ui, label: &str, current: &str, path: FieldPath, edits: &mut Vec<Edit>) {
    ui.label(label);
    let mut value = current.to_string();
    let response = ui.add(egui::TextEdit::singleline(&mut value).desired_width(f32::INFINITY));
    if response.changed() {
        edits.push(Edit::scalar(path, value));
    }
    ui.end_row();
}

fn hinted_line(ui: &mut egui::Ui, hint: &str, current: &str, path: FieldPath, edits: &mut Vec<Edit>) {
    let mut value = current.to_string();
    if ui.add(egui::TextEdit::singleline(&mut value).hint_text(hint)).changed() {
        edits.push(Edit::scalar(path, value));
    }
}

fn multiline(ui: &mut egui::Ui, current: &str, path: FieldPath, edits: &mut Vec<Edit>) {
    let mut value = current.to_string();
    let response = ui.add(
        egui::TextEdit::multiline(&mut value)
            .desired_width(f32::INFINITY)
            .desired_rows(6),
    );
    if response.changed() {
        edits.push(Edit::scalar(path, value));
    }
}

/// Input bound to one attribute of a list entry
fn entry_line(
    ui: &mut egui::Ui,
    hint: &str,
    current: &str,
    section: ListSection,
    index: usize,
    field: &str,
    edits: &mut Vec<Edit>,
) {
    let mut value = current.to_string();
    if ui.add(egui::TextEdit::singleline(&mut value).hint_text(hint)).changed() {
        edits.push(Edit::list(section, index, field, value));
    }
}
