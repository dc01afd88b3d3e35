//! Bulletin document model
//!
//! The whole weekly bulletin is one value tree. Every list keeps insertion
//! order, which is the literal order printed in the bulletin.

use serde::{Deserialize, Serialize};

/// The complete bulletin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bulletin {
    /// Cover metadata
    pub main: Header,
    /// Church introduction
    pub about: Introduction,
    /// Worship service agenda, in service order
    pub worship_order: Vec<AgendaEntry>,
    pub hymn: Hymn,
    pub news: NewsSection,
    pub finance: FinanceSection,
    pub missionaries: MissionarySection,
    pub schedule: ScheduleSection,
}

/// Cover metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub issue: String,
    pub date: String,
    pub time: String,
}

/// Free-text introduction; line breaks in `body` are significant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introduction {
    pub title: String,
    pub body: String,
}

/// One line of the service order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subitem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subperson: Option<String>,
}

/// Closing hymn with an optional embedded sheet-music image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hymn {
    pub title: String,
    /// Self-contained `data:` text, `None` when no sheet was attached
    pub music_sheet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSection {
    pub title: String,
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: String,
    pub event: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSection {
    pub reports: Vec<FinanceReport>,
    pub account: BankAccount,
}

/// One finance line. `amount` is display text and is never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceReport {
    pub item: String,
    pub amount: String,
}

impl FinanceReport {
    /// Whether the amount is shown as a deficit
    pub fn is_negative(&self) -> bool {
        self.amount.trim_start().starts_with('-')
    }
}

/// Offering account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank: String,
    pub number: String,
    pub holder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionarySection {
    pub title: String,
    pub quote: String,
    pub items: Vec<MissionaryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionaryItem {
    pub country: String,
    pub names: String,
}

/// Preaching and prayer rotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSection {
    pub title: String,
    pub weekly: Vec<WeeklyEntry>,
    /// Newline-delimited roster, first line carries the count
    pub prayer_list: String,
    pub sermon_list: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub date: String,
    pub prayer: String,
    pub sermon: String,
}

/// Where a section keeps its editable list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLocation {
    /// The section value is the list itself
    Direct,
    /// Nested under `items`
    Items,
    /// Nested under `reports`
    Reports,
    /// Nested under `weekly`
    Weekly,
}

/// Sections that carry exactly one editable list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    WorshipOrder,
    News,
    Finance,
    Missionaries,
    Schedule,
}

impl ListSection {
    #[allow(dead_code)]
    pub const ALL: [ListSection; 5] = [
        ListSection::WorshipOrder,
        ListSection::News,
        ListSection::Finance,
        ListSection::Missionaries,
        ListSection::Schedule,
    ];

    /// Wire name of the section
    pub fn name(self) -> &'static str {
        match self {
            ListSection::WorshipOrder => "worshipOrder",
            ListSection::News => "news",
            ListSection::Finance => "finance",
            ListSection::Missionaries => "missionaries",
            ListSection::Schedule => "schedule",
        }
    }

    /// Nesting convention of the section's list
    pub fn location(self) -> ListLocation {
        match self {
            ListSection::WorshipOrder => ListLocation::Direct,
            ListSection::News | ListSection::Missionaries => ListLocation::Items,
            ListSection::Finance => ListLocation::Reports,
            ListSection::Schedule => ListLocation::Weekly,
        }
    }

    /// Attribute names of this section's entries
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            ListSection::WorshipOrder => &["item", "subitem", "person", "subperson"],
            ListSection::News => &["date", "event"],
            ListSection::Finance => &["item", "amount"],
            ListSection::Missionaries => &["country", "names"],
            ListSection::Schedule => &["date", "prayer", "sermon"],
        }
    }
}

impl std::fmt::Display for ListSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutable view of one section's list, resolved through [`ListSection::location`]
pub enum EntryListMut<'a> {
    Agenda(&'a mut Vec<AgendaEntry>),
    News(&'a mut Vec<NewsItem>),
    Finance(&'a mut Vec<FinanceReport>),
    Missionaries(&'a mut Vec<MissionaryItem>),
    Schedule(&'a mut Vec<WeeklyEntry>),
}

impl Bulletin {
    /// Number of entries in a section's list
    #[allow(dead_code)]
    pub fn list_len(&self, section: ListSection) -> usize {
        match section {
            ListSection::WorshipOrder => self.worship_order.len(),
            ListSection::News => self.news.items.len(),
            ListSection::Finance => self.finance.reports.len(),
            ListSection::Missionaries => self.missionaries.items.len(),
            ListSection::Schedule => self.schedule.weekly.len(),
        }
    }

    /// Borrow the editable list of a section, at the depth given by its
    /// [`ListLocation`]
    pub fn list_mut(&mut self, section: ListSection) -> EntryListMut<'_> {
        match section {
            ListSection::WorshipOrder => EntryListMut::Agenda(&mut self.worship_order),
            ListSection::News => EntryListMut::News(&mut self.news.items),
            ListSection::Finance => EntryListMut::Finance(&mut self.finance.reports),
            ListSection::Missionaries => EntryListMut::Missionaries(&mut self.missionaries.items),
            ListSection::Schedule => EntryListMut::Schedule(&mut self.schedule.weekly),
        }
    }
}

fn agenda(item: &str, subitem: Option<&str>, person: Option<&str>, subperson: Option<&str>) -> AgendaEntry {
    AgendaEntry {
        item: item.to_string(),
        subitem: subitem.map(str::to_string),
        person: person.map(str::to_string),
        subperson: subperson.map(str::to_string),
    }
}

fn news(date: &str, event: &str) -> NewsItem {
    NewsItem {
        date: date.to_string(),
        event: event.to_string(),
    }
}

fn report(item: &str, amount: &str) -> FinanceReport {
    FinanceReport {
        item: item.to_string(),
        amount: amount.to_string(),
    }
}

fn missionary(country: &str, names: &str) -> MissionaryItem {
    MissionaryItem {
        country: country.to_string(),
        names: names.to_string(),
    }
}

fn weekly(date: &str, prayer: &str, sermon: &str) -> WeeklyEntry {
    WeeklyEntry {
        date: date.to_string(),
        prayer: prayer.to_string(),
        sermon: sermon.to_string(),
    }
}

impl Default for Bulletin {
    /// The built-in bulletin shown when no link is opened
    fn default() -> Self {
        Self {
            main: Header {
                issue: "제26-46호".to_string(),
                date: "2025.11.16".to_string(),
                time: "10:00AM".to_string(),
            },
            about: Introduction {
                title: "라온은".to_string(),
                body: "'즐거운'이라는 뜻을 가진 순 우리말 입니다.\n\
                       곧 “함께 즐거운 삶을 지향하는 교회공동체”를 의미하는 것입니다.\n\
                       \n\
                       이것은,\n\
                       첫째, 하나님과 동행하며 즐거움을 누리는 교회\n\
                       둘째, 성도가 동행하며 즐거움을 누리는 교회\n\
                       셋째, 세상에서 소금과 빛의 역할을 세상과 동행하며 즐거움을 누리는 교회라는 의미를 담고 있으며,\n\
                       \n\
                       우리교회의 가장 기본적인 바탕이 되는 신조이자, 마지막까지 지켜내야 할 사명입니다."
                    .to_string(),
            },
            worship_order: vec![
                agenda("주기도문", None, None, None),
                agenda("경배와 찬양", Some("참회와 중보기도"), Some("이동현"), None),
                agenda("예배를 위한 기도", None, Some("박영애"), None),
                agenda("성경동화 이야기", None, Some("이주예, 오승하"), None),
                agenda(
                    "다음세대말씀",
                    Some("데살로니가전서 5장 16-18"),
                    Some("박영애"),
                    Some("감사의 조건?!"),
                ),
                agenda(
                    "말씀선포",
                    Some("로마서 13장 1-7절"),
                    Some("이광복"),
                    Some("권세와 사랑 사이에서"),
                ),
                agenda("신앙고백", None, None, None),
                agenda("결단찬송", Some("우린 어둠이었으나"), None, None),
                agenda("헌금기도 및 축도", None, Some("이광복 목사"), None),
                agenda("성도의 교제", None, None, None),
            ],
            hymn: Hymn {
                title: "우린 어둠이었으나".to_string(),
                music_sheet: None,
            },
            news: NewsSection {
                title: "*기도회 요일 : 금 7시".to_string(),
                items: vec![
                    news("11월 11일(화)", "부천방회 소사 감찰모임"),
                    news("11월 30일(주일)", "추수감사주일"),
                    news("12월 8일(월)", "부천방회 교역자회"),
                    news("12월 25일(목)", "성탄절"),
                    news("12월 31일(수)", "송구영신예배"),
                    news("1월 4일(주일)", "사무총회"),
                    news("3시 30분", "부천방회 신년연합성회"),
                ],
            },
            finance: FinanceSection {
                reports: vec![
                    report("씨앗헌금잔액", "4,201,023"),
                    report("선교와 섬김", "15,399,400"),
                    report("라온트리 지원금", "13,200,000"),
                    report("일반재정 수입", "8,466,851"),
                    report("일반재정 지출", "9,136,088"),
                    report("일반재정 잔액", "-669,237"),
                ],
                account: BankAccount {
                    bank: "국민은행".to_string(),
                    number: "238501-04-288321".to_string(),
                    holder: "기독교대한성결교회라온동행교회".to_string(),
                },
            },
            missionaries: MissionarySection {
                title: "선교사를 위한 중보".to_string(),
                quote: "“가정사역을 위해”".to_string(),
                items: vec![
                    missionary("미얀마", "김병훈, 이정아"),
                    missionary("헝가리", "한이삭, 변찬은"),
                    missionary("동티모르", "손현성, 이경호"),
                    missionary("몽 골", "이정형, 김소연"),
                    missionary("중 국", "오소원, 유수연"),
                    missionary("방글라데시", "전민수, 이은영"),
                    missionary("라오스", "김종한, 김윤숙"),
                ],
            },
            schedule: ScheduleSection {
                title: "설교 및 기도 순서".to_string(),
                weekly: vec![
                    weekly("11월 16일", "박영애", "박영애"),
                    weekly("11월 23일", "윤혜영", "안현진"),
                    weekly("11월 30일", "지하연", "안지선"),
                    weekly("12월 7일", "김준호", "이광진"),
                ],
                prayer_list: "기도순서 : 17명(나이순)\n\
                              홍윤희, 박상민, 정미경, 오상석, 강윤정, 최동호, 이동현, 임성호, 이광진, 안지선, 안현진, 박영애, 윤혜영, 지하연, 김준호, 박정탁, 오승현"
                    .to_string(),
                sermon_list: "설교순서 : 12명(나이역순)\n\
                              박정탁, 김준호, 지하연, 윤혜영, 박영애, 안현진, 안지선, 이광진, 최동호, 강윤정, 오상석, 정미경"
                    .to_string(),
            },
        }
    }
}
