//! Edits applied to a bulletin
//!
//! Every user input becomes an [`Edit`]. Applying it never touches the
//! input bulletin; a changed copy is returned instead, so callers can swap
//! the whole value and compare old against new.

use std::fmt;
use std::str::FromStr;

use super::bulletin::{
    AgendaEntry, Bulletin, EntryListMut, FinanceReport, ListSection, MissionaryItem, NewsItem,
    WeeklyEntry,
};
use super::error::EditError;

/// Top-level sections of the bulletin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Main,
    About,
    WorshipOrder,
    Hymn,
    News,
    Finance,
    Missionaries,
    Schedule,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Main => "main",
            Section::About => "about",
            Section::WorshipOrder => "worshipOrder",
            Section::Hymn => "hymn",
            Section::News => "news",
            Section::Finance => "finance",
            Section::Missionaries => "missionaries",
            Section::Schedule => "schedule",
        }
    }
}

impl FromStr for Section {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "main" => Section::Main,
            "about" => Section::About,
            "worshipOrder" => Section::WorshipOrder,
            "hymn" => Section::Hymn,
            "news" => Section::News,
            "finance" => Section::Finance,
            "missionaries" => Section::Missionaries,
            "schedule" => Section::Schedule,
            other => return Err(EditError::InvalidPath(other.to_string())),
        })
    }
}

/// Address of a text leaf one or two levels below a section
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub section: Section,
    pub field: String,
    pub subfield: Option<String>,
}

impl FieldPath {
    pub fn new(section: Section, field: impl Into<String>) -> Self {
        Self {
            section,
            field: field.into(),
            subfield: None,
        }
    }

    pub fn nested(section: Section, field: impl Into<String>, subfield: impl Into<String>) -> Self {
        Self {
            section,
            field: field.into(),
            subfield: Some(subfield.into()),
        }
    }

    /// Borrow the addressed leaf
    fn resolve<'a>(&self, bulletin: &'a mut Bulletin) -> Result<&'a mut String, EditError> {
        let leaf = match (self.section, self.field.as_str(), self.subfield.as_deref()) {
            (Section::Main, "issue", None) => &mut bulletin.main.issue,
            (Section::Main, "date", None) => &mut bulletin.main.date,
            (Section::Main, "time", None) => &mut bulletin.main.time,
            (Section::About, "title", None) => &mut bulletin.about.title,
            (Section::About, "body", None) => &mut bulletin.about.body,
            (Section::Hymn, "title", None) => &mut bulletin.hymn.title,
            (Section::News, "title", None) => &mut bulletin.news.title,
            (Section::Finance, "account", Some("bank")) => &mut bulletin.finance.account.bank,
            (Section::Finance, "account", Some("number")) => &mut bulletin.finance.account.number,
            (Section::Finance, "account", Some("holder")) => &mut bulletin.finance.account.holder,
            (Section::Missionaries, "title", None) => &mut bulletin.missionaries.title,
            (Section::Missionaries, "quote", None) => &mut bulletin.missionaries.quote,
            (Section::Schedule, "title", None) => &mut bulletin.schedule.title,
            (Section::Schedule, "prayerList", None) => &mut bulletin.schedule.prayer_list,
            (Section::Schedule, "sermonList", None) => &mut bulletin.schedule.sermon_list,
            _ => return Err(EditError::InvalidPath(self.to_string())),
        };
        Ok(leaf)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section.name(), self.field)?;
        if let Some(ref subfield) = self.subfield {
            write!(f, ".{}", subfield)?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = EditError;

    /// Parse the dotted `section.field[.subfield]` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EditError::InvalidPath(s.to_string());
        let mut parts = s.split('.');
        let section: Section = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let field = parts.next().filter(|f| !f.is_empty()).ok_or_else(invalid)?;
        let subfield = parts.next();
        if parts.next().is_some() || subfield == Some("") {
            return Err(invalid());
        }
        Ok(Self {
            section,
            field: field.to_string(),
            subfield: subfield.map(str::to_string),
        })
    }
}

/// A list entry whose text attributes can be addressed by name
trait Entry {
    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

impl Entry for AgendaEntry {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "item" => Some(&mut self.item),
            "subitem" => Some(self.subitem.get_or_insert_with(String::new)),
            "person" => Some(self.person.get_or_insert_with(String::new)),
            "subperson" => Some(self.subperson.get_or_insert_with(String::new)),
            _ => None,
        }
    }
}

impl Entry for NewsItem {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "date" => Some(&mut self.date),
            "event" => Some(&mut self.event),
            _ => None,
        }
    }
}

impl Entry for FinanceReport {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "item" => Some(&mut self.item),
            "amount" => Some(&mut self.amount),
            _ => None,
        }
    }
}

impl Entry for MissionaryItem {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "country" => Some(&mut self.country),
            "names" => Some(&mut self.names),
            _ => None,
        }
    }
}

impl Entry for WeeklyEntry {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "date" => Some(&mut self.date),
            "prayer" => Some(&mut self.prayer),
            "sermon" => Some(&mut self.sermon),
            _ => None,
        }
    }
}

fn set_entry<E: Entry>(
    entries: &mut [E],
    section: ListSection,
    index: usize,
    field: &str,
    value: &str,
) -> Result<(), EditError> {
    let len = entries.len();
    let entry = entries.get_mut(index).ok_or(EditError::IndexOutOfRange {
        section: section.name(),
        index,
        len,
    })?;
    let slot = entry.field_mut(field).ok_or_else(|| EditError::UnknownField {
        section: section.name(),
        field: field.to_string(),
        expected: section.fields(),
    })?;
    *slot = value.to_string();
    tracing::debug!("Set {}[{}].{} ({:?} list)", section, index, field, section.location());
    Ok(())
}

/// A single change to the bulletin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace a section-level text field
    Scalar { path: FieldPath, value: String },
    /// Replace one attribute of an existing list entry
    List {
        section: ListSection,
        index: usize,
        field: String,
        value: String,
    },
    /// Set or clear the embedded hymn sheet
    SheetMusic(Option<String>),
}

impl Edit {
    pub fn scalar(path: FieldPath, value: impl Into<String>) -> Self {
        Edit::Scalar {
            path,
            value: value.into(),
        }
    }

    pub fn list(section: ListSection, index: usize, field: impl Into<String>, value: impl Into<String>) -> Self {
        Edit::List {
            section,
            index,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Return a copy of `bulletin` with this edit applied
    pub fn apply(&self, bulletin: &Bulletin) -> Result<Bulletin, EditError> {
        let mut next = bulletin.clone();
        self.apply_in_place(&mut next)?;
        Ok(next)
    }

    fn apply_in_place(&self, bulletin: &mut Bulletin) -> Result<(), EditError> {
        match self {
            Edit::Scalar { path, value } => {
                *path.resolve(bulletin)? = value.clone();
            }
            Edit::List {
                section,
                index,
                field,
                value,
            } => {
                let section = *section;
                match bulletin.list_mut(section) {
                    EntryListMut::Agenda(entries) => set_entry(entries, section, *index, field, value)?,
                    EntryListMut::News(entries) => set_entry(entries, section, *index, field, value)?,
                    EntryListMut::Finance(entries) => set_entry(entries, section, *index, field, value)?,
                    EntryListMut::Missionaries(entries) => {
                        set_entry(entries, section, *index, field, value)?
                    }
                    EntryListMut::Schedule(entries) => set_entry(entries, section, *index, field, value)?,
                }
            }
            Edit::SheetMusic(sheet) => {
                bulletin.hymn.music_sheet = sheet.clone();
            }
        }
        Ok(())
    }
}

/// Replace the text leaf at `path`
#[allow(dead_code)]
pub fn set_scalar_field(bulletin: &Bulletin, path: &FieldPath, value: &str) -> Result<Bulletin, EditError> {
    Edit::scalar(path.clone(), value).apply(bulletin)
}

/// Replace `field` of entry `index` in the list of `section`
#[allow(dead_code)]
pub fn set_list_field(
    bulletin: &Bulletin,
    section: ListSection,
    index: usize,
    field: &str,
    value: &str,
) -> Result<Bulletin, EditError> {
    Edit::list(section, index, field, value).apply(bulletin)
}
