//! Owned holder of the bulletin being edited

use super::bulletin::Bulletin;
use super::edit::Edit;
use super::error::EditError;

/// Single-writer cell for the current bulletin.
///
/// The bulletin is only ever swapped as a whole; `revision` goes up each
/// time the value actually changes.
#[derive(Debug, Clone, Default)]
pub struct BulletinState {
    bulletin: Bulletin,
    revision: u64,
}

impl BulletinState {
    pub fn new(bulletin: Bulletin) -> Self {
        Self {
            bulletin,
            revision: 0,
        }
    }

    /// Current bulletin
    pub fn document(&self) -> &Bulletin {
        &self.bulletin
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply an edit; the bulletin is kept as is when the edit fails
    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditError> {
        let next = edit.apply(&self.bulletin)?;
        self.swap(next);
        Ok(())
    }

    /// Apply a batch of edits in order, skipping the ones that fail
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = Edit>) {
        for edit in edits {
            if let Err(e) = self.apply(&edit) {
                tracing::warn!("Dropped edit {:?}: {}", edit, e);
            }
        }
    }

    /// Replace the whole bulletin, e.g. with one decoded from a link
    pub fn replace(&mut self, bulletin: Bulletin) {
        self.swap(bulletin);
    }

    fn swap(&mut self, next: Bulletin) {
        if next != self.bulletin {
            self.bulletin = next;
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bulletin::ListSection;
    use crate::core::edit::{FieldPath, Section};

    #[test]
    fn test_apply_bumps_revision() {
        let mut state = BulletinState::default();
        state
            .apply(&Edit::scalar(FieldPath::new(Section::Main, "time"), "11:00AM"))
            .unwrap();
        assert_eq!(state.document().main.time, "11:00AM");
        assert_eq!(state.revision(), 1);

        // Same value again is not a change
        state
            .apply(&Edit::scalar(FieldPath::new(Section::Main, "time"), "11:00AM"))
            .unwrap();
        assert_eq!(state.revision(), 1);
    }

    #[test]
    fn test_failed_edit_leaves_document() {
        let mut state = BulletinState::default();
        let err = state.apply(&Edit::list(ListSection::News, 99, "event", "x"));
        assert!(err.is_err());
        assert_eq!(state.document(), &Bulletin::default());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_apply_all_skips_failures() {
        let mut state = BulletinState::default();
        state.apply_all([
            Edit::list(ListSection::Schedule, 0, "prayer", "홍윤희"),
            Edit::list(ListSection::Schedule, 40, "prayer", "x"),
            Edit::scalar(FieldPath::new(Section::Hymn, "title"), "주 하나님 지으신 모든 세계"),
        ]);
        assert_eq!(state.document().schedule.weekly[0].prayer, "홍윤희");
        assert_eq!(state.document().hymn.title, "주 하나님 지으신 모든 세계");
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut state = BulletinState::default();
        let mut other = Bulletin::default();
        other.news.items.truncate(2);
        other.main.issue = "제26-47호".to_string();
        state.replace(other.clone());
        assert_eq!(state.document(), &other);
        assert_eq!(state.document().news.items.len(), 2);
    }
}
