use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{DiaryEntry, DiaryFields};

/// Asia/Colombo, UTC+05:30 all year.
const TARGET_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Server-assigned identity of a persisted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiaryId(pub i64);

impl fmt::Display for DiaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&DiaryEntry> for DiaryId {
    fn from(entry: &DiaryEntry) -> Self {
        DiaryId(entry.id)
    }
}

/// Calendar date in Asia/Colombo at the given instant.
pub fn date_in_target_zone(now: DateTime<Utc>) -> NaiveDate {
    match FixedOffset::east_opt(TARGET_UTC_OFFSET_SECS) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.date_naive(),
    }
}

pub fn today_in_target_zone() -> NaiveDate {
    date_in_target_zone(Utc::now())
}

/// One user edit to a draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Title(String),
    Content(String),
    Date(NaiveDate),
}

/// In-memory copy of the entry being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    id: Option<DiaryId>,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

impl Draft {
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            date,
        }
    }

    pub fn from_entry(entry: &DiaryEntry) -> Self {
        Self {
            id: Some(DiaryId::from(entry)),
            title: entry.title.clone(),
            content: entry.content.clone(),
            date: entry.date,
        }
    }

    pub fn id(&self) -> Option<DiaryId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Title with surrounding whitespace removed is non-empty.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn fields(&self) -> DiaryFields {
        DiaryFields {
            title: self.title.clone(),
            content: self.content.clone(),
            date: self.date,
        }
    }

    /// Applies the edit; returns `false` when the field already held that value.
    pub fn apply(&mut self, edit: Edit) -> bool {
        match edit {
            Edit::Title(title) if title != self.title => self.title = title,
            Edit::Content(content) if content != self.content => self.content = content,
            Edit::Date(date) if date != self.date => self.date = date,
            _ => return false,
        }
        true
    }

    /// Binds the server identity. Only the first binding takes effect.
    pub(crate) fn bind_identity(&mut self, id: DiaryId) -> bool {
        match self.id {
            None => {
                self.id = Some(id);
                true
            }
            Some(existing) => {
                if existing != id {
                    tracing::warn!(%existing, rejected = %id, "Draft already bound to another entry");
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_target_zone_date_rolls_over_before_utc() {
        // 19:00 UTC on 30 April is 00:30 on 1 May in Colombo
        let late_utc = Utc.with_ymd_and_hms(2024, 4, 30, 19, 0, 0).unwrap();
        assert_eq!(date_in_target_zone(late_utc), may_first());

        let early_utc = Utc.with_ymd_and_hms(2024, 4, 30, 18, 29, 0).unwrap();
        assert_eq!(date_in_target_zone(early_utc), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_blank_draft_is_unidentified() {
        let draft = Draft::blank(may_first());
        assert!(!draft.is_persisted());
        assert!(!draft.has_title());
    }

    #[test]
    fn test_whitespace_title_does_not_count() {
        let mut draft = Draft::blank(may_first());
        draft.apply(Edit::Title(" \t\n ".to_string()));
        assert!(!draft.has_title());

        draft.apply(Edit::Title(" Trip ".to_string()));
        assert!(draft.has_title());
    }

    #[test]
    fn test_apply_reports_unchanged_values() {
        let mut draft = Draft::blank(may_first());

        assert!(draft.apply(Edit::Content("<p>Day one</p>".to_string())));
        assert!(!draft.apply(Edit::Content("<p>Day one</p>".to_string())));
        assert!(!draft.apply(Edit::Date(may_first())));
        assert!(!draft.apply(Edit::Title(String::new())));
    }

    #[test]
    fn test_identity_binds_once() {
        let mut draft = Draft::blank(may_first());

        assert!(draft.bind_identity(DiaryId(7)));
        assert!(!draft.bind_identity(DiaryId(8)));
        assert_eq!(draft.id(), Some(DiaryId(7)));
    }
}
