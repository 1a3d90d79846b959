use crate::application::table::TableRecord;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Text note owned by a user
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Deserialize, Serialize)]
pub struct Note {
    /// Record id
    pub id: String,
    /// Owning user id
    pub owner_id: String,
    /// Title
    pub title: String,
    /// Body text
    #[serde(default)]
    pub content: String,
    /// Whether other users may read the note
    #[serde(default)]
    pub is_public: bool,
    /// URL slug
    #[serde(default)]
    pub slug: String,
    /// Comma separated tags
    #[serde(default)]
    pub tags: Option<String>,
    /// Cover file reference
    #[serde(default)]
    pub cover: Option<String>,
    /// View counter
    #[serde(default)]
    pub views: u64,
    /// Whether the note is archived
    #[serde(default)]
    pub archived: bool,
    /// Soft-deletion timestamp
    #[serde(default)]
    pub deleted_at: Option<String>,
    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created: String,
    /// Last update timestamp as sent by the server
    #[serde(default)]
    pub updated: String,
}

/// Values of a note to create; the owner is filled in by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewNote {
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// URL slug
    pub slug: String,
    /// Visibility, private unless set
    #[serde(default)]
    pub is_public: bool,
    /// Comma separated tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl NewNote {
    /// Private note with the given title, body and slug
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a note, unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NoteUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New visibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// New tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Archive flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl TableRecord for Note {
    const TABLE: &'static str = "notes";
    const LABEL: &'static str = "note";
    type Draft = NewNote;
    type Patch = NoteUpdate;
}
