//! Content documents: portfolio projects and the studio singletons.
//!
//! These are the shapes stored in the `projects` and `general` collections
//! and mirrored into the local snapshot store. Wire names are camelCase to
//! match documents written by earlier admin sessions.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::localized::Localized;
use crate::review::Review;
use crate::types::Timestamp;

/// Sentinel id for a project that has not been stored yet. Saving a
/// project with this id (or an empty one) creates a new document.
pub const NEW_PROJECT_ID: &str = "new";

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// One portfolio entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique within the `projects` collection.
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub title: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub category: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub description: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub scope: Localized,

    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub role: String,

    /// Tool names. Older documents store one comma-separated string.
    #[serde(default, deserialize_with = "tools_list_or_string")]
    pub tools: Vec<String>,

    /// Cover image reference shown in the gallery grid.
    #[serde(default)]
    pub cover_image: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blueprints: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Story::is_empty")]
    pub story: Story,

    /// Reviews embedded in the document itself (used by the compiled-in
    /// seed projects); visitor-submitted reviews live in the `comments`
    /// collection instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Project {
    /// Whether saving this project should create a new document rather
    /// than overwrite an existing one.
    pub fn is_new(&self) -> bool {
        self.id.is_empty() || self.id == NEW_PROJECT_ID
    }
}

/// Validate a project before it is written: it must carry a title in at
/// least one language.
pub fn validate_project(project: &Project) -> Result<(), crate::error::CoreError> {
    if project.title.is_empty() {
        return Err(crate::error::CoreError::Validation(
            "Project title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Accept `tools` as either a list of names or a legacy comma-separated
/// string.
fn tools_list_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ToolsRepr {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match ToolsRepr::deserialize(deserializer)? {
        ToolsRepr::List(tools) => tools,
        ToolsRepr::Joined(joined) => joined
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Story
// ---------------------------------------------------------------------------

/// The narrative attached to a project. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub challenge: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub concept: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub solution: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub decision: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub reflection: Localized,
}

impl Story {
    pub fn is_empty(&self) -> bool {
        self.challenge.is_empty()
            && self.concept.is_empty()
            && self.solution.is_empty()
            && self.decision.is_empty()
            && self.reflection.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Studio singletons
// ---------------------------------------------------------------------------

/// The `general/about` singleton: who the studio is and how its pages are
/// typeset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub name: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub bio: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub philosophy: Localized,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub statement: Localized,

    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub resume_url: String,

    /// Body text size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Display size of the architect's name on the hero section.
    #[serde(default = "default_name_font_size")]
    pub name_font_size: u32,
}

fn default_font_size() -> u32 {
    16
}

fn default_name_font_size() -> u32 {
    80
}

/// The `general/contact` singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default, skip_serializing_if = "Localized::is_empty")]
    pub address: Localized,
}

/// The `general/theme` singleton: the three font families the site is set
/// in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default = "default_serif")]
    pub serif: String,
    #[serde(default = "default_sans")]
    pub sans: String,
    #[serde(default = "default_arabic")]
    pub arabic: String,
}

fn default_serif() -> String {
    "Bodoni Moda".to_string()
}

fn default_sans() -> String {
    "Plus Jakarta Sans".to_string()
}

fn default_arabic() -> String {
    "Noto Kufi Arabic".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            serif: default_serif(),
            sans: default_sans(),
            arabic: default_arabic(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Language;

    #[test]
    fn project_with_generated_id_is_not_new() {
        let project = Project {
            id: "a1b2".to_string(),
            ..Project::default()
        };
        assert!(!project.is_new());
    }

    #[test]
    fn empty_or_sentinel_id_is_new() {
        assert!(Project::default().is_new());
        let project = Project {
            id: NEW_PROJECT_ID.to_string(),
            ..Project::default()
        };
        assert!(project.is_new());
    }

    #[test]
    fn untitled_project_rejects() {
        assert!(validate_project(&Project::default()).is_err());
        let titled = Project {
            title: Localized::english("Villa X"),
            ..Project::default()
        };
        assert!(validate_project(&titled).is_ok());
    }

    #[test]
    fn tools_accepts_comma_separated_string() {
        let project: Project =
            serde_json::from_str(r#"{"id":"p9","tools":"AutoCAD, Revit , Lumion"}"#).unwrap();
        assert_eq!(project.tools, vec!["AutoCAD", "Revit", "Lumion"]);
    }

    #[test]
    fn tools_accepts_list() {
        let project: Project = serde_json::from_str(r#"{"id":"p9","tools":["Rhino"]}"#).unwrap();
        assert_eq!(project.tools, vec!["Rhino"]);
    }

    #[test]
    fn project_document_without_turkish_title_resolves_to_english() {
        let project: Project =
            serde_json::from_str(r#"{"id":"p1","title":{"en":"Villa X"}}"#).unwrap();
        assert_eq!(project.title.resolve(Language::Tr), "Villa X");
    }

    #[test]
    fn legacy_document_with_bare_title_still_resolves() {
        let project: Project =
            serde_json::from_str(r#"{"id":"p1","title":"Luxury Villa"}"#).unwrap();
        assert_eq!(project.title.resolve(Language::Tr), "Luxury Villa");
    }

    #[test]
    fn about_defaults_apply_to_missing_fields() {
        let about: AboutInfo = serde_json::from_str(r#"{"profileImage":"x.jpg"}"#).unwrap();
        assert_eq!(about.font_size, 16);
        assert_eq!(about.name_font_size, 80);
        assert_eq!(about.profile_image, "x.jpg");
    }

    #[test]
    fn theme_defaults_fill_missing_fields() {
        let theme: ThemeConfig = serde_json::from_str(r#"{"serif":"Playfair Display"}"#).unwrap();
        assert_eq!(theme.serif, "Playfair Display");
        assert_eq!(theme.sans, "Plus Jakarta Sans");
        assert_eq!(theme.arabic, "Noto Kufi Arabic");
    }

    #[test]
    fn empty_story_is_skipped_when_serializing() {
        let project = Project {
            id: "p1".to_string(),
            ..Project::default()
        };
        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("story").is_none());
    }
}
