use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlideStatus {
    #[default]
    Active,
    Inactive,
}

impl SlideStatus {
    pub fn toggled(self) -> Self {
        match self {
            SlideStatus::Active => SlideStatus::Inactive,
            SlideStatus::Inactive => SlideStatus::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlideStatus::Active => "active",
            SlideStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for SlideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlideStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(SlideStatus::Active),
            "inactive" => Ok(SlideStatus::Inactive),
            other => Err(format!("unknown slide status '{other}' (expected active or inactive)")),
        }
    }
}

/// One hero slide as persisted in the slide collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    pub order: u32,
    #[serde(default)]
    pub status: SlideStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slide {
    pub fn is_active(&self) -> bool {
        self.status == SlideStatus::Active
    }
}

/// Fields supplied when creating a slide. Id, order and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub play_link: Option<String>,
    #[serde(default)]
    pub info_link: Option<String>,
    #[serde(default)]
    pub status: Option<SlideStatus>,
}

/// Partial edit merged over an existing slide. `None` leaves a field as is;
/// an empty string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub play_link: Option<String>,
    #[serde(default)]
    pub info_link: Option<String>,
    #[serde(default)]
    pub status: Option<SlideStatus>,
}

impl SlidePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.video.is_none()
            && self.play_link.is_none()
            && self.info_link.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}
