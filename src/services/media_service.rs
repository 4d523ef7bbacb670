//! Background media selection for slides.
//!
//! Both the live preview and the exported widget decide a slide's backdrop
//! through [`Background::for_slide`], so the two can never disagree.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::Slide;

/// Length of a YouTube video id.
pub const YOUTUBE_ID_LEN: usize = 11;

// Matches youtu.be/ID, /v/ID, /u/<c>/ID, /embed/ID and watch?v=ID. The id is
// capture group 7.
const YOUTUBE_URL_PATTERN: &str =
    r"^.*((youtu.be/)|(v/)|(/u/[0-9A-Za-z_]/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*";

static YOUTUBE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(YOUTUBE_URL_PATTERN).expect("YouTube pattern should compile"));

/// Extracts the 11-character video id from a YouTube link.
///
/// Returns `None` for anything else, including direct video file URLs.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    let id = YOUTUBE_URL.captures(url)?.get(7)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then_some(id)
}

pub fn is_youtube(url: &str) -> bool {
    extract_youtube_id(url).is_some()
}

/// Muted, looping, chrome-less embed URL for a background player.
pub fn youtube_embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{id}?autoplay=1&mute=1&loop=1&playlist={id}&controls=0&modestbranding=1&rel=0&iv_load_policy=3",
        id = video_id
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Background {
    #[serde(rename_all = "camelCase")]
    Youtube { video_id: String },
    Video { src: String, poster: String },
    Image { src: String },
}

impl Background {
    pub fn for_slide(slide: &Slide) -> Self {
        match slide.video.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(video) => match extract_youtube_id(video) {
                Some(id) => Background::Youtube { video_id: id.to_string() },
                None => Background::Video {
                    src: video.to_string(),
                    poster: slide.image.clone(),
                },
            },
            None => Background::Image { src: slide.image.clone() },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Background::Youtube { .. } => "YouTube Background",
            Background::Video { .. } => "Video Active",
            Background::Image { .. } => "Image Only",
        }
    }
}
