use serde::{Deserialize, Serialize};
use super::Slide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl From<&[Slide]> for Stats {
    fn from(slides: &[Slide]) -> Self {
        let active = slides.iter().filter(|s| s.is_active()).count();
        Self {
            total: slides.len(),
            active,
            inactive: slides.len() - active,
        }
    }
}
