use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::error::{Result, SlideError};
use crate::models::{MoveDirection, Slide, SlideDraft, SlidePatch, SlideStatus, Stats};
use super::storage_service::SlideStorage;

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Ordered slide collection on top of a [`SlideStorage`] backend.
///
/// Every mutation loads the whole collection, computes the new one and
/// writes it back in a single `replace_all`. Orders are kept dense (`1..=N`)
/// after create, move and delete.
pub struct SlideStore<S> {
    storage: S,
    clock: Clock,
}

impl<S: SlideStorage> SlideStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Utc::now)
    }

    pub fn with_clock<F>(storage: S, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self { storage, clock: Box::new(clock) }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn list(&self) -> Result<Vec<Slide>> {
        self.storage.load_all()
    }

    pub fn get(&self, id: &str) -> Result<Slide> {
        self.list()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Active slides in display order.
    pub fn active(&self) -> Result<Vec<Slide>> {
        let mut slides: Vec<Slide> = self.list()?.into_iter().filter(Slide::is_active).collect();
        slides.sort_by_key(|s| s.order);
        Ok(slides)
    }

    /// Case-insensitive match on title or description.
    pub fn search(&self, term: &str) -> Result<Vec<Slide>> {
        let needle = term.trim().to_lowercase();
        let slides = self.list()?;
        if needle.is_empty() {
            return Ok(slides);
        }
        Ok(slides
            .into_iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn stats(&self) -> Result<Stats> {
        Ok(Stats::from(self.list()?.as_slice()))
    }

    pub fn create(&mut self, draft: SlideDraft) -> Result<Slide> {
        let mut slides = self.list()?;
        let now = (self.clock)();

        let slide = Slide {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image: draft.image.trim().to_string(),
            video: normalize_optional(draft.video),
            play_link: normalize_optional(draft.play_link),
            info_link: normalize_optional(draft.info_link),
            order: slides.len() as u32 + 1,
            status: draft.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        validate_slide(&slide)?;

        slides.push(slide);
        renumber(&mut slides);
        let slide = slides[slides.len() - 1].clone();
        self.storage.replace_all(&slides)?;

        tracing::info!(id = %slide.id, order = slide.order, "Slide created");
        Ok(slide)
    }

    pub fn update(&mut self, id: &str, patch: SlidePatch) -> Result<Slide> {
        let mut slides = self.list()?;
        let pos = position_of(&slides, id)?;

        let mut updated = slides[pos].clone();
        if let Some(title) = patch.title {
            updated.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            updated.description = description.trim().to_string();
        }
        if let Some(image) = patch.image {
            updated.image = image.trim().to_string();
        }
        if let Some(video) = patch.video {
            updated.video = normalize_optional(Some(video));
        }
        if let Some(play_link) = patch.play_link {
            updated.play_link = normalize_optional(Some(play_link));
        }
        if let Some(info_link) = patch.info_link {
            updated.info_link = normalize_optional(Some(info_link));
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }
        updated.updated_at = (self.clock)();
        validate_slide(&updated)?;

        slides[pos] = updated.clone();
        self.storage.replace_all(&slides)?;

        tracing::info!(id = %id, "Slide updated");
        Ok(updated)
    }

    /// Removes a slide and re-packs the remaining orders.
    pub fn delete(&mut self, id: &str) -> Result<Slide> {
        let mut slides = self.list()?;
        let pos = position_of(&slides, id)?;

        let removed = slides.remove(pos);
        renumber(&mut slides);
        self.storage.replace_all(&slides)?;

        tracing::info!(id = %id, remaining = slides.len(), "Slide deleted");
        Ok(removed)
    }

    /// Swaps a slide with its neighbor. Returns `false` without writing when
    /// the slide is already at that end of the list.
    pub fn move_slide(&mut self, id: &str, direction: MoveDirection) -> Result<bool> {
        let mut slides = self.list()?;
        let pos = position_of(&slides, id)?;

        let target = match direction {
            MoveDirection::Up => pos.checked_sub(1),
            MoveDirection::Down => Some(pos + 1).filter(|&i| i < slides.len()),
        };
        let Some(target) = target else {
            tracing::warn!(id = %id, ?direction, "Slide already at the edge, not moved");
            return Ok(false);
        };

        slides.swap(pos, target);
        renumber(&mut slides);
        self.storage.replace_all(&slides)?;

        tracing::info!(id = %id, ?direction, order = target + 1, "Slide moved");
        Ok(true)
    }

    pub fn toggle_status(&mut self, id: &str) -> Result<SlideStatus> {
        let mut slides = self.list()?;
        let pos = position_of(&slides, id)?;

        let status = slides[pos].status.toggled();
        slides[pos].status = status;
        self.storage.replace_all(&slides)?;

        tracing::info!(id = %id, %status, "Slide status toggled");
        Ok(status)
    }
}

fn not_found(id: &str) -> SlideError {
    SlideError::NotFound { id: id.to_string() }
}

fn position_of(slides: &[Slide], id: &str) -> Result<usize> {
    slides.iter().position(|s| s.id == id).ok_or_else(|| not_found(id))
}

fn renumber(slides: &mut [Slide]) {
    for (idx, slide) in slides.iter_mut().enumerate() {
        slide.order = idx as u32 + 1;
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Checks required fields and that every link is an absolute http(s) URL.
pub fn validate_slide(slide: &Slide) -> Result<()> {
    require_text("title", &slide.title)?;
    require_text("description", &slide.description)?;
    require_text("image", &slide.image)?;

    validate_url("image", &slide.image)?;
    for (field, value) in [
        ("video", &slide.video),
        ("playLink", &slide.play_link),
        ("infoLink", &slide.info_link),
    ] {
        if let Some(value) = value {
            validate_url(field, value)?;
        }
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlideError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value)
        .map_err(|e| SlideError::Validation(format!("{field} is not a valid URL ({e}): {value}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SlideError::Validation(format!(
            "{field} must use http or https, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage_service::MemoryStorage;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn draft(title: &str) -> SlideDraft {
        SlideDraft {
            title: title.to_string(),
            description: format!("About {title}"),
            image: format!("https://img.example.com/{}.jpg", title.to_lowercase()),
            ..Default::default()
        }
    }

    /// Store whose clock moves forward one second on every read.
    fn ticking_store() -> SlideStore<MemoryStorage> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let seconds = Arc::new(AtomicI64::new(0));
        SlideStore::with_clock(MemoryStorage::new(), move || {
            base + Duration::seconds(seconds.fetch_add(1, Ordering::SeqCst))
        })
    }

    fn store_with(titles: &[&str]) -> (SlideStore<MemoryStorage>, Vec<String>) {
        let mut store = ticking_store();
        let ids = titles
            .iter()
            .map(|t| store.create(draft(t)).unwrap().id)
            .collect();
        (store, ids)
    }

    fn orders(store: &SlideStore<MemoryStorage>) -> Vec<u32> {
        store.list().unwrap().iter().map(|s| s.order).collect()
    }

    fn titles(store: &SlideStore<MemoryStorage>) -> Vec<String> {
        store.list().unwrap().into_iter().map(|s| s.title).collect()
    }

    #[test]
    fn test_create_assigns_order_status_and_timestamps() {
        let (mut store, _) = store_with(&["Alpha", "Beta"]);
        let slide = store.create(draft("Gamma")).unwrap();

        assert_eq!(slide.order, 3);
        assert_eq!(slide.status, SlideStatus::Active);
        assert_eq!(slide.created_at, slide.updated_at);
        assert_eq!(store.get(&slide.id).unwrap(), slide);
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let (store, ids) = store_with(&["A", "B", "C", "D"]);
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);
        assert_eq!(store.list().unwrap().len(), 4);
    }

    #[test]
    fn test_create_respects_requested_status() {
        let mut store = ticking_store();
        let slide = store
            .create(SlideDraft { status: Some(SlideStatus::Inactive), ..draft("Hidden") })
            .unwrap();
        assert_eq!(slide.status, SlideStatus::Inactive);
    }

    #[test]
    fn test_create_rejects_missing_required_fields() {
        let mut store = ticking_store();

        let err = store.create(SlideDraft { title: "  ".into(), ..draft("x") }).unwrap_err();
        assert!(err.to_string().contains("title"));

        let err = store.create(SlideDraft { image: String::new(), ..draft("x") }).unwrap_err();
        assert!(err.to_string().contains("image"));

        let err = store.create(SlideDraft { description: String::new(), ..draft("x") }).unwrap_err();
        assert!(err.to_string().contains("description"));

        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_create_rejects_non_http_links() {
        let mut store = ticking_store();
        let err = store
            .create(SlideDraft { play_link: Some("javascript:alert(1)".into()), ..draft("x") })
            .unwrap_err();
        assert!(matches!(err, SlideError::Validation(_)));

        let err = store
            .create(SlideDraft { image: "not a url".into(), ..draft("x") })
            .unwrap_err();
        assert!(matches!(err, SlideError::Validation(_)));
    }

    #[test]
    fn test_create_drops_blank_optional_fields() {
        let mut store = ticking_store();
        let slide = store
            .create(SlideDraft {
                video: Some("   ".into()),
                info_link: Some("https://example.com/info".into()),
                ..draft("Links")
            })
            .unwrap();
        assert!(slide.video.is_none());
        assert_eq!(slide.info_link.as_deref(), Some("https://example.com/info"));
    }

    #[test]
    fn test_update_bumps_updated_at_only() {
        let (mut store, ids) = store_with(&["Alpha"]);
        let before = store.get(&ids[0]).unwrap();

        let after = store
            .update(&ids[0], SlidePatch { title: Some("Renamed".into()), ..Default::default() })
            .unwrap();

        assert_eq!(after.title, "Renamed");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.order, before.order);
        assert_eq!(after.id, before.id);
        assert_eq!(store.get(&ids[0]).unwrap(), after);
    }

    #[test]
    fn test_update_clears_optional_field_with_empty_string() {
        let mut store = ticking_store();
        let slide = store
            .create(SlideDraft { video: Some("https://cdn.example.com/a.mp4".into()), ..draft("V") })
            .unwrap();

        let updated = store
            .update(&slide.id, SlidePatch { video: Some(String::new()), ..Default::default() })
            .unwrap();
        assert!(updated.video.is_none());
    }

    #[test]
    fn test_update_rejects_emptied_required_field() {
        let (mut store, ids) = store_with(&["Alpha"]);
        let writes = store.storage().writes();

        let err = store
            .update(&ids[0], SlidePatch { image: Some(String::new()), ..Default::default() })
            .unwrap_err();

        assert!(matches!(err, SlideError::Validation(_)));
        assert_eq!(store.storage().writes(), writes);
        assert_eq!(store.get(&ids[0]).unwrap().title, "Alpha");
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = ticking_store();
        let err = store.update("missing", SlidePatch::default()).unwrap_err();
        assert!(matches!(err, SlideError::NotFound { .. }));
    }

    #[test]
    fn test_delete_removes_and_repacks() {
        let (mut store, ids) = store_with(&["A", "B", "C", "D"]);

        let removed = store.delete(&ids[1]).unwrap();

        assert_eq!(removed.title, "B");
        assert!(matches!(store.get(&ids[1]), Err(SlideError::NotFound { .. })));
        assert_eq!(titles(&store), vec!["A", "C", "D"]);
        assert_eq!(orders(&store), vec![1, 2, 3]);

        let next = store.create(draft("E")).unwrap();
        assert_eq!(next.order, 4);
    }

    #[test]
    fn test_delete_unknown_id() {
        let (mut store, _) = store_with(&["A"]);
        assert!(matches!(store.delete("nope"), Err(SlideError::NotFound { .. })));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_move_swaps_neighbors_and_keeps_orders_dense() {
        let (mut store, ids) = store_with(&["A", "B", "C", "D"]);

        assert!(store.move_slide(&ids[2], MoveDirection::Up).unwrap());
        assert_eq!(titles(&store), vec!["A", "C", "B", "D"]);
        assert_eq!(orders(&store), vec![1, 2, 3, 4]);

        assert!(store.move_slide(&ids[0], MoveDirection::Down).unwrap());
        assert_eq!(titles(&store), vec!["C", "A", "B", "D"]);
        assert_eq!(orders(&store), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_move_at_edges_is_noop() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        let writes = store.storage().writes();

        assert!(!store.move_slide(&ids[0], MoveDirection::Up).unwrap());
        assert!(!store.move_slide(&ids[2], MoveDirection::Down).unwrap());

        assert_eq!(titles(&store), vec!["A", "B", "C"]);
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn test_move_repairs_sparse_orders() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let slide = |id: &str, order: u32| Slide {
            id: id.into(),
            title: id.into(),
            description: "d".into(),
            image: "https://img.example.com/x.jpg".into(),
            video: None,
            play_link: None,
            info_link: None,
            order,
            status: SlideStatus::Active,
            created_at: base,
            updated_at: base,
        };
        let storage = MemoryStorage::with_slides(vec![slide("a", 2), slide("b", 7), slide("c", 9)]);
        let mut store = SlideStore::new(storage);

        store.move_slide("c", MoveDirection::Up).unwrap();

        assert_eq!(titles(&store), vec!["a", "c", "b"]);
        assert_eq!(orders(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_create_repairs_sparse_orders() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let slide = |id: &str, order: u32| Slide {
            id: id.into(),
            title: id.into(),
            description: "d".into(),
            image: "https://img.example.com/x.jpg".into(),
            video: None,
            play_link: None,
            info_link: None,
            order,
            status: SlideStatus::Active,
            created_at: base,
            updated_at: base,
        };
        let storage = MemoryStorage::with_slides(vec![slide("a", 1), slide("c", 3)]);
        let mut store = SlideStore::new(storage);

        let created = store.create(draft("d")).unwrap();

        assert_eq!(created.order, 3);
        assert_eq!(titles(&store), vec!["a", "c", "d"]);
        assert_eq!(orders(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_toggle_twice_restores_status() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let before = store.list().unwrap();

        assert_eq!(store.toggle_status(&ids[0]).unwrap(), SlideStatus::Inactive);
        let mid = store.list().unwrap();
        assert_eq!(mid[0].status, SlideStatus::Inactive);
        assert_eq!(mid[0].updated_at, before[0].updated_at);
        assert_eq!(mid[1], before[1]);

        assert_eq!(store.toggle_status(&ids[0]).unwrap(), SlideStatus::Active);
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_active_filters_and_sorts() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store.toggle_status(&ids[1]).unwrap();
        store.move_slide(&ids[2], MoveDirection::Up).unwrap();
        store.move_slide(&ids[2], MoveDirection::Up).unwrap();

        let active: Vec<String> = store.active().unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(active, vec!["C", "A"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (store, _) = store_with(&["Stranger Things", "Dark", "The Crown"]);

        let found: Vec<String> = store.search("THING").unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(found, vec!["Stranger Things"]);

        // Matches on description too ("About Dark").
        assert_eq!(store.search("about d").unwrap().len(), 1);
        assert_eq!(store.search("").unwrap().len(), 3);
    }

    #[test]
    fn test_stats() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store.toggle_status(&ids[0]).unwrap();

        assert_eq!(store.stats().unwrap(), Stats { total: 3, active: 2, inactive: 1 });
    }
}
