//! Preview carousel: index/pause state machine plus the timer loop that
//! drives it.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::models::Slide;
use super::media_service::Background;

/// Default auto-advance period.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(6000);

/// Description lines shown in the overlay before truncation.
pub const DESCRIPTION_MAX_LINES: usize = 3;

const DESCRIPTION_LINE_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    paused: bool,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, paused: false, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the auto-advance timer should be running.
    pub fn ticks_enabled(&self) -> bool {
        !self.paused && self.len > 1
    }

    /// Timer-driven step. Does nothing while paused or with fewer than two slides.
    pub fn auto_advance(&mut self) -> bool {
        if !self.ticks_enabled() {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        let before = self.index;
        self.index = (self.index + 1) % self.len;
        before != self.index
    }

    pub fn prev(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        let before = self.index;
        self.index = (self.index + self.len - 1) % self.len;
        before != self.index
    }

    /// Indicator click. Out-of-range targets are ignored.
    pub fn jump(&mut self, target: usize) -> bool {
        if target >= self.len || target == self.index {
            return false;
        }
        self.index = target;
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallToActionKind {
    Play,
    Info,
}

impl CallToActionKind {
    pub fn label(self) -> &'static str {
        match self {
            CallToActionKind::Play => "Play",
            CallToActionKind::Info => "More Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub kind: CallToActionKind,
    pub href: String,
}

/// What the preview shows for one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub background: Background,
    pub links: Vec<CallToAction>,
}

impl SlideView {
    pub fn from_slide(slide: &Slide) -> Self {
        let links = [
            (CallToActionKind::Play, &slide.play_link),
            (CallToActionKind::Info, &slide.info_link),
        ]
        .into_iter()
        .filter_map(|(kind, href)| {
            href.as_ref()
                .filter(|h| !h.trim().is_empty())
                .map(|h| CallToAction { kind, href: h.clone() })
        })
        .collect();

        Self {
            id: slide.id.clone(),
            title: slide.title.clone(),
            description: slide.description.clone(),
            background: Background::for_slide(slide),
            links,
        }
    }

    /// Plain-text rendering for the terminal preview.
    pub fn render_text(&self, index: usize, total: usize) -> String {
        let mut out = format!("[{}/{}] {}\n", index + 1, total, self.title);
        out.push_str(&format!("  background: {}\n", describe_background(&self.background)));
        for line in clamp_lines(&self.description, DESCRIPTION_LINE_WIDTH, DESCRIPTION_MAX_LINES) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
        for link in &self.links {
            out.push_str(&format!("  > {}: {}\n", link.kind.label(), link.href));
        }
        out
    }
}

fn describe_background(background: &Background) -> String {
    match background {
        Background::Youtube { video_id } => format!("{} ({video_id})", background.label()),
        Background::Video { src, .. } => format!("{} ({src})", background.label()),
        Background::Image { src } => format!("{} ({src})", background.label()),
    }
}

/// Word-wraps `text` and keeps at most `max_lines`, marking truncation with `...`.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }
    lines
}

/// Current state of a preview: either the empty placeholder or one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewFrame<'a> {
    Empty,
    Showing { index: usize, total: usize, view: &'a SlideView },
}

/// Rendered views of the active slides, indexed the way [`CarouselDriver`]
/// reports frames.
#[derive(Debug, Clone)]
pub struct Preview {
    views: Vec<SlideView>,
}

impl Preview {
    pub fn new(active_slides: &[Slide]) -> Self {
        Self { views: active_slides.iter().map(SlideView::from_slide).collect() }
    }

    pub fn views(&self) -> &[SlideView] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn frame_at(&self, index: usize) -> PreviewFrame<'_> {
        match self.views.get(index) {
            Some(view) => PreviewFrame::Showing { index, total: self.views.len(), view },
            None => PreviewFrame::Empty,
        }
    }
}

/// User input fed to a running [`CarouselDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Next,
    Prev,
    Jump(usize),
    /// Pointer entered the carousel.
    Pause,
    /// Pointer left the carousel.
    Resume,
    Stop,
}

enum Event {
    Tick,
    Control(Option<Control>),
}

/// Runs a [`Carousel`] against a recurring timer.
///
/// The timer only exists while the carousel is unpaused and has more than one
/// slide. Manual navigation leaves the timer's phase alone; resuming after a
/// pause starts a fresh full period.
#[derive(Debug)]
pub struct CarouselDriver {
    carousel: Carousel,
    period: Duration,
}

impl CarouselDriver {
    /// A zero `period` is raised to one millisecond.
    pub fn new(len: usize, period: Duration) -> Self {
        Self {
            carousel: Carousel::new(len),
            period: period.max(Duration::from_millis(1)),
        }
    }

    /// Drives the carousel until [`Control::Stop`] arrives, the control
    /// channel closes, or nobody listens for frames any more.
    ///
    /// The displayed index is sent on `frames` at start and after every change.
    pub async fn run(
        mut self,
        mut controls: mpsc::Receiver<Control>,
        frames: mpsc::UnboundedSender<usize>,
    ) -> Carousel {
        if self.carousel.is_empty() {
            tracing::debug!("No active slides, carousel not started");
            return self.carousel;
        }
        if frames.send(self.carousel.index()).is_err() {
            return self.carousel;
        }

        let mut timer: Option<Interval> = None;
        self.sync_timer(&mut timer);

        loop {
            let event = tokio::select! {
                _ = next_tick(&mut timer) => Event::Tick,
                control = controls.recv() => Event::Control(control),
            };

            let changed = match event {
                Event::Tick => self.carousel.auto_advance(),
                Event::Control(None) | Event::Control(Some(Control::Stop)) => {
                    tracing::debug!(index = self.carousel.index(), "Carousel stopped");
                    break;
                }
                Event::Control(Some(control)) => self.apply(control),
            };

            self.sync_timer(&mut timer);

            if changed && frames.send(self.carousel.index()).is_err() {
                break;
            }
        }

        self.carousel
    }

    fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Next => self.carousel.next(),
            Control::Prev => self.carousel.prev(),
            Control::Jump(target) => self.carousel.jump(target),
            Control::Pause => {
                self.carousel.pause();
                false
            }
            Control::Resume => {
                self.carousel.resume();
                false
            }
            Control::Stop => false,
        }
    }

    fn sync_timer(&self, timer: &mut Option<Interval>) {
        match (self.carousel.ticks_enabled(), timer.is_some()) {
            (true, false) => {
                let mut interval = interval_at(Instant::now() + self.period, self.period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                *timer = Some(interval);
            }
            (false, true) => *timer = None,
            _ => {}
        }
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
