use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::models::Slide;
use super::carousel_service::DEFAULT_AUTOPLAY_INTERVAL;
use super::media_service::{youtube_embed_url, Background};

const WIDGET_BANNER: &str = "<!-- HeroReel Slideshow Widget -->";

/// Knobs for the exported widget's runtime behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    pub autoplay_interval_ms: u64,
    /// Stop auto-advance while the pointer is over the widget. Off by default,
    /// matching earlier exports.
    pub pause_on_hover: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL.as_millis() as u64,
            pause_on_hover: false,
        }
    }
}

/// Per-slide entry of the script's data block. Markup is pre-rendered, so the
/// script only needs the title for the dot labels.
#[derive(Serialize)]
struct WidgetSlide<'a> {
    title: &'a str,
}

impl<'a> From<&'a Slide> for WidgetSlide<'a> {
    fn from(slide: &'a Slide) -> Self {
        Self { title: &slide.title }
    }
}

/// Generate the self-contained markup + style + script snippet for the given
/// slides, in the order given. Callers pass the active slides sorted by order.
///
/// Output depends only on the arguments.
pub fn generate_widget(slides: &[Slide], options: &WidgetOptions) -> Result<String> {
    let mut track = String::new();
    for (idx, slide) in slides.iter().enumerate() {
        track.push_str(&render_slide(slide, idx == 0));
    }

    let data: Vec<WidgetSlide<'_>> = slides.iter().map(WidgetSlide::from).collect();
    let data_json = escape_script_json(&serde_json::to_string(&data)?);

    Ok(format!(
        r##"{banner}
<div id="nx-slider-root" class="nx-slider-container">
  <div id="nx-slider-track" class="nx-slider-track">
{track}  </div>
  <button type="button" id="nx-prev" class="nx-nav-btn nx-prev" aria-label="Previous slide">&#10094;</button>
  <button type="button" id="nx-next" class="nx-nav-btn nx-next" aria-label="Next slide">&#10095;</button>
  <div id="nx-dots" class="nx-dots"></div>
</div>

<style>{css}</style>

<script>
(function() {{
  var slides = {data};
  var interval = {interval};
  var pauseOnHover = {pause_on_hover};
{script}}})();
</script>"##,
        banner = WIDGET_BANNER,
        track = track,
        css = get_widget_css(),
        data = data_json,
        interval = options.autoplay_interval_ms,
        pause_on_hover = options.pause_on_hover,
        script = get_widget_script(),
    ))
}

/// Standalone HTML page around the widget, for previewing in a browser.
pub fn render_preview_page(slides: &[Slide], options: &WidgetOptions) -> Result<String> {
    let body = if slides.is_empty() {
        r#"<div class="hr-empty">
  <h3>Your Cinema is Empty</h3>
  <p>Add some slides to get started.</p>
</div>"#
            .to_string()
    } else {
        generate_widget(slides, options)?
    };

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Live Preview - HeroReel</title>
    <style>
        body {{ margin: 0; padding: 2rem; background: #0A0A0F; color: #fff; font-family: 'Inter', sans-serif; }}
        .hr-frame {{ max-width: 1280px; margin: 0 auto; border-radius: 16px; overflow: hidden; border: 1px solid #27272a; }}
        .hr-empty {{ height: 60vh; display: flex; flex-direction: column; align-items: center; justify-content: center; color: #71717a; border: 2px dashed #27272a; border-radius: 16px; }}
    </style>
</head>
<body>
<div class="hr-frame">
{body}
</div>
</body>
</html>"##,
        body = body
    ))
}

fn render_slide(slide: &Slide, first: bool) -> String {
    let title = html_escape(&slide.title);
    let background = match Background::for_slide(slide) {
        Background::Youtube { video_id } => format!(
            r#"<div class="nx-video-wrapper"><iframe src="{src}" title="{title}" frameborder="0" allow="autoplay; encrypted-media"></iframe></div>"#,
            src = html_escape(&youtube_embed_url(&video_id)),
            title = title,
        ),
        Background::Video { src, poster } => format!(
            r#"<video src="{src}" poster="{poster}" autoplay muted loop playsinline class="nx-slide-bg"></video>"#,
            src = html_escape(&src),
            poster = html_escape(&poster),
        ),
        Background::Image { src } => format!(
            r#"<img src="{src}" alt="{title}" class="nx-slide-bg" />"#,
            src = html_escape(&src),
            title = title,
        ),
    };

    let mut buttons = String::new();
    if let Some(play) = http_link(slide, slide.play_link.as_deref()) {
        buttons.push_str(&format!(
            r#"<a href="{}" class="nx-btn nx-btn-play">&#9654; Play</a>"#,
            html_escape(play)
        ));
    }
    if let Some(info) = http_link(slide, slide.info_link.as_deref()) {
        buttons.push_str(&format!(
            r#"<a href="{}" class="nx-btn nx-btn-info">&#9432; More Info</a>"#,
            html_escape(info)
        ));
    }

    format!(
        r#"    <div class="nx-slide{active}">
      {background}
      <div class="nx-overlay"><div class="nx-content">
        <h2 class="nx-title">{title}</h2>
        <p class="nx-desc">{description}</p>
        <div class="nx-btn-group">{buttons}</div>
      </div></div>
    </div>
"#,
        active = if first { " active" } else { "" },
        background = background,
        title = title,
        description = html_escape(&slide.description),
        buttons = buttons,
    )
}

/// Only absolute http(s) links reach an `href`; stored data may have been
/// edited by hand since it was validated.
fn http_link<'a>(slide: &Slide, href: Option<&'a str>) -> Option<&'a str> {
    let href = href?;
    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(href),
        _ => {
            tracing::warn!(id = %slide.id, href, "Skipping non-http link in widget");
            None
        }
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Makes serialized JSON safe to place inside a `<script>` element.
fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

fn get_widget_script() -> &'static str {
    r#"  var root = document.getElementById('nx-slider-root');
  if (!root) return;
  var items = root.querySelectorAll('.nx-slide');
  var dotsContainer = document.getElementById('nx-dots');
  var prevBtn = document.getElementById('nx-prev');
  var nextBtn = document.getElementById('nx-next');
  var dots = [];
  var currentIdx = 0;
  var timer = null;

  function goTo(idx) {
    if (!items.length) return;
    items[currentIdx].classList.remove('active');
    dots[currentIdx].classList.remove('active');
    currentIdx = (idx + items.length) % items.length;
    items[currentIdx].classList.add('active');
    dots[currentIdx].classList.add('active');
  }

  function start() {
    if (timer !== null || items.length < 2) return;
    timer = setInterval(function() { goTo(currentIdx + 1); }, interval);
  }

  function stop() {
    if (timer === null) return;
    clearInterval(timer);
    timer = null;
  }

  slides.forEach(function(s, i) {
    var dot = document.createElement('button');
    dot.type = 'button';
    dot.className = 'nx-dot' + (i === 0 ? ' active' : '');
    dot.setAttribute('aria-label', s.title);
    dot.onclick = function() { goTo(i); };
    dotsContainer.appendChild(dot);
    dots.push(dot);
  });

  if (items.length < 2) {
    prevBtn.style.display = 'none';
    nextBtn.style.display = 'none';
  }
  prevBtn.onclick = function() { goTo(currentIdx - 1); };
  nextBtn.onclick = function() { goTo(currentIdx + 1); };

  if (pauseOnHover) {
    root.addEventListener('mouseenter', stop);
    root.addEventListener('mouseleave', start);
  }

  start();
"#
}

fn get_widget_css() -> &'static str {
    r##"
  .nx-slider-container {
    position: relative;
    width: 100%;
    aspect-ratio: 16/9;
    background: #000;
    overflow: hidden;
    font-family: 'Inter', sans-serif;
    color: #fff;
  }
  .nx-slider-track { width: 100%; height: 100%; position: relative; }
  .nx-slide {
    position: absolute;
    inset: 0;
    opacity: 0;
    transition: opacity 0.8s ease-in-out;
    display: flex;
    align-items: center;
  }
  .nx-slide.active { opacity: 1; z-index: 10; }
  .nx-slide-bg { width: 100%; height: 100%; object-fit: cover; }

  .nx-video-wrapper {
    position: absolute;
    top: 0; left: 0; width: 100%; height: 100%;
    pointer-events: none;
    z-index: 0;
  }
  .nx-video-wrapper iframe {
    width: 110%; height: 110%;
    position: absolute;
    top: 50%; left: 50%;
    transform: translate(-50%, -50%);
    object-fit: cover;
  }

  .nx-overlay {
    position: absolute;
    inset: 0;
    background: linear-gradient(90deg, rgba(0,0,0,0.9) 0%, rgba(0,0,0,0.4) 50%, transparent 100%);
    display: flex;
    align-items: center;
    padding: 0 10%;
    z-index: 5;
  }
  .nx-content { max-width: 600px; transform: translateY(20px); opacity: 0; transition: 0.6s 0.3s; }
  .nx-slide.active .nx-content { transform: translateY(0); opacity: 1; }
  .nx-title { font-size: clamp(24px, 5vw, 40px); font-weight: 800; margin-bottom: 0.5rem; line-height: 1.1; }
  .nx-desc { font-size: 16px; line-height: normal; color: #ccc; margin-bottom: 2rem; display: -webkit-box; -webkit-line-clamp: 3; -webkit-box-orient: vertical; overflow: hidden; }
  .nx-btn-group { display: flex; gap: 1rem; }
  .nx-btn { padding: 0.8rem 2rem; border-radius: 4px; font-weight: 700; text-decoration: none; transition: 0.2s; display: inline-flex; align-items: center; gap: 8px; }
  .nx-btn-play { background: #fff; color: #000; }
  .nx-btn-play:hover { background: #e6e6e6; }
  .nx-btn-info { background: rgba(109, 109, 110, 0.7); color: #fff; backdrop-filter: blur(4px); }
  .nx-btn-info:hover { background: rgba(109, 109, 110, 0.4); }
  .nx-nav-btn {
    position: absolute; top: 50%; transform: translateY(-50%); z-index: 20;
    background: transparent; border: none; color: #fff; font-size: 2.5rem; cursor: pointer;
    padding: 20px; opacity: 0; transition: 0.3s;
  }
  .nx-slider-container:hover .nx-nav-btn { opacity: 0.7; }
  .nx-nav-btn:hover { opacity: 1 !important; }
  .nx-prev { left: 0; } .nx-next { right: 0; }
  .nx-dots { position: absolute; bottom: 20px; right: 40px; z-index: 20; display: flex; gap: 8px; }
  .nx-dot { width: 12px; height: 3px; padding: 0; border: none; background: rgba(255,255,255,0.3); border-radius: 2px; cursor: pointer; transition: 0.3s; }
  .nx-dot.active { width: 30px; background: #fff; }
  @media (max-width: 480px) {
    .nx-btn { padding: 0.6rem 1rem; font-size: 13px; gap: 6px; }
  }
"##
}
