use std::io::BufRead;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;

use crate::services::carousel_service::{CarouselDriver, Control, Preview, PreviewFrame};
use super::export::{export_preview_page, widget_options};
use super::AppContext;

const EMPTY_MESSAGE: &str = "Your Cinema is Empty\nAdd slides with `heroreel create` to see them here.";

pub async fn preview_slides(
    ctx: &AppContext,
    interval_ms: Option<u64>,
    html: bool,
    open_browser: bool,
    seconds: Option<u64>,
) -> anyhow::Result<()> {
    if html {
        let path = export_preview_page(ctx, interval_ms)?;
        println!("Preview written to {}", path.display());
        if open_browser {
            open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        }
        return Ok(());
    }

    let slides = ctx.store().active()?;
    let options = widget_options(ctx, interval_ms, false)?;
    let preview = Preview::new(&slides);

    if preview.is_empty() {
        println!("{EMPTY_MESSAGE}");
        return Ok(());
    }

    let total = preview.len();
    let period = Duration::from_millis(options.autoplay_interval_ms);
    tracing::info!(slides = total, period_ms = options.autoplay_interval_ms, "Starting preview");
    eprintln!("n/p: next/previous  1-{total}: jump  pause/resume  q: quit");

    let (control_tx, control_rx) = mpsc::channel(16);
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

    let driver = tokio::spawn(CarouselDriver::new(total, period).run(control_rx, frame_tx));
    let input = tokio::spawn(forward_input(control_tx, total, seconds.map(Duration::from_secs)));

    while let Some(index) = frame_rx.recv().await {
        if let PreviewFrame::Showing { index, total, view } = preview.frame_at(index) {
            println!("{}", view.render_text(index, total));
        }
    }

    let carousel = driver.await.context("Carousel task failed")?;
    input.abort();
    tracing::debug!(index = carousel.index(), "Preview finished");
    Ok(())
}

/// Turns one line of terminal input into a carousel control.
///
/// Numbers are 1-based slide positions.
pub fn parse_control(line: &str, len: usize) -> Option<Control> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "n" | "next" => Some(Control::Next),
        "p" | "prev" => Some(Control::Prev),
        "pause" => Some(Control::Pause),
        "resume" => Some(Control::Resume),
        "q" | "quit" => Some(Control::Stop),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=len).contains(n))
            .map(|n| Control::Jump(n - 1)),
    }
}

async fn forward_input(controls: mpsc::Sender<Control>, len: usize, deadline: Option<Duration>) {
    let mut lines = spawn_stdin_reader();

    let sleep = async {
        match deadline {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => break,
            line = lines.recv() => match line {
                Some(line) => match parse_control(&line, len) {
                    Some(Control::Stop) => break,
                    Some(control) => {
                        if controls.send(control).await.is_err() {
                            return;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => eprintln!("Unknown input: {}", line.trim()),
                },
                None => {
                    if deadline.is_some() {
                        (&mut sleep).await;
                    }
                    break;
                }
            },
        }
    }

    let _ = controls.send(Control::Stop).await;
}

// Blocking stdin reads live on a plain thread so they never hold up runtime shutdown.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read terminal input");
                    break;
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_control("n", 3), Some(Control::Next));
        assert_eq!(parse_control(" NEXT ", 3), Some(Control::Next));
        assert_eq!(parse_control("p", 3), Some(Control::Prev));
        assert_eq!(parse_control("pause", 3), Some(Control::Pause));
        assert_eq!(parse_control("resume", 3), Some(Control::Resume));
        assert_eq!(parse_control("q", 3), Some(Control::Stop));
    }

    #[test]
    fn test_parse_jump_is_one_based() {
        assert_eq!(parse_control("1", 3), Some(Control::Jump(0)));
        assert_eq!(parse_control("3", 3), Some(Control::Jump(2)));
        assert_eq!(parse_control("0", 3), None);
        assert_eq!(parse_control("4", 3), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_control("", 3), None);
        assert_eq!(parse_control("faster", 3), None);
    }
}
