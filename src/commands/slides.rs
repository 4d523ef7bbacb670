use anyhow::{bail, Context};
use dialoguer::{console::Term, Confirm};

use crate::cli::{CreateArgs, UpdateArgs};
use crate::models::{MoveDirection, Slide, SlideDraft, SlidePatch, SlideStatus};
use crate::services::media_service::{is_youtube, Background};
use super::AppContext;

pub fn list_slides(ctx: &AppContext, search: Option<&str>, active_only: bool, json: bool) -> anyhow::Result<()> {
    let store = ctx.store();
    let mut slides = match search {
        Some(term) => store.search(term)?,
        None => store.list()?,
    };
    if active_only {
        slides.retain(Slide::is_active);
        slides.sort_by_key(|s| s.order);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&slides)?);
        return Ok(());
    }

    if slides.is_empty() {
        println!("No slides found. Start by adding a new one!");
        return Ok(());
    }
    for slide in &slides {
        println!("{}", format_row(slide));
    }
    Ok(())
}

fn format_row(slide: &Slide) -> String {
    let media = match slide.video.as_deref() {
        Some(video) if is_youtube(video) => " [youtube]",
        Some(_) => " [video]",
        None => "",
    };
    format!(
        "{:>3}  {:<8}  {}  {}{}",
        slide.order, slide.status, slide.id, slide.title, media
    )
}

pub fn show_slide(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let slide = ctx.store().get(id)?;
    println!("{}", serde_json::to_string_pretty(&slide)?);
    println!("background: {}", Background::for_slide(&slide).label());
    Ok(())
}

pub fn create_slide(ctx: &AppContext, args: CreateArgs) -> anyhow::Result<()> {
    let draft = SlideDraft {
        title: args.title,
        description: args.description,
        image: args.image,
        video: args.video,
        play_link: args.play_link,
        info_link: args.info_link,
        status: args.inactive.then_some(SlideStatus::Inactive),
    };
    let slide = ctx.store().create(draft).context("Slide was not created")?;
    println!("Created slide {} at position {}", slide.id, slide.order);
    Ok(())
}

pub fn update_slide(ctx: &AppContext, args: UpdateArgs) -> anyhow::Result<()> {
    let patch = SlidePatch {
        title: args.title,
        description: args.description,
        image: args.image,
        video: args.video,
        play_link: args.play_link,
        info_link: args.info_link,
        status: args.status.map(Into::into),
    };
    if patch.is_empty() {
        bail!("Nothing to update; pass at least one field");
    }
    let slide = ctx.store().update(&args.id, patch).context("Slide was not updated")?;
    println!("Updated slide {}", slide.id);
    Ok(())
}

pub fn delete_slide(ctx: &AppContext, id: &str, yes: bool) -> anyhow::Result<()> {
    let mut store = ctx.store();
    let slide = store.get(id)?;

    if !yes {
        let term = Term::stderr();
        if !term.is_term() {
            bail!("Refusing to delete without confirmation; re-run with --yes");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete \"{}\"?", slide.title))
            .default(false)
            .interact_on(&term)?;
        if !confirmed {
            println!("Aborted; slide was not deleted.");
            return Ok(());
        }
    }

    store.delete(id)?;
    println!("Deleted slide {}", id);
    Ok(())
}

pub fn move_slide(ctx: &AppContext, id: &str, direction: MoveDirection) -> anyhow::Result<()> {
    let mut store = ctx.store();
    if store.move_slide(id, direction)? {
        let slide = store.get(id)?;
        println!("Moved slide {} to position {}", id, slide.order);
    } else {
        println!("Slide {} is already at the {}", id, match direction {
            MoveDirection::Up => "top",
            MoveDirection::Down => "bottom",
        });
    }
    Ok(())
}

pub fn toggle_slide(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let status = ctx.store().toggle_status(id)?;
    println!("Slide {} is now {}", id, status);
    Ok(())
}

pub fn slide_stats(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let stats = ctx.store().stats()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total slides: {}", stats.total);
        println!("Active now:   {}", stats.active);
        println!("Inactive:     {}", stats.inactive);
    }
    Ok(())
}
