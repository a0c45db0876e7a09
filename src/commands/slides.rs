//! Slides command - list the hero slides in display order.

use anyhow::Result;

use crate::carousel::SlideSet;

/// Handle the slides command.
pub fn handle_slides_command() -> Result<()> {
    let config = super::load_config()?;
    let slides = config.slide_set()?;
    let source = if config.slides.is_some() {
        "configured"
    } else {
        "built-in"
    };

    log_version!();
    log_block_start!("Hero slides ({} {})", slides.len(), source);
    log_slides(&slides);
    log_end!();
    Ok(())
}

fn log_slides(slides: &SlideSet) {
    for (index, slide) in slides.iter().enumerate() {
        log_pipe!();
        log_decorated!("{}. {}", index + 1, slide.title);
        if !slide.subtitle.is_empty() {
            log_indented!("{}", slide.subtitle);
        }
        log_indented!("Image: {}", slide.image);
        log_debug!("{}", slide.description);
    }
}

/// Show detailed help for the slides command
pub fn display_help() {
    log_version!();
    log_block_start!("slides - List the hero carousel slides");
    log_block_start!("Usage: happyhour slides");
    log_block_start!("Description:");
    log_indented!("Prints every slide in display order with its image.");
    log_indented!("Slides come from [[slides]] tables in happyhour.toml,");
    log_indented!("or the built-in café slides when none are configured.");
    log_indented!("Keys 1-9 on the live board jump to the slide with that number.");
    log_block_start!("Examples:");
    log_indented!("happyhour slides");
    log_indented!("happyhour --debug slides   # also print descriptions");
    log_end!();
}
