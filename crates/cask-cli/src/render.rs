//! Terminal rendering of spaces and upload listings.
//!
//! Rendering receives finished, sorted data and only formats it; it never
//! participates in pagination or fetching.

use cask_client::{ListUploadsResult, SpaceInfo};

/// Renders the space listing.
pub fn render_spaces(spaces: &[SpaceInfo]) {
    if spaces.is_empty() {
        println!("No spaces found.");
        return;
    }

    println!("Spaces ({}):", spaces.len());
    for space in spaces {
        match &space.name {
            Some(name) => println!("  {name}  ({})", space.did()),
            None => println!("  {}", space.did()),
        }
    }
}

/// Renders a completed upload listing for one space.
pub fn render_uploads(space: &str, result: &ListUploadsResult) {
    println!("Uploads in {space}:");

    if result.is_empty() {
        println!("  No uploads found.");
    }

    for upload in &result.uploads {
        println!("  root:        {}", upload.root);
        println!("  preview:     {}", upload.gateway_url());
        println!("  size:        {} bytes", upload.size);
        println!("  inserted at: {}", upload.inserted_at);
        println!();
    }

    if result.malformed_pages > 0 {
        eprintln!(
            "warning: {} of {} pages had no recognizable shape and were skipped",
            result.malformed_pages, result.pages_fetched
        );
    }
}

/// Renders the space listing as raw JSON.
pub fn render_spaces_json(spaces: &[SpaceInfo]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(spaces)?);
    Ok(())
}

/// Renders the sorted upload records as raw JSON.
pub fn render_uploads_json(result: &ListUploadsResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&result.uploads)?);
    Ok(())
}
