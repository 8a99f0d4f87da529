use std::fmt::Write as _;

use discovery_core::{has_next, has_previous, AppViewModel, Mode, PageSlot, Phase, ResultItem};
use discovery_engine::{AssetResolver, DetailRecord};

use super::theme::Theme;

/// Text lines for the current coordinator view.
pub fn render(view: &AppViewModel, theme: Theme, assets: &AssetResolver) -> Vec<String> {
    let palette = theme.palette();
    let mut lines = Vec::new();

    let heading = match view.mode {
        Mode::Browse => "Trending".to_string(),
        Mode::Search => format!("Results for \"{}\"", view.committed_query),
    };
    let status = match view.phase {
        Phase::Loading => " (loading...)",
        Phase::Debouncing => " (typing...)",
        _ => "",
    };
    lines.push(format!("{}{heading}{}{status}", palette.accent, palette.reset));

    if let Some(error) = &view.error {
        lines.push(format!("{}{error}{}", palette.error, palette.reset));
    }

    if view.suggestions.visible {
        lines.push(format!("{}suggestions:{}", palette.muted, palette.reset));
        for (index, item) in view.suggestions.items.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, headline(item)));
        }
    }

    if view.items.is_empty() && !view.loading && view.error.is_none() {
        if view.mode == Mode::Search && view.phase == Phase::Loaded {
            lines.push(format!("No results for \"{}\"", view.committed_query));
        }
    } else {
        for item in &view.items {
            let mut line = format!("{:>9}  {}", item.id, headline(item));
            if let Some(rating) = item.rating {
                let _ = write!(line, "  {rating:.1}/10");
            }
            if let Some(poster) = assets.thumbnail_url(Some(&item.poster_path)) {
                let _ = write!(line, "  {}{poster}{}", palette.muted, palette.reset);
            }
            lines.push(line);
        }
    }

    if !view.pages.is_empty() {
        lines.push(pagination_bar(view));
        lines.push(format!(
            "{}page {} of {}, {} results{}",
            palette.muted, view.page, view.total_pages, view.total_results, palette.reset
        ));
    }

    lines
}

fn headline(item: &ResultItem) -> String {
    match item.year {
        Some(year) => format!("{} ({year}) [{}]", item.title, item.kind.label()),
        None => format!("{} [{}]", item.title, item.kind.label()),
    }
}

fn pagination_bar(view: &AppViewModel) -> String {
    let mut parts = Vec::with_capacity(view.pages.len() + 2);
    if has_previous(view.page) {
        parts.push("<".to_string());
    }
    for slot in &view.pages {
        parts.push(match slot {
            PageSlot::Page(page) if *page == view.page => format!("[{page}]"),
            PageSlot::Page(page) => page.to_string(),
            PageSlot::Gap => "...".to_string(),
        });
    }
    if has_next(view.page, view.total_pages) {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

/// Text lines for the details view of one title.
pub fn render_details(record: &DetailRecord, theme: Theme, assets: &AssetResolver) -> Vec<String> {
    let palette = theme.palette();
    let title = record.title.as_deref().unwrap_or("Untitled");
    let mut lines = vec![match record.year {
        Some(year) => format!(
            "{}{title} ({year}){} [{}]",
            palette.accent,
            palette.reset,
            record.kind.label()
        ),
        None => format!(
            "{}{title}{} [{}]",
            palette.accent,
            palette.reset,
            record.kind.label()
        ),
    }];

    if let Some(tagline) = &record.tagline {
        lines.push(format!("{}{tagline}{}", palette.muted, palette.reset));
    }

    let mut facts = Vec::new();
    if let Some(rating) = record.rating {
        facts.push(format!("{rating:.1}/10"));
    }
    if let Some(runtime) = record.runtime_minutes {
        facts.push(format!("{runtime} min"));
    }
    if !record.genres.is_empty() {
        facts.push(record.genres.join(", "));
    }
    if let Some(status) = &record.status {
        facts.push(status.clone());
    }
    if !facts.is_empty() {
        lines.push(facts.join(" | "));
    }

    if let Some(overview) = &record.overview {
        lines.push(overview.clone());
    }
    if let Some(poster) = assets.poster_url(record.poster_path.as_deref()) {
        lines.push(format!("poster: {poster}"));
    }
    if let Some(backdrop) = assets.backdrop_url(record.backdrop_path.as_deref()) {
        lines.push(format!("backdrop: {backdrop}"));
    }
    lines.push(format!("watch: {}", assets.embed_url(record.kind, record.id)));
    lines
}
