use chrono::Utc;

use crate::app::{AppContext, Result};
use crate::domain::NewsItem;

pub async fn refresh(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.cache.force_refresh().await?;
    println!(
        "Refreshed {} items from {} sources",
        snapshot.items.len(),
        ctx.cache.sources().len()
    );
    Ok(())
}

pub async fn list(ctx: &AppContext, limit: Option<usize>, translate: bool) -> Result<()> {
    let snapshot = ctx.cache.get_items().await?;
    let shown = limit.unwrap_or(snapshot.items.len());

    for item in snapshot.items.iter().take(shown) {
        print_item(ctx, item, translate).await;
    }

    println!(
        "\n{} items, updated {}",
        snapshot.items.len(),
        snapshot.refreshed_at.format("%H:%M:%S UTC")
    );
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    // Populate the cache on a cold start; search itself never refreshes.
    ctx.cache.get_items().await?;

    let results = ctx.cache.search(query).await;
    if results.is_empty() {
        println!("No matches for \"{}\"", query);
        return Ok(());
    }

    for item in &results {
        println!(
            "{}  [{}] {}",
            item.format_published(),
            item.source,
            item.display_title()
        );
        println!("  id: {}  {}", item.id, item.link);
    }
    println!("\n{} matches", results.len());
    Ok(())
}

pub async fn show(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.cache.get_items().await?;

    match ctx.cache.get_item(id).await {
        Some(item) => {
            println!("{}", item.display_title());
            println!("  source:    {}", item.source);
            println!("  published: {}", item.format_published());
            println!("  link:      {}", item.link);
            if let Some(image) = &item.image {
                println!("  image:     {}", image);
            }
            println!("  accent:    {}", item.accent);
            if !item.description.is_empty() {
                println!("\n{}", item.description);
            }
        }
        None => println!("No item with ID {}", id),
    }
    Ok(())
}

pub fn sources(ctx: &AppContext) -> Result<()> {
    for source in ctx.cache.sources() {
        println!("{}\n  {}", source.name, source.url);
    }
    Ok(())
}

async fn print_item(ctx: &AppContext, item: &NewsItem, translate: bool) {
    let title = if translate {
        ctx.translator
            .translate(&item.orig_title, &ctx.config.target_lang)
            .await
    } else {
        item.display_title().to_string()
    };

    println!(
        "{:>12}  [{}] {}",
        item.relative_age(Utc::now()),
        item.source,
        title
    );
    println!("{:>12}  {}", "", item.link);
}
