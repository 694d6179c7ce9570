use candlelight_core::error::Result;
use candlelight_core::{Config, ContentResolver, DailyContent};
use serde::Serialize;

use super::{load_library, open_controller};

#[derive(Serialize)]
struct TodayView<'a> {
    date: String,
    role: &'a str,
    #[serde(flatten)]
    content: DailyContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<&'static str>,
}

pub async fn today(json: bool) -> Result<()> {
    let config = Config::load_or_default();
    let library = load_library(&config).await?;
    let candle = open_controller(&config);
    let locale = config.ui.locale;
    let resolver = ContentResolver::new(&library, locale);

    let view = TodayView {
        date: candle.today().format("%Y-%m-%d").to_string(),
        role: &candle.state().role,
        content: candle.daily_content(&resolver),
        advisory: library.advisory(locale),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some(advisory) = view.advisory {
        eprintln!("{advisory}");
    }
    println!("{} ({} • {})", view.content.prayer_title, view.date, view.role);
    println!("  {}", view.content.prayer_text);
    println!();
    println!("{} {}", view.content.prediction_emoji, view.content.prediction_text);
    println!();
    let state = candle.state();
    println!(
        "🕯 {} · streak {} · {}",
        state.candles_today,
        state.streak,
        locale.buff_word(state.mode)
    );
    Ok(())
}

pub async fn share(width: usize, json: bool) -> Result<()> {
    let config = Config::load_or_default();
    let library = load_library(&config).await?;
    let candle = open_controller(&config);
    let resolver = ContentResolver::new(&library, config.ui.locale);
    let card = candle.share_card(&resolver);

    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    println!("{}", card.heading);
    println!("{}", card.subtitle);
    println!();
    println!("{}", card.emoji);
    for line in card.lines(width.max(1)) {
        println!("{line}");
    }
    println!();
    println!("{}", card.footer);
    Ok(())
}
