use std::io::Write;
use std::time::Duration;

use candlelight_core::error::Result;
use candlelight_core::{format_mmss, Config, Event};
use clap::Subcommand;

use super::{open_controller, print_event, Controller};

#[derive(Subcommand)]
pub enum CandleAction {
    /// Light the candle
    Ignite {
        /// Require a long press (hold for the configured time) before lighting
        #[arg(long)]
        hold: bool,
    },
    /// Put the flame out, keeping the remaining wax
    Extinguish,
    /// Replace the candle with a fresh one
    Reset,
    /// Print current candle state as JSON
    Status,
    /// Follow the burn until it ends or Ctrl-C
    Watch,
}

pub async fn run(action: CandleAction) -> Result<()> {
    let config = Config::load_or_default();
    let mut candle = open_controller(&config);

    match action {
        CandleAction::Ignite { hold } => {
            let event = if hold {
                hold_to_ignite(&mut candle, config.timing.hold_frame_ms).await?
            } else {
                candle.ignite()
            };
            match event {
                Some(event) => print_event(&event)?,
                None => print_event(&candle.snapshot())?,
            }
        }
        CandleAction::Extinguish => match candle.extinguish() {
            Some(event) => print_event(&event)?,
            None => print_event(&candle.snapshot())?,
        },
        CandleAction::Reset => {
            print_event(&candle.reset())?;
        }
        CandleAction::Status => {
            if let Some(event) = candle.tick() {
                print_event(&event)?;
            }
            print_event(&candle.snapshot())?;
        }
        CandleAction::Watch => watch(&mut candle, config.timing.tick_interval_ms).await?,
    }
    Ok(())
}

/// Drive the hold gesture on a fine interval, drawing progress on stderr.
/// Ctrl-C releases the hold so nothing lights after the gesture ends.
async fn hold_to_ignite(
    candle: &mut Controller,
    frame_ms: u64,
) -> Result<Option<Event>> {
    if !candle.press_hold() {
        return Ok(None);
    }
    let mut frames = tokio::time::interval(Duration::from_millis(frame_ms.max(1)));
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    let event = loop {
        tokio::select! {
            _ = frames.tick() => {
                draw_progress(candle.hold_progress())?;
                if let Some(event) = candle.poll_hold() {
                    break Some(event);
                }
            }
            _ = &mut interrupted => {
                candle.release_hold();
                break None;
            }
        }
    };
    eprintln!();
    Ok(event)
}

fn draw_progress(fraction: f64) -> std::io::Result<()> {
    const WIDTH: usize = 20;
    let filled = (fraction * WIDTH as f64).round() as usize;
    let mut err = std::io::stderr();
    write!(
        err,
        "\rholding [{}{}] {:>3.0}%",
        "#".repeat(filled),
        " ".repeat(WIDTH - filled.min(WIDTH)),
        fraction * 100.0
    )?;
    err.flush()
}

/// Tick while lit; the interval is dropped as soon as the candle goes out.
async fn watch(candle: &mut Controller, tick_ms: u64) -> Result<()> {
    if !candle.timer().is_lit() {
        print_event(&candle.snapshot())?;
        return Ok(());
    }

    let mut ticks = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    let mut err = std::io::stderr();

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let expired = candle.tick();
                write!(err, "\r{}", format_mmss(candle.timer().remaining_ms()))?;
                err.flush()?;
                if let Some(event) = expired {
                    eprintln!();
                    print_event(&event)?;
                    break;
                }
            }
            _ = &mut interrupted => {
                eprintln!();
                break;
            }
        }
    }
    Ok(())
}
