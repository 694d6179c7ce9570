use candlelight_core::error::Result;
use candlelight_core::{Config, ValidationError};
use clap::Subcommand;
use serde_json::json;

use super::{open_controller, open_durable_controller, print_event};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show streak and today's candle count
    Show,
    /// Forget streak, today's count and any burn in progress
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: StatsAction) -> Result<()> {
    let config = Config::load_or_default();

    match action {
        StatsAction::Show => {
            let candle = open_controller(&config);
            let state = candle.state();
            let stats = json!({
                "date": candle.today(),
                "last_date": state.last_date,
                "streak": state.streak,
                "candles_today": state.candles_today,
                "burning": state.is_burning(),
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Wipe { yes } => {
            if !yes {
                return Err(ValidationError::InvalidValue {
                    field: "--yes".into(),
                    message: "refusing to wipe local progress without confirmation".into(),
                }
                .into());
            }
            let mut candle = open_durable_controller(&config)?;
            print_event(&candle.wipe())?;
        }
    }
    Ok(())
}
