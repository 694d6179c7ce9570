use candlelight_core::error::Result;
use candlelight_core::{Config, Mode, Sound};
use clap::Subcommand;

use super::{open_controller, print_event};

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Set the persona used to pick daily content (e.g. "designer")
    Role { role: String },
    /// Switch between sacred prayers and secular mantras
    Mode {
        /// "sacred", "secular" or "toggle"
        value: String,
    },
    /// Turn the burn sound on or off
    Sound {
        /// "on", "off" or "toggle"
        value: String,
    },
    /// Print current preferences
    Show,
}

pub fn run(action: PrefsAction) -> Result<()> {
    let config = Config::load_or_default();
    let mut candle = open_controller(&config);

    match action {
        PrefsAction::Role { role } => {
            candle.set_role(&role)?;
            println!("role: {}", candle.state().role);
        }
        PrefsAction::Mode { value } => {
            let mode = if value == "toggle" {
                candle.toggle_mode()
            } else {
                let mode: Mode = value.parse()?;
                candle.set_mode(mode);
                mode
            };
            println!("mode: {mode}");
        }
        PrefsAction::Sound { value } => {
            let sound = if value == "toggle" {
                candle.toggle_sound()
            } else {
                let sound: Sound = value.parse()?;
                candle.set_sound(sound);
                sound
            };
            println!("sound: {sound}");
        }
        PrefsAction::Show => print_event(&candle.snapshot())?,
    }

    if candle.is_degraded() {
        eprintln!("warning: preferences could not be saved");
    }
    Ok(())
}
