use anyhow::Result;
use chrono::{FixedOffset, Offset};

use crate::output::format::{OutputMode, detect_output_mode};
use crate::settings::Settings;

pub struct RunContext {
    pub output_mode: OutputMode,
    pub tz: FixedOffset,
    pub settings: Settings,
}

impl RunContext {
    /// Create context from CLI arguments and the loaded settings
    pub fn from_args(json: bool, no_color: bool, utc: bool, settings: Settings) -> Result<Self> {
        if no_color {
            colored::control::set_override(false);
        }

        let output_mode = detect_output_mode(json);
        let tz = if utc {
            chrono::Utc.fix()
        } else {
            *chrono::Local::now().offset()
        };

        Ok(RunContext {
            output_mode,
            tz,
            settings,
        })
    }
}
