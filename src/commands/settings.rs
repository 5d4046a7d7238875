use anyhow::Result;

use crate::cli::args::SettingsAction;
use crate::output::format::OutputMode;
use crate::output::json::to_json;
use crate::settings::{Settings, SettingsStore};

/// Apply `action` against `store`, returning the settings now in effect.
///
/// An unreadable store reads as the defaults, so `set` replaces a broken file.
pub fn apply(store: &dyn SettingsStore, action: Option<&SettingsAction>) -> Result<Settings> {
    let mut settings = store.load_or_default();
    if let Some(SettingsAction::Set { key, value }) = action {
        settings.set(key, value)?;
        store.save(&settings)?;
    }
    Ok(settings)
}

pub fn run(store: &dyn SettingsStore, action: Option<&SettingsAction>, mode: OutputMode) -> Result<()> {
    let settings = apply(store, action)?;

    match mode {
        OutputMode::Json => println!("{}", to_json(&settings)),
        OutputMode::Tty => println!("{}", crate::output::table::format_settings(&settings)),
    }

    Ok(())
}
