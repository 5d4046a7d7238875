use clap::{Parser, Subcommand};

use crate::query::filter::CallFilter;

#[derive(Parser, Debug)]
#[command(name = "dialbook", version = env!("DIALBOOK_VERSION"), about = "Phone directory and call log for the terminal")]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (uses human-readable format without ANSI codes)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Display timestamps in UTC instead of local time
    #[arg(long, global = true)]
    pub utc: bool,

    /// Use a specific database file instead of the default
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    /// Enable verbose output (index building, enrichment, migrations)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage contacts
    #[command(visible_alias = "c")]
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },

    /// Search contacts by name, initials, or number
    #[command(visible_alias = "s")]
    Search {
        /// Search query (omit to list everyone)
        #[arg(default_value = "")]
        query: String,
    },

    /// Show recent calls
    #[command(visible_alias = "r")]
    Recents {
        /// Which calls to show
        #[arg(long, value_enum, default_value_t = CallFilter::All)]
        filter: CallFilter,

        /// Maximum number of calls to show (0 = no limit)
        #[arg(long, default_value = "0")]
        limit: usize,

        /// Relative date filter, overrides --since/--until [today, yesterday, this-week, last-week]
        #[arg(long)]
        date: Option<String>,

        /// Only calls at or after this date [e.g., 2024-01-15 or 2024-01-15T10:30:00Z]
        #[arg(long)]
        since: Option<String>,

        /// Only calls before this date [e.g., 2024-01-15 or 2024-01-15T10:30:00Z]
        #[arg(long)]
        until: Option<String>,
    },

    /// Show the call history for one number
    #[command(visible_alias = "h")]
    History {
        /// Phone number, in any format
        number: String,
    },

    /// Import contacts and calls from a device export (JSON)
    Import {
        /// Path to the export file
        file: std::path::PathBuf,

        /// Remove existing contacts and calls first
        #[arg(long)]
        replace: bool,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Show database statistics
    Info,
}

#[derive(Subcommand, Debug)]
pub enum ContactsAction {
    /// List contacts
    #[command(visible_alias = "ls")]
    List {
        /// Only favorites
        #[arg(long, visible_alias = "favourites")]
        favorites: bool,
    },

    /// Show one contact
    Show {
        /// Contact ID
        id: String,
    },

    /// Add a contact
    Add {
        #[arg(long)]
        first: String,

        #[arg(long, default_value = "")]
        last: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        email: String,
    },

    /// Rename a contact and replace its primary number (an empty --phone removes it)
    Edit {
        /// Contact ID
        id: String,

        #[arg(long)]
        first: String,

        #[arg(long, default_value = "")]
        last: String,

        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Delete a contact and its numbers
    #[command(visible_alias = "rm")]
    Delete {
        /// Contact ID
        id: String,
    },

    /// Mark a contact as favorite
    Favorite {
        /// Contact ID
        id: String,

        /// Remove the favorite mark instead
        #[arg(long)]
        off: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print current settings
    Show,

    /// Change one setting [theme: system|light|dark, avatar_style: initials|icon, dialer_layout: standard|compact]
    Set { key: String, value: String },
}
