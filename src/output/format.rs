/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Tty,
    Json,
}

/// Detect the appropriate output mode.
pub fn detect_output_mode(json_flag: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }
    OutputMode::Tty
}

/// Outcome of loading data for a view.
///
/// `Loading` only exists while a load is in flight; commands render the settled
/// `Success` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> LoadState<T> {
    /// Settle a fallible load, keeping only the error's message.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Success(value),
            Err(e) => LoadState::Error(e.to_string()),
        }
    }
}

/// What to say when a list view has nothing to show.
///
/// An empty directory and a search with no hits are different situations and
/// get different messages.
pub fn empty_message(query: Option<&str>, what: &str) -> String {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => format!("No matches for \"{}\".", q),
        None => format!("No {} yet.", what),
    }
}
