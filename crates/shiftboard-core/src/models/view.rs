/// The three mutually exclusive dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Schedule,
    Upload,
    Logs,
}

impl View {
    pub const ALL: [View; 3] = [View::Schedule, View::Upload, View::Logs];

    /// Sidebar label
    pub fn title(&self) -> &'static str {
        match self {
            View::Schedule => "Schema",
            View::Upload => "Ladda upp",
            View::Logs => "Loggar",
        }
    }

    /// Get the next view (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            View::Schedule => View::Upload,
            View::Upload => View::Logs,
            View::Logs => View::Schedule,
        }
    }

    /// Get the previous view (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            View::Schedule => View::Logs,
            View::Upload => View::Schedule,
            View::Logs => View::Upload,
        }
    }
}
