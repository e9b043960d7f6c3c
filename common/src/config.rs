/// Runtime behaviour shared across commands.
#[derive(Debug, Clone)]
pub struct Config {
    /// Flag text matches for emphasis instead of hiding everything else.
    pub highlight_matches: bool,
    /// Seconds between refresh cycles when watching.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight_matches: false,
            poll_interval_secs: 60,
        }
    }
}
