use services::Route;

/// Result of submitting a form screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    /// The request succeeded and the user should be taken to `Route`.
    Navigate(Route),
    /// The request succeeded without navigation.
    Stay,
    /// The request succeeded with a message to show.
    Done(String),
    /// The request failed; carries the user-facing message.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Navigate(_) | SubmitOutcome::Stay | SubmitOutcome::Done(_)
        )
    }
}
