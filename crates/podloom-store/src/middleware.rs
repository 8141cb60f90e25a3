use crate::actions::Action;
use crate::state::StoreState;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Returns `true` to continue the chain, `false` to consume the action.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current store state (read-only snapshot)
    fn handle(&mut self, action: &Action, state: &StoreState) -> bool;
}

/// Logs every dispatched action at debug level
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &StoreState) -> bool {
        match action {
            Action::SetError { key, message } => {
                log::warn!("Action: SetError [{}] {}", key, message)
            }
            Action::SetEpisodes { key, items, page, .. }
            | Action::AppendEpisodes { key, items, page, .. } => {
                log::debug!(
                    "Action: {} {} page {} ({} items)",
                    action.name(),
                    key,
                    page,
                    items.len()
                )
            }
            _ => log::debug!("Action: {}", action.name()),
        }
        true
    }
}
