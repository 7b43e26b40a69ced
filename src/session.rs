use crate::store::RouteStore;

/// Mutable state of one interactive session, threaded through every
/// command handler.
///
/// The session contains:
/// - `store`: the in-memory list of routes for the session's lifetime.
/// - `should_exit`: a flag that a REPL loop can check to know when to terminate.
///
/// Note: fields are public for simplicity to keep the teaching example small.
/// Production code would prefer accessor methods over public fields.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The route list commands read and mutate.
    pub store: RouteStore,
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
}

impl Session {
    /// Create a session with an empty route list.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::session::Session;

    #[test]
    fn test_new_session_is_empty_and_running() {
        let session = Session::new();
        assert!(session.store.is_empty());
        assert!(!session.should_exit);
    }
}
