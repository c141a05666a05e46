// Input configuration and remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to hero actions
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// A source drives one action at most; an action may have many sources
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration holding the default bindings
    pub fn with_defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Create a configuration from a list of bindings. Later entries win
    /// when a source appears twice.
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind an input source to an action, replacing its old action
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}
