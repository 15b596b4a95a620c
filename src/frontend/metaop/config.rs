//! Configuration for deferred-operation resolution

/// How a deferred `__call` resolves the callee's return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallReturns {
    /// Only the first return value; no return value resolves to `NoType`.
    #[default]
    First,
    /// Every return value: a single value resolves to its own type, any other count to a tuple.
    All,
}

/// Settings consumed by [`DeferredChain::resolve_with`](super::DeferredChain::resolve_with) and
/// [`PlaceholderType::resolve_with`](crate::frontend::types::PlaceholderType::resolve_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetaOpConfig {
    /// Return values kept when resolving a deferred call
    pub call_returns: CallReturns,
}

impl MetaOpConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how deferred calls keep their return values
    pub fn with_call_returns(mut self, call_returns: CallReturns) -> Self {
        self.call_returns = call_returns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_first_return() {
        assert_eq!(MetaOpConfig::default().call_returns, CallReturns::First);
        assert_eq!(MetaOpConfig::new(), MetaOpConfig::default());
    }

    #[test]
    fn test_with_call_returns() {
        let config = MetaOpConfig::new().with_call_returns(CallReturns::All);
        assert_eq!(config.call_returns, CallReturns::All);
    }
}
