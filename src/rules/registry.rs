//! Rule registration.

use super::rule::LintRule;

/// An ordered collection of lint rules.
///
/// Registration order is preserved and carries through composition, so two
/// runs over the same registry produce diagnostics in the same order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::builtin::TagDescription));
        registry.register(Box::new(super::builtin::TagsAlphabetical));
        registry.register(Box::new(super::builtin::ServerNotExample));
        registry.register(Box::new(super::builtin::ServerTrailingSlash));
        registry.register(Box::new(super::builtin::ExampleValueOrExternalValue));
        registry
    }

    /// Add a rule. Re-registering an id replaces the earlier rule in place,
    /// keeping its position.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        let id = rule.id();
        match self.rules.iter().position(|r| r.id() == id) {
            Some(pos) => self.rules[pos] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Look up a rule by id.
    pub fn get(&self, id: &str) -> Option<&dyn LintRule> {
        self.rules
            .iter()
            .find(|r| r.id().as_str() == id)
            .map(|r| r.as_ref())
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
