//! # Block Macros
//!
//! A block macro is a named directive such as `lorem::sentences[num=2]` that
//! the processor expands into a structural block.
//!
//! ## Modules
//!
//! - **`lorem`**: `LoremMacro`, the placeholder text adapter
//!
//! ## Seams
//!
//! - [`BlockFactory`]: host-side creation of block nodes
//! - [`BlockMacro`]: a handler, identified by [`BlockMacro::name`]
//! - [`MacroRegistry`]: name to handler lookup used during processing

pub mod lorem;

use std::collections::{BTreeMap, HashMap};

use crate::document::{BlockId, BlockKind};
use crate::lorem::LoremError;

pub use lorem::{LoremMacro, register_lorem};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    #[error(transparent)]
    Lorem(#[from] LoremError),
}

/// Host operation materializing a block node under `parent`.
pub trait BlockFactory {
    fn create_block(&mut self, parent: BlockId, kind: BlockKind, content: String) -> BlockId;
}

/// Handler for one block macro name.
pub trait BlockMacro {
    fn name(&self) -> &str;

    /// Expand an invocation into a block created through `factory`.
    fn process(
        &mut self,
        factory: &mut dyn BlockFactory,
        parent: BlockId,
        target: &str,
        attrs: &Attributes,
    ) -> Result<BlockId, MacroError>;
}

/// Key/value parameters of a macro invocation.
///
/// Positional attributes are keyed by their 1-based position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Default)]
pub struct MacroRegistry {
    macros: HashMap<String, Box<dyn BlockMacro>>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own name, replacing any previous one.
    pub fn register(&mut self, handler: Box<dyn BlockMacro>) {
        let name = handler.name().to_string();
        if self.macros.insert(name.clone(), handler).is_some() {
            log::debug!("Replaced block macro '{name}'");
        } else {
            log::debug!("Registered block macro '{name}'");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn BlockMacro + 'static)> {
        self.macros.get_mut(name).map(|handler| handler.as_mut())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("macros", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    struct Echo(&'static str);

    impl BlockMacro for Echo {
        fn name(&self) -> &str {
            self.0
        }

        fn process(
            &mut self,
            factory: &mut dyn BlockFactory,
            parent: BlockId,
            target: &str,
            _attrs: &Attributes,
        ) -> Result<BlockId, MacroError> {
            Ok(factory.create_block(parent, BlockKind::Paragraph, format!("{}:{target}", self.0)))
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let mut registry = MacroRegistry::new();
        registry.register(Box::new(Echo("echo")));
        assert!(registry.contains("echo"));
        assert!(!registry.contains("lorem"));

        let mut doc = Document::new();
        let root = doc.root();
        let handler = registry.get_mut("echo").unwrap();
        let id = handler
            .process(&mut doc, root, "hi", &Attributes::new())
            .unwrap();
        assert_eq!(doc.block(id).content, "echo:hi");
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = MacroRegistry::new();
        registry.register(Box::new(Echo("echo")));
        registry.register(Box::new(Echo("echo")));
        registry.register(Box::new(Echo("alpha")));
        assert_eq!(registry.names(), vec!["alpha", "echo"]);
    }

    #[test]
    fn test_attributes_lookup() {
        let attrs: Attributes = [("num", "2"), ("1", "first")].into_iter().collect();
        assert_eq!(attrs.get("num"), Some("2"));
        assert_eq!(attrs.get("missing"), None);
        assert_eq!(attrs.len(), 2);
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["1", "num"]);
    }
}
