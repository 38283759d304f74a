use crate::document::{BlockKind, Document};
use crate::macros::{MacroError, MacroRegistry};
use crate::parsing::{SourceBlock, parse_lines};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Block macro '{name}' failed on line {line}: {source}")]
    Macro {
        line: usize,
        name: String,
        source: MacroError,
    },
}

/// Expands block macros while building a [`Document`] from source text.
#[derive(Debug)]
pub struct Processor {
    registry: MacroRegistry,
}

impl Processor {
    pub fn new(registry: MacroRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MacroRegistry {
        &self.registry
    }

    /// Build a document from `source`.
    ///
    /// Invocations of unregistered macros are kept verbatim as paragraphs.
    pub fn process(&mut self, source: &str) -> Result<Document, ProcessError> {
        let mut doc = Document::new();
        let root = doc.root();

        for block in parse_lines(source) {
            match block {
                SourceBlock::Paragraph { text, .. } => {
                    doc.append(root, BlockKind::Paragraph, text);
                }
                SourceBlock::Macro {
                    line,
                    name,
                    target,
                    attrs,
                    raw,
                } => match self.registry.get_mut(&name) {
                    Some(handler) => {
                        log::debug!("Expanding block macro '{name}' on line {line}");
                        handler
                            .process(&mut doc, root, &target, &attrs)
                            .map_err(|source| ProcessError::Macro { line, name, source })?;
                    }
                    None => {
                        log::warn!("Unknown block macro '{name}' on line {line}, keeping as text");
                        doc.append(root, BlockKind::Paragraph, raw);
                    }
                },
            }
        }

        Ok(doc)
    }
}
