pub mod document;
pub mod lorem;
pub mod macros;
pub mod parsing;
pub mod processor;
pub mod render;

// Re-export key types for easier usage
pub use document::{Block, BlockId, BlockKind, Document};
pub use lorem::{
    DICTIONARY, FixedLengths, GenerationRequest, LengthSource, LoremError, RandomLengths, Units,
    generate,
};
pub use macros::{
    Attributes, BlockFactory, BlockMacro, LoremMacro, MacroError, MacroRegistry, register_lorem,
};
pub use processor::{ProcessError, Processor};
