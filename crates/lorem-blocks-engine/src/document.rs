use crate::macros::BlockFactory;

/// Index of a block inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

/// The kind of a block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// The document root, parent of all top-level blocks.
    Document,
    /// A paragraph of inline text.
    Paragraph,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Document => "document",
            BlockKind::Paragraph => "paragraph",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub content: String,
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
}

/// Block tree stored as an arena. The root is always present at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block {
                kind: BlockKind::Document,
                content: String::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> BlockId {
        BlockId(0)
    }

    /// Look up a block. Ids are only handed out by this document, so any
    /// id it produced is valid.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    pub fn children(&self, id: BlockId) -> impl Iterator<Item = &Block> {
        self.block(id).children.iter().map(|child| self.block(*child))
    }

    /// Append a block as the last child of `parent`.
    pub fn append(&mut self, parent: BlockId, kind: BlockKind, content: String) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block {
            kind,
            content,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.blocks[parent.0].children.push(id);
        id
    }

    /// Number of blocks, including the root.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when nothing has been added under the root.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockFactory for Document {
    fn create_block(&mut self, parent: BlockId, kind: BlockKind, content: String) -> BlockId {
        self.append(parent, kind, content)
    }
}
