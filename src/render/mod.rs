//! Markdown document renderers.
//!
//! Documents are assembled append-only from text blocks and joined with
//! a blank line. Author-supplied text is embedded verbatim.

pub mod issue;
pub mod review;
pub mod snippet;

pub use issue::render_issue;
pub use review::render_review;
pub use snippet::{Snippet, load_snippets};

/// Separator placed between consecutive blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Ordered list of markdown blocks.
#[derive(Debug, Default)]
pub struct Document {
    blocks: Vec<String>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            blocks: vec![title.into()],
        }
    }

    pub fn push(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    /// Join all blocks, with no further normalisation.
    pub fn finish(self) -> String {
        self.blocks.join(BLOCK_SEPARATOR)
    }
}
