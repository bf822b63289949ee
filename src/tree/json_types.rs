//! JSON serialization types for size tree output

use std::path::PathBuf;

use serde::Serialize;

/// Node of the rendered size tree, for JSON output.
///
/// Contains only entries that passed the threshold.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SizeNode {
    File {
        name: String,
        path: PathBuf,
        size_bytes: u64,
        size_human: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        percent: Option<f64>,
    },
    Dir {
        name: String,
        path: PathBuf,
        size_bytes: u64,
        size_human: String,
        /// Share of the parent directory; absent for the root.
        #[serde(skip_serializing_if = "Option::is_none")]
        percent: Option<f64>,
        children: Vec<SizeNode>,
    },
}

impl SizeNode {
    pub fn name(&self) -> &str {
        match self {
            SizeNode::File { name, .. } => name,
            SizeNode::Dir { name, .. } => name,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        match self {
            SizeNode::File { size_bytes, .. } => *size_bytes,
            SizeNode::Dir { size_bytes, .. } => *size_bytes,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, SizeNode::Dir { .. })
    }

    pub fn children(&self) -> &[SizeNode] {
        match self {
            SizeNode::File { .. } => &[],
            SizeNode::Dir { children, .. } => children,
        }
    }

    /// Append a child. Files have no children, so this is a no-op on them.
    pub(crate) fn push_child(&mut self, child: SizeNode) {
        if let SizeNode::Dir { children, .. } = self {
            children.push(child);
        }
    }
}
