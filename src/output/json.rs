//! JSON output formatting

use std::io::Write;

use crate::error::Result;
use crate::tree::{RenderedNode, SizeNode, SizeOutput};

use super::utils::format_size;

/// Collects walker output into an in-memory [`SizeNode`] tree.
///
/// The walker reports nodes depth-first, so a stack indexed by depth is enough
/// to rebuild parent/child links.
#[derive(Debug, Default)]
pub struct JsonBuilder {
    stack: Vec<SizeNode>,
    root: Option<SizeNode>,
}

impl JsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected tree, or `None` if the root itself was pruned.
    pub fn into_tree(mut self) -> Option<SizeNode> {
        self.collapse_to(0);
        self.root
    }

    /// Pop finished nodes into their parents until `depth` nodes remain.
    fn collapse_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(node) = self.stack.pop() else {
                break;
            };
            match self.stack.last_mut() {
                Some(parent) => parent.push_child(node),
                None => self.root = Some(node),
            }
        }
    }
}

impl SizeOutput for JsonBuilder {
    fn output_node(&mut self, node: &RenderedNode<'_>) -> std::io::Result<()> {
        self.collapse_to(node.depth);

        let name = node.name.to_string();
        let path = node.path.to_path_buf();
        let size_human = format_size(node.size).trim().to_string();
        let built = if node.is_dir {
            SizeNode::Dir {
                name,
                path,
                size_bytes: node.size,
                size_human,
                percent: node.percent,
                children: Vec::new(),
            }
        } else {
            SizeNode::File {
                name,
                path,
                size_bytes: node.size,
                size_human,
                percent: node.percent,
            }
        };
        self.stack.push(built);
        Ok(())
    }

    fn output_connector(&mut self, _prefix: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Write the tree as pretty-printed JSON (`null` when there is no tree).
pub fn write_json<W: Write>(out: &mut W, tree: Option<&SizeNode>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &tree)?;
    writeln!(out)?;
    Ok(())
}

/// Print the tree as pretty-printed JSON to stdout.
pub fn print_json(tree: Option<&SizeNode>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_json(&mut lock, tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::test_utils::MemFileSystem;
    use crate::tree::{ScanConfig, SizeThreshold, SizeTreeWalker};

    fn build(fs: MemFileSystem, threshold: u64, max_depth: Option<usize>) -> Option<SizeNode> {
        let config = ScanConfig::new(SizeThreshold::from_bytes(threshold), max_depth);
        let walker = SizeTreeWalker::with_filesystem(config, fs);
        let mut builder = JsonBuilder::new();
        walker.walk(Path::new("root"), &mut builder).unwrap();
        builder.into_tree()
    }

    #[test]
    fn test_builds_nested_tree() {
        let fs = MemFileSystem::new()
            .file("root/a/deep/x.bin", 600)
            .file("root/a/y.bin", 200)
            .file("root/b.bin", 200);
        let tree = build(fs, 0, None).unwrap();

        assert_eq!(tree.name(), "root");
        assert_eq!(tree.size_bytes(), 1000);
        let names: Vec<&str> = tree.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["a", "b.bin"]);

        let a = &tree.children()[0];
        assert!(a.is_dir());
        assert_eq!(a.size_bytes(), 800);
        let a_names: Vec<&str> = a.children().iter().map(|c| c.name()).collect();
        assert_eq!(a_names, vec!["deep", "y.bin"]);
        assert_eq!(a.children()[0].children()[0].name(), "x.bin");
    }

    #[test]
    fn test_pruned_root_is_none() {
        let fs = MemFileSystem::new().file("root/a.bin", 10);
        assert!(build(fs, 10, None).is_none());
    }

    #[test]
    fn test_json_shape() {
        let fs = MemFileSystem::new()
            .file("root/a.bin", 3072)
            .file("root/b.bin", 1024);
        let tree = build(fs, 0, None);

        let mut out = Vec::new();
        write_json(&mut out, tree.as_ref()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["type"], "dir");
        assert_eq!(value["size_bytes"], 4096);
        assert_eq!(value["size_human"], "4.0KB");
        assert!(value.get("percent").is_none());
        assert_eq!(value["children"][0]["type"], "file");
        assert_eq!(value["children"][0]["name"], "a.bin");
        assert_eq!(value["children"][0]["percent"], 75.0);
        assert_eq!(value["children"][1]["percent"], 25.0);
    }

    #[test]
    fn test_null_when_empty() {
        let mut out = Vec::new();
        write_json(&mut out, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "null\n");
    }
}
