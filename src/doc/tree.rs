use markdown::mdast;

/// The kind of a [`Block`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    CodeBlock,
    List,
    ListItem,
    BlockQuote,
    Table,
    Html,
    ThematicBreak,
}

/// A single node of a parsed Markdown document.
///
/// `raw_text` is the literal source slice for the block, and is what the evaluator hands
/// back for a matched node. Container kinds (lists, list items, block quotes) carry their
/// inner blocks in `children`; leaf kinds have none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Heading depth (1-6); `None` for every other kind.
    pub level: Option<u8>,
    pub raw_text: String,
    pub children: Vec<Block>,
}

impl Block {
    fn leaf(kind: BlockKind, raw_text: String) -> Self {
        Self {
            kind,
            level: None,
            raw_text,
            children: Vec::new(),
        }
    }
}

/// A plain-text document: an ordered list of lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDoc {
    pub lines: Vec<String>,
}

impl TextDoc {
    /// Splits input on line boundaries. Empty input yields zero lines.
    pub fn read(input: &str) -> Self {
        Self {
            lines: input.lines().map(str::to_string).collect(),
        }
    }
}

/// A parsed Markdown document: an ordered tree of [`Block`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MdDoc {
    pub roots: Vec<Block>,
}

impl MdDoc {
    /// Parses Markdown into a block tree. This cannot fail: `to_mdast` only errors with MDX
    /// extensions enabled, which `gfm()` leaves off; if it errors anyway, the whole input
    /// becomes one paragraph block.
    pub fn read(input: &str) -> Self {
        match markdown::to_mdast(input, &markdown::ParseOptions::gfm()) {
            Ok(mdast::Node::Root(root)) => Self {
                roots: blocks_from_mdast(input, root.children),
            },
            Ok(other) => Self {
                roots: blocks_from_mdast(input, vec![other]),
            },
            Err(_) => Self {
                roots: vec![Block::leaf(BlockKind::Paragraph, input.to_string())],
            },
        }
    }

    /// Pre-order traversal of every block. Traversal order equals source order.
    pub fn walk(&self) -> Vec<&Block> {
        fn push<'md>(out: &mut Vec<&'md Block>, block: &'md Block) {
            out.push(block);
            for child in &block.children {
                push(out, child);
            }
        }
        let mut out = Vec::new();
        for root in &self.roots {
            push(&mut out, root);
        }
        out
    }
}

fn blocks_from_mdast(source: &str, nodes: Vec<mdast::Node>) -> Vec<Block> {
    nodes
        .into_iter()
        .map(|node| block_from_mdast(source, node))
        .collect()
}

fn block_from_mdast(source: &str, node: mdast::Node) -> Block {
    let raw_text = raw_text_of(source, &node);
    match node {
        mdast::Node::Heading(heading) => Block {
            kind: BlockKind::Heading,
            level: Some(heading.depth),
            raw_text,
            children: Vec::new(),
        },
        mdast::Node::Paragraph(_) => Block::leaf(BlockKind::Paragraph, raw_text),
        mdast::Node::Code(_) => Block::leaf(BlockKind::CodeBlock, raw_text),
        mdast::Node::List(list) => Block {
            kind: BlockKind::List,
            level: None,
            raw_text,
            children: blocks_from_mdast(source, list.children),
        },
        mdast::Node::ListItem(item) => Block {
            kind: BlockKind::ListItem,
            level: None,
            raw_text,
            children: blocks_from_mdast(source, item.children),
        },
        mdast::Node::Blockquote(quote) => Block {
            kind: BlockKind::BlockQuote,
            level: None,
            raw_text,
            children: blocks_from_mdast(source, quote.children),
        },
        mdast::Node::Table(_) => Block::leaf(BlockKind::Table, raw_text),
        mdast::Node::Html(_) => Block::leaf(BlockKind::Html, raw_text),
        mdast::Node::ThematicBreak(_) => Block::leaf(BlockKind::ThematicBreak, raw_text),
        // Everything else the parser can produce at block level (definitions, footnote
        // definitions, math) stays addressable as a paragraph.
        _ => Block::leaf(BlockKind::Paragraph, raw_text),
    }
}

fn raw_text_of(source: &str, node: &mdast::Node) -> String {
    match node.position() {
        Some(position) => source
            .get(position.start.offset..position.end.offset)
            .unwrap_or("")
            .to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn text_doc_splits_lines_in_order() {
        let doc = TextDoc::read("alpha\nbravo\ncharlie");
        assert_eq!(doc.lines, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn empty_text_doc_has_zero_lines() {
        assert_eq!(TextDoc::read("").lines.len(), 0);
    }

    #[test]
    fn heading_level_equals_marker_count() {
        let doc = MdDoc::read("# one\n\n## two\n\n### three");
        let levels: Vec<Option<u8>> = doc.roots.iter().map(|b| b.level).collect();
        assert_eq!(levels, vec![Some(1), Some(2), Some(3)]);
        assert!(doc.roots.iter().all(|b| b.kind == BlockKind::Heading));
    }

    #[test]
    fn heading_raw_text_is_the_source_slice() {
        let doc = MdDoc::read("# Header\n\nSome text\n\n## Subheader");
        assert_eq!(doc.roots[0].raw_text, "# Header");
        assert_eq!(doc.roots[1].raw_text, "Some text");
        assert_eq!(doc.roots[2].raw_text, "## Subheader");
    }

    #[test]
    fn malformed_heading_markers_become_paragraphs() {
        // seven markers is past the heading limit; no space after the marker isn't a heading
        let doc = MdDoc::read("####### not a heading\n\n#also not");
        assert_eq!(doc.roots.len(), 2);
        assert!(doc.roots.iter().all(|b| b.kind == BlockKind::Paragraph));
    }

    #[test]
    fn empty_markdown_input_is_an_empty_document() {
        assert_eq!(MdDoc::read("").roots.len(), 0);
    }

    #[test]
    fn lists_nest_items_as_children() {
        let doc = MdDoc::read(indoc! {r"
            - apple
            - banana
        "});
        assert_eq!(doc.roots.len(), 1);
        let list = &doc.roots[0];
        assert_eq!(list.kind, BlockKind::List);
        assert_eq!(list.children.len(), 2);
        assert!(list.children.iter().all(|b| b.kind == BlockKind::ListItem));
    }

    #[test]
    fn walk_is_preorder_in_source_order() {
        let doc = MdDoc::read(indoc! {r"
            # title

            - item

            last
        "});
        let kinds: Vec<BlockKind> = doc.walk().into_iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading,
                BlockKind::List,
                BlockKind::ListItem,
                BlockKind::Paragraph, // the item's inner paragraph
                BlockKind::Paragraph,
            ]
        );
    }

    #[test]
    fn code_blocks_keep_their_fences() {
        let doc = MdDoc::read("```rust\nfn main() {}\n```");
        assert_eq!(doc.roots[0].kind, BlockKind::CodeBlock);
        assert_eq!(doc.roots[0].raw_text, "```rust\nfn main() {}\n```");
    }
}
