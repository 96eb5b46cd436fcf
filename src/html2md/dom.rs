//! A simplified DOM: scraper's tree, flattened to just the nodes the writer cares about.
//! Comments, doctypes, and processing instructions disappear here.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum HtmlNode {
    Text(String),
    Element(HtmlElement),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HtmlElement {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Depth-first search for the first descendant with the given tag name.
    pub fn find(&self, tag: &str) -> Option<&HtmlElement> {
        for child in &self.children {
            if let HtmlNode::Element(el) = child {
                if el.tag == tag {
                    return Some(el);
                }
                if let Some(found) = el.find(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Depth-first collection of every descendant with the given tag name.
    pub fn find_all<'el>(&'el self, tag: &str) -> Vec<&'el HtmlElement> {
        let mut results = Vec::new();
        for child in &self.children {
            if let HtmlNode::Element(el) = child {
                if el.tag == tag {
                    results.push(el);
                }
                results.extend(el.find_all(tag));
            }
        }
        results
    }

    /// Concatenated text of every descendant text node, unnormalized.
    pub fn text_content(&self) -> String {
        fn collect(nodes: &[HtmlNode], out: &mut String) {
            for node in nodes {
                match node {
                    HtmlNode::Text(text) => out.push_str(text),
                    HtmlNode::Element(el) => collect(&el.children, out),
                }
            }
        }
        let mut out = String::new();
        collect(&self.children, &mut out);
        out
    }
}

/// A whole parsed document, split the way the converter consumes it.
///
/// `roots` holds the full tree (html5ever always synthesizes `<html><head><body>`, even
/// for fragments); the writer walks all of it, so content the parser hoists into `<head>`
/// is still reachable. `head` is kept separately for metadata extraction.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DomDoc {
    pub head: Option<HtmlElement>,
    pub roots: Vec<HtmlNode>,
}

impl DomDoc {
    /// The trimmed `<head><title>` text, if there is one.
    pub fn title(&self) -> Option<String> {
        let title = self.head.as_ref()?.find("title")?;
        let text = title.text_content().trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub(crate) fn map_document(html: &Html) -> DomDoc {
    let head = select_one(html, "head").map(map_element);
    let roots = map_node_children(html.tree.root());
    DomDoc { head, roots }
}

fn select_one<'html>(html: &'html Html, selector: &str) -> Option<ElementRef<'html>> {
    let selector = Selector::parse(selector).expect("internal error");
    html.select(&selector).next()
}

fn map_element(el: ElementRef) -> HtmlElement {
    let element = el.value();
    HtmlElement {
        tag: element.name().to_lowercase(),
        attrs: element
            .attrs()
            .map(|(name, value)| (name.to_lowercase(), value.to_string()))
            .collect(),
        children: map_node_children(*el),
    }
}

fn map_node_children(node: NodeRef<Node>) -> Vec<HtmlNode> {
    node.children().filter_map(map_node).collect()
}

fn map_node(node: NodeRef<Node>) -> Option<HtmlNode> {
    match node.value() {
        Node::Text(text) => Some(HtmlNode::Text(text.text.to_string())),
        Node::Element(element) => Some(HtmlNode::Element(HtmlElement {
            tag: element.name().to_lowercase(),
            attrs: element
                .attrs()
                .map(|(name, value)| (name.to_lowercase(), value.to_string()))
                .collect(),
            children: map_node_children(node),
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> DomDoc {
        map_document(&Html::parse_document(html))
    }

    fn root_element(doc: &DomDoc) -> &HtmlElement {
        doc.roots
            .iter()
            .find_map(|node| match node {
                HtmlNode::Element(el) => Some(el),
                HtmlNode::Text(_) => None,
            })
            .expect("document always has an html element")
    }

    #[test]
    fn fragments_get_a_synthesized_tree() {
        let doc = parse("<p>Hello</p>");
        let p = root_element(&doc).find("p").unwrap();
        assert_eq!(p.text_content(), "Hello");
    }

    #[test]
    fn title_comes_from_the_head() {
        let doc = parse("<html><head><title> Hi </title></head><body><p>x</p></body></html>");
        assert_eq!(doc.title(), Some("Hi".to_string()));
    }

    #[test]
    fn missing_or_empty_title_is_none() {
        assert_eq!(parse("<p>x</p>").title(), None);
        assert_eq!(
            parse("<html><head><title>  </title></head><body></body></html>").title(),
            None
        );
    }

    #[test]
    fn unclosed_tags_still_produce_a_tree() {
        let doc = parse("<h1>Hello World");
        let h1 = root_element(&doc).find("h1").unwrap();
        assert_eq!(h1.text_content(), "Hello World");
    }

    #[test]
    fn comments_are_dropped() {
        let doc = parse("<p>a<!-- hidden -->b</p>");
        let p = root_element(&doc).find("p").unwrap();
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.text_content(), "ab");
    }

    #[test]
    fn attrs_are_lowercased_by_name() {
        let doc = parse(r#"<a HREF="/x" Title="t">y</a>"#);
        let a = root_element(&doc).find("a").unwrap();
        assert_eq!(a.attr("href"), Some("/x"));
        assert_eq!(a.attr("title"), Some("t"));
    }
}
