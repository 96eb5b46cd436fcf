//! The Markdown emitter: walks the simplified DOM and produces Markdown blocks.

use crate::html2md::dom::{HtmlElement, HtmlNode};
use crate::html2md::ConversionOptions;

/// Renders a stream of body nodes as Markdown blocks. The caller joins these with blank
/// lines, so every entry must itself be well-formed.
pub(crate) fn blocks(nodes: &[HtmlNode], options: &ConversionOptions) -> Vec<String> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            HtmlNode::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            HtmlNode::Element(el) => block_element(el, options, &mut out),
        }
    }
    out
}

fn block_element(el: &HtmlElement, options: &ConversionOptions, out: &mut Vec<String>) {
    match el.tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = (el.tag.as_bytes()[1] - b'0') as usize;
            out.push(format!("{} {}", "#".repeat(level), inline(&el.children)));
        }
        "p" => {
            let text = inline(&el.children);
            if !text.is_empty() {
                out.push(text);
            }
        }
        "ul" => {
            let lines = list_lines(el, options, false, 1);
            if !lines.is_empty() {
                out.push(lines.join("\n"));
            }
        }
        "ol" => {
            let start = el.attr("start").and_then(|s| s.parse().ok()).unwrap_or(1);
            let lines = list_lines(el, options, true, start);
            if !lines.is_empty() {
                out.push(lines.join("\n"));
            }
        }
        "blockquote" => {
            let inner = blocks(&el.children, options);
            if !inner.is_empty() {
                out.push(quote_lines(&inner.join("\n\n")));
            }
        }
        "pre" => out.push(fenced_from_pre(el)),
        "hr" => out.push("---".to_string()),
        "script" => {
            if let Some(block) = script_block(el, options) {
                out.push(block);
            }
        }
        // the title renders at the top of the document, not where the parser put it
        "style" | "br" | "title" | "meta" | "link" => {}
        // structural containers contribute their children's blocks directly; `head` is one
        // so that content the parser hoisted into it (e.g. a leading script) still renders
        "html" | "head" | "body" | "div" | "section" | "article" | "main" | "header"
        | "footer" | "nav" | "aside" | "figure" => out.extend(blocks(&el.children, options)),
        "strong" | "b" => {
            let text = inline(&el.children);
            if !text.is_empty() {
                out.push(format!("**{text}**"));
            }
        }
        "em" | "i" => {
            let text = inline(&el.children);
            if !text.is_empty() {
                out.push(format!("*{text}*"));
            }
        }
        // anything else renders as its inline content, wrapped as a paragraph
        _ => {
            let text = inline_one(el);
            if !text.is_empty() {
                out.push(text);
            }
        }
    }
}

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "ul"
            | "ol"
            | "blockquote"
            | "pre"
            | "hr"
            | "div"
            | "table"
            | "script"
            | "style"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

fn list_lines(el: &HtmlElement, options: &ConversionOptions, ordered: bool, start: u64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut index = start;
    for child in &el.children {
        let HtmlNode::Element(item) = child else {
            continue; // inter-item whitespace
        };
        if item.tag != "li" {
            continue;
        }
        let marker = if ordered {
            format!("{index}. ")
        } else {
            "* ".to_string()
        };
        let item_lines = list_item_lines(item, options);
        match item_lines.split_first() {
            None => lines.push(marker),
            Some((first, rest)) => {
                lines.push(format!("{marker}{first}"));
                for line in rest {
                    lines.push(format!("  {line}"));
                }
            }
        }
        index += 1;
    }
    lines
}

/// A list item's leading inline run becomes its first line; each block child contributes
/// its own lines, which the caller indents under the marker.
fn list_item_lines(li: &HtmlElement, options: &ConversionOptions) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut run: Vec<&HtmlNode> = Vec::new();

    fn flush(run: &mut Vec<&HtmlNode>, lines: &mut Vec<String>) {
        if run.is_empty() {
            return;
        }
        let text = inline(run.drain(..));
        if !text.is_empty() {
            lines.push(text);
        }
    }

    for child in &li.children {
        match child {
            HtmlNode::Element(el) if is_block_tag(&el.tag) => {
                flush(&mut run, &mut lines);
                let mut inner = Vec::new();
                block_element(el, options, &mut inner);
                for block in inner {
                    lines.extend(block.lines().map(str::to_string));
                }
            }
            other => run.push(other),
        }
    }
    flush(&mut run, &mut lines);
    lines
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "> ".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fenced_from_pre(el: &HtmlElement) -> String {
    let (body, lang) = match el.find("code") {
        Some(code) => (code.text_content(), language_from_class(code.attr("class"))),
        None => (el.text_content(), String::new()),
    };
    let body = body.trim_matches('\n');
    format!("```{lang}\n{body}\n```")
}

fn language_from_class(class: Option<&str>) -> String {
    class
        .into_iter()
        .flat_map(str::split_whitespace)
        .find_map(|token| token.strip_prefix("language-"))
        .unwrap_or("")
        .to_string()
}

fn script_block(el: &HtmlElement, options: &ConversionOptions) -> Option<String> {
    if !options.extract_scripts_as_code_blocks || el.attr("src").is_some() {
        return None;
    }
    let lang = match el.attr("type") {
        None => "",
        Some(kind) => match kind.trim().to_lowercase().as_str() {
            "" | "text/javascript" | "application/javascript" | "module" => "javascript",
            "application/json" | "application/ld+json" => "json",
            _ => "",
        },
    };
    let body = el.text_content();
    let body = body.trim_matches('\n');
    Some(format!("```{lang}\n{body}\n```"))
}

fn inline<'dom>(nodes: impl IntoIterator<Item = &'dom HtmlNode>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for node in nodes {
        match node {
            HtmlNode::Text(text) => {
                if text.trim().is_empty() {
                    // keep word separation across source-formatting whitespace
                    if !parts.is_empty() {
                        parts.push(" ".to_string());
                    }
                } else {
                    parts.push(normalize_text(text));
                }
            }
            HtmlNode::Element(el) => {
                let rendered = inline_one(el);
                if !rendered.is_empty() {
                    parts.push(rendered);
                }
            }
        }
    }
    parts.concat().trim().to_string()
}

fn inline_one(el: &HtmlElement) -> String {
    match el.tag.as_str() {
        "strong" | "b" => wrap(inline(&el.children), "**"),
        "em" | "i" => wrap(inline(&el.children), "*"),
        "code" => format!("`{}`", inline(&el.children)),
        "a" => match el.attr("href") {
            Some(href) => {
                let text = inline(&el.children);
                let title = match el.attr("title") {
                    Some(title) if !title.is_empty() => {
                        format!(" \"{}\"", title.replace('"', "\\\""))
                    }
                    _ => String::new(),
                };
                format!("[{text}]({href}{title})")
            }
            // no href: an anchor, so just its text
            None => inline(&el.children),
        },
        "img" => match el.attr("src") {
            Some(src) => format!("![{}]({src})", el.attr("alt").unwrap_or_default()),
            None => String::new(),
        },
        "br" => "  \n".to_string(),
        "script" | "style" => String::new(),
        _ => inline(&el.children),
    }
}

fn wrap(text: String, marker: &str) -> String {
    if text.is_empty() {
        text
    } else {
        format!("{marker}{text}{marker}")
    }
}

fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html2md::dom::map_document;
    use scraper::Html;

    fn convert_body(html: &str, options: ConversionOptions) -> String {
        let doc = map_document(&Html::parse_document(html));
        blocks(&doc.roots, &options).join("\n\n")
    }

    fn convert_default(html: &str) -> String {
        convert_body(html, ConversionOptions::default())
    }

    #[test]
    fn headings_take_their_level_from_the_tag() {
        assert_eq!(convert_default("<h1>One</h1><h3>Three</h3>"), "# One\n\n### Three");
    }

    #[test]
    fn nested_lists_indent_two_spaces() {
        assert_eq!(
            convert_default(
                "<ul><li>Parent 1<ul><li>Child A</li><li>Child B</li></ul></li><li>Parent 2</li></ul>"
            ),
            "* Parent 1\n  * Child A\n  * Child B\n* Parent 2",
        );
    }

    #[test]
    fn ordered_lists_respect_the_start_attribute() {
        assert_eq!(
            convert_default(r#"<ol start="3"><li>Item 3</li><li>Item 4</li></ol>"#),
            "3. Item 3\n4. Item 4",
        );
    }

    #[test]
    fn blockquotes_prefix_every_line() {
        assert_eq!(
            convert_default("<blockquote><p>Quote text.</p><ul><li>List in quote</li></ul></blockquote>"),
            "> Quote text.\n> \n> * List in quote",
        );
    }

    #[test]
    fn pre_code_keeps_raw_newlines() {
        assert_eq!(
            convert_default("<pre><code>code\nblock</code></pre>"),
            "```\ncode\nblock\n```",
        );
    }

    #[test]
    fn pre_code_language_comes_from_the_class() {
        assert_eq!(
            convert_default(r#"<pre><code class="language-rust">let x = 1;</code></pre>"#),
            "```rust\nlet x = 1;\n```",
        );
    }

    #[test]
    fn scripts_are_dropped_by_default() {
        assert_eq!(convert_default("<script>alert('ignored');</script>"), "");
    }

    #[test]
    fn scripts_extract_as_code_blocks_when_asked() {
        let options = ConversionOptions {
            extract_scripts_as_code_blocks: true,
            ..ConversionOptions::default()
        };
        assert_eq!(
            convert_body("<script>alert('Hello');</script>", options),
            "```\nalert('Hello');\n```",
        );
        assert_eq!(
            convert_body(
                r#"<script type="text/javascript">console.log(1);</script>"#,
                options
            ),
            "```javascript\nconsole.log(1);\n```",
        );
        assert_eq!(
            convert_body(
                r#"<script type="application/ld+json">{"@context":"schema.org"}</script>"#,
                options
            ),
            "```json\n{\"@context\":\"schema.org\"}\n```",
        );
    }

    #[test]
    fn external_scripts_are_never_extracted() {
        let options = ConversionOptions {
            extract_scripts_as_code_blocks: true,
            ..ConversionOptions::default()
        };
        assert_eq!(convert_body(r#"<script src="app.js"></script>"#, options), "");
    }

    #[test]
    fn inline_markup_nests() {
        assert_eq!(
            convert_default("<p>Before <code>some_code()</code> after.</p>"),
            "Before `some_code()` after.",
        );
        assert_eq!(
            convert_default("<strong><code>important_code()</code></strong>"),
            "**`important_code()`**",
        );
    }

    #[test]
    fn links_carry_titles_and_escape_quotes() {
        assert_eq!(
            convert_default(r#"<a href="/path" title="A &quot;double&quot; title">text</a>"#),
            r#"[text](/path "A \"double\" title")"#,
        );
    }

    #[test]
    fn br_is_a_hard_break() {
        assert_eq!(convert_default("<p>line1<br>line2</p>"), "line1  \nline2");
    }
}
