//! Front matter: a YAML metadata block derived from recognized `<head>` tags.

use crate::html2md::dom::HtmlElement;
use crate::html2md::ConvertError;
use std::collections::BTreeMap;

/// Pulls recognized metadata out of `<head>`: the `<title>`, plus `description`, `author`,
/// and `keywords` meta tags (keywords split on commas into a sequence). Returns `None`
/// when there is nothing to report, so callers can omit the block entirely.
pub(crate) fn collect(head: Option<&HtmlElement>) -> Option<BTreeMap<String, serde_yaml::Value>> {
    let head = head?;
    let mut map = BTreeMap::new();

    if let Some(title) = head.find("title") {
        let text = title.text_content().trim().to_string();
        if !text.is_empty() {
            map.insert("title".to_string(), serde_yaml::Value::String(text));
        }
    }

    let mut keywords: Vec<serde_yaml::Value> = Vec::new();
    for meta in head.find_all("meta") {
        let (Some(name), Some(content)) = (meta.attr("name"), meta.attr("content")) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        match name.to_lowercase().as_str() {
            "description" => {
                map.insert(
                    "description".to_string(),
                    serde_yaml::Value::String(content.to_string()),
                );
            }
            "author" => {
                map.insert(
                    "author".to_string(),
                    serde_yaml::Value::String(content.to_string()),
                );
            }
            "keywords" => content
                .split(',')
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .for_each(|keyword| {
                    keywords.push(serde_yaml::Value::String(keyword.to_string()));
                }),
            _ => {}
        }
    }
    if !keywords.is_empty() {
        map.insert("keywords".to_string(), serde_yaml::Value::Sequence(keywords));
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Renders collected metadata as a `---`-delimited block, followed by a blank line.
pub(crate) fn render(map: &BTreeMap<String, serde_yaml::Value>) -> Result<String, ConvertError> {
    let mut mapping = serde_yaml::Mapping::new();
    for (key, value) in map {
        mapping.insert(serde_yaml::Value::String(key.clone()), value.clone());
    }
    let yaml = serde_yaml::to_string(&serde_yaml::Value::Mapping(mapping))
        .map_err(|e| ConvertError::FrontMatter(e.to_string()))?;
    // serde_yaml doesn't emit document markers for a bare mapping, but normalize anyway
    let content = yaml
        .trim_start_matches("---\n")
        .trim_end_matches('\n')
        .trim_end_matches("...");
    Ok(format!("---\n{}\n---\n\n", content.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html2md::dom::map_document;
    use scraper::Html;

    fn head_of(html: &str) -> Option<HtmlElement> {
        map_document(&Html::parse_document(html)).head
    }

    #[test]
    fn empty_head_collects_nothing() {
        let head = head_of("<html><head></head><body></body></html>");
        assert_eq!(collect(head.as_ref()), None);
    }

    #[test]
    fn unrecognized_meta_tags_are_ignored() {
        let head = head_of(
            r#"<html><head><meta name="viewport" content="width=device-width"></head><body></body></html>"#,
        );
        assert_eq!(collect(head.as_ref()), None);
    }

    #[test]
    fn keywords_split_on_commas_and_trim() {
        let head = head_of(
            r#"<html><head><meta name="keywords" content="rust, web,  html "></head><body></body></html>"#,
        );
        let map = collect(head.as_ref()).unwrap();
        let rendered = render(&map).unwrap();
        assert_eq!(rendered, "---\nkeywords:\n- rust\n- web\n- html\n---\n\n");
    }

    #[test]
    fn keys_render_in_sorted_order() {
        let head = head_of(
            r#"<html><head><title>T</title><meta name="author" content="A"><meta name="description" content="D"></head><body></body></html>"#,
        );
        let map = collect(head.as_ref()).unwrap();
        let rendered = render(&map).unwrap();
        assert_eq!(rendered, "---\nauthor: A\ndescription: D\ntitle: T\n---\n\n");
    }
}
