//! Atlassian Document Format to markdown conversion.
//!
//! Covers the node and mark types Jira emits for issue descriptions and
//! comments. Unknown block nodes render their children; attachments
//! (`media*`) are dropped since their content is not part of the document.

use serde_json::Value;

/// Converts a structured rich-text document into markdown.
pub trait RichTextConverter: Send + Sync {
    fn convert(&self, document: &Value) -> String;
}

/// [`RichTextConverter`] for Atlassian Document Format.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdfMarkdown;

impl RichTextConverter for AdfMarkdown {
    fn convert(&self, document: &Value) -> String {
        render_block(document).trim_end().to_string()
    }
}

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or_default()
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn attr<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get("attrs")?.get(key)
}

fn attr_str<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    attr(node, key).and_then(Value::as_str)
}

fn render_blocks(nodes: &[Value]) -> String {
    nodes
        .iter()
        .map(render_block)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(node: &Value) -> String {
    match node_type(node) {
        "paragraph" => render_inline(children(node)),
        "heading" => {
            let level = attr(node, "level").and_then(Value::as_u64).unwrap_or(1).clamp(1, 6);
            format!("{} {}", "#".repeat(level as usize), render_inline(children(node)))
        }
        "bulletList" => render_list(node, None),
        "orderedList" => {
            let start = attr(node, "order").and_then(Value::as_u64).unwrap_or(1);
            render_list(node, Some(start))
        }
        "codeBlock" => {
            let language = attr_str(node, "language").unwrap_or_default();
            format!("```{language}\n{}\n```", plain_text(children(node)))
        }
        "blockquote" => quote(&render_blocks(children(node))),
        "rule" => "---".to_string(),
        "table" => render_table(node),
        "media" | "mediaSingle" | "mediaGroup" => String::new(),
        "text" | "hardBreak" | "mention" | "emoji" | "inlineCard" | "status" => {
            render_inline(std::slice::from_ref(node))
        }
        _ => render_blocks(children(node)),
    }
}

fn render_inline(nodes: &[Value]) -> String {
    nodes.iter().map(render_inline_node).collect()
}

fn render_inline_node(node: &Value) -> String {
    match node_type(node) {
        "text" => {
            let text = node.get("text").and_then(Value::as_str).unwrap_or_default();
            apply_marks(text, node.get("marks").and_then(Value::as_array))
        }
        "hardBreak" => "\n".to_string(),
        "mention" => attr_str(node, "text")
            .map(str::to_string)
            .or_else(|| attr_str(node, "id").map(|id| format!("@{id}")))
            .unwrap_or_default(),
        "emoji" => attr_str(node, "text")
            .or_else(|| attr_str(node, "shortName"))
            .unwrap_or_default()
            .to_string(),
        "inlineCard" => attr_str(node, "url").unwrap_or_default().to_string(),
        "status" => attr_str(node, "text")
            .map(|text| format!("[{text}]"))
            .unwrap_or_default(),
        _ => render_inline(children(node)),
    }
}

fn apply_marks(text: &str, marks: Option<&Vec<Value>>) -> String {
    let mut out = text.to_string();
    for mark in marks.into_iter().flatten() {
        out = match node_type(mark) {
            "code" => format!("`{out}`"),
            "strong" => format!("**{out}**"),
            "em" => format!("*{out}*"),
            "strike" => format!("~~{out}~~"),
            "link" => match attr_str(mark, "href") {
                Some(href) => format!("[{out}]({href})"),
                None => out,
            },
            _ => out,
        };
    }
    out
}

fn plain_text(nodes: &[Value]) -> String {
    nodes
        .iter()
        .map(|node| match node.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => plain_text(children(node)),
        })
        .collect()
}

/// Bullet (`start == None`) or numbered list; nested content is indented
/// under its marker.
fn render_list(node: &Value, start: Option<u64>) -> String {
    children(node)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = match start {
                Some(n) => format!("{}. ", n.saturating_add(i as u64)),
                None => "- ".to_string(),
            };
            let indent = " ".repeat(marker.len());
            let body = render_blocks(children(item));
            let mut lines = body.lines();
            let mut out = format!("{marker}{}", lines.next().unwrap_or_default());
            for line in lines {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(&indent);
                    out.push_str(line);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(node: &Value) -> String {
    let rows: Vec<Vec<String>> = children(node)
        .iter()
        .map(|row| {
            children(row)
                .iter()
                .map(|cell| render_blocks(children(cell)).replace('\n', " "))
                .collect()
        })
        .collect();

    let mut out = Vec::with_capacity(rows.len() + 1);
    for (i, cells) in rows.iter().enumerate() {
        out.push(format!("| {} |", cells.join(" | ")));
        if i == 0 {
            out.push(format!("|{}", " --- |".repeat(cells.len())));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(content: Value) -> Value {
        json!({ "type": "doc", "version": 1, "content": content })
    }

    fn text(t: &str) -> Value {
        json!({ "type": "text", "text": t })
    }

    fn para(content: Value) -> Value {
        json!({ "type": "paragraph", "content": content })
    }

    fn convert(v: Value) -> String {
        AdfMarkdown.convert(&v)
    }

    #[test]
    fn empty_document() {
        assert_eq!(convert(doc(json!([]))), "");
    }

    #[test]
    fn paragraphs_with_marks() {
        let input = doc(json!([
            para(json!([
                text("Use "),
                { "type": "text", "text": "unwrap_or", "marks": [{ "type": "code" }] },
                text(" and "),
                { "type": "text", "text": "docs", "marks": [{ "type": "link", "attrs": { "href": "https://docs.rs" } }] },
                { "type": "hardBreak" },
                { "type": "text", "text": "bold", "marks": [{ "type": "strong" }, { "type": "em" }] }
            ])),
            para(json!([text("Second.")]))
        ]));
        assert_eq!(
            convert(input),
            "Use `unwrap_or` and [docs](https://docs.rs)\n***bold***\n\nSecond."
        );
    }

    #[test]
    fn headings_and_rule() {
        let input = doc(json!([
            { "type": "heading", "attrs": { "level": 2 }, "content": [text("Steps")] },
            { "type": "rule" }
        ]));
        assert_eq!(convert(input), "## Steps\n\n---");
    }

    #[test]
    fn nested_lists() {
        let input = doc(json!([{
            "type": "bulletList",
            "content": [
                { "type": "listItem", "content": [para(json!([text("one")]))] },
                { "type": "listItem", "content": [
                    para(json!([text("two")])),
                    { "type": "orderedList", "attrs": { "order": 3 }, "content": [
                        { "type": "listItem", "content": [para(json!([text("a")]))] },
                        { "type": "listItem", "content": [para(json!([text("b")]))] }
                    ]}
                ]}
            ]
        }]));
        assert_eq!(convert(input), "- one\n- two\n\n  3. a\n  4. b");
    }

    #[test]
    fn ordered_list_numbering_saturates() {
        let input = doc(json!([{
            "type": "orderedList",
            "attrs": { "order": u64::MAX },
            "content": [
                { "type": "listItem", "content": [para(json!([text("a")]))] },
                { "type": "listItem", "content": [para(json!([text("b")]))] }
            ]
        }]));
        assert_eq!(
            convert(input),
            format!("{max}. a\n{max}. b", max = u64::MAX)
        );
    }

    #[test]
    fn code_block_and_quote() {
        let input = doc(json!([
            { "type": "codeBlock", "attrs": { "language": "rust" }, "content": [text("fn main() {}")] },
            { "type": "blockquote", "content": [para(json!([text("quoted")]))] }
        ]));
        assert_eq!(convert(input), "```rust\nfn main() {}\n```\n\n> quoted");
    }

    #[test]
    fn mentions_emoji_and_cards() {
        let input = doc(json!([para(json!([
            { "type": "mention", "attrs": { "id": "abc", "text": "@Ada" } },
            text(" "),
            { "type": "emoji", "attrs": { "shortName": ":smile:", "text": "😄" } },
            text(" "),
            { "type": "inlineCard", "attrs": { "url": "https://example.com/x" } }
        ]))]));
        assert_eq!(convert(input), "@Ada 😄 https://example.com/x");
    }

    #[test]
    fn table_rows() {
        let cell = |t: &str| json!({ "type": "tableCell", "content": [para(json!([text(t)]))] });
        let input = doc(json!([{
            "type": "table",
            "content": [
                { "type": "tableRow", "content": [cell("k"), cell("v")] },
                { "type": "tableRow", "content": [cell("a"), cell("1")] }
            ]
        }]));
        assert_eq!(convert(input), "| k | v |\n| --- | --- |\n| a | 1 |");
    }

    #[test]
    fn unknown_nodes_render_children_and_media_is_dropped() {
        let input = doc(json!([
            { "type": "panel", "attrs": { "panelType": "info" }, "content": [para(json!([text("note")]))] },
            { "type": "mediaSingle", "content": [{ "type": "media", "attrs": { "id": "x" } }] }
        ]));
        assert_eq!(convert(input), "note");
    }
}
