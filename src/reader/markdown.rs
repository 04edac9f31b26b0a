use crate::reader::DocumentUnit;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Split markdown into paragraphs, headings, and list items, numbered in
/// document order. Code blocks and inline code are left out.
pub fn parse(content: &str) -> Vec<DocumentUnit> {
    let mut units = Vec::new();
    let mut current = String::new();
    let mut in_code_block = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
            }
            Event::Start(Tag::Paragraph | Tag::Heading { .. } | Tag::Item) => {
                // A list item's own text ends where a nested block begins
                flush(&mut current, &mut units);
            }
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                flush(&mut current, &mut units);
            }
            Event::Text(text) if !in_code_block => {
                current.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => {
                current.push(' ');
            }
            Event::Code(_) => {
                // Keep neighbouring words apart
                current.push(' ');
            }
            _ => {}
        }
    }
    flush(&mut current, &mut units);

    units
}

fn flush(current: &mut String, units: &mut Vec<DocumentUnit>) {
    let text = current.trim();
    if !text.is_empty() {
        let index = units.len() + 1;
        units.push(DocumentUnit::new(text, index));
    }
    current.clear();
}
