// HTML front end using scraper (html5ever)
use crate::document::{Document, ExpandedName, TreeBuilder};
use scraper::{Html, Node};

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

enum Visit<N> {
    Enter(N),
    Leave,
}

/// Parses `text` the way a browser would. Every input yields a tree.
///
/// HTML elements get no namespace, so `//p` matches them. Foreign content
/// such as `<svg>` keeps its namespace and needs a bound prefix.
pub(crate) fn parse(text: &str) -> Document {
    let html = Html::parse_document(text);
    for error in &html.errors {
        log::debug!("Recovered from HTML parse error: {}", error);
    }

    let mut builder = TreeBuilder::new();
    let mut stack = vec![Visit::Enter(html.tree.root())];
    while let Some(visit) = stack.pop() {
        let node = match visit {
            Visit::Leave => {
                builder.end_element();
                continue;
            }
            Visit::Enter(node) => node,
        };
        match node.value() {
            Node::Document | Node::Fragment => {}
            Node::Doctype(_) => continue,
            Node::Element(element) => {
                let namespace = match &*element.name.ns {
                    "" | XHTML_NAMESPACE => None,
                    ns => Some(ns.to_string()),
                };
                builder.start_element(ExpandedName {
                    prefix: None,
                    namespace,
                    local: element.name().to_string(),
                });
                for (name, value) in element.attrs().filter(|(name, _)| !is_xmlns(name)) {
                    builder.attribute(ExpandedName::local(name), value);
                }
                stack.push(Visit::Leave);
            }
            Node::Text(text) => builder.text(text),
            Node::Comment(comment) => builder.comment(comment),
            Node::ProcessingInstruction(pi) => builder.processing_instruction(&pi.target, &pi.data),
        }
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(Visit::Enter));
    }
    builder.finish()
}

/// Namespace declarations are not attributes in the XPath data model.
fn is_xmlns(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}
