// XML front end using roxmltree
use crate::ParseOptions;
use crate::document::{Document, ExpandedName, TreeBuilder};
use crate::error::ParseError;
use roxmltree::{NodeType as XmlNodeType, ParsingOptions};
use scrapexpath_xpath1::XML_NAMESPACE;

enum Visit<'a, 'input> {
    Enter(roxmltree::Node<'a, 'input>),
    Leave,
}

pub(crate) fn parse(text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let mut parsing = ParsingOptions::default();
    parsing.allow_dtd = options.allow_dtd;
    let doc = roxmltree::Document::parse_with_options(text, parsing)?;

    let mut builder = TreeBuilder::new();
    let mut stack = vec![Visit::Enter(doc.root())];
    while let Some(visit) = stack.pop() {
        let node = match visit {
            Visit::Leave => {
                builder.end_element();
                continue;
            }
            Visit::Enter(node) => node,
        };
        match node.node_type() {
            XmlNodeType::Root => {}
            XmlNodeType::Element => {
                let tag = node.tag_name();
                builder.start_element(expanded_name(node, tag.namespace(), tag.name()));
                for attr in node.attributes() {
                    builder.attribute(
                        expanded_name(node, attr.namespace(), attr.name()),
                        attr.value(),
                    );
                }
                stack.push(Visit::Leave);
            }
            XmlNodeType::Text => builder.text(node.text().unwrap_or("")),
            XmlNodeType::Comment => builder.comment(node.text().unwrap_or("")),
            XmlNodeType::PI => {
                if let Some(pi) = node.pi() {
                    builder.processing_instruction(pi.target, pi.value.unwrap_or(""));
                }
            }
        }
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(Visit::Enter));
    }
    Ok(builder.finish())
}

/// Builds the name of an element or attribute, recovering the prefix the
/// source bound to `namespace` in scope at `node`.
fn expanded_name(
    node: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    local: &str,
) -> ExpandedName {
    let prefix = match namespace {
        Some(XML_NAMESPACE) => Some("xml".to_string()),
        Some(uri) => node
            .lookup_prefix(uri)
            .filter(|prefix| !prefix.is_empty())
            .map(str::to_string),
        None => None,
    };
    ExpandedName {
        prefix,
        namespace: namespace.map(str::to_string),
        local: local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Document, DocumentType, ParseError, ParseOptions};
    use scrapexpath_xpath1::{DataSourceNode, NodeType};

    #[test]
    fn test_parses_elements_attributes_and_text() {
        let doc = Document::parse(r#"<a><b x="1">t</b><!--c--><?pi data?></a>"#, DocumentType::Xml)
            .unwrap();
        let a = doc.root().children().next().unwrap();
        let kinds: Vec<NodeType> = a.children().map(|n| n.node_type()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeType::Element,
                NodeType::Comment,
                NodeType::ProcessingInstruction
            ]
        );
        let pi = a.children().nth(2).unwrap();
        assert_eq!(pi.name().unwrap().local_part, "pi");
        assert_eq!(pi.string_value(), "data");

        let b = a.children().next().unwrap();
        let x = b.attributes().next().unwrap();
        assert_eq!(x.string_value(), "1");
        assert!(x < b.children().next().unwrap());
    }

    #[test]
    fn test_nested_elements_close_in_order() {
        let doc = Document::parse("<a><b><c>1</c></b><d>2</d></a>", DocumentType::Xml).unwrap();
        let a = doc.root().children().next().unwrap();
        let names: Vec<&str> = a.children().map(|n| n.name().unwrap().local_part).collect();
        assert_eq!(names, vec!["b", "d"]);
        let b = a.children().next().unwrap();
        assert_eq!(b.children().count(), 1);
        assert_eq!(b.string_value(), "1");
        assert_eq!(doc.root().string_value(), "12");
        assert_eq!(doc.len(), 7);
    }

    #[test]
    fn test_namespaces_keep_uri_and_prefix() {
        let doc = Document::parse(
            r#"<r xmlns="urn:default" xmlns:p="urn:p"><p:e p:k="v" xml:lang="en"/></r>"#,
            DocumentType::Xml,
        )
        .unwrap();
        let r = doc.root().children().next().unwrap();
        let r_name = r.name().unwrap();
        assert_eq!(r_name.namespace, Some("urn:default"));
        assert_eq!(r_name.prefix, None);

        let e = r.children().next().unwrap();
        let e_name = e.name().unwrap();
        assert_eq!(e_name.prefix, Some("p"));
        assert_eq!(e_name.namespace, Some("urn:p"));
        assert_eq!(e_name.local_part, "e");

        let attr_names: Vec<_> = e.attributes().map(|a| a.name().unwrap()).collect();
        assert_eq!(attr_names[0].namespace, Some("urn:p"));
        assert_eq!(attr_names[1].prefix, Some("xml"));
        assert_eq!(
            attr_names[1].namespace,
            Some(scrapexpath_xpath1::XML_NAMESPACE)
        );
    }

    #[test]
    fn test_cdata_joins_surrounding_text() {
        let doc = Document::parse("<a>x<![CDATA[<y>]]>z</a>", DocumentType::Xml).unwrap();
        let a = doc.root().children().next().unwrap();
        assert_eq!(a.children().count(), 1);
        assert_eq!(a.string_value(), "x<y>z");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        for bad in ["<a><b></a>", "", "not xml", "<a></a><b></b>"] {
            assert!(
                matches!(Document::parse(bad, DocumentType::Xml), Err(ParseError::Xml(_))),
                "expected {:?} to fail",
                bad
            );
        }
    }

    #[test]
    fn test_dtd_can_be_rejected() {
        let text = r#"<!DOCTYPE a [<!ENTITY e "expanded">]><a>&e;</a>"#;
        let doc = Document::parse(text, DocumentType::Xml).unwrap();
        assert_eq!(doc.root().string_value(), "expanded");

        let strict = ParseOptions::default().allow_dtd(false);
        assert!(Document::parse_with(text, DocumentType::Xml, &strict).is_err());
    }
}
