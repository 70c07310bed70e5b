//! Documents shared by the integration tests.

/// Nested elements with attributes, and mixed content around `<f>`.
pub const XML_SAMPLE: &str = concat!(
    r#"<a><b><c>c</c><d foo="bar">d</d></b><b><c>C</c>"#,
    r#"<d foo="baz">D</d></b><e>ehead<f>f</f>etail</e></a>"#
);

/// A small page with a bare table cell and inline SVG.
pub const HTML_SAMPLE: &str = r#"<!DOCTYPE html><html>
  <head>
    <meta charset="utf-16be">
    <title>Hello, world!</title>
    <link rel="stylesheet" href="/style.css"/>
    <script src="/script.js"></script>
  </head>
  <body>
    <img src="/logo.png" alt="logo" />
    <p>Foo</p>
    <p>Bar</p>
    <table><td>Single-cell table</table>
    <a href="/foo">Foo</a>
    <a href="/bar">Bar</a>
    <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2 2">
      <path d="M0 0L2 2"/>
    </svg>
  </body>
</html>"#;

/// An Atom-style feed with a default namespace.
pub const FEED_SAMPLE: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
  <title>Updates</title>
  <entry><title>First</title><link href="/1"/></entry>
  <entry><title>Second</title><link href="/2"/></entry>
  <!-- generated -->
</feed>"#;
