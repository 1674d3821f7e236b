//! Single-pass document analyzer
//!
//! Walks the parsed node tree once, in document order, collecting heading
//! counts, the title, HTML version observations, anchor hrefs, and the
//! login-form flag. The walk uses an explicit stack with a nesting-depth
//! guard instead of native recursion; untrusted documents can nest elements
//! arbitrarily deep.

use crate::analysis::{DocumentAnalysis, HtmlVersion};
use ego_tree::NodeRef;
use scraper::{Html, Node};
use thiserror::Error;

/// Maximum element nesting depth tolerated before analysis fails
pub const MAX_DOCUMENT_DEPTH: usize = 256;

/// Errors that can occur during document analysis
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("document nesting exceeds {MAX_DOCUMENT_DEPTH} levels")]
    NestingTooDeep,
}

/// Analyzes an HTML document in a single traversal
///
/// Parsing is lenient: missing closing tags, unknown elements, and an absent
/// DOCTYPE are all tolerated. The HTML version decision is made after the
/// walk so that a DOCTYPE always wins over an `html version` attribute,
/// regardless of where either appears in the tree.
///
/// # Arguments
///
/// * `html` - The raw HTML content
///
/// # Returns
///
/// * `Ok(DocumentAnalysis)` - Metrics and the raw href list
/// * `Err(AnalyzeError)` - Document exceeded the nesting-depth guard
pub fn analyze_document(html: &str) -> Result<DocumentAnalysis, AnalyzeError> {
    let document = Html::parse_document(html);

    let mut analysis = DocumentAnalysis::default();
    let mut doctype_version: Option<HtmlVersion> = None;
    let mut attr_version: Option<HtmlVersion> = None;

    let mut stack: Vec<(NodeRef<Node>, usize)> = vec![(document.tree.root(), 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_DOCUMENT_DEPTH {
            return Err(AnalyzeError::NestingTooDeep);
        }

        match node.value() {
            Node::Element(element) => match element.name() {
                "html" => {
                    attr_version = Some(match element.attr("version") {
                        Some(version) => HtmlVersion::Declared(version.to_string()),
                        None => HtmlVersion::Html5,
                    });
                }
                "title" => {
                    if let Some(first) = node.first_child() {
                        if let Some(text) = first.value().as_text() {
                            analysis.title = text.trim().to_string();
                        }
                    }
                }
                "h1" => analysis.heading_counts[0] += 1,
                "h2" => analysis.heading_counts[1] += 1,
                "h3" => analysis.heading_counts[2] += 1,
                "h4" => analysis.heading_counts[3] += 1,
                "h5" => analysis.heading_counts[4] += 1,
                "h6" => analysis.heading_counts[5] += 1,
                "a" => {
                    // One entry per href attribute, in attribute-scan order
                    for (name, value) in element.attrs() {
                        if name == "href" {
                            analysis.hrefs.push(value.to_string());
                        }
                    }
                }
                "form" => {
                    if !analysis.has_login_form && subtree_has_login_marker(node) {
                        analysis.has_login_form = true;
                    }
                }
                _ => {}
            },
            Node::Doctype(doctype) => {
                let raw = format!(
                    "{} {} {}",
                    doctype.name(),
                    doctype.public_id(),
                    doctype.system_id()
                );
                if let Some(version) = HtmlVersion::from_doctype(&raw) {
                    doctype_version = Some(version);
                }
            }
            _ => {}
        }

        // Push in reverse so children pop in document order
        for child in node.children().rev() {
            stack.push((child, depth + 1));
        }
    }

    // DOCTYPE is authoritative over the html element's version attribute
    analysis.html_version = doctype_version
        .or(attr_version)
        .unwrap_or(HtmlVersion::Unknown);

    Ok(analysis)
}

/// Checks a form subtree for login indicators
///
/// A form counts as a login form when its subtree contains a password-type
/// input, or when any node carries an `id`, `class`, or `name` attribute
/// whose value (case-insensitively) contains "login", "signin", or "auth".
fn subtree_has_login_marker(form: NodeRef<Node>) -> bool {
    let mut stack = vec![form];

    while let Some(node) = stack.pop() {
        if let Some(element) = node.value().as_element() {
            if element.name() == "input" && element.attr("type") == Some("password") {
                return true;
            }

            for (name, value) in element.attrs() {
                if matches!(name, "id" | "class" | "name") {
                    let value = value.to_lowercase();
                    if value.contains("login")
                        || value.contains("signin")
                        || value.contains("auth")
                    {
                        return true;
                    }
                }
            }
        }

        stack.extend(node.children());
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_counts_exhaustive() {
        let html = r#"
            <html><body>
                <h1>One</h1>
                <h2>A</h2><h2>B</h2>
                <div><h3>Nested</h3></div>
                <h6>Deep</h6>
            </body></html>
        "#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.heading_counts, [1, 2, 1, 0, 0, 1]);
    }

    #[test]
    fn test_title_extraction() {
        let html = r#"<html><head><title>Example Domain</title></head><body></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.title, "Example Domain");
    }

    #[test]
    fn test_missing_title_is_empty() {
        let html = r#"<html><head></head><body><p>no title</p></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.title, "");
    }

    #[test]
    fn test_later_title_overwrites() {
        let html = r#"<html><head><title>First</title><title>Second</title></head></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.title, "Second");
    }

    #[test]
    fn test_default_version_is_html5() {
        let html = r#"<html><body></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.html_version, HtmlVersion::Html5);
    }

    #[test]
    fn test_version_attribute_recorded_verbatim() {
        let html = r#"<html version="-//W3C//DTD HTML 4.0//EN"><body></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(
            analysis.html_version,
            HtmlVersion::Declared("-//W3C//DTD HTML 4.0//EN".to_string())
        );
    }

    #[test]
    fn test_doctype_html5() {
        let html = r#"<!DOCTYPE html><html><body></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.html_version, HtmlVersion::Html5);
    }

    #[test]
    fn test_doctype_401_beats_version_attribute() {
        let html = concat!(
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "#,
            r#""http://www.w3.org/TR/html4/strict.dtd">"#,
            r#"<html version="5"><body></body></html>"#
        );
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.html_version, HtmlVersion::Html401);
    }

    #[test]
    fn test_doctype_xhtml() {
        let html = concat!(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "#,
            r#""http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
            r#"<html><body></body></html>"#
        );
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.html_version, HtmlVersion::Xhtml);
    }

    #[test]
    fn test_hrefs_collected_in_document_order() {
        let html = r##"
            <html><body>
                <a href="/first">1</a>
                <a href="#frag">2</a>
                <a href="">3</a>
                <a href="https://other.com/page">4</a>
            </body></html>
        "##;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(
            analysis.hrefs,
            vec!["/first", "#frag", "", "https://other.com/page"]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="anchor">no href</a></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert!(analysis.hrefs.is_empty());
    }

    #[test]
    fn test_password_input_sets_login_flag() {
        let html = r#"
            <html><body>
                <form action="/submit">
                    <div><div><input type="password" /></div></div>
                </form>
            </body></html>
        "#;
        let analysis = analyze_document(html).unwrap();
        assert!(analysis.has_login_form);
    }

    #[test]
    fn test_login_class_sets_flag() {
        let html = r#"<html><body><form class="user-LOGIN-box"></form></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert!(analysis.has_login_form);
    }

    #[test]
    fn test_signin_name_on_child_sets_flag() {
        let html = r#"
            <html><body>
                <form><button name="signin-button">Go</button></form>
            </body></html>
        "#;
        let analysis = analyze_document(html).unwrap();
        assert!(analysis.has_login_form);
    }

    #[test]
    fn test_plain_search_form_not_login() {
        let html = r#"
            <html><body>
                <form action="/search"><input type="text" name="q" /></form>
            </body></html>
        "#;
        let analysis = analyze_document(html).unwrap();
        assert!(!analysis.has_login_form);
    }

    #[test]
    fn test_login_marker_outside_form_ignored() {
        let html = r#"<html><body><div class="login-banner"></div></body></html>"#;
        let analysis = analyze_document(html).unwrap();
        assert!(!analysis.has_login_form);
    }

    #[test]
    fn test_malformed_markup_tolerated() {
        let html = r#"<html><body><h1>Unclosed<h2>Also unclosed<unknown-tag><a href="/x">"#;
        let analysis = analyze_document(html).unwrap();
        assert_eq!(analysis.heading_counts[0], 1);
        assert_eq!(analysis.heading_counts[1], 1);
        assert_eq!(analysis.hrefs, vec!["/x"]);
    }

    #[test]
    fn test_deeply_nested_document_rejected() {
        let mut html = String::from("<html><body>");
        for _ in 0..(MAX_DOCUMENT_DEPTH + 10) {
            html.push_str("<div>");
        }
        let result = analyze_document(&html);
        assert!(matches!(result, Err(AnalyzeError::NestingTooDeep)));
    }

    #[test]
    fn test_empty_document() {
        let analysis = analyze_document("").unwrap();
        assert_eq!(analysis.heading_counts, [0; 6]);
        assert!(analysis.hrefs.is_empty());
        assert!(!analysis.has_login_form);
    }
}
