//! HTML parsing and selection support.
//!
//! This module parses HTML strings with scraper, selects the conversion roots
//! with a CSS selector, and converts each selected subtree to the [`Element`]
//! structure used by the converter.

use log::{debug, warn};
use scraper::{ElementRef, Html, Node as ScraperNode, Selector};

use crate::node::Element;
use crate::{Error, Result};

/// Parse an HTML document. Parsing never fails; malformed markup is
/// repaired the way browsers do.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Select the elements matching `selector`, in document order, as
/// [`Element`] trees.
///
/// Every element matched by the selector is flagged as a selection root,
/// including matches nested inside another match.
pub fn select(document: &Html, selector: &str) -> Result<Vec<Element>> {
    let compiled = Selector::parse(selector).map_err(|e| Error::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;

    let roots: Vec<ElementRef> = document.select(&compiled).collect();
    if roots.is_empty() {
        warn!("selector {selector:?} matched no elements");
    } else {
        debug!("selector {selector:?} matched {} elements", roots.len());
    }

    Ok(roots.iter().map(|root| to_element(*root, &roots)).collect())
}

/// Parse `html` and select the elements matching `selector`
///
/// # Example
///
/// ```rust
/// use markdownify::parse_html;
///
/// let roots = parse_html("<p>Hello <em>World</em></p>", "p").unwrap();
/// assert_eq!(roots.len(), 1);
/// assert_eq!(roots[0].text.as_deref(), Some("Hello "));
/// assert_eq!(roots[0].children[0].tag, "em");
/// ```
pub fn parse_html(html: &str, selector: &str) -> Result<Vec<Element>> {
    select(&parse_document(html), selector)
}

/// Convert a scraper ElementRef to our Element structure.
///
/// Uses an explicit stack of open elements, each with a cursor on its next
/// unvisited child, so nesting depth is not bounded by the call stack.
fn to_element(root: ElementRef, roots: &[ElementRef]) -> Element {
    let mut stack = vec![(shallow_element(root, roots), root.first_child())];

    while let Some((node, cursor)) = stack.last_mut() {
        let Some(child) = cursor.take() else {
            // all children visited: attach the element to its parent
            let Some((finished, _)) = stack.pop() else {
                break;
            };
            match stack.last_mut() {
                Some((parent, _)) => parent.add_child(finished),
                None => return finished,
            }
            continue;
        };
        *cursor = child.next_sibling();

        match child.value() {
            ScraperNode::Text(text) => {
                // Text before the first child element is the element's own
                // text, anything later is the tail of the preceding child.
                let slot = match node.children.last_mut() {
                    Some(previous) => &mut previous.tail,
                    None => &mut node.text,
                };
                slot.get_or_insert_with(String::new).push_str(&text.text);
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    stack.push((
                        shallow_element(child_element, roots),
                        child_element.first_child(),
                    ));
                }
            }
            _ => {}
        }
    }

    Element::new(root.value().name())
}

/// The element's tag and attributes, without children
fn shallow_element(element: ElementRef, roots: &[ElementRef]) -> Element {
    let value = element.value();

    let mut node = Element::new(value.name());
    node.attributes = value
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    node.selection_root = roots.iter().any(|root| root.id() == element.id());
    node
}
