//! MarkdownifyService - the main entry point for HTML to Markdown conversion.
//!
//! Conversion is a single depth-first walk per root element. Each start and
//! end event is dispatched on the element's [`Tag`] and appends Markdown to
//! one output buffer, while a [`FormattingContext`] tracks list, blockquote
//! and verbatim nesting.

use indexmap::IndexMap;
use log::{debug, trace};
use markdownify_core::{normalize, require_exact_newlines, require_newlines, Options};

use crate::context::{FormattingContext, ListKind};
use crate::node::{Element, NodeRef};
use crate::tags::{heading_level, Tag};
use crate::walk::{walk, Event};

/// Horizontal rule markup
const RULE: &str = "----------";

/// The main service for converting element trees to Markdown
#[derive(Debug, Default)]
pub struct MarkdownifyService {
    options: Options,
    /// Deferred links, visible text to URL, in first-seen order
    links: IndexMap<String, String>,
}

impl MarkdownifyService {
    /// Create a new MarkdownifyService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a MarkdownifyService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            links: IndexMap::new(),
        }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Links collected so far when link URLs are deferred
    pub fn links(&self) -> &IndexMap<String, String> {
        &self.links
    }

    /// Convert the contents of `root` to Markdown.
    ///
    /// `root` itself, and any element flagged as a selection root, produces
    /// no output of its own; only the descendants are converted. Deferred
    /// links accumulate across calls, and every result lists all links
    /// collected so far.
    ///
    /// # Example
    ///
    /// ```rust
    /// use markdownify::{Element, MarkdownifyService};
    ///
    /// let body = Element::new("body")
    ///     .with_child(Element::new("h1").with_text("Hello World"));
    ///
    /// let mut service = MarkdownifyService::new();
    /// assert_eq!(service.convert_element(&body), "# Hello World");
    /// ```
    pub fn convert_element(&mut self, root: &Element) -> String {
        let mut converter = Converter::new(&self.options, &mut self.links);

        for event in walk(root) {
            let node = event.node();
            if node.same_node(root) || node.node.selection_root {
                continue;
            }
            match event {
                Event::Enter(node) => converter.enter(node),
                Event::Exit(node) => converter.exit(node),
            }
        }

        let markdown = converter.finish();
        debug!(
            "converted <{}>: {} bytes, {} deferred links",
            root.tag,
            markdown.len(),
            self.links.len()
        );
        markdown
    }

    /// Parse `html`, select the roots matching `selector` and convert each
    /// of them, in document order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use markdownify::MarkdownifyService;
    ///
    /// let mut service = MarkdownifyService::new();
    /// let markdown = service.convert_document("<h1>Hello World</h1>", "body").unwrap();
    /// assert_eq!(markdown, vec!["# Hello World"]);
    /// ```
    #[cfg(feature = "html")]
    pub fn convert_document(&mut self, html: &str, selector: &str) -> crate::Result<Vec<String>> {
        let roots = crate::html::parse_html(html, selector)?;
        Ok(roots.iter().map(|root| self.convert_element(root)).collect())
    }
}

/// `code` directly and solely inside `pre` or `blockquote` is a code block
fn is_code_block(node: &NodeRef) -> bool {
    matches!(node.parent_tag(), Some("pre" | "blockquote")) && node.is_only_child()
}

/// Whether entering this blockquote also raises the indent level
fn blockquote_indents(node: &NodeRef) -> bool {
    node.parent_is("li")
        || (node.node.child_count() == 1
            && node.node.first_child().is_some_and(|child| child.tag == "code"))
}

/// Event handler state for one walk
struct Converter<'a, 'l> {
    options: &'a Options,
    links: &'l mut IndexMap<String, String>,
    ctx: FormattingContext<'a>,
    out: String,
}

impl<'a, 'l> Converter<'a, 'l> {
    fn new(options: &'a Options, links: &'l mut IndexMap<String, String>) -> Self {
        Self {
            options,
            links,
            ctx: FormattingContext::new(),
            out: String::with_capacity(4096),
        }
    }

    fn normalized(&self, text: Option<&str>) -> String {
        normalize(text, self.ctx.indent_level(), self.ctx.quote_level())
    }

    fn enter(&mut self, node: NodeRef<'a>) {
        let text = self.normalized(node.text());

        if self.ctx.is_verbatim() {
            self.out.push_str(&node.node.start_tag());
            self.out.push_str(&text);
            return;
        }

        match Tag::classify(node.tag()) {
            Tag::Link => match node.attr("href") {
                Some(url) => {
                    self.out.push('[');
                    self.out.push_str(&text);
                    self.out.push(']');
                    if self.options.defers_links() {
                        self.out.push_str("[]");
                        self.links.insert(text, url.to_string());
                    } else {
                        self.out.push('(');
                        self.out.push_str(url);
                        self.out.push(')');
                    }
                }
                None if node.parent_tag().and_then(heading_level).is_some() => {
                    self.out.push_str(&text);
                    require_newlines(&mut self.out, 1);
                }
                None => self.out.push_str(&text),
            },

            Tag::Strong => {
                self.out.push_str("**");
                self.out.push_str(&text);
            }

            Tag::Emphasis => {
                self.out.push('*');
                self.out.push_str(&text);
            }

            Tag::Blockquote => {
                self.ctx.enter_blockquote(blockquote_indents(&node));
                require_newlines(&mut self.out, 1);
            }

            Tag::LineBreak => {
                self.out.truncate(self.out.trim_end().len());
                self.out.push_str("  \n");
            }

            Tag::Code => {
                if is_code_block(&node) {
                    require_newlines(&mut self.out, 1);
                    self.out.push_str(&text);
                    require_newlines(&mut self.out, 1);
                } else {
                    self.out.push_str(code_fence(&node));
                    self.out.push_str(&text);
                }
            }

            Tag::Heading(level) => {
                require_exact_newlines(&mut self.out, 2);
                self.out.push_str(&self.ctx.prefix());
                self.out.push_str(&"#".repeat(usize::from(level)));
                self.out.push(' ');
                self.out.push_str(&text.replace("\\s", " "));
            }

            Tag::Rule => {
                require_newlines(&mut self.out, 1);
                self.out.push_str(RULE);
                self.out.push('\n');
            }

            Tag::ListItem => {
                if self.ctx.needs_implicit_list() {
                    self.ctx.push_list(ListKind::Unordered);
                    self.open_list("");
                }
                let marker = self.ctx.next_marker();
                self.out.push_str(&self.ctx.prefix());
                self.out.push_str(&marker);
                self.out.push_str(&text);
            }

            Tag::OrderedList => {
                self.ctx.push_list(ListKind::Ordered);
                self.open_list(&text);
            }

            Tag::UnorderedList => {
                self.ctx.push_list(ListKind::Unordered);
                self.open_list(&text);
            }

            Tag::Paragraph => {
                // a paragraph introducing a list item runs on from the marker
                let opens_list =
                    node.is_first_child() && matches!(node.parent_tag(), Some("ul" | "ol"));
                require_exact_newlines(&mut self.out, if opens_list { 0 } else { 2 });
                self.out.push_str(&self.ctx.prefix());
                self.out.push_str(text.trim_start());
            }

            Tag::Pre => {
                require_newlines(&mut self.out, 2);
                self.ctx.enter_pre();
                self.out.push_str(&text);
            }

            Tag::Void | Tag::Inline => {
                self.out.push_str(&node.node.start_tag());
                self.out.push_str(&text);
            }

            Tag::Verbatim => {
                trace!("verbatim passthrough from <{}>", node.tag());
                self.ctx.enter_verbatim(node.node);
                self.out.push_str(&node.node.start_tag());
                self.out.push_str(&text);
            }
        }
    }

    fn exit(&mut self, node: NodeRef<'a>) {
        let tail = self.normalized(node.tail());

        if self.ctx.is_verbatim() {
            self.out.push_str(&node.node.end_tag());
            self.out.push('\n');
            self.out.push_str(&tail);
            if self.ctx.leave_verbatim(node.node) {
                trace!("verbatim passthrough ends at </{}>", node.tag());
            }
            return;
        }

        match Tag::classify(node.tag()) {
            Tag::Link | Tag::Void => self.out.push_str(&tail),

            Tag::Strong => {
                self.out.push_str("**");
                self.out.push_str(&tail);
            }

            Tag::Emphasis => {
                self.out.push('*');
                self.out.push_str(&tail);
            }

            Tag::Blockquote => {
                self.ctx.exit_blockquote();
                require_newlines(&mut self.out, 1);
            }

            Tag::Code => {
                if is_code_block(&node) {
                    require_newlines(&mut self.out, 2);
                } else {
                    self.out.push_str(code_fence(&node));
                }
                self.out.push_str(&tail);
            }

            Tag::Heading(_) => {
                require_exact_newlines(&mut self.out, 2);
                self.out.push_str(&tail);
            }

            Tag::LineBreak | Tag::Rule => self.out.push_str(tail.trim_start()),

            Tag::ListItem => {
                require_newlines(&mut self.out, 1);
                self.out.push_str(tail.trim_start());
            }

            Tag::OrderedList | Tag::UnorderedList => {
                self.ctx.pop_list();
                require_newlines(&mut self.out, 1);
                self.out.push_str(tail.trim_start());
            }

            Tag::Paragraph => {
                require_exact_newlines(&mut self.out, 2);
                self.out.push_str(tail.trim_start());
            }

            Tag::Pre => {
                self.ctx.exit_pre();
                require_newlines(&mut self.out, 2);
                self.out.push_str(tail.trim_start());
            }

            Tag::Inline | Tag::Verbatim => {
                self.out.push_str(&node.node.end_tag());
                self.out.push_str(&tail);
            }
        }
    }

    /// Start a list on its own line
    fn open_list(&mut self, text: &str) {
        require_newlines(&mut self.out, 1);
        self.out.push_str(text.trim_start());
        require_newlines(&mut self.out, 1);
    }

    /// Append the deferred link definitions and trim the result
    fn finish(mut self) -> String {
        if !self.links.is_empty() {
            self.out.push_str("\n\n");
            for (text, url) in self.links.iter() {
                self.out.push('[');
                self.out.push_str(text);
                self.out.push_str("]: ");
                self.out.push_str(url);
                self.out.push('\n');
            }
        }
        self.out.trim().to_string()
    }
}

/// Inline code delimiter: doubled when the code contains a backtick
fn code_fence(node: &NodeRef) -> &'static str {
    if node.text().is_some_and(|text| text.contains('`')) {
        "``"
    } else {
        "`"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdownify_core::LinkStyle;
    use pretty_assertions::assert_eq;

    fn markdown(html: &str) -> String {
        let mut service = MarkdownifyService::new();
        service.convert_document(html, "body").unwrap().join("\n")
    }

    fn markdown_with_moved_links(html: &str, selector: &str) -> Vec<String> {
        let mut service = MarkdownifyService::with_options(Options::move_links());
        service.convert_document(html, selector).unwrap()
    }

    #[test]
    fn test_simple_paragraph() {
        assert_eq!(markdown("<p>Hello world.</p>"), "Hello world.");
    }

    #[test]
    fn test_paragraph_with_formatting() {
        assert_eq!(markdown("<p>Hello <strong>World</strong></p>"), "Hello **World**");
        assert_eq!(markdown("<p>a <em>b</em> <i>c</i> <b>d</b></p>"), "a *b* *c* **d**");
    }

    #[test]
    fn test_sentences_break_lines() {
        assert_eq!(
            markdown("<p>First sentence. Second   sentence.\n Third</p>"),
            "First sentence.\nSecond sentence.\nThird"
        );
    }

    #[test]
    fn test_heading_spacing() {
        let result = markdown("<p>Intro</p><h2>Title</h2><p>Body</p>");
        assert_eq!(result, "Intro\n\n## Title\n\nBody");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(markdown("<h1>One</h1>"), "# One");
        assert_eq!(markdown("<h6>Six</h6>"), "###### Six");
    }

    #[test]
    fn test_anchor_in_heading() {
        assert_eq!(markdown(r#"<h1><a name="top">Title</a></h1>"#), "# Title");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(markdown("<ol><li>One</li><li>Two</li></ol>"), "1. One\n2. Two");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(markdown("<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>"), "+ One\n+ Two");
    }

    #[test]
    fn test_nested_lists_number_independently() {
        let result = markdown("<ol><li>One<ul><li>Sub</li></ul></li><li>Two</li></ol>");
        assert_eq!(result, "1. One\n+ Sub\n2. Two");
    }

    #[test]
    fn test_list_item_without_list() {
        let body = Element::new("body")
            .with_child(Element::new("li").with_text("Lonely"))
            .with_child(Element::new("li").with_text("Next"));
        let mut service = MarkdownifyService::new();
        assert_eq!(service.convert_element(&body), "+ Lonely\n+ Next");
    }

    #[test]
    fn test_paragraph_introducing_list() {
        let body = Element::new("body").with_child(
            Element::new("ol")
                .with_child(Element::new("p").with_text("Intro"))
                .with_child(Element::new("li").with_text("One")),
        );
        let mut service = MarkdownifyService::new();
        assert_eq!(service.convert_element(&body), "Intro\n\n1. One");
    }

    #[test]
    fn test_inline_link() {
        assert_eq!(markdown(r#"<a href="http://x">text</a>"#), "[text](http://x)");
    }

    #[test]
    fn test_moved_link() {
        let result = markdown_with_moved_links(r#"<a href="http://x">text</a>"#, "body");
        assert_eq!(result, vec!["[text][]\n\n[text]: http://x"]);
    }

    #[test]
    fn test_moved_links_keep_last_url_per_text() {
        let result = markdown_with_moved_links(
            r#"<p><a href="/1">x</a> and <a href="/2">x</a></p>"#,
            "body",
        );
        assert_eq!(result, vec!["[x][] and [x][]\n\n[x]: /2"]);
    }

    #[test]
    fn test_moved_links_accumulate_across_roots() {
        let result = markdown_with_moved_links(
            r#"<p><a href="/a">A</a></p><p><a href="/b">B</a></p>"#,
            "p",
        );
        assert_eq!(
            result,
            vec!["[A][]\n\n[A]: /a", "[B][]\n\n[A]: /a\n[B]: /b"]
        );
    }

    #[test]
    fn test_links_not_collected_inline() {
        let mut service = MarkdownifyService::new();
        service
            .convert_document(r#"<a href="/a">A</a>"#, "body")
            .unwrap();
        assert_eq!(service.options().link_style, LinkStyle::Inlined);
        assert!(service.links().is_empty());
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(markdown("<p>Use <code>foo</code> now</p>"), "Use `foo` now");
        assert_eq!(markdown("<p><tt>bar</tt></p>"), "`bar`");
    }

    #[test]
    fn test_inline_code_with_backtick() {
        assert_eq!(markdown("<p><code>a`b</code></p>"), "``a`b``");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(markdown("<pre><code>let x = 1;</code></pre>"), "let x = 1;");
    }

    #[test]
    fn test_pre_spacing() {
        assert_eq!(markdown("<pre>code</pre><p>after</p>"), "code\n\nafter");
    }

    #[test]
    fn test_line_break() {
        assert_eq!(markdown("<p>line one <br>\nline two</p>"), "line one  \nline two");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(
            markdown("<p>Above</p><hr><p>Below</p>"),
            "Above\n\n----------\n\nBelow"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            markdown("<blockquote><p>Quote here. More text.</p></blockquote>"),
            "> Quote here.\n> More text."
        );
    }

    #[test]
    fn test_nested_blockquote() {
        assert_eq!(
            markdown("<blockquote><blockquote><p>Deep</p></blockquote></blockquote>"),
            "> > Deep"
        );
    }

    #[test]
    fn test_verbatim_passthrough() {
        assert_eq!(
            markdown("<foo><bar>content</bar></foo>"),
            "<foo><bar>content</bar>\n</foo>"
        );
    }

    #[test]
    fn test_verbatim_does_not_convert_descendants() {
        assert_eq!(markdown("<div><p>Hi</p></div>"), "<div><p>Hi</p>\n</div>");
    }

    #[test]
    fn test_verbatim_ends_at_its_root() {
        assert_eq!(
            markdown("<div>raw</div><p><em>converted</em></p>"),
            "<div>raw</div>\n\n*converted*"
        );
    }

    #[test]
    fn test_void_element_inside_verbatim() {
        assert_eq!(
            markdown("<div><img src=a>b</div>"),
            "<div><img src=\"a\">\nb</div>"
        );
    }

    #[test]
    fn test_deeply_nested_verbatim() {
        let depth = 5000;
        let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let result = markdown(&html);

        assert!(result.starts_with(&"<div>".repeat(depth)));
        assert!(result.contains("x</div>\n</div>"));
        assert!(result.ends_with("</div>"));
        assert_eq!(result.matches("</div>").count(), depth);
    }

    #[test]
    fn test_inline_passthrough() {
        assert_eq!(
            markdown(r#"<p>a <span class="x">b <em>c</em></span> d</p>"#),
            r#"a <span class="x">b *c*</span> d"#
        );
    }

    #[test]
    fn test_void_element() {
        assert_eq!(
            markdown(r#"<p>see <img src="a.png"> here</p>"#),
            r#"see <img src="a.png"> here"#
        );
    }

    #[test]
    fn test_nested_selection_roots_are_skipped() {
        let mut service = MarkdownifyService::new();
        let result = service
            .convert_document(
                "<section><p>A</p><section><p>B</p></section></section>",
                "section",
            )
            .unwrap();
        assert_eq!(result, vec!["A\n\nB", "B"]);
    }

    #[test]
    fn test_selected_elements_are_skipped() {
        let body = Element::new("body")
            .selected()
            .with_child(Element::new("p").with_text("Outer"))
            .with_child(
                Element::new("section")
                    .selected()
                    .with_text("dropped")
                    .with_child(Element::new("p").with_text("Inner")),
            );
        let mut service = MarkdownifyService::new();
        assert_eq!(service.convert_element(&body), "Outer\n\nInner");
        assert_eq!(service.convert_element(&body.children[1]), "Inner");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(markdown(""), "");
        let mut service = MarkdownifyService::new();
        assert!(service.convert_document("<p>x</p>", "table").unwrap().is_empty());
    }

    /// Drive a conversion by hand and record the context levels after each
    /// blockquote event
    fn quote_levels(tree: &Element) -> Vec<(usize, usize)> {
        let options = Options::default();
        let mut links = IndexMap::new();
        let mut converter = Converter::new(&options, &mut links);
        let mut levels = Vec::new();

        for event in walk(tree).filter(|e| !e.node().same_node(tree)) {
            match event {
                Event::Enter(node) => converter.enter(node),
                Event::Exit(node) => converter.exit(node),
            }
            if event.node().tag() == "blockquote" {
                levels.push((converter.ctx.indent_level(), converter.ctx.quote_level()));
            }
        }
        levels
    }

    #[test]
    fn test_blockquote_in_list_item_restores_levels() {
        let tree = Element::new("body").with_child(
            Element::new("ul").with_child(
                Element::new("li").with_child(
                    Element::new("blockquote").with_child(Element::new("p").with_text("Quoted")),
                ),
            ),
        );
        assert_eq!(quote_levels(&tree), vec![(1, 1), (0, 0)]);
    }

    #[test]
    fn test_blockquote_around_code_restores_levels() {
        let quote = || Element::new("blockquote").with_child(Element::new("code").with_text("x"));
        let tree = Element::new("body").with_child(quote()).with_child(quote());
        assert_eq!(quote_levels(&tree), vec![(1, 1), (0, 0), (1, 1), (0, 0)]);
    }

    #[test]
    fn test_plain_blockquote_does_not_indent() {
        let tree = Element::new("body")
            .with_child(Element::new("blockquote").with_child(Element::new("p").with_text("x")));
        assert_eq!(quote_levels(&tree), vec![(0, 1), (0, 0)]);
    }
}
