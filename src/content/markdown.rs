//! Markdown rendering with syntax highlighting
//!
//! Post bodies are rendered with a fixed element mapping: headings,
//! paragraphs, lists, links, quotes and emphasis get the site's classes,
//! inline code is styled separately from code blocks, and code blocks are
//! highlighted and wrapped in a container carrying a copy button.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::escape_html;

/// How to close an element opened while rendering
enum Closing {
    /// Let pulldown-cmark write its own end tag
    Default,
    Html(&'static str),
    CodeBlock,
}

struct CodeBuffer {
    lang: Option<String>,
    text: String,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped by the content store, so no YAML
        // metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut open: Vec<Closing> = Vec::new();
        let mut code: Option<CodeBuffer> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some(CodeBuffer {
                        lang,
                        text: String::new(),
                    });
                    open.push(Closing::CodeBlock);
                }
                Event::Text(text) if code.is_some() => {
                    if let Some(buffer) = code.as_mut() {
                        buffer.text.push_str(&text);
                    }
                }
                Event::Start(tag) => match open_element(&tag) {
                    Some((html, closing)) => {
                        events.push(Event::Html(CowStr::from(html)));
                        open.push(Closing::Html(closing));
                    }
                    None => {
                        events.push(Event::Start(tag));
                        open.push(Closing::Default);
                    }
                },
                Event::End(end) => match open.pop() {
                    Some(Closing::Html(closing)) => events.push(Event::Html(CowStr::from(closing))),
                    Some(Closing::CodeBlock) => {
                        if let Some(buffer) = code.take() {
                            let highlighted =
                                self.highlight_code(&buffer.text, buffer.lang.as_deref());
                            events.push(Event::Html(CowStr::from(highlighted)));
                        }
                    }
                    Some(Closing::Default) | None => events.push(Event::End(end)),
                },
                Event::Code(text) => {
                    events.push(Event::InlineHtml(CowStr::from(format!(
                        r#"<code class="inline-code">{}</code>"#,
                        escape_html(&text)
                    ))));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block and wrap it with a copy button
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted =
            theme.map(|t| highlighted_html_for_string(code, &self.syntax_set, syntax, t));
        let inner = match highlighted {
            Some(Ok(highlighted)) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Some(Ok(highlighted)) => highlighted,
            _ => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(code)
            ),
        };

        format!(
            r#"<div class="code-block" data-lang="{}"><button type="button" class="copy-button" aria-label="Copy code">Copy</button>{}</div>"#,
            escape_html(lang),
            inner
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Class attached to a mapped element
pub fn element_class(element: &str) -> Option<&'static str> {
    let class = match element {
        "h1" => "post-h1",
        "h2" => "post-h2",
        "h3" => "post-h3",
        "p" => "post-p",
        "ul" => "post-ul",
        "ol" => "post-ol",
        "li" => "post-li",
        "a" => "post-link",
        "blockquote" => "post-quote",
        "strong" => "post-strong",
        "em" => "post-em",
        _ => return None,
    };
    Some(class)
}

/// Opening HTML and matching end tag for mapped elements
fn open_element(tag: &Tag) -> Option<(String, &'static str)> {
    let simple = |name: &str, closing: &'static str| {
        let class = element_class(name)?;
        Some((format!(r#"<{} class="{}">"#, name, class), closing))
    };

    match tag {
        Tag::Heading { level, id, .. } => {
            let (name, closing) = match level {
                HeadingLevel::H1 => ("h1", "</h1>\n"),
                HeadingLevel::H2 => ("h2", "</h2>\n"),
                HeadingLevel::H3 => ("h3", "</h3>\n"),
                _ => return None,
            };
            let class = element_class(name)?;
            let id_attr = id
                .as_ref()
                .map(|id| format!(r#" id="{}""#, escape_html(id)))
                .unwrap_or_default();
            Some((format!(r#"<{}{} class="{}">"#, name, id_attr, class), closing))
        }
        Tag::Paragraph => simple("p", "</p>\n"),
        Tag::List(None) => simple("ul", "</ul>\n"),
        Tag::List(Some(start)) => {
            let class = element_class("ol")?;
            let start_attr = if *start == 1 {
                String::new()
            } else {
                format!(r#" start="{}""#, start)
            };
            Some((format!(r#"<ol{} class="{}">"#, start_attr, class), "</ol>\n"))
        }
        Tag::Item => simple("li", "</li>\n"),
        Tag::BlockQuote(_) => simple("blockquote", "</blockquote>\n"),
        Tag::Strong => simple("strong", "</strong>"),
        Tag::Emphasis => simple("em", "</em>"),
        Tag::Link {
            dest_url, title, ..
        } => {
            let class = element_class("a")?;
            let mut html = format!(
                r#"<a href="{}" class="{}""#,
                escape_html(dest_url),
                class
            );
            if !title.is_empty() {
                html.push_str(&format!(r#" title="{}""#, escape_html(title)));
            }
            if dest_url.starts_with("http") {
                html.push_str(r#" target="_blank" rel="noopener noreferrer""#);
            }
            html.push('>');
            Some((html, "</a>"))
        }
        _ => None,
    }
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        escape_html(lang),
        gutter,
        lines.join("\n")
    )
}
