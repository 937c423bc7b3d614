//! End-to-end rendering through the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mdlit_renderer::{
    BlockExtension, ExtensionName, ExtensionOptions, HtmlBuffer, Markdown, MentionOptions, mdlit,
    render_markdown,
};
use mdlit_resolver::{FetchError, HttpClient, HttpResponse, Platform, Resolver};
use pretty_assertions::assert_eq;
use pulldown_cmark::{Options, Parser, html};

/// Serves one page for every URL and counts requests.
struct FakeClient {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl HttpClient for FakeClient {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::Http(format!("simulated outage for {url}")));
        }
        Ok(HttpResponse {
            status: 200,
            body: br#"<html><head><title>X Home</title><link rel="icon" href="/icon.png"></head></html>"#
                .to_vec(),
        })
    }
}

fn online(fail: bool) -> (ExtensionOptions, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = Resolver::new(FakeClient {
        calls: Arc::clone(&calls),
        fail,
    });
    (ExtensionOptions::new(Arc::new(resolver)), calls)
}

fn render(text: &str) -> String {
    render_with(text, &ExtensionOptions::default())
}

fn render_with(text: &str, options: &ExtensionOptions) -> String {
    let mut out = HtmlBuffer::new();
    mdlit(text, options, &mut out).unwrap();
    out.into_string()
}

fn plain_commonmark(text: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(text, Options::ENABLE_TASKLISTS));
    out
}

fn anchor(href: &str, icon_html: &str, label: &str) -> String {
    format!(
        concat!(
            r#"<a contenteditable="false" href="{href}" rel="noopener noreferrer" "#,
            r#"style="display: inline; color:inherit; text-decoration:inherit;" target="_blank">"#,
            "<span></span>{icon}",
            r#"<span style="border-bottom:0.05em solid rgba(55,53,47,0.25);font-weight:500;flex-shrink:0;">{label}</span>"#,
            "<span></span></a>"
        ),
        href = href,
        icon = icon_html,
        label = label
    )
}

fn img(src: &str) -> String {
    format!(
        r#"<img src="{src}" alt="" style="width:1em;height:1em;vertical-align:-0.15em;border-radius:3px;margin-right:0.3em">"#
    )
}

#[test]
fn test_identity_without_markers() {
    let docs = [
        "# Title\n\nSome *emphasis*, **strong** and `code`.\n",
        "- one\n- two\n\n> quote\n",
        "A [link](https://example.com) and ![img](a.png).\n",
        "```rust\nfn main() {}\n```\n",
        "Text with - single dash, > angle and @ sign (paren).\n",
        "- [x] done\n- [ ] todo\n",
        "<div>raw html</div>\n",
    ];
    for doc in docs {
        assert_eq!(render(doc), plain_commonmark(doc), "{doc:?}");
    }
}

#[test]
fn test_arrow_and_dash() {
    assert_eq!(render("a -> b"), "<p>a <span>→</span> b</p>\n");
    assert_eq!(render("a -- b"), "<p>a <span>—</span> b</p>\n");
    assert_eq!(render("x->y--z"), "<p>x<span>→</span>y<span>—</span>z</p>\n");
}

#[test]
fn test_glyphs_inside_emphasis_and_headings() {
    assert_eq!(render("*a -> b*"), "<p><em>a <span>→</span> b</em></p>\n");
    assert_eq!(render("## Step -- one"), "<h2>Step <span>—</span> one</h2>\n");
}

#[test]
fn test_glyphs_left_alone_in_code() {
    assert_eq!(
        render("`a -> b -- c`"),
        "<p><code>a -&gt; b -- c</code></p>\n"
    );
    assert_eq!(
        render("```\na -> b\n```\n"),
        "<pre><code>a -&gt; b\n</code></pre>\n"
    );
}

#[test]
fn test_escaped_arrow_stays_literal() {
    assert_eq!(render(r"a \-> b"), "<p>a -&gt; b</p>\n");
}

#[test]
fn test_block_syntax_unaffected() {
    assert_eq!(render("---\n"), "<hr />\n");
    assert_eq!(render("Title\n--\n"), "<h2>Title</h2>\n");

    let mut md = Markdown::new();
    ExtensionName::MarkdownLit
        .apply(&mut md, &ExtensionOptions::default())
        .unwrap();
    md.enable(BlockExtension::Tables);
    let table = md.convert("| a -> b |\n|---|\n| c -- d |\n");
    assert!(table.contains("<th>a <span>→</span> b</th>"));
    assert!(table.contains("<td>c <span>—</span> d</td>"));
}

#[test]
fn test_link_destination_untouched() {
    assert_eq!(
        render("[next -> page](https://example.com/a--b)"),
        "<p><a href=\"https://example.com/a--b\">next <span>→</span> page</a></p>\n"
    );
}

#[test]
fn test_color_span() {
    assert_eq!(
        render("Say [red]hello[/red]!"),
        "<p>Say <span style=\"color:#ff4b4b;\">hello</span>!</p>\n"
    );
}

#[test]
fn test_color_mismatched_is_literal() {
    assert_eq!(
        render("Say [red]hello[/blue]!"),
        "<p>Say [red]hello[/blue]!</p>\n"
    );
}

#[test]
fn test_color_content_gets_markdown_and_earlier_rules() {
    assert_eq!(
        render("[violet]**bold** -> on[/violet]"),
        "<p><span style=\"color:#803df5;\"><strong>bold</strong> <span>→</span> on</span></p>\n"
    );
    assert_eq!(
        render("[blue]x -- y[/blue]"),
        "<p><span style=\"color:#1c83e1;\">x <span>—</span> y</span></p>\n"
    );
}

#[test]
fn test_mention_inside_color() {
    let html = render("[red]see @(🎥)(Docs)(x.com)[/red]");
    assert_eq!(
        html,
        format!(
            "<p><span style=\"color:#ff4b4b;\">see {}</span></p>\n",
            anchor("https://x.com", "🎥  ", "Docs")
        )
    );
}

#[test]
fn test_arrow_always_yields_arrow_glyph() {
    assert_eq!(render("a --> b"), "<p>a -<span>→</span> b</p>\n");
    assert_eq!(render("a ---> b"), "<p>a <span>—</span><span>→</span> b</p>\n");
    assert_eq!(render("x->->y"), "<p>x<span>→</span><span>→</span>y</p>\n");
}

#[test]
fn test_dash_in_mention_url_is_replaced_first() {
    // Glyph rules run before mentions, so the mention no longer matches.
    assert_eq!(
        render("@(🎥)(Docs)(x.com/a--b)"),
        "<p>@(🎥)(Docs)(x.com/a<span>—</span>b)</p>\n"
    );
}

#[test]
fn test_color_tag_on_its_own_line_stays_literal() {
    assert_eq!(
        render("[red]\nmulti\n[/red]"),
        "<p>[red]\nmulti\n[/red]</p>\n"
    );
}

#[test]
fn test_every_palette_color_renders() {
    for color in mdlit_renderer::Color::ALL {
        let html = render(&format!("[{0}]x[/{0}]", color.name()));
        assert_eq!(
            html,
            format!("<p><span style=\"color:{};\">x</span></p>\n", color.hex())
        );
    }
}

#[test]
fn test_mention_one_arg_uses_resolver() {
    let (options, calls) = online(false);
    let html = render_with("See @(https://x.com)", &options);
    assert_eq!(
        html,
        format!(
            "<p>See {}</p>\n",
            anchor("https://x.com", &img("https://x.com/icon.png"), "X Home")
        )
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_mention_two_args_keeps_label() {
    let (options, calls) = online(false);
    let html = render_with("@(Label)(https://x.com)", &options);
    assert_eq!(
        html,
        format!(
            "<p>{}</p>\n",
            anchor("https://x.com", &img("https://x.com/icon.png"), "Label")
        )
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_mention_three_args_skip_resolver() {
    let (options, calls) = online(false);
    let html = render_with("@(🎥)(Label)(https://x.com)", &options);
    assert_eq!(
        html,
        format!("<p>{}</p>\n", anchor("https://x.com", "🎥  ", "Label"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_mention_scheme_prepended() {
    let html = render("@(🎥)(Label)(x.com)");
    assert!(html.contains(r#"href="https://x.com""#));
}

#[test]
fn test_mention_github_platform() {
    let (options, calls) = online(false);
    let html = render_with("@(github.com/foo/bar)", &options);
    assert_eq!(
        html,
        format!(
            "<p>{}</p>\n",
            anchor(
                "https://github.com/foo/bar",
                &img(Platform::GitHub.icon_url()),
                "foo/bar"
            )
        )
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_warm_cache_is_byte_identical() {
    let (options, calls) = online(false);
    let doc = "Links: @(x.com/a) and @(Docs)(x.com/a) -- done";

    let first = render_with(doc, &options);
    let after_first = calls.load(Ordering::SeqCst);
    let second = render_with(doc, &options);

    assert_eq!(first, second);
    assert_eq!(after_first, 1);
    assert_eq!(calls.load(Ordering::SeqCst), after_first);
}

#[test]
fn test_network_failure_degrades_to_fallback() {
    let (options, calls) = online(true);
    let html = render_with("Before @(unknown.example) after -> end", &options);
    assert_eq!(
        html,
        format!(
            "<p>Before {} after <span>→</span> end</p>\n",
            anchor("https://unknown.example", "🔗  ", "Link")
        )
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_custom_fallbacks() {
    let options = ExtensionOptions {
        resolver: Arc::new(Resolver::offline()),
        mention: MentionOptions {
            fallback_icon: "↗".to_owned(),
            fallback_label: "Somewhere".to_owned(),
        },
    };
    let html = render_with("@(unknown.example)", &options);
    assert!(html.contains(">↗  <span"));
    assert!(html.contains(">Somewhere</span>"));
}

#[test]
fn test_mention_label_markdown_is_not_interpreted() {
    let html = render("@(🎥)(snake_case_name [draft])(x.com)");
    assert!(html.contains(">snake_case_name [draft]</span>"));
    assert!(!html.contains("<em>"));
}

#[test]
fn test_mention_in_code_span_is_literal() {
    assert_eq!(render("`@(x.com)`"), "<p><code>@(x.com)</code></p>\n");
}

#[test]
fn test_details_with_inline_rules() {
    assert_eq!(
        render("??? note \"More\"\n    a -> b\n"),
        "<details class=\"note\">\n<summary>More</summary>\n<p>a <span>→</span> b</p>\n</details>\n"
    );
}

#[test]
fn test_tasklist_with_color() {
    let html = render("- [x] [green]done[/green]\n- [ ] todo\n");
    assert!(html.contains(r#"<input disabled="" type="checkbox" checked=""/>"#));
    assert!(html.contains(r#"<span style="color:#21c354;">done</span>"#));
}

#[test]
fn test_render_markdown_without_markdownlit() {
    let mut out = HtmlBuffer::new();
    render_markdown(
        "a -> b",
        &[ExtensionName::Block(BlockExtension::Strikethrough)],
        &ExtensionOptions::default(),
        &mut out,
    )
    .unwrap();
    assert_eq!(out.as_str(), "<p>a -&gt; b</p>\n");
}
