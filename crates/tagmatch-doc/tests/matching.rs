//! End-to-end matching over parsed HTML-shaped documents.

use pretty_assertions::assert_eq;
use tagmatch::{match_tree, MatchResult, Pattern, ScopeChain, TreeNode};
use tagmatch_doc::{Document, Node};

/// `<html><body>{body}</body></html>`
fn page(body: Pattern) -> Pattern {
    Pattern::tag("html").with_child(Pattern::tag("body").with_child(body))
}

fn run<'a>(pattern: &Pattern, doc: &'a Document) -> (MatchResult<Node<'a>>, ScopeChain) {
    match_tree(Some(pattern), doc.root(), &ScopeChain::new()).unwrap()
}

fn html(markup: &str) -> Document {
    Document::parse_html(markup).unwrap()
}

#[test]
fn test_missing_sibling_is_invalid() {
    let pattern = page(Pattern::tag("div").with_next(Pattern::tag("div")));
    let doc = html("<div></div>");
    let (result, _) = run(&pattern, &doc);
    assert!(!result.is_valid());
}

#[test]
fn test_tags_without_siblings() {
    let doc = html("<div></div>");
    let (result, _) = run(&page(Pattern::tag("div")), &doc);
    assert!(result.is_valid());
}

#[test]
fn test_tags_with_siblings() {
    let pattern = page(Pattern::sequence([Pattern::tag("div"), Pattern::tag("p")]).unwrap());
    let doc = html("<div></div><p></p>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());
}

#[test]
fn test_wrong_tag_is_not_partial() {
    let doc = html("<p></p>");
    let (result, chain) = run(&page(Pattern::tag("div")), &doc);
    assert_eq!(result, MatchResult::NoMatch);
    assert_eq!(chain, ScopeChain::new());
}

#[test]
fn test_unmatched_child_is_partial() {
    let doc = html("<div><p></p></div>");
    let (result, _) = run(&page(Pattern::tag("div")), &doc);
    let p = doc.nodes().find(|n| n.tag() == Some("p"));

    assert!(!result.is_valid());
    assert!(result.is_partial());
    assert_eq!(result.tail(), p.as_ref());
}

#[test]
fn test_text_inside_tag() {
    let pattern = page(Pattern::tag("div").with_child(Pattern::text("This is cool!")));
    let doc = html("<div>This is cool!</div>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(result.value(), None);
}

#[test]
fn test_text_captured_by_variable() {
    let pattern = page(
        Pattern::tag("p").with_child(Pattern::bind("var1").with_child(Pattern::text("This is cool!"))),
    );
    let doc = html("<p>This is cool!</p>");
    let (result, chain) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(chain.get("var1"), Some("This is cool!"));
}

#[test]
fn test_wrong_text_is_not_captured() {
    let pattern = page(
        Pattern::tag("p").with_child(Pattern::bind("var1").with_child(Pattern::text("This is cool!"))),
    );
    let doc = html("<p>Something else</p>");
    let (result, chain) = run(&pattern, &doc);
    assert_eq!(result, MatchResult::NoMatch);
    assert_eq!(chain.get("var1"), None);
}

#[test]
fn test_sibling_captures_are_independent() {
    let pattern = page(
        Pattern::tag("p")
            .with_child(Pattern::bind("var1").with_child(Pattern::text("This is cool!")))
            .with_next(
                Pattern::tag("p")
                    .with_child(Pattern::bind("var2").with_child(Pattern::text("This is awesome!"))),
            ),
    );
    let doc = html("<p>This is cool!</p><p>This is awesome!</p>");
    let (result, chain) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(chain.get("var1"), Some("This is cool!"));
    assert_eq!(chain.get("var2"), Some("This is awesome!"));
}

#[test]
fn test_regex_captured_by_variable() {
    let pattern = page(
        Pattern::tag("p")
            .with_child(Pattern::bind("var1").with_child(Pattern::regex("[0-9]+").unwrap())),
    );
    let doc = html("<p>42</p>");
    let (result, chain) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(chain.get("var1"), Some("42"));
}

// ============ Repeat ============

#[test]
fn test_repeat_over_paragraphs() {
    let pattern = page(Pattern::repeat().with_child(Pattern::tag("p")));
    let doc = html("<p></p><p></p><p></p>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());
}

#[test]
fn test_repeat_rejects_foreign_sibling() {
    let pattern = page(Pattern::repeat().with_child(Pattern::tag("p")));
    let doc = html("<p></p><p></p><span></span>");
    let (result, _) = run(&pattern, &doc);
    assert!(!result.is_valid());
}

#[test]
fn test_repeat_keeps_last_capture_only() {
    let pattern = page(
        Pattern::repeat().with_child(
            Pattern::tag("li").with_child(Pattern::bind("item").with_child(Pattern::regex(".").unwrap())),
        ),
    );
    let doc = html("<li>one</li><li>two</li><li>three</li>");
    let (result, chain) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(chain.get("item"), Some("three"));
}

#[test]
fn test_repeat_with_several_siblings_per_attempt() {
    let pattern = page(
        Pattern::repeat().with_child(
            Pattern::sequence([Pattern::tag("dt"), Pattern::tag("dd")]).unwrap(),
        ),
    );
    let doc = html("<dt></dt><dd></dd><dt></dt><dd></dd>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());

    let doc = html("<dt></dt><dd></dd><dt></dt>");
    let (result, _) = run(&pattern, &doc);
    assert!(!result.is_valid());
}

// ============ Skip-Until ============

#[test]
fn test_skip_until_finds_span() {
    let pattern = page(Pattern::skip_until().with_child(Pattern::tag("span")));
    let doc = html("<p></p><p></p><span></span>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());
}

#[test]
fn test_skip_until_rejects_trailing_input() {
    let pattern = page(Pattern::skip_until().with_child(Pattern::tag("span")));
    let doc = html("<p></p><p></p><span></span><p></p>");
    let (result, _) = run(&pattern, &doc);
    assert!(!result.is_valid());
}

#[test]
fn test_skip_until_then_more_siblings() {
    let pattern = page(
        Pattern::skip_until().with_child(
            Pattern::tag("span").with_next(Pattern::skip_until()),
        ),
    );
    let doc = html("<p></p><span></span><p></p><p></p>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());
}

#[test]
fn test_skip_until_ignores_its_own_continuation() {
    let pattern = page(Pattern::skip_until().with_next(Pattern::tag("span")));
    let doc = html("<p></p><p></p>");
    let (result, _) = run(&pattern, &doc);
    assert!(result.is_valid());
}

#[test]
fn test_scrape_labelled_value() {
    let pattern = page(
        Pattern::skip_until().with_child(
            Pattern::tag("tr")
                .with_child(
                    Pattern::tag("th")
                        .with_child(Pattern::text("Price"))
                        .with_next(
                            Pattern::tag("td").with_child(
                                Pattern::bind("price").with_child(Pattern::regex(r"^\d+$").unwrap()),
                            ),
                        ),
                )
                .with_next(Pattern::skip_until()),
        ),
    );
    let doc = html(
        "<tr><th>Name</th><td>Widget</td></tr>\
         <tr><th>Price</th><td>12</td></tr>\
         <tr><th>Stock</th><td>3</td></tr>",
    );
    let (result, chain) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(chain.get("price"), Some("12"));
}

// ============ Scope ============

#[test]
fn test_scope_frames_do_not_hide_captures_from_enclosing_tag() {
    let pattern = page(
        Pattern::tag("h1")
            .with_child(Pattern::bind("title").with_child(Pattern::regex(".").unwrap()))
            .with_next(
                Pattern::scope().with_child(
                    Pattern::tag("p")
                        .with_child(Pattern::bind("intro").with_child(Pattern::regex(".").unwrap())),
                ),
            ),
    );
    let doc = html("<h1>Hello</h1><p>World</p>");
    let (result, chain) = run(&pattern, &doc);
    assert!(result.is_valid());
    assert_eq!(chain.get("title"), Some("Hello"));
    assert_eq!(chain.get("intro"), Some("World"));
}

#[test]
fn test_caller_chain_is_never_modified() {
    let pattern = page(
        Pattern::tag("p").with_child(Pattern::bind("x").with_child(Pattern::regex(".").unwrap())),
    );
    let doc = html("<p>value</p>");
    let mut scopes = ScopeChain::new();
    scopes.set("preset", "1");

    let (result, chain) = match_tree(Some(&pattern), doc.root(), &scopes).unwrap();
    assert!(result.is_valid());
    assert_eq!(chain.get("x"), Some("value"));
    assert_eq!(chain.get("preset"), Some("1"));
    assert_eq!(scopes.get("x"), None);
}

#[test]
fn test_matching_is_deterministic() {
    let pattern = page(
        Pattern::repeat().with_child(
            Pattern::tag("p").with_child(Pattern::bind("n").with_child(Pattern::regex("[0-9]").unwrap())),
        ),
    );
    let doc = html("<p>1</p><p>2</p>");
    let first = run(&pattern, &doc);
    let second = run(&pattern, &doc);
    assert_eq!(first, second);
}
