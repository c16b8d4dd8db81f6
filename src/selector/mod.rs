//! Selector Infrastructure
//!
//! Rules are plain predicate functions over a `Selection`; heuristic chains
//! are ordered slices of pure strategy functions tried with [`first_success`].

use dom_query::Selection;

pub mod body;
pub mod title;

/// A selector rule that tests if a selection matches certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// Query for all elements matching the rule, in document order.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::{dom, selector};
///
/// let doc = dom::parse(r#"<div><p class="content">a</p><p>b</p><p class="content">c</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     dom::class_contains(sel, "content")
/// }
///
/// assert_eq!(selector::query_all(&root, has_content_class).len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}

/// Try `strategies` in order and return the first `Some`.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::selector::first_success;
///
/// fn never(_: &str) -> Option<usize> { None }
/// fn length(s: &str) -> Option<usize> { Some(s.len()) }
///
/// let strategies: [fn(&str) -> Option<usize>; 2] = [never, length];
/// assert_eq!(first_success(&strategies, "abc"), Some(3));
/// ```
pub fn first_success<C: ?Sized, T, F>(strategies: &[F], ctx: &C) -> Option<T>
where
    F: Fn(&C) -> Option<T>,
{
    strategies.iter().find_map(|strategy| strategy(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    fn is_target(sel: &Selection) -> bool {
        dom::class_contains(sel, "target")
    }

    #[test]
    fn test_query_all_document_order() {
        let doc = dom::parse(
            r#"
            <div>
                <section>
                    <p class="target">Deep first</p>
                </section>
                <p class="target">Shallow second</p>
            </div>
        "#,
        );
        let root = doc.select("div");

        let texts: Vec<String> = query_all(&root, is_target)
            .iter()
            .map(|s| dom::text_content(s).to_string())
            .collect();
        assert_eq!(texts, vec!["Deep first", "Shallow second"]);
    }

    #[test]
    fn test_query_all_finds_all_matches() {
        let doc = dom::parse(
            r#"<div><p class="target">1</p><span>no</span><p class="target">2</p></div>"#,
        );
        let root = doc.select("div");

        assert_eq!(query_all(&root, is_target).len(), 2);
    }

    #[test]
    fn test_query_all_empty_when_no_match() {
        let doc = dom::parse("<div><p>content</p></div>");
        assert!(query_all(&doc.select("div"), is_target).is_empty());
    }

    #[test]
    fn test_first_success_stops_at_first_some() {
        fn none(_: &i32) -> Option<i32> {
            None
        }
        fn double(x: &i32) -> Option<i32> {
            Some(x * 2)
        }
        fn unreachable_strategy(_: &i32) -> Option<i32> {
            panic!("must not be called")
        }

        let strategies: [fn(&i32) -> Option<i32>; 3] = [none, double, unreachable_strategy];
        assert_eq!(first_success(&strategies, &4), Some(8));
    }

    #[test]
    fn test_first_success_all_fail() {
        fn none(_: &i32) -> Option<i32> {
            None
        }
        let strategies: [fn(&i32) -> Option<i32>; 2] = [none, none];
        assert_eq!(first_success(&strategies, &1), None);
    }
}
