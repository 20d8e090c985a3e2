//! Breadcrumb trail derived from a request path.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
    pub is_last: bool,
}

/// One breadcrumb per path segment; the root path has none.
///
/// Labels drop `[`/`]`, turn hyphens into spaces and, with `capitalize`,
/// upper-case the first letter of each word. Query strings and fragments
/// are ignored.
pub fn breadcrumbs(path: &str, capitalize: bool) -> Vec<Breadcrumb> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut href = String::new();
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            href.push('/');
            href.push_str(segment);
            Breadcrumb {
                label: label(segment, capitalize),
                href: href.clone(),
                is_last: i + 1 == segments.len(),
            }
        })
        .collect()
}

fn label(segment: &str, capitalize: bool) -> String {
    let clean: String = segment
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();

    if !capitalize {
        return clean;
    }

    clean
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_breadcrumbs() {
        assert!(breadcrumbs("/", true).is_empty());
        assert!(breadcrumbs("", true).is_empty());
    }

    #[test]
    fn test_breadcrumb_trail() {
        let trail = breadcrumbs("/projects/my-first-app", true);
        assert_eq!(
            trail,
            vec![
                Breadcrumb {
                    label: "Projects".into(),
                    href: "/projects".into(),
                    is_last: false,
                },
                Breadcrumb {
                    label: "My First App".into(),
                    href: "/projects/my-first-app".into(),
                    is_last: true,
                },
            ]
        );
    }

    #[test]
    fn test_labels_without_capitalization() {
        let trail = breadcrumbs("/post/[slug]/hello-world", false);
        let labels: Vec<_> = trail.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["post", "slug", "hello world"]);
        assert_eq!(trail[1].href, "/post/[slug]");
    }

    #[test]
    fn test_query_string_ignored() {
        let trail = breadcrumbs("/posts?search=rust", true);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].label, "Posts");
        assert_eq!(trail[0].href, "/posts");
    }

    #[test]
    fn test_repeated_slashes() {
        let trail = breadcrumbs("//log//day-3/", true);
        let hrefs: Vec<_> = trail.iter().map(|b| b.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/log", "/log/day-3"]);
        assert_eq!(trail[1].label, "Day 3");
    }
}
