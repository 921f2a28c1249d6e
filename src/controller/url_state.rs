//! The shareable part of the portfolio URL.
//!
//! `?category=Landscape&page=2&q=fog` addresses one page of one filtered
//! view. Default values are left out of the query so the plain portfolio URL
//! stays clean.

use url::Url;

use super::ALL_CATEGORY;

pub const CATEGORY_PARAM: &str = "category";
pub const PAGE_PARAM: &str = "page";
pub const SEARCH_PARAM: &str = "q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    pub category: String,
    /// 1-based page number
    pub page: usize,
    pub search: String,
}

impl Default for UrlState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORY.to_string(),
            page: 1,
            search: String::new(),
        }
    }
}

impl UrlState {
    /// Read view state from the query string. Missing or malformed values
    /// fall back to their defaults; the first occurrence of a key wins.
    pub fn from_url(url: &Url) -> Self {
        let mut state = Self::default();
        let mut seen = (false, false, false);

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                CATEGORY_PARAM if !seen.0 => {
                    seen.0 = true;
                    if !value.is_empty() {
                        state.category = value.to_string();
                    }
                }
                PAGE_PARAM if !seen.1 => {
                    seen.1 = true;
                    state.page = parse_page(&value);
                }
                SEARCH_PARAM if !seen.2 => {
                    seen.2 = true;
                    state.search = value.trim().to_string();
                }
                _ => {}
            }
        }

        state
    }

    /// Rewrite `url`'s query to describe this state.
    ///
    /// Query parameters this module does not own are kept, in order, ahead
    /// of the view parameters.
    pub fn apply(&self, url: &mut Url) {
        let preserved: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_view_param(key))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut pairs = preserved;
        if self.category != ALL_CATEGORY {
            pairs.push((CATEGORY_PARAM.to_string(), self.category.clone()));
        }
        if self.page > 1 {
            pairs.push((PAGE_PARAM.to_string(), self.page.to_string()));
        }
        if !self.search.is_empty() {
            pairs.push((SEARCH_PARAM.to_string(), self.search.clone()));
        }

        url.set_query(None);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }
}

fn is_view_param(key: &str) -> bool {
    matches!(key, CATEGORY_PARAM | PAGE_PARAM | SEARCH_PARAM)
}

fn parse_page(raw: &str) -> usize {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_defaults_without_query() {
        let state = UrlState::from_url(&url("https://example.com/portfolio"));
        assert_eq!(state, UrlState::default());
    }

    #[test]
    fn test_reads_params() {
        let state = UrlState::from_url(&url(
            "https://example.com/portfolio?category=Black+%26+White&page=3&q=fog",
        ));
        assert_eq!(state.category, "Black & White");
        assert_eq!(state.page, 3);
        assert_eq!(state.search, "fog");
    }

    #[test]
    fn test_malformed_page_falls_back() {
        for query in ["page=abc", "page=0", "page=-2", "page=", "page=2.5"] {
            let state = UrlState::from_url(&url(&format!("https://example.com/p?{}", query)));
            assert_eq!(state.page, 1, "query {}", query);
        }
    }

    #[test]
    fn test_category_kept_verbatim() {
        let state = UrlState::from_url(&url("https://example.com/p?category=Color+"));
        assert_eq!(state.category, "Color ");

        let state = UrlState::from_url(&url("https://example.com/p?category="));
        assert_eq!(state.category, ALL_CATEGORY);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let state = UrlState::from_url(&url("https://example.com/p?page=2&page=5"));
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_apply_omits_defaults() {
        let mut u = url("https://example.com/portfolio?category=Wildlife&page=4");
        UrlState::default().apply(&mut u);
        assert_eq!(u.as_str(), "https://example.com/portfolio");
    }

    #[test]
    fn test_apply_preserves_foreign_params() {
        let mut u = url("https://example.com/portfolio?ref=mail&page=9");
        let state = UrlState {
            category: "Wildlife".to_string(),
            page: 2,
            search: String::new(),
        };
        state.apply(&mut u);
        assert_eq!(
            u.as_str(),
            "https://example.com/portfolio?ref=mail&category=Wildlife&page=2"
        );
    }

    #[test]
    fn test_apply_then_read_back() {
        let state = UrlState {
            category: "Black & White".to_string(),
            page: 7,
            search: "old barn".to_string(),
        };
        let mut u = url("https://example.com/portfolio");
        state.apply(&mut u);
        assert_eq!(UrlState::from_url(&u), state);
    }
}
