use regex::Regex;
use scraper::{Html, Selector};

/// Pulls the registrable `label.tld` suffix out of an href: optional
/// scheme, optional `www.`, at most one further subdomain label, then
/// the captured remainder. Matching is byte-exact — no case folding,
/// no IDN handling.
const REGISTRABLE_DOMAIN_PATTERN: &str = r"(?:https?://)?(?:www\.)?(?:[^.]+\.)?([^.]+\.[^/:]+)";

/// Collects anchor hrefs from probed pages, optionally dropping links
/// that resolve back to the scanned domain.
pub struct LinkExtractor {
    domain: String,
    restrict_to_other_domains: bool,
    domain_pattern: Regex,
}

impl LinkExtractor {
    pub fn new(domain: &str, restrict_to_other_domains: bool) -> Self {
        Self {
            domain: domain.to_string(),
            restrict_to_other_domains,
            domain_pattern: Regex::new(REGISTRABLE_DOMAIN_PATTERN)
                .expect("registrable-domain pattern is valid"),
        }
    }

    /// Returns the href of every anchor in `html`, in document order.
    ///
    /// Each href is truncated at its first whitespace, guarding against
    /// malformed attribute values with embedded strings. With the
    /// other-domains restriction on, hrefs whose registrable domain
    /// equals the scanned domain are dropped, and so are hrefs the
    /// pattern cannot make sense of. Deduplication is the result set's
    /// job, not this function's.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let anchors = Selector::parse("a[href]").expect("anchor selector is valid");

        let mut links = Vec::new();
        for element in document.select(&anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(link) = href.split_whitespace().next() else {
                continue;
            };

            if self.restrict_to_other_domains {
                match self.domain_pattern.captures(link) {
                    Some(captures) if &captures[1] != self.domain.as_str() => {}
                    // Same domain, or nothing usable extracted.
                    _ => continue,
                }
            }

            links.push(link.to_string());
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_hrefs_in_document_order() {
        let extractor = LinkExtractor::new("example.com", false);
        let html = r#"<html><body>
            <a href="http://one.org/a">one</a>
            <p><a href="http://two.org/b">two</a></p>
            <a href="/relative">three</a>
        </body></html>"#;

        assert_eq!(
            extractor.extract(html),
            vec!["http://one.org/a", "http://two.org/b", "/relative"]
        );
    }

    #[test]
    fn truncates_href_at_first_whitespace() {
        let extractor = LinkExtractor::new("example.com", false);
        let html = r#"<a href="http://one.org/a trailing junk">x</a>"#;

        assert_eq!(extractor.extract(html), vec!["http://one.org/a"]);
    }

    #[test]
    fn restriction_drops_same_domain_and_unparsable_hrefs() {
        let extractor = LinkExtractor::new("example.com", true);
        let html = r#"
            <a href="http://example.com/page">same</a>
            <a href="https://www.example.com/page">same-www</a>
            <a href="http://other.org/x">other</a>
            <a href="/relative">no-domain</a>
        "#;

        assert_eq!(extractor.extract(html), vec!["http://other.org/x"]);
    }

    #[test]
    fn unrestricted_extraction_keeps_same_domain_hrefs() {
        let extractor = LinkExtractor::new("example.com", false);
        let html = r#"
            <a href="http://example.com/page">same</a>
            <a href="http://other.org/x">other</a>
        "#;

        assert_eq!(
            extractor.extract(html),
            vec!["http://example.com/page", "http://other.org/x"]
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = LinkExtractor::new("example.com", true);
        let html = r#"<a href="http://other.org/x">x</a><a href="http://other.org/x">x</a>"#;

        let first = extractor.extract(html);
        let second = extractor.extract(html);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_and_malformed_documents_yield_nothing() {
        let extractor = LinkExtractor::new("example.com", false);
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("<a href=\"\">empty</a>").is_empty());
        assert!(extractor.extract("<<<not html>>>").is_empty());
    }
}
