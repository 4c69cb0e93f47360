// src/filter/fetcher.rs
use anyhow::{Context, Result};
use ego_tree::NodeRef;
use reqwest::Client;
use scraper::{Html, Node};
use tracing::{info, warn};

/// Upper bound on the excerpt handed to the classifier.
pub const MAX_EXCERPT_CHARS: usize = 3000;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Elements whose subtrees never carry job-posting content.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header", "noscript"];

/// Best-effort page fetcher for job application links.
///
/// Scraping is an enrichment, not a required input: every failure mode
/// (bad URL, timeout, non-2xx, unparseable body) degrades to `None` and a
/// warning in the log. One attempt per call, no retries.
pub struct ContentFetcher {
    client: Client,
}

impl ContentFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a posting page and reduce it to a bounded plain-text excerpt.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(text) if !text.is_empty() => {
                info!("Scraped {} characters from {}", text.len(), url);
                Some(text)
            }
            Ok(_) => {
                warn!("No visible text extracted from {}", url);
                None
            }
            Err(e) => {
                warn!("Failed to scrape {}: {:#}", url, e);
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch page")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(extract_visible_text(&html))
    }
}

/// Visible text of an HTML document: non-content subtrees skipped,
/// whitespace collapsed, truncated to `MAX_EXCERPT_CHARS`.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();

    // Explicit stack, not recursion: a hostile page can nest arbitrarily
    // deep and the fetcher must never blow the call stack.
    let mut pending: Vec<NodeRef<'_, Node>> = vec![document.tree.root()];
    while let Some(node) = pending.pop() {
        if let Some(element) = node.value().as_element() {
            if SKIPPED_ELEMENTS.contains(&element.name()) {
                continue;
            }
        }
        if let Some(text) = node.value().as_text() {
            raw.push_str(text);
            raw.push(' ');
        }
        // Reversed push keeps document order on pop.
        for child in node.children().rev() {
            pending.push(child);
        }
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_EXCERPT_CHARS {
        collapsed.chars().take(MAX_EXCERPT_CHARS).collect()
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_url_yields_none() {
        let fetcher = ContentFetcher::new(1).unwrap();
        assert_eq!(fetcher.fetch("not a url").await, None);
        assert_eq!(fetcher.fetch("").await, None);
    }

    #[tokio::test]
    async fn unreachable_host_yields_none() {
        let fetcher = ContentFetcher::new(1).unwrap();
        // Discard port on loopback: refused or filtered, never served.
        assert_eq!(fetcher.fetch("http://127.0.0.1:9/jobs/1").await, None);
    }

    #[test]
    fn strips_non_content_elements() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <header>Site Header</header>
                <nav>Menu</nav>
                <script>var secret = "TRACKING";</script>
                <main><p>Backend   Engineer at   Acme.</p></main>
                <footer>Copyright</footer>
              </body>
            </html>"#;
        let text = extract_visible_text(html);
        assert_eq!(text, "Backend Engineer at Acme.");
    }

    #[test]
    fn excerpt_is_bounded() {
        let body = "word ".repeat(2000);
        let html = format!("<html><body><p>{}</p></body></html>", body);
        let text = extract_visible_text(&html);
        assert_eq!(text.chars().count(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(extract_visible_text(""), "");
    }

    #[test]
    fn deeply_nested_markup_is_handled() {
        let depth = 100_000;
        let html = format!("{}hello{}", "<div>".repeat(depth), "</div>".repeat(depth));
        assert_eq!(extract_visible_text(&html), "hello");
    }
}
