// src/filter/classifier.rs
use super::denylist::Denylist;
use super::gemini::TextGenerator;
use super::JobRecord;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const AFFIRMATIVE_VERDICT: &str = "yes";
pub const NEGATIVE_VERDICT: &str = "no";

/// Prompt-size bounds. The description comes from the upstream API, the
/// excerpt from the fetcher; both are capped independently.
const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_EXCERPT_CHARS: usize = 1000;

/// Decides whether a posting's employer looks like an SMB.
///
/// Order of signals: the denylist pre-filter runs first and answers "no"
/// without spending an AI call; otherwise the injected backend is asked for
/// a one-word verdict. A missing or failing backend degrades to the default
/// verdict selected by `keep_on_failure` — losing legitimate postings is
/// worse than keeping a large employer by mistake, so the default leans
/// affirmative.
pub struct Classifier {
    backend: Option<Arc<dyn TextGenerator>>,
    denylist: Denylist,
    keep_on_failure: bool,
}

impl Classifier {
    pub fn new(
        backend: Option<Arc<dyn TextGenerator>>,
        denylist: Denylist,
        keep_on_failure: bool,
    ) -> Self {
        Self {
            backend,
            denylist,
            keep_on_failure,
        }
    }

    /// Free-text verdict for one posting, already trimmed and lower-cased.
    /// Never fails; every failure mode resolves to the default verdict.
    pub async fn classify(&self, job: &JobRecord, excerpt: Option<&str>) -> String {
        if let Some(term) = self.denylist.matched_term(job.employer_name()) {
            debug!(
                "Large employer detected: {} (matched: {})",
                job.employer_name(),
                term
            );
            return NEGATIVE_VERDICT.to_string();
        }

        // Signal only, see Denylist::company_type_flagged.
        Denylist::company_type_flagged(job.company_type());

        let Some(backend) = &self.backend else {
            warn!(
                "No AI backend configured, defaulting to '{}' for {}",
                self.default_verdict(),
                job.employer_name()
            );
            return self.default_verdict().to_string();
        };

        let prompt = build_prompt(job, excerpt);
        match backend.generate(&prompt).await {
            Ok(text) => {
                let verdict = text.trim().to_lowercase();
                info!("AI verdict for {}: {}", job.employer_name(), verdict);
                verdict
            }
            Err(e) => {
                error!("AI call failed for {}: {:#}", job.employer_name(), e);
                self.default_verdict().to_string()
            }
        }
    }

    fn default_verdict(&self) -> &'static str {
        if self.keep_on_failure {
            AFFIRMATIVE_VERDICT
        } else {
            NEGATIVE_VERDICT
        }
    }
}

/// Natural-language prompt embedding the posting's fields and, when the
/// fetcher produced one, the scraped excerpt.
pub(crate) fn build_prompt(job: &JobRecord, excerpt: Option<&str>) -> String {
    let mut job_info = format!(
        "Job Title: {}\n\
         Employer Name: {}\n\
         Company Type: {}\n\
         Employer Website: {}\n\
         Location: {}\n\
         Job Description: {}\n\
         NAICS Code: {}\n\
         NAICS Name: {}\n",
        job.title(),
        job.employer_name(),
        job.company_type(),
        job.website(),
        job.location(),
        truncate_chars(job.description(), MAX_DESCRIPTION_CHARS),
        job.naics_code(),
        job.naics_name(),
    );

    if let Some(excerpt) = excerpt {
        job_info.push_str(&format!(
            "\n\nScraped Content from Job Link:\n{}",
            truncate_chars(excerpt, MAX_EXCERPT_CHARS)
        ));
    }

    format!(
        "You are an expert at analyzing companies and identifying their size.\n\
         \n\
         Analyze the following job posting details and determine if this job is from a SMALL or MEDIUM business ONLY.\n\
         \n\
         {}\n\
         \n\
         CRITICAL RULES:\n\
         - ONLY accept: Small businesses (under 100 employees) or Medium businesses (100-500 employees)\n\
         - REJECT everything else:\n\
           * Large companies (500+ employees)\n\
           * Enterprise companies\n\
           * Fortune 500/1000 companies\n\
           * Well-known corporations (Google, Amazon, Microsoft, Apple, Meta, etc.)\n\
           * Any company with thousands of employees\n\
           * Public companies with large market cap\n\
           * Big tech companies\n\
           * Large consulting firms\n\
           * Large financial institutions\n\
           * Large defense contractors\n\
         \n\
         If it's a SMALL or MEDIUM business (SMB) ONLY, answer: yes\n\
         If it's anything larger than medium business, answer: no\n\
         \n\
         Answer with ONLY ONE WORD: \"yes\" or \"no\"\n",
        job_info
    )
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedResponse(&'static str);

    #[async_trait]
    impl TextGenerator for FixedResponse {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl TextGenerator for AlwaysFails {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            anyhow::bail!("backend down")
        }
    }

    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CountingBackend {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("no".to_string())
        }
    }

    fn job(employer: &str) -> JobRecord {
        serde_json::from_value(serde_json::json!({
            "job_title": "Software Engineer",
            "employer_name": employer,
            "job_location": "Portland, OR",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn no_backend_defaults_affirmative() {
        let classifier = Classifier::new(None, Denylist::empty(), true);
        let verdict = classifier.classify(&job("Local Tech Solutions"), None).await;
        assert_eq!(verdict, AFFIRMATIVE_VERDICT);
    }

    #[tokio::test]
    async fn failing_backend_defaults_affirmative() {
        let classifier = Classifier::new(Some(Arc::new(AlwaysFails)), Denylist::empty(), true);
        let verdict = classifier.classify(&job("Local Tech Solutions"), None).await;
        assert_eq!(verdict, AFFIRMATIVE_VERDICT);
    }

    #[tokio::test]
    async fn drop_bias_inverts_the_default() {
        let classifier = Classifier::new(Some(Arc::new(AlwaysFails)), Denylist::empty(), false);
        let verdict = classifier.classify(&job("Local Tech Solutions"), None).await;
        assert_eq!(verdict, NEGATIVE_VERDICT);
    }

    #[tokio::test]
    async fn denylist_short_circuits_the_backend() {
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        let classifier = Classifier::new(Some(backend.clone()), Denylist::default(), true);
        let verdict = classifier.classify(&job("Google"), None).await;
        assert_eq!(verdict, NEGATIVE_VERDICT);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn backend_verdict_is_normalized() {
        let classifier =
            Classifier::new(Some(Arc::new(FixedResponse("  YES. \n"))), Denylist::empty(), true);
        let verdict = classifier.classify(&job("Local Tech Solutions"), None).await;
        assert_eq!(verdict, "yes.");
    }

    #[test]
    fn prompt_embeds_fields_and_truncates() {
        let mut record = job("Local Tech Solutions");
        record.job_description = Some("x".repeat(800));

        let prompt = build_prompt(&record, None);
        assert!(prompt.contains("Employer Name: Local Tech Solutions"));
        assert!(prompt.contains(&"x".repeat(500)));
        assert!(!prompt.contains(&"x".repeat(501)));
        assert!(!prompt.contains("Scraped Content"));
        assert!(prompt.contains("ONLY ONE WORD"));
    }

    #[test]
    fn prompt_bounds_the_excerpt() {
        let record = job("Local Tech Solutions");
        let excerpt = "y".repeat(3000);

        let prompt = build_prompt(&record, Some(&excerpt));
        assert!(prompt.contains("Scraped Content from Job Link:"));
        assert!(prompt.contains(&"y".repeat(1000)));
        assert!(!prompt.contains(&"y".repeat(1001)));
    }

    #[test]
    fn missing_fields_render_as_sentinel() {
        let record: JobRecord = serde_json::from_str("{}").unwrap();
        let prompt = build_prompt(&record, None);
        assert!(prompt.contains("Employer Name: N/A"));
        assert!(prompt.contains("NAICS Code: N/A"));
    }
}
