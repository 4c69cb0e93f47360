// src/filter/denylist.rs
//
// Static knowledge about well-known large employers. The list is data, not
// logic: callers can inject their own set, and the classifier only consults
// it through `matched_term`.

use tracing::debug;

/// Name fragments of employers that are never SMBs.
const DEFAULT_TERMS: &[&str] = &[
    "amazon", "google", "microsoft", "apple", "meta", "facebook",
    "netflix", "adobe", "oracle", "salesforce", "ibm", "intel",
    "cisco", "nvidia", "qualcomm", "broadcom", "amd", "vmware",
    "workday", "servicenow", "slack", "zoom", "stripe", "square",
    "uber", "airbnb", "lyft", "doordash", "instacart", "spotify",
    "twitch", "github", "gitlab", "dropbox", "box", "asana",
    "monday", "notion", "figma", "sketch", "invision", "framer",
    "webflow", "wix", "squarespace", "shopify", "magento", "bigcommerce",
    "walmart", "target", "costco", "kroger", "safeway", "home depot",
    "lowes", "best buy", "dell", "hp", "lenovo", "canon", "sony",
    "samsung", "lg", "panasonic", "toyota", "honda", "ford", "gm",
    "tesla", "byd", "vw", "bmw", "mercedes", "audi", "porsche",
    "jpmorgan", "goldman", "morgan stanley", "bank of america",
    "wells fargo", "citigroup", "ubs", "barclays", "hsbc", "bnp paribas",
    "deutsche bank", "credit suisse", "nomura", "mizuho", "sumitomo",
    "mitsubishi ufj", "softbank", "rakuten", "gree", "dena",
    "accenture", "deloitte", "pwc", "ey", "kpmg", "mckinsey",
    "bcg", "bain", "cap gemini", "cognizant", "wipro", "tcs",
    "infosys", "hcl", "tech mahindra", "mindtree", "ltts", "persistent",
    "us army", "us navy", "us air force", "us marine", "doe", "dod",
    "nasa", "nsa", "dia", "state department", "defense contractor",
];

const FLAGGED_COMPANY_TYPES: &[&str] = &["corporation", "public", "enterprise"];

/// Injectable set of large-employer name fragments.
#[derive(Debug, Clone)]
pub struct Denylist {
    terms: Vec<String>,
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS.iter().copied())
    }
}

impl Denylist {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(|t| t.into().to_lowercase()).collect(),
        }
    }

    /// A denylist that matches nothing; disables the deterministic path.
    pub fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    /// The first term contained in the employer name, if any.
    pub fn matched_term(&self, employer_name: &str) -> Option<&str> {
        let name = employer_name.to_lowercase();
        self.terms
            .iter()
            .find(|term| name.contains(term.as_str()))
            .map(String::as_str)
    }

    /// Loose signal from the company-type field. Not decisive on its own:
    /// "corporation" covers plenty of five-person LLCs, so this only feeds
    /// the operator log.
    pub fn company_type_flagged(company_type: &str) -> bool {
        let lowered = company_type.to_lowercase();
        let flagged = FLAGGED_COMPANY_TYPES
            .iter()
            .any(|marker| lowered.contains(marker));
        if flagged {
            debug!("Potential large company type: {}", company_type);
        }
        flagged
    }
}
