use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Word lists and thresholds shared by every rubric.
///
/// All sections default to the built-in lists, so a YAML file only needs to
/// name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    pub thresholds: Thresholds,
    pub address: AddressLists,
    pub body: BodyLists,
    pub branding: Branding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub address_pass: u32,
    pub structural_pass: u32,
    pub weighted_pass: f64,
    /// Weighted criteria scoring below this produce a suggestion.
    pub suggestion_floor: f64,
    pub min_paragraph_breaks: usize,
    pub long_sentence_words: usize,
    pub max_long_sentences: usize,
    pub max_negative_markers: usize,
    pub min_positive_markers: usize,
    pub max_register_markers: usize,
    pub min_template_phrases: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            address_pass: 60,
            structural_pass: 70,
            weighted_pass: 7.0,
            suggestion_floor: 2.0,
            min_paragraph_breaks: 2,
            long_sentence_words: 25,
            max_long_sentences: 2,
            max_negative_markers: 2,
            min_positive_markers: 2,
            max_register_markers: 2,
            min_template_phrases: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressLists {
    pub disposable_domains: Vec<String>,
    pub invalid_domains: Vec<String>,
    pub non_deliverable_domains: Vec<String>,
    pub spam_terms: Vec<String>,
}

impl Default for AddressLists {
    fn default() -> Self {
        Self {
            disposable_domains: strings(&[
                "mailinator.com",
                "tempmail.com",
                "guerrillamail.com",
                "tempinbox.com",
                "yopmail.com",
                "sharklasers.com",
                "10minutemail.com",
                "trashmail.com",
                "mailnesia.com",
                "throwawaymail.com",
            ]),
            invalid_domains: strings(&["invalid.com", "notreal.org", "fakeemail.net"]),
            non_deliverable_domains: strings(&["example.com", "test.com", "domain.com"]),
            spam_terms: strings(&["admin", "info", "noreply", "spam", "test"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyLists {
    pub greetings: Vec<String>,
    pub sign_offs: Vec<String>,
    pub courtesy_titles: Vec<String>,
    /// Single words. A name captured after a greeting or title that matches
    /// one of these does not count as personal.
    pub generic_addressees: Vec<String>,
    pub jargon: Vec<String>,
    pub negative_markers: Vec<String>,
    pub positive_markers: Vec<String>,
    pub formal_markers: Vec<String>,
    pub casual_markers: Vec<String>,
    pub common_errors: Vec<String>,
    pub template_phrases: Vec<String>,
    pub next_step_phrases: Vec<String>,
    pub contact_phrases: Vec<String>,
}

impl Default for BodyLists {
    fn default() -> Self {
        Self {
            greetings: strings(&[
                "dear",
                "hello",
                "hi",
                "good morning",
                "good afternoon",
                "good evening",
                "greetings",
            ]),
            sign_offs: strings(&[
                "kind regards",
                "best regards",
                "warm regards",
                "regards",
                "sincerely",
                "yours sincerely",
                "yours faithfully",
                "best wishes",
                "thank you for choosing",
            ]),
            courtesy_titles: strings(&["mr", "mrs", "ms", "miss", "dr", "mx"]),
            generic_addressees: strings(&[
                "customer",
                "client",
                "passenger",
                "sir",
                "madam",
                "team",
                "all",
                "there",
                "valued",
            ]),
            jargon: strings(&[
                "aforementioned",
                "heretofore",
                "pursuant",
                "notwithstanding",
                "inter alia",
                "subrogation",
                "indemnification",
                "adjudication",
                "per annum",
                "synergy",
            ]),
            negative_markers: strings(&[
                "unfortunately",
                "regret",
                "cannot",
                "can't",
                "unable",
                "denied",
                "rejected",
                "refuse",
                "impossible",
                "problem",
                "fault",
                "failure",
            ]),
            positive_markers: strings(&[
                "thank you",
                "thanks",
                "pleased",
                "happy to",
                "glad",
                "appreciate",
                "delighted",
                "great news",
                "good news",
                "welcome",
            ]),
            formal_markers: strings(&[
                "hereby",
                "herewith",
                "aforementioned",
                "pursuant",
                "heretofore",
                "whereas",
                "notwithstanding",
                "henceforth",
                "hitherto",
            ]),
            casual_markers: strings(&[
                "hey",
                "gonna",
                "wanna",
                "gotta",
                "btw",
                "lol",
                "yeah",
                "awesome",
                "cool",
                "no worries",
            ]),
            common_errors: strings(&[
                "could of",
                "should of",
                "would of",
                "alot",
                "recieve",
                "recieved",
                "seperate",
                "definately",
                "occured",
                "untill",
                "wich",
                "thier",
                "accomodate",
                "adress",
                "compensaton",
                "you're claim",
                "your welcome",
            ]),
            template_phrases: strings(&[
                "thank you for choosing air travel claim",
                "we are pleased to inform you",
                "we have received",
                "your claim",
                "claim reference",
                "the airline",
                "compensation",
                "next steps",
                "if you have any questions",
                "please do not hesitate to contact us",
                "we will keep you updated",
            ]),
            next_step_phrases: strings(&[
                "next steps",
                "next step",
                "what happens next",
                "we will keep you updated",
                "we will be in touch",
                "we will contact you",
                "we will update you",
            ]),
            contact_phrases: strings(&[
                "contact us",
                "get in touch",
                "reach us",
                "reply to this email",
                "call us",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub company_name: String,
    pub sign_off: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "Air Travel Claim".to_string(),
            sign_off: "The Air Travel Claim Team".to_string(),
        }
    }
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            address: AddressLists::default(),
            body: BodyLists::default(),
            branding: Branding::default(),
        }
    }
}

impl RubricConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rubric config: {}", path.display()))?;
        let config: RubricConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse rubric config: {}", path.display()))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write rubric config: {}", path.display()))?;
        Ok(())
    }

    /// Load from `path` when it exists, otherwise fall back to the built-in lists.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            log::warn!(
                "Rubric config '{}' not found, using built-in lists",
                path.display()
            );
            Ok(Self::default())
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
