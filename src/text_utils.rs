//! Text predicates shared by the body rubrics.
//!
//! Everything here is a pure function of the input text. Configurable lists are
//! compiled once into [`PhraseSet`]s and [`BodyPatterns`] when a rubric is built.

use crate::error::QcError;
use crate::rubric_config::BodyLists;
use regex::Regex;

/// A list of phrases matched case-insensitively on word boundaries.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    combined: Option<Regex>,
    individual: Vec<Regex>,
}

impl PhraseSet {
    pub fn new(list: &'static str, phrases: &[String]) -> Result<Self, QcError> {
        let mut sorted: Vec<&str> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        // Longest first so overlapping alternatives prefer the fuller phrase
        sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        sorted.dedup();

        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| QcError::InvalidPattern { list, source })
        };

        let individual = sorted
            .iter()
            .map(|p| compile(format!("(?i){}", bounded(p))))
            .collect::<Result<Vec<_>, _>>()?;

        let combined = if sorted.is_empty() {
            None
        } else {
            let alternation = sorted
                .iter()
                .map(|p| bounded(p))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(format!("(?i)(?:{alternation})"))?)
        };

        Ok(Self {
            combined,
            individual,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.combined.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Total number of non-overlapping occurrences.
    pub fn count(&self, text: &str) -> usize {
        self.combined
            .as_ref()
            .map_or(0, |re| re.find_iter(text).count())
    }

    /// A phrase matches at the very start of `line`.
    pub fn starts(&self, line: &str) -> bool {
        self.combined
            .as_ref()
            .is_some_and(|re| re.find(line).is_some_and(|m| m.start() == 0))
    }

    /// Number of distinct phrases present at least once.
    pub fn distinct_matches(&self, text: &str) -> usize {
        self.individual.iter().filter(|re| re.is_match(text)).count()
    }
}

/// Escape a phrase and add `\b` on edges that are word characters. Spaces
/// inside the phrase match any whitespace run, so hard-wrapped text still matches.
fn bounded(phrase: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let start = if is_word(phrase.chars().next()) { r"\b" } else { "" };
    let end = if is_word(phrase.chars().last()) { r"\b" } else { "" };
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    format!("{start}{body}{end}")
}

fn alternation(items: &[String]) -> String {
    let mut sorted: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    sorted
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|")
}

/// Compiled patterns for email-body criteria.
#[derive(Debug, Clone)]
pub struct BodyPatterns {
    greeting_line: Option<Regex>,
    greeting_name: Option<Regex>,
    title_name: Option<Regex>,
    generic_addressees: Vec<String>,
    claim_reference: Regex,
    your_subject: Regex,
    email_address: Regex,
    phone_candidate: Regex,
    pub sign_offs: PhraseSet,
    pub jargon: PhraseSet,
    pub negative: PhraseSet,
    pub positive: PhraseSet,
    pub formal: PhraseSet,
    pub casual: PhraseSet,
    pub common_errors: PhraseSet,
    pub template_phrases: PhraseSet,
    pub next_steps: PhraseSet,
    pub contact_phrases: PhraseSet,
}

impl BodyPatterns {
    pub fn compile(lists: &BodyLists) -> Result<Self, QcError> {
        let regex = |list: &'static str, pattern: &str| {
            Regex::new(pattern).map_err(|source| QcError::InvalidPattern { list, source })
        };

        let greetings = alternation(&lists.greetings);
        let titles = alternation(&lists.courtesy_titles);

        let greeting_line = if greetings.is_empty() {
            None
        } else {
            Some(regex("greetings", &format!(r"(?i)^\s*(?:{greetings})\b"))?)
        };
        let title_prefix = if titles.is_empty() {
            String::new()
        } else {
            format!(r"(?:(?i:{titles})\.?[ \t]+)?")
        };
        let greeting_name = if greetings.is_empty() {
            None
        } else {
            Some(regex(
                "greetings",
                &format!(r"\b(?i:{greetings})[ \t]+{title_prefix}([A-Z][A-Za-z'-]+)"),
            )?)
        };
        let title_name = if titles.is_empty() {
            None
        } else {
            Some(regex(
                "courtesy_titles",
                &format!(r"\b(?i:{titles})\.?[ \t]+([A-Z][A-Za-z'-]+)"),
            )?)
        };

        Ok(Self {
            greeting_line,
            greeting_name,
            title_name,
            generic_addressees: lists
                .generic_addressees
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            claim_reference: regex(
                "claim_reference",
                r"(?i)(?:\b(?:claim|booking|case)\s+(?:reference|ref|number|no|id)\b|\b(?:claim|booking|case|reference|ref)\s*(?:#|:|no\.?)?\s*[a-z]{0,4}-?\d{3,})",
            )?,
            your_subject: regex(
                "your_subject",
                r"(?i)\byour\s+(?:claim|flight|booking|case|request)s?\b",
            )?,
            email_address: regex(
                "email_address",
                r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
            )?,
            phone_candidate: regex("phone", r"\+?\d[\d ().-]{5,}\d")?,
            sign_offs: PhraseSet::new("sign_offs", &lists.sign_offs)?,
            jargon: PhraseSet::new("jargon", &lists.jargon)?,
            negative: PhraseSet::new("negative_markers", &lists.negative_markers)?,
            positive: PhraseSet::new("positive_markers", &lists.positive_markers)?,
            formal: PhraseSet::new("formal_markers", &lists.formal_markers)?,
            casual: PhraseSet::new("casual_markers", &lists.casual_markers)?,
            common_errors: PhraseSet::new("common_errors", &lists.common_errors)?,
            template_phrases: PhraseSet::new("template_phrases", &lists.template_phrases)?,
            next_steps: PhraseSet::new("next_step_phrases", &lists.next_step_phrases)?,
            contact_phrases: PhraseSet::new("contact_phrases", &lists.contact_phrases)?,
        })
    }

    /// First non-empty line opens with a recognised greeting word.
    pub fn has_greeting(&self, text: &str) -> bool {
        match (&self.greeting_line, TextUtils::first_nonempty_line(text)) {
            (Some(re), Some(line)) => re.is_match(line),
            _ => false,
        }
    }

    pub fn has_sign_off(&self, text: &str) -> bool {
        self.sign_offs.is_match(text)
    }

    /// "Dear Jane" or "Mr Smith" style addressing with a real name.
    pub fn has_personal_name(&self, text: &str) -> bool {
        [&self.greeting_name, &self.title_name]
            .into_iter()
            .flatten()
            .any(|re| {
                re.captures_iter(text).any(|caps| {
                    caps.get(1).is_some_and(|name| {
                        !self
                            .generic_addressees
                            .contains(&name.as_str().to_lowercase())
                    })
                })
            })
    }

    pub fn has_claim_reference(&self, text: &str) -> bool {
        self.claim_reference.is_match(text)
    }

    /// "your claim", "your flight", "your booking", ...
    pub fn has_your_subject(&self, text: &str) -> bool {
        self.your_subject.is_match(text)
    }

    pub fn has_next_steps(&self, text: &str) -> bool {
        self.next_steps.is_match(text)
    }

    pub fn has_contact_info(&self, text: &str) -> bool {
        self.email_address.is_match(text)
            || self.has_phone_number(text)
            || self.contact_phrases.is_match(text)
    }

    /// Paragraphs whose final sentence has no terminal punctuation.
    ///
    /// Consecutive non-blank lines form one paragraph, so wrapped sentences are
    /// judged as a whole. An opening greeting line and everything from the first
    /// line that starts with a sign-off are exempt.
    pub fn unterminated_paragraphs(&self, text: &str) -> usize {
        let mut lines = text
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .peekable();
        let opens_with_greeting = lines.peek().is_some_and(|first| {
            self.greeting_line
                .as_ref()
                .is_some_and(|re| re.is_match(first))
        });
        if opens_with_greeting {
            lines.next();
        }

        let mut missing = 0;
        let mut paragraph_end: Option<&str> = None;
        let body = lines.take_while(|l| !self.sign_offs.starts(l));
        for line in body.chain(std::iter::once("")) {
            if line.is_empty() {
                if paragraph_end
                    .take()
                    .is_some_and(|last| !TextUtils::ends_sentence(last))
                {
                    missing += 1;
                }
            } else {
                paragraph_end = Some(line);
            }
        }
        missing
    }

    /// A run of 7+ digits that is not the tail of a hyphenated reference code.
    fn has_phone_number(&self, text: &str) -> bool {
        self.phone_candidate.find_iter(text).any(|m| {
            let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
            let attached = text[..m.start()]
                .chars()
                .last()
                .is_some_and(|c| c.is_alphanumeric() || c == '-');
            digits >= 7 && !attached
        })
    }
}

/// Plain text helpers with no configuration.
pub struct TextUtils;

impl TextUtils {
    pub fn first_nonempty_line(text: &str) -> Option<&str> {
        text.lines().map(str::trim).find(|l| !l.is_empty())
    }

    /// Number of blank-line gaps between blocks of content.
    pub fn paragraph_breaks(text: &str) -> usize {
        let mut breaks = 0;
        let mut seen_content = false;
        let mut in_gap = false;

        for line in text.lines() {
            if line.trim().is_empty() {
                in_gap = seen_content;
            } else {
                if in_gap {
                    breaks += 1;
                }
                seen_content = true;
                in_gap = false;
            }
        }

        breaks
    }

    /// Two or more consecutive spaces inside a line. Indentation is ignored.
    pub fn has_double_space(text: &str) -> bool {
        text.lines().any(|line| line.trim().contains("  "))
    }

    /// The same word twice in a row, as in "the the".
    pub fn has_repeated_word(text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.windows(2).any(|pair| {
            let first = pair[0];
            let second = pair[1].trim_end_matches(|c: char| !c.is_alphanumeric());
            is_word(first) && first.eq_ignore_ascii_case(second)
        })
    }

    pub fn word_count(text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Sentences split on terminal punctuation.
    pub fn sentences(text: &str) -> Vec<&str> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn long_sentence_count(text: &str, max_words: usize) -> usize {
        Self::sentences(text)
            .into_iter()
            .filter(|s| Self::word_count(s) > max_words)
            .count()
    }

    /// Ends in `.`, `!`, `?`, `:` or `;`, ignoring closing quotes and brackets.
    pub fn ends_sentence(text: &str) -> bool {
        text.trim_end()
            .trim_end_matches(['"', '\'', ')', '\u{201d}', '\u{2019}'])
            .ends_with(['.', '!', '?', ':', ';'])
    }
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphabetic() || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> BodyPatterns {
        BodyPatterns::compile(&BodyLists::default()).unwrap()
    }

    #[test]
    fn test_phrase_set_counts_on_word_boundaries() {
        let set = PhraseSet::new(
            "test",
            &["cannot".to_string(), "problem".to_string()],
        )
        .unwrap();

        assert_eq!(set.count("We cannot fix the problem. We CANNOT."), 3);
        assert_eq!(set.count("problematic"), 0);
        assert!(!set.is_match("nothing negative"));
    }

    #[test]
    fn test_phrase_set_distinct_matches_handles_overlap() {
        let set = PhraseSet::new(
            "test",
            &["your claim".to_string(), "claim reference".to_string()],
        )
        .unwrap();

        assert_eq!(set.distinct_matches("Your claim reference is ATC-1."), 2);
        assert_eq!(set.distinct_matches("your claim, your claim"), 1);
    }

    #[test]
    fn test_empty_phrase_set_never_matches() {
        let set = PhraseSet::new("test", &[]).unwrap();
        assert!(!set.is_match("anything"));
        assert_eq!(set.count("anything"), 0);
    }

    #[test]
    fn test_greeting_must_open_the_email() {
        let p = patterns();
        assert!(p.has_greeting("\n\nDear Jane,\nThanks."));
        assert!(p.has_greeting("Good morning Mr Patel,"));
        assert!(!p.has_greeting("Thanks for writing.\nDear Jane"));
        assert!(!p.has_greeting("Highlights of your claim"));
    }

    #[test]
    fn test_personal_name() {
        let p = patterns();
        assert!(p.has_personal_name("Dear John,"));
        assert!(p.has_personal_name("Dear Mrs. Okafor,"));
        assert!(p.has_personal_name("As discussed with Ms Lee yesterday"));
        assert!(!p.has_personal_name("Dear Customer,"));
        assert!(!p.has_personal_name("Dear Sir or Madam,"));
        assert!(!p.has_personal_name("Hi there,"));
    }

    #[test]
    fn test_claim_reference() {
        let p = patterns();
        assert!(p.has_claim_reference("Your claim reference is ATC-20481."));
        assert!(p.has_claim_reference("Booking ABC123 has been located"));
        assert!(p.has_claim_reference("Case #55821"));
        assert!(!p.has_claim_reference("We have reviewed your claim."));
    }

    #[test]
    fn test_contact_info() {
        let p = patterns();
        assert!(p.has_contact_info("Write to support@airtravelclaim.com"));
        assert!(p.has_contact_info("Call +44 20 7946 0958"));
        assert!(p.has_contact_info("Please contact us any time."));
        assert!(!p.has_contact_info("Reference ATC-2024-001234 is open."));
    }

    #[test]
    fn test_your_subject() {
        let p = patterns();
        assert!(p.has_your_subject("We reviewed your flight details"));
        assert!(p.has_your_subject("Your bookings are confirmed"));
        assert!(!p.has_your_subject("yourself and your family"));
    }

    #[test]
    fn test_paragraph_breaks() {
        assert_eq!(TextUtils::paragraph_breaks("one line"), 0);
        assert_eq!(TextUtils::paragraph_breaks("a\n\nb"), 1);
        assert_eq!(TextUtils::paragraph_breaks("\n\na\n\n\n\nb\n \nc\n\n"), 2);
        assert_eq!(TextUtils::paragraph_breaks("a\r\n\r\nb"), 1);
    }

    #[test]
    fn test_double_space_and_repeated_word() {
        assert!(TextUtils::has_double_space("We have  received it."));
        assert!(!TextUtils::has_double_space("    indented line\n  another"));

        assert!(TextUtils::has_repeated_word("We sent the the documents."));
        assert!(TextUtils::has_repeated_word("It is done done."));
        assert!(!TextUtils::has_repeated_word("That is that. That is all."));
        assert!(!TextUtils::has_repeated_word("Flight 12 12 delayed"));
    }

    #[test]
    fn test_sentences() {
        assert_eq!(
            TextUtils::sentences("One two. Three!  Four?"),
            vec!["One two", "Three", "Four"]
        );
        let long = vec!["word"; 30].join(" ");
        let text = format!("{long}. Short one. {long}.");
        assert_eq!(TextUtils::long_sentence_count(&text, 25), 2);
    }

    #[test]
    fn test_ends_sentence() {
        assert!(TextUtils::ends_sentence("The airline has agreed to pay (in full)."));
        assert!(TextUtils::ends_sentence("He said \"approved.\""));
        assert!(TextUtils::ends_sentence("Next steps:"));
        assert!(!TextUtils::ends_sentence("Your claim is approved"));
    }

    #[test]
    fn test_wrapped_paragraphs_are_judged_as_a_whole() {
        let text = "Dear John,

Thank you for contacting us about your claim. We are pleased to
inform you that the airline has accepted your claim reference
ATC-20481.

Next steps: we will transfer the compensation to your bank account
within 14 days.

Kind regards,
The Air Travel Claim Team";
        assert_eq!(patterns().unterminated_paragraphs(text), 0);
    }

    #[test]
    fn test_short_unpunctuated_sentence_is_counted() {
        let p = patterns();
        assert_eq!(
            p.unterminated_paragraphs("Dear John,\n\nYour claim is approved\n\nKind regards"),
            1
        );
        assert_eq!(
            p.unterminated_paragraphs("We received it\nand it is open\n\nAll done."),
            1
        );
    }

    #[test]
    fn test_greeting_and_sign_off_block_are_exempt() {
        let p = patterns();
        assert_eq!(p.unterminated_paragraphs("Hi Sam\n\nAll done."), 0);
        assert_eq!(
            p.unterminated_paragraphs(
                "Dear Sam,\nAll done.\n\nBest regards\nThe Air Travel Claim Team\nLondon office"
            ),
            0
        );
        // Without a greeting the first paragraph is checked like any other
        assert_eq!(p.unterminated_paragraphs("Claim open\n\nAll done."), 1);
    }

    #[test]
    fn test_phrases_match_across_line_breaks() {
        let set = PhraseSet::new("test", &["please do not hesitate".to_string()]).unwrap();
        assert!(set.is_match("please do not\nhesitate to call"));
        assert!(set.starts("Please  do not hesitate"));
        assert!(!set.starts("So please do not hesitate"));
    }
}
