//! Newsletter digest composition
//!
//! Every section ranks the full candidate set independently, so an item may
//! show up in more than one section. Scores are a coarse keyword relevance:
//! `MATCH_SCORE` on a hit, `BASE_SCORE` otherwise, so non-matching items still
//! fill short sections.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;

use broker_core::{BrokerError, BrokerResult, Citation, Digest, Item, Section, SectionEntry};

pub const MATCH_SCORE: u32 = 4;
pub const BASE_SCORE: u32 = 1;
pub const MAX_CITATIONS: usize = 200;

pub const DIGEST_TITLE: &str = "Digital-First Weekly Brief";
pub const MISSING_BLURB: &str = "Summary unavailable.";

const LAUNCHES_PATTERN: &str = r"\b(?:launch\w*|announc\w*|debut\w*|unveil\w*|introduc\w*|rolls? out|rolling out|now available|premieres?)\b";

const FORMATS_PATTERN: &str = r"\b(?:series|episod\w*|shorts|formats?|serialized|vertical video|miniseries|mini-series|season|spin-?off)\b";

const PLATFORM_PATTERN: &str = r"\b(?:monetiz\w*|revenue|payouts?|creator fund|partner program|polic(?:y|ies)|algorithm\w*|subscriptions?|paywall|tipping|ads|advertis\w*|brand deals?|sponsor\w*)\b";

const EXAMPLES_PATTERN: &str = r"\b(?:case stud(?:y|ies)|playbook|lessons?|breakdown|blueprint|tactics?|strateg(?:y|ies)|examples?|what works|how (?:they|she|he|it|this) \w+)\b";

/// A named section and the keyword pattern that ranks items into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRule {
    pub name: String,
    pub pattern: String,
}

impl SectionRule {
    pub fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }

    /// The four fixed digest sections, in output order
    pub fn defaults() -> Vec<SectionRule> {
        vec![
            SectionRule::new("New digital-first launches", LAUNCHES_PATTERN),
            SectionRule::new("Formats & creator series to watch", FORMATS_PATTERN),
            SectionRule::new("Platform moves & monetization", PLATFORM_PATTERN),
            SectionRule::new("Examples (what to steal\u{2014}in a legal way)", EXAMPLES_PATTERN),
        ]
    }
}

#[derive(Debug, Clone)]
struct CompiledSection {
    name: String,
    pattern: Regex,
}

/// Ranks items into sections and builds the citation list
#[derive(Debug, Clone)]
pub struct DigestComposer {
    sections: Vec<CompiledSection>,
    title: String,
}

impl DigestComposer {
    pub fn new(rules: &[SectionRule]) -> BrokerResult<Self> {
        let sections = rules
            .iter()
            .map(|rule| {
                let pattern = Regex::new(&rule.pattern).map_err(|e| {
                    BrokerError::configuration(format!(
                        "invalid pattern for section '{}': {}",
                        rule.name, e
                    ))
                })?;
                Ok(CompiledSection {
                    name: rule.name.clone(),
                    pattern,
                })
            })
            .collect::<BrokerResult<Vec<_>>>()?;

        Ok(Self {
            sections,
            title: DIGEST_TITLE.to_string(),
        })
    }

    pub fn with_defaults() -> BrokerResult<Self> {
        Self::new(&SectionRule::defaults())
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Score of `item` for the section called `section`, if it exists
    pub fn score(&self, section: &str, item: &Item) -> Option<u32> {
        let text = scoring_text(item);
        self.sections
            .iter()
            .find(|s| s.name == section)
            .map(|s| score_text(&s.pattern, &text))
    }

    /// Compose a digest stamped with the current time
    pub fn compose(&self, items: &[Item], max_items_per_section: usize) -> Digest {
        self.compose_at(items, max_items_per_section, Utc::now())
    }

    pub fn compose_at(
        &self,
        items: &[Item],
        max_items_per_section: usize,
        generated_at: DateTime<Utc>,
    ) -> Digest {
        let texts: Vec<String> = items.iter().map(scoring_text).collect();

        let sections = self
            .sections
            .iter()
            .map(|section| {
                let mut ranked: Vec<(u32, &Item)> = items
                    .iter()
                    .zip(&texts)
                    .map(|(item, text)| (score_text(&section.pattern, text), item))
                    .collect();
                // sort_by is stable: ties keep dedup order
                ranked.sort_by(|a, b| b.0.cmp(&a.0));

                Section {
                    name: section.name.clone(),
                    items: ranked
                        .into_iter()
                        .take(max_items_per_section)
                        .map(|(_, item)| render(item))
                        .collect(),
                }
            })
            .collect();

        let citations = items
            .iter()
            .take(MAX_CITATIONS)
            .map(|item| Citation {
                url: item.url.clone(),
                title: item.title.clone(),
                source: item.source.clone(),
            })
            .collect();

        Digest {
            title: self.title.clone(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            sections,
            citations,
        }
    }
}

fn scoring_text(item: &Item) -> String {
    format!("{} {}", item.title, item.snippet).to_lowercase()
}

fn score_text(pattern: &Regex, text: &str) -> u32 {
    if pattern.is_match(text) {
        MATCH_SCORE
    } else {
        BASE_SCORE
    }
}

fn render(item: &Item) -> SectionEntry {
    let blurb = if item.snippet.trim().is_empty() {
        MISSING_BLURB.to_string()
    } else {
        item.snippet.clone()
    };
    SectionEntry {
        headline: item.title.clone(),
        blurb,
        urls: vec![item.url.clone()],
    }
}
