//! Digital-first classification
//!
//! Exclusion rules run first; an item is digital-first only when none of the
//! requested exclusions fired and the hint pattern matched.

use regex::Regex;

use broker_core::{BrokerError, BrokerResult, Classification, Item};

const LINEAR_PATTERN: &str = r"\b(?:broadcast\w*|linear tv|linear television|cable|syndicat\w*|network tv|primetime|prime time)\b";

const STREAMING_PATTERN: &str = r"\b(?:streaming|netflix|hulu|peacock|prime video|hbo max|disney plus|paramount plus|apple tv plus)\b|\b(?:disney|paramount|apple tv)\+";

const DIGITAL_FIRST_HINT: &str = r"\b(?:youtube|tiktok|instagram|shorts|reels|creators?|creator economy|web series|webseries|newsletters?|substack|beehiiv|patreon|twitch|snapchat|influencers?)\b";

/// One entry of the exclusion vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    pub tag: String,
    pub pattern: String,
}

impl ExclusionRule {
    pub fn new(tag: &str, pattern: &str) -> Self {
        Self {
            tag: tag.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Pattern table driving the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Exclusion vocabulary; reasons are reported in this order
    pub exclusions: Vec<ExclusionRule>,
    pub digital_first_hint: String,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            exclusions: vec![
                ExclusionRule::new("linear", LINEAR_PATTERN),
                ExclusionRule::new("streaming", STREAMING_PATTERN),
            ],
            digital_first_hint: DIGITAL_FIRST_HINT.to_string(),
        }
    }
}

/// Item text the heuristic looks at
#[derive(Debug, Clone, Copy)]
pub struct TextFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
}

impl<'a> TextFields<'a> {
    pub fn new(title: &'a str, description: &'a str, url: &'a str) -> Self {
        Self {
            title,
            description,
            url,
        }
    }

    pub fn of(item: &'a Item) -> Self {
        Self::new(&item.title, &item.snippet, &item.url)
    }

    fn blob(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.url).to_lowercase()
    }
}

/// Compiled classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    exclusions: Vec<(String, Regex)>,
    hint: Regex,
}

impl Classifier {
    pub fn new(rules: &ClassifierRules) -> BrokerResult<Self> {
        let exclusions = rules
            .exclusions
            .iter()
            .map(|rule| Ok((rule.tag.clone(), compile(&rule.tag, &rule.pattern)?)))
            .collect::<BrokerResult<Vec<_>>>()?;

        Ok(Self {
            exclusions,
            hint: compile("digital_first_hint", &rules.digital_first_hint)?,
        })
    }

    /// Classifier with the built-in vocabulary
    pub fn with_defaults() -> BrokerResult<Self> {
        Self::new(&ClassifierRules::default())
    }

    /// Tags in vocabulary order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.exclusions.iter().map(|(tag, _)| tag.as_str())
    }

    /// Classify item text against the requested exclusion tags.
    /// Tags outside the vocabulary are ignored; input order is irrelevant.
    pub fn classify(&self, fields: TextFields<'_>, exclude_tags: &[String]) -> Classification {
        let blob = fields.blob();

        let excluded_reasons: Vec<String> = self
            .exclusions
            .iter()
            .filter(|(tag, _)| requested(exclude_tags, tag))
            .filter(|(_, pattern)| pattern.is_match(&blob))
            .map(|(tag, _)| tag.clone())
            .collect();

        let digital_first = excluded_reasons.is_empty() && self.hint.is_match(&blob);

        Classification {
            digital_first,
            excluded_reasons,
        }
    }

    /// Attach a classification to a freshly normalized item
    pub fn annotate(&self, mut item: Item, exclude_tags: &[String]) -> Item {
        item.classification = self.classify(TextFields::of(&item), exclude_tags);
        item
    }
}

fn requested(exclude_tags: &[String], tag: &str) -> bool {
    exclude_tags
        .iter()
        .any(|t| t.trim().eq_ignore_ascii_case(tag))
}

fn compile(name: &str, pattern: &str) -> BrokerResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| BrokerError::configuration(format!("invalid pattern for '{}': {}", name, e)))
}
