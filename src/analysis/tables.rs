//! Static pattern tables feeding query analysis.
//!
//! These are data, loaded once at compile time, shared by every request.
//! Intent declaration order is the tie-break order: when two intents score
//! equally, the earlier one wins.

/// Intent label used when no intent reaches the minimum score.
pub const GENERAL_INQUIRY: &str = "general_inquiry";

/// Minimum weighted score an intent must reach to beat `general_inquiry`.
pub const MIN_INTENT_SCORE: f64 = 2.0;

/// Bonus for an intent carried over from the immediately preceding turn.
pub const CONTINUITY_BONUS: f64 = 0.5;

/// Tier weights: primary terms, secondary terms, question-form phrases.
pub const PRIMARY_WEIGHT: f64 = 3.0;
pub const SECONDARY_WEIGHT: f64 = 2.0;
pub const QUESTION_FORM_WEIGHT: f64 = 4.0;

/// Question-detector bonuses.
pub const QUESTION_WORD_BONUS: f64 = 1.0;
pub const QUESTION_MARK_BONUS: f64 = 0.5;
pub const POLITE_PHRASE_BONUS: f64 = 0.5;

/// A single intent category with three weighted pattern tiers.
pub struct IntentDef {
    pub label: &'static str,
    pub primary: &'static [&'static str],
    pub secondary: &'static [&'static str],
    pub question_forms: &'static [&'static str],
    pub multiplier: f64,
}

pub const INTENTS: &[IntentDef] = &[
    IntentDef {
        label: "technical_request",
        primary: &["code", "debug", "deploy", "install", "implement", "fix"],
        secondary: &["error", "bug", "server", "script", "docker", "api", "build"],
        question_forms: &["how do i", "how to", "why does my"],
        multiplier: 1.0,
    },
    IntentDef {
        label: "data_analysis",
        primary: &["analyze", "data", "statistics"],
        secondary: &["dataset", "trend", "chart", "metric", "correlation"],
        question_forms: &["what does the data", "what do the numbers"],
        multiplier: 1.1,
    },
    IntentDef {
        label: "business_analysis",
        primary: &["business", "strategy", "market"],
        secondary: &["growth", "competitor", "plan", "stakeholder"],
        question_forms: &["should we", "what is the roi"],
        multiplier: 1.0,
    },
    IntentDef {
        label: "financial_inquiry",
        primary: &["invest", "budget", "finance"],
        secondary: &["cost", "tax", "price", "stock", "portfolio"],
        question_forms: &["how much", "can i afford"],
        multiplier: 1.0,
    },
    IntentDef {
        label: "creative_request",
        primary: &["write", "create", "design"],
        secondary: &["story", "blog", "idea", "draft", "slogan"],
        question_forms: &["can you write", "could you draft"],
        multiplier: 0.9,
    },
];

/// A domain tag with its indicator terms (action verbs/nouns typical of it).
pub struct DomainDef {
    pub tag: &'static str,
    pub terms: &'static [&'static str],
}

pub const DOMAINS: &[DomainDef] = &[
    DomainDef {
        tag: "software_development",
        terms: &[
            "code", "debug", "deploy", "build", "install", "configure", "compile", "docker",
            "server", "api",
        ],
    },
    DomainDef {
        tag: "business_strategy",
        terms: &[
            "market", "strategy", "plan", "roi", "revenue", "business", "growth", "competitor",
        ],
    },
    DomainDef {
        tag: "creative_writing",
        terms: &["write", "story", "draft", "compose", "imagine", "narrative", "poem", "blog"],
    },
    DomainDef {
        tag: "data_science",
        terms: &[
            "data", "analyze", "model", "predict", "dataset", "statistics", "visualize",
            "regression",
        ],
    },
    DomainDef {
        tag: "financial_analysis",
        terms: &["invest", "budget", "roi", "cost", "financial", "tax", "portfolio", "stock"],
    },
];

/// Interrogative words counted by the question-word detector.
pub const QUESTION_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "could", "would", "should",
];

/// Polite request phrasings.
pub const POLITE_PHRASES: &[&str] = &["could you", "would you", "can you", "please"];
