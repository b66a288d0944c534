//! Built-in specialist profile set.
//!
//! Registry iteration order matters: scoring ties break toward the
//! earlier-declared specialist, so the order below is part of the contract.

use super::profile::SpecialistProfile;

/// The default six-specialist catalog.
pub fn default_profiles() -> Vec<SpecialistProfile> {
    vec![
        SpecialistProfile {
            id: "technical-specialist".into(),
            name: "Technical Specialist".into(),
            description: "Handles software engineering questions: writing code, \
                          debugging, infrastructure, deployment, and system design."
                .into(),
            capabilities: vec![
                "code generation".into(),
                "debugging".into(),
                "infrastructure and deployment".into(),
                "architecture review".into(),
            ],
            keywords: vec![
                "code".into(),
                "programming".into(),
                "software".into(),
                "docker".into(),
                "kubernetes".into(),
                "api".into(),
                "server".into(),
                "database".into(),
                "debug".into(),
                "deploy".into(),
                "build".into(),
                "node.js".into(),
                "python".into(),
                "devops".into(),
            ],
            domains: vec!["software_development".into()],
            confidence_threshold: 0.45,
        },
        SpecialistProfile {
            id: "business-analyst".into(),
            name: "Business Analyst".into(),
            description: "Advises on business strategy, market positioning, growth \
                          planning, and return on investment analysis."
                .into(),
            capabilities: vec![
                "market analysis".into(),
                "strategy planning".into(),
                "roi assessment".into(),
            ],
            keywords: vec![
                "business".into(),
                "strategy".into(),
                "market".into(),
                "roi".into(),
                "revenue".into(),
                "growth".into(),
                "competitor".into(),
                "stakeholder".into(),
                "swot".into(),
            ],
            domains: vec!["business_strategy".into()],
            confidence_threshold: 0.45,
        },
        SpecialistProfile {
            id: "creative-specialist".into(),
            name: "Creative Specialist".into(),
            description: "Produces creative writing: stories, articles, blog posts, \
                          slogans, and brainstormed content ideas."
                .into(),
            capabilities: vec![
                "copywriting".into(),
                "storytelling".into(),
                "brainstorming".into(),
            ],
            keywords: vec![
                "write".into(),
                "story".into(),
                "poem".into(),
                "creative".into(),
                "blog".into(),
                "article".into(),
                "content".into(),
                "brainstorm".into(),
                "slogan".into(),
            ],
            domains: vec!["creative_writing".into()],
            confidence_threshold: 0.5,
        },
        SpecialistProfile {
            id: "data-scientist".into(),
            name: "Data Scientist".into(),
            description: "Performs data analysis, statistics, machine learning \
                          modeling, and visualization of datasets."
                .into(),
            capabilities: vec![
                "statistical analysis".into(),
                "machine learning".into(),
                "visualization".into(),
            ],
            keywords: vec![
                "data".into(),
                "analysis".into(),
                "statistics".into(),
                "machine learning".into(),
                "model".into(),
                "dataset".into(),
                "visualization".into(),
                "regression".into(),
                "analytics".into(),
            ],
            domains: vec!["data_science".into()],
            confidence_threshold: 0.45,
        },
        SpecialistProfile {
            id: "financial-analyst".into(),
            name: "Financial Analyst".into(),
            description: "Covers financial questions: investment, budgeting, cost \
                          analysis, portfolios, and tax considerations."
                .into(),
            capabilities: vec![
                "investment analysis".into(),
                "budgeting".into(),
                "cost modeling".into(),
            ],
            keywords: vec![
                "finance".into(),
                "financial".into(),
                "investment".into(),
                "budget".into(),
                "cost".into(),
                "stock".into(),
                "portfolio".into(),
                "tax".into(),
                "cash flow".into(),
            ],
            domains: vec!["financial_analysis".into()],
            confidence_threshold: 0.45,
        },
        SpecialistProfile {
            id: "general-assistant".into(),
            name: "General Assistant".into(),
            description: "Answers general questions and handles anything no other \
                          specialist claims."
                .into(),
            capabilities: vec!["general conversation".into(), "explanations".into()],
            keywords: vec![
                "help".into(),
                "question".into(),
                "explain".into(),
                "general".into(),
            ],
            domains: vec![],
            confidence_threshold: 0.3,
        },
    ]
}
