//! `ai-citation` ruleset: attribution and discoverability signals that
//! answer engines and LLM crawlers rely on when citing a page.

use crate::check::Check;
use crate::registry::Ruleset;
use ldsync_model::Severity::{Error, Warn};
use ldsync_model::TypeName;

const ARTICLE: &[Check] = &[
    Check::Required {
        key: "author_name",
        field: "author.name",
        severity: Error,
    },
    Check::Required {
        key: "date_published",
        field: "datePublished",
        severity: Error,
    },
    Check::Required {
        key: "description",
        field: "description",
        severity: Warn,
    },
    Check::Required {
        key: "date_modified",
        field: "dateModified",
        severity: Warn,
    },
];

const FAQ_PAGE: &[Check] = &[
    Check::Required {
        key: "main_entity",
        field: "mainEntity",
        severity: Error,
    },
    Check::EachItem {
        key: "question_answer",
        field: "mainEntity",
        item_type: None,
        required: &["name", "acceptedAnswer.text"],
        severity: Warn,
    },
];

const HOW_TO: &[Check] = &[
    Check::Required {
        key: "step",
        field: "step",
        severity: Error,
    },
    Check::EachItem {
        key: "step_text",
        field: "step",
        item_type: None,
        required: &["text"],
        severity: Warn,
    },
];

const WEB_SITE: &[Check] = &[Check::Required {
    key: "url",
    field: "url",
    severity: Error,
}];

const ORGANIZATION: &[Check] = &[
    Check::Required {
        key: "url",
        field: "url",
        severity: Warn,
    },
    Check::Required {
        key: "same_as",
        field: "sameAs",
        severity: Warn,
    },
];

const PERSON: &[Check] = &[
    Check::Required {
        key: "name",
        field: "name",
        severity: Error,
    },
    Check::Required {
        key: "url",
        field: "url",
        severity: Warn,
    },
];

const PRODUCT: &[Check] = &[Check::Required {
    key: "description",
    field: "description",
    severity: Warn,
}];

pub static AI_CITATION: Ruleset = Ruleset {
    name: "ai-citation",
    description: "Attribution signals for answer engines",
    base_score: 100,
    table: &[
        (TypeName::Article, ARTICLE),
        (TypeName::BlogPosting, ARTICLE),
        (TypeName::FaqPage, FAQ_PAGE),
        (TypeName::HowTo, HOW_TO),
        (TypeName::WebSite, WEB_SITE),
        (TypeName::Organization, ORGANIZATION),
        (TypeName::Person, PERSON),
        (TypeName::Product, PRODUCT),
    ],
};
