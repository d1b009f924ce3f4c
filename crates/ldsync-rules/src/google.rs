//! `google` ruleset: rich-results eligibility.

use crate::check::Check;
use crate::registry::Ruleset;
use ldsync_model::Severity::{Error, Warn};
use ldsync_model::TypeName;

const ARTICLE: &[Check] = &[
    Check::Required {
        key: "headline",
        field: "headline",
        severity: Error,
    },
    Check::LengthWithin {
        key: "headline_length",
        field: "headline",
        min: 10,
        max: 110,
        severity: Warn,
    },
    Check::Required {
        key: "image",
        field: "image",
        severity: Error,
    },
    Check::Required {
        key: "date_published",
        field: "datePublished",
        severity: Error,
    },
    Check::IsoDate {
        key: "date_published_format",
        field: "datePublished",
        severity: Warn,
    },
    Check::Required {
        key: "author",
        field: "author.name",
        severity: Warn,
    },
];

const PRODUCT: &[Check] = &[
    Check::Required {
        key: "name",
        field: "name",
        severity: Error,
    },
    Check::Required {
        key: "image",
        field: "image",
        severity: Error,
    },
    Check::Required {
        key: "offers_price",
        field: "offers.price",
        severity: Error,
    },
    Check::Required {
        key: "offers_availability",
        field: "offers.availability",
        severity: Warn,
    },
    Check::Required {
        key: "offers_price_currency",
        field: "offers.priceCurrency",
        severity: Warn,
    },
];

const LOCAL_BUSINESS: &[Check] = &[
    Check::Required {
        key: "name",
        field: "name",
        severity: Error,
    },
    Check::Required {
        key: "telephone",
        field: "telephone",
        severity: Error,
    },
    Check::Required {
        key: "address",
        field: "address",
        severity: Error,
    },
    Check::Required {
        key: "opening_hours",
        field: "openingHours",
        severity: Warn,
    },
];

const REVIEW: &[Check] = &[
    Check::Required {
        key: "review_rating",
        field: "reviewRating.ratingValue",
        severity: Error,
    },
    Check::Required {
        key: "item_reviewed",
        field: "itemReviewed",
        severity: Warn,
    },
    Check::Required {
        key: "author",
        field: "author.name",
        severity: Warn,
    },
];

const EVENT: &[Check] = &[
    Check::Required {
        key: "name",
        field: "name",
        severity: Error,
    },
    Check::Required {
        key: "start_date",
        field: "startDate",
        severity: Error,
    },
    Check::Required {
        key: "location",
        field: "location",
        severity: Error,
    },
    Check::Required {
        key: "end_date",
        field: "endDate",
        severity: Warn,
    },
];

const FAQ_PAGE: &[Check] = &[
    Check::Required {
        key: "main_entity",
        field: "mainEntity",
        severity: Warn,
    },
    Check::EachItem {
        key: "question",
        field: "mainEntity",
        item_type: Some("Question"),
        required: &["name", "acceptedAnswer.text"],
        severity: Warn,
    },
];

const HOW_TO: &[Check] = &[
    Check::Required {
        key: "name",
        field: "name",
        severity: Error,
    },
    Check::Required {
        key: "step",
        field: "step",
        severity: Warn,
    },
    Check::EachItem {
        key: "step_text",
        field: "step",
        item_type: None,
        required: &["text"],
        severity: Warn,
    },
];

const VIDEO_OBJECT: &[Check] = &[
    Check::Required {
        key: "name",
        field: "name",
        severity: Error,
    },
    Check::Required {
        key: "thumbnail_url",
        field: "thumbnailUrl",
        severity: Error,
    },
    Check::Required {
        key: "upload_date",
        field: "uploadDate",
        severity: Error,
    },
    Check::Required {
        key: "description",
        field: "description",
        severity: Warn,
    },
];

const IMAGE_OBJECT: &[Check] = &[Check::Required {
    key: "content_url",
    field: "contentUrl",
    severity: Error,
}];

const BREADCRUMB_LIST: &[Check] = &[
    Check::Required {
        key: "item_list_element",
        field: "itemListElement",
        severity: Error,
    },
    Check::EachItem {
        key: "list_item",
        field: "itemListElement",
        item_type: None,
        required: &["position", "name"],
        severity: Warn,
    },
];

const ORGANIZATION: &[Check] = &[
    Check::Required {
        key: "url",
        field: "url",
        severity: Warn,
    },
    Check::Required {
        key: "logo",
        field: "logo",
        severity: Warn,
    },
];

pub static GOOGLE: Ruleset = Ruleset {
    name: "google",
    description: "Search rich-results eligibility",
    base_score: 100,
    table: &[
        (TypeName::Article, ARTICLE),
        (TypeName::BlogPosting, ARTICLE),
        (TypeName::Product, PRODUCT),
        (TypeName::LocalBusiness, LOCAL_BUSINESS),
        (TypeName::Review, REVIEW),
        (TypeName::Event, EVENT),
        (TypeName::FaqPage, FAQ_PAGE),
        (TypeName::HowTo, HOW_TO),
        (TypeName::VideoObject, VIDEO_OBJECT),
        (TypeName::ImageObject, IMAGE_OBJECT),
        (TypeName::BreadcrumbList, BREADCRUMB_LIST),
        (TypeName::Organization, ORGANIZATION),
    ],
};

#[cfg(test)]
mod tests {
    use crate::registry::{RulesetName, run_ruleset};
    use ldsync_model::{Node, Severity};
    use serde_json::{Value, json};

    fn nodes(values: Vec<Value>) -> Vec<Node> {
        values
            .into_iter()
            .map(|v| Node::from_value(v).expect("object"))
            .collect()
    }

    fn complete_article() -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "Article",
            "headline": "Shipping structured data that matches reality",
            "author": {"@type": "Person", "name": "J. Doe"},
            "datePublished": "2024-01-01",
            "url": "https://example.com/blog/reality",
            "image": "https://example.com/cover.png"
        })
    }

    fn rule_ids(result: &crate::RulesetResult) -> Vec<&str> {
        result.issues.iter().map(|i| i.rule_id.as_str()).collect()
    }

    #[test]
    fn complete_article_has_no_issues() {
        let result = run_ruleset(RulesetName::Google, &nodes(vec![complete_article()]));
        assert!(
            result
                .issues
                .iter()
                .all(|i| !i.rule_id.starts_with("google.article.")),
            "unexpected issues: {:?}",
            result.issues
        );
        assert!(result.ok);
    }

    #[test]
    fn minimal_article_only_warns_on_short_headline() {
        let article = json!({
            "@type": "Article",
            "headline": "X",
            "author": {"name": "J"},
            "datePublished": "2024-01-01",
            "url": "https://example.com/a",
            "image": "https://example.com/a.png"
        });
        let result = run_ruleset(RulesetName::Google, &nodes(vec![article]));
        let issues: Vec<_> = result
            .issues
            .iter()
            .map(|i| (i.rule_id.as_str(), i.severity))
            .collect();
        assert_eq!(issues, vec![("google.article.headline_length", Severity::Warn)]);
        assert_eq!(result.summary.errors, 0);
        assert!(result.ok);
    }

    #[test]
    fn article_without_image_has_one_image_error() {
        let mut article = complete_article();
        article.as_object_mut().unwrap().remove("image");
        let result = run_ruleset(RulesetName::Google, &nodes(vec![article]));
        assert_eq!(rule_ids(&result), vec!["google.article.image"]);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert_eq!(result.issues[0].path, "nodes[0]");
        assert_eq!(result.summary.errors, 1);
    }

    #[test]
    fn blog_posting_uses_article_checks_under_its_own_slug() {
        let result = run_ruleset(
            RulesetName::Google,
            &nodes(vec![json!({"@type": "BlogPosting", "headline": "Tiny"})]),
        );
        assert_eq!(
            rule_ids(&result),
            vec![
                "google.blogposting.headline_length",
                "google.blogposting.image",
                "google.blogposting.date_published",
                "google.blogposting.author",
            ]
        );
    }

    #[test]
    fn product_offer_price_is_read_through_lists() {
        let product = json!({
            "@type": "Product",
            "name": "Widget",
            "image": "w.png",
            "offers": [{"@type": "Offer", "price": "19.00", "priceCurrency": "USD",
                        "availability": "https://schema.org/InStock"}]
        });
        let result = run_ruleset(RulesetName::Google, &nodes(vec![product]));
        assert!(result.issues.is_empty(), "{:?}", result.issues);

        let missing = json!({"@type": "Product", "name": "Widget", "image": "w.png", "offers": "n/a"});
        let result = run_ruleset(RulesetName::Google, &nodes(vec![missing]));
        assert_eq!(
            rule_ids(&result),
            vec![
                "google.product.offers_price",
                "google.product.offers_availability",
                "google.product.offers_price_currency",
            ]
        );
        assert_eq!(result.summary.errors, 1);
        assert_eq!(result.summary.warnings, 2);
    }

    #[test]
    fn local_business_and_review_requirements() {
        let result = run_ruleset(
            RulesetName::Google,
            &nodes(vec![
                json!({"@type": "LocalBusiness", "name": "Cafe", "telephone": "+1 555"}),
                json!({"@type": "Review", "reviewRating": {"ratingValue": 4},
                       "itemReviewed": {"name": "Cafe"}, "author": {"name": "Ann"}}),
            ]),
        );
        assert_eq!(
            rule_ids(&result),
            vec![
                "google.localbusiness.address",
                "google.localbusiness.opening_hours"
            ]
        );
        assert_eq!(result.issues[0].path, "nodes[0]");
    }

    #[test]
    fn event_needs_start_date_and_location() {
        let result = run_ruleset(
            RulesetName::Google,
            &nodes(vec![json!({"@type": "Event", "name": "Launch"})]),
        );
        assert_eq!(
            rule_ids(&result),
            vec![
                "google.event.start_date",
                "google.event.location",
                "google.event.end_date"
            ]
        );
    }

    #[test]
    fn faq_items_get_structural_warnings() {
        let faq = json!({"@type": "FAQPage", "mainEntity": [
            {"@type": "Question", "name": "Why?", "acceptedAnswer": {"@type": "Answer", "text": "Because."}},
            {"@type": "Question", "name": "How?"}
        ]});
        let result = run_ruleset(RulesetName::Google, &nodes(vec![faq]));
        assert_eq!(rule_ids(&result), vec!["google.faqpage.question"]);
        assert!(result.ok);
    }

    #[test]
    fn unknown_and_uncovered_types_are_skipped() {
        let result = run_ruleset(
            RulesetName::Google,
            &nodes(vec![
                json!({"@type": "Spaceship"}),
                json!({"@type": "WebPage"}),
                json!({}),
            ]),
        );
        assert!(result.issues.is_empty());
        assert_eq!(result.score, 100);
    }
}
