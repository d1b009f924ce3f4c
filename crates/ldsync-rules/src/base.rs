//! Base field-presence validation.
//!
//! Runs before any named ruleset: every node needs `@context` and a
//! recognized `@type`, and each recognized type carries a short list of
//! fields without which the record is meaningless.

use crate::check::{Check, node_path, run_checks};
use ldsync_model::Severity::Error;
use ldsync_model::{Node, TypeName, ValidationIssue};

pub const NAMESPACE: &str = "schema";
pub const RULE_EMPTY: &str = "schema.empty";
pub const RULE_CONTEXT_MISSING: &str = "schema.context.missing";
pub const RULE_TYPE_MISSING: &str = "schema.type.missing";
pub const RULE_TYPE_UNKNOWN: &str = "schema.type.unknown";

const fn required(field: &'static str, key: &'static str) -> Check {
    Check::Required {
        key,
        field,
        severity: Error,
    }
}

const NAME: &[Check] = &[required("name", "name")];

const BASE_REQUIRED: &[(TypeName, &[Check])] = &[
    (TypeName::Organization, NAME),
    (TypeName::Person, NAME),
    (TypeName::Place, NAME),
    (TypeName::LocalBusiness, NAME),
    (TypeName::WebSite, &[required("url", "url")]),
    (TypeName::WebPage, NAME),
    (TypeName::Article, &[required("headline", "headline")]),
    (TypeName::BlogPosting, &[required("headline", "headline")]),
    (TypeName::Product, NAME),
    (TypeName::VideoObject, NAME),
    (TypeName::ImageObject, &[required("contentUrl", "content_url")]),
    (
        TypeName::Event,
        &[required("name", "name"), required("startDate", "start_date")],
    ),
    (TypeName::Review, &[required("reviewRating", "review_rating")]),
    (TypeName::FaqPage, &[required("mainEntity", "main_entity")]),
    (TypeName::HowTo, NAME),
    (
        TypeName::BreadcrumbList,
        &[required("itemListElement", "item_list_element")],
    ),
];

fn base_checks(ty: TypeName) -> &'static [Check] {
    BASE_REQUIRED
        .iter()
        .find_map(|(entry, checks)| (*entry == ty).then_some(*checks))
        .unwrap_or(&[])
}

/// Validate a route's nodes. An empty list is itself an error.
pub fn validate_nodes(nodes: &[Node]) -> Vec<ValidationIssue> {
    if nodes.is_empty() {
        return vec![ValidationIssue::error(
            RULE_EMPTY,
            "nodes",
            "no structured data nodes to validate",
        )];
    }

    let mut issues = Vec::new();
    for (index, node) in nodes.iter().enumerate() {
        let path = node_path(index);
        if !node.has_context() {
            issues.push(ValidationIssue::error(
                RULE_CONTEXT_MISSING,
                &path,
                "node is missing `@context`",
            ));
        }

        let declared = node.declared_types();
        if declared.is_empty() {
            issues.push(ValidationIssue::error(
                RULE_TYPE_MISSING,
                &path,
                "node is missing `@type`",
            ));
            continue;
        }

        match node.primary_type() {
            Some(ty) => issues.extend(run_checks(NAMESPACE, ty, base_checks(ty), node, &path)),
            None => issues.push(ValidationIssue::warn(
                RULE_TYPE_UNKNOWN,
                &path,
                format!("unrecognized `@type` {}", declared.join(", ")),
            )),
        }
    }
    issues
}
