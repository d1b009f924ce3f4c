//! Individual field checks.
//!
//! A check sees one node and returns zero or more issues. Checks are total:
//! a field that cannot be read is treated as absent.

use ldsync_model::node::lookup_value;
use ldsync_model::{Node, Severity, TypeName, ValidationIssue};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// One entry of a ruleset table.
///
/// `key` is the last segment of the emitted rule id:
/// `<namespace>.<type slug>.<key>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// The dotted `field` must be present.
    Required {
        key: &'static str,
        field: &'static str,
        severity: Severity,
    },
    /// The string at `field` must have between `min` and `max` characters.
    /// Skipped when the field is absent.
    LengthWithin {
        key: &'static str,
        field: &'static str,
        min: usize,
        max: usize,
        severity: Severity,
    },
    /// The string at `field` must look like an ISO-8601 date or date-time.
    /// Skipped when the field is absent.
    IsoDate {
        key: &'static str,
        field: &'static str,
        severity: Severity,
    },
    /// Every item of the list at `field` must carry all `required` paths
    /// (and `@type == item_type` when given). One issue per malformed item.
    /// Skipped when the list is absent.
    EachItem {
        key: &'static str,
        field: &'static str,
        item_type: Option<&'static str>,
        required: &'static [&'static str],
        severity: Severity,
    },
}

impl Check {
    pub const fn key(&self) -> &'static str {
        match self {
            Check::Required { key, .. }
            | Check::LengthWithin { key, .. }
            | Check::IsoDate { key, .. }
            | Check::EachItem { key, .. } => *key,
        }
    }

    pub const fn severity(&self) -> Severity {
        match self {
            Check::Required { severity, .. }
            | Check::LengthWithin { severity, .. }
            | Check::IsoDate { severity, .. }
            | Check::EachItem { severity, .. } => *severity,
        }
    }

    /// Evaluate against `node`, located at `path`, typed as `ty`.
    pub fn run(
        &self,
        namespace: &str,
        ty: TypeName,
        node: &Node,
        path: &str,
    ) -> Vec<ValidationIssue> {
        let rule_id = format!("{namespace}.{}.{}", ty.slug(), self.key());
        let issue = |message: String| {
            ValidationIssue::new(self.severity(), &rule_id, path, message)
        };

        match *self {
            Check::Required {
                field, severity, ..
            } => {
                if node.has(field) {
                    return Vec::new();
                }
                let kind = match severity {
                    Severity::Error => "required",
                    Severity::Warn => "recommended",
                };
                vec![issue(format!("{ty} is missing {kind} field `{field}`"))]
            }
            Check::LengthWithin {
                field, min, max, ..
            } => {
                let Some(text) = node.text(field) else {
                    return Vec::new();
                };
                let len = text.chars().count();
                if (min..=max).contains(&len) {
                    return Vec::new();
                }
                vec![issue(format!(
                    "{ty} `{field}` is {len} characters; expected {min}-{max}"
                ))]
            }
            Check::IsoDate { field, .. } => match node.lookup(field) {
                None => Vec::new(),
                Some(Value::String(raw)) if iso_date_re().is_match(raw.trim()) => Vec::new(),
                Some(other) => vec![issue(format!(
                    "{ty} `{field}` is not an ISO-8601 date: {other}"
                ))],
            },
            Check::EachItem {
                field,
                item_type,
                required,
                ..
            } => node
                .items(field)
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    let mut problems = Vec::new();
                    if let Some(expected) = item_type
                        && !item_has_type(item, expected)
                    {
                        problems.push(format!("`@type` {expected}"));
                    }
                    for sub in required {
                        let segments: Vec<&str> = sub.split('.').collect();
                        if lookup_value(item, &segments).is_none() {
                            problems.push(format!("`{sub}`"));
                        }
                    }
                    (!problems.is_empty()).then(|| {
                        issue(format!(
                            "{ty} `{field}[{index}]` is missing {}",
                            problems.join(", ")
                        ))
                    })
                })
                .collect(),
        }
    }
}

fn item_has_type(item: &Value, expected: &str) -> bool {
    match item.get("@type") {
        Some(Value::String(ty)) => ty == expected,
        Some(Value::Array(types)) => types.iter().any(|ty| ty.as_str() == Some(expected)),
        _ => false,
    }
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$",
        )
        .expect("iso date regex must compile")
    })
}

/// Run an ordered check list against one node.
pub fn run_checks(
    namespace: &str,
    ty: TypeName,
    checks: &[Check],
    node: &Node,
    path: &str,
) -> Vec<ValidationIssue> {
    checks
        .iter()
        .flat_map(|check| check.run(namespace, ty, node, path))
        .collect()
}

/// Issue path of the node at `index`.
pub fn node_path(index: usize) -> String {
    format!("nodes[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Node {
        Node::from_value(value).expect("object")
    }

    #[test]
    fn required_reports_missing_field_once() {
        let check = Check::Required {
            key: "image",
            field: "image",
            severity: Severity::Error,
        };
        let issues = check.run("google", TypeName::Article, &node(json!({})), "nodes[0]");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, "google.article.image");
        assert_eq!(issues[0].path, "nodes[0]");
        assert!(issues[0].is_error());

        let ok = check.run(
            "google",
            TypeName::Article,
            &node(json!({"image": "a.png"})),
            "nodes[0]",
        );
        assert!(ok.is_empty());
    }

    #[test]
    fn length_is_skipped_when_absent() {
        let check = Check::LengthWithin {
            key: "headline_length",
            field: "headline",
            min: 10,
            max: 110,
            severity: Severity::Warn,
        };
        assert!(
            check
                .run("google", TypeName::Article, &node(json!({})), "nodes[0]")
                .is_empty()
        );
        let short = check.run(
            "google",
            TypeName::Article,
            &node(json!({"headline": "Short"})),
            "nodes[0]",
        );
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].severity, Severity::Warn);
        let long = "x".repeat(111);
        assert_eq!(
            check
                .run(
                    "google",
                    TypeName::Article,
                    &node(json!({"headline": long})),
                    "nodes[0]"
                )
                .len(),
            1
        );
    }

    #[test]
    fn iso_date_accepts_dates_and_datetimes() {
        let check = Check::IsoDate {
            key: "date_published_format",
            field: "datePublished",
            severity: Severity::Warn,
        };
        for ok in ["2024-01-01", "2024-01-01T10:00:00Z", "2024-01-01T10:00+02:00"] {
            let issues = check.run(
                "google",
                TypeName::Article,
                &node(json!({"datePublished": ok})),
                "nodes[0]",
            );
            assert!(issues.is_empty(), "{ok} should be accepted");
        }
        let bad = check.run(
            "google",
            TypeName::Article,
            &node(json!({"datePublished": "Jan 1st"})),
            "nodes[0]",
        );
        assert_eq!(bad.len(), 1);
    }

    #[test]
    fn each_item_reports_per_malformed_item() {
        let check = Check::EachItem {
            key: "question",
            field: "mainEntity",
            item_type: Some("Question"),
            required: &["name", "acceptedAnswer.text"],
            severity: Severity::Warn,
        };
        let n = node(json!({"mainEntity": [
            {"@type": "Question", "name": "Q1", "acceptedAnswer": {"text": "A1"}},
            {"@type": "Question", "name": "Q2"},
            "not an object"
        ]}));
        let issues = check.run("google", TypeName::FaqPage, &n, "nodes[3]");
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("mainEntity[1]"));
        assert!(issues[1].message.contains("mainEntity[2]"));
        assert!(issues.iter().all(|i| i.rule_id == "google.faqpage.question"));
    }

    #[test]
    fn each_item_skips_absent_list() {
        let check = Check::EachItem {
            key: "step_text",
            field: "step",
            item_type: None,
            required: &["text"],
            severity: Severity::Warn,
        };
        assert!(
            check
                .run("google", TypeName::HowTo, &node(json!({})), "nodes[0]")
                .is_empty()
        );
    }
}
