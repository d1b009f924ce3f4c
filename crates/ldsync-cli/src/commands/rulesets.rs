use crate::cli::FormatArg;
use crate::support::print_json_or_exit;
use ldsync_rules::RulesetName;
use serde_json::{Value, json};

fn catalog() -> Vec<Value> {
    RulesetName::ALL
        .into_iter()
        .map(|name| {
            let ruleset = name.ruleset();
            json!({
                "name": ruleset.name,
                "description": ruleset.description,
                "baseScore": ruleset.base_score,
                "types": ruleset.covered_types(),
            })
        })
        .collect()
}

pub fn run(format: FormatArg) {
    match format {
        FormatArg::Json => print_json_or_exit(&json!({ "rulesets": catalog() }), "rulesets"),
        FormatArg::Text | FormatArg::Github => {
            for name in RulesetName::ALL {
                let ruleset = name.ruleset();
                let types = ruleset
                    .covered_types()
                    .iter()
                    .map(|ty| ty.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  {}", ruleset.name, ruleset.description);
                println!("  types: {types}");
            }
        }
    }
}
