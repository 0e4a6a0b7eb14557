//! Plan command handler
//!
//! Loads the inputs and prints the calls a run would make, in order.

use anyhow::Result;
use colored::*;
use prowl_core::domain::call::CallSite;
use prowl_core::domain::indexer::IndexerDefinition;
use prowl_setup::Config;
use prowl_setup::inputs::SetupInputs;

/// Print the call sequence without contacting the target API
pub fn handle_plan(config: &Config, payloads: bool) -> Result<()> {
    let inputs = SetupInputs::load(config)?;

    println!("{}", "Setup plan:".bold());
    println!();
    for (position, line) in plan_lines(&inputs.definitions).iter().enumerate() {
        println!("  {:>3}. {}", position + 1, line);
    }

    if payloads {
        println!();
        for definition in &inputs.definitions {
            println!("{}", definition.name().bold());
            println!("{}", serde_json::to_string_pretty(definition.payload())?);
        }
    }

    let placeholders = inputs.proxy_template.placeholders();
    if !placeholders.is_empty() {
        println!();
        println!(
            "Proxy template placeholders: {}",
            placeholders.join(", ").cyan()
        );
    }

    Ok(())
}

/// Every call a run makes once the service is ready
pub fn plan_lines(definitions: &[IndexerDefinition]) -> Vec<String> {
    let mut lines = vec![
        describe(CallSite::CreateTag, None),
        describe(CallSite::RegisterProxy, None),
    ];

    for definition in definitions {
        for &site in definition.branch().call_plan() {
            lines.push(describe(site, Some(definition.name())));
        }
    }

    lines
}

fn describe(site: CallSite, name: Option<&str>) -> String {
    let call = format!("{} {}", site.method(), site.path());
    match name {
        Some(name) => format!("{:<40} {} ({})", call, site, name),
        None => format!("{:<40} {}", call, site),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prowl_core::domain::indexer::parse_document;

    #[test]
    fn test_plan_lines() {
        let definitions = parse_document(
            r#"[{"name":"A","fields":[]},{"name":"B","fields":[{"name":"cardigannCaptcha"}]}]"#,
        )
        .unwrap();

        let lines = plan_lines(&definitions);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("POST /tag"));
        assert!(lines[1].starts_with("POST /indexerProxy"));
        assert!(lines[2].ends_with("create (A)"));
        assert!(lines[3].ends_with("create (B)"));
        assert!(lines[4].starts_with("POST /indexer/action/checkCaptcha"));
        assert!(lines[5].ends_with("create (B)"));
    }

    #[test]
    fn test_plan_without_indexers() {
        assert_eq!(plan_lines(&[]).len(), 2);
    }
}
