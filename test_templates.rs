#![allow(clippy::uninlined_format_args)]

use email_qc::templates::{template, TemplateName};
use email_qc::{QcEngine, RubricConfig, RubricKind};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Scoring built-in templates against the body rubrics...");

    // Stricter team override: templates should still pass
    let config_yaml = r#"
thresholds:
  structural_pass: 85
  weighted_pass: 8.5
branding:
  company_name: "Air Travel Claim"
"#;

    let config: RubricConfig = serde_yaml::from_str(config_yaml)?;

    let mut failures = 0;
    for kind in [RubricKind::Structural, RubricKind::Weighted] {
        let engine = QcEngine::new(kind, &config)?;
        for name in TemplateName::ALL {
            let result = engine.validate(template(name))?;
            let status = if result.is_valid { "PASS" } else { "FAIL" };
            println!(
                "  {:<10} {:<9} {:>3}/100 {}",
                kind.as_str(),
                name.as_str(),
                result.score,
                status
            );
            for suggestion in result.suggestions() {
                println!("      - {}", suggestion);
            }
            if !result.is_valid {
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} template checks failed", failures);
    }
    println!("All templates pass.");
    Ok(())
}
