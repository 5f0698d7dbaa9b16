//! Developer tasks (schema generation, fixture validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use zerosight_app::{
    ActorDirectory, ReportService, initial_reports, parse_scenario_toml, run_scenario,
};
use zerosight_domain::{Capability, EffectiveConfig, decide};
use zerosight_types::{Report, ReportStatus, Role, Visibility};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn scenario_fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures").join("scenarios"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(zerosight_types::Report)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(zerosight_settings::ZerosightConfigV1)
}

fn generate_scenario_schema() -> schemars::Schema {
    schema_for!(zerosight_app::Scenario)
}

const SCENARIO_SCHEMA: &str = "zerosight.scenario.v1.json";

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "zerosight.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "zerosight.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: SCENARIO_SCHEMA,
            generate: generate_scenario_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Validate every scenario fixture against the scenario schema, then replay it under the strict
/// profile and require every step to meet its expectation.
fn validate_fixtures() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_scenario_schema())?;
    let compiled = jsonschema::draft7::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile scenario schema: {}", e))?;

    let dir = scenario_fixtures_dir()?;
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        bail!("No scenario fixtures found in {}", dir.display());
    }

    let directory = ActorDirectory::default();
    let mut errors = Vec::new();

    for path in &paths {
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", filename))?;

        let as_json: serde_json::Value = toml::from_str(&text)
            .with_context(|| format!("Failed to parse {} as TOML", filename))?;
        for err in compiled.iter_errors(&as_json) {
            errors.push(format!("{}: schema validation: {}", filename, err));
        }

        let scenario = match parse_scenario_toml(&text) {
            Ok(s) => s,
            Err(e) => {
                errors.push(format!("{}: {:#}", filename, e));
                continue;
            }
        };

        let mut service = ReportService::new(EffectiveConfig::default(), initial_reports());
        match run_scenario(&mut service, &directory, &scenario) {
            Ok(outcome) => {
                for step in outcome.failures() {
                    errors.push(format!(
                        "{}: step {} ({}) returned {} but expected {}",
                        filename,
                        step.index,
                        step.op,
                        step.result.as_str(),
                        step.expected.as_str()
                    ));
                }
            }
            Err(e) => errors.push(format!("{}: {:#}", filename, e)),
        }

        println!("  ✓ {} checked", filename);
    }

    if !errors.is_empty() {
        eprintln!("\nFixture errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Fixture validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} scenario fixtures pass!", paths.len());
    Ok(())
}

/// Validate that every rule id has an explanation, and that every rule the evaluator can
/// produce is a listed rule id.
fn explain_coverage() -> anyhow::Result<()> {
    let rule_ids = zerosight_types::explain::all_rule_ids();
    let mut errors = Vec::new();

    for rule_id in rule_ids {
        match zerosight_types::lookup_explanation(rule_id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Rule '{}' has empty title", rule_id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Rule '{}' has empty description", rule_id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Rule '{}' has empty remediation", rule_id));
                }
            }
            None => errors.push(format!("Rule '{}' has no explanation", rule_id)),
        }
    }

    let listed: BTreeSet<&str> = rule_ids.iter().copied().collect();
    let produced = produced_rule_ids();
    for rule_id in &produced {
        if !listed.contains(rule_id) {
            errors.push(format!("Evaluator produces unlisted rule '{}'", rule_id));
        }
    }
    for rule_id in &listed {
        if !produced.contains(rule_id) {
            errors.push(format!("Rule '{}' is never produced by the evaluator", rule_id));
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule IDs have explanations", rule_ids.len());
        println!("✓ every produced rule ID is listed");
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

/// Every rule id `decide` returns over all roles, statuses, visibilities and authorships.
fn produced_rule_ids() -> BTreeSet<&'static str> {
    let mut produced = BTreeSet::new();
    let mut template: Report = initial_reports().remove(0);

    for status in ReportStatus::ALL {
        for visibility in Visibility::ALL {
            template.status = status;
            template.visibility = visibility;
            for role in Role::ALL {
                for actor_id in [template.author_id.clone(), "someone-else".to_string()] {
                    for capability in Capability::ALL {
                        produced.insert(decide(capability, &template, &actor_id, role).rule_id);
                    }
                }
            }
        }
    }
    produced
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help               Show this message");
    eprintln!("  emit-schemas       Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas   Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids   Print known schema IDs");
    eprintln!("  validate-fixtures  Schema-check and replay tests/fixtures/scenarios/*.toml");
    eprintln!("  explain-coverage   Validate all rule IDs have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
