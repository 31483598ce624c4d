//! Developer tasks: schema generation, fixture regeneration, explain coverage.
//!
//! Kept out of the end-user CLI.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;
use storeguard_app::{CheckInput, run_check};
use storeguard_settings::Overrides;
use storeguard_types::explain;

/// Workspace root (parent of the xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(PathBuf::from)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "storeguard.report.v1.json",
            generate: || schema_for!(storeguard_types::StoreguardReport),
        },
        SchemaSpec {
            filename: "storeguard.config.v1.json",
            generate: || schema_for!(storeguard_settings::StoreguardConfigV1),
        },
    ]
}

/// Pretty JSON with a trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write schema {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Fail if `schemas/` differs from what the types generate.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for s in &stale {
        eprintln!("  - {s}");
    }
    eprintln!("\nRun `cargo run -p xtask -- emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Rewrite every `tests/fixtures/*/expected.report.json` from a fresh check run.
///
/// Timestamps are replaced with `__TIMESTAMP__`. The process environment is not
/// consulted, so rule gating variables on the host do not leak into fixtures.
fn update_fixtures() -> anyhow::Result<()> {
    let dir = fixtures_dir()?;
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    entries.sort();

    for fixture in entries {
        let root = Utf8PathBuf::from_path_buf(fixture.clone())
            .map_err(|p| anyhow::anyhow!("non UTF-8 fixture path: {}", p.display()))?;
        let config_path = root.join("storeguard.toml");
        let config_text = if config_path.is_file() {
            fs::read_to_string(&config_path).with_context(|| format!("read {config_path}"))?
        } else {
            String::new()
        };

        let output = run_check(CheckInput {
            project_root: &root,
            config_text: &config_text,
            overrides: Overrides::default(),
        })
        .with_context(|| format!("check fixture {root}"))?;

        let mut value = serde_json::to_value(&output.report).context("serialize report")?;
        if let Some(obj) = value.as_object_mut() {
            for key in ["started_at", "finished_at"] {
                obj.insert(key.to_string(), serde_json::json!("__TIMESTAMP__"));
            }
        }
        let mut text = serde_json::to_string_pretty(&value).context("serialize report")?;
        text.push('\n');

        let out = root.join("expected.report.json");
        fs::write(&out, text).with_context(|| format!("write {out}"))?;
        println!("Wrote {out}");
    }

    Ok(())
}

/// Every rule key and finding code must have a complete explanation.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();

    let mut errors = Vec::new();
    for (kind, id) in check_ids
        .iter()
        .map(|id| ("Rule", *id))
        .chain(codes.iter().map(|c| ("Code", *c)))
    {
        let Some(exp) = explain::lookup_explanation(id) else {
            errors.push(format!("{kind} '{id}' has no explanation"));
            continue;
        };
        for (field, text) in [
            ("title", exp.title),
            ("description", exp.description),
            ("remediation", exp.remediation),
            ("before example", exp.examples.before),
            ("after example", exp.examples.after),
        ] {
            if text.trim().is_empty() {
                errors.push(format!("{kind} '{id}' has empty {field}"));
            }
        }
    }

    let registered: Vec<_> = storeguard_app::list_rules()
        .into_iter()
        .filter(|r| !check_ids.contains(&r.key))
        .map(|r| r.key)
        .collect();
    for key in registered {
        errors.push(format!("Rule '{key}' is registered but not listed in the explain registry"));
    }

    if errors.is_empty() {
        println!("{} rules and {} codes have explanations", check_ids.len(), codes.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("explain coverage failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check that schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  update-fixtures   Regenerate tests/fixtures/*/expected.report.json");
    eprintln!("  explain-coverage  Check that all rule keys and codes have explanations");
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
        "update-fixtures" => update_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo run -p xtask -- help` for usage."),
    }
    .context("xtask failed")
}
