//! SQL migration emitter
//!
//! Produces one transactional script of `UPDATE qa_scenarios` statements,
//! grouped by role, ending with the fixed docente replacements.

mod overrides;

pub use overrides::docente_overrides;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::catalog::{Role, Scenario};
use crate::common::{Error, Result};
use crate::seed::sql::{escape, quote};

const BANNER: &str = "-- ============================================================";

/// One `UPDATE` keyed on scenario name and role
pub fn update_statement(scenario: &Scenario) -> Result<String> {
    let json = serde_json::to_string(&scenario.steps)?;
    Ok(format!(
        "UPDATE qa_scenarios SET steps = '{}'::jsonb WHERE name = {} AND role_required = {};",
        escape(&json),
        quote(&scenario.name),
        quote(scenario.role.as_str()),
    ))
}

fn push_banner(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(BANNER);
    out.push('\n');
    let _ = writeln!(out, "-- {title}");
    out.push_str(BANNER);
    out.push('\n');
}

/// Render the full migration script
///
/// `sources` only feeds the header comment.
pub fn render_migration(scenarios: &[Scenario], sources: &[PathBuf]) -> Result<String> {
    let mut out = String::new();

    let names: Vec<String> = sources
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();

    out.push_str("-- qa_scenarios: tester-facing step text\n");
    let _ = writeln!(out, "-- Sources: {}", if names.is_empty() { "(none)".to_string() } else { names.join(", ") });
    let _ = writeln!(out, "-- Scenarios: {}", scenarios.len());
    out.push_str("BEGIN;\n");

    for role in Role::ALL {
        let group: Vec<&Scenario> = scenarios.iter().filter(|s| s.role == role).collect();
        if group.is_empty() {
            continue;
        }

        push_banner(
            &mut out,
            &format!("{} ({}): {} scenarios", role.as_str(), role.display_name(), group.len()),
        );
        for scenario in group {
            out.push_str(&update_statement(scenario)?);
            out.push('\n');
        }
    }

    push_banner(&mut out, "Manual rewrites (docente)");
    for scenario in docente_overrides() {
        out.push_str(&update_statement(&scenario)?);
        out.push('\n');
    }

    out.push_str("\nCOMMIT;\n");
    Ok(out)
}

/// Write the script, creating parent directories as needed
pub fn write_migration(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_write(path, e))?;
    }
    std::fs::write(path, contents).map_err(|e| Error::file_write(path, e))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote migration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Step;
    use tempfile::tempdir;

    fn scenario(role: Role, name: &str) -> Scenario {
        Scenario {
            role,
            name: name.to_string(),
            steps: vec![Step::new(1, "Abrir la página", "La página carga")],
        }
    }

    fn updates(sql: &str) -> Vec<&str> {
        sql.lines().filter(|l| l.starts_with("UPDATE ")).collect()
    }

    #[test]
    fn test_empty_input_still_valid_transaction() {
        let sql = render_migration(&[], &[]).unwrap();
        assert!(sql.contains("\nBEGIN;\n"));
        assert!(sql.trim_end().ends_with("COMMIT;"));
        assert_eq!(updates(&sql).len(), 6);
        assert!(sql.contains("-- Manual rewrites (docente)"));
        assert!(!sql.contains("(Docente): "));
    }

    #[test]
    fn test_groups_follow_role_order() {
        let scenarios = vec![
            scenario(Role::Consultor, "CA-01: c1"),
            scenario(Role::Docente, "PB-01: d1"),
            scenario(Role::Admin, "CRUD-01: a1"),
            scenario(Role::Docente, "PB-02: d2"),
        ];
        let sql = render_migration(&scenarios, &[PathBuf::from("seeds/docente.sql")]).unwrap();

        assert!(sql.contains("-- Sources: docente.sql\n"));
        assert!(sql.contains("-- Scenarios: 4\n"));

        let admin = sql.find("-- admin (Administrador): 1 scenarios").unwrap();
        let docente = sql.find("-- docente (Docente): 2 scenarios").unwrap();
        let consultor = sql.find("-- consultor (Consultor): 1 scenarios").unwrap();
        let manual = sql.find("-- Manual rewrites (docente)").unwrap();
        assert!(admin < docente && docente < consultor && consultor < manual);

        let d1 = sql.find("'PB-01: d1'").unwrap();
        let d2 = sql.find("'PB-02: d2'").unwrap();
        assert!(d1 < d2);
        assert_eq!(updates(&sql).len(), 10);
    }

    #[test]
    fn test_quotes_escaped_everywhere() {
        let mut s = scenario(Role::Docente, "CA-03: Docente edita su 'perfil'");
        s.steps[0].instruction = "Hacer clic en 'Guardar'".to_string();
        let stmt = update_statement(&s).unwrap();

        assert!(stmt.contains("Hacer clic en ''Guardar''"));
        assert!(stmt.ends_with("WHERE name = 'CA-03: Docente edita su ''perfil''' AND role_required = 'docente';"));
    }

    #[test]
    fn test_steps_json_is_compact_camel_case() {
        let stmt = update_statement(&scenario(Role::Admin, "CA-01: x")).unwrap();
        assert!(stmt.starts_with(
            "UPDATE qa_scenarios SET steps = '[{\"index\":1,\"instruction\":\"Abrir la página\",\"expectedOutcome\":\"La página carga\",\"captureOnFail\":true,\"captureOnPass\":false}]'::jsonb"
        ));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("supabase/migrations/rewrite_qa_steps.sql");
        write_migration(&path, "BEGIN;\nCOMMIT;\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "BEGIN;\nCOMMIT;\n");
    }
}
