//! Per-role scenario counts for the guide

use crate::catalog::{category_code, Role};

use super::client::ScenarioRow;

/// Scenarios of one role, with category counts
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSummary {
    pub role: Role,
    pub scenarios: Vec<ScenarioRow>,
    /// `(code, count)` in first-seen order, `OTHER` included
    pub categories: Vec<(&'static str, usize)>,
}

impl RoleSummary {
    fn new(role: Role) -> Self {
        Self {
            role,
            scenarios: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.scenarios.len()
    }

    fn push(&mut self, row: ScenarioRow) {
        let code = category_code(&row.name);
        match self.categories.iter_mut().find(|(c, _)| *c == code) {
            Some((_, n)) => *n += 1,
            None => self.categories.push((code, 1)),
        }
        self.scenarios.push(row);
    }

    /// Known categories by count descending, ties in first-seen order
    pub fn ranked_categories(&self) -> Vec<(&'static str, usize)> {
        let mut ranked: Vec<_> = self
            .categories
            .iter()
            .copied()
            .filter(|(code, _)| crate::catalog::category::lookup(code).is_some())
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Fetched scenarios grouped by role
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSummary {
    /// Roles by scenario count descending, ties in first-seen order
    pub roles: Vec<RoleSummary>,
    /// Rows whose role tag isn't one of the eight roles
    pub unknown: usize,
}

impl CatalogSummary {
    pub fn total(&self) -> usize {
        self.roles.iter().map(RoleSummary::count).sum()
    }
}

#[cfg(test)]
impl CatalogSummary {
    fn get(&self, role: Role) -> Option<&RoleSummary> {
        self.roles.iter().find(|r| r.role == role)
    }
}

/// Group rows by role and count categories
pub fn group_by_role(rows: Vec<ScenarioRow>) -> CatalogSummary {
    let mut summary = CatalogSummary::default();

    for row in rows {
        let role = match row.role_required.parse::<Role>() {
            Ok(role) => role,
            Err(_) => {
                tracing::warn!(role = %row.role_required, name = %row.name, "skipping scenario with unknown role");
                summary.unknown += 1;
                continue;
            }
        };

        let index = match summary.roles.iter().position(|r| r.role == role) {
            Some(i) => i,
            None => {
                summary.roles.push(RoleSummary::new(role));
                summary.roles.len() - 1
            }
        };
        summary.roles[index].push(row);
    }

    // Stable sort keeps first-seen order for equal counts.
    summary.roles.sort_by(|a, b| b.count().cmp(&a.count()));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str, name: &str) -> ScenarioRow {
        ScenarioRow {
            id: serde_json::Value::from(name),
            name: name.to_string(),
            role_required: role.to_string(),
            priority: Some(1),
            estimated_duration_minutes: Some(2),
        }
    }

    #[test]
    fn test_roles_ordered_by_count() {
        let summary = group_by_role(vec![
            row("consultor", "CA-01: a"),
            row("docente", "PB-01: a"),
            row("admin", "CRUD-01: a"),
            row("docente", "PB-02: b"),
            row("admin", "CRUD-02: b"),
            row("docente", "CA-01: c"),
        ]);

        let order: Vec<Role> = summary.roles.iter().map(|r| r.role).collect();
        assert_eq!(order, [Role::Docente, Role::Admin, Role::Consultor]);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_equal_counts_keep_first_seen_order() {
        let summary = group_by_role(vec![
            row("lider_comunidad", "CS-01: a"),
            row("admin", "CRUD-01: a"),
            row("docente", "PB-01: a"),
        ]);
        let order: Vec<Role> = summary.roles.iter().map(|r| r.role).collect();
        assert_eq!(order, [Role::LiderComunidad, Role::Admin, Role::Docente]);
    }

    #[test]
    fn test_unknown_roles_skipped() {
        let summary = group_by_role(vec![row("estudiante", "XX-01"), row("docente", "PB-01: a")]);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.total(), 1);
    }

    #[test]
    fn test_category_ranking() {
        let summary = group_by_role(vec![
            row("docente", "CA-01: a"),
            row("docente", "PB-01: a"),
            row("docente", "Sin código"),
            row("docente", "PB-02: b"),
            row("docente", "EC-01: a"),
            row("docente", "ZZ-01: unknown prefix"),
        ]);
        let docente = summary.get(Role::Docente).unwrap();

        assert_eq!(
            docente.categories,
            [("CA", 1), ("PB", 2), ("OTHER", 2), ("EC", 1)]
        );
        assert_eq!(docente.ranked_categories(), [("PB", 2), ("CA", 1), ("EC", 1)]);
    }
}
