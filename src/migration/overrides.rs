//! Hand-written docente step replacements
//!
//! These scenarios were written as browser-console or code-level checks.
//! No rule turns `fetch(...)` into something a tester can click, so their
//! steps are replaced wholesale at the end of every migration.

use crate::catalog::{Role, Scenario, Step};

fn docente(name: &str, steps: Vec<Step>) -> Scenario {
    Scenario {
        role: Role::Docente,
        name: name.to_string(),
        steps,
    }
}

/// The six fixed replacements, in emission order
pub fn docente_overrides() -> Vec<Scenario> {
    vec![
        docente(
            "PB-03: Docente intenta editar perfil de otro usuario",
            vec![
                Step::new(
                    1,
                    "Intentar navegar a /admin/user-management",
                    "Aparece un mensaje de acceso denegado o se redirige al inicio",
                )
                .with_route("/admin/user-management"),
                Step::new(
                    2,
                    "Abrir el perfil de otro usuario desde la lista de miembros de la comunidad",
                    "No aparece ningún botón para editar el perfil de otra persona",
                ),
            ],
        ),
        docente(
            "PB-09: Docente intenta ver el constructor de evaluaciones",
            vec![Step::new(
                1,
                "Revisar todas las opciones de la barra lateral",
                "\"Procesos de Cambio\" NO es visible",
            )],
        ),
        docente(
            "PB-11: Docente intenta asignar cursos a otros",
            vec![
                Step::new(
                    1,
                    "Verificar que no hay botón de \"Asignar curso\" en la vista de cursos",
                    "Ningún botón de asignación visible",
                ),
                Step::new(
                    2,
                    "Intentar navegar a /admin/course-assignments",
                    "Aparece un mensaje de acceso denegado o se redirige al inicio",
                )
                .with_route("/admin/course-assignments"),
            ],
        ),
        docente(
            "EC-03: Docente con múltiples roles funciona correctamente",
            vec![
                Step::new(
                    1,
                    "Iniciar sesión como docente-multirole.qa@fne.cl",
                    "La sesión inicia correctamente",
                ),
                Step::new(2, "Navegar a /mi-aprendizaje?tab=cursos", "Se muestran los cursos inscritos")
                    .with_route("/mi-aprendizaje?tab=cursos"),
                Step::new(
                    3,
                    "Revisar las opciones de la barra lateral",
                    "Aparecen opciones de docente y de líder de comunidad al mismo tiempo",
                ),
            ],
        ),
        docente(
            "EC-05: Docente sin comunidad intenta URL directa de workspace",
            vec![
                Step::new(1, "Iniciar sesión como docente-noschool.qa@fne.cl", "La sesión inicia"),
                Step::new(
                    2,
                    "Escribir /community/workspace en la barra de direcciones y presionar Enter",
                    "Aparece un mensaje de acceso denegado o se redirige al inicio",
                )
                .with_route("/community/workspace"),
            ],
        ),
        docente(
            "EC-06: Docente accede a endpoints API directamente (bypass sidebar)",
            vec![
                Step::new(
                    1,
                    "Escribir /admin/user-management en la barra de direcciones y presionar Enter",
                    "Aparece un mensaje de acceso denegado o se redirige al inicio",
                )
                .with_route("/admin/user-management"),
                Step::new(
                    2,
                    "Escribir /admin/schools en la barra de direcciones y presionar Enter",
                    "Aparece un mensaje de acceso denegado o se redirige al inicio",
                )
                .with_route("/admin/schools"),
                Step::new(
                    3,
                    "Volver a la página principal y revisar la barra lateral",
                    "No se muestra ningún dato ni opción de administración",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::Rewriter;

    #[test]
    fn test_six_docente_overrides() {
        let overrides = docente_overrides();
        let codes: Vec<_> = overrides
            .iter()
            .map(|s| crate::catalog::category_code(&s.name))
            .collect();
        assert_eq!(codes, ["PB", "PB", "PB", "EC", "EC", "EC"]);
        assert!(overrides.iter().all(|s| s.role == Role::Docente));
        assert!(overrides[0].name.starts_with("PB-03:"));
        assert!(overrides[5].name.starts_with("EC-06:"));
    }

    #[test]
    fn test_overrides_survive_rewriting() {
        let rewriter = Rewriter::new().unwrap();
        let mut rewritten = docente_overrides();
        let stats = rewriter.rewrite_scenarios(&mut rewritten);
        assert_eq!(stats.fields_changed, 0);
        assert_eq!(rewritten, docente_overrides());
    }

    #[test]
    fn test_steps_are_numbered_from_one() {
        for scenario in docente_overrides() {
            let indexes: Vec<u32> = scenario.steps.iter().map(|s| s.index).collect();
            let expected: Vec<u32> = (1..=scenario.steps.len() as u32).collect();
            assert_eq!(indexes, expected, "{}", scenario.name);
        }
    }
}
