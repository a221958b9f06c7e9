//! Scenario category codes
//!
//! A scenario's category is the prefix of its name before the first `-`
//! (`"PB-02: ..."` is a permission-boundary scenario).

/// Code reported for names without a known prefix
pub const OTHER: &str = "OTHER";

/// A known category code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub code: &'static str,
    /// Spanish label
    pub label: &'static str,
    /// What scenarios in this category verify
    pub description: &'static str,
}

static CATEGORIES: &[Category] = &[
    Category { code: "PB", label: "Límites de Permisos", description: "Que el rol NO pueda acceder a funciones restringidas" },
    Category { code: "CA", label: "Acceso Correcto", description: "Que el rol SÍ pueda acceder a sus funciones permitidas" },
    Category { code: "SV", label: "Sidebar Visible", description: "Que el menú lateral muestre las opciones correctas" },
    Category { code: "SNV", label: "Sidebar No Visible", description: "Que el menú lateral oculte opciones no permitidas" },
    Category { code: "SA", label: "Alcance de Evaluaciones", description: "Que solo se vean datos del propio colegio" },
    Category { code: "SS", label: "Alcance de Escuela", description: "Que solo se vean datos de la escuela asignada" },
    Category { code: "NS", label: "Alcance de Red", description: "Que se vean datos de toda la red asignada" },
    Category { code: "CS", label: "Alcance de Comunidad", description: "Que se gestionen solo las comunidades asignadas" },
    Category { code: "GS", label: "Alcance Global/Generacional", description: "Verificar el alcance de datos global o generacional" },
    Category { code: "EC", label: "Casos Especiales", description: "Situaciones atípicas: sin escuela, roles múltiples, sesión expirada" },
    Category { code: "CP", label: "Participación en Cursos", description: "Inscripción, navegación y progreso en cursos" },
    Category { code: "QT", label: "Quizzes y Evaluaciones", description: "Responder evaluaciones y preguntas abiertas" },
    Category { code: "TS", label: "Entrega de Tareas", description: "Subir archivos y enviar tareas" },
    Category { code: "CW", label: "Espacio Colaborativo", description: "Funciones del espacio de comunidad" },
    Category { code: "PN", label: "Perfil y Notificaciones", description: "Edición de perfil y notificaciones" },
    Category { code: "BUG", label: "Verificación de Error", description: "Confirmar si un error reportado sigue presente" },
    Category { code: "CRUD", label: "Operaciones CRUD", description: "Crear, leer, actualizar y eliminar recursos" },
    Category { code: "RG", label: "Pruebas de Regresión", description: "Verificar que funcionalidades existentes no se rompieron" },
    Category { code: "CMS", label: "Gestión de Contenido", description: "Funciones de gestión de contenido del community manager" },
    Category { code: "RLS", label: "Seguridad de Datos", description: "Verificar que las políticas de seguridad filtran datos correctamente" },
];

/// All known categories, in table order
pub fn all() -> &'static [Category] {
    CATEGORIES
}

/// Look up a category by code
pub fn lookup(code: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.code == code)
}

/// Derive the category code from a scenario name
///
/// Returns [`OTHER`] when the name has no `-` or its prefix is unknown.
pub fn category_code(name: &str) -> &'static str {
    name.split_once('-')
        .and_then(|(prefix, _)| lookup(prefix.trim()))
        .map(|c| c.code)
        .unwrap_or(OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_prefixes() {
        assert_eq!(category_code("PB-02: Docente intenta crear un usuario"), "PB");
        assert_eq!(category_code("SNV-19: Sin duplicados en sidebar"), "SNV");
        assert_eq!(category_code("BUG-01: Verificación de auto-grading"), "BUG");
    }

    #[test]
    fn test_unknown_or_missing_prefix() {
        assert_eq!(category_code("XX-01: algo"), OTHER);
        assert_eq!(category_code("Escenario sin código"), OTHER);
        assert_eq!(category_code(""), OTHER);
    }

    #[test]
    fn test_table_has_twenty_unique_codes() {
        let mut codes: Vec<_> = all().iter().map(|c| c.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 20);
    }
}
