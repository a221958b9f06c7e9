//! The eight platform roles a scenario can target

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::Error;

/// Role tag as stored in `qa_scenarios.role_required`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Docente,
    CommunityManager,
    EquipoDirectivo,
    LiderGeneracion,
    Consultor,
    SupervisorDeRed,
    LiderComunidad,
}

impl Role {
    /// All roles in catalogue order
    pub const ALL: [Role; 8] = [
        Role::Admin,
        Role::Docente,
        Role::CommunityManager,
        Role::EquipoDirectivo,
        Role::LiderGeneracion,
        Role::Consultor,
        Role::SupervisorDeRed,
        Role::LiderComunidad,
    ];

    /// Tag used in SQL and the REST API
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Docente => "docente",
            Role::CommunityManager => "community_manager",
            Role::EquipoDirectivo => "equipo_directivo",
            Role::LiderGeneracion => "lider_generacion",
            Role::Consultor => "consultor",
            Role::SupervisorDeRed => "supervisor_de_red",
            Role::LiderComunidad => "lider_comunidad",
        }
    }

    /// Spanish display name shown to testers
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Docente => "Docente",
            Role::CommunityManager => "Community Manager",
            Role::EquipoDirectivo => "Equipo Directivo",
            Role::LiderGeneracion => "Líder de Generación",
            Role::Consultor => "Consultor",
            Role::SupervisorDeRed => "Supervisor de Red",
            Role::LiderComunidad => "Líder de Comunidad",
        }
    }

    /// What the role can and cannot do, in one or two sentences
    pub fn description(&self) -> &'static str {
        match self {
            Role::Admin => "El administrador tiene acceso completo a todas las funciones del sistema, incluyendo gestión de usuarios, cursos, escuelas y configuración global. No tiene límites de permisos (no hay escenarios PB).",
            Role::Docente => "El docente puede tomar cursos, responder quizzes, entregar tareas y participar en el espacio colaborativo. No puede crear cursos, gestionar usuarios ni acceder a funciones de administrador.",
            Role::CommunityManager => "El community manager gestiona contenido y comunidades dentro de su alcance asignado. No puede acceder a funciones de administrador ni gestionar usuarios.",
            Role::EquipoDirectivo => "El equipo directivo tiene acceso a reportes y datos de su propia escuela. No puede crear cursos, gestionar usuarios globales ni acceder a funciones de administrador.",
            Role::LiderGeneracion => "El líder de generación supervisa el progreso de su generación asignada. No puede acceder a funciones de administrador ni a datos fuera de su generación.",
            Role::Consultor => "El consultor externo puede ver evaluaciones, reportes y datos de su escuela asignada. No puede crear cursos, gestionar usuarios ni acceder a funciones de administrador.",
            Role::SupervisorDeRed => "El supervisor de red tiene visibilidad sobre múltiples escuelas dentro de su red asignada. Puede ver reportes a nivel de red pero no puede gestionar usuarios ni crear cursos.",
            Role::LiderComunidad => "El líder de comunidad gestiona su comunidad asignada, incluyendo miembros y actividades. No puede acceder a funciones de administrador ni a datos fuera de su comunidad.",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_serde_matches_tag() {
        let json = serde_json::to_string(&Role::SupervisorDeRed).unwrap();
        assert_eq!(json, "\"supervisor_de_red\"");
    }

    #[test]
    fn test_unknown_role() {
        let err = "estudiante".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("estudiante"));
    }
}
