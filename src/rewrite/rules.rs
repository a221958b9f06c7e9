//! The jargon rule table
//!
//! Order is significant. Whole-field rules for specific phrasings come
//! first, then narrower substring removals, then broad mop-up patterns, and
//! whitespace cleanup last.

use super::Field;

/// Which step fields a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Instruction,
    Outcome,
    Both,
}

impl Scope {
    pub fn covers(self, field: Field) -> bool {
        matches!(
            (self, field),
            (Scope::Both, _)
                | (Scope::Instruction, Field::Instruction)
                | (Scope::Outcome, Field::Outcome)
        )
    }
}

/// What a match is replaced with
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// Inserted verbatim
    Literal(&'static str),
    /// Expanded with `$n` capture references
    Template(&'static str),
    /// Remove HTTP status tokens except the ones with dedicated rules
    StatusToken,
}

/// Uncompiled rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub scope: Scope,
    pub pattern: &'static str,
    pub replacement: Replacement,
}

/// Canonical phrase for any "Enviar POST /api/..." instruction
pub const SAVE_CLICK: &str = "Hacer clic en el botón Guardar";

/// Canonical phrase for a "201 Created" outcome
pub const CREATED_OUTCOME: &str = "Aparece un mensaje de éxito y el elemento se muestra en la lista";

/// Status codes handled by dedicated rules and kept by the generic stripper
pub const KEPT_STATUS_CODES: [&str; 4] = ["200", "201", "403", "404"];

pub static RULES: &[Rule] = &[
    Rule {
        name: "enviar-post",
        scope: Scope::Instruction,
        pattern: r"(?s)^.*\bEnviar\s+POST\s+/api/.*$",
        replacement: Replacement::Literal(SAVE_CLICK),
    },
    Rule {
        name: "enviar-put",
        scope: Scope::Instruction,
        pattern: r"(?s)^.*\bEnviar\s+(?:PUT|PATCH)\s+/api/.*$",
        replacement: Replacement::Literal("Hacer clic en el botón Guardar cambios"),
    },
    Rule {
        name: "enviar-delete",
        scope: Scope::Instruction,
        pattern: r"(?s)^.*\bEnviar\s+DELETE\s+/api/.*$",
        replacement: Replacement::Literal("Hacer clic en el botón Eliminar y confirmar la acción"),
    },
    Rule {
        name: "enviar-get",
        scope: Scope::Instruction,
        pattern: r"(?s)^.*\b(?:Enviar|Hacer)\s+GET\s+/api/.*$",
        replacement: Replacement::Literal("Abrir la sección correspondiente y esperar a que cargue"),
    },
    Rule {
        name: "console-fetch",
        scope: Scope::Instruction,
        pattern: r"(?s)^.*\bfetch\(.*$",
        replacement: Replacement::Literal("Intentar realizar la acción desde la interfaz"),
    },
    Rule {
        name: "browser-console",
        scope: Scope::Instruction,
        pattern: r"(?is)^.*\bconsola del navegador\b.*$",
        replacement: Replacement::Literal("Abrir la página principal del sistema"),
    },
    Rule {
        name: "created-201",
        scope: Scope::Outcome,
        pattern: r"(?s)^.*\b(?:API|HTTP|[Rr]espuesta|[Dd]evuelve|[Rr]etorna)\b.*\b201\b.*$",
        replacement: Replacement::Literal(CREATED_OUTCOME),
    },
    Rule {
        name: "ok-200",
        scope: Scope::Outcome,
        pattern: r"(?s)^.*\b(?:API|HTTP|[Rr]espuesta|[Dd]evuelve|[Rr]etorna)\b.*\b200\b.*$",
        replacement: Replacement::Literal("La información se muestra correctamente en pantalla"),
    },
    Rule {
        name: "slash-403",
        scope: Scope::Outcome,
        pattern: r"[ \t]*/[ \t]*403\b",
        replacement: Replacement::Literal(""),
    },
    Rule {
        name: "forbidden-403",
        scope: Scope::Outcome,
        pattern: r"(?s)^.*\b403\b.*$",
        replacement: Replacement::Literal("Aparece un mensaje de acceso denegado o se redirige al inicio"),
    },
    Rule {
        name: "not-found-404",
        scope: Scope::Outcome,
        pattern: r"(?s)^.*\b404\b.*$",
        replacement: Replacement::Literal("Aparece un mensaje indicando que la página no existe"),
    },
    Rule {
        name: "http-verb-path",
        scope: Scope::Both,
        pattern: r"\b(?:GET|POST|PUT|PATCH|DELETE)\s+/api/\S*",
        replacement: Replacement::Literal(""),
    },
    Rule {
        name: "api-path",
        scope: Scope::Both,
        pattern: r"[ \t]*/api/\S*",
        replacement: Replacement::Literal(""),
    },
    Rule {
        name: "status-token",
        scope: Scope::Outcome,
        pattern: r"(^|[^\w.,])([1-5][0-9]{2})\b(%|[ \t]+(?:caracteres|palabras|MB|KB|px)\b)?",
        replacement: Replacement::StatusToken,
    },
    Rule {
        name: "code-flag",
        scope: Scope::Both,
        pattern: r"[ \t]*\([ \t]*[a-z]+[A-Z][A-Za-z]*[ \t]*\)",
        replacement: Replacement::Literal(""),
    },
    Rule {
        name: "enforced-flag",
        scope: Scope::Outcome,
        pattern: r"[ \t]*\b[a-z]+[A-Z][A-Za-z]*[ \t]+enforced\.?",
        replacement: Replacement::Literal(""),
    },
    Rule {
        name: "el-sidebar",
        scope: Scope::Both,
        pattern: r"\bel sidebar\b",
        replacement: Replacement::Literal("la barra lateral"),
    },
    Rule {
        name: "sidebar",
        scope: Scope::Both,
        pattern: r"\bsidebar\b",
        replacement: Replacement::Literal("barra lateral"),
    },
    Rule {
        name: "collapse-spaces",
        scope: Scope::Both,
        pattern: r"[ \t]{2,}",
        replacement: Replacement::Literal(" "),
    },
    Rule {
        name: "space-before-punct",
        scope: Scope::Both,
        pattern: r"[ \t]+([.,;:])",
        replacement: Replacement::Template("$1"),
    },
];
