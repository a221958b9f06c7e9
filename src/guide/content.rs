//! Guide text and section layout
//!
//! Everything the tester reads is here. Role sections are generated from
//! the fetched summary; the rest is fixed copy.

use crate::catalog::{category, Role};

use super::document::{Document, Paragraph, Table, ACCENT_HOVER, GRAY_DARK, GRAY_MEDIUM};
use super::summary::CatalogSummary;

pub const APP_URL: &str = "https://fne-lms.vercel.app";
pub const PASSWORD: &str = "QAtester2026!";

/// Role description cells are cut to this many characters
const DESCRIPTION_PREVIEW: usize = 80;

/// A shared QA login
pub struct TestAccount {
    /// Role tag, or a purpose tag for special accounts
    pub key: &'static str,
    pub label: &'static str,
    pub email: &'static str,
    pub notes: &'static str,
}

pub static TEST_ACCOUNTS: &[TestAccount] = &[
    TestAccount { key: "admin", label: "Administrador", email: "admin.qa@fne.cl", notes: "Acceso global completo" },
    TestAccount { key: "docente", label: "Docente", email: "docente.qa@fne.cl", notes: "Cuenta principal docente" },
    TestAccount { key: "community_manager", label: "Community Manager", email: "community.manager.qa@fne.cl", notes: "Gestión de comunidad" },
    TestAccount { key: "equipo_directivo", label: "Equipo Directivo", email: "directivo.qa@fne.cl", notes: "Equipo directivo escolar" },
    TestAccount { key: "lider_generacion", label: "Líder de Generación", email: "lider.generacion.qa@fne.cl", notes: "Líder de generación" },
    TestAccount { key: "consultor", label: "Consultor", email: "consultor.qa@fne.cl", notes: "Consultor externo" },
    TestAccount { key: "supervisor_de_red", label: "Supervisor de Red", email: "supervisor.qa@fne.cl", notes: "Supervisor de red" },
    TestAccount { key: "lider_comunidad", label: "Líder de Comunidad", email: "lider.qa@fne.cl", notes: "Líder de comunidad" },
    TestAccount { key: "docente_sin_escuela", label: "Docente Sin Escuela", email: "docente-noschool.qa@fne.cl", notes: "Solo para EC-01" },
    TestAccount { key: "docente_multi_rol", label: "Docente Multi Rol", email: "docente-multirole.qa@fne.cl", notes: "Solo para EC-03" },
    TestAccount { key: "multi_1", label: "Multi 1", email: "estudiante1.qa@fne.cl", notes: "Tab 1 pruebas colaborativas" },
    TestAccount { key: "multi_2", label: "Multi 2", email: "estudiante2.qa@fne.cl", notes: "Tab 2 pruebas colaborativas" },
    TestAccount { key: "multi_3", label: "Multi 3", email: "estudiante3.qa@fne.cl", notes: "Tab 3 pruebas colaborativas" },
    TestAccount { key: "docente_comunidad", label: "Docente Comunidad", email: "docente.comunidad.qa@fne.cl", notes: "Docente en espacio colaborativo" },
];

/// Main test account for a role
pub fn account_for(role: Role) -> Option<&'static TestAccount> {
    TEST_ACCOUNTS.iter().find(|a| a.key == role.as_str())
}

/// First `max` characters plus `...`
pub fn preview(text: &str, max: usize) -> String {
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}

fn numbered(doc: &mut Document, lines: &[&str]) {
    for (i, line) in lines.iter().enumerate() {
        doc.text(format!("{}. {line}", i + 1));
    }
}

fn bullets(doc: &mut Document, lines: &[&str]) {
    for line in lines {
        doc.text(format!("• {line}"));
    }
}

/// Builds the guide section by section, numbering as it goes
pub struct GuideBuilder<'a> {
    summary: &'a CatalogSummary,
    doc: Document,
    next_section: usize,
}

impl<'a> GuideBuilder<'a> {
    pub fn new(summary: &'a CatalogSummary) -> Self {
        Self {
            summary,
            doc: Document::new(),
            next_section: 1,
        }
    }

    /// Emit every section in order, calling `on_section` with each title
    pub fn build(mut self, mut on_section: impl FnMut(&str)) -> Document {
        on_section("Portada");
        self.cover();

        self.introduction(&mut on_section);
        self.login(&mut on_section);
        self.widget(&mut on_section);
        for index in 0..self.summary.roles.len() {
            self.role_section(index, &mut on_section);
        }
        self.multi_user(&mut on_section);
        self.tips(&mut on_section);
        self.quick_reference(&mut on_section);
        self.glossary(&mut on_section);

        self.doc
    }

    fn section(&mut self, title: &str, on_section: &mut impl FnMut(&str)) {
        let heading = format!("Sección {}: {title}", self.next_section);
        self.next_section += 1;
        on_section(&heading);
        self.doc.heading(1, heading);
    }

    fn cover(&mut self) {
        let doc = &mut self.doc;
        doc.paragraph(Paragraph::new("GENERA").bold().size(18).centered());
        doc.accent_line();
        doc.spacer();
        doc.paragraph(Paragraph::new("Guía del QA Tester").bold().size(24).centered());
        doc.paragraph(
            Paragraph::new("Manual de Pruebas — Sistema QA GENERA")
                .size(14)
                .color(GRAY_MEDIUM)
                .centered(),
        );
        doc.spacer();
        doc.paragraph(
            Paragraph::new("Versión 2.0 — Febrero 2026")
                .size(12)
                .color(GRAY_MEDIUM)
                .centered(),
        );
        for _ in 0..8 {
            doc.spacer();
        }
        doc.paragraph(Paragraph::new("Fundación Nativa Educación").color(GRAY_MEDIUM).centered());
        doc.page_break();
    }

    fn introduction(&mut self, on_section: &mut impl FnMut(&str)) {
        self.section("Introducción", on_section);
        let doc = &mut self.doc;

        doc.text(
            "El Sistema QA de GENERA es una herramienta integral para asegurar la calidad \
             del Learning Management System (LMS). Este manual proporciona instrucciones \
             detalladas para realizar pruebas manuales de todas las funcionalidades del sistema.",
        );
        doc.spacer();
        doc.text(
            "Un \"escenario de prueba\" es una secuencia de pasos que verifica que una \
             funcionalidad específica funciona correctamente. Cada escenario incluye \
             precondiciones, instrucciones paso a paso y resultados esperados.",
        );
        doc.spacer();
        doc.label("Los 8 Roles del Sistema:");

        let mut table = Table::new(&["Rol", "Descripción"], &[1.5, 5.0]);
        for role in Role::ALL {
            table = table.row([role.display_name().to_string(), preview(role.description(), DESCRIPTION_PREVIEW)]);
        }
        doc.table(table);
        doc.page_break();
    }

    fn login(&mut self, on_section: &mut impl FnMut(&str)) {
        self.section("Cómo Iniciar Sesión", on_section);
        let doc = &mut self.doc;

        let open_app = format!("Navega a: {APP_URL}");
        let enter_password = format!("Ingresa la contraseña: {PASSWORD}");
        doc.label("Pasos para Iniciar Sesión:");
        numbered(
            doc,
            &[
                open_app.as_str(),
                "Ingresa tu correo de prueba (ver tabla abajo)",
                enter_password.as_str(),
                "Haz clic en \"Iniciar Sesión\"",
                "Serás redirigido al dashboard correspondiente",
            ],
        );
        doc.spacer();

        doc.label("Cuentas de Prueba:");
        let mut table = Table::new(&["Rol", "Email", "Notas"], &[1.8, 2.8, 2.0]);
        for account in TEST_ACCOUNTS {
            table = table.row([account.label, account.email, account.notes]);
        }
        doc.table(table);
        doc.spacer();

        doc.paragraph(
            Paragraph::new(format!("IMPORTANTE: Todas las cuentas usan la misma contraseña: {PASSWORD}"))
                .bold()
                .color(ACCENT_HOVER),
        );
        doc.spacer();

        doc.label("Cómo Acceder a la Página QA:");
        numbered(
            doc,
            &[
                "Después de iniciar sesión, navega a: /qa",
                "Verás tus escenarios asignados",
                "Haz clic en \"Iniciar Prueba\" para comenzar",
            ],
        );
        doc.page_break();
    }

    fn widget(&mut self, on_section: &mut impl FnMut(&str)) {
        self.section("Cómo Usar el Widget de QA", on_section);
        let doc = &mut self.doc;

        doc.text("El widget flotante es tu herramienta principal para ejecutar pruebas.");
        doc.spacer();

        doc.label("Iniciar una Prueba:");
        numbered(
            doc,
            &[
                "En la página /qa, busca tu escenario asignado",
                "Haz clic en el botón \"Iniciar Prueba\"",
                "El widget flotante aparecerá en la esquina inferior derecha",
            ],
        );
        doc.spacer();

        doc.label("Durante la Prueba:");
        numbered(
            doc,
            &[
                "Lee la instrucción del paso actual",
                "Realiza la acción descrita",
                "Verifica que el resultado esperado ocurra",
                "Marca el resultado:",
            ],
        );
        for line in [
            "APROBAR: El resultado esperado ocurrió",
            "REPROBAR: Algo salió mal (captura automática de pantalla)",
            "OMITIR: El paso no es aplicable",
        ] {
            doc.text(format!("   - {line}"));
        }
        doc.text("5. Agrega notas opcionales para contexto");
        doc.text("6. Haz clic en \"Siguiente\" para continuar");
        doc.spacer();

        doc.label("Características del Widget:");
        bullets(
            doc,
            &[
                "Arrastrable: Haz clic y arrastra para reposicionar",
                "Minimizable: Haz clic en el botón minimizar para colapsar",
                "Auto-guardado: Progreso se guarda cada 15 segundos",
                "Navegación: El widget persiste cuando navegas entre páginas",
                "Capturas: Automáticas en fallos, manuales con el icono de cámara",
            ],
        );
        doc.spacer();

        doc.label("Finalizar una Prueba:");
        numbered(
            doc,
            &[
                "Después del último paso, haz clic en \"Finalizar Prueba\"",
                "Revisa el resumen de aprobados/reprobados",
                "La prueba se guarda en la base de datos",
                "Tu asignación se actualiza automáticamente",
            ],
        );
        doc.page_break();
    }

    fn role_section(&mut self, index: usize, on_section: &mut impl FnMut(&str)) {
        let summaries = self.summary;
        let summary = &summaries.roles[index];
        let role = summary.role;
        self.section(
            &format!("{} — {} Escenarios", role.display_name(), summary.count()),
            on_section,
        );
        let doc = &mut self.doc;

        let email = account_for(role).map(|a| a.email).unwrap_or("N/A");
        doc.label("Cuenta de Prueba:");
        doc.table(Table::new(&["Email", "Contraseña"], &[3.0, 2.0]).row([email, PASSWORD]));
        doc.spacer();

        doc.label("Resumen de Categorías:");
        let mut table = Table::new(&["Código", "Categoría", "Qué se prueba", "Cantidad"], &[0.8, 1.8, 2.8, 0.8]);
        for (code, count) in summary.ranked_categories() {
            if let Some(cat) = category::lookup(code) {
                table = table.row([cat.code.to_string(), cat.label.to_string(), cat.description.to_string(), count.to_string()]);
            }
        }
        doc.table(table);
        doc.spacer();

        doc.label("Descripción del Rol:");
        doc.text(role.description());
        doc.spacer();

        doc.paragraph(
            Paragraph::new(
                "Los escenarios detallados (pasos y resultados esperados) se encuentran en la \
                 plataforma /qa. Inicia sesión con la cuenta indicada arriba para ver la lista \
                 completa de escenarios asignados a este rol.",
            )
            .color(GRAY_MEDIUM),
        );
        doc.page_break();
    }

    fn multi_user(&mut self, on_section: &mut impl FnMut(&str)) {
        self.section("Cuentas de Prueba Multi-Usuario", on_section);
        let doc = &mut self.doc;

        doc.text("Algunos escenarios requieren múltiples usuarios para probar sincronización en tiempo real.");
        doc.spacer();

        doc.label("Configuración de Navegadores:");
        numbered(
            doc,
            &[
                "Chrome (ventana normal) → estudiante1.qa@fne.cl (Usuario A - Tab 1)",
                "Chrome (incógnito) → estudiante2.qa@fne.cl (Usuario B - Tab 2)",
                "Firefox (opcional) → estudiante3.qa@fne.cl (Usuario C - Tab 3)",
            ],
        );
        doc.spacer();

        doc.label("Ejecutar Pruebas Multi-Usuario:");
        doc.text("1. Los escenarios incluyen campos \"actor\" y \"tabIndicator\"");
        doc.text("2. Cada paso especifica qué usuario realiza la acción:");
        doc.text("   - \"Usuario A: Navegar al espacio colaborativo\"");
        doc.text("   - \"Usuario B: Enviar un mensaje\"");
        doc.text("3. Los indicadores de tab (1, 2, 3) muestran qué sesión usar");
        doc.text("4. Verifica sincronización: acciones en un tab aparecen en otros");
        doc.spacer();

        doc.paragraph(Paragraph::new("Ejemplo Multi-Usuario:").bold().color(GRAY_DARK));
        for line in [
            "Paso 1 - Usuario A (Tab 1): Navegar al espacio colaborativo",
            "Paso 2 - Usuario B (Tab 2): Navegar al mismo grupo",
            "Paso 3 - Usuario A (Tab 1): Enviar un mensaje de prueba",
            "Paso 4 - Usuario B (Tab 2): Verificar que el mensaje aparece SIN refrescar",
        ] {
            doc.paragraph(Paragraph::new(line).color(GRAY_MEDIUM));
        }
        doc.page_break();
    }

    fn tips(&mut self, on_section: &mut impl FnMut(&str)) {
        self.section("Consejos y Buenas Prácticas", on_section);
        let doc = &mut self.doc;

        doc.label("Consejos para Testers:");
        bullets(
            doc,
            &[
                "Lee las instrucciones cuidadosamente antes de cada paso",
                "No te apresures — la precisión es más importante que la velocidad",
                "Escribe notas descriptivas cuando algo falla",
                "Si un paso no es claro, pregunta al equipo de desarrollo",
                "Captura pantallas adicionales si encuentras comportamiento inesperado",
                "Verifica que el resultado esperado ocurra ANTES de marcar \"Aprobar\"",
            ],
        );
        doc.spacer();

        doc.label("Solución de Problemas:");
        doc.table(
            Table::new(&["Problema", "Solución"], &[2.0, 4.5])
                .row(["Widget no aparece", "Refresca la página, verifica que tengas permisos de QA"])
                .row(["Progreso perdido", "Verifica session storage, busca pruebas parciales en historial"])
                .row(["Capturas no suben", "Verifica conexión, intenta captura manual con icono de cámara"])
                .row(["Sincronización multi-usuario", "Verifica que ambos usuarios estén en el mismo grupo/canal"]),
        );
        doc.page_break();
    }

    fn quick_reference(&mut self, on_section: &mut impl FnMut(&str)) {
        self.section("Referencia Rápida", on_section);

        let mut table = Table::new(&["Rol", "Cuenta", "Escenarios", "URL"], &[1.5, 2.5, 1.0, 1.5]);
        for summary in &self.summary.roles {
            let email = account_for(summary.role).map(|a| a.email).unwrap_or("N/A");
            table = table.row([
                summary.role.display_name().to_string(),
                email.to_string(),
                summary.count().to_string(),
                APP_URL.to_string(),
            ]);
        }
        self.doc.table(table);
        self.doc.page_break();
    }

    fn glossary(&mut self, on_section: &mut impl FnMut(&str)) {
        let title = "Apéndice: Glosario de Códigos de Categoría";
        on_section(title);
        self.doc.heading(1, title);

        let mut categories: Vec<_> = category::all().iter().collect();
        categories.sort_by_key(|c| c.code);

        let mut table = Table::new(&["Código", "Categoría", "Descripción"], &[0.8, 2.0, 3.7]);
        for cat in categories {
            table = table.row([cat.code, cat.label, cat.description]);
        }
        self.doc.table(table);
    }
}

/// Build the full guide for a summary
pub fn build_guide(summary: &CatalogSummary, on_section: impl FnMut(&str)) -> Document {
    GuideBuilder::new(summary).build(on_section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::client::ScenarioRow;
    use crate::guide::summary::group_by_role;

    fn rows(pairs: &[(&str, &str)]) -> Vec<ScenarioRow> {
        pairs.iter()
            .map(|(role, name)| ScenarioRow {
                id: serde_json::Value::from(*name),
                name: name.to_string(),
                role_required: role.to_string(),
                priority: None,
                estimated_duration_minutes: None,
            })
            .collect()
    }

    #[test]
    fn test_preview_truncates_on_chars() {
        assert_eq!(preview("áéíóú", 3), "áéí...");
        let desc = Role::Docente.description();
        let cell = preview(desc, DESCRIPTION_PREVIEW);
        assert_eq!(cell.chars().count(), 83);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn test_section_numbering_continues_after_roles() {
        let summary = group_by_role(rows(&[
            ("docente", "PB-01: a"),
            ("docente", "PB-02: b"),
            ("admin", "CRUD-01: a"),
        ]));
        let mut seen = Vec::new();
        let doc = build_guide(&summary, |title| seen.push(title.to_string()));

        assert_eq!(
            doc.section_titles(),
            vec![
                "Sección 1: Introducción",
                "Sección 2: Cómo Iniciar Sesión",
                "Sección 3: Cómo Usar el Widget de QA",
                "Sección 4: Docente — 2 Escenarios",
                "Sección 5: Administrador — 1 Escenarios",
                "Sección 6: Cuentas de Prueba Multi-Usuario",
                "Sección 7: Consejos y Buenas Prácticas",
                "Sección 8: Referencia Rápida",
                "Apéndice: Glosario de Códigos de Categoría",
            ]
        );
        assert_eq!(seen[0], "Portada");
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_all_roles_give_fixed_numbering() {
        let pairs: Vec<(&str, &str)> = Role::ALL.iter().map(|r| (r.as_str(), "CA-01: x")).collect();
        let summary = group_by_role(rows(&pairs));
        let doc = build_guide(&summary, |_| {});
        let titles = doc.section_titles();
        assert_eq!(titles[11], "Sección 12: Cuentas de Prueba Multi-Usuario");
        assert_eq!(titles[12], "Sección 13: Consejos y Buenas Prácticas");
        assert_eq!(titles[13], "Sección 14: Referencia Rápida");
    }

    #[test]
    fn test_tables() {
        let summary = group_by_role(rows(&[
            ("consultor", "CA-01: a"),
            ("consultor", "SA-01: a"),
            ("consultor", "SA-02: b"),
            ("consultor", "Sin código"),
        ]));
        let doc = build_guide(&summary, |_| {});

        assert_eq!(doc.table_after("Cuentas de Prueba:").unwrap().rows.len(), 14);
        assert_eq!(doc.table_after("Los 8 Roles del Sistema:").unwrap().rows.len(), 8);

        let account = doc.table_after("Cuenta de Prueba:").unwrap();
        assert_eq!(account.rows[0], vec!["consultor.qa@fne.cl".to_string(), PASSWORD.to_string()]);

        let categories = doc.table_after("Resumen de Categorías:").unwrap();
        let codes: Vec<_> = categories.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(codes, ["SA", "CA"]);
        assert_eq!(categories.rows[0][3], "2");

        let reference = doc.table_after("Sección 7: Referencia Rápida").unwrap();
        assert_eq!(reference.rows, vec![vec![
            "Consultor".to_string(),
            "consultor.qa@fne.cl".to_string(),
            "4".to_string(),
            APP_URL.to_string(),
        ]]);

        let glossary = doc.table_after("Apéndice: Glosario de Códigos de Categoría").unwrap();
        assert_eq!(glossary.rows.len(), 20);
        assert_eq!(glossary.rows[0][0], "BUG");
    }

    #[test]
    fn test_every_role_has_an_account() {
        for role in Role::ALL {
            assert!(account_for(role).is_some(), "{role}");
        }
    }
}
