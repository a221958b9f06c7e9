//! Format-neutral document model
//!
//! Section builders produce a flat list of [`Block`]s; [`super::docx`]
//! turns them into WordprocessingML.

/// RGB hex without `#`
pub type Color = &'static str;

pub const PRIMARY: Color = "0a0a0a";
pub const ACCENT: Color = "fbbf24";
pub const ACCENT_HOVER: Color = "f59e0b";
pub const LIGHT: Color = "ffffff";
pub const GRAY_DARK: Color = "1f1f1f";
pub const GRAY_MEDIUM: Color = "6b7280";
pub const GRAY_LIGHT: Color = "f9fafb";
pub const BORDER: Color = "e5e7eb";

pub const FONT: &str = "Calibri";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// A single-run paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub bold: bool,
    /// Points
    pub size: u32,
    pub color: Color,
    pub align: Align,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size: 11,
            color: PRIMARY,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, points: u32) -> Self {
        self.size = points;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// Header row plus data rows, with column widths in inches
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub widths: Vec<f32>,
}

impl Table {
    pub fn new(headers: &[&str], widths: &[f32]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            widths: widths.to_vec(),
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.rows.push(cells.into_iter().map(|c| c.to_string()).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Level 1 headings are followed by an accent rule
    Heading { level: u8, text: String },
    Paragraph(Paragraph),
    Table(Table),
    /// Thin full-width accent-coloured rule
    AccentLine,
    Spacer,
    PageBreak,
}

/// Ordered blocks of one document
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
        if level == 1 {
            self.blocks.push(Block::AccentLine);
        }
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Plain 11pt body text
    pub fn text(&mut self, text: impl Into<String>) {
        self.paragraph(Paragraph::new(text));
    }

    /// Bold label line
    pub fn label(&mut self, text: impl Into<String>) {
        self.paragraph(Paragraph::new(text).bold());
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn accent_line(&mut self) {
        self.blocks.push(Block::AccentLine);
    }

    pub fn spacer(&mut self) {
        self.blocks.push(Block::Spacer);
    }

    pub fn page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }
}

#[cfg(test)]
impl Document {
    /// Text of every level-1 heading, in order
    pub(crate) fn section_titles(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: 1, text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First table following a paragraph or heading whose text is `label`
    pub(crate) fn table_after(&self, label: &str) -> Option<&Table> {
        let start = self.blocks.iter().position(|b| match b {
            Block::Paragraph(p) => p.text == label,
            Block::Heading { text, .. } => text == label,
            _ => false,
        })?;
        self.blocks[start..].iter().find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_heading_adds_accent_line() {
        let mut doc = Document::new();
        doc.heading(1, "Sección 1");
        doc.heading(2, "Sub");
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1], Block::AccentLine);
        assert_eq!(doc.section_titles(), vec!["Sección 1"]);
    }

    #[test]
    fn test_table_after_label() {
        let mut doc = Document::new();
        doc.label("Cuentas:");
        doc.spacer();
        doc.table(Table::new(&["Rol"], &[1.0]).row(["Docente"]));
        let table = doc.table_after("Cuentas:").unwrap();
        assert_eq!(table.rows, vec![vec!["Docente".to_string()]]);
        assert!(doc.table_after("Nada").is_none());
    }
}
