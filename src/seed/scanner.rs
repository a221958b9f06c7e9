//! Heuristic block scanning over seed SQL
//!
//! Nothing here parses SQL. Block boundaries come from literal markers found
//! in the text, and the first two `'[...]'` literals in a block are taken
//! to be the preconditions and steps columns.

use regex::Regex;

use super::sql::{read_quoted, unescape};
use super::SeedLayout;
use crate::catalog::{category, steps_from_json, Role, Scenario};
use crate::common::{Error, Result};

/// Outcome of scanning one seed text
#[derive(Debug, Default)]
pub struct ScanResult {
    pub scenarios: Vec<Scenario>,
    /// Blocks that had a boundary marker but not the fields behind it
    pub skipped: usize,
}

/// Text between two boundaries, before field extraction
struct Block<'a> {
    role: Option<Role>,
    name: Option<String>,
    body: &'a str,
}

/// Compiled scanning patterns
pub struct SeedScanner {
    tuple_start: Regex,
    role_literal: Regex,
    comment_marker: Regex,
    json_array: Regex,
}

impl SeedScanner {
    /// Compile the scanning patterns
    pub fn new() -> Result<Self> {
        let roles = Role::ALL
            .iter()
            .map(|r| regex::escape(r.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let codes = category::all()
            .iter()
            .map(|c| regex::escape(c.code))
            .collect::<Vec<_>>()
            .join("|");

        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::pattern(name, e))
        };

        Ok(Self {
            tuple_start: compile("tuple-start", &format!(r"\(\s*'({roles})'"))?,
            role_literal: compile("role-literal", &format!(r"'({roles})'"))?,
            comment_marker: compile(
                "comment-marker",
                &format!(r"(?m)^[ \t]*--[ \t]*((?:{codes})-\d+\b.*?)[ \t]*\r?$"),
            )?,
            json_array: compile("json-array", r"'(\[(?s:.*?)\])'")?,
        })
    }

    /// Pick a concrete layout for a text
    ///
    /// Comment-prefix needs at least as many scenario comments as role tuples.
    pub fn resolve_layout(&self, text: &str, layout: SeedLayout) -> SeedLayout {
        match layout {
            SeedLayout::Auto => {
                let markers = self.comment_marker.find_iter(text).count();
                let tuples = self.tuple_start.find_iter(text).count();
                if markers > 0 && markers >= tuples {
                    SeedLayout::CommentPrefix
                } else {
                    SeedLayout::RoleTuple
                }
            }
            other => other,
        }
    }

    /// Extract every scenario the layout's boundaries delimit
    pub fn scan(&self, text: &str, layout: SeedLayout) -> ScanResult {
        let blocks = match self.resolve_layout(text, layout) {
            SeedLayout::CommentPrefix => self.comment_prefix_blocks(text),
            _ => self.role_tuple_blocks(text),
        };

        let mut result = ScanResult::default();
        for block in blocks {
            match self.finish_block(&block) {
                Some(scenario) => result.scenarios.push(scenario),
                None => {
                    tracing::debug!(
                        name = block.name.as_deref().unwrap_or("<none>"),
                        "dropping seed block without role, name or steps"
                    );
                    result.skipped += 1;
                }
            }
        }
        result
    }

    /// Blocks start at `('<role>'` and run to the next one
    fn role_tuple_blocks<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        let starts: Vec<_> = self
            .tuple_start
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let role = caps.get(1)?.as_str().parse::<Role>().ok()?;
                Some((whole.start(), whole.end(), role))
            })
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &(_, role_end, role))| {
                let end = starts.get(i + 1).map(|s| s.0).unwrap_or(text.len());
                Block {
                    role: Some(role),
                    name: name_after_role(text, role_end),
                    body: &text[role_end..end],
                }
            })
            .collect()
    }

    /// Blocks start at a `-- CODE-NN ...` comment line, which also names them
    fn comment_prefix_blocks<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        let markers: Vec<_> = self
            .comment_marker
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((whole.start(), whole.end(), caps.get(1)?.as_str().to_string()))
            })
            .collect();

        markers
            .iter()
            .enumerate()
            .map(|(i, (_, line_end, name))| {
                let end = markers.get(i + 1).map(|m| m.0).unwrap_or(text.len());
                let body = &text[*line_end..end];
                let role = self
                    .role_literal
                    .captures(body)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse::<Role>().ok());
                Block {
                    role,
                    name: Some(name.clone()),
                    body,
                }
            })
            .collect()
    }

    fn finish_block(&self, block: &Block<'_>) -> Option<Scenario> {
        let role = block.role?;
        let name = block.name.as_ref().filter(|n| !n.trim().is_empty())?;

        let steps_literal = self
            .json_array
            .captures_iter(block.body)
            .nth(1)
            .and_then(|caps| caps.get(1))?;
        let steps = steps_from_json(&unescape(steps_literal.as_str()))?;

        Some(Scenario {
            role,
            name: name.trim().to_string(),
            steps,
        })
    }
}

/// The literal following `'<role>',` is the scenario name
fn name_after_role(text: &str, role_end: usize) -> Option<String> {
    let rest = text[role_end..].trim_start().strip_prefix(',')?.trim_start();
    let offset = text.len() - rest.len();
    read_quoted(text, offset).map(|(name, _)| name)
}
