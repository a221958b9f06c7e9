//! Jargon rewriting
//!
//! Turns developer-facing step text ("Enviar POST /api/courses", "API
//! devuelve 201 Created") into instructions a manual tester can follow.
//! Rules run in table order over `instruction` and `expectedOutcome`; each
//! rule sees the output of the ones before it.

mod rules;

pub use rules::{Replacement, Rule, Scope, CREATED_OUTCOME, KEPT_STATUS_CODES, RULES, SAVE_CLICK};

use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;

use crate::catalog::{Scenario, Step};
use crate::common::{Error, Result};

/// Free-text step field
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Field {
    Instruction,
    Outcome,
}

struct CompiledRule {
    rule: Rule,
    regex: Regex,
}

impl CompiledRule {
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.rule.replacement {
            Replacement::Literal(with) => self.regex.replace_all(text, NoExpand(with)),
            Replacement::Template(with) => self.regex.replace_all(text, with),
            Replacement::StatusToken => self.regex.replace_all(text, |caps: &Captures| {
                let code = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                let lead = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                if caps.get(3).is_some() || KEPT_STATUS_CODES.contains(&code) {
                    caps[0].to_string()
                } else if lead == " " {
                    String::new()
                } else {
                    // Keep the delimiter in front of the token
                    lead.to_string()
                }
            }),
        }
    }
}

/// Counts from rewriting a batch of scenarios
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    pub steps: usize,
    pub fields_changed: usize,
}

/// Ordered, compiled rule list
pub struct Rewriter {
    rules: Vec<CompiledRule>,
}

impl Rewriter {
    /// Compile the built-in rule table
    pub fn new() -> Result<Self> {
        Self::with_rules(RULES)
    }

    /// Compile a custom rule table
    pub fn with_rules(rules: &[Rule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(rule.pattern)
                    .map(|regex| CompiledRule { rule: *rule, regex })
                    .map_err(|e| Error::pattern(rule.name, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Rewrite one field value
    pub fn rewrite(&self, field: Field, text: &str) -> String {
        let mut current = text.to_string();
        for rule in self.rules.iter().filter(|r| r.rule.scope.covers(field)) {
            if let Cow::Owned(next) = rule.apply(&current) {
                if next != current {
                    tracing::trace!(rule = rule.rule.name, before = %current, after = %next, "rule applied");
                }
                current = next;
            }
        }
        current.trim().to_string()
    }

    /// Rewrite both free-text fields of a step, returning how many changed
    pub fn rewrite_step(&self, step: &mut Step) -> usize {
        let instruction = self.rewrite(Field::Instruction, &step.instruction);
        let outcome = self.rewrite(Field::Outcome, &step.expected_outcome);

        let mut changed = 0;
        if instruction != step.instruction {
            step.instruction = instruction;
            changed += 1;
        }
        if outcome != step.expected_outcome {
            step.expected_outcome = outcome;
            changed += 1;
        }
        changed
    }

    /// Rewrite every step of every scenario in place
    pub fn rewrite_scenarios(&self, scenarios: &mut [Scenario]) -> RewriteStats {
        let mut stats = RewriteStats::default();
        for scenario in scenarios.iter_mut() {
            for step in scenario.steps.iter_mut() {
                stats.steps += 1;
                stats.fields_changed += self.rewrite_step(step);
            }
        }
        stats
    }
}
