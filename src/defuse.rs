//! Def-use chains (§4.6): a thin, statement-level record of where each
//! variable is defined and where it's read, scoped to one function. Used
//! by the chain inference strategy (§4.3.4) to walk backward from a use to
//! its most recent definition.

use crate::location::SourceLocation;

/// One statement's effect on a single variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Definition,
    Use,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub variable: String,
    pub kind: StatementKind,
    pub location: SourceLocation,
}

/// All def/use statements recorded for one function, in source order.
#[derive(Debug, Default, Clone)]
pub struct DefUseChain {
    statements: Vec<Statement>,
}

impl DefUseChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_definition(&mut self, variable: impl Into<String>, location: SourceLocation) {
        self.statements.push(Statement {
            variable: variable.into(),
            kind: StatementKind::Definition,
            location,
        });
    }

    pub fn record_use(&mut self, variable: impl Into<String>, location: SourceLocation) {
        self.statements.push(Statement {
            variable: variable.into(),
            kind: StatementKind::Use,
            location,
        });
    }

    /// The most recent definition of `variable` at or before `location`,
    /// i.e. what a use at that point would actually see. Source order, not
    /// line-number order, decides "most recent" for statements on the same
    /// line (e.g. a walrus assignment used later in the same expression).
    pub fn last_definition_before(&self, variable: &str, location: SourceLocation) -> Option<&Statement> {
        self.statements
            .iter()
            .take_while(|s| s.location <= location)
            .filter(|s| s.variable == variable && s.kind == StatementKind::Definition)
            .next_back()
    }

    pub fn definitions_of(&self, variable: &str) -> Vec<&Statement> {
        self.statements
            .iter()
            .filter(|s| s.variable == variable && s.kind == StatementKind::Definition)
            .collect()
    }

    pub fn uses_of(&self, variable: &str) -> Vec<&Statement> {
        self.statements
            .iter()
            .filter(|s| s.variable == variable && s.kind == StatementKind::Use)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_most_recent_definition_before_a_use() {
        let mut chain = DefUseChain::new();
        chain.record_definition("x", SourceLocation::new(1, 0));
        chain.record_definition("x", SourceLocation::new(3, 0));
        chain.record_use("x", SourceLocation::new(5, 0));

        let def = chain
            .last_definition_before("x", SourceLocation::new(5, 0))
            .expect("definition");
        assert_eq!(def.location, SourceLocation::new(3, 0));
    }

    #[test]
    fn ignores_definitions_after_the_use_site() {
        let mut chain = DefUseChain::new();
        chain.record_definition("x", SourceLocation::new(1, 0));
        chain.record_definition("x", SourceLocation::new(10, 0));

        let def = chain
            .last_definition_before("x", SourceLocation::new(5, 0))
            .expect("definition");
        assert_eq!(def.location, SourceLocation::new(1, 0));
    }

    #[test]
    fn unrelated_variable_has_no_definitions() {
        let mut chain = DefUseChain::new();
        chain.record_definition("x", SourceLocation::new(1, 0));
        assert!(chain.definitions_of("y").is_empty());
    }
}
