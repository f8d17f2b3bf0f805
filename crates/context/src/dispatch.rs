// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dispatch table
//!
//! Maps a node kind to the rules consulted when the climber stands on a node of
//! that kind. A rule fires when one of its suffix patterns equals the tail of the
//! collected prefix; the first firing rule of an entry wins.

use crate::keywords::{
    KINDS, NESTED_PATTERNS, PIPELINE_STAGES, SCHEMA_QUERIES, THING_CONSTRAINTS, TYPE_CONSTRAINTS,
};
use crate::suggestions::{CompletionCandidate, Generator};
use std::collections::HashMap;
use std::sync::LazyLock;
use typeql_grammar::{NodeKind as K, SyntaxNode, SyntaxTree};

/// Node kinds a prefix must end with
pub type SuffixPattern = &'static [K];

/// One row of a dispatch entry
#[derive(Debug)]
pub struct DispatchRule {
    pub suffixes: &'static [SuffixPattern],
    pub generators: &'static [Generator],
    /// Keep climbing after collecting this rule's candidates
    pub continue_climbing: bool,
}

impl DispatchRule {
    /// Whether any suffix equals the tail of `prefix`
    ///
    /// The empty suffix matches every prefix.
    pub fn matches(&self, prefix: &[K]) -> bool {
        self.suffixes.iter().any(|suffix| prefix.ends_with(suffix))
    }

    /// Run every generator and concatenate what they offer
    pub fn generate(&self, tree: &SyntaxTree, text: &str) -> Vec<CompletionCandidate> {
        self.generators
            .iter()
            .filter_map(|generator| generator.generate(tree, text))
            .flatten()
            .collect()
    }
}

/// Rules selected by a refinement
#[derive(Debug)]
pub enum Refined {
    Rules(&'static [DispatchRule]),
    /// No suggestions at all in this context
    Suppress,
}

/// Table entry for one node kind
#[derive(Debug)]
pub enum DispatchEntry {
    Rules(&'static [DispatchRule]),
    /// Rule set chosen by the kind of the child just before the cursor
    ByChildBefore {
        refinements: &'static [(K, Refined)],
        otherwise: &'static [DispatchRule],
    },
}

impl DispatchEntry {
    /// Rules applying to `node` with the cursor at `pos`, or `None` when suppressed
    pub fn rules_for(&self, node: SyntaxNode<'_>, pos: usize) -> Option<&'static [DispatchRule]> {
        match self {
            DispatchEntry::Rules(rules) => Some(*rules),
            DispatchEntry::ByChildBefore {
                refinements,
                otherwise,
            } => {
                let child = node.child_before(pos).map(|c| c.kind());
                match refinements.iter().find(|(kind, _)| Some(*kind) == child) {
                    Some((_, Refined::Rules(rules))) => Some(*rules),
                    Some((_, Refined::Suppress)) => None,
                    None => Some(*otherwise),
                }
            }
        }
    }
}

/// First rule of `rules` matching `prefix`
pub fn first_match<'r>(rules: &'r [DispatchRule], prefix: &[K]) -> Option<&'r DispatchRule> {
    rules.iter().find(|rule| rule.matches(prefix))
}

const FRESH_VARIABLES: Generator = Generator::Variables { boost: 10 };
const VARIABLES: Generator = Generator::Variables { boost: 0 };
const DEMOTED_VARIABLES: Generator = Generator::Variables { boost: -10 };

static LABEL_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[&[]],
    generators: &[Generator::Labels],
    continue_climbing: false,
}];

static VAR_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[&[]],
    generators: &[FRESH_VARIABLES],
    continue_climbing: false,
}];

static THING_STATEMENT_RULES: [DispatchRule; 3] = [
    DispatchRule {
        suffixes: &[&[K::VAR], &[K::COMMA], &[K::Relation]],
        generators: &[Generator::Keywords(&THING_CONSTRAINTS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::HAS], &[K::ISA]],
        generators: &[Generator::Labels, DEMOTED_VARIABLES],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::HAS, K::TypeRef]],
        generators: &[DEMOTED_VARIABLES],
        continue_climbing: false,
    },
];

static TYPE_STATEMENT_RULES: [DispatchRule; 2] = [
    DispatchRule {
        suffixes: &[&[K::VAR], &[K::COMMA]],
        generators: &[Generator::Keywords(&TYPE_CONSTRAINTS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::SUB], &[K::OWNS], &[K::PLAYS], &[K::RELATES]],
        generators: &[Generator::Labels, DEMOTED_VARIABLES],
        continue_climbing: false,
    },
];

static UNDECIDED_STATEMENT_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[&[K::VAR], &[K::COMMA]],
    generators: &[
        Generator::Keywords(&THING_CONSTRAINTS),
        Generator::Keywords(&TYPE_CONSTRAINTS),
    ],
    continue_climbing: false,
}];

static MATCH_RULES: [DispatchRule; 3] = [
    DispatchRule {
        suffixes: &[&[K::MATCH, K::TypeRef], &[K::SEMICOLON, K::TypeRef]],
        generators: &[Generator::Keywords(&TYPE_CONSTRAINTS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::MATCH]],
        generators: &[FRESH_VARIABLES, Generator::Labels],
        continue_climbing: false,
    },
    // A new pattern may follow, or the pipeline may move on to its next stage
    DispatchRule {
        suffixes: &[&[K::SEMICOLON]],
        generators: &[FRESH_VARIABLES, Generator::Keywords(&NESTED_PATTERNS)],
        continue_climbing: true,
    },
];

static WRITE_CLAUSE_RULES: [DispatchRule; 5] = [
    DispatchRule {
        suffixes: &[&[K::VAR], &[K::COMMA], &[K::Relation]],
        generators: &[Generator::Keywords(&THING_CONSTRAINTS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::HAS], &[K::ISA]],
        generators: &[Generator::Labels, DEMOTED_VARIABLES],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::HAS, K::TypeRef]],
        generators: &[DEMOTED_VARIABLES],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::INSERT], &[K::DELETE], &[K::UPDATE], &[K::PUT]],
        generators: &[FRESH_VARIABLES],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::SEMICOLON]],
        generators: &[FRESH_VARIABLES],
        continue_climbing: true,
    },
];

static NESTED_BLOCK_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[&[K::LBRACE], &[K::SEMICOLON]],
    generators: &[FRESH_VARIABLES, Generator::Keywords(&NESTED_PATTERNS)],
    continue_climbing: false,
}];

static RELATION_RULES: [DispatchRule; 2] = [
    DispatchRule {
        suffixes: &[&[K::COLON]],
        generators: &[FRESH_VARIABLES],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::LPAREN], &[K::COMMA]],
        generators: &[Generator::Labels, VARIABLES],
        continue_climbing: false,
    },
];

static PIPELINE_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[
        &[K::SEMICOLON],
        &[K::ClauseMatch],
        &[K::ClauseInsert],
        &[K::ClauseDelete],
        &[K::ClauseUpdate],
        &[K::ClausePut],
        &[K::StageSelect],
        &[K::StageSort],
        &[K::StageLimit],
        &[K::StageOffset],
        &[K::StageReduce],
    ],
    generators: &[Generator::Keywords(&PIPELINE_STAGES)],
    continue_climbing: false,
}];

static MODIFIER_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[&[K::SELECT], &[K::SORT], &[K::COMMA]],
    generators: &[FRESH_VARIABLES],
    continue_climbing: false,
}];

static QUERY_RULES: [DispatchRule; 2] = [
    DispatchRule {
        suffixes: &[&[K::QuerySchema]],
        generators: &[Generator::Labels, Generator::Keywords(&KINDS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::QueryPipelinePreambled]],
        generators: &[
            Generator::Keywords(&PIPELINE_STAGES),
            Generator::Keywords(&NESTED_PATTERNS),
            FRESH_VARIABLES,
        ],
        continue_climbing: false,
    },
];

static SCHEMA_QUERY_RULES: [DispatchRule; 2] = [
    DispatchRule {
        suffixes: &[&[K::DEFINE], &[K::REDEFINE], &[K::UNDEFINE], &[K::SEMICOLON]],
        generators: &[Generator::Labels, Generator::Keywords(&KINDS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::DEFINE, K::LABEL], &[K::SEMICOLON, K::LABEL]],
        generators: &[Generator::Keywords(&TYPE_CONSTRAINTS)],
        continue_climbing: false,
    },
];

static DEFINABLE_RULES: [DispatchRule; 2] = [
    DispatchRule {
        suffixes: &[&[K::COMMA], &[K::KIND, K::LABEL]],
        generators: &[Generator::Keywords(&TYPE_CONSTRAINTS)],
        continue_climbing: false,
    },
    DispatchRule {
        suffixes: &[&[K::OWNS], &[K::SUB], &[K::PLAYS], &[K::RELATES]],
        generators: &[Generator::Labels],
        continue_climbing: false,
    },
];

static SOURCE_RULES: [DispatchRule; 1] = [DispatchRule {
    suffixes: &[&[K::Query]],
    generators: &[
        Generator::Keywords(&PIPELINE_STAGES),
        Generator::Keywords(&SCHEMA_QUERIES),
    ],
    continue_climbing: false,
}];

static STATEMENT_REFINEMENTS: [(K, Refined); 3] = [
    (K::StatementAssignment, Refined::Suppress),
    (K::StatementThing, Refined::Rules(&THING_STATEMENT_RULES)),
    (K::StatementType, Refined::Rules(&TYPE_STATEMENT_RULES)),
];

/// The process-wide dispatch table
pub static DISPATCH_TABLE: LazyLock<HashMap<K, DispatchEntry>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    table.insert(K::LABEL, DispatchEntry::Rules(&LABEL_RULES));
    table.insert(K::VAR, DispatchEntry::Rules(&VAR_RULES));
    table.insert(
        K::Statement,
        DispatchEntry::ByChildBefore {
            refinements: &STATEMENT_REFINEMENTS,
            otherwise: &UNDECIDED_STATEMENT_RULES,
        },
    );
    table.insert(K::ClauseMatch, DispatchEntry::Rules(&MATCH_RULES));
    for kind in [
        K::ClauseInsert,
        K::ClauseDelete,
        K::ClauseUpdate,
        K::ClausePut,
    ] {
        table.insert(kind, DispatchEntry::Rules(&WRITE_CLAUSE_RULES));
    }
    for kind in [
        K::PatternNegation,
        K::PatternTry,
        K::PatternConjunction,
    ] {
        table.insert(kind, DispatchEntry::Rules(&NESTED_BLOCK_RULES));
    }
    table.insert(K::Relation, DispatchEntry::Rules(&RELATION_RULES));
    table.insert(K::StageSelect, DispatchEntry::Rules(&MODIFIER_RULES));
    table.insert(K::StageSort, DispatchEntry::Rules(&MODIFIER_RULES));
    table.insert(K::QueryPipelinePreambled, DispatchEntry::Rules(&PIPELINE_RULES));
    table.insert(K::Query, DispatchEntry::Rules(&QUERY_RULES));
    table.insert(K::QuerySchema, DispatchEntry::Rules(&SCHEMA_QUERY_RULES));
    table.insert(K::Definable, DispatchEntry::Rules(&DEFINABLE_RULES));
    table.insert(K::Source, DispatchEntry::Rules(&SOURCE_RULES));
    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_matching_is_tail_only() {
        let rule = &THING_STATEMENT_RULES[2];
        assert!(rule.matches(&[K::VAR, K::HAS, K::TypeRef]));
        assert!(rule.matches(&[K::HAS, K::TypeRef]));
        assert!(!rule.matches(&[K::HAS, K::TypeRef, K::VAR]));
        assert!(!rule.matches(&[K::TypeRef]));
        assert!(!rule.matches(&[]));
    }

    #[test]
    fn test_empty_suffix_matches_everything() {
        let rule = &LABEL_RULES[0];
        assert!(rule.matches(&[]));
        assert!(rule.matches(&[K::MATCH, K::VAR]));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        static OVERLAPPING: [DispatchRule; 2] = [
            DispatchRule {
                suffixes: &[&[K::SEMICOLON]],
                generators: &[FRESH_VARIABLES],
                continue_climbing: false,
            },
            DispatchRule {
                suffixes: &[&[]],
                generators: &[Generator::Labels],
                continue_climbing: false,
            },
        ];
        let first = first_match(&OVERLAPPING, &[K::MATCH, K::SEMICOLON]).unwrap();
        assert!(std::ptr::eq(first, &OVERLAPPING[0]));
        let first = first_match(&OVERLAPPING, &[K::MATCH]).unwrap();
        assert!(std::ptr::eq(first, &OVERLAPPING[1]));
        assert!(first_match(&MATCH_RULES, &[K::VAR]).is_none());
    }

    #[test]
    fn test_table_entries() {
        assert!(DISPATCH_TABLE.contains_key(&K::Statement));
        assert!(DISPATCH_TABLE.contains_key(&K::ClauseInsert));
        assert!(!DISPATCH_TABLE.contains_key(&K::TypeRef));
        assert!(!DISPATCH_TABLE.contains_key(&K::Error));
    }

    #[test]
    fn test_statement_refinement_suppresses_assignments() {
        let parsed = typeql_grammar::parse("match let $y = $x + 1;");
        let statement = parsed
            .tree()
            .iter()
            .find(|n| n.kind() == K::Statement)
            .unwrap();
        let entry = &DISPATCH_TABLE[&K::Statement];
        assert!(entry.rules_for(statement, 20).is_none());
    }

    #[test]
    fn test_statement_refinement_selects_rule_set() {
        let parsed = typeql_grammar::parse("match $x isa person; $t sub entity; $y;");
        let entry = &DISPATCH_TABLE[&K::Statement];
        let statements: Vec<_> = parsed
            .tree()
            .iter()
            .filter(|n| n.kind() == K::Statement)
            .collect();

        let thing = entry.rules_for(statements[0], statements[0].to()).unwrap();
        assert!(std::ptr::eq(thing, &THING_STATEMENT_RULES[..]));
        let ty = entry.rules_for(statements[1], statements[1].to()).unwrap();
        assert!(std::ptr::eq(ty, &TYPE_STATEMENT_RULES[..]));
        let bare = entry.rules_for(statements[2], statements[2].to()).unwrap();
        assert!(std::ptr::eq(bare, &UNDECIDED_STATEMENT_RULES[..]));
    }

    #[test]
    fn test_generate_skips_generators_without_opinion() {
        let text = "match ";
        let parsed = typeql_grammar::parse(text);
        // Neither labels nor variables exist yet
        assert!(MATCH_RULES[1].generate(parsed.tree(), text).is_empty());
    }
}
