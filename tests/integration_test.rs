//! End-to-end tests: document JSON plus grammar notation through the whole
//! pipeline to a selected parse tree.

use rstest::rstest;
use strata::grammar::{compile_rule, ConfigurationError, Grammar, GrammarError};
use strata::pipeline::{ExecutionError, Processor, RunConfig};
use strata::resolver::ResolveError;
use strata::Document;

fn sentence() -> Document {
    Document::from_json(r#"{"NOUN": [[0, 5], [9, 14]], "VERB": [[5, 9]]}"#).unwrap()
}

fn processor_for(rules: &[&str]) -> Processor {
    let config = RunConfig {
        start_symbol: "S".to_string(),
        rules: rules.iter().map(|r| r.to_string()).collect(),
        repetition_cap: 10,
    };
    Processor::from_config(&config).unwrap()
}

#[test]
fn touching_spans_parse_into_the_expected_tree() {
    let processor = processor_for(&["S -> NOUN VERB NOUN : 5"]);
    let tree = processor.parse(&sentence()).unwrap();

    let root = tree.root();
    assert_eq!(root.label, "S");
    assert_eq!((root.start, root.end), (0, 14));

    let children: Vec<(usize, usize, String)> = tree
        .children_of(0)
        .map(|child| (child.start, child.end, child.label.clone()))
        .collect();
    assert_eq!(
        children,
        vec![
            (0, 5, "NOUN".to_string()),
            (5, 9, "VERB".to_string()),
            (9, 14, "NOUN".to_string()),
        ]
    );
    assert!(tree.children_of(0).all(|child| child.children.is_empty()));
}

#[test]
fn non_adjacent_label_sequence_fails_to_parse() {
    let processor = processor_for(&["S -> NOUN NOUN"]);
    let err = processor.parse(&sentence()).unwrap_err();
    assert!(matches!(
        err,
        ExecutionError::Resolve(ResolveError::ParseFailed { .. })
    ));
}

#[test]
fn uncovered_text_is_bridged_by_an_explicit_blank() {
    // "NOUN .... VERB": four uncovered offsets between the spans
    let document = Document::from_json(r#"{"NOUN": [[0, 4]], "VERB": [[8, 12]]}"#).unwrap();
    let processor = processor_for(&["S -> NOUN _ VERB : 3"]);
    let tree = processor.parse(&document).unwrap();

    let labels: Vec<String> = tree
        .children_of(0)
        .map(|child| child.label.clone())
        .collect();
    assert_eq!(labels, vec!["NOUN", "_", "VERB"]);

    let blank = tree.children_of(0).nth(1).unwrap();
    assert_eq!((blank.start, blank.end), (4, 8));
}

#[test]
fn grammar_without_blank_terminal_cannot_cross_the_gap() {
    let document = Document::from_json(r#"{"NOUN": [[0, 4]], "VERB": [[8, 12]]}"#).unwrap();
    let processor = processor_for(&["S -> NOUN VERB"]);
    assert!(processor.parse(&document).is_err());
}

#[test]
fn nested_nonterminals_build_a_deep_tree() {
    let processor = processor_for(&["NP -> NOUN", "VP -> VERB NP : 3", "S -> NP VP : 4"]);
    let tree = processor.parse(&sentence()).unwrap();

    assert_eq!(tree.root().label, "S");
    let top: Vec<String> = tree
        .children_of(0)
        .map(|child| child.label.clone())
        .collect();
    assert_eq!(top, vec!["NP", "VP"]);

    // every leaf is an elementary span, in document order
    let leaves: Vec<(usize, usize, String)> = tree
        .leaves()
        .iter()
        .map(|leaf| (leaf.start, leaf.end, leaf.label.clone()))
        .collect();
    assert_eq!(
        leaves,
        vec![
            (0, 5, "NOUN".to_string()),
            (5, 9, "VERB".to_string()),
            (9, 14, "NOUN".to_string()),
        ]
    );
}

#[test]
fn quantified_rule_covers_variable_noun_runs() {
    let document =
        Document::from_json(r#"{"NOUN": [[0, 3], [3, 6], [6, 9]], "VERB": [[9, 12]]}"#).unwrap();
    let processor = processor_for(&["S -> NOUN+ VERB"]);
    let tree = processor.parse(&document).unwrap();
    // the greedy root covers all three nouns: default weights grow with
    // sequence length
    assert_eq!((tree.root().start, tree.root().end), (0, 12));
    assert_eq!(tree.root().children.len(), 4);
}

#[test]
fn cyclic_grammar_is_rejected_before_any_graph_work() {
    let config = RunConfig {
        start_symbol: "A".to_string(),
        rules: vec!["A -> B x".to_string(), "B -> A y".to_string()],
        repetition_cap: 10,
    };
    let err = Processor::from_config(&config).unwrap_err();
    match err {
        ExecutionError::Grammar(GrammarError::Configuration(
            ConfigurationError::CyclicDependency { symbols },
        )) => {
            assert_eq!(symbols, vec!["A".to_string(), "B".to_string()]);
        }
        other => panic!("expected cyclic dependency error, got {}", other),
    }
}

#[test]
fn empty_layer_is_reported_with_its_name() {
    let document = Document::from_json(r#"{"NOUN": [[0, 5]], "GHOST": []}"#).unwrap();
    let processor = processor_for(&["S -> NOUN"]);
    let err = processor.parse(&document).unwrap_err();
    assert_eq!(
        err.to_string(),
        "graph build error: layer 'GHOST' has no spans"
    );
}

#[test]
fn treeviz_and_json_render_the_same_tree() {
    let processor = processor_for(&["S -> NOUN VERB NOUN : 5"]);
    let document = sentence();

    let treeviz = processor.parse_and_serialize(&document, "treeviz").unwrap();
    assert!(treeviz.starts_with("S [0,14)\n"));
    assert_eq!(treeviz.lines().count(), 4);

    let json = processor.parse_and_serialize(&document, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["nodes"][0]["label"], "S");
}

#[rstest]
#[case("S -> a", vec![vec!["a"]])]
#[case("S -> a b c", vec![vec!["a", "b", "c"]])]
#[case("S -> a?", vec![vec![], vec!["a"]])]
#[case("S -> a | b", vec![vec!["a"], vec!["b"]])]
#[case("S -> a | b c", vec![vec!["a", "c"], vec!["b", "c"]])]
#[case("S -> (a b)?", vec![vec![], vec!["a", "b"]])]
#[case("S -> a{2,3}", vec![vec!["a", "a"], vec!["a", "a", "a"]])]
fn notation_compiles_to_the_expected_sequences(
    #[case] line: &str,
    #[case] expected: Vec<Vec<&str>>,
) {
    let rules = compile_rule(line).unwrap();
    let compiled: Vec<Vec<String>> = rules.into_iter().map(|rule| rule.rhs).collect();
    let expected: Vec<Vec<String>> = expected
        .into_iter()
        .map(|rhs| rhs.into_iter().map(str::to_string).collect())
        .collect();
    assert_eq!(compiled, expected);
}

#[test]
fn one_notation_line_can_feed_a_whole_parse() {
    // the optional second noun is exercised by the document
    let grammar = Grammar::from_notation("S", "S -> NOUN VERB NOUN?").unwrap();
    let processor = Processor::new(grammar);

    let with_object = sentence();
    let without_object = Document::from_json(r#"{"NOUN": [[0, 5]], "VERB": [[5, 9]]}"#).unwrap();

    let full = processor.parse(&with_object).unwrap();
    assert_eq!(full.root().children.len(), 3);

    let short = processor.parse(&without_object).unwrap();
    assert_eq!(short.root().children.len(), 2);
    assert_eq!((short.root().start, short.root().end), (0, 9));
}
