//! End-to-end chain construction and evaluation over a small story.

use corefr::{
    BuilderConfig, Chain, ChainBuilder, Document, EntityKind, Evaluation, Mention, Pos,
};

/// "Gérard a un chien. Il promène le chien. Le chien aboie."
fn story() -> Document {
    Document::builder()
        .token("Gérard", "Gérard", Pos::Propn, "nsubj", Some(1))
        .entity(EntityKind::Person)
        .token("a", "avoir", Pos::Verb, "root", None)
        .token("un", "un", Pos::Det, "det", Some(3))
        .morph("Definite=Ind|Gender=Masc|Number=Sing")
        .token("chien", "chien", Pos::Noun, "obj", Some(1))
        .morph("Gender=Masc|Number=Sing")
        .token(".", ".", Pos::Punct, "punct", Some(1))
        .token("Il", "il", Pos::Pron, "nsubj", Some(6))
        .morph("Gender=Masc|Number=Sing|Person=3")
        .token("promène", "promener", Pos::Verb, "root", None)
        .token("le", "le", Pos::Det, "det", Some(8))
        .morph("Definite=Def|Gender=Masc|Number=Sing")
        .token("chien", "chien", Pos::Noun, "obj", Some(6))
        .morph("Gender=Masc|Number=Sing")
        .token(".", ".", Pos::Punct, "punct", Some(6))
        .token("Le", "le", Pos::Det, "det", Some(11))
        .morph("Definite=Def|Gender=Masc|Number=Sing")
        .token("chien", "chien", Pos::Noun, "nsubj", Some(12))
        .morph("Gender=Masc|Number=Sing")
        .token("aboie", "aboyer", Pos::Verb, "root", None)
        .token(".", ".", Pos::Punct, "punct", Some(12))
        .build()
        .unwrap()
}

#[test]
fn story_chains_cover_all_referring_expressions() {
    let chains = ChainBuilder::new().build(&story());
    // Gérard stays a singleton (the pronoun prefers the nearer dog) and
    // is dropped; everything else lands in the dog chain.
    let mut roots: Vec<usize> = chains
        .iter()
        .flat_map(|c| c.roots())
        .collect();
    roots.sort_unstable();
    assert_eq!(roots, vec![3, 5, 8, 11]);

    let config = BuilderConfig {
        include_singletons: true,
        ..BuilderConfig::default()
    };
    let with_singletons = ChainBuilder::with_config(config).build(&story());
    let mut roots: Vec<usize> = with_singletons
        .iter()
        .flat_map(|c| c.roots())
        .collect();
    roots.sort_unstable();
    assert_eq!(roots, vec![0, 3, 5, 8, 11]);
}

#[test]
fn pronoun_takes_nearest_compatible_antecedent() {
    let chains = ChainBuilder::new().build(&story());
    // "Il" is masculine singular; both Gérard and the dog agree, the
    // nearer mention wins.
    let pronoun_chain = chains
        .iter()
        .find(|c| c.roots().contains(&5))
        .expect("pronoun resolved");
    assert!(pronoun_chain.roots().contains(&3));
}

#[test]
fn evaluation_against_gold() {
    let chains = ChainBuilder::new().build(&story());
    let gold = vec![
        Chain {
            mentions: vec![Mention::single(0), Mention::single(5)],
        },
        Chain {
            mentions: vec![
                Mention::single(3),
                Mention::single(8),
                Mention::single(11),
            ],
        },
    ];
    let eval = Evaluation::compute(&gold, &chains).unwrap();
    // The resolver links "Il" to the dog where gold says Gérard, so the
    // scores sit strictly between zero and one.
    assert!(eval.muc.f1 > 0.0 && eval.muc.f1 < 1.0);
    assert!(eval.b_cubed.f1 > 0.0 && eval.b_cubed.f1 < 1.0);
    assert!(eval.conll_f1() > 0.0);
    let perfect = Evaluation::compute(&gold, &gold).unwrap();
    assert_eq!(perfect.conll_f1(), 1.0);
}

#[test]
fn cataphora_resolved_when_no_backward_antecedent() {
    // "Même s'il était disponible, Gérard rentra."
    let doc = Document::builder()
        .token("Même", "même", Pos::Adv, "advmod", Some(1))
        .token("si", "si", Pos::Sconj, "mark", Some(3))
        .token("il", "il", Pos::Pron, "nsubj", Some(3))
        .morph("Gender=Masc|Number=Sing|Person=3")
        .token("était", "être", Pos::Verb, "advcl", Some(7))
        .token("disponible", "disponible", Pos::Adj, "xcomp", Some(3))
        .token(",", ",", Pos::Punct, "punct", Some(7))
        .token("Gérard", "Gérard", Pos::Propn, "nsubj", Some(7))
        .entity(EntityKind::Person)
        .token("rentra", "rentrer", Pos::Verb, "root", None)
        .build()
        .unwrap();
    let chains = ChainBuilder::new().build(&doc);
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].roots(), vec![2, 6]);
}

#[test]
fn chains_serialize_round_trip() {
    let chains = ChainBuilder::new().build(&story());
    let json = serde_json::to_string(&chains).unwrap();
    let back: Vec<Chain> = serde_json::from_str(&json).unwrap();
    assert_eq!(chains, back);
}

#[test]
fn config_is_honored() {
    let config = BuilderConfig {
        max_sentence_distance: 0,
        include_singletons: true,
    };
    let chains = ChainBuilder::with_config(config).build(&story());
    // Distance zero still allows same-sentence links ("le chien" in
    // sentence two cannot reach sentence one, so it pairs with nothing
    // but its own pronoun).
    for chain in &chains {
        let doc = story();
        for window in chain.roots().windows(2) {
            assert_eq!(doc.sentence_id(window[0]), doc.sentence_id(window[1]));
        }
    }
}
