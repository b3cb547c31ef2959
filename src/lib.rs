//! # corefr
//!
//! Rule-based French coreference analysis over Universal Dependencies
//! parse trees.
//!
//! The crate takes an already-parsed [`Document`] (tokens with POS tags,
//! dependency labels, lemmas, morphology and named-entity types) and
//! answers the questions a coreference resolver needs answered:
//!
//! - which tokens head **independent noun phrases** and which can act as
//!   **anaphors** ([`FrenchRules::is_independent_noun`],
//!   [`FrenchRules::is_potential_anaphor`]);
//! - how coordinated conjuncts group into mentions
//!   ([`FrenchRules::dependent_siblings`], [`Mention`]);
//! - whether a candidate (antecedent, pronoun) pair is linguistically
//!   **compatible** — agreement, reflexive binding, demonstrative deixis,
//!   cataphora licensing ([`FrenchRules::anaphoric_pair`],
//!   [`Compatibility`]);
//! - whether two noun phrases corefer directly
//!   ([`FrenchRules::coreferring_noun_pair`]).
//!
//! On top of the analyzer, [`ChainBuilder`] assembles document-level
//! coreference chains, and [`metrics`] scores chain sets against a gold
//! key (MUC, B³, pairwise, BLANC).
//!
//! ## Quick start
//!
//! ```rust
//! use corefr::{ChainBuilder, Document, Pos};
//!
//! // "Je voyais un homme. Il courait." parsed upstream
//! let doc = Document::builder()
//!     .token("Je", "je", Pos::Pron, "nsubj", Some(1))
//!     .morph("Number=Sing|Person=1")
//!     .token("voyais", "voir", Pos::Verb, "root", None)
//!     .token("un", "un", Pos::Det, "det", Some(3))
//!     .morph("Definite=Ind|Gender=Masc|Number=Sing")
//!     .token("homme", "homme", Pos::Noun, "obj", Some(1))
//!     .morph("Gender=Masc|Number=Sing")
//!     .token(".", ".", Pos::Punct, "punct", Some(1))
//!     .token("Il", "il", Pos::Pron, "nsubj", Some(6))
//!     .morph("Gender=Masc|Number=Sing|Person=3")
//!     .token("courait", "courir", Pos::Verb, "root", None)
//!     .build()?;
//!
//! let chains = ChainBuilder::new().build(&doc);
//! assert_eq!(chains.len(), 1);
//! assert_eq!(chains[0].roots(), vec![3, 5]);
//! # Ok::<(), corefr::Error>(())
//! ```
//!
//! The crate performs no parsing itself: feed it output from any UD
//! French pipeline (serialized documents round-trip through serde JSON
//! via [`Document::from_json`]).

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod analyzer;
pub mod chains;
pub mod document;
pub mod error;
pub mod lexicon;
pub mod mention;
pub mod metrics;

pub use analyzer::{Compatibility, FrenchRules, GenderNumber};
pub use chains::{BuilderConfig, Chain, ChainBuilder};
pub use document::{Document, DocumentBuilder, EntityKind, Morph, Pos, Token};
pub use error::{Error, Result};
pub use mention::Mention;
pub use metrics::{Evaluation, Scores};

/// Convenience re-exports for glob import.
pub mod prelude {
    pub use crate::analyzer::{Compatibility, FrenchRules, GenderNumber};
    pub use crate::chains::{BuilderConfig, Chain, ChainBuilder};
    pub use crate::document::{Document, EntityKind, Pos, Token};
    pub use crate::error::{Error, Result};
    pub use crate::mention::Mention;
    pub use crate::metrics::{Evaluation, Scores};
}
