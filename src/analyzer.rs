//! French coreference rules analyzer.
//!
//! The heart of the crate: given a parsed [`Document`], decides which
//! tokens head mentions, which can act as anaphors, and whether a
//! (referred mention, referring token) pair is linguistically compatible.
//! The pairwise engine is an ordered cascade of guard rules over the
//! dependency tree and morphology — agreement, reflexive binding,
//! cataphora licensing, demonstrative deixis, coordination plurality —
//! where rule order is load-bearing: later checks assume earlier ones
//! passed.
//!
//! [`FrenchRules::new`] runs a single initialization pass computing the
//! per-token coordination side-table; every query afterwards is pure and
//! cache-stable, so calling any predicate twice yields identical results.
//! All structures are per-document and discarded with the analyzer.
//!
//! # Example
//!
//! ```rust
//! use corefr::{Compatibility, Document, FrenchRules, Mention, Pos};
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
//!     .build()
//!     .unwrap();
//!
//! let rules = FrenchRules::new(&doc);
//! assert!(rules.is_independent_noun(3));
//! assert!(rules.is_potential_anaphor(5));
//! let pair = rules.anaphoric_pair(&Mention::single(3), 5, true);
//! assert_eq!(pair, Compatibility::Compatible);
//! ```

use crate::document::{Document, EntityKind, Pos};
use crate::lexicon;
use crate::mention::Mention;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dependency labels marking coordinated conjuncts and appositions.
const DEPENDENT_SIBLING_DEPS: [&str; 2] = ["conj", "appos"];

/// Dependency labels gluing conjuncts together (conjunctions, list commas).
const CONJUNCTION_DEPS: [&str; 2] = ["cc", "punct"];

/// Dependency labels introducing adverbial (subordinate) clauses.
const ADVERBIAL_CLAUSE_DEPS: [&str; 2] = ["advcl", "advmod"];

/// Subject dependency labels.
const SUBJECT_DEPS: [&str; 2] = ["nsubj", "nsubj:pass"];

/// Disjunctive coordinator lemma ("A ou B" denotes one alternative).
const OR_LEMMA: &str = "ou";

// =============================================================================
// Compatibility
// =============================================================================

/// Tri-state confidence signal of the pairwise compatibility engine.
///
/// Ordered: `Incompatible < Uncertain < Compatible`, with the numeric
/// scores 0/1/2 used by the shared-task tooling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Compatibility {
    /// The pair is rejected.
    Incompatible,
    /// Compatible, but only as a weak signal.
    Uncertain,
    /// Compatible with full confidence.
    Compatible,
}

impl Compatibility {
    /// Numeric score (0, 1 or 2).
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            Compatibility::Incompatible => 0,
            Compatibility::Uncertain => 1,
            Compatibility::Compatible => 2,
        }
    }

    /// True unless the pair was rejected outright.
    #[must_use]
    pub fn is_possible(self) -> bool {
        self != Compatibility::Incompatible
    }
}

// =============================================================================
// Gender/number bundle
// =============================================================================

/// Inclusive gender/number possibility flags.
///
/// These are NOT mutually exclusive: a flag set means the token is
/// *compatible* with that value. Absence of evidence on an axis defaults
/// to both flags true ("unconstrained"), never both false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderNumber {
    /// Compatible with masculine agreement.
    pub masc: bool,
    /// Compatible with feminine agreement.
    pub fem: bool,
    /// Compatible with singular agreement.
    pub sing: bool,
    /// Compatible with plural agreement.
    pub plur: bool,
}

impl GenderNumber {
    /// Fully unconstrained bundle.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self {
            masc: true,
            fem: true,
            sing: true,
            plur: true,
        }
    }

    /// True if the two bundles share at least one gender flag.
    #[must_use]
    pub fn gender_compatible(&self, other: &GenderNumber) -> bool {
        (self.masc && other.masc) || (self.fem && other.fem)
    }

    /// True if the two bundles share at least one number flag.
    #[must_use]
    pub fn number_compatible(&self, other: &GenderNumber) -> bool {
        (self.sing && other.sing) || (self.plur && other.plur)
    }
}

// =============================================================================
// Coordination side-table
// =============================================================================

/// Per-token coordination facts, computed once per document pass.
#[derive(Debug, Clone, Default)]
struct Coordination {
    /// Other conjuncts of this token, sorted by position, excluding itself.
    /// Only populated on the leftmost (governing) conjunct.
    siblings: Vec<usize>,
    /// Back-reference to the leftmost conjunct; `None` on the leftmost
    /// conjunct itself and on uncoordinated tokens.
    governing: Option<usize>,
    /// True if the sibling group uses a disjunctive coordinator.
    has_or: bool,
}

// =============================================================================
// Analyzer
// =============================================================================

/// French rules analyzer over one parsed document.
///
/// Borrowed view; build one per document, discard afterwards. All queries
/// are side-effect free once constructed (safe to share immutably).
#[derive(Debug)]
pub struct FrenchRules<'a> {
    doc: &'a Document,
    coordination: Vec<Coordination>,
}

impl<'a> FrenchRules<'a> {
    /// Run the initialization pass (coordination side-table) and return
    /// the analyzer.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        let mut coordination: Vec<Coordination> = vec![Coordination::default(); doc.len()];
        for index in 0..doc.len() {
            let dep = doc[index].dep.as_str();
            if DEPENDENT_SIBLING_DEPS.contains(&dep) || CONJUNCTION_DEPS.contains(&dep) {
                continue;
            }
            let (siblings, has_or) = Self::collect_siblings(doc, index);
            if siblings.is_empty() {
                continue;
            }
            for &sibling in &siblings {
                coordination[sibling].governing = Some(index);
                coordination[sibling].has_or = has_or;
            }
            coordination[index].siblings = siblings;
            coordination[index].has_or = has_or;
        }
        Self { doc, coordination }
    }

    /// The document this analyzer was built over.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Recursive conjunct collection with a visited-set cycle guard.
    ///
    /// Walks children labeled as conjuncts or conjunction glue, collecting
    /// conjuncts and recursing through glue to reach further conjuncts
    /// ("A, B et C"). A disjunctive lemma anywhere in the walk marks the
    /// whole group.
    fn collect_siblings(doc: &Document, start: usize) -> (Vec<usize>, bool) {
        fn recurse(
            doc: &Document,
            current: usize,
            visited: &mut HashSet<usize>,
            siblings: &mut Vec<usize>,
            has_or: &mut bool,
        ) {
            visited.insert(current);
            if doc[current].lemma == OR_LEMMA {
                *has_or = true;
            }
            if DEPENDENT_SIBLING_DEPS.contains(&doc[current].dep.as_str()) {
                siblings.push(current);
            }
            for &child in doc.children(current) {
                let dep = doc[child].dep.as_str();
                if visited.contains(&child) {
                    continue;
                }
                if DEPENDENT_SIBLING_DEPS.contains(&dep) || CONJUNCTION_DEPS.contains(&dep) {
                    recurse(doc, child, visited, siblings, has_or);
                }
            }
        }

        let mut visited = HashSet::new();
        let mut siblings = Vec::new();
        let mut has_or = false;
        recurse(doc, start, &mut visited, &mut siblings, &mut has_or);
        siblings.sort_unstable();
        (siblings, has_or)
    }

    // =========================================================================
    // Coordination accessors
    // =========================================================================

    /// Coordinated siblings of a token, sorted by position.
    ///
    /// Empty unless the token is the leftmost conjunct of a group; other
    /// members are reached through [`governing_sibling`](Self::governing_sibling).
    #[must_use]
    pub fn dependent_siblings(&self, index: usize) -> &[usize] {
        self.coordination
            .get(index)
            .map_or(&[], |c| c.siblings.as_slice())
    }

    /// Leftmost conjunct of the token's group; `None` if the token is the
    /// leftmost itself or is not coordinated.
    #[must_use]
    pub fn governing_sibling(&self, index: usize) -> Option<usize> {
        self.coordination.get(index).and_then(|c| c.governing)
    }

    /// True if the token's sibling group uses a disjunctive coordinator.
    #[must_use]
    pub fn has_or_coordination(&self, index: usize) -> bool {
        self.coordination.get(index).is_some_and(|c| c.has_or)
    }

    /// True if the token belongs to a collective ("and") coordination.
    #[must_use]
    pub fn is_involved_in_non_or_conjunction(&self, index: usize) -> bool {
        let group = self.governing_sibling(index).unwrap_or(index);
        !self.dependent_siblings(group).is_empty() && !self.has_or_coordination(group)
    }

    /// Build a mention rooted at `root`, optionally extended with its
    /// coordinated siblings.
    #[must_use]
    pub fn mention(&self, root: usize, include_siblings: bool) -> Mention {
        if include_siblings {
            Mention::with_siblings(root, self.dependent_siblings(root))
        } else {
            Mention::single(root)
        }
    }

    // =========================================================================
    // Mention classifier
    // =========================================================================

    /// True if the token heads an independent noun phrase.
    #[must_use]
    pub fn is_independent_noun(&self, index: usize) -> bool {
        let Some(token) = self.doc.get(index) else {
            return false;
        };
        // "Un des garçons", "certains des élèves", "deux des trois personnes"
        let partitive = (matches!(
            token.lemma.as_str(),
            "un" | "une" | "certain" | "certains" | "certaine" | "certaines"
        ) || token.has_morph("NumType", "Card"))
            && self
                .doc
                .children(index)
                .iter()
                .any(|&c| self.doc[c].pos == Pos::Noun);
        if !partitive && !self.is_quelqu_un(index) {
            if !matches!(token.pos, Pos::Noun | Pos::Propn | Pos::Adj | Pos::Pron) {
                return false;
            }
            // Only the first token of a multiword name or fixed expression counts.
            if token.dep == "fixed" || token.dep.starts_with("flat") {
                return false;
            }
            // Substantive adjectives and pronouns need a determiner
            // ("le troisième", "le tien").
            if matches!(token.pos, Pos::Adj | Pos::Pron)
                && !self
                    .doc
                    .children(index)
                    .iter()
                    .any(|&c| self.doc[c].pos == Pos::Det)
            {
                return false;
            }
        }
        !self.is_in_blacklisted_phrase(index)
    }

    /// "quelqu'un" comes out of the parser as two tokens; the head is the
    /// "un" fragment preceded by "quelqu'".
    fn is_quelqu_un(&self, index: usize) -> bool {
        self.doc.get(index).is_some_and(|t| t.lemma == "un")
            && self
                .doc
                .nbor(index, -1)
                .is_some_and(|p| matches!(p.lower().as_str(), "quelqu'" | "quelqu"))
    }

    /// Frozen-phrase denylist check over the linear neighborhood.
    fn is_in_blacklisted_phrase(&self, index: usize) -> bool {
        let token_lower = self.doc[index].lower();
        for phrase in lexicon::BLACKLISTED_PHRASES.iter() {
            let words = phrase_words(phrase);
            for (offset, word) in words.iter().enumerate() {
                if *word != token_lower {
                    continue;
                }
                let matched = words.iter().enumerate().all(|(k, w)| {
                    self.doc
                        .nbor(index, k as isize - offset as isize)
                        .is_some_and(|t| t.lower() == *w)
                });
                if matched {
                    return true;
                }
            }
        }
        false
    }

    /// True if the token can act as an anaphor (pronoun, possessive
    /// determiner, locative proadverb, "ce dernier", emphatic reflexive).
    #[must_use]
    pub fn is_potential_anaphor(&self, index: usize) -> bool {
        let Some(token) = self.doc.get(index) else {
            return false;
        };
        // "Ce dernier", "cette dernière"
        if token.lemma == "dernier"
            && self
                .doc
                .children(index)
                .iter()
                .any(|&c| self.doc[c].has_morph("PronType", "Dem"))
            && token
                .head
                .map_or(true, |h| !self.doc[h].pos.is_noun())
        {
            return true;
        }
        if self.is_emphatic_reflexive(index) {
            return true;
        }
        let base = (token.pos == Pos::Pron
            && (token.has_morph("Person", "3") || token.has_morph("PronType", "Dem")))
            || (token.pos == Pos::Adv && matches!(token.lemma.as_str(), "ici" | "là"))
            || (token.pos == Pos::Det && token.has_morph("Poss", "Yes"));
        if !base {
            return false;
        }
        // First/second person possessives can never be anaphoric.
        if token.pos == Pos::Det
            && matches!(token.lemma.as_str(), "mon" | "ton" | "notre" | "votre")
        {
            return false;
        }
        // Neuter demonstratives refer to whole propositions, not entities.
        if matches!(token.lemma.as_str(), "ce" | "ça" | "cela") {
            return false;
        }
        // Relative/interrogative pronouns never start a chain here.
        if token.has_morph("PronType", "Rel") || token.has_morph("PronType", "Int") {
            return false;
        }
        if token.lemma == "on" {
            return false;
        }
        // Frozen "il y a"
        if token.lower() == "y" && token.dep == "fixed" {
            return false;
        }
        // Deictic "là-bas"
        if token.pos == Pos::Adv
            && self
                .doc
                .nbor(index, 1)
                .is_some_and(|n| matches!(n.lower().as_str(), "-bas" | "bas"))
        {
            return false;
        }
        // Avalent verbs: "il pleut", "il faut", even when the parser missed
        // the expletive mark.
        if let Some(head) = token.head {
            if self.doc[head].pos.is_verbal()
                && self
                    .doc
                    .subtree(head)
                    .iter()
                    .any(|&s| lexicon::AVALENT_VERBS.contains(self.doc[s].lemma.as_str()))
            {
                return false;
            }
        }
        // Impersonal constructions (expletive subjects).
        if matches!(
            token.dep.as_str(),
            "expl:comp" | "expl:pass" | "expl:subj"
        ) && token.lemma != "en"
            && !token.has_morph("Reflex", "Yes")
        {
            return false;
        }
        // "Il fait beau/froid/chaud ..."
        if let Some(head) = token.head {
            if self.doc[head].lemma == "faire"
                && self.doc.children(head).iter().any(|&c| {
                    matches!(self.doc[c].dep.as_str(), "amod" | "obj" | "xcomp")
                        && lexicon::WEATHER_WORDS.contains(self.doc[c].lemma.as_str())
                })
            {
                return false;
            }
        }
        if token.has_morph("NumType", "Card") {
            return false;
        }
        true
    }

    /// True for emphatic reflexives ("lui-même", "elles-mêmes"), whether
    /// tokenized as one token or as three.
    #[must_use]
    pub fn is_emphatic_reflexive(&self, index: usize) -> bool {
        let Some(token) = self.doc.get(index) else {
            return false;
        };
        if matches!(
            token.lemma.as_str(),
            "lui-même" | "elle-même" | "eux-mêmes" | "elles-mêmes" | "soi-même"
        ) {
            return true;
        }
        if token.pos != Pos::Pron {
            return false;
        }
        // "lui - même" split across tokens; lookahead guarded at the edge.
        if let (Some(n1), Some(n2)) = (self.doc.nbor(index, 1), self.doc.nbor(index, 2)) {
            if n1.lemma == "-" && matches!(n2.lemma.as_str(), "même" | "mêmes") {
                return true;
            }
        }
        self.doc
            .nbor(index, 1)
            .is_some_and(|n| matches!(n.lemma.as_str(), "-même" | "-mêmes"))
    }

    /// Gender/number possibility bundle for a token (direct-reference view).
    ///
    /// At least one gender flag and one number flag is always true.
    #[must_use]
    pub fn gender_number_info(&self, index: usize) -> GenderNumber {
        self.gender_number(index, true)
    }

    fn gender_number(&self, index: usize, directly: bool) -> GenderNumber {
        let Some(token) = self.doc.get(index) else {
            return GenderNumber::unconstrained();
        };
        let mut masc = token.has_morph("Gender", "Masc");
        let mut fem = token.has_morph("Gender", "Fem");
        let mut sing = token.has_morph("Number", "Sing");
        let mut plur = token.has_morph("Number", "Plur");
        if token.pos == Pos::Propn {
            let lower = token.lemma.to_lowercase();
            if lexicon::MALE_NAMES.contains(lower.as_str()) {
                masc = true;
            } else if lexicon::FEMALE_NAMES.contains(lower.as_str()) {
                fem = true;
            } else {
                masc = true;
                fem = true;
            }
            // Proper nouns are singular unless explicitly plural-marked.
            if !plur {
                sing = true;
            }
            // A proper noun and a common noun in the same chain may differ
            // in gender/number when the reference is mediated.
            if !directly {
                return GenderNumber::unconstrained();
            }
        }
        if matches!(token.lemma.as_str(), "ici" | "là" | "y" | "en") {
            return GenderNumber::unconstrained();
        }
        if token.has_morph("Reflex", "Yes") && self.is_potential_anaphor(index) {
            return GenderNumber::unconstrained();
        }
        if self.is_emphatic_reflexive(index) {
            // Smaller models misparse these; the surface prefix is reliable.
            let no_info = !(masc || fem || sing || plur);
            let lower = token.lower();
            if lower.starts_with("lui") {
                masc = true;
                sing = true;
            } else if lower.starts_with("eux") {
                masc = true;
                plur = true;
            } else if lower.starts_with("elles") {
                fem = true;
                plur = true;
            } else if lower.starts_with("elle") {
                fem = true;
                sing = true;
            } else if no_info {
                return GenderNumber::unconstrained();
            }
        }
        // Possessive determiners agree with the possessed noun; the owner
        // number they refer back to lives in the lemma.
        if token.pos == Pos::Det && token.has_morph("Poss", "Yes") {
            masc = true;
            fem = true;
            match token.lemma.as_str() {
                "leur" | "leurs" => {
                    plur = true;
                    sing = false;
                }
                "son" | "sa" | "ses" => {
                    sing = true;
                    plur = false;
                }
                _ => {}
            }
        }
        if self.is_quelqu_un(index) {
            return GenderNumber {
                masc: true,
                fem: true,
                sing: true,
                plur: false,
            };
        }
        // "les", "leur" as clitic objects carry number but no gender.
        if plur && !masc && !fem && token.pos == Pos::Pron && self.is_potential_anaphor(index)
        {
            masc = true;
            fem = true;
        }
        if !masc && !fem {
            masc = true;
            fem = true;
        }
        if !sing && !plur {
            sing = true;
            plur = true;
        }
        GenderNumber {
            masc,
            fem,
            sing,
            plur,
        }
    }

    /// True if the token's noun phrase carries a definite or demonstrative
    /// operator ("le", "cet").
    #[must_use]
    pub fn is_potentially_definite(&self, index: usize) -> bool {
        self.has_operator_child(index, &[("Definite", "Def"), ("PronType", "Dem")])
    }

    /// True if the token's noun phrase carries an indefinite operator
    /// ("un", "quelque").
    #[must_use]
    pub fn is_potentially_indefinite(&self, index: usize) -> bool {
        self.has_operator_child(index, &[("Definite", "Ind")])
    }

    fn has_operator_child(&self, index: usize, features: &[(&str, &str)]) -> bool {
        self.doc.children(index).iter().any(|&c| {
            matches!(self.doc[c].pos, Pos::Det | Pos::Adj)
                && features.iter().any(|(f, v)| self.doc[c].has_morph(f, v))
        })
    }

    // =========================================================================
    // Pairwise compatibility engine
    // =========================================================================

    /// Decide whether `referring` can refer to the `referred` mention.
    ///
    /// `directly` distinguishes syntactically local binding from mediated,
    /// long-distance reference (which relaxes proper-noun agreement and
    /// skips the locality rules).
    ///
    /// The decision sequence is order-sensitive; every failing step
    /// short-circuits to [`Compatibility::Incompatible`].
    #[must_use]
    pub fn anaphoric_pair(
        &self,
        referred: &Mention,
        referring: usize,
        directly: bool,
    ) -> Compatibility {
        let doc = self.doc;
        let referred_root = referred.root_index;
        let referring_token = &doc[referring];
        let referring_gn = self.gender_number(referring, directly);

        // "quelqu'un" can never be referred to cataphorically.
        if self.is_quelqu_un(referred_root) && referred_root > referring {
            return Compatibility::Incompatible;
        }

        // "son X" where X is the antecedent itself ("sa personne" excepted).
        if referring_token.pos == Pos::Det && referring_token.has_morph("Poss", "Yes") {
            if let Some(head) = referring_token.head {
                if referred.contains(head) && doc[head].lemma != "personne" {
                    return Compatibility::Incompatible;
                }
            }
        }

        // "les hommes et les femmes ... ils": a plural pronoun cannot pick
        // out a single conjunct of an "and" group, unless it sits inside
        // the coordination span itself.
        if referred.len() == 1
            && referring_gn.plur
            && !referring_gn.sing
            && self.is_involved_in_non_or_conjunction(referred_root)
        {
            let siblings = self.dependent_siblings(referred_root);
            let within_span = siblings.last().is_some_and(|&last| {
                referring > referred_root && referring < last
            });
            if !within_span {
                return Compatibility::Incompatible;
            }
        }

        let mut aggregate = GenderNumber {
            masc: false,
            fem: false,
            sing: false,
            plur: false,
        };

        // "l'homme et la femme ... il": the full "and" group is plural-only.
        if referred.len() > 1 && self.is_involved_in_non_or_conjunction(referred_root) {
            aggregate.plur = true;
            if !referring_gn.plur {
                return Compatibility::Incompatible;
            }
        }

        for &index in &referred.token_indexes {
            let working = self.gender_number(index, directly);
            aggregate.masc |= working.masc;
            aggregate.fem |= working.fem;
            // "Le masculin l'emporte": a mixed coordination containing a
            // masculine-only conjunct rejects feminine-only agreement.
            if aggregate.masc && !aggregate.fem && !referring_gn.masc && referring_gn.fem {
                return Compatibility::Incompatible;
            }
            aggregate.sing |= working.sing;
            aggregate.plur |= working.plur;
        }

        if !aggregate.gender_compatible(&referring_gn) {
            return Compatibility::Incompatible;
        }
        if !aggregate.number_compatible(&referring_gn) {
            return Compatibility::Incompatible;
        }

        // "ici", "là", "y" cannot point at persons; organizations only
        // weakly (and only for "ici"/"là").
        if self.is_potential_anaphor(referring)
            && matches!(referring_token.lemma.as_str(), "ici" | "là" | "y")
        {
            for &index in &referred.token_indexes {
                let working = &doc[index];
                let lemma_lower = working.lemma.to_lowercase();
                if lexicon::is_given_name(&working.lemma)
                    || working.entity == EntityKind::Person
                    || lexicon::PERSON_WORDS.contains(lemma_lower.as_str())
                    || lexicon::ANIMAL_WORDS.contains(lemma_lower.as_str())
                {
                    return Compatibility::Incompatible;
                }
                if working.entity == EntityKind::Organization && referring_token.lemma != "y" {
                    return Compatibility::Uncertain;
                }
            }
        }

        if directly {
            if self.is_potential_anaphor(referring) {
                if let Some(result) = self.check_demonstrative_locality(referred, referring) {
                    return result;
                }
                // Partitive "en" wants a mass or plural antecedent. Without
                // a mass-noun lexicon, only singular persons are downgraded.
                if referring_token.lemma == "en"
                    && !aggregate.plur
                    && doc[referred.token_indexes[0]].pos != Pos::Adp
                    && referred
                        .token_indexes
                        .iter()
                        .any(|&i| self.denotes_person(i))
                {
                    return Compatibility::Uncertain;
                }
            }

            let reflexive_pair = self.reflexive_pair(referred, referring);
            let reflexive_anaphor = self.is_reflexive_anaphor(referring);
            // "Les hommes le voyaient": a bound position demands reflexive
            // morphology.
            if reflexive_pair && reflexive_anaphor == Compatibility::Incompatible {
                return Compatibility::Incompatible;
            }
            // "Les hommes étaient sûrs qu'ils se trompaient": "se" cannot
            // reach outside its binding domain, except within one noun phrase.
            if !reflexive_pair && reflexive_anaphor == Compatibility::Compatible {
                match self.closest_common_ancestor(referred_root, referring) {
                    Some(ancestor) if doc[ancestor].pos == Pos::Noun => {}
                    _ => return Compatibility::Incompatible,
                }
            }
        }

        // Subjects of verbs demanding a personal subject are only a strong
        // match against person-denoting referents.
        let governing = self.governing_sibling(referring).unwrap_or(referring);
        let governing_token = &doc[governing];
        if SUBJECT_DEPS.contains(&governing_token.dep.as_str()) {
            if let Some(head) = governing_token.head {
                if lexicon::VERBS_WITH_PERSONAL_SUBJECT.contains(doc[head].lemma.as_str()) {
                    if referred
                        .token_indexes
                        .iter()
                        .any(|&i| doc[i].pos == Pos::Propn || self.denotes_person(i))
                    {
                        return Compatibility::Compatible;
                    }
                    return Compatibility::Uncertain;
                }
            }
        }

        Compatibility::Compatible
    }

    /// Deixis rules for "celui-ci"/"ce dernier" (nearest noun phrase only)
    /// and "celui-là" (second-nearest within a bounded lookback).
    ///
    /// Returns `Some(Incompatible)` on violation, `None` when the rules do
    /// not apply or pass.
    fn check_demonstrative_locality(
        &self,
        referred: &Mention,
        referring: usize,
    ) -> Option<Compatibility> {
        let doc = self.doc;
        let lemma_lower = doc[referring].lemma.to_lowercase();
        let next1 = doc.nbor(referring, 1);
        let next2 = doc.nbor(referring, 2);

        let proximal = lemma_lower == "celui-ci"
            || lemma_lower == "dernier"
            || (lemma_lower == "celui"
                && next1.is_some_and(|n| matches!(n.lemma.to_lowercase().as_str(), "-ci" | "ci")))
            || (next1.is_some_and(|n| n.text == "-")
                && next2.is_some_and(|n| n.lemma.to_lowercase() == "ci"));
        if proximal {
            for previous in (0..referring).rev() {
                if self.is_independent_noun(previous) {
                    if !referred.contains(previous) {
                        return Some(Compatibility::Incompatible);
                    }
                    break;
                }
            }
            return None;
        }

        let distal = lemma_lower == "celui-là"
            || (lemma_lower == "celui"
                && next1.is_some_and(|n| matches!(n.lemma.to_lowercase().as_str(), "-là" | "là")));
        if distal {
            let mut skipped_nouns = 0;
            for previous in (0..referring).rev() {
                if self.is_independent_noun(previous) && referred.contains(previous) {
                    if skipped_nouns < 1 {
                        return Some(Compatibility::Incompatible);
                    }
                    break;
                } else if self.is_independent_noun(previous) {
                    skipped_nouns += 1;
                }
                if skipped_nouns > 2 {
                    return Some(Compatibility::Incompatible);
                }
            }
        }
        None
    }

    fn denotes_person(&self, index: usize) -> bool {
        let token = &self.doc[index];
        token.entity == EntityKind::Person
            || lexicon::is_given_name(&token.lemma)
            || lexicon::PERSON_WORDS.contains(token.lemma.to_lowercase().as_str())
    }

    // =========================================================================
    // Reflexives
    // =========================================================================

    /// True if `referring` sits in a position where a syntactic reflexive
    /// of `referred` is licensed.
    #[must_use]
    pub fn reflexive_pair(&self, referred: &Mention, referring: usize) -> bool {
        let doc = self.doc;
        let referring_token = &doc[referring];
        if referring_token.pos != Pos::Pron
            && !self.is_emphatic_reflexive(referring)
            && referring_token.lemma != "personne"
        {
            return false;
        }

        let referred_root = self
            .governing_sibling(referred.root_index)
            .unwrap_or(referred.root_index);
        let referring_index = self.governing_sibling(referring).unwrap_or(referring);

        if SUBJECT_DEPS.contains(&doc[referred_root].dep.as_str()) {
            // Walk the verb ancestors of the pronoun looking for the clause
            // whose subject is the referent.
            for ancestor in doc.ancestors(referring_index) {
                if doc.children(ancestor).contains(&referred_root) {
                    return true;
                }
                // Relative clauses attach back to the referent.
                if doc[ancestor].pos.is_verbal()
                    && matches!(doc[ancestor].dep.as_str(), "acl:relcl" | "acl")
                    && doc[ancestor]
                        .head
                        .is_some_and(|h| h == referred_root || referred.contains(h))
                {
                    return true;
                }
                // The ancestor has its own distinct subject: binding domain
                // boundary, stop here.
                if doc.children(ancestor).iter().any(|&c| {
                    SUBJECT_DEPS.contains(&doc[c].dep.as_str()) && c != referred_root
                }) {
                    return false;
                }
            }
            return false;
        }

        // Non-subject referents only bind forwards within the same
        // prepositional/verbal domain.
        if referring_index < referred_root {
            return false;
        }
        let referring_ancestor = doc[referring_index].head;
        let referred_ancestor = doc[referred_root].head;
        match referring_ancestor {
            None => false,
            Some(ancestor) => {
                Some(ancestor) == referred_ancestor || referred.contains(ancestor)
            }
        }
    }

    /// 2 if the token is reflexive-marked third person, an emphatic
    /// reflexive, or the idiomatic "sa personne"; else 0.
    #[must_use]
    pub fn is_reflexive_anaphor(&self, index: usize) -> Compatibility {
        let Some(token) = self.doc.get(index) else {
            return Compatibility::Incompatible;
        };
        // "sa personne" / "leur personne"
        if token.lemma == "personne"
            && self.doc.children(index).iter().any(|&c| {
                self.doc[c].pos == Pos::Det
                    && self.doc[c].has_morph("Poss", "Yes")
                    && matches!(
                        self.doc[c].lemma.as_str(),
                        "son" | "sa" | "ses" | "leur" | "leurs"
                    )
            })
        {
            return Compatibility::Compatible;
        }
        if self.is_emphatic_reflexive(index) {
            return Compatibility::Compatible;
        }
        if token.has_morph("Reflex", "Yes") && token.has_morph("Person", "3") {
            return Compatibility::Compatible;
        }
        Compatibility::Incompatible
    }

    // =========================================================================
    // Cataphora licensor
    // =========================================================================

    /// True if `referring` (which precedes `referred` in the text) can
    /// cataphorically point at it: the pronoun must sit inside an
    /// adverbial clause subordinate to the clause containing the referent,
    /// within the same sentence, and the referent must be a full noun
    /// phrase.
    #[must_use]
    pub fn cataphoric_pair(&self, referred: &Mention, referring: usize) -> bool {
        let doc = self.doc;
        let referred_root = referred.root_index;
        if referring >= referred_root {
            return false;
        }
        if !doc.same_sentence(referred_root, referring) {
            return false;
        }
        if self.is_potential_anaphor(referred_root) {
            return false;
        }

        // Verb ancestors of the referent, stopping at any coordination
        // boundary between clauses.
        let mut referred_verb_ancestors = Vec::new();
        for ancestor in doc.ancestors(referred_root) {
            if DEPENDENT_SIBLING_DEPS.contains(&doc[ancestor].dep.as_str()) {
                break;
            }
            if doc[ancestor].pos.is_verbal() {
                referred_verb_ancestors.push(ancestor);
            }
        }
        if referred_verb_ancestors.is_empty() {
            return false;
        }

        // The pronoun must live under an adverbial-clause attachment.
        let in_adverbial_clause = ADVERBIAL_CLAUSE_DEPS
            .contains(&doc[referring].dep.as_str())
            || doc
                .ancestors(referring)
                .any(|a| ADVERBIAL_CLAUSE_DEPS.contains(&doc[a].dep.as_str()));
        if !in_adverbial_clause {
            return false;
        }

        // ... and that clause must itself hang off the referent's clause.
        for ancestor in doc.ancestors(referring) {
            if referred_verb_ancestors.contains(&ancestor) {
                continue;
            }
            if !matches!(
                doc[ancestor].pos,
                Pos::Verb | Pos::Aux | Pos::Noun | Pos::Adj
            ) {
                continue;
            }
            if doc
                .ancestors(ancestor)
                .any(|a| referred_verb_ancestors.contains(&a))
            {
                return true;
            }
        }
        false
    }

    // =========================================================================
    // Noun-noun coreference
    // =========================================================================

    /// True if two non-pronominal noun phrases may corefer: proper-noun
    /// trailing-substring match, entity-type back-reference, apposition
    /// partnership, or a bare definite noun phrase repeating the lemma.
    #[must_use]
    pub fn coreferring_noun_pair(&self, referred: usize, referring: usize) -> bool {
        let doc = self.doc;
        if referred >= referring {
            return false;
        }
        let referred_token = &doc[referred];
        let referring_token = &doc[referring];
        // Symbol pairs (copyright signs and the like).
        if referred_token.text.chars().count() == 1
            && referring_token.text.chars().count() == 1
        {
            return false;
        }
        if !referred_token.pos.is_noun() || !referring_token.pos.is_noun() {
            return false;
        }
        // Conjuncts of one coordination never corefer with each other;
        // appositions, by contrast, are coreferent by construction.
        let referring_is_appos = referring_token.dep == "appos";
        if self.dependent_siblings(referred).contains(&referring) && !referring_is_appos {
            return false;
        }
        if let (Some(a), Some(b)) = (
            self.governing_sibling(referred),
            self.governing_sibling(referring),
        ) {
            if a == b && !referring_is_appos {
                return false;
            }
        }

        // "Richard Paul Hudson" ... "Hudson"
        if referred_token.pos == Pos::Propn && referring_token.pos == Pos::Propn {
            let referred_phrase = self.propn_phrase(referred);
            let referring_phrase = self.propn_phrase(referring);
            return phrase_ends_with(&referred_phrase, &referring_phrase);
        }

        // "Peugeot" ... "l'entreprise"
        if referred_token.pos == Pos::Propn
            && lexicon::entity_nouns(referred_token.entity)
                .contains(referring_token.lemma.to_lowercase().as_str())
            && self.is_potentially_definite(referring)
        {
            return true;
        }

        // "Alexandre, le roi de Macédoine" ... "Le roi": lemma match may go
        // through an apposition partner of the referred token.
        if self.is_potentially_definite(referring) {
            for &sibling in self.dependent_siblings(referred) {
                if doc[sibling].dep != "appos" {
                    continue;
                }
                if sibling == referring {
                    return true;
                }
                if doc[sibling].lemma.to_lowercase() == referring_token.lemma.to_lowercase()
                    && doc[sibling].morph.get("Number") == referring_token.morph.get("Number")
                {
                    return true;
                }
            }
        }

        if referred_token.pos == Pos::Propn || referring_token.pos == Pos::Propn {
            return false;
        }

        // Definite back-reference: "un roi ..." / "le roi ...".
        if !self.is_potentially_definite(referring) {
            return false;
        }
        // The referring phrase must be bare: determiner, coordination glue
        // and case-marked complements only.
        if self.doc.children(referring).iter().any(|&c| {
            !matches!(
                doc[c].dep.as_str(),
                "det" | "conj" | "cc" | "punct" | "case" | "nmod"
            )
        }) {
            return false;
        }
        if !self.is_potentially_definite(referred) && !self.is_potentially_indefinite(referred)
        {
            return false;
        }
        referred_token.lemma.to_lowercase() == referring_token.lemma.to_lowercase()
            && referred_token.morph.get("Number") == referring_token.morph.get("Number")
    }

    /// Lower-cased (text, lemma) sequence of a proper-noun phrase: the head
    /// plus its flat name continuations, in document order.
    fn propn_phrase(&self, index: usize) -> Vec<(String, String)> {
        let mut members: Vec<usize> = vec![index];
        members.extend(
            self.doc
                .children(index)
                .iter()
                .copied()
                .filter(|&c| self.doc[c].dep.starts_with("flat")),
        );
        members.sort_unstable();
        members
            .into_iter()
            .map(|i| (self.doc[i].lower(), self.doc[i].lemma.to_lowercase()))
            .collect()
    }

    // =========================================================================
    // Tree helpers
    // =========================================================================

    fn closest_common_ancestor(&self, a: usize, b: usize) -> Option<usize> {
        let ancestors_of_b: HashSet<usize> = self.doc.ancestors(b).collect();
        self.doc.ancestors(a).find(|x| ancestors_of_b.contains(x))
    }
}

/// Split a frozen phrase into the word sequence a parser would produce
/// ("d'ailleurs" comes out as "d'" + "ailleurs").
fn phrase_words(phrase: &str) -> Vec<String> {
    let mut words = Vec::new();
    for word in phrase.split_whitespace() {
        if let Some(pos) = word.find('\'') {
            if pos + 1 < word.len() {
                words.push(word[..=pos].to_string());
                words.push(word[pos + 1..].to_string());
                continue;
            }
        }
        words.push(word.to_string());
    }
    words
}

/// Suffix match over proper-noun phrases on either surface or lemma.
fn phrase_ends_with(longer: &[(String, String)], suffix: &[(String, String)]) -> bool {
    if suffix.is_empty() || suffix.len() > longer.len() {
        return false;
    }
    let offset = longer.len() - suffix.len();
    suffix.iter().enumerate().all(|(k, (text, lemma))| {
        let (long_text, long_lemma) = &longer[offset + k];
        text == long_text || lemma == long_lemma
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    /// "Richard et Christine rentrent à la maison"
    fn coordination_doc() -> Document {
        Document::builder()
            .token("Richard", "Richard", Pos::Propn, "nsubj", Some(3))
            .token("et", "et", Pos::Cconj, "cc", Some(2))
            .token("Christine", "Christine", Pos::Propn, "conj", Some(0))
            .token("rentrent", "rentrer", Pos::Verb, "root", None)
            .morph("Number=Plur|Person=3")
            .token("à", "à", Pos::Adp, "case", Some(6))
            .token("la", "le", Pos::Det, "det", Some(6))
            .morph("Definite=Def|Gender=Fem|Number=Sing")
            .token("maison", "maison", Pos::Noun, "obl:mod", Some(3))
            .morph("Gender=Fem|Number=Sing")
            .build()
            .unwrap()
    }

    #[test]
    fn test_sibling_collection() {
        let doc = coordination_doc();
        let rules = FrenchRules::new(&doc);
        assert_eq!(rules.dependent_siblings(0), &[2]);
        assert!(rules.dependent_siblings(2).is_empty());
        assert_eq!(rules.governing_sibling(2), Some(0));
        assert_eq!(rules.governing_sibling(0), None);
        assert!(!rules.has_or_coordination(0));
        assert!(rules.is_involved_in_non_or_conjunction(0));
        assert!(rules.is_involved_in_non_or_conjunction(2));
    }

    #[test]
    fn test_or_coordination_flag() {
        // "Richard ou Christine rentre"
        let doc = Document::builder()
            .token("Richard", "Richard", Pos::Propn, "nsubj", Some(3))
            .token("ou", "ou", Pos::Cconj, "cc", Some(2))
            .token("Christine", "Christine", Pos::Propn, "conj", Some(0))
            .token("rentre", "rentrer", Pos::Verb, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert_eq!(rules.dependent_siblings(0), &[2]);
        assert!(rules.has_or_coordination(0));
        assert!(rules.has_or_coordination(2));
        assert!(!rules.is_involved_in_non_or_conjunction(0));
    }

    #[test]
    fn test_three_member_list_through_glue() {
        // "Carol, Richard et Ralf avaient une réunion"
        let doc = Document::builder()
            .token("Carol", "Carol", Pos::Propn, "nsubj", Some(6))
            .token(",", ",", Pos::Punct, "punct", Some(2))
            .token("Richard", "Richard", Pos::Propn, "conj", Some(0))
            .token("et", "et", Pos::Cconj, "cc", Some(4))
            .token("Ralf", "Ralf", Pos::Propn, "conj", Some(0))
            .token("une", "un", Pos::Det, "det", Some(7))
            .morph("Definite=Ind")
            .token("avaient", "avoir", Pos::Verb, "root", None)
            .token("réunion", "réunion", Pos::Noun, "obj", Some(6))
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert_eq!(rules.dependent_siblings(0), &[2, 4]);
        assert_eq!(rules.governing_sibling(4), Some(0));
        assert!(rules.dependent_siblings(4).is_empty());
    }

    #[test]
    fn test_mention_construction() {
        let doc = coordination_doc();
        let rules = FrenchRules::new(&doc);
        let plain = rules.mention(0, false);
        assert_eq!(plain.token_indexes, vec![0]);
        let extended = rules.mention(0, true);
        assert_eq!(extended.token_indexes, vec![0, 2]);
    }

    #[test]
    fn test_independent_noun_excludes_flat_names() {
        // "J'admire Jacques Chirac."
        let doc = Document::builder()
            .token("J'", "je", Pos::Pron, "nsubj", Some(1))
            .token("admire", "admirer", Pos::Verb, "root", None)
            .token("Jacques", "Jacques", Pos::Propn, "obj", Some(1))
            .token("Chirac", "Chirac", Pos::Propn, "flat:name", Some(2))
            .token(".", ".", Pos::Punct, "punct", Some(1))
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(rules.is_independent_noun(2));
        assert!(!rules.is_independent_noun(3));
    }

    #[test]
    fn test_blacklisted_phrase() {
        // "Un chien par exemple"
        let doc = Document::builder()
            .token("Un", "un", Pos::Det, "det", Some(1))
            .morph("Definite=Ind")
            .token("chien", "chien", Pos::Noun, "root", None)
            .token("par", "par", Pos::Adp, "case", Some(3))
            .token("exemple", "exemple", Pos::Noun, "nmod", Some(1))
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(rules.is_independent_noun(1));
        assert!(!rules.is_independent_noun(3));
    }

    #[test]
    fn test_quelqu_un_detection() {
        // "Quelqu'un est arrivé"
        let doc = Document::builder()
            .token("Quelqu'", "quelqu'", Pos::Adj, "dep", Some(1))
            .token("un", "un", Pos::Pron, "nsubj", Some(3))
            .token("est", "être", Pos::Aux, "aux:tense", Some(3))
            .token("arrivé", "arriver", Pos::Verb, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(rules.is_independent_noun(1));
        let gn = rules.gender_number_info(1);
        assert!(gn.masc && gn.fem && gn.sing && !gn.plur);
    }

    #[test]
    fn test_potential_anaphor_basics() {
        // "Elle est sortie pour voir sa voiture"
        let doc = Document::builder()
            .token("Elle", "elle", Pos::Pron, "nsubj", Some(2))
            .morph("Gender=Fem|Number=Sing|Person=3")
            .token("est", "être", Pos::Aux, "aux:tense", Some(2))
            .token("sortie", "sortir", Pos::Verb, "root", None)
            .token("pour", "pour", Pos::Adp, "mark", Some(4))
            .token("voir", "voir", Pos::Verb, "advcl", Some(2))
            .token("sa", "son", Pos::Det, "det", Some(6))
            .morph("Number=Sing|Poss=Yes")
            .token("voiture", "voiture", Pos::Noun, "obj", Some(4))
            .morph("Gender=Fem|Number=Sing")
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        let anaphors: Vec<usize> = (0..doc.len())
            .filter(|&i| rules.is_potential_anaphor(i))
            .collect();
        assert_eq!(anaphors, vec![0, 5]);
    }

    #[test]
    fn test_first_second_person_possessives_rejected() {
        // "Ma maison, leur maison"
        let doc = Document::builder()
            .token("Ma", "mon", Pos::Det, "det", Some(1))
            .morph("Number=Sing|Poss=Yes")
            .token("maison", "maison", Pos::Noun, "root", None)
            .token(",", ",", Pos::Punct, "punct", Some(4))
            .token("leur", "leur", Pos::Det, "det", Some(4))
            .morph("Number=Sing|Poss=Yes")
            .token("maison", "maison", Pos::Noun, "appos", Some(1))
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(!rules.is_potential_anaphor(0));
        assert!(rules.is_potential_anaphor(3));
    }

    #[test]
    fn test_neuter_demonstratives_rejected() {
        // "Cela dépend"
        let doc = Document::builder()
            .token("Cela", "cela", Pos::Pron, "nsubj", Some(1))
            .morph("Person=3|PronType=Dem")
            .token("dépend", "dépendre", Pos::Verb, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(!rules.is_potential_anaphor(0));
    }

    #[test]
    fn test_weather_il_rejected() {
        // "Il pleuvait"
        let doc = Document::builder()
            .token("Il", "il", Pos::Pron, "expl:subj", Some(1))
            .morph("Gender=Masc|Number=Sing|Person=3")
            .token("pleuvait", "pleuvoir", Pos::Verb, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(!rules.is_potential_anaphor(0));
    }

    #[test]
    fn test_il_fait_beau_rejected() {
        // "Il fait très beau"
        let doc = Document::builder()
            .token("Il", "il", Pos::Pron, "nsubj", Some(1))
            .morph("Gender=Masc|Number=Sing|Person=3")
            .token("fait", "faire", Pos::Verb, "root", None)
            .token("très", "très", Pos::Adv, "advmod", Some(3))
            .token("beau", "beau", Pos::Adj, "obj", Some(1))
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(!rules.is_potential_anaphor(0));
    }

    #[test]
    fn test_il_y_a_fixed_rejected() {
        // "Il y a deux fleurs"
        let doc = Document::builder()
            .token("Il", "il", Pos::Pron, "expl:subj", Some(2))
            .morph("Gender=Masc|Number=Sing|Person=3")
            .token("y", "y", Pos::Pron, "fixed", Some(2))
            .morph("Person=3")
            .token("a", "avoir", Pos::Verb, "root", None)
            .token("deux", "deux", Pos::Num, "nummod", Some(4))
            .morph("NumType=Card")
            .token("fleurs", "fleur", Pos::Noun, "obj", Some(2))
            .morph("Gender=Fem|Number=Plur")
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(!rules.is_potential_anaphor(0));
        assert!(!rules.is_potential_anaphor(1));
    }

    #[test]
    fn test_possessive_owner_number() {
        let doc = Document::builder()
            .token("leur", "leur", Pos::Det, "det", Some(1))
            .morph("Number=Sing|Poss=Yes")
            .token("chien", "chien", Pos::Noun, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        let gn = rules.gender_number_info(0);
        assert!(gn.plur && !gn.sing);
        assert!(gn.masc && gn.fem);
    }

    #[test]
    fn test_gender_number_never_empty_axis() {
        let doc = Document::builder()
            .token("xyz", "xyz", Pos::X, "dep", Some(1))
            .token("stop", "stop", Pos::Intj, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        for i in 0..doc.len() {
            let gn = rules.gender_number_info(i);
            assert!(gn.masc || gn.fem);
            assert!(gn.sing || gn.plur);
        }
    }

    #[test]
    fn test_emphatic_reflexive_split_tokens() {
        // "elle - même" split by the tokenizer
        let doc = Document::builder()
            .token("elle", "elle", Pos::Pron, "obl:mod", Some(3))
            .token("-", "-", Pos::Punct, "punct", Some(0))
            .token("même", "même", Pos::Adj, "amod", Some(0))
            .token("tournait", "tourner", Pos::Verb, "root", None)
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(rules.is_emphatic_reflexive(0));
        let gn = rules.gender_number_info(0);
        assert!(gn.fem && gn.sing);
    }

    #[test]
    fn test_emphatic_reflexive_eof_guard() {
        let doc = Document::builder()
            .token("vu", "voir", Pos::Verb, "root", None)
            .token("lui", "lui", Pos::Pron, "obj", Some(0))
            .morph("Person=3")
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        // Lookahead runs off the end of the document: pattern absent.
        assert!(!rules.is_emphatic_reflexive(1));
    }

    #[test]
    fn test_definiteness_helpers() {
        // "l'homme" / "quelque femme"
        let doc = Document::builder()
            .token("l'", "le", Pos::Det, "det", Some(1))
            .morph("Definite=Def|Number=Sing")
            .token("homme", "homme", Pos::Noun, "root", None)
            .morph("Gender=Masc|Number=Sing")
            .token("quelque", "quelque", Pos::Det, "det", Some(3))
            .morph("Definite=Ind|Number=Sing")
            .token("femme", "femme", Pos::Noun, "appos", Some(1))
            .morph("Gender=Fem|Number=Sing")
            .build()
            .unwrap();
        let rules = FrenchRules::new(&doc);
        assert!(rules.is_potentially_definite(1));
        assert!(!rules.is_potentially_indefinite(1));
        assert!(rules.is_potentially_indefinite(3));
        assert!(!rules.is_potentially_definite(3));
    }

    #[test]
    fn test_classifier_idempotent() {
        let doc = coordination_doc();
        let rules = FrenchRules::new(&doc);
        for i in 0..doc.len() {
            assert_eq!(rules.is_independent_noun(i), rules.is_independent_noun(i));
            assert_eq!(rules.is_potential_anaphor(i), rules.is_potential_anaphor(i));
            assert_eq!(rules.gender_number_info(i), rules.gender_number_info(i));
            assert_eq!(
                rules.dependent_siblings(i).to_vec(),
                rules.dependent_siblings(i).to_vec()
            );
        }
    }

    #[test]
    fn test_phrase_words() {
        assert_eq!(phrase_words("par exemple"), vec!["par", "exemple"]);
        assert_eq!(phrase_words("d'ailleurs"), vec!["d'", "ailleurs"]);
    }

    #[test]
    fn test_phrase_ends_with() {
        let longer = vec![
            ("richard".to_string(), "richard".to_string()),
            ("paul".to_string(), "paul".to_string()),
            ("hudson".to_string(), "hudson".to_string()),
        ];
        let suffix = vec![("hudson".to_string(), "hudson".to_string())];
        assert!(phrase_ends_with(&longer, &suffix));
        assert!(!phrase_ends_with(&suffix, &longer));
        let other = vec![("paul".to_string(), "paul".to_string())];
        assert!(!phrase_ends_with(&longer, &other));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::document::{Document, Morph, Token};
    use proptest::prelude::*;

    fn arbitrary_pos() -> impl Strategy<Value = Pos> {
        prop_oneof![
            Just(Pos::Noun),
            Just(Pos::Propn),
            Just(Pos::Adj),
            Just(Pos::Pron),
            Just(Pos::Det),
            Just(Pos::Adv),
            Just(Pos::Verb),
            Just(Pos::Num),
        ]
    }

    fn arbitrary_morph() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("Gender=Masc".to_string()),
            Just("Gender=Fem|Number=Sing".to_string()),
            Just("Number=Plur".to_string()),
            Just("Gender=Masc|Number=Plur|Person=3".to_string()),
            Just("Poss=Yes|Number=Sing".to_string()),
            Just("Reflex=Yes|Person=3".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn gender_number_axes_never_empty(
            pos in arbitrary_pos(),
            morph in arbitrary_morph(),
            lemma in "[a-zéèê]{1,8}",
        ) {
            let token = Token {
                index: 0,
                text: lemma.clone(),
                lemma,
                pos,
                dep: "nsubj".to_string(),
                head: Some(1),
                morph: Morph::parse(&morph),
                entity: Default::default(),
            };
            let root = Token {
                index: 1,
                text: "dort".to_string(),
                lemma: "dormir".to_string(),
                pos: Pos::Verb,
                dep: "root".to_string(),
                head: None,
                morph: Morph::new(),
                entity: Default::default(),
            };
            let doc = Document::new(vec![token, root]).unwrap();
            let rules = FrenchRules::new(&doc);
            let gn = rules.gender_number_info(0);
            prop_assert!(gn.masc || gn.fem);
            prop_assert!(gn.sing || gn.plur);
        }

        #[test]
        fn sibling_backreference_symmetric(seed in 0u8..4) {
            // A coordination of 2..=5 proper nouns glued with "et".
            let count = 2 + seed as usize;
            let mut tokens = Vec::new();
            let verb_index = count * 2 - 1;
            for k in 0..count {
                let index = k * 2;
                tokens.push(Token {
                    index,
                    text: format!("Nom{k}"),
                    lemma: format!("Nom{k}"),
                    pos: Pos::Propn,
                    dep: if k == 0 { "nsubj".to_string() } else { "conj".to_string() },
                    head: if k == 0 { Some(verb_index) } else { Some(0) },
                    morph: Morph::new(),
                    entity: Default::default(),
                });
                if k + 1 < count {
                    tokens.push(Token {
                        index: index + 1,
                        text: "et".to_string(),
                        lemma: "et".to_string(),
                        pos: Pos::Cconj,
                        dep: "cc".to_string(),
                        head: Some(index + 2),
                        morph: Morph::new(),
                        entity: Default::default(),
                    });
                }
            }
            tokens.push(Token {
                index: verb_index,
                text: "partent".to_string(),
                lemma: "partir".to_string(),
                pos: Pos::Verb,
                dep: "root".to_string(),
                head: None,
                morph: Morph::new(),
                entity: Default::default(),
            });
            let doc = Document::new(tokens).unwrap();
            let rules = FrenchRules::new(&doc);
            for &sibling in rules.dependent_siblings(0) {
                prop_assert_eq!(rules.governing_sibling(sibling), Some(0));
                prop_assert!(rules.dependent_siblings(sibling).is_empty());
            }
            prop_assert_eq!(rules.dependent_siblings(0).len(), count - 1);
        }
    }
}
