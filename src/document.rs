//! Parsed-document data model.
//!
//! The analyzer does not parse text itself: it consumes the output of an
//! external dependency parser as an ordered, immutable token sequence.
//! [`Token`] mirrors the parser contract (POS tag, lemma, dependency label,
//! morphological features, head link, named-entity kind) and [`Document`]
//! adds the navigation the rules need: children, ancestors, subtrees,
//! linear neighbors and sentence membership.
//!
//! Documents are validated on construction (heads in bounds, no head
//! cycles). After that every accessor is infallible or returns `Option`
//! at document edges.
//!
//! # Example
//!
//! ```rust
//! use corefr::{Document, Pos};
//!
//! // "Il dort." parsed upstream
//! let doc = Document::builder()
//!     .token("Il", "il", Pos::Pron, "nsubj", Some(1))
//!     .morph("Gender=Masc|Number=Sing|Person=3")
//!     .token("dort", "dormir", Pos::Verb, "root", None)
//!     .token(".", ".", Pos::Punct, "punct", Some(1))
//!     .build()
//!     .unwrap();
//! assert_eq!(doc.len(), 3);
//! assert_eq!(doc.children(1), &[0, 2]);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Coarse POS tags
// =============================================================================

/// Universal Dependencies coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pos {
    /// Common noun (NOUN)
    Noun,
    /// Proper noun (PROPN)
    Propn,
    /// Adjective (ADJ)
    Adj,
    /// Pronoun (PRON)
    Pron,
    /// Determiner (DET)
    Det,
    /// Adverb (ADV)
    Adv,
    /// Lexical verb (VERB)
    Verb,
    /// Auxiliary or copula (AUX)
    Aux,
    /// Adposition (ADP)
    Adp,
    /// Coordinating conjunction (CCONJ)
    Cconj,
    /// Subordinating conjunction (SCONJ)
    Sconj,
    /// Numeral (NUM)
    Num,
    /// Particle (PART)
    Part,
    /// Interjection (INTJ)
    Intj,
    /// Punctuation (PUNCT)
    Punct,
    /// Symbol (SYM)
    Sym,
    /// Other/unknown (X)
    X,
}

impl Pos {
    /// Convert to the standard UD label string.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Pos::Noun => "NOUN",
            Pos::Propn => "PROPN",
            Pos::Adj => "ADJ",
            Pos::Pron => "PRON",
            Pos::Det => "DET",
            Pos::Adv => "ADV",
            Pos::Verb => "VERB",
            Pos::Aux => "AUX",
            Pos::Adp => "ADP",
            Pos::Cconj => "CCONJ",
            Pos::Sconj => "SCONJ",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Intj => "INTJ",
            Pos::Punct => "PUNCT",
            Pos::Sym => "SYM",
            Pos::X => "X",
        }
    }

    /// Parse from a UD label string. Unknown labels map to [`Pos::X`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "NOUN" => Pos::Noun,
            "PROPN" => Pos::Propn,
            "ADJ" => Pos::Adj,
            "PRON" => Pos::Pron,
            "DET" => Pos::Det,
            "ADV" => Pos::Adv,
            "VERB" => Pos::Verb,
            "AUX" => Pos::Aux,
            "ADP" => Pos::Adp,
            "CCONJ" => Pos::Cconj,
            "SCONJ" => Pos::Sconj,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "INTJ" => Pos::Intj,
            "PUNCT" => Pos::Punct,
            "SYM" => Pos::Sym,
            _ => Pos::X,
        }
    }

    /// True for the nominal tags (NOUN, PROPN).
    #[must_use]
    pub fn is_noun(&self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn)
    }

    /// True for clause-rooting tags (VERB, AUX).
    #[must_use]
    pub fn is_verbal(&self) -> bool {
        matches!(self, Pos::Verb | Pos::Aux)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

// =============================================================================
// Named-entity kind
// =============================================================================

/// Named-entity kind carried over from the upstream pipeline.
///
/// Standard CoNLL types; anything else collapses to [`EntityKind::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    /// Person name (PER)
    Person,
    /// Location/place (LOC)
    Location,
    /// Organization (ORG)
    Organization,
    /// No entity annotation
    #[default]
    None,
}

impl EntityKind {
    /// Convert to standard label string (CoNLL format).
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            EntityKind::Person => "PER",
            EntityKind::Location => "LOC",
            EntityKind::Organization => "ORG",
            EntityKind::None => "",
        }
    }

    /// Parse from a standard label string.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "PER" | "PERSON" => EntityKind::Person,
            "LOC" | "LOCATION" | "GPE" => EntityKind::Location,
            "ORG" | "ORGANIZATION" => EntityKind::Organization,
            _ => EntityKind::None,
        }
    }
}

// =============================================================================
// Morphology
// =============================================================================

/// Morphological feature set of one token.
///
/// A multimap from feature name to values, e.g. `Number=Plur`. Parsed from
/// the UD pipe notation (`Gender=Masc|Number=Sing`). Absent features mean
/// "unconstrained", never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Morph {
    features: Vec<(String, String)>,
}

impl Morph {
    /// Empty feature set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from UD pipe notation, e.g. `"Gender=Fem|Number=Plur"`.
    ///
    /// Malformed fragments (no `=`) are skipped.
    #[must_use]
    pub fn parse(notation: &str) -> Self {
        let features = notation
            .split('|')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let (name, value) = (name.trim(), value.trim());
                if name.is_empty() || value.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        Self { features }
    }

    /// Check whether the feature carries the given value.
    #[must_use]
    pub fn has(&self, feature: &str, value: &str) -> bool {
        self.features
            .iter()
            .any(|(n, v)| n == feature && v == value)
    }

    /// First value of a feature, if present.
    #[must_use]
    pub fn get(&self, feature: &str) -> Option<&str> {
        self.features
            .iter()
            .find(|(n, _)| n == feature)
            .map(|(_, v)| v.as_str())
    }

    /// True if no features are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// =============================================================================
// Token
// =============================================================================

/// A single parsed token.
///
/// Immutable once the document is built. `head` is `None` for sentence
/// roots; the fine-grained dependency label is kept as the raw UD string
/// (`"nsubj"`, `"conj"`, `"expl:subj"`, ...) since the label set is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the document (0-based).
    pub index: usize,
    /// Surface form.
    pub text: String,
    /// Lemma.
    pub lemma: String,
    /// Coarse POS tag.
    pub pos: Pos,
    /// Dependency label relative to `head`.
    pub dep: String,
    /// Head token position; `None` for sentence roots.
    pub head: Option<usize>,
    /// Morphological features.
    #[serde(default)]
    pub morph: Morph,
    /// Named-entity kind.
    #[serde(default)]
    pub entity: EntityKind,
}

impl Token {
    /// Lower-cased surface form.
    #[must_use]
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Check a morphological feature value.
    #[must_use]
    pub fn has_morph(&self, feature: &str, value: &str) -> bool {
        self.morph.has(feature, value)
    }
}

// =============================================================================
// Document
// =============================================================================

/// An ordered, immutable sequence of parsed tokens partitioned into
/// sentences.
///
/// Construction validates the dependency structure: every head index must
/// be in bounds and head links must be acyclic. Sentence membership is
/// derived from the tree roots (one sentence per root).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Token>", into = "Vec<Token>")]
pub struct Document {
    tokens: Vec<Token>,
    children: Vec<Vec<usize>>,
    sentence_ids: Vec<usize>,
}

impl TryFrom<Vec<Token>> for Document {
    type Error = Error;

    fn try_from(tokens: Vec<Token>) -> Result<Self> {
        Document::new(tokens)
    }
}

impl From<Document> for Vec<Token> {
    fn from(doc: Document) -> Vec<Token> {
        doc.tokens
    }
}

impl Document {
    /// Build a document from parser output, validating tree structure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Document`] if the token list is empty, a token's
    /// `index` disagrees with its position, a head is out of bounds or
    /// self-referential, or the head links contain a cycle.
    pub fn new(mut tokens: Vec<Token>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(Error::document("empty token sequence"));
        }
        for (i, token) in tokens.iter_mut().enumerate() {
            token.index = i;
        }
        let n = tokens.len();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, token) in tokens.iter().enumerate() {
            if let Some(head) = token.head {
                if head >= n {
                    return Err(Error::document(format!(
                        "token {i} has out-of-bounds head {head}"
                    )));
                }
                if head == i {
                    return Err(Error::document(format!("token {i} is its own head")));
                }
                children[head].push(i);
            }
        }
        // Cycle check and sentence assignment in one walk to the root.
        let mut root_of = vec![0usize; n];
        for i in 0..n {
            let mut current = i;
            let mut steps = 0;
            while let Some(head) = tokens[current].head {
                current = head;
                steps += 1;
                if steps > n {
                    return Err(Error::document(format!(
                        "head cycle involving token {i}"
                    )));
                }
            }
            root_of[i] = current;
        }
        let mut roots: Vec<usize> = (0..n).filter(|&i| tokens[i].head.is_none()).collect();
        roots.sort_unstable();
        let sentence_ids = root_of
            .iter()
            .map(|r| roots.binary_search(r).unwrap_or(0))
            .collect();
        Ok(Self {
            tokens,
            children,
            sentence_ids,
        })
    }

    /// Start a fluent builder (mainly for tests and examples).
    #[must_use]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Deserialize a document from a JSON token array.
    ///
    /// # Errors
    ///
    /// Propagates JSON and document-validation errors.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document as a JSON token array.
    ///
    /// # Errors
    ///
    /// Propagates JSON errors.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.tokens)?)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the document has no tokens (cannot occur after `new`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at a position, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Direct children of a token, sorted by position.
    #[must_use]
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map_or(&[], Vec::as_slice)
    }

    /// Ancestors of a token, nearest first, up to the sentence root.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let mut current = self.tokens.get(index).and_then(|t| t.head);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.tokens[next].head;
            Some(next)
        })
    }

    /// All token positions in the subtree rooted at `index` (inclusive),
    /// sorted by position.
    #[must_use]
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        let mut collected = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            collected.push(current);
            stack.extend_from_slice(self.children(current));
        }
        collected.sort_unstable();
        collected
    }

    /// Linear neighbor at a signed offset; `None` past either edge.
    #[must_use]
    pub fn nbor(&self, index: usize, offset: isize) -> Option<&Token> {
        let target = index as isize + offset;
        if target < 0 {
            return None;
        }
        self.tokens.get(target as usize)
    }

    /// Sentence ordinal of a token (0-based).
    #[must_use]
    pub fn sentence_id(&self, index: usize) -> usize {
        self.sentence_ids.get(index).copied().unwrap_or(0)
    }

    /// True if two positions belong to the same sentence.
    #[must_use]
    pub fn same_sentence(&self, a: usize, b: usize) -> bool {
        self.sentence_id(a) == self.sentence_id(b)
    }

    /// Number of sentences.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentence_ids.iter().max().map_or(0, |m| m + 1)
    }
}

impl std::ops::Index<usize> for Document {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Fluent constructor for [`Document`].
///
/// Each [`token`](DocumentBuilder::token) call appends one token;
/// [`morph`](DocumentBuilder::morph) and [`entity`](DocumentBuilder::entity)
/// annotate the most recently added one.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    tokens: Vec<Token>,
}

impl DocumentBuilder {
    /// Append a token. `head` is `None` for the sentence root.
    #[must_use]
    pub fn token(
        mut self,
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: Pos,
        dep: impl Into<String>,
        head: Option<usize>,
    ) -> Self {
        let index = self.tokens.len();
        self.tokens.push(Token {
            index,
            text: text.into(),
            lemma: lemma.into(),
            pos,
            dep: dep.into(),
            head,
            morph: Morph::new(),
            entity: EntityKind::None,
        });
        self
    }

    /// Set the morphology of the last added token (UD pipe notation).
    #[must_use]
    pub fn morph(mut self, notation: &str) -> Self {
        if let Some(last) = self.tokens.last_mut() {
            last.morph = Morph::parse(notation);
        }
        self
    }

    /// Set the entity kind of the last added token.
    #[must_use]
    pub fn entity(mut self, kind: EntityKind) -> Self {
        if let Some(last) = self.tokens.last_mut() {
            last.entity = kind;
        }
        self
    }

    /// Finalize and validate.
    ///
    /// # Errors
    ///
    /// See [`Document::new`].
    pub fn build(self) -> Result<Document> {
        Document::new(self.tokens)
    }
}

// =============================================================================
// Tests
// =============================================================================
