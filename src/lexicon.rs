//! Closed-class French word lists.
//!
//! The decision rules consult a handful of closed lexical classes (given
//! names, person/animal nouns, entity-type nouns, weather vocabulary,
//! avalent verbs, verbs demanding a personal subject, frozen phrases).
//! They are kept here as data tables rather than inline logic so a locale
//! variant can swap them without touching the decision engine. A lookup
//! miss always means "unknown/unconstrained", never a rejection.

use crate::document::EntityKind;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Male given names with grammatically masculine agreement.
pub static MALE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "alain", "alexandre", "andré", "antoine", "arthur", "bernard", "bruno", "christophe",
        "claude", "daniel", "david", "denis", "édouard", "émile", "éric", "fabien", "françois",
        "frédéric", "gabriel", "georges", "gérard", "guillaume", "henri", "hugo", "jacques",
        "james", "jean", "jérôme", "joseph", "jules", "julien", "laurent", "léo", "louis", "luc",
        "lucas", "marc", "marcel", "martin", "mathieu", "maxime", "michel", "nicolas", "olivier",
        "pascal", "patrick", "paul", "philippe", "pierre", "ralf", "raphaël", "rémi", "richard",
        "robert", "romain", "sébastien", "serge", "simon", "stéphane", "théo", "thierry",
        "thomas", "tom", "victor", "vincent", "xavier", "yves",
    ]
    .into_iter()
    .collect()
});

/// Female given names with grammatically feminine agreement.
pub static FEMALE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "agnès", "alice", "amélie", "anne", "aurélie", "brigitte", "carol", "caroline",
        "catherine", "cécile", "céline", "charlotte", "chloé", "christine", "claire", "clara",
        "delphine", "élise", "élodie", "emma", "estelle", "ève", "florence", "françoise",
        "hélène", "inès", "isabelle", "jeanne", "julie", "juliette", "laura", "laure", "léa",
        "lucie", "madeleine", "manon", "margot", "marie", "marion", "mathilde", "monique",
        "nathalie", "nicole", "pauline", "rose", "sandrine", "sarah", "simone", "sophie",
        "suzanne", "sylvie", "valérie", "véronique", "virginie", "zoé",
    ]
    .into_iter()
    .collect()
});

/// Common nouns denoting persons (lemmas).
pub static PERSON_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "adulte", "ami", "amie", "bébé", "chef", "collègue", "cousin", "cousine", "dame",
        "directeur", "directrice", "docteur", "élève", "empereur", "enfant", "époux", "épouse",
        "étudiant", "étudiante", "femme", "fille", "fils", "frère", "garçon", "homme",
        "individu", "infirmier", "infirmière", "madame", "mademoiselle", "mari", "médecin",
        "mère", "monsieur", "oncle", "patron", "patronne", "père", "personne", "président",
        "présidente", "professeur", "reine", "roi", "sœur", "soeur", "tante", "voisin",
        "voisine",
    ]
    .into_iter()
    .collect()
});

/// Common nouns denoting animals (lemmas).
pub static ANIMAL_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "âne", "chat", "chatte", "cheval", "chien", "chienne", "cochon", "éléphant", "lapin",
        "lion", "lionne", "loup", "loutre", "mouton", "oiseau", "ours", "panthère", "poisson",
        "poule", "renard", "singe", "souris", "tigre", "vache",
    ]
    .into_iter()
    .collect()
});

/// Adjectives and nouns naming weather states in avalent "il fait ..."
/// constructions.
pub static WEATHER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "beau", "brumeux", "chaud", "doux", "frais", "frisquet", "froid", "gris", "humide",
        "lourd", "mauvais", "nuageux", "orageux", "soleil",
    ]
    .into_iter()
    .collect()
});

/// Avalent verbs whose grammatical subject is never referential
/// ("il pleut", "il faut", "il vaut mieux").
pub static AVALENT_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bruiner", "falloir", "geler", "grêler", "neiger", "pleuvoir", "valoir", "venter",
    ]
    .into_iter()
    .collect()
});

/// Verbs that strongly prefer an animate/personal subject. A pronoun
/// acting as their subject is only a confident match against a
/// person-denoting referent.
pub static VERBS_WITH_PERSONAL_SUBJECT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "accepter", "adorer", "aimer", "croire", "décider", "détester", "dire", "écouter",
        "espérer", "expliquer", "hurler", "oublier", "parler", "penser", "promettre",
        "raconter", "refuser", "regretter", "remercier", "savoir", "souhaiter", "vouloir",
    ]
    .into_iter()
    .collect()
});

/// Frozen phrases whose nominal parts never introduce mentions
/// ("un chien, par exemple" does not mention an example).
pub static BLACKLISTED_PHRASES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "par exemple",
        "au fait",
        "en fait",
        "en effet",
        "d'ailleurs",
        "en revanche",
        "quand même",
        "tout à fait",
        "à propos",
        "du coup",
    ]
});

/// Entity-type nouns: common nouns that can refer back to a named entity
/// of the given kind ("Peugeot ... l'entreprise").
#[must_use]
pub fn entity_nouns(kind: EntityKind) -> &'static HashSet<&'static str> {
    static PER: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        ["personne", "homme", "femme", "garçon", "fille", "individu", "dame", "monsieur"]
            .into_iter()
            .collect()
    });
    static LOC: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        ["lieu", "endroit", "terrain", "secteur", "ville", "région", "pays"]
            .into_iter()
            .collect()
    });
    static ORG: Lazy<HashSet<&'static str>> = Lazy::new(|| {
        [
            "entreprise",
            "société",
            "organisation",
            "association",
            "fédération",
            "compagnie",
            "groupe",
        ]
        .into_iter()
        .collect()
    });
    static EMPTY: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);
    match kind {
        EntityKind::Person => &PER,
        EntityKind::Location => &LOC,
        EntityKind::Organization => &ORG,
        EntityKind::None => &EMPTY,
    }
}

/// True if the lemma is a known male or female given name.
#[must_use]
pub fn is_given_name(lemma: &str) -> bool {
    let lower = lemma.to_lowercase();
    MALE_NAMES.contains(lower.as_str()) || FEMALE_NAMES.contains(lower.as_str())
}

/// True if the lemma denotes a person: given name, person noun, or
/// person-class entity noun.
#[must_use]
pub fn is_person_word(lemma: &str) -> bool {
    let lower = lemma.to_lowercase();
    PERSON_WORDS.contains(lower.as_str()) || is_given_name(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lists_disjoint() {
        for name in MALE_NAMES.iter() {
            assert!(!FEMALE_NAMES.contains(name), "epicene name in both lists: {name}");
        }
    }

    #[test]
    fn test_given_name_lookup_case_insensitive() {
        assert!(is_given_name("Pierre"));
        assert!(is_given_name("julie"));
        assert!(!is_given_name("Charlie"));
    }

    #[test]
    fn test_entity_nouns() {
        assert!(entity_nouns(EntityKind::Organization).contains("entreprise"));
        assert!(entity_nouns(EntityKind::Organization).contains("compagnie"));
        assert!(entity_nouns(EntityKind::Person).contains("femme"));
        assert!(entity_nouns(EntityKind::None).is_empty());
    }

    #[test]
    fn test_person_word_covers_names_and_nouns() {
        assert!(is_person_word("homme"));
        assert!(is_person_word("Hélène"));
        assert!(!is_person_word("valise"));
    }
}
