//! Linguistic model: sentence segmentation and noun-phrase chunking
//!
//! The keyword pipeline only talks to [`LinguisticModel`]. The bundled
//! implementation is [`lexicon::LexiconModel`], loaded once at startup by
//! [`model_manager::start`].

pub mod chunker;
pub mod lexicon;
pub mod model_manager;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags, named after the Universal Dependencies tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Pos {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let pos = match tag.trim().to_uppercase().as_str() {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            "CCONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            "X" => Pos::X,
            _ => return None,
        };
        Some(pos)
    }

    pub fn is_nominal(self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn)
    }
}

/// One segmented sentence with the noun chunks found inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    /// Chunk text exactly as it appears in `text`.
    pub noun_chunks: Vec<String>,
}

/// A loaded, read-only language model.
///
/// Implementations must not mutate themselves after construction, so one
/// instance can be shared by reference for the whole process lifetime.
pub trait LinguisticModel: Send + Sync {
    fn name(&self) -> &str;

    /// Segment `text` into sentences and chunk each one.
    fn parse(&self, text: &str) -> Vec<Sentence>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(Pos::from_tag("PROPN"), Some(Pos::Propn));
        assert_eq!(Pos::from_tag(" cconj "), Some(Pos::Cconj));
        assert_eq!(Pos::from_tag("NN"), None);
        assert!(Pos::Noun.is_nominal());
        assert!(!Pos::Pron.is_nominal());
    }
}
