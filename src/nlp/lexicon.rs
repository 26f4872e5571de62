//! Lexicon-driven English model: sentence segmentation, tagging, chunking

use crate::error::{Result, ResumeMatcherError};
use crate::nlp::chunker::{noun_chunks, tokenize};
use crate::nlp::{LinguisticModel, Pos, Sentence};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Name of the metadata file every model directory must contain.
pub const MODEL_CONFIG_FILE: &str = "config.toml";

/// Contents of a model directory's `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    pub version: String,
    pub lang: String,
    /// Lexicon file inside the model directory (`word<TAB>TAG` per line).
    #[serde(default = "default_lexicon_file")]
    pub lexicon: String,
    #[serde(default)]
    pub tagger: TaggerRules,
    /// Abbreviations whose trailing period never ends a sentence.
    #[serde(default = "default_abbreviations")]
    pub abbreviations: Vec<String>,
}

/// Fallback tagging for words the lexicon does not know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerRules {
    pub unknown: Pos,
    pub unknown_capitalized: Pos,
    pub hyphenated: Pos,
    #[serde(default)]
    pub suffixes: Vec<SuffixRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub tag: Pos,
    /// Shortest word the rule applies to.
    pub min_len: usize,
}

fn default_lexicon_file() -> String {
    "lexicon.tsv".to_string()
}

fn default_abbreviations() -> Vec<String> {
    ["e.g.", "i.e.", "etc.", "vs."]
        .iter()
        .map(|a| a.to_string())
        .collect()
}

impl Default for TaggerRules {
    fn default() -> Self {
        Self {
            unknown: Pos::Noun,
            unknown_capitalized: Pos::Propn,
            hyphenated: Pos::Adj,
            suffixes: Vec::new(),
        }
    }
}

/// Summary of a loaded model, for display.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub lang: String,
    pub lexicon_entries: usize,
    pub path: Option<PathBuf>,
}

pub struct LexiconModel {
    meta: ModelMeta,
    lexicon: HashMap<String, Pos>,
    path: Option<PathBuf>,
}

impl LexiconModel {
    /// Load a model from a directory containing `config.toml` and its lexicon.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(MODEL_CONFIG_FILE);
        let raw_meta = std::fs::read_to_string(&config_path).map_err(|e| {
            ResumeMatcherError::ModelLoading(format!(
                "cannot read '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        let meta: ModelMeta = toml::from_str(&raw_meta).map_err(|e| {
            ResumeMatcherError::ModelLoading(format!(
                "invalid model config '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let lexicon_path = dir.join(&meta.lexicon);
        let raw_lexicon = std::fs::read_to_string(&lexicon_path).map_err(|e| {
            ResumeMatcherError::ModelLoading(format!(
                "cannot read lexicon '{}': {}",
                lexicon_path.display(),
                e
            ))
        })?;

        let mut model = Self::from_parts(meta, &raw_lexicon)?;
        model.path = Some(dir.to_path_buf());
        info!(
            "Loaded linguistic model {} v{} ({} lexicon entries) from {}",
            model.meta.name,
            model.meta.version,
            model.lexicon.len(),
            dir.display()
        );
        Ok(model)
    }

    /// Build a model from already-read metadata and lexicon text.
    pub fn from_parts(mut meta: ModelMeta, lexicon_text: &str) -> Result<Self> {
        if meta.lang != "en" {
            return Err(ResumeMatcherError::ModelLoading(format!(
                "unsupported model language '{}', expected 'en'",
                meta.lang
            )));
        }

        let lexicon = parse_lexicon(lexicon_text)?;
        if lexicon.is_empty() {
            return Err(ResumeMatcherError::ModelLoading(
                "lexicon contains no entries".to_string(),
            ));
        }

        meta.abbreviations = meta
            .abbreviations
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        Ok(Self {
            meta,
            lexicon,
            path: None,
        })
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.meta.name.clone(),
            version: self.meta.version.clone(),
            lang: self.meta.lang.clone(),
            lexicon_entries: self.lexicon.len(),
            path: self.path.clone(),
        }
    }

    /// Tag a single token.
    pub fn tag(&self, token: &str) -> Pos {
        if !token.chars().any(char::is_alphanumeric) {
            return Pos::Punct;
        }
        if !token.chars().any(char::is_alphabetic) {
            return Pos::Num;
        }

        let lower = token.to_lowercase();
        if let Some(pos) = self.lexicon.get(&lower) {
            return *pos;
        }

        let rules = &self.meta.tagger;
        if lower.contains('-') {
            return rules.hyphenated;
        }
        if let Some(rule) = rules
            .suffixes
            .iter()
            .find(|r| lower.len() >= r.min_len && lower.ends_with(&r.suffix))
        {
            return rule.tag;
        }
        if token.chars().next().is_some_and(char::is_uppercase) {
            return rules.unknown_capitalized;
        }
        rules.unknown
    }

    /// Whether `text` ends in a known abbreviation such as "e.g.".
    fn ends_with_abbreviation(&self, text: &str) -> bool {
        let lower = text.trim_end().to_lowercase();
        self.meta.abbreviations.iter().any(|abbr| {
            lower
                .strip_suffix(abbr.as_str())
                .is_some_and(|head| !head.chars().next_back().is_some_and(char::is_alphanumeric))
        })
    }

    fn parse_sentence(&self, sentence: &str) -> Sentence {
        let tokens = tokenize(sentence);
        let tags: Vec<Pos> = tokens.iter().map(|t| self.tag(t.text)).collect();
        Sentence {
            text: sentence.to_string(),
            noun_chunks: noun_chunks(sentence, &tokens, &tags),
        }
    }
}

impl LinguisticModel for LexiconModel {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn parse(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();

        for paragraph in paragraphs(text) {
            let mut pending = String::new();
            for piece in paragraph.unicode_sentences() {
                pending.push_str(piece);
                if self.ends_with_abbreviation(&pending) {
                    continue;
                }
                let sentence = pending.trim();
                if !sentence.is_empty() {
                    sentences.push(self.parse_sentence(sentence));
                }
                pending.clear();
            }
            let sentence = pending.trim();
            if !sentence.is_empty() {
                sentences.push(self.parse_sentence(sentence));
            }
        }

        debug!("Segmented {} sentences", sentences.len());
        sentences
    }
}

/// Split text on blank lines and unwrap the line breaks inside each paragraph.
fn paragraphs(text: &str) -> Vec<String> {
    static BLANK_LINE_RE: OnceLock<Regex> = OnceLock::new();
    let blank_line_re =
        BLANK_LINE_RE.get_or_init(|| Regex::new(r"\n[ \t\r]*\n").expect("valid blank line regex"));

    blank_line_re
        .split(text)
        .map(|block| {
            block
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

fn parse_lexicon(text: &str) -> Result<HashMap<String, Pos>> {
    let mut lexicon = HashMap::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split('\t');
        let (word, tag) = match (fields.next(), fields.next(), fields.next()) {
            (Some(word), Some(tag), None) if !word.trim().is_empty() => (word.trim(), tag),
            _ => {
                return Err(ResumeMatcherError::ModelLoading(format!(
                    "malformed lexicon line {}: '{}'",
                    line_no + 1,
                    line
                )))
            }
        };
        let pos = Pos::from_tag(tag).ok_or_else(|| {
            ResumeMatcherError::ModelLoading(format!(
                "unknown tag '{}' on lexicon line {}",
                tag,
                line_no + 1
            ))
        })?;

        lexicon.insert(word.to_lowercase(), pos);
    }

    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "\
# test lexicon
i\tPRON
we\tPRON
someone\tPRON
have\tVERB
need\tVERB
with\tADP
in\tADP
and\tCCONJ
the\tDET
strong\tADJ
experience\tNOUN
e.g\tX
";

    fn meta() -> ModelMeta {
        ModelMeta {
            name: "test_lexicon".to_string(),
            version: "0.0.1".to_string(),
            lang: "en".to_string(),
            lexicon: default_lexicon_file(),
            tagger: TaggerRules {
                suffixes: vec![SuffixRule {
                    suffix: "ly".to_string(),
                    tag: Pos::Adv,
                    min_len: 4,
                }],
                ..TaggerRules::default()
            },
            abbreviations: default_abbreviations(),
        }
    }

    fn model() -> LexiconModel {
        LexiconModel::from_parts(meta(), LEXICON).unwrap()
    }

    #[test]
    fn test_tagging_fallbacks() {
        let model = model();
        assert_eq!(model.tag("With"), Pos::Adp);
        assert_eq!(model.tag("Kubernetes"), Pos::Propn);
        assert_eq!(model.tag("pipelines"), Pos::Noun);
        assert_eq!(model.tag("real-time"), Pos::Adj);
        assert_eq!(model.tag("quickly"), Pos::Adv);
        assert_eq!(model.tag("2024"), Pos::Num);
        assert_eq!(model.tag("5+"), Pos::Num);
        assert_eq!(model.tag(","), Pos::Punct);
    }

    #[test]
    fn test_parse_end_to_end_sentences() {
        let model = model();
        let sentences = model.parse("I have experience with Python and SQL. We need someone.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].noun_chunks,
            vec!["I", "experience", "Python", "SQL"]
        );
        assert_eq!(sentences[1].noun_chunks, vec!["We", "someone"]);
    }

    #[test]
    fn test_wrapped_line_stays_in_its_sentence() {
        let model = model();
        let sentences =
            model.parse("We need experience with Airflow,\nSnowflake and dbt.\n\nStrong Python");
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].text,
            "We need experience with Airflow, Snowflake and dbt."
        );
        assert_eq!(
            sentences[0].noun_chunks,
            vec!["We", "experience", "Airflow", "Snowflake", "dbt"]
        );
        assert_eq!(sentences[1].noun_chunks, vec!["Strong Python"]);
    }

    #[test]
    fn test_abbreviation_does_not_end_sentence() {
        let model = model();
        let sentences = model.parse("Experience with e.g. Spark, Hadoop and Kafka. We need Rust.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].noun_chunks,
            vec!["Experience", "Spark", "Hadoop", "Kafka"]
        );
        assert_eq!(model.tag("e.g"), Pos::X);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(model().parse("").is_empty());
        assert!(model().parse("   \n  ").is_empty());
    }

    #[test]
    fn test_malformed_lexicon_is_rejected() {
        let err = LexiconModel::from_parts(meta(), "python NOUN\n").err().unwrap();
        assert!(matches!(err, ResumeMatcherError::ModelLoading(_)));

        let err = LexiconModel::from_parts(meta(), "python\tNN\n").err().unwrap();
        assert!(matches!(err, ResumeMatcherError::ModelLoading(_)));
    }

    #[test]
    fn test_empty_lexicon_and_foreign_language_rejected() {
        assert!(LexiconModel::from_parts(meta(), "# nothing here\n").is_err());

        let mut german = meta();
        german.lang = "de".to_string();
        assert!(LexiconModel::from_parts(german, LEXICON).is_err());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MODEL_CONFIG_FILE),
            "name = \"tmp_model\"\nversion = \"1.0.0\"\nlang = \"en\"\n\n[tagger]\nunknown = \"NOUN\"\nunknown_capitalized = \"PROPN\"\nhyphenated = \"ADJ\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("lexicon.tsv"), LEXICON).unwrap();

        let model = LexiconModel::load(dir.path()).unwrap();
        let info = model.info();
        assert_eq!(info.name, "tmp_model");
        assert_eq!(info.lexicon_entries, 12);
        assert_eq!(info.path.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = LexiconModel::load(&dir.path().join("absent"));
        assert!(matches!(result, Err(ResumeMatcherError::ModelLoading(_))));
    }
}
