//! Tokenization and rule-based noun-phrase chunking

use crate::nlp::Pos;
use regex::Regex;
use std::sync::OnceLock;

/// A token with its byte span inside the sentence it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    // Words may carry inner joiners ("ci/cd", "node.js", "hands-on") and
    // trailing +/# ("c++", "c#"). Any other non-space char is its own token.
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"\w[\w+#]*(?:[./'&-]\w[\w+#]*)*|[^\s\w]").expect("valid token regex")
    })
}

pub fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    token_regex()
        .find_iter(sentence)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Group tagged tokens into noun chunks.
///
/// A chunk is an optional determiner, any run of adjective/number/noun
/// modifiers, and ends at the last noun or proper noun of the run. Pronouns
/// form single-token chunks. Anything else closes the open chunk.
pub fn noun_chunks(sentence: &str, tokens: &[Token<'_>], tags: &[Pos]) -> Vec<String> {
    debug_assert_eq!(tokens.len(), tags.len());

    let mut chunks = Vec::new();
    let mut start: Option<usize> = None;
    let mut head: Option<usize> = None;

    let close = |start: &mut Option<usize>, head: &mut Option<usize>, chunks: &mut Vec<String>| {
        if let (Some(s), Some(h)) = (*start, *head) {
            chunks.push(sentence[tokens[s].start..tokens[h].end].to_string());
        }
        *start = None;
        *head = None;
    };

    for (i, tag) in tags.iter().enumerate() {
        match tag {
            Pos::Det => {
                close(&mut start, &mut head, &mut chunks);
                start = Some(i);
            }
            Pos::Adj | Pos::Num => {
                if start.is_none() {
                    start = Some(i);
                }
            }
            nominal if nominal.is_nominal() => {
                if start.is_none() {
                    start = Some(i);
                }
                head = Some(i);
            }
            Pos::Pron => {
                close(&mut start, &mut head, &mut chunks);
                start = Some(i);
                head = Some(i);
                close(&mut start, &mut head, &mut chunks);
            }
            _ => close(&mut start, &mut head, &mut chunks),
        }
    }
    close(&mut start, &mut head, &mut chunks);

    chunks
}
