use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

/// Content hash of one normalized block window.
pub type BlockHash = [u8; 32];

static STRING_LITERALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`"#).unwrap()
});
static BLOCK_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());
static DECLARATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+[A-Za-z_$][A-Za-z0-9_$]*").unwrap()
});
static ANON_FUNCTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s*\(").unwrap());
static METHOD_RECEIVERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*\s*\.\s*([A-Za-z_$][A-Za-z0-9_$]*\s*\()").unwrap()
});
static PROPERTY_KEYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_$][A-Za-z0-9_$]*\s*:").unwrap());
static NUMBER_LITERALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Deepest receiver chain unwound by the method-call rewrite. Chains
/// longer than this keep their remaining prefix, which only makes two
/// blocks *less* likely to match.
const MAX_RECEIVER_DEPTH: usize = 8;

/// Normalizes and hashes fixed-size line windows of source text.
///
/// Normalization erases superficial syntax variation while preserving
/// structure: two blocks that differ only in declared names, receiver
/// names, string text, or numeric values hash identically, but blocks
/// with different call structure do not. Windows whose normalized text is
/// too short or has too few tokens are discarded as boilerplate.
pub struct BlockHasher {
    min_chars: usize,
    min_tokens: usize,
}

impl BlockHasher {
    pub fn new(min_chars: usize, min_tokens: usize) -> Self {
        Self {
            min_chars,
            min_tokens,
        }
    }

    /// Canonicalize one window's joined text.
    ///
    /// Rewrites, in order: string literals → `STR`; block and line
    /// comments stripped; declaration keyword plus declared name → `DECL`
    /// (other usages of the name are untouched); anonymous `function (`
    /// → `FN(`; method-call receivers dropped so `recv.name(` becomes
    /// `name(` (chains collapse to the final member call); property keys
    /// `name:` → `NAME =`; numeric literals → `NUM`; whitespace runs
    /// collapsed to single spaces and trimmed.
    pub fn normalize(&self, raw: &str) -> String {
        let text = STRING_LITERALS.replace_all(raw, "STR");
        let text = BLOCK_COMMENTS.replace_all(&text, " ");
        let text = LINE_COMMENTS.replace_all(&text, " ");
        let text = DECLARATIONS.replace_all(&text, "DECL");
        let text = ANON_FUNCTIONS.replace_all(&text, "FN(");

        let mut text = text.into_owned();
        for _ in 0..MAX_RECEIVER_DEPTH {
            let next = METHOD_RECEIVERS.replace_all(&text, "$1").into_owned();
            if next == text {
                break;
            }
            text = next;
        }

        let text = PROPERTY_KEYS.replace_all(&text, "NAME =");
        let text = NUMBER_LITERALS.replace_all(&text, "NUM");
        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }

    /// Hash one window of source lines, or `None` when the normalized
    /// text is below the char/token floor.
    pub fn hash_window(&self, lines: &[&str]) -> Option<BlockHash> {
        let normalized = self.normalize(&lines.join("\n"));
        if normalized.len() < self.min_chars {
            return None;
        }
        if normalized.split_whitespace().count() < self.min_tokens {
            return None;
        }
        Some(Sha256::digest(normalized.as_bytes()).into())
    }
}

#[cfg(test)]
#[path = "hasher_test.rs"]
mod tests;
