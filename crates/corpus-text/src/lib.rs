//! Ordered, duplicate-free sentence collections and the pure transforms the
//! corpus tools are built on.
//!
//! A "sentence" is one trimmed, non-empty line of input text. [`SentenceSet`]
//! keeps sentences unique while preserving first-occurrence order, which makes
//! every downstream report reproducible for a given input. All functions here
//! are side-effect free; IO lives with the callers.
//!
//! ```rust
//! use corpus_text::normalize;
//!
//! let set = normalize("b\n a \nb\na\n\n");
//! let lines: Vec<&str> = set.iter().collect();
//! assert_eq!(lines, ["b", "a"]);
//! ```

use std::collections::HashSet;

use rand::Rng;

/// Ordered collection of unique sentences.
///
/// Insertion trims the candidate line, drops it when empty or already present,
/// and otherwise appends it. Iteration order is always first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct SentenceSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl SentenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one line. Returns `true` if the trimmed line was new.
    pub fn insert(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() || self.seen.contains(trimmed) {
            return false;
        }
        self.seen.insert(trimmed.to_string());
        self.items.push(trimmed.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, sentence: &str) -> bool {
        self.seen.contains(sentence)
    }

    /// Iterate sentences in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }

    /// Join the sentences back into newline-separated text.
    pub fn to_text(&self) -> String {
        self.items.join("\n")
    }

    /// Copy with the sentences in lexicographic (code-point) ascending order.
    pub fn sorted(&self) -> SentenceSet {
        let mut items = self.items.clone();
        items.sort();
        Self::from_unique(items)
    }

    /// Copy with the sentences in a uniformly random order (Fisher-Yates).
    ///
    /// The caller supplies the RNG so shuffles can be reproduced with a
    /// seeded [`rand::rngs::StdRng`].
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> SentenceSet {
        let mut items = self.items.clone();
        for i in (1..items.len()).rev() {
            let j = rng.gen_range(0..=i);
            items.swap(i, j);
        }
        Self::from_unique(items)
    }

    /// Rebuild from items already known to be trimmed, non-empty, and unique.
    fn from_unique(items: Vec<String>) -> Self {
        let seen = items.iter().cloned().collect();
        Self { items, seen }
    }
}

impl<'a> IntoIterator for &'a SentenceSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Split raw text into a [`SentenceSet`]: one sentence per line, trimmed,
/// empties dropped, duplicates dropped keeping the first occurrence.
///
/// `str::lines` already strips a trailing `\r`, and trimming removes any
/// other stray whitespace, so CRLF sources normalize identically to LF ones.
pub fn normalize(raw: &str) -> SentenceSet {
    let mut set = SentenceSet::new();
    for line in raw.lines() {
        set.insert(line);
    }
    set
}

/// Ordered set of distinct characters, first-seen order.
#[derive(Clone, Debug, Default)]
pub struct CharSet {
    chars: Vec<char>,
    seen: HashSet<char>,
}

impl CharSet {
    /// Collect every distinct character appearing anywhere in the sentences,
    /// scanning each sentence position by position.
    pub fn from_sentences(sentences: &SentenceSet) -> Self {
        let mut set = Self::default();
        for sentence in sentences.iter() {
            for ch in sentence.chars() {
                set.insert(ch);
            }
        }
        set
    }

    fn insert(&mut self, ch: char) {
        if self.seen.insert(ch) {
            self.chars.push(ch);
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.seen.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterate characters in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}
