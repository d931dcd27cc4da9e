//! Common-word exclusion set.
//!
//! Spoken transcripts are dominated by filler and function words. Those never
//! become keyword nodes, no matter how often they occur. The list is stored
//! pre-stemmed so membership is tested on stems.

use std::collections::HashSet;

use transcript_types::NodeId;

use crate::text::Stemmer;

/// Built-in English words excluded from keyword candidacy.
pub const BUILTIN_COMMON_WORDS: &[&str] = &[
    "a", "about", "above", "absolutely", "across", "actually", "after", "again", "against",
    "all", "almost", "along", "already", "also", "although", "always", "am", "among", "an",
    "and", "another", "any", "anybody", "anyone", "anything", "anyway", "are", "around", "as",
    "at", "away", "back", "basically", "be", "because", "become", "been", "before", "began",
    "begin", "being", "believe", "below", "better", "between", "big", "both", "bring", "but",
    "by", "call", "came", "can", "cannot", "certainly", "change", "check", "clear", "come",
    "could", "course", "definitely", "did", "different", "do", "does", "doing", "done", "down",
    "during", "each", "either", "else", "end", "enough", "even", "ever", "every", "everybody",
    "everyone", "everything", "example", "exactly", "far", "feel", "few", "find", "first",
    "following", "for", "found", "from", "get", "getting", "give", "going", "gonna", "good",
    "got", "great", "had", "happen", "has", "have", "having", "he", "hello", "her", "here",
    "him", "his", "how", "however", "i", "idea", "if", "important", "in", "inside", "instead",
    "into", "is", "it", "its", "itself", "just", "keep", "kind", "know", "large", "last",
    "later", "least", "less", "let", "like", "little", "long", "look", "looking", "lot", "made",
    "make", "making", "many", "maybe", "me", "mean", "might", "minute", "moment", "more", "most",
    "much", "music", "must", "my", "myself", "need", "never", "new", "next", "nice", "no",
    "nobody", "not", "nothing", "now", "number", "obviously", "of", "off", "often", "okay", "old",
    "on", "once", "one", "only", "or", "other", "others", "our", "out", "over", "own", "part",
    "people", "perhaps", "place", "point", "pretty", "probably", "problem", "put", "question",
    "quite", "rather", "really", "right", "said", "same", "saying", "second", "see", "seem",
    "several", "she", "should", "show", "side", "simply", "since", "small", "so", "some",
    "somebody", "someone", "something", "sometimes", "somewhere", "sort", "start", "still",
    "stuff", "such", "sure", "take", "talk", "talking", "tell", "than", "thank", "thanks",
    "that", "the", "their", "them", "themselves", "then", "there", "therefore", "these", "they",
    "thing", "things", "think", "thinking", "this", "those", "though", "thought", "three",
    "through", "time", "to", "today", "together", "too", "totally", "toward", "try", "trying",
    "turn", "two", "under", "understand", "until", "up", "upon", "us", "use", "used", "using",
    "usually", "very", "want", "wanted", "was", "way", "we", "well", "went", "were", "what",
    "whatever", "when", "where", "whether", "which", "while", "who", "whole", "why", "will",
    "with", "within", "without", "wonder", "work", "world", "would", "yeah", "year", "yes",
    "yet", "you", "your", "yourself",
];

/// Pre-stemmed exclusion set.
#[derive(Debug, Clone, Default)]
pub struct CommonWords {
    stems: HashSet<String>,
}

impl CommonWords {
    /// Stem the built-in list plus `extra` words with `stemmer`.
    ///
    /// Anchor ids are always excluded so a keyword can never collide with the
    /// start/end markers.
    pub fn new<S: AsRef<str>>(stemmer: &dyn Stemmer, extra: &[S]) -> Self {
        let stems = BUILTIN_COMMON_WORDS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .map(|word| stemmer.stem(word))
            .chain(NodeId::RESERVED.iter().map(|id| id.to_string()))
            .collect();
        Self { stems }
    }

    /// Build from already-stemmed words without the built-in list.
    pub fn from_stems<I, S>(stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stems: stems
                .into_iter()
                .map(Into::into)
                .chain(NodeId::RESERVED.iter().map(|id| id.to_string()))
                .collect(),
        }
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}
