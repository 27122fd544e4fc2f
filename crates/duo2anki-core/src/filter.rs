//! Word list filtering
//!
//! Both word lists are searched the same way: a case-insensitive filter
//! matches a word as a prefix or as a substring, prefix matches are listed
//! first, and each group is sorted ascending.

/// How a word matched a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// Word starts with the filter
    Prefix,
    /// Word contains the filter somewhere after its start
    Substring,
}

/// A lowercased filter, ready to test words against
#[derive(Debug, Clone)]
pub struct WordFilter {
    needle: String,
}

impl WordFilter {
    pub fn new(filter: &str) -> Self {
        Self {
            needle: filter.to_lowercase(),
        }
    }

    /// Classify a word, or `None` if it does not contain the filter
    ///
    /// An empty filter is a prefix of every word.
    pub fn classify(&self, word: &str) -> Option<MatchKind> {
        let word = word.to_lowercase();
        if word.starts_with(&self.needle) {
            Some(MatchKind::Prefix)
        } else if word.contains(&self.needle) {
            Some(MatchKind::Substring)
        } else {
            None
        }
    }

    /// Filter and order words: prefix matches, then substring matches
    pub fn rank<'a, I>(&self, words: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.rank_by(words, |word| *word)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Like [`WordFilter::rank`], for items that carry a word
    ///
    /// Items with equal words keep their input order.
    pub fn rank_by<T, I, F>(&self, items: I, word_of: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        let mut matched: Vec<(MatchKind, T)> = items
            .into_iter()
            .filter_map(|item| self.classify(word_of(&item)).map(|kind| (kind, item)))
            .collect();
        matched.sort_by(|(kind_a, a), (kind_b, b)| {
            kind_a.cmp(kind_b).then_with(|| word_of(a).cmp(word_of(b)))
        });
        matched.into_iter().map(|(_, item)| item).collect()
    }
}

/// Shorthand for `WordFilter::new(filter).rank(words)`
pub fn rank_words<'a, I>(filter: &str, words: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    WordFilter::new(filter).rank(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let filter = WordFilter::new("Ca");
        assert_eq!(filter.classify("casa"), Some(MatchKind::Prefix));
        assert_eq!(filter.classify("CAMA"), Some(MatchKind::Prefix));
        assert_eq!(filter.classify("barca"), Some(MatchKind::Substring));
        assert_eq!(filter.classify("perro"), None);
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let words = ["tocar", "casa", "barca", "cama", "perro", "acaso"];
        let ranked = rank_words("ca", words);
        assert_eq!(ranked, vec!["cama", "casa", "acaso", "barca", "tocar"]);
    }

    #[test]
    fn test_rank_by_keeps_input_order_for_equal_words() {
        let items = [("k2", "dog"), ("k1", "hotdog"), ("k3", "dog"), ("k4", "cat")];
        let ranked = WordFilter::new("DO").rank_by(items, |(_, word)| *word);
        assert_eq!(ranked, vec![("k2", "dog"), ("k3", "dog"), ("k1", "hotdog")]);
    }

    #[test]
    fn test_empty_filter_returns_everything_sorted() {
        let ranked = rank_words("", ["perro", "gato", "árbol", "Zapato"]);
        assert_eq!(ranked, vec!["Zapato", "gato", "perro", "árbol"]);
    }

    #[test]
    fn test_case_insensitive_match_keeps_original_spelling() {
        let ranked = rank_words("ÁR", ["árbol", "Árbitro", "mar"]);
        assert_eq!(ranked, vec!["Árbitro", "árbol"]);
    }

    #[test]
    fn test_no_matches() {
        assert!(rank_words("xyz", ["perro", "gato"]).is_empty());
    }

    #[test]
    fn test_duplicate_words_are_kept() {
        let ranked = rank_words("do", ["dog", "dog", "condo"]);
        assert_eq!(ranked, vec!["dog", "dog", "condo"]);
    }
}
