use crate::{
    error::{ClassifierError, DataSourceError, Result},
    records::{Record, RecordSchema},
    words::{unique_words, WordSet},
};
use log::{debug, info};
use std::collections::{btree_map::Entry, BTreeMap, BTreeSet, HashMap};

/// Document-frequency statistics of a labeled corpus.
///
/// Built once by [`VocabularyModel::train`] and read-only afterwards. Labels
/// and words are kept in ordered maps so that reports and label selection
/// always walk them in lexicographic order.
#[derive(Debug, Clone)]
pub struct VocabularyModel {
    total_documents: usize,
    vocabulary: BTreeSet<String>,
    documents_per_word: HashMap<String, usize>,
    documents_per_label: BTreeMap<String, usize>,
    documents_per_label_per_word: BTreeMap<String, BTreeMap<String, usize>>,
}

/// A trained label as shown in the model summary.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSummary<'a> {
    pub label: &'a str,
    pub documents: usize,
    pub log_prior: f64,
}

/// A (label, word) pair that occurred together in at least one document.
#[derive(Debug, Clone, PartialEq)]
pub struct WordParameter<'a> {
    pub label: &'a str,
    pub word: &'a str,
    pub documents: usize,
    pub log_likelihood: f64,
}

impl VocabularyModel {
    fn empty() -> Self {
        VocabularyModel {
            total_documents: 0,
            vocabulary: BTreeSet::new(),
            documents_per_word: HashMap::new(),
            documents_per_label: BTreeMap::new(),
            documents_per_label_per_word: BTreeMap::new(),
        }
    }

    /// Trains a model with one pass over `records`.
    ///
    /// The first record error aborts training and is returned as is. A corpus
    /// without any records is rejected with [`ClassifierError::EmptyCorpus`],
    /// since every score against it would divide by zero.
    pub fn train<I>(records: I, schema: &RecordSchema) -> Result<Self>
    where
        I: IntoIterator<Item = std::result::Result<Record, DataSourceError>>,
    {
        let mut model = Self::empty();
        for record in records {
            let record = record?;
            let label = schema.label(&record)?;
            let words = unique_words(schema.content(&record)?);
            debug!(
                "record {}: label = {}, {} unique words",
                record.position(),
                label,
                words.len()
            );
            model.add_document(label, words);
        }

        if model.total_documents == 0 {
            return Err(ClassifierError::EmptyCorpus);
        }

        info!(
            "trained on {} documents: {} labels, vocabulary size {}",
            model.total_documents,
            model.documents_per_label.len(),
            model.vocabulary_size()
        );
        Ok(model)
    }

    fn add_document(&mut self, label: &str, words: WordSet) {
        self.total_documents += 1;
        *self.documents_per_label.entry(label.to_string()).or_insert(0) += 1;

        let label_words = match self.documents_per_label_per_word.entry(label.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(BTreeMap::new()),
        };
        for word in words {
            *self.documents_per_word.entry(word.clone()).or_insert(0) += 1;
            *label_words.entry(word.clone()).or_insert(0) += 1;
            self.vocabulary.insert(word);
        }
    }

    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(String::as_str)
    }

    /// Trained labels in lexicographic order.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.documents_per_label.keys().map(String::as_str)
    }

    /// Number of training documents that contain `word`, over all labels.
    #[cfg(test)]
    pub fn documents_with_word(&self, word: &str) -> usize {
        self.documents_per_word.get(word).copied().unwrap_or(0)
    }

    pub fn documents_with_label(&self, label: &str) -> usize {
        self.documents_per_label.get(label).copied().unwrap_or(0)
    }

    /// Number of training documents under `label` that contain `word`.
    #[cfg(test)]
    pub fn documents_with_label_and_word(&self, label: &str, word: &str) -> usize {
        self.documents_per_label_per_word
            .get(label)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Log-probability of `words` belonging to `label`.
    ///
    /// Each word contributes, in order of preference: its frequency among the
    /// label's documents, its frequency across the whole corpus if the label
    /// never saw it, or `1 / total_documents` if no document ever contained it.
    pub fn score(&self, words: &WordSet, label: &str) -> Result<f64> {
        let &label_documents = self
            .documents_per_label
            .get(label)
            .ok_or_else(|| ClassifierError::UnknownLabel(label.to_string()))?;
        let label_words = self.documents_per_label_per_word.get(label);

        let total = self.total_documents as f64;
        let label_documents = label_documents as f64;
        let log_prior = (label_documents / total).ln();

        Ok(words.iter().fold(log_prior, |acc, word| {
            let probability = match label_words.and_then(|counts| counts.get(word)) {
                Some(&count) => count as f64 / label_documents,
                None => match self.documents_per_word.get(word) {
                    Some(&count) => count as f64 / total,
                    None => 1.0 / total,
                },
            };
            acc + probability.ln()
        }))
    }

    /// Picks the highest scoring label for `words`.
    ///
    /// Labels are tried in lexicographic order and only a strictly greater
    /// score replaces the incumbent, so exact ties go to the smaller label.
    pub fn predict(&self, words: &WordSet) -> Result<&str> {
        let mut best: Option<(&str, f64)> = None;
        for label in self.label_names() {
            let score = self.score(words, label)?;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label, score)),
            }
        }
        best.map(|(label, _)| label).ok_or(ClassifierError::NoLabels)
    }

    /// Every trained label with its document count and log-prior.
    pub fn labels(&self) -> impl Iterator<Item = LabelSummary<'_>> {
        let total = self.total_documents as f64;
        self.documents_per_label
            .iter()
            .map(move |(label, &documents)| LabelSummary {
                label,
                documents,
                log_prior: (documents as f64 / total).ln(),
            })
    }

    /// Every (label, word) pair with a non-zero count, sorted by label then
    /// word.
    pub fn parameters(&self) -> impl Iterator<Item = WordParameter<'_>> {
        self.documents_per_label_per_word
            .iter()
            .flat_map(move |(label, words)| {
                let label_documents = self.documents_with_label(label) as f64;
                words.iter().map(move |(word, &documents)| WordParameter {
                    label,
                    word,
                    documents,
                    log_likelihood: (documents as f64 / label_documents).ln(),
                })
            })
    }
}
