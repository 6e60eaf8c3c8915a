use crate::{
    bayes::VocabularyModel,
    error::{DataSourceError, Result},
    records::{Record, RecordSchema},
    words::unique_words,
};
use log::{debug, info};

/// Outcome of classifying one held-out document.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub truth: String,
    pub predicted: String,
    pub score: f64,
    pub content: String,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.truth == self.predicted
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    pub fn correct(&self) -> usize {
        self.predictions.iter().filter(|p| p.is_correct()).count()
    }

    pub fn total(&self) -> usize {
        self.predictions.len()
    }

    /// Fraction of correct predictions, `0.0` when nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.correct() as f64 / total as f64,
        }
    }
}

/// Predicts every record of a held-out set and tallies the results.
pub fn evaluate<I>(model: &VocabularyModel, records: I, schema: &RecordSchema) -> Result<Evaluation>
where
    I: IntoIterator<Item = std::result::Result<Record, DataSourceError>>,
{
    let mut evaluation = Evaluation::default();
    for record in records {
        let record = record?;
        let truth = schema.label(&record)?;
        let content = schema.content(&record)?;

        let words = unique_words(content);
        let predicted = model.predict(&words)?;
        let score = model.score(&words, predicted)?;
        debug!(
            "record {}: correct = {}, predicted = {}, score = {}",
            record.position(),
            truth,
            predicted,
            score
        );

        evaluation.predictions.push(Prediction {
            truth: truth.to_string(),
            predicted: predicted.to_string(),
            score,
            content: content.to_string(),
        });
    }

    info!(
        "{} / {} predicted correctly ({:.1}%)",
        evaluation.correct(),
        evaluation.total(),
        evaluation.accuracy() * 100.0
    );
    Ok(evaluation)
}
