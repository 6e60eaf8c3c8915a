use crate::{
    bayes::VocabularyModel,
    error::DataSourceError,
    evaluate::Evaluation,
    records::{Record, RecordSchema},
};
use anyhow::Result;
use std::{fmt, io::Write};

/// Significant digits printed for log-probabilities.
const PRECISION: usize = 3;

/// Displays a number the way `printf("%.3g")` does: three significant
/// digits, trailing zeros dropped, scientific notation for exponents below
/// -4 or at least 3.
struct Significant(f64);

impl fmt::Display for Significant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.0;
        if value == 0.0 {
            return write!(f, "0");
        }
        if !value.is_finite() {
            return write!(f, "{}", value);
        }

        // Round first, the exponent of the rounded value picks the notation.
        let scientific = format!("{:.*e}", PRECISION - 1, value);
        let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

        if exponent < -4 || exponent >= PRECISION as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{}{:02}",
                trim_zeros(mantissa),
                sign,
                exponent.abs()
            )
        } else {
            let decimals = (PRECISION as i32 - 1 - exponent) as usize;
            write!(f, "{}", trim_zeros(&format!("{:.*}", decimals, value)))
        }
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Echoes the training records followed by the corpus totals.
pub fn write_training_data<W, I>(
    out: &mut W,
    records: I,
    schema: &RecordSchema,
    model: &VocabularyModel,
) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = std::result::Result<Record, DataSourceError>>,
{
    writeln!(out, "training data:")?;
    for record in records {
        let record = record?;
        writeln!(
            out,
            "  label = {}, content = {}",
            schema.label(&record)?,
            schema.content(&record)?
        )?;
    }
    writeln!(out, "trained on {} examples", model.total_documents())?;
    writeln!(out, "vocabulary size = {}", model.vocabulary_size())?;
    writeln!(out)?;

    Ok(())
}

/// Prints the per-label priors and per-word likelihoods of a trained model.
pub fn write_model<W: Write>(out: &mut W, model: &VocabularyModel) -> Result<()> {
    writeln!(out, "classes:")?;
    for summary in model.labels() {
        writeln!(
            out,
            "  {}, {} examples, log-prior = {}",
            summary.label,
            summary.documents,
            Significant(summary.log_prior)
        )?;
    }

    writeln!(out, "classifier parameters:")?;
    for parameter in model.parameters() {
        writeln!(
            out,
            "  {}:{}, count = {}, log-likelihood = {}",
            parameter.label,
            parameter.word,
            parameter.documents,
            Significant(parameter.log_likelihood)
        )?;
    }
    writeln!(out)?;

    Ok(())
}

pub fn write_evaluation<W: Write>(
    out: &mut W,
    model: &VocabularyModel,
    evaluation: &Evaluation,
) -> Result<()> {
    writeln!(out, "trained on {} examples", model.total_documents())?;
    writeln!(out)?;

    writeln!(out, "test data:")?;
    for prediction in &evaluation.predictions {
        writeln!(
            out,
            "  correct = {}, predicted = {}, log-probability score = {}",
            prediction.truth,
            prediction.predicted,
            Significant(prediction.score)
        )?;
        writeln!(out, "  content = {}", prediction.content)?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "performance: {} / {} posts predicted correctly",
        evaluation.correct(),
        evaluation.total()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluate::evaluate, records::CsvRecordSource};

    const TRAIN: &str = "label,content\nspam,buy now buy\nham,meeting now\n";

    fn source(data: &str) -> CsvRecordSource<&[u8]> {
        CsvRecordSource::from_reader(data.as_bytes()).unwrap()
    }

    fn model() -> VocabularyModel {
        VocabularyModel::train(source(TRAIN), &RecordSchema::default()).unwrap()
    }

    #[test]
    fn training_dump() {
        let model = model();
        let mut out = Vec::new();
        write_training_data(&mut out, source(TRAIN), &RecordSchema::default(), &model).unwrap();

        let expected = "training data:\n\
                        \x20 label = spam, content = buy now buy\n\
                        \x20 label = ham, content = meeting now\n\
                        trained on 2 examples\n\
                        vocabulary size = 3\n\
                        \n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn model_summary() {
        let mut out = Vec::new();
        write_model(&mut out, &model()).unwrap();

        let expected = "classes:\n\
                        \x20 ham, 1 examples, log-prior = -0.693\n\
                        \x20 spam, 1 examples, log-prior = -0.693\n\
                        classifier parameters:\n\
                        \x20 ham:meeting, count = 1, log-likelihood = 0\n\
                        \x20 ham:now, count = 1, log-likelihood = 0\n\
                        \x20 spam:buy, count = 1, log-likelihood = 0\n\
                        \x20 spam:now, count = 1, log-likelihood = 0\n\
                        \n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn evaluation_transcript() {
        let model = model();
        let evaluation = evaluate(
            &model,
            source("label,content\nspam,buy buy\n"),
            &RecordSchema::default(),
        )
        .unwrap();

        let mut out = Vec::new();
        write_evaluation(&mut out, &model, &evaluation).unwrap();

        let expected = "trained on 2 examples\n\
                        \n\
                        test data:\n\
                        \x20 correct = spam, predicted = spam, log-probability score = -0.693\n\
                        \x20 content = buy buy\n\
                        \n\
                        performance: 1 / 1 posts predicted correctly\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn summary_numbers_use_three_significant_digits() {
        let train = "label,content\na,x\nb,y\nb,z\n";
        let model = VocabularyModel::train(source(train), &RecordSchema::default()).unwrap();
        let mut out = Vec::new();
        write_model(&mut out, &model).unwrap();

        let expected = "classes:\n\
                        \x20 a, 1 examples, log-prior = -1.1\n\
                        \x20 b, 2 examples, log-prior = -0.405\n\
                        classifier parameters:\n\
                        \x20 a:x, count = 1, log-likelihood = 0\n\
                        \x20 b:y, count = 1, log-likelihood = -0.693\n\
                        \x20 b:z, count = 1, log-likelihood = -0.693\n\
                        \n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn significant_digits() {
        let cases = [
            (0.0, "0"),
            (1.0f64.ln(), "0"),
            ((1.0f64 / 3.0).ln(), "-1.1"),
            ((1.0f64 / 1e6).ln(), "-13.8"),
            (-0.5, "-0.5"),
            (-123.4, "-123"),
            (-999.6, "-1e+03"),
            (-1234.5, "-1.23e+03"),
            (0.0001234, "0.000123"),
            (0.00001234, "1.23e-05"),
        ];
        for (value, expected) in cases {
            assert_eq!(Significant(value).to_string(), expected, "formatting {}", value);
        }
    }
}
