mod bayes;
mod error;
mod evaluate;
mod records;
mod report;
mod words;

use anyhow::{Context, Result};
use bayes::VocabularyModel;
use clap::Parser;
use log::LevelFilter;
use records::{CsvRecordSource, RecordSchema};
use std::{io, path::PathBuf};

/// Train a Naive Bayes text classifier and report on it or evaluate it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file of labeled training documents.
    train_file: PathBuf,

    /// CSV file of labeled documents to evaluate. Without it the trained
    /// model is printed instead.
    test_file: Option<PathBuf>,

    /// Column holding the label of a document. Use `--label-field tag` for
    /// corpora with a `tag,content` header.
    #[arg(long, default_value = "label")]
    label_field: String,

    /// Column holding the text of a document.
    #[arg(long, default_value = "content")]
    content_field: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn schema(&self) -> RecordSchema {
        RecordSchema {
            label_field: self.label_field.clone(),
            content_field: self.content_field.clone(),
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let schema = args.schema();
    let train_source = CsvRecordSource::from_path(&args.train_file)?;

    // Open the test file up front so a bad path fails before any output.
    let test_source = match &args.test_file {
        Some(path) => Some(CsvRecordSource::from_path(path)?),
        None => None,
    };

    let model = VocabularyModel::train(train_source, &schema)
        .with_context(|| format!("training on {} failed", args.train_file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (test_source, &args.test_file) {
        (Some(test_source), Some(test_file)) => {
            let evaluation = evaluate::evaluate(&model, test_source, &schema)
                .with_context(|| format!("evaluating {} failed", test_file.display()))?;
            report::write_evaluation(&mut out, &model, &evaluation)?;
        }
        _ => {
            let records = CsvRecordSource::from_path(&args.train_file)?;
            report::write_training_data(&mut out, records, &schema, &model)
                .with_context(|| format!("reading {} failed", args.train_file.display()))?;
            report::write_model(&mut out, &model)?;
        }
    }

    Ok(())
}
