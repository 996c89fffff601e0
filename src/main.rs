use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use text_bayes::{input, report, Corpus, Predictor, ReaderConfig};

#[derive(Parser)]
#[command(name = "text-bayes", version, about = "Naive Bayes text classifier")]
struct Cli {
    /// CSV file with labeled training records.
    train_file: PathBuf,

    /// CSV file with labeled records to predict. Without it the trained
    /// model is printed instead.
    test_file: Option<PathBuf>,

    /// Header of the column holding the label.
    #[arg(long, default_value = "tag")]
    label_column: String,

    /// Header of the column holding the text.
    #[arg(long, default_value = "content")]
    text_column: String,

    /// Significant digits for printed log-probabilities.
    #[arg(long, default_value_t = 3)]
    precision: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Trains on `cli.train_file` and writes either the training report or, with
/// a test file, the evaluation report to `out`.
fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = ReaderConfig {
        label_column: cli.label_column,
        text_column: cli.text_column,
    };

    let training = input::read_documents(&cli.train_file, &config)
        .with_context(|| {
            format!(
                "failed to read training data from {}",
                cli.train_file.display()
            )
        })?;
    let mut corpus = Corpus::train(training);

    match &cli.test_file {
        Some(path) => {
            let queries = input::read_documents(path, &config)
                .with_context(|| format!("failed to read test data from {}", path.display()))?;
            let evaluation = Predictor::new(&mut corpus)
                .evaluate(queries)
                .context("cannot predict labels")?;
            report::write_evaluation_report(out, &corpus, &evaluation, cli.precision)?;
        }
        None => report::write_training_report(out, &corpus, cli.precision)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;
    use text_bayes::BayesError;

    use super::*;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    fn run_with(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("text-bayes").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn train_only_prints_the_model() {
        let dir = TempDir::new().unwrap();
        let train = write_csv(dir.path(), "train.csv", "tag,content\nspam,buy now\nham,hello\n");

        let text = run_with(&[&train]).unwrap();
        assert!(text.starts_with("training data:\n  label = spam, content = buy now\n"));
        assert!(text.contains("vocabulary size = 3\n"));
        assert!(text.contains("  spam, 1 examples, log-prior = -0.693\n"));
        assert!(!text.contains("performance:"));
    }

    #[test]
    fn test_file_prints_predictions() {
        let dir = TempDir::new().unwrap();
        let train = write_csv(dir.path(), "train.csv", "tag,content\nspam,buy now\nham,hello\n");
        let test = write_csv(dir.path(), "test.csv", "tag,content\nspam,buy\nham,hello there\n");

        let text = run_with(&[&train, &test]).unwrap();
        assert!(text.starts_with("trained on 2 examples\n\ntest data:\n"));
        assert!(text.contains("  correct = spam, predicted = spam, log-probability score = -0.693\n"));
        assert!(text.ends_with("performance: 2 / 2 posts predicted correctly\n"));
        assert!(!text.contains("training data:"));
    }

    #[test]
    fn custom_columns_and_precision() {
        let dir = TempDir::new().unwrap();
        let train = write_csv(dir.path(), "train.csv", "body,kind\nbuy now,spam\nhello,ham\n");
        let test = write_csv(dir.path(), "test.csv", "body,kind\nbuy,spam\n");

        let text = run_with(&[
            &train,
            &test,
            "--label-column",
            "kind",
            "--text-column",
            "body",
            "--precision",
            "5",
        ])
        .unwrap();
        assert!(text.contains("predicted = spam, log-probability score = -0.69315\n"));

        // The default columns do not exist in these files.
        let err = run_with(&[&train]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BayesError>(),
            Some(BayesError::MissingColumn { .. })
        ));
    }

    #[test]
    fn empty_training_file_fails_prediction() {
        let dir = TempDir::new().unwrap();
        let train = write_csv(dir.path(), "train.csv", "tag,content\n");
        let test = write_csv(dir.path(), "test.csv", "tag,content\na,x\n");

        let err = run_with(&[&train, &test]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BayesError>(),
            Some(BayesError::EmptyCorpus)
        ));
    }
}
