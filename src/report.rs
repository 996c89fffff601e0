//! Plain-text reports for a trained corpus and for an evaluation run.

use std::io::{self, Write};

use crate::corpus::Corpus;
use crate::predictor::Evaluation;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub label: String,
    pub documents: usize,
    pub log_prior: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSummary {
    pub documents: usize,
    pub vocabulary: usize,
    pub classes: Vec<ClassSummary>,
}

impl CorpusSummary {
    pub fn of(corpus: &Corpus) -> Self {
        CorpusSummary {
            documents: corpus.len(),
            vocabulary: corpus.vocabulary().len(),
            classes: corpus
                .classes()
                .map(|class| ClassSummary {
                    label: class.label().to_string(),
                    documents: class.len(),
                    log_prior: class.log_prior(),
                })
                .collect(),
        }
    }
}

/// Writes the training documents, the class priors and every cached
/// per-class word log-likelihood.
pub fn write_training_report<W: Write>(
    out: &mut W,
    corpus: &Corpus,
    precision: usize,
) -> io::Result<()> {
    let summary = CorpusSummary::of(corpus);

    writeln!(out, "training data:")?;
    for doc in corpus.documents() {
        writeln!(out, "  label = {}, content = {}", doc.label(), doc.text())?;
    }
    writeln!(out, "trained on {} examples", summary.documents)?;
    writeln!(out, "vocabulary size = {}", summary.vocabulary)?;
    writeln!(out)?;

    writeln!(out, "classes:")?;
    for class in &summary.classes {
        writeln!(
            out,
            "  {}, {} examples, log-prior = {}",
            class.label,
            class.documents,
            format_significant(class.log_prior, precision)
        )?;
    }

    writeln!(out, "classifier parameters:")?;
    for class in corpus.classes() {
        for word in class.words() {
            let likelihood = class
                .cached_log_likelihood(word)
                .expect("training words are warmed when the corpus is built");
            writeln!(
                out,
                "  {}:{}, count = {}, log-likelihood = {}",
                class.label(),
                word,
                class.count_docs_containing(corpus.documents(), word),
                format_significant(likelihood, precision)
            )?;
        }
    }
    writeln!(out)
}

pub fn write_evaluation_report<W: Write>(
    out: &mut W,
    corpus: &Corpus,
    evaluation: &Evaluation,
    precision: usize,
) -> io::Result<()> {
    writeln!(out, "trained on {} examples", corpus.len())?;
    writeln!(out)?;

    writeln!(out, "test data:")?;
    for result in &evaluation.results {
        writeln!(
            out,
            "  correct = {}, predicted = {}, log-probability score = {}",
            result.document.label(),
            result.predicted,
            format_significant(result.score, precision)
        )?;
        writeln!(out, "  content = {}", result.document.text())?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "performance: {} / {} posts predicted correctly",
        evaluation.correct,
        evaluation.total()
    )
}

/// Formats `value` with `digits` significant digits, `%g` style: trailing
/// zeros are dropped and very small or large magnitudes use an exponent.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    let digits = digits.max(1);

    // The notation depends on the exponent after rounding to `digits`.
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return scientific,
        },
        None => return scientific,
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs());
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_zeros(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::predictor::Predictor;

    #[test]
    fn significant_digits() {
        assert_eq!(format_significant((2.0f64 / 3.0).ln(), 3), "-0.405");
        assert_eq!(format_significant((1.0f64 / 3.0).ln(), 3), "-1.1");
        assert_eq!(format_significant(-13.815510557964274, 3), "-13.8");
        assert_eq!(format_significant(0.0, 3), "0");
        assert_eq!(format_significant(-2.0, 3), "-2");
        assert_eq!(format_significant(-12345.0, 3), "-1.23e+04");
        assert_eq!(format_significant(0.00001234, 3), "1.23e-05");
        assert_eq!(format_significant(-0.693147, 5), "-0.69315");
    }

    #[test]
    fn notation_follows_the_rounded_exponent() {
        assert_eq!(format_significant(-999.7, 3), "-1e+03");
        assert_eq!(format_significant(-999.4, 3), "-999");
        assert_eq!(format_significant(0.000099996, 3), "0.0001");
        assert_eq!(format_significant(-9.996, 3), "-10");
    }

    #[test]
    fn summary_lists_classes_in_label_order() {
        let corpus = Corpus::train(vec![
            Document::new("b", "z"),
            Document::new("a", "x y"),
            Document::new("a", "x y"),
        ]);
        let summary = CorpusSummary::of(&corpus);

        assert_eq!(summary.documents, 3);
        assert_eq!(summary.vocabulary, 3);
        let labels: Vec<&str> = summary.classes.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
        let total: f64 = summary.classes.iter().map(|c| c.log_prior.exp()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn training_report() {
        let corpus = Corpus::train(vec![
            Document::new("a", "x y"),
            Document::new("a", "x y"),
            Document::new("b", "z"),
        ]);
        let mut out = Vec::new();
        write_training_report(&mut out, &corpus, 3).unwrap();

        let expected = "\
training data:
  label = a, content = x y
  label = a, content = x y
  label = b, content = z
trained on 3 examples
vocabulary size = 3

classes:
  a, 2 examples, log-prior = -0.405
  b, 1 examples, log-prior = -1.1
classifier parameters:
  a:x, count = 2, log-likelihood = 0
  a:y, count = 2, log-likelihood = 0
  b:z, count = 1, log-likelihood = 0

";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn every_class_word_has_a_finite_likelihood() {
        let corpus = Corpus::train(vec![
            Document::new("a", "x y shared"),
            Document::new("b", "shared z"),
            Document::new("c", "w"),
        ]);
        let mut out = Vec::new();
        write_training_report(&mut out, &corpus, 3).unwrap();
        let text = String::from_utf8(out).unwrap();

        let likelihoods: Vec<f64> = text
            .lines()
            .filter_map(|line| line.split_once("log-likelihood = "))
            .map(|(_, value)| value.parse().unwrap())
            .collect();
        assert_eq!(likelihoods.len(), 6);
        assert!(likelihoods.iter().all(|l| l.is_finite() && *l <= 0.0));
    }

    #[test]
    fn evaluation_report() {
        let mut corpus = Corpus::train(vec![
            Document::new("spam", "buy now"),
            Document::new("ham", "hello friend"),
        ]);
        let evaluation = Predictor::new(&mut corpus)
            .evaluate(vec![Document::new("spam", "buy")])
            .unwrap();
        let mut out = Vec::new();
        write_evaluation_report(&mut out, &corpus, &evaluation, 3).unwrap();

        let expected = "\
trained on 2 examples

test data:
  correct = spam, predicted = spam, log-probability score = -0.693
  content = buy

performance: 1 / 1 posts predicted correctly
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
