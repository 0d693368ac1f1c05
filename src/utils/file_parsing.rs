use crate::core::attributes::{AttributeKind, DatasetInfo};
use crate::core::dataset::Dataset;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected {expected} fields, found {got}")]
    RaggedRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: '{token}' is not a class label")]
    InvalidLabel { line: usize, token: String },

    #[error("line {line}, column {column}: '{token}' is not a finite number")]
    NonFiniteValue {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("{rows} rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("no data rows")]
    Empty,
}

#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits a CSV line on commas that are not inside single or double quotes.
/// Quotes are kept; fields are trimmed.
pub fn split_csv_preserving_quotes(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None => {
                if ch == '"' || ch == '\'' {
                    in_quotes = Some(ch);
                    cur.push(ch);
                } else if ch == ',' {
                    out.push(cur.trim().to_string());
                    cur.clear();
                } else {
                    cur.push(ch);
                }
            }
        }
    }
    if !cur.is_empty() {
        out.push(cur.trim().to_string());
    }
    out
}

/// Non-blank lines with their 1-based line numbers.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_label(token: &str, line: usize) -> Result<usize, LoadError> {
    let token = strip_surrounding_quotes(token.trim());
    token.parse::<usize>().map_err(|_| LoadError::InvalidLabel {
        line,
        token: token.to_string(),
    })
}

/// Parses comma-separated feature rows.
///
/// A column in which any token is not a number becomes categorical: each
/// distinct token gets the next dense code in order of first appearance.
pub fn parse_features(text: &str) -> Result<(DatasetInfo, Vec<Vec<f64>>), LoadError> {
    parse_feature_lines(data_lines(text))
}

fn parse_feature_lines<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
) -> Result<(DatasetInfo, Vec<Vec<f64>>), LoadError> {
    let mut line_numbers = Vec::new();
    let mut tokens: Vec<Vec<String>> = Vec::new();
    let mut expected = None;
    for (line, content) in lines {
        let fields: Vec<String> = split_csv_preserving_quotes(content)
            .iter()
            .map(|f| strip_surrounding_quotes(f).to_string())
            .collect();
        let width = *expected.get_or_insert(fields.len());
        if fields.len() != width {
            return Err(LoadError::RaggedRow {
                line,
                expected: width,
                got: fields.len(),
            });
        }
        line_numbers.push(line);
        tokens.push(fields);
    }
    let Some(width) = expected.filter(|&width| width > 0) else {
        return Err(LoadError::Empty);
    };

    let mut kinds = Vec::with_capacity(width);
    let mut columns: Vec<Option<HashMap<&str, usize>>> = Vec::with_capacity(width);
    for col in 0..width {
        let numeric = tokens.iter().all(|row| row[col].parse::<f64>().is_ok());
        if numeric {
            // `nan` and `inf` parse as numbers but cannot be learned from.
            let non_finite = tokens
                .iter()
                .position(|row| !row[col].parse::<f64>().is_ok_and(f64::is_finite));
            if let Some(index) = non_finite {
                return Err(LoadError::NonFiniteValue {
                    line: line_numbers[index],
                    column: col + 1,
                    token: tokens[index][col].clone(),
                });
            }
            kinds.push(AttributeKind::Numeric);
            columns.push(None);
            continue;
        }
        let mut mapping: HashMap<&str, usize> = HashMap::new();
        for row in &tokens {
            let next = mapping.len();
            mapping.entry(row[col].as_str()).or_insert(next);
        }
        kinds.push(AttributeKind::Categorical {
            arity: mapping.len(),
        });
        columns.push(Some(mapping));
    }

    let rows = tokens
        .iter()
        .map(|row| {
            row.iter()
                .zip(&columns)
                .map(|(token, mapping)| match mapping {
                    Some(mapping) => mapping.get(token.as_str()).map_or(0.0, |&c| c as f64),
                    None => token.parse::<f64>().unwrap_or(f64::NAN),
                })
                .collect()
        })
        .collect();
    Ok((DatasetInfo::new(kinds), rows))
}

/// One non-negative integer label per non-blank line.
pub fn parse_labels(text: &str) -> Result<Vec<usize>, LoadError> {
    data_lines(text)
        .map(|(line, content)| parse_label(content, line))
        .collect()
}

pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<usize>, LoadError> {
    parse_labels(&fs::read_to_string(path)?)
}

/// Loads a feature file and its labels. Without a labels file the last
/// column of every row is taken as the label.
pub fn load_dataset(
    features_path: impl AsRef<Path>,
    labels_path: Option<&Path>,
) -> Result<Dataset, LoadError> {
    let text = fs::read_to_string(features_path)?;
    match labels_path {
        Some(labels_path) => {
            let (info, rows) = parse_features(&text)?;
            let labels = load_labels(labels_path)?;
            if rows.len() != labels.len() {
                return Err(LoadError::LengthMismatch {
                    rows: rows.len(),
                    labels: labels.len(),
                });
            }
            Ok(Dataset::new(info, rows, labels))
        }
        None => {
            let mut features = Vec::new();
            let mut labels = Vec::new();
            for (line, content) in data_lines(&text) {
                let (head, last) = content.rsplit_once(',').unwrap_or(("", content));
                labels.push(parse_label(last, line)?);
                features.push((line, head));
            }
            let (info, rows) = parse_feature_lines(features.into_iter())?;
            Ok(Dataset::new(info, rows, labels))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn strip_quotes_works() {
        assert_eq!(strip_surrounding_quotes("'a,b'"), "a,b");
        assert_eq!(strip_surrounding_quotes(r#""x""#), "x");
        assert_eq!(strip_surrounding_quotes("nq"), "nq");
    }

    #[test]
    fn split_preserving_quotes() {
        let line = r#"'sunny',85,"85",FALSE,no"#;
        let p = split_csv_preserving_quotes(line);
        assert_eq!(p, vec!["'sunny'", "85", "\"85\"", "FALSE", "no"]);
    }

    #[test]
    fn categorical_columns_get_dense_codes() {
        let (info, rows) = parse_features("sunny,85\nrainy,70.5\n\n'sunny',64\novercast,72\n").unwrap();
        assert_eq!(info.kinds()[0], AttributeKind::Categorical { arity: 3 });
        assert_eq!(info.kinds()[1], AttributeKind::Numeric);
        assert_eq!(info.num_mappings(0), 3);
        assert_eq!(info.num_mappings(1), 0);
        let codes: Vec<f64> = rows.iter().map(|r| r[0]).collect();
        assert_eq!(codes, vec![0.0, 1.0, 0.0, 2.0]);
        assert_eq!(rows[1][1], 70.5);
    }

    #[test]
    fn mixed_column_is_categorical() {
        let (info, rows) = parse_features("1\nx\n1\n").unwrap();
        assert_eq!(info.kinds()[0], AttributeKind::Categorical { arity: 2 });
        assert_eq!(rows, vec![vec![0.0], vec![1.0], vec![0.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_features("1,2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::RaggedRow {
                line: 2,
                expected: 2,
                got: 1
            }
        ));
        assert!(matches!(parse_features("\n\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn non_finite_numbers_are_rejected_with_their_line() {
        let err = parse_features("1.0,a\n\n2.5,b\nnan,c\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::NonFiniteValue { line: 4, column: 1, ref token } if token == "nan"
        ));
        assert!(matches!(
            parse_features("x,-inf\n"),
            Err(LoadError::NonFiniteValue { line: 1, column: 2, .. })
        ));
    }

    #[test]
    fn labels_are_non_negative_integers() {
        assert_eq!(parse_labels("0\n2\n\n1\n").unwrap(), vec![0, 2, 1]);
        assert!(matches!(
            parse_labels("0\n-1\n"),
            Err(LoadError::InvalidLabel { line: 2, .. })
        ));
    }

    #[test]
    fn loads_features_with_separate_labels() {
        let mut features = NamedTempFile::new().unwrap();
        writeln!(features, "1.0,a\n2.0,b\n3.0,a").unwrap();
        let mut labels = NamedTempFile::new().unwrap();
        writeln!(labels, "0\n1\n0").unwrap();

        let ds = load_dataset(features.path(), Some(labels.path())).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.labels(), &[0, 1, 0]);
        assert_eq!(ds.info().kinds()[1], AttributeKind::Categorical { arity: 2 });

        let mut short = NamedTempFile::new().unwrap();
        writeln!(short, "0").unwrap();
        assert!(matches!(
            load_dataset(features.path(), Some(short.path())),
            Err(LoadError::LengthMismatch { rows: 3, labels: 1 })
        ));
    }

    #[test]
    fn last_column_is_label_without_labels_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.5,x,1\n1.5,y,0").unwrap();
        let ds = load_dataset(file.path(), None).unwrap();
        assert_eq!(ds.labels(), &[1, 0]);
        assert_eq!(ds.info().dimensionality(), 2);
        assert_eq!(ds.rows()[1], vec![1.5, 1.0]);

        let mut infinite = NamedTempFile::new().unwrap();
        writeln!(infinite, "0.5,1\n\ninf,0").unwrap();
        assert!(matches!(
            load_dataset(infinite.path(), None),
            Err(LoadError::NonFiniteValue { line: 3, column: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_dataset("/definitely/not/here.csv", None),
            Err(LoadError::Io(_))
        ));
    }
}
