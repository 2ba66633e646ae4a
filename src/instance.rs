//! Instance file parsing.
//!
//! # QBF format
//!
//! A whitespace-separated token stream: the dimension `n`, then the upper
//! triangle of the coefficient matrix in row-major order, row `i` holding
//! the `n − i` values `A[i][i..n]`. Line breaks carry no meaning.
//!
//! ```text
//! 3
//! 1 2 3
//! 4 5
//! 6
//! ```
//!
//! # QBF-SC format
//!
//! Line-oriented:
//!
//! 1. the dimension `n`
//! 2. optionally, a header of set sizes, recognized when the line holds
//!    exactly `n` integers, each `<= n`; it is skipped
//! 3. `n` lines, one per variable, listing the 1-indexed universe elements
//!    that variable covers (a blank line is an empty set)
//! 4. `n` matrix rows in the QBF layout, one row per line
//!
//! Blank lines before the dimension and within the matrix are ignored.

use crate::error::InstanceError;
use crate::evaluator::{
    CoverageConstraint, Evaluator, QbfEvaluator, QbfInverse, SetCoverConstraint,
};
use std::path::Path;

/// Parses QBF text.
pub fn parse_qbf(text: &str) -> Result<QbfEvaluator, InstanceError> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));

    let n = match tokens.next() {
        Some((line, tok)) => parse_dimension(tok, line)?,
        None => return Err(format_error(1, "missing dimension")),
    };

    let mut rows = Vec::new();
    for i in 0..n {
        let mut row = Vec::new();
        for _ in i..n {
            match tokens.next() {
                Some((line, tok)) => row.push(parse_value(tok, line)?),
                None => {
                    return Err(InstanceError::DimensionMismatch {
                        row: i,
                        expected: n - i,
                        actual: row.len(),
                    })
                }
            }
        }
        rows.push(row);
    }

    if let Some((line, tok)) = tokens.next() {
        return Err(format_error(
            line,
            format!("unexpected token '{tok}' after the last matrix row"),
        ));
    }

    QbfEvaluator::from_upper_rows(rows)
}

/// Parses QBF-SC text and checks that every universe element is coverable.
pub fn parse_qbf_sc(text: &str) -> Result<SetCoverConstraint<QbfEvaluator>, InstanceError> {
    let end_line = text.lines().count() + 1;
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .skip_while(|(_, line)| line.is_empty())
        .peekable();

    let n = match lines.next() {
        Some((line_no, line)) => parse_dimension(line, line_no)?,
        None => return Err(format_error(1, "missing dimension")),
    };

    if let Some(&(_, line)) = lines.peek() {
        if is_size_header(line, n) {
            log::debug!("skipping set-size header");
            lines.next();
        }
    }

    let mut sets = Vec::new();
    for i in 0..n {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| format_error(end_line, format!("missing set definition for variable {i}")))?;
        let set = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<usize>().map_err(|_| {
                    format_error(line_no, format!("invalid element '{tok}' in set {i}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        sets.push(set);
    }

    let mut matrix_lines = lines.filter(|(_, line)| !line.is_empty());
    let mut rows = Vec::new();
    for i in 0..n {
        let (line_no, line) = matrix_lines
            .next()
            .ok_or_else(|| format_error(end_line, format!("missing matrix row {i}")))?;
        let row = line
            .split_whitespace()
            .map(|tok| parse_value(tok, line_no))
            .collect::<Result<Vec<_>, _>>()?;
        if row.len() != n - i {
            return Err(InstanceError::DimensionMismatch {
                row: i,
                expected: n - i,
                actual: row.len(),
            });
        }
        rows.push(row);
    }

    let constraint = SetCoverConstraint::new(QbfEvaluator::from_upper_rows(rows)?, sets)?;
    constraint.validate_instance()?;
    Ok(constraint)
}

/// Loads a QBF instance file.
pub fn load_qbf<P: AsRef<Path>>(path: P) -> Result<QbfEvaluator, InstanceError> {
    let qbf = parse_qbf(&read(path.as_ref())?)?;
    log::debug!("loaded QBF instance {} (n={})", path.as_ref().display(), qbf.domain_size());
    Ok(qbf)
}

/// Loads a QBF instance file with negated values, for minimization.
pub fn load_qbf_inverse<P: AsRef<Path>>(path: P) -> Result<QbfInverse, InstanceError> {
    load_qbf(path).map(QbfInverse::new)
}

/// Loads and validates a QBF-SC instance file.
///
/// # Errors
/// Any parse error, or [`InstanceError::InfeasibleInstance`] when some
/// universe element belongs to no set.
pub fn load_qbf_sc<P: AsRef<Path>>(
    path: P,
) -> Result<SetCoverConstraint<QbfEvaluator>, InstanceError> {
    let constraint = parse_qbf_sc(&read(path.as_ref())?)?;
    log::debug!(
        "loaded QBF-SC instance {} (n={})",
        path.as_ref().display(),
        constraint.universe_size()
    );
    Ok(constraint)
}

fn read(path: &Path) -> Result<String, InstanceError> {
    std::fs::read_to_string(path).map_err(|source| InstanceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn format_error(line: usize, message: impl Into<String>) -> InstanceError {
    InstanceError::Format {
        line,
        message: message.into(),
    }
}

fn parse_dimension(tok: &str, line: usize) -> Result<usize, InstanceError> {
    tok.trim()
        .parse()
        .map_err(|_| format_error(line, format!("invalid dimension '{}'", tok.trim())))
}

fn parse_value(tok: &str, line: usize) -> Result<f64, InstanceError> {
    tok.parse()
        .map_err(|_| format_error(line, format!("invalid coefficient '{tok}'")))
}

/// Heuristic for the optional set-size line: exactly `n` integers, all `<= n`.
fn is_size_header(line: &str, n: usize) -> bool {
    let values: Option<Vec<usize>> = line.split_whitespace().map(|t| t.parse().ok()).collect();
    matches!(values, Some(v) if v.len() == n && v.iter().all(|&s| s <= n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Solution;

    #[test]
    fn test_parse_qbf_worked_example() {
        let qbf = parse_qbf("3\n1 2 3\n4 5\n6\n").unwrap();
        assert_eq!(qbf.domain_size(), 3);
        assert_eq!(qbf.evaluate(&mut Solution::from_elements([0, 2])), 10.0);
    }

    #[test]
    fn test_parse_qbf_ignores_line_layout() {
        let a = parse_qbf("3 1 2 3 4 5 6").unwrap();
        let b = parse_qbf("3\n1 2\n3 4\n5 6").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_qbf_errors() {
        assert!(matches!(
            parse_qbf(""),
            Err(InstanceError::Format { line: 1, .. })
        ));
        assert!(matches!(
            parse_qbf("x\n1"),
            Err(InstanceError::Format { line: 1, .. })
        ));
        assert!(matches!(
            parse_qbf("3\n1 2 3\n4"),
            Err(InstanceError::DimensionMismatch {
                row: 1,
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            parse_qbf("2\n1 2\nfoo"),
            Err(InstanceError::Format { line: 3, .. })
        ));
        assert!(matches!(
            parse_qbf("1\n1\n2"),
            Err(InstanceError::Format { line: 3, .. })
        ));
    }

    const SC_WITH_HEADER: &str = "3\n2 2 2\n1 2\n2 3\n1 3\n1 2 3\n4 5\n6\n";
    const SC_WITHOUT_HEADER: &str = "3\n1 2\n2 3\n1 3\n1 2 3\n4 5\n6\n";

    #[test]
    fn test_parse_qbf_sc_header_detection() {
        let a = parse_qbf_sc(SC_WITH_HEADER).unwrap();
        let b = parse_qbf_sc(SC_WITHOUT_HEADER).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.sets(), &[vec![1, 2], vec![2, 3], vec![1, 3]]);
        assert_eq!(a.evaluate(&mut Solution::from_elements([0, 2])), 10.0);
    }

    #[test]
    fn test_parse_qbf_sc_empty_set_line() {
        let text = "3\n1 2 3\n\n3\n1 2 3\n4 5\n6\n";
        // "1 2 3" looks like a header, so the sets shift down by one line
        let err = parse_qbf_sc(text).unwrap_err();
        assert!(
            matches!(err, InstanceError::DimensionMismatch { row: 0, .. }),
            "{err}"
        );

        let text = "3\n1 2\n\n3\n1 2 3\n4 5\n6\n";
        let sc = parse_qbf_sc(text).unwrap();
        assert!(sc.sets()[1].is_empty());
    }

    #[test]
    fn test_parse_qbf_sc_errors() {
        assert!(matches!(
            parse_qbf_sc("3\n1 2\n2 3\n1 4\n1 2 3\n4 5\n6\n"),
            Err(InstanceError::InvalidElement {
                set: 2,
                element: 4,
                universe: 3
            })
        ));
        assert!(matches!(
            parse_qbf_sc("3\n1 2\n2 3\n1 3\n1 2 3\n4 5 9\n6\n"),
            Err(InstanceError::DimensionMismatch {
                row: 1,
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            parse_qbf_sc("3\n1 2\n2 3\n1 3\n1 2 3\n"),
            Err(InstanceError::Format { .. })
        ));
        assert!(matches!(
            parse_qbf_sc("3\n1\n1\n2\n1 2 3\n4 5\n6\n"),
            Err(InstanceError::InfeasibleInstance { .. })
        ));
        assert!(matches!(
            parse_qbf_sc("three\n"),
            Err(InstanceError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_oversized_dimension_is_a_load_error() {
        let huge = u64::MAX.to_string();

        let err = parse_qbf(&format!("{huge}\n1 2 3\n")).unwrap_err();
        assert!(matches!(
            err,
            InstanceError::DimensionMismatch { row: 0, actual: 3, .. }
        ));

        let err = parse_qbf_sc(&format!("{huge}\n1 2 3\n")).unwrap_err();
        assert!(matches!(err, InstanceError::Format { line: 3, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_qbf("/nonexistent/instance.txt").unwrap_err();
        assert!(matches!(err, InstanceError::Io { .. }));
    }
}
