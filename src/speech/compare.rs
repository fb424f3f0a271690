//! Comparison of collected speech against expectations
//!
//! Runs strictly after collection and always reports both sequences in full.

use std::fmt;

use super::utterance::Utterance;

/// A collected sequence that differs from the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub actual: Vec<Utterance>,
    pub expected: Vec<Utterance>,
    /// Index of the first press whose speech differs (or the shorter length)
    pub first_difference: usize,
}

/// Compare collected speech with the expected sequence
pub fn compare(actual: &[Utterance], expected: &[Utterance]) -> Result<(), Mismatch> {
    if actual == expected {
        return Ok(());
    }

    let first_difference = actual
        .iter()
        .zip(expected)
        .position(|(a, e)| a != e)
        .unwrap_or_else(|| actual.len().min(expected.len()));

    Err(Mismatch {
        actual: actual.to_vec(),
        expected: expected.to_vec(),
        first_difference,
    })
}

fn quoted(items: &[Utterance]) -> String {
    let inner: Vec<String> = items.iter().map(|u| format!("{:?}", u.as_str())).collect();
    format!("[{}]", inner.join(", "))
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "speech differs from press {} ({} collected, {} expected)",
            self.first_difference + 1,
            self.actual.len(),
            self.expected.len()
        )?;
        writeln!(f, "  actual:   {}", quoted(&self.actual))?;
        writeln!(f, "  expected: {}", quoted(&self.expected))?;

        let rows = self.actual.len().max(self.expected.len());
        for i in 0..rows {
            let actual = self.actual.get(i).map(|u| format!("{:?}", u.as_str()));
            let expected = self.expected.get(i).map(|u| format!("{:?}", u.as_str()));
            let marker = if actual == expected { ' ' } else { '✗' };
            write!(
                f,
                "  {} {:>3}: {} | {}",
                marker,
                i + 1,
                actual.as_deref().unwrap_or("<missing>"),
                expected.as_deref().unwrap_or("<missing>")
            )?;
            if i + 1 < rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::utterance::utterances;

    #[test]
    fn test_equal_sequences() {
        let spoken = utterances(["Say", "(quietly)"]);
        assert!(compare(&spoken, &spoken.clone()).is_ok());
    }

    #[test]
    fn test_reports_first_difference() {
        let actual = utterances(["Say", "quietly", "Hello,"]);
        let expected = utterances(["Say", "(quietly)", "Hello,"]);

        let mismatch = compare(&actual, &expected).unwrap_err();

        assert_eq!(mismatch.first_difference, 1);
        assert_eq!(mismatch.actual, actual);
        assert_eq!(mismatch.expected, expected);
    }

    #[test]
    fn test_length_difference() {
        let actual = utterances(["S", "space"]);
        let expected = utterances(["S", "space", "left paren"]);

        let mismatch = compare(&actual, &expected).unwrap_err();
        assert_eq!(mismatch.first_difference, 2);

        let text = mismatch.to_string();
        assert!(text.contains("<missing>"));
        assert!(text.contains("2 collected, 3 expected"));
    }

    #[test]
    fn test_display_shows_both_sequences_in_full() {
        let actual = utterances(["Say", "(quietly)", "Hello", "Jim ."]);
        let expected = utterances(["Say", "(quietly)", "Hello,", "Jim ."]);

        let text = compare(&actual, &expected).unwrap_err().to_string();

        assert!(text.contains(r#"actual:   ["Say", "(quietly)", "Hello", "Jim ."]"#));
        assert!(text.contains(r#"expected: ["Say", "(quietly)", "Hello,", "Jim ."]"#));
        assert!(text.contains("from press 3"));
    }
}
