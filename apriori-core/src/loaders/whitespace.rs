use super::loader::TransactionLoader;
use crate::error::{AprioriError, AprioriResult};
use crate::types::{Item, Transaction};

/// Line-oriented loader: one transaction per line, items separated by any
/// whitespace. Blank lines become empty transactions and still count towards
/// the transaction total.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceLoader;

impl WhitespaceLoader {
    pub fn new() -> Self {
        Self
    }

    fn parse_line(line_number: usize, line: &str) -> AprioriResult<Transaction> {
        line.split_whitespace()
            .map(|token| {
                token.parse::<Item>().map_err(|_| AprioriError::Parse {
                    line: line_number,
                    token: token.to_string(),
                })
            })
            .collect::<AprioriResult<Vec<Item>>>()
            .map(Transaction::new)
    }
}

impl TransactionLoader for WhitespaceLoader {
    fn parse(&self, content: &str) -> AprioriResult<Vec<Transaction>> {
        content
            .lines()
            .enumerate()
            .map(|(index, line)| Self::parse_line(index + 1, line))
            .collect()
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_into_transactions() {
        let transactions = WhitespaceLoader::new().parse("1 2 3\n2\t4  4\n").unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].items(), &[1, 2, 3]);
        assert_eq!(transactions[1].items(), &[2, 4]);
    }

    #[test]
    fn blank_lines_are_empty_transactions() {
        let transactions = WhitespaceLoader::new().parse("1 2\n\n3\n").unwrap();
        assert_eq!(transactions.len(), 3);
        assert!(transactions[1].is_empty());
    }

    #[test]
    fn negative_items_are_allowed() {
        let transactions = WhitespaceLoader::new().parse("-1 7").unwrap();
        assert_eq!(transactions[0].items(), &[-1, 7]);
    }

    #[test]
    fn non_integer_token_reports_line_and_token() {
        let err = WhitespaceLoader::new().parse("1 2\n3 x 4\n").unwrap_err();
        match err {
            AprioriError::Parse { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_has_no_transactions() {
        assert!(WhitespaceLoader::new().parse("").unwrap().is_empty());
    }
}
