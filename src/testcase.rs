use crate::value::Int;

/// One variable slot of a raw test case: its label line and value line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawEntry<'a> {
    pub label: &'a str,
    pub value: Option<&'a str>,
}

/// Raw test-case text split into its header and `(label, value)` pairs.
///
/// Line 0 holds the variable count; variable `i` (1-based) occupies lines
/// `2i - 1` (label) and `2i` (value). Lines are split on `\n` only and are
/// not trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTestCase<'a> {
    pub header: &'a str,
    pub count: Int,
    entries: Vec<RawEntry<'a>>,
}

impl<'a> RawTestCase<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut lines = text.split('\n');
        let header = lines.next().unwrap_or_default();
        let rest: Vec<&'a str> = lines.collect();
        let entries = rest
            .chunks(2)
            .map(|pair| RawEntry {
                label: pair[0],
                value: pair.get(1).copied(),
            })
            .collect();

        RawTestCase {
            header,
            count: Int::parse_prefix(header),
            entries,
        }
    }

    /// Entry for zero-based variable position `index`.
    pub fn entry(&self, index: usize) -> Option<&RawEntry<'a>> {
        self.entries.get(index)
    }

    pub fn value(&self, index: usize) -> Option<&'a str> {
        self.entry(index).and_then(|entry| entry.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_follow_the_two_line_stride() {
        let raw = RawTestCase::parse("2\nA\n5\nB\n1 2 3\n");
        assert_eq!(raw.count, Int::new(2));
        assert_eq!(raw.value(0), Some("5"));
        assert_eq!(raw.value(1), Some("1 2 3"));
        assert_eq!(raw.entry(1).map(|e| e.label), Some("B"));
    }

    #[test]
    fn dangling_label_has_no_value() {
        let raw = RawTestCase::parse("1\nX");
        assert_eq!(
            raw.entry(0),
            Some(&RawEntry {
                label: "X",
                value: None
            })
        );
    }

    #[test]
    fn value_lines_are_not_trimmed() {
        let raw = RawTestCase::parse("1\r\nX\r\n  padded \r\n");
        assert_eq!(raw.header, "1\r");
        assert_eq!(raw.count, Int::new(1));
        assert_eq!(raw.value(0), Some("  padded \r"));
    }

    #[test]
    fn non_numeric_header_is_nan() {
        assert!(RawTestCase::parse("two\nA\n1").count.is_nan());
    }
}
