//! Fact rows and their wire encoding.

use smallvec::SmallVec;

/// One relational tuple: a predicate name plus ordered string fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub predicate: String,
    pub fields: SmallVec<[String; 4]>,
}

impl FactRow {
    pub fn new(predicate: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            predicate: predicate.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Encode fields as one tab-separated, newline-terminated record.
/// Embedded tabs and line breaks are replaced by spaces so a row always
/// occupies exactly one line of its output unit.
pub fn encode_fields(fields: &[&str]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push('\t');
        }
        for ch in field.chars() {
            match ch {
                '\t' | '\n' | '\r' => line.push(' '),
                c => line.push(c),
            }
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_single_line() {
        let line = encode_fields(&["a\tb", "c\nd"]);
        assert_eq!(line, "a b\tc d\n");
    }

    #[test]
    fn empty_fields_keep_arity() {
        assert_eq!(encode_fields(&["x", "", "z"]), "x\t\tz\n");
    }
}
