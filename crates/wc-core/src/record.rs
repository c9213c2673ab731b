//! Comma-delimited records.
//!
//! One record per line. A field that contains a comma, a double quote, or a
//! line break is wrapped in double quotes with inner quotes doubled, so any
//! string survives an encode/decode cycle byte for byte. Blank lines are
//! ignored on decode.

use std::fmt;

use crate::error::DecodeError;

/// An ordered list of text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a record from its fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// All fields, in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the leading fields equal `key`, one by one.
    pub fn starts_with(&self, key: &[&str]) -> bool {
        key.len() <= self.fields.len() && key.iter().zip(&self.fields).all(|(k, f)| *k == f)
    }

    /// Consume the record, returning its fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl<T: Into<String>> FromIterator<T> for Record {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A lone empty field must stay visible, otherwise it reads back as a blank line.
        if self.fields.len() == 1 && self.fields[0].is_empty() {
            return f.write_str("\"\"");
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write_field(f, field)?;
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    if field.contains([',', '"', '\r', '\n']) {
        write!(f, "\"{}\"", field.replace('"', "\"\""))
    } else {
        f.write_str(field)
    }
}

/// Encode records as delimited text, one line per record.
pub fn encode(records: &[Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

/// Decode delimited text into records.
///
/// Accepts `\n` and `\r\n` line endings and quoted fields that span lines.
/// A quote that appears inside an unquoted field is kept literally. The
/// only hard failure is a quoted field that never closes.
pub fn decode(text: &str) -> Result<Vec<Record>, DecodeError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_record(&mut records, &mut fields, &mut field, quoted);
                quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DecodeError {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    finish_record(&mut records, &mut fields, &mut field, quoted);
    Ok(records)
}

fn finish_record(
    records: &mut Vec<Record>,
    fields: &mut Vec<String>,
    field: &mut String,
    quoted: bool,
) {
    let blank = fields.is_empty() && field.is_empty() && !quoted;
    if blank {
        return;
    }
    fields.push(std::mem::take(field));
    records.push(Record::new(std::mem::take(fields)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(fields: &[&str]) -> Record {
        fields.iter().copied().collect()
    }

    #[test]
    fn decode_plain_lines() {
        let records = decode("Utah,Beehive State\nOhio,Buckeye State\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], rec(&["Utah", "Beehive State"]));
        assert_eq!(records[1].get(1), Some("Buckeye State"));
    }

    #[test]
    fn decode_skips_blank_lines_and_crlf() {
        let records = decode("a,b\r\n\r\n\nc,d").unwrap();
        assert_eq!(records, vec![rec(&["a", "b"]), rec(&["c", "d"])]);
    }

    #[test]
    fn decode_quoted_field_with_comma_and_newline() {
        let records = decode("Paris,\"Capital, of France\nsince 987\"\nRome,x\n").unwrap();
        assert_eq!(records[0].get(1), Some("Capital, of France\nsince 987"));
        assert_eq!(records[1], rec(&["Rome", "x"]));
    }

    #[test]
    fn decode_doubled_quotes() {
        let records = decode("\"say \"\"hi\"\"\",2").unwrap();
        assert_eq!(records[0], rec(&["say \"hi\"", "2"]));
    }

    #[test]
    fn stray_quote_in_unquoted_field_is_literal() {
        let records = decode("it\"s,fine").unwrap();
        assert_eq!(records[0], rec(&["it\"s", "fine"]));
    }

    #[test]
    fn unterminated_quote_reports_line() {
        let err = decode("a,b\nc,\"open\nstill open").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("unterminated"));
    }

    #[test]
    fn trailing_empty_fields_are_kept() {
        let records = decode("a,,\n").unwrap();
        assert_eq!(records[0], rec(&["a", "", ""]));
    }

    #[test]
    fn lone_empty_field_survives() {
        let records = vec![rec(&[""])];
        assert_eq!(decode(&encode(&records)).unwrap(), records);
    }

    #[test]
    fn starts_with_matches_leading_fields() {
        let r = rec(&["alice", "1", "40"]);
        assert!(r.starts_with(&["alice"]));
        assert!(r.starts_with(&["alice", "1"]));
        assert!(!r.starts_with(&["alice", "2"]));
        assert!(!r.starts_with(&["alice", "1", "40", "extra"]));
        assert!(r.starts_with(&[]));
    }

    #[test]
    fn display_quotes_only_when_needed() {
        assert_eq!(rec(&["a b", "c,d", "e\"f"]).to_string(), "a b,\"c,d\",\"e\"\"f\"");
    }

    proptest! {
        #[test]
        fn any_fields_survive_encoding(fields in prop::collection::vec(".*", 1..5)) {
            let record = Record::new(fields);
            let decoded = decode(&encode(std::slice::from_ref(&record))).unwrap();
            prop_assert_eq!(decoded, vec![record]);
        }
    }
}
