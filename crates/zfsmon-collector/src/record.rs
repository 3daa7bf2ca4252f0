//! The positional property parser.

use zfsmon_common::diag::DiagnosticSink;
use zfsmon_common::size::parse_size;
use zfsmon_common::types::{PropertyRecord, PropertyValue};

/// Parses one tab-separated listing line into a [`PropertyRecord`],
/// zipping tokens against `fields` positionally.
///
/// Fields past the end of the line are omitted from the record and
/// reported through `diag` as a single error naming all of them; extra
/// tokens past the end of the schema are ignored. Every field named in
/// `size_fields` is then converted to a byte count; a value that fails
/// conversion keeps its raw text and is reported as a warning.
///
/// Neither condition aborts the parse: a tab-delimited line always
/// yields a record.
pub fn parse_record(
    line: &str,
    fields: &[&str],
    size_fields: &[&str],
    diag: &dyn DiagnosticSink,
) -> PropertyRecord {
    let tokens: Vec<&str> = line.split('\t').collect();
    let mut record = PropertyRecord::new();

    for (position, field) in fields.iter().enumerate() {
        match tokens.get(position) {
            Some(token) => record.insert(field, PropertyValue::Text((*token).to_string())),
            None => {
                // Expected to happen only when the listing tool's output
                // narrows, e.g. after an executable update.
                diag.error(&format!(
                    "listing returned {} columns where {} were expected; \
                     the fields [{}] will not be included in the output",
                    tokens.len(),
                    fields.len(),
                    fields[position..].join(", ")
                ));
                break;
            }
        }
    }

    for field in size_fields {
        let raw = match record.get(field).and_then(PropertyValue::as_text) {
            Some(text) => text.to_string(),
            None => continue,
        };
        match parse_size(&raw) {
            Ok(bytes) => record.insert(field, PropertyValue::Bytes(bytes)),
            Err(_) => diag.warning(&format!(
                "{field} -> {raw:?} could not be parsed as a size in bytes"
            )),
        }
    }

    record
}
