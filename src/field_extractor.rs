/// Tolerant field extraction for router log lines
///
/// A router line is a run of whitespace-separated `key=value` tokens in no
/// fixed order. The line is tokenized into a field map first, then
/// individual fields are parsed on demand; a missing or malformed field is
/// `None`, never an error, and never blocks extraction of the line's other
/// fields.
use memchr::memchr;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Mapping from field name to the raw token text after the `=`.
#[derive(Debug, Default)]
pub struct FieldMap<'a> {
    fields: FxHashMap<&'a str, &'a str>,
}

impl<'a> FieldMap<'a> {
    /// Tokenize a raw line. Tokens without `=` are skipped; for a duplicated
    /// name the first occurrence wins.
    pub fn parse(line: &'a str) -> Self {
        let mut fields = FxHashMap::default();
        for token in line.split_whitespace() {
            let Some(eq) = memchr(b'=', token.as_bytes()) else {
                continue;
            };
            let (name, value) = (&token[..eq], &token[eq + 1..]);
            if name.is_empty() {
                continue;
            }
            fields.entry(name).or_insert(value);
        }
        Self { fields }
    }

    /// Raw value for a field, if the line carried it.
    pub fn raw(&self, name: &str) -> Option<&'a str> {
        self.fields.get(name).copied()
    }

    /// String value with surrounding double quotes trimmed
    /// (`path="/api/users/3"` yields `/api/users/3`).
    pub fn string_field(&self, name: &str) -> Option<&'a str> {
        self.raw(name).map(|value| value.trim_matches('"'))
    }

    /// First contiguous digit run in the field value, parsed base-10
    /// (`dyno=web.7` yields 7, `connect=50ms` yields 50). A value with no
    /// digits yields `None`.
    pub fn int_field(&self, name: &str) -> Option<u64> {
        let value = self.raw(name)?;
        let run = DIGIT_RUN.find(value)?;
        run.as_str().parse().ok()
    }
}

/// Typed fields a router line can carry. Any of them may be absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractedFields {
    pub method: Option<String>,
    pub path: Option<String>,
    pub dyno_id: Option<u64>,
    pub connect_ms: Option<u64>,
    pub service_ms: Option<u64>,
}

impl ExtractedFields {
    pub fn from_line(line: &str) -> Self {
        let map = FieldMap::parse(line);
        Self {
            method: map.string_field("method").map(str::to_string),
            path: map.string_field("path").map(str::to_string),
            dyno_id: map.int_field("dyno"),
            connect_ms: map.int_field("connect"),
            service_ms: map.int_field("service"),
        }
    }

    /// Round-trip latency for the event. Present only when both halves were
    /// measured; a missing half means the sample is unmeasured, not zero.
    pub fn response_time_ms(&self) -> Option<u64> {
        match (self.connect_ms, self.service_ms) {
            (Some(connect), Some(service)) => Some(connect + service),
            _ => None,
        }
    }
}
