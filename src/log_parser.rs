/// Orchestrates one pass over a router log. Each line is extracted and
/// classified into a category bucket; the report is built once the input
/// is exhausted.
use crate::aggregator::CategoryAggregator;
use crate::error::AnalyzerError;
use crate::event_classifier::classify;
use crate::field_extractor::ExtractedFields;
use crate::report::Report;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Reading,
    Reporting,
    Done,
}

#[derive(Debug, Default)]
pub struct LogParser {
    aggregator: CategoryAggregator,
    state: RunState,
    lines_processed: u64,
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    /// Parse the log at `path` and produce the end-of-run report.
    ///
    /// Fails fast with `SourceNotFound` before reading anything when the
    /// path does not point at an existing file; no partial report is
    /// produced. A malformed line never aborts the run.
    pub fn run(&mut self, path: &Path) -> Result<Report, AnalyzerError> {
        if !path.is_file() {
            return Err(AnalyzerError::SourceNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        info!(path = %path.display(), "parsing router log");
        self.consume(BufReader::new(file))
    }

    /// Drive the pipeline over any buffered line source. Exposed for tests
    /// and for callers that already hold a reader.
    pub fn consume<R: Read>(&mut self, reader: BufReader<R>) -> Result<Report, AnalyzerError> {
        self.transition(RunState::Reading);
        for line in reader.lines() {
            let line = line?;
            self.process_line(&line);
        }

        self.transition(RunState::Reporting);
        info!(lines = self.lines_processed, "input exhausted, building report");
        let report = Report::build(&self.aggregator);

        self.transition(RunState::Done);
        Ok(report)
    }

    /// One line: extract whatever fields it yields (possibly none),
    /// classify, accumulate. Lines with unrecoverable method/path land in
    /// the catch-all category and still count.
    fn process_line(&mut self, line: &str) {
        let fields = ExtractedFields::from_line(line);
        let key = classify(fields.method.as_deref(), fields.path.as_deref());
        debug!(category = ?key, line, "classified");
        self.aggregator
            .record(key, fields.response_time_ms(), fields.dyno_id);
        self.lines_processed += 1;
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_classifier::CategoryKey;
    use std::io::Cursor;

    fn parse(input: &str) -> (LogParser, Report) {
        let mut parser = LogParser::new();
        let report = parser
            .consume(BufReader::new(Cursor::new(input.to_string())))
            .unwrap();
        (parser, report)
    }

    #[test]
    fn test_source_not_found_fails_fast() {
        let mut parser = LogParser::new();
        let err = parser.run(Path::new("/definitely/not/here.log")).unwrap_err();
        assert!(matches!(err, AnalyzerError::SourceNotFound(_)));
        // no partial report: the run never left Idle
        assert_eq!(parser.state(), RunState::Idle);
    }

    #[test]
    fn test_run_reaches_done() {
        let (parser, _) = parse("method=GET path=/api/users/1 dyno=1 connect=1 service=1\n");
        assert_eq!(parser.state(), RunState::Done);
        assert_eq!(parser.lines_processed(), 1);
    }

    #[test]
    fn test_malformed_lines_count_as_other() {
        let (parser, report) = parse("complete garbage\n\u{7f}\u{7f}\n");
        assert_eq!(parser.lines_processed(), 2);
        let other = report
            .categories
            .iter()
            .find(|c| c.category == CategoryKey::Other)
            .unwrap();
        assert_eq!(other.request_count, 2);
    }

    #[test]
    fn test_every_line_lands_in_exactly_one_bucket() {
        let input = "method=GET path=/api/users/1/get_messages dyno=3 connect=10 service=5\n\
                     method=POST path=/api/users/1 dyno=3 connect=20 service=10\n\
                     method=GET path=/api/unknown dyno=4 connect=5 service=5\n\
                     nonsense line\n";
        let (parser, report) = parse(input);

        let sum: u64 = report.categories.iter().map(|c| c.request_count).sum();
        assert_eq!(sum, parser.lines_processed());
        assert_eq!(sum, 4);
    }
}
