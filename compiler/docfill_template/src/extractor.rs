//! Placeholder extraction over text runs.
//!
//! Documents arrive as runs: consecutive pieces of text that a document
//! model stores separately (one per formatting change). A placeholder may
//! straddle runs (`{cust` + `omer}`), so the runs are matched as one logical
//! string and every match is mapped back to run coordinates.
//!
//! Delimiters must pair up: an end delimiter with no open placeholder, a
//! start delimiter inside an open one, or a start that is never closed is an
//! `UnterminatedPlaceholder` error. Quotes are not special.

use memchr::memmem;

use docfill_diagnostic::errors::{nested_placeholder, stray_end_delimiter, unterminated_placeholder};
use docfill_diagnostic::Result;
use docfill_ir::Span;

use crate::options::Delimiters;

/// A location inside one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunPosition {
    pub run: usize,
    /// Byte offset inside the run.
    pub offset: usize,
}

/// One placeholder found by the extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Position of the first byte of the start delimiter.
    pub start: RunPosition,
    /// Position just past the end delimiter. When the placeholder ends
    /// exactly at the end of a run, this is that run's length.
    pub end: RunPosition,
    /// The whole placeholder, delimiters included, in concatenated-run
    /// coordinates.
    pub span: Span,
    /// Text between the delimiters, joined across runs.
    pub expression: String,
}

/// Finds placeholders delimited by a fixed start/end pair.
#[derive(Clone, Debug)]
pub struct Extractor {
    delimiters: Delimiters,
}

impl Extractor {
    pub fn new(delimiters: Delimiters) -> Self {
        Extractor { delimiters }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Lazily match placeholders across `runs`.
    pub fn matches<S: AsRef<str>>(&self, runs: &[S]) -> Matches<'_> {
        let mut text = String::new();
        let mut starts = Vec::with_capacity(runs.len());
        let mut lengths = Vec::with_capacity(runs.len());
        for run in runs {
            let run = run.as_ref();
            starts.push(text.len());
            lengths.push(run.len());
            text.push_str(run);
        }
        Matches {
            delimiters: &self.delimiters,
            text,
            starts,
            lengths,
            pos: 0,
            done: false,
        }
    }

    /// Match a single string (one run).
    pub fn matches_in(&self, text: &str) -> Matches<'_> {
        self.matches(&[text])
    }
}

/// Iterator over the placeholders of a set of runs. Fused after the first
/// error.
pub struct Matches<'d> {
    delimiters: &'d Delimiters,
    text: String,
    starts: Vec<usize>,
    lengths: Vec<usize>,
    pos: usize,
    done: bool,
}

impl Matches<'_> {
    /// The runs joined into one string.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        let haystack = self.text.get(from..)?;
        memmem::find(haystack.as_bytes(), needle.as_bytes()).map(|i| from + i)
    }

    /// Run containing byte `offset` of the joined text.
    fn locate(&self, offset: usize) -> RunPosition {
        // Empty runs share their start with the next run; skip past them.
        let run = self.starts.partition_point(|&start| start <= offset).saturating_sub(1);
        let start = self.starts.get(run).copied().unwrap_or(0);
        RunPosition {
            run,
            offset: offset - start,
        }
    }

    /// Position just past byte `offset - 1`, kept in the run of that byte.
    fn locate_end(&self, offset: usize) -> RunPosition {
        let last = self.locate(offset.saturating_sub(1));
        RunPosition {
            run: last.run,
            offset: (last.offset + 1).min(self.lengths.get(last.run).copied().unwrap_or(0)),
        }
    }

    fn next_match(&mut self) -> Result<Option<Match>> {
        let delimiters = self.delimiters;
        let (start, end) = (delimiters.start.as_str(), delimiters.end.as_str());
        let distinct = start != end;

        let open = self.find_from(start, self.pos);
        if distinct {
            if let Some(close) = self.find_from(end, self.pos) {
                if open.map_or(true, |open| close < open) {
                    return Err(stray_end_delimiter(end, span_of(close, end.len())));
                }
            }
        }
        let Some(open) = open else {
            return Ok(None);
        };

        let body_start = open + start.len();
        let Some(close) = self.find_from(end, body_start) else {
            return Err(unterminated_placeholder(end, span_of(open, start.len())));
        };
        if distinct {
            if let Some(nested) = self.find_from(start, body_start).filter(|&n| n < close) {
                return Err(nested_placeholder(start, span_of(nested, start.len())));
            }
        }

        let stop = close + end.len();
        self.pos = stop;
        Ok(Some(Match {
            start: self.locate(open),
            end: self.locate_end(stop),
            span: Span::from_range(open..stop),
            expression: self.text[body_start..close].to_string(),
        }))
    }
}

fn span_of(offset: usize, len: usize) -> Span {
    Span::from_range(offset..offset + len)
}

impl Iterator for Matches<'_> {
    type Item = Result<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_match() {
            Ok(Some(found)) => Some(Ok(found)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err.with_expression(self.text.clone())))
            }
        }
    }
}

impl std::iter::FusedIterator for Matches<'_> {}

/// Rewrite `runs`, replacing each matched placeholder with its text.
///
/// A replacement goes into the run where its placeholder starts; the part
/// of the placeholder that spilled into later runs is removed from them.
/// Runs are never added or removed, so per-run formatting stays aligned.
/// `replacements` must come from matching these runs, in match order.
pub fn splice_runs<S: AsRef<str>>(runs: &[S], replacements: &[(Match, String)]) -> Vec<String> {
    let mut out: Vec<String> = runs.iter().map(|r| r.as_ref().to_string()).collect();
    // Back to front, so earlier coordinates stay valid.
    for (found, text) in replacements.iter().rev() {
        let (start, end) = (found.start, found.end);
        if start.run == end.run {
            if let Some(run) = out.get_mut(start.run) {
                run.replace_range(start.offset..end.offset, text);
            }
            continue;
        }
        if let Some(run) = out.get_mut(end.run) {
            run.replace_range(..end.offset, "");
        }
        for run in out.iter_mut().take(end.run).skip(start.run + 1) {
            run.clear();
        }
        if let Some(run) = out.get_mut(start.run) {
            run.replace_range(start.offset.., text);
        }
    }
    out
}
