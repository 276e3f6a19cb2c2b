//! Parser for reading-passage files.
//!
//! # Format
//! ```text
//! ID: 1
//! Title: Con mèo
//! Key: mèo, thảm
//! Threshold: 0.7
//! Text: Con mèo nhỏ ngồi trên thảm xanh.
//! Lines after Text continue the passage.
//!
//! ID: 2
//! Text: Xin chào các bạn.
//! ```
//!
//! `Text:` is required. A field that is already set, an `ID:` line once the
//! current passage has any content, or any field after a blank line starts a
//! new passage. Blank lines followed by plain text stay part of the text.

use crate::error::{ParseError, Result};
use crate::types::Passage;
use std::collections::HashSet;

/// Parse passage file content.
pub fn parse(content: &str) -> Result<Vec<Passage>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::new();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finish()
}

struct PassageBuilder {
    id: Option<i64>,
    title: Option<String>,
    key_words: Option<Vec<String>>,
    threshold: Option<f64>,
    text: Option<Vec<String>>,
    start_line: usize,
}

impl PassageBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            id: None,
            title: None,
            key_words: None,
            threshold: None,
            text: None,
            start_line,
        }
    }

    fn has_content(&self) -> bool {
        self.id.is_some()
            || self.title.is_some()
            || self.key_words.is_some()
            || self.threshold.is_some()
            || self.text.is_some()
    }

    fn build(self) -> Result<Passage> {
        let text = self
            .text
            .map(|lines| lines.join("\n").trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ParseError::MissingText {
                line: self.start_line,
            })?;

        Ok(Passage {
            id: self.id,
            title: self.title,
            text,
            key_words: self.key_words.unwrap_or_default(),
            similarity_threshold: self.threshold,
            line_number: self.start_line,
        })
    }
}

struct Parser {
    current: Option<PassageBuilder>,
    in_text: bool,
    saw_blank: bool,
    passages: Vec<Passage>,
    seen_ids: HashSet<i64>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            in_text: false,
            saw_blank: false,
            passages: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Id(value) => {
                let id = value.parse::<i64>().map_err(|_| ParseError::InvalidId {
                    line: line_num,
                    value: value.to_string(),
                })?;
                let restart = self.starts_new(PassageBuilder::has_content);
                self.passage_for(line_num, restart)?.id = Some(id);
                self.in_text = false;
            }
            LineType::Title(value) => {
                let restart = self.starts_new(|p| p.title.is_some());
                self.passage_for(line_num, restart)?.title = Some(value.to_string());
                self.in_text = false;
            }
            LineType::Key(value) => {
                let restart = self.starts_new(|p| p.key_words.is_some());
                let words = value
                    .split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(String::from)
                    .collect();
                self.passage_for(line_num, restart)?.key_words = Some(words);
                self.in_text = false;
            }
            LineType::Threshold(value) => {
                let threshold = value
                    .parse::<f64>()
                    .ok()
                    .filter(|t| (0.0..=1.0).contains(t))
                    .ok_or_else(|| ParseError::InvalidThreshold {
                        line: line_num,
                        value: value.to_string(),
                    })?;
                let restart = self.starts_new(|p| p.threshold.is_some());
                self.passage_for(line_num, restart)?.threshold = Some(threshold);
                self.in_text = false;
            }
            LineType::Text(value) => {
                let restart = self.starts_new(|p| p.text.is_some());
                self.passage_for(line_num, restart)?.text = Some(vec![value.to_string()]);
                self.in_text = true;
            }
            LineType::Continuation(value) => {
                if self.in_text {
                    if let Some(lines) = self.current.as_mut().and_then(|p| p.text.as_mut()) {
                        lines.push(value.to_string());
                    }
                }
                self.saw_blank = value.is_empty();
                return Ok(());
            }
        }
        self.saw_blank = false;
        Ok(())
    }

    /// Whether a field line must open a new passage. `field_set` reports whether
    /// the current passage already holds that field.
    fn starts_new(&self, field_set: impl Fn(&PassageBuilder) -> bool) -> bool {
        self.current
            .as_ref()
            .is_some_and(|p| field_set(p) || (self.saw_blank && p.has_content()))
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("ID:") {
            LineType::Id(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Title:") {
            LineType::Title(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Key:") {
            LineType::Key(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Threshold:") {
            LineType::Threshold(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Text:") {
            LineType::Text(rest.trim())
        } else {
            LineType::Continuation(trimmed)
        }
    }

    /// Current passage, finishing it first when `restart` is set.
    fn passage_for(&mut self, line_num: usize, restart: bool) -> Result<&mut PassageBuilder> {
        if restart {
            self.finish_current()?;
        }
        Ok(self
            .current
            .get_or_insert_with(|| PassageBuilder::new(line_num)))
    }

    fn finish_current(&mut self) -> Result<()> {
        if let Some(builder) = self.current.take() {
            let passage = builder.build()?;
            if let Some(id) = passage.id {
                if !self.seen_ids.insert(id) {
                    return Err(ParseError::DuplicateId {
                        id,
                        line: passage.line_number,
                    });
                }
            }
            self.passages.push(passage);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Passage>> {
        self.finish_current()?;
        Ok(self.passages)
    }
}

enum LineType<'a> {
    Id(&'a str),
    Title(&'a str),
    Key(&'a str),
    Threshold(&'a str),
    Text(&'a str),
    Continuation(&'a str),
}
