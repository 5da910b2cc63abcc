//
// Copyright (c) The frrconf Contributors
//
// SPDX-License-Identifier: MIT
//

use regex::Regex;

// In-memory model of a daemon's configuration text.
//
// The text is split into an ordered sequence of sections. A section starts at
// a non-indented statement (its header) and extends up to the next one. Lines
// are kept verbatim, so untouched sections serialize back byte for byte.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SectionedDocument {
    sections: Vec<Section>,
    trailing_newline: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    // `None` for the lines preceding the first header.
    header: Option<String>,
    lines: Vec<String>,
}

// ===== impl SectionedDocument =====

impl SectionedDocument {
    pub fn parse(text: &str) -> SectionedDocument {
        let mut sections: Vec<Section> = vec![];
        for line in text.lines() {
            if is_header(line) {
                sections.push(Section::new(line));
                continue;
            }

            match sections.last_mut() {
                Some(section) => section.lines.push(line.to_owned()),
                None => sections.push(Section {
                    header: None,
                    lines: vec![line.to_owned()],
                }),
            }
        }

        SectionedDocument {
            sections,
            trailing_newline: text.ends_with('\n'),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    // Returns whether any section header matches the given pattern.
    pub fn contains(&self, pattern: &Regex) -> bool {
        self.sections.iter().any(|section| section.matches(pattern))
    }

    // Removes every section whose header matches the given pattern,
    // returning how many were removed.
    pub fn remove_sections(&mut self, pattern: &Regex) -> usize {
        let before = self.sections.len();
        self.sections.retain(|section| !section.matches(pattern));
        before - self.sections.len()
    }

    // Replaces the sections matching the given pattern with `text`.
    //
    // The replacement takes the position of the first matching section and
    // all other matches are removed. An empty replacement is a pure removal.
    // Returns how many sections were replaced.
    pub fn replace_sections(&mut self, pattern: &Regex, text: &str) -> usize {
        let position = self
            .sections
            .iter()
            .position(|section| section.matches(pattern));
        let removed = self.remove_sections(pattern);
        if let Some(position) = position {
            let replacement = SectionedDocument::parse(text).sections;
            self.sections.splice(position..position, replacement);
        }
        removed
    }

    // Inserts `text` right before the first section whose header matches
    // the anchor pattern.
    //
    // Without a matching anchor, the text goes before a trailing `end`
    // statement when there is one, and at the end of the document otherwise.
    // Returns whether an anchor was found.
    pub fn insert_before(&mut self, anchor: &Regex, text: &str) -> bool {
        let position = self
            .sections
            .iter()
            .position(|section| section.matches(anchor));
        let found = position.is_some();

        let addition = SectionedDocument::parse(text).sections;
        if addition.is_empty() {
            return found;
        }

        let was_empty = self.sections.is_empty();
        let position = position.unwrap_or_else(|| {
            match self.sections.last() {
                Some(section) if section.header.as_deref() == Some("end") => {
                    self.sections.len() - 1
                }
                _ => self.sections.len(),
            }
        });
        self.sections.splice(position..position, addition);
        if was_empty {
            self.trailing_newline = true;
        }
        found
    }
}

impl std::fmt::Display for SectionedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = self.sections.iter().flat_map(Section::lines);
        if let Some(line) = lines.next() {
            write!(f, "{line}")?;
            for line in lines {
                write!(f, "\n{line}")?;
            }
            if self.trailing_newline {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for SectionedDocument {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(SectionedDocument::parse(text))
    }
}

// ===== impl Section =====

impl Section {
    fn new(header: &str) -> Section {
        Section {
            header: Some(header.to_owned()),
            lines: vec![header.to_owned()],
        }
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    // All lines of the section, header included.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    fn matches(&self, pattern: &Regex) -> bool {
        self.header
            .as_deref()
            .is_some_and(|header| pattern.is_match(header))
    }
}

// ===== helper functions =====

// Separators, comments and block terminators never start a section.
fn is_header(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(char::is_whitespace)
        && !line.starts_with('!')
        && !matches!(line.trim_end(), "exit" | "exit-vrf")
}

// ===== unit tests =====
