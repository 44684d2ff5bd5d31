//! vCard document parser.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, unfold};
use crate::rfc::vcard::core::{VCard, VCardProperty, VCardVersion};

/// Parses a vCard document into one or more vCards.
///
/// Content outside `BEGIN:VCARD`/`END:VCARD` is skipped.
///
/// ## Errors
/// Returns a parse error if a card is unterminated, declares an unsupported
/// version, or contains a malformed content line.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    tracing::debug!("Parsing vCard document");

    let unfolded = unfold(input.trim_start_matches('\u{feff}'));
    let lines: Vec<&str> = unfolded.lines().collect();

    let mut parser = Parser { lines, pos: 0 };
    let cards = parser.parse_document()?;

    tracing::debug!(count = cards.len(), "Parsed vCards");

    Ok(cards)
}

/// Parses the first vCard of a document.
///
/// ## Errors
/// Returns an error if the document contains no vCard or is malformed.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_single(input: &str) -> ParseResult<VCard> {
    parse(input)?.into_iter().next().ok_or_else(|| {
        tracing::warn!("No vCard found in document");
        ParseError::new(ParseErrorKind::Empty, 1, "no vCard found in document")
    })
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl Parser<'_> {
    fn parse_document(&mut self) -> ParseResult<Vec<VCard>> {
        let mut cards = Vec::new();

        while let Some(line) = self.lines.get(self.pos) {
            self.pos += 1;
            if line.trim().eq_ignore_ascii_case("BEGIN:VCARD") {
                cards.push(self.parse_vcard()?);
            }
        }

        Ok(cards)
    }

    fn parse_vcard(&mut self) -> ParseResult<VCard> {
        let start_line = self.pos;
        let mut card = VCard::default();
        let mut saw_version = false;

        while let Some(line) = self.lines.get(self.pos) {
            self.pos += 1;
            let line_num = self.pos;
            let line = line.trim_end();

            if line.trim().is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("END:VCARD") {
                if !saw_version {
                    tracing::trace!(line = start_line, "vCard without VERSION, assuming 4.0");
                }
                return Ok(card);
            }
            if line.eq_ignore_ascii_case("BEGIN:VCARD") {
                return Err(ParseError::unexpected(line_num, "END:VCARD", "BEGIN:VCARD"));
            }

            let content = parse_content_line(line, line_num)?;

            if content.name == "VERSION" {
                card.version = VCardVersion::parse(&content.value).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::UnsupportedVersion,
                        line_num,
                        format!("unsupported vCard version: {}", content.value),
                    )
                })?;
                saw_version = true;
                continue;
            }

            card.add_property(VCardProperty {
                group: content.group,
                name: content.name,
                params: content.params,
                value: content.value,
            });
        }

        Err(ParseError::new(
            ParseErrorKind::UnexpectedEof,
            start_line,
            "vCard not closed with END:VCARD",
        ))
    }
}
