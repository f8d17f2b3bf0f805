// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Position conversion
//!
//! LSP positions count lines from zero and characters in UTF-16 code units.
//! The completion core works on UTF-8 byte offsets.

use lsp_types::{Position, Range};

/// Byte offset of an LSP position
///
/// A character past the end of its line is clamped to the line end, as the
/// protocol asks. Returns `None` when the line does not exist.
pub fn position_to_offset(text: &str, position: Position) -> Option<usize> {
    let start = line_start(text, position.line as usize)?;
    let rest = &text[start..];
    let line = rest[..rest.find('\n').unwrap_or(rest.len())].trim_end_matches('\r');

    let mut units = 0;
    for (idx, ch) in line.char_indices() {
        if units >= position.character {
            return Some(start + idx);
        }
        units += ch.len_utf16() as u32;
    }
    Some(start + line.len())
}

/// LSP position of a byte offset
///
/// Offsets past the end or inside a character are moved back to the previous
/// character boundary.
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let character = before[line_start..].encode_utf16().count();
    Position::new(line as u32, character as u32)
}

/// LSP range of a byte span
pub fn span_to_range(text: &str, from: usize, to: usize) -> Range {
    Range::new(offset_to_position(text, from), offset_to_position(text, to))
}

fn line_start(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 1).map(|(i, _)| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_offset() {
        let text = "match $x;\ninsert $x;";
        assert_eq!(position_to_offset(text, Position::new(0, 0)), Some(0));
        assert_eq!(position_to_offset(text, Position::new(0, 6)), Some(6));
        assert_eq!(position_to_offset(text, Position::new(1, 7)), Some(17));
        assert_eq!(position_to_offset(text, Position::new(2, 0)), None);
    }

    #[test]
    fn test_character_past_line_end_is_clamped() {
        let text = "match\r\n$x";
        assert_eq!(position_to_offset(text, Position::new(0, 40)), Some(5));
        assert_eq!(position_to_offset(text, Position::new(1, 40)), Some(9));
    }

    #[test]
    fn test_utf16_columns() {
        // 'é' is one UTF-16 unit and two bytes, '𝄞' is two units and four bytes
        let text = "$é $𝄞 x";
        assert_eq!(position_to_offset(text, Position::new(0, 3)), Some(4));
        assert_eq!(position_to_offset(text, Position::new(0, 6)), Some(9));
        assert_eq!(offset_to_position(text, 9), Position::new(0, 6));
    }

    #[test]
    fn test_offset_to_position() {
        let text = "match $x;\ninsert $x;";
        assert_eq!(offset_to_position(text, 0), Position::new(0, 0));
        assert_eq!(offset_to_position(text, 10), Position::new(1, 0));
        assert_eq!(offset_to_position(text, 100), Position::new(1, 10));
    }

    #[test]
    fn test_offset_inside_character_moves_back() {
        let text = "$é";
        assert_eq!(offset_to_position(text, 2), Position::new(0, 1));
    }

    #[test]
    fn test_round_trip_at_every_boundary() {
        let text = "define\n  entity pérson;\n\nmatch $x";
        for (offset, _) in text.char_indices() {
            let position = offset_to_position(text, offset);
            assert_eq!(position_to_offset(text, position), Some(offset));
        }
    }
}
