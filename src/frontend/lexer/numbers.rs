//! Number scanning for the annotation lexer
//!
//! Handles decimal literals (`12`, `1.5`) and base-prefixed integers (`0b101`, `0o17`, `0x1F`, prefix letter in either
//! case).

use super::Lexer;
use super::tokens::TokenKind;

impl<'a> Lexer<'a> {
    /// Scan a number starting at the current (digit) character.
    pub(super) fn scan_number(&mut self) -> TokenKind {
        let start = self.current_pos;

        if self.peek() == Some('0') {
            if let Some(radix) = self.peek_next().and_then(radix_for_prefix) {
                if let Some(kind) = self.scan_prefixed(start, radix) {
                    return kind;
                }
            }
        }

        // Integer part
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part, only when a digit follows the dot
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.source[start..self.current_pos];
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => TokenKind::Number(value),
            _ => TokenKind::Unknown(text.to_string()),
        }
    }

    /// Scan `0<prefix><digits>`.
    ///
    /// Returns `None` without consuming anything when no digit valid for `radix` follows the prefix; the caller then
    /// lexes the `0` alone.
    fn scan_prefixed(&mut self, start: usize, radix: u32) -> Option<TokenKind> {
        let digits_start = start + 2;
        let digits_len = self.source[digits_start..]
            .chars()
            .take_while(|c| c.is_digit(radix))
            .count();
        if digits_len == 0 {
            return None;
        }

        // Digits valid in any supported radix are ASCII, one byte each
        self.current_pos = digits_start + digits_len;
        let digits = &self.source[digits_start..self.current_pos];
        Some(match u64::from_str_radix(digits, radix) {
            Ok(value) => TokenKind::Number(value as f64),
            Err(_) => TokenKind::Unknown(self.source[start..self.current_pos].to_string()),
        })
    }
}

fn radix_for_prefix(c: char) -> Option<u32> {
    match c.to_ascii_lowercase() {
        'b' => Some(2),
        'o' => Some(8),
        'x' => Some(16),
        _ => None,
    }
}
