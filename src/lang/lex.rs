use super::{Address, Error};
use std::convert::TryFrom;
use crate::error;
use crate::mach::Opcode;
use tracing::warn;

type Result<T> = std::result::Result<T, Error>;

const SEPARATOR: &[u8] = b"200";
const LEGACY_SEPARATOR: &[u8] = b"20";
const NUMBER_PREFIX: &[u8] = b"990";
const LEGACY_NUMBER_PREFIX: &[u8] = b"99";
const LINE_COMMENT: &[u8] = b"90020";
const BLOCK_COMMENT: &[u8] = b"90120";

/// Decode Charless bytecode into instructions labelled with their byte offset.
///
/// Surrounding whitespace is trimmed first; offsets count from the first
/// byte of the trimmed text, which is what jump targets refer to.
pub fn lex(s: &str) -> Result<Vec<(Address, Opcode)>> {
    CharlessLexer::new(s.trim()).lex()
}

struct CharlessLexer<'a> {
    code: &'a [u8],
    pos: usize,
}

impl<'a> CharlessLexer<'a> {
    fn new(s: &'a str) -> CharlessLexer<'a> {
        CharlessLexer {
            code: s.as_bytes(),
            pos: 0,
        }
    }

    fn lex(mut self) -> Result<Vec<(Address, Opcode)>> {
        let mut ops: Vec<(Address, Opcode)> = vec![];
        while self.pos < self.code.len() {
            let addr = self.pos;
            if self.code[self.pos].is_ascii_whitespace() {
                self.pos += 1;
                continue;
            }
            if self.consume(LINE_COMMENT) {
                self.skip_line();
                continue;
            }
            if self.consume(BLOCK_COMMENT) {
                self.skip_block_comment();
                continue;
            }
            let code = match self.opcode() {
                Some(code) => code,
                None => {
                    self.pos += 1;
                    continue;
                }
            };
            let op = match code {
                10 => {
                    self.separator();
                    let text = self.text();
                    self.separator();
                    Opcode::PrintStr(text)
                }
                500 => {
                    self.separator();
                    Opcode::Push(self.number(addr)?.unwrap_or(0))
                }
                700 => {
                    self.separator();
                    Opcode::Jump(self.target(addr)?)
                }
                701 => {
                    self.separator();
                    Opcode::JumpIfZero(self.target(addr)?)
                }
                702 => {
                    self.separator();
                    Opcode::JumpIfNotZero(self.target(addr)?)
                }
                _ => match Opcode::from_code(code) {
                    Some(op) => {
                        self.separator();
                        op
                    }
                    None => {
                        warn!(address = addr, code, "skipping unknown opcode");
                        continue;
                    }
                },
            };
            ops.push((addr, op));
        }
        Ok(ops)
    }

    fn at(&self, pos: usize, s: &[u8]) -> bool {
        self.code[pos.min(self.code.len())..].starts_with(s)
    }

    fn consume(&mut self, s: &[u8]) -> bool {
        if self.at(self.pos, s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn separator(&mut self) -> bool {
        self.consume(SEPARATOR) || self.consume(LEGACY_SEPARATOR)
    }

    fn skip_line(&mut self) {
        while self.pos < self.code.len() && self.code[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        while self.pos < self.code.len() && !self.at(self.pos, BLOCK_COMMENT) {
            self.pos += 1;
        }
        self.consume(BLOCK_COMMENT);
    }

    /// Up to three digits, cut short by a separator or number prefix.
    fn opcode(&mut self) -> Option<u16> {
        let start = self.pos;
        let mut end = start;
        while end < self.code.len() && end - start < 3 && self.code[end].is_ascii_digit() {
            if self.at(end, SEPARATOR) || self.at(end, NUMBER_PREFIX) {
                break;
            }
            end += 1;
        }
        if end == start {
            return None;
        }
        self.pos = end;
        std::str::from_utf8(&self.code[start..end])
            .ok()?
            .parse()
            .ok()
    }

    /// Characters are one width digit followed by that many digits of
    /// Unicode scalar value.
    fn text(&mut self) -> String {
        let mut s = String::new();
        while self.pos < self.code.len() && !self.at(self.pos, SEPARATOR) {
            let width = self.code[self.pos];
            if !width.is_ascii_digit() {
                break;
            }
            let width = (width - b'0') as usize;
            self.pos += 1;
            if self.pos + width > self.code.len() {
                break;
            }
            let digits = &self.code[self.pos..self.pos + width];
            self.pos += width;
            let value = std::str::from_utf8(digits)
                .ok()
                .and_then(|d| d.parse::<u32>().ok())
                .unwrap_or(0);
            s.push(std::char::from_u32(value).unwrap_or(std::char::REPLACEMENT_CHARACTER));
        }
        s
    }

    /// Returns `None` when no number prefix is present.
    fn number(&mut self, addr: Address) -> Result<Option<i64>> {
        if !self.consume(NUMBER_PREFIX) && !self.consume(LEGACY_NUMBER_PREFIX) {
            return Ok(None);
        }
        let start = self.pos;
        while self.pos < self.code.len()
            && self.code[self.pos].is_ascii_digit()
            && !self.at(self.pos, SEPARATOR)
        {
            self.pos += 1;
        }
        let digits = &self.code[start..self.pos];
        self.separator();
        if digits.is_empty() {
            return Ok(Some(0));
        }
        match std::str::from_utf8(digits).ok().and_then(|d| d.parse().ok()) {
            Some(n) => Ok(Some(n)),
            None => Err(error!(SyntaxError, addr; "number out of range")),
        }
    }

    fn target(&mut self, addr: Address) -> Result<Address> {
        let n = self.number(addr)?.unwrap_or(0);
        Address::try_from(n)
            .map_err(|_| error!(SyntaxError, addr; "jump target out of range"))
    }
}
