//! Position-tracking scanner over the settings file text.
//!
//! Every `parse_*`/`expect_*` method either consumes its token and advances,
//! or fails and leaves the position exactly where it was. Numbers are scanned
//! the way `scanf("%d")` and `scanf("%f")` would: leading blanks are skipped
//! and the longest valid prefix is taken.

use glam::{Mat4, Vec2, Vec4};

use crate::math::{is_orthonormal, orthogonalize, MatrixAt};

/// How far a loaded rotation may drift from orthonormal before it is repaired.
pub const ROTATION_TOLERANCE: f32 = 1e-5;

/// Scanner over the bytes of a settings file.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            pos: 0,
        }
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true once every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    /// Runs `f`, rewinding to the current position if it fails.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    /// Skips spaces, tabs and line breaks.
    pub fn skip_blank(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    /// Skips a single byte.
    pub fn skip_byte(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Skips to the next line break, leaving it unconsumed.
    pub fn skip_line(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Consumes everything up to the next line break and returns it verbatim.
    pub fn rest_of_line(&mut self) -> String {
        let start = self.pos;
        self.skip_line();
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    /// Consumes `literal` after optional blanks. Case-sensitive.
    pub fn expect_literal(&mut self, literal: &str) -> bool {
        self.attempt(|c| {
            c.skip_blank();
            let end = c.pos + literal.len();
            if c.src.get(c.pos..end) == Some(literal.as_bytes()) {
                c.pos = end;
                Some(())
            } else {
                None
            }
        })
        .is_some()
    }

    /// Consumes `key` followed by `=`, with optional blanks around the key.
    pub fn expect_key(&mut self, key: &str) -> bool {
        self.attempt(|c| {
            if !c.expect_literal(key) {
                return None;
            }
            c.skip_blank();
            if c.peek() == Some(b'=') {
                c.pos += 1;
                Some(())
            } else {
                None
            }
        })
        .is_some()
    }

    /// Consumes a comma after optional blanks.
    pub fn expect_comma(&mut self) -> bool {
        self.expect_literal(",")
    }

    /// Consumes the first literal of `table` that matches and returns its value.
    pub fn parse_one_of<T: Copy>(&mut self, table: &[(&str, T)]) -> Option<T> {
        table
            .iter()
            .find(|(literal, _)| self.expect_literal(literal))
            .map(|(_, value)| *value)
    }

    fn scan_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn scan_sign(&mut self) -> bool {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }

    /// Parses a signed decimal integer. Out-of-range values saturate.
    pub fn parse_int(&mut self) -> Option<i32> {
        self.attempt(|c| {
            c.skip_blank();
            let negative = c.scan_sign();
            let start = c.pos;
            if c.scan_digits() == 0 {
                return None;
            }
            let magnitude = c.src[start..c.pos]
                .iter()
                .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
            let value = if negative { -magnitude } else { magnitude };
            Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        })
    }

    /// Parses an integer and clamps it to `[min, max]`.
    ///
    /// No clamping happens when `min == max`.
    pub fn parse_int_clamped(&mut self, min: i32, max: i32) -> Option<i32> {
        self.parse_int()
            .map(|x| if min == max { x } else { x.clamp(min, max) })
    }

    /// Parses a float: decimal with optional fraction and exponent, or
    /// `inf`/`infinity`/`nan` in any case.
    pub fn parse_float(&mut self) -> Option<f32> {
        self.attempt(|c| {
            c.skip_blank();
            let start = c.pos;
            let negative = c.scan_sign();
            if let Some(special) = c.scan_special() {
                return Some(if negative { -special } else { special });
            }

            let mut digits = c.scan_digits();
            if c.peek() == Some(b'.') {
                c.pos += 1;
                digits += c.scan_digits();
            }
            if digits == 0 {
                return None;
            }
            if matches!(c.peek(), Some(b'e' | b'E')) {
                let mantissa_end = c.pos;
                c.pos += 1;
                c.scan_sign();
                if c.scan_digits() == 0 {
                    c.pos = mantissa_end;
                }
            }

            std::str::from_utf8(&c.src[start..c.pos])
                .ok()?
                .parse::<f32>()
                .ok()
        })
    }

    fn scan_special(&mut self) -> Option<f32> {
        let rest = &self.src[self.pos..];
        let matches = |word: &str| {
            rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word.as_bytes())
        };
        for (word, value) in [
            ("infinity", f32::INFINITY),
            ("inf", f32::INFINITY),
            ("nan", f32::NAN),
        ] {
            if matches(word) {
                self.pos += word.len();
                return Some(value);
            }
        }
        None
    }

    /// Parses a float, truncates it toward zero and clamps it to `[min, max]`.
    pub fn parse_float_as_int(&mut self, min: i32, max: i32) -> Option<i32> {
        self.parse_float().map(|f| (f as i32).clamp(min, max))
    }

    /// Parses `0`, `1`, `false`, `true`, `False` or `True`.
    pub fn parse_bool(&mut self) -> Option<bool> {
        self.attempt(|c| {
            c.skip_blank();
            match c.peek() {
                Some(b'0') => {
                    c.pos += 1;
                    Some(false)
                }
                Some(b'1') => {
                    c.pos += 1;
                    Some(true)
                }
                _ => c.parse_one_of(&[
                    ("False", false),
                    ("True", true),
                    ("false", false),
                    ("true", true),
                ]),
            }
        })
    }

    /// Parses `N` comma-separated floats.
    fn parse_floats<const N: usize>(&mut self) -> Option<[f32; N]> {
        self.attempt(|c| {
            let mut out = [0.0; N];
            for (i, slot) in out.iter_mut().enumerate() {
                if i > 0 && !c.expect_comma() {
                    return None;
                }
                *slot = c.parse_float()?;
            }
            Some(out)
        })
    }

    /// Parses `x,y` integers.
    pub fn parse_int2(&mut self) -> Option<(i32, i32)> {
        self.attempt(|c| {
            let x = c.parse_int()?;
            if !c.expect_comma() {
                return None;
            }
            let y = c.parse_int()?;
            Some((x, y))
        })
    }

    /// Parses `x,y` floats.
    pub fn parse_vec2(&mut self) -> Option<Vec2> {
        self.parse_floats::<2>().map(Vec2::from_array)
    }

    /// Parses `x,y,z,w` floats.
    pub fn parse_vec4(&mut self) -> Option<Vec4> {
        self.parse_floats::<4>().map(Vec4::from_array)
    }

    /// Parses 16 floats listing a matrix column by column.
    pub fn parse_mat4(&mut self) -> Option<Mat4> {
        self.parse_floats::<16>().map(|values| {
            let mut m = Mat4::ZERO;
            for (i, v) in values.into_iter().enumerate() {
                m.set_at(i % 4, i / 4, v);
            }
            m
        })
    }

    /// Parses a matrix and restores an orthonormal rotation basis in it.
    ///
    /// A basis that is already orthonormal within [`ROTATION_TOLERANCE`] is
    /// kept bit for bit, so saving a loaded rotation writes the same text.
    pub fn parse_rotation(&mut self) -> Option<Mat4> {
        self.parse_mat4().map(|r| {
            if is_orthonormal(r, ROTATION_TOLERANCE) {
                r
            } else {
                orthogonalize(r)
            }
        })
    }
}
