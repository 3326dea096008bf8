// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Turning a call's arguments into one message string.
//!
//! Every convenience function takes a [`Head`] followed by zero or more trailing values:
//!
//! ```
//! use tierlog::format::format_message;
//!
//! assert_eq!(format_message("template %v".into(), &[&5]), "template 5");
//! assert_eq!(format_message("no placeholder".into(), &[&1, &2]), "no placeholder 1 2");
//! assert_eq!(format_message(42.into(), &[&"apples"]), "42 apples");
//! ```
//!
//! # Percent signs
//!
//! A text head is treated as a template as soon as it contains a `%` that is not part of an
//! escaped `%%` pair, and only when trailing values are present. This means a message that
//! merely happens to contain a lone `%` is still read as a template:
//!
//! ```
//! use tierlog::format::format_message;
//!
//! // `% b` is a directive with the space flag and the verb `b`; it consumes the value.
//! assert_eq!(format_message("has % but not escaped".into(), &[&1]), "has 1ut not escaped");
//! ```
//!
//! Escape literal percent signs as `%%`, or pass the text as a [`Head::Value`].

use std::borrow::Cow;
use std::fmt;
use std::fmt::Display;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::CharIndices;

/// The first argument of a log call.
///
/// Text heads may be templates; value heads are always rendered literally. The variant is
/// chosen at the call site through the `From` implementations: strings become
/// [`Head::Text`], numbers, booleans, chars and [`fmt::Arguments`] become [`Head::Value`].
/// Any other [`Display`] value can be passed through [`Head::value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head<'a> {
    /// A template or a literal prefix.
    Text(Cow<'a, str>),
    /// The default string representation of a non-string value.
    Value(String),
}

impl Head<'_> {
    /// Render any displayable value as a [`Head::Value`].
    pub fn value(value: impl Display) -> Head<'static> {
        Head::Value(value.to_string())
    }
}

impl<'a> From<&'a str> for Head<'a> {
    fn from(text: &'a str) -> Self {
        Head::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Head<'a> {
    fn from(text: &'a String) -> Self {
        Head::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for Head<'_> {
    fn from(text: String) -> Self {
        Head::Text(Cow::Owned(text))
    }
}

impl<'a> From<Cow<'a, str>> for Head<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        Head::Text(text)
    }
}

impl From<fmt::Arguments<'_>> for Head<'_> {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Head::Value(args.to_string())
    }
}

macro_rules! impl_value_head {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Head<'_> {
                fn from(value: $ty) -> Self {
                    Head::Value(value.to_string())
                }
            }
        )*
    };
}

impl_value_head!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

/// Compose the message of a log call.
///
/// * A text head with no trailing values is returned unchanged.
/// * A text head that [is a template](is_template) is applied against `args`.
/// * Any other head is followed by one `%v` per value, separated by spaces, and applied.
pub fn format_message(head: Head<'_>, args: &[&dyn Display]) -> String {
    match head {
        Head::Text(text) => {
            if args.is_empty() {
                return text.into_owned();
            }
            if is_template(&text) {
                sprintf(&text, args)
            } else {
                sprintf(&append_placeholders(text.into_owned(), args.len()), args)
            }
        }
        Head::Value(value) => {
            if args.is_empty() {
                return value;
            }
            let escaped = value.replace('%', "%%");
            sprintf(&append_placeholders(escaped, args.len()), args)
        }
    }
}

/// Compose the message of a line-oriented call: values joined by single spaces, followed by a
/// newline. No placeholder is interpreted.
pub fn format_line(args: &[&dyn Display]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{arg}");
    }
    line.push('\n');
    line
}

/// Whether `text` contains a `%` that is not part of an escaped `%%` pair.
///
/// ```
/// use tierlog::format::is_template;
///
/// assert!(is_template("%v items"));
/// assert!(is_template("100%% of %d"));
/// assert!(!is_template("100%% done"));
/// assert!(!is_template("plain"));
/// ```
pub fn is_template(text: &str) -> bool {
    let mut bytes = text.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' && bytes.next() != Some(b'%') {
            return true;
        }
    }
    false
}

fn append_placeholders(mut text: String, n: usize) -> String {
    text.reserve(n * 3);
    for _ in 0..n {
        text.push_str(" %v");
    }
    text
}

/// Apply a `%`-directive template against `args`, in order.
///
/// A directive is `%`, optional flags (`+-# 0`), an optional width, an optional `.precision`
/// and a verb. `%%` writes a literal `%`; any other verb consumes the next value and renders it
/// with [`Display`]. Problems are reported inline rather than failing:
///
/// * a directive without a value renders as `%!v(MISSING)` (with the directive's verb),
/// * a trailing `%` renders as `%!(NOVERB)`,
/// * unconsumed values are listed at the end as `%!(EXTRA a, b)`,
/// * a width or precision above 1,000,000 is dropped and reported as `%!(BADWIDTH)` or
///   `%!(BADPREC)` before the value.
pub fn sprintf(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;
    let mut consumed = 0;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let (directive, remaining) = Directive::parse(&rest[pos + 1..]);
        rest = remaining;

        match directive {
            None => out.push_str("%!(NOVERB)"),
            Some(directive) if directive.verb == '%' => out.push('%'),
            Some(directive) => match args.get(consumed) {
                Some(arg) => {
                    directive.render(&mut out, *arg);
                    consumed += 1;
                }
                None => {
                    directive.write_problems(&mut out);
                    let _ = write!(out, "%!{}(MISSING)", directive.verb);
                }
            },
        }
    }
    out.push_str(rest);

    if consumed < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[consumed..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{arg}");
        }
        out.push(')');
    }

    out
}

const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Directive {
    left: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
    verb: char,
}

impl Directive {
    // `input` starts right after the `%`.
    fn parse(input: &str) -> (Option<Directive>, &str) {
        let mut directive = Directive::default();
        let mut chars = input.char_indices().peekable();

        while let Some(&(_, c)) = chars.peek() {
            match c {
                '-' => directive.left = true,
                '0' => directive.zero = true,
                '+' | '#' | ' ' => {}
                _ => break,
            }
            chars.next();
        }

        match parse_number(&mut chars) {
            Some(width) => directive.width = width,
            None => directive.bad_width = true,
        }

        if let Some(&(_, '.')) = chars.peek() {
            chars.next();
            match parse_number(&mut chars) {
                Some(precision) => directive.precision = Some(precision),
                None => directive.bad_precision = true,
            }
        }

        match chars.next() {
            Some((idx, verb)) => {
                directive.verb = verb;
                (Some(directive), &input[idx + verb.len_utf8()..])
            }
            None => (None, ""),
        }
    }

    fn write_problems(&self, out: &mut String) {
        if self.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if self.bad_precision {
            out.push_str("%!(BADPREC)");
        }
    }

    fn render(&self, out: &mut String, arg: &dyn Display) {
        self.write_problems(out);
        let rendered = match self.precision {
            Some(precision) => format!("{arg:.precision$}"),
            None => arg.to_string(),
        };

        let len = rendered.chars().count();
        if len >= self.width {
            out.push_str(&rendered);
            return;
        }

        let padding = self.width - len;
        if self.left {
            out.push_str(&rendered);
            out.extend(std::iter::repeat_n(' ', padding));
        } else if self.zero && looks_numeric(&rendered) {
            let (sign, digits) = match rendered.strip_prefix(['-', '+']) {
                Some(digits) => rendered.split_at(rendered.len() - digits.len()),
                None => ("", rendered.as_str()),
            };
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', padding));
            out.push_str(digits);
        } else {
            out.extend(std::iter::repeat_n(' ', padding));
            out.push_str(&rendered);
        }
    }
}

// Digits are always consumed; `None` means the number exceeds `MAX_WIDTH`.
fn parse_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut number = Some(0usize);
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        number = number
            .and_then(|n| n.checked_mul(10)?.checked_add(digit as usize))
            .filter(|n| *n <= MAX_WIDTH);
        chars.next();
    }
    number
}

fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}
