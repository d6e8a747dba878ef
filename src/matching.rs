//! Route pattern compilation and matching.
//!
//! Patterns use the route-string syntax of the dashboard's browser router:
//!
//! | token      | matches                                                  |
//! |------------|----------------------------------------------------------|
//! | `text`     | the literal text                                         |
//! | `:name`    | one or more characters other than `/` and `?`            |
//! | `*name`    | any run of characters other than `?` (may contain `/`)   |
//! | `?*name`   | a `?` followed by the query string                       |
//! | `( ... )`  | the enclosed tokens, or nothing                          |
//!
//! Every pattern implicitly ends with an optional `?extra`: whatever query
//! string the pattern itself did not consume becomes one more positional
//! argument after the named captures. So `*notFound` applied to
//! `"a/b?x=1"` yields `["a/b", "x=1"]`.
//!
//! # Design
//!
//! - Patterns compile once into a token tree; no regex engine.
//! - Matching is a small backtracking walk. `:param` is greedy, `*splat` and
//!   `?*query` are lazy, optional groups are tried before being skipped.
//! - Empty captures are reported as `None`, never `Some("")`.
//! - `:param` and `*splat` values are percent-decoded. Query strings are
//!   decoded too, except for escaped reserved characters such as `%26`.

use crate::error::NavigationError;
use crate::params::{decode_component, decode_uri};
use crate::{error_log, trace_log};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    Param,
    Splat,
    Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Capture { kind: CaptureKind, slot: usize },
    Optional(Vec<Token>),
}

/// Rest of the token sequence to match once the current one runs out.
///
/// Optional groups push their enclosing sequence here so a match inside the
/// group can continue past its closing parenthesis.
enum Continuation<'t, 'c> {
    End,
    Then(&'t [Token], &'c Continuation<'t, 'c>),
}

type Slots = Vec<Option<(usize, usize)>>;

const PARAM_STOP: &[char] = &['/', '?'];
const QUERY_STOP: &[char] = &['?'];

/// A route pattern compiled into a token tree.
///
/// # Examples
///
/// ```
/// use learners_router::CompiledPattern;
///
/// let pattern = CompiledPattern::parse(":username(/)(?*queryString)").unwrap();
///
/// let m = pattern.matches("edx/?order_by=problems_attempted").unwrap();
/// assert_eq!(m.get("username"), Some("edx"));
/// assert_eq!(m.get("queryString"), Some("order_by=problems_attempted"));
/// assert_eq!(m.extra(), None);
///
/// assert!(pattern.matches("a/b").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    tokens: Vec<Token>,
    captures: Vec<(String, CaptureKind)>,
}

/// Captures produced by a successful [`CompiledPattern::matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    names: Vec<String>,
    values: Vec<Option<String>>,
    extra: Option<String>,
}

impl PatternMatch {
    /// Value of a named capture, `None` if it is unknown or matched nothing.
    pub fn get(&self, name: &str) -> Option<&str> {
        let index = self.names.iter().position(|n| n == name)?;
        self.values[index].as_deref()
    }

    /// The trailing query string the pattern did not consume itself.
    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref()
    }

    /// Capture names in pattern order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Positional handler arguments: every capture in pattern order, then
    /// the extra query string.
    pub fn into_args(self) -> Vec<Option<String>> {
        let mut args = self.values;
        args.push(self.extra);
        args
    }
}

impl CompiledPattern {
    /// Compile a pattern string.
    ///
    /// Fails on unbalanced parentheses, a `:` or `*` without a name, or two
    /// captures sharing a name.
    pub fn parse(pattern: &str) -> Result<Self, NavigationError> {
        let invalid = |message: &str| {
            error_log!("Rejected route pattern '{}': {}", pattern, message);
            NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: message.to_string(),
            }
        };

        let mut captures: Vec<(String, CaptureKind)> = Vec::new();
        let mut stack: Vec<Vec<Token>> = vec![Vec::new()];
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            let kind = match c {
                ':' => Some(CaptureKind::Param),
                '*' => Some(CaptureKind::Splat),
                '?' if chars.peek() == Some(&'*') => {
                    chars.next();
                    Some(CaptureKind::Query)
                }
                _ => None,
            };

            if let Some(kind) = kind {
                flush_literal(&mut literal, &mut stack);
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    return Err(invalid("capture without a name"));
                }
                if captures.iter().any(|(existing, _)| *existing == name) {
                    return Err(invalid(&format!("duplicate capture '{}'", name)));
                }
                let slot = captures.len();
                captures.push((name, kind));
                push_token(&mut stack, Token::Capture { kind, slot });
                continue;
            }

            match c {
                '(' => {
                    flush_literal(&mut literal, &mut stack);
                    stack.push(Vec::new());
                }
                ')' => {
                    flush_literal(&mut literal, &mut stack);
                    if stack.len() < 2 {
                        return Err(invalid("unmatched ')'"));
                    }
                    if let Some(group) = stack.pop() {
                        push_token(&mut stack, Token::Optional(group));
                    }
                }
                _ => literal.push(c),
            }
        }
        flush_literal(&mut literal, &mut stack);

        if stack.len() != 1 {
            return Err(invalid("unclosed '('"));
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens: stack.pop().unwrap_or_default(),
            captures,
        })
    }

    /// The pattern string this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Capture names in pattern order.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|(name, _)| name.as_str())
    }

    /// Match a normalized fragment against this pattern.
    pub fn matches(&self, fragment: &str) -> Option<PatternMatch> {
        // One extra slot at the end for the trailing query string.
        let mut slots: Slots = vec![None; self.captures.len() + 1];
        if !self.match_tokens(&self.tokens, &Continuation::End, fragment, 0, &mut slots) {
            trace_log!("Pattern '{}' rejected '{}'", self.source, fragment);
            return None;
        }

        let capture = |slot: Option<(usize, usize)>| {
            slot.map(|(start, end)| &fragment[start..end])
                .filter(|value| !value.is_empty())
        };

        let values = self
            .captures
            .iter()
            .zip(&slots)
            .map(|((_, kind), slot)| {
                capture(*slot).map(|raw| match kind {
                    CaptureKind::Param | CaptureKind::Splat => decode_component(raw).into_owned(),
                    CaptureKind::Query => decode_uri(raw).into_owned(),
                })
            })
            .collect();

        Some(PatternMatch {
            names: self.capture_names().map(String::from).collect(),
            values,
            extra: capture(slots[self.captures.len()]).map(|raw| decode_uri(raw).into_owned()),
        })
    }

    fn match_tokens(
        &self,
        tokens: &[Token],
        cont: &Continuation<'_, '_>,
        input: &str,
        pos: usize,
        slots: &mut Slots,
    ) -> bool {
        let Some((first, rest)) = tokens.split_first() else {
            return match cont {
                Continuation::End => self.match_end(input, pos, slots),
                Continuation::Then(next, outer) => self.match_tokens(next, outer, input, pos, slots),
            };
        };

        match first {
            Token::Literal(text) => {
                input[pos..].starts_with(text.as_str())
                    && self.match_tokens(rest, cont, input, pos + text.len(), slots)
            }
            Token::Optional(group) => {
                let after_group = Continuation::Then(rest, cont);
                self.match_tokens(group, &after_group, input, pos, slots)
                    || self.match_tokens(rest, cont, input, pos, slots)
            }
            Token::Capture { kind, slot } => {
                let (start, stop_at) = match kind {
                    CaptureKind::Param => (pos, PARAM_STOP),
                    CaptureKind::Splat => (pos, QUERY_STOP),
                    CaptureKind::Query => {
                        if !input[pos..].starts_with('?') {
                            return false;
                        }
                        (pos + 1, QUERY_STOP)
                    }
                };
                let run = &input[start..];
                let run_len = run.find(stop_at).unwrap_or(run.len());
                let mut ends: Vec<usize> = run[..run_len]
                    .char_indices()
                    .map(|(i, _)| start + i)
                    .skip(1)
                    .chain(std::iter::once(start + run_len))
                    .collect();

                match kind {
                    // Greedy, and never empty.
                    CaptureKind::Param => {
                        if run_len == 0 {
                            return false;
                        }
                        ends.reverse();
                    }
                    // Lazy, may be empty.
                    CaptureKind::Splat | CaptureKind::Query => ends.insert(0, start),
                }
                ends.dedup();

                for end in ends {
                    slots[*slot] = Some((start, end));
                    if self.match_tokens(rest, cont, input, end, slots) {
                        return true;
                    }
                }
                slots[*slot] = None;
                false
            }
        }
    }

    fn match_end(&self, input: &str, pos: usize, slots: &mut Slots) -> bool {
        let remaining = &input[pos..];
        let extra_slot = self.captures.len();
        if remaining.is_empty() {
            slots[extra_slot] = None;
            true
        } else if remaining.starts_with('?') {
            slots[extra_slot] = Some((pos + 1, input.len()));
            true
        } else {
            false
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn flush_literal(literal: &mut String, stack: &mut [Vec<Token>]) {
    if !literal.is_empty() {
        push_token(stack, Token::Literal(std::mem::take(literal)));
    }
}

fn push_token(stack: &mut [Vec<Token>], token: Token) {
    if let Some(current) = stack.last_mut() {
        current.push(token);
    }
}
