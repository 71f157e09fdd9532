//! A small CSS selector subset.
//!
//! Supported: `*`, type (`input`), `#id`, `.class`, `[attr]`, `[attr=value]`
//! with bare or quoted values, compounds of these (`input.wide[name=email]`)
//! and comma-separated lists. Combinators are not supported.

use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use crate::error::SelectorError;

/// Anything a selector can be matched against.
pub trait Element {
    /// Lowercase tag name (`form`, `input`, `select`, `textarea`).
    fn tag(&self) -> &str;

    /// Element id, if any.
    fn id(&self) -> Option<&str>;

    /// Whether the element carries `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Attribute value, if present. Boolean attributes return `""`.
    fn attr(&self, name: &str) -> Option<&str>;
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parses a selector list.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if any item of the list is blank, contains
    /// an unsupported character, or leaves a bracket or quote open.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        let mut offset = 0;
        for item in source.split(',') {
            let leading = item.len() - item.trim_start().len();
            alternatives.push(parse_compound(item.trim(), offset + leading)?);
            offset += item.len() + 1;
        }
        Ok(Self { alternatives })
    }

    /// Whether any alternative matches `element`.
    pub fn matches<E: Element + ?Sized>(&self, element: &E) -> bool {
        self.alternatives.iter().any(|c| c.matches(element))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Compound {
    fn matches<E: Element + ?Sized>(&self, element: &E) -> bool {
        self.tag
            .as_deref()
            .is_none_or(|tag| tag.eq_ignore_ascii_case(element.tag()))
            && self.id.as_deref().is_none_or(|id| element.id() == Some(id))
            && self.classes.iter().all(|c| element.has_class(c))
            && self.attrs.iter().all(|a| match (&a.value, element.attr(&a.name)) {
                (None, found) => found.is_some(),
                (Some(expected), Some(found)) => expected == found,
                (Some(_), None) => false,
            })
    }
}

// ============================================================================
// PARSER
// ============================================================================

type Chars<'a> = Peekable<CharIndices<'a>>;

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(source: &str, offset: usize) -> Result<Compound, SelectorError> {
    if source.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut compound = Compound::default();
    let mut chars = source.char_indices().peekable();

    match chars.peek() {
        Some(&(_, '*')) => {
            chars.next();
        }
        Some(&(_, c)) if is_ident_char(c) => {
            compound.tag = Some(ident(&mut chars, offset)?.to_ascii_lowercase());
        }
        _ => {}
    }

    while let Some((pos, c)) = chars.next() {
        match c {
            '#' => compound.id = Some(ident(&mut chars, offset + pos + 1)?),
            '.' => compound.classes.push(ident(&mut chars, offset + pos + 1)?),
            '[' => compound.attrs.push(attribute(&mut chars, offset, offset + pos)?),
            _ => {
                return Err(SelectorError::Unexpected {
                    ch: c,
                    position: offset + pos,
                });
            }
        }
    }

    Ok(compound)
}

fn ident(chars: &mut Chars<'_>, position: usize) -> Result<String, SelectorError> {
    let mut out = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    if out.is_empty() {
        return match chars.peek() {
            Some(&(_, ch)) => Err(SelectorError::Unexpected { ch, position }),
            None => Err(SelectorError::Empty),
        };
    }
    Ok(out)
}

/// Parses the body of `[...]`; the opening bracket is already consumed.
fn attribute(chars: &mut Chars<'_>, offset: usize, open: usize) -> Result<AttrMatch, SelectorError> {
    let unterminated = SelectorError::Unterminated { position: open };
    let name = ident(chars, open + 1).map_err(|e| match e {
        SelectorError::Empty => unterminated.clone(),
        other => other,
    })?;

    match chars.next() {
        Some((_, ']')) => Ok(AttrMatch { name, value: None }),
        Some((_, '=')) => {
            let value = match chars.peek() {
                Some(&(_, quote @ ('"' | '\''))) => {
                    chars.next();
                    let mut value = String::new();
                    loop {
                        match chars.next() {
                            Some((_, c)) if c == quote => break,
                            Some((_, c)) => value.push(c),
                            None => return Err(unterminated),
                        }
                    }
                    value
                }
                Some(&(pos, ']')) => {
                    return Err(SelectorError::Unexpected {
                        ch: ']',
                        position: offset + pos,
                    });
                }
                Some(_) => ident(chars, open + 1)?,
                None => return Err(unterminated),
            };
            match chars.next() {
                Some((_, ']')) => Ok(AttrMatch {
                    name,
                    value: Some(value),
                }),
                Some((pos, ch)) => Err(SelectorError::Unexpected {
                    ch,
                    position: offset + pos,
                }),
                None => Err(unterminated),
            }
        }
        Some((pos, ch)) => Err(SelectorError::Unexpected {
            ch,
            position: offset + pos,
        }),
        None => Err(unterminated),
    }
}
