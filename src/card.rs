//! Module implementing the cards of a FITS header
//!
//! A card is a 80 characters long record. It starts with a 8 characters keyword,
//! followed by the `= ` value indicator, a value and an optional comment
//! beginning with `/`. Commentary cards (COMMENT, HISTORY, blank keyword) have
//! no value indicator and hold free text.
use log::warn;
use serde::{Serialize, Serializer};

use crate::error::Error;

/// Size in bytes of one card
pub const CARD_SIZE: usize = 80;

pub type Keyword = [u8; 8];

const COMMENTARY_KW: [&Keyword; 3] = [b"COMMENT ", b"HISTORY ", b"        "];

/// Build a keyword from its name. The name is uppercased and padded with spaces
pub fn keyword(name: &str) -> Result<Keyword, Error> {
    let name = name.to_ascii_uppercase();
    let bytes = name.as_bytes();
    let valid = bytes
        .iter()
        .all(|&b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if bytes.len() > 8 || !valid {
        return Err(Error::InvalidCard(format!("{name} is not a valid keyword")));
    }

    let mut kw = [b' '; 8];
    kw[..bytes.len()].copy_from_slice(bytes);
    Ok(kw)
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Logical(bool),
    String(String),
    Undefined,
}

impl Value {
    /// Numeric value of the card. Integers are promoted to floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    #[serde(serialize_with = "serialize_keyword")]
    pub kw: Keyword,
    pub v: Value,
    pub c: Option<String>,
    /// The record as it was read. Dropped as soon as the value changes
    #[serde(skip)]
    raw: Option<[u8; CARD_SIZE]>,
}

fn serialize_keyword<S: Serializer>(kw: &Keyword, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(String::from_utf8_lossy(kw).trim_end())
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.kw == other.kw && self.v == other.v && self.c == other.c
    }
}

impl Card {
    pub fn new(kw: Keyword, v: Value, c: Option<String>) -> Self {
        Self { kw, v, c, raw: None }
    }

    /// The keyword without its trailing spaces
    pub fn keyword(&self) -> Result<&str, Error> {
        let kw = std::str::from_utf8(&self.kw)?;
        Ok(kw.trim_end())
    }

    pub fn is_commentary(&self) -> bool {
        COMMENTARY_KW.contains(&&self.kw)
    }

    /// Replace the value, keeping the comment
    pub fn set_value(&mut self, v: Value) {
        self.v = v;
        self.raw = None;
    }

    /// Whether the card differs from the record it was parsed from
    pub fn is_modified(&self) -> bool {
        self.raw.is_none()
    }

    fn name(&self) -> String {
        String::from_utf8_lossy(&self.kw).trim_end().to_owned()
    }

    /// Get the 80 bytes record of the card
    ///
    /// Unmodified cards give back the exact record they were parsed from.
    /// The others are written in the fixed format: numbers and logicals are
    /// right-justified to column 30, strings begin at column 11.
    pub fn to_bytes(&self) -> Result<[u8; CARD_SIZE], Error> {
        if let Some(raw) = self.raw {
            return Ok(raw);
        }

        let mut record = Vec::with_capacity(CARD_SIZE);
        record.extend_from_slice(&self.kw);
        if self.is_commentary() {
            if let Value::String(text) = &self.v {
                record.extend_from_slice(text.as_bytes());
            }
        } else {
            record.extend_from_slice(b"= ");
            let value = match &self.v {
                Value::Integer(i) => format!("{i:>20}"),
                Value::Float(f) => {
                    let f = format_float(*f).ok_or_else(|| Error::NonFiniteValue(self.name()))?;
                    format!("{f:>20}")
                }
                Value::Logical(b) => format!("{:>20}", if *b { "T" } else { "F" }),
                Value::String(s) => {
                    let escaped = s.replace('\'', "''");
                    format!("'{escaped:<8}'")
                }
                Value::Undefined => String::new(),
            };
            record.extend_from_slice(value.as_bytes());
            if record.len() > CARD_SIZE {
                return Err(Error::InvalidCard(format!(
                    "{} value does not fit in a card",
                    self.name()
                )));
            }

            if let Some(c) = &self.c {
                record.extend_from_slice(b" / ");
                record.extend_from_slice(c.as_bytes());
            }
        }
        // Overlong comments are cut
        record.truncate(CARD_SIZE);

        let mut buf = [b' '; CARD_SIZE];
        buf[..record.len()].copy_from_slice(&record);
        Ok(buf)
    }
}

/// Shortest representation of a float that parses back to the same value
pub(crate) fn format_float(v: f64) -> Option<String> {
    if !v.is_finite() {
        return None;
    }

    let s = format!("{v:?}");
    if !s.contains('e') {
        return Some(s);
    }

    let s = format!("{v:E}");
    match s.split_once('E') {
        Some((mantissa, exp)) if !mantissa.contains('.') => Some(format!("{mantissa}.0E{exp}")),
        _ => Some(s),
    }
}

/// Parse a 80 bytes record. Returns `None` for the END card
pub fn parse_card(buf: &[u8; CARD_SIZE]) -> Result<Option<Card>, Error> {
    let mut kw: Keyword = [b' '; 8];
    kw.copy_from_slice(&buf[..8]);
    if &kw == b"END     " {
        return Ok(None);
    }

    let text = String::from_utf8_lossy(&buf[8..]);
    let (v, c) = if &buf[8..10] == b"= " && !COMMENTARY_KW.contains(&&kw) {
        parse_value_field(&text[2..])
    } else {
        let text = text.trim_end();
        let v = if text.is_empty() {
            Value::Undefined
        } else {
            Value::String(text.to_owned())
        };
        (v, None)
    };

    Ok(Some(Card { kw, v, c, raw: Some(*buf) }))
}

fn parse_value_field(field: &str) -> (Value, Option<String>) {
    let field = field.trim_start();
    if let Some(quoted) = field.strip_prefix('\'') {
        let mut value = String::new();
        let mut end = None;

        let mut chars = quoted.char_indices().peekable();
        while let Some((idx, ch)) = chars.next() {
            if ch != '\'' {
                value.push(ch);
            } else if let Some((_, '\'')) = chars.peek() {
                // '' is an escaped quote
                value.push('\'');
                chars.next();
            } else {
                end = Some(idx + 1);
                break;
            }
        }

        let comment = match end {
            Some(end) => parse_comment(&quoted[end..]),
            None => {
                warn!("String value {field} is not terminated by a quote");
                None
            }
        };
        // Trailing spaces are not significant in FITS strings
        (Value::String(value.trim_end().to_owned()), comment)
    } else {
        let (value, comment) = match field.split_once('/') {
            Some((value, comment)) => (value, Some(comment)),
            None => (field, None),
        };
        let comment = comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        (parse_value(value.trim()), comment)
    }
}

fn parse_comment(rest: &str) -> Option<String> {
    rest.trim_start()
        .strip_prefix('/')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
}

fn parse_value(value: &str) -> Value {
    match value {
        "" => Value::Undefined,
        "T" => Value::Logical(true),
        "F" => Value::Logical(false),
        _ => {
            if let Ok(i) = value.parse::<i64>() {
                Value::Integer(i)
            } else if let Ok(f) = value.replace(['D', 'd'], "E").parse::<f64>() {
                Value::Float(f)
            } else {
                // Complex values and anything else are kept as written
                Value::String(value.to_owned())
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn record(s: &str) -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..s.len()].copy_from_slice(s.as_bytes());
    buf
}
