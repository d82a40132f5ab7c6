//! Module implementing the primary header of a FITS file
//!
//! A header basically consists of a list a 80 long characters cards
//! ended by the END card and padded to a multiple of 2880 bytes.
use std::io::{Read, Write};

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::card::{self, Card, Keyword, Value, CARD_SIZE};
use crate::error::Error;
use crate::fits::BLOCK_SIZE;

pub fn consume_next_card<R: Read>(
    reader: &mut R,
    buf: &mut [u8; CARD_SIZE],
    bytes_read: &mut u64,
) -> Result<(), Error> {
    *bytes_read += CARD_SIZE as u64;
    reader
        .read_exact(buf)
        .map_err(|_| Error::FailReadingNextBytes)?;

    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    /* All the cards, in the order of the file */
    cards: Vec<Card>,

    /* Position of the first card of each valued keyword */
    #[serde(skip)]
    index: IndexMap<Keyword, usize>,
}

impl Header {
    /// Parse a primary header, consuming the cards up to `END`
    ///
    /// # Params
    /// * `reader` - positioned at the first byte of the file
    /// * `num_bytes_read` - incremented by the number of bytes consumed
    pub fn parse<R: Read>(reader: &mut R, num_bytes_read: &mut u64) -> Result<Self, Error> {
        let mut card_80_bytes_buf = [b' '; CARD_SIZE];

        // SIMPLE
        consume_next_card(reader, &mut card_80_bytes_buf, num_bytes_read)?;
        if &card_80_bytes_buf[..8] != b"SIMPLE  " {
            return Err(Error::NotPrimaryHeader);
        }

        let mut header = Self::default();
        while let Some(card) = card::parse_card(&card_80_bytes_buf)? {
            header.push(card);
            consume_next_card(reader, &mut card_80_bytes_buf, num_bytes_read)?;
        }
        debug!("{} cards parsed", header.len());

        /* The last card was a END one */
        Ok(header)
    }

    fn push(&mut self, card: Card) {
        if !card.is_commentary() && !self.index.contains_key(&card.kw) {
            self.index.insert(card.kw, self.cards.len());
        }
        self.cards.push(card);
    }

    /// Get a card from its keyword name
    pub fn get(&self, name: &str) -> Option<&Card> {
        let kw = card::keyword(name).ok()?;
        self.index.get(&kw).map(|&idx| &self.cards[idx])
    }

    /// Get the value of a card, failing if the keyword is absent
    pub fn get_value(&self, name: &str) -> Result<&Value, Error> {
        self.get(name)
            .map(|card| &card.v)
            .ok_or_else(|| Error::MissingKeyword(name.to_owned()))
    }

    /// Get a numeric value. Integer and floating point cards are both accepted
    pub fn get_f64(&self, name: &str) -> Result<f64, Error> {
        self.get_value(name)?
            .as_f64()
            .ok_or_else(|| Error::KeywordType(name.to_owned(), "numeric"))
    }

    pub fn get_str(&self, name: &str) -> Result<&str, Error> {
        self.get_value(name)?
            .as_str()
            .ok_or_else(|| Error::KeywordType(name.to_owned(), "string"))
    }

    /// Set the value of a keyword
    ///
    /// An existing card is updated in place and keeps its comment.
    /// Otherwise a new card is added at the end of the header.
    pub fn set(&mut self, name: &str, v: Value) -> Result<(), Error> {
        let kw = card::keyword(name)?;
        match self.index.get(&kw) {
            Some(&idx) => self.cards[idx].set_value(v),
            None => self.push(Card::new(kw, v, None)),
        }
        Ok(())
    }

    /// The valued keywords, in the order they appear
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.index
            .keys()
            .filter_map(|kw| std::str::from_utf8(kw).ok())
            .map(str::trim_end)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Write the cards followed by END, padded with spaces to a 2880 bytes block
    ///
    /// Returns the number of bytes written
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64, Error> {
        let mut num_bytes_written = 0;
        for card in &self.cards {
            writer.write_all(&card.to_bytes()?)?;
            num_bytes_written += CARD_SIZE as u64;
        }

        let mut end = [b' '; CARD_SIZE];
        end[..3].copy_from_slice(b"END");
        writer.write_all(&end)?;
        num_bytes_written += CARD_SIZE as u64;

        let block = BLOCK_SIZE as u64;
        let padding = (block - num_bytes_written % block) % block;
        writer.write_all(&vec![b' '; padding as usize])?;

        Ok(num_bytes_written + padding)
    }
}

impl FromIterator<Card> for Header {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut header = Self::default();
        for card in iter {
            header.push(card);
        }
        header
    }
}
