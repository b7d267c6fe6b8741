//! Item canonicalization
//!
//! Every value the filter sees is reduced to one byte sequence before it is
//! hashed. Text is UTF-8 encoded, raw bytes are taken as-is. Anything else
//! must be converted by the caller into one of these two forms; the filter
//! never stringifies arbitrary values on its own.

use std::borrow::Cow;
use std::fmt;

/// A value that can be recorded in or tested against a filter
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item<'a> {
    /// Text, hashed through its UTF-8 encoding
    Text(Cow<'a, str>),
    /// Raw bytes, hashed unchanged
    Bytes(Cow<'a, [u8]>),
}

impl Item<'_> {
    /// Canonical byte form fed to the digest
    ///
    /// `Item::from("abc")` and `Item::from(b"abc")` yield the same bytes and
    /// therefore the same bit positions.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Item::Text(text) => text.as_bytes(),
            Item::Bytes(bytes) => bytes,
        }
    }

    /// Detach from any borrowed input
    pub fn into_owned(self) -> Item<'static> {
        match self {
            Item::Text(text) => Item::Text(Cow::Owned(text.into_owned())),
            Item::Bytes(bytes) => Item::Bytes(Cow::Owned(bytes.into_owned())),
        }
    }
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Text(text) => f.write_str(text),
            Item::Bytes(bytes) => {
                for b in bytes.iter() {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

impl<'a> From<&'a str> for Item<'a> {
    fn from(text: &'a str) -> Self {
        Item::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Item<'a> {
    fn from(text: &'a String) -> Self {
        Item::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for Item<'static> {
    fn from(text: String) -> Self {
        Item::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a [u8]> for Item<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Item::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Item<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Item::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl<'a> From<&'a Vec<u8>> for Item<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Item::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Vec<u8>> for Item<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Item::Bytes(Cow::Owned(bytes))
    }
}

impl<'a, 'b> From<&'b Item<'a>> for Item<'b> {
    fn from(item: &'b Item<'a>) -> Self {
        match item {
            Item::Text(text) => Item::Text(Cow::Borrowed(text.as_ref())),
            Item::Bytes(bytes) => Item::Bytes(Cow::Borrowed(bytes.as_ref())),
        }
    }
}
