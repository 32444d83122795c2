//! Token conversions shared by the interface modules

use crate::error::CodecError;
use ethabi::Token;
use types::{Address, U256};

/// Signed integer as a two's-complement 256-bit word
pub(crate) fn int_token(value: i64) -> Token {
    let magnitude = U256::from(value.unsigned_abs());
    if value < 0 {
        Token::Int((!magnitude).overflowing_add(U256::one()).0)
    } else {
        Token::Int(magnitude)
    }
}

/// Two's-complement word back to `i64`, rejecting values outside int64
pub(crate) fn word_to_i64(function: &str, word: U256) -> Result<i64, CodecError> {
    let out_of_range = || CodecError::OutOfRange {
        function: function.to_string(),
        detail: format!("0x{:x} does not fit in int64", word),
    };

    if word.bit(255) {
        let magnitude = (!word).overflowing_add(U256::one()).0;
        let limit = U256::from(i64::MAX as u64) + U256::one();
        if magnitude > limit {
            return Err(out_of_range());
        }
        if magnitude == limit {
            return Ok(i64::MIN);
        }
        Ok(-(magnitude.as_u64() as i64))
    } else {
        if word > U256::from(i64::MAX as u64) {
            return Err(out_of_range());
        }
        Ok(word.as_u64() as i64)
    }
}

/// Sequential reader over decoded tokens
pub(crate) struct TokenReader {
    function: String,
    tokens: std::vec::IntoIter<Token>,
}

impl TokenReader {
    pub(crate) fn new(function: &str, tokens: Vec<Token>) -> Self {
        Self {
            function: function.to_string(),
            tokens: tokens.into_iter(),
        }
    }

    fn next(&mut self, expected: &str) -> Result<Token, CodecError> {
        self.tokens.next().ok_or_else(|| self.shape(expected))
    }

    fn shape(&self, expected: &str) -> CodecError {
        CodecError::UnexpectedShape {
            function: self.function.clone(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn address(&mut self) -> Result<Address, CodecError> {
        let token = self.next("address")?;
        token.into_address().ok_or_else(|| self.shape("address"))
    }

    pub(crate) fn uint(&mut self) -> Result<U256, CodecError> {
        let token = self.next("uint")?;
        token.into_uint().ok_or_else(|| self.shape("uint"))
    }

    /// Raw int word, for int256 values compared as words
    pub(crate) fn int_word(&mut self) -> Result<U256, CodecError> {
        let token = self.next("int")?;
        token.into_int().ok_or_else(|| self.shape("int"))
    }

    pub(crate) fn int64(&mut self) -> Result<i64, CodecError> {
        let word = self.int_word()?;
        word_to_i64(&self.function, word)
    }

    pub(crate) fn boolean(&mut self) -> Result<bool, CodecError> {
        let token = self.next("bool")?;
        token.into_bool().ok_or_else(|| self.shape("bool"))
    }

    pub(crate) fn string(&mut self) -> Result<String, CodecError> {
        let token = self.next("string")?;
        token.into_string().ok_or_else(|| self.shape("string"))
    }

    pub(crate) fn bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let token = self.next("bytes")?;
        token.into_bytes().ok_or_else(|| self.shape("bytes"))
    }

    pub(crate) fn array(&mut self) -> Result<Vec<Token>, CodecError> {
        let token = self.next("array")?;
        token.into_array().ok_or_else(|| self.shape("array"))
    }

    /// Reader over the fields of the next tuple
    pub(crate) fn tuple(&mut self) -> Result<TokenReader, CodecError> {
        let token = self.next("tuple")?;
        let fields = token.into_tuple().ok_or_else(|| self.shape("tuple"))?;
        Ok(TokenReader::new(&self.function, fields))
    }

    /// Reader over one element previously taken with [`Self::array`]
    pub(crate) fn element(&self, token: Token) -> Result<TokenReader, CodecError> {
        let fields = token.into_tuple().ok_or_else(|| self.shape("tuple element"))?;
        Ok(TokenReader::new(&self.function, fields))
    }
}
