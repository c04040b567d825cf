use super::ParseError;
use std::io::BufRead;

fn is_delim(b: u8) -> bool {
    matches!(b, b'[' | b']' | b'(' | b')')
}

/// Splits a reader into whitespace-separated tokens; `[ ] ( )` are always
/// tokens of their own. Payload managers consume their tokens through the
/// same tokenizer the graph reader drives.
pub struct Tokenizer<'a> {
    input: &'a mut dyn BufRead,
    unread: Option<u8>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a mut dyn BufRead) -> Self {
        Self {
            input,
            unread: None,
        }
    }

    fn read_byte(&mut self) -> std::io::Result<Option<u8>> {
        if let Some(b) = self.unread.take() {
            return Ok(Some(b));
        }
        let buf = self.input.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }
        let b = buf[0];
        self.input.consume(1);
        Ok(Some(b))
    }

    /// The next token, or `None` at end of input.
    pub fn next(&mut self) -> Result<Option<String>, ParseError> {
        let mut b = loop {
            match self.read_byte()? {
                None => return Ok(None),
                Some(b) if b.is_ascii_whitespace() => continue,
                Some(b) => break b,
            }
        };
        if is_delim(b) {
            return Ok(Some((b as char).to_string()));
        }
        let mut tok = Vec::new();
        loop {
            tok.push(b);
            match self.read_byte()? {
                None => break,
                Some(nb) if nb.is_ascii_whitespace() => break,
                Some(nb) if is_delim(nb) => {
                    self.unread = Some(nb);
                    break;
                }
                Some(nb) => b = nb,
            }
        }
        String::from_utf8(tok)
            .map(Some)
            .map_err(|_| ParseError::InvalidUtf8)
    }

    /// The next token, erroring out at end of input.
    pub fn require(&mut self) -> Result<String, ParseError> {
        self.next()?.ok_or(ParseError::UnexpectedEof)
    }

    pub fn expect(&mut self, want: &str) -> Result<(), ParseError> {
        let found = self.require()?;
        if found == want {
            Ok(())
        } else {
            Err(ParseError::Unexpected {
                expected: want.to_string(),
                found,
            })
        }
    }
}
