use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Null,
    True,
    False,
}

impl Keyword {
    pub fn text(self) -> &'static str {
        match self {
            Keyword::Null => "null",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }

    fn value(self) -> Value {
        match self {
            Keyword::Null => Value::Null,
            Keyword::True => Value::Boolean(true),
            Keyword::False => Value::Boolean(false),
        }
    }
}

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* it was the last byte of the literal.
    Done(Value),
    /// Character did **not** match the expected byte.
    Reject,
}

/// Matches the remaining bytes of `null`, `true` or `false` after the first
/// character has selected the keyword.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    remaining: &'static [u8],
    keyword: Keyword,
}

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* character (`n`, `t`, or `f`).
    pub fn new(first: char) -> Option<Self> {
        let keyword = match first {
            'n' => Keyword::Null,
            't' => Keyword::True,
            'f' => Keyword::False,
            _ => return None,
        };
        Some(Self {
            remaining: &keyword.text().as_bytes()[1..],
            keyword,
        })
    }

    pub fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Give the matcher the next input character and learn what to do next.
    pub fn step(&mut self, c: char) -> Step {
        match self.remaining.split_first() {
            Some((&expected, rest)) if char::from(expected) == c => {
                self.remaining = rest;
                if rest.is_empty() {
                    Step::Done(self.keyword.value())
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}
