use alloc::{boxed::Box, string::String, vec::Vec};

use bstr::BStr;
use thiserror::Error;

use crate::{
    parser::ParseError,
    value::{Array, Map, Value},
};

/// Why a [`Value`] could not be turned into a typed result.
///
/// The first four variants are terminal causes. `Immediate` and `Nested`
/// record which type was being decoded when the cause surfaced, forming a
/// chain from the outermost type down to exactly one terminal cause:
/// `Immediate` always wraps a terminal cause, `Nested` always wraps another
/// wrapper.
#[derive(Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DecodeError {
    /// An array index past the end of `array`.
    #[error("index {index} is out of bounds for an array of length {}", array.len())]
    OutOfBounds { index: usize, array: Array },
    /// An object without `key`.
    #[error("missing key {key:?}")]
    MissingKey { key: String, object: Map },
    /// `value` cannot be coerced to the type named by `expected`.
    #[error("type mismatch: expected {expected}, found {}", value.kind())]
    TypeMismatch {
        expected: &'static str,
        value: Value,
    },
    /// Input bytes that are not valid UTF-8.
    #[error("invalid data: {:?}", BStr::new(data))]
    InvalidData { data: Vec<u8> },
    /// `type_name` failed directly on a terminal cause.
    #[error("while decoding {type_name}: {cause}")]
    Immediate {
        type_name: &'static str,
        cause: Box<DecodeError>,
    },
    /// `type_name` failed because a type it contains failed.
    #[error("while decoding {type_name}: {cause}")]
    Nested {
        type_name: &'static str,
        cause: Box<DecodeError>,
    },
}

impl DecodeError {
    pub(crate) fn type_mismatch<T: ?Sized>(value: &Value) -> Self {
        Self::TypeMismatch {
            expected: core::any::type_name::<T>(),
            value: value.clone(),
        }
    }

    /// Returns `true` for the four causes that do not wrap another error.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Immediate { .. } | Self::Nested { .. })
    }

    /// Attaches "while decoding `type_name`" context. Terminal errors become
    /// `Immediate`, wrappers become `Nested`.
    #[must_use]
    pub fn within(self, type_name: &'static str) -> Self {
        let cause = Box::new(self);
        if cause.is_terminal() {
            Self::Immediate { type_name, cause }
        } else {
            Self::Nested { type_name, cause }
        }
    }

    /// The terminal cause at the end of the chain.
    #[must_use]
    pub fn root_cause(&self) -> &DecodeError {
        let mut current = self;
        while let Self::Immediate { cause, .. } | Self::Nested { cause, .. } = current {
            current = cause;
        }
        current
    }

    /// The type names on the chain, outermost first.
    #[must_use]
    pub fn trail(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut current = self;
        while let Self::Immediate { type_name, cause } | Self::Nested { type_name, cause } = current
        {
            names.push(*type_name);
            current = cause;
        }
        names
    }
}

/// Errors from the entry points that parse and then decode.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The text was not valid JSON.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The JSON did not fit the target type.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
