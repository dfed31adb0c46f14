//! Keyed and indexed navigation into a [`Value`] with per-access policies for
//! missing steps and JSON `null`.
//!
//! Every lookup goes through [`Value::at`], which takes one [`Step`] plus a
//! [`NullPolicy`] and a [`MissingPolicy`]. The named methods cover the common
//! combinations:
//!
//! | method          | missing step | `null`             |
//! |-----------------|--------------|--------------------|
//! | `get`           | error        | returned as `Null` |
//! | `get_non_null`  | error        | error              |
//! | `get_or_null`   | error        | absent             |
//! | `get_optional`  | absent       | absent             |
//!
//! Absent results are `None`. [`OptionalValue`] repeats the same methods on
//! `Option<&Value>`, where `None` passes straight through, so a chain of
//! tolerant lookups stops quietly at the first gap.
//!
//! ```rust
//! use jsonbabel::{OptionalValue, parse};
//!
//! let v = parse(r#"{"a": null, "b": {"c": [10, 20]}}"#).unwrap();
//! assert!(v.get_non_null("a").is_err());
//! assert_eq!(v.get_or_null("a").unwrap(), None);
//! assert_eq!(v.get_optional("x").unwrap().get_optional("y").unwrap(), None);
//!
//! let c: i64 = v.get("b").unwrap().get("c").unwrap().extract(1).unwrap();
//! assert_eq!(c, 20);
//! ```
use alloc::string::String;

use crate::{decode::Decode, error::DecodeError, value::Value};

/// One step of a path: an array index or an object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathItem {
    /// Position in an array.
    Index(usize),
    /// Member name in an object.
    Key(String),
}

// Conversions so callers can write `path![0, "foo"]`. Negative indices wrap
// and are reported as out of bounds.
macro_rules! impl_from_int_for_path_item {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PathItem {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn from(i: $t) -> Self {
                    PathItem::Index(i as usize)
                }
            }
        )*
    };
}

impl_from_int_for_path_item!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for PathItem {
    fn from(s: &str) -> Self {
        Self::Key(s.into())
    }
}

impl From<String> for PathItem {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

/// Something that selects one child of a container value.
pub trait Step {
    /// Looks the step up in `container`.
    ///
    /// Returns `Ok(None)` when the container has the right kind but no such
    /// child.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TypeMismatch`] when `container` is not the
    /// array or object this step expects.
    fn lookup<'v>(&self, container: &'v Value) -> Result<Option<&'v Value>, DecodeError>;

    /// The error reported when the child is missing, or is `null` and the
    /// caller rejects nulls.
    fn absent(&self, container: &Value) -> DecodeError;
}

impl Step for usize {
    fn lookup<'v>(&self, container: &'v Value) -> Result<Option<&'v Value>, DecodeError> {
        Ok(container.require_array()?.get(*self))
    }

    fn absent(&self, container: &Value) -> DecodeError {
        DecodeError::OutOfBounds {
            index: *self,
            array: container.as_array().cloned().unwrap_or_default(),
        }
    }
}

impl Step for str {
    fn lookup<'v>(&self, container: &'v Value) -> Result<Option<&'v Value>, DecodeError> {
        Ok(container.require_object()?.get(self))
    }

    fn absent(&self, container: &Value) -> DecodeError {
        DecodeError::MissingKey {
            key: self.into(),
            object: container.as_object().cloned().unwrap_or_default(),
        }
    }
}

impl Step for String {
    fn lookup<'v>(&self, container: &'v Value) -> Result<Option<&'v Value>, DecodeError> {
        self.as_str().lookup(container)
    }

    fn absent(&self, container: &Value) -> DecodeError {
        self.as_str().absent(container)
    }
}

impl Step for PathItem {
    fn lookup<'v>(&self, container: &'v Value) -> Result<Option<&'v Value>, DecodeError> {
        match self {
            PathItem::Index(i) => i.lookup(container),
            PathItem::Key(k) => k.lookup(container),
        }
    }

    fn absent(&self, container: &Value) -> DecodeError {
        match self {
            PathItem::Index(i) => i.absent(container),
            PathItem::Key(k) => k.absent(container),
        }
    }
}

impl<T: Step + ?Sized> Step for &T {
    fn lookup<'v>(&self, container: &'v Value) -> Result<Option<&'v Value>, DecodeError> {
        (**self).lookup(container)
    }

    fn absent(&self, container: &Value) -> DecodeError {
        (**self).absent(container)
    }
}

/// How a child that is present but JSON `null` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Return the `null` value itself.
    #[default]
    Keep,
    /// Report it like a missing child.
    Reject,
    /// Treat it as absent.
    Absent,
}

/// How a missing index or key is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Fail with [`DecodeError::OutOfBounds`] or [`DecodeError::MissingKey`].
    #[default]
    Reject,
    /// Treat it as absent.
    Absent,
}

impl Value {
    /// Looks up one child under explicit policies.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeError::TypeMismatch`] when `self` is the wrong kind
    /// of container, and with [`DecodeError::OutOfBounds`] or
    /// [`DecodeError::MissingKey`] when the policies reject what was found.
    pub fn at(
        &self,
        step: impl Step,
        null: NullPolicy,
        missing: MissingPolicy,
    ) -> Result<Option<&Value>, DecodeError> {
        match step.lookup(self)? {
            None => match missing {
                MissingPolicy::Reject => Err(step.absent(self)),
                MissingPolicy::Absent => Ok(None),
            },
            Some(null_value @ Value::Null) => match null {
                NullPolicy::Keep => Ok(Some(null_value)),
                NullPolicy::Reject => Err(step.absent(self)),
                NullPolicy::Absent => Ok(None),
            },
            found => Ok(found),
        }
    }

    /// Strict lookup; a `null` child is returned as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// See [`Value::at`].
    pub fn get(&self, step: impl Step) -> Result<&Value, DecodeError> {
        step.lookup(self)?.ok_or_else(|| step.absent(self))
    }

    /// Strict lookup that also rejects `null`.
    ///
    /// # Errors
    ///
    /// See [`Value::at`].
    pub fn get_non_null(&self, step: impl Step) -> Result<&Value, DecodeError> {
        match step.lookup(self)? {
            Some(Value::Null) | None => Err(step.absent(self)),
            Some(found) => Ok(found),
        }
    }

    /// The child must exist, but `null` counts as absent.
    ///
    /// # Errors
    ///
    /// See [`Value::at`].
    pub fn get_or_null(&self, step: impl Step) -> Result<Option<&Value>, DecodeError> {
        self.at(step, NullPolicy::Absent, MissingPolicy::Reject)
    }

    /// Missing and `null` children both count as absent.
    ///
    /// # Errors
    ///
    /// Only fails when `self` is the wrong kind of container.
    pub fn get_optional(&self, step: impl Step) -> Result<Option<&Value>, DecodeError> {
        self.at(step, NullPolicy::Absent, MissingPolicy::Absent)
    }

    /// Walks a whole path, applying the same policies at every step. An
    /// absent step ends the walk with `None`.
    ///
    /// ```rust
    /// use jsonbabel::{MissingPolicy, NullPolicy, Value, path, value};
    ///
    /// let v = value!({"a": [{"b": true}]});
    /// let found = v
    ///     .pointer(&path!["a", 0, "b"], NullPolicy::Keep, MissingPolicy::Reject)
    ///     .unwrap();
    /// assert_eq!(found, Some(&Value::Boolean(true)));
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Value::at`].
    pub fn pointer(
        &self,
        path: &[PathItem],
        null: NullPolicy,
        missing: MissingPolicy,
    ) -> Result<Option<&Value>, DecodeError> {
        let mut current = self;
        for item in path {
            match current.at(item, null, missing)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Strict lookup followed by [`Decode::decode`].
    ///
    /// # Errors
    ///
    /// Navigation and decoding errors both propagate.
    pub fn extract<T: Decode>(&self, step: impl Step) -> Result<T, DecodeError> {
        T::decode(self.get(step)?)
    }

    /// [`Value::get_or_null`] followed by [`Decode::decode`].
    ///
    /// # Errors
    ///
    /// Navigation and decoding errors both propagate.
    pub fn extract_or_null<T: Decode>(&self, step: impl Step) -> Result<Option<T>, DecodeError> {
        self.get_or_null(step)?.map(T::decode).transpose()
    }

    /// [`Value::get_optional`] followed by [`Decode::decode`].
    ///
    /// # Errors
    ///
    /// Navigation and decoding errors both propagate.
    pub fn extract_optional<T: Decode>(&self, step: impl Step) -> Result<Option<T>, DecodeError> {
        self.get_optional(step)?.map(T::decode).transpose()
    }
}

/// Navigation on a possibly-absent value. `None` short-circuits every method
/// to `Ok(None)`.
pub trait OptionalValue<'v> {
    /// # Errors
    ///
    /// See [`Value::at`].
    fn at(
        self,
        step: impl Step,
        null: NullPolicy,
        missing: MissingPolicy,
    ) -> Result<Option<&'v Value>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::get`].
    fn get(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::get_non_null`].
    fn get_non_null(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::get_or_null`].
    fn get_or_null(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::get_optional`].
    fn get_optional(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError>;

    /// # Errors
    ///
    /// See [`Decode::decode`].
    fn decode<T: Decode>(self) -> Result<Option<T>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::extract`].
    fn extract<T: Decode>(self, step: impl Step) -> Result<Option<T>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::extract_or_null`].
    fn extract_or_null<T: Decode>(self, step: impl Step) -> Result<Option<T>, DecodeError>;

    /// # Errors
    ///
    /// See [`Value::extract_optional`].
    fn extract_optional<T: Decode>(self, step: impl Step) -> Result<Option<T>, DecodeError>;
}

impl<'v> OptionalValue<'v> for Option<&'v Value> {
    fn at(
        self,
        step: impl Step,
        null: NullPolicy,
        missing: MissingPolicy,
    ) -> Result<Option<&'v Value>, DecodeError> {
        self.map_or(Ok(None), |v| v.at(step, null, missing))
    }

    fn get(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError> {
        self.map(|v| v.get(step)).transpose()
    }

    fn get_non_null(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError> {
        self.map(|v| v.get_non_null(step)).transpose()
    }

    fn get_or_null(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError> {
        self.map_or(Ok(None), |v| v.get_or_null(step))
    }

    fn get_optional(self, step: impl Step) -> Result<Option<&'v Value>, DecodeError> {
        self.map_or(Ok(None), |v| v.get_optional(step))
    }

    fn decode<T: Decode>(self) -> Result<Option<T>, DecodeError> {
        self.map(T::decode).transpose()
    }

    fn extract<T: Decode>(self, step: impl Step) -> Result<Option<T>, DecodeError> {
        self.map(|v| v.extract(step)).transpose()
    }

    fn extract_or_null<T: Decode>(self, step: impl Step) -> Result<Option<T>, DecodeError> {
        self.map_or(Ok(None), |v| v.extract_or_null(step))
    }

    fn extract_optional<T: Decode>(self, step: impl Step) -> Result<Option<T>, DecodeError> {
        self.map_or(Ok(None), |v| v.extract_optional(step))
    }
}
