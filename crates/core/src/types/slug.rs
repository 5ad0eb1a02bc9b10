//! URL slug type for articles and products.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters other than `a-z`, `0-9`, and `-`.
    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacters,
    /// The input starts or ends with a hyphen.
    #[error("slug must not start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL path segment identifying an article or product.
///
/// ## Examples
///
/// ```
/// use registra_core::Slug;
///
/// assert!(Slug::parse("pos-terminal-v2").is_ok());
/// assert!(Slug::parse("Launch Notes").is_err());
/// assert!(Slug::parse("-leading").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains characters
    /// outside `[a-z0-9-]`, or has a leading/trailing hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SlugError::InvalidCharacters);
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from free-form text (e.g., an article title).
    ///
    /// Lowercases the input, replaces runs of non-alphanumeric characters
    /// with single hyphens, and trims edge hyphens.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if the input contains no usable
    /// characters, or [`SlugError::TooLong`] if the result exceeds the
    /// maximum length.
    pub fn from_title(title: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(title.len());
        let mut last_hyphen = true; // suppress a leading hyphen

        for c in title.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
                last_hyphen = false;
            } else if !last_hyphen {
                out.push('-');
                last_hyphen = true;
            }
        }

        while out.ends_with('-') {
            out.pop();
        }

        Self::parse(&out)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Slug::parse("pos-terminal").is_ok());
        assert!(Slug::parse("v2").is_ok());
        assert!(Slug::parse("2024-roadmap").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
        assert!(matches!(
            Slug::parse("With Spaces"),
            Err(SlugError::InvalidCharacters)
        ));
        assert!(matches!(
            Slug::parse("UPPER"),
            Err(SlugError::InvalidCharacters)
        ));
        assert!(matches!(Slug::parse("-edge"), Err(SlugError::EdgeHyphen)));
        assert!(matches!(Slug::parse("edge-"), Err(SlugError::EdgeHyphen)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Slug::MAX_LENGTH + 1);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_from_title() {
        let slug = Slug::from_title("Introducing the POS Terminal, v2!").unwrap();
        assert_eq!(slug.as_str(), "introducing-the-pos-terminal-v2");
    }

    #[test]
    fn test_from_title_collapses_runs() {
        let slug = Slug::from_title("  a -- b  ").unwrap();
        assert_eq!(slug.as_str(), "a-b");
    }

    #[test]
    fn test_from_title_empty() {
        assert!(matches!(Slug::from_title("!!!"), Err(SlugError::Empty)));
    }
}
