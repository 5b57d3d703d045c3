#![deny(missing_docs)]

//! # Literal Classes
//!
//! The single table tying a primitive `type`/`format` pair to both the regex
//! its matcher uses and the kind of literal the value source must produce.
//! Generated literals always satisfy their own class regex.

use crate::oas::models::PrimitiveKind;

/// Alphanumeric strings.
pub const STRING_REGEX: &str = "[a-zA-Z0-9]+";
/// Positive integers.
pub const INT_REGEX: &str = r"([1-9]\d*)";
/// Decimal numbers.
pub const DECIMAL_REGEX: &str = r"-?(\d*\.\d+|\d+)";
/// Booleans.
pub const BOOLEAN_REGEX: &str = "(true|false)";
/// Lower-case hyphenated UUIDs.
pub const UUID_REGEX: &str = "[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}";
/// ISO-8601 calendar dates.
pub const ISO_DATE_REGEX: &str = r"(\d\d\d\d)-(0[1-9]|1[012])-(0[1-9]|[12][0-9]|3[01])";
/// ISO-8601 date-times with a zone designator.
pub const ISO_DATE_TIME_REGEX: &str = r"([0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.\d+)?(Z|[+-]\d\d:\d\d)";
/// Catch-all for untyped values.
pub const DEFAULT_REGEX: &str = ".*";

/// A family of literals sharing one matcher regex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralClass {
    /// `string` without a recognized format.
    AlphaNumeric,
    /// `integer` (`int32`, `int64`).
    PositiveInt,
    /// `number` (`float`, `double`).
    Decimal,
    /// `boolean`.
    Boolean,
    /// `string` / `uuid`.
    Uuid,
    /// `string` / `date`.
    IsoDate,
    /// `string` / `date-time`.
    IsoDateTime,
    /// No type information.
    Anything,
}

impl LiteralClass {
    /// Dispatches on a primitive kind and its optional format.
    pub fn of(kind: PrimitiveKind, format: Option<&str>) -> Self {
        match (kind, format) {
            (PrimitiveKind::String, Some("uuid")) => LiteralClass::Uuid,
            (PrimitiveKind::String, Some("date")) => LiteralClass::IsoDate,
            (PrimitiveKind::String, Some("date-time")) => LiteralClass::IsoDateTime,
            (PrimitiveKind::String, _) => LiteralClass::AlphaNumeric,
            (PrimitiveKind::Integer, _) => LiteralClass::PositiveInt,
            (PrimitiveKind::Number, _) => LiteralClass::Decimal,
            (PrimitiveKind::Boolean, _) => LiteralClass::Boolean,
            (PrimitiveKind::Any, _) => LiteralClass::Anything,
        }
    }

    /// The matcher regex for this class.
    pub fn regex(self) -> &'static str {
        match self {
            LiteralClass::AlphaNumeric => STRING_REGEX,
            LiteralClass::PositiveInt => INT_REGEX,
            LiteralClass::Decimal => DECIMAL_REGEX,
            LiteralClass::Boolean => BOOLEAN_REGEX,
            LiteralClass::Uuid => UUID_REGEX,
            LiteralClass::IsoDate => ISO_DATE_REGEX,
            LiteralClass::IsoDateTime => ISO_DATE_TIME_REGEX,
            LiteralClass::Anything => DEFAULT_REGEX,
        }
    }
}
