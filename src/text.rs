use std::fmt;
use std::str::FromStr;

use crate::error::MatrixError;
use crate::matrix::Matrix;

/// Token the identity matrix serializes to, and the only non-numeric form
/// accepted by the parser.
const IDENTITY_TOKEN: &str = "Identity";

/// Culture-style numeric formatting configuration for the matrix text form.
///
/// Passed explicitly to [`Matrix::parse_with`] and
/// [`Matrix::to_string_with`]; there is no global locale lookup. The list
/// separator is derived from the decimal mark: cultures whose decimal mark
/// is `,` (or `;`) join fields with `;` so the two cannot be confused,
/// everything else joins with `,`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
}

impl NumberFormat {
    /// `.` decimal mark, `,` list separator.
    pub const INVARIANT: NumberFormat = NumberFormat {
        decimal_separator: '.',
    };

    pub fn list_separator(&self) -> char {
        if self.decimal_separator == ',' || self.decimal_separator == ';' {
            ';'
        } else {
            ','
        }
    }

    // The parser is tolerant: either delimiter splits, unless it doubles as
    // the decimal mark.
    fn splits_fields(&self, c: char) -> bool {
        (c == ',' || c == ';') && c != self.decimal_separator
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::INVARIANT
    }
}

impl Matrix {
    /// Formats as `Identity` or six delimited fields, per `fmt`.
    pub fn to_string_with(&self, fmt: &NumberFormat) -> String {
        if self.is_identity() {
            return IDENTITY_TOKEN.to_string();
        }
        let sep = fmt.list_separator();
        let fields = [
            self.m11,
            self.m12,
            self.m21,
            self.m22,
            self.offset_x,
            self.offset_y,
        ];
        let mut out = String::new();
        for (i, v) in fields.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.push_str(&format_scalar(*v, fmt));
        }
        out
    }

    /// Parses the text form produced by [`Matrix::to_string_with`].
    ///
    /// The whole string is trimmed first. `Identity` (exact) yields the
    /// identity matrix; anything else must split into exactly six fields,
    /// each a valid number under `fmt`, with whitespace around fields
    /// ignored. Wrong field counts fail with
    /// [`MatrixError::WrongFieldCount`], bad numbers in a six-field string
    /// with [`MatrixError::InvalidNumber`].
    pub fn parse_with(s: &str, fmt: &NumberFormat) -> Result<Matrix, MatrixError> {
        let s = s.trim();
        if s == IDENTITY_TOKEN {
            return Ok(Matrix::identity());
        }
        let tokens: Vec<&str> = s.split(|c| fmt.splits_fields(c)).collect();
        if tokens.len() != 6 {
            return Err(MatrixError::WrongFieldCount {
                found: tokens.len(),
            });
        }
        let mut vals = [0.0f64; 6];
        for (v, token) in vals.iter_mut().zip(&tokens) {
            *v = parse_scalar(token, fmt)?;
        }
        Ok(Matrix::new(
            vals[0], vals[1], vals[2], vals[3], vals[4], vals[5],
        ))
    }
}

/// Invariant-culture text form.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&NumberFormat::INVARIANT))
    }
}

/// Invariant-culture parse.
impl FromStr for Matrix {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Matrix::parse_with(s, &NumberFormat::INVARIANT)
    }
}

fn format_scalar(v: f64, fmt: &NumberFormat) -> String {
    let s = v.to_string();
    if fmt.decimal_separator == '.' {
        s
    } else {
        s.replace('.', &fmt.decimal_separator.to_string())
    }
}

fn parse_scalar(token: &str, fmt: &NumberFormat) -> Result<f64, MatrixError> {
    let token = token.trim();
    let invalid = || MatrixError::InvalidNumber {
        token: token.to_string(),
    };
    if fmt.decimal_separator == '.' {
        token.parse::<f64>().map_err(|_| invalid())
    } else {
        token
            .replace(fmt.decimal_separator, ".")
            .parse::<f64>()
            .map_err(|_| invalid())
    }
}
