//! Literal values appearing in expressions.

use std::fmt;

/// Radix of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Decimal,
    Hex,
    Octal,
    Binary,
}

impl Base {
    /// Map a base marker (`d`, `H`, ...) to its radix.
    #[must_use]
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'd' | 'D' => Some(Self::Decimal),
            'h' | 'H' => Some(Self::Hex),
            'o' | 'O' => Some(Self::Octal),
            'b' | 'B' => Some(Self::Binary),
            _ => None,
        }
    }

    #[must_use]
    pub fn radix(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
            Self::Octal => 8,
            Self::Binary => 2,
        }
    }

    fn marker(self) -> char {
        match self {
            Self::Decimal => 'd',
            Self::Hex => 'h',
            Self::Octal => 'o',
            Self::Binary => 'b',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Decimal => "decimal",
            Self::Hex => "hexadecimal",
            Self::Octal => "octal",
            Self::Binary => "binary",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

/// Integer literal such as `42`, `'hFF` or `8'b1010_0101`.
///
/// `digits` never contains `_` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntLiteral {
    pub width: Option<u32>,
    pub sign: Option<Sign>,
    pub base: Base,
    /// Whether the literal spelled its base explicitly (`'d10` vs `10`).
    pub explicit_base: bool,
    pub digits: String,
}

impl IntLiteral {
    /// Magnitude of the literal, or `None` when it does not fit in `u128`.
    #[must_use]
    pub fn value(&self) -> Option<u128> {
        u128::from_str_radix(&self.digits, self.base.radix()).ok()
    }

    fn to_source(&self) -> String {
        let sign = match self.sign {
            Some(Sign::Minus) => "-",
            Some(Sign::Plus) => "+",
            None => "",
        };
        let width = self.width.map(|w| w.to_string()).unwrap_or_default();
        if self.explicit_base || self.width.is_some() {
            format!("{sign}{width}'{}{}", self.base.marker(), self.digits)
        } else {
            format!("{sign}{}", self.digits)
        }
    }
}

/// Real literal such as `1.5` or `2.0e-3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealLiteral {
    pub integer: String,
    pub fraction: Option<String>,
    pub exponent: Option<Exponent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exponent {
    pub sign: Option<Sign>,
    pub digits: String,
}

impl RealLiteral {
    /// Nearest `f64`, or `None` if the digits cannot be represented.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.to_source().parse().ok()
    }

    fn to_source(&self) -> String {
        let mut out = self.integer.clone();
        if let Some(fraction) = &self.fraction {
            out.push('.');
            out.push_str(fraction);
        }
        if let Some(exp) = &self.exponent {
            out.push('e');
            if exp.sign == Some(Sign::Minus) {
                out.push('-');
            }
            out.push_str(&exp.digits);
        }
        out
    }
}

/// Literal values that can appear in expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(IntLiteral),
    /// `'0` (false) or `'1` (true): every bit of the target set to that value.
    Fill(bool),
    Real(RealLiteral),
    /// String body without the surrounding quotes.
    String(String),
}

impl Literal {
    pub(crate) fn to_sexpr(&self) -> String {
        match self {
            Self::Int(int) => int.to_source(),
            Self::Fill(bit) => if *bit { "'1" } else { "'0" }.to_string(),
            Self::Real(real) => real.to_source(),
            Self::String(s) => format!("\"{s}\""),
        }
    }
}
