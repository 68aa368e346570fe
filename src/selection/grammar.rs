//! Request string grammar.
//!
//! ```text
//! request   := name [ selector ] [ "{" unit "}" | "->" norm ]
//! selector  := "[" index ("," index)* "]" | "=" ("rms" | "rss" | "sum" | "mean")
//! ```
//!
//! Examples: `time{s}`, `angle->tooth_id`, `angle[3]{°}`, `freqs[0,2,4]`,
//! `time=rms{s}`.

use crate::error::{FieldAxesError, Result};
use std::fmt;
use std::str::FromStr;

/// Reduction collapsing an axis to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Root mean square.
    Rms,
    /// Root sum square.
    Rss,
    /// Sum.
    Sum,
    /// Arithmetic mean.
    Mean,
}

impl Reduction {
    /// All reductions, in menu order.
    pub const ALL: [Reduction; 4] = [Self::Rms, Self::Rss, Self::Sum, Self::Mean];

    /// Tag used in request strings.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rms => "rms",
            Self::Rss => "rss",
            Self::Sum => "sum",
            Self::Mean => "mean",
        }
    }
}

impl FromStr for Reduction {
    type Err = FieldAxesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.tag() == s)
            .ok_or_else(|| FieldAxesError::UnrecognizedOperation {
                operation: s.to_string(),
            })
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a requested axis is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Whole axis (plot axis).
    Whole,
    /// One index.
    Single,
    /// Several indices (overlay/filter).
    List,
    /// Reduced to one value.
    Reduce(Reduction),
}

/// Parsed form of one request string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedAxis {
    /// Axis tag.
    pub name: String,
    /// Access kind.
    pub extension: Extension,
    /// Indices for `Single` and `List`, possibly negative.
    pub indices: Vec<isize>,
    /// Unit in braces; `Some("")` for explicit `{}`.
    pub unit: Option<String>,
    /// Normalization key after `->`.
    pub normalization: Option<String>,
}

impl RequestedAxis {
    /// Request for a whole axis.
    pub fn whole(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: Extension::Whole,
            indices: Vec::new(),
            unit: None,
            normalization: None,
        }
    }

    /// Parse a request string.
    pub fn parse(request: &str) -> Result<Self> {
        let text = request.trim();
        let invalid = |reason: &str| FieldAxesError::invalid_request(request, reason);

        let (rest, unit, normalization) = if let Some(pos) = text.find("->") {
            let norm = &text[pos + 2..];
            if norm.is_empty() {
                return Err(invalid("empty normalization"));
            }
            (&text[..pos], None, Some(norm.to_string()))
        } else if text.ends_with('}') {
            let open = text.rfind('{').ok_or_else(|| invalid("unbalanced braces"))?;
            (
                &text[..open],
                Some(text[open + 1..text.len() - 1].to_string()),
                None,
            )
        } else {
            (text, None, None)
        };

        let (name, extension, indices) = if let Some(open) = rest.find('[') {
            let inner = rest[open + 1..]
                .strip_suffix(']')
                .ok_or_else(|| invalid("unbalanced brackets"))?;
            let indices = inner
                .split(',')
                .map(|s| s.trim().parse::<isize>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| invalid(&format!("bad index: {}", e)))?;
            let extension = if indices.len() == 1 {
                Extension::Single
            } else {
                Extension::List
            };
            (&rest[..open], extension, indices)
        } else if let Some(eq) = rest.find('=') {
            let reduction: Reduction = rest[eq + 1..].parse()?;
            (&rest[..eq], Extension::Reduce(reduction), Vec::new())
        } else {
            (rest, Extension::Whole, Vec::new())
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("missing axis name"));
        }
        if name.contains(['[', ']', '{', '}', '=']) {
            return Err(invalid("unexpected characters in axis name"));
        }

        Ok(Self {
            name: name.to_string(),
            extension,
            indices,
            unit,
            normalization,
        })
    }
}

impl FromStr for RequestedAxis {
    type Err = FieldAxesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RequestedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match self.extension {
            Extension::Whole => {},
            Extension::Single | Extension::List => {
                let list: Vec<String> = self.indices.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", list.join(","))?;
            },
            Extension::Reduce(reduction) => write!(f, "={}", reduction)?,
        }
        if let Some(ref norm) = self.normalization {
            write!(f, "->{}", norm)
        } else if let Some(ref unit) = self.unit {
            write!(f, "{{{}}}", unit)
        } else {
            Ok(())
        }
    }
}
