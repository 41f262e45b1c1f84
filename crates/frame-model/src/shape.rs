//! Recognized sweep shapes.

use serde::{Deserialize, Serialize};

/// Shape of a closed camera sweep, decided from its corner count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepShape {
    /// Three direction changes.
    #[serde(alias = "triangle")]
    Triangular,
    /// Four direction changes.
    #[serde(alias = "square", alias = "rectangle")]
    Rectangular,
    /// Any other corner count; neither recognized shape.
    Indeterminate,
}

impl SweepShape {
    /// Map a corner count (including the implicit starting corner) to a shape.
    pub fn from_corner_count(corners: usize) -> Self {
        match corners {
            3 => Self::Triangular,
            4 => Self::Rectangular,
            _ => Self::Indeterminate,
        }
    }

    /// Number of corners a closed sweep of this shape has.
    pub fn corner_count(&self) -> Option<usize> {
        match self {
            Self::Triangular => Some(3),
            Self::Rectangular => Some(4),
            Self::Indeterminate => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Triangular => "triangular",
            Self::Rectangular => "rectangular",
            Self::Indeterminate => "indeterminate",
        }
    }
}

impl std::fmt::Display for SweepShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SweepShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangular" | "triangle" => Ok(Self::Triangular),
            "rectangular" | "rectangle" | "square" => Ok(Self::Rectangular),
            "indeterminate" => Ok(Self::Indeterminate),
            other => Err(format!("unknown sweep shape: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_count_mapping() {
        assert_eq!(SweepShape::from_corner_count(3), SweepShape::Triangular);
        assert_eq!(SweepShape::from_corner_count(4), SweepShape::Rectangular);
        assert_eq!(SweepShape::from_corner_count(1), SweepShape::Indeterminate);
        assert_eq!(SweepShape::from_corner_count(5), SweepShape::Indeterminate);
        assert_eq!(SweepShape::Rectangular.corner_count(), Some(4));
    }

    #[test]
    fn test_serde_accepts_aliases() {
        let shape: SweepShape = serde_json::from_str(r#""square""#).unwrap();
        assert_eq!(shape, SweepShape::Rectangular);
        let shape: SweepShape = serde_json::from_str(r#""triangle""#).unwrap();
        assert_eq!(shape, SweepShape::Triangular);
        assert_eq!(
            serde_json::to_string(&SweepShape::Triangular).unwrap(),
            r#""triangular""#
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Square".parse::<SweepShape>(), Ok(SweepShape::Rectangular));
        assert!("hexagon".parse::<SweepShape>().is_err());
    }
}
