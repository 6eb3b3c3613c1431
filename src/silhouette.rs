//! Named target shapes.
//!
//! Each [`Silhouette`] maps to one generator in [`shapes`](crate::shapes) and,
//! optionally, one motion effect in [`motion`](crate::motion).

use crate::error::UnknownSilhouette;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named point distribution particles morph toward.
///
/// Serializes as its display name. Deserializing never fails: names that
/// match no shape become [`Silhouette::Unknown`], which generates a cloud
/// collapsed at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Silhouette {
    /// Parametric heart curve with some depth.
    #[default]
    Heart,
    /// Phyllotaxis spiral with wavy petals.
    Flower,
    /// Sphere with a tilted ring around it.
    RingedPlanet,
    /// Head, tapered torso and a flat base.
    SeatedFigure,
    /// Hollow explosion shells.
    FireworkBurst,
    /// Unrecognized name.
    Unknown,
}

impl Silhouette {
    /// Every real shape, in UI order. Excludes [`Silhouette::Unknown`].
    pub const ALL: [Silhouette; 5] = [
        Silhouette::Heart,
        Silhouette::Flower,
        Silhouette::RingedPlanet,
        Silhouette::SeatedFigure,
        Silhouette::FireworkBurst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Silhouette::Heart => "Heart",
            Silhouette::Flower => "Flower",
            Silhouette::RingedPlanet => "RingedPlanet",
            Silhouette::SeatedFigure => "SeatedFigure",
            Silhouette::FireworkBurst => "FireworkBurst",
            Silhouette::Unknown => "Unknown",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["Heart", "Flower", "RingedPlanet", "SeatedFigure", "FireworkBurst"]
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL.get(idx).copied().unwrap_or(Silhouette::Unknown)
    }

    pub fn to_index(&self) -> Option<usize> {
        Self::ALL.iter().position(|s| s == self)
    }

    /// Whether this is one of the real shapes.
    pub fn is_known(&self) -> bool {
        !matches!(self, Silhouette::Unknown)
    }
}

impl fmt::Display for Silhouette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Silhouette {
    type Err = UnknownSilhouette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "heart" => Ok(Silhouette::Heart),
            "flower" => Ok(Silhouette::Flower),
            "ringedplanet" | "planet" | "saturn" => Ok(Silhouette::RingedPlanet),
            "seatedfigure" | "buddha" | "meditate" => Ok(Silhouette::SeatedFigure),
            "fireworkburst" | "firework" | "fireworks" => Ok(Silhouette::FireworkBurst),
            _ => Err(UnknownSilhouette(s.to_string())),
        }
    }
}

impl From<String> for Silhouette {
    fn from(name: String) -> Self {
        name.parse().unwrap_or_else(|e| {
            log::warn!("{}, particles will collapse to the origin", e);
            Silhouette::Unknown
        })
    }
}

impl From<Silhouette> for String {
    fn from(s: Silhouette) -> Self {
        s.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("saturn".parse::<Silhouette>(), Ok(Silhouette::RingedPlanet));
        assert_eq!("Buddha".parse::<Silhouette>(), Ok(Silhouette::SeatedFigure));
        assert_eq!("Fireworks".parse::<Silhouette>(), Ok(Silhouette::FireworkBurst));
        assert_eq!("seated-figure".parse::<Silhouette>(), Ok(Silhouette::SeatedFigure));
        assert_eq!("Ringed Planet".parse::<Silhouette>(), Ok(Silhouette::RingedPlanet));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "dodecahedron".parse::<Silhouette>().unwrap_err();
        assert_eq!(err.0, "dodecahedron");
        assert_eq!(Silhouette::from("dodecahedron".to_string()), Silhouette::Unknown);
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, s) in Silhouette::ALL.iter().enumerate() {
            assert_eq!(Silhouette::from_index(i), *s);
            assert_eq!(s.to_index(), Some(i));
            assert_eq!(Silhouette::variants()[i], s.name());
        }
        assert_eq!(Silhouette::from_index(99), Silhouette::Unknown);
        assert!(!Silhouette::Unknown.is_known());
    }

    #[test]
    fn test_serde_as_name() {
        let json = serde_json::to_string(&Silhouette::FireworkBurst).unwrap();
        assert_eq!(json, "\"FireworkBurst\"");
        let back: Silhouette = serde_json::from_str("\"Saturn\"").unwrap();
        assert_eq!(back, Silhouette::RingedPlanet);
        let unknown: Silhouette = serde_json::from_str("\"Teapot\"").unwrap();
        assert_eq!(unknown, Silhouette::Unknown);
    }
}
