//! Constellation line figures keyed by star display names.
//!
//! Segments reference the resolved display names of catalog stars; the
//! scene processor looks each endpoint up in its per-instant star index and
//! silently drops any segment whose endpoints did not both resolve. That
//! makes the figures robust against catalog subsets: a missing star costs
//! one line, never an error.

/// A constellation figure: named line segments between catalog stars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstellationFigure {
    pub name: &'static str,
    pub abbreviation: &'static str,
    /// Pairs of star display names forming the stick figure.
    pub segments: &'static [(&'static str, &'static str)],
}

/// The built-in figure set: the navigationally familiar constellations,
/// drawn with their brightest members.
pub const CONSTELLATIONS: [ConstellationFigure; 14] = [
    ConstellationFigure {
        name: "Orion",
        abbreviation: "Ori",
        segments: &[
            ("Betelgeuse", "Bellatrix"),
            ("Bellatrix", "Mintaka"),
            ("Mintaka", "Alnilam"),
            ("Alnilam", "Alnitak"),
            ("Alnitak", "Saiph"),
            ("Saiph", "Rigel"),
            ("Rigel", "Mintaka"),
            ("Betelgeuse", "Alnitak"),
        ],
    },
    ConstellationFigure {
        name: "Ursa Major",
        abbreviation: "UMa",
        segments: &[
            ("Alkaid", "Mizar"),
            ("Mizar", "Alioth"),
            ("Alioth", "Megrez"),
            ("Megrez", "Phecda"),
            ("Phecda", "Merak"),
            ("Merak", "Dubhe"),
            ("Dubhe", "Megrez"),
        ],
    },
    ConstellationFigure {
        name: "Ursa Minor",
        abbreviation: "UMi",
        segments: &[("Polaris", "Kochab"), ("Kochab", "Pherkad")],
    },
    ConstellationFigure {
        name: "Cassiopeia",
        abbreviation: "Cas",
        segments: &[
            ("Caph", "Schedar"),
            ("Schedar", "Navi"),
            ("Navi", "Ruchbah"),
            ("Ruchbah", "Segin"),
        ],
    },
    ConstellationFigure {
        name: "Crux",
        abbreviation: "Cru",
        segments: &[("Acrux", "Gacrux"), ("Mimosa", "Imai")],
    },
    ConstellationFigure {
        name: "Lyra",
        abbreviation: "Lyr",
        segments: &[
            ("Vega", "Sheliak"),
            ("Sheliak", "Sulafat"),
            ("Sulafat", "Vega"),
        ],
    },
    ConstellationFigure {
        name: "Cygnus",
        abbreviation: "Cyg",
        segments: &[
            ("Deneb", "Sadr"),
            ("Sadr", "Albireo"),
            ("Sadr", "Aljanah"),
            ("Sadr", "Fawaris"),
        ],
    },
    ConstellationFigure {
        name: "Scorpius",
        abbreviation: "Sco",
        segments: &[
            ("Dschubba", "Antares"),
            ("Antares", "Shaula"),
            ("Shaula", "Sargas"),
        ],
    },
    ConstellationFigure {
        name: "Gemini",
        abbreviation: "Gem",
        segments: &[("Castor", "Pollux"), ("Pollux", "Alhena")],
    },
    ConstellationFigure {
        name: "Canis Major",
        abbreviation: "CMa",
        segments: &[
            ("Sirius", "Mirzam"),
            ("Sirius", "Adhara"),
            ("Adhara", "Wezen"),
        ],
    },
    ConstellationFigure {
        name: "Taurus",
        abbreviation: "Tau",
        segments: &[("Aldebaran", "Elnath")],
    },
    ConstellationFigure {
        name: "Leo",
        abbreviation: "Leo",
        segments: &[("Regulus", "Algieba"), ("Algieba", "Denebola")],
    },
    ConstellationFigure {
        name: "Aquila",
        abbreviation: "Aql",
        segments: &[("Altair", "Tarazed")],
    },
    ConstellationFigure {
        name: "Perseus",
        abbreviation: "Per",
        segments: &[("Mirfak", "Algol")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyg::bundled_catalog;

    #[test]
    fn every_referenced_star_exists_in_the_bundled_catalog() {
        // The bundled sample must be able to draw every figure completely;
        // larger catalogs are supersets of it.
        let (stars, _) = bundled_catalog().unwrap();
        for figure in &CONSTELLATIONS {
            for (a, b) in figure.segments {
                for name in [a, b] {
                    assert!(
                        stars.iter().any(|s| s.name.eq_ignore_ascii_case(name)),
                        "{}: star '{}' missing from bundled catalog",
                        figure.name,
                        name
                    );
                }
            }
        }
    }

    #[test]
    fn abbreviations_are_unique() {
        let mut abbrs: Vec<&str> = CONSTELLATIONS.iter().map(|c| c.abbreviation).collect();
        abbrs.sort_unstable();
        abbrs.dedup();
        assert_eq!(abbrs.len(), CONSTELLATIONS.len());
    }

    #[test]
    fn figures_have_segments() {
        for figure in &CONSTELLATIONS {
            assert!(!figure.segments.is_empty(), "{} is empty", figure.name);
        }
    }
}
