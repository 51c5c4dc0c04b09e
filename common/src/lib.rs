//! PhysioSim scenario definitions
//!
//! This crate defines the clinical scenarios the viewer knows about, the
//! anatomical regions each one highlights, and the severity level the
//! viewer drives its effects with. Scenario identifiers arrive as free text
//! (typed events, dropdown values), so every lookup also has a string form
//! that treats unknown identifiers as "nothing to show" instead of an error.

pub mod vitals;

/// Severity used for any identifier that is not a known scenario.
pub const DEFAULT_SEVERITY: f32 = 1.0;

/// Represents all scenarios with a dedicated visual profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Ischemic stroke: brain highlight, fast pulse.
    Stroke,

    /// Internal bleeding: brain or abdomen highlight plus halo and blood stream.
    Hemorrhage,

    /// High blood pressure: heart highlight, slow pulse.
    Hypertension,

    /// Seizure: brain highlight, fast pulse.
    Seizure,
}

/// Visual profile attached to a scenario identifier.
///
/// `regions` is searched in order and the first region present in the scene
/// wins. `bleeding` mounts the halo and the particle stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioProfile {
    pub regions: &'static [&'static str],
    pub bleeding: bool,
}

impl ScenarioProfile {
    /// Profile for identifiers outside the scenario table.
    pub const EMPTY: Self = Self {
        regions: &[],
        bleeding: false,
    };
}

impl Scenario {
    pub const ALL: [Self; 4] = [
        Self::Stroke,
        Self::Hemorrhage,
        Self::Hypertension,
        Self::Seizure,
    ];

    /// Parses a scenario identifier. Matching is exact, like the wire values.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stroke" => Some(Self::Stroke),
            "hemorrhage" => Some(Self::Hemorrhage),
            "hypertension" => Some(Self::Hypertension),
            "seizure" => Some(Self::Seizure),
            _ => None,
        }
    }

    /// Identifier used by the scenario selector and the vitals model.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stroke => "stroke",
            Self::Hemorrhage => "hemorrhage",
            Self::Hypertension => "hypertension",
            Self::Seizure => "seizure",
        }
    }

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stroke => "Stroke",
            Self::Hemorrhage => "Hemorrhage",
            Self::Hypertension => "Hypertension",
            Self::Seizure => "Seizure",
        }
    }

    pub fn severity(&self) -> f32 {
        match self {
            Self::Stroke => 3.0,
            Self::Hemorrhage => 2.0,
            Self::Hypertension => 1.0,
            Self::Seizure => 3.0,
        }
    }

    pub fn profile(&self) -> ScenarioProfile {
        match self {
            Self::Stroke => ScenarioProfile {
                regions: &["Brain"],
                bleeding: false,
            },
            Self::Hemorrhage => ScenarioProfile {
                regions: &["Brain", "Abdomen"],
                bleeding: true,
            },
            Self::Hypertension => ScenarioProfile {
                regions: &["Heart"],
                bleeding: false,
            },
            Self::Seizure => ScenarioProfile {
                regions: &["Brain"],
                bleeding: false,
            },
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Profile for a raw identifier; unknown identifiers get [`ScenarioProfile::EMPTY`].
pub fn profile_for(name: &str) -> ScenarioProfile {
    Scenario::from_name(name)
        .map(|scenario| scenario.profile())
        .unwrap_or(ScenarioProfile::EMPTY)
}

/// Severity for a raw identifier; unknown identifiers get [`DEFAULT_SEVERITY`].
pub fn severity_for(name: &str) -> f32 {
    Scenario::from_name(name)
        .map(|scenario| scenario.severity())
        .unwrap_or(DEFAULT_SEVERITY)
}
