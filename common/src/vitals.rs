//! Two-state cardiovascular model backing the vitals readout.
//!
//! Blood pressure and heart rate are coupled through a baroreflex term:
//! pressure follows cardiac output against peripheral resistance, heart rate
//! chases a pressure set point. Scenarios perturb the parameters (lower
//! resistance for stroke, higher set point for hypertension, a constant
//! loss term for hemorrhage).

use crate::Scenario;

/// Simulated window in seconds.
pub const DURATION_SECS: f64 = 60.0;
/// Number of samples in a series, endpoints included.
pub const SAMPLE_COUNT: usize = 200;

const INITIAL_BLOOD_PRESSURE: f64 = 120.0;
const INITIAL_HEART_RATE: f64 = 75.0;
const RK4_SUBSTEPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub k1: f64,
    pub k2: f64,
    pub set_point: f64,
    pub resistance: f64,
    pub blood_loss: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            k1: 0.05,
            k2: 0.1,
            set_point: 100.0,
            resistance: 1.0,
            blood_loss: 0.0,
        }
    }
}

impl ModelParams {
    /// Parameters for a scenario identifier. Unknown identifiers and
    /// scenarios without a hemodynamic signature use the baseline.
    pub fn for_scenario(name: &str) -> Self {
        let baseline = Self::default();
        match Scenario::from_name(name) {
            Some(Scenario::Stroke) => Self {
                resistance: 0.7,
                ..baseline
            },
            Some(Scenario::Hypertension) => Self {
                set_point: 120.0,
                resistance: 1.3,
                ..baseline
            },
            Some(Scenario::Hemorrhage) => Self {
                blood_loss: 0.5,
                ..baseline
            },
            Some(Scenario::Seizure) | None => baseline,
        }
    }

    fn derivative(&self, state: [f64; 2]) -> [f64; 2] {
        let [bp, hr] = state;
        [
            self.k1 * (hr * self.resistance) - self.blood_loss - 0.1 * bp,
            self.k2 * (self.set_point - bp) - 0.05 * (hr - 70.0),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VitalsSeries {
    pub time: Vec<f64>,
    pub blood_pressure: Vec<f64>,
    pub heart_rate: Vec<f64>,
    pub oxygen_saturation: Vec<f64>,
}

impl VitalsSeries {
    /// Final `(blood_pressure, heart_rate, oxygen_saturation)` sample.
    pub fn last(&self) -> Option<(f64, f64, f64)> {
        Some((
            *self.blood_pressure.last()?,
            *self.heart_rate.last()?,
            *self.oxygen_saturation.last()?,
        ))
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Oxygen saturation derived from blood pressure, in percent.
pub fn oxygen_saturation(blood_pressure: f64) -> f64 {
    (98.0 - 0.05 * (90.0 - blood_pressure).max(0.0)).clamp(85.0, 100.0)
}

/// Runs the model for a scenario identifier.
pub fn simulate(name: &str) -> VitalsSeries {
    simulate_with(ModelParams::for_scenario(name))
}

pub fn simulate_with(params: ModelParams) -> VitalsSeries {
    let sample_step = DURATION_SECS / (SAMPLE_COUNT - 1) as f64;
    let h = sample_step / RK4_SUBSTEPS as f64;

    let mut series = VitalsSeries {
        time: Vec::with_capacity(SAMPLE_COUNT),
        blood_pressure: Vec::with_capacity(SAMPLE_COUNT),
        heart_rate: Vec::with_capacity(SAMPLE_COUNT),
        oxygen_saturation: Vec::with_capacity(SAMPLE_COUNT),
    };

    let mut state = [INITIAL_BLOOD_PRESSURE, INITIAL_HEART_RATE];
    for index in 0..SAMPLE_COUNT {
        if index > 0 {
            for _ in 0..RK4_SUBSTEPS {
                state = rk4_step(&params, state, h);
            }
        }
        series.time.push(index as f64 * sample_step);
        series.blood_pressure.push(state[0]);
        series.heart_rate.push(state[1]);
        series.oxygen_saturation.push(oxygen_saturation(state[0]));
    }

    series
}

fn rk4_step(params: &ModelParams, state: [f64; 2], h: f64) -> [f64; 2] {
    let offset = |base: [f64; 2], k: [f64; 2], scale: f64| {
        [base[0] + k[0] * scale, base[1] + k[1] * scale]
    };

    let k1 = params.derivative(state);
    let k2 = params.derivative(offset(state, k1, h * 0.5));
    let k3 = params.derivative(offset(state, k2, h * 0.5));
    let k4 = params.derivative(offset(state, k3, h));

    [
        state[0] + h / 6.0 * (k1[0] + 2.0 * k2[0] + 2.0 * k3[0] + k4[0]),
        state[1] + h / 6.0 * (k1[1] + 2.0 * k2[1] + 2.0 * k3[1] + k4[1]),
    ]
}

/// One-paragraph summary of the final vitals for a scenario.
pub fn explain(name: &str, series: &VitalsSeries) -> String {
    let Some((bp, hr, o2)) = series.last() else {
        return "No vitals available.".to_string();
    };

    match Scenario::from_name(name) {
        Some(Scenario::Stroke) => format!(
            "In a stroke simulation, resistance dropped, lowering blood pressure to about \
             {bp:.1} mmHg. Heart rate compensated to ~{hr:.1} bpm. Oxygen saturation dropped \
             to {o2:.1}%."
        ),
        Some(Scenario::Hypertension) => format!(
            "Blood pressure stabilized higher at {bp:.1} mmHg, heart rate ~{hr:.1} bpm. \
             O\u{2082} remained {o2:.1}%."
        ),
        Some(Scenario::Hemorrhage) => format!(
            "Blood loss dropped BP to {bp:.1} mmHg. Heart rate rose to {hr:.1} bpm. \
             O\u{2082} dropped to {o2:.1}%."
        ),
        Some(Scenario::Seizure) | None => format!(
            "Vitals stable: BP {bp:.1} mmHg, HR {hr:.1} bpm, O\u{2082} {o2:.1}%."
        ),
    }
}
