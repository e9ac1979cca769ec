//! Parameter layout of the DFM1 filter.

use dfm1_core::{FloatParameter, Formatter, ParameterError, ParameterRange, ParameterStore};

pub const CUTOFF: &str = "cutoff";
pub const RESONANCE: &str = "resonance";
pub const DRIVE: &str = "drive";
pub const MIX: &str = "mix";

/// Declare cutoff, resonance, drive and mix, in that order.
pub fn create_layout() -> Result<ParameterStore, ParameterError> {
    let mut store = ParameterStore::new();

    store.declare_parameter(FloatParameter::hz(
        CUTOFF,
        "Cutoff",
        ParameterRange::new(20.0, 20_000.0).with_step(1.0).with_skew(0.25),
        1000.0,
    ))?;

    store.declare_parameter(FloatParameter::new(
        RESONANCE,
        "Resonance",
        ParameterRange::new(0.1, 10.0).with_step(0.01).with_skew(0.5),
        1.0,
    ))?;

    store.declare_parameter(
        FloatParameter::new(
            DRIVE,
            "Drive",
            ParameterRange::new(0.0, 10.0).with_step(0.1),
            1.0,
        )
        .with_precision(1),
    )?;

    store.declare_parameter(
        FloatParameter::new(MIX, "Mix", ParameterRange::new(0.0, 1.0).with_step(0.01), 1.0)
            .with_formatter(Formatter::Percent { precision: 0 }),
    )?;

    Ok(store)
}
