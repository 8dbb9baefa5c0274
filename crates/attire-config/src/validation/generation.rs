//! Slider default validation.

use crate::schema::AttireConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_generation(errors: &mut Vec<String>, config: &AttireConfig) {
    validate_range_f64(
        errors,
        "generation.temperature",
        config.generation.temperature,
        0.0,
        2.0,
    );
    validate_range(
        errors,
        "generation.top_k",
        u64::from(config.generation.top_k),
        1,
        128,
    );
}
