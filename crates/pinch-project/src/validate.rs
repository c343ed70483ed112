//! Stream table validation.

use crate::schema::StreamTable;
use pinch_core::PinchError;
use pinch_engine::StreamSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Pinch(#[from] PinchError),
}

pub fn validate_table(table: &StreamTable) -> Result<(), ValidationError> {
    if !table.tmin.is_finite() || table.tmin < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "tmin".to_string(),
            value: table.tmin.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }

    if table.streams.len() < StreamSet::MIN_STREAMS {
        return Err(PinchError::InsufficientData {
            what: "streams",
            got: table.streams.len(),
            need: StreamSet::MIN_STREAMS,
        }
        .into());
    }

    for (idx, row) in table.streams.iter().enumerate() {
        let label = row
            .name
            .clone()
            .unwrap_or_else(|| format!("#{}", idx + 1));
        if !row.cp.is_finite() || row.cp <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("stream '{label}' cp"),
                value: row.cp.to_string(),
                reason: "must be positive and finite".to_string(),
            });
        }
        for (field, value) in [
            ("supply_temp", row.supply_temp),
            ("target_temp", row.target_temp),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::InvalidValue {
                    field: format!("stream '{label}' {field}"),
                    value: value.to_string(),
                    reason: "must be finite".to_string(),
                });
            }
        }
    }

    Ok(())
}
