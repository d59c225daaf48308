//! API v1 DTOs and helpers.

mod mappers;
mod schema;
mod types;

pub use mappers::{
    connectivity_to_api_v1, error_code_to_api_v1, error_envelope_to_api_v1_error,
    field_errors_to_api_v1, result_to_api_v1_result, save_outcome_to_api_v1,
    settings_to_api_v1,
};
pub use schema::{api_v1_form_state_schema, api_v1_settings_schema};
pub use types::*;
