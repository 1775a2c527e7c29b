pub mod field_selection;
pub mod output_mode;
pub mod phylip_document;
pub mod phylip_program_config;
pub mod sequence_entry;
pub mod tab_record;

pub(crate) mod telemetry_code;
