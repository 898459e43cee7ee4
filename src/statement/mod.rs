// Statement module - preparing and filling driver statements
//
// - out_params: position -> declared output type registry
// - prepare: statement-kind decision table and execution options
// - fill: positional binding for plain and callable statements

pub mod fill;
pub mod out_params;
pub mod prepare;

pub use fill::{
    ParamSlot, fill_callable, fill_prepared, normalize, out_types_from_markers,
    slots_from_sequences,
};
pub use out_params::OutParams;
pub use prepare::{ExecOptions, choose_kind, wants_generated_keys};
