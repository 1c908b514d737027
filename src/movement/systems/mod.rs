//! Movement domain: system modules.

pub(crate) mod input;
pub(crate) mod step;

pub(crate) use input::read_input;
pub(crate) use step::step_motor;
