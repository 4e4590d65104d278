pub mod docker;
pub mod state;
pub mod types;
pub mod vnc;

#[cfg(test)]
pub(crate) mod fake;
