pub mod display;
pub mod value;

pub use display::{MAX_PRINT_LEN, Printed};
pub use value::{Value, ValueKind};

#[cfg(test)]
mod value_test;
