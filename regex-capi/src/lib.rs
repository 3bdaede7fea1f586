#![allow(non_camel_case_types)]

#[macro_use]
mod macros;
mod rrx;

pub use crate::rrx::*;
