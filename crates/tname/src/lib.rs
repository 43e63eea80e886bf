//! tname - generate `tname<T>()` specializations for C++ headers
//!
//! For each type name in an ordered list, emit a template specialization
//! that returns the name as a string literal:
//!
//! ```text
//! template<>
//! std::string tname<int>()
//! {
//!     return "int";
//! }
//! ```
//!
//! The output is meant to live between the `--begin generated--` and
//! `--end generated--` markers of a header, either pasted by hand or
//! spliced in place with `tname splice`.

pub mod config;
pub mod emitter;
pub mod splice;
pub mod template;
pub mod types;

pub use config::Config;
pub use emitter::{EmitOptions, Emitter};
pub use splice::{splice, splice_file, SpliceError};
pub use template::{quote_literal, Template};
pub use types::{TypeList, TypeName};
