pub mod error;
pub mod feature_flags;

pub mod common;
pub mod models;

// Generic record machinery
pub mod command;
pub mod filter;
pub mod record;
pub mod search;

// Record collections
pub mod application;
pub mod inspection;
pub mod local_content;
pub mod notification;
pub mod payment;
pub mod visa;

pub use error::*;
pub use feature_flags::*;

pub use common::*;
pub use models::*;

pub use command::*;
pub use filter::{compile, filter, filter_refs, CompiledFilter, FieldSpec, FieldValue, FilterCriteria, Filterable};
pub use record::*;
pub use search::*;

pub use application::*;
pub use inspection::*;
pub use local_content::*;
pub use notification::*;
pub use payment::*;
pub use visa::*;
