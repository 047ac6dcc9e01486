//! Selection AST adapter.
//!
//! A thin layer over `graphql_parser`'s query AST: it lowers a parsed
//! document into an owned selection tree (so it can be retained past the
//! lifetime of the source string, e.g. for a subscription's recorded
//! context), extracts the single operation selection, builds the
//! fragment-name map, and implements the fragment type-condition matching
//! policy and the field store-name computation used by both the write and
//! read engines.

mod document;
mod fragment;
mod selection;
mod store_name;
mod value;

pub use document::Document;
pub use fragment::is_matching_fragment;
pub use selection::{
    FieldSelection, FragmentDefinition, FragmentSpread, InlineFragment, Selection, SelectionSet,
};
pub use store_name::compute_store_name;
pub use value::ArgumentValue;

pub use graphql_parser::query as raw;
