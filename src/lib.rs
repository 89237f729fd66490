//! locale-store
//!
//! Dotted-key lookup of localized strings and sub-trees, with `{{name}}`
//! placeholder substitution and duplicate-safe merging of locale fragments.

pub mod config;
pub mod error;
pub mod input;
pub mod merge;
pub mod observer;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use error::{
    LoadError,
    MergeError,
    Missing,
    TemplateError,
};
pub use merge::{
    MergeReport,
    merge,
};
pub use observer::{
    LocaleObserver,
    MarkerSet,
};
pub use state::SharedStore;
pub use store::{
    LocaleChange,
    LocaleStore,
    Resolution,
    TemplateArgs,
};
pub use types::{
    LocaleNode,
    LocaleTree,
};
