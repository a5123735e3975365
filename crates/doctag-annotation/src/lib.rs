//! doctag-annotation - Structured annotations embedded in documentation comments
//!
//! A documentation line such as
//!
//! ```text
//! /// @Event(aggregate = "Account", uid = "account_uid")
//! ```
//!
//! is tokenized and parsed into an [`Annotation`] (kind plus attribute map).
//! Only kinds declared in an [`AnnotationRegistry`] are recognized, so ordinary
//! documentation like `@param` or an e-mail address is left alone.
//!
//! # Usage
//!
//! ```
//! use doctag_annotation::{AnnotationRegistry, parse_annotation};
//!
//! let registry = AnnotationRegistry::standard();
//! let annotation = parse_annotation(r#"@Event(aggregate = "Account")"#, &registry)
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(annotation.attribute("aggregate"), Some("Account"));
//! assert_eq!(annotation.attribute("uid"), None);
//! ```

mod error;
mod parser;
mod registry;
mod resolve;
mod token;

pub use doctag_model::Annotation;
pub use error::{AnnotationError, AnnotationResult};
pub use parser::{parse_annotation, render_annotation};
pub use registry::{AnnotationDescriptor, AnnotationRegistry};
pub use resolve::{attach_annotations, resolve_annotation_by_kind, resolve_annotations};

/// Well-known annotation kinds
pub mod kinds {
    /// Marks a record as an event of an aggregate
    pub const EVENT: &str = "Event";

    /// Marks a record as a REST service
    pub const REST_SERVICE: &str = "RestService";

    /// Marks an operation as a REST endpoint
    pub const REST_OPERATION: &str = "RestOperation";
}
