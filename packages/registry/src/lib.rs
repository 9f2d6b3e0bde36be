//! # Formsmith Registry
//!
//! Static lookup from `(feature, version)` to a builder prototype, used for
//! navigation between design iterations.
//!
//! Paths have the shape `/prototypes/{feature}/version/{id}`. Every lookup
//! resolves to either a registered prototype or a [`NotFound`] reason; no
//! path makes the registry fail.
//!
//! ```rust,ignore
//! use formsmith_registry::{Registry, Resolution};
//!
//! let registry = Registry::builtin();
//! match registry.resolve_path("/prototypes/form-builder/version/2") {
//!     Resolution::Found(prototype) => {
//!         let session = prototype.instantiate("builder-1", 50);
//!     }
//!     Resolution::NotFound(reason) => eprintln!("{}", reason),
//! }
//! ```

mod prototype;
mod registry;
mod route;
mod seeds;

pub use prototype::Prototype;
pub use registry::{Feature, Registry, Resolution};
pub use route::{NotFound, Route, FORM_BUILDER};
