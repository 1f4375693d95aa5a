//! On-demand resolution of the document's name references.
//!
//! Everything here reads the current state of the document and resolves
//! names at call time. There is no caching and no back-pointer table:
//! renaming or removing an element changes what the next query returns,
//! and a reference that fails to resolve is an ordinary `None` or an
//! empty list, never a structural error. The one exception is a chain
//! walk that revisits a material, which aborts with [`CycleError`]
//! because no meaningful answer exists.

mod inheritance;
mod receiver;
mod reference;
mod upstream;

pub use inheritance::CycleError;
pub use receiver::BindingSite;
pub(crate) use receiver::find_receiver;
