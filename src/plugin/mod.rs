/// Plugin layer: the module contract, compiled-in registry, descriptor loading.
pub mod builtin;
pub mod descriptor;
pub mod errors;
pub mod external;
pub mod loader;
pub mod module;
pub mod registry;
mod suggest;

pub use errors::{DescriptorError, ModuleError};
pub use loader::{Loader, ModuleEntry, ModuleKind};
pub use module::{Console, Job, LogModule};
pub use registry::Registry;
