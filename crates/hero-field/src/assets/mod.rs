pub mod manifest;

pub use manifest::{IconDescriptor, IconManifest};
