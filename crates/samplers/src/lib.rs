//! Deduplicating cache of GPU samplers.
//!
//! [`SamplerLibrary`] turns a [`SamplerDesc`] into a shared native sampler,
//! creating it on the first request and returning the same sampler after that.
//! The library only observes its [`Device`] and reports
//! [`SamplerError::DeviceUnavailable`] after the device is gone.
#![deny(unsafe_op_in_unsafe_fn)]

pub mod generic;
mod library;
mod traits;

#[cfg(feature = "vulkan")]
pub mod vulkan;

#[cfg(test)]
mod testing;

pub use self::{
    generic::*,
    library::{SamplerError, SamplerLibrary, SharedSamplerLibrary},
    traits::{Device, WeakDevice},
};
