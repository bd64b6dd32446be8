//! Vulkan device context built on `ash`.

mod device;
mod from;
mod sampler;

pub use self::{
    device::{Device, WeakDevice},
    sampler::Sampler,
};
