use std::fmt;

use ash::vk;

use super::device::WeakDevice;

/// Native Vulkan sampler.
///
/// The `VkSampler` is destroyed when this value is dropped,
/// or by the device if the device goes away first.
pub struct Sampler {
    handle: vk::Sampler,
    owner: WeakDevice,
    idx: usize,
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.owner.drop_sampler(self.idx);
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sampler({:?})", self.handle)
    }
}

impl Sampler {
    #[inline]
    pub(super) fn new(owner: WeakDevice, handle: vk::Sampler, idx: usize) -> Self {
        Sampler { handle, owner, idx }
    }

    /// Returns raw handle of the sampler.
    ///
    /// The handle is valid as long as both this sampler
    /// and its device are alive.
    #[inline(always)]
    pub fn handle(&self) -> vk::Sampler {
        self.handle
    }
}
