use crate::generic::{CreateSamplerError, SamplerDesc};

/// Owning handle to a device context able to create native samplers.
///
/// Holding the handle keeps the device alive.
/// Use [`Device::downgrade`] to get a handle that does not.
pub trait Device {
    /// Native sampler object produced by this device.
    type Sampler;

    /// Non-owning counterpart of this handle.
    type Weak: WeakDevice<Device = Self>;

    /// Returns handle that observes the device without keeping it alive.
    fn downgrade(&self) -> Self::Weak;

    /// Create a new native sampler.
    fn new_sampler(&self, desc: &SamplerDesc) -> Result<Self::Sampler, CreateSamplerError>;
}

/// Non-owning handle to a device context.
pub trait WeakDevice {
    type Device;

    /// Returns owning handle if the device still exists.
    fn upgrade(&self) -> Option<Self::Device>;
}
