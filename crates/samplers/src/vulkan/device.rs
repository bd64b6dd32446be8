use std::{
    ffi, fmt,
    sync::{Arc, Weak},
};

use ash::{
    extensions::ext::DebugUtils,
    vk::{self, Handle},
};
use parking_lot::Mutex;
use slab::Slab;

use crate::{
    generic::{CreateSamplerError, SamplerDesc},
    library::SamplerLibrary,
};

use super::{
    from::{sampler_create_info, IntoAsh},
    Sampler,
};

struct DeviceInner {
    device: ash::Device,
    max_anisotropy: Option<f32>,
    samplers: Mutex<Slab<vk::Sampler>>,
    debug_utils: Option<DebugUtils>,
}

impl Drop for DeviceInner {
    fn drop(&mut self) {
        let samplers = std::mem::take(self.samplers.get_mut());
        if !samplers.is_empty() {
            tracing::debug!(
                "Destroying {} samplers still alive at device destruction",
                samplers.len()
            );
        }

        unsafe {
            if let Err(err) = self.device.device_wait_idle() {
                tracing::warn!("Failed to wait for device idle before destruction: {err}");
            }
            for (_, sampler) in samplers {
                self.device.destroy_sampler(sampler, None);
            }
            self.device.destroy_device(None);
        }
    }
}

/// Vulkan device context.
///
/// Cheap to clone, all clones share the same `VkDevice`.
/// The device is destroyed when the last clone is dropped,
/// together with any samplers that are still alive.
#[derive(Clone)]
pub struct Device {
    inner: Arc<DeviceInner>,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device({:p})", self.inner.device.handle())
    }
}

/// Handle to a [`Device`] that does not keep it alive.
#[derive(Clone)]
pub struct WeakDevice {
    inner: Weak<DeviceInner>,
}

impl fmt::Debug for WeakDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakDevice({:p})", self.inner.as_ptr())
    }
}

impl WeakDevice {
    pub(super) fn drop_sampler(&self, idx: usize) {
        if let Some(inner) = self.inner.upgrade() {
            let sampler = inner.samplers.lock().try_remove(idx);
            if let Some(sampler) = sampler {
                tracing::trace!("Destroying sampler {sampler:?}");
                unsafe {
                    inner.device.destroy_sampler(sampler, None);
                }
            }
        }
    }
}

impl Device {
    /// Wraps an existing logical device.
    ///
    /// # Safety
    ///
    /// `device` must be a valid logical device created on the physical
    /// device `limits` and `features` were queried from,
    /// with exactly `features` enabled.
    /// Ownership of the device is transferred, it must not be destroyed
    /// by the caller.
    /// The `VkInstance` the device was created from must outlive
    /// every clone of the returned `Device` and every [`Sampler`] made by it.
    /// The device waits for idle before it is destroyed, so no other
    /// thread may submit work to its queues while the last clone drops.
    pub unsafe fn new(
        device: ash::Device,
        limits: &vk::PhysicalDeviceLimits,
        features: &vk::PhysicalDeviceFeatures,
        debug_utils: Option<DebugUtils>,
    ) -> Self {
        let max_anisotropy = if features.sampler_anisotropy == vk::TRUE {
            Some(limits.max_sampler_anisotropy)
        } else {
            None
        };

        Device {
            inner: Arc::new(DeviceInner {
                device,
                max_anisotropy,
                samplers: Mutex::new(Slab::new()),
                debug_utils,
            }),
        }
    }

    pub fn ash(&self) -> &ash::Device {
        &self.inner.device
    }

    pub fn weak(&self) -> WeakDevice {
        WeakDevice {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns new sampler library that creates samplers on this device.
    pub fn new_sampler_library(&self) -> SamplerLibrary<Device> {
        SamplerLibrary::new(self)
    }

    fn set_object_name(&self, ty: vk::ObjectType, handle: u64, name: &str) {
        if name.is_empty() {
            return;
        }

        if let Some(debug_utils) = &self.inner.debug_utils {
            let Ok(name_cstr) = ffi::CString::new(name) else {
                tracing::warn!("Object name {name:?} contains a nul byte");
                return;
            };

            let result = unsafe {
                debug_utils.set_debug_utils_object_name(
                    self.inner.device.handle(),
                    &vk::DebugUtilsObjectNameInfoEXT::builder()
                        .object_type(ty)
                        .object_handle(handle)
                        .object_name(&name_cstr),
                )
            };

            if let Err(err) = result {
                tracing::warn!("Failed to name object {name:?}: {err}");
            }
        }
    }
}

impl crate::traits::Device for Device {
    type Sampler = Sampler;
    type Weak = WeakDevice;

    #[inline]
    fn downgrade(&self) -> WeakDevice {
        self.weak()
    }

    fn new_sampler(&self, desc: &SamplerDesc) -> Result<Sampler, CreateSamplerError> {
        let info = sampler_create_info(desc, self.inner.max_anisotropy);

        let handle = unsafe { self.inner.device.create_sampler(&info, None) }
            .map_err(IntoAsh::<CreateSamplerError>::into_ash)?;

        tracing::trace!("Created sampler {handle:?}");

        self.set_object_name(vk::ObjectType::SAMPLER, handle.as_raw(), desc.label);

        let idx = self.inner.samplers.lock().insert(handle);
        Ok(Sampler::new(self.weak(), handle, idx))
    }
}

impl crate::traits::WeakDevice for WeakDevice {
    type Device = Device;

    #[inline]
    fn upgrade(&self) -> Option<Device> {
        let inner = self.inner.upgrade()?;
        Some(Device { inner })
    }
}
