use std::{fmt, sync::Arc};

use hashbrown::{hash_map::Entry, HashMap};
use parking_lot::Mutex;

use crate::{
    generic::{CreateSamplerError, SamplerDesc},
    traits::{Device, WeakDevice},
};

/// Error returned by [`SamplerLibrary::get_sampler`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SamplerError {
    /// The device that owns the library was destroyed.
    #[error("device is no longer available")]
    DeviceUnavailable,

    /// The device failed to create a native sampler.
    /// Nothing is cached, next request with the same descriptor tries again.
    #[error("failed to create sampler")]
    CreationFailed(#[from] CreateSamplerError),
}

/// Deduplicating cache of samplers.
///
/// Each distinct [`SamplerDesc`] is turned into a native sampler once,
/// on the first request, and every following request gets the same
/// shared sampler. Entries are never evicted.
///
/// The library observes its device through a weak handle.
/// It never keeps the device alive and reports
/// [`SamplerError::DeviceUnavailable`] once the device is gone.
///
/// Lookups take `&mut self`. Wrap the library in [`SharedSamplerLibrary`]
/// to request samplers from multiple threads.
pub struct SamplerLibrary<D: Device> {
    device: D::Weak,
    samplers: HashMap<SamplerDesc, Arc<D::Sampler>>,
}

impl<D> SamplerLibrary<D>
where
    D: Device,
{
    pub fn new(device: &D) -> Self {
        SamplerLibrary {
            device: device.downgrade(),
            samplers: HashMap::new(),
        }
    }

    /// Creates library with room for `capacity` samplers.
    pub fn with_capacity(device: &D, capacity: usize) -> Self {
        SamplerLibrary {
            device: device.downgrade(),
            samplers: HashMap::with_capacity(capacity),
        }
    }

    /// Returns sampler for the descriptor, creating it on first request.
    ///
    /// Cached samplers are returned without touching the device.
    /// On a miss the device is resolved and asked for a new sampler.
    /// The library is left unchanged if that fails.
    pub fn get_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<D::Sampler>, SamplerError> {
        match self.samplers.entry(desc) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let Some(device) = self.device.upgrade() else {
                    tracing::debug!("Sampler {desc:?} requested after device was destroyed");
                    return Err(SamplerError::DeviceUnavailable);
                };

                let sampler = match device.new_sampler(&desc) {
                    Ok(sampler) => sampler,
                    Err(err) => {
                        tracing::warn!("Failed to create sampler {desc:?}: {err}");
                        return Err(SamplerError::CreationFailed(err));
                    }
                };

                tracing::debug!("Created sampler {desc:?}");
                Ok(entry.insert(Arc::new(sampler)).clone())
            }
        }
    }

    /// Returns number of cached samplers.
    #[inline]
    pub fn len(&self) -> usize {
        self.samplers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samplers.is_empty()
    }

    /// Checks if sampler for the descriptor is cached.
    #[inline]
    pub fn contains(&self, desc: &SamplerDesc) -> bool {
        self.samplers.contains_key(desc)
    }

    /// Checks if the device that owns the library still exists.
    pub fn is_device_alive(&self) -> bool {
        self.device.upgrade().is_some()
    }
}

impl<D> Drop for SamplerLibrary<D>
where
    D: Device,
{
    fn drop(&mut self) {
        tracing::trace!("Releasing {} cached samplers", self.samplers.len());
    }
}

impl<D> fmt::Debug for SamplerLibrary<D>
where
    D: Device,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplerLibrary")
            .field("samplers", &self.samplers.len())
            .finish_non_exhaustive()
    }
}

/// [`SamplerLibrary`] that can be shared between threads.
///
/// Every request locks the library for its whole duration,
/// so a sampler is created at most once even when several threads
/// ask for the same descriptor.
/// The lock is not reentrant: [`Device::new_sampler`] must not
/// request samplers from the same library.
pub struct SharedSamplerLibrary<D: Device> {
    library: Mutex<SamplerLibrary<D>>,
}

impl<D> SharedSamplerLibrary<D>
where
    D: Device,
{
    pub fn new(device: &D) -> Self {
        SharedSamplerLibrary {
            library: Mutex::new(SamplerLibrary::new(device)),
        }
    }

    /// Returns sampler for the descriptor, creating it on first request.
    ///
    /// See [`SamplerLibrary::get_sampler`].
    pub fn get_sampler(&self, desc: SamplerDesc) -> Result<Arc<D::Sampler>, SamplerError> {
        self.library.lock().get_sampler(desc)
    }

    pub fn len(&self) -> usize {
        self.library.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.lock().is_empty()
    }

    pub fn contains(&self, desc: &SamplerDesc) -> bool {
        self.library.lock().contains(desc)
    }

    pub fn into_inner(self) -> SamplerLibrary<D> {
        self.library.into_inner()
    }
}

impl<D> From<SamplerLibrary<D>> for SharedSamplerLibrary<D>
where
    D: Device,
{
    fn from(library: SamplerLibrary<D>) -> Self {
        SharedSamplerLibrary {
            library: Mutex::new(library),
        }
    }
}

impl<D> fmt::Debug for SharedSamplerLibrary<D>
where
    D: Device,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.library.try_lock() {
            Some(library) => fmt::Debug::fmt(&*library, f),
            None => f.write_str("SharedSamplerLibrary { <locked> }"),
        }
    }
}
