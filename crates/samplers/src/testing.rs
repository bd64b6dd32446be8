//! Device that creates fake samplers and counts what it does.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Weak,
};

use parking_lot::Mutex;

use crate::{
    generic::{CreateSamplerError, SamplerDesc},
    traits::{Device, WeakDevice},
};

#[derive(Debug, Default)]
struct Inner {
    attempts: AtomicUsize,
    created: AtomicUsize,
    live: AtomicUsize,
    fail_next: Mutex<Option<CreateSamplerError>>,
}

#[derive(Clone, Debug)]
pub struct CountingDevice {
    inner: Arc<Inner>,
}

pub struct WeakCountingDevice {
    inner: Weak<Inner>,
}

#[derive(Debug)]
pub struct CountingSampler {
    pub id: usize,
    pub desc: SamplerDesc,
    owner: Weak<Inner>,
}

impl Drop for CountingSampler {
    fn drop(&mut self) {
        if let Some(inner) = self.owner.upgrade() {
            inner.live.fetch_sub(1, Ordering::Relaxed);
        }
    }
}

impl CountingDevice {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        CountingDevice {
            inner: Arc::new(Inner::default()),
        }
    }

    /// Makes the next creation attempt fail with `err`.
    pub fn fail_next(&self, err: CreateSamplerError) {
        *self.inner.fail_next.lock() = Some(err);
    }

    /// Number of times the device was asked for a sampler.
    pub fn attempts(&self) -> usize {
        self.inner.attempts.load(Ordering::Relaxed)
    }

    /// Number of samplers successfully created.
    pub fn created(&self) -> usize {
        self.inner.created.load(Ordering::Relaxed)
    }

    /// Number of samplers not yet dropped.
    pub fn live(&self) -> usize {
        self.inner.live.load(Ordering::Relaxed)
    }
}

impl Device for CountingDevice {
    type Sampler = CountingSampler;
    type Weak = WeakCountingDevice;

    fn downgrade(&self) -> WeakCountingDevice {
        WeakCountingDevice {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn new_sampler(&self, desc: &SamplerDesc) -> Result<CountingSampler, CreateSamplerError> {
        self.inner.attempts.fetch_add(1, Ordering::Relaxed);

        if let Some(err) = self.inner.fail_next.lock().take() {
            return Err(err);
        }

        let id = self.inner.created.fetch_add(1, Ordering::Relaxed);
        self.inner.live.fetch_add(1, Ordering::Relaxed);

        Ok(CountingSampler {
            id,
            desc: *desc,
            owner: Arc::downgrade(&self.inner),
        })
    }
}

impl WeakDevice for WeakCountingDevice {
    type Device = CountingDevice;

    fn upgrade(&self) -> Option<CountingDevice> {
        let inner = self.inner.upgrade()?;
        Some(CountingDevice { inner })
    }
}
