use std::hash::{Hash, Hasher};

/// Texel filter used for minification and magnification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    Nearest,
    Linear,
}

/// Filter used between mip levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MipMapMode {
    #[default]
    Nearest,
    Linear,
}

/// How coordinates outside `[0, 1]` are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AddressMode {
    #[default]
    Repeat,
    MirrorRepeat,
    ClampToEdge,

    /// Samples outside of the image read transparent black.
    ClampToBorder,
}

/// Comparison applied to fetched texels by depth-compare samplers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Describes how texture sampling behaves.
///
/// This is the key of [`SamplerLibrary`](crate::SamplerLibrary).
/// Two descriptors are equal when every field that affects sampling
/// is equal. Floats are compared by their bit patterns,
/// so `NaN` matches itself while `0.0` and `-0.0` are different keys.
///
/// `label` is only used to name the native object and
/// takes no part in equality or hashing.
#[derive(Clone, Copy, Debug)]
pub struct SamplerDesc {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub mip_map_mode: MipMapMode,

    /// Address modes for `u`, `v` and `w` coordinates.
    pub address_mode: [AddressMode; 3],

    /// Depth comparison. `None` makes a regular sampler.
    pub compare: Option<CompareFunction>,

    /// Maximum anisotropy. `None` disables anisotropic filtering.
    pub anisotropy: Option<f32>,

    pub min_lod: f32,
    pub max_lod: f32,
    pub normalized: bool,

    pub label: &'static str,
}

impl PartialEq for SamplerDesc {
    #[inline(never)]
    fn eq(&self, other: &Self) -> bool {
        self.min_filter == other.min_filter
            && self.mag_filter == other.mag_filter
            && self.mip_map_mode == other.mip_map_mode
            && self.address_mode == other.address_mode
            && self.compare == other.compare
            && match (self.anisotropy, other.anisotropy) {
                (Some(a), Some(b)) => f32::total_cmp(&a, &b).is_eq(),
                (None, None) => true,
                _ => false,
            }
            && f32::total_cmp(&self.min_lod, &other.min_lod).is_eq()
            && f32::total_cmp(&self.max_lod, &other.max_lod).is_eq()
            && self.normalized == other.normalized
    }
}

impl Eq for SamplerDesc {}

impl Hash for SamplerDesc {
    #[inline(never)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.min_filter.hash(state);
        self.mag_filter.hash(state);
        self.mip_map_mode.hash(state);
        self.address_mode.hash(state);
        self.compare.hash(state);
        self.anisotropy.map(f32::to_bits).hash(state);
        self.min_lod.to_bits().hash(state);
        self.max_lod.to_bits().hash(state);
        self.normalized.hash(state);
    }
}

impl SamplerDesc {
    pub const fn new() -> Self {
        SamplerDesc {
            min_filter: Filter::Nearest,
            mag_filter: Filter::Nearest,
            mip_map_mode: MipMapMode::Nearest,
            address_mode: [AddressMode::Repeat; 3],
            compare: None,
            anisotropy: None,
            min_lod: 0.0,
            max_lod: f32::INFINITY,
            normalized: true,
            label: "",
        }
    }

    /// Point sampling with wrapping coordinates.
    pub const NEAREST_REPEAT: Self = SamplerDesc::new();

    /// Trilinear sampling clamped to the edge.
    pub const LINEAR_CLAMP: Self = SamplerDesc::new()
        .with_filter(Filter::Linear, Filter::Linear)
        .with_mip_map_mode(MipMapMode::Linear)
        .with_address_modes(AddressMode::ClampToEdge);

    /// Shadow map lookup with hardware depth comparison.
    pub const SHADOW: Self = SamplerDesc::new()
        .with_filter(Filter::Linear, Filter::Linear)
        .with_address_modes(AddressMode::ClampToEdge)
        .with_compare(CompareFunction::LessEqual);

    pub const fn with_filter(mut self, min: Filter, mag: Filter) -> Self {
        self.min_filter = min;
        self.mag_filter = mag;
        self
    }

    pub const fn with_mip_map_mode(mut self, mode: MipMapMode) -> Self {
        self.mip_map_mode = mode;
        self
    }

    pub const fn with_address_mode(
        mut self,
        u: AddressMode,
        v: AddressMode,
        w: AddressMode,
    ) -> Self {
        self.address_mode = [u, v, w];
        self
    }

    /// Uses the same address mode on all three axes.
    pub const fn with_address_modes(mut self, mode: AddressMode) -> Self {
        self.address_mode = [mode; 3];
        self
    }

    pub const fn with_compare(mut self, compare: CompareFunction) -> Self {
        self.compare = Some(compare);
        self
    }

    pub const fn with_anisotropy(mut self, anisotropy: f32) -> Self {
        self.anisotropy = Some(anisotropy);
        self
    }

    pub const fn with_lod(mut self, min: f32, max: f32) -> Self {
        self.min_lod = min;
        self.max_lod = max;
        self
    }

    pub const fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub const fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl Default for SamplerDesc {
    fn default() -> Self {
        SamplerDesc::new()
    }
}

/// Error returned by a device that could not create a sampler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CreateSamplerError {
    #[error("out of memory")]
    OutOfMemory,

    #[error("too many sampler objects")]
    TooManyObjects,

    #[error("sampler rejected by the device: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use super::*;

    fn hash_of(desc: &SamplerDesc) -> u64 {
        let mut hasher = DefaultHasher::new();
        desc.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_fields_make_equal_keys() {
        let a = SamplerDesc::new()
            .with_filter(Filter::Linear, Filter::Nearest)
            .with_address_mode(AddressMode::Repeat, AddressMode::ClampToEdge, AddressMode::Repeat)
            .with_anisotropy(8.0);

        let b = SamplerDesc {
            min_filter: Filter::Linear,
            mag_filter: Filter::Nearest,
            address_mode: [AddressMode::Repeat, AddressMode::ClampToEdge, AddressMode::Repeat],
            anisotropy: Some(8.0),
            ..SamplerDesc::default()
        };

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn label_is_ignored() {
        let a = SamplerDesc::LINEAR_CLAMP.with_label("albedo");
        let b = SamplerDesc::LINEAR_CLAMP.with_label("normal");

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn every_field_matters() {
        let base = SamplerDesc::new();
        let variants = [
            base.with_filter(Filter::Linear, Filter::Nearest),
            base.with_filter(Filter::Nearest, Filter::Linear),
            base.with_mip_map_mode(MipMapMode::Linear),
            base.with_address_mode(
                AddressMode::Repeat,
                AddressMode::Repeat,
                AddressMode::ClampToBorder,
            ),
            base.with_compare(CompareFunction::Less),
            base.with_anisotropy(4.0),
            base.with_lod(1.0, f32::INFINITY),
            base.with_lod(0.0, 8.0),
            base.with_normalized(false),
        ];

        for variant in &variants {
            assert_ne!(base, *variant, "{variant:?}");
        }
    }

    #[test]
    fn floats_compare_by_bits() {
        let nan = SamplerDesc::new().with_anisotropy(f32::NAN);
        assert_eq!(nan, nan);
        assert_eq!(hash_of(&nan), hash_of(&nan));

        let pos = SamplerDesc::new().with_lod(0.0, 4.0);
        let neg = SamplerDesc::new().with_lod(-0.0, 4.0);
        assert_ne!(pos, neg);

        assert_ne!(SamplerDesc::new(), SamplerDesc::new().with_anisotropy(1.0));
    }

    #[test]
    fn presets() {
        assert_eq!(SamplerDesc::NEAREST_REPEAT, SamplerDesc::default());
        assert_eq!(SamplerDesc::SHADOW.compare, Some(CompareFunction::LessEqual));
        assert_eq!(SamplerDesc::LINEAR_CLAMP.address_mode, [AddressMode::ClampToEdge; 3]);
        assert_ne!(SamplerDesc::LINEAR_CLAMP, SamplerDesc::SHADOW);
    }
}
