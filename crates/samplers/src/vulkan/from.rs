use ash::vk;

use crate::generic::{
    AddressMode, CompareFunction, CreateSamplerError, Filter, MipMapMode, SamplerDesc,
};

pub trait AshFrom<T> {
    fn ash_from(value: T) -> Self;
}

pub trait IntoAsh<A> {
    fn into_ash(self) -> A;
}

impl<A, T> IntoAsh<A> for T
where
    A: AshFrom<T>,
{
    #[inline(always)]
    fn into_ash(self) -> A {
        A::ash_from(self)
    }
}

impl AshFrom<Filter> for vk::Filter {
    #[inline(always)]
    fn ash_from(value: Filter) -> Self {
        match value {
            Filter::Nearest => vk::Filter::NEAREST,
            Filter::Linear => vk::Filter::LINEAR,
        }
    }
}

impl AshFrom<MipMapMode> for vk::SamplerMipmapMode {
    #[inline(always)]
    fn ash_from(value: MipMapMode) -> Self {
        match value {
            MipMapMode::Nearest => vk::SamplerMipmapMode::NEAREST,
            MipMapMode::Linear => vk::SamplerMipmapMode::LINEAR,
        }
    }
}

impl AshFrom<AddressMode> for vk::SamplerAddressMode {
    #[inline(always)]
    fn ash_from(value: AddressMode) -> Self {
        match value {
            AddressMode::Repeat => vk::SamplerAddressMode::REPEAT,
            AddressMode::MirrorRepeat => vk::SamplerAddressMode::MIRRORED_REPEAT,
            AddressMode::ClampToEdge => vk::SamplerAddressMode::CLAMP_TO_EDGE,
            AddressMode::ClampToBorder => vk::SamplerAddressMode::CLAMP_TO_BORDER,
        }
    }
}

impl AshFrom<CompareFunction> for vk::CompareOp {
    #[inline(always)]
    fn ash_from(value: CompareFunction) -> Self {
        match value {
            CompareFunction::Never => vk::CompareOp::NEVER,
            CompareFunction::Less => vk::CompareOp::LESS,
            CompareFunction::Equal => vk::CompareOp::EQUAL,
            CompareFunction::LessEqual => vk::CompareOp::LESS_OR_EQUAL,
            CompareFunction::Greater => vk::CompareOp::GREATER,
            CompareFunction::NotEqual => vk::CompareOp::NOT_EQUAL,
            CompareFunction::GreaterEqual => vk::CompareOp::GREATER_OR_EQUAL,
            CompareFunction::Always => vk::CompareOp::ALWAYS,
        }
    }
}

impl AshFrom<vk::Result> for CreateSamplerError {
    fn ash_from(value: vk::Result) -> Self {
        match value {
            vk::Result::ERROR_OUT_OF_HOST_MEMORY | vk::Result::ERROR_OUT_OF_DEVICE_MEMORY => {
                CreateSamplerError::OutOfMemory
            }
            vk::Result::ERROR_TOO_MANY_OBJECTS => CreateSamplerError::TooManyObjects,
            err => CreateSamplerError::Rejected(err.to_string()),
        }
    }
}

/// Builds sampler create info for the descriptor.
///
/// `max_anisotropy` is the device limit, `None` when the
/// `samplerAnisotropy` feature is not enabled.
pub(super) fn sampler_create_info(
    desc: &SamplerDesc,
    max_anisotropy: Option<f32>,
) -> vk::SamplerCreateInfo {
    let anisotropy = match (desc.anisotropy, max_anisotropy) {
        (Some(anisotropy), Some(max)) => Some(anisotropy.clamp(1.0, max.max(1.0))),
        _ => None,
    };

    let [u, v, w] = desc.address_mode;

    vk::SamplerCreateInfo::builder()
        .min_filter(desc.min_filter.into_ash())
        .mag_filter(desc.mag_filter.into_ash())
        .mipmap_mode(desc.mip_map_mode.into_ash())
        .address_mode_u(u.into_ash())
        .address_mode_v(v.into_ash())
        .address_mode_w(w.into_ash())
        .anisotropy_enable(anisotropy.is_some())
        .max_anisotropy(anisotropy.unwrap_or(1.0))
        .compare_enable(desc.compare.is_some())
        .compare_op(desc.compare.map_or(vk::CompareOp::NEVER, |compare| compare.into_ash()))
        .min_lod(desc.min_lod)
        .max_lod(desc.max_lod.min(vk::LOD_CLAMP_NONE))
        .border_color(vk::BorderColor::FLOAT_TRANSPARENT_BLACK)
        .unnormalized_coordinates(!desc.normalized)
        .build()
}
