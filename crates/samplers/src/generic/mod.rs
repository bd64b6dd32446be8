mod sampler;

pub use self::sampler::{
    AddressMode, CompareFunction, CreateSamplerError, Filter, MipMapMode, SamplerDesc,
};
