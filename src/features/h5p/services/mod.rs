mod embed;
mod h5p_service;
mod scope_resolver;

pub use embed::EmbedDescriptor;
pub use h5p_service::H5pService;
pub use scope_resolver::resolve_scope;
