use skyview_render::ShaderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkyError {
    #[error("unknown sky parameter '{0}'")]
    UnknownParameter(String),

    #[error("uniform '{name}' holds a {expected}")]
    KindMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Shader(#[from] ShaderError),
}
