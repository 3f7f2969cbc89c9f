use geolab_contour::ContourError;
use geolab_kernel::KernelError;
use geolab_lsystem::LSystemError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    #[error("Contour error: {0}")]
    Contour(#[from] ContourError),
    #[error("L-system error: {0}")]
    LSystem(#[from] LSystemError),
}
