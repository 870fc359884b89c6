#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArmamentError {
    #[error("mount index {index} out of range ({len} mounts)")]
    IndexOutOfRange { index: usize, len: usize },
}
