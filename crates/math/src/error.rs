/// Errors from vector and matrix operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("dimension mismatch in {op}: {left_rows}x{left_columns} vs {right_rows}x{right_columns}")]
    DimensionMismatch {
        op: &'static str,
        left_rows: usize,
        left_columns: usize,
        right_rows: usize,
        right_columns: usize,
    },
    #[error("invalid frustum: near={near}, far={far} (need 0 < near < far)")]
    InvalidFrustum { near: f32, far: f32 },
    #[error("invalid projection: {0}")]
    InvalidProjection(String),
    #[error("degenerate vector in {0}")]
    DegenerateVector(&'static str),
}
