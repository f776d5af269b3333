use std::fmt;

use crate::{MathError, Vector3};

/// `|forward × up|` at or below this means the view direction is parallel to
/// up and the camera basis is undefined.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Dense `rows x columns` matrix of `f32`, stored column-major.
///
/// Element (row `r`, column `c`) lives at `data[r + rows * c]`. For 4x4
/// matrices this is the order OpenGL expects from `uniformMatrix4fv` with
/// `transpose = false`, and the order of `glam::Mat4::to_cols_array`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: vec![0.0; rows * columns],
        }
    }

    /// `size x size` identity.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Wrap column-major data. `data.len()` must equal `rows * columns`.
    pub fn from_column_major(rows: usize, columns: usize, data: Vec<f32>) -> Result<Self, MathError> {
        if data.len() != rows * columns {
            return Err(MathError::DimensionMismatch {
                op: "from_column_major",
                left_rows: rows,
                left_columns: columns,
                right_rows: data.len(),
                right_columns: 1,
            });
        }
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Build from row-major values, which read naturally in source code.
    pub fn from_row_major(rows: usize, columns: usize, values: &[f32]) -> Result<Self, MathError> {
        if values.len() != rows * columns {
            return Err(MathError::DimensionMismatch {
                op: "from_row_major",
                left_rows: rows,
                left_columns: columns,
                right_rows: values.len(),
                right_columns: 1,
            });
        }
        let mut m = Self::zeros(rows, columns);
        for r in 0..rows {
            for c in 0..columns {
                m.set(r, c, values[r * columns + c]);
            }
        }
        Ok(m)
    }

    /// `n x 1` column vector.
    pub fn column_vector(values: &[f32]) -> Self {
        Self {
            rows: values.len(),
            columns: 1,
            data: values.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Raw column-major storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Element at (`row`, `column`).
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, row: usize, column: usize) -> f32 {
        assert!(row < self.rows && column < self.columns, "matrix index out of range");
        self.data[row + self.rows * column]
    }

    fn set(&mut self, row: usize, column: usize, value: f32) {
        self.data[row + self.rows * column] = value;
    }

    /// Matrix product `self · other`.
    ///
    /// `self` is `m x k`, `other` must be `k x p`; the result is `m x p`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MathError> {
        if self.columns != other.rows {
            return Err(MathError::DimensionMismatch {
                op: "multiply",
                left_rows: self.rows,
                left_columns: self.columns,
                right_rows: other.rows,
                right_columns: other.columns,
            });
        }
        let mut p = Matrix::zeros(self.rows, other.columns);
        for i in 0..self.rows {
            for j in 0..other.columns {
                let mut sum = 0.0;
                for k in 0..self.columns {
                    sum += self.data[i + self.rows * k] * other.data[k + other.rows * j];
                }
                p.data[i + p.rows * j] = sum;
            }
        }
        Ok(p)
    }

    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zeros(self.columns, self.rows);
        for r in 0..self.rows {
            for c in 0..self.columns {
                t.set(c, r, self.get(r, c));
            }
        }
        t
    }

    /// 4x4 translation by `offset`.
    pub fn translation(offset: Vector3) -> Matrix {
        let mut m = Matrix::identity(4);
        m.set(0, 3, offset.x);
        m.set(1, 3, offset.y);
        m.set(2, 3, offset.z);
        m
    }

    /// Right-handed OpenGL-style perspective projection mapping view-space
    /// depth `-near..-far` to clip-space `z/w` in `-1..1`.
    pub fn perspective(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Result<Matrix, MathError> {
        if !(near.is_finite() && far.is_finite()) || near <= 0.0 || far <= near {
            return Err(MathError::InvalidFrustum { near, far });
        }
        if !fov_radians.is_finite() || fov_radians <= 0.0 || fov_radians >= std::f32::consts::PI {
            return Err(MathError::InvalidProjection(format!(
                "field of view {fov_radians} rad outside (0, pi)"
            )));
        }
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(MathError::InvalidProjection(format!(
                "aspect ratio {aspect} must be positive"
            )));
        }

        let f = 1.0 / (fov_radians / 2.0).tan();
        let nf = 1.0 / (near - far);
        let mut r = Matrix::zeros(4, 4);
        r.set(0, 0, f / aspect);
        r.set(1, 1, f);
        r.set(2, 2, (far + near) * nf);
        r.set(3, 2, -1.0);
        r.set(2, 3, 2.0 * far * near * nf);
        Ok(r)
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    ///
    /// Fails when `eye == target`, when `up` is zero, or when the view
    /// direction is parallel to `up`.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Result<Matrix, MathError> {
        let f = target
            .subtract(eye)
            .normalize()
            .map_err(|_| MathError::DegenerateVector("look_at: eye coincides with target"))?;
        let up = up
            .normalize()
            .map_err(|_| MathError::DegenerateVector("look_at: zero up vector"))?;
        let side = f.cross(up);
        if side.magnitude() <= PARALLEL_EPSILON {
            return Err(MathError::DegenerateVector("look_at: view direction parallel to up"));
        }
        let s = side.normalize()?;
        let u = s.cross(f);

        let mut l = Matrix::zeros(4, 4);
        l.set(0, 0, s.x);
        l.set(0, 1, s.y);
        l.set(0, 2, s.z);
        l.set(1, 0, u.x);
        l.set(1, 1, u.y);
        l.set(1, 2, u.z);
        l.set(2, 0, -f.x);
        l.set(2, 1, -f.y);
        l.set(2, 2, -f.z);
        l.set(0, 3, -s.dot(eye));
        l.set(1, 3, -u.dot(eye));
        l.set(2, 3, f.dot(eye));
        l.set(3, 3, 1.0);
        Ok(l)
    }

    /// Apply a 4x4 matrix to a homogeneous point.
    pub fn transform_point(&self, point: [f32; 4]) -> Result<[f32; 4], MathError> {
        let p = self.multiply(&Matrix::column_vector(&point))?;
        if p.rows != 4 {
            return Err(MathError::DimensionMismatch {
                op: "transform_point",
                left_rows: self.rows,
                left_columns: self.columns,
                right_rows: 4,
                right_columns: 1,
            });
        }
        Ok([p.data[0], p.data[1], p.data[2], p.data[3]])
    }

    /// The 16 column-major floats of a 4x4 matrix.
    pub fn to_cols_array(&self) -> Result<[f32; 16], MathError> {
        let mismatch = MathError::DimensionMismatch {
            op: "to_cols_array",
            left_rows: self.rows,
            left_columns: self.columns,
            right_rows: 4,
            right_columns: 4,
        };
        if self.rows != 4 || self.columns != 4 {
            return Err(mismatch);
        }
        self.data.as_slice().try_into().map_err(|_| mismatch)
    }

    /// Element-wise comparison within `eps`. Shapes must match.
    pub fn approx_eq(&self, other: &Matrix, eps: f32) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "[")?;
            for c in 0..self.columns {
                if c != 0 {
                    write!(f, ",")?;
                }
                write!(f, "{:.4}", self.get(r, c))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl From<glam::Mat4> for Matrix {
    fn from(m: glam::Mat4) -> Self {
        Self {
            rows: 4,
            columns: 4,
            data: m.to_cols_array().to_vec(),
        }
    }
}

impl TryFrom<&Matrix> for glam::Mat4 {
    type Error = MathError;

    fn try_from(m: &Matrix) -> Result<Self, MathError> {
        Ok(glam::Mat4::from_cols_array(&m.to_cols_array()?))
    }
}
