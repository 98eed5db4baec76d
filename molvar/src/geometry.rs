//! Small geometric value types: points, planes, quaternions, and 3x3/4x4 matrices.
//!
//! These are the payloads of the `Vec3`, `Vec4`, `Mat3`, and `Mat4` value kinds.  They
//! carry only the arithmetic the value system needs for coercion and element access;
//! the real geometry pipeline lives with the application.

use crate::types::ScriptFloat;

/// A 3-vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: ScriptFloat,
    pub y: ScriptFloat,
    pub z: ScriptFloat,
}

impl Vec3 {
    pub fn new(x: ScriptFloat, y: ScriptFloat, z: ScriptFloat) -> Self {
        Self { x, y, z }
    }

    /// The Euclidean distance between two points.
    pub fn distance(&self, other: &Vec3) -> ScriptFloat {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn length(&self) -> ScriptFloat {
        self.distance(&Vec3::default())
    }

    pub fn to_array(&self) -> [ScriptFloat; 3] {
        [self.x, self.y, self.z]
    }
}

/// A 4-vector.  Planes, axis-angle pairs, and quaternions are all stored this way, with
/// the scalar component last, so that the first three components always give the axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: ScriptFloat,
    pub y: ScriptFloat,
    pub z: ScriptFloat,
    pub w: ScriptFloat,
}

impl Vec4 {
    pub fn new(x: ScriptFloat, y: ScriptFloat, z: ScriptFloat, w: ScriptFloat) -> Self {
        Self { x, y, z, w }
    }

    pub fn distance(&self, other: &Vec4) -> ScriptFloat {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        let dw = self.w - other.w;
        (dx * dx + dy * dy + dz * dz + dw * dw).sqrt()
    }

    /// Treats the vector as the plane `ax + by + cz + d = 0` and returns the signed
    /// distance from the plane to the point.
    pub fn distance_to_plane(&self, pt: &Vec3) -> ScriptFloat {
        let norm = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        (self.x * pt.x + self.y * pt.y + self.z * pt.z + self.w) / norm
    }

    pub fn to_array(&self) -> [ScriptFloat; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

/// A quaternion `q0 + q1 i + q2 j + q3 k`, as delivered by the geometry code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub q0: ScriptFloat,
    pub q1: ScriptFloat,
    pub q2: ScriptFloat,
    pub q3: ScriptFloat,
}

impl Quaternion {
    pub fn new(q0: ScriptFloat, q1: ScriptFloat, q2: ScriptFloat, q3: ScriptFloat) -> Self {
        Self { q0, q1, q2, q3 }
    }

    /// The stored form: `{q1 q2 q3 q0}`.
    pub fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.q1, self.q2, self.q3, self.q0)
    }
}

/// A 3x3 matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat3(pub [[ScriptFloat; 3]; 3]);

/// A 4x4 matrix, row-major.  The last column holds the translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4(pub [[ScriptFloat; 4]; 4]);

// Row/column access shared by both matrix sizes.  Indexes are 0-based; callers have
// already range-checked them.
macro_rules! matrix_access {
    ($mat:ident, $n:expr) => {
        impl $mat {
            /// The matrix dimension.
            pub const SIZE: usize = $n;

            pub fn identity() -> Self {
                let mut m = [[0.0; $n]; $n];
                for (i, row) in m.iter_mut().enumerate() {
                    row[i] = 1.0;
                }
                Self(m)
            }

            pub fn element(&self, row: usize, col: usize) -> ScriptFloat {
                self.0[row][col]
            }

            pub fn set_element(&mut self, row: usize, col: usize, value: ScriptFloat) {
                self.0[row][col] = value;
            }

            pub fn row(&self, row: usize) -> [ScriptFloat; $n] {
                self.0[row]
            }

            pub fn column(&self, col: usize) -> [ScriptFloat; $n] {
                let mut data = [0.0; $n];
                for (i, item) in data.iter_mut().enumerate() {
                    *item = self.0[i][col];
                }
                data
            }

            pub fn set_row(&mut self, row: usize, data: &[ScriptFloat; $n]) {
                self.0[row] = *data;
            }

            pub fn set_column(&mut self, col: usize, data: &[ScriptFloat; $n]) {
                for (i, item) in data.iter().enumerate() {
                    self.0[i][col] = *item;
                }
            }
        }
    };
}

matrix_access!(Mat3, 3);
matrix_access!(Mat4, 4);

impl Mat3 {
    pub fn transform(&self, pt: &Vec3) -> Vec3 {
        let m = &self.0;
        Vec3::new(
            m[0][0] * pt.x + m[0][1] * pt.y + m[0][2] * pt.z,
            m[1][0] * pt.x + m[1][1] * pt.y + m[1][2] * pt.z,
            m[2][0] * pt.x + m[2][1] * pt.y + m[2][2] * pt.z,
        )
    }
}

impl Mat4 {
    /// Transforms a point: rotation plus translation.
    pub fn transform(&self, pt: &Vec3) -> Vec3 {
        let m = &self.0;
        Vec3::new(
            m[0][0] * pt.x + m[0][1] * pt.y + m[0][2] * pt.z + m[0][3],
            m[1][0] * pt.x + m[1][1] * pt.y + m[1][2] * pt.z + m[1][3],
            m[2][0] * pt.x + m[2][1] * pt.y + m[2][2] * pt.z + m[2][3],
        )
    }
}
