use glam::{Mat4, Quat, Vec3};

/// Decomposed local transform: translation, rotation and scale.
///
/// This is the per-node value animation channels produce and blending
/// operates on. It is recomposed into a matrix in `T * R * S` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Decomposes an affine matrix.
    ///
    /// Shear is lost in the decomposition; bind poses with shear should be
    /// used verbatim rather than round-tripped through this type.
    #[must_use]
    pub fn from_matrix(mat: &Mat4) -> Self {
        let (scale, rotation, position) = mat.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Recomposes the matrix as `translate * rotate * scale`.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Mixes `other` into `self` by factor `t`.
    ///
    /// Position and scale are lerped componentwise; rotation is slerped and
    /// renormalized.
    #[must_use]
    pub fn mix(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t).normalize(),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
