use glam::{Vec2, Vec3, Vec4};

use crate::errors::{BoneworkError, Result};

/// A single bone weight on a vertex. `bone` indexes the owning skeleton's
/// declared bone order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoneInfluence {
    pub bone: u32,
    pub weight: f32,
}

impl BoneInfluence {
    #[must_use]
    pub fn new(bone: u32, weight: f32) -> Self {
        Self { bone, weight }
    }
}

/// Mesh data as a format codec hands it over.
///
/// Every optional attribute is either empty (absent) or holds exactly one
/// entry per vertex; [`Mesh::validate`] enforces that.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,

    // === Vertex attributes ===
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub colours: Vec<Vec4>,
    /// One list per UV layer, each indexed by vertex.
    pub uv_layers: Vec<Vec<Vec2>>,
    /// Per-vertex skin weights; vertices may carry any number of influences.
    pub influences: Vec<Vec<BoneInfluence>>,

    // === Topology ===
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        !self.influences.is_empty()
    }

    /// Checks that every present attribute has one entry per vertex and that
    /// every face index points at an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let expected = self.vertex_count();

        check_len("normals", expected, self.normals.len())?;
        check_len("tangents", expected, self.tangents.len())?;
        check_len("colours", expected, self.colours.len())?;
        for (layer, uvs) in self.uv_layers.iter().enumerate() {
            check_len(&format!("uv_layers[{layer}]"), expected, uvs.len())?;
        }
        check_len("influences", expected, self.influences.len())?;

        for (i, face) in self.faces.iter().enumerate() {
            for &index in face {
                if index as usize >= expected {
                    return Err(BoneworkError::AssetIndexOutOfBounds {
                        context: format!("vertex of face {i} in mesh '{}'", self.name),
                        index: i64::from(index),
                    });
                }
            }
        }

        Ok(())
    }

    /// Axis-aligned bounds of the vertex positions, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Rescales every vertex's influences so their weights sum to one.
    /// Vertices whose weights sum to zero are left untouched.
    pub fn normalize_influences(&mut self) {
        for vertex in &mut self.influences {
            let total: f32 = vertex.iter().map(|i| i.weight).sum();
            if total > f32::EPSILON {
                for influence in vertex.iter_mut() {
                    influence.weight /= total;
                }
            }
        }
    }
}

/// Empty attributes are absent and always valid.
fn check_len(attribute: &str, expected: usize, actual: usize) -> Result<()> {
    if actual == 0 || actual == expected {
        return Ok(());
    }
    Err(BoneworkError::AttributeLengthMismatch {
        attribute: attribute.to_string(),
        expected,
        actual,
    })
}
