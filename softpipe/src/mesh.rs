use crate::color;
use crate::error::MeshError;
use crate::light::Material;
use crate::math;
use crate::math_prelude::*;
use crate::texture::TextureMaps;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Indices into the mesh vertices.
    pub vertices: [usize; 3],
    /// Indices into the mesh normals.
    pub normals: [usize; 3],
    pub uvs: [Vec2; 3],
    pub color: Vec4,
}

impl Face {
    /// A white face whose normal indices are its vertex indices.
    pub fn new(vertices: [usize; 3], uvs: [Vec2; 3]) -> Self {
        Self {
            vertices,
            normals: vertices,
            uvs,
            color: color::WHITE,
        }
    }

    pub fn with_normals(mut self, normals: [usize; 3]) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }
}

/// Per instance placement of a mesh. Rotation is in radians about each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vec3,
    pub rotation: Vec3,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        math::world_matrix(self.scale, self.rotation, self.translation)
    }
}

/// Indexed triangle mesh.
///
/// Geometry is validated on construction and immutable afterwards, only the
/// transform, maps and material may change between frames.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    tangents: Vec<Vec3>,
    bitangents: Vec<Vec3>,
    colors: Option<Vec<Vec4>>,
    faces: Vec<Face>,
    pub transform: Transform,
    pub maps: TextureMaps,
    /// Overrides the scene material for this mesh.
    pub material: Option<Material>,
}

impl Mesh {
    /// Builds a mesh, checking every face index.
    ///
    /// With an empty `normals` smooth vertex normals are computed and every
    /// face's normal indices are reset to its vertex indices. Tangents and
    /// bitangents are always derived from the positions and face UVs.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        if faces.is_empty() {
            return Err(MeshError::Empty);
        }
        for (i, face) in faces.iter().enumerate() {
            if let Some(&index) = face.vertices.iter().find(|&&v| v >= vertices.len()) {
                return Err(MeshError::VertexIndexOutOfRange {
                    face: i,
                    index,
                    len: vertices.len(),
                });
            }
            if normals.is_empty() {
                continue;
            }
            if let Some(&index) = face.normals.iter().find(|&&n| n >= normals.len()) {
                return Err(MeshError::NormalIndexOutOfRange {
                    face: i,
                    index,
                    len: normals.len(),
                });
            }
        }

        Ok(Self::from_valid_parts(vertices, normals, faces))
    }

    fn from_valid_parts(vertices: Vec<Vec3>, normals: Vec<Vec3>, mut faces: Vec<Face>) -> Self {
        let smooth = smooth_normals(&vertices, &faces);
        let (normals, frame_normals) = if normals.is_empty() {
            faces.iter_mut().for_each(|f| f.normals = f.vertices);
            (smooth.clone(), smooth)
        } else {
            let frame_normals = supplied_vertex_normals(&normals, &faces, smooth);
            (normals, frame_normals)
        };
        let (tangents, bitangents) = tangent_frames(&vertices, &frame_normals, &faces);

        log::trace!(
            "mesh with {} vertices, {} normals and {} faces",
            vertices.len(),
            normals.len(),
            faces.len()
        );

        Self {
            vertices,
            normals,
            tangents,
            bitangents,
            colors: None,
            faces,
            transform: Transform::default(),
            maps: TextureMaps::default(),
            material: None,
        }
    }

    /// One color per vertex, used instead of the face color when filling.
    pub fn with_vertex_colors(mut self, colors: Vec<Vec4>) -> Result<Self, MeshError> {
        if colors.len() != self.vertices.len() {
            return Err(MeshError::ColorCountMismatch {
                expected: self.vertices.len(),
                actual: colors.len(),
            });
        }
        self.colors = Some(colors);
        Ok(self)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_maps(mut self, maps: TextureMaps) -> Self {
        self.maps = maps;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Cube spanning `[-1, 1]` on every axis, two triangles per side, wound
    /// clockwise when seen from outside.
    pub fn cube() -> Self {
        const VERTICES: [[f32; 3]; 8] = [
            [-1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
        ];
        const FACES: [[usize; 3]; 12] = [
            // front
            [0, 1, 2],
            [0, 2, 3],
            // right
            [3, 2, 4],
            [3, 4, 5],
            // back
            [5, 4, 6],
            [5, 6, 7],
            // left
            [7, 6, 1],
            [7, 1, 0],
            // top
            [1, 6, 4],
            [1, 4, 2],
            // bottom
            [5, 7, 0],
            [5, 0, 3],
        ];
        let first = [Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let second = [Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];

        let vertices = VERTICES.iter().map(|v| Vec3::from(*v)).collect();
        let faces = FACES
            .iter()
            .enumerate()
            .map(|(i, f)| Face::new(*f, if i % 2 == 0 { first } else { second }))
            .collect();

        Self::from_valid_parts(vertices, Vec::new(), faces)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn tangents(&self) -> &[Vec3] {
        &self.tangents
    }

    pub fn bitangents(&self) -> &[Vec3] {
        &self.bitangents
    }

    pub fn vertex_colors(&self) -> Option<&[Vec4]> {
        self.colors.as_deref()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Color of one corner of `face`: the vertex color if the mesh has them,
    /// the face color otherwise.
    pub fn corner_color(&self, face: &Face, corner: usize) -> Vec4 {
        match &self.colors {
            Some(colors) => colors[face.vertices[corner]],
            None => face.color,
        }
    }
}

fn face_normal(vertices: &[Vec3], face: &Face) -> Vec3 {
    let [a, b, c] = face.vertices.map(|i| vertices[i]);
    (b - a).cross(c - a)
}

/// Area weighted average of the adjacent face normals.
fn smooth_normals(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];
    for face in faces {
        let n = face_normal(vertices, face);
        for &v in &face.vertices {
            normals[v] += n;
        }
    }
    normals.into_iter().map(math::normalize_or_zero).collect()
}

/// Per vertex average of the supplied normals its face corners reference.
/// Vertices whose supplied normals cancel out keep their smooth normal.
fn supplied_vertex_normals(normals: &[Vec3], faces: &[Face], smooth: Vec<Vec3>) -> Vec<Vec3> {
    let mut summed = vec![Vec3::ZERO; smooth.len()];
    for face in faces {
        for (&v, &n) in face.vertices.iter().zip(&face.normals) {
            summed[v] += math::normalize_or_zero(normals[n]);
        }
    }
    summed
        .into_iter()
        .zip(smooth)
        .map(|(n, fallback)| {
            let n = math::normalize_or_zero(n);
            if n == Vec3::ZERO {
                fallback
            } else {
                n
            }
        })
        .collect()
}

/// Per face tangent and bitangent from the UV deltas of its edges. `None`
/// when the UV mapping of the face is degenerate.
pub fn face_tangents(positions: &[Vec3; 3], uvs: &[Vec2; 3]) -> Option<(Vec3, Vec3)> {
    let duv1 = uvs[1] - uvs[0];
    let duv2 = uvs[2] - uvs[0];
    let edge1 = positions[1] - positions[0];
    let edge2 = positions[2] - positions[0];

    let det = duv1.x * duv2.y - duv2.x * duv1.y;
    if det.abs() <= f32::EPSILON {
        return None;
    }
    let f = 1.0 / det;
    let tangent = (edge1 * duv2.y - edge2 * duv1.y) * f;
    let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * f;
    Some((tangent, bitangent))
}

fn tangent_frames(vertices: &[Vec3], normals: &[Vec3], faces: &[Face]) -> (Vec<Vec3>, Vec<Vec3>) {
    let mut tangents = vec![Vec3::ZERO; vertices.len()];
    let mut bitangents = vec![Vec3::ZERO; vertices.len()];

    for face in faces {
        let positions = face.vertices.map(|i| vertices[i]);
        if let Some((t, b)) = face_tangents(&positions, &face.uvs) {
            for &v in &face.vertices {
                tangents[v] += t;
                bitangents[v] += b;
            }
        }
    }

    for ((t, b), n) in tangents.iter_mut().zip(bitangents.iter_mut()).zip(normals) {
        if *n == Vec3::ZERO {
            *t = Vec3::ZERO;
            *b = Vec3::ZERO;
            continue;
        }
        // Gram-Schmidt against the normal, falling back to any perpendicular
        // axis when the UVs gave nothing usable.
        let mut tangent = math::normalize_or_zero(*t - *n * n.dot(*t));
        if tangent == Vec3::ZERO {
            tangent = n.any_orthonormal_vector();
        }
        let handedness = if n.cross(tangent).dot(*b) < 0.0 { -1.0 } else { 1.0 };
        *b = n.cross(tangent) * handedness;
        *t = tangent;
    }

    (tangents, bitangents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_face() -> Face {
        Face::new(
            [0, 1, 2],
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        )
    }

    fn quad_vertices() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn rejects_out_of_range_vertex_index() {
        let face = Face::new([0, 1, 3], [Vec2::ZERO; 3]);
        let err = Mesh::new(quad_vertices(), Vec::new(), vec![face]).unwrap_err();
        assert_eq!(
            err,
            MeshError::VertexIndexOutOfRange {
                face: 0,
                index: 3,
                len: 3
            }
        );
    }

    #[test]
    fn tangents_are_orthogonal_to_supplied_normals() {
        // the geometric normal is -Z, the supplied one leans towards +X
        let supplied = Vec3::new(1.0, 0.0, -1.0).normalize();
        let face = quad_face().with_normals([0, 0, 0]);
        let mesh = Mesh::new(quad_vertices(), vec![supplied], vec![face]).unwrap();

        for v in 0..3 {
            let t = mesh.tangents()[v];
            let b = mesh.bitangents()[v];
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!(t.dot(supplied).abs() < 1e-5, "tangent {} not orthogonal", t);
            assert!(b.dot(supplied).abs() < 1e-5, "bitangent {} not orthogonal", b);
            assert!(t.dot(b).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_out_of_range_normal_index() {
        let face = quad_face().with_normals([0, 0, 1]);
        let err = Mesh::new(quad_vertices(), vec![Vec3::Z], vec![face]).unwrap_err();
        assert_eq!(
            err,
            MeshError::NormalIndexOutOfRange {
                face: 0,
                index: 1,
                len: 1
            }
        );
    }

    #[test]
    fn rejects_empty_mesh() {
        assert_eq!(
            Mesh::new(quad_vertices(), Vec::new(), Vec::new()).unwrap_err(),
            MeshError::Empty
        );
    }

    #[test]
    fn computes_normals_when_missing() {
        let face = quad_face().with_normals([7, 7, 7]);
        let mesh = Mesh::new(quad_vertices(), Vec::new(), vec![face]).unwrap();
        assert_eq!(mesh.faces()[0].normals, [0, 1, 2]);
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn tangents_follow_uv_axes() {
        let mesh = Mesh::new(quad_vertices(), Vec::new(), vec![quad_face()]).unwrap();
        for (t, b) in mesh.tangents().iter().zip(mesh.bitangents()) {
            assert!(t.abs_diff_eq(Vec3::X, 1e-6));
            assert!(b.abs_diff_eq(Vec3::Y, 1e-6));
        }
    }

    #[test]
    fn degenerate_uvs_still_give_an_orthonormal_frame() {
        let face = Face::new([0, 1, 2], [Vec2::ZERO; 3]);
        let mesh = Mesh::new(quad_vertices(), Vec::new(), vec![face]).unwrap();
        let n = mesh.normals()[0];
        let t = mesh.tangents()[0];
        let b = mesh.bitangents()[0];
        assert!((t.length() - 1.0).abs() < 1e-5);
        assert!((b.length() - 1.0).abs() < 1e-5);
        assert!(t.dot(n).abs() < 1e-5);
        assert!(b.dot(t).abs() < 1e-5);
    }

    #[test]
    fn vertex_color_count_is_checked() {
        let mesh = Mesh::new(quad_vertices(), Vec::new(), vec![quad_face()]).unwrap();
        assert_eq!(
            mesh.clone().with_vertex_colors(vec![color::BLACK]).unwrap_err(),
            MeshError::ColorCountMismatch {
                expected: 3,
                actual: 1
            }
        );
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let mesh = mesh.with_vertex_colors(vec![red; 3]).unwrap();
        assert_eq!(mesh.corner_color(&mesh.faces()[0], 2), red);
    }

    #[test]
    fn cube_faces_point_outwards() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.faces().len(), 12);
        for face in cube.faces() {
            let centroid = face
                .vertices
                .iter()
                .map(|&i| cube.vertices()[i])
                .sum::<Vec3>()
                / 3.0;
            assert!(face_normal(cube.vertices(), face).dot(centroid) > 0.0);
        }
    }

    #[test]
    fn transform_matrix_matches_world_matrix() {
        let transform = Transform {
            scale: Vec3::splat(2.0),
            rotation: Vec3::new(0.1, 0.2, 0.3),
            translation: Vec3::new(0.0, 0.0, 5.0),
        };
        assert_eq!(
            transform.matrix(),
            math::world_matrix(transform.scale, transform.rotation, transform.translation)
        );
    }
}
