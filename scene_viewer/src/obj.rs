use std::path::Path;
use std::str::SplitWhitespace;

use anyhow::{anyhow, bail, Context, Result};
use softpipe::math_prelude::*;
use softpipe::{Face, Mesh};

/// One `v/vt/vn` corner of a face, zero based.
#[derive(Debug, Clone, Copy)]
struct Corner {
    vertex: usize,
    texture: Option<usize>,
    normal: Option<usize>,
}

struct ObjModel {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texture: Vec<Vec2>,
    faces: Vec<[Corner; 3]>,
}

fn floats<const N: usize>(split: &mut SplitWhitespace) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    for value in out.iter_mut() {
        let token = split.next().ok_or_else(|| anyhow!("expected {} numbers", N))?;
        *value = token
            .parse()
            .with_context(|| format!("invalid number {:?}", token))?;
    }
    Ok(out)
}

fn index(token: &str) -> Result<usize> {
    let one_based: usize = token
        .parse()
        .with_context(|| format!("invalid index {:?}", token))?;
    one_based
        .checked_sub(1)
        .ok_or_else(|| anyhow!("indices start at 1, got 0"))
}

fn corner(token: &str) -> Result<Corner> {
    let mut parts = token.split('/');
    let vertex = index(parts.next().unwrap_or_default())?;
    let texture = match parts.next() {
        Some(t) if !t.is_empty() => Some(index(t)?),
        _ => None,
    };
    let normal = match parts.next() {
        Some(n) if !n.is_empty() => Some(index(n)?),
        _ => None,
    };
    Ok(Corner {
        vertex,
        texture,
        normal,
    })
}

fn read_obj_model(source: &str) -> Result<ObjModel> {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut texture = Vec::new();
    let mut faces = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let mut split = line.split_whitespace();
        let parsed: Result<()> = match split.next() {
            Some("v") => floats::<3>(&mut split).map(|v| vertices.push(Vec3::from(v))),
            Some("vn") => floats::<3>(&mut split).map(|n| normals.push(Vec3::from(n))),
            // image rows run top down, obj texture space bottom up
            Some("vt") => floats::<2>(&mut split).map(|[u, v]| texture.push(Vec2::new(u, 1.0 - v))),
            Some("f") => split.map(corner).collect::<Result<Vec<_>>>().and_then(|corners| {
                if corners.len() < 3 {
                    bail!("face needs at least 3 corners, got {}", corners.len());
                }
                // polygons become a fan around their first corner
                for i in 1..corners.len() - 1 {
                    faces.push([corners[0], corners[i], corners[i + 1]]);
                }
                Ok(())
            }),
            _ => Ok(()),
        };
        parsed.with_context(|| format!("line {}: {:?}", number + 1, line))?;
    }

    Ok(ObjModel {
        vertices,
        normals,
        texture,
        faces,
    })
}

/// Parses Wavefront OBJ text into a mesh. Normals are kept only when every
/// face corner names one; otherwise the mesh computes smooth normals.
pub fn parse(source: &str) -> Result<Mesh> {
    let obj = read_obj_model(source)?;
    let has_normals = !obj.normals.is_empty()
        && obj.faces.iter().flatten().all(|c| c.normal.is_some());

    let mut faces = Vec::with_capacity(obj.faces.len());
    for (i, corners) in obj.faces.iter().enumerate() {
        let mut uvs = [Vec2::ZERO; 3];
        for (uv, c) in uvs.iter_mut().zip(corners) {
            if let Some(t) = c.texture {
                *uv = *obj
                    .texture
                    .get(t)
                    .ok_or_else(|| anyhow!("face {} references missing texture coordinate {}", i, t + 1))?;
            }
        }
        let face = Face::new(corners.map(|c| c.vertex), uvs);
        faces.push(if has_normals {
            face.with_normals(corners.map(|c| c.normal.unwrap_or(c.vertex)))
        } else {
            face
        });
    }

    let normals = if has_normals { obj.normals } else { Vec::new() };
    Ok(Mesh::new(obj.vertices, normals, faces)?)
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mesh = parse(&source).with_context(|| format!("failed to parse {}", path.display()))?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# a unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 -1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_fanned_into_two_faces() {
        let mesh = parse(QUAD).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.faces().len(), 2);
        assert_eq!(mesh.faces()[1].vertices, [0, 2, 3]);
        assert_eq!(mesh.faces()[0].normals, [0, 0, 0]);
        assert_eq!(mesh.normals()[0], Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn texture_v_is_flipped() {
        let mesh = parse(QUAD).unwrap();
        assert_eq!(mesh.faces()[0].uvs[0], Vec2::new(0.0, 1.0));
        assert_eq!(mesh.faces()[0].uvs[2], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn faces_without_normals_get_smooth_ones() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.normals().len(), 3);
        assert_eq!(mesh.faces()[0].normals, [0, 1, 2]);
    }

    #[test]
    fn bad_input_is_reported_with_its_line() {
        let err = parse("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
        assert!(parse("v 0 0 0\nf 1 2 3\n").is_err());
        assert!(parse("v 0 0 0\nf 0 1 1\n").is_err());
    }
}
