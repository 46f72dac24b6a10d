//! # STL Export
//!
//! Binary STL writing and reading through the `stl_io` crate. Geometry is
//! converted from f64 to f32 only here.

use crate::error::KernelError;
use crate::mesh::Mesh;
use crate::solid::Solid;
use glam::DVec3;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

fn to_f32(v: DVec3) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// Writes `solid` as a binary STL file, creating parent directories.
///
/// Degenerate triangles are skipped since they carry no surface.
pub fn export_stl(solid: &Solid, path: impl AsRef<Path>) -> Result<(), KernelError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KernelError::export(parent, e))?;
    }

    let mesh = solid.mesh();
    let triangles: Vec<stl_io::Triangle> = (0..mesh.triangle_count())
        .filter_map(|i| {
            let normal = mesh.triangle_normal(i)?;
            let [a, b, c] = mesh.triangle_positions(i);
            Some(stl_io::Triangle {
                normal: stl_io::Normal::new(to_f32(normal)),
                vertices: [
                    stl_io::Vertex::new(to_f32(a)),
                    stl_io::Vertex::new(to_f32(b)),
                    stl_io::Vertex::new(to_f32(c)),
                ],
            })
        })
        .collect();

    let file = File::create(path).map_err(|e| KernelError::export(path, e))?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| KernelError::export(path, e))?;
    writer.flush().map_err(|e| KernelError::export(path, e))?;

    info!(path = %path.display(), triangles = triangles.len(), "exported STL");
    Ok(())
}

/// Reads an STL file (binary or ASCII) into a mesh.
pub fn load_stl(path: impl AsRef<Path>) -> Result<Mesh, KernelError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| KernelError::import(path, e))?;
    let mut reader = BufReader::new(file);
    let indexed = stl_io::read_stl(&mut reader).map_err(|e| KernelError::import(path, e))?;

    let mut mesh = Mesh::with_capacity(indexed.vertices.len(), indexed.faces.len());
    for v in &indexed.vertices {
        mesh.add_vertex(DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64));
    }
    for face in &indexed.faces {
        let [a, b, c] = face.vertices;
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_export_creates_directories_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/cube.stl");
        let cube = Solid::cuboid(DVec3::new(1.0, 2.0, 3.0)).unwrap();

        export_stl(&cube, &path).unwrap();
        assert!(path.exists());

        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.triangle_count(), 12);
        assert_relative_eq!(loaded.volume(), 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_binary_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        export_stl(&Solid::cuboid(DVec3::ONE).unwrap(), &path).unwrap();

        // 80-byte header, 4-byte count, 50 bytes per triangle
        let size = fs::metadata(&path).unwrap().len();
        assert_eq!(size, 84 + 12 * 50);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_stl(dir.path().join("missing.stl"));
        assert!(matches!(result, Err(KernelError::Import { .. })));
    }
}
