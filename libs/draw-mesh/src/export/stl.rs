//! # STL Export
//!
//! Writes meshes as binary or ASCII STL.
//!
//! STL is facet-local: every facet carries its own normal and three vertex
//! positions, so shared vertices are written once per facet that uses them.
//!
//! Binary layout:
//! - 80-byte header (text padded with spaces)
//! - `u32` little-endian facet count
//! - per facet: normal and three vertices as `f32` LE, then a `u16` attribute

use crate::error::{MeshError, MeshResult};
use crate::mesh::{face_normal, Mesh};
use crate::model::Model;
use config::constants::{DEFAULT_SOLID_NAME, STL_FACET_SIZE, STL_HEADER_SIZE, STL_HEADER_TEXT};
use glam::DVec3;
use std::io::Write;
use tracing::debug;

/// Writes `mesh` as binary STL.
///
/// # Errors
///
/// `ResourceLimit` when the facet count does not fit in 32 bits, `Io` when
/// the writer fails.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut writer: W) -> MeshResult<()> {
    let facet_count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        MeshError::resource_limit("STL facets", mesh.triangle_count(), u32::MAX as usize)
    })?;

    let mut header = [b' '; STL_HEADER_SIZE];
    let text = STL_HEADER_TEXT.as_bytes();
    let len = text.len().min(STL_HEADER_SIZE);
    header[..len].copy_from_slice(&text[..len]);
    writer.write_all(&header)?;
    writer.write_all(&facet_count.to_le_bytes())?;

    let mut record = [0u8; STL_FACET_SIZE];
    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_positions(i);
        let values = [face_normal(a, b, c), a, b, c];
        for (slot, v) in values.iter().enumerate() {
            let base = slot * 12;
            record[base..base + 4].copy_from_slice(&(v.x as f32).to_le_bytes());
            record[base + 4..base + 8].copy_from_slice(&(v.y as f32).to_le_bytes());
            record[base + 8..base + 12].copy_from_slice(&(v.z as f32).to_le_bytes());
        }
        record[48..50].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `mesh` as ASCII STL under the solid name `name`.
///
/// Whitespace in the name is replaced with underscores so the name stays a
/// single token.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, name: &str, mut writer: W) -> MeshResult<()> {
    let name = solid_name(name);
    writeln!(writer, "solid {name}")?;
    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_positions(i);
        let n = face_normal(a, b, c);
        writeln!(writer, "  facet normal {}", format_vec(n))?;
        writeln!(writer, "    outer loop")?;
        for v in [a, b, c] {
            writeln!(writer, "      vertex {}", format_vec(v))?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;
    writer.flush()?;
    Ok(())
}

/// Serializes every part of `model`, in part order, as binary STL bytes.
///
/// # Example
///
/// ```rust
/// use draw_mesh::{to_stl_binary, Mesh, Model, ModelPart, Transform};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::ZERO);
/// mesh.add_vertex(DVec3::X);
/// mesh.add_vertex(DVec3::Y);
/// mesh.add_triangle(0, 1, 2);
/// let mut model = Model::new();
/// model.add_part(ModelPart::new("tri", mesh, Transform::IDENTITY));
///
/// let bytes = to_stl_binary(&model).unwrap();
/// assert_eq!(bytes.len(), 80 + 4 + 50);
/// ```
pub fn to_stl_binary(model: &Model) -> MeshResult<Vec<u8>> {
    let mesh = model.merged();
    let mut bytes = Vec::with_capacity(STL_HEADER_SIZE + 4 + STL_FACET_SIZE * mesh.triangle_count());
    write_stl_binary(&mesh, &mut bytes)?;
    debug!(facets = mesh.triangle_count(), bytes = bytes.len(), "Wrote binary STL");
    Ok(bytes)
}

/// Serializes every part of `model`, in part order, as ASCII STL text.
///
/// An empty `name` falls back to the default solid name.
pub fn to_stl_ascii(model: &Model, name: &str) -> MeshResult<String> {
    let mesh = model.merged();
    let mut bytes = Vec::new();
    write_stl_ascii(&mesh, name, &mut bytes)?;
    debug!(facets = mesh.triangle_count(), bytes = bytes.len(), "Wrote ASCII STL");
    String::from_utf8(bytes)
        .map_err(|err| MeshError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

fn solid_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_SOLID_NAME.to_string();
    }
    trimmed
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

fn format_vec(v: DVec3) -> String {
    format!("{:.6e} {:.6e} {:.6e}", v.x as f32, v.y as f32, v.z as f32)
}
