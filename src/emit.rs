//! Serialization of a baked [Buffer] into shader source.

use std::fmt::{self, Write};

use crate::buffer::{BakedVertex, Buffer};

/// Writes a [Buffer] in some textual format.
pub trait Emit {
    fn emit(&self, buffer: &Buffer, out: &mut dyn Write) -> fmt::Result;

    fn emit_string(&self, buffer: &Buffer) -> String {
        let mut res = String::new();
        // writing into a String cannot fail
        let _ = self.emit(buffer, &mut res);
        res
    }
}

/// HLSL constants for a geometry stage that draws `nb_geometry_instances` instances of at most
/// `nb_vertices_per_geometry_instance` vertices each.
///
/// Vertex data of every level of detail is concatenated into `geometry_baked_vertex_data`, so that
/// switching level of detail only changes which `geometry_instance_boundaries` are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct HlslEmitter;

impl HlslEmitter {
    fn vertex(out: &mut dyn Write, v: &BakedVertex) -> fmt::Result {
        writeln!(
            out,
            "    {{ {}, {}, {}, {}, {} }},",
            FloatN(v.position.coords.as_slice()),
            FloatN(v.normal.as_slice()),
            FloatN(v.tangent.as_slice()),
            FloatN(v.uv.coords.as_slice()),
            v.strip_restart
        )
    }
}

impl Emit for HlslEmitter {
    fn emit(&self, buffer: &Buffer, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "// geometry stage constants")?;
        writeln!(
            out,
            "static const uint nb_geometry_instances = {};",
            buffer.instance_count()
        )?;
        writeln!(
            out,
            "static const uint nb_vertices_per_geometry_instance = {};\n",
            buffer.max_vertices_per_instance()
        )?;

        writeln!(
            out,
            "struct BakedVertexData {{ float3 position_ts; float3 normal_ts; float3 tangent_ts; \
             float2 uv0; bool strip_restart; }};"
        )?;
        writeln!(
            out,
            "static const BakedVertexData geometry_baked_vertex_data[{}] = {{",
            buffer.vertices().len()
        )?;
        for lod in 0..buffer.lod_count() {
            writeln!(out, "    // LOD{lod} data")?;
            if let Some(range) = buffer.lod_range(lod) {
                for v in &buffer.vertices()[range] {
                    Self::vertex(out, v)?;
                }
            }
        }
        writeln!(out, "}};\n")?;

        let boundaries = buffer.boundaries();
        write!(
            out,
            "static const uint geometry_instance_boundaries[{}] = {{ ",
            boundaries.len()
        )?;
        for (i, b) in boundaries.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{b}")?;
        }
        writeln!(out, " }};")
    }
}

/// An HLSL `floatN(...)` literal.
#[derive(Debug, Clone, Copy)]
struct FloatN<'v>(&'v [f32]);

impl fmt::Display for FloatN<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "float{}(", self.0.len())?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            // `{:?}` keeps the decimal point on whole numbers
            write!(f, "{x:?}")?;
        }
        f.write_str(")")
    }
}
