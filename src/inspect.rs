use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use glam::Vec3;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::InspectConfig;
use crate::error::{FlatObjError, Result};
use crate::mesh;
use crate::parser::{ObjData, ObjParser};
use crate::types::{BoundingBox, Mesh, MeshDescriptor, ObjCounts};

/// Read an OBJ file into memory.
pub fn load_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        FlatObjError::Input(format!("Failed to read {}: {e}", path.display()))
    })
}

/// Outcome of the mesh assembly step for one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeshStatus {
    NotRequested,
    Built(MeshDescriptor),
    NeedsTriangulation { face_width: usize },
}

/// Everything learned about one input file.
#[derive(Debug, Clone, Serialize)]
pub struct ObjReport {
    pub path: PathBuf,
    pub input_bytes: usize,
    pub counts: ObjCounts,
    /// Bytes of the typed-array buffer.
    pub buffer_bytes: usize,
    pub bounds: Option<BoundingBox>,
    pub mesh: MeshStatus,
    /// Text listing of the typed arrays and mesh vertices, when dumping.
    #[serde(skip)]
    pub dump: Option<String>,
}

/// Summary of a completed inspection run.
#[derive(Debug)]
pub struct InspectSummary {
    pub files: usize,
    pub failures: usize,
    pub duration: Duration,
}

/// Inspection orchestrator: parses every input and prints a report per file.
pub struct Inspector;

impl Inspector {
    pub fn run(config: &InspectConfig) -> Result<InspectSummary> {
        let start = Instant::now();
        if config.inputs.is_empty() {
            return Err(FlatObjError::Input("No input files given".into()));
        }

        info!(files = config.inputs.len(), "Starting inspection");

        let results: Vec<_> = config
            .inputs
            .par_iter()
            .map(|path| inspect_file(path, config))
            .collect();

        let mut failures = 0;
        let mut reports = Vec::with_capacity(results.len());
        for (path, result) in config.inputs.iter().zip(results) {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!(path = %path.display(), %e, "Inspection failed");
                    failures += 1;
                }
            }
        }

        if config.json {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| FlatObjError::Input(format!("Failed to encode report: {e}")))?;
            println!("{json}");
        } else {
            for report in &reports {
                print!("{report}");
            }
        }

        let duration = start.elapsed();
        info!(files = config.inputs.len(), failures, elapsed = ?duration, "Inspection complete");

        Ok(InspectSummary {
            files: config.inputs.len(),
            failures,
            duration,
        })
    }
}

/// Load, measure, materialize and optionally assemble one file.
pub fn inspect_file(path: &Path, config: &InspectConfig) -> Result<ObjReport> {
    let source = load_source(path)?;
    inspect_bytes(path, &source, config)
}

/// Run the measure → allocate → materialize protocol over in-memory bytes.
pub fn inspect_bytes(path: &Path, input: &[u8], config: &InspectConfig) -> Result<ObjReport> {
    let parser = ObjParser::new(config.numbers);
    let layout = parser.measure(input);
    let mut buffer = vec![0u32; layout.word_count()];
    let data = parser.materialize(input, &layout, &mut buffer);

    debug!(path = %path.display(), bytes = layout.total_bytes(), "Parsed typed arrays");

    let mut dump = None;
    if config.dump {
        let mut out = String::new();
        write_typed_arrays(&mut out, &data)?;
        dump = Some(out);
    }

    let mesh = if config.build_mesh {
        match mesh::measure_mesh(&data) {
            Ok(descriptor) => {
                let mut vertices = vec![0.0f32; descriptor.float_count()];
                let mesh = mesh::build_mesh(&data, &mut vertices)?;
                if let Some(dump) = dump.as_mut() {
                    write_mesh_vertices(dump, &mesh)?;
                }
                MeshStatus::Built(mesh.descriptor)
            }
            Err(FlatObjError::NeedsTriangulation { face_width }) => {
                warn!(path = %path.display(), face_width, "Skipping mesh: needs triangulation");
                MeshStatus::NeedsTriangulation { face_width }
            }
            Err(e) => return Err(e),
        }
    } else {
        MeshStatus::NotRequested
    };

    Ok(ObjReport {
        path: path.to_path_buf(),
        input_bytes: input.len(),
        counts: data.counts,
        buffer_bytes: layout.total_bytes(),
        bounds: position_bounds(&data),
        mesh,
        dump,
    })
}

/// Bounds of the first three components of every position.
pub fn position_bounds(data: &ObjData<'_>) -> Option<BoundingBox> {
    let points = (0..data.counts.positions.count).map(|i| {
        let p = data.position(i);
        Vec3::new(p.x(), p.y(), p.z())
    });
    BoundingBox::from_points(points)
}

/// Human-readable report; absent mesh offsets print as -1.
impl fmt::Display for ObjReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        writeln!(f, "=== {} ===", self.path.display())?;
        writeln!(f, "  Input bytes:   {}", self.input_bytes)?;
        writeln!(f, "  Buffer bytes:  {}", self.buffer_bytes)?;
        writeln!(f, "  Positions:     {} (width {})", c.positions.count, c.positions.width)?;
        writeln!(f, "  Normals:       {} (width {})", c.normals.count, c.normals.width)?;
        writeln!(f, "  Texcoords:     {} (width {})", c.texcoords.count, c.texcoords.width)?;
        writeln!(f, "  Faces:         {} (width {})", c.faces.count, c.faces.width)?;
        if let Some(bb) = &self.bounds {
            writeln!(
                f,
                "  Bounds:        ({:.3}, {:.3}, {:.3}) → ({:.3}, {:.3}, {:.3})",
                bb.min[0], bb.min[1], bb.min[2], bb.max[0], bb.max[1], bb.max[2]
            )?;
        }

        match &self.mesh {
            MeshStatus::NotRequested => {}
            MeshStatus::Built(d) => {
                let offset = |o: Option<usize>| o.map_or(-1, |o| o as i64);
                writeln!(f, "  Mesh:")?;
                writeln!(f, "    Vertex count:    {}", d.vertex_count)?;
                writeln!(f, "    Vertex stride:   {}", d.stride)?;
                writeln!(f, "    Position offset: {}", offset(d.position_offset))?;
                writeln!(f, "    TexCoord offset: {}", offset(d.texcoord_offset))?;
                writeln!(f, "    Normal offset:   {}", offset(d.normal_offset))?;
            }
            MeshStatus::NeedsTriangulation { face_width } => {
                writeln!(f, "  Mesh:          needs triangulation (face width {face_width})")?;
            }
        }

        if let Some(dump) = &self.dump {
            f.write_str(dump)?;
        }
        Ok(())
    }
}

/// Write every typed array, one row per line.
pub fn write_typed_arrays(out: &mut impl fmt::Write, data: &ObjData<'_>) -> fmt::Result {
    let sections = [
        ("Positions", data.positions, data.counts.positions.width),
        ("Normals", data.normals, data.counts.normals.width),
        ("Texcoords", data.texcoords, data.counts.texcoords.width),
    ];
    for (title, array, width) in sections {
        writeln!(out, "  {title}:")?;
        if width == 0 {
            continue;
        }
        for row in array.chunks_exact(width) {
            writeln!(out, "    {}", join_floats(row))?;
        }
    }

    writeln!(out, "  Faces:")?;
    if data.counts.faces.width > 0 {
        for face in data.faces.chunks_exact(data.counts.faces.width) {
            let corners: Vec<String> = face.iter().map(ToString::to_string).collect();
            writeln!(out, "    {}", corners.join(" "))?;
        }
    }
    Ok(())
}

/// Write the interleaved vertices of an assembled mesh.
pub fn write_mesh_vertices(out: &mut impl fmt::Write, mesh: &Mesh<'_>) -> fmt::Result {
    writeln!(out, "  Vertices:")?;
    for i in 0..mesh.vertex_count() {
        writeln!(out, "    {}", join_floats(mesh.vertex(i)))?;
    }
    Ok(())
}

fn join_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}
