//! # Tagged Volume Mesh File
//!
//! The hand-off artifact between geometry and the neutronics model: one
//! closed surface per assembly member, each carrying its `mat_<name>` tag.
//! Stored as a JSON document; [`VolumeMesh::write_vtk`] gives a legacy VTK
//! view for inspection through `vtkio`.

use crate::bounds::BoundingBox;
use crate::error::VolumeMeshError;
use crate::mesh::SurfaceMesh;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use vtkio::model::{
    Attribute, Attributes, ByteOrder, DataArray, DataSet, ElementType, IOBuffer, PolyDataPiece, Version,
    VertexNumbers, Vtk,
};

/// Current file layout version.
pub const VOLUME_MESH_FORMAT_VERSION: u32 = 1;

/// One tagged volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedVolume {
    /// 1-based volume id, in assembly order
    pub id: u32,
    pub tag: String,
    pub shape: String,
    pub color: [f32; 3],
    pub mesh: SurfaceMesh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMesh {
    pub format_version: u32,
    pub volumes: Vec<TaggedVolume>,
}

impl VolumeMesh {
    pub fn new(volumes: Vec<TaggedVolume>) -> Self {
        Self {
            format_version: VOLUME_MESH_FORMAT_VERSION,
            volumes,
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, VolumeMeshError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| VolumeMeshError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| VolumeMeshError::format(path, e))
    }

    /// Writes the JSON document, replacing any existing file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), VolumeMeshError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| VolumeMeshError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| VolumeMeshError::format(path, e))?;
        writer.flush().map_err(|e| VolumeMeshError::io(path, e))
    }

    /// Volume tags in file order.
    pub fn tags(&self) -> Vec<String> {
        self.volumes.iter().map(|v| v.tag.clone()).collect()
    }

    pub fn volume(&self, tag: &str) -> Option<&TaggedVolume> {
        self.volumes.iter().find(|v| v.tag == tag)
    }

    /// Corners of the whole geometry, `None` when no volume has vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.volumes
            .iter()
            .filter_map(|v| v.mesh.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    /// Writes legacy ASCII VTK polydata with a `volume_id` cell scalar.
    pub fn write_vtk(&self, path: impl AsRef<Path>) -> Result<(), VolumeMeshError> {
        let path = path.as_ref();
        let vtk = Vtk {
            version: Version { major: 4, minor: 2 },
            title: "tagged volume mesh".to_string(),
            byte_order: ByteOrder::BigEndian,
            file_path: None,
            data: DataSet::inline(self.poly_data()),
        };
        vtk.export_ascii(path).map_err(|e| VolumeMeshError::vtk(path, e))
    }

    /// All volumes as one triangle soup, vertex indices offset per volume.
    fn poly_data(&self) -> PolyDataPiece {
        let mut points = Vec::new();
        let mut vertices = Vec::new();
        let mut volume_ids = Vec::new();
        let mut offset = 0u32;
        for volume in &self.volumes {
            points.extend(volume.mesh.vertices().iter().flat_map(|v| [v.x, v.y, v.z]));
            for t in volume.mesh.triangles() {
                vertices.extend([3, t[0] + offset, t[1] + offset, t[2] + offset]);
                volume_ids.push(volume.id as i32);
            }
            offset += volume.mesh.vertex_count() as u32;
        }

        PolyDataPiece {
            points: IOBuffer::F64(points),
            verts: None,
            lines: None,
            polys: Some(VertexNumbers::Legacy {
                num_cells: volume_ids.len() as u32,
                vertices,
            }),
            strips: None,
            data: Attributes {
                point: Vec::new(),
                cell: vec![Attribute::DataArray(DataArray {
                    name: "volume_id".to_string(),
                    elem: ElementType::Scalars {
                        num_comp: 1,
                        lookup_table: None,
                    },
                    data: IOBuffer::I32(volume_ids),
                })],
            },
        }
    }
}
