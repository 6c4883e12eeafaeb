//! # Result Extractor
//!
//! Opens the statepoint file of a finished run, looks tallies up by name
//! and converts mesh tallies to a legacy VTK rectilinear grid with `vtkio`.
//!
//! The file name depends only on the batch count
//! ([`config::constants::statepoint_file_name`]), so the driver and the
//! extractor agree without passing paths around.

use crate::error::ResultError;
use config::constants::statepoint_file_name;
use glam::DVec3;
use neutronics_model::{Axis, MeshTally, TallyQuantity};
use reactor_geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use vtkio::model::{
    Attribute, Attributes, ByteOrder, Coordinates, DataArray, DataSet, ElementType, Extent, IOBuffer,
    RectilinearGridPiece, Version, Vtk,
};

/// Scores of one mesh tally, cells ordered with x varying fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyResult {
    pub name: String,
    pub quantity: TallyQuantity,
    pub resolution: [u32; 3],
    pub bounds: BoundingBox,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

impl TallyResult {
    /// Pairs a tally request with its scores.
    pub fn new(tally: &MeshTally, mean: Vec<f64>, std_dev: Vec<f64>) -> Self {
        Self {
            name: tally.name().to_string(),
            quantity: tally.quantity(),
            resolution: tally.resolution(),
            bounds: tally.bounds(),
            mean,
            std_dev,
        }
    }

    /// Product of the resolution, saturating at `usize::MAX`.
    pub fn cell_count(&self) -> usize {
        self.resolution
            .iter()
            .fold(1usize, |acc, &n| acc.saturating_mul(n as usize))
    }

    /// Mean and standard deviation of cell `(i, j, k)`.
    pub fn value(&self, i: u32, j: u32, k: u32) -> Option<(f64, f64)> {
        let [nx, ny, nz] = self.resolution;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        let index = i as usize + nx as usize * (j as usize + ny as usize * k as usize);
        Some((*self.mean.get(index)?, *self.std_dev.get(index)?))
    }

    /// Sum of the cell means.
    pub fn total(&self) -> f64 {
        self.mean.iter().sum()
    }

    /// Cell edge coordinates along `axis`, empty for a zero resolution.
    pub fn edges(&self, axis: Axis) -> Vec<f64> {
        let a = axis.index();
        let n = self.resolution[a];
        if n == 0 {
            return Vec::new();
        }
        let (lo, hi) = (self.bounds.lower[a], self.bounds.upper[a]);
        (0..=n).map(|i| lo + (hi - lo) * f64::from(i) / f64::from(n)).collect()
    }

    pub fn cell_size(&self) -> DVec3 {
        let [nx, ny, nz] = self.resolution;
        self.bounds.extent() / DVec3::new(f64::from(nx), f64::from(ny), f64::from(nz))
    }

    /// Rejects zero or overflowing resolutions and value arrays of the
    /// wrong length. Result files come from external engines.
    fn check_shape(&self) -> Result<(), ResultError> {
        let expected = self
            .resolution
            .iter()
            .try_fold(1usize, |acc, &n| if n == 0 { None } else { acc.checked_mul(n as usize) })
            .ok_or_else(|| ResultError::Resolution {
                name: self.name.clone(),
                resolution: self.resolution,
            })?;
        for found in [self.mean.len(), self.std_dev.len()] {
            if found != expected {
                return Err(ResultError::Shape {
                    name: self.name.clone(),
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Contents of a statepoint file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePoint {
    pub batches: u32,
    pub particles: u64,
    pub tallies: Vec<TallyResult>,
}

impl StatePoint {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ResultError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ResultError::io(path, e))?;
        let statepoint: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| ResultError::format(path, e))?;
        for tally in &statepoint.tallies {
            tally.check_shape()?;
        }
        Ok(statepoint)
    }

    /// Writes the statepoint, replacing an existing file. Engines that
    /// run in-process use this to publish their results.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ResultError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ResultError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| ResultError::format(path, e))?;
        writer.flush().map_err(|e| ResultError::io(path, e))
    }
}

/// An opened result file.
#[derive(Debug, Clone)]
pub struct ResultHandle {
    path: PathBuf,
    statepoint: StatePoint,
}

/// Opens `statepoint.<batches>.json` in `dir`.
///
/// # Errors
///
/// `NotFound` when the file does not exist.
pub fn open_result(dir: impl AsRef<Path>, batches: u32) -> Result<ResultHandle, ResultError> {
    let path = dir.as_ref().join(statepoint_file_name(batches));
    if !path.is_file() {
        return Err(ResultError::NotFound(path));
    }
    let statepoint = StatePoint::read(&path)?;
    Ok(ResultHandle { path, statepoint })
}

impl ResultHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn batches(&self) -> u32 {
        self.statepoint.batches
    }

    pub fn statepoint(&self) -> &StatePoint {
        &self.statepoint
    }

    /// # Errors
    ///
    /// `NameNotFound` listing the available names. The handle is not
    /// consumed and stays usable.
    pub fn get_tally(&self, name: &str) -> Result<&TallyResult, ResultError> {
        self.statepoint
            .tallies
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ResultError::NameNotFound {
                name: name.to_string(),
                available: self.tally_names().into_iter().map(str::to_string).collect(),
            })
    }

    pub fn tally_names(&self) -> Vec<&str> {
        self.statepoint.tallies.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Writes `tally` as a legacy ASCII VTK rectilinear grid with `mean` and
/// `std_dev` cell scalars.
pub fn export_to_grid_format(tally: &TallyResult, path: impl AsRef<Path>) -> Result<(), ResultError> {
    tally.check_shape()?;
    let path = path.as_ref();
    let vtk = Vtk {
        version: Version { major: 4, minor: 2 },
        title: tally.name.clone(),
        byte_order: ByteOrder::BigEndian,
        file_path: None,
        data: DataSet::inline(grid(tally)),
    };
    vtk.export_ascii(path).map_err(|e| ResultError::vtk(path, e))
}

fn grid(tally: &TallyResult) -> RectilinearGridPiece {
    let [nx, ny, nz] = tally.resolution;
    let scalars = |name: &str, values: &[f64]| {
        Attribute::DataArray(DataArray {
            name: name.to_string(),
            elem: ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            data: IOBuffer::F64(values.to_vec()),
        })
    };
    RectilinearGridPiece {
        extent: Extent::Dims([nx + 1, ny + 1, nz + 1]),
        coords: Coordinates {
            x: IOBuffer::F64(tally.edges(Axis::X)),
            y: IOBuffer::F64(tally.edges(Axis::Y)),
            z: IOBuffer::F64(tally.edges(Axis::Z)),
        },
        data: Attributes {
            point: Vec::new(),
            cell: vec![scalars("mean", &tally.mean), scalars("std_dev", &tally.std_dev)],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neutronics_model::{define_tally, TallyKind};
    use std::fs;

    fn heating(resolution: [u32; 3]) -> TallyResult {
        let tally = define_tally(
            TallyKind::Mesh3D,
            resolution,
            BoundingBox::new((0.0, 0.0, 0.0), (2.0, 1.0, 1.0)),
            TallyQuantity::Heating,
        )
        .unwrap();
        let n = resolution.iter().product::<u32>() as usize;
        TallyResult::new(&tally, (0..n).map(|i| i as f64).collect(), vec![0.1; n])
    }

    fn write_statepoint(dir: &Path, batches: u32) {
        StatePoint {
            batches,
            particles: 100,
            tallies: vec![heating([2, 1, 1])],
        }
        .write(dir.join(statepoint_file_name(batches)))
        .unwrap();
    }

    #[test]
    fn test_open_missing_result() {
        let dir = tempfile::tempdir().unwrap();
        write_statepoint(dir.path(), 10);
        assert!(matches!(
            open_result(dir.path(), 500),
            Err(ResultError::NotFound(path)) if path.ends_with("statepoint.500.json")
        ));
    }

    #[test]
    fn test_unknown_tally_keeps_handle_usable() {
        let dir = tempfile::tempdir().unwrap();
        write_statepoint(dir.path(), 10);
        let handle = open_result(dir.path(), 10).unwrap();

        match handle.get_tally("flux_on_3D_mesh") {
            Err(ResultError::NameNotFound { name, available }) => {
                assert_eq!(name, "flux_on_3D_mesh");
                assert_eq!(available, vec!["heating_on_3D_mesh"]);
            }
            other => panic!("expected NameNotFound, got {other:?}"),
        }
        assert_eq!(handle.get_tally("heating_on_3D_mesh").unwrap().total(), 1.0);
    }

    #[test]
    fn test_value_indexing() {
        let tally = heating([2, 3, 2]);
        assert_eq!(tally.value(1, 0, 0), Some((1.0, 0.1)));
        assert_eq!(tally.value(0, 1, 0), Some((2.0, 0.1)));
        assert_eq!(tally.value(0, 0, 1), Some((6.0, 0.1)));
        assert_eq!(tally.value(2, 0, 0), None);
    }

    #[test]
    fn test_mismatched_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut tally = heating([2, 1, 1]);
        tally.std_dev.pop();
        let path = dir.path().join("heating.vtk");
        assert!(matches!(
            export_to_grid_format(&tally, &path),
            Err(ResultError::Shape { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_grid_export() {
        let tally = heating([2, 1, 1]);
        let piece = grid(&tally);
        assert_eq!(piece.extent, Extent::Dims([3, 2, 2]));
        assert_eq!(piece.coords.x, IOBuffer::F64(vec![0.0, 1.0, 2.0]));
        assert_eq!(piece.coords.z, IOBuffer::F64(vec![0.0, 1.0]));
        let names: Vec<_> = piece
            .data
            .cell
            .iter()
            .filter_map(|a| match a {
                Attribute::DataArray(array) => Some(array.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["mean", "std_dev"]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heating.vtk");
        export_to_grid_format(&tally, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("RECTILINEAR_GRID"));
        assert!(text.contains("std_dev"));
    }

    #[test]
    fn test_bad_resolution_in_result_file() {
        let dir = tempfile::tempdir().unwrap();
        for resolution in [[u32::MAX; 3], [0, 1, 1]] {
            let mut tally = heating([2, 1, 1]);
            tally.resolution = resolution;
            tally.mean.clear();
            tally.std_dev.clear();
            StatePoint {
                batches: 3,
                particles: 100,
                tallies: vec![tally],
            }
            .write(dir.path().join(statepoint_file_name(3)))
            .unwrap();

            match open_result(dir.path(), 3) {
                Err(ResultError::Resolution { resolution: found, .. }) => assert_eq!(found, resolution),
                other => panic!("expected resolution error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_edges_of_zero_resolution_are_empty() {
        let mut tally = heating([2, 1, 1]);
        assert_eq!(tally.edges(Axis::X), vec![0.0, 1.0, 2.0]);
        tally.resolution = [0, 1, 1];
        assert!(tally.edges(Axis::X).is_empty());
    }
}
