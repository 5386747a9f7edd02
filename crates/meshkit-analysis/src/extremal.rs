//! Exhaustive extremal scans over vertex subsets.
//!
//! Each scan enumerates every unordered pair, triple, or quadruple of
//! vertices (not just mesh triangles) and reports the largest distance,
//! triangle area, or tetrahedron volume. Cost is O(V²), O(V³) and O(V⁴);
//! these are meant for one-off normalization constants, not hot paths.
//!
//! Progress and cancellation go through a [`ScanObserver`], polled once
//! per outer-loop iteration.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use meshkit_math::{distance, tetrahedron_volume, triangle_area, Point3};
use meshkit_topo::TriMesh;
use serde::Serialize;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::measure::require_built;

/// Which extremal scan is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanKind {
    /// Max distance over vertex pairs.
    VertexDistance,
    /// Max triangle area over vertex triples.
    TriangleArea,
    /// Max tetrahedron volume over vertex quadruples.
    TetrahedronVolume,
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VertexDistance => "vertex distance",
            Self::TriangleArea => "triangle area",
            Self::TetrahedronVolume => "tetrahedron volume",
        })
    }
}

/// Receives progress from, and may stop, a running scan.
pub trait ScanObserver {
    /// Called before each outer iteration with the completed percentage,
    /// and once with 100 when the scan finishes.
    fn on_progress(&mut self, _scan: ScanKind, _percent: u32) {}

    /// Polled before each outer iteration; `true` stops the scan with
    /// [`AnalysisError::Cancelled`].
    fn should_abort(&self) -> bool {
        false
    }
}

/// Observer that ignores progress and never aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Observer backed by a shared flag another thread can raise.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    /// A new, lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl ScanObserver for CancelFlag {
    fn should_abort(&self) -> bool {
        self.is_cancelled()
    }
}

/// Observer that logs each whole-percent step at debug level.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    last: Option<(ScanKind, u32)>,
}

impl ScanObserver for LogProgress {
    fn on_progress(&mut self, scan: ScanKind, percent: u32) {
        if self.last != Some((scan, percent)) {
            debug!(%scan, percent, "extremal scan progress");
            self.last = Some((scan, percent));
        }
    }
}

/// The three extremal quantities of a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuxInfo {
    /// Largest distance between two vertices.
    pub max_vertex_distance: f64,
    /// Largest triangle area spanned by three vertices.
    pub max_triangle_area: f64,
    /// Largest tetrahedron volume spanned by four vertices.
    pub max_tetrahedron_volume: f64,
}

fn positions(mesh: &TriMesh) -> Vec<Point3> {
    mesh.vertices().iter().map(|v| v.position).collect()
}

fn poll(observer: &mut dyn ScanObserver, scan: ScanKind, done: usize, total: usize) -> Result<()> {
    if observer.should_abort() {
        debug!(%scan, done, total, "extremal scan cancelled");
        return Err(AnalysisError::Cancelled { scan });
    }
    observer.on_progress(scan, (done * 100 / total) as u32);
    Ok(())
}

/// Largest Euclidean distance over all vertex pairs.
pub fn max_vertex_distance(mesh: &TriMesh, observer: &mut dyn ScanObserver) -> Result<f64> {
    require_built(mesh)?;
    let scan = ScanKind::VertexDistance;
    let pts = positions(mesh);
    let mut best = 0.0_f64;

    for v in 0..pts.len() {
        poll(observer, scan, v, pts.len())?;
        for w in 0..v {
            best = best.max(distance(&pts[v], &pts[w]));
        }
    }

    observer.on_progress(scan, 100);
    Ok(best)
}

/// Largest triangle area over all vertex triples.
pub fn max_triangle_area(mesh: &TriMesh, observer: &mut dyn ScanObserver) -> Result<f64> {
    require_built(mesh)?;
    let scan = ScanKind::TriangleArea;
    let pts = positions(mesh);
    let mut best = 0.0_f64;

    for v in 0..pts.len() {
        poll(observer, scan, v, pts.len())?;
        for w in 0..v {
            for u in 0..w {
                best = best.max(triangle_area(&pts[v], &pts[w], &pts[u]));
            }
        }
    }

    observer.on_progress(scan, 100);
    Ok(best)
}

/// Largest tetrahedron volume over all vertex quadruples.
pub fn max_tetrahedron_volume(mesh: &TriMesh, observer: &mut dyn ScanObserver) -> Result<f64> {
    require_built(mesh)?;
    let scan = ScanKind::TetrahedronVolume;
    let pts = positions(mesh);
    let mut best = 0.0_f64;

    for v in 0..pts.len() {
        poll(observer, scan, v, pts.len())?;
        for w in 0..v {
            for u in 0..w {
                for y in 0..u {
                    best = best.max(tetrahedron_volume(&pts[v], &pts[w], &pts[u], &pts[y]));
                }
            }
        }
    }

    observer.on_progress(scan, 100);
    Ok(best)
}

/// Run all three scans.
pub fn compute_aux_info(mesh: &TriMesh, observer: &mut dyn ScanObserver) -> Result<AuxInfo> {
    Ok(AuxInfo {
        max_vertex_distance: max_vertex_distance(mesh, observer)?,
        max_triangle_area: max_triangle_area(mesh, observer)?,
        max_tetrahedron_volume: max_tetrahedron_volume(mesh, observer)?,
    })
}
