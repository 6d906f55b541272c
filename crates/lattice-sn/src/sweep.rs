// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Transport Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Quadrant sweeps and specular reflection.
//!
//! One parametrised sweep serves all four quadrants. Each quadrant names the
//! raster direction along x and y, its block of `ang_flux`, and the two edge
//! buffer slots carrying its x- and y-directed edge flux. A slot is one half
//! (na/4 angles) of an edge buffer; the x slot is indexed by row, the y slot
//! by column.
//!
//! Within a quadrant every angle is independent, so the angles may be swept
//! concurrently over disjoint slices. The raster order inside one angle is a
//! strict upwind chain and must not be reordered.

use crate::mesh::Mesh;
use lattice_math::diamond::{diamond_difference, Streaming};
use lattice_types::error::{LatticeError, LatticeResult};
use ndarray::{s, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis, Zip};
use std::ops::Range;

/// Mesh edge owning one boundary buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left = 0,
    Bottom = 1,
    Right = 2,
    Top = 3,
}

impl Edge {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mirror edge for specular reflection.
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
            Edge::Top => Edge::Bottom,
        }
    }
}

/// Raster direction along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raster {
    Ascending,
    Descending,
}

impl Raster {
    /// Index visited at `step` of an `n`-long traversal.
    #[inline(always)]
    pub fn at(self, step: usize, n: usize) -> usize {
        match self {
            Raster::Ascending => step,
            Raster::Descending => n - 1 - step,
        }
    }
}

/// Half of an edge buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub edge: Edge,
    /// 0 = first na/4 angles, 1 = second na/4 angles.
    pub half: usize,
}

impl Slot {
    pub fn angles(self, per_quadrant: usize) -> Range<usize> {
        self.half * per_quadrant..(self.half + 1) * per_quadrant
    }

    pub fn mirror(self) -> Slot {
        Slot {
            edge: self.edge.opposite(),
            half: self.half,
        }
    }
}

/// Sweep parameters of one (μ, η) sign pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrant {
    /// Block of `ang_flux` written by this quadrant.
    pub block: usize,
    pub x_raster: Raster,
    pub y_raster: Raster,
    pub x_slot: Slot,
    pub y_slot: Slot,
}

/// Sweep order: (+μ,+η), (−μ,+η), (−μ,−η), (+μ,−η).
pub const QUADRANTS: [Quadrant; 4] = [
    Quadrant {
        block: 0,
        x_raster: Raster::Ascending,
        y_raster: Raster::Ascending,
        x_slot: Slot {
            edge: Edge::Left,
            half: 0,
        },
        y_slot: Slot {
            edge: Edge::Bottom,
            half: 0,
        },
    },
    Quadrant {
        block: 1,
        x_raster: Raster::Descending,
        y_raster: Raster::Ascending,
        x_slot: Slot {
            edge: Edge::Right,
            half: 0,
        },
        y_slot: Slot {
            edge: Edge::Bottom,
            half: 1,
        },
    },
    Quadrant {
        block: 2,
        x_raster: Raster::Descending,
        y_raster: Raster::Descending,
        x_slot: Slot {
            edge: Edge::Right,
            half: 1,
        },
        y_slot: Slot {
            edge: Edge::Top,
            half: 1,
        },
    },
    Quadrant {
        block: 3,
        x_raster: Raster::Ascending,
        y_raster: Raster::Descending,
        x_slot: Slot {
            edge: Edge::Left,
            half: 1,
        },
        y_slot: Slot {
            edge: Edge::Top,
            half: 0,
        },
    },
];

/// Sweep one angle over the whole mesh, upwind first.
///
/// `edge_x[y]` carries the x-directed edge flux of row y, `edge_y[x]` the
/// y-directed edge flux of column x. On entry they hold the inflow boundary
/// values, on exit the outflow values at the far edges.
pub fn sweep_angle(
    mut psi: ArrayViewMut2<f64>,
    mut edge_x: ArrayViewMut1<f64>,
    mut edge_y: ArrayViewMut1<f64>,
    sigma_t: ArrayView2<f64>,
    source: ArrayView2<f64>,
    streaming: Streaming,
    quadrant: Quadrant,
) {
    let n = psi.nrows();
    for step_y in 0..n {
        let y = quadrant.y_raster.at(step_y, n);
        for step_x in 0..n {
            let x = quadrant.x_raster.at(step_x, n);
            let u = diamond_difference(
                source[[y, x]],
                sigma_t[[y, x]],
                streaming,
                edge_x[y],
                edge_y[x],
            );
            psi[[y, x]] = u.cell;
            edge_x[y] = u.outgoing_x;
            edge_y[x] = u.outgoing_y;
        }
    }
}

impl Mesh {
    /// Sweep every angle of one quadrant.
    pub fn sweep_quadrant(&mut self, quadrant: &Quadrant) {
        let quadrant = *quadrant;
        let per_quadrant = self.quadrature.num_angles_per_octant;
        let h = self.pin.mesh_size;
        let block = quadrant.block * per_quadrant..(quadrant.block + 1) * per_quadrant;

        let mut psi = self.ang_flux.slice_mut(s![block, .., ..]);
        let (mut edge_x, mut edge_y) = self.edges.multi_slice_mut((
            s![quadrant.x_slot.edge.index(), quadrant.x_slot.angles(per_quadrant), ..],
            s![quadrant.y_slot.edge.index(), quadrant.y_slot.angles(per_quadrant), ..],
        ));
        let sigma_t = self.sigma_t.view();
        let source = self.source.view();

        let zip = Zip::from(psi.axis_iter_mut(Axis(0)))
            .and(edge_x.axis_iter_mut(Axis(0)))
            .and(edge_y.axis_iter_mut(Axis(0)))
            .and(&self.quadrature.mu)
            .and(&self.quadrature.eta);

        let sweep = |psi: ArrayViewMut2<f64>,
                     edge_x: ArrayViewMut1<f64>,
                     edge_y: ArrayViewMut1<f64>,
                     &mu: &f64,
                     &eta: &f64| {
            sweep_angle(
                psi,
                edge_x,
                edge_y,
                sigma_t,
                source,
                Streaming::new(mu, eta, h),
                quadrant,
            )
        };

        if self.parallel_angles {
            zip.par_for_each(sweep);
        } else {
            zip.for_each(sweep);
        }
    }

    /// Copy the quadrant's outgoing edge flux into the mirrored quadrant's
    /// incoming slots on the opposite edges.
    pub fn reflect(&mut self, quadrant: &Quadrant) {
        let per_quadrant = self.quadrature.num_angles_per_octant;
        for slot in [quadrant.x_slot, quadrant.y_slot] {
            let mirror = slot.mirror();
            let (outgoing, mut incoming) = self.edges.multi_slice_mut((
                s![slot.edge.index(), slot.angles(per_quadrant), ..],
                s![mirror.edge.index(), mirror.angles(per_quadrant), ..],
            ));
            incoming.assign(&outgoing);
        }
    }

    /// One pass over all four quadrants, reflecting after each when asked.
    pub fn transport_pass(&mut self, reflective: bool) -> LatticeResult<()> {
        for quadrant in &QUADRANTS {
            self.sweep_quadrant(quadrant);
            if reflective {
                self.reflect(quadrant);
            }
        }
        self.check_finite()
    }

    /// First non-finite angular flux, reported with its cell and angle.
    pub fn check_finite(&self) -> LatticeResult<()> {
        match self
            .ang_flux
            .indexed_iter()
            .find(|(_, v)| !v.is_finite())
        {
            Some(((angle, row, col), _)) => {
                Err(LatticeError::NonFiniteFlux { row, col, angle })
            }
            None => Ok(()),
        }
    }
}
