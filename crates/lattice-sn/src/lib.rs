// ─────────────────────────────────────────────────────────────────────
// SCPN Lattice Sn — Transport Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Discrete-ordinates transport in a 2-D square pin cell.
//!
//! Mesh construction and material assignment, the four-quadrant
//! diamond-difference sweep, vacuum and reflective boundaries, source
//! iteration, reaction rates and the Dancoff factor.

pub mod case;
pub mod export;
pub mod flux;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod reaction;
pub mod solver;
pub mod sweep;
