//! This crate contains the triangulation algorithms for the `mvg` workspace.
//!
//! ## Triangulation
//!
//! In this problem we know the projection matrix of each camera and the
//! normalized image coordinate at which both cameras observed the same
//! feature. We want to find the 3d point from which the observed rays
//! emanated. Since the observations are noisy, the rays will generally not
//! intersect exactly, so the point is recovered as the least-squares solution
//! of a homogeneous linear system built from both views (the Linear-Eigen
//! method of Hartley and Sturm's
//! ["Triangulation"](https://users.cecs.anu.edu.au/~hartley/Papers/triangulation/triangulation.pdf)).
//!
//! The null-space extraction itself is behind the [`HomogeneousSolver`] trait
//! so that the triangulation contract (smallest-singular-value right vector)
//! can be tested independently of the SVD implementation backing it.

mod solver;
mod triangulation;

pub use solver::*;
pub use triangulation::*;
