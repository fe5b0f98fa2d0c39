//! # Batch Generation
//!
//! One generation pass: seed → streamline → curve → tube for every
//! streamline index, then a single merge in index order.
//!
//! Streamlines share no mutable state, so with the `parallel` feature the
//! per-index work runs on rayon's pool. `collect` into a `Result<Vec<_>>`
//! keeps index order regardless of completion order and stops early on the
//! first error.

use flow_field::{integrate, FlowField, GenerationParameters, SeedLayout};
use flow_mesh::{build_tube, merge, Curve, MergedMesh, TubeMesh};
use glam::DVec3;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{PipelineError, PipelineResult};

/// Builds the tube for one seed point.
pub fn build_tube_for<F>(
    field: &F,
    params: &GenerationParameters,
    seed: DVec3,
) -> PipelineResult<TubeMesh>
where
    F: FlowField + ?Sized,
{
    let streamline = integrate(field, seed, params);
    let curve = Curve::fit(&streamline, params.closed_cross_section);
    let tube = build_tube(
        &curve,
        params.tube_radius,
        params.radial_segments,
        params.tubular_segments,
        params.closed_cross_section,
    )?;
    Ok(tube)
}

/// Generates and merges a full batch.
///
/// # Example
///
/// ```rust
/// use flow_field::{GenerationParameters, SeedLayout, UniformFlow};
/// use flow_pipeline::generate_batch;
/// use glam::DVec3;
///
/// let params = GenerationParameters {
///     streamline_count: 3,
///     steps_per_streamline: 4,
///     tubular_segments: 10,
///     radial_segments: 8,
///     ..GenerationParameters::default()
/// };
/// let mesh = generate_batch(&UniformFlow(DVec3::Y), &params, &SeedLayout::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 3 * 88);
/// ```
pub fn generate_batch<F>(
    field: &F,
    params: &GenerationParameters,
    seeds: &SeedLayout,
) -> PipelineResult<MergedMesh>
where
    F: FlowField + ?Sized,
{
    generate_cancellable(field, params, seeds, 0, || true)
}

/// Generates a batch that can be abandoned part-way.
///
/// `is_current` is polled before each streamline and before merging; once
/// it returns false the partial tubes are dropped and the call fails with
/// [`PipelineError::Superseded`] carrying `generation`.
pub fn generate_cancellable<F, C>(
    field: &F,
    params: &GenerationParameters,
    seeds: &SeedLayout,
    generation: u64,
    is_current: C,
) -> PipelineResult<MergedMesh>
where
    F: FlowField + ?Sized,
    C: Fn() -> bool + Sync,
{
    params.validate()?;

    let count = params.streamline_count;
    let build_one = |index: u32| -> PipelineResult<TubeMesh> {
        if !is_current() {
            return Err(PipelineError::Superseded { generation });
        }
        build_tube_for(field, params, seeds.position(index, count))
    };

    #[cfg(feature = "parallel")]
    let tubes: PipelineResult<Vec<TubeMesh>> = (0..count).into_par_iter().map(build_one).collect();

    #[cfg(not(feature = "parallel"))]
    let tubes: PipelineResult<Vec<TubeMesh>> = (0..count).map(build_one).collect();

    let tubes = tubes?;
    debug!(generation, streamlines = tubes.len(), "built tubes");

    if !is_current() {
        return Err(PipelineError::Superseded { generation });
    }
    Ok(merge(tubes)?)
}
