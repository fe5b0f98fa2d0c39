//! WASM-facing entry points for the flow tube pipeline.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Every exported method delegates to an `*_internal`
//! counterpart that returns Rust errors, so native tests run without a JS
//! host.
//!
//! ```
//! let mut tubes = flow_wasm::FlowTubes::new(7);
//! tubes
//!     .request_regeneration_internal(r#"{"streamlineCount": 2, "tubularSegments": 8}"#)
//!     .unwrap();
//! let mesh = tubes.current_mesh().unwrap();
//! assert_eq!(mesh.tube_count(), 2);
//! ```

use config::constants::DEFAULT_NOISE_SEED;
use flow_field::{GenerationParameters, NoiseField, SeedLayout};
use flow_pipeline::{FrameClock, FrameUniforms, PipelineError, RegenerationManager};
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod mesh_handle;

pub use mesh_handle::MeshHandle;

/// Errors surfaced across the JavaScript boundary.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// The parameter JSON could not be parsed.
    #[error("Invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The parameters were rejected or the build failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

fn to_js(err: BoundaryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "flow-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the default noise seed.
#[wasm_bindgen]
pub fn default_noise_seed() -> u32 {
    DEFAULT_NOISE_SEED
}

/// Returns the default generation parameters as camelCase JSON, the shape
/// `request_regeneration` expects.
#[wasm_bindgen]
pub fn default_parameters_json() -> Result<String, JsValue> {
    default_parameters_json_internal().map_err(to_js)
}

/// Host-only helper behind [`default_parameters_json`].
///
/// # Examples
/// ```
/// let json = flow_wasm::default_parameters_json_internal().unwrap();
/// assert!(json.contains("\"radialSegments\""));
/// ```
pub fn default_parameters_json_internal() -> Result<String, BoundaryError> {
    Ok(serde_json::to_string(&GenerationParameters::default())?)
}

/// Parses camelCase parameter JSON; missing fields take their defaults.
pub fn parse_parameters(json: &str) -> Result<GenerationParameters, BoundaryError> {
    Ok(serde_json::from_str(json)?)
}

/// A flow tube scene: noise field, regeneration lifecycle and frame clock.
///
/// Generation runs inline: `request_regeneration` returns once the new
/// batch is published.
#[wasm_bindgen]
pub struct FlowTubes {
    manager: RegenerationManager<NoiseField>,
    clock: FrameClock,
    uniforms: FrameUniforms,
}

#[wasm_bindgen]
impl FlowTubes {
    /// Creates a scene over a noise field with the given seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> FlowTubes {
        Self {
            manager: RegenerationManager::inline(NoiseField::new(seed), SeedLayout::default()),
            clock: FrameClock::new(),
            uniforms: FrameUniforms::default(),
        }
    }

    /// Rebuilds the batch from parameter JSON and returns its generation.
    ///
    /// # Errors
    /// Returns a JavaScript error naming the offending parameter; the
    /// previous mesh stays current.
    pub fn request_regeneration(&mut self, params_json: &str) -> Result<u32, JsValue> {
        self.request_regeneration_internal(params_json)
            .map(|generation| u32::try_from(generation).unwrap_or(u32::MAX))
            .map_err(to_js)
    }

    /// Returns the published batch, or `undefined` before the first build.
    pub fn current_mesh(&self) -> Option<MeshHandle> {
        let generation = self.manager.published_generation()?;
        let mesh = self.manager.current_mesh()?;
        Some(MeshHandle::from_merged(generation, &mesh))
    }

    /// Generation of the published batch, `0` before the first build.
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u32 {
        self.manager
            .published_generation()
            .map_or(0, |generation| u32::try_from(generation).unwrap_or(u32::MAX))
    }

    /// Advances the frame clock to `elapsed` seconds and returns the
    /// shader time value.
    pub fn tick(&mut self, elapsed: f64) -> f32 {
        self.uniforms = self.clock.tick(elapsed);
        self.uniforms.time
    }

    /// Seconds between the last two ticks.
    #[wasm_bindgen(getter)]
    pub fn delta(&self) -> f32 {
        self.uniforms.delta
    }
}

impl FlowTubes {
    /// Host-only helper behind [`FlowTubes::request_regeneration`].
    pub fn request_regeneration_internal(&mut self, params_json: &str) -> Result<u64, BoundaryError> {
        let params = parse_parameters(params_json)?;
        let generation = self.manager.request_regeneration(params)?;
        match self.manager.last_error() {
            Some(err) if self.manager.published_generation() != Some(generation) => {
                Err(err.into())
            }
            _ => Ok(generation),
        }
    }

    /// Returns the underlying manager.
    pub fn manager(&self) -> &RegenerationManager<NoiseField> {
        &self.manager
    }
}
