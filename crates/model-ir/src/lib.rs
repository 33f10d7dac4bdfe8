// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-ir
//!
//! The compiled model artifact and its intermediate representation.
//!
//! - [`ModelManifest`]: the schema-versioned JSON artifact.
//! - [`DenseLayer`] / [`Activation`]: int8 fully-connected layers.
//! - [`ModelGraph`]: the layer chain with a **type-state pattern**
//!   (`Loaded` → `Validated`).
//! - [`ModelLoader`]: manifest → schema check → validated graph.
//! - [`BUILTIN_MODEL_JSON`]: the artifact compiled into the binary.
//!
//! # Example
//! ```
//! use model_ir::ModelLoader;
//!
//! let graph = ModelLoader::builtin().unwrap();
//! println!("{}", graph.summary());
//! for layer in graph.iter_layers() {
//!     println!("  {}", layer.summary());
//! }
//! ```

mod builtin;
mod error;
pub mod graph;
mod layer;
mod loader;
mod manifest;

pub use builtin::BUILTIN_MODEL_JSON;
pub use error::ModelError;
pub use graph::ModelGraph;
pub use layer::{Activation, DenseLayer};
pub use loader::ModelLoader;
pub use manifest::ModelManifest;

/// Schema version this engine understands. Artifacts declaring any other
/// version are refused at load time.
pub const SCHEMA_VERSION: u32 = 3;
