//! Parameter snapshots and positional hard updates.
//!
//! The central learner's parameters are the canonical ones; workers receive
//! them as value copies between rounds. A [`ParamSnapshot`] captures a
//! network's parameters as plain shaped `f32` buffers, so a snapshot taken
//! from an autodiff model can be loaded into an inference model on another
//! backend, and can cross threads freely.
//!
//! Parameters are matched by traversal order, not by `ParamId`. Traversal
//! order is deterministic for modules with the same architecture, which
//! allows transfer between independently created models of the same
//! structure. Any count or shape disagreement is a fatal usage error and is
//! reported without partially writing the receiving module.

use burn::module::{Module, ModuleMapper, ParamId};
use burn::prelude::*;
use std::fmt;

/// Errors raised during a parameter transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The snapshot holds a different number of tensors than the module.
    CountMismatch {
        /// Tensors in the receiving module.
        module: usize,
        /// Tensors in the snapshot.
        snapshot: usize,
    },
    /// A tensor's shape disagrees with the module parameter at its position.
    ShapeMismatch {
        /// Position in traversal order.
        index: usize,
        /// Shape of the module parameter.
        expected: Vec<usize>,
        /// Shape carried by the snapshot.
        actual: Vec<usize>,
    },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::CountMismatch { module, snapshot } => write!(
                f,
                "parameter count mismatch: module has {} tensors, snapshot has {}",
                module, snapshot
            ),
            SyncError::ShapeMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "parameter {} shape mismatch: module expects {:?}, snapshot holds {:?}",
                index, expected, actual
            ),
        }
    }
}

impl std::error::Error for SyncError {}

/// One parameter tensor in traversal order: shape plus row-major data.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTensor {
    /// Tensor shape.
    pub shape: Vec<usize>,
    /// Row-major tensor data.
    pub data: Vec<f32>,
}

/// Ordered, device-independent copy of a module's parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamSnapshot {
    tensors: Vec<ParamTensor>,
}

impl ParamSnapshot {
    /// Number of parameter tensors.
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Whether the snapshot holds no tensors.
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    /// Tensors in traversal order.
    pub fn tensors(&self) -> &[ParamTensor] {
        &self.tensors
    }

    /// Total number of scalar parameters across all tensors.
    pub fn total_elements(&self) -> usize {
        self.tensors.iter().map(|t| t.data.len()).sum()
    }
}

/// Collects module parameters into a [`ParamSnapshot`].
struct SnapshotExtractor {
    tensors: Vec<ParamTensor>,
}

impl<B: Backend> ModuleMapper<B> for SnapshotExtractor {
    fn map_float<const D: usize>(&mut self, _id: ParamId, tensor: Tensor<B, D>) -> Tensor<B, D> {
        let shape = tensor.dims().to_vec();
        let data = tensor
            .to_data()
            .to_vec::<f32>()
            .expect("float parameter data");

        self.tensors.push(ParamTensor { shape, data });
        tensor
    }
}

/// Writes snapshot tensors into module parameters by position.
///
/// Records the first mismatch instead of writing through it; the caller
/// discards the mapped module whenever an error was recorded, so a failed
/// transfer leaves the receiver untouched.
struct SnapshotLoader<'a> {
    tensors: &'a [ParamTensor],
    index: usize,
    error: Option<SyncError>,
}

impl<B: Backend> ModuleMapper<B> for SnapshotLoader<'_> {
    fn map_float<const D: usize>(&mut self, _id: ParamId, tensor: Tensor<B, D>) -> Tensor<B, D> {
        let index = self.index;
        self.index += 1;

        if self.error.is_some() {
            return tensor;
        }

        let source = match self.tensors.get(index) {
            Some(source) => source,
            None => {
                // Count mismatch is finalized after traversal, once the
                // module's total is known.
                return tensor;
            }
        };

        let dims = tensor.dims();
        if source.shape.as_slice() != dims.as_slice() {
            self.error = Some(SyncError::ShapeMismatch {
                index,
                expected: dims.to_vec(),
                actual: source.shape.clone(),
            });
            return tensor;
        }

        let device = tensor.device();
        Tensor::<B, 1>::from_floats(source.data.as_slice(), &device).reshape(dims)
    }
}

/// Capture the parameters of a module as a value snapshot.
pub fn snapshot_of<B, M>(module: &M) -> ParamSnapshot
where
    B: Backend,
    M: Module<B>,
{
    let mut extractor = SnapshotExtractor {
        tensors: Vec::new(),
    };
    let _ = module.clone().map(&mut extractor);

    ParamSnapshot {
        tensors: extractor.tensors,
    }
}

/// Overwrite a module's parameters with a snapshot, matched by position.
///
/// Returns the updated module; the input module is untouched on error.
pub fn load_into<B, M>(module: &M, snapshot: &ParamSnapshot) -> Result<M, SyncError>
where
    B: Backend,
    M: Module<B>,
{
    let mut loader = SnapshotLoader {
        tensors: snapshot.tensors(),
        index: 0,
        error: None,
    };
    let mapped = module.clone().map(&mut loader);

    if let Some(error) = loader.error {
        return Err(error);
    }
    if loader.index != snapshot.len() {
        return Err(SyncError::CountMismatch {
            module: loader.index,
            snapshot: snapshot.len(),
        });
    }

    Ok(mapped)
}
