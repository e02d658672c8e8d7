//! Error type shared by all assembly stages.
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Failures that abort an assembly.
///
/// Every variant is fatal: a malformed mesh or an inconsistent kernel would otherwise produce a
/// silently wrong global system, so no partial result is ever returned alongside an error.
#[derive(Debug)]
#[non_exhaustive]
pub enum AssemblyError {
    /// The element's type code has no layout, or no kernel was registered for it.
    UnknownElementType { element: usize, kind: i32 },
    /// The element's connectivity does not have the node count its type requires.
    ConnectivityMismatch {
        element: usize,
        expected: usize,
        actual: usize,
    },
    /// An element refers to a node that does not exist.
    NodeOutOfRange {
        element: usize,
        node: usize,
        num_nodes: usize,
    },
    /// A load entry refers to a node that does not exist.
    LoadNodeOutOfRange {
        load: usize,
        node: usize,
        num_nodes: usize,
    },
    /// An element needs more DOFs per node than the node has boundary-condition flags for.
    MissingNodeDofs {
        element: usize,
        node: usize,
        required: usize,
        available: usize,
    },
    /// An element refers to a material profile that does not exist.
    MaterialOutOfRange {
        element: usize,
        material: usize,
        num_materials: usize,
    },
    /// An element index past the end of the element table was requested.
    ElementOutOfRange { element: usize, num_elements: usize },
    /// A kernel reported a DOF count that does not fit its matrix or the assembly operator.
    InconsistentDofCount {
        element: usize,
        reported: usize,
        allocated: usize,
        matrix_shape: (usize, usize),
    },
    /// The element kernel itself failed.
    Kernel { element: usize, source: eyre::Report },
    /// Two collaborating structures disagree on a size.
    DimensionMismatch { expected: usize, actual: usize },
}

impl Display for AssemblyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElementType { element, kind } => {
                write!(f, "Element {element} has unknown element type code {kind}")
            }
            Self::ConnectivityMismatch {
                element,
                expected,
                actual,
            } => write!(
                f,
                "Element {element} lists {actual} nodes, but its type requires {expected}"
            ),
            Self::NodeOutOfRange {
                element,
                node,
                num_nodes,
            } => write!(
                f,
                "Element {element} refers to node {node}, but the mesh only has {num_nodes} nodes"
            ),
            Self::LoadNodeOutOfRange { load, node, num_nodes } => write!(
                f,
                "Load {load} refers to node {node}, but the mesh only has {num_nodes} nodes"
            ),
            Self::MissingNodeDofs {
                element,
                node,
                required,
                available,
            } => write!(
                f,
                "Element {element} needs {required} DOFs at node {node}, which only has {available}"
            ),
            Self::MaterialOutOfRange {
                element,
                material,
                num_materials,
            } => write!(
                f,
                "Element {element} refers to material {material}, but only {num_materials} materials exist"
            ),
            Self::ElementOutOfRange { element, num_elements } => write!(
                f,
                "Element index {element} is out of range for a mesh with {num_elements} elements"
            ),
            Self::InconsistentDofCount {
                element,
                reported,
                allocated,
                matrix_shape: (rows, cols),
            } => write!(
                f,
                "Kernel for element {element} reported {reported} DOFs with a {rows}x{cols} matrix, \
                 but {allocated} DOFs are allocated"
            ),
            Self::Kernel { element, source } => {
                write!(f, "Kernel failed for element {element}: {source}")
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl Error for AssemblyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kernel { source, .. } => {
                let source: &(dyn Error + 'static) = source.as_ref();
                Some(source)
            }
            _ => None,
        }
    }
}
