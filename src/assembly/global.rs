use crate::assembly::local::ElementRetriever;
use crate::assembly::operator::AssemblyOperator;
use crate::assembly::{AssemblyOptions, StorageFormat};
use crate::error::AssemblyError;
use crate::kernels::LocalStiffness;
use itertools::iproduct;
use log::{debug, warn};
use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// The assembled global stiffness matrix in either storage format.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalStiffness {
    Dense(DMatrix<f64>),
    Sparse(CsrMatrix<f64>),
}

impl GlobalStiffness {
    pub fn neq(&self) -> usize {
        match self {
            Self::Dense(matrix) => matrix.nrows(),
            Self::Sparse(matrix) => matrix.nrows(),
        }
    }

    /// The number of explicitly stored entries.
    pub fn nnz(&self) -> usize {
        match self {
            Self::Dense(matrix) => matrix.len(),
            Self::Sparse(matrix) => matrix.nnz(),
        }
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Self::Dense(matrix) => matrix.clone(),
            Self::Sparse(matrix) => DMatrix::from(matrix),
        }
    }

    pub fn as_dense(&self) -> Option<&DMatrix<f64>> {
        match self {
            Self::Dense(matrix) => Some(matrix),
            Self::Sparse(_) => None,
        }
    }

    pub fn as_csr(&self) -> Option<&CsrMatrix<f64>> {
        match self {
            Self::Dense(_) => None,
            Self::Sparse(matrix) => Some(matrix),
        }
    }
}

fn check_element_counts(retriever: &ElementRetriever, operator: &AssemblyOperator) -> Result<(), AssemblyError> {
    if retriever.num_elements() != operator.num_elements() {
        return Err(AssemblyError::DimensionMismatch {
            expected: operator.num_elements(),
            actual: retriever.num_elements(),
        });
    }
    Ok(())
}

/// Checks the local matrix against the operator row of its element and calls `add` for every
/// entry whose row and column are both free.
fn scatter_element(
    element_index: usize,
    local: &LocalStiffness,
    dofs: &[Option<usize>],
    mut add: impl FnMut(usize, usize, f64),
) -> Result<(), AssemblyError> {
    let n = local.dof_count;
    if n > dofs.len() {
        return Err(AssemblyError::InconsistentDofCount {
            element: element_index,
            reported: n,
            allocated: dofs.len(),
            matrix_shape: local.matrix.shape(),
        });
    } else if n < dofs.len() {
        warn!(
            "Kernel for element {} reported {} DOFs, but {} are allocated. Using the leading entries.",
            element_index,
            n,
            dofs.len()
        );
    }

    let dofs = &dofs[..n];
    for (i, j) in iproduct!(0..n, 0..n) {
        if let (Some(row), Some(col)) = (dofs[i], dofs[j]) {
            add(row, col, local.matrix[(i, j)]);
        }
    }
    Ok(())
}

/// Assembles the global stiffness matrix into dense storage.
pub fn assemble_dense(
    retriever: &ElementRetriever,
    operator: &AssemblyOperator,
) -> Result<DMatrix<f64>, AssemblyError> {
    check_element_counts(retriever, operator)?;
    let neq = operator.neq();
    let mut global = DMatrix::zeros(neq, neq);

    for (element_index, dofs) in operator.iter().enumerate() {
        let local = retriever.retrieve(element_index)?;
        scatter_element(element_index, &local, dofs, |row, col, value| {
            global[(row, col)] += value
        })?;
    }

    debug!(
        "Assembled dense {}x{} stiffness matrix from {} elements",
        neq,
        neq,
        operator.num_elements()
    );
    Ok(global)
}

/// Assembles the global stiffness matrix into CSR storage.
///
/// Contributions are collected as COO triplets. Duplicate coordinates are summed during the
/// conversion to CSR.
pub fn assemble_sparse(
    retriever: &ElementRetriever,
    operator: &AssemblyOperator,
) -> Result<CsrMatrix<f64>, AssemblyError> {
    check_element_counts(retriever, operator)?;
    let neq = operator.neq();
    let mut coo = CooMatrix::new(neq, neq);

    for (element_index, dofs) in operator.iter().enumerate() {
        let local = retriever.retrieve(element_index)?;
        scatter_element(element_index, &local, dofs, |row, col, value| coo.push(row, col, value))?;
    }

    let csr = CsrMatrix::from(&coo);
    debug!(
        "Assembled sparse {}x{} stiffness matrix from {} elements ({} triplets, {} nonzeros)",
        neq,
        neq,
        operator.num_elements(),
        coo.nnz(),
        csr.nnz()
    );
    Ok(csr)
}

/// Parallel version of [`assemble_dense`].
///
/// Element matrices are computed concurrently. They are added to the global matrix afterwards
/// on the calling thread, in element order.
pub fn par_assemble_dense(
    retriever: &ElementRetriever,
    operator: &AssemblyOperator,
) -> Result<DMatrix<f64>, AssemblyError> {
    check_element_counts(retriever, operator)?;
    let locals = (0..operator.num_elements())
        .into_par_iter()
        .map(|element_index| retriever.retrieve(element_index))
        .collect::<Result<Vec<_>, _>>()?;

    let neq = operator.neq();
    let mut global = DMatrix::zeros(neq, neq);
    for (element_index, (local, dofs)) in locals.iter().zip(operator.iter()).enumerate() {
        scatter_element(element_index, local, dofs, |row, col, value| {
            global[(row, col)] += value
        })?;
    }

    debug!(
        "Assembled dense {}x{} stiffness matrix from {} elements in parallel",
        neq,
        neq,
        operator.num_elements()
    );
    Ok(global)
}

type Triplets = Vec<(usize, usize, f64)>;

/// Parallel version of [`assemble_sparse`].
///
/// Each worker gathers the triplets of the elements it processes into its own list. The lists
/// are merged into a single COO matrix before the conversion to CSR.
pub fn par_assemble_sparse(
    retriever: &ElementRetriever,
    operator: &AssemblyOperator,
) -> Result<CsrMatrix<f64>, AssemblyError> {
    check_element_counts(retriever, operator)?;
    let neq = operator.neq();

    let triplets = (0..operator.num_elements())
        .into_par_iter()
        .try_fold(Triplets::new, |mut triplets, element_index| {
            let local = retriever.retrieve(element_index)?;
            let dofs = operator.element_dofs(element_index);
            scatter_element(element_index, &local, dofs, |row, col, value| {
                triplets.push((row, col, value))
            })?;
            Ok::<_, AssemblyError>(triplets)
        })
        .try_reduce(Triplets::new, |mut a, mut b| {
            a.append(&mut b);
            Ok::<_, AssemblyError>(a)
        })?;

    let mut coo = CooMatrix::new(neq, neq);
    for &(row, col, value) in &triplets {
        coo.push(row, col, value);
    }
    let csr = CsrMatrix::from(&coo);
    debug!(
        "Assembled sparse {}x{} stiffness matrix from {} elements in parallel ({} nonzeros)",
        neq,
        neq,
        operator.num_elements(),
        csr.nnz()
    );
    Ok(csr)
}

/// Assembles the global stiffness matrix with the storage format and execution mode given by
/// `options`.
pub fn assemble_stiffness(
    retriever: &ElementRetriever,
    operator: &AssemblyOperator,
    options: &AssemblyOptions,
) -> Result<GlobalStiffness, AssemblyError> {
    match (options.format, options.parallel) {
        (StorageFormat::Dense, false) => assemble_dense(retriever, operator).map(GlobalStiffness::Dense),
        (StorageFormat::Dense, true) => par_assemble_dense(retriever, operator).map(GlobalStiffness::Dense),
        (StorageFormat::Sparse, false) => assemble_sparse(retriever, operator).map(GlobalStiffness::Sparse),
        (StorageFormat::Sparse, true) => par_assemble_sparse(retriever, operator).map(GlobalStiffness::Sparse),
    }
}
