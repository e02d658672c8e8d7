//! Lookup of element kernels by element type.
use crate::kernels::{
    BeamKernel, ElementKernel, ElementType, Quad4Kernel, Quad9Kernel, SpringKernel, Tri3Kernel, Tri6Kernel,
    TrussKernel,
};
use std::collections::BTreeMap;
use std::fmt;

/// Associates element types with the kernels that compute their stiffness.
///
/// The [`Default`] registry is [`KernelRegistry::canonical`].
pub struct KernelRegistry {
    kernels: BTreeMap<ElementType, Box<dyn ElementKernel>>,
}

impl KernelRegistry {
    /// A registry without any kernels.
    pub fn empty() -> Self {
        Self {
            kernels: BTreeMap::new(),
        }
    }

    /// A registry with the built-in kernel of every element type.
    pub fn canonical() -> Self {
        Self::empty()
            .with(ElementType::Quad4, Quad4Kernel)
            .with(ElementType::Tri6, Tri6Kernel)
            .with(ElementType::Tri3, Tri3Kernel)
            .with(ElementType::Quad9, Quad9Kernel)
            .with(ElementType::Spring, SpringKernel)
            .with(ElementType::Truss, TrussKernel)
            .with(ElementType::Beam, BeamKernel)
    }

    /// Registers `kernel` for the element type, returning the kernel it replaces.
    pub fn register(
        &mut self,
        element_type: ElementType,
        kernel: impl ElementKernel + 'static,
    ) -> Option<Box<dyn ElementKernel>> {
        self.kernels.insert(element_type, Box::new(kernel))
    }

    pub fn with(mut self, element_type: ElementType, kernel: impl ElementKernel + 'static) -> Self {
        self.register(element_type, kernel);
        self
    }

    pub fn remove(&mut self, element_type: ElementType) -> Option<Box<dyn ElementKernel>> {
        self.kernels.remove(&element_type)
    }

    pub fn get(&self, element_type: ElementType) -> Option<&dyn ElementKernel> {
        self.kernels.get(&element_type).map(|kernel| &**kernel)
    }

    pub fn contains(&self, element_type: ElementType) -> bool {
        self.kernels.contains_key(&element_type)
    }

    pub fn element_types(&self) -> impl Iterator<Item = ElementType> + '_ {
        self.kernels.keys().copied()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Debug for KernelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelRegistry")
            .field("element_types", &self.kernels.keys().collect::<Vec<_>>())
            .finish()
    }
}
