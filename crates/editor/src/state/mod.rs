//! Per-mode interaction state: boundary capture while drawing and the
//! vertex-edit session. Each owns the helper nodes it creates and disposes
//! them on close or cancellation.

pub mod boundary;
pub mod vertex_edit;
