use std::fmt;

/// Errors that prevent generation from even attempting a pass.
///
/// Everything `spec.md` classifies as an in-band outcome (no usable rows,
/// an implausible block count, a GA chromosome whose distance is infinite)
/// is reported through [`crate::FieldCenterResult`] instead — this enum is
/// reserved for caller-constructed geometry that cannot be planned at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A polygon was built from fewer than 3 distinct vertices.
    DegeneratePolygon { found_vertices: usize },
    /// A width or distance-from-boundary parameter was non-finite or <= 0.
    InvalidWidth { value: f64 },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegeneratePolygon { found_vertices } => write!(
                f,
                "polygon must have at least 3 distinct vertices, found {found_vertices}"
            ),
            Error::InvalidWidth { value } => {
                write!(f, "width/distance must be finite and positive, got {value}")
            }
        }
    }
}
