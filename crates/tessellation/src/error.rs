use thiserror::Error;

/// The stroke tessellator's result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    #[error("Invalid vertex")]
    InvalidVertex,
    #[error("Too many vertices")]
    TooManyVertices,
}

/// Configurations or inputs the tessellator refuses to work with.
///
/// These are contract violations on the caller's side. The tessellator
/// reports them before producing any geometry.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum UnsupportedParameter {
    #[error("Line width must be a finite positive number, got {0}")]
    InvalidLineWidth(f32),
    #[error("Line lists need an even number of points, got {0}")]
    OddPointCount(usize),
    #[error("Position is not a number")]
    PositionIsNaN,
}

/// The stroke tessellator's error enumeration.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum TessellationError {
    #[error("Unsupported parameter: {0}")]
    UnsupportedParameter(#[from] UnsupportedParameter),
    #[error("Geometry builder error: {0}")]
    GeometryBuilder(#[from] GeometryBuilderError),
}

#[test]
fn error_messages() {
    let e: TessellationError = UnsupportedParameter::OddPointCount(3).into();
    assert_eq!(
        e.to_string(),
        "Unsupported parameter: Line lists need an even number of points, got 3"
    );

    let e: TessellationError = GeometryBuilderError::TooManyVertices.into();
    assert_eq!(e.to_string(), "Geometry builder error: Too many vertices");
}
