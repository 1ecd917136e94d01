/// Base-fit policies and the fit rectangle.
pub mod fit;
