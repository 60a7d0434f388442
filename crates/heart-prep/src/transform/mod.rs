//! Column transformers producing the model-ready feature matrix.
//!
//! Each transformer follows the fit/transform convention: `fit` learns the
//! parameters (per-column mean/std, category vocabulary) and `transform`
//! applies them, returning a block of output columns. The pipeline combines
//! both in a single `fit_transform` pass over the same table.

mod encoder;
mod scaler;

pub use encoder::OneHotEncoder;
pub use scaler::StandardScaler;
