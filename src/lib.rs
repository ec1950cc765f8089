#![deny(rust_2018_idioms)]

// This module contains the definition of the pipeline `Error`.
pub mod error;

// This module contains the label-derivation strategies.
pub mod fmt;

// This module contains the scatter-plot renderer.
pub mod plot;

// This module contains result-file discovery and parsing.
pub mod results;

// This module contains the csv export of the plotted points.
pub mod table;

// Re-export the types every caller ends up needing.
pub use error::Error;
pub use results::{collect, Point, ResultRecord};
