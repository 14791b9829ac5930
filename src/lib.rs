//! # Sales Owl
//!
//! Umbrella crate for the sales forecasting workspace.
//!
//! - [`sales_forecast`]: aggregation, features, model, recursive forecasting
//!   and the table store
//! - [`series_math`]: lag, trailing-mean and growth helpers on plain slices
//!
//! ## Example
//!
//! ```
//! use sales_owl_workspace::series_math::growth::percent_change;
//!
//! assert_eq!(percent_change(200.0, 250.0), 25.0);
//! assert!(percent_change(0.0, 250.0).is_nan());
//! ```

pub use sales_forecast;
pub use series_math;
