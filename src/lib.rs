//! Even-odd consistency scoring for survey response data.
//!
//! Each respondent's items are split, factor by factor, into odd- and
//! even-positioned halves. The correlation between the half means across
//! factors, stepped up with the Spearman-Brown formula, is the respondent's
//! consistency index. Low or negative values point at careless responding.
//!
//! ```
//! use evenodd::scoring::{score_records, FactorLengths, ResponseMatrix};
//!
//! let matrix = ResponseMatrix::from_f64_rows(vec![
//!     vec![1.0, 2.0, 5.0, 4.0, 3.0, 4.0],
//! ])
//! .unwrap();
//! let records = score_records(&matrix, &FactorLengths::new(vec![2, 2, 2])).unwrap();
//! assert_eq!(records[0].valid_pairs, 3);
//! assert!(records[0].score.unwrap() > 0.9);
//! ```

pub mod config;
pub mod input;
pub mod logging;
pub mod output;
pub mod scoring;
