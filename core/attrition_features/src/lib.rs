//! Turning a submitted employee record into a model-ready feature row
//!
//! [`encode`] scales the percentage fields, maps booleans to 0/1, one-hot
//! encodes department and salary, then projects the result onto the
//! classifier's [`FeatureSchema`](attrition_model::FeatureSchema) order.
//! [`check_domain`] verifies at start-up that every selectable category has a
//! schema column, so a drifted schema cannot silently zero out a group.

pub mod domain;
pub mod encoder;
pub mod input;

pub use domain::{check_domain, DomainError, DomainPolicy, DomainReport};
pub use encoder::{encode, encode_raw, reindex, EncodedRecord};
pub use input::{Department, InputError, RawInputRecord, SalaryLevel};
