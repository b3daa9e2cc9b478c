//! State Management
//!
//! Reactive state shared by the form components.

pub mod form;

pub use form::FormState;
