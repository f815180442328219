//! Type aliases for commonly used complex types.
//!
//! Compilation is single-threaded, so shared mutable state (for example a
//! motion history that both the compiler and its caller look at) uses
//! `Rc<RefCell<T>>` rather than a lock.
//!
//! ## Usage
//!
//! ```rust
//! use dragcut_core::types::*;
//!
//! let history: Shared<Vec<u32>> = shared(Vec::new());
//! history.borrow_mut().push(1);
//! assert_eq!(history.borrow().len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value in a [`Shared`] container.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
