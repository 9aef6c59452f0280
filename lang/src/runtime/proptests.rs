//! Property-based tests for term list arithmetic.
