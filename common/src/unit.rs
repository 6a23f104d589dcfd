//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a value computation.
#[derive(Clone, Copy, Debug)]
pub struct Computation;

/// Marker type describing a document issue.
#[derive(Clone, Copy, Debug)]
pub struct Issue;

/// Marker type describing a payment due.
#[derive(Clone, Copy, Debug)]
pub struct Due;
