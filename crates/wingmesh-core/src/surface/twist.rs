//! Spanwise twist laws

use std::fmt;
use std::sync::Arc;

/// Section angle in radians as a function of the normalized span position
///
/// Span position 0 is the surface root and 1 is the tip.
#[derive(Clone)]
pub struct TwistFunction(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl TwistFunction {
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Linear from 0 at the root to `tip_twist` at the tip
    pub fn linear(tip_twist: f64) -> Self {
        Self::new(move |position| position * tip_twist)
    }

    /// Linear law shifted by a constant incidence
    pub fn linear_with_incidence(incidence: f64, tip_twist: f64) -> Self {
        Self::new(move |position| incidence + position * tip_twist)
    }

    /// Add a constant incidence on top of this law
    pub fn offset(&self, incidence: f64) -> Self {
        let inner = Arc::clone(&self.0);
        Self::new(move |position| incidence + inner(position))
    }

    pub fn angle(&self, span_position: f64) -> f64 {
        (self.0)(span_position)
    }
}

impl fmt::Debug for TwistFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwistFunction")
            .field("root", &self.angle(0.0))
            .field("tip", &self.angle(1.0))
            .finish()
    }
}
