//! Conserved-quantity diagnostics
//!
//! Nothing here feeds back into the dynamics. The driver samples a
//! [`ConservedQuantities`] every few steps and keeps the scalars in
//! bounded [`History`] buffers for display and tests.

use std::collections::VecDeque;

use crate::simulation::states::{Body, NVec2};

/// Samples kept per history before the oldest is evicted
pub const HISTORY_CAPACITY: usize = 1000;

/// Fixed-capacity FIFO: pushing past capacity drops the oldest entry
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

/// Energy and momentum totals of a body set at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservedQuantities {
    pub kinetic: f64,
    pub potential: f64,
    pub momentum: NVec2,
    pub angular_momentum: f64, // z component of Σ r × m v
}

impl ConservedQuantities {
    /// Measure the totals for `bodies`
    ///
    /// Potential energy uses the unsoftened separation and skips any pair
    /// closer than `softening`, so tight encounters are slightly undercounted.
    pub fn measure(bodies: &[Body], g: f64, softening: f64) -> Self {
        let kinetic = bodies.iter().map(Body::kinetic_energy).sum();

        let mut potential = 0.0;
        for (i, bi) in bodies.iter().enumerate() {
            for bj in &bodies[i + 1..] {
                let r = (bj.x - bi.x).norm();
                if r > softening {
                    potential -= g * bi.m * bj.m / r;
                }
            }
        }

        let momentum = bodies.iter().fold(NVec2::zeros(), |p, b| p + b.momentum());
        let angular_momentum = bodies
            .iter()
            .map(|b| b.x.x * b.m * b.v.y - b.x.y * b.m * b.v.x)
            .sum();

        Self {
            kinetic,
            potential,
            momentum,
            angular_momentum,
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Relative drift between the first and last energy samples, in percent
/// Zero when there is nothing to compare or the initial energy is exactly zero
pub fn energy_drift_percent(energy: &History<f64>) -> f64 {
    match (energy.first(), energy.last()) {
        (Some(&e0), Some(&e1)) if energy.len() > 1 && e0 != 0.0 => ((e1 - e0) / e0).abs() * 100.0,
        _ => 0.0,
    }
}

/// Coarse grade of energy conservation for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConservationStatus {
    Excellent,
    Good,
    Poor,
}

impl ConservationStatus {
    pub fn classify(drift_percent: f64) -> Self {
        if drift_percent < 0.01 {
            Self::Excellent
        } else if drift_percent < 0.1 {
            Self::Good
        } else {
            Self::Poor
        }
    }
}
