// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike gating
//!
//! Filtered activities are rounded to the nearest integer (ties to even) and
//! any non-zero result counts as a spike. Only cells whose gate is open are
//! pulsed during a timestep; every other device is left untouched.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Whether a filtered activity value counts as a spike
#[inline]
pub fn spiked(activity: f64) -> bool {
    let rounded = activity.round_ties_even();
    rounded != 0.0 && !rounded.is_nan()
}

pub fn spike_vector(activities: ArrayView1<'_, f64>) -> Array1<bool> {
    activities.mapv(spiked)
}

/// Per-timestep eligibility mask over an `output x input` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpikeGate {
    mask: Array2<bool>,
}

impl SpikeGate {
    /// Open where both the presynaptic and the postsynaptic neuron spiked
    pub fn coincident(pre: ArrayView1<'_, f64>, post: ArrayView1<'_, f64>) -> Self {
        let spiked_pre = spike_vector(pre);
        let spiked_post = spike_vector(post);
        let mask = Array2::from_shape_fn((post.len(), pre.len()), |(j, i)| {
            spiked_post[j] && spiked_pre[i]
        });
        Self { mask }
    }

    /// Open for every row of each column whose presynaptic neuron spiked
    pub fn presynaptic(pre: ArrayView1<'_, f64>, output_size: usize) -> Self {
        let spiked_pre = spike_vector(pre);
        let mask = Array2::from_shape_fn((output_size, pre.len()), |(_, i)| spiked_pre[i]);
        Self { mask }
    }

    /// Open cells in row-major order
    pub fn eligible(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .indexed_iter()
            .filter_map(|(idx, &open)| open.then_some(idx))
    }

    #[inline]
    pub fn is_open(&self, j: usize, i: usize) -> bool {
        self.mask.get([j, i]).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&open| open).count()
    }

    pub fn any(&self) -> bool {
        self.mask.iter().any(|&open| open)
    }

    pub fn mask(&self) -> ArrayView2<'_, bool> {
        self.mask.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_rounding_threshold() {
        assert!(!spiked(0.0));
        assert!(!spiked(0.49));
        assert!(!spiked(0.5)); // ties to even
        assert!(spiked(0.51));
        assert!(spiked(1.5));
        assert!(!spiked(-0.4));
        assert!(spiked(-0.6));
        assert!(spiked(148.4));
        assert!(!spiked(f64::NAN));
    }

    #[test]
    fn test_coincident_gate_single_cell() {
        let pre = arr1(&[0.0, 0.0, 0.0, 1.0]);
        let post = arr1(&[0.0, 1.0, 0.0, 0.0]);
        let gate = SpikeGate::coincident(pre.view(), post.view());

        assert_eq!(gate.eligible().collect::<Vec<_>>(), vec![(1, 3)]);
        assert_eq!(gate.count(), 1);
        assert!(gate.is_open(1, 3));
        assert!(!gate.is_open(3, 1));
    }

    #[test]
    fn test_coincident_gate_shape() {
        let pre = arr1(&[1.0, 0.0, 0.0]);
        let post = arr1(&[1.0, 1.0]);
        let gate = SpikeGate::coincident(pre.view(), post.view());
        assert_eq!(gate.mask().dim(), (2, 3));
        assert_eq!(gate.eligible().collect::<Vec<_>>(), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_presynaptic_gate_broadcasts_columns() {
        let pre = arr1(&[0.0, 0.0, 0.0, 148.41070704]);
        let gate = SpikeGate::presynaptic(pre.view(), 4);
        assert_eq!(
            gate.eligible().collect::<Vec<_>>(),
            vec![(0, 3), (1, 3), (2, 3), (3, 3)]
        );
    }

    #[test]
    fn test_closed_gate() {
        let pre = arr1(&[0.2, 0.1]);
        let post = arr1(&[5.0]);
        let gate = SpikeGate::coincident(pre.view(), post.view());
        assert!(!gate.any());
        assert_eq!(gate.eligible().count(), 0);
    }
}
