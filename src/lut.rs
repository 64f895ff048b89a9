//! Liberty lookup tables (`cell_rise`, `rise_constraint`, ...).
//!
//! A table has up to two axes. Each axis carries the template variable it is indexed by,
//! which tells whether its breakpoints are times or capacitances. Values are stored
//! row-major: `values[i1 * len(index_2) + i2]`.

use crate::error::{LutError, UnknownKeyword};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Variable of a `lu_table_template` axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LutVar {
    InputNetTransition,
    TotalOutputNetCapacitance,
    EqualOrOppositeOutputNetCapacitance,
    RelatedOutTotalOutputNetCapacitance,
    ConstrainedPinTransition,
    RelatedPinTransition,
}

impl LutVar {
    pub fn as_str(self) -> &'static str {
        match self {
            LutVar::InputNetTransition => "input_net_transition",
            LutVar::TotalOutputNetCapacitance => "total_output_net_capacitance",
            LutVar::EqualOrOppositeOutputNetCapacitance => "equal_or_opposite_output_net_capacitance",
            LutVar::RelatedOutTotalOutputNetCapacitance => "related_out_total_output_net_capacitance",
            LutVar::ConstrainedPinTransition => "constrained_pin_transition",
            LutVar::RelatedPinTransition => "related_pin_transition",
        }
    }

    pub fn is_time(self) -> bool {
        matches!(
            self,
            LutVar::InputNetTransition | LutVar::ConstrainedPinTransition | LutVar::RelatedPinTransition
        )
    }

    pub fn is_capacitance(self) -> bool {
        !self.is_time()
    }
}

impl Display for LutVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LutVar {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "input_net_transition" => LutVar::InputNetTransition,
            "total_output_net_capacitance" => LutVar::TotalOutputNetCapacitance,
            "equal_or_opposite_output_net_capacitance" => LutVar::EqualOrOppositeOutputNetCapacitance,
            "related_out_total_output_net_capacitance" => LutVar::RelatedOutTotalOutputNetCapacitance,
            "constrained_pin_transition" => LutVar::ConstrainedPinTransition,
            "related_pin_transition" => LutVar::RelatedPinTransition,
            _ => return Err(UnknownKeyword::new("lut variable", s)),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Axis {
    var: LutVar,
    index: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingLut {
    axis1: Option<Axis>,
    axis2: Option<Axis>,
    values: Vec<f32>,
}

fn make_axis(axis: usize, var: Option<LutVar>, index: Vec<f32>) -> Result<Option<Axis>, LutError> {
    if index.is_empty() {
        return Ok(None);
    }
    let Some(var) = var else {
        return Err(LutError::MissingVariable { axis, len: index.len() });
    };
    let increasing = |(a, b): (&f32, &f32)| a.partial_cmp(b) == Some(Ordering::Less);
    if let Some(position) = index.iter().tuple_windows().position(|pair| !increasing(pair)) {
        return Err(LutError::NonMonotonicIndex {
            axis,
            position: position + 1,
        });
    }
    Ok(Some(Axis { var, index }))
}

fn axis_len(axis: &Option<Axis>) -> usize {
    axis.as_ref().map_or(1, |a| a.index.len())
}

/// Locate `x` on `index`: the segment `(lo, hi)` used for interpolation and the
/// weight of `hi`. Outside the breakpoints the closest segment is extended.
fn segment(index: &[f32], x: f32) -> (usize, usize, f32) {
    if index.len() < 2 || index[0] == index[index.len() - 1] {
        return (0, 0, 0.0);
    }
    let hi = index.partition_point(|&b| b < x).clamp(1, index.len() - 1);
    let lo = hi - 1;
    let span = index[hi] - index[lo];
    // breakpoints merged by rescaling
    if span == 0.0 {
        return (lo, lo, 0.0);
    }
    (lo, hi, (x - index[lo]) / span)
}

impl TimingLut {
    pub fn new(
        variable1: Option<LutVar>,
        index1: Vec<f32>,
        variable2: Option<LutVar>,
        index2: Vec<f32>,
        values: Vec<f32>,
    ) -> Result<Self, LutError> {
        let axis1 = make_axis(1, variable1, index1)?;
        let axis2 = make_axis(2, variable2, index2)?;
        if axis1.is_none() && axis2.is_some() {
            return Err(LutError::SecondAxisOnly);
        }
        let (rows, cols) = (axis_len(&axis1), axis_len(&axis2));
        if values.len() != rows * cols {
            return Err(LutError::InvalidValueCount {
                rows,
                cols,
                expected: rows * cols,
                actual: values.len(),
            });
        }
        Ok(Self { axis1, axis2, values })
    }

    /// A table without axes, as produced by `cell_rise(scalar)`.
    pub fn scalar(value: f32) -> Self {
        Self {
            axis1: None,
            axis2: None,
            values: vec![value],
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.axis1.is_none()
    }

    pub fn variable1(&self) -> Option<LutVar> {
        self.axis1.as_ref().map(|a| a.var)
    }

    pub fn variable2(&self) -> Option<LutVar> {
        self.axis2.as_ref().map(|a| a.var)
    }

    pub fn index1(&self) -> &[f32] {
        self.axis1.as_ref().map(|a| a.index.as_slice()).unwrap_or_default()
    }

    pub fn index2(&self) -> &[f32] {
        self.axis2.as_ref().map(|a| a.index.as_slice()).unwrap_or_default()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    fn value(&self, i1: usize, i2: usize) -> f32 {
        self.values[i1 * axis_len(&self.axis2) + i2]
    }

    /// Bilinear interpolation at `(x1, x2)`, linear extrapolation outside the grid.
    /// Coordinates of missing axes are ignored.
    pub fn interpolate(&self, x1: f32, x2: f32) -> f32 {
        let (r0, r1, t1) = segment(self.index1(), x1);
        let (c0, c1, t2) = segment(self.index2(), x2);
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let low = lerp(self.value(r0, c0), self.value(r0, c1), t2);
        let high = lerp(self.value(r1, c0), self.value(r1, c1), t2);
        lerp(low, high, t1)
    }

    /// Interpolate with the coordinate of each axis given by its variable.
    pub fn lookup(&self, operand: impl Fn(LutVar) -> f32) -> f32 {
        let x1 = self.variable1().map_or(0.0, &operand);
        let x2 = self.variable2().map_or(0.0, &operand);
        self.interpolate(x1, x2)
    }

    pub fn scale_time(&mut self, factor: f32) {
        self.scale_axes(LutVar::is_time, factor);
        for v in &mut self.values {
            *v *= factor;
        }
    }

    pub fn scale_capacitance(&mut self, factor: f32) {
        self.scale_axes(LutVar::is_capacitance, factor);
    }

    fn scale_axes(&mut self, select: fn(LutVar) -> bool, factor: f32) {
        for axis in [&mut self.axis1, &mut self.axis2].into_iter().flatten() {
            if select(axis.var) {
                for b in &mut axis.index {
                    *b *= factor;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delay_table() -> TimingLut {
        TimingLut::new(
            Some(LutVar::InputNetTransition),
            vec![0.1, 0.5],
            Some(LutVar::TotalOutputNetCapacitance),
            vec![1.0, 2.0, 4.0],
            vec![
                0.10, 0.20, 0.40, //
                0.30, 0.40, 0.60,
            ],
        )
        .unwrap()
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5 * b.abs().max(1.0), "{a} != {b}");
    }

    #[test]
    fn test_interpolate_on_breakpoints() {
        let lut = delay_table();
        assert_close(lut.interpolate(0.1, 1.0), 0.10);
        assert_close(lut.interpolate(0.5, 4.0), 0.60);
        assert_close(lut.interpolate(0.1, 2.0), 0.20);
    }

    #[test]
    fn test_interpolate_between_breakpoints() {
        let lut = delay_table();
        assert_close(lut.interpolate(0.3, 1.0), 0.20);
        assert_close(lut.interpolate(0.1, 3.0), 0.30);
        assert_close(lut.interpolate(0.3, 3.0), 0.40);
    }

    #[test]
    fn test_extrapolate_outside_grid() {
        let lut = delay_table();
        assert_close(lut.interpolate(0.9, 1.0), 0.50);
        assert_close(lut.interpolate(0.1, 0.0), 0.0);
        assert_close(lut.interpolate(0.1, 6.0), 0.60);
    }

    #[test]
    fn test_lookup_routes_by_variable() {
        let lut = delay_table();
        let at = lut.lookup(|var| if var.is_capacitance() { 3.0 } else { 0.3 });
        assert_close(at, 0.40);
    }

    #[test]
    fn test_scalar_and_one_axis_tables() {
        let lut = TimingLut::scalar(0.12);
        assert!(lut.is_scalar());
        assert_close(lut.interpolate(7.0, -3.0), 0.12);

        let lut = TimingLut::new(Some(LutVar::RelatedPinTransition), vec![0.0, 1.0], None, vec![], vec![1.0, 3.0])
            .unwrap();
        assert_close(lut.interpolate(0.5, 100.0), 2.0);
        assert_eq!(lut.variable2(), None);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let err = TimingLut::new(Some(LutVar::InputNetTransition), vec![0.1, 0.2], None, vec![], vec![1.0]);
        assert_eq!(
            err,
            Err(LutError::InvalidValueCount {
                rows: 2,
                cols: 1,
                expected: 2,
                actual: 1
            })
        );

        let err = TimingLut::new(None, vec![0.1], None, vec![], vec![1.0]);
        assert_eq!(err, Err(LutError::MissingVariable { axis: 1, len: 1 }));

        let err = TimingLut::new(Some(LutVar::InputNetTransition), vec![0.1, 0.3, 0.3], None, vec![], vec![0.0; 3]);
        assert_eq!(err, Err(LutError::NonMonotonicIndex { axis: 1, position: 2 }));

        let err = TimingLut::new(None, vec![], Some(LutVar::TotalOutputNetCapacitance), vec![1.0], vec![0.0]);
        assert_eq!(err, Err(LutError::SecondAxisOnly));
    }

    #[test]
    fn test_scale_time_and_capacitance() {
        let mut lut = delay_table();
        lut.scale_time(1000.0);
        assert_eq!(lut.index1(), &[100.0, 500.0]);
        assert_eq!(lut.index2(), &[1.0, 2.0, 4.0]);
        assert_close(lut.values()[5], 600.0);

        lut.scale_capacitance(0.5);
        assert_eq!(lut.index1(), &[100.0, 500.0]);
        assert_eq!(lut.index2(), &[0.5, 1.0, 2.0]);
        assert_close(lut.interpolate(300.0, 1.5), 400.0);
    }

    #[test]
    fn test_zero_scale_collapses_axes() {
        let mut lut = delay_table();
        lut.scale_capacitance(0.0);
        assert_eq!(lut.index2(), &[0.0, 0.0, 0.0]);
        assert_close(lut.interpolate(0.1, 5.0), 0.10);
        assert_close(lut.interpolate(0.3, 0.0), 0.20);

        lut.scale_time(0.0);
        for (x1, x2) in [(0.0, 0.0), (0.5, 5.0), (-1.0, 3.0)] {
            assert_eq!(lut.interpolate(x1, x2), 0.0);
        }
    }

    #[test]
    fn test_constraint_axes_are_both_time() {
        let mut lut = TimingLut::new(
            Some(LutVar::RelatedPinTransition),
            vec![0.1, 0.2],
            Some(LutVar::ConstrainedPinTransition),
            vec![0.1, 0.2],
            vec![0.01, 0.02, 0.03, 0.04],
        )
        .unwrap();
        lut.scale_time(10.0);
        assert_eq!(lut.index1(), &[1.0, 2.0]);
        assert_eq!(lut.index2(), &[1.0, 2.0]);
        lut.scale_capacitance(3.0);
        assert_eq!(lut.index2(), &[1.0, 2.0]);
    }
}
