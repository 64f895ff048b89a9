//! Loads timing arcs from a JSON description of already-parsed Liberty `timing` groups.
//!
//! ```json
//! { "arcs": [ {
//!     "related_pin": "CK",
//!     "timing_type": "rising_edge",
//!     "cell_rise": { "variable_1": "input_net_transition", "index_1": [0.01, 0.1],
//!                    "variable_2": "total_output_net_capacitance", "index_2": [0.001, 0.01],
//!                    "values": [0.1, 0.2, 0.15, 0.25] }
//! } ] }
//! ```
//!
//! Axis variables may be omitted, in which case the usual template of the table's role is
//! assumed (`input_net_transition` x `total_output_net_capacitance` for delay and slew
//! tables, `related_pin_transition` x `constrained_pin_transition` for constraints).

use crate::error::LoadError;
use crate::lut::{LutVar, TimingLut};
use crate::timing::{TableKind, Timing};
use crate::types::{TimingSense, TimingType};
use miniserde::Deserialize;

#[derive(Deserialize)]
struct ArcFile {
    arcs: Vec<ArcDesc>,
}

#[derive(Deserialize)]
struct ArcDesc {
    related_pin: String,
    timing_sense: Option<String>,
    timing_type: Option<String>,
    cell_rise: Option<LutDesc>,
    cell_fall: Option<LutDesc>,
    rise_transition: Option<LutDesc>,
    fall_transition: Option<LutDesc>,
    rise_constraint: Option<LutDesc>,
    fall_constraint: Option<LutDesc>,
}

#[derive(Deserialize)]
struct LutDesc {
    variable_1: Option<String>,
    index_1: Option<Vec<f32>>,
    variable_2: Option<String>,
    index_2: Option<Vec<f32>>,
    values: Vec<f32>,
}

impl ArcDesc {
    fn take_table(&mut self, kind: TableKind) -> Option<LutDesc> {
        match kind {
            TableKind::CellRise => self.cell_rise.take(),
            TableKind::CellFall => self.cell_fall.take(),
            TableKind::RiseTransition => self.rise_transition.take(),
            TableKind::FallTransition => self.fall_transition.take(),
            TableKind::RiseConstraint => self.rise_constraint.take(),
            TableKind::FallConstraint => self.fall_constraint.take(),
        }
    }
}

fn template_defaults(kind: TableKind) -> [LutVar; 2] {
    if kind.is_constraint() {
        [LutVar::RelatedPinTransition, LutVar::ConstrainedPinTransition]
    } else {
        [LutVar::InputNetTransition, LutVar::TotalOutputNetCapacitance]
    }
}

fn build_lut(arc: usize, kind: TableKind, desc: LutDesc) -> Result<TimingLut, LoadError> {
    let defaults = template_defaults(kind);
    let index1 = desc.index_1.unwrap_or_default();
    let index2 = desc.index_2.unwrap_or_default();

    let mut variables = [None, None];
    for (axis, (name, index)) in [(desc.variable_1, &index1), (desc.variable_2, &index2)]
        .into_iter()
        .enumerate()
    {
        variables[axis] = match name {
            Some(name) => Some(name.parse::<LutVar>()?),
            None if !index.is_empty() => {
                log::debug!(
                    "arc {}: {} variable_{} defaults to {}",
                    arc,
                    kind.as_str(),
                    axis + 1,
                    defaults[axis]
                );
                Some(defaults[axis])
            }
            None => None,
        };
    }

    TimingLut::new(variables[0], index1, variables[1], index2, desc.values).map_err(|source| LoadError::Table {
        arc,
        table: kind.as_str(),
        source,
    })
}

fn build_timing(arc: usize, mut desc: ArcDesc) -> Result<Timing, LoadError> {
    if desc.related_pin.is_empty() {
        return Err(LoadError::EmptyRelatedPin { arc });
    }
    let sense = desc.timing_sense.as_deref().map(str::parse::<TimingSense>).transpose()?;
    let timing_type = desc.timing_type.as_deref().map(str::parse::<TimingType>).transpose()?;

    let mut timing = Timing {
        sense,
        timing_type,
        ..Timing::new(desc.related_pin.as_str())
    };

    let is_constraint = timing.is_constraint();
    for kind in TableKind::ALL {
        let Some(lut) = desc.take_table(kind) else {
            continue;
        };
        if kind.is_constraint() != is_constraint {
            return Err(LoadError::MixedTables {
                arc,
                timing_type: timing.resolved_type().as_str(),
                table: kind.as_str(),
            });
        }
        *timing.table_mut(kind) = Some(build_lut(arc, kind, lut)?);
    }

    Ok(timing)
}

/// Parse an arc file. Arcs are returned in file order.
pub fn load_arcs(json: &str) -> Result<Vec<Timing>, LoadError> {
    let file: ArcFile = miniserde::json::from_str(json)?;
    file.arcs
        .into_iter()
        .enumerate()
        .map(|(arc, desc)| build_timing(arc, desc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LutError, UnknownKeyword};
    use crate::types::Transition::*;

    #[test]
    fn test_load_defaults() {
        let arcs = load_arcs(
            r#"{"arcs": [{"related_pin": "A",
                "cell_rise": {"index_1": [0.0, 1.0], "index_2": [0.0, 2.0], "values": [1.0, 2.0, 3.0, 4.0]}}]}"#,
        )
        .unwrap();
        assert_eq!(arcs.len(), 1);
        let arc = &arcs[0];
        assert_eq!(arc.related_pin.as_str(), "A");
        assert_eq!(arc.sense, None);
        assert_eq!(arc.timing_type, None);
        let lut = arc.cell_rise.as_ref().unwrap();
        assert_eq!(lut.variable1(), Some(LutVar::InputNetTransition));
        assert_eq!(lut.variable2(), Some(LutVar::TotalOutputNetCapacitance));
        assert_eq!(arc.delay(Fall, Rise, 1.0, 1.0), Some(3.5));
    }

    #[test]
    fn test_constraint_template_defaults() {
        let arcs = load_arcs(
            r#"{"arcs": [{"related_pin": "CK", "timing_type": "hold_falling",
                "fall_constraint": {"index_1": [0.0, 1.0], "values": [0.0, 0.5]}}]}"#,
        )
        .unwrap();
        let lut = arcs[0].fall_constraint.as_ref().unwrap();
        assert_eq!(lut.variable1(), Some(LutVar::RelatedPinTransition));
        assert_eq!(lut.variable2(), None);
        assert_eq!(arcs[0].constraint(Fall, Fall, 0.5, 0.0), Some(0.25));
    }

    #[test]
    fn test_reject_unknown_keywords() {
        let err = load_arcs(r#"{"arcs": [{"related_pin": "A", "timing_type": "rising"}]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Keyword(UnknownKeyword { kind: "timing_type", .. })));

        let err = load_arcs(r#"{"arcs": [{"related_pin": "A", "timing_sense": "unate"}]}"#).unwrap_err();
        assert_eq!(err.to_string(), "unknown timing_sense keyword `unate`");

        let err = load_arcs(
            r#"{"arcs": [{"related_pin": "A",
                "cell_fall": {"variable_1": "input_transition", "index_1": [0.0], "values": [1.0]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Keyword(UnknownKeyword { kind: "lut variable", .. })));
    }

    #[test]
    fn test_reject_mixed_tables() {
        let err = load_arcs(
            r#"{"arcs": [{"related_pin": "CK", "timing_type": "setup_rising",
                "rise_constraint": {"values": [0.05]}, "cell_rise": {"values": [0.1]}}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "arc 0: setup_rising arc must not carry a cell_rise table");

        let err = load_arcs(
            r#"{"arcs": [{"related_pin": "A"}, {"related_pin": "B", "rise_constraint": {"values": [0.05]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::MixedTables { arc: 1, table: "rise_constraint", .. }));
    }

    #[test]
    fn test_reject_bad_arcs() {
        let err = load_arcs(r#"{"arcs": [{"related_pin": ""}]}"#).unwrap_err();
        assert!(matches!(err, LoadError::EmptyRelatedPin { arc: 0 }));

        let err = load_arcs(
            r#"{"arcs": [{"related_pin": "A", "cell_rise": {"index_1": [0.0, 1.0], "values": [1.0]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Table {
                arc: 0,
                table: "cell_rise",
                source: LutError::InvalidValueCount { expected: 2, actual: 1, .. }
            }
        ));

        assert!(matches!(load_arcs("{\"arcs\": 3}"), Err(LoadError::Json(_))));
    }
}
