use crate::classify::ArcClass;
use crate::lut::{LutVar, TimingLut};
use crate::types::{TimingSense, TimingType, Transition};
use compact_str::CompactString;
use std::fmt::{Display, Formatter};

/// The six lookup tables a Liberty `timing` group can characterize.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    /// Delay, output rising
    CellRise,
    /// Delay, output falling
    CellFall,
    /// Output slew, rising
    RiseTransition,
    /// Output slew, falling
    FallTransition,
    RiseConstraint,
    FallConstraint,
}

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        TableKind::CellRise,
        TableKind::CellFall,
        TableKind::RiseTransition,
        TableKind::FallTransition,
        TableKind::RiseConstraint,
        TableKind::FallConstraint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::CellRise => "cell_rise",
            TableKind::CellFall => "cell_fall",
            TableKind::RiseTransition => "rise_transition",
            TableKind::FallTransition => "fall_transition",
            TableKind::RiseConstraint => "rise_constraint",
            TableKind::FallConstraint => "fall_constraint",
        }
    }

    pub fn delay(out: Transition) -> Self {
        match out {
            Transition::Rise => TableKind::CellRise,
            Transition::Fall => TableKind::CellFall,
        }
    }

    pub fn slew(out: Transition) -> Self {
        match out {
            Transition::Rise => TableKind::RiseTransition,
            Transition::Fall => TableKind::FallTransition,
        }
    }

    pub fn constraint(out: Transition) -> Self {
        match out {
            Transition::Rise => TableKind::RiseConstraint,
            Transition::Fall => TableKind::FallConstraint,
        }
    }

    pub fn is_constraint(self) -> bool {
        matches!(self, TableKind::RiseConstraint | TableKind::FallConstraint)
    }
}

/// Which of the six tables are populated, one bit per [`TableKind`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TablePresence(u8);

impl TablePresence {
    pub fn insert(&mut self, kind: TableKind) {
        self.0 |= 1 << kind as u8;
    }

    pub fn contains(self, kind: TableKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TableKind> {
        TableKind::ALL.into_iter().filter(move |&kind| self.contains(kind))
    }
}

/// Structure of an arc, without its characterization numbers.
/// Two splits of the same library must agree on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimingShape {
    pub related_pin: CompactString,
    pub sense: TimingSense,
    pub timing_type: TimingType,
    pub tables: TablePresence,
}

/// One timing arc (a Liberty `timing` group) towards the pin that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub related_pin: CompactString,
    /// `None` is read as [`TimingSense::NonUnate`]
    pub sense: Option<TimingSense>,
    /// `None` is read as [`TimingType::Combinational`]
    pub timing_type: Option<TimingType>,
    pub cell_rise: Option<TimingLut>,
    pub cell_fall: Option<TimingLut>,
    pub rise_transition: Option<TimingLut>,
    pub fall_transition: Option<TimingLut>,
    pub rise_constraint: Option<TimingLut>,
    pub fall_constraint: Option<TimingLut>,
}

impl Timing {
    pub fn new(related_pin: impl Into<CompactString>) -> Self {
        Self {
            related_pin: related_pin.into(),
            sense: None,
            timing_type: None,
            cell_rise: None,
            cell_fall: None,
            rise_transition: None,
            fall_transition: None,
            rise_constraint: None,
            fall_constraint: None,
        }
    }

    pub fn resolved_sense(&self) -> TimingSense {
        self.sense.unwrap_or(TimingSense::NonUnate)
    }

    pub fn resolved_type(&self) -> TimingType {
        self.timing_type.unwrap_or(TimingType::Combinational)
    }

    pub fn class(&self) -> ArcClass {
        self.resolved_type().class()
    }

    pub fn table(&self, kind: TableKind) -> Option<&TimingLut> {
        match kind {
            TableKind::CellRise => self.cell_rise.as_ref(),
            TableKind::CellFall => self.cell_fall.as_ref(),
            TableKind::RiseTransition => self.rise_transition.as_ref(),
            TableKind::FallTransition => self.fall_transition.as_ref(),
            TableKind::RiseConstraint => self.rise_constraint.as_ref(),
            TableKind::FallConstraint => self.fall_constraint.as_ref(),
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut Option<TimingLut> {
        match kind {
            TableKind::CellRise => &mut self.cell_rise,
            TableKind::CellFall => &mut self.cell_fall,
            TableKind::RiseTransition => &mut self.rise_transition,
            TableKind::FallTransition => &mut self.fall_transition,
            TableKind::RiseConstraint => &mut self.rise_constraint,
            TableKind::FallConstraint => &mut self.fall_constraint,
        }
    }

    /// Populated tables, in [`TableKind::ALL`] order.
    pub fn tables(&self) -> impl Iterator<Item = (TableKind, &TimingLut)> {
        TableKind::ALL
            .into_iter()
            .filter_map(move |kind| self.table(kind).map(|lut| (kind, lut)))
    }

    fn tables_mut(&mut self) -> impl Iterator<Item = &mut TimingLut> {
        [
            &mut self.cell_rise,
            &mut self.cell_fall,
            &mut self.rise_transition,
            &mut self.fall_transition,
            &mut self.rise_constraint,
            &mut self.fall_constraint,
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_constraint(&self) -> bool {
        self.class().is_constraint()
    }

    pub fn is_hold_constraint(&self) -> bool {
        self.class().is_hold()
    }

    pub fn is_setup_constraint(&self) -> bool {
        self.class().is_setup()
    }

    pub fn is_rising_edge_triggered(&self) -> bool {
        self.resolved_type() == TimingType::RisingEdge
    }

    pub fn is_falling_edge_triggered(&self) -> bool {
        self.resolved_type() == TimingType::FallingEdge
    }

    /// The table that decides whether `out` is characterized:
    /// constraint tables for timing checks, delay tables otherwise.
    fn role_table(&self, out: Transition) -> TableKind {
        if self.is_constraint() {
            TableKind::constraint(out)
        } else {
            TableKind::delay(out)
        }
    }

    pub fn is_output_transition_defined(&self, out: Transition) -> bool {
        self.table(self.role_table(out)).is_some()
    }

    pub fn is_transition_defined(&self, input: Transition, out: Transition) -> bool {
        self.resolved_sense().admits(input, out) && self.is_output_transition_defined(out)
    }

    pub fn is_input_transition_defined(&self) -> bool {
        Transition::ALL.into_iter().any(|out| self.is_output_transition_defined(out))
    }

    pub fn is_input_transition_defined_for(&self, input: Transition) -> bool {
        Transition::ALL
            .into_iter()
            .any(|out| self.is_transition_defined(input, out))
    }

    /// Propagation delay from an `input` edge of the related pin to an `out` edge.
    pub fn delay(&self, input: Transition, out: Transition, input_slew: f32, load: f32) -> Option<f32> {
        if self.is_constraint() || !self.is_transition_defined(input, out) {
            return None;
        }
        let lut = self.table(TableKind::delay(out))?;
        Some(lut.lookup(|var| if var.is_capacitance() { load } else { input_slew }))
    }

    /// Output slew of an `out` edge caused by an `input` edge of the related pin.
    /// Only the sense and the slew table itself are checked, so an arc without delay
    /// tables can still report a slew.
    pub fn slew(&self, input: Transition, out: Transition, input_slew: f32, load: f32) -> Option<f32> {
        if self.is_constraint() || !self.resolved_sense().admits(input, out) {
            return None;
        }
        let lut = self.table(TableKind::slew(out))?;
        Some(lut.lookup(|var| if var.is_capacitance() { load } else { input_slew }))
    }

    /// Timing check value between an `input` edge of the related pin and an `out`
    /// edge of the constrained pin.
    pub fn constraint(
        &self,
        input: Transition,
        out: Transition,
        related_slew: f32,
        constrained_slew: f32,
    ) -> Option<f32> {
        if !self.is_constraint() || !self.is_transition_defined(input, out) {
            return None;
        }
        let lut = self.table(TableKind::constraint(out))?;
        Some(lut.lookup(|var| match var {
            LutVar::ConstrainedPinTransition => constrained_slew,
            _ => related_slew,
        }))
    }

    pub fn scale_time(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("scaling times of arc from {} by {}", self.related_pin, factor);
        }
        for lut in self.tables_mut() {
            lut.scale_time(factor);
        }
    }

    pub fn scale_capacitance(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("scaling capacitances of arc from {} by {}", self.related_pin, factor);
        }
        for lut in self.tables_mut() {
            lut.scale_capacitance(factor);
        }
    }

    pub fn shape(&self) -> TimingShape {
        let mut tables = TablePresence::default();
        for (kind, _) in self.tables() {
            tables.insert(kind);
        }
        TimingShape {
            related_pin: self.related_pin.clone(),
            sense: self.resolved_sense(),
            timing_type: self.resolved_type(),
            tables,
        }
    }

    /// Same arc structure: related pin, sense, type and populated tables.
    /// Table contents are not compared.
    pub fn isomorphic(&self, other: &Timing) -> bool {
        self.shape() == other.shape()
    }
}

impl Display for Timing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let default = |set: bool| if set { "" } else { " (default)" };
        writeln!(f, "timing ({}) {{", self.related_pin)?;
        writeln!(
            f,
            "  {:<15} : {}{}",
            "timing_sense",
            self.resolved_sense(),
            default(self.sense.is_some())
        )?;
        writeln!(
            f,
            "  {:<15} : {}{}",
            "timing_type",
            self.resolved_type(),
            default(self.timing_type.is_some())
        )?;
        for (kind, lut) in self.tables() {
            if lut.is_scalar() {
                writeln!(f, "  {:<15} : scalar", kind.as_str())?;
            } else {
                writeln!(
                    f,
                    "  {:<15} : {}x{}",
                    kind.as_str(),
                    lut.index1().len(),
                    lut.index2().len().max(1)
                )?;
            }
        }
        write!(f, "}}")
    }
}
