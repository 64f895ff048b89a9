//! Category descriptor of every [`TimingType`].
//!
//! All classification predicates of a timing arc are derived from [`TimingType::class`],
//! so the partition into combinational / tristate / edge / constraint arcs lives in one
//! exhaustive `match` instead of being repeated by every predicate.

use crate::corner::Split;
use crate::types::{TimingType, Transition};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ArcCategory {
    /// Propagation arcs through combinational logic (and clock tree path bounds)
    Combinational,
    /// Three-state enable/disable arcs
    Tristate,
    /// Launch arcs of sequential cells: clock edges, preset and clear
    Edge,
    /// Timing checks, characterized by `*_constraint` tables
    Constraint,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Hold,
    Setup,
    Recovery,
    Removal,
    Skew,
    NonSeqHold,
    NonSeqSetup,
    PulseWidth,
    Period,
    NoChange,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ArcClass {
    pub category: ArcCategory,
    /// `Some` iff `category == Constraint`
    pub check: Option<ConstraintKind>,
}

impl ArcClass {
    const fn arc(category: ArcCategory) -> Self {
        Self { category, check: None }
    }

    const fn timing_check(kind: ConstraintKind) -> Self {
        Self {
            category: ArcCategory::Constraint,
            check: Some(kind),
        }
    }

    pub fn is_constraint(&self) -> bool {
        self.category == ArcCategory::Constraint
    }

    pub fn is_hold(&self) -> bool {
        matches!(self.check, Some(ConstraintKind::Hold | ConstraintKind::NonSeqHold))
    }

    pub fn is_setup(&self) -> bool {
        matches!(self.check, Some(ConstraintKind::Setup | ConstraintKind::NonSeqSetup))
    }

    /// The split a timing check is verified against: hold-like checks bound the
    /// earliest arrival, setup-like checks the latest.
    pub fn check_split(&self) -> Option<Split> {
        use ConstraintKind::*;
        match self.check? {
            Hold | NonSeqHold | Removal => Some(Split::Min),
            Setup | NonSeqSetup | Recovery => Some(Split::Max),
            Skew | PulseWidth | Period | NoChange => None,
        }
    }
}

impl TimingType {
    pub fn class(self) -> ArcClass {
        use ConstraintKind::*;
        use TimingType::*;
        match self {
            Combinational | CombinationalRise | CombinationalFall => ArcClass::arc(ArcCategory::Combinational),
            MaxClockTreePath | MinClockTreePath => ArcClass::arc(ArcCategory::Combinational),
            ThreeStateDisable | ThreeStateDisableRise | ThreeStateDisableFall => ArcClass::arc(ArcCategory::Tristate),
            ThreeStateEnable | ThreeStateEnableRise | ThreeStateEnableFall => ArcClass::arc(ArcCategory::Tristate),
            RisingEdge | FallingEdge | Preset | Clear => ArcClass::arc(ArcCategory::Edge),
            HoldRising | HoldFalling => ArcClass::timing_check(Hold),
            SetupRising | SetupFalling => ArcClass::timing_check(Setup),
            RecoveryRising | RecoveryFalling => ArcClass::timing_check(Recovery),
            RemovalRising | RemovalFalling => ArcClass::timing_check(Removal),
            SkewRising | SkewFalling => ArcClass::timing_check(Skew),
            NonSeqHoldRising | NonSeqHoldFalling => ArcClass::timing_check(NonSeqHold),
            NonSeqSetupRising | NonSeqSetupFalling => ArcClass::timing_check(NonSeqSetup),
            MinPulseWidth => ArcClass::timing_check(PulseWidth),
            MinimumPeriod => ArcClass::timing_check(Period),
            NochangeHighHigh | NochangeHighLow | NochangeLowHigh | NochangeLowLow => ArcClass::timing_check(NoChange),
        }
    }

    /// Edge of the related pin that triggers the arc, for edge-qualified types.
    pub fn related_edge(self) -> Option<Transition> {
        use TimingType::*;
        match self {
            RisingEdge | HoldRising | SetupRising | RecoveryRising | SkewRising | RemovalRising
            | NonSeqSetupRising | NonSeqHoldRising => Some(Transition::Rise),
            FallingEdge | HoldFalling | SetupFalling | RecoveryFalling | SkewFalling | RemovalFalling
            | NonSeqSetupFalling | NonSeqHoldFalling => Some(Transition::Fall),
            _ => None,
        }
    }
}
