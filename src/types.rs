use crate::error::UnknownKeyword;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Transition {
    /// 0 -> 1
    Rise,
    /// 1 -> 0
    Fall,
}

impl Transition {
    pub const ALL: [Transition; 2] = [Transition::Rise, Transition::Fall];
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Rise => write!(f, "↗"),
            Transition::Fall => write!(f, "↘"),
        }
    }
}

/// Unateness of an arc: whether the output edge follows from the input edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimingSense {
    NonUnate,
    PositiveUnate,
    NegativeUnate,
}

impl TimingSense {
    pub const ALL: [TimingSense; 3] = [
        TimingSense::NonUnate,
        TimingSense::PositiveUnate,
        TimingSense::NegativeUnate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimingSense::NonUnate => "non_unate",
            TimingSense::PositiveUnate => "positive_unate",
            TimingSense::NegativeUnate => "negative_unate",
        }
    }

    /// Whether an `input` edge can produce an `output` edge under this sense.
    pub fn admits(self, input: Transition, output: Transition) -> bool {
        match self {
            TimingSense::NonUnate => true,
            TimingSense::PositiveUnate => input == output,
            TimingSense::NegativeUnate => input != output,
        }
    }
}

impl Display for TimingSense {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimingSense {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        timing_senses()
            .get(s)
            .copied()
            .ok_or_else(|| UnknownKeyword::new("timing_sense", s))
    }
}

/// The `timing_type` attribute of a Liberty `timing` group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimingType {
    Combinational,
    CombinationalRise,
    CombinationalFall,
    ThreeStateDisable,
    ThreeStateDisableRise,
    ThreeStateDisableFall,
    ThreeStateEnable,
    ThreeStateEnableRise,
    ThreeStateEnableFall,
    RisingEdge,
    FallingEdge,
    Preset,
    Clear,
    HoldRising,
    HoldFalling,
    SetupRising,
    SetupFalling,
    RecoveryRising,
    RecoveryFalling,
    SkewRising,
    SkewFalling,
    RemovalRising,
    RemovalFalling,
    MinPulseWidth,
    MinimumPeriod,
    MaxClockTreePath,
    MinClockTreePath,
    NonSeqSetupRising,
    NonSeqSetupFalling,
    NonSeqHoldRising,
    NonSeqHoldFalling,
    NochangeHighHigh,
    NochangeHighLow,
    NochangeLowHigh,
    NochangeLowLow,
}

/// Keyword of every timing type, in declaration order.
const TIMING_TYPE_KEYWORDS: [(&str, TimingType); 35] = [
    ("combinational", TimingType::Combinational),
    ("combinational_rise", TimingType::CombinationalRise),
    ("combinational_fall", TimingType::CombinationalFall),
    ("three_state_disable", TimingType::ThreeStateDisable),
    ("three_state_disable_rise", TimingType::ThreeStateDisableRise),
    ("three_state_disable_fall", TimingType::ThreeStateDisableFall),
    ("three_state_enable", TimingType::ThreeStateEnable),
    ("three_state_enable_rise", TimingType::ThreeStateEnableRise),
    ("three_state_enable_fall", TimingType::ThreeStateEnableFall),
    ("rising_edge", TimingType::RisingEdge),
    ("falling_edge", TimingType::FallingEdge),
    ("preset", TimingType::Preset),
    ("clear", TimingType::Clear),
    ("hold_rising", TimingType::HoldRising),
    ("hold_falling", TimingType::HoldFalling),
    ("setup_rising", TimingType::SetupRising),
    ("setup_falling", TimingType::SetupFalling),
    ("recovery_rising", TimingType::RecoveryRising),
    ("recovery_falling", TimingType::RecoveryFalling),
    ("skew_rising", TimingType::SkewRising),
    ("skew_falling", TimingType::SkewFalling),
    ("removal_rising", TimingType::RemovalRising),
    ("removal_falling", TimingType::RemovalFalling),
    ("min_pulse_width", TimingType::MinPulseWidth),
    ("minimum_period", TimingType::MinimumPeriod),
    ("max_clock_tree_path", TimingType::MaxClockTreePath),
    ("min_clock_tree_path", TimingType::MinClockTreePath),
    ("non_seq_setup_rising", TimingType::NonSeqSetupRising),
    ("non_seq_setup_falling", TimingType::NonSeqSetupFalling),
    ("non_seq_hold_rising", TimingType::NonSeqHoldRising),
    ("non_seq_hold_falling", TimingType::NonSeqHoldFalling),
    ("nochange_high_high", TimingType::NochangeHighHigh),
    ("nochange_high_low", TimingType::NochangeHighLow),
    ("nochange_low_high", TimingType::NochangeLowHigh),
    ("nochange_low_low", TimingType::NochangeLowLow),
];

impl TimingType {
    pub const COUNT: usize = TIMING_TYPE_KEYWORDS.len();

    /// Every timing type, in declaration order.
    pub fn all() -> impl Iterator<Item = TimingType> {
        TIMING_TYPE_KEYWORDS.iter().map(|&(_, ty)| ty)
    }

    pub fn as_str(self) -> &'static str {
        TIMING_TYPE_KEYWORDS[self as usize].0
    }
}

impl Display for TimingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimingType {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        timing_types()
            .get(s)
            .copied()
            .ok_or_else(|| UnknownKeyword::new("timing_type", s))
    }
}

static TIMING_TYPES: Lazy<FxHashMap<&'static str, TimingType>> =
    Lazy::new(|| TIMING_TYPE_KEYWORDS.iter().copied().collect());

static TIMING_SENSES: Lazy<FxHashMap<&'static str, TimingSense>> =
    Lazy::new(|| TimingSense::ALL.iter().map(|&sense| (sense.as_str(), sense)).collect());

/// Liberty `timing_type` keyword -> [`TimingType`].
pub fn timing_types() -> &'static FxHashMap<&'static str, TimingType> {
    &TIMING_TYPES
}

/// Liberty `timing_sense` keyword -> [`TimingSense`].
pub fn timing_senses() -> &'static FxHashMap<&'static str, TimingSense> {
    &TIMING_SENSES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_type_keywords_round_trip() {
        assert_eq!(timing_types().len(), 35);
        for (keyword, ty) in timing_types() {
            assert_eq!(ty.to_string(), *keyword);
            assert_eq!(keyword.parse::<TimingType>(), Ok(*ty));
        }
    }

    #[test]
    fn test_keyword_table_follows_declaration_order() {
        for (i, ty) in TimingType::all().enumerate() {
            assert_eq!(ty as usize, i);
        }
        assert_eq!(TimingType::all().count(), TimingType::COUNT);
    }

    #[test]
    fn test_timing_sense_keywords_round_trip() {
        assert_eq!(timing_senses().len(), 3);
        for (keyword, sense) in timing_senses() {
            assert_eq!(sense.to_string(), *keyword);
        }
        assert_eq!("positive_unate".parse::<TimingSense>(), Ok(TimingSense::PositiveUnate));
    }

    #[test]
    fn test_unknown_keyword_is_not_found() {
        assert!(timing_types().get("setup").is_none());
        assert!(timing_types().get("Combinational").is_none());
        assert!(timing_senses().get("unate").is_none());

        let err = "rising".parse::<TimingType>().unwrap_err();
        assert_eq!(err, UnknownKeyword::new("timing_type", "rising"));
        assert_eq!(err.to_string(), "unknown timing_type keyword `rising`");
    }

    #[test]
    fn test_sense_admits() {
        for i in Transition::ALL {
            for o in Transition::ALL {
                assert!(TimingSense::NonUnate.admits(i, o));
                assert_eq!(TimingSense::PositiveUnate.admits(i, o), i == o);
                assert_eq!(TimingSense::NegativeUnate.admits(i, o), i != o);
            }
        }
    }
}
