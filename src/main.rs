use std::fs::read_to_string;

use itertools::Itertools;
use liberty_timing::arcfile::load_arcs;
use liberty_timing::{Timing, Transition};
use ordered_float::OrderedFloat;

struct DumpConfig {
    time_scale: f32,
    cap_scale: f32,
    input_slew: f32,
    output_load: f32,
}

fn env_f32(name: &str, default: f32) -> f32 {
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .unwrap_or_else(|_| panic!("{} is not a number: {:?}", name, v)),
        Err(_) => default,
    }
}

impl DumpConfig {
    fn from_env() -> Self {
        Self {
            time_scale: env_f32("TIME_SCALE", 1.0),
            cap_scale: env_f32("CAP_SCALE", 1.0),
            input_slew: env_f32("INPUT_SLEW", 0.0),
            output_load: env_f32("OUTPUT_LOAD", 0.0),
        }
    }
}

/// One line per characterized (input, output) pair, e.g. `↗↘ delay=0.120 slew=0.050`.
fn describe_pairs(timing: &Timing, config: &DumpConfig) -> Vec<String> {
    let mut lines = vec![];
    for (input, out) in Transition::ALL.into_iter().cartesian_product(Transition::ALL) {
        let values = [
            ("delay", timing.delay(input, out, config.input_slew, config.output_load)),
            ("slew", timing.slew(input, out, config.input_slew, config.output_load)),
            ("constraint", timing.constraint(input, out, config.input_slew, config.output_load)),
        ];
        let defined = values
            .iter()
            .filter_map(|(name, v)| v.map(|v| format!("{}={:.3}", name, v)))
            .join(" ");
        if !defined.is_empty() {
            lines.push(format!("{}{} {}", input, out, defined));
        }
    }
    lines
}

fn worst_delay(timing: &Timing, config: &DumpConfig) -> Option<OrderedFloat<f32>> {
    Transition::ALL
        .into_iter()
        .cartesian_product(Transition::ALL)
        .filter_map(|(i, o)| timing.delay(i, o, config.input_slew, config.output_load))
        .map(OrderedFloat)
        .max()
}

fn main() {
    clilog::init_stderr_color_debug();

    let path_to_parse = std::env::args_os().nth(1).expect("No argument given");

    let content = read_to_string(&path_to_parse).expect("Could not read arc file");

    let mut arcs = match load_arcs(&content) {
        Ok(arcs) => arcs,
        Err(e) => panic!("Could not load arcs from {:?}: {}", path_to_parse, e),
    };

    let config = DumpConfig::from_env();

    for arc in &mut arcs {
        arc.scale_time(config.time_scale);
        arc.scale_capacitance(config.cap_scale);
    }

    clilog::info!(
        "{} arcs, time scale {}, capacitance scale {}",
        arcs.len(),
        config.time_scale,
        config.cap_scale
    );

    // by related pin (A2 before A10), then slowest first
    arcs.sort_by(|a, b| {
        numeric_sort::cmp(&a.related_pin, &b.related_pin)
            .then_with(|| worst_delay(b, &config).cmp(&worst_delay(a, &config)))
    });

    for arc in &arcs {
        println!("{}", arc);
        for line in describe_pairs(arc, &config) {
            println!("  {}", line);
        }
        if !arc.is_input_transition_defined() {
            println!("  (no characterized transition)");
        }
    }
}
