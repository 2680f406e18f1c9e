use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use num_complex::Complex64;
use serde::Serialize;
use smith_core::chart::{ChartConfig, ImpedanceReadout, ReturnLossTarget};
use smith_core::frequency::FrequencyUnit;
use smith_core::math;
use smith_core::matching::{Element, LoadPolicy, Placement};
use smith_core::{Component, SmithChart};

#[derive(Parser)]
#[command(name = "smith", about = "Smith chart calculations for impedance matching")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Map an impedance R + jX to Γ
    ZToGamma {
        #[arg(allow_hyphen_values = true)]
        r: f64,
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(long, default_value_t = 50.0)]
        z0: f64,
    },
    /// Map a reflection coefficient to an impedance, with its chart readout
    GammaToZ {
        #[arg(allow_hyphen_values = true)]
        re: f64,
        #[arg(allow_hyphen_values = true)]
        im: f64,
        #[arg(long, default_value_t = 50.0)]
        z0: f64,
    },
    /// Convert between |Γ| and dB
    Target {
        /// |Γ| in [0, 1]
        #[arg(long, conflicts_with = "db")]
        magnitude: Option<f64>,
        /// Return level in dB, at most 0
        #[arg(long, allow_hyphen_values = true)]
        db: Option<f64>,
    },
    /// Generate the chart grid contours
    Contours {
        /// Chart config JSON (defaults used if not specified)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the reference impedance
        #[arg(long)]
        z0: Option<f64>,
    },
    /// Build a matching network and print its trajectory
    Match {
        /// Load resistance in ohms
        #[arg(allow_hyphen_values = true)]
        r: f64,
        /// Load reactance in ohms
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(long, default_value_t = 50.0)]
        z0: f64,
        /// Operating frequency
        #[arg(short, long)]
        frequency: f64,
        /// Frequency unit (Hz, kHz, MHz, GHz, THz)
        #[arg(short, long, default_value = "Hz")]
        unit: FrequencyUnit,
        /// Component as KIND:VALUE, e.g. series-inductor:2.2e-9 (repeatable, applied in order)
        #[arg(short = 'c', long = "component")]
        components: Vec<ComponentArg>,
        /// Reject loads with negative resistance
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Clone, Copy)]
struct ComponentArg {
    placement: Placement,
    element: Element,
    value: f64,
}

impl FromStr for ComponentArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| format!("expected KIND:VALUE, got {s}"))?;
        let (placement, element) = match kind.to_lowercase().replace('_', "-").as_str() {
            "series-inductor" | "series-l" => (Placement::Series, Element::Inductor),
            "series-capacitor" | "series-c" => (Placement::Series, Element::Capacitor),
            "shunt-inductor" | "shunt-l" => (Placement::Shunt, Element::Inductor),
            "shunt-capacitor" | "shunt-c" => (Placement::Shunt, Element::Capacitor),
            k => {
                return Err(format!(
                    "Unknown component: {k}. Use: series-inductor, series-capacitor, shunt-inductor, shunt-capacitor"
                ))
            }
        };
        let value = value
            .parse::<f64>()
            .map_err(|e| format!("invalid component value {value}: {e}"))?;
        Ok(Self {
            placement,
            element,
            value,
        })
    }
}

#[derive(Serialize)]
struct GammaReport {
    impedance: Complex64,
    gamma: Complex64,
    magnitude: f64,
    db: f64,
    /// None for |Γ| > 1
    vswr: Option<f64>,
}

#[derive(Serialize)]
struct ImpedanceReport {
    #[serde(flatten)]
    readout: ImpedanceReadout,
    label: String,
}

#[derive(Serialize)]
struct TargetReport {
    magnitude: f64,
    db: f64,
    return_loss_db: f64,
    vswr: f64,
}

#[derive(Serialize)]
struct MatchStep {
    component: Option<String>,
    impedance: Complex64,
    gamma: Complex64,
}

#[derive(Serialize)]
struct MatchReport {
    z0: f64,
    frequency_hz: f64,
    steps: Vec<MatchStep>,
}

fn z_to_gamma(r: f64, x: f64, z0: f64) -> Result<GammaReport> {
    let impedance = Complex64::new(r, x);
    let gamma = math::impedance_to_gamma(impedance, z0)?;
    let magnitude = gamma.norm();
    Ok(GammaReport {
        impedance,
        gamma,
        magnitude,
        db: math::gamma_magnitude_to_db(magnitude)?,
        vswr: math::magnitude_2_vswr(magnitude).ok(),
    })
}

fn gamma_to_z(re: f64, im: f64, z0: f64) -> Result<ImpedanceReport> {
    let readout = ImpedanceReadout::at(Complex64::new(re, im), z0)?;
    Ok(ImpedanceReport {
        label: readout.to_string(),
        readout,
    })
}

fn target(magnitude: Option<f64>, db: Option<f64>) -> Result<TargetReport> {
    let t = match (magnitude, db) {
        (Some(m), None) => ReturnLossTarget::from_magnitude(m)?,
        (None, Some(d)) => ReturnLossTarget::from_db(d)?,
        (None, None) => ReturnLossTarget::default(),
        (Some(_), Some(_)) => bail!("pass either --magnitude or --db, not both"),
    };
    Ok(TargetReport {
        magnitude: t.magnitude(),
        db: t.db(),
        return_loss_db: t.return_loss_db(),
        vswr: t.vswr(),
    })
}

fn contours(config: Option<PathBuf>, z0: Option<f64>) -> Result<SmithChart> {
    let config = match config {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ChartConfig::from_json(&json)?
        }
        None => ChartConfig::default(),
    };
    let mut chart = SmithChart::new(config)?;
    if let Some(z0) = z0 {
        chart.set_reference_impedance(z0)?;
    }
    info!("generated {} contours", chart.contours().len());
    Ok(chart)
}

fn build_match(
    load: Complex64,
    z0: f64,
    frequency_hz: f64,
    components: &[ComponentArg],
    policy: LoadPolicy,
) -> Result<MatchReport> {
    let config = ChartConfig {
        z0,
        load_policy: policy,
        ..ChartConfig::default()
    };
    let chart = SmithChart::new(config)?;
    let mut net = chart.matching_network();
    net.set_load(load)?;

    for (i, arg) in components.iter().enumerate() {
        let component = Component::new(arg.placement, arg.element, arg.value, frequency_hz);
        net.add_component(component)
            .with_context(|| format!("component {} ({component})", i + 1))?;
    }

    let gammas = net.gamma_trajectory(z0)?;
    let labels = std::iter::once(None).chain(net.components().iter().map(|c| Some(c.to_string())));
    let steps = labels
        .zip(net.trajectory().iter().zip(gammas))
        .map(|(component, (&impedance, gamma))| MatchStep {
            component,
            impedance,
            gamma,
        })
        .collect();

    Ok(MatchReport {
        z0,
        frequency_hz,
        steps,
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Command::ZToGamma { r, x, z0 } => to_json(&z_to_gamma(r, x, z0)?, cli.pretty),
        Command::GammaToZ { re, im, z0 } => to_json(&gamma_to_z(re, im, z0)?, cli.pretty),
        Command::Target { magnitude, db } => to_json(&target(magnitude, db)?, cli.pretty),
        Command::Contours { config, z0 } => {
            let chart = contours(config, z0)?;
            to_json(chart.contours(), cli.pretty)
        }
        Command::Match {
            r,
            x,
            z0,
            frequency,
            unit,
            components,
            strict,
        } => {
            let policy = if strict {
                LoadPolicy::Strict
            } else {
                LoadPolicy::Permissive
            };
            let report = build_match(
                Complex64::new(r, x),
                z0,
                unit.to_hz(frequency),
                &components,
                policy,
            )?;
            to_json(&report, cli.pretty)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let output = cli.output.clone();

    let json = run(cli)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, &json)
            .with_context(|| format!("writing {}", output_path.display()))?;
        eprintln!("Written to {}", output_path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}
