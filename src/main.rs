//! Fieldaxes - build and evaluate axis requests from the command line.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use fieldaxes::data::{Axis, Field};
use fieldaxes::selection::{
    Action, AxisCatalog, AxisChoice, AxisSelectionRequest, ExtractionRequest, Operation,
};
use fieldaxes::util::formatters::{format_coordinates, format_table, format_value};
use fieldaxes::util::{copy_requests, REQUEST_SEPARATOR};
use fieldaxes::LabelConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "fieldaxes")]
#[command(about = "Resolve axis selection and extraction requests over a physical field", long_about = None)]
struct Args {
    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the axes a plot slot can select
    Axes {
        #[command(flatten)]
        field: FieldArgs,

        /// Plot slot (X, Y, Z, ...)
        #[arg(long, default_value = "X")]
        slot: String,
    },
    /// Build plot and extraction requests and evaluate them on a synthetic field
    Plot(PlotArgs),
}

#[derive(clap::Args, Debug)]
struct FieldArgs {
    /// Axis as name:start:stop:count[:unit] (repeatable)
    #[arg(long = "axis", required = true, value_parser = parse_axis_spec)]
    axes: Vec<Axis>,

    /// Flag an axis as overlay (repeatable)
    #[arg(long)]
    overlay: Vec<String>,

    /// Quantity name
    #[arg(long, default_value = "field")]
    name: String,

    /// Quantity unit
    #[arg(long, default_value = "")]
    unit: String,
}

impl FieldArgs {
    fn build(&self) -> Result<Field> {
        let mut axes = self.axes.clone();
        for name in &self.overlay {
            let axis = axes
                .iter_mut()
                .find(|axis| axis.name == *name)
                .ok_or_else(|| anyhow!("--overlay {}: no such axis", name))?;
            axis.is_overlay = true;
        }
        Ok(Field::synthetic(&self.name, &self.unit, axes))
    }
}

#[derive(clap::Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    field: FieldArgs,

    /// X axis (tag or label); first selectable axis by default
    #[arg(long)]
    x: Option<String>,

    /// X action: none, fft or filter
    #[arg(long, default_value = "none", value_parser = parse_action)]
    x_action: Action,

    /// X unit or normalization
    #[arg(long)]
    x_unit: Option<String>,

    /// Y axis (tag or label)
    #[arg(long)]
    y: Option<String>,

    /// Y action: none, fft or filter
    #[arg(long, default_value = "none", value_parser = parse_action)]
    y_action: Action,

    /// Y unit or normalization
    #[arg(long)]
    y_unit: Option<String>,

    /// Slice AXIS at the coordinate nearest VALUE, in the printed unit (AXIS=VALUE)
    #[arg(long, value_parser = parse_assignment)]
    slice: Vec<(String, String)>,

    /// Slice AXIS at INDEX, negative from the end (AXIS=INDEX)
    #[arg(long, value_parser = parse_assignment, allow_hyphen_values = true)]
    index: Vec<(String, String)>,

    /// Reduce AXIS with rms, rss, sum or mean (AXIS=OP)
    #[arg(long, value_parser = parse_assignment)]
    reduce: Vec<(String, String)>,

    /// Print the extracted values
    #[arg(long)]
    values: bool,

    /// Copy the joined request to the clipboard
    #[arg(long)]
    copy: bool,
}

fn parse_axis_spec(spec: &str) -> std::result::Result<Axis, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    if !(4..=5).contains(&parts.len()) {
        return Err(format!("expected name:start:stop:count[:unit], got '{}'", spec));
    }
    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("bad number '{}': {}", s, e))
    };
    let start = number(parts[1])?;
    let stop = number(parts[2])?;
    let count = parts[3]
        .parse::<usize>()
        .map_err(|e| format!("bad count '{}': {}", parts[3], e))?;
    let unit = parts.get(4).copied().unwrap_or("");
    Ok(Axis::linspace(parts[0], unit, start, stop, count))
}

fn parse_action(text: &str) -> std::result::Result<Action, String> {
    text.parse().map_err(|e: fieldaxes::FieldAxesError| e.to_string())
}

fn parse_assignment(text: &str) -> std::result::Result<(String, String), String> {
    text.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected AXIS=VALUE, got '{}'", text))
}

fn init_logging(log: Option<&PathBuf>) -> Result<()> {
    if let Some(log_path) = log {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else if std::env::var_os("RUST_LOG").is_some() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;
    tracing::info!("Starting fieldaxes");

    match args.command {
        Command::Axes { field, slot } => list_axes(&field.build()?, &slot),
        Command::Plot(plot) => run_plot(&plot)?,
    }

    tracing::info!("fieldaxes exited");
    Ok(())
}

fn list_axes(field: &Field, slot: &str) {
    let catalog = AxisCatalog::from_field(field, LabelConfig::default());
    let rows: Vec<Vec<String>> = catalog
        .build(slot)
        .iter()
        .map(|choice| match choice {
            AxisChoice::NoneSelected => vec![choice.to_string()],
            AxisChoice::Axis(tag) => {
                let mut request = AxisSelectionRequest::new(&catalog, slot);
                let units: Vec<&str> = match request.select_axis(tag) {
                    Ok(()) => request
                        .unit_options()
                        .iter()
                        .map(|option| option.label.as_str())
                        .collect(),
                    Err(_) => Vec::new(),
                };
                vec![
                    tag.clone(),
                    catalog.display_name(tag).to_string(),
                    catalog.dual_of(tag).unwrap_or("-").to_string(),
                    units.join(", "),
                    catalog.axis_for(tag).map_or(0, Axis::len).to_string(),
                ]
            },
        })
        .collect();
    print!(
        "{}",
        format_table(&["tag", "label", "dual", "units", "length"], &rows)
    );
}

fn configure_slot(
    request: &mut AxisSelectionRequest<'_>,
    axis: Option<&str>,
    action: Action,
    unit: Option<&str>,
) -> Result<()> {
    if let Some(axis) = axis {
        request.select_axis(axis)?;
    }
    if action != Action::None && !request.select_action(action) {
        eprintln!(
            "warning: {} ignored on slot {} ({})",
            action,
            request.slot(),
            request.tag().unwrap_or("None")
        );
    }
    if let Some(unit) = unit {
        request.select_unit(unit);
    }
    Ok(())
}

fn run_plot(args: &PlotArgs) -> Result<()> {
    let field = args.field.build()?;
    let catalog = AxisCatalog::from_field(&field, LabelConfig::default());

    let mut x = AxisSelectionRequest::new(&catalog, "X");
    configure_slot(&mut x, args.x.as_deref(), args.x_action, args.x_unit.as_deref())
        .context("X axis")?;

    let mut y = AxisSelectionRequest::new(&catalog, "Y");
    if let Some(tag) = x.tag() {
        y.remove_axis(tag);
    }
    configure_slot(&mut y, args.y.as_deref(), args.y_action, args.y_unit.as_deref())
        .context("Y axis")?;

    let plotted: Vec<&str> = [x.tag(), y.tag()]
        .into_iter()
        .flatten()
        .map(|tag| catalog.to_base(tag))
        .collect();

    let mut extractions: Vec<ExtractionRequest<'_>> = catalog
        .axes()
        .iter()
        .filter(|axis| !plotted.contains(&catalog.to_base(&axis.name)))
        .map(|axis| ExtractionRequest::new(&catalog, axis))
        .collect();

    let find = |name: &str| -> Result<usize> {
        let base = catalog.to_base(name);
        extractions
            .iter()
            .position(|e| e.axis().name == base || e.axis().name == name)
            .ok_or_else(|| anyhow!("{} is plotted or not an axis of the field", name))
    };

    let mut updates: Vec<(usize, String, Update)> = Vec::new();
    for (name, value) in &args.slice {
        updates.push((find(name)?, name.clone(), Update::Value(value.clone())));
    }
    for (name, value) in &args.index {
        updates.push((find(name)?, name.clone(), Update::Index(value.clone())));
    }
    for (name, value) in &args.reduce {
        updates.push((find(name)?, name.clone(), Update::Reduce(value.clone())));
    }

    for (position, name, update) in updates {
        let extraction = &mut extractions[position];
        let fourier = catalog.is_dual(&name) && extraction.axis().name != name;
        if fourier && !matches!(update, Update::Reduce(_)) {
            extraction.set_operation(Operation::SliceFourier)?;
        }
        match update {
            Update::Value(value) => {
                let value: f64 = value
                    .parse()
                    .with_context(|| format!("--slice {}: bad value", name))?;
                extraction.set_slice_display_value(value)?;
            },
            Update::Index(index) => {
                let index: isize = index
                    .parse()
                    .with_context(|| format!("--index {}: bad index", name))?;
                extraction.set_slice_index(index)?;
            },
            Update::Reduce(op) => {
                let operation: Operation = op.parse()?;
                if operation.is_slice() || operation == Operation::OverlayFilter {
                    bail!("--reduce {}: {} is not a reduction", name, op);
                }
                extraction.set_operation(operation)?;
            },
        }
    }

    let mut requests = vec![x.to_request()];
    println!("X: {}", x.to_request());
    if y.tag().is_some() {
        println!("Y: {}", y.to_request());
        requests.push(y.to_request());
    }
    for extraction in &extractions {
        if let Some(request) = extraction.format() {
            match extraction.slice_value() {
                Some(value) if extraction.operation().is_slice() => println!(
                    "{}: {} ({} {})",
                    extraction.axis().name,
                    request,
                    format_value(value),
                    extraction.unit()
                ),
                _ => println!("{}: {}", extraction.axis().name, request),
            }
            requests.push(request);
        }
    }

    let joined = requests.join(REQUEST_SEPARATOR);
    println!("request: {}", joined);

    let refs: Vec<&str> = requests.iter().map(String::as_str).collect();
    let result = field
        .get_along(&refs, catalog.labels())
        .context("Failed to evaluate request")?;

    println!("shape: {:?}", result.values.shape());
    for axis in &result.axes {
        println!(
            "  {} {{{}}}: {}",
            axis.name,
            axis.unit,
            format_coordinates(&axis.values, 6)
        );
    }
    let stats = result.stats();
    if let (Some((min, max)), Some(mean)) = (stats.min_max, stats.mean) {
        println!(
            "min: {}  max: {}  mean: {}  std: {}",
            format_value(min),
            format_value(max),
            format_value(mean),
            stats.std.map(format_value).unwrap_or_else(|| "-".to_string())
        );
    }
    if args.values {
        for v in result.values.iter() {
            println!("{}", format_value(*v));
        }
    }

    if args.copy {
        copy_requests(&requests).context("Failed to copy request")?;
        println!("Request copied!");
    }
    Ok(())
}

#[derive(Debug)]
enum Update {
    Value(String),
    Index(String),
    Reduce(String),
}
