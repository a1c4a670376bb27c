use clap::{Parser, Subcommand, ValueEnum};
use sq_app::{AppResult, DaySimulation, DocumentData, prepare_quote, run_quote, validate_quote};
use sq_catalog::Catalog;
use sq_core::format_money;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sq-cli")]
#[command(about = "SolarQuote CLI - Solar system sizing, pricing and dispatch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a quote file and the catalog it references
    Validate {
        /// Path to the quote YAML file
        quote_path: PathBuf,
    },
    /// Size and price a system
    Quote {
        /// Path to the quote YAML file
        quote_path: PathBuf,
        /// Print the full document as JSON
        #[arg(long)]
        json: bool,
        /// Also simulate a day and report its energy flows
        #[arg(long)]
        simulate: bool,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Simulate one synthetic day and export the 5-minute trace
    Simulate {
        /// Path to the quote YAML file
        quote_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = TraceFormat::Csv)]
        format: TraceFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the 25-year savings forecast
    Forecast {
        /// Path to the quote YAML file
        quote_path: PathBuf,
    },
    /// List or dump an equipment catalog
    Catalog {
        /// Catalog YAML file (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Dump the catalog as YAML instead of listing it
        #[arg(long)]
        yaml: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TraceFormat {
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { quote_path } => cmd_validate(&quote_path),
        Commands::Quote {
            quote_path,
            json,
            simulate,
            output,
        } => cmd_quote(&quote_path, json, simulate, output.as_deref()),
        Commands::Simulate {
            quote_path,
            format,
            output,
        } => cmd_simulate(&quote_path, format, output.as_deref()),
        Commands::Forecast { quote_path } => cmd_forecast(&quote_path),
        Commands::Catalog { catalog, yaml } => cmd_catalog(catalog.as_deref(), yaml),
    }
}

fn cmd_validate(quote_path: &Path) -> AppResult<()> {
    println!("Validating quote: {}", quote_path.display());
    let prepared = prepare_quote(quote_path)?;
    validate_quote(&prepared)?;

    let request = &prepared.file.request;
    let panel = prepared.catalog.panel(request.panel.as_deref());
    let battery = prepared.catalog.battery(request.battery.as_deref());
    println!("✓ Quote is valid");
    println!("  Panel:   {}", panel.brand);
    println!("  Battery: {} x{}", battery.brand, request.battery_count);
    Ok(())
}

fn cmd_quote(
    quote_path: &Path,
    json: bool,
    simulate: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let prepared = prepare_quote(quote_path)?;
    validate_quote(&prepared)?;
    let response = run_quote(&prepared, simulate)?;

    if json {
        let text = serde_json::to_string_pretty(&response)?;
        return emit(&text, output);
    }

    let summary = render_summary(&response.document, response.simulation.as_ref());
    emit(&summary, output)
}

fn render_summary(doc: &DocumentData, simulation: Option<&DaySimulation>) -> String {
    let design = &doc.calculate_design;
    let price = &doc.price_design;
    let est = &doc.system_estimates;

    let mut out = String::new();
    out.push_str(&format!("Quote {}\n", doc.quote_id));
    out.push_str("\nDesign:\n");
    out.push_str(&format!(
        "  Utility usage:  {:.1} kWh/month ({:.2} kWh/day)\n",
        design.figures.utility_monthly_kwh, design.figures.utility_daily_usage_kwh
    ));
    out.push_str(&format!(
        "  System size:    {:.2} kW\n",
        design.suggested_size_kw
    ));
    out.push_str(&format!(
        "  Panels:         {} x {} ({:.1} m²)\n",
        doc.solar_panels.count, doc.solar_panels.panel.brand, doc.solar_panels.total_area_m2
    ));
    out.push_str(&format!(
        "  Battery:        {} x {} ({:.1} kWh)\n",
        doc.battery.count, doc.battery.spec.brand, doc.battery.total_capacity_kwh
    ));
    if let Some(inv) = &design.inverter {
        out.push_str(&format!(
            "  Inverter:       {} ({:.1} kW)\n",
            inv.brand, inv.rated_power_kw
        ));
    }

    out.push_str("\nPrice:\n");
    out.push_str(&format!("  Solar:          {}\n", format_money(price.solar)));
    out.push_str(&format!("  Labour:         {}\n", format_money(price.labour)));
    out.push_str(&format!(
        "  Net metering:   {}\n",
        format_money(price.net_metering)
    ));
    out.push_str(&format!("  Inverter:       {}\n", format_money(price.inverter)));
    out.push_str(&format!("  Total:          {}\n", format_money(price.total)));

    out.push_str("\nEstimates:\n");
    out.push_str(&format!(
        "  Generation:     {:.1} kWh/day, {:.0} kWh/year\n",
        est.daily_generation_kwh, est.annual_generation_kwh
    ));
    out.push_str(&format!(
        "  Savings:        {} per month\n",
        format_money(est.monthly_savings)
    ));
    out.push_str(&format!(
        "  New bill:       {} per month\n",
        format_money(est.estimated_new_monthly_bill)
    ));
    match est.payback_year {
        Some(year) => out.push_str(&format!("  Payback:        year {}\n", year)),
        None => out.push_str("  Payback:        beyond 25 years\n"),
    }
    out.push_str(&format!(
        "  Lifetime:       {}\n",
        format_money(est.lifetime_savings)
    ));

    out.push_str("\nEnvironment:\n");
    out.push_str(&format!(
        "  CO2e avoided:   {:.2} t/year, {:.1} t lifetime\n",
        doc.environment.annual_co2e_tonnes, doc.environment.lifetime_co2e_tonnes
    ));
    out.push_str(&format!(
        "  Seedlings:      {:.0}\n",
        doc.environment.tree_seedlings_equivalent
    ));

    if let Some(sim) = simulation {
        let summary = &sim.result.summary;
        out.push_str("\nDay simulation:\n");
        out.push_str(&format!("  Solar:          {:.2} kWh\n", summary.solar_kwh));
        out.push_str(&format!("  Load:           {:.2} kWh\n", summary.load_kwh));
        out.push_str(&format!(
            "  Grid:           {:.2} kWh import, {:.2} kWh export\n",
            summary.import_kwh, summary.export_kwh
        ));
        out.push_str(&format!(
            "  Battery:        {:.2} kWh charged, {:.2} kWh discharged\n",
            summary.charge_kwh, summary.discharge_kwh
        ));
        out.push_str(&format!(
            "  Self-use:       {:.1}%\n",
            100.0 * summary.self_consumption_ratio
        ));
    }
    out
}

fn cmd_simulate(quote_path: &Path, format: TraceFormat, output: Option<&Path>) -> AppResult<()> {
    let prepared = prepare_quote(quote_path)?;
    validate_quote(&prepared)?;
    let response = run_quote(&prepared, true)?;

    let Some(sim) = response.simulation else {
        return Ok(());
    };

    let summary = &sim.result.summary;
    eprintln!(
        "Simulated {} steps: solar {:.2} kWh, load {:.2} kWh, import {:.2} kWh, \
         export {:.2} kWh, self-consumption {:.1}%",
        sim.result.len(),
        summary.solar_kwh,
        summary.load_kwh,
        summary.import_kwh,
        summary.export_kwh,
        100.0 * summary.self_consumption_ratio
    );

    let text = match format {
        TraceFormat::Csv => trace_csv(&sim),
        TraceFormat::Json => serde_json::to_string_pretty(&sim)?,
    };
    emit(&text, output)
}

fn trace_csv(sim: &DaySimulation) -> String {
    let mut csv =
        String::from("minute,solar_kw,load_kw,soc_percent,battery_flow_kw,grid_flow_kw\n");
    let result = &sim.result;
    for (i, s) in sim.series.samples().iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            s.minute,
            s.solar_kw,
            s.load_kw,
            result.soc_percent[i],
            result.battery_flow_kw[i],
            result.grid_flow_kw[i]
        ));
    }
    csv
}

fn cmd_forecast(quote_path: &Path) -> AppResult<()> {
    let prepared = prepare_quote(quote_path)?;
    validate_quote(&prepared)?;
    let response = run_quote(&prepared, false)?;
    let est = &response.document.system_estimates;

    println!(
        "{:>4}  {:>14}  {:>10}  {:>10}  {:>14}  {:>16}",
        "Year", "Generation kWh", "Rate", "NM rate", "Savings", "Cumulative ROI"
    );
    for y in &est.forecast {
        println!(
            "{:>4}  {:>14.2}  {:>10.2}  {:>10.2}  {:>14}  {:>16}",
            y.year,
            y.solar_generation_kwh,
            y.electricity_rate,
            y.net_metering_rate,
            format_money(y.annual_savings),
            format_money(y.cumulative_roi)
        );
    }
    match est.payback_year {
        Some(year) => println!("\n✓ Pays back in year {}", year),
        None => println!("\nNo payback within the forecast horizon"),
    }
    Ok(())
}

fn cmd_catalog(catalog_path: Option<&Path>, yaml: bool) -> AppResult<()> {
    let catalog = match catalog_path {
        Some(path) => Catalog::load_yaml(path)?,
        None => Catalog::builtin(),
    };

    if yaml {
        print!("{}", catalog.to_yaml_string()?);
        return Ok(());
    }

    let mark = |recommended: bool| if recommended { " *" } else { "" };

    println!("Panels:");
    for p in catalog.panels() {
        println!(
            "  {} - {:.0} W, PR {:.2}, {:.2} m²{}",
            p.brand,
            p.rated_power_w,
            p.performance_ratio,
            p.area_m2,
            mark(p.recommended)
        );
    }
    println!("\nBatteries:");
    for b in catalog.batteries() {
        println!(
            "  {} - {:.1} kWh, {:.1}/{:.1} kW{}",
            b.brand,
            b.capacity_kwh,
            b.max_charge_kw,
            b.max_discharge_kw,
            mark(b.recommended)
        );
    }
    println!("\nInverters:");
    for i in catalog.inverters() {
        println!(
            "  {} - {:.1} kW, {:?}{}",
            i.brand,
            i.rated_power_kw,
            i.line_type,
            mark(i.recommended)
        );
    }
    println!("\n(* recommended)");
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, text)?;
        println!("✓ Written to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sq_app::{ProfileSettings, QuoteRequest, assemble_document, simulate_day};
    use sq_core::{
        BuildingType, LineType, LineVoltage, NetMetering, RoofType, SystemInputs, TimeOfUse,
    };

    fn document() -> DocumentData {
        let request = QuoteRequest::new(SystemInputs {
            building_type: BuildingType::Residential,
            monthly_bill: 10_000.0,
            time_of_use: TimeOfUse::DayTime,
            net_metering: NetMetering::Yes,
            roof_type: RoofType::Metal,
            line_type: LineType::SinglePhase,
            line_voltage: LineVoltage::V220,
            new_requested_monthly_bill: None,
        });
        assemble_document(&request, &Catalog::builtin()).unwrap()
    }

    #[test]
    fn text_summary_omits_simulation_when_not_requested() {
        let doc = document();
        let text = render_summary(&doc, None);
        assert!(text.contains("Estimates:"));
        assert!(!text.contains("Day simulation:"));
    }

    #[test]
    fn text_summary_reports_simulated_energy() {
        let doc = document();
        let sim = simulate_day(&doc, &ProfileSettings::default()).unwrap();
        let text = render_summary(&doc, Some(&sim));

        assert!(text.contains("Day simulation:"));
        let solar = format!("{:.2} kWh", sim.result.summary.solar_kwh);
        assert!(text.contains(&solar));
        assert!(text.contains("Self-use:"));
    }

    #[test]
    fn cli_accepts_simulate_without_json() {
        let cli = Cli::try_parse_from(["sq-cli", "quote", "demos/quote.yaml", "--simulate"])
            .unwrap();
        match cli.command {
            Commands::Quote { json, simulate, .. } => {
                assert!(simulate);
                assert!(!json);
            }
            _ => panic!("expected the quote command"),
        }
    }

    #[test]
    fn trace_csv_has_one_row_per_step() {
        let doc = document();
        let sim = simulate_day(&doc, &ProfileSettings::default()).unwrap();
        let csv = trace_csv(&sim);
        assert_eq!(csv.lines().count(), sim.series.len() + 1);
        assert!(csv.starts_with("minute,solar_kw"));
    }
}
